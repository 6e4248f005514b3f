use crate::catalog::{SortField, SortOrder, SortSpec};

/// The fixed sort buttons offered above the movie grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    AllFilms,
    TopRank,
    LatestReleases,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::AllFilms, Preset::TopRank, Preset::LatestReleases];

    pub fn label(self) -> &'static str {
        match self {
            Preset::AllFilms => "All films",
            Preset::TopRank => "Top rank",
            Preset::LatestReleases => "Latest releases",
        }
    }

    pub fn sort(self) -> SortSpec {
        match self {
            Preset::AllFilms => SortSpec::new(SortField::Year, SortOrder::Asc),
            Preset::TopRank => SortSpec::new(SortField::Rating, SortOrder::Desc),
            Preset::LatestReleases => SortSpec::new(SortField::Year, SortOrder::Desc),
        }
    }
}
