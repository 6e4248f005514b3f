use std::fmt;

use crate::db::Movie;

const PLOT_EXCERPT_CHARS: usize = 80;

/// What the list area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Render {
    Loading,
    Error(String),
    Grid(Vec<MovieCard>),
}

/// One tile of the movie grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub title: String,
    pub image: String,
    pub alt: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub excerpt: String,
    /// Target of the "More" button.
    pub more_link: Option<String>,
}

impl MovieCard {
    pub fn has_meta(&self) -> bool {
        self.year.is_some() || self.rating.is_some()
    }
}

impl From<&Movie> for MovieCard {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            image: movie.image.clone(),
            alt: movie.title.clone(),
            // zero means unknown
            year: movie.year.filter(|y| *y != 0),
            rating: movie.rating.filter(|r| *r != 0.0),
            excerpt: excerpt(&movie.plot),
            more_link: movie
                .wikipedia_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
        }
    }
}

fn excerpt(plot: &str) -> String {
    let mut out: String = plot.chars().take(PLOT_EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}

impl fmt::Display for MovieCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if self.has_meta() {
            write!(f, " [")?;
            if let Some(year) = self.year {
                write!(f, "{}", year)?;
            }
            if let Some(rating) = self.rating {
                if self.year.is_some() {
                    write!(f, ", ")?;
                }
                write!(f, "★ {}", rating)?;
            }
            write!(f, "]")?;
        }
        writeln!(f)?;
        writeln!(f, "    {}", self.excerpt)?;
        if let Some(ref link) = self.more_link {
            writeln!(f, "    More: {}", link)?;
        }
        Ok(())
    }
}

impl fmt::Display for Render {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Render::Loading => writeln!(f, "Loading..."),
            Render::Error(message) => writeln!(f, "Error: {}", message),
            Render::Grid(cards) if cards.is_empty() => writeln!(f, "No movies."),
            Render::Grid(cards) => cards.iter().try_for_each(|card| write!(f, "{}", card)),
        }
    }
}
