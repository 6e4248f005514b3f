use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{CatalogConfig, GenreFilterMode};
use crate::util::QueryParams;

/// Columns a client may order `/api/movies` by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Year,
    Rating,
    ReleaseDate,
    Title,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Year,
        SortField::Rating,
        SortField::ReleaseDate,
        SortField::Title,
    ];

    /// Name used in the `sort` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Year => "year",
            SortField::Rating => "rating",
            SortField::ReleaseDate => "release_date",
            SortField::Title => "title",
        }
    }

    /// Column identifier used in ORDER BY.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Year => "m.year",
            SortField::Rating => "m.rating",
            SortField::ReleaseDate => "m.release_date",
            SortField::Title => "m.title",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| QueryError::UnknownSortField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(QueryError::UnknownSortOrder(s.to_string()))
        }
    }
}

/// A validated sort: field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("unsupported sort field: {0}")]
    UnknownSortField(String),
    #[error("unsupported sort order: {0}")]
    UnknownSortOrder(String),
}

/// Everything the movie list query depends on, after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieQuery {
    pub sort: Option<SortSpec>,
    /// Only set when the service is configured to filter by genre.
    pub genre: Option<String>,
    pub limit: u32,
}

impl MovieQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            sort: None,
            genre: None,
            limit,
        }
    }

    /// Build a query from the `sort`, `order` and `genre` request parameters.
    ///
    /// A sort applies only when both `sort` and `order` are non-empty. Values
    /// outside the allow-list are rejected rather than ignored.
    pub fn from_params(params: &QueryParams, catalog: &CatalogConfig) -> Result<Self, QueryError> {
        let sort = match (params.get_non_empty("sort"), params.get_non_empty("order")) {
            (Some(field), Some(order)) => Some(SortSpec::new(field.parse()?, order.parse()?)),
            _ => None,
        };

        let genre = match catalog.genre_filter {
            GenreFilterMode::Server => params.get_non_empty("genre").map(str::to_string),
            GenreFilterMode::Client => None,
        };

        Ok(Self {
            sort,
            genre,
            limit: catalog.limit,
        })
    }

    /// ORDER BY clause, assembled only from allow-listed identifiers.
    pub fn order_by(&self) -> String {
        match self.sort {
            Some(spec) => format!("{} {}, m.id ASC", spec.field.column(), spec.order.keyword()),
            None => "m.release_date ASC, m.id ASC".to_string(),
        }
    }
}
