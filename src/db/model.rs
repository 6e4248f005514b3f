use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub title: String,
    pub plot: String,
    pub image: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre: String,
    pub wikipedia_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Genre {
    pub id: i64,
    pub value: String,
}

/// A catalog row as it is stored, including the columns the API does not expose.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieRecord {
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(flatten)]
    pub movie: Movie,
}

/// Startup import file: `{ "genres": [...], "movies": [...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub movies: Vec<MovieRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Failed to read fixtures {0}: {1}")]
    FixturesRead(String, std::io::Error),
    #[error("Failed to parse fixtures {0}: {1}")]
    FixturesParse(String, serde_json::Error),
}

pub type DbResult<T> = Result<T, DbError>;
