use serde::{Deserialize, Serialize};

use crate::db::{Genre, Movie};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviesResponse {
    pub movies: Vec<Movie>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenresResponse {
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
