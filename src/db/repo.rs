use async_trait::async_trait;

use super::model::*;
use crate::catalog::MovieQuery;

#[async_trait]
pub trait MovieRepo: Send + Sync {
    async fn list_movies(&self, query: &MovieQuery) -> DbResult<Vec<Movie>>;
}

#[async_trait]
pub trait GenreRepo: Send + Sync {
    async fn list_genres(&self, limit: u32) -> DbResult<Vec<Genre>>;
}

pub trait Repository: MovieRepo + GenreRepo + Send + Sync {}

impl<T: MovieRepo + GenreRepo + Send + Sync> Repository for T {}
