use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::state::MovieRequest;
use crate::catalog::{ErrorBody, GenresResponse, MoviesResponse};
use crate::db::{Genre, Movie};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("fetch task failed: {0}")]
    Task(String),
}

/// Source of the lists shown by the view.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_movies(&self, request: &MovieRequest) -> Result<Vec<Movie>, ClientError>;
    async fn fetch_genres(&self) -> Result<Vec<Genre>, ClientError>;
}

pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_movies(&self, request: &MovieRequest) -> Result<Vec<Movie>, ClientError> {
        let body: MoviesResponse = self.get_json(&request.path()).await?;
        Ok(body.movies)
    }

    async fn fetch_genres(&self) -> Result<Vec<Genre>, ClientError> {
        let body: GenresResponse = self.get_json("/api/genres").await?;
        Ok(body.genres)
    }
}
