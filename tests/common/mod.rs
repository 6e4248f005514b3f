#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use movie_catalog::config::{CatalogConfig, Config};
use movie_catalog::db::{Fixtures, Movie, MovieRecord, SqliteRepository};
use movie_catalog::server::{build_router, AppState};
use tower::ServiceExt;

pub const GENRES: [&str; 3] = ["Comedy", "Drama", "Horror"];

/// 60 movies. Release dates run backwards relative to insertion order,
/// ratings are scrambled, genres cycle through `GENRES`.
pub fn fixtures() -> Fixtures {
    let movies = (0..60)
        .map(|i| MovieRecord {
            release_date: Some(format!("{}-06-01", 2020 - i)),
            movie: Movie {
                title: format!("Movie {:02}", i),
                plot: format!("Plot of movie {}", i),
                image: format!("https://img.example/{}.jpg", i),
                year: Some(1960 + i),
                rating: Some(((i * 37) % 100) as f64 / 10.0),
                genre: GENRES[i as usize % GENRES.len()].to_string(),
                wikipedia_url: (i % 2 == 0).then(|| format!("https://en.wikipedia.org/wiki/Movie_{}", i)),
            },
        })
        .collect();

    Fixtures {
        genres: GENRES.iter().map(|g| g.to_string()).collect(),
        movies,
    }
}

pub async fn build_test_app(catalog: CatalogConfig) -> Router {
    build_test_app_with(fixtures(), catalog).await
}

pub async fn build_test_app_with(fixtures: Fixtures, catalog: CatalogConfig) -> Router {
    let repo = SqliteRepository::in_memory().await.unwrap();
    repo.import_fixtures(&fixtures).await.unwrap();

    let config = Config {
        catalog,
        ..Default::default()
    };
    build_router(AppState::new(config, Arc::new(repo)))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = get(app, uri).await;
    let status = response.status();
    (status, body_json(response).await)
}
