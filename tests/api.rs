//! HTTP behaviour of the catalog endpoints.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, build_test_app_with, get, get_json};
use movie_catalog::config::{CatalogConfig, GenreFilterMode};
use movie_catalog::db::Fixtures;
use serde_json::Value;

fn movies(json: &Value) -> &Vec<Value> {
    json["movies"].as_array().expect("movies array")
}

fn field_values<'a>(json: &'a Value, field: &str) -> Vec<&'a Value> {
    movies(json).iter().map(|m| &m[field]).collect()
}

fn is_sorted_by<F>(values: &[&Value], cmp: F) -> bool
where
    F: Fn(&Value, &Value) -> bool,
{
    values.windows(2).all(|w| cmp(w[0], w[1]))
}

#[tokio::test]
async fn movies_default_order_is_release_date_ascending() {
    let app = build_test_app(CatalogConfig::default()).await;
    let (status, json) = get_json(app, "/api/movies").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(movies(&json).len(), 50);
    // Release dates run backwards from insertion order.
    assert_eq!(movies(&json)[0]["title"], "Movie 59");
    assert_eq!(movies(&json)[49]["title"], "Movie 10");
}

#[tokio::test]
async fn movies_json_shape() {
    let app = build_test_app(CatalogConfig::default()).await;
    let (_, json) = get_json(app, "/api/movies?sort=title&order=asc").await;

    let first = movies(&json)[0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    keys.sort();
    assert_eq!(
        keys,
        ["genre", "image", "plot", "rating", "title", "wikipedia_url", "year"]
    );
    assert_eq!(first["title"], "Movie 00");
    assert_eq!(first["year"], 1960);
    assert_eq!(first["genre"], "Comedy");
}

#[tokio::test]
async fn movies_sorted_by_every_allowed_field() {
    for (field, key) in [
        ("year", "year"),
        ("rating", "rating"),
        ("title", "title"),
    ] {
        for order in ["asc", "desc"] {
            let app = build_test_app(CatalogConfig::default()).await;
            let uri = format!("/api/movies?sort={}&order={}", field, order);
            let (status, json) = get_json(app, &uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);

            let values = field_values(&json, key);
            assert_eq!(values.len(), 50, "{}", uri);

            let ascending = |a: &Value, b: &Value| match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a <= b,
                _ => a.as_str() <= b.as_str(),
            };
            let sorted = if order == "asc" {
                is_sorted_by(&values, ascending)
            } else {
                is_sorted_by(&values, |a, b| ascending(b, a))
            };
            assert!(sorted, "{} not sorted", uri);
        }
    }
}

#[tokio::test]
async fn movies_sorted_by_release_date() {
    let app = build_test_app(CatalogConfig::default()).await;
    let (_, json) = get_json(app, "/api/movies?sort=release_date&order=desc").await;
    // Newest release date belongs to the first inserted movie.
    assert_eq!(movies(&json)[0]["title"], "Movie 00");
}

#[tokio::test]
async fn movies_top_rank() {
    let app = build_test_app(CatalogConfig::default()).await;
    let (_, json) = get_json(app, "/api/movies?sort=rating&order=desc").await;
    let ratings: Vec<f64> = field_values(&json, "rating")
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    assert!(ratings.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn movies_rejects_unknown_sort() {
    let app = build_test_app(CatalogConfig::default()).await;
    let (status, json) =
        get_json(app, "/api/movies?sort=id%3B%20DROP%20TABLE%20movies&order=asc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("sort field"));

    let app = build_test_app(CatalogConfig::default()).await;
    let (status, _) = get_json(app, "/api/movies?sort=year&order=sideways").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn movies_sort_without_order_uses_default() {
    let app = build_test_app(CatalogConfig::default()).await;
    let (status, json) = get_json(app, "/api/movies?sort=rating").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(movies(&json)[0]["title"], "Movie 59");
}

#[tokio::test]
async fn movies_genre_ignored_by_default() {
    let app = build_test_app(CatalogConfig::default()).await;
    let (_, json) = get_json(app, "/api/movies?sort=year&order=asc&genre=Comedy").await;
    let genres = field_values(&json, "genre");
    assert_eq!(genres.len(), 50);
    assert!(genres.iter().any(|g| *g != "Comedy"));
}

#[tokio::test]
async fn movies_genre_filtered_on_server_when_configured() {
    let catalog = CatalogConfig {
        genre_filter: GenreFilterMode::Server,
        ..Default::default()
    };
    let app = build_test_app(catalog).await;
    let (_, json) = get_json(app, "/api/movies?genre=Comedy").await;
    let genres = field_values(&json, "genre");
    assert_eq!(genres.len(), 20);
    assert!(genres.iter().all(|g| *g == "Comedy"));
}

#[tokio::test]
async fn movies_limit_is_configurable() {
    let catalog = CatalogConfig {
        limit: 5,
        ..Default::default()
    };
    let app = build_test_app(catalog).await;
    let (_, json) = get_json(app, "/api/movies").await;
    assert_eq!(movies(&json).len(), 5);
}

#[tokio::test]
async fn genres_listed() {
    let app = build_test_app(CatalogConfig::default()).await;
    let (status, json) = get_json(app, "/api/genres").await;
    assert_eq!(status, StatusCode::OK);

    let genres = json["genres"].as_array().unwrap();
    assert_eq!(genres.len(), 3);
    assert_eq!(genres[0]["id"], 1);
    assert_eq!(genres[0]["value"], "Comedy");
}

#[tokio::test]
async fn genres_capped_at_fifty() {
    let fixtures = Fixtures {
        genres: (0..60).map(|i| format!("Genre {:02}", i)).collect(),
        movies: Vec::new(),
    };
    let app = build_test_app_with(fixtures, CatalogConfig::default()).await;
    let (status, json) = get_json(app, "/api/genres").await;
    assert_eq!(status, StatusCode::OK);

    let genres = json["genres"].as_array().unwrap();
    assert_eq!(genres.len(), 50);
    assert_eq!(genres[0]["value"], "Genre 00");
    assert_eq!(genres[49]["value"], "Genre 49");
}

#[tokio::test]
async fn paths_are_normalized() {
    let app = build_test_app(CatalogConfig::default()).await;
    let (status, json) = get_json(app, "/api//genres/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["genres"].is_array());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app(CatalogConfig::default()).await;
    let response = get(app, "/api/directors").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
