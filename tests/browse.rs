//! The list view driven against a live server over HTTP.

mod common;

use movie_catalog::config::{CatalogConfig, GenreFilterMode};
use movie_catalog::view::{
    Action, CatalogClient, ClientError, HttpCatalogClient, ListController, ListView, MovieRequest,
    Preset, Render,
};

async fn spawn_server() -> String {
    spawn_server_with(CatalogConfig::default()).await
}

async fn spawn_server_with(catalog: CatalogConfig) -> String {
    let app = common::build_test_app(catalog).await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn top_rank_then_genre_filters_locally() {
    let base = spawn_server().await;
    let mut controller = ListController::new(HttpCatalogClient::new(&base).unwrap());

    controller.dispatch(Action::Mount);
    controller.settle().await;
    assert_eq!(controller.view().genres().len(), 3);
    assert_eq!(controller.view().movies().len(), 50);

    controller.dispatch(Action::ApplyPreset(Preset::TopRank));
    assert_eq!(controller.view().render(), Render::Loading);
    controller.settle().await;

    let ratings: Vec<f64> = controller
        .view()
        .movies()
        .iter()
        .map(|m| m.rating.unwrap())
        .collect();
    assert!(ratings.windows(2).all(|w| w[0] >= w[1]));

    let seq = controller.view().latest_seq();
    controller.dispatch(Action::SelectGenre("Comedy".to_string()));
    assert_eq!(controller.view().latest_seq(), seq);

    match controller.view().render() {
        Render::Grid(cards) => {
            assert!(!cards.is_empty());
            let visible: Vec<_> = controller.view().visible_movies().collect();
            assert_eq!(cards.len(), visible.len());
            assert!(visible.iter().all(|m| m.genre == "Comedy"));
        }
        other => panic!("expected grid, got {:?}", other),
    }
}

fn visible_genres(controller: &ListController<HttpCatalogClient>) -> Vec<String> {
    let mut genres: Vec<String> = controller
        .view()
        .visible_movies()
        .map(|m| m.genre.clone())
        .collect();
    genres.sort();
    genres.dedup();
    genres
}

#[tokio::test]
async fn server_side_genre_switch_refetches() {
    let base = spawn_server_with(CatalogConfig {
        genre_filter: GenreFilterMode::Server,
        ..Default::default()
    })
    .await;
    let client = HttpCatalogClient::new(&base).unwrap();
    let view = ListView::with_genre_filter(GenreFilterMode::Server);
    let mut controller = ListController::with_view(client, view);

    controller.dispatch(Action::Mount);
    controller.dispatch(Action::SelectGenre("Comedy".to_string()));
    controller.dispatch(Action::ApplyPreset(Preset::TopRank));
    controller.settle().await;
    assert_eq!(controller.view().visible_movies().count(), 20);
    assert_eq!(visible_genres(&controller), ["Comedy"]);

    controller.dispatch(Action::SelectGenre("Drama".to_string()));
    assert_eq!(controller.view().render(), Render::Loading);
    controller.settle().await;
    assert_eq!(controller.view().visible_movies().count(), 20);
    assert_eq!(visible_genres(&controller), ["Drama"]);

    controller.dispatch(Action::SelectGenre(String::new()));
    controller.settle().await;
    assert_eq!(controller.view().visible_movies().count(), 50);
    assert_eq!(visible_genres(&controller), ["Comedy", "Drama", "Horror"]);
}

#[tokio::test]
async fn latest_releases_over_http() {
    let base = spawn_server().await;
    let client = HttpCatalogClient::new(&base).unwrap();

    let movies = client
        .fetch_movies(&MovieRequest {
            sort: Some(Preset::LatestReleases.sort()),
            genre: Some("Drama".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(movies.len(), 50);
    assert_eq!(movies[0].year, Some(2019));

    let rejected = reqwest::get(format!("{}/api/movies?sort=plot&order=asc", base))
        .await
        .unwrap();
    assert_eq!(rejected.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unreachable_server_ends_loading() {
    let client = HttpCatalogClient::new("http://127.0.0.1:9").unwrap();
    let mut controller = ListController::new(client);
    controller.dispatch(Action::Mount);
    controller.settle().await;

    assert!(!controller.view().is_loading());
    assert!(matches!(controller.view().render(), Render::Error(_)));
    assert!(controller.view().genres().is_empty());

    let err = HttpCatalogClient::new("http://127.0.0.1:9")
        .unwrap()
        .fetch_genres()
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
