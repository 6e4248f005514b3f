use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use super::error::ApiError;
use super::query::MovieQuery;
use super::types::*;
use crate::config::GenreFilterMode;
use crate::server::AppState;
use crate::util::QueryParams;

pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<MoviesResponse>, ApiError> {
    let catalog = &state.config.catalog;
    let query = MovieQuery::from_params(&params, catalog)?;

    if catalog.genre_filter == GenreFilterMode::Client {
        if let Some(genre) = params.get_non_empty("genre") {
            debug!(genre = %genre, "genre parameter ignored, filtering is client-side");
        }
    }

    let movies = state.db.list_movies(&query).await?;
    debug!(
        sort = ?query.sort,
        genre = ?query.genre,
        count = movies.len(),
        "listed movies"
    );

    Ok(Json(MoviesResponse { movies }))
}

pub async fn list_genres(State(state): State<AppState>) -> Result<Json<GenresResponse>, ApiError> {
    let genres = state.db.list_genres(state.config.catalog.limit).await?;
    debug!(count = genres.len(), "listed genres");
    Ok(Json(GenresResponse { genres }))
}
