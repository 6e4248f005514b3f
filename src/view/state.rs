use tracing::{debug, warn};

use super::client::ClientError;
use super::preset::Preset;
use super::render::{MovieCard, Render};
use crate::catalog::SortSpec;
use crate::config::GenreFilterMode;
use crate::db::{Genre, Movie};

/// Parameters of one `/api/movies` fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieRequest {
    pub sort: Option<SortSpec>,
    /// Sent along for the service; only filters there in `server` mode.
    pub genre: Option<String>,
}

impl MovieRequest {
    /// Path and query string relative to the service root.
    pub fn path(&self) -> String {
        let mut params = Vec::new();
        if let Some(sort) = self.sort {
            params.push(format!("sort={}", sort.field));
            params.push(format!("order={}", sort.order));
        }
        if let Some(ref genre) = self.genre {
            params.push(format!("genre={}", urlencoding::encode(genre)));
        }

        if params.is_empty() {
            "/api/movies".to_string()
        } else {
            format!("/api/movies?{}", params.join("&"))
        }
    }
}

#[derive(Debug)]
pub enum Action {
    Mount,
    ApplyPreset(Preset),
    SelectGenre(String),
    MoviesLoaded {
        seq: u64,
        result: Result<Vec<Movie>, ClientError>,
    },
    GenresLoaded(Result<Vec<Genre>, ClientError>),
}

/// Work the view asks its owner to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchMovies { seq: u64, request: MovieRequest },
    FetchGenres,
}

#[derive(Debug, Default)]
pub struct ListView {
    genre_filter: GenreFilterMode,
    sort: Option<SortSpec>,
    selected_genre: String,
    movies: Vec<Movie>,
    genres: Vec<Genre>,
    genres_pending: bool,
    genres_loaded: bool,
    loading: bool,
    error: Option<String>,
    seq: u64,
    mounted: bool,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view for a service running with the given `catalog.genre_filter`.
    /// With `Server`, the fetched page already holds only the selected
    /// genre, so changing the selection fetches again.
    pub fn with_genre_filter(genre_filter: GenreFilterMode) -> Self {
        Self {
            genre_filter,
            ..Self::default()
        }
    }

    pub fn genre_filter(&self) -> GenreFilterMode {
        self.genre_filter
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn selected_genre(&self) -> &str {
        &self.selected_genre
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn genres_pending(&self) -> bool {
        self.genres_pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sequence number of the most recently issued movie fetch.
    pub fn latest_seq(&self) -> u64 {
        self.seq
    }

    /// The fetched page, before genre filtering.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Movies whose genre equals the selection exactly, or all of them
    /// when nothing is selected.
    pub fn visible_movies(&self) -> impl Iterator<Item = &Movie> + '_ {
        self.movies
            .iter()
            .filter(move |m| self.selected_genre.is_empty() || m.genre == self.selected_genre)
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Mount => {
                if self.mounted {
                    return Vec::new();
                }
                self.mounted = true;
                self.genres_pending = true;
                vec![Effect::FetchGenres, self.fetch_movies()]
            }
            Action::ApplyPreset(preset) => {
                let sort = Some(preset.sort());
                if self.sort == sort {
                    return Vec::new();
                }
                self.sort = sort;
                if !self.mounted {
                    return Vec::new();
                }
                vec![self.fetch_movies()]
            }
            Action::SelectGenre(genre) => {
                if self.selected_genre == genre {
                    return Vec::new();
                }
                self.selected_genre = genre;
                match self.genre_filter {
                    GenreFilterMode::Server if self.mounted => vec![self.fetch_movies()],
                    _ => Vec::new(),
                }
            }
            Action::MoviesLoaded { seq, result } => {
                if seq != self.seq {
                    debug!(seq, latest = self.seq, "discarding stale movie response");
                    return Vec::new();
                }
                self.loading = false;
                match result {
                    Ok(movies) => {
                        self.movies = movies;
                        self.error = None;
                    }
                    Err(e) => {
                        warn!("Failed to fetch movies: {}", e);
                        self.error = Some(e.to_string());
                    }
                }
                Vec::new()
            }
            Action::GenresLoaded(result) => {
                self.genres_pending = false;
                if self.genres_loaded {
                    return Vec::new();
                }
                match result {
                    Ok(genres) => {
                        self.genres = genres;
                        self.genres_loaded = true;
                    }
                    Err(e) => warn!("Failed to fetch genres: {}", e),
                }
                Vec::new()
            }
        }
    }

    fn fetch_movies(&mut self) -> Effect {
        self.seq += 1;
        self.loading = true;
        let genre = (!self.selected_genre.is_empty()).then(|| self.selected_genre.clone());
        Effect::FetchMovies {
            seq: self.seq,
            request: MovieRequest {
                sort: self.sort,
                genre,
            },
        }
    }

    pub fn render(&self) -> Render {
        if self.loading {
            return Render::Loading;
        }
        if let Some(ref error) = self.error {
            return Render::Error(error.clone());
        }
        Render::Grid(self.visible_movies().map(MovieCard::from).collect())
    }
}
