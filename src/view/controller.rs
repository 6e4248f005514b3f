use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error};

use super::client::{CatalogClient, ClientError};
use super::state::{Action, Effect, ListView};

/// Owns a `ListView` and runs its fetch effects as tasks. Responses come
/// back as actions in completion order, which may differ from request order.
pub struct ListController<C> {
    client: Arc<C>,
    view: ListView,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
}

impl<C: CatalogClient + 'static> ListController<C> {
    pub fn new(client: C) -> Self {
        Self::with_view(client, ListView::new())
    }

    pub fn with_view(client: C, view: ListView) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client: Arc::new(client),
            view,
            tx,
            rx,
        }
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn dispatch(&mut self, action: Action) {
        for effect in self.view.update(action) {
            self.spawn(effect);
        }
    }

    /// Every effect answers with exactly one action, even when the fetch
    /// task panics or is cancelled, so `settle` always returns.
    fn spawn(&self, effect: Effect) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let fetch = tokio::spawn(run_effect(client, effect.clone()));
        tokio::spawn(async move {
            let action = match fetch.await {
                Ok(action) => action,
                Err(e) => {
                    error!("Fetch task failed: {}", e);
                    failed(effect, ClientError::Task(e.to_string()))
                }
            };
            // The receiver only goes away with the controller.
            let _ = tx.send(action);
        });
    }

    /// Apply the next completed response.
    pub async fn next(&mut self) {
        if let Some(action) = self.rx.recv().await {
            self.dispatch(action);
        }
    }

    /// Apply responses until neither the movie list nor the genre options
    /// are waiting on a fetch.
    pub async fn settle(&mut self) {
        while self.view.is_loading() || self.view.genres_pending() {
            self.next().await;
        }
    }
}

async fn run_effect<C: CatalogClient>(client: Arc<C>, effect: Effect) -> Action {
    match effect {
        Effect::FetchMovies { seq, request } => {
            debug!(seq, path = %request.path(), "fetching movies");
            let result = client.fetch_movies(&request).await;
            Action::MoviesLoaded { seq, result }
        }
        Effect::FetchGenres => Action::GenresLoaded(client.fetch_genres().await),
    }
}

fn failed(effect: Effect, err: ClientError) -> Action {
    match effect {
        Effect::FetchMovies { seq, .. } => Action::MoviesLoaded {
            seq,
            result: Err(err),
        },
        Effect::FetchGenres => Action::GenresLoaded(Err(err)),
    }
}
