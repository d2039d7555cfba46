use std::sync::Arc;

use tracing::debug;

use super::Screen;
use crate::repository::BreedRepository;
use crate::result::FetchResult;
use crate::state::{ListState, StateHandle};

/// Loads the breed list on creation and on every retry.
pub struct ListReducer {
    repository: Arc<dyn BreedRepository>,
    screen: Screen<ListState>,
}

impl ListReducer {
    pub fn new(repository: Arc<dyn BreedRepository>) -> Self {
        let mut reducer = Self {
            repository,
            screen: Screen::new(ListState::loading()),
        };
        reducer.load();
        reducer
    }

    pub fn state(&self) -> StateHandle<ListState> {
        self.screen.subscribe()
    }

    pub fn current(&self) -> ListState {
        self.screen.current()
    }

    /// Reset to loading immediately, then fetch again.
    pub fn on_retry(&mut self) {
        self.load();
    }

    fn load(&mut self) {
        let repository = Arc::clone(&self.repository);
        self.screen.restart(
            ListState::loading(),
            async move { repository.fetch_all_breeds().await },
            |state, outcome| match outcome {
                FetchResult::Success(items) => ListState::loaded(items),
                FetchResult::Failure(message) => {
                    debug!(?message, "breed list fetch failed");
                    state.failed()
                }
            },
        );
    }
}
