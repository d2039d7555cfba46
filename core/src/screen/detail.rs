use std::sync::Arc;

use tracing::debug;

use super::Screen;
use crate::repository::BreedRepository;
use crate::result::FetchResult;
use crate::state::{DetailState, StateHandle};
use crate::types::BreedSelection;

/// Loads random images for one breed or sub-breed.
pub struct DetailReducer {
    repository: Arc<dyn BreedRepository>,
    selection: BreedSelection,
    screen: Screen<DetailState>,
}

impl DetailReducer {
    pub fn new(repository: Arc<dyn BreedRepository>, selection: BreedSelection) -> Self {
        let mut reducer = Self {
            repository,
            selection,
            screen: Screen::new(DetailState::loading()),
        };
        reducer.load();
        reducer
    }

    pub fn selection(&self) -> &BreedSelection {
        &self.selection
    }

    pub fn state(&self) -> StateHandle<DetailState> {
        self.screen.subscribe()
    }

    pub fn current(&self) -> DetailState {
        self.screen.current()
    }

    pub fn on_retry(&mut self) {
        self.load();
    }

    fn load(&mut self) {
        let repository = Arc::clone(&self.repository);
        let selection = self.selection.clone();
        let label = selection.label();

        self.screen.restart(
            DetailState::loading(),
            async move {
                match &selection.sub_breed {
                    Some(sub) => {
                        repository
                            .fetch_images_for_sub_breed(&selection.breed, sub)
                            .await
                    }
                    None => repository.fetch_images_for_breed(&selection.breed).await,
                }
            },
            move |state, outcome| match outcome {
                FetchResult::Success(images) => DetailState::loaded(label, images),
                FetchResult::Failure(message) => {
                    debug!(?message, "breed images fetch failed");
                    state.failed()
                }
            },
        );
    }
}
