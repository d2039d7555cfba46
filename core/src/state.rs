//! Screen state values and the read-only handle used to observe them.
//!
//! # Design
//! A state value is always replaced as a whole. Reducers own the only
//! writer (a `tokio::sync::watch` sender kept private to `screen`);
//! everything else gets a `StateHandle`, which can read and wait but never
//! write.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

use crate::types::Breed;

pub const BREEDS_ERROR_MESSAGE: &str = "An error occurred retrieving dog breeds";
pub const IMAGES_ERROR_MESSAGE: &str =
    "An error occurred retrieving images for the selected dog breed";

/// What a screen should draw, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenStatus<'a> {
    Loading,
    Failed(&'a str),
    Ready,
}

fn status<'a>(loading: bool, error_message: Option<&'a str>) -> ScreenStatus<'a> {
    match (loading, error_message) {
        (true, _) => ScreenStatus::Loading,
        (false, Some(message)) => ScreenStatus::Failed(message),
        (false, None) => ScreenStatus::Ready,
    }
}

/// State of the breed list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListState {
    pub loading: bool,
    pub items: Vec<Breed>,
    pub error_message: Option<String>,
}

impl ListState {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn loaded(items: Vec<Breed>) -> Self {
        Self {
            loading: false,
            items,
            error_message: None,
        }
    }

    /// Copy of `self` with loading cleared and the fixed error message set.
    pub fn failed(&self) -> Self {
        Self {
            loading: false,
            error_message: Some(BREEDS_ERROR_MESSAGE.to_string()),
            ..self.clone()
        }
    }

    pub fn status(&self) -> ScreenStatus<'_> {
        status(self.loading, self.error_message.as_deref())
    }
}

/// State of the breed images screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailState {
    pub loading: bool,
    pub selected_label: Option<String>,
    pub images: Vec<String>,
    pub error_message: Option<String>,
}

impl DetailState {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn loaded(label: String, images: Vec<String>) -> Self {
        Self {
            loading: false,
            selected_label: Some(label),
            images,
            error_message: None,
        }
    }

    /// Copy of `self` with loading cleared and the fixed error message set.
    pub fn failed(&self) -> Self {
        Self {
            loading: false,
            error_message: Some(IMAGES_ERROR_MESSAGE.to_string()),
            ..self.clone()
        }
    }

    pub fn status(&self) -> ScreenStatus<'_> {
        status(self.loading, self.error_message.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the screen that owned this state was dropped")]
pub struct StateClosed;

/// Read/subscribe side of a screen's state.
#[derive(Debug, Clone)]
pub struct StateHandle<S> {
    rx: watch::Receiver<S>,
}

impl<S: Clone> StateHandle<S> {
    pub(crate) fn new(rx: watch::Receiver<S>) -> Self {
        Self { rx }
    }

    pub fn current(&self) -> S {
        self.rx.borrow().clone()
    }

    /// Wait for the next replacement and return it.
    pub async fn changed(&mut self) -> Result<S, StateClosed> {
        self.rx.changed().await.map_err(|_| StateClosed)?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// Resolve with the first value (current included) matching `predicate`.
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&S) -> bool,
    ) -> Result<S, StateClosed> {
        self.rx
            .wait_for(predicate)
            .await
            .map(|state| state.clone())
            .map_err(|_| StateClosed)
    }
}
