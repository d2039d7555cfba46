//! Core of the dog breed browser: Dog API client, repository, and the two
//! screen reducers.
//!
//! # Overview
//! `DogApiClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. `DogRepository` runs a request
//! through an `HttpTransport` and flattens the outcome into a
//! `FetchResult`. `ListReducer` and `DetailReducer` turn fetches into
//! observable screen state that hosts read through a `StateHandle`.
//!
//! # Design
//! - The client is stateless; it holds only the base URL.
//! - Each endpoint is split into `build_*` and `parse_*`, so the I/O boundary
//!   is explicit and hosts may execute requests themselves (see `dog-ffi`).
//! - Reducers own their state cell; nothing else can write to it.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod repository;
pub mod result;
pub mod screen;
pub mod state;
pub mod text;
pub mod types;
pub mod view;

pub use client::DogApiClient;
pub use config::{Config, ConfigError};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, UreqTransport};
pub use repository::{BreedRepository, DogRepository};
pub use result::FetchResult;
pub use screen::{DetailReducer, ListReducer};
pub use state::{DetailState, ListState, ScreenStatus, StateClosed, StateHandle};
pub use types::{Breed, BreedSelection};
pub use view::{breed_rows, BreedRow, ImageRequest, SectionToggles};
