//! Stateless HTTP request builder and response parser for the Dog API.
//!
//! # Design
//! `DogApiClient` holds only a base URL and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`, so
//! the I/O boundary is explicit and the client stays deterministic.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AllBreedsDto, Breed, BreedImagesDto};

/// Number of random images requested per breed.
pub const IMAGE_COUNT: u32 = 10;

#[derive(Debug, Clone)]
pub struct DogApiClient {
    base_url: Url,
}

impl DogApiClient {
    /// `base_url` must be absolute and able to carry path segments. A
    /// missing trailing slash is tolerated.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(format!("{base_url} cannot be a base")));
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn build_all_breeds(&self) -> HttpRequest {
        self.get(&["breeds", "list", "all"])
    }

    pub fn build_breed_images(&self, breed: &str) -> HttpRequest {
        let count = IMAGE_COUNT.to_string();
        self.get(&["breed", breed, "images", "random", &count])
    }

    pub fn build_sub_breed_images(&self, breed: &str, sub_breed: &str) -> HttpRequest {
        let count = IMAGE_COUNT.to_string();
        self.get(&["breed", breed, sub_breed, "images", "random", &count])
    }

    pub fn parse_all_breeds(&self, response: HttpResponse) -> Result<Vec<Breed>, ApiError> {
        let dto: AllBreedsDto = decode(response)?;
        Ok(dto.into())
    }

    /// Parses either random-image endpoint; they share a body shape.
    pub fn parse_images(&self, response: HttpResponse) -> Result<Vec<String>, ApiError> {
        let dto: BreedImagesDto = decode(response)?;
        Ok(dto.message)
    }

    fn get(&self, segments: &[&str]) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.join(segments),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    fn join(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        // Checked in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }
}

/// Map non-2xx statuses to `ApiError::Status`, then decode the JSON body.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Status {
            status: response.status,
            reason: response.reason,
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
