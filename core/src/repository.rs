//! Breed repository: DTOs in, domain values out, failures flattened.
//!
//! # Design
//! `BreedRepository` is the seam the reducers depend on; tests swap in
//! fakes. `DogRepository` is the real implementation: it asks
//! `DogApiClient` for a request, runs the transport on tokio's blocking
//! pool so the caller's context never waits on the network, and parses the
//! response there too. Every call resolves to exactly one `FetchResult`.
//! Nothing is cached and nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::client::DogApiClient;
use crate::config::Config;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpRequest, HttpResponse, HttpTransport, UreqTransport};
use crate::result::FetchResult;
use crate::types::Breed;

#[async_trait]
pub trait BreedRepository: Send + Sync {
    async fn fetch_all_breeds(&self) -> FetchResult<Vec<Breed>>;

    /// Up to ten random image URLs for `breed`.
    async fn fetch_images_for_breed(&self, breed: &str) -> FetchResult<Vec<String>>;

    /// Up to ten random image URLs for `sub_breed` of `breed`.
    async fn fetch_images_for_sub_breed(
        &self,
        breed: &str,
        sub_breed: &str,
    ) -> FetchResult<Vec<String>>;
}

#[derive(Debug)]
pub struct DogRepository<T> {
    client: DogApiClient,
    transport: Arc<T>,
}

impl DogRepository<UreqTransport> {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let client = DogApiClient::new(&config.base_url)?;
        Ok(Self::new(client, UreqTransport::new(config.timeout())))
    }
}

impl<T: HttpTransport + 'static> DogRepository<T> {
    pub fn new(client: DogApiClient, transport: T) -> Self {
        Self {
            client,
            transport: Arc::new(transport),
        }
    }

    async fn round_trip<D, P>(&self, request: HttpRequest, parse: P) -> FetchResult<D>
    where
        D: Send + 'static,
        P: FnOnce(&DogApiClient, HttpResponse) -> Result<D, ApiError> + Send + 'static,
    {
        let url = request.url.clone();
        let client = self.client.clone();
        let transport = Arc::clone(&self.transport);
        debug!(%url, "fetch started");

        let result = tokio::task::spawn_blocking(move || -> Result<D, ApiError> {
            let response = transport.execute(request)?;
            parse(&client, response)
        })
        .await
        .unwrap_or_else(|e| Err(TransportError::Io(format!("fetch worker stopped: {e}")).into()));

        match &result {
            Ok(_) => debug!(%url, "fetch finished"),
            Err(e) => warn!(%url, error = %e, "fetch failed"),
        }
        result.into()
    }
}

#[async_trait]
impl<T: HttpTransport + 'static> BreedRepository for DogRepository<T> {
    async fn fetch_all_breeds(&self) -> FetchResult<Vec<Breed>> {
        let request = self.client.build_all_breeds();
        self.round_trip(request, DogApiClient::parse_all_breeds).await
    }

    async fn fetch_images_for_breed(&self, breed: &str) -> FetchResult<Vec<String>> {
        let request = self.client.build_breed_images(breed);
        self.round_trip(request, DogApiClient::parse_images).await
    }

    async fn fetch_images_for_sub_breed(
        &self,
        breed: &str,
        sub_breed: &str,
    ) -> FetchResult<Vec<String>> {
        let request = self.client.build_sub_breed_images(breed, sub_breed);
        self.round_trip(request, DogApiClient::parse_images).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Replays one canned outcome and records every request it sees.
    struct CannedTransport {
        outcome: Result<HttpResponse, TransportError>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn new(outcome: Result<HttpResponse, TransportError>) -> Self {
            Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl HttpTransport for CannedTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            self.outcome.clone()
        }
    }

    fn repository(outcome: Result<HttpResponse, TransportError>) -> DogRepository<CannedTransport> {
        let client = DogApiClient::new("http://dogs.test/api/").unwrap();
        DogRepository::new(client, CannedTransport::new(outcome))
    }

    fn urls(repo: &DogRepository<CannedTransport>) -> Vec<String> {
        repo.transport.seen.lock().unwrap().iter().map(|r| r.url.clone()).collect()
    }

    #[tokio::test]
    async fn all_breeds_success_maps_entities() {
        let repo = repository(Ok(HttpResponse::new(
            200,
            "OK",
            r#"{"message":{"african":[],"australian":["shepherd"]},"status":"success"}"#,
        )));

        let result = repo.fetch_all_breeds().await;
        assert_eq!(
            result,
            FetchResult::Success(vec![
                Breed::new("African", vec![]),
                Breed::new("Australian", vec!["Shepherd".to_string()]),
            ])
        );
        assert_eq!(urls(&repo), ["http://dogs.test/api/breeds/list/all"]);
    }

    #[tokio::test]
    async fn breed_images_success() {
        let repo = repository(Ok(HttpResponse::new(
            200,
            "OK",
            r#"{"message":["https://www.google.com","https://www.bbc.co.uk"]}"#,
        )));

        let result = repo.fetch_images_for_breed("abc").await;
        assert_eq!(
            result,
            FetchResult::Success(vec![
                "https://www.google.com".to_string(),
                "https://www.bbc.co.uk".to_string(),
            ])
        );
        assert_eq!(urls(&repo), ["http://dogs.test/api/breed/abc/images/random/10"]);
    }

    #[tokio::test]
    async fn sub_breed_images_hit_sub_breed_endpoint() {
        let repo = repository(Ok(HttpResponse::new(200, "OK", r#"{"message":[]}"#)));

        let result = repo.fetch_images_for_sub_breed("abc", "def").await;
        assert_eq!(result, FetchResult::Success(vec![]));
        assert_eq!(urls(&repo), ["http://dogs.test/api/breed/abc/def/images/random/10"]);
    }

    #[tokio::test]
    async fn error_status_is_a_single_failure() {
        let repo = repository(Ok(HttpResponse::new(404, "Not Found", "")));

        assert_eq!(
            repo.fetch_all_breeds().await,
            FetchResult::Failure(Some("Not Found".to_string()))
        );
        assert_eq!(
            repo.fetch_images_for_breed("x").await,
            FetchResult::Failure(Some("Not Found".to_string()))
        );
        assert_eq!(
            repo.fetch_images_for_sub_breed("x", "y").await,
            FetchResult::Failure(Some("Not Found".to_string()))
        );
    }

    #[tokio::test]
    async fn transport_error_is_a_single_failure() {
        let repo = repository(Err(TransportError::Io("connection refused".into())));

        assert_eq!(
            repo.fetch_all_breeds().await,
            FetchResult::Failure(Some("connection refused".to_string()))
        );
        assert_eq!(
            repo.fetch_images_for_breed("x").await,
            FetchResult::Failure(Some("connection refused".to_string()))
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_failure() {
        let repo = repository(Ok(HttpResponse::new(200, "OK", "<html>")));
        assert!(!repo.fetch_all_breeds().await.is_success());
    }
}
