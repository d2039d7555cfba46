use std::{fmt, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use tokio::net::TcpListener;
use tracing::debug;

/// Images the server knows for each breed or sub-breed.
pub const IMAGES_PER_BREED: u32 = 12;

/// `{"message": ..., "status": "success"}`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Success<T> {
    pub message: T,
    pub status: String,
}

impl<T> Success<T> {
    fn new(message: T) -> Self {
        Self {
            message,
            status: "success".to_string(),
        }
    }
}

/// Body of every 404 the real API sends.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiFailure {
    pub status: String,
    pub message: String,
    pub code: u16,
}

impl ApiFailure {
    fn not_found(message: &str) -> (StatusCode, Json<Self>) {
        (
            StatusCode::NOT_FOUND,
            Json(Self {
                status: "error".to_string(),
                message: message.to_string(),
                code: 404,
            }),
        )
    }
}

/// Breed key to sub-breed keys. Serializes as a JSON object in listing order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog(pub Vec<(String, Vec<String>)>);

impl Catalog {
    fn sub_breeds(&self, breed: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(key, _)| key == breed)
            .map(|(_, subs)| subs.as_slice())
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a breed catalog object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Catalog, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(Catalog(entries))
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

pub fn default_catalog() -> Catalog {
    let entries: [(&str, &[&str]); 8] = [
        ("affenpinscher", &[]),
        ("african", &[]),
        ("akita", &[]),
        ("australian", &["kelpie", "shepherd"]),
        ("beagle", &[]),
        ("bulldog", &["boston", "english", "french"]),
        ("hound", &["afghan", "basset", "blood", "english", "ibizan", "plott", "walker"]),
        ("whippet", &[]),
    ];
    entries
        .into_iter()
        .map(|(breed, subs)| (breed, subs.iter().map(|s| s.to_string()).collect::<Vec<_>>()))
        .collect()
}

pub fn app() -> Router {
    app_with(default_catalog())
}

pub fn app_with(catalog: Catalog) -> Router {
    Router::new()
        .route("/breeds/list/all", get(list_all))
        .route("/breed/{breed}/images/random/{count}", get(breed_images))
        .route(
            "/breed/{breed}/{sub_breed}/images/random/{count}",
            get(sub_breed_images),
        )
        .with_state(Arc::new(catalog))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type ApiResult<T> = Result<Json<Success<T>>, (StatusCode, Json<ApiFailure>)>;

type Shared = Arc<Catalog>;

async fn list_all(State(catalog): State<Shared>) -> Json<Success<Catalog>> {
    Json(Success::new(catalog.as_ref().clone()))
}

async fn breed_images(
    State(catalog): State<Shared>,
    Path((breed, count)): Path<(String, u32)>,
) -> ApiResult<Vec<String>> {
    if catalog.sub_breeds(&breed).is_none() {
        debug!(%breed, "unknown breed");
        return Err(ApiFailure::not_found("Breed not found (main breed does not exist)"));
    }
    Ok(Json(Success::new(image_urls(&breed, count))))
}

async fn sub_breed_images(
    State(catalog): State<Shared>,
    Path((breed, sub_breed, count)): Path<(String, String, u32)>,
) -> ApiResult<Vec<String>> {
    let Some(subs) = catalog.sub_breeds(&breed) else {
        debug!(%breed, "unknown breed");
        return Err(ApiFailure::not_found("Breed not found (main breed does not exist)"));
    };
    if !subs.contains(&sub_breed) {
        debug!(%breed, %sub_breed, "unknown sub-breed");
        return Err(ApiFailure::not_found("Breed not found (sub breed does not exist)"));
    }
    Ok(Json(Success::new(image_urls(&format!("{breed}-{sub_breed}"), count))))
}

/// Deterministic stand-ins for the random picks, capped like the real API.
fn image_urls(dir: &str, count: u32) -> Vec<String> {
    (1..=count.min(IMAGES_PER_BREED))
        .map(|n| format!("https://images.dog.ceo/breeds/{dir}/n{n:03}.jpg"))
        .collect()
}
