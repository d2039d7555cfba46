use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, ApiFailure, Catalog, Success, IMAGES_PER_BREED};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_all_returns_catalog() {
    let resp = app().oneshot(get("/breeds/list/all")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Success<Catalog> = body_json(resp).await;
    assert_eq!(body.status, "success");
    let entry = |key: &str| {
        body.message
            .0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, subs)| subs.clone())
    };
    assert_eq!(entry("african"), Some(vec![]));
    assert_eq!(
        entry("australian"),
        Some(vec!["kelpie".to_string(), "shepherd".to_string()])
    );
}

#[tokio::test]
async fn list_all_keeps_catalog_order() {
    let catalog: Catalog = [("whippet", vec![]), ("akita", vec!["japanese".to_string()])]
        .into_iter()
        .collect();

    let resp = app_with(catalog).oneshot(get("/breeds/list/all")).await.unwrap();
    let raw = body_bytes(resp).await;
    let text = std::str::from_utf8(&raw).unwrap();
    let whippet = text.find("whippet").unwrap();
    let akita = text.find("akita").unwrap();
    assert!(whippet < akita, "{text}");
}

#[tokio::test]
async fn empty_catalog_lists_nothing() {
    let resp = app_with(Catalog::default())
        .oneshot(get("/breeds/list/all"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Success<Catalog> = body_json(resp).await;
    assert!(body.message.0.is_empty());
}

// --- breed images ---

#[tokio::test]
async fn breed_images_returns_requested_count() {
    let resp = app()
        .oneshot(get("/breed/akita/images/random/10"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Success<Vec<String>> = body_json(resp).await;
    assert_eq!(body.message.len(), 10);
    assert!(body.message.iter().all(|url| url.contains("/breeds/akita/")));
}

#[tokio::test]
async fn breed_images_are_capped() {
    let resp = app()
        .oneshot(get("/breed/akita/images/random/500"))
        .await
        .unwrap();
    let body: Success<Vec<String>> = body_json(resp).await;
    assert_eq!(body.message.len(), IMAGES_PER_BREED as usize);
}

#[tokio::test]
async fn unknown_breed_is_404_with_error_body() {
    let resp = app()
        .oneshot(get("/breed/dragon/images/random/10"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ApiFailure = body_json(resp).await;
    assert_eq!(body.status, "error");
    assert_eq!(body.code, 404);
    assert_eq!(body.message, "Breed not found (main breed does not exist)");
}

#[tokio::test]
async fn non_numeric_count_returns_400() {
    let resp = app()
        .oneshot(get("/breed/akita/images/random/many"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- sub-breed images ---

#[tokio::test]
async fn sub_breed_images_use_combined_directory() {
    let resp = app()
        .oneshot(get("/breed/hound/afghan/images/random/10"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Success<Vec<String>> = body_json(resp).await;
    assert_eq!(body.message.len(), 10);
    assert!(body.message.iter().all(|url| url.contains("/breeds/hound-afghan/")));
}

#[tokio::test]
async fn unknown_sub_breed_is_404() {
    let resp = app()
        .oneshot(get("/breed/hound/poodle/images/random/10"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ApiFailure = body_json(resp).await;
    assert_eq!(body.message, "Breed not found (sub breed does not exist)");
}

#[tokio::test]
async fn sub_breed_of_unknown_breed_is_404() {
    let resp = app()
        .oneshot(get("/breed/dragon/red/images/random/10"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ApiFailure = body_json(resp).await;
    assert_eq!(body.message, "Breed not found (main breed does not exist)");
}

// --- walk the catalog ---

#[tokio::test]
async fn every_listed_entry_has_images() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/breeds/list/all"))
        .await
        .unwrap();
    let listing: Success<Catalog> = body_json(resp).await;

    for (breed, subs) in &listing.message.0 {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(get(&format!("/breed/{breed}/images/random/10")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{breed}");

        for sub in subs {
            let resp = ServiceExt::ready(&mut app)
                .await
                .unwrap()
                .call(get(&format!("/breed/{breed}/{sub}/images/random/10")))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "{breed}/{sub}");
        }
    }
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = app().oneshot(get("/breeds/list")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
