use axum::{
    Json, Router,
    routing::{get, patch},
};

use folio_types::api::HealthResponse;
use folio_types::models::{ProgressImage, ProgressUpdate};

use crate::progress;
use crate::state::AppState;

/// All `/api` routes over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/progress-updates",
            get(progress::list::<ProgressUpdate>).post(progress::create::<ProgressUpdate>),
        )
        .route(
            "/api/progress-updates/{id}",
            patch(progress::update::<ProgressUpdate>)
                .delete(progress::delete::<ProgressUpdate>),
        )
        .route(
            "/api/progress-images",
            get(progress::list::<ProgressImage>).post(progress::create::<ProgressImage>),
        )
        .route(
            "/api/progress-images/{id}",
            patch(progress::update::<ProgressImage>)
                .delete(progress::delete::<ProgressImage>),
        )
        .with_state(state)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header::CONTENT_TYPE};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use folio_store::Store;

    use super::*;
    use crate::state::AppStateInner;

    fn app() -> Router {
        router(AppStateInner::new(Store::new()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        read(app.clone().oneshot(request).await.unwrap()).await
    }

    async fn send_raw(app: &Router, method: Method, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        read(app.clone().oneshot(request).await.unwrap()).await
    }

    async fn read(response: axum::response::Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn update_body(title: &str) -> Value {
        json!({
            "week": "Week 13",
            "title": title,
            "description": "Enemy AI pathfinding",
            "date": "2024-01-22",
        })
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = send(&app(), Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn create_then_list_newest_first() {
        let app = app();

        let (status, a) = send(&app, Method::POST, "/api/progress-updates", Some(update_body("A"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(a["id"], 1);
        assert!(a["createdAt"].is_string());

        let (_, b) = send(&app, Method::POST, "/api/progress-updates", Some(update_body("B"))).await;
        assert_eq!(b["id"], 2);

        let (status, list) = send(&app, Method::GET, "/api/progress-updates", None).await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = list.as_array().unwrap().iter().map(|u| u["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn create_with_missing_field_is_bad_request() {
        let app = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/progress-images",
            Some(json!({ "title": "Title screen" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Invalid progress image data" }));

        let (_, list) = send(&app, Method::GET, "/api/progress-images", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = app();
        let (status, body) = send_raw(&app, Method::POST, "/api/progress-updates", "application/json", "{ week: ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid progress update data");

        let (status, _) = send_raw(&app, Method::POST, "/api/progress-updates", "text/plain", "hello").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn image_description_is_null_when_omitted() {
        let app = app();
        let (status, image) = send(
            &app,
            Method::POST,
            "/api/progress-images",
            Some(json!({ "title": "Title screen", "url": "https://cdn.example.com/title.png" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(image.as_object().unwrap().contains_key("description"));
        assert_eq!(image["description"], Value::Null);

        let (_, empty) = send(
            &app,
            Method::POST,
            "/api/progress-images",
            Some(json!({ "title": "t", "url": "https://x", "description": "" })),
        )
        .await;
        assert_eq!(empty["description"], "");
    }

    #[tokio::test]
    async fn patch_preserves_omitted_fields() {
        let app = app();
        let (_, created) = send(&app, Method::POST, "/api/progress-updates", Some(update_body("A"))).await;

        let (status, updated) = send(
            &app,
            Method::PATCH,
            "/api/progress-updates/1",
            Some(json!({ "title": "X" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "X");
        for field in ["week", "description", "date", "createdAt", "id"] {
            assert_eq!(updated[field], created[field], "{field} changed");
        }
    }

    #[tokio::test]
    async fn patch_image_null_clears_description() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/api/progress-images",
            Some(json!({ "title": "t", "url": "https://x", "description": "caption" })),
        )
        .await;

        let (_, kept) = send(&app, Method::PATCH, "/api/progress-images/1", Some(json!({ "url": "https://y" }))).await;
        assert_eq!(kept["description"], "caption");
        assert_eq!(kept["url"], "https://y");

        let (status, cleared) =
            send(&app, Method::PATCH, "/api/progress-images/1", Some(json!({ "description": null }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cleared["description"], Value::Null);
    }

    #[tokio::test]
    async fn patch_errors() {
        let app = app();
        send(&app, Method::POST, "/api/progress-updates", Some(update_body("A"))).await;

        let (status, body) = send(&app, Method::PATCH, "/api/progress-updates/99", Some(json!({ "title": "X" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Progress update not found" }));

        let (status, body) = send(&app, Method::PATCH, "/api/progress-updates/1", Some(json!({ "title": 42 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Invalid progress update data" }));

        let (status, _) = send(&app, Method::PATCH, "/api/progress-updates/abc", Some(json!({ "title": "X" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_lifecycle() {
        let app = app();
        send(&app, Method::POST, "/api/progress-updates", Some(update_body("A"))).await;

        let (status, body) = send(&app, Method::DELETE, "/api/progress-updates/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = send(&app, Method::DELETE, "/api/progress-updates/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Progress update not found" }));

        let (status, body) = send(&app, Method::DELETE, "/api/progress-images/nope", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Invalid request" }));

        // Ids keep climbing after a delete.
        let (_, next) = send(&app, Method::POST, "/api/progress-updates", Some(update_body("B"))).await;
        assert_eq!(next["id"], 2);
    }

    #[tokio::test]
    async fn out_of_range_ids_are_not_found() {
        let app = app();
        send(&app, Method::POST, "/api/progress-updates", Some(update_body("A"))).await;

        for uri in [
            "/api/progress-updates/-1",
            "/api/progress-updates/0",
            "/api/progress-updates/9999999999999999999999999",
        ] {
            let (status, body) = send(&app, Method::DELETE, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {uri}");
            assert_eq!(body, json!({ "message": "Progress update not found" }));

            let (status, body) = send(&app, Method::PATCH, uri, Some(json!({ "title": "X" }))).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "PATCH {uri}");
            assert_eq!(body, json!({ "message": "Progress update not found" }));
        }

        // The body is still checked before the lookup.
        let (status, body) = send(&app, Method::PATCH, "/api/progress-images/-1", Some(json!({ "url": 5 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Invalid progress image data" }));

        let (_, list) = send(&app, Method::GET, "/api/progress-updates", None).await;
        assert_eq!(list[0]["title"], "A");
    }

    #[tokio::test]
    async fn kinds_do_not_share_ids() {
        let app = app();
        send(&app, Method::POST, "/api/progress-updates", Some(update_body("A"))).await;
        send(&app, Method::POST, "/api/progress-updates", Some(update_body("B"))).await;

        let (_, image) = send(
            &app,
            Method::POST,
            "/api/progress-images",
            Some(json!({ "title": "t", "url": "https://x" })),
        )
        .await;
        assert_eq!(image["id"], 1);

        let (status, _) = send(&app, Method::DELETE, "/api/progress-images/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
