//! End-to-end tests driving the router in-process against a throwaway
//! SQLite database, with poster uploads running in mock mode.

use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use marquee::{AppState, app, db, media::MediaClient, store::MovieStore};

static NEXT_DB: AtomicU32 = AtomicU32::new(0);

const BOUNDARY: &str = "marquee-test-boundary";
const PNG_NAME: &str = "poster.png";
const PNG_TYPE: &str = "image/png";
const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot-a-real-png";

struct TestApp {
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        let n = NEXT_DB.fetch_add(1, Ordering::Relaxed);
        let url = format!(
            "sqlite://{}/marquee-test-{}-{}.db?mode=rwc",
            std::env::temp_dir().display(),
            std::process::id(),
            n
        );
        let db = db::connect_and_migrate(&url).await.expect("connect test database");

        // Empty credentials put the media client in mock mode: no network,
        // deterministic placeholder URLs.
        let media = MediaClient::new(
            reqwest::Client::new(),
            String::new(),
            String::new(),
            String::new(),
            "https://api.cloudinary.com".to_string(),
        );

        let state = AppState { store: MovieStore::new(db), media: Arc::new(media) };
        Self { router: app(state) }
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(path).body(Body::empty()).expect("request");
        let response = self.router.clone().oneshot(request).await.expect("response");
        split(response).await
    }

    async fn post_movie(
        &self,
        fields: &[(&str, &str)],
        poster: Option<(&str, &str, &[u8])>,
    ) -> (StatusCode, Value) {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, content_type, bytes)) = poster {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"posterImage\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/api/movies")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        split(response).await
    }
}

async fn split(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

fn inception_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("title", "Inception"),
        ("description", "A thief who steals corporate secrets through dream-sharing."),
        ("trailerUrl", "https://www.youtube.com/embed/YoHD9XEInc0"),
        ("genre", "Sci-Fi"),
        ("releaseYear", "2010"),
        ("director", "Christopher Nolan"),
        ("cast", "Leonardo DiCaprio, Joseph Gordon-Levitt,Elliot Page"),
    ]
}

fn current_year() -> i32 {
    let today: jiff::civil::Date = jiff::Zoned::now().into();
    i32::from(today.year())
}

#[tokio::test]
async fn create_returns_created_movie() {
    let app = TestApp::new().await;

    let (status, body) =
        app.post_movie(&inception_fields(), Some((PNG_NAME, PNG_TYPE, PNG_BYTES))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Inception");
    assert_eq!(body["genre"], "Sci-Fi");
    assert_eq!(body["releaseYear"], 2010);
    assert_eq!(body["director"], "Christopher Nolan");
    assert_eq!(
        body["cast"],
        serde_json::json!(["Leonardo DiCaprio", "Joseph Gordon-Levitt", "Elliot Page"])
    );
    assert!(!body["posterUrl"].as_str().expect("posterUrl").is_empty());
    assert!(!body["createdAt"].as_str().expect("createdAt").is_empty());
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn list_includes_created_movie_exactly_once() {
    let app = TestApp::new().await;
    app.post_movie(&inception_fields(), Some((PNG_NAME, PNG_TYPE, PNG_BYTES))).await;

    let (status, body) = app.get("/api/movies").await;

    assert_eq!(status, StatusCode::OK);
    let movies = body.as_array().expect("array");
    let matches = movies.iter().filter(|m| m["title"] == "Inception").count();
    assert_eq!(matches, 1);
}

#[tokio::test]
async fn duplicate_title_is_rejected_without_inserting() {
    let app = TestApp::new().await;
    let (first, _) =
        app.post_movie(&inception_fields(), Some((PNG_NAME, PNG_TYPE, PNG_BYTES))).await;
    assert_eq!(first, StatusCode::CREATED);

    let (status, body) =
        app.post_movie(&inception_fields(), Some((PNG_NAME, PNG_TYPE, PNG_BYTES))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
    assert!(body["message"].as_str().expect("message").contains("already exists"));

    let (_, list) = app.get("/api/movies").await;
    assert_eq!(list.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn missing_poster_is_rejected_without_inserting() {
    let app = TestApp::new().await;

    let (status, body) = app.post_movie(&inception_fields(), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
    assert_eq!(body["message"], "No poster image file provided.");

    let (_, list) = app.get("/api/movies").await;
    assert!(list.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn wrong_poster_type_is_rejected() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post_movie(&inception_fields(), Some(("notes.txt", "text/plain", b"hello")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // declared type and extension must both pass the allow-list
    let (status, _) = app
        .post_movie(&inception_fields(), Some(("poster.txt", "image/png", PNG_BYTES)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_poster_is_rejected() {
    let app = TestApp::new().await;
    let oversized = vec![0u8; marquee::routes::MAX_POSTER_BYTES + 1];

    let (status, body) =
        app.post_movie(&inception_fields(), Some((PNG_NAME, PNG_TYPE, &oversized))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");

    let (_, list) = app.get("/api/movies").await;
    assert!(list.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn release_year_range_is_enforced() {
    let app = TestApp::new().await;
    let year = current_year();

    let too_old = year_fields("Too Old", "1799");
    let (status, _) = app
        .post_movie(&pairs(&too_old), Some((PNG_NAME, PNG_TYPE, PNG_BYTES)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let max_ok = (year + 5).to_string();
    let upcoming = year_fields("Upcoming", &max_ok);
    let (status, _) = app
        .post_movie(&pairs(&upcoming), Some((PNG_NAME, PNG_TYPE, PNG_BYTES)))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let too_far = (year + 6).to_string();
    let distant = year_fields("Distant", &too_far);
    let (status, _) = app
        .post_movie(&pairs(&distant), Some((PNG_NAME, PNG_TYPE, PNG_BYTES)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_movie_by_id() {
    let app = TestApp::new().await;
    let (_, created) =
        app.post_movie(&inception_fields(), Some((PNG_NAME, PNG_TYPE, PNG_BYTES))).await;
    let id = created["id"].as_i64().expect("id");

    let (status, body) = app.get(&format!("/api/movies/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Inception");

    let (status, body) = app.get("/api/movies/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn optional_fields_fall_back_to_defaults() {
    let app = TestApp::new().await;
    let fields = vec![
        ("title", "Untitled Project"),
        ("description", "A movie with nothing optional filled in."),
        ("trailerUrl", "https://www.youtube.com/embed/abc123"),
        ("genre", ""),
        ("releaseYear", ""),
        ("director", ""),
        ("cast", ""),
    ];

    let (status, body) = app.post_movie(&fields, Some((PNG_NAME, PNG_TYPE, PNG_BYTES))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["genre"], "Unspecified");
    assert_eq!(body["director"], "Unknown");
    assert_eq!(body["releaseYear"], Value::Null);
    assert_eq!(body["cast"], serde_json::json!([]));
}

#[tokio::test]
async fn missing_required_field_is_rejected() {
    let app = TestApp::new().await;
    let fields = vec![
        ("title", "   "),
        ("description", "No title on this one."),
        ("trailerUrl", "https://www.youtube.com/embed/abc123"),
    ];

    let (status, body) = app.post_movie(&fields, Some((PNG_NAME, PNG_TYPE, PNG_BYTES))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
}

fn year_fields(title: &str, year: &str) -> Vec<(String, String)> {
    vec![
        ("title".to_string(), title.to_string()),
        ("description".to_string(), "Year bounds check.".to_string()),
        ("trailerUrl".to_string(), "https://www.youtube.com/embed/abc123".to_string()),
        ("releaseYear".to_string(), year.to_string()),
    ]
}

fn pairs(fields: &[(String, String)]) -> Vec<(&str, &str)> {
    fields.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}
