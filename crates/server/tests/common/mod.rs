use std::{fs, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use clap::Parser;
use deadpool_sqlite::Pool;
use serde_json::Value;
use server::{app, cli::Cli, db, AppState};
use shared::api::Object;
use tempfile::TempDir;
use tower::ServiceExt;

pub const INDEX_HTML: &str = "<h1>Exercise tracker</h1>";

/// Router backed by a fresh sqlite file. The temp dir is kept alive for as
/// long as the app is.
pub struct TestApp {
    pub router: Router,
    pub pool: Pool,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_dedup("global").await
    }

    pub async fn with_dedup(dedup: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("test.sqlite").to_str().unwrap().to_string();
        let public_dir = dir.path().join("public");
        let index_file = dir.path().join("index.html");
        fs::create_dir(&public_dir).unwrap();
        fs::write(public_dir.join("style.css"), "body {}").unwrap();
        fs::write(&index_file, INDEX_HTML).unwrap();

        let args = Cli::parse_from([
            "exercise-tracker",
            "--sqlite-connection-string",
            db_path.as_str(),
            "--public-dir",
            public_dir.to_str().unwrap(),
            "--index-file",
            index_file.to_str().unwrap(),
            "--exercise-dedup",
            dedup,
        ]);

        db::run_migrations(&db_path).unwrap();
        let pool = db::create_pool(&db_path, Duration::from_secs(5)).unwrap();
        db::check_connection(&pool).await.unwrap();

        Self {
            router: app(AppState::new(pool.clone(), args)),
            pool,
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Registers `username` and returns its id
    pub async fn register(&self, username: &str) -> String {
        let (status, body) = self
            .post_json(Object::Users.path(), serde_json::json!({ "username": username }))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        json(&body)["_id"].as_str().unwrap().to_string()
    }

    pub async fn log_exercise(
        &self,
        user_id: &str,
        description: &str,
        duration: i64,
        date: &str,
    ) -> Value {
        let (status, body) = self
            .post_json(
                &Object::UserExercises.path_for(user_id),
                serde_json::json!({
                    "description": description,
                    "duration": duration,
                    "date": date,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        json(&body)
    }
}

pub fn json(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}
