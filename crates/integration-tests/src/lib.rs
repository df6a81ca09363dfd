//! Integration test harness for Greengrocer.
//!
//! Tests run fully in-process: the router is built against an in-memory
//! SQLite database and driven with `tower::ServiceExt::oneshot`, so no
//! server or external database is needed.
//!
//! [`TestClient`] carries cookies between requests the way a browser
//! would, which is what makes session-based login flows testable.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response};
use secrecy::SecretString;
use tower::ServiceExt;

use greengrocer_web::config::GrocerConfig;
use greengrocer_web::state::AppState;

/// Build the full application router over a fresh in-memory database.
///
/// A single connection is required: each SQLite `:memory:` connection gets
/// its own database.
pub async fn test_app() -> Router {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    greengrocer_web::db::init_schema(&pool)
        .await
        .expect("Failed to apply schema");

    let config = GrocerConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost".to_string(),
    };

    greengrocer_web::app(AppState::new(config, pool))
        .await
        .expect("Failed to build application router")
}

/// In-process HTTP client that carries cookies between requests.
pub struct TestClient {
    app: Router,
    cookies: HashMap<String, String>,
}

impl TestClient {
    /// Create a client over a fresh application instance.
    pub async fn new() -> Self {
        Self {
            app: test_app().await,
            cookies: HashMap::new(),
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> Response<Body> {
        let request = self
            .request_builder("GET", path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Send a POST request with a urlencoded form body.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let request = self
            .request_builder("POST", path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(request).await
    }

    fn request_builder(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(path);
        if !self.cookies.is_empty() {
            let header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(COOKIE, header);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        for value in response.headers().get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            let Some(pair) = raw.split(';').next() else {
                continue;
            };
            if let Some((name, value)) = pair.split_once('=') {
                self.cookies
                    .insert(name.trim().to_string(), value.trim().to_string());
            }
        }

        response
    }
}

/// Read the full response body as a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

/// Read the Location header of a redirect response.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("Missing Location header")
        .to_str()
        .expect("Location header is not UTF-8")
}
