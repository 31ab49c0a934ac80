//! One-shot request helper over an axum router.

use axum::Router;
use axum::body::Body;
use http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt as _;
use serde_json::Value;
use tower::ServiceExt as _;

/// Wraps a router and drives it with `tower::ServiceExt::oneshot`, no TCP.
pub struct TestApp {
    router: Router,
}

/// Decoded response: status plus parsed JSON body (Null when empty).
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        decode(response).await
    }

    pub async fn get(&self, uri: &str, bearer: Option<&str>) -> TestResponse {
        self.request("GET", uri, bearer, None).await
    }

    pub async fn post(&self, uri: &str, bearer: Option<&str>, body: Value) -> TestResponse {
        self.request("POST", uri, bearer, Some(body)).await
    }

    pub async fn put(&self, uri: &str, bearer: Option<&str>, body: Value) -> TestResponse {
        self.request("PUT", uri, bearer, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, bearer: Option<&str>) -> TestResponse {
        self.request("DELETE", uri, bearer, None).await
    }
}

async fn decode(response: Response<Body>) -> TestResponse {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    TestResponse { status, body }
}
