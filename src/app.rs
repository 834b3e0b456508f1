use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{advice, auth, records, state::AppState, users};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(auth::router())
                .merge(users::router())
                .merge(records::router())
                .merge(advice::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis();
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use time::macros::datetime;
    use tower::ServiceExt;

    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.expect("response");
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).expect("request")
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = build_app(test_app(datetime!(2024-06-15 12:00 UTC)).state);
        let res = app
            .oneshot(
                Request::get("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn register_log_and_read_back() {
        let app = build_app(test_app(datetime!(2024-06-15 12:00 UTC)).state);

        let (status, body) = call(
            &app,
            json_request(
                "POST",
                "/api/v1/auth/register",
                None,
                json!({
                    "email": "flow@example.com",
                    "password": "password123",
                    "nickname": "flow",
                    "weight": 70.0,
                    "height": 175.0,
                    "birth_date": "1990-01-01",
                    "gender": "male",
                    "activity_level": "moderate"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let token = body["session_id"].as_str().expect("token").to_owned();

        let (status, body) = call(
            &app,
            json_request(
                "POST",
                "/api/v1/records",
                Some(&token),
                json!({
                    "eaten_at": "2024-06-15T08:00:00Z",
                    "items": [{"name": "oatmeal", "calories": 350}]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_str().expect("id").to_owned();

        let get = Request::get(format!("/api/v1/records/{id}"))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request");
        let (status, body) = call(&app, get).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_calories"], 350);

        let targets = Request::get("/api/v1/me/targets")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request");
        let (status, body) = call(&app, targets).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["calories"], 2524);
    }

    #[tokio::test]
    async fn errors_are_json_lists() {
        let app = build_app(test_app(datetime!(2024-06-15 12:00 UTC)).state);

        let (status, body) = call(
            &app,
            json_request(
                "POST",
                "/api/v1/auth/register",
                None,
                json!({
                    "email": "",
                    "password": "short",
                    "nickname": "",
                    "weight": 0.0,
                    "height": 175.0,
                    "birth_date": "1990-01-01",
                    "gender": "male",
                    "activity_level": "moderate"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(4));

        let me = Request::get("/api/v1/me").body(Body::empty()).expect("request");
        let (status, body) = call(&app, me).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["errors"][0], "unauthorized");
    }

    #[tokio::test]
    async fn unreadable_bodies_and_queries_are_json_lists() {
        let test = test_app(datetime!(2024-06-15 12:00 UTC));
        let (_, session) = crate::auth::services::register(
            &test.state,
            crate::domain::NewUser {
                email: "shape@example.com",
                password: "password123",
                nickname: "shape",
                weight_kg: 70.0,
                height_cm: 175.0,
                birth_date: "1990-01-01",
                gender: "male",
                activity_level: "moderate",
            },
        )
        .await
        .expect("registered");
        let token = session.id().as_str().to_owned();
        let app = build_app(test.state);

        let broken = Request::post("/api/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"email\": "))
            .expect("request");
        let (status, body) = call(&app, broken).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));

        let (status, body) = call(
            &app,
            json_request("POST", "/api/v1/records", Some(&token), json!({ "items": "rice" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"][0].is_string());

        let bad_date = Request::get("/api/v1/records?from=June-14")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request");
        let (status, body) = call(&app, bad_date).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
    }
}
