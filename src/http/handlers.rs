//! Request dispatch.
//!
//! # Responsibilities
//! - Decide per request: status page, reload request, favicon carve-out,
//!   or redirect table lookup, in that strict order
//! - Produce the redirect response with provenance headers
//! - Count successful redirects
//!
//! # Design Decisions
//! - The snapshot is loaded once per request; a reload published mid-flight
//!   never changes what this request observes
//! - Table matching is exact and case-sensitive; no prefix or
//!   trailing-slash normalization
//! - A destination that cannot be encoded into a header yields 500 rather
//!   than a mangled response

use std::net::SocketAddr;
use std::time::Instant;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderName, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::server::AppState;
use crate::http::status;
use crate::observability::metrics;
use crate::redirects::{RedirectCounter, RedirectEntry};

/// Redirect provenance headers.
pub static HEADER_CREATED_BY: HeaderName = HeaderName::from_static("redirect-created-by");
pub static HEADER_CREATED_DATE: HeaderName = HeaderName::from_static("redirect-created-date");

/// Fallback when a stored user cannot be encoded into a header.
const CREATED_BY_FALLBACK: &str = "Error Encoding User";

/// Reserved before table lookup so a missing-favicon probe never matches
/// an errant table entry.
const FAVICON_PATH: &str = "/favicon.ico";

/// Per-request entry point. Precedence: status page, reload path (when
/// configured), favicon carve-out, then the redirect table.
pub async fn dispatch(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let start = Instant::now();
    let path = request.uri().path().to_string();
    let method = request.method().clone();

    tracing::debug!(%peer, %method, %path, "request received");

    // One snapshot for the whole request; a reload published concurrently
    // swaps the shared reference without disturbing this dispatch.
    let snapshot = state.table.load_full();

    let response = if path == state.options.status_path {
        tracing::info!(%peer, %path, "status page requested");
        status::render(&state, &snapshot).into_response()
    } else if state.options.reload_path.as_deref() == Some(path.as_str()) {
        tracing::info!(%peer, %path, "reload requested over HTTP");
        state.trigger.raise();
        StatusCode::NO_CONTENT.into_response()
    } else if path == FAVICON_PATH {
        tracing::info!(%peer, %path, "favicon request refused");
        StatusCode::NOT_FOUND.into_response()
    } else {
        match snapshot.get(&path) {
            Some(entry) => redirect_response(&state, &path, entry),
            None => {
                tracing::info!(%peer, %path, "no redirect found");
                StatusCode::NOT_FOUND.into_response()
            }
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}

/// Build the redirect reply for a matched entry and count it.
fn redirect_response(state: &AppState, from_path: &str, entry: &RedirectEntry) -> Response {
    // The Location value must survive header encoding; answer 500 rather
    // than emit a broken header.
    let location = match HeaderValue::from_str(&entry.to_url) {
        Ok(location) => location,
        Err(_) => {
            tracing::error!(
                from = %from_path,
                to = %entry.to_url,
                "Location header value not encodable, returning 500"
            );
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let code = state.options.redirect_code;
    tracing::info!(from = %from_path, to = %entry.to_url, status = code.as_u16(), "redirect found");

    let created_by = HeaderValue::from_str(&entry.created_by)
        .unwrap_or_else(|_| HeaderValue::from_static(CREATED_BY_FALLBACK));
    let created_date = entry.created_at.format("%Y-%m-%dT%H:%M:%S").to_string();

    match Response::builder()
        .status(code)
        .header(header::LOCATION, location)
        .header(HEADER_CREATED_BY.clone(), created_by)
        .header(HEADER_CREATED_DATE.clone(), created_date)
        .body(Body::empty())
    {
        Ok(response) => {
            state
                .counter
                .increment(RedirectCounter::key(from_path, &entry.to_url));
            response
        }
        Err(error) => {
            tracing::error!(%error, "failed to build redirect response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::server::{build_router, AppState, DispatchOptions, ServerIdentity};
    use crate::redirects::loader::load_redirects;
    use crate::redirects::RedirectSources;
    use crate::reload::ReloadTrigger;
    use arc_swap::ArcSwap;
    use axum::Router;
    use chrono::{Local, Timelike};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state(from_to: Vec<(&str, &str)>, reload_path: Option<&str>) -> AppState {
        let sources = Arc::new(RedirectSources {
            from_to: from_to
                .into_iter()
                .map(|(f, t)| (f.to_string(), t.to_string()))
                .collect(),
            files: vec![],
            field_delimiter: "\t".to_string(),
        });
        let table = Arc::new(ArcSwap::from_pointee(load_redirects(&sources)));
        let now = Local::now();
        AppState {
            table,
            counter: RedirectCounter::new(),
            trigger: Arc::new(ReloadTrigger::new()),
            identity: Arc::new(ServerIdentity {
                hostname: "testhost".to_string(),
                version: env!("CARGO_PKG_VERSION"),
                pid: std::process::id(),
                started_at: now.with_nanosecond(0).unwrap_or(now),
                started_instant: Instant::now(),
                listen_addr: "127.0.0.1:8080".parse().unwrap(),
                command_line: "goto-redirect --from-to /hr http://intranet/hr".to_string(),
            }),
            options: Arc::new(DispatchOptions {
                status_path: "/status".to_string(),
                reload_path: reload_path.map(str::to_string),
                redirect_code: StatusCode::PERMANENT_REDIRECT,
            }),
            sources,
        }
    }

    fn get(path: &str) -> Request<Body> {
        let mut request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("127.0.0.1:54321".parse().unwrap()));
        request
    }

    async fn send(router: &Router, path: &str) -> Response {
        router.clone().oneshot(get(path)).await.unwrap()
    }

    #[tokio::test]
    async fn redirect_hit_carries_location_and_provenance() {
        let state = test_state(vec![("/hr", "http://intranet/hr")], None);
        let router = build_router(state.clone());

        let response = send(&router, "/hr").await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "http://intranet/hr"
        );
        assert!(response.headers().contains_key(&HEADER_CREATED_BY));
        assert!(response.headers().contains_key(&HEADER_CREATED_DATE));
        assert!(response.headers().contains_key("redirect-server-host"));
        assert!(response.headers().contains_key("redirect-server-version"));

        let snapshot = state.counter.snapshot();
        assert_eq!(snapshot["(/hr) → (http://intranet/hr)"], 1);
    }

    #[tokio::test]
    async fn miss_is_not_found_with_identity_headers() {
        let state = test_state(vec![("/hr", "http://intranet/hr")], None);
        let router = build_router(state);

        let response = send(&router, "/unknown").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("redirect-server-host"));
    }

    #[tokio::test]
    async fn reload_path_wins_over_table_entry() {
        let state = test_state(vec![("/reload", "http://shadowed")], Some("/reload"));
        let router = build_router(state.clone());

        let response = send(&router, "/reload").await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(state.trigger.take());
        assert!(state.counter.snapshot().is_empty());
    }

    #[tokio::test]
    async fn favicon_never_reaches_the_table() {
        let state = test_state(vec![("/favicon.ico", "http://errant")], None);
        let router = build_router(state.clone());

        let response = send(&router, "/favicon.ico").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(state.counter.snapshot().is_empty());
    }

    #[tokio::test]
    async fn unencodable_location_is_internal_error() {
        let state = test_state(vec![("/snow", "http://intranet/☃")], None);
        let router = build_router(state.clone());

        let response = send(&router, "/snow").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response.headers().contains_key(header::LOCATION));
        assert!(state.counter.snapshot().is_empty());
    }

    #[tokio::test]
    async fn status_page_lists_loaded_entries() {
        let state = test_state(vec![("/hr", "http://intranet/hr")], None);
        let router = build_router(state);

        let response = send(&router, "/status").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("/hr"));
        assert!(body.contains("http://intranet/hr"));
    }

    #[tokio::test]
    async fn non_get_methods_are_rejected() {
        let state = test_state(vec![("/hr", "http://intranet/hr")], None);
        let router = build_router(state);

        let mut request = Request::builder()
            .method("POST")
            .uri("/hr")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("127.0.0.1:54321".parse().unwrap()));
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
