//! Authenticated client and request dispatcher for the Smartsheet API.
//!
//! # Design
//! `Client` holds a token, an endpoint and a transport, and carries no
//! mutable state between calls, so one value can be shared by any number of
//! threads. Every call goes through the same three steps:
//!
//! 1. `build_request` serializes the payload and assembles headers. It is
//!    pure, so a payload that cannot be serialized fails before any I/O.
//! 2. The transport executes the request.
//! 3. [`check_response`] classifies the status.
//!
//! Resource operations in [`crate::ops`] then pick a decoder from
//! [`crate::envelope`].

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::classify::check_response;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};

pub const DEFAULT_ENDPOINT: &str = "https://api.smartsheet.com/2.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Largest response body read by the default transport: 256 MiB.
pub const DEFAULT_BODY_LIMIT: u64 = 256 * 1024 * 1024;
/// Environment variable consulted when no token is given explicitly.
pub const TOKEN_ENV_VAR: &str = "SMARTSHEET_ACCESS_TOKEN";

/// Construction options for [`Client`]. Unset fields take their defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
    /// Byte cap on a response body read by the default transport.
    pub body_limit: Option<u64>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn body_limit(mut self, bytes: u64) -> Self {
        self.body_limit = Some(bytes);
        self
    }

    /// An explicit non-empty token wins; otherwise ask `lookup` for
    /// [`TOKEN_ENV_VAR`]. Falls back to an empty token, which the service
    /// rejects with 401.
    fn resolve_token(&self, lookup: impl Fn(&str) -> Option<String>) -> String {
        self.token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| lookup(TOKEN_ENV_VAR))
            .unwrap_or_default()
    }

    fn resolve_endpoint(&self) -> String {
        self.endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(DEFAULT_ENDPOINT)
            .trim_end_matches('/')
            .to_string()
    }
}

/// Synchronous, stateless client for the Smartsheet API.
#[derive(Clone)]
pub struct Client {
    token: String,
    endpoint: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Build a client backed by a `ureq` agent with the configured timeout
    /// and body limit.
    pub fn new(options: ClientOptions) -> Self {
        let timeout = options.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let body_limit = options.body_limit.unwrap_or(DEFAULT_BODY_LIMIT);
        Self::with_transport(options, Arc::new(UreqTransport::new(timeout, body_limit)))
    }

    /// Default endpoint and timeout, token from [`TOKEN_ENV_VAR`].
    pub fn from_env() -> Self {
        Self::new(ClientOptions::default())
    }

    pub fn with_transport(options: ClientOptions, transport: Arc<dyn Transport>) -> Self {
        Self::build(options, transport, |name| std::env::var(name).ok())
    }

    fn build(
        options: ClientOptions,
        transport: Arc<dyn Transport>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let token = options.resolve_token(lookup);
        if token.is_empty() {
            tracing::warn!("no API token configured; requests will be rejected");
        }
        Self {
            token,
            endpoint: options.resolve_endpoint(),
            timeout: options.timeout.unwrap_or(DEFAULT_TIMEOUT),
            transport,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Assemble a request for `path` (relative to the endpoint).
    ///
    /// `Accept` and `Content-Type` default to JSON and may be replaced by
    /// `extra_headers`. `Authorization` always comes from the client token;
    /// a caller-supplied value is discarded.
    pub fn build_request<P>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&P>,
        extra_headers: &[(&str, &str)],
    ) -> Result<HttpRequest, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let body = payload
            .map(serde_json::to_string)
            .transpose()
            .map_err(ApiError::Serialization)?;

        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        for (name, value) in extra_headers {
            if name.eq_ignore_ascii_case("authorization") {
                continue;
            }
            set_header(&mut headers, name, value);
        }
        headers.push(("Authorization".to_string(), format!("Bearer {}", self.token)));

        Ok(HttpRequest {
            method,
            url: format!("{}{}", self.endpoint, path),
            headers,
            body,
        })
    }

    /// Execute a built request and classify its status. Returns the raw 2xx
    /// response for the caller to decode.
    pub fn dispatch(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "dispatching request");
        let response = self.transport.execute(request)?;
        tracing::debug!(
            method = request.method.as_str(),
            url = %request.url,
            status = response.status,
            "received response"
        );
        check_response(response)
    }

    /// Build and dispatch in one step.
    pub fn send<P>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&P>,
        extra_headers: &[(&str, &str)],
    ) -> Result<HttpResponse, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, payload, extra_headers)?;
        self.dispatch(&request)
    }

    pub fn get(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.send::<()>(HttpMethod::Get, path, None, &[])
    }

    pub fn post<P>(&self, path: &str, payload: &P, extra_headers: &[(&str, &str)]) -> Result<HttpResponse, ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.send(HttpMethod::Post, path, Some(payload), extra_headers)
    }

    /// `None` sends no body.
    pub fn put<P>(&self, path: &str, payload: Option<&P>, extra_headers: &[(&str, &str)]) -> Result<HttpResponse, ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.send(HttpMethod::Put, path, payload, extra_headers)
    }

    pub fn delete(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.send::<()>(HttpMethod::Delete, path, None, &[])
    }
}

/// Replace an existing header (case-insensitive) or append it.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
        Some(slot) => slot.1 = value.to_string(),
        None => headers.push((name.to_string(), value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::*;
    use crate::error::ErrorKind;

    /// Records requests and replays a canned response.
    struct Canned {
        status: u16,
        body: String,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Canned {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.to_string(),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl Transport for Canned {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.clone().into_bytes(),
            })
        }
    }

    struct Unreachable;

    impl Transport for Unreachable {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport("timed out".to_string()))
        }
    }

    fn options() -> ClientOptions {
        ClientOptions::new()
            .endpoint("http://localhost:3000/2.0/")
            .token("secret")
    }

    fn client() -> Client {
        Client::build(options(), Arc::new(Unreachable), |_| None)
    }

    #[test]
    fn explicit_token_wins_over_environment() {
        let c = Client::build(options(), Arc::new(Unreachable), |_| Some("123".to_string()));
        assert_eq!(c.token(), "secret");
    }

    #[test]
    fn token_falls_back_to_environment() {
        let c = Client::build(ClientOptions::new(), Arc::new(Unreachable), |name| {
            (name == TOKEN_ENV_VAR).then(|| "123".to_string())
        });
        assert_eq!(c.token(), "123");
    }

    #[test]
    fn empty_explicit_token_falls_back_to_environment() {
        let c = Client::build(ClientOptions::new().token(""), Arc::new(Unreachable), |_| {
            Some("123".to_string())
        });
        assert_eq!(c.token(), "123");
    }

    #[test]
    fn defaults() {
        let c = Client::build(ClientOptions::new(), Arc::new(Unreachable), |_| None);
        assert_eq!(c.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(c.timeout(), Duration::from_secs(5));
        assert_eq!(c.token(), "");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        assert_eq!(client().endpoint(), "http://localhost:3000/2.0");
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn build_request_sets_json_and_bearer_headers() {
        let req = client()
            .build_request::<()>(HttpMethod::Get, "/sheets/1", None, &[])
            .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/2.0/sheets/1");
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("authorization"), Some("Bearer secret"));
        assert!(req.body.is_none());
    }

    #[test]
    fn extra_headers_override_defaults_but_not_authorization() {
        let req = client()
            .build_request::<()>(
                HttpMethod::Post,
                "/sheets/1/attachments",
                None,
                &[
                    ("content-type", "text/plain"),
                    ("Authorization", "Bearer stolen"),
                    ("X-Custom", "1"),
                ],
            )
            .unwrap();
        assert_eq!(req.header("Content-Type"), Some("text/plain"));
        assert_eq!(req.header("Authorization"), Some("Bearer secret"));
        assert_eq!(req.header("x-custom"), Some("1"));
        let auth_count = req
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("authorization"))
            .count();
        assert_eq!(auth_count, 1);
        let content_type_count = req
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .count();
        assert_eq!(content_type_count, 1);
    }

    #[test]
    fn payload_is_serialized_to_body() {
        let payload = serde_json::json!({"toTop": true, "cells": []});
        let req = client()
            .build_request(HttpMethod::Post, "/sheets/1/rows", Some(&payload), &[])
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, payload);
    }

    #[test]
    fn unserializable_payload_fails_before_sending() {
        // JSON object keys must be strings.
        let mut payload = BTreeMap::new();
        payload.insert(vec![1u8], "value");

        let transport = Canned::new(200, "{}");
        let c = Client::build(options(), transport.clone(), |_| None);
        let err = c
            .send(HttpMethod::Post, "/sheets", Some(&payload), &[])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn put_and_delete_without_payload_send_no_body() {
        let transport = Canned::new(200, "{}");
        let c = Client::build(options(), transport.clone(), |_| None);
        c.put::<()>("/sheets/1", None, &[]).unwrap();
        c.delete("/sheets/1").unwrap();
        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Put);
        assert!(seen[0].body.is_none());
        assert_eq!(seen[1].method, HttpMethod::Delete);
        assert!(seen[1].body.is_none());
    }

    #[test]
    fn dispatch_classifies_service_errors() {
        let transport = Canned::new(
            404,
            r#"{"errorCode":1006,"message":"Not Found","refId":"abc"}"#,
        );
        let c = Client::build(options(), transport, |_| None);
        let err = c.get("/sheets/42").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert_eq!(err.service_error().unwrap().ref_id, "abc");
    }

    #[test]
    fn transport_errors_propagate() {
        let err = client().get("/sheets/42").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn client_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();

        let transport = Canned::new(200, r#"{"id":1}"#);
        let c = Client::build(options(), transport.clone(), |_| None);
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let c = c.clone();
                std::thread::spawn(move || c.get(&format!("/sheets/{i}")).unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().status, 200);
        }
        assert_eq!(transport.seen.lock().unwrap().len(), 4);
    }
}
