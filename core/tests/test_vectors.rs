//! Verify request building and response handling against JSON test vectors
//! stored in `test-vectors/`.
//!
//! `requests.json` pins the exact URL, header list and body the client
//! assembles. `responses.json` feeds raw responses through classification and
//! the bulk envelope decoder, including bodies that are empty or not UTF-8.
//! Bodies are compared as parsed JSON, not raw strings, so field ordering
//! does not matter.

use serde_json::Value;
use smartsheet_core::classify::check_response;
use smartsheet_core::types::Row;
use smartsheet_core::{decode_bulk, ApiError, Arity, Client, ClientOptions, HttpMethod, HttpResponse};

const ENDPOINT: &str = "http://localhost:3000/2.0";

fn client() -> Client {
    Client::new(ClientOptions::new().endpoint(ENDPOINT).token("abc"))
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn header_pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .map(|headers| {
            headers
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

/// A simulated response. `body_bytes` carries bodies that are not UTF-8.
fn response(case: &Value) -> HttpResponse {
    let sim = &case["response"];
    let body = match sim.get("body_bytes") {
        Some(bytes) => bytes
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b.as_u64().unwrap() as u8)
            .collect(),
        None => sim["body"].as_str().unwrap().as_bytes().to_vec(),
    };
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body,
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let method = parse_method(case["method"].as_str().unwrap());
        let path = case["path"].as_str().unwrap();
        let extra = header_pairs(&case["extra_headers"]);
        let extra: Vec<(&str, &str)> = extra.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let payload = case.get("payload");
        let expected = &case["expected_request"];

        let req = c.build_request(method, path, payload, &extra).unwrap();
        assert_eq!(req.method, method, "{name}: method");
        assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.headers, header_pairs(&expected["headers"]), "{name}: headers");

        match req.body.as_deref() {
            Some(body) => {
                let body: Value = serde_json::from_str(body).unwrap();
                assert_eq!(body, expected["body"], "{name}: body");
            }
            None => assert!(expected["body"].is_null(), "{name}: body should be present"),
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

fn assert_error(name: &str, err: &ApiError, expected: &Value) {
    let kind = expected["kind"].as_str().unwrap();
    assert_eq!(format!("{:?}", err.kind()), kind, "{name}: error kind");
    if let Some(status) = expected.get("status") {
        assert_eq!(err.status(), Some(status.as_u64().unwrap() as u16), "{name}: status");
    }
    if expected["unparsed"].as_bool().unwrap_or(false) {
        assert!(matches!(err, ApiError::UnparsedServiceError { .. }), "{name}: expected unparsed body");
        assert!(err.service_error().is_none(), "{name}: no error object");
    }
    if let Some(code) = expected.get("errorCode") {
        let service = err.service_error().unwrap();
        assert_eq!(service.error_code, code.as_str().unwrap(), "{name}: errorCode");
        assert_eq!(service.ref_id, expected["refId"].as_str().unwrap(), "{name}: refId");
        assert_eq!(service.message, expected["message"].as_str().unwrap(), "{name}: message");
    }
}

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let arity = match case["arity"].as_str() {
            Some("one") => Arity::One,
            _ => Arity::Many,
        };

        let result = check_response(response(case)).and_then(|resp| decode_bulk::<Row>(&resp.body, arity));

        if let Some(expected_error) = case.get("expected_error") {
            assert_error(name, &result.unwrap_err(), expected_error);
            continue;
        }

        let envelope = result.unwrap();
        let expected = &case["expected_envelope"];
        assert_eq!(envelope.result_code, expected["resultCode"].as_i64().unwrap(), "{name}: resultCode");
        assert_eq!(envelope.version, expected["version"].as_i64().unwrap(), "{name}: version");
        assert_eq!(
            envelope.result.len() as u64,
            expected["resultCount"].as_u64().unwrap(),
            "{name}: result count"
        );
        let failed: Vec<usize> = expected["failedIndexes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i.as_u64().unwrap() as usize)
            .collect();
        assert_eq!(envelope.failed_indexes(), failed, "{name}: failed indexes");
    }
}
