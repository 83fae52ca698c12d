//! In-process mock Confluence server.
//!
//! Serves a small in-memory content store over real HTTP and records every
//! request, so tests can assert on request counts, order and shape.
//!
//! Seed data:
//! - space `TEST` with home page `1000`
//! - space `NOHOME` without a home-page link
//! - any other space key returns an empty result list

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use cfl_client::{ClientSettings, ConfluenceClient, LEGACY_API_VERSION};
use serde_json::{Value, json};

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "s3cret";
pub const HOME_PAGE_ID: &str = "1000";

/// Request as received by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Raw query string, still percent-encoded.
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Decoded query parameters.
    pub fn query_params(&self) -> HashMap<String, String> {
        let uri = match &self.query {
            Some(q) => format!("/?{q}"),
            None => "/".to_owned(),
        };
        let uri: axum::http::Uri = uri.parse().unwrap();
        axum::extract::Query::<HashMap<String, String>>::try_from_uri(&uri)
            .unwrap()
            .0
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// `METHOD /path` summary for order assertions.
    pub fn line(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

#[derive(Debug, Default)]
struct MockState {
    requests: Vec<RecordedRequest>,
    pages: HashMap<String, Value>,
    labels: HashMap<String, Vec<Value>>,
    next_id: u64,
}

/// Handle to a running mock server.
#[derive(Clone)]
pub struct MockConfluence {
    addr: SocketAddr,
    state: Arc<Mutex<MockState>>,
}

impl MockConfluence {
    /// Start a server on a random local port.
    pub fn start() -> Self {
        let mut state = MockState {
            next_id: 2000,
            ..MockState::default()
        };
        state.pages.insert(
            HOME_PAGE_ID.to_owned(),
            page_json(HOME_PAGE_ID, "TEST", "Test Home", "<p>Welcome</p>", 1),
        );
        let state = Arc::new(Mutex::new(state));

        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                axum::serve(listener, app).await
            })
            .unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn settings(&self) -> ClientSettings {
        ClientSettings::new(USERNAME, PASSWORD, self.base_url())
    }

    pub fn client(&self) -> ConfluenceClient {
        ConfluenceClient::new(self.settings()).unwrap()
    }

    pub fn legacy_client(&self) -> ConfluenceClient {
        ConfluenceClient::new(self.settings().with_version(LEGACY_API_VERSION)).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.lock().requests.iter().map(RecordedRequest::line).collect()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.lock().requests.last().cloned().unwrap()
    }

    pub fn page_count(&self) -> usize {
        self.lock().pages.len()
    }

    pub fn stored_page(&self, id: &str) -> Option<Value> {
        self.lock().pages.get(id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }
}

fn page_json(id: &str, space_key: &str, title: &str, body: &str, version: u64) -> Value {
    json!({
        "id": id,
        "type": "page",
        "title": title,
        "space": {"key": space_key},
        "version": {"number": version, "minorEdit": false},
        "body": {"storage": {"value": body, "representation": "storage"}},
        "_links": {"webui": format!("/pages/viewpage.action?pageId={id}")}
    })
}

fn json_response(status: StatusCode, value: &Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        value.to_string(),
    )
        .into_response()
}

fn ok(value: &Value) -> Response {
    json_response(StatusCode::OK, value)
}

fn error(status: StatusCode, message: &str) -> Response {
    json_response(
        status,
        &json!({"statusCode": status.as_u16(), "message": message}),
    )
}

fn uploaded_filename(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    text.split("filename=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap_or_default()
        .to_owned()
}

async fn handle(State(state): State<Arc<Mutex<MockState>>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap().to_vec();

    let recorded = RecordedRequest {
        method: parts.method.as_str().to_owned(),
        path: parts.uri.path().to_owned(),
        query: parts.uri.query().map(str::to_owned),
        headers: parts
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    value.to_str().unwrap_or_default().to_owned(),
                )
            })
            .collect(),
        body,
    };

    let mut state = state.lock().unwrap();
    state.requests.push(recorded.clone());
    route(&mut state, &recorded)
}

fn route(state: &mut MockState, request: &RecordedRequest) -> Response {
    let expected_auth = format!("Basic {}", base64_credentials(USERNAME, PASSWORD));
    if request.header("authorization") != Some(expected_auth.as_str()) {
        return error(StatusCode::UNAUTHORIZED, "Authentication required");
    }

    let params = request.query_params();

    // Legacy prototype API mirrors the REST API with a `.json` extension.
    let (path, legacy) = match request.path.strip_prefix("/rest/prototype/1") {
        Some(rest) => (rest.trim_end_matches(".json").to_owned(), true),
        None => match request.path.strip_prefix("/rest/api") {
            Some(rest) => (rest.to_owned(), false),
            None => return error(StatusCode::NOT_FOUND, "Unknown API"),
        },
    };
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

    match (request.method.as_str(), segments.as_slice()) {
        ("GET", ["space"]) => space_lookup(params.get("spaceKey").map(String::as_str), legacy),
        ("GET", ["content"]) => find_by_title(state, &params),
        ("POST", ["content"]) => create_page(state, &request.json()),
        ("GET", ["content", "bad-gateway"]) => (
            StatusCode::BAD_GATEWAY,
            [(header::CONTENT_TYPE, "text/html")],
            "<html>Bad Gateway</html>",
        )
            .into_response(),
        ("GET", ["content", "latin1"]) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Body::from(vec![0xff_u8, 0xfe, 0xfd]),
        )
            .into_response(),
        ("GET", ["content", "numeric"]) => ok(&json!({
            "id": 65539,
            "type": "page",
            "title": "Legacy export",
            "ancestors": [{"id": 98305}],
        })),
        ("GET", ["content", id]) => match state.pages.get(*id) {
            Some(page) => ok(page),
            None => error(StatusCode::NOT_FOUND, "No content found with id"),
        },
        ("PUT", ["content", id]) => update_page(state, id, &request.json()),
        ("DELETE", ["content", id]) => match state.pages.remove(*id) {
            Some(_) => StatusCode::NO_CONTENT.into_response(),
            None => error(StatusCode::NOT_FOUND, "No content found with id"),
        },
        ("GET", ["content", id, "child", "attachment"]) => ok(&json!({
            "results": [
                {"id": "att1", "title": "diagram.png", "type": "attachment",
                 "container": {"id": id}, "version": {"number": 1}}
            ],
            "size": 1
        })),
        ("POST", ["content", id, "child", "attachment"]) => ok(&json!({
            "results": [
                {"id": "att9", "title": uploaded_filename(&request.body), "type": "attachment",
                 "container": {"id": id}}
            ],
            "size": 1
        })),
        ("POST", ["content", _, "child", "attachment", attachment_id, "data"]) => ok(&json!({
            "id": attachment_id,
            "title": uploaded_filename(&request.body),
            "type": "attachment",
            "version": {"number": 2}
        })),
        ("GET", ["content", id, "label"]) => {
            let labels = state.labels.get(*id).cloned().unwrap_or_default();
            ok(&json!({"size": labels.len(), "results": labels}))
        }
        ("POST", ["content", id, "label"]) => {
            let added = request.json().as_array().cloned().unwrap_or_default();
            let labels = state.labels.entry((*id).to_owned()).or_default();
            for (index, mut label) in added.into_iter().enumerate() {
                label["id"] = json!(format!("{}{index}", labels.len()));
                labels.push(label);
            }
            ok(&json!({"size": labels.len(), "results": labels}))
        }
        ("DELETE", ["content", id, "label"]) => {
            let name = params.get("name").cloned().unwrap_or_default();
            if let Some(labels) = state.labels.get_mut(*id) {
                labels.retain(|l| l["name"] != name.as_str());
            }
            StatusCode::NO_CONTENT.into_response()
        }
        ("GET", ["search"]) => ok(&json!({
            "results": [],
            "size": 0,
            "cqlQuery": params.get("cql").cloned().unwrap_or_default()
        })),
        _ => (StatusCode::NOT_FOUND, Body::from("not found")).into_response(),
    }
}

fn space_lookup(space_key: Option<&str>, legacy: bool) -> Response {
    let prefix = if legacy { "/rest/prototype/1" } else { "/rest/api" };
    match space_key {
        Some("TEST") => ok(&json!({
            "results": [{
                "key": "TEST",
                "name": "Test space",
                "_expandable": {"homepage": format!("{prefix}/content/{HOME_PAGE_ID}")}
            }],
            "size": 1
        })),
        Some("NOHOME") => ok(&json!({
            "results": [{"key": "NOHOME", "name": "No home", "_expandable": {}}],
            "size": 1
        })),
        _ => ok(&json!({"results": [], "size": 0})),
    }
}

fn find_by_title(state: &MockState, params: &HashMap<String, String>) -> Response {
    let results: Vec<&Value> = state
        .pages
        .values()
        .filter(|page| {
            params.get("spaceKey").map(String::as_str) == page["space"]["key"].as_str()
                && params.get("title").map(String::as_str) == page["title"].as_str()
        })
        .collect();
    ok(&json!({"results": results, "size": results.len()}))
}

fn create_page(state: &mut MockState, body: &Value) -> Response {
    let (Some(title), Some(space_key)) = (body["title"].as_str(), body["space"]["key"].as_str())
    else {
        return error(StatusCode::BAD_REQUEST, "title and space are required");
    };

    state.next_id += 1;
    let id = state.next_id.to_string();
    let mut page = page_json(
        &id,
        space_key,
        title,
        body["body"]["storage"]["value"].as_str().unwrap_or_default(),
        1,
    );
    page["ancestors"] = body["ancestors"].clone();
    state.pages.insert(id, page.clone());
    ok(&page)
}

fn update_page(state: &mut MockState, id: &str, body: &Value) -> Response {
    let Some(page) = state.pages.get_mut(id) else {
        return error(StatusCode::NOT_FOUND, "No content found with id");
    };

    let current = page["version"]["number"].as_u64().unwrap_or_default();
    let requested = body["version"]["number"].as_u64().unwrap_or_default();
    if requested != current + 1 {
        return error(
            StatusCode::CONFLICT,
            "Version must be incremented on update",
        );
    }

    page["title"] = body["title"].clone();
    page["version"] = json!({
        "number": requested,
        "minorEdit": body["version"]["minorEdit"].clone()
    });
    page["body"] = body["body"].clone();
    ok(page)
}

fn base64_credentials(username: &str, password: &str) -> String {
    BASE64_STANDARD.encode(format!("{username}:{password}"))
}
