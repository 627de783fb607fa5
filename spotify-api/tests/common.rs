use axum::{
    extract::State,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER, USER_AGENT},
        HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    Router,
};
use spotifyrs_api::{client::api, ApiConfig, Client};
use std::{
    collections::HashMap,
    net::{SocketAddr, TcpListener},
    sync::{Arc, Mutex},
};

pub const TOKEN: &str = "test-token";

#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: Method,
    pub uri: String,
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Canned {
    pub status: StatusCode,
    pub body: String,
    pub retry_after: Option<&'static str>,
}

impl Canned {
    pub fn ok(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            retry_after: None,
        }
    }

    pub fn status(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            retry_after: None,
        }
    }
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<HashMap<(Method, String), Canned>>,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

/// An in-process stand-in for the Web API that answers with canned bodies
/// and records every request it sees.
pub struct MockServer {
    pub addr: SocketAddr,
    state: MockState,
}

impl MockServer {
    pub fn base_url(&self) -> String {
        format!("http://{}/v1/", self.addr)
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig {
            access_token: Some(TOKEN.to_string()),
            base_url: Some(self.base_url()),
            ..Default::default()
        }
    }

    pub fn client(&self) -> Client {
        api::new(self.config()).expect("failed to create client")
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state
            .recorded
            .lock()
            .expect("recorder poisoned")
            .clone()
    }
}

/// Starts a server answering `routes`. Any `{base}` in a canned body is
/// replaced with the server's own base url.
pub async fn serve(routes: Vec<(Method, &str, Canned)>) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind");
    let addr = listener.local_addr().expect("failed to read address");
    let base_url = format!("http://{addr}/v1/");

    let state = MockState {
        routes: Arc::new(
            routes
                .into_iter()
                .map(|(method, path, mut canned)| {
                    canned.body = canned.body.replace("{base}", &base_url);
                    ((method, path.to_string()), canned)
                })
                .collect(),
        ),
        recorded: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .fallback(respond)
        .with_state(state.clone());

    let server = axum::Server::from_tcp(listener)
        .expect("failed to create server")
        .serve(app.into_make_service());

    tokio::spawn(server);

    MockServer { addr, state }
}

fn header(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn respond(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state
        .recorded
        .lock()
        .expect("recorder poisoned")
        .push(Recorded {
            method: method.clone(),
            uri: uri.to_string(),
            authorization: header(&headers, AUTHORIZATION),
            user_agent: header(&headers, USER_AGENT),
        });

    match state.routes.get(&(method, uri.path().to_string())) {
        Some(canned) => {
            let mut response = (canned.status, canned.body.clone()).into_response();
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

            if let Some(retry_after) = canned.retry_after {
                response
                    .headers_mut()
                    .insert(RETRY_AFTER, HeaderValue::from_static(retry_after));
            }

            response
        }
        None => (
            StatusCode::NOT_FOUND,
            r#"{"error":{"status":404,"message":"Service not found"}}"#,
        )
            .into_response(),
    }
}
