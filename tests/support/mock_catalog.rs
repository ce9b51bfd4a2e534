use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Canned response: status, content type and body
pub type Reply = (StatusCode, &'static str, String);

type Responder = Arc<dyn Fn(&str) -> Reply + Send + Sync>;

#[derive(Clone)]
struct MockState {
    responder: Responder,
    requests: Arc<Mutex<Vec<String>>>,
}

/// Local stand-in for the catalog's search endpoint
///
/// Every request is recorded with its decoded query string, and answered by
/// the responder passed to `start`.
pub struct MockCatalog {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockCatalog {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Reply + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            responder: Arc::new(responder),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/search", get(search))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock catalog");
        let addr = listener.local_addr().expect("Mock catalog has no address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock catalog stopped");
        });

        Self { addr, requests }
    }

    /// Always answer with the same status and body
    pub async fn fixed(status: StatusCode, content_type: &'static str, body: String) -> Self {
        Self::start(move |_| (status, content_type, body.clone())).await
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/search", self.addr)
    }

    /// Decoded query strings of the requests received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn search(State(state): State<MockState>, RawQuery(query): RawQuery) -> impl IntoResponse {
    let raw = query.unwrap_or_default();
    let query = urlencoding::decode(&raw)
        .map(|q| q.into_owned())
        .unwrap_or(raw);

    state.requests.lock().unwrap().push(query.clone());

    let (status, content_type, body) = (state.responder)(&query);
    (status, [(header::CONTENT_TYPE, content_type)], body)
}
