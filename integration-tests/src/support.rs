use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use portfolio::api::LoginStatus;
use portfolio::comment::Comment;
use serde::Deserialize;
use serde_json::json;

pub const LOGIN_URL: &str = "/_ah/login?continue=%2F";
pub const LOGOUT_URL: &str = "/_ah/logout?continue=%2F";
const BASE_TIMESTAMP: i64 = 1_591_200_000_000;

/// Which response shapes the stub speaks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shape {
    #[default]
    Current,
    /// Bare comment array from `/data`, bare boolean from `/login-status`.
    Legacy,
}

#[derive(Debug, Default)]
pub struct StubState {
    pub comments: Vec<Comment>,
    pub next_id: u64,
    pub logged_in: bool,
    pub name: Option<String>,
    pub email: Option<String>,
    pub shape: Shape,
    /// When set, every `/data` read answers with this status.
    pub fail_reads: Option<StatusCode>,
    /// When set, `/data` reads answer with a truncated JSON body.
    pub garble_reads: bool,
    /// When set, `/data` reads wait this long before answering.
    pub stall_reads: Option<Duration>,
    pub requests: Vec<String>,
}

impl StubState {
    fn login_status(&self) -> LoginStatus {
        LoginStatus {
            logged_in: self.logged_in,
            name: self.logged_in.then(|| self.name.clone()).flatten(),
            email: self.logged_in.then(|| self.email.clone()).flatten(),
            login_url: (!self.logged_in).then(|| LOGIN_URL.to_string()),
            logout_url: self.logged_in.then(|| LOGOUT_URL.to_string()),
        }
    }
}

pub type Shared = Arc<Mutex<StubState>>;

/// In-process stand-in for the portfolio backend.
pub struct StubServer {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl StubServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut StubState) -> R) -> R {
        let mut guard = self.state.lock().expect("stub state poisoned");
        f(&mut guard)
    }

    pub fn requests(&self) -> Vec<String> {
        self.with_state(|s| s.requests.clone())
    }
}

pub async fn spawn_stub() -> StubServer {
    let state: Shared = Arc::new(Mutex::new(StubState::default()));
    let app = router(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    StubServer { addr, state }
}

pub fn router(state: Shared) -> Router {
    Router::new()
        .route("/data", get(list_comments).post(add_comment))
        .route("/delete-data", post(delete_comments))
        .route("/name", post(set_name))
        .route("/login-status", get(login_status))
        .route("/login", get(login))
        .with_state(state)
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(rename = "max-comments")]
    max_comments: Option<usize>,
    #[serde(rename = "sort-option")]
    sort_option: Option<String>,
}

async fn list_comments(State(state): State<Shared>, Query(q): Query<ListQuery>) -> Response {
    let stall = {
        let mut st = state.lock().expect("stub state poisoned");
        st.requests.push(format!(
            "GET /data max={:?} sort={:?}",
            q.max_comments, q.sort_option
        ));
        st.stall_reads
    };
    if let Some(delay) = stall {
        tokio::time::sleep(delay).await;
    }

    let st = state.lock().expect("stub state poisoned");
    if let Some(status) = st.fail_reads {
        return status.into_response();
    }
    if st.garble_reads {
        return (StatusCode::OK, "{\"comments\": [").into_response();
    }

    let mut comments = st.comments.clone();
    match q.sort_option.as_deref() {
        Some("oldest") => comments.sort_by_key(|c| c.timestamp),
        Some("author-asc") => comments.sort_by(|a, b| a.author.cmp(&b.author)),
        Some("author-desc") => comments.sort_by(|a, b| b.author.cmp(&a.author)),
        _ => comments.sort_by_key(|c| std::cmp::Reverse(c.timestamp)),
    }
    if let Some(max) = q.max_comments {
        comments.truncate(max);
    }

    match st.shape {
        Shape::Legacy => Json(comments).into_response(),
        Shape::Current => {
            let status = st.login_status();
            Json(json!({
                "name": status.name,
                "email": status.email,
                "loginUrl": status.login_url,
                "logoutUrl": status.logout_url,
                "comments": comments,
            }))
            .into_response()
        }
    }
}

#[derive(Deserialize)]
struct AddQuery {
    #[serde(default)]
    author: String,
    comment: String,
}

async fn add_comment(State(state): State<Shared>, Query(q): Query<AddQuery>) -> StatusCode {
    let mut st = state.lock().expect("stub state poisoned");
    st.requests.push(format!("POST /data author={:?}", q.author));
    st.next_id += 1;
    let id = st.next_id;
    let mut comment = Comment::new(q.author, q.comment, BASE_TIMESTAMP + id as i64 * 60_000);
    comment.id = id;
    st.comments.push(comment);
    StatusCode::OK
}

async fn delete_comments(State(state): State<Shared>) -> StatusCode {
    let mut st = state.lock().expect("stub state poisoned");
    st.requests.push("POST /delete-data".to_string());
    st.comments.clear();
    StatusCode::OK
}

#[derive(Deserialize)]
struct NameQuery {
    #[serde(rename = "new-name")]
    new_name: String,
}

async fn set_name(State(state): State<Shared>, Query(q): Query<NameQuery>) -> StatusCode {
    let mut st = state.lock().expect("stub state poisoned");
    st.requests.push(format!("POST /name new-name={:?}", q.new_name));
    if !st.logged_in {
        return StatusCode::UNAUTHORIZED;
    }
    st.name = Some(q.new_name);
    StatusCode::OK
}

async fn login_status(State(state): State<Shared>) -> Response {
    let mut st = state.lock().expect("stub state poisoned");
    st.requests.push("GET /login-status".to_string());
    match st.shape {
        Shape::Legacy => Json(json!(st.logged_in)).into_response(),
        Shape::Current => Json(st.login_status()).into_response(),
    }
}

async fn login(State(state): State<Shared>) -> Json<String> {
    state.lock().expect("stub state poisoned").requests.push("GET /login".to_string());
    Json(LOGIN_URL.to_string())
}
