//! Wire types of the portfolio backend.
//!
//! Older backend revisions answered `/data` with a bare array and
//! `/login-status` with a bare boolean. Both shapes are still accepted and
//! normalized into [`CommentFeed`] and [`LoginStatus`].

use serde::{Deserialize, Serialize};

use crate::comment::Comment;

pub const DATA_PATH: &str = "/data";
pub const DELETE_DATA_PATH: &str = "/delete-data";
pub const NAME_PATH: &str = "/name";
pub const LOGIN_STATUS_PATH: &str = "/login-status";
pub const LOGIN_PATH: &str = "/login";

/// The comment list of a `/data` reply.
///
/// Later backend revisions send login metadata alongside the comments. It is
/// skipped here; the login section always reads `/login-status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentFeed {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DataResponse {
    Feed(CommentFeed),
    Legacy(Vec<Comment>),
}

impl From<DataResponse> for CommentFeed {
    fn from(resp: DataResponse) -> Self {
        match resp {
            DataResponse::Feed(feed) => feed,
            DataResponse::Legacy(comments) => CommentFeed { comments },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStatus {
    #[serde(alias = "isLoggedIn")]
    pub logged_in: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub login_url: Option<String>,
    #[serde(default)]
    pub logout_url: Option<String>,
}

impl LoginStatus {
    /// The email, when it adds something [`display_name`](Self::display_name)
    /// does not already show.
    pub fn distinct_email(&self) -> Option<&str> {
        let email = self.email.as_deref().filter(|e| !e.trim().is_empty())?;
        if self.display_name().trim() == email.trim() {
            None
        } else {
            Some(email)
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or(crate::comment::DEFAULT_AUTHOR)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LoginStatusResponse {
    Detailed(LoginStatus),
    Flag(bool),
}

impl From<LoginStatusResponse> for LoginStatus {
    fn from(resp: LoginStatusResponse) -> Self {
        match resp {
            LoginStatusResponse::Detailed(status) => status,
            LoginStatusResponse::Flag(logged_in) => LoginStatus { logged_in, ..LoginStatus::default() },
        }
    }
}

pub fn parse_feed(body: &str) -> Result<CommentFeed, serde_json::Error> {
    serde_json::from_str::<DataResponse>(body).map(CommentFeed::from)
}

pub fn parse_login_status(body: &str) -> Result<LoginStatus, serde_json::Error> {
    serde_json::from_str::<LoginStatusResponse>(body).map(LoginStatus::from)
}
