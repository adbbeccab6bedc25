use std::future::Future;
use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, Method, Response};

use crate::api::{self, CommentFeed, LoginStatus};
use crate::comment::CommentQuery;
use crate::config::PortfolioConfig;
use crate::error::{ConfigError, FetchError, FetchResult};

/// The remote side of the comment view.
pub trait CommentBackend {
    fn fetch_comments(&self, query: &CommentQuery) -> impl Future<Output = FetchResult<CommentFeed>> + Send;
    fn post_comment(&self, author: &str, text: &str) -> impl Future<Output = FetchResult<()>> + Send;
    fn delete_all_comments(&self) -> impl Future<Output = FetchResult<()>> + Send;
    fn update_display_name(&self, new_name: &str) -> impl Future<Output = FetchResult<()>> + Send;
    fn login_status(&self) -> impl Future<Output = FetchResult<LoginStatus>> + Send;
    fn login_url(&self) -> impl Future<Output = FetchResult<String>> + Send;
}

/// [`CommentBackend`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(base_url, builder.build()?))
    }

    pub fn from_config(config: &PortfolioConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.base_url.clone(), config.timeout())?)
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, method: Method, path: &'static str, params: &[(&str, String)]) -> FetchResult<Response> {
        debug!("{method} {}{path} {params:?}", self.base_url);
        let resp = self
            .client
            .request(method, format!("{}{path}", self.base_url))
            .query(params)
            .send()
            .await
            .map_err(|source| FetchError::Transient { endpoint: path, source })?;
        if !resp.status().is_success() {
            warn!("{path} answered {}", resp.status());
            return Err(FetchError::Status { endpoint: path, status: resp.status().as_u16() });
        }
        Ok(resp)
    }

    async fn read_body(path: &'static str, resp: Response) -> FetchResult<String> {
        resp.text().await.map_err(|source| FetchError::Transient { endpoint: path, source })
    }
}

impl CommentBackend for HttpBackend {
    async fn fetch_comments(&self, query: &CommentQuery) -> FetchResult<CommentFeed> {
        let resp = self.send(Method::GET, api::DATA_PATH, &query.params()).await?;
        let body = Self::read_body(api::DATA_PATH, resp).await?;
        api::parse_feed(&body).map_err(|source| FetchError::Malformed { endpoint: api::DATA_PATH, source })
    }

    async fn post_comment(&self, author: &str, text: &str) -> FetchResult<()> {
        let params = [("author", author.to_string()), ("comment", text.to_string())];
        self.send(Method::POST, api::DATA_PATH, &params).await?;
        Ok(())
    }

    async fn delete_all_comments(&self) -> FetchResult<()> {
        self.send(Method::POST, api::DELETE_DATA_PATH, &[]).await?;
        Ok(())
    }

    async fn update_display_name(&self, new_name: &str) -> FetchResult<()> {
        self.send(Method::POST, api::NAME_PATH, &[("new-name", new_name.to_string())]).await?;
        Ok(())
    }

    async fn login_status(&self) -> FetchResult<LoginStatus> {
        let resp = self.send(Method::GET, api::LOGIN_STATUS_PATH, &[]).await?;
        let body = Self::read_body(api::LOGIN_STATUS_PATH, resp).await?;
        api::parse_login_status(&body).map_err(|source| FetchError::Malformed { endpoint: api::LOGIN_STATUS_PATH, source })
    }

    async fn login_url(&self) -> FetchResult<String> {
        let resp = self.send(Method::GET, api::LOGIN_PATH, &[]).await?;
        let body = Self::read_body(api::LOGIN_PATH, resp).await?;
        serde_json::from_str::<String>(&body).map_err(|source| FetchError::Malformed { endpoint: api::LOGIN_PATH, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let backend = HttpBackend::with_client("http://127.0.0.1:8080/", Client::new());
        assert_eq!(backend.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn from_config_rejects_bad_url() {
        let config = PortfolioConfig { base_url: "localhost:8080".into(), ..PortfolioConfig::default() };
        assert!(matches!(HttpBackend::from_config(&config), Err(ConfigError::BaseUrl(_))));
    }

    #[tokio::test]
    async fn unreachable_server_is_transient() {
        // Freshly released port, nothing listens on it anymore.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let backend = HttpBackend::new(format!("http://127.0.0.1:{port}"), Some(Duration::from_secs(2))).unwrap();
        let err = backend.fetch_comments(&CommentQuery::default()).await.unwrap_err();
        assert_eq!(err.kind(), crate::render::NoticeKind::TransientFetch);
        assert_eq!(err.endpoint(), api::DATA_PATH);
    }
}
