//! The comment section of the page.
//!
//! Every operation is a single awaited request followed by a full re-render
//! of the affected region. Failed requests never clear what is on screen:
//! they put a notice in [`Region::Notice`] and keep the last good list.

use std::num::NonZeroU32;

use log::{info, warn};

use crate::api::{CommentFeed, LoginStatus};
use crate::client::CommentBackend;
use crate::comment::{CommentQuery, SortOption};
use crate::error::{FetchError, FetchResult};
use crate::render::{Block, Element, InputField, Region, RenderTarget};

pub const NO_COMMENTS: &str = "No comments yet.";

pub struct CommentView<B, T> {
    backend: B,
    target: T,
    query: CommentQuery,
}

impl<B: CommentBackend, T: RenderTarget> CommentView<B, T> {
    pub fn new(backend: B, target: T) -> Self {
        Self { backend, target, query: CommentQuery::default() }
    }

    pub fn with_query(mut self, query: CommentQuery) -> Self {
        self.query = query;
        self
    }

    pub fn query(&self) -> CommentQuery {
        self.query
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_parts(self) -> (B, T) {
        (self.backend, self.target)
    }

    /// Fetches comments with the given filters and re-renders the list.
    pub async fn load_comments(&mut self, max_count: Option<NonZeroU32>, sort: Option<SortOption>) -> FetchResult<usize> {
        self.query = CommentQuery::new(max_count, sort);
        self.reload().await
    }

    /// Re-runs the last comment query. Returns the number of comments shown.
    pub async fn reload(&mut self) -> FetchResult<usize> {
        let feed = self.backend.fetch_comments(&self.query).await;
        let feed = self.settle(feed)?;
        let count = feed.comments.len();
        self.target.replace_children(Region::Comments, comment_blocks(&feed));
        info!("rendered {count} comments ({:?})", self.query);
        Ok(count)
    }

    pub async fn post_comment(&mut self, author: &str, text: &str) -> FetchResult<usize> {
        let posted = self.backend.post_comment(author, text).await;
        self.settle(posted)?;
        info!("posted comment by {author:?} ({} chars)", text.chars().count());
        self.target.clear_input(InputField::Author);
        self.target.clear_input(InputField::CommentText);
        self.reload().await
    }

    pub async fn delete_all_comments(&mut self) -> FetchResult<usize> {
        let deleted = self.backend.delete_all_comments().await;
        self.settle(deleted)?;
        info!("deleted all comments");
        self.reload().await
    }

    pub async fn update_display_name(&mut self, new_name: &str) -> FetchResult<()> {
        let updated = self.backend.update_display_name(new_name).await;
        self.settle(updated)?;
        info!("display name changed to {new_name:?}");
        self.target.clear_input(InputField::DisplayName);
        self.refresh().await
    }

    /// Shows name and logout link when signed in, a login link otherwise,
    /// and toggles the post/rename forms to match.
    pub async fn load_login_aware_section(&mut self) -> FetchResult<LoginStatus> {
        let status = self.backend.login_status().await;
        let mut status = self.settle(status)?;
        if !status.logged_in && status.login_url.is_none() {
            match self.backend.login_url().await {
                Ok(url) => status.login_url = Some(url),
                Err(e) => warn!("no login url available: {e}"),
            }
        }
        self.render_login(&status);
        Ok(status)
    }

    /// Comments first, then the login-aware section.
    pub async fn refresh(&mut self) -> FetchResult<()> {
        self.reload().await?;
        self.load_login_aware_section().await?;
        Ok(())
    }

    fn render_login(&mut self, status: &LoginStatus) {
        let mut blocks = Vec::new();
        if status.logged_in {
            blocks.push(Block::Text(format!("Signed in as {}", status.display_name())));
            if let Some(email) = status.distinct_email() {
                blocks.push(Block::Text(email.to_string()));
            }
            if let Some(url) = &status.logout_url {
                blocks.push(Block::Link { label: "Log out".into(), url: url.clone() });
            }
        } else if let Some(url) = &status.login_url {
            blocks.push(Block::Link { label: "Log in".into(), url: url.clone() });
        }
        self.target.set_visible(Element::CommentForm, status.logged_in);
        self.target.set_visible(Element::NameForm, status.logged_in);
        self.target.replace_children(Region::Auth, blocks);
    }

    /// Clears the notice on success, replaces it on failure.
    fn settle<V>(&mut self, result: FetchResult<V>) -> FetchResult<V> {
        match &result {
            Ok(_) => self.target.replace_children(Region::Notice, Vec::new()),
            Err(e) => {
                warn!("{} request failed: {e}", e.endpoint());
                self.target.replace_children(Region::Notice, vec![notice_block(e)]);
            }
        }
        result
    }
}

fn notice_block(err: &FetchError) -> Block {
    Block::Notice { kind: err.kind(), message: err.notice_message() }
}

/// One block per comment, or a single placeholder for an empty feed.
pub fn comment_blocks(feed: &CommentFeed) -> Vec<Block> {
    if feed.comments.is_empty() {
        return vec![Block::Placeholder(NO_COMMENTS.to_string())];
    }
    feed.comments
        .iter()
        .map(|c| Block::Comment {
            date: c.display_date(),
            author: c.display_author().to_string(),
            text: c.comment_text.clone(),
        })
        .collect()
}
