//! Comment records and the query that selects them.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// A user's comment as sent by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub author: String,
    pub comment_text: String,
    #[serde(default)]
    pub formatted_date: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
}

impl Comment {
    pub fn new(author: impl Into<String>, comment_text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: 0,
            author: author.into(),
            comment_text: comment_text.into(),
            formatted_date: String::new(),
            timestamp,
        }
    }

    pub fn display_author(&self) -> &str {
        if self.author.trim().is_empty() {
            DEFAULT_AUTHOR
        } else {
            &self.author
        }
    }

    /// The server's preformatted date, or one derived from the timestamp.
    pub fn display_date(&self) -> String {
        if !self.formatted_date.trim().is_empty() {
            return self.formatted_date.clone();
        }
        format_timestamp(self.timestamp)
    }
}

/// Formats epoch milliseconds as e.g. `Jun 3, 2020 4:05 PM` (UTC).
pub fn format_timestamp(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) => dt.format("%b %-d, %Y %-I:%M %p").to_string(),
        None => millis.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    AuthorAsc,
    AuthorDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [SortOption::Newest, SortOption::Oldest, SortOption::AuthorAsc, SortOption::AuthorDesc];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::AuthorAsc => "author-asc",
            SortOption::AuthorDesc => "author-desc",
        }
    }

    /// The next option in display order, wrapping around.
    pub fn cycle(self) -> Self {
        let pos = Self::ALL.iter().position(|o| *o == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort option `{0}` (expected newest, oldest, author-asc or author-desc)")]
pub struct ParseSortOptionError(String);

impl FromStr for SortOption {
    type Err = ParseSortOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|o| o.as_str() == s.trim()).ok_or_else(|| ParseSortOptionError(s.to_string()))
    }
}

/// Query parameters of a comment read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentQuery {
    pub max_count: Option<NonZeroU32>,
    pub sort: Option<SortOption>,
}

impl CommentQuery {
    pub fn new(max_count: Option<NonZeroU32>, sort: Option<SortOption>) -> Self {
        Self { max_count, sort }
    }

    /// `(name, value)` pairs in wire form; absent parameters are omitted.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(max) = self.max_count {
            params.push(("max-comments", max.to_string()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort-option", sort.as_str().to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_epoch() {
        assert_eq!(format_timestamp(0), "Jan 1, 1970 12:00 AM");
        // 2020-06-03T16:05:00Z
        assert_eq!(format_timestamp(1_591_200_300_000), "Jun 3, 2020 4:05 PM");
    }

    #[test]
    fn prefers_server_date() {
        let mut c = Comment::new("A", "hi", 0);
        assert_eq!(c.display_date(), "Jan 1, 1970 12:00 AM");
        c.formatted_date = "yesterday".into();
        assert_eq!(c.display_date(), "yesterday");
    }

    #[test]
    fn blank_author_is_anonymous() {
        assert_eq!(Comment::new("  ", "hi", 0).display_author(), DEFAULT_AUTHOR);
        assert_eq!(Comment::new("Ada", "hi", 0).display_author(), "Ada");
    }

    #[test]
    fn decodes_wire_shape() {
        let c: Comment = serde_json::from_str(r#"{"author":"A","commentText":"hi","timestamp":5}"#).unwrap();
        assert_eq!(c, Comment::new("A", "hi", 5));
    }

    #[test]
    fn sort_option_parses_and_cycles() {
        assert_eq!("author-asc".parse::<SortOption>().unwrap(), SortOption::AuthorAsc);
        assert!("sideways".parse::<SortOption>().is_err());
        assert_eq!(SortOption::AuthorDesc.cycle(), SortOption::Newest);
        let json = serde_json::to_string(&SortOption::AuthorDesc).unwrap();
        assert_eq!(json, r#""author-desc""#);
    }

    #[test]
    fn query_params_skip_absent_values() {
        assert!(CommentQuery::default().params().is_empty());
        let q = CommentQuery::new(NonZeroU32::new(3), Some(SortOption::Oldest));
        assert_eq!(q.params(), vec![("max-comments", "3".to_string()), ("sort-option", "oldest".to_string())]);
    }
}
