//! Client side of a personal portfolio site.
//!
//! - [`theme`] cycles background images and their color themes.
//! - [`fact`] picks a random personal fact.
//! - [`view`] loads, posts and deletes comments through a [`client::CommentBackend`]
//!   and renders them into a [`render::RenderTarget`].

pub mod api;
pub mod client;
pub mod comment;
pub mod config;
pub mod error;
pub mod fact;
pub mod render;
pub mod theme;
pub mod view;

pub use client::{CommentBackend, HttpBackend};
pub use error::{ConfigError, FetchError, FetchResult};
pub use view::CommentView;
