use std::num::NonZeroU32;
use std::time::Duration;

use axum::http::StatusCode;
use integration_tests::support::{spawn_stub, Shape, StubServer, LOGIN_URL, LOGOUT_URL};
use portfolio::comment::{format_timestamp, SortOption};
use portfolio::render::{Block, Element, MemoryTarget, NoticeKind, Region};
use portfolio::view::NO_COMMENTS;
use portfolio::{CommentView, HttpBackend};

async fn view_for(stub: &StubServer) -> CommentView<HttpBackend, MemoryTarget> {
    let backend = HttpBackend::new(stub.base_url(), Some(Duration::from_secs(5))).expect("http client");
    CommentView::new(backend, MemoryTarget::new())
}

fn authors(view: &CommentView<HttpBackend, MemoryTarget>) -> Vec<String> {
    view.target()
        .comment_blocks()
        .filter_map(|b| match b {
            Block::Comment { author, .. } => Some(author.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn empty_backend_renders_placeholder() {
    let stub = spawn_stub().await;
    let mut view = view_for(&stub).await;
    assert_eq!(view.reload().await.unwrap(), 0);
    assert_eq!(view.target().blocks(Region::Comments), &[Block::Placeholder(NO_COMMENTS.to_string())]);
}

#[tokio::test]
async fn posted_comment_is_rendered_with_date() {
    let stub = spawn_stub().await;
    let mut view = view_for(&stub).await;

    assert_eq!(view.post_comment("A", "hi").await.unwrap(), 1);

    let stored = stub.with_state(|s| s.comments[0].clone());
    let blocks: Vec<_> = view.target().comment_blocks().cloned().collect();
    assert_eq!(
        blocks,
        vec![Block::Comment { date: format_timestamp(stored.timestamp), author: "A".into(), text: "hi".into() }]
    );
    assert_eq!(stub.requests(), vec!["POST /data author=\"A\"", "GET /data max=None sort=None"]);
}

#[tokio::test]
async fn delete_all_then_reload_shows_placeholder() {
    let stub = spawn_stub().await;
    let mut view = view_for(&stub).await;
    view.post_comment("A", "hi").await.unwrap();
    view.post_comment("B", "hey").await.unwrap();

    assert_eq!(view.delete_all_comments().await.unwrap(), 0);
    assert_eq!(view.target().comment_blocks().count(), 0);
    assert_eq!(view.target().blocks(Region::Comments), &[Block::Placeholder(NO_COMMENTS.to_string())]);
}

#[tokio::test]
async fn max_count_and_sort_reach_the_server() {
    let stub = spawn_stub().await;
    let mut view = view_for(&stub).await;
    for author in ["carol", "alice", "bob"] {
        view.post_comment(author, "text").await.unwrap();
    }

    view.load_comments(None, Some(SortOption::AuthorAsc)).await.unwrap();
    assert_eq!(authors(&view), vec!["alice", "bob", "carol"]);

    view.load_comments(NonZeroU32::new(2), Some(SortOption::Oldest)).await.unwrap();
    assert_eq!(authors(&view), vec!["carol", "alice"]);

    view.load_comments(None, None).await.unwrap();
    assert_eq!(authors(&view), vec!["bob", "alice", "carol"]);

    assert!(stub.requests().contains(&"GET /data max=Some(2) sort=Some(\"oldest\")".to_string()));
}

#[tokio::test]
async fn legacy_shapes_are_understood() {
    let stub = spawn_stub().await;
    stub.with_state(|s| s.shape = Shape::Legacy);
    let mut view = view_for(&stub).await;

    view.post_comment("A", "hi").await.unwrap();
    assert_eq!(view.target().comment_blocks().count(), 1);

    let status = view.load_login_aware_section().await.unwrap();
    assert!(!status.logged_in);
    assert_eq!(status.login_url.as_deref(), Some(LOGIN_URL));
    assert!(stub.requests().contains(&"GET /login".to_string()));
}

#[tokio::test]
async fn server_error_keeps_view_and_shows_notice() {
    let stub = spawn_stub().await;
    let mut view = view_for(&stub).await;
    view.post_comment("A", "hi").await.unwrap();

    stub.with_state(|s| s.fail_reads = Some(StatusCode::INTERNAL_SERVER_ERROR));
    let err = view.reload().await.unwrap_err();
    assert_eq!(err.kind(), NoticeKind::TransientFetch);
    assert_eq!(view.target().comment_blocks().count(), 1);
    assert_eq!(view.target().notice().map(|(k, _)| k), Some(NoticeKind::TransientFetch));

    stub.with_state(|s| {
        s.fail_reads = None;
        s.garble_reads = true;
    });
    let err = view.reload().await.unwrap_err();
    assert_eq!(err.kind(), NoticeKind::MalformedResponse);
    assert_eq!(view.target().comment_blocks().count(), 1);

    stub.with_state(|s| s.garble_reads = false);
    view.reload().await.unwrap();
    assert!(view.target().notice().is_none());
}

#[tokio::test]
async fn login_aware_section_follows_login_state() {
    let stub = spawn_stub().await;
    let mut view = view_for(&stub).await;

    view.refresh().await.unwrap();
    assert!(!view.target().is_visible(Element::CommentForm));
    assert_eq!(
        view.target().blocks(Region::Auth),
        &[Block::Link { label: "Log in".into(), url: LOGIN_URL.into() }]
    );

    stub.with_state(|s| {
        s.logged_in = true;
        s.name = Some("Ada".into());
        s.email = Some("ada@example.com".into());
    });
    view.refresh().await.unwrap();
    assert!(view.target().is_visible(Element::CommentForm));
    assert!(view.target().is_visible(Element::NameForm));
    let auth = view.target().blocks(Region::Auth);
    assert!(auth[0].contains("Ada"));
    assert!(auth[1].contains("ada@example.com"));
    assert_eq!(auth[2], Block::Link { label: "Log out".into(), url: LOGOUT_URL.into() });

    view.update_display_name("Grace").await.unwrap();
    assert!(view.target().blocks(Region::Auth)[0].contains("Grace"));
    assert_eq!(stub.with_state(|s| s.name.clone()), Some("Grace".to_string()));
}

#[tokio::test]
async fn rename_while_logged_out_is_rejected() {
    let stub = spawn_stub().await;
    let mut view = view_for(&stub).await;
    let err = view.update_display_name("Mallory").await.unwrap_err();
    assert_eq!(err.to_string(), "/name answered with status 401");
    assert_eq!(view.target().notice().map(|(k, _)| k), Some(NoticeKind::TransientFetch));
}

#[tokio::test]
async fn stalled_backend_times_out_and_keeps_view() {
    let stub = spawn_stub().await;
    let backend = HttpBackend::new(stub.base_url(), Some(Duration::from_millis(200))).expect("http client");
    let mut view = CommentView::new(backend, MemoryTarget::new());
    view.post_comment("A", "hi").await.unwrap();

    stub.with_state(|s| s.stall_reads = Some(Duration::from_secs(2)));
    let err = view.reload().await.unwrap_err();
    assert_eq!(err.kind(), NoticeKind::TransientFetch);
    assert_eq!(view.target().notice().map(|(k, _)| k), Some(NoticeKind::TransientFetch));
    let blocks: Vec<_> = view.target().comment_blocks().collect();
    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].contains("hi"));
}
