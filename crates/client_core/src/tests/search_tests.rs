use super::*;
use crate::{
    classifier::{SEARCH_EMPTY_MESSAGE, SEARCH_FAILED_MESSAGE, UNAUTHORIZED_MESSAGE},
    error::ErrorKind,
    test_support::{product, results, ScriptedBackend},
};
use shared::error::ApiErrorBody;

#[test]
fn secure_thumbnail_rewrites_only_leading_http() {
    assert_eq!(secure_thumbnail("http://x/y.jpg"), "https://x/y.jpg");
    assert_eq!(secure_thumbnail("https://x/y.jpg"), "https://x/y.jpg");
    assert_eq!(
        secure_thumbnail("//cdn/http://x.jpg"),
        "//cdn/http://x.jpg"
    );
    assert_eq!(secure_thumbnail(""), "");
}

#[tokio::test]
async fn blank_query_is_a_no_op() {
    let backend = ScriptedBackend::new();
    let controller = SearchController::new(backend.clone());

    for query in ["", "   ", "\t\n"] {
        assert!(controller.begin(query).is_none());
        assert_eq!(controller.search(query).await, Dispatch::Skipped);
    }

    assert_eq!(controller.state(), FlowState::Idle);
    assert_eq!(backend.search_calls(), 0);
}

#[tokio::test]
async fn blank_query_keeps_previous_results() {
    let backend = ScriptedBackend::new();
    let reply = backend.expect_search("nike");
    let controller = SearchController::new(backend.clone());

    let pending = controller.begin("nike").expect("dispatched");
    reply
        .send(Ok(results(vec![product("MLC1", "Zapatillas Nike", "")])))
        .expect("reply");
    pending.await;

    let before = controller.state();
    assert_eq!(controller.search("  ").await, Dispatch::Skipped);
    assert_eq!(controller.state(), before);
    assert_eq!(backend.search_calls(), 1);
}

#[tokio::test]
async fn loading_is_set_before_the_response_arrives() {
    let backend = ScriptedBackend::new();
    let reply = backend.expect_search("iPhone 15");
    let controller = SearchController::new(backend.clone());

    let pending = controller.begin("iPhone 15").expect("dispatched");
    let state = controller.state();
    assert!(state.is_loading());
    assert!(state.items().is_empty());
    assert!(state.error().is_none());

    reply
        .send(Ok(results(vec![product("1", "iPhone 15", "http://x/y.jpg")])))
        .expect("reply");
    assert_eq!(pending.await, Dispatch::Applied);

    let state = controller.state();
    assert!(!state.is_loading());
    assert!(state.error().is_none());
    assert_eq!(state.items().len(), 1);
    assert_eq!(state.items()[0].thumbnail, "https://x/y.jpg");
}

#[tokio::test]
async fn query_is_sent_untrimmed() {
    let backend = ScriptedBackend::new();
    let reply = backend.expect_search("  iphone ");
    let controller = SearchController::new(backend.clone());

    let pending = controller.begin("  iphone ").expect("dispatched");
    reply
        .send(Ok(results(vec![product("1", "iPhone", "")])))
        .expect("reply");

    assert_eq!(pending.await, Dispatch::Applied);
    assert_eq!(controller.state().items().len(), 1);
}

#[tokio::test]
async fn new_search_clears_previous_results_and_error() {
    let backend = ScriptedBackend::new();
    let first = backend.expect_search("a");
    let second = backend.expect_search("b");
    let controller = SearchController::new(backend.clone());

    let pending = controller.begin("a").expect("dispatched");
    first
        .send(Err(RequestFailure::Transport("offline".into())))
        .expect("reply");
    pending.await;
    assert!(controller.state().error().is_some());

    let pending = controller.begin("b").expect("dispatched");
    assert_eq!(controller.state(), FlowState::Loading);
    second.send(Ok(results(Vec::new()))).expect("reply");
    pending.await;
}

#[tokio::test]
async fn empty_results_become_a_soft_error() {
    let backend = ScriptedBackend::new();
    let reply = backend.expect_search("zzzz");
    let controller = SearchController::new(backend.clone());

    let pending = controller.begin("zzzz").expect("dispatched");
    reply.send(Ok(results(Vec::new()))).expect("reply");
    assert_eq!(pending.await, Dispatch::Applied);

    let state = controller.state();
    let error = state.error().expect("soft error");
    assert!(!state.is_loading());
    assert!(state.items().is_empty());
    assert_eq!(error.kind(), ErrorKind::Empty);
    assert_eq!(error.message(), SEARCH_EMPTY_MESSAGE);
}

#[tokio::test]
async fn failures_are_classified() {
    let cases = [
        (
            RequestFailure::Status {
                status: 401,
                body: Some(ApiErrorBody::new("No autenticado. Por favor, inicie sesión.")),
            },
            ErrorKind::Unauthorized,
            UNAUTHORIZED_MESSAGE,
        ),
        (
            RequestFailure::Status {
                status: 500,
                body: Some(ApiErrorBody::new("Error HTTP: 500 Server Error")),
            },
            ErrorKind::Backend,
            "Error HTTP: 500 Server Error",
        ),
        (
            RequestFailure::Transport("connection refused".into()),
            ErrorKind::Transport,
            SEARCH_FAILED_MESSAGE,
        ),
    ];

    for (failure, kind, message) in cases {
        let backend = ScriptedBackend::new();
        let reply = backend.expect_search("tv");
        let controller = SearchController::new(backend.clone());

        let pending = controller.begin("tv").expect("dispatched");
        reply.send(Err(failure)).expect("reply");
        pending.await;

        let state = controller.state();
        let error = state.error().expect("error");
        assert!(!state.is_loading());
        assert!(state.items().is_empty());
        assert_eq!(error.kind(), kind);
        assert_eq!(error.message(), message);
    }
}

#[tokio::test]
async fn stale_response_never_overwrites_newer_search() {
    let backend = ScriptedBackend::new();
    let slow = backend.expect_search("old");
    let fast = backend.expect_search("new");
    let controller = SearchController::new(backend.clone());

    let old = tokio::spawn(controller.begin("old").expect("dispatched"));
    let new = tokio::spawn(controller.begin("new").expect("dispatched"));

    fast.send(Ok(results(vec![product("2", "new", "")])))
        .expect("reply");
    assert_eq!(new.await.expect("join"), Dispatch::Applied);

    slow.send(Ok(results(vec![product("1", "old", "")])))
        .expect("reply");
    assert_eq!(old.await.expect("join"), Dispatch::Superseded);

    let state = controller.state();
    assert_eq!(state.items().len(), 1);
    assert_eq!(state.items()[0].title, "new");
    assert_eq!(backend.search_calls(), 2);
}

#[tokio::test]
async fn stale_response_keeps_newer_search_loading() {
    let backend = ScriptedBackend::new();
    let first = backend.expect_search("first");
    let second = backend.expect_search("second");
    let controller = SearchController::new(backend.clone());

    let older = tokio::spawn(controller.begin("first").expect("dispatched"));
    let newer = tokio::spawn(controller.begin("second").expect("dispatched"));

    first
        .send(Err(RequestFailure::Transport("offline".into())))
        .expect("reply");
    assert_eq!(older.await.expect("join"), Dispatch::Superseded);
    assert!(controller.state().is_loading());

    second
        .send(Ok(results(vec![product("2", "second", "")])))
        .expect("reply");
    assert_eq!(newer.await.expect("join"), Dispatch::Applied);
    assert!(controller.state().error().is_none());
}

#[tokio::test]
async fn abandoned_request_does_not_leave_loading_behind() {
    let backend = ScriptedBackend::new();
    let _reply = backend.expect_search("tv");
    let controller = SearchController::new(backend.clone());

    let pending = controller.begin("tv").expect("dispatched");
    assert!(controller.state().is_loading());
    drop(pending);

    assert_eq!(controller.state(), FlowState::Idle);
}

#[tokio::test]
async fn subscribers_see_loading_then_result() {
    let backend = ScriptedBackend::new();
    let reply = backend.expect_search("tv");
    let controller = SearchController::new(backend.clone());
    let mut updates = controller.subscribe();

    let pending = controller.begin("tv").expect("dispatched");
    updates.changed().await.expect("loading update");
    assert!(updates.borrow_and_update().is_loading());

    reply
        .send(Ok(results(vec![product("1", "tv", "")])))
        .expect("reply");
    pending.await;
    updates.changed().await.expect("result update");
    assert_eq!(updates.borrow_and_update().items().len(), 1);
}
