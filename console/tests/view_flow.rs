//! End-to-end view flow against a live in-process backend: the console's
//! state machine driving the real HTTP client and store.

use std::sync::Arc;

use reqwest::Url;

use backend::outbound::MemoryUserStore;
use backend::server::{ServerConfig, bind};
use console::api::HttpUserApi;
use console::view::{SubmitOutcome, UserView};

fn start_view() -> UserView {
    let config = ServerConfig::new("127.0.0.1:0".parse().expect("loopback addr"));
    let bound = bind(&config, Arc::new(MemoryUserStore::new())).expect("bind server");
    let base_url = Url::parse(&format!("http://{}", bound.addr)).expect("base url");
    actix_web::rt::spawn(bound.server);
    UserView::new(Arc::new(HttpUserApi::new(base_url)))
}

#[actix_web::test]
async fn create_edit_delete_through_the_view() {
    let mut view = start_view();
    view.refresh().await;
    assert!(view.users().is_empty());

    // Create.
    let outcome = view.submit("Ada", "ada@example.com").await;
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert_eq!(view.users().len(), 1);
    let id = view.users()[0].id;

    // Edit via selection.
    assert!(view.select(id));
    let outcome = view.submit("Ada Lovelace", "lovelace@example.com").await;
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert_eq!(view.users().len(), 1);
    assert_eq!(view.users()[0].name, "Ada Lovelace");
    assert!(view.selected().is_none());

    // Delete behind the confirmation gate.
    view.request_delete(id);
    assert!(view.confirm_delete().await);
    assert!(view.users().is_empty());
    assert!(view.error().is_none());
}

#[actix_web::test]
async fn server_side_validation_reaches_the_error_banner() {
    let mut view = start_view();
    view.refresh().await;

    // Passes client-side shape checks but the server has its own opinion on
    // an id that is absent.
    view.request_delete(1234);
    view.confirm_delete().await;

    assert!(view.error().is_some_and(|msg| msg.contains("404")));
}
