//! GitHub lookup against a local stand-in for the users API.

use std::time::Duration;

use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use ghfaves::{
    error::AppError,
    favorites::FavoritesStore,
    lookup::{GithubLookup, GithubLookupConfig, ProfileLookup},
    storage::MemoryStorage,
};

async fn user(Path(username): Path<String>, headers: HeaderMap) -> Response {
    if !headers.contains_key(header::USER_AGENT) {
        return (StatusCode::FORBIDDEN, "missing user agent").into_response();
    }

    match username.as_str() {
        "octocat" => Json(json!({
            "login": "octocat",
            "id": 583231,
            "name": "The Octocat",
            "company": "@github",
            "public_repos": 8,
            "followers": 9000,
            "following": 9
        }))
        .into_response(),
        "ghost" => Json(json!({
            "login": "ghost",
            "name": null,
            "public_repos": 0,
            "followers": 11000
        }))
        .into_response(),
        "old--timer" => Json(json!({
            "login": "old--timer",
            "name": "Early Adopter",
            "public_repos": 3,
            "followers": 12
        }))
        .into_response(),
        "partial" => Json(json!({ "login": "partial" })).into_response(),
        "ratelimited" => (StatusCode::FORBIDDEN, Json(json!({ "message": "API rate limit exceeded" }))).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response(),
    }
}

/// Serves the stub API on an ephemeral port and returns its base URL
async fn spawn_api() -> String {
    let app = Router::new().route("/users/:username", get(user));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn lookup_for(base_url: String) -> GithubLookup {
    GithubLookup::new(GithubLookupConfig {
        base_url,
        timeout: Duration::from_secs(5),
        ..GithubLookupConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn found_user_is_projected() {
    let lookup = lookup_for(spawn_api().await);

    let summary = lookup.search("octocat").await.unwrap();
    assert_eq!(summary.login, "octocat");
    assert_eq!(summary.display_name.as_deref(), Some("The Octocat"));
    assert_eq!(summary.public_repo_count, 8);
    assert_eq!(summary.follower_count, 9000);
}

#[tokio::test]
async fn null_name_is_accepted() {
    let lookup = lookup_for(spawn_api().await);

    let summary = lookup.search("ghost").await.unwrap();
    assert_eq!(summary.display_name, None);
    assert_eq!(summary.shown_name(), "ghost");
}

#[tokio::test]
async fn legacy_hyphenated_login_is_requested() {
    let lookup = lookup_for(spawn_api().await);

    let summary = lookup.search("old--timer").await.unwrap();
    assert_eq!(summary.login, "old--timer");
    assert_eq!(lookup.search("../users/octocat").await, None);
}

#[tokio::test]
async fn error_statuses_and_bad_bodies_are_not_found() {
    let lookup = lookup_for(spawn_api().await);

    assert_eq!(lookup.search("doesnotexist123").await, None);
    assert_eq!(lookup.search("ratelimited").await, None);
    assert_eq!(lookup.search("partial").await, None);
}

#[tokio::test]
async fn store_adds_through_http_lookup() {
    let lookup = lookup_for(spawn_api().await);
    let mut store = FavoritesStore::open(MemoryStorage::new(), lookup);

    store.add("ghost").await.unwrap();
    store.add("octocat").await.unwrap();
    assert!(matches!(store.add("doesnotexist123").await, Err(AppError::NotFound(_))));
    assert!(matches!(store.add("octocat").await, Err(AppError::AlreadyExists(_))));

    let logins: Vec<&str> = store.entries().iter().map(|e| e.login.as_str()).collect();
    assert_eq!(logins, ["octocat", "ghost"]);
}
