//! /movies endpoints, including the configurable release-date rule.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use casting_agency::repos::RecordStore;
use casting_agency::services::release_date::ReleaseDatePolicy;
use common::{DIRECTOR, PRODUCER, TestApp, token};

fn strict_dates() -> TestApp {
    TestApp::with_release_dates(ReleaseDatePolicy::from_format(Some("%m-%d-%Y")))
}

#[tokio::test]
async fn list_returns_every_movie() {
    let app = TestApp::new();
    app.seed_movie("Interstellar", "11-07-2014").await;
    app.seed_movie("Fight Club", "10-15-1999").await;

    let (status, json) = app
        .call(Method::GET, "/movies", Some(&token(DIRECTOR)), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(
        json["movies"],
        json!([
            {"id": 1, "title": "Interstellar", "release_date": "11-07-2014"},
            {"id": 2, "title": "Fight Club", "release_date": "10-15-1999"},
        ])
    );
}

#[tokio::test]
async fn create_stores_movie_and_returns_it() {
    let app = TestApp::new();

    let (status, json) = app
        .call(
            Method::POST,
            "/movies",
            Some(&token(PRODUCER)),
            Some(json!({"title": "Interstellar", "release_date": "11-07-2014"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["created"]["title"], "Interstellar");
    assert_eq!(json["created"]["release_date"], "11-07-2014");

    let id = json["created"]["id"].as_i64().unwrap();
    assert!(app.store.get_movie(id).await.unwrap().is_some());
}

#[tokio::test]
async fn create_rejects_invalid_bodies_with_422() {
    let app = TestApp::new();
    let token = token(PRODUCER);

    for body in [
        json!({"title": "Interstellar"}),
        json!({"release_date": "11-07-2014"}),
        json!({"title": "Interstellar", "release_date": 2014}),
        json!({"title": " ", "release_date": "11-07-2014"}),
        json!({"title": "Interstellar", "release_date": ""}),
    ] {
        let (status, json) = app
            .call(Method::POST, "/movies", Some(&token), Some(body.clone()))
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
        assert_eq!(json["error"], 422);
    }

    assert!(app.store.list_movies().await.unwrap().is_empty());
}

#[tokio::test]
async fn patch_title_keeps_release_date() {
    let app = TestApp::new();
    let id = app.seed_movie("Interstellar", "11-07-2014").await;

    let (status, json) = app
        .call(
            Method::PATCH,
            &format!("/movies/{id}"),
            Some(&token(DIRECTOR)),
            Some(json!({"title": "Interstellar (IMAX)"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["updates"],
        json!({"id": id, "title": "Interstellar (IMAX)", "release_date": "11-07-2014"})
    );
}

#[tokio::test]
async fn patch_with_numeric_release_date_is_400() {
    let app = TestApp::new();
    let id = app.seed_movie("Interstellar", "11-07-2014").await;

    let (status, json) = app
        .call(
            Method::PATCH,
            &format!("/movies/{id}"),
            Some(&token(PRODUCER)),
            Some(json!({"release_date": 30})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], 400);

    let stored = app.store.get_movie(id).await.unwrap().unwrap();
    assert_eq!(stored.release_date, "11-07-2014");
}

#[tokio::test]
async fn patch_unknown_movie_is_404() {
    let app = TestApp::new();

    let (status, json) = app
        .call(
            Method::PATCH,
            "/movies/9",
            Some(&token(PRODUCER)),
            Some(json!({"title": "Fight Club"})),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "movie not found");
}

#[tokio::test]
async fn delete_returns_removed_movie() {
    let app = TestApp::new();
    let id = app.seed_movie("Interstellar", "11-07-2014").await;

    let (status, json) = app
        .call(
            Method::DELETE,
            &format!("/movies/{id}"),
            Some(&token(PRODUCER)),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["deleted"]["title"], "Interstellar");
    assert!(app.store.list_movies().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_unknown_movie_is_404() {
    let app = TestApp::new();

    let (status, json) = app
        .call(Method::DELETE, "/movies/3", Some(&token(PRODUCER)), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], 404);
    assert_eq!(json["message"], "movie not found");
}

#[tokio::test]
async fn non_numeric_movie_id_is_404() {
    let app = TestApp::new();

    let (status, json) = app
        .call(
            Method::PATCH,
            "/movies/interstellar",
            Some(&token(PRODUCER)),
            Some(json!({"title": "Fight Club"})),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "movie not found");
}

#[tokio::test]
async fn strict_policy_accepts_matching_dates_as_sent() {
    let app = strict_dates();

    let (status, json) = app
        .call(
            Method::POST,
            "/movies",
            Some(&token(PRODUCER)),
            Some(json!({"title": "Interstellar", "release_date": "11-07-2014"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["created"]["release_date"], "11-07-2014");
}

#[tokio::test]
async fn strict_policy_rejects_other_shapes() {
    let app = strict_dates();
    let id = app.seed_movie("Interstellar", "11-07-2014").await;
    let token = token(PRODUCER);

    let (status, _) = app
        .call(
            Method::POST,
            "/movies",
            Some(&token),
            Some(json!({"title": "Fight Club", "release_date": "sometime in 1999"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app
        .call(
            Method::PATCH,
            &format!("/movies/{id}"),
            Some(&token),
            Some(json!({"release_date": "2014-11-07"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn free_text_policy_keeps_any_non_blank_value() {
    let app = TestApp::new();

    let (status, json) = app
        .call(
            Method::POST,
            "/movies",
            Some(&token(PRODUCER)),
            Some(json!({"title": "Dune: Part Three", "release_date": "TBA"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["created"]["release_date"], "TBA");
}
