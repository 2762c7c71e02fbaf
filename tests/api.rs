//! End-to-end tests against a live Postgres instance.
//!
//! These are ignored by default; point `DATABASE_URL` at a throwaway
//! database and run `cargo test -- --ignored` to exercise them.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

use quill::{database, http};

async fn build_app() -> quill::App {
  let config = quill::config::Server::load().expect("failed to load configuration");
  let app = quill::App::new(config)
    .await
    .expect("failed to initialize App");

  let mut conn = app.db_write().await.expect("failed to get a connection");
  database::migrations::run_pending(&mut conn)
    .await
    .expect("failed to run migrations");

  app
}

macro_rules! init_service {
  ($app:expr) => {
    test::init_service(
      App::new()
        .app_data(web::Data::new($app.clone()))
        .configure(http::controllers::configure),
    )
    .await
  };
}

/// Tests share one database, so every entity gets a unique suffix.
fn unique(prefix: &str) -> String {
  let nanos = SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .expect("clock went backwards")
    .as_nanos();
  format!("{prefix}_{nanos}")
}

#[actix_web::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn user_crud_roundtrip() {
  let app = build_app().await;
  let service = init_service!(app);

  let username = unique("alice");
  let email = format!("{username}@example.com");

  let req = test::TestRequest::post()
    .uri("/users/")
    .set_json(json!({ "username": username, "email": email, "password": "hunter2" }))
    .to_request();
  let resp = test::call_service(&service, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let user: Value = test::read_body_json(resp).await;
  let id = user["id"].as_u64().expect("id should be a number");
  assert_eq!(user["username"], json!(username));
  assert_eq!(user["email"], json!(email));
  assert_eq!(user["password"], json!("hunter2"));
  assert!(user["updated_at"].is_null());

  // change the e-mail address; everything else stays put
  let new_email = format!("{username}@example.org");
  let req = test::TestRequest::put()
    .uri(&format!("/users/{id}"))
    .set_json(json!({ "email": new_email }))
    .to_request();
  let resp = test::call_service(&service, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let updated: Value = test::read_body_json(resp).await;
  assert_eq!(updated["email"], json!(new_email));
  assert_eq!(updated["username"], json!(username));
  assert!(!updated["updated_at"].is_null());

  let req = test::TestRequest::get().uri("/users/").to_request();
  let resp = test::call_service(&service, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let users: Value = test::read_body_json(resp).await;
  assert!(users.as_array().is_some());

  let req = test::TestRequest::delete()
    .uri(&format!("/users/{id}"))
    .to_request();
  let resp = test::call_service(&service, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "message": "User deleted" }));

  // gone now
  let req = test::TestRequest::delete()
    .uri(&format!("/users/{id}"))
    .to_request();
  let resp = test::call_service(&service, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "detail": "User not found" }));
}

#[actix_web::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn duplicate_username_is_a_conflict() {
  let app = build_app().await;
  let service = init_service!(app);

  let username = unique("bob");

  for (run, email_prefix) in [("first", "a"), ("second", "b")] {
    let req = test::TestRequest::post()
      .uri("/users/")
      .set_json(json!({
        "username": username,
        "email": format!("{email_prefix}_{username}@example.com"),
        "password": "hunter2",
      }))
      .to_request();
    let resp = test::call_service(&service, req).await;

    if run == "first" {
      assert_eq!(resp.status(), StatusCode::OK);
    } else {
      assert_eq!(resp.status(), StatusCode::CONFLICT);
      let body: Value = test::read_body_json(resp).await;
      assert_eq!(body, json!({ "detail": "username already exists" }));
    }
  }
}

#[actix_web::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn missing_ids_return_not_found() {
  let app = build_app().await;
  let service = init_service!(app);

  let absent = u32::MAX;

  let cases = [
    (
      test::TestRequest::put()
        .uri(&format!("/users/{absent}"))
        .set_json(json!({ "email": "ghost@example.com" })),
      "User not found",
    ),
    (
      test::TestRequest::delete().uri(&format!("/users/{absent}")),
      "User not found",
    ),
    (
      test::TestRequest::put()
        .uri(&format!("/posts/{absent}"))
        .set_json(json!({ "content": "boo" })),
      "Post not found",
    ),
    (
      test::TestRequest::delete().uri(&format!("/posts/{absent}")),
      "Post not found",
    ),
    // ids below the BIGSERIAL range can never match a row either
    (
      test::TestRequest::delete().uri("/users/0"),
      "User not found",
    ),
    (
      test::TestRequest::delete().uri("/posts/0"),
      "Post not found",
    ),
  ];

  for (req, detail) in cases {
    let resp = test::call_service(&service, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "detail": detail }));
  }
}

#[actix_web::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn deleting_a_user_cascades_to_posts() {
  let app = build_app().await;
  let service = init_service!(app);

  let username = unique("carol");
  let req = test::TestRequest::post()
    .uri("/users/")
    .set_json(json!({
      "username": username,
      "email": format!("{username}@example.com"),
      "password": "hunter2",
    }))
    .to_request();
  let user: Value = test::call_and_read_body_json(&service, req).await;
  let user_id = user["id"].as_u64().expect("id should be a number");

  let mut post_ids = Vec::new();
  for index in 0..3 {
    let req = test::TestRequest::post()
      .uri("/posts/")
      .set_json(json!({
        "title": format!("post {index}"),
        "content": "hello",
        "user_id": user_id,
      }))
      .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["user_id"], json!(user_id));
    post_ids.push(post["id"].as_u64().expect("id should be a number"));
  }

  let req = test::TestRequest::get()
    .uri(&format!("/users/{user_id}/posts/"))
    .to_request();
  let posts: Value = test::call_and_read_body_json(&service, req).await;
  assert_eq!(posts.as_array().map(Vec::len), Some(3));

  // update one post's content; title and author must not move
  let req = test::TestRequest::put()
    .uri(&format!("/posts/{}", post_ids[0]))
    .set_json(json!({ "content": "edited" }))
    .to_request();
  let post: Value = test::call_and_read_body_json(&service, req).await;
  assert_eq!(post["content"], json!("edited"));
  assert_eq!(post["title"], json!("post 0"));
  assert_eq!(post["user_id"], json!(user_id));

  let req = test::TestRequest::delete()
    .uri(&format!("/users/{user_id}"))
    .to_request();
  let resp = test::call_service(&service, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  // the cascade swept every post along with the user
  let req = test::TestRequest::get()
    .uri(&format!("/users/{user_id}/posts/"))
    .to_request();
  let posts: Value = test::call_and_read_body_json(&service, req).await;
  assert_eq!(posts, json!([]));

  let req = test::TestRequest::put()
    .uri(&format!("/posts/{}", post_ids[0]))
    .set_json(json!({ "content": "too late" }))
    .to_request();
  let resp = test::call_service(&service, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn unknown_user_has_an_empty_post_list() {
  let app = build_app().await;
  let service = init_service!(app);

  for uri in [format!("/users/{}/posts/", u32::MAX), "/users/0/posts/".to_string()] {
    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let posts: Value = test::read_body_json(resp).await;
    assert_eq!(posts, json!([]));
  }
}

#[actix_web::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn post_with_unknown_author_is_rejected() {
  let app = build_app().await;
  let service = init_service!(app);

  let req = test::TestRequest::post()
    .uri("/posts/")
    .set_json(json!({
      "title": "orphan",
      "content": "no author",
      "user_id": u32::MAX,
    }))
    .to_request();
  let resp = test::call_service(&service, req).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "detail": "Referenced user does not exist" }));
}
