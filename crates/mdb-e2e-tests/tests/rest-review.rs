use mdb_e2e_tests::{
    launch_env,
    rest::{get_json, send_json},
};
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_review_create_and_list() {
    let (base_url, _server, _config_guard) = launch_env("test_review_create").await.unwrap();
    let client = reqwest::Client::new();

    let (status, reviews): (_, Value) = get_json(&client, &base_url, "api/movies/1/reviews/")
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    let contents: Vec<&str> = reviews
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["Classic", "Scary"]);

    // movie comes from path, not from payload
    let payload = json!({"content": "great", "score": 9, "movie": 1});
    let (status, body): (_, Value) = send_json(
        &client,
        Method::POST,
        &base_url,
        "api/movies/3/reviews/",
        Some(&payload),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "created"}));

    let (_, reviews): (_, Value) = get_json(&client, &base_url, "api/movies/3/reviews/")
        .await
        .unwrap();
    assert_eq!(
        reviews,
        json!([{"id": 4, "content": "great", "score": 9, "movie": 3}])
    );

    let payload = json!({"content": "great", "score": 9});
    let (status, _): (_, Value) = send_json(
        &client,
        Method::POST,
        &base_url,
        "api/movies/99/reviews/",
        Some(&payload),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);

    let payload = json!({"content": "x".repeat(151), "score": 1});
    let (status, body): (_, Value) = send_json(
        &client,
        Method::POST,
        &base_url,
        "api/movies/3/reviews/",
        Some(&payload),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["content"].is_array());

    let (_, reviews): (_, Value) = get_json(&client, &base_url, "api/movies/3/reviews/")
        .await
        .unwrap();
    assert_eq!(reviews.as_array().unwrap().len(), 1);
}

#[tokio::test]
#[traced_test]
async fn test_review_update_and_delete() {
    let (base_url, _server, _config_guard) = launch_env("test_review_update").await.unwrap();
    let client = reqwest::Client::new();

    let payload = json!({"content": "", "score": 9});
    let (status, body): (_, Value) = send_json(
        &client,
        Method::PUT,
        &base_url,
        "api/reviews/3/",
        Some(&payload),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "updated");

    let payload = json!({"content": "changed"});
    let (status, body): (_, Value) = send_json(
        &client,
        Method::PUT,
        &base_url,
        "api/reviews/3/",
        Some(&payload),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["score"].is_array());

    let (status, review): (_, Value) = get_json(&client, &base_url, "api/reviews/3/")
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(review, json!({"id": 3, "content": "", "score": 9, "movie": 2}));

    let (status, body): (_, Value) =
        send_json(&client, Method::DELETE, &base_url, "api/reviews/3/", None)
            .await
            .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "deleted");

    let (status, _): (_, Value) = get_json(&client, &base_url, "api/reviews/3/")
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _): (_, Value) =
        send_json(&client, Method::DELETE, &base_url, "api/reviews/3/", None)
            .await
            .unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);

    let payload = json!({"content": "x", "score": 1});
    let (status, _): (_, Value) = send_json(
        &client,
        Method::PUT,
        &base_url,
        "api/reviews/3/",
        Some(&payload),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
}
