use std::time::Duration;

use axum::{http::StatusCode, routing::get, Json, Router};
use quiz_app::{App, FetchError, QuestionClient, SessionState};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

async fn spawn_questions_server(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Url::parse(&format!("http://{addr}")).expect("server url")
}

fn client_for(base_url: Url) -> QuestionClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("http client");
    QuestionClient::with_http(base_url, http)
}

fn serving(body: Value) -> Router {
    Router::new().route("/questions", get(move || async move { Json(body) }))
}

#[tokio::test]
async fn fetches_and_normalizes_questions() {
    let base_url = spawn_questions_server(serving(json!([
        {"id": 1, "question": "2 + 2?", "option1": "3", "option2": "4",
         "option3": "5", "option4": "22", "ans": 2},
        {"id": 2, "question": "Is Rust memory safe?", "option1": "Yes",
         "option2": null, "option3": "No", "option4": null, "ans": 3}
    ])))
    .await;

    let questions = client_for(base_url).fetch_questions().await.expect("fetch");
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].options, vec!["3", "4", "5", "22"]);
    assert_eq!(questions[0].answer, 2);
    assert_eq!(questions[1].options, vec!["Yes", "No"]);
    assert_eq!(questions[1].options[questions[1].answer - 1], "No");
}

#[tokio::test]
async fn base_url_with_path_and_trailing_slash() {
    let router = Router::new().route(
        "/api/questions",
        get(|| async {
            Json(json!([{"question": "?", "option1": "a", "option2": "b", "ans": 1}]))
        }),
    );
    let base_url = spawn_questions_server(router).await;
    let base_url = base_url.join("api/").expect("join");

    let questions = client_for(base_url).fetch_questions().await.expect("fetch");
    assert_eq!(questions.len(), 1);
}

#[tokio::test]
async fn non_success_status_reports_status_text() {
    let router = Router::new().route(
        "/questions",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "try later") }),
    );
    let base_url = spawn_questions_server(router).await;

    let err = client_for(base_url)
        .fetch_questions()
        .await
        .expect_err("must fail");
    match &err {
        FetchError::Status {
            status,
            status_text,
        } => {
            assert_eq!(*status, 503);
            assert_eq!(status_text, "Service Unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.to_string(), "Failed to fetch: Service Unavailable");
}

#[tokio::test]
async fn missing_route_is_not_found() {
    let base_url = spawn_questions_server(Router::new()).await;
    let err = client_for(base_url)
        .fetch_questions()
        .await
        .expect_err("must fail");
    assert_eq!(err.to_string(), "Failed to fetch: Not Found");
}

#[tokio::test]
async fn empty_list_is_no_questions() {
    let base_url = spawn_questions_server(serving(json!([]))).await;
    let err = client_for(base_url)
        .fetch_questions()
        .await
        .expect_err("must fail");
    assert!(matches!(err, FetchError::NoQuestions));
}

#[tokio::test]
async fn only_invalid_records_is_no_questions() {
    let base_url = spawn_questions_server(serving(json!([
        {"question": "broken", "option1": "a", "option2": "b", "ans": 4}
    ])))
    .await;
    let err = client_for(base_url)
        .fetch_questions()
        .await
        .expect_err("must fail");
    assert!(matches!(err, FetchError::NoQuestions));
}

#[tokio::test]
async fn badly_typed_records_do_not_sink_good_ones() {
    let base_url = spawn_questions_server(serving(json!([
        {"question": "kept", "option1": "a", "option2": "b", "ans": 1},
        {"question": "negative", "option1": "a", "option2": "b", "ans": -1},
        {"question": "numeric option", "option1": 4, "option2": "b", "ans": 2},
        {"question": null, "option1": "a", "option2": "b", "ans": 1},
        {"question": "no answer", "option1": "a", "option2": "b", "ans": null}
    ])))
    .await;

    let questions = client_for(base_url).fetch_questions().await.expect("fetch");
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].text, "kept");
}

#[tokio::test]
async fn non_array_body_is_decode_error() {
    let base_url = spawn_questions_server(serving(json!({"questions": []}))).await;
    let err = client_for(base_url)
        .fetch_questions()
        .await
        .expect_err("must fail");
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let base_url = Url::parse(&format!("http://{addr}")).expect("url");
    let err = client_for(base_url)
        .fetch_questions()
        .await
        .expect_err("must fail");
    assert!(matches!(err, FetchError::Network(_)));
    assert!(err.to_string().starts_with("Failed to fetch: "));
}

#[tokio::test]
async fn fetched_questions_drive_a_full_quiz() {
    let base_url = spawn_questions_server(serving(json!([
        {"question": "first", "option1": "a", "option2": "b", "ans": 1},
        {"question": "second", "option1": "a", "option2": "b", "option3": "c", "ans": 2},
        {"question": "third", "option1": "a", "option2": "b", "option3": "c", "option4": "d", "ans": 3}
    ])))
    .await;

    let mut app = App::new();
    app.type_str("Ada");
    app.toggle_field();
    app.type_str("ada@example.com");
    let attempt = app.submit_intake().expect("intake accepted");

    let result = client_for(base_url).fetch_questions().await;
    app.finish_loading(attempt, result);

    for position in [0, 2, 2] {
        app.choose_option(position);
        app.next_question();
    }

    let SessionState::Result(summary) = &app.state else {
        panic!("expected result, got {}", app.state.name());
    };
    assert_eq!(summary.score, 2);
    assert_eq!(summary.total, 3);
}
