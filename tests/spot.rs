use std::time::{Duration, Instant};

use photobot::ai::spot::evaluate_spot;
use photobot::cli::{run_repl, SpotEvaluator};
use photobot::messages::{EVALUATION_FAILED, NO_SEARCH_RESULTS};
use photobot::search::{search_place_info, SearchClient};
use photobot::tests::util::{chat_body, test_ai_config, CHAT_PATH, SEARCH_PATH};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RESULTS_PAGE: &str = r#"<html><body>
<div class="result results_links web-result">
  <h2 class="result__title"><a class="result__a" href="https://example.org/tower">Eiffel Tower - Official site</a></h2>
  <a class="result__snippet">Wrought-iron lattice tower on the Champ de Mars in Paris.</a>
</div>
</body></html>"#;

fn search_client(server: &MockServer) -> SearchClient {
    SearchClient::new(Some(&format!("{}{SEARCH_PATH}", server.uri()))).unwrap()
}

async fn mount_search(server: &MockServer, page: &str) {
    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(body_string_contains(
            "q=Eiffel+Tower+location+type+tourist+information",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page.to_string(), "text/html"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn search_place_info_formats_results() {
    let server = MockServer::start().await;
    mount_search(&server, RESULTS_PAGE).await;

    let info = search_place_info(&search_client(&server), "Eiffel Tower").await;
    assert_eq!(
        info,
        "Title: Eiffel Tower - Official site\nDescription: Wrought-iron lattice tower on the Champ de Mars in Paris."
    );
}

#[tokio::test]
async fn search_place_info_without_results() {
    let server = MockServer::start().await;
    mount_search(&server, "<html><body></body></html>").await;

    let info = search_place_info(&search_client(&server), "Eiffel Tower").await;
    assert_eq!(info, NO_SEARCH_RESULTS);
}

#[tokio::test]
async fn search_place_info_describes_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let info = search_place_info(&search_client(&server), "Eiffel Tower").await;
    assert!(info.starts_with("Failed to search for information about this place: "));
}

#[tokio::test]
async fn evaluate_spot_sends_search_text_to_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string_contains("Champ de Mars"))
        .and(body_string_contains("test-model"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            chat_body("🗼 Totally snap-worthy! Try the golden-hour filter."),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let result = evaluate_spot(
        &test_ai_config(&server.uri()),
        "Eiffel Tower",
        "Title: Eiffel\nDescription: Champ de Mars",
    )
    .await;
    assert_eq!(result, "🗼 Totally snap-worthy! Try the golden-hour filter.");
    server.verify().await;
}

#[tokio::test]
async fn evaluate_spot_apologises_on_model_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = evaluate_spot(&test_ai_config(&server.uri()), "Nowhere", "").await;
    assert_eq!(result, EVALUATION_FAILED);
}

#[tokio::test]
async fn evaluate_spot_gives_up_on_a_stalled_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(chat_body("too late"), "application/json")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = test_ai_config(&server.uri());
    config.timeout = Duration::from_millis(200);
    let started = Instant::now();
    let result = evaluate_spot(&config, "Eiffel Tower", "").await;
    assert_eq!(result, EVALUATION_FAILED);
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn repl_evaluates_a_place_then_exits() {
    let server = MockServer::start().await;
    mount_search(&server, RESULTS_PAGE).await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            chat_body("🗼 Landmark! Themes: Paris Nights, Golden Hour, Retro Postcard."),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let evaluator = SpotEvaluator::new(test_ai_config(&server.uri()), search_client(&server));
    let mut out = Vec::new();
    run_repl(&evaluator, &b"Eiffel Tower\nexit\n"[..], &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("🔍 Evaluating Eiffel Tower as a Snapchat photo spot..."));
    assert!(text.contains("SNAPCHAT SPOT EVALUATION"));
    assert!(text.contains("Themes: Paris Nights, Golden Hour, Retro Postcard."));
    assert!(text.contains("Happy snapping!"));
    server.verify().await;
}
