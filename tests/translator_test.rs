mod common;

use std::time::Duration;

use axum::http::StatusCode;
use mangasort::translator::{
    MAX_ATTEMPTS, Translation, TranslationError, Translator, TranslatorClient, clean_response,
    prompt,
};

use common::{Behaviour, start_mock, translations};

fn client(url: &str) -> TranslatorClient {
    TranslatorClient::new(url, "test-model", Duration::from_secs(5)).unwrap()
}

#[test]
fn test_clean_response_strips_wrappers() {
    assert_eq!(clean_response("\"你好\""), "你好");
    assert_eq!(clean_response("  '你好'\n"), "你好");
    assert_eq!(clean_response("（你好）"), "你好");
    assert_eq!(clean_response("(你好)"), "你好");
    assert_eq!(clean_response("__你好__"), "你好");
    assert_eq!(clean_response("你 好"), "你 好");
}

#[test]
fn test_prompt_embeds_title() {
    assert_eq!(prompt("こんにちは"), "请将以下日文翻译成中文：'こんにちは'");
}

#[tokio::test]
async fn test_request_returns_cleaned_translation() {
    let mock = start_mock(Behaviour::Translate(translations(&[("こんにちは", "你好")]))).await;

    let text = client(&mock.url).request("こんにちは").await.unwrap();

    assert_eq!(text, "你好");
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn test_request_reports_status() {
    let mock = start_mock(Behaviour::Fail(StatusCode::INTERNAL_SERVER_ERROR)).await;

    let result = client(&mock.url).request("こんにちは").await;

    assert!(matches!(
        result,
        Err(TranslationError::Status(status)) if status.as_u16() == 500
    ));
}

#[tokio::test]
async fn test_request_reports_malformed_body() {
    let mock = start_mock(Behaviour::Garbage).await;

    let result = client(&mock.url).request("こんにちは").await;

    assert!(matches!(result, Err(TranslationError::MalformedBody(_))));
}

#[tokio::test]
async fn test_request_reports_unreachable_service() {
    let url = common::dead_endpoint().await;

    let result = client(&url).request("こんにちは").await;

    assert!(matches!(result, Err(TranslationError::Unreachable(_))));
}

#[tokio::test]
async fn test_request_reports_timeout() {
    let url = common::hung_endpoint().await;
    let client = TranslatorClient::new(&url, "test-model", Duration::from_millis(200)).unwrap();

    let result = client.request("こんにちは").await;

    assert!(matches!(result, Err(TranslationError::Timeout)));
}

#[tokio::test]
async fn test_self_check() {
    let mock = start_mock(Behaviour::Translate(translations(&[("こんにちは", "你好")]))).await;
    assert_eq!(client(&mock.url).self_check().await.unwrap(), "你好");

    let down = start_mock(Behaviour::Fail(StatusCode::BAD_GATEWAY)).await;
    assert!(client(&down.url).self_check().await.is_err());
}

#[tokio::test]
async fn test_translate_falls_back_after_three_failures() {
    let mock = start_mock(Behaviour::Fail(StatusCode::SERVICE_UNAVAILABLE)).await;
    let translator = Translator::Remote(client(&mock.url));

    let translation = translator.translate("こんにちは").await;

    match translation {
        Translation::Fallback { text, errors } => {
            assert_eq!(text, "こんにちは");
            assert_eq!(errors.len(), MAX_ATTEMPTS);
        }
        other => panic!("expected fallback, got {:?}", other),
    }
    assert_eq!(mock.calls(), MAX_ATTEMPTS);
}

#[tokio::test]
async fn test_translate_succeeds_on_last_attempt() {
    let mock = start_mock(Behaviour::Flaky {
        failures: MAX_ATTEMPTS - 1,
        map: translations(&[("こんにちは", "你好")]),
    })
    .await;
    let translator = Translator::Remote(client(&mock.url));

    let translation = translator.translate("こんにちは").await;

    assert!(matches!(&translation, Translation::Translated(text) if text == "你好"));
    assert!(translation.is_durable());
    assert_eq!(mock.calls(), MAX_ATTEMPTS);
}

#[tokio::test]
async fn test_passthrough_never_calls_service() {
    let translation = Translator::Passthrough.translate("こんにちは").await;

    assert!(matches!(&translation, Translation::Passthrough(text) if text == "こんにちは"));
    assert!(!translation.is_durable());
}
