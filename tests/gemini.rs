use argen_news::api::gemini::{
    parse_generate_response, parse_news_payload, provider_error_message, request_body,
};
use argen_news::api::{FetchError, GeminiClient};
use reqwest::StatusCode;
use serde_json::{Value, json};

fn news_payload() -> Value {
    json!({
        "news": [
            {
                "id": "clarin-1",
                "title": "El Gobierno envió el Presupuesto",
                "summary": "El proyecto llegó al Congreso. Se debatirá en comisión.",
                "url": "https://www.clarin.com/politica/presupuesto.html",
                "source": "Clarín",
                "category": "Política",
                "publishedAt": "2026-10-19T09:30:00-03:00"
            },
            {
                "id": "infobae-1",
                "title": "Cómo sigue el clima",
                "summary": "Se esperan lluvias. Rige una alerta amarilla.",
                "url": "https://www.infobae.com/sociedad/clima/",
                "source": "Infobae",
                "category": "Sociedad"
            }
        ]
    })
}

fn envelope(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP",
            "groundingMetadata": {
                "webSearchQueries": ["noticias argentina hoy"],
                "groundingChunks": [
                    { "web": { "uri": "https://vertexaisearch.cloud.google.com/a", "title": "clarin.com" } },
                    { "web": { "uri": "https://vertexaisearch.cloud.google.com/b", "title": "infobae.com" } },
                    { "retrievedContext": { "uri": "gs://bucket/doc" } }
                ]
            }
        }]
    })
    .to_string()
}

// --- parse_generate_response ---

#[test]
fn test_parses_news_in_provider_order() {
    let result = parse_generate_response(&envelope(&news_payload().to_string())).unwrap();
    assert_eq!(result.news.len(), 2);
    assert_eq!(result.news[0].id, "clarin-1");
    assert_eq!(result.news[1].source, "Infobae");
    assert_eq!(
        result.news[0].published_at.as_deref(),
        Some("2026-10-19T09:30:00-03:00")
    );
    assert_eq!(result.news[1].published_at, None);
    assert_eq!(result.news[1].image_url, None);
}

#[test]
fn test_grounding_chunks_pass_through() {
    let result = parse_generate_response(&envelope(&news_payload().to_string())).unwrap();
    assert_eq!(result.sources.len(), 3);
    let web = result.sources[0].web.as_ref().unwrap();
    assert_eq!(web.title.as_deref(), Some("clarin.com"));
    assert!(result.sources[2].web.is_none());
}

#[test]
fn test_missing_grounding_metadata_is_empty() {
    let body = json!({
        "candidates": [{ "content": { "parts": [{ "text": news_payload().to_string() }] } }]
    })
    .to_string();
    let result = parse_generate_response(&body).unwrap();
    assert!(result.sources.is_empty());
    assert_eq!(result.news.len(), 2);
}

fn with_grounding(metadata: Value) -> String {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": news_payload().to_string() }] },
            "groundingMetadata": metadata
        }]
    })
    .to_string()
}

#[test]
fn test_null_grounding_chunks_keep_the_news() {
    let body = with_grounding(json!({ "groundingChunks": null }));
    let result = parse_generate_response(&body).unwrap();
    assert_eq!(result.news.len(), 2);
    assert!(result.sources.is_empty());
}

#[test]
fn test_grounding_chunks_object_keeps_the_news() {
    let body = with_grounding(json!({ "groundingChunks": { "web": {} } }));
    let result = parse_generate_response(&body).unwrap();
    assert_eq!(result.news.len(), 2);
    assert!(result.sources.is_empty());
}

#[test]
fn test_malformed_grounding_metadata_keeps_the_news() {
    for metadata in [Value::Null, json!("n/a"), json!([1, 2])] {
        let result = parse_generate_response(&with_grounding(metadata)).unwrap();
        assert_eq!(result.news.len(), 2);
        assert!(result.sources.is_empty());
    }
}

#[test]
fn test_text_split_across_parts_is_joined() {
    let text = news_payload().to_string();
    let (head, tail) = text.split_at(text.len() / 2);
    let body = json!({
        "candidates": [{ "content": { "parts": [{ "text": head }, { "text": tail }] } }]
    })
    .to_string();
    assert_eq!(parse_generate_response(&body).unwrap().news.len(), 2);
}

#[test]
fn test_thought_parts_are_skipped() {
    let body = json!({
        "candidates": [{ "content": { "parts": [
            { "text": "Buscando noticias...", "thought": true },
            { "text": news_payload().to_string() }
        ] } }]
    })
    .to_string();
    assert_eq!(parse_generate_response(&body).unwrap().news.len(), 2);
}

#[test]
fn test_missing_news_field_is_parse_error() {
    let body = envelope(r#"{"articles": []}"#);
    assert!(matches!(
        parse_generate_response(&body),
        Err(FetchError::Parse(_))
    ));
}

#[test]
fn test_missing_required_field_rejects_whole_batch() {
    let mut payload = news_payload();
    payload["news"][1].as_object_mut().unwrap().remove("url");
    let body = envelope(&payload.to_string());
    assert!(matches!(
        parse_generate_response(&body),
        Err(FetchError::Parse(_))
    ));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let mut payload = news_payload();
    payload["news"][0]["title"] = json!(42);
    assert!(matches!(
        parse_generate_response(&envelope(&payload.to_string())),
        Err(FetchError::Parse(_))
    ));
}

#[test]
fn test_non_json_text_is_parse_error() {
    let body = envelope("Lo siento, no puedo ayudar con eso.");
    assert!(matches!(
        parse_generate_response(&body),
        Err(FetchError::Parse(_))
    ));
}

#[test]
fn test_no_candidates_is_parse_error() {
    assert!(matches!(
        parse_generate_response(r#"{"candidates": []}"#),
        Err(FetchError::Parse(_))
    ));
}

#[test]
fn test_blocked_prompt_is_provider_error() {
    let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
    match parse_generate_response(body) {
        Err(FetchError::Provider(msg)) => assert!(msg.contains("SAFETY")),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_empty_candidate_text_is_parse_error() {
    let body = r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#;
    match parse_generate_response(body) {
        Err(FetchError::Parse(msg)) => assert!(msg.contains("MAX_TOKENS")),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_invalid_envelope_is_parse_error() {
    assert!(matches!(
        parse_generate_response("<html>bad gateway</html>"),
        Err(FetchError::Parse(_))
    ));
}

// --- parse_news_payload ---

#[test]
fn test_relative_url_is_rejected() {
    let mut payload = news_payload();
    payload["news"][0]["url"] = json!("/politica/presupuesto.html");
    assert!(matches!(
        parse_news_payload(&payload.to_string()),
        Err(FetchError::Parse(_))
    ));
}

#[test]
fn test_duplicate_id_rejects_whole_batch() {
    let mut payload = news_payload();
    payload["news"][1]["id"] = json!("clarin-1");
    let err = parse_news_payload(&payload.to_string()).unwrap_err();
    assert!(matches!(&err, FetchError::Parse(msg) if msg.contains("clarin-1")));
}

#[test]
fn test_empty_news_array_is_ok() {
    assert!(parse_news_payload(r#"{"news": []}"#).unwrap().is_empty());
}

#[test]
fn test_null_published_at_is_none() {
    let mut payload = news_payload();
    payload["news"][0]["publishedAt"] = Value::Null;
    let items = parse_news_payload(&payload.to_string()).unwrap();
    assert_eq!(items[0].published_at, None);
}

// --- request_body ---

#[test]
fn test_request_asks_for_search_and_schema() {
    let body = request_body();
    assert!(body["tools"][0].get("google_search").is_some());
    let config = &body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    let item = &config["responseSchema"]["properties"]["news"]["items"];
    assert_eq!(
        item["required"],
        json!(["id", "title", "summary", "url", "source", "category"])
    );
    assert!(item["properties"].get("publishedAt").is_some());

    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    for outlet in ["Clarín", "La Nación", "Infobae", "Página/12", "Ámbito Financiero"] {
        assert!(prompt.contains(outlet), "prompt should name {}", outlet);
    }
}

// --- provider_error_message ---

#[test]
fn test_provider_error_uses_error_body() {
    let body = json!({
        "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
    })
    .to_string();
    let msg = provider_error_message(StatusCode::BAD_REQUEST, &body);
    assert_eq!(msg, "400 INVALID_ARGUMENT: API key not valid.");
}

#[test]
fn test_provider_error_falls_back_to_raw_body() {
    let msg = provider_error_message(StatusCode::BAD_GATEWAY, "upstream down");
    assert_eq!(msg, "HTTP 502: upstream down");
}

// --- GeminiClient ---

#[test]
fn test_endpoint_includes_model() {
    let client = GeminiClient::new(None, "https://example.test/v1beta/", "gemini-test");
    assert_eq!(
        client.endpoint(),
        "https://example.test/v1beta/models/gemini-test:generateContent"
    );
    assert_eq!(client.model(), "gemini-test");
}

#[tokio::test]
async fn test_missing_key_fails_before_network() {
    // Nothing listens on the discard port; a request would surface as Provider.
    let client = GeminiClient::new(None, "http://127.0.0.1:9", "gemini-test");
    assert_eq!(client.fetch_news().await, Err(FetchError::Configuration));

    let client = GeminiClient::new(Some("   ".to_string()), "http://127.0.0.1:9", "gemini-test");
    assert_eq!(client.fetch_news().await, Err(FetchError::Configuration));
}
