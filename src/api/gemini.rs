use crate::api::news::{FetchError, FetchResult, GroundingChunk, NewsFetcher, NewsItem};
use crate::config::Config;
use futures::future::{BoxFuture, FutureExt};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashSet;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const NEWS_PROMPT: &str = "\
Actúa como un curador de noticias experto en Argentina.
Usa Google Search para encontrar las 3 noticias más importantes de HOY (o de las últimas 24 horas) de cada uno de los siguientes diarios:
Clarín, La Nación, Infobae, Página/12 y Ámbito Financiero.

Para cada noticia, extrae:
- Título impactante.
- Un resumen conciso de 2 frases.
- La URL directa del artículo.
- El nombre del diario.
- Una categoría (Política, Economía, Sociedad, Deportes, Espectáculos).

Asegúrate de que la información sea verídica y actual.";

/// Request body for `generateContent`: the prompt, the Google Search tool and
/// the response schema the news payload must conform to.
pub fn request_body() -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": NEWS_PROMPT }]
        }],
        "tools": [{ "google_search": {} }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "news": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "id": { "type": "STRING" },
                                "title": { "type": "STRING" },
                                "summary": { "type": "STRING" },
                                "url": { "type": "STRING" },
                                "source": { "type": "STRING" },
                                "category": { "type": "STRING" },
                                "publishedAt": { "type": "STRING" }
                            },
                            "required": ["id", "title", "summary", "url", "source", "category"]
                        }
                    }
                },
                "required": ["news"]
            }
        }
    })
}

// generateContent response structures
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<Value>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// The schema-constrained payload carried in the candidate's text.
#[derive(Debug, Deserialize)]
struct NewsPayload {
    news: Vec<NewsItem>,
}

fn is_absolute_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}

/// Decode the structured news payload. Fails closed: a missing field, a wrong
/// type, a relative URL or a repeated id rejects the whole batch.
pub fn parse_news_payload(text: &str) -> Result<Vec<NewsItem>, FetchError> {
    let payload: NewsPayload =
        serde_json::from_str(text.trim()).map_err(|e| FetchError::Parse(e.to_string()))?;

    let mut seen = HashSet::new();
    for item in &payload.news {
        if !is_absolute_url(&item.url) {
            return Err(FetchError::Parse(format!(
                "item '{}' has a non-absolute url '{}'",
                item.id, item.url
            )));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(FetchError::Parse(format!("duplicate item id '{}'", item.id)));
        }
    }
    Ok(payload.news)
}

/// Grounding metadata stays untyped in the envelope; a block of the wrong
/// shape yields no sources instead of a decode error.
fn grounding_sources(metadata: Option<Value>) -> Vec<GroundingChunk> {
    let chunks = metadata
        .and_then(|m| serde_json::from_value::<GroundingMetadata>(m).ok())
        .and_then(|m| m.grounding_chunks);
    match chunks {
        Some(Value::Array(chunks)) => chunks
            .into_iter()
            .filter_map(|chunk| serde_json::from_value(chunk).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Decode a full `generateContent` response body into news plus grounding
/// chunks.
pub fn parse_generate_response(body: &str) -> Result<FetchResult, FetchError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(FetchError::Provider(format!("prompt blocked: {}", reason)));
        }
        return Err(FetchError::Parse("response has no candidates".to_string()));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(FetchError::Parse(format!(
            "candidate has no text (finish reason: {})",
            reason
        )));
    }

    let news = parse_news_payload(&text)?;

    let sources = grounding_sources(candidate.grounding_metadata);

    Ok(FetchResult { news, sources })
}

/// Render a non-2xx response as a short message.
pub fn provider_error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => match env.error.status {
            Some(s) => format!("{} {}: {}", status.as_u16(), s, env.error.message),
            None => format!("{}: {}", status.as_u16(), env.error.message),
        },
        Err(_) => {
            let snippet: String = body.chars().take(200).collect();
            format!("HTTP {}: {}", status.as_u16(), snippet.trim())
        }
    }
}

pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    api_base: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, api_base: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone(), &config.api_base, &config.model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    fn credential(&self) -> Result<&str, FetchError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(FetchError::Configuration),
        }
    }

    pub async fn fetch_news(&self) -> Result<FetchResult, FetchError> {
        let api_key = self.credential()?;

        tracing::info!(model = %self.model, "requesting latest news");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_body())
            .send()
            .await
            .map_err(|e| FetchError::Provider(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Provider(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Provider(provider_error_message(status, &body)));
        }

        let result = parse_generate_response(&body)?;
        tracing::info!(
            items = result.news.len(),
            sources = result.sources.len(),
            "news batch decoded"
        );
        Ok(result)
    }
}

impl NewsFetcher for GeminiClient {
    fn fetch_latest_news(&self) -> BoxFuture<'_, Result<FetchResult, FetchError>> {
        self.fetch_news().boxed()
    }
}
