use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};

use super::{tools, ChatReply, ChatRequest, LlmProvider, ToolCall};
use crate::models::GroundingLink;

pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

fn build_body(request: &ChatRequest) -> Value {
    let mut contents: Vec<Value> = request
        .history
        .iter()
        .map(|m| json!({ "role": m.role, "parts": [{ "text": m.content }] }))
        .collect();
    contents.push(json!({ "role": "user", "parts": [{ "text": request.message }] }));

    let tools = if request.use_search {
        json!([{ "googleSearch": {} }])
    } else {
        json!([{ "functionDeclarations": tools::declarations() }])
    };

    json!({
        "contents": contents,
        "systemInstruction": { "parts": [{ "text": request.instruction }] },
        "generationConfig": { "temperature": 0.7 },
        "tools": tools,
    })
}

fn parse_response(data: &Value) -> anyhow::Result<ChatReply> {
    let candidate = data["candidates"]
        .get(0)
        .ok_or_else(|| anyhow::anyhow!("no candidates in Gemini response"))?;

    let mut reply = ChatReply::default();

    if let Some(parts) = candidate["content"]["parts"].as_array() {
        for part in parts {
            if let Some(text) = part["text"].as_str() {
                reply.text.push_str(text);
            }
            if let Some(call) = part.get("functionCall") {
                let name = call["name"]
                    .as_str()
                    .ok_or_else(|| anyhow::anyhow!("function call without a name"))?;
                let args = call.get("args").cloned().unwrap_or_else(|| json!({}));
                reply.tool_calls.push(ToolCall::from_function_call(name, args)?);
            }
        }
    }

    if let Some(chunks) = candidate["groundingMetadata"]["groundingChunks"].as_array() {
        reply.grounding = chunks
            .iter()
            .filter_map(|chunk| {
                let web = chunk.get("web")?;
                Some(GroundingLink {
                    uri: web["uri"].as_str()?.to_string(),
                    title: web["title"].as_str().unwrap_or_default().to_string(),
                })
            })
            .collect();
    }

    Ok(reply)
}

/// The `error.message` of a JSON error body, or the raw body otherwise.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn chat(&self, request: ChatRequest) -> anyhow::Result<ChatReply> {
        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);
        let body = build_body(&request);

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("failed to call Gemini API")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({}): {}", status, error_detail(&body));
        }

        let data: Value = resp
            .json()
            .await
            .context("failed to parse Gemini response")?;

        let reply = parse_response(&data)?;
        tracing::debug!(
            model = %request.model,
            tool_calls = reply.tool_calls.len(),
            grounding = reply.grounding.len(),
            "gemini reply received"
        );
        Ok(reply)
    }
}
