use std::time::Duration;

use anyhow::Context as _;

use crate::domain::repository::QuestionGenerator;
use crate::error::PairServiceError;

/// HTTP client for an Ollama-style text-generation endpoint.
///
/// The collaborator is asked for a single JSON object `{"question": …}`; the
/// response is requested non-streaming and parsed in one go. Callers treat
/// any error as "no question available" and fall back to a placeholder.
#[derive(Clone)]
pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
        }
    }
}

impl QuestionGenerator for OllamaGenerator {
    async fn generate(&self, stem: &str) -> Result<String, PairServiceError> {
        let prompt = format!(
            "Rispondi SOLO con JSON valido.\n\
             Formato ESATTO:\n\
             {{\"question\":\"TESTO DELLA DOMANDA?\"}}\n\
             Regole:\n\
             - Un solo campo: question\n\
             - Deve iniziare con: {stem}\n\
             - Domanda rivolta a una coppia\n\
             - NON fare domande a cui la coppia non puo rispondere scegliendo uno dei due\n\
             - NON scrivere mai i 3 puntini a fine frase, usa il punto di domanda = ?\n\
             - NIENTE spiegazioni\n\
             - NIENTE testo fuori dal JSON"
        );
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "temperature": 0.9,
            }))
            .send()
            .await
            .context("question generator request")?
            .error_for_status()
            .context("question generator status")?;
        let body: serde_json::Value = response
            .json()
            .await
            .context("question generator response body")?;
        let raw = body
            .get("response")
            .and_then(|v| v.as_str())
            .context("question generator response missing `response` field")?;
        parse_generated(raw)
    }
}

/// Strip backtick fencing and extract the `question` field.
fn parse_generated(raw: &str) -> Result<String, PairServiceError> {
    let trimmed = raw.trim().trim_matches('`').trim();
    let value: serde_json::Value =
        serde_json::from_str(trimmed).context("generated text is not valid JSON")?;
    let question = value
        .get("question")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .context("generated JSON has no usable `question` field")?;
    Ok(question.to_owned())
}
