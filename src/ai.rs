use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, BufReader};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{FitError, Result};

/// How long a generation may take before giving up. Local models can be slow.
pub const GENERATE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Language-model backend used by `generate`.
pub trait AiClient {
    /// Complete generated text with any reasoning blocks already removed.
    fn generate(&self, prompt: &str, timeout: Duration) -> Result<String>;

    /// Operator-supplied instructions appended to every prompt.
    fn prompt_suffix(&self) -> &str;
}

/// Client for Ollama's `/api/generate` streaming endpoint
pub struct OllamaClient {
    host: String,
    model: String,
    prompt_suffix: String,
    think_tags: Regex,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

impl OllamaClient {
    pub fn new(host: &str, model: &str, prompt_suffix: &str) -> Self {
        OllamaClient {
            host: host.trim_end_matches('/').to_string(),
            model: model.to_string(),
            prompt_suffix: prompt_suffix.to_string(),
            think_tags: Regex::new(r"(?s)<think>.*?</think>\s*").unwrap(),
        }
    }

    /// Remove `<think>...</think>` reasoning emitted by models such as DeepSeek-R1
    pub fn strip_thinking(&self, text: &str) -> String {
        self.think_tags.replace_all(text, "").into_owned()
    }
}

impl AiClient for OllamaClient {
    fn generate(&self, prompt: &str, timeout: Duration) -> Result<String> {
        let url = format!("{}/api/generate", self.host);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| request_error(e, timeout))?;

        info!(model = %self.model, %url, prompt_len = prompt.len(), "sending prompt");

        let response = client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: true,
            })
            .send()
            .map_err(|e| request_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FitError::Network(format!(
                "ollama returned status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let text = collect_stream(BufReader::new(response), timeout)?;
        Ok(self.strip_thinking(&text))
    }

    fn prompt_suffix(&self) -> &str {
        &self.prompt_suffix
    }
}

/// Concatenate the `response` pieces of an NDJSON stream until `done`. Malformed lines are skipped.
fn collect_stream(reader: impl BufRead, timeout: Duration) -> Result<String> {
    let mut text = String::new();
    let mut chunks = 0usize;

    for line in reader.lines() {
        let line = line.map_err(|e| stream_error(e, timeout))?;
        if line.trim().is_empty() {
            continue;
        }

        let chunk: GenerateChunk = match serde_json::from_str(&line) {
            Ok(chunk) => chunk,
            Err(e) => {
                debug!(error = %e, "skipping malformed stream line");
                continue;
            }
        };

        chunks += 1;
        text.push_str(&chunk.response);
        if chunk.done {
            break;
        }
    }

    debug!(chunks, len = text.len(), "stream finished");
    Ok(text)
}

fn request_error(err: reqwest::Error, timeout: Duration) -> FitError {
    if err.is_timeout() {
        FitError::Timeout(timeout)
    } else {
        FitError::Network(err.to_string())
    }
}

fn stream_error(err: io::Error, timeout: Duration) -> FitError {
    let timed_out = err.kind() == io::ErrorKind::TimedOut
        || err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
            .is_some_and(|e| e.is_timeout());

    if timed_out {
        FitError::Timeout(timeout)
    } else {
        FitError::Network(format!("error reading stream: {}", err))
    }
}
