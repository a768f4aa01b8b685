use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename(deserialize = "promptFeedback"))]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    #[serde(rename(deserialize = "finishReason"))]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// Non-text parts (function calls, inline data) deserialize with `text: None`.
#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromptFeedback {
    #[serde(rename(deserialize = "blockReason"))]
    pub block_reason: Option<String>,
}

/// `{"error": {...}}` body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<u16>,
    pub message: String,
    pub status: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, or a description of why
    /// there is none.
    pub fn text(&self) -> Result<String, String> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            return Err(format!("prompt was blocked ({reason})"));
        }

        let Some(candidate) = self.candidates.first() else {
            return Err("response contained no candidates".to_string());
        };

        let text: String = candidate
            .content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("UNKNOWN");
            return Err(format!("response contained no text (finish reason: {reason})"));
        }
        Ok(text)
    }
}

impl ApiErrorBody {
    pub fn describe(&self) -> String {
        match (&self.status, self.code) {
            (Some(status), Some(code)) => format!("{} ({} {})", self.message, code, status),
            (Some(status), None) => format!("{} ({})", self.message, status),
            (None, Some(code)) => format!("{} ({})", self.message, code),
            (None, None) => self.message.clone(),
        }
    }
}
