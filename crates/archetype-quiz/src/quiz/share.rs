//! Share tokens: sanitized answers as JSON, percent-encoded, then base64.

use super::answers::{sanitize, AnswerSet, SanitizedAnswers};
use super::catalog::QuestionBank;
use base64::{engine::general_purpose, Engine as _};

#[derive(Debug, thiserror::Error)]
pub enum ShareTokenError {
    #[error("share token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("share token does not decode to text")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("share token payload is not an answer map: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("share token carries no answers for this quiz")]
    NoAnswers,
}

pub fn encode_share_token(answers: &SanitizedAnswers<'_>) -> String {
    // Serializing a map of plain strings cannot fail.
    let json = serde_json::to_string(answers).unwrap_or_else(|_| "{}".to_string());
    general_purpose::STANDARD.encode(urlencoding::encode(&json).as_bytes())
}

/// Decode a token (with or without a leading `#`) and keep only answers valid for `bank`.
pub fn decode_share_token<'a>(
    bank: &'a QuestionBank,
    token: &str,
) -> Result<SanitizedAnswers<'a>, ShareTokenError> {
    let token = token.trim().trim_start_matches('#');
    let bytes = general_purpose::STANDARD.decode(token)?;
    let escaped = String::from_utf8(bytes)?;
    let json = urlencoding::decode(&escaped)?;
    let answers: AnswerSet = serde_json::from_str(&json)?;

    let sanitized = sanitize(bank, &answers);
    if sanitized.is_empty() {
        return Err(ShareTokenError::NoAnswers);
    }
    Ok(sanitized)
}

/// `base_url#token`, or the bare base URL when there is nothing to share.
pub fn share_link(base_url: &str, answers: &SanitizedAnswers<'_>) -> String {
    let base_url = base_url.split('#').next().unwrap_or(base_url);
    if answers.is_empty() {
        return base_url.to_string();
    }
    format!("{base_url}#{}", encode_share_token(answers))
}
