use serde::Deserialize;
use serde_json::json;

use crate::domain::{GatewayRecord, OutgoingMessage};

/// Content type for every outgoing message body.
pub const TEXT_PLAIN: &str = "text/plain";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a `v3/mail/send` request body for one outgoing message.
///
/// The shape is the SendGrid v3 helper format: `from.email`, one
/// personalization with one recipient, a subject, and a single `text/plain`
/// content part holding the sanitized (truncated) body.
pub fn encode_mail_send_json(message: &OutgoingMessage, record: &GatewayRecord) -> String {
    json!({
        "personalizations": [
            { "to": [ { "email": message.rendered_to(record) } ] }
        ],
        "from": { "email": message.from().as_str() },
        "subject": message.subject(),
        "content": [
            { "type": TEXT_PLAIN, "value": message.message().sanitized() }
        ],
    })
    .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// One entry of the `errors` array the mail API returns on failure.
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MailSendErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

/// Decode the error body the mail API attaches to non-2xx responses.
pub fn decode_mail_send_error_body(json: &str) -> Result<Vec<ApiErrorDetail>, TransportError> {
    let parsed: MailSendErrorBody = serde_json::from_str(json)?;
    Ok(parsed.errors)
}
