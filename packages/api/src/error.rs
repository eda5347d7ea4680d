//! Uniform error type for every backend call.
//!
//! Non-2xx responses carry `{"detail": ...}` where `detail` is either a plain
//! string or a list of validation items `{loc, msg}`. [`ApiError::from_response`]
//! turns both shapes into one human-readable message.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Ikke innlogget")]
    MissingToken,
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Kunne ikke kontakte serveren. Prøv igjen. ({0})")]
    Network(String),
    #[error("Uventet svar fra serveren: {0}")]
    Decode(String),
    #[error("{0}")]
    Upload(String),
    #[error("{0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Classify a non-2xx response.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = detail_message(body).unwrap_or_else(|| status_message(status));
        match status {
            401 => ApiError::Unauthorized(message),
            400 | 422 => ApiError::Validation(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Server { status, message },
        }
    }

    /// True when the backend rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Message suitable for an inline banner. Failures that never reached the
    /// backend use `fallback` instead of the transport's technical text.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Network(_) | ApiError::Decode(_) => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Detail>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Items(Vec<DetailItem>),
    Other(serde_json::Value),
}

#[derive(Deserialize)]
struct DetailItem {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

impl DetailItem {
    fn render(&self) -> String {
        let field = match self.loc.last() {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        match field {
            Some(field) => format!("{field}: {}", self.msg),
            None => self.msg.clone(),
        }
    }
}

/// Extract the backend's `detail` as a single line, if the body has one.
pub fn detail_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        Detail::Message(s) if !s.trim().is_empty() => Some(s),
        Detail::Message(_) => None,
        Detail::Items(items) if !items.is_empty() => Some(
            items
                .iter()
                .map(DetailItem::render)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Detail::Items(_) => None,
        Detail::Other(value) => Some(value.to_string()),
    }
}

fn status_message(status: u16) -> String {
    match status {
        401 => "Ugyldig eller utløpt innlogging".to_string(),
        403 => "Ingen tilgang".to_string(),
        404 => "Fant ikke ressursen".to_string(),
        400 | 422 => "Ugyldige data".to_string(),
        _ => format!("Serverfeil ({status})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        let err = ApiError::from_response(401, br#"{"detail":"Incorrect email or password"}"#);
        assert_eq!(
            err,
            ApiError::Unauthorized("Incorrect email or password".into())
        );
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_validation_items_are_joined() {
        let body = br#"{"detail":[
            {"loc":["body","price"],"msg":"field required","type":"missing"},
            {"loc":["body","items",0,"quantity"],"msg":"value is not a valid integer"}
        ]}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(
            err.to_string(),
            "price: field required, quantity: value is not a valid integer"
        );
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_numeric_last_loc() {
        let body = br#"{"detail":[{"loc":["body","items",2],"msg":"bad"}]}"#;
        assert_eq!(detail_message(body).as_deref(), Some("2: bad"));
    }

    #[test]
    fn test_missing_detail_uses_status() {
        let err = ApiError::from_response(500, b"Internal Server Error");
        assert_eq!(
            err,
            ApiError::Server {
                status: 500,
                message: "Serverfeil (500)".into()
            }
        );
        assert_eq!(
            ApiError::from_response(404, b"{}").to_string(),
            "Fant ikke ressursen"
        );
    }

    #[test]
    fn test_user_message_hides_transport_text() {
        let err = ApiError::Network("dns error".into());
        assert_eq!(err.user_message("Innlogging feilet"), "Innlogging feilet");
        let err = ApiError::Validation("email: invalid".into());
        assert_eq!(err.user_message("Innlogging feilet"), "email: invalid");
    }
}
