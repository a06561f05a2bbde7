/// Shown when the service gives no usable message.
pub const FALLBACK_MESSAGE: &str = "An error occurred";
/// Shown when the service could not be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Network Error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// Non-2xx reply; `message` comes from a JSON `error`/`message` key.
    Status { status: u16, message: Option<String> },
    Transport(String),
    /// 2xx reply whose body is not a score.
    Decode(String),
}

impl ScoreError {
    /// Text for the error notice.
    pub fn user_message(&self) -> String {
        match self {
            ScoreError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ScoreError::Status { message: None, .. } | ScoreError::Decode(_) => {
                FALLBACK_MESSAGE.to_string()
            }
            ScoreError::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::Status {
                status,
                message: Some(message),
            } => write!(f, "scoring service returned {status}: {message}"),
            ScoreError::Status {
                status,
                message: None,
            } => write!(f, "scoring service returned {status}"),
            ScoreError::Transport(err) => write!(f, "scoring request failed: {err}"),
            ScoreError::Decode(err) => write!(f, "invalid scoring response: {err}"),
        }
    }
}

impl std::error::Error for ScoreError {}

/// Extracts `"error"` (or else `"message"`) from a JSON error body.
pub fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .into_iter()
        .find_map(|key| value.get(key)?.as_str())
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins() {
        let err = ScoreError::Status {
            status: 400,
            message: Some("Invalid service type".to_string()),
        };
        assert_eq!(err.user_message(), "Invalid service type");
        assert_eq!(err.to_string(), "scoring service returned 400: Invalid service type");
    }

    #[test]
    fn fallbacks() {
        let status = ScoreError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(status.user_message(), FALLBACK_MESSAGE);
        assert_eq!(ScoreError::Decode("eof".into()).user_message(), FALLBACK_MESSAGE);
        assert_eq!(
            ScoreError::Transport("connection refused".into()).user_message(),
            NETWORK_ERROR_MESSAGE
        );
    }

    #[test]
    fn reads_error_then_message_key() {
        assert_eq!(error_message(r#"{"error":"bad"}"#).as_deref(), Some("bad"));
        assert_eq!(error_message(r#"{"message":"worse"}"#).as_deref(), Some("worse"));
        assert_eq!(
            error_message(r#"{"error":"first","message":"second"}"#).as_deref(),
            Some("first")
        );
        assert_eq!(error_message(r#"{"error":42,"message":"text"}"#).as_deref(), Some("text"));
        assert_eq!(error_message(r#"{"error":"  "}"#), None);
        assert_eq!(error_message("<html>502</html>"), None);
    }
}
