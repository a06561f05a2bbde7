use scoring::{ScoreError, ScoreResponse};
use serde::Serialize;

pub const NO_COORDINATE_MESSAGE: &str = "Please select a location on the map";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionResult {
    pub demand_score: f64,
    pub recommendations: String,
}

impl SubmissionResult {
    /// The score as the result card prints it (`7.5`, `8`).
    pub fn demand_score_text(&self) -> String {
        self.demand_score.to_string()
    }
}

impl From<ScoreResponse> for SubmissionResult {
    fn from(resp: ScoreResponse) -> Self {
        Self {
            demand_score: resp.demand_score,
            recommendations: resp.recommendations,
        }
    }
}

/// Submission lifecycle. Loading, result and error are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum UiState {
    #[default]
    Idle,
    Submitting,
    ShowingResult(SubmissionResult),
    ShowingError(String),
}

impl UiState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, UiState::Submitting)
    }

    pub fn result(&self) -> Option<&SubmissionResult> {
        match self {
            UiState::ShowingResult(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UiState::ShowingError(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// A submission is already in flight; nothing changed.
    InFlight,
    NoCoordinate,
    Remote(ScoreError),
}

impl SubmitError {
    /// Text for the error notice.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::InFlight => "A submission is already in progress".to_string(),
            SubmitError::NoCoordinate => NO_COORDINATE_MESSAGE.to_string(),
            SubmitError::Remote(err) => err.user_message(),
        }
    }
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::InFlight => f.write_str("submission already in progress"),
            SubmitError::NoCoordinate => f.write_str("no coordinate selected"),
            SubmitError::Remote(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Remote(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ScoreError> for SubmitError {
    fn from(err: ScoreError) -> Self {
        SubmitError::Remote(err)
    }
}
