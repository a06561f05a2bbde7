use catalog::Category;

use crate::error::{ScoreError, error_message};
use crate::protocol::{ScoreRequest, ScoreResponse};

/// Submission collaborator: scores one location for one category.
///
/// Futures are not required to be `Send`; the browser host runs them on
/// the single-threaded wasm executor.
#[allow(async_fn_in_trait)]
pub trait Scorer {
    async fn score(
        &self,
        category: Category,
        request: &ScoreRequest,
    ) -> Result<ScoreResponse, ScoreError>;
}

impl<S: Scorer + ?Sized> Scorer for &S {
    async fn score(
        &self,
        category: Category,
        request: &ScoreRequest,
    ) -> Result<ScoreResponse, ScoreError> {
        (**self).score(category, request).await
    }
}

pub fn predict_url(base_url: &str, category: Category) -> String {
    format!("{}/predict/{}", base_url.trim_end_matches('/'), category.as_str())
}

/// Interprets a finished HTTP exchange. Shared by every transport.
pub fn decode_response(status: u16, body: &str) -> Result<ScoreResponse, ScoreError> {
    if !(200..300).contains(&status) {
        return Err(ScoreError::Status {
            status,
            message: error_message(body),
        });
    }
    serde_json::from_str(body).map_err(|err| ScoreError::Decode(err.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::HttpScorer;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use catalog::Category;
    use tracing::{debug, warn};

    use super::{Scorer, decode_response, predict_url};
    use crate::config::ScoringConfig;
    use crate::error::ScoreError;
    use crate::protocol::{ScoreRequest, ScoreResponse};

    #[derive(Debug, Clone)]
    pub struct HttpScorer {
        base_url: String,
        http: reqwest::Client,
    }

    impl HttpScorer {
        pub fn new(config: &ScoringConfig) -> Result<Self, ScoreError> {
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = config.timeout {
                builder = builder.timeout(timeout);
            }
            let http = builder
                .build()
                .map_err(|err| ScoreError::Transport(err.to_string()))?;
            Ok(Self {
                base_url: config.base_url.clone(),
                http,
            })
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }

    impl Scorer for HttpScorer {
        async fn score(
            &self,
            category: Category,
            request: &ScoreRequest,
        ) -> Result<ScoreResponse, ScoreError> {
            let url = predict_url(&self.base_url, category);
            debug!(%url, lat = request.latitude, lng = request.longitude, "posting score request");

            let resp = self
                .http
                .post(&url)
                .json(request)
                .send()
                .await
                .map_err(|err| {
                    warn!("score request to {url} failed: {err}");
                    ScoreError::Transport(err.to_string())
                })?;
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .map_err(|err| ScoreError::Transport(err.to_string()))?;
            decode_response(status, &body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_category() {
        assert_eq!(
            predict_url("http://127.0.0.1:5000/", Category::Healthcare),
            "http://127.0.0.1:5000/predict/healthcare"
        );
        assert_eq!(
            predict_url("https://api.example.org/v1", Category::Education),
            "https://api.example.org/v1/predict/education"
        );
    }

    #[test]
    fn success_body_decodes() {
        let resp = decode_response(200, r#"{"Demand Score":7.5,"Recommendations":"Build clinic"}"#)
            .unwrap();
        assert_eq!(resp.demand_score, 7.5);
        assert_eq!(resp.recommendations, "Build clinic");
    }

    #[test]
    fn error_status_carries_server_message() {
        let err = decode_response(400, r#"{"error":"Invalid service type."}"#).unwrap_err();
        assert_eq!(
            err,
            ScoreError::Status {
                status: 400,
                message: Some("Invalid service type.".to_string()),
            }
        );
    }

    #[test]
    fn non_json_error_status_has_no_message() {
        let err = decode_response(502, "Bad Gateway").unwrap_err();
        assert_eq!(err.user_message(), crate::FALLBACK_MESSAGE);
    }

    #[test]
    fn malformed_success_is_decode_error() {
        let err = decode_response(200, r#"{"Demand Score":"high"}"#).unwrap_err();
        assert!(matches!(err, ScoreError::Decode(_)));
    }
}
