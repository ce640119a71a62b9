use reqwest::{header, Client};

use crate::{config::ApiConfig, domain::ClassificationResult};

use super::{
    error::ClassifyError,
    protocol::{interpret_response, SubmissionPayload},
};

#[derive(Clone)]
pub struct ClassifierClient {
    http: Client,
    config: ApiConfig,
}

impl ClassifierClient {
    pub fn new(http: Client, config: ApiConfig) -> Self {
        Self { http, config }
    }

    /// One POST per submission. Timeouts and connection failures surface as
    /// [`ClassifyError::Transport`]; everything the server answered with goes
    /// through [`interpret_response`].
    pub async fn classify(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<ClassificationResult, ClassifyError> {
        let response = self
            .http
            .post(self.config.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .json(payload)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(ClassifyError::Transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(ClassifyError::Transport)?;

        tracing::debug!(
            target: "api",
            status = status.as_u16(),
            bytes = body.len(),
            "classification response received"
        );
        interpret_response(status, &body)
    }
}
