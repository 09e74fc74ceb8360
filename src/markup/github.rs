//! GitHub `/markdown` endpoint, gfm mode.

use super::{ConversionError, MarkupConverter};
use crate::source::github::{API_ROOT, authorized};
use std::time::Duration;

pub struct GithubConverter {
    agent: ureq::Agent,
    token: String,
    endpoint: String,
}

impl GithubConverter {
    pub fn new(token: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(60))
                .build(),
            token: token.to_string(),
            endpoint: format!("{API_ROOT}/markdown"),
        }
    }
}

impl MarkupConverter for GithubConverter {
    fn convert(&self, text: &str) -> Result<String, ConversionError> {
        let response = authorized(self.agent.post(&self.endpoint), &self.token)
            .send_json(serde_json::json!({ "text": text, "mode": "gfm" }))
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => ConversionError::Status(code),
                ureq::Error::Transport(e) => ConversionError::Transport(e.to_string()),
            })?;

        response
            .into_string()
            .map_err(|e| ConversionError::Transport(e.to_string()))
    }
}
