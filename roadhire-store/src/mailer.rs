use async_trait::async_trait;

use roadhire_core::mailer::{Email, Mailer};

/// Delivers mail through an HTTP sending API. The endpoint takes the
/// message as JSON and authenticates with a bearer key.
pub struct HttpMailer {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpMailer {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: Email) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("mail send failed ({status}): {body}").into());
        }

        Ok(())
    }
}
