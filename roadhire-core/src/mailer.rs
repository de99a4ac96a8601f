use async_trait::async_trait;
use serde::Serialize;

/// One outbound notification. Bodies are HTML fragments assembled by
/// `notify`; the transport does not interpret them.
#[derive(Debug, Clone, Serialize)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Fire-and-forget send. Callers decide whether a failure matters;
    /// the booking flow treats every send as best-effort.
    async fn send(&self, email: Email) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
