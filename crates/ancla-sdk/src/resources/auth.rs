use crate::client::AnclaClient;
use crate::error::AnclaError;
use crate::types::Session;

impl AnclaClient {
    /// Who the configured API key belongs to. An anonymous client gets
    /// `authenticated: false` rather than an error.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_session(&self) -> Result<Session, AnclaError> {
        self.get("/auth/session").await
    }
}
