use anyhow::Context;
use async_trait::async_trait;

use super::MessagingProvider;

/// Sends WhatsApp messages through Twilio's REST API. Addresses carry the
/// `whatsapp:` prefix, e.g. `whatsapp:+14155238886` for the sandbox.
pub struct TwilioWhatsAppProvider {
    account_sid: String,
    auth_token: String,
    from_number: String,
    client: reqwest::Client,
}

impl TwilioWhatsAppProvider {
    pub fn new(account_sid: String, auth_token: String, from_number: String) -> Self {
        Self {
            account_sid,
            auth_token,
            from_number,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MessagingProvider for TwilioWhatsAppProvider {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()> {
        if self.account_sid.is_empty() || self.auth_token.is_empty() {
            tracing::warn!("Twilio credentials not configured, dropping outbound message");
            return Ok(());
        }

        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );

        self.client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", &self.from_number), ("Body", body)])
            .send()
            .await
            .context("failed to send WhatsApp message")?
            .error_for_status()
            .context("Twilio API returned error")?;

        Ok(())
    }
}
