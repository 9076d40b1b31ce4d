use anyhow::Context as _;

use crate::domain::repository::PushDispatcher;
use crate::error::PairServiceError;

/// HTTP push gateway client. When no gateway URL is configured the dispatcher
/// drops messages silently, which keeps local setups working without one.
#[derive(Clone)]
pub struct HttpPushDispatcher {
    client: reqwest::Client,
    url: Option<String>,
}

impl HttpPushDispatcher {
    pub fn new(url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

impl PushDispatcher for HttpPushDispatcher {
    async fn dispatch(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
        kind: &str,
        sender_id: i64,
    ) -> Result<(), PairServiceError> {
        let Some(url) = self.url.as_deref() else {
            tracing::debug!(kind, "push dispatch disabled, dropping notification");
            return Ok(());
        };
        self.client
            .post(url)
            .json(&serde_json::json!({
                "to": device_token,
                "notification": { "title": title, "body": body },
                "data": { "type": kind, "senderId": sender_id },
            }))
            .send()
            .await
            .context("push gateway request")?
            .error_for_status()
            .context("push gateway status")?;
        Ok(())
    }
}
