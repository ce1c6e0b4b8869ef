//! Notification delivery.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use slotwatch_core::Notification;

const PUSHOVER_MESSAGES_URL: &str = "https://api.pushover.net/1/messages.json";
const PUSHOVER_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can deliver a notification.
pub trait Notifier {
    async fn send(&self, notification: &Notification) -> Result<()>;
}

impl<T: Notifier> Notifier for &T {
    async fn send(&self, notification: &Notification) -> Result<()> {
        (**self).send(notification).await
    }
}

/// Push notifications through Pushover.
pub struct Pushover {
    api_key: String,
    user_key: String,
    client: reqwest::Client,
}

impl Pushover {
    pub fn new(api_key: String, user_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(PUSHOVER_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Pushover {
            api_key,
            user_key,
            client,
        })
    }

    fn form<'a>(&'a self, notification: &'a Notification) -> [(&'static str, &'a str); 6] {
        [
            ("token", self.api_key.as_str()),
            ("user", self.user_key.as_str()),
            ("title", notification.title.as_str()),
            ("message", notification.message.as_str()),
            ("html", "1"),
            ("priority", "1"),
        ]
    }
}

impl Notifier for Pushover {
    async fn send(&self, notification: &Notification) -> Result<()> {
        let response = self
            .client
            .post(PUSHOVER_MESSAGES_URL)
            .form(&self.form(notification))
            .send()
            .await
            .context("Pushover request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Pushover returned {}: {}", status, error_text);
        }

        Ok(())
    }
}

/// Prints notifications to stdout instead of sending them.
pub struct ConsoleNotifier {
    pub json: bool,
}

impl Notifier for ConsoleNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        let mut stdout = std::io::stdout().lock();

        if self.json {
            let line =
                serde_json::to_string(notification).context("Failed to serialize notification")?;
            writeln!(stdout, "{}", line)?;
        } else {
            writeln!(stdout, "{}\n{}\n", notification.title, notification.message)?;
        }

        stdout.flush()?;
        Ok(())
    }
}
