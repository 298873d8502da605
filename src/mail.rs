//! Contact-form mail hand-off. Delivery runs on a detached task.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    pub subject: String,
    pub recipients: Vec<String>,
    pub body: String,
}

/// Whatever actually delivers the message.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), AppError>;
}

/// Writes messages to the log instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    async fn send(&self, email: Email) -> Result<(), AppError> {
        info!(
            subject = %email.subject,
            recipients = ?email.recipients,
            body = %email.body,
            "✉️ Mail handed off"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    fn body(&self) -> String {
        format!(
            "From: {} <{}>\n\nMessage:\n{}\n",
            self.name, self.email, self.message
        )
    }
}

#[derive(Clone)]
pub struct Mailer {
    transport: Arc<dyn MailTransport>,
    admin: Option<String>,
}

impl Mailer {
    pub fn new(transport: Arc<dyn MailTransport>, admin: Option<String>) -> Self {
        Self { transport, admin }
    }

    /// Queues the form for the site admin and returns immediately.
    /// Returns `false` when no admin address is configured.
    pub fn send_contact(&self, form: &ContactForm) -> bool {
        let Some(admin) = self.admin.clone() else {
            warn!("✉️ MAIL_ADMIN is not set, dropping contact message");
            return false;
        };

        let email = Email {
            subject: form.subject.clone(),
            recipients: vec![admin],
            body: form.body(),
        };
        let transport = Arc::clone(&self.transport);

        tokio::spawn(async move {
            if let Err(e) = transport.send(email).await {
                error!(error = ?e, "✉️ ❌ Failed to send mail");
            }
        });
        true
    }
}
