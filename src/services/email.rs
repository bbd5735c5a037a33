//! Email service for sending inventory notifications

use lettre::{
    message::{header::ContentType, Mailbox, Message},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
};

/// Outbound mail collaborator. The notification service takes this as
/// an explicitly optional injected dependency so tests can swap in a
/// mock and a deployment without SMTP simply runs without one.
#[cfg_attr(test, mockall::automock)]
pub trait Mailer: Send + Sync {
    /// Send one message to all recipients. Errors are reported to the
    /// caller; the notification layer decides whether to swallow them.
    fn send(&self, subject: &str, recipients: &[String], body: &str) -> AppResult<()>;
}

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, subject: &str, recipients: &[String], body: &str) -> AppResult<Message> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Darkroom Inventory");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Mail(format!("Invalid from address: {}", e)))?;

        let mut builder = Message::builder().from(from_mailbox).subject(subject);
        for recipient in recipients {
            let to_mailbox = Mailbox::from_str(recipient)
                .map_err(|e| AppError::Mail(format!("Invalid to address: {}", e)))?;
            builder = builder.to(to_mailbox);
        }

        builder
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::Mail(format!("Failed to build email: {}", e)))
    }

    fn build_transport(&self) -> AppResult<SmtpTransport> {
        let builder = if self.config.smtp_use_tls {
            // Use STARTTLS for secure connection
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Mail(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let builder = if let (Some(username), Some(password)) = (
            &self.config.smtp_username,
            &self.config.smtp_password,
        ) {
            builder.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            builder
        };

        Ok(builder.build())
    }
}

impl Mailer for EmailService {
    fn send(&self, subject: &str, recipients: &[String], body: &str) -> AppResult<()> {
        let email = self.build_message(subject, recipients, body)?;
        let mailer = self.build_transport()?;

        mailer
            .send(&email)
            .map_err(|e| AppError::Mail(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}
