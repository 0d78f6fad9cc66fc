// src/notify/email.rs
use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use super::DeliveryError;
use crate::config::SmtpSettings;

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the plain-text announcement mail.
pub fn compose(
    smtp: &SmtpSettings,
    to: &str,
    subject: &str,
    body: &str,
) -> Result<Message, DeliveryError> {
    let message = Message::builder()
        .from(smtp.from.parse::<Mailbox>()?)
        .to(to.parse::<Mailbox>()?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())?;
    Ok(message)
}

/// Send through the relay over STARTTLS, authenticating with the
/// configured credentials.
pub fn send(smtp: &SmtpSettings, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
    let message = compose(smtp, to, subject, body)?;
    let mailer = SmtpTransport::starttls_relay(&smtp.host)?
        .port(smtp.port)
        .credentials(Credentials::new(
            smtp.username.clone(),
            smtp.password.clone(),
        ))
        .timeout(Some(SMTP_TIMEOUT))
        .build();
    mailer.send(&message)?;
    Ok(())
}
