// src/notify/webhook.rs
use serde::Serialize;

use super::DeliveryError;

#[derive(Serialize)]
struct Payload<'a> {
    text: &'a str,
}

/// POST `{"text": message}` to a chat webhook. Any non-2xx answer is an error.
pub fn post(agent: &ureq::Agent, url: &str, message: &str) -> Result<(), DeliveryError> {
    let body = serde_json::to_string(&Payload { text: message })?;
    let response = agent
        .post(url)
        .header("Content-Type", "application/json")
        .send(body.as_bytes())?;
    let status = response.status();
    if !status.is_success() {
        return Err(DeliveryError::Status(status.as_u16()));
    }
    Ok(())
}
