use firmware_notifier::config::SmtpSettings;
use firmware_notifier::notify::{
    email, is_valid_email, is_valid_webhook_url, webhook, Delivery, DeliveryError,
    NotificationMethod, Notifier, Notify, EMAIL_SUBJECT,
};
use mockito::Matcher;
use serde_json::json;

const SLACK_URL: &str = "https://hooks.slack.com/services/T000/B000/XXXX";

// --- Validation ---

#[test]
fn test_email_validation() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("first.last+fw@mail.example.org"));
    assert!(is_valid_email("ADMIN@EXAMPLE.COM"));

    assert!(!is_valid_email("not-an-email"));
    assert!(!is_valid_email(""));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a@b.c"));
    assert!(!is_valid_email("a@b.c0"));
    assert!(!is_valid_email("@b.co"));
    assert!(!is_valid_email("a b@c.co"));
}

#[test]
fn test_webhook_url_validation() {
    assert!(is_valid_webhook_url(SLACK_URL));

    assert!(!is_valid_webhook_url(""));
    assert!(!is_valid_webhook_url("https://hooks.slack.com/"));
    assert!(!is_valid_webhook_url("http://hooks.slack.com/services/T000"));
    assert!(!is_valid_webhook_url("https://example.com/hooks.slack.com/"));
    assert!(!is_valid_webhook_url("https://discord.com/api/webhooks/1"));
}

// --- Method resolution ---

#[test]
fn test_resolve_console() {
    assert_eq!(
        NotificationMethod::resolve(Some("print"), None, None),
        NotificationMethod::Console
    );
    assert_eq!(
        NotificationMethod::resolve(Some("Console"), None, None),
        NotificationMethod::Console
    );
}

#[test]
fn test_resolve_email() {
    assert_eq!(
        NotificationMethod::resolve(Some("email"), Some("a@b.co"), None),
        NotificationMethod::Email("a@b.co".to_string())
    );
}

#[test]
fn test_resolve_email_invalid_address() {
    assert_eq!(
        NotificationMethod::resolve(Some("email"), Some("not-an-email"), None),
        NotificationMethod::Unavailable {
            method: "email".to_string()
        }
    );
    assert_eq!(
        NotificationMethod::resolve(Some("email"), None, Some(SLACK_URL)),
        NotificationMethod::Unavailable {
            method: "email".to_string()
        }
    );
}

#[test]
fn test_resolve_webhook() {
    assert_eq!(
        NotificationMethod::resolve(Some("slack"), None, Some(SLACK_URL)),
        NotificationMethod::Webhook(SLACK_URL.to_string())
    );
    assert_eq!(
        NotificationMethod::resolve(Some("webhook"), None, Some(SLACK_URL)),
        NotificationMethod::Webhook(SLACK_URL.to_string())
    );
}

#[test]
fn test_resolve_webhook_invalid_url() {
    assert_eq!(
        NotificationMethod::resolve(Some("slack"), None, Some("https://example.com/hook")),
        NotificationMethod::Unavailable {
            method: "slack".to_string()
        }
    );
}

#[test]
fn test_resolve_unknown_and_unset() {
    assert_eq!(
        NotificationMethod::resolve(Some("pigeon"), Some("a@b.co"), Some(SLACK_URL)),
        NotificationMethod::Unavailable {
            method: "pigeon".to_string()
        }
    );
    assert_eq!(
        NotificationMethod::resolve(None, None, None),
        NotificationMethod::Unavailable {
            method: String::new()
        }
    );
}

#[test]
fn test_method_display_hides_webhook_url() {
    let shown = NotificationMethod::Webhook(SLACK_URL.to_string()).to_string();
    assert!(!shown.contains("XXXX"));
    assert_eq!(
        NotificationMethod::Unavailable {
            method: String::new()
        }
        .to_string(),
        "<unset>"
    );
}

// --- Dispatch ---

#[test]
fn test_console_notify_prints() {
    let notifier = Notifier::with_method(NotificationMethod::Console, SmtpSettings::default());
    assert_eq!(notifier.notify("hello"), Delivery::Printed);
}

#[test]
fn test_unavailable_notify_is_skipped() {
    let notifier = Notifier::with_method(
        NotificationMethod::resolve(Some("slack"), None, Some("https://example.com/hook")),
        SmtpSettings::default(),
    );
    assert_eq!(notifier.notify("hello"), Delivery::Skipped);
}

#[test]
fn test_webhook_notify_posts_json() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/services/T000")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"text": "New firmware 388_24240"})))
        .with_status(200)
        .with_body("ok")
        .create();

    let url = format!("{}/services/T000", server.url());
    let notifier = Notifier::with_method(NotificationMethod::Webhook(url), SmtpSettings::default());

    assert_eq!(notifier.notify("New firmware 388_24240"), Delivery::Sent);
    mock.assert();
}

#[test]
fn test_webhook_notify_server_error_is_failed() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/services/T000")
        .with_status(500)
        .create();

    let url = format!("{}/services/T000", server.url());
    let notifier = Notifier::with_method(NotificationMethod::Webhook(url), SmtpSettings::default());

    assert_eq!(notifier.notify("hello"), Delivery::Failed);
    mock.assert();
}

#[test]
fn test_webhook_post_reports_status() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("POST", "/hook").with_status(404).create();

    let agent = firmware_notifier::http_agent();
    let result = webhook::post(&agent, &format!("{}/hook", server.url()), "hello");
    assert!(matches!(result, Err(DeliveryError::Status(404))));
}

#[test]
fn test_webhook_post_escapes_message() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/hook")
        .match_body(Matcher::Json(
            json!({"text": "line one\nline \"two\""}),
        ))
        .with_status(204)
        .create();

    let agent = firmware_notifier::http_agent();
    webhook::post(&agent, &format!("{}/hook", server.url()), "line one\nline \"two\"").unwrap();
    mock.assert();
}

#[test]
fn test_webhook_post_connection_refused() {
    let agent = firmware_notifier::http_agent();
    let result = webhook::post(&agent, "http://127.0.0.1:1/hook", "hello");
    assert!(matches!(result, Err(DeliveryError::Http(_))));
}

// --- Email ---

#[test]
fn test_compose_email() {
    let smtp = SmtpSettings::default();
    let message = email::compose(&smtp, "a@b.co", EMAIL_SUBJECT, "Version: 388_24240").unwrap();
    let raw = String::from_utf8(message.formatted()).unwrap();

    assert!(raw.contains("Subject: New Asuswrt-Merlin Firmware Available"));
    assert!(raw.contains("To: a@b.co"));
    assert!(raw.contains("From: asuswrt-merlin-notifier@example.com"));
    assert!(raw.contains("text/plain"));
    assert!(raw.contains("Version: 388_24240"));
}

#[test]
fn test_compose_email_rejects_bad_sender() {
    let smtp = SmtpSettings {
        from: "nobody".to_string(),
        ..Default::default()
    };
    let result = email::compose(&smtp, "a@b.co", EMAIL_SUBJECT, "body");
    assert!(matches!(result, Err(DeliveryError::Address(_))));
}

#[test]
fn test_email_notify_unreachable_relay_is_failed() {
    let smtp = SmtpSettings {
        host: "127.0.0.1".to_string(),
        port: 1,
        ..Default::default()
    };
    let notifier = Notifier::with_method(NotificationMethod::Email("a@b.co".to_string()), smtp);
    assert_eq!(notifier.notify("hello"), Delivery::Failed);
}
