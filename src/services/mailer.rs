use async_trait::async_trait;
use lettre::{
    message::header::ContentType,
    transport::smtp::{authentication::Credentials, Error as SmtpError},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use log::{debug, error, info};
use std::sync::Arc;
use thiserror::Error;

use crate::config::MailConfig;
use crate::database::models::{FormSubmission, Quote};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Outgoing plain-text message sink
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// SMTP delivery through a STARTTLS relay
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotifier {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| MailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| MailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.mailer.send(email).await?;
        info!("Email sent to {}: {}", to, subject);
        Ok(())
    }
}

/// Staff notifications for new quotes and form submissions.
///
/// Sends happen on a spawned task; a failed send is logged and never
/// reaches the request that triggered it.
#[derive(Clone)]
pub struct Mailer {
    notifier: Option<Arc<dyn Notifier>>,
    notify_address: String,
}

impl Mailer {
    pub fn from_config(config: Option<&MailConfig>) -> Self {
        let Some(config) = config else {
            info!("Mail not configured, notifications disabled");
            return Self::disabled();
        };

        match SmtpNotifier::new(config) {
            Ok(notifier) => Self::with_notifier(Arc::new(notifier), config.notify_address.clone()),
            Err(e) => {
                error!("Failed to set up SMTP transport, notifications disabled: {}", e);
                Self::disabled()
            }
        }
    }

    pub fn with_notifier(notifier: Arc<dyn Notifier>, notify_address: String) -> Self {
        Self {
            notifier: Some(notifier),
            notify_address,
        }
    }

    pub fn disabled() -> Self {
        Self {
            notifier: None,
            notify_address: String::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.notifier.is_some() && !self.notify_address.is_empty()
    }

    pub fn notify_quote(&self, quote: &Quote) {
        let subject = format!("New quote request from {}", quote.name);
        self.dispatch(subject, quote_body(quote));
    }

    pub fn notify_form(&self, form: &FormSubmission) {
        let subject = match &form.subject {
            Some(subject) => format!("New {} form: {}", form.kind.as_str(), subject),
            None => format!("New {} form from {}", form.kind.as_str(), form.name),
        };
        self.dispatch(subject, form_body(form));
    }

    fn dispatch(&self, subject: String, body: String) {
        let Some(notifier) = self.notifier.clone().filter(|_| self.is_enabled()) else {
            debug!("Mail disabled, skipping notification: {}", subject);
            return;
        };
        let to = self.notify_address.clone();

        tokio::spawn(async move {
            if let Err(e) = notifier.send(&to, &subject, &body).await {
                error!("Failed to send notification '{}': {}", subject, e);
            }
        });
    }
}

fn quote_body(quote: &Quote) -> String {
    let mut lines = vec![
        format!("Name: {}", quote.name),
        format!("Email: {}", quote.email),
    ];
    if let Some(phone) = &quote.phone {
        lines.push(format!("Phone: {}", phone));
    }
    if let Some(product_id) = &quote.product_id {
        lines.push(format!("Product: {}", product_id.to_hex()));
    }
    if let Some(budget) = quote.budget {
        lines.push(format!("Budget: {:.2}", budget));
    }
    lines.push(String::new());
    lines.push(quote.message.clone());
    lines.join("\n")
}

fn form_body(form: &FormSubmission) -> String {
    let mut lines = vec![
        format!("Name: {}", form.name),
        format!("Email: {}", form.email),
    ];
    if let Some(phone) = &form.phone {
        lines.push(format!("Phone: {}", phone));
    }
    if let Some(date) = &form.preferred_date {
        lines.push(format!("Preferred date: {}", date));
    }
    lines.push(String::new());
    lines.push(form.message.clone());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::FormKind;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String, String)>>,
        delivered: Notify,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string(), body.to_string()));
            self.delivered.notify_one();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_quote_notification_is_delivered() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mailer = Mailer::with_notifier(notifier.clone(), "sales@example.com".into());

        let mut quote = Quote::new(
            "Ana".into(),
            "ana@example.com".into(),
            "Looking for a 2ct oval".into(),
        );
        quote.budget = Some(15000.0);
        mailer.notify_quote(&quote);

        notifier.delivered.notified().await;
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (to, subject, body) = &sent[0];
        assert_eq!(to, "sales@example.com");
        assert_eq!(subject, "New quote request from Ana");
        assert!(body.contains("Budget: 15000.00"));
        assert!(body.ends_with("Looking for a 2ct oval"));
    }

    #[test]
    fn test_form_body_includes_appointment_date() {
        let mut form = FormSubmission::new(
            FormKind::Appointment,
            "Sam".into(),
            "sam@example.com".into(),
            "Viewing".into(),
        );
        form.preferred_date = Some("2026-11-02".into());
        assert!(form_body(&form).contains("Preferred date: 2026-11-02"));
    }

    #[test]
    fn test_disabled_mailer() {
        let mailer = Mailer::from_config(None);
        assert!(!mailer.is_enabled());
        // Must not panic outside a runtime since nothing is spawned
        mailer.notify_form(&FormSubmission::new(
            FormKind::Contact,
            "Sam".into(),
            "sam@example.com".into(),
            "Hello".into(),
        ));
    }
}
