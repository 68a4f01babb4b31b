use std::env;

use lettre::message::{header, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::utils::error::{AppError, Result};

const DEFAULT_RELAY: &str = "smtp.gmail.com";
const DEFAULT_PORT: u16 = 587;

/// Mail-submission credentials, constructed once at startup and passed to
/// the notifier by reference. Keeping this an explicit struct (instead of
/// reading the environment ad hoc) lets tests inject fakes.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub relay: String,
    pub port: u16,
    pub sender: String,
    pub password: String,
    pub recipient: String,
}

impl SmtpConfig {
    /// Reads `SENDER_EMAIL`, `SENDER_PASSWORD` and `RECEIVER_EMAIL`.
    /// Returns `None` when any of them is absent, which disables the
    /// notifier without affecting the price checks.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            relay: DEFAULT_RELAY.to_string(),
            port: DEFAULT_PORT,
            sender: env::var("SENDER_EMAIL").ok()?,
            password: env::var("SENDER_PASSWORD").ok()?,
            recipient: env::var("RECEIVER_EMAIL").ok()?,
        })
    }
}

/// Best-effort price-drop alerts over SMTP STARTTLS. Send failures are
/// logged and never propagated to the pipeline.
pub struct EmailNotifier {
    config: Option<SmtpConfig>,
}

impl EmailNotifier {
    pub fn new(config: Option<SmtpConfig>) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    pub fn notify(&self, product_name: &str, price: f64, url: &str) {
        let Some(config) = &self.config else {
            tracing::warn!("email credentials missing, skipping alert");
            return;
        };

        match self.send(config, product_name, price, url) {
            Ok(()) => tracing::info!("alert sent for {}", product_name),
            Err(e) => tracing::error!("alert for {} failed: {}", product_name, e),
        }
    }

    fn send(&self, config: &SmtpConfig, product_name: &str, price: f64, url: &str) -> Result<()> {
        let email = Message::builder()
            .from(config.sender.parse().map_err(mail_err)?)
            .to(config.recipient.parse().map_err(mail_err)?)
            .subject(self.format_subject(product_name, price))
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(self.format_text_body(product_name, price, url)),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(self.format_html_body(product_name, price, url)),
                    ),
            )
            .map_err(mail_err)?;

        let credentials = Credentials::new(config.sender.clone(), config.password.clone());
        let mailer = SmtpTransport::starttls_relay(&config.relay)
            .map_err(mail_err)?
            .port(config.port)
            .credentials(credentials)
            .build();

        mailer.send(&email).map_err(mail_err)?;
        Ok(())
    }

    fn format_subject(&self, product_name: &str, price: f64) -> String {
        format!("📉 Price Drop: {} is ₹{}!", product_name, price)
    }

    fn format_html_body(&self, product_name: &str, price: f64, url: &str) -> String {
        format!(
            r#"<html>
  <body style="font-family: Arial, sans-serif;">
    <h2 style="color: #d32f2f;">📉 Price Drop Alert!</h2>
    <p>The price for <strong>{}</strong> has dropped to <strong>₹{}</strong>.</p>
    <p>This is below your target price.</p>
    <br>
    <a href="{}" style="background-color: #ff9900; color: black; padding: 10px 20px; text-decoration: none; border-radius: 5px; font-weight: bold;">
      View Product
    </a>
  </body>
</html>"#,
            product_name, price, url
        )
    }

    fn format_text_body(&self, product_name: &str, price: f64, url: &str) -> String {
        format!(
            "Price Drop Alert!\n\nThe price for {} has dropped to ₹{}.\nThis is below your target price.\n\nView product: {}\n",
            product_name, price, url
        )
    }
}

fn mail_err(e: impl std::fmt::Display) -> AppError {
    AppError::Mail(e.to_string())
}
