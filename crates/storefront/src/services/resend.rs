//! Resend API client for order notifications.
//!
//! Sends the operator a best-effort email for each accepted order. A
//! failed or timed-out dispatch is recorded in the response metadata but
//! never fails the order itself; the operator's phone follow-up is the
//! actual source of truth for confirmation.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use stockroom_core::{Email, Order};
use thiserror::Error;

/// Resend API base URL.
const BASE_URL: &str = "https://api.resend.com";

/// Errors that can occur when dispatching a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Client could not be constructed.
    #[error("Client error: {0}")]
    Client(String),
}

/// Result of a dispatch attempt, reported back as response metadata.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub sent: bool,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Resend API client.
#[derive(Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    base_url: String,
    admin_email: Email,
    store_name: String,
}

impl ResendClient {
    /// Create a new Resend API client.
    ///
    /// The `timeout` bounds every dispatch request so a hung provider
    /// cannot hang order submission.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(
        api_key: &SecretString,
        admin_email: Email,
        store_name: String,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", api_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| NotifyError::Client(format!("Invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert("Authorization", auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_owned(),
            admin_email,
            store_name,
        })
    }

    /// Override the API endpoint. Used by tests to simulate provider
    /// failures.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send the order notification email to the operator.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, times out, or the API rejects
    /// it.
    pub async fn send_order(&self, order: &Order) -> Result<String, NotifyError> {
        let url = format!("{}/emails", self.base_url);
        let body = serde_json::json!({
            "from": format!("{} <onboarding@resend.dev>", self.store_name),
            "to": [self.admin_email.as_str()],
            "subject": format!("New Order from {}", order.form.name),
            "html": render_order_html(order),
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let sent: SendResponse = response.json().await?;
        Ok(sent.id)
    }
}

/// Render the HTML body of the operator notification.
fn render_order_html(order: &Order) -> String {
    let mut rows = String::new();
    for line in &order.form.items {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>${:.2}</td></tr>",
            line.product.name,
            line.quantity,
            line.line_total()
        ));
    }
    format!(
        "<h1>Order ID - {id}</h1>\
         <p>{submitted}</p>\
         <h2>Customer Information</h2>\
         <p><strong>Name:</strong> {name}<br>\
         <strong>Email:</strong> {email}<br>\
         <strong>Phone:</strong> {phone}<br>\
         <strong>Address:</strong> {address}</p>\
         <h2>Order Details</h2>\
         <table><thead><tr><th>Product</th><th>Quantity</th><th>Price</th></tr></thead>\
         <tbody>{rows}</tbody></table>\
         <p><strong>Total: ${total:.2}</strong></p>",
        id = order.id,
        submitted = order.submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
        name = order.form.name,
        email = order.form.email,
        phone = order.form.phone,
        address = order.form.address,
        rows = rows,
        total = order.form.total,
    )
}

/// Order notification dispatcher.
///
/// `LogOnly` stands in when no API key is configured: the order summary
/// is logged and the outcome reports the email as not sent, without
/// affecting order acceptance.
pub enum Notifier {
    Resend(ResendClient),
    LogOnly,
}

impl Notifier {
    /// Dispatch an order notification, absorbing all failures into the
    /// returned outcome.
    pub async fn dispatch(&self, order: &Order, summary: &str) -> DispatchOutcome {
        match self {
            Self::Resend(client) => match client.send_order(order).await {
                Ok(message_id) => {
                    tracing::info!(order_id = %order.id, message_id, "admin email sent");
                    DispatchOutcome {
                        sent: true,
                        message_id: Some(message_id),
                        error: None,
                    }
                }
                Err(e) => {
                    tracing::error!(order_id = %order.id, error = %e, "failed to send admin email");
                    DispatchOutcome {
                        sent: false,
                        message_id: None,
                        error: Some(e.to_string()),
                    }
                }
            },
            Self::LogOnly => {
                tracing::info!(order_id = %order.id, %summary, "order notification (delivery not configured)");
                DispatchOutcome {
                    sent: false,
                    message_id: None,
                    error: Some("email delivery not configured".to_owned()),
                }
            }
        }
    }
}
