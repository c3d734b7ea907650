//! Order submission handler.
//!
//! Validates a client-supplied order payload, short-circuiting on the
//! first failure, then accepts the order and dispatches the operator
//! notification. Dispatch failure is reported as metadata only; the
//! buyer's order stands either way and the operator confirms payment by
//! phone.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use stockroom_core::{Email, Order, OrderForm, OrderId, Phone};
use thiserror::Error;
use tracing::instrument;

use crate::state::AppState;

/// Why a submission was rejected. Each variant's message is surfaced to
/// the buyer as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderRejection {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid email address format")]
    InvalidEmail,
    #[error("Invalid phone number format")]
    InvalidPhone,
    #[error("Order must contain at least one item")]
    EmptyOrder,
}

/// Order submission response body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_email_sent: Option<bool>,
}

impl OrderResponse {
    fn rejected(message: String) -> Self {
        Self {
            success: false,
            message,
            order_id: None,
            admin_email_sent: None,
        }
    }
}

/// Validate a candidate order form, short-circuiting on the first
/// failure.
fn validate(form: &OrderForm) -> Result<(), OrderRejection> {
    for (value, field) in [
        (&form.name, "Name"),
        (&form.email, "Email"),
        (&form.phone, "Phone"),
        (&form.address, "Address"),
    ] {
        if value.trim().is_empty() {
            return Err(OrderRejection::MissingField(field));
        }
    }

    Email::parse(form.email.trim()).map_err(|_| OrderRejection::InvalidEmail)?;
    Phone::parse(form.phone.trim()).map_err(|_| OrderRejection::InvalidPhone)?;

    if form.items.is_empty() {
        return Err(OrderRejection::EmptyOrder);
    }

    Ok(())
}

/// Render the plain-text order summary attached to the notification.
fn render_summary(order: &Order) -> String {
    let mut lines = String::new();
    for line in &order.form.items {
        lines.push_str(&format!(
            "- {} x {} = {:.2}\n",
            line.product.name,
            line.quantity,
            line.line_total()
        ));
    }
    format!(
        "New Order Received:\n\n\
         Order ID: {id}\n\n\
         Customer Information:\n\
         - Name: {name}\n\
         - Email: {email}\n\
         - Phone: {phone}\n\
         - Address: {address}\n\n\
         Order Details:\n{lines}\n\
         Total Amount: {total:.2}\n\
         Total Items: {count}\n\n\
         ---\n\
         This order was submitted on {submitted}\n\
         Please call the customer at {phone} to confirm payment.\n",
        id = order.id,
        name = order.form.name,
        email = order.form.email,
        phone = order.form.phone,
        address = order.form.address,
        lines = lines,
        total = order.form.total,
        count = order.form.item_count(),
        submitted = order.submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

/// Submit an order.
///
/// The body is an untyped JSON payload; a malformed shape is a 400 like
/// any other validation failure, not a transport-level error.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let form: OrderForm = match serde_json::from_value(payload) {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!(error = %e, "undecodable order payload");
            return (
                StatusCode::BAD_REQUEST,
                Json(OrderResponse::rejected("Invalid order payload".to_owned())),
            )
                .into_response();
        }
    };

    if let Err(rejection) = validate(&form) {
        tracing::info!(%rejection, "order submission rejected");
        return (
            StatusCode::BAD_REQUEST,
            Json(OrderResponse::rejected(rejection.to_string())),
        )
            .into_response();
    }

    let order = Order::accept(form);
    let summary = render_summary(&order);
    tracing::info!(order_id = %order.id, total = %order.form.total, "order accepted");

    let outcome = state.notifier().dispatch(&order, &summary).await;

    // The cart's lifecycle ends with a successful submission.
    state.cart().clear();

    (
        StatusCode::OK,
        Json(OrderResponse {
            success: true,
            message: "Order submitted successfully".to_owned(),
            order_id: Some(order.id),
            admin_email_sent: Some(outcome.sent),
        }),
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use stockroom_core::{CartLine, Product, ProductId};

    fn valid_form() -> OrderForm {
        OrderForm {
            name: "Ama Mensah".to_owned(),
            email: "buyer@example.com".to_owned(),
            phone: "0241234567".to_owned(),
            address: "12 Ring Road, Accra".to_owned(),
            items: vec![CartLine {
                product: Product {
                    id: ProductId::new("1"),
                    name: "Digital Thermometer".to_owned(),
                    price: Decimal::new(2599, 2),
                    image: String::new(),
                    category: "medical".to_owned(),
                    description: String::new(),
                    in_stock: true,
                },
                quantity: 2,
            }],
            total: Decimal::new(5198, 2),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert_eq!(validate(&valid_form()), Ok(()));
    }

    #[test]
    fn test_missing_fields_rejected_in_order() {
        let mut form = valid_form();
        form.name = "  ".to_owned();
        assert_eq!(validate(&form), Err(OrderRejection::MissingField("Name")));

        let mut form = valid_form();
        form.email = String::new();
        assert_eq!(validate(&form), Err(OrderRejection::MissingField("Email")));

        let mut form = valid_form();
        form.phone = String::new();
        assert_eq!(validate(&form), Err(OrderRejection::MissingField("Phone")));

        let mut form = valid_form();
        form.address = String::new();
        assert_eq!(
            validate(&form),
            Err(OrderRejection::MissingField("Address"))
        );
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut form = valid_form();
        form.email = "not-an-email".to_owned();
        assert_eq!(validate(&form), Err(OrderRejection::InvalidEmail));
    }

    #[test]
    fn test_invalid_phone_rejected() {
        let mut form = valid_form();
        form.phone = "123".to_owned();
        assert_eq!(validate(&form), Err(OrderRejection::InvalidPhone));
    }

    #[test]
    fn test_empty_order_rejected_despite_valid_fields() {
        let mut form = valid_form();
        form.items.clear();
        assert_eq!(validate(&form), Err(OrderRejection::EmptyOrder));
    }

    #[test]
    fn test_email_checked_before_items() {
        // Short-circuit order: a bad email wins over an empty cart.
        let mut form = valid_form();
        form.email = "not-an-email".to_owned();
        form.items.clear();
        assert_eq!(validate(&form), Err(OrderRejection::InvalidEmail));
    }

    #[test]
    fn test_summary_contains_order_details() {
        let order = Order::accept(valid_form());
        let summary = render_summary(&order);

        assert!(summary.contains(order.id.as_str()));
        assert!(summary.contains("- Digital Thermometer x 2 = 51.98"));
        assert!(summary.contains("Total Amount: 51.98"));
        assert!(summary.contains("Total Items: 2"));
        assert!(summary.contains("call the customer at 0241234567"));
    }
}
