//! Order data and confirmation email rendering.

use askama::Template;
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;

use hydron_core::Email;

/// An order record as posted by the checkout flow.
///
/// Exists only for the duration of one request; nothing is persisted. Absent
/// fields deserialize to their defaults and are caught by [`OrderData::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderData {
    pub customer_name: String,
    pub customer_email: String,
    pub package_name: String,
    pub price: Decimal,
    pub currency_symbol: String,
    pub region: String,
    pub hosting_monthly_price: Decimal,
    pub hosting_included_months: u32,
}

/// Validation error for an order record.
#[derive(Debug, thiserror::Error)]
#[error("Missing required fields")]
pub struct MissingFields;

impl OrderData {
    /// Check that the fields the emails cannot be written without are
    /// present: customer name, customer email, and package name.
    ///
    /// # Errors
    ///
    /// Returns [`MissingFields`] when any of the three is empty.
    pub fn validate(&self) -> Result<(), MissingFields> {
        let required = [
            &self.customer_name,
            &self.customer_email,
            &self.package_name,
        ];

        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(MissingFields);
        }

        Ok(())
    }
}

/// Date the hosting subscription starts renewing: the order date plus the
/// included months. Clamped month-ends are fine, an approximate date is all
/// the email promises.
#[must_use]
pub fn renewal_date(today: NaiveDate, included_months: u32) -> NaiveDate {
    today
        .checked_add_months(Months::new(included_months))
        .unwrap_or(today)
}

/// Subject line for the customer confirmation; the business copy gets a
/// `New Order: ` prefix on top.
#[must_use]
pub fn confirmation_subject(package_name: &str) -> String {
    format!("Order Confirmation - {package_name} - Hydron Marketing")
}

/// The confirmation document, shared by the customer and business sends.
#[derive(Template)]
#[template(path = "order_confirmation.html")]
pub struct OrderConfirmationEmail {
    pub customer_name: String,
    pub customer_email: String,
    pub package_name: String,
    pub total: String,
    pub hosting_monthly: String,
    pub hosting_months: u32,
    pub renewal_date: String,
    pub business_email: String,
}

impl OrderConfirmationEmail {
    /// Assemble the template fields from an order.
    #[must_use]
    pub fn new(order: &OrderData, today: NaiveDate, business_email: &Email) -> Self {
        Self {
            customer_name: order.customer_name.trim().to_string(),
            customer_email: order.customer_email.trim().to_string(),
            package_name: order.package_name.trim().to_string(),
            total: format!("{}{:.2}", order.currency_symbol, order.price),
            hosting_monthly: format!("{}{}", order.currency_symbol, order.hosting_monthly_price),
            hosting_months: order.hosting_included_months,
            renewal_date: renewal_date(today, order.hosting_included_months)
                .format("%-d %B %Y")
                .to_string(),
            business_email: business_email.to_string(),
        }
    }
}
