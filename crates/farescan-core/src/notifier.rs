//! Deal alert rendering and delivery.
//!
//! The pipeline renders one plain-text alert per run and hands it to a
//! `Notifier`. SMTP delivery lives in `farescan-mail`; the CLI also has a
//! console notifier for dry runs.

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::model::Itinerary;

/// Subject line of every alert.
pub const ALERT_SUBJECT: &str = "🔥 Cheap Flight Alert";

/// A rendered alert ready to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

impl AlertMessage {
    /// Render an alert for the given deals, or `None` when there are none.
    pub fn for_deals(deals: &[Itinerary]) -> Option<Self> {
        if deals.is_empty() {
            return None;
        }
        Some(Self {
            subject: ALERT_SUBJECT.to_string(),
            body: render_body(deals),
        })
    }
}

/// Delivers a rendered alert.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &AlertMessage) -> Result<(), NotifyError>;
}

/// Render a single deal block.
pub fn render_deal(deal: &Itinerary) -> String {
    format!(
        "{} -> {}\nDepart: {}\nReturn: {}\nPrice: {}",
        deal.origin,
        deal.destination,
        deal.depart.format("%Y-%m-%d"),
        deal.return_date.format("%Y-%m-%d"),
        format_price(deal),
    )
}

/// Render all deals, separated by blank lines, in the given order.
pub fn render_body(deals: &[Itinerary]) -> String {
    deals
        .iter()
        .map(render_deal)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_price(deal: &Itinerary) -> String {
    if deal.currency.eq_ignore_ascii_case("USD") {
        format!("${}", deal.price)
    } else {
        format!("{} {}", deal.price, deal.currency)
    }
}
