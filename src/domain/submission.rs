use super::{RecipientEmail, SubscriptionEntry};

/// A validated audit submission, ready for persistence and rendering.
/// Totals are caller-supplied aggregates and are not recomputed here.
pub struct AuditSubmission {
    pub recipient: RecipientEmail,
    pub subscriptions: Vec<SubscriptionEntry>,
    pub monthly_total: f64,
    pub yearly_total: f64,
    pub currency: String,
    pub currency_symbol: String,
    pub price_corrections: Vec<PriceCorrection>,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct PriceCorrection {
    pub service_name: String,
    pub original_price: f64,
    pub corrected_price: f64,
}
