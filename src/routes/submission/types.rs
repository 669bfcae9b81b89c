use crate::domain::{AuditSubmission, PriceCorrection, RecipientEmail, SubscriptionEntry};

fn default_currency() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

/// Raw wire shape. Required fields are defaulted; absence reaches
/// validation as emptiness rather than a deserialization error.
#[derive(serde::Deserialize)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionEntry>,
    #[serde(default)]
    pub monthly_total: f64,
    #[serde(default)]
    pub yearly_total: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub price_corrections: Vec<PriceCorrection>,
}

impl TryFrom<SubmissionPayload> for AuditSubmission {
    type Error = String;

    fn try_from(payload: SubmissionPayload) -> Result<Self, Self::Error> {
        if payload.subscriptions.is_empty() {
            return Err("subscriptions must not be empty".to_string());
        }
        let recipient = RecipientEmail::parse(payload.email)?;

        Ok(Self {
            recipient,
            subscriptions: payload.subscriptions,
            monthly_total: payload.monthly_total,
            yearly_total: payload.yearly_total,
            currency: payload.currency,
            currency_symbol: payload.currency_symbol,
            price_corrections: payload.price_corrections,
        })
    }
}
