#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct SubscriptionEntry {
    pub name: String,
    pub price: f64,
    pub billing: BillingCycle,
    #[serde(default)]
    pub renewal_date: Option<String>,
}

impl SubscriptionEntry {
    pub fn monthly_price(&self) -> f64 {
        match self.billing {
            BillingCycle::Monthly => self.price,
            BillingCycle::Yearly => self.price / 12.0,
        }
    }
}

/// Entries ordered by normalized monthly cost, largest first. Ties keep
/// their submitted relative order.
pub fn sorted_by_monthly_spend(entries: &[SubscriptionEntry]) -> Vec<SubscriptionEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.monthly_price().total_cmp(&a.monthly_price()));
    sorted
}
