mod recipient_email;
mod submission;
mod subscription;
mod unsubscribe_token;

pub use recipient_email::RecipientEmail;
pub use submission::{AuditSubmission, PriceCorrection};
pub use subscription::{BillingCycle, SubscriptionEntry, sorted_by_monthly_spend};
pub use unsubscribe_token::UnsubscribeToken;
