use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;
use tera::Tera;

use crate::cancellation::guide_for;
use crate::domain::{AuditSubmission, sorted_by_monthly_spend};

/// Cyclic legend palette; entry color = position modulo palette size.
const PALETTE: [&str; 10] = [
    "#f59e0b", "#ef4444", "#8b5cf6", "#3b82f6", "#10b981", "#ec4899", "#f97316", "#06b6d4",
    "#84cc16", "#6366f1",
];

static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template(
        "audit_summary_email.html",
        include_str!("../views/audit_summary_email.html"),
    )
    .expect("Failed to register the audit summary email template");
    tera
});

#[derive(Serialize)]
struct AuditEmailView {
    currency_symbol: String,
    monthly_total: String,
    yearly_total: String,
    prices_verified_on: String,
    rows: Vec<SubscriptionRowView>,
}

#[derive(Serialize)]
struct SubscriptionRowView {
    name: String,
    monthly_price: String,
    percent: u32,
    color: &'static str,
    renewal_date: Option<String>,
    guide: GuideView,
}

#[derive(Serialize)]
struct GuideView {
    method: &'static str,
    difficulty_label: &'static str,
    instructions: &'static str,
    phone: Option<&'static str>,
    url: Option<&'static str>,
}

/// Renders the summary email. Pure: everything the document depends on,
/// including the "prices verified on" date, comes in through the arguments.
pub fn render_audit_email(
    submission: &AuditSubmission,
    verified_on: DateTime<Utc>,
) -> Result<String, tera::Error> {
    let rows = sorted_by_monthly_spend(&submission.subscriptions)
        .into_iter()
        .enumerate()
        .map(|(position, entry)| {
            let guide = guide_for(&entry.name);
            SubscriptionRowView {
                monthly_price: format_money(entry.monthly_price()),
                percent: percent_of(entry.monthly_price(), submission.monthly_total),
                color: palette_color(position),
                renewal_date: entry.renewal_date.clone(),
                name: entry.name,
                guide: GuideView {
                    method: guide.method,
                    difficulty_label: guide.difficulty.label(),
                    instructions: guide.instructions,
                    phone: guide.phone,
                    url: guide.url,
                },
            }
        })
        .collect();

    let view = AuditEmailView {
        currency_symbol: submission.currency_symbol.clone(),
        monthly_total: format_money(submission.monthly_total),
        yearly_total: group_thousands(submission.yearly_total.round() as i64),
        prices_verified_on: verified_on.format("%B %-d, %Y").to_string(),
        rows,
    };

    let context = tera::Context::from_serialize(&view)?;
    TEMPLATES.render("audit_summary_email.html", &context)
}

pub fn subject_line(currency_symbol: &str, monthly_total: f64) -> String {
    format!(
        "Your subscriptions: {currency_symbol}{}/mo",
        format_money(monthly_total)
    )
}

fn palette_color(position: usize) -> &'static str {
    PALETTE[position % PALETTE.len()]
}

fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

/// Integer share of the monthly total. A zero or negative total renders
/// every entry as 0; NaN and Infinity never reach the template.
fn percent_of(part: f64, whole: f64) -> u32 {
    if whole > 0.0 {
        (part / whole * 100.0).round() as u32
    } else {
        0
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
