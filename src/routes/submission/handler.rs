use actix_web::{HttpResponse, web};
use anyhow::Context;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{errors::SubmissionError, types::SubmissionPayload};
use crate::{
    datastore::{AuditRecord, DatastoreClient},
    domain::{AuditSubmission, UnsubscribeToken},
    email_client::EmailClient,
    render::{render_audit_email, subject_line},
};

#[tracing::instrument(
    name = "Processing an audit submission",
    skip(payload, datastore, email_client),
    fields(
        request_id = %Uuid::new_v4(),
        recipient_email = %payload.email,
        subscription_count = payload.subscriptions.len()
    )
)]
pub async fn submit_audit(
    payload: web::Json<SubmissionPayload>,
    datastore: web::Data<DatastoreClient>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, SubmissionError> {
    let submission: AuditSubmission = payload
        .into_inner()
        .try_into()
        .map_err(SubmissionError::ValidationError)?;

    // One instant serves both the persisted record and the rendered
    // "prices verified on" date.
    let captured_at = Utc::now();

    log_price_corrections(&datastore, &submission).await;
    persist_audit(&datastore, &submission, captured_at).await;

    let html = render_audit_email(&submission, captured_at)
        .context("Failed to render the audit summary email.")?;
    let subject = subject_line(&submission.currency_symbol, submission.monthly_total);

    email_client
        .send_email(&submission.recipient, &subject, &html)
        .await
        .map_err(SubmissionError::DispatchError)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

/// Crowdsourced correction telemetry: best-effort, never blocks the flow.
#[tracing::instrument(name = "Logging price corrections", skip(datastore, submission))]
async fn log_price_corrections(datastore: &DatastoreClient, submission: &AuditSubmission) {
    if submission.price_corrections.is_empty() {
        return;
    }

    if let Err(e) = datastore
        .insert_price_corrections(&submission.price_corrections, &submission.currency)
        .await
    {
        tracing::warn!(
            error.cause_chain = ?e,
            error.message = %e,
            "Failed to log price corrections"
        );
    }
}

/// A write failure is logged and swallowed; the email is still attempted.
#[tracing::instrument(name = "Persisting audit record", skip(datastore, submission, captured_at))]
async fn persist_audit(
    datastore: &DatastoreClient,
    submission: &AuditSubmission,
    captured_at: DateTime<Utc>,
) {
    let unsubscribe_token = UnsubscribeToken::new();
    let record = AuditRecord {
        email: submission.recipient.as_ref(),
        subscriptions: &submission.subscriptions,
        monthly_total: submission.monthly_total,
        yearly_total: submission.yearly_total,
        currency: &submission.currency,
        unsubscribe_token: &unsubscribe_token,
        prices_last_verified: captured_at,
    };

    if let Err(e) = datastore.insert_audit_signup(&record).await {
        tracing::warn!(
            error.cause_chain = ?e,
            error.message = %e,
            "Failed to persist the audit record"
        );
    }
}

pub async fn submit_preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(serde_json::json!({ "error": "Method not allowed" }))
}
