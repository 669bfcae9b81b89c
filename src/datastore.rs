use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::{PriceCorrection, SubscriptionEntry, UnsubscribeToken};

/// REST row-store client. Rows are appended through per-table write
/// endpoints; the store acknowledges with an empty 2xx body.
#[derive(Clone)]
pub struct DatastoreClient {
    http_client: Client,
    base_url: Url,
    api_key: SecretString,
}

#[derive(Serialize)]
pub struct AuditRecord<'a> {
    pub email: &'a str,
    pub subscriptions: &'a [SubscriptionEntry],
    pub monthly_total: f64,
    pub yearly_total: f64,
    pub currency: &'a str,
    pub unsubscribe_token: &'a UnsubscribeToken,
    pub prices_last_verified: DateTime<Utc>,
}

#[derive(Serialize)]
struct PriceCorrectionRow<'a> {
    service_name: &'a str,
    original_price: f64,
    corrected_price: f64,
    currency: &'a str,
}

impl DatastoreClient {
    pub fn new(base_url: String, api_key: SecretString, timeout: Duration) -> Self {
        Self {
            http_client: Client::builder().timeout(timeout).build().unwrap(),
            base_url: Url::parse(&base_url).expect("Failed parsing base datastore url."),
            api_key,
        }
    }

    pub async fn insert_audit_signup(
        &self,
        record: &AuditRecord<'_>,
    ) -> Result<(), reqwest::Error> {
        self.insert("rest/v1/audit_signups", record).await
    }

    /// Batched insert: one request for the whole correction set, each row
    /// stamped with the submission's currency.
    pub async fn insert_price_corrections(
        &self,
        corrections: &[PriceCorrection],
        currency: &str,
    ) -> Result<(), reqwest::Error> {
        let rows: Vec<PriceCorrectionRow<'_>> = corrections
            .iter()
            .map(|c| PriceCorrectionRow {
                service_name: &c.service_name,
                original_price: c.original_price,
                corrected_price: c.corrected_price,
                currency,
            })
            .collect();

        self.insert("rest/v1/price_corrections", &rows).await
    }

    async fn insert<B: Serialize + ?Sized>(
        &self,
        table_route: &str,
        body: &B,
    ) -> Result<(), reqwest::Error> {
        let url = self
            .base_url
            .join(table_route)
            .expect("Failed joining table route to datastore url.");

        self.http_client
            .post(url)
            .header("apikey", self.api_key.expose_secret())
            .header(
                "Authorization",
                "Bearer ".to_owned() + self.api_key.expose_secret(),
            )
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
