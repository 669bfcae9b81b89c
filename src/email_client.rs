use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::RecipientEmail;

#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    base_url: Url,
    sender_name: String,
    sender: RecipientEmail,
    auth_token: SecretString,
}

#[derive(thiserror::Error, Debug)]
pub enum SendEmailError {
    #[error("Failed to reach the email provider.")]
    Request(#[from] reqwest::Error),
    #[error("The email provider rejected the send request.")]
    Provider {
        status: StatusCode,
        detail: serde_json::Value,
    },
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender_name: String,
        sender: RecipientEmail,
        auth_token: SecretString,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client: Client::builder().timeout(timeout).build().unwrap(),
            base_url: Url::parse(&base_url).expect("Failed parsing base email api url."),
            sender_name,
            sender,
            auth_token,
        }
    }

    pub async fn send_email(
        &self,
        recipient: &RecipientEmail,
        subject: &str,
        html_content: &str,
    ) -> Result<(), SendEmailError> {
        let url = self
            .base_url
            .join("emails")
            .expect("Failed joining route to email api url.");

        let from = format!("{} <{}>", self.sender_name, self.sender.as_ref());
        let body = SendEmailRequest {
            from: &from,
            to: recipient.as_ref(),
            subject,
            html: html_content,
        };

        let response = self
            .http_client
            .post(url)
            .header(
                "Authorization",
                "Bearer ".to_owned() + self.auth_token.expose_secret(),
            )
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<serde_json::Value>()
                .await
                .unwrap_or(serde_json::Value::Null);
            return Err(SendEmailError::Provider { status, detail });
        }

        Ok(())
    }
}
