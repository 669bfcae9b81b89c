use wiremock::{
    Mock, ResponseTemplate,
    matchers::{any, method, path},
};

use crate::helpers::spawn_app;

fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "email": "ursula_le_guin@gmail.com",
        "subscriptions": [
            {"name": "Netflix", "price": 15.49, "billing": "monthly"},
            {"name": "Amazon Prime", "price": 139.0, "billing": "yearly", "renewal_date": "2024-06-12"}
        ],
        "monthly_total": 27.07,
        "yearly_total": 324.88
    })
}

#[tokio::test]
async fn submit_returns_200_and_success_for_a_valid_audit() {
    let app = spawn_app().await;

    Mock::given(path("/rest/v1/audit_signups"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.datastore_server)
        .await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_submission(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"success": true}));
}

#[tokio::test]
async fn submit_succeeds_even_if_the_datastore_is_down() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.datastore_server)
        .await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_submission(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn submit_returns_400_when_required_fields_are_missing() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.datastore_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (
            serde_json::json!({
                "subscriptions": [{"name": "Netflix", "price": 15.49, "billing": "monthly"}],
                "monthly_total": 15.49,
                "yearly_total": 185.88
            }),
            "missing the email",
        ),
        (
            serde_json::json!({
                "email": "",
                "subscriptions": [{"name": "Netflix", "price": 15.49, "billing": "monthly"}],
                "monthly_total": 15.49,
                "yearly_total": 185.88
            }),
            "empty email",
        ),
        (
            serde_json::json!({
                "email": "definitely-not-an-email",
                "subscriptions": [{"name": "Netflix", "price": 15.49, "billing": "monthly"}],
                "monthly_total": 15.49,
                "yearly_total": 185.88
            }),
            "invalid email",
        ),
        (
            serde_json::json!({
                "email": "ursula_le_guin@gmail.com",
                "subscriptions": [],
                "monthly_total": 0.0,
                "yearly_total": 0.0
            }),
            "empty subscriptions",
        ),
        (
            serde_json::json!({"email": "ursula_le_guin@gmail.com"}),
            "missing subscriptions",
        ),
    ];

    for (body, description) in test_cases {
        let response = app.post_submission(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Email and subscriptions required");
    }
}

#[tokio::test]
async fn submit_rejects_a_malformed_json_body() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(format!("{}/submit", &app.address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn submit_answers_preflight_with_cors_headers_and_no_body() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/submit", &app.address),
        )
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    let headers = response.headers().clone();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert_eq!(response.text().await.unwrap(), "");
}

#[tokio::test]
async fn submit_responses_carry_cors_headers() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .mount(&app.datastore_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let response = app.post_submission(&valid_body()).await;

    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn submit_returns_405_for_disallowed_methods() {
    let app = spawn_app().await;

    for send in [
        app.api_client.get(format!("{}/submit", &app.address)),
        app.api_client.put(format!("{}/submit", &app.address)),
        app.api_client.delete(format!("{}/submit", &app.address)),
    ] {
        let response = send.send().await.expect("Failed to execute request.");

        assert_eq!(405, response.status().as_u16());
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn submit_returns_500_when_the_mailer_rejects_the_send() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .mount(&app.datastore_server)
        .await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_submission(&valid_body()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to send email");
}

#[tokio::test]
async fn mailer_error_details_are_surfaced_to_the_caller() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .mount(&app.datastore_server)
        .await;
    let provider_error = serde_json::json!({
        "name": "validation_error",
        "message": "The to address is not valid."
    });
    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(422).set_body_json(provider_error.clone()))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_submission(&valid_body()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to send email");
    assert_eq!(body["details"], provider_error);
}

#[tokio::test]
async fn each_submission_persists_a_fresh_unsubscribe_token() {
    let app = spawn_app().await;

    Mock::given(path("/rest/v1/audit_signups"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&app.datastore_server)
        .await;
    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    app.post_submission(&valid_body()).await;
    app.post_submission(&valid_body()).await;

    let requests = app.datastore_server.received_requests().await.unwrap();
    let tokens: Vec<String> = requests
        .iter()
        .filter(|r| r.url.path() == "/rest/v1/audit_signups")
        .map(|r| {
            let record: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            assert!(record["prices_last_verified"].is_string());
            record["unsubscribe_token"].as_str().unwrap().to_string()
        })
        .collect();

    assert_eq!(tokens.len(), 2);
    assert_ne!(tokens[0], tokens[1]);
}

#[tokio::test]
async fn the_sent_email_lists_subscriptions_by_monthly_spend() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .mount(&app.datastore_server)
        .await;
    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = serde_json::json!({
        "email": "ursula_le_guin@gmail.com",
        "subscriptions": [
            {"name": "Hulu", "price": 5.0, "billing": "monthly"},
            {"name": "Adobe Creative Cloud", "price": 240.0, "billing": "yearly"},
            {"name": "Spotify", "price": 10.0, "billing": "monthly"}
        ],
        "monthly_total": 35.0,
        "yearly_total": 420.0
    });
    app.post_submission(&body).await;

    let request = &app.email_server.received_requests().await.unwrap()[0];
    let sent: serde_json::Value = serde_json::from_slice(&request.body).unwrap();

    assert_eq!(sent["to"], "ursula_le_guin@gmail.com");
    assert_eq!(sent["subject"], "Your subscriptions: $35.00/mo");

    let html = sent["html"].as_str().unwrap();
    let adobe = html.find("Adobe Creative Cloud").unwrap();
    let spotify = html.find("Spotify").unwrap();
    let hulu = html.find("Hulu").unwrap();
    assert!(adobe < spotify);
    assert!(spotify < hulu);
}

#[tokio::test]
async fn the_sent_email_includes_cancellation_guidance() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .mount(&app.datastore_server)
        .await;
    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = serde_json::json!({
        "email": "ursula_le_guin@gmail.com",
        "subscriptions": [
            {"name": "Netflix", "price": 15.49, "billing": "monthly"},
            {"name": "Unknown Service XYZ", "price": 4.99, "billing": "monthly"}
        ],
        "monthly_total": 20.48,
        "yearly_total": 245.76
    });
    app.post_submission(&body).await;

    let request = &app.email_server.received_requests().await.unwrap()[0];
    let sent: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    let html = sent["html"].as_str().unwrap();

    assert!(html.contains("Cancel Membership"));
    assert!(html.contains("Check account settings"));
}

#[tokio::test]
async fn price_corrections_are_forwarded_as_one_batch() {
    let app = spawn_app().await;

    Mock::given(path("/rest/v1/audit_signups"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.datastore_server)
        .await;
    Mock::given(path("/rest/v1/price_corrections"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.datastore_server)
        .await;
    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let mut body = valid_body();
    body["currency"] = serde_json::json!("EUR");
    body["currency_symbol"] = serde_json::json!("€");
    body["price_corrections"] = serde_json::json!([
        {"service_name": "Netflix", "original_price": 15.49, "corrected_price": 17.99},
        {"service_name": "Spotify", "original_price": 9.99, "corrected_price": 11.99}
    ]);

    let response = app.post_submission(&body).await;
    assert_eq!(200, response.status().as_u16());

    let requests = app.datastore_server.received_requests().await.unwrap();
    let correction_request = requests
        .iter()
        .find(|r| r.url.path() == "/rest/v1/price_corrections")
        .unwrap();
    let rows: serde_json::Value = serde_json::from_slice(&correction_request.body).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["currency"], "EUR");
}

#[tokio::test]
async fn a_price_correction_failure_does_not_affect_the_response() {
    let app = spawn_app().await;

    Mock::given(path("/rest/v1/price_corrections"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.datastore_server)
        .await;
    Mock::given(path("/rest/v1/audit_signups"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.datastore_server)
        .await;
    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let mut body = valid_body();
    body["price_corrections"] = serde_json::json!([
        {"service_name": "Netflix", "original_price": 15.49, "corrected_price": 17.99}
    ]);

    let response = app.post_submission(&body).await;

    assert_eq!(200, response.status().as_u16());
}
