use once_cell::sync::Lazy;
use wiremock::MockServer;

use subaudit::{
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub datastore_server: MockServer,
    pub email_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_submission(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/submit", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let datastore_server = MockServer::start().await;
    let email_server = MockServer::start().await;

    let config = {
        let mut c = get_configuration().expect("Failed to read configuration");
        c.app.port = 0;
        c.datastore.base_url = datastore_server.uri();
        c.email_client.base_url = email_server.uri();
        c
    };

    let app = Application::build(config)
        .await
        .expect("Failed to build application.");
    let port = app.get_port();
    let _ = tokio::spawn(app.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        datastore_server,
        email_server,
        api_client: reqwest::Client::new(),
    }
}
