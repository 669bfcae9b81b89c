use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::http::{Method, header};
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::datastore::DatastoreClient;
use crate::email_client::EmailClient;
use crate::routes::{health_check, method_not_allowed, submit_audit, submit_preflight};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let datastore_client = config.datastore.client();
        let email_client = config.email_client.client();

        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, datastore_client, email_client)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    datastore_client: DatastoreClient,
    email_client: EmailClient,
) -> Result<Server, anyhow::Error> {
    let datastore_client = web::Data::new(datastore_client);
    let email_client = web::Data::new(email_client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                // Every response on this resource carries the CORS headers,
                // error responses included.
                web::resource("/submit")
                    .wrap(
                        DefaultHeaders::new()
                            .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
                            .add((header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
                            .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")),
                    )
                    .route(web::post().to(submit_audit))
                    .route(web::method(Method::OPTIONS).to(submit_preflight))
                    .default_service(web::to(method_not_allowed)),
            )
            .app_data(datastore_client.clone())
            .app_data(email_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
