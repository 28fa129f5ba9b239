use crate::configuration::ApplicationSettings;
use crate::domain::auth::credentials::AdminCredentials;
use crate::domain::lead::ports::LeadService;
use crate::inbound::http::handlers::{health_check, home, send_email, suspend};
use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

mod auth;
mod errors;
mod handlers;
pub mod state;

pub use errors::AppError;
pub use state::{SharedAdminState, SharedLeadState};

const MAX_PAYLOAD_BYTES: usize = 64 * 1024;

pub struct Application {
    port: u16,
    server: Server,
}

fn cors(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

fn run<LS: LeadService>(
    listener: TcpListener,
    allowed_origin: String,
    lead_state: SharedLeadState<LS>,
    admin_state: SharedAdminState,
) -> Result<Server, std::io::Error> {
    let lead_state = web::Data::new(lead_state);
    let admin_state = web::Data::new(admin_state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origin))
            .wrap(TracingLogger::default())
            .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
            .route("/", web::get().to(home))
            .app_data(lead_state.clone())
            .route("/health_check", web::get().to(health_check::<LS>))
            .route("/send-email", web::post().to(send_email::<LS>))
            .app_data(admin_state.clone())
            .route("/admin/suspend", web::post().to(suspend::<LS>))
    })
    .listen(listener)?
    .run();

    Ok(server)
}

impl Application {
    pub async fn build<LS: LeadService>(
        lead_service: LS,
        configuration: ApplicationSettings,
    ) -> Result<Self, std::io::Error> {
        let address = format!("{}:{}", configuration.host, configuration.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let lead_state = SharedLeadState::new(lead_service, configuration.trust_forwarded_for);
        let admin_state = SharedAdminState::new(AdminCredentials::new(
            configuration.admin_username,
            configuration.admin_password_hash,
        ));
        if !admin_state.credentials().is_enabled() {
            tracing::warn!("No admin password hash configured, administrative routes are disabled");
        }

        let server = run(
            listener,
            configuration.allowed_origin,
            lead_state,
            admin_state,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
