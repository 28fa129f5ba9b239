use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version};
use contact_relay::configuration::{get_configuration, Settings};
use contact_relay::domain::admission::rate_limiter::RateLimiter;
use contact_relay::domain::lead::service::LeadRelay;
use contact_relay::inbound::http::Application;
use contact_relay::outbound::notifier::email_client::EmailClient;
use contact_relay::outbound::telemetry::init_logger;
use contact_relay::outbound::verifier::HunterClient;
use once_cell::sync::Lazy;
use secrecy::Secret;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ALLOWED_ORIGIN: &str = "https://contact.example.com";

pub struct TestAdmin {
    pub username: String,
    pub password: String,
}

impl TestAdmin {
    fn generate() -> Self {
        Self {
            username: "operator".into(),
            password: "correct horse battery staple".into(),
        }
    }

    fn password_hash(&self) -> String {
        let salt = SaltString::generate(&mut rand::thread_rng());
        Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Params::new(15000, 2, 1, None).unwrap(),
        )
        .hash_password(self.password.as_bytes(), &salt)
        .unwrap()
        .to_string()
    }
}

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub verifier_server: MockServer,
    pub admin: TestAdmin,
    api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_send_email(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/send-email", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_send_email_raw(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/send-email", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_health_check(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/health_check", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_suspend(&self, username: &str, password: &str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/admin/suspend", &self.address))
            .basic_auth(username, Some(password))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn suspend_submissions(&self) {
        let response = self
            .post_suspend(&self.admin.username, &self.admin.password)
            .await;
        assert_eq!(response.status().as_u16(), 200);
    }

    /// Makes the verification service answer every lookup with `status`.
    pub async fn verifier_answers(&self, status: &str) {
        Mock::given(path("/v2/email-verifier"))
            .and(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "email": "someone@example.com", "status": status, "score": 80 },
                "meta": { "params": {} }
            })))
            .mount(&self.verifier_server)
            .await;
    }

    pub async fn dispatched_emails(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap())
            .collect()
    }
}

pub fn lead() -> serde_json::Value {
    serde_json::json!({
        "user_firstname": "Ursula",
        "user_lasttname": "Le Guin",
        "user_objectives": "Run a marathon",
        "user_email": "test@validdomain.com",
        "user_phonenumber": "+1 555 0100",
        "user_response": "Yes, twice a week",
        "user_plan": "Premium",
        "user_disponibility": "Weekday mornings",
        "user_found": "Instagram",
        "message": "Looking forward to it!",
    })
}

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        init_logger(&subscriber_name, &default_filter_level, std::io::stdout);
    } else {
        init_logger(&subscriber_name, &default_filter_level, std::io::sink);
    }
});

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Spawns the relay on a random port with both outbound services mocked.
/// `customise` runs last and may override any setting.
pub async fn spawn_app_with(customise: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;
    let verifier_server = MockServer::start().await;
    let admin = TestAdmin::generate();

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration");
        c.application.host = "127.0.0.1".into();
        c.application.port = 0;
        c.application.allowed_origin = ALLOWED_ORIGIN.into();
        c.application.trust_forwarded_for = false;
        c.application.admin_username = admin.username.clone();
        c.application.admin_password_hash = Secret::new(admin.password_hash());
        c.email_client.base_url = email_server.uri();
        c.email_client.timeout_milliseconds = 500;
        c.email_verifier.base_url = verifier_server.uri();
        c.email_verifier.timeout_milliseconds = 500;
        c.rate_limit.max_requests = 100;
        customise(&mut c);
        c
    };

    let email_client =
        Arc::new(EmailClient::new(configuration.email_client).expect("Invalid email client"));
    let verifier =
        Arc::new(HunterClient::new(configuration.email_verifier).expect("Invalid verifier"));
    let rate_limiter = RateLimiter::new(
        configuration.rate_limit.max_requests,
        configuration.rate_limit.window(),
    )
    .expect("Invalid rate limit");
    let lead_service = LeadRelay::new(verifier, email_client, rate_limiter);

    let application = Application::build(lead_service, configuration.application)
        .await
        .expect("Failed to build application");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", application_port),
        email_server,
        verifier_server,
        admin,
        api_client: reqwest::Client::new(),
    }
}
