use crate::{
    domain::{admission::client::ClientIdentity, lead::ports::LeadService},
    inbound::http::{errors::MessageBody, AppError, SharedLeadState},
};
use actix_web::{web, HttpRequest, HttpResponse};

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// The body is taken raw so that admission is decided before it is parsed.
#[tracing::instrument(
    name = "Relay a contact form submission",
    skip(body, request, state),
    fields(client = tracing::field::Empty)
)]
pub async fn send_email<LS: LeadService>(
    body: web::Bytes,
    request: HttpRequest,
    state: web::Data<SharedLeadState<LS>>,
) -> Result<HttpResponse, AppError> {
    let client = client_identity(&request, state.trust_forwarded_for());
    tracing::Span::current().record("client", tracing::field::display(&client));

    state.lead_service().submit(&body, &client).await?;

    Ok(HttpResponse::Ok().json(MessageBody {
        message: "Email successfully sent",
    }))
}

fn client_identity(request: &HttpRequest, trust_forwarded_for: bool) -> ClientIdentity {
    if trust_forwarded_for {
        let forwarded = request
            .headers()
            .get_all(X_FORWARDED_FOR)
            .last()
            .and_then(|value| value.to_str().ok())
            .and_then(ClientIdentity::from_forwarded_for);
        if let Some(client) = forwarded {
            return client;
        }
    }
    request
        .peer_addr()
        .map(|address| ClientIdentity::from(address.ip()))
        .unwrap_or_else(ClientIdentity::unknown)
}
