use crate::{
    domain::lead::ports::LeadService,
    inbound::http::{
        auth::basic_authentication, errors::MessageBody, AppError, SharedAdminState,
        SharedLeadState,
    },
};
use actix_web::{web, HttpRequest, HttpResponse};

#[tracing::instrument(
    name = "Suspend submissions",
    skip(request, admin_state, lead_state),
    fields(username = tracing::field::Empty)
)]
pub async fn suspend<LS: LeadService>(
    request: HttpRequest,
    admin_state: web::Data<SharedAdminState>,
    lead_state: web::Data<SharedLeadState<LS>>,
) -> Result<HttpResponse, AppError> {
    let credentials = basic_authentication(request.headers())?;
    tracing::Span::current().record("username", tracing::field::display(credentials.username()));
    admin_state.credentials().validate(credentials).await?;

    let message = if lead_state.lead_service().suspend() {
        "Submissions suspended until restart"
    } else {
        "Submissions were already suspended"
    };
    Ok(HttpResponse::Ok().json(MessageBody { message }))
}
