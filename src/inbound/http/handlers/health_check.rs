use crate::{domain::lead::ports::LeadService, inbound::http::SharedLeadState};
use actix_web::{web, HttpResponse};

/// Reports 503 once submissions have been suspended.
pub async fn health_check<LS: LeadService>(
    state: web::Data<SharedLeadState<LS>>,
) -> HttpResponse {
    if state.lead_service().is_accepting() {
        HttpResponse::Ok().finish()
    } else {
        HttpResponse::ServiceUnavailable().finish()
    }
}
