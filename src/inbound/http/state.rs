use crate::domain::auth::credentials::AdminCredentials;
use crate::domain::lead::ports::LeadService;
use std::sync::Arc;

pub struct LeadState<LS: LeadService> {
    lead_service: LS,
    trust_forwarded_for: bool,
}

pub struct SharedLeadState<LS: LeadService>(Arc<LeadState<LS>>);

impl<LS: LeadService> Clone for SharedLeadState<LS> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<LS: LeadService> SharedLeadState<LS> {
    pub fn new(lead_service: LS, trust_forwarded_for: bool) -> Self {
        Self(Arc::new(LeadState {
            lead_service,
            trust_forwarded_for,
        }))
    }

    pub fn lead_service(&self) -> &LS {
        &self.0.lead_service
    }

    pub fn trust_forwarded_for(&self) -> bool {
        self.0.trust_forwarded_for
    }
}

#[derive(Clone)]
pub struct SharedAdminState(Arc<AdminCredentials>);

impl SharedAdminState {
    pub fn new(credentials: AdminCredentials) -> Self {
        Self(Arc::new(credentials))
    }

    pub fn credentials(&self) -> &AdminCredentials {
        &self.0
    }
}
