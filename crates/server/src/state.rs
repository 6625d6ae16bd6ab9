use std::sync::Arc;

use configs::AuthConfig;
use sea_orm::DatabaseConnection;
use service::integrations::Integrations;
use service::ordering::{repo::seaorm::SeaOrmOrderRepository, OrderService};
use service::registration::{repo::seaorm::SeaOrmUserRepository, RegistrationService};

pub type Registration = RegistrationService<SeaOrmUserRepository>;
pub type Ordering = OrderService<SeaOrmOrderRepository>;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub keys: Arc<AuthConfig>,
    pub registration: Arc<Registration>,
    pub ordering: Arc<Ordering>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, keys: AuthConfig, integrations: Integrations) -> Self {
        let registration = RegistrationService::new(
            Arc::new(SeaOrmUserRepository::new(db.clone())),
            integrations.sms.clone(),
        );
        let ordering = OrderService::new(
            Arc::new(SeaOrmOrderRepository::new(db.clone())),
            integrations.payment.clone(),
            integrations.notifier.clone(),
        );
        Self { db, keys: Arc::new(keys), registration: Arc::new(registration), ordering: Arc::new(ordering) }
    }
}
