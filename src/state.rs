use std::sync::Arc;
use crate::domain::ports::{AdminRepository, BookingRepository, CustomerRepository};
use crate::domain::services::token_service::TokenService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub admin_repo: Arc<dyn AdminRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub token_service: Arc<TokenService>,
}
