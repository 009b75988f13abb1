use std::sync::Arc;

use service::account::AccountService;
use service::auth::service::{AuthConfig, AuthService};
use service::booking::service::BookingService;
use service::catalog::service::CatalogService;
use service::category::CategoryService;
use service::dispute::DisputeService;
use service::messaging::service::MessagingService;
use service::review::ReviewService;
use service::storage::Store;

/// Shared handler state. Services are cheap views over the store and are
/// built per request.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn Store>,
    pub auth: AuthConfig,
}

impl ServerState {
    pub fn new(store: Arc<dyn Store>, auth: AuthConfig) -> Self { Self { store, auth } }

    pub fn auth_service(&self) -> AuthService<dyn Store> { AuthService::new(self.store.clone(), self.auth.clone()) }

    pub fn catalog(&self) -> CatalogService<dyn Store> { CatalogService::new(self.store.clone()) }

    pub fn bookings(&self) -> BookingService<dyn Store> { BookingService::new(self.store.clone()) }

    pub fn reviews(&self) -> ReviewService<dyn Store> { ReviewService::new(self.store.clone()) }

    pub fn messaging(&self) -> MessagingService<dyn Store> { MessagingService::new(self.store.clone()) }

    pub fn categories(&self) -> CategoryService<dyn Store> { CategoryService::new(self.store.clone()) }

    pub fn disputes(&self) -> DisputeService<dyn Store> { DisputeService::new(self.store.clone()) }

    pub fn accounts(&self) -> AccountService<dyn Store> { AccountService::new(self.store.clone()) }
}
