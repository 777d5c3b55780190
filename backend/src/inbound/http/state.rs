//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the domain service over its store port and stay testable without real
//! I/O.

use std::sync::Arc;

use crate::domain::UserService;
use crate::domain::ports::UserStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User domain service.
    pub users: UserService<dyn UserStore>,
}

impl HttpState {
    /// Build the handler state from a store implementation.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            users: UserService::new(store),
        }
    }
}
