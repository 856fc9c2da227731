use axum::Router;

use crate::state::{AppState, Store};

pub mod health;
pub mod staffing;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &AppState) -> Router {
    match &state.store {
        Store::Postgres(db) => staffing::postgres_router(db),
        Store::Memory(store) => staffing::router(store.clone(), store.clone(), store.clone()),
    }
}

/// Creates a router with the /ready endpoint that checks the store.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
