//! Readiness check against whichever store backs the API.

use crate::state::{AppState, Store};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// Readiness check endpoint.
///
/// PostgreSQL is pinged; the in-memory store is always ready.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let check: HealthCheckFuture<'_> = match &state.store {
        Store::Postgres(db) => Box::pin(async move {
            database::postgres::check_health(db)
                .await
                .map_err(|e| e.to_string())
        }),
        Store::Memory(_) => Box::pin(async { Ok(()) }),
    };

    match run_health_checks(vec![("store", check)]).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
