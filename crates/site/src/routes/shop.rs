//! Shop grid fragment.

use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::catalog::CatalogGridTemplate;
use crate::state::AppState;

/// Render the shop grid for the current catalog state.
///
/// Loading grids carry HTMX attributes that poll this route again.
#[instrument(skip(state), fields(catalog = state.catalog().state().label()))]
pub async fn grid(State(state): State<AppState>) -> impl IntoResponse {
    CatalogGridTemplate::new(state.shop(), &state.catalog().state())
}
