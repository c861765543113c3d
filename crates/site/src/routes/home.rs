//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::catalog::CatalogView;
use crate::content::PageContent;
use crate::filters;
use crate::state::AppState;

/// Landing page template.
///
/// The shop section includes `catalog/grid.html`, which reads `view`.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Static copy and links.
    pub content: PageContent,
    /// Shop grid for the current catalog state.
    pub view: CatalogView,
}

/// Display the landing page.
///
/// Never waits for Shopify: a grid that is still loading renders skeletons
/// and polls `/shop/grid`.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    HomeTemplate {
        content: state.content().clone(),
        view: CatalogView::new(state.shop(), &state.catalog().state()),
    }
}
