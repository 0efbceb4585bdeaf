use crate::app_state::AppState;
use crate::routes::auth::auth_routes;
use axum::routing::get;
use axum::Router;

mod auth;

pub fn main_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .nest("/auth", auth_routes())
}

async fn root() -> &'static str {
    "Inventory service authentication backend"
}
