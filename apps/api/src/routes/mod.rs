pub mod health;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::auth::require_api_key;
use crate::products::handlers as products;
use crate::resumes::handlers as resumes;
use crate::sessions::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let open = Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/products",
            get(products::handle_list).post(products::handle_create),
        )
        .route(
            "/api/v1/products/:id",
            get(products::handle_get)
                .put(products::handle_update)
                .delete(products::handle_delete),
        );

    let gated = Router::new()
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list).post(resumes::handle_ingest),
        )
        .route("/api/v1/resumes/latest", get(resumes::handle_latest))
        .route("/api/v1/resumes/upload-url", get(resumes::handle_upload_url))
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get)
                .put(resumes::handle_update)
                .delete(resumes::handle_delete),
        )
        .route("/api/v1/sessions/init", get(sessions::handle_init))
        .route("/api/v1/sessions/chat", post(sessions::handle_chat))
        .route_layer(from_fn_with_state(state.clone(), require_api_key));

    open.merge(gated).with_state(state)
}
