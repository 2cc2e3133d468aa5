use axum::{Router, routing::get};

use crate::expenses;
use engine::ExpenseService;

#[derive(Clone)]
pub struct ServerState {
    pub expenses: ExpenseService,
}

/// Build the HTTP router for the expenses API.
///
/// No authentication layer is installed: every route is public.
pub fn router(service: ExpenseService) -> Router {
    let state = ServerState { expenses: service };

    Router::new()
        .route(
            "/api/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route(
            "/api/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .route("/api/expenses/user/{user_id}", get(expenses::by_user))
        .route(
            "/api/expenses/category/{category}",
            get(expenses::by_category),
        )
        .fallback(expenses::fallback)
        .method_not_allowed_fallback(expenses::method_not_allowed)
        .with_state(state)
}

pub async fn run_with_listener(
    service: ExpenseService,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(service)).await
}
