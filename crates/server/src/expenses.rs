//! Expenses API endpoints.

use api_types::{
    ApiResponse,
    expense::{ExpensePayload, ExpenseView},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{ServerError, server::ServerState, validation};

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ServerError>;

fn ok<T>(status: StatusCode, message: &str, data: T) -> ApiResult<T> {
    Ok((
        status,
        Json(ApiResponse::new(status.as_u16(), message, data)),
    ))
}

fn body(payload: Result<Json<ExpensePayload>, JsonRejection>) -> Result<ExpenseView, ServerError> {
    let Json(payload) = payload?;
    validation::validate(payload).map_err(ServerError::Validation)
}

pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<ExpenseView>> {
    let expenses = state.expenses.get_all_expenses().await?;
    ok(StatusCode::OK, "Expenses retrieved successfully", expenses)
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<ExpenseView> {
    let Path(id) = id?;
    let expense = state.expenses.get_expense_by_id(id).await?;
    ok(StatusCode::OK, "Expense retrieved successfully", expense)
}

pub async fn by_user(
    State(state): State<ServerState>,
    user_id: Result<Path<String>, PathRejection>,
) -> ApiResult<Vec<ExpenseView>> {
    let Path(user_id) = user_id?;
    let expenses = state.expenses.get_expenses_by_user_id(&user_id).await?;
    ok(StatusCode::OK, "User expenses retrieved successfully", expenses)
}

pub async fn by_category(
    State(state): State<ServerState>,
    category: Result<Path<String>, PathRejection>,
) -> ApiResult<Vec<ExpenseView>> {
    let Path(category) = category?;
    let expenses = state.expenses.get_expenses_by_category(&category).await?;
    ok(StatusCode::OK, "Category expenses retrieved successfully", expenses)
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpensePayload>, JsonRejection>,
) -> ApiResult<ExpenseView> {
    let input = body(payload)?;
    let expense = state.expenses.create_expense(input).await?;
    tracing::info!("created expense {:?}", expense.id);
    ok(StatusCode::CREATED, "Expense created successfully", expense)
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ExpensePayload>, JsonRejection>,
) -> ApiResult<ExpenseView> {
    let Path(id) = id?;
    let input = body(payload)?;
    let expense = state.expenses.update_expense(id, input).await?;
    tracing::info!("updated expense {id}");
    ok(StatusCode::OK, "Expense updated successfully", expense)
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<String> {
    let Path(id) = id?;
    state.expenses.delete_expense(id).await?;
    tracing::info!("deleted expense {id}");
    ok(
        StatusCode::OK,
        "Expense deleted successfully",
        format!("Expense with id {id} deleted"),
    )
}

pub async fn fallback() -> ServerError {
    ServerError::NotFound("Resource not found".to_string())
}

pub async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed("Method not allowed".to_string())
}
