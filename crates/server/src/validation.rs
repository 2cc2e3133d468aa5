//! Request body validation for create and update.
//!
//! Every violated field is collected so the client gets the full list in one
//! response.

use api_types::{
    FieldError,
    expense::{ExpensePayload, ExpenseView},
};
use engine::money::{self, AMOUNT_SCALE};
use rust_decimal::Decimal;

/// Smallest accepted amount, 0.01.
const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn amount_error(amount: Option<Decimal>) -> Option<&'static str> {
    let Some(amount) = amount else {
        return Some("Amount is required");
    };
    if amount < MIN_AMOUNT {
        return Some("Amount must be greater than 0");
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Some("Amount must have at most 2 decimal places");
    }
    if money::to_minor(amount).is_err() {
        return Some("Amount is too large");
    }
    None
}

/// Check the payload shape and turn it into an [`ExpenseView`].
pub fn validate(payload: ExpensePayload) -> Result<ExpenseView, Vec<FieldError>> {
    let mut errors = Vec::new();

    if is_blank(payload.description.as_deref()) {
        errors.push(FieldError::new("description", "Description is required"));
    }
    if let Some(message) = amount_error(payload.amount) {
        errors.push(FieldError::new("amount", message));
    }
    if is_blank(payload.category.as_deref()) {
        errors.push(FieldError::new("category", "Category is required"));
    }

    match (payload.description, payload.amount, payload.category) {
        (Some(description), Some(amount), Some(category)) if errors.is_empty() => {
            Ok(ExpenseView {
                id: payload.id,
                description,
                amount,
                category,
                created_at: payload.created_at,
                updated_at: payload.updated_at,
                user_id: payload.user_id,
            })
        }
        _ => Err(errors),
    }
}
