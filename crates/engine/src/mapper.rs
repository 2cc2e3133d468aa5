//! Field-for-field conversion between [`Expense`] and [`ExpenseView`].

use api_types::expense::ExpenseView;

use crate::Expense;

pub fn to_view(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        description: expense.description,
        amount: expense.amount,
        category: expense.category,
        created_at: expense.created_at,
        updated_at: expense.updated_at,
        user_id: expense.user_id,
    }
}

/// Inverse of [`to_view`]. Identity and timestamps are copied as given; the
/// service resets them on create.
pub fn to_entity(view: ExpenseView) -> Expense {
    Expense {
        id: view.id,
        description: view.description,
        amount: view.amount,
        category: view.category,
        user_id: view.user_id,
        created_at: view.created_at,
        updated_at: view.updated_at,
    }
}

/// Absent stays absent.
pub fn to_view_opt(expense: Option<Expense>) -> Option<ExpenseView> {
    expense.map(to_view)
}

/// Absent stays absent.
pub fn to_entity_opt(view: Option<ExpenseView>) -> Option<Expense> {
    view.map(to_entity)
}
