//! Persistence gateway for expenses.
//!
//! [`ExpenseRepository`] is the only way the service touches storage.
//! [`ExpenseStore`] implements it on top of a sea-orm connection.

use async_trait::async_trait;
use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{EngineError, Expense, ResultEngine, expenses};

#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Every stored expense. Ordering is up to the implementation.
    async fn find_all(&self) -> ResultEngine<Vec<Expense>>;
    /// `None` when no expense has this id.
    async fn find_by_id(&self, id: i64) -> ResultEngine<Option<Expense>>;
    async fn find_by_user_id(&self, user_id: &str) -> ResultEngine<Vec<Expense>>;
    async fn find_by_category(&self, category: &str) -> ResultEngine<Vec<Expense>>;
    /// Insert when `expense.id` is `None`, otherwise overwrite the stored row.
    async fn save(&self, expense: Expense) -> ResultEngine<Expense>;
    async fn delete(&self, expense: &Expense) -> ResultEngine<()>;
}

/// sea-orm backed [`ExpenseRepository`].
#[derive(Clone, Debug)]
pub struct ExpenseStore {
    database: DatabaseConnection,
}

impl ExpenseStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

fn into_expenses(models: Vec<expenses::Model>) -> Vec<Expense> {
    models.into_iter().map(Expense::from).collect()
}

#[async_trait]
impl ExpenseRepository for ExpenseStore {
    async fn find_all(&self) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        Ok(into_expenses(models))
    }

    async fn find_by_id(&self, id: i64) -> ResultEngine<Option<Expense>> {
        let model = expenses::Entity::find_by_id(id).one(&self.database).await?;
        Ok(model.map(Expense::from))
    }

    async fn find_by_user_id(&self, user_id: &str) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        Ok(into_expenses(models))
    }

    async fn find_by_category(&self, category: &str) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .filter(expenses::Column::Category.eq(category))
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        Ok(into_expenses(models))
    }

    async fn save(&self, expense: Expense) -> ResultEngine<Expense> {
        let active = expenses::ActiveModel::try_from(&expense)?;
        let model = match expense.id {
            Some(_) => active.update(&self.database).await?,
            None => active.insert(&self.database).await?,
        };
        Ok(model.into())
    }

    async fn delete(&self, expense: &Expense) -> ResultEngine<()> {
        let id = expense.id.ok_or_else(|| {
            EngineError::InvalidExpense("cannot delete an unsaved expense".to_string())
        })?;
        expenses::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        Ok(())
    }
}
