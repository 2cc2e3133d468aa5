//! The module contains `Expense` struct and its storage entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{EngineError, ResultEngine, money};

/// An expense.
///
/// A single monetary transaction owned by a user. `id` is `None` until the
/// record has been persisted for the first time.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: Option<i64>,
    pub description: String,
    /// Amount with at most two fractional digits, always > 0 once validated.
    pub amount: Decimal,
    pub category: String,
    /// Free-form owner identifier, not checked against any user table.
    pub user_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Build a not yet persisted expense, stamping both timestamps with `now`.
    pub fn new(
        description: String,
        amount: Decimal,
        category: String,
        user_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            description,
            amount,
            category,
            user_id,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Turn a client-supplied record into a fresh one: drop its `id` and
    /// stamp both timestamps with `now`.
    pub fn reset_identity(&mut self, now: DateTime<Utc>) {
        self.id = None;
        self.created_at = Some(now);
        self.updated_at = Some(now);
    }

    /// Replace the mutable fields and refresh `updated_at`.
    ///
    /// `id`, `created_at` and `user_id` are left untouched.
    pub fn apply_update(
        &mut self,
        description: String,
        amount: Decimal,
        category: String,
        now: DateTime<Utc>,
    ) {
        self.description = description;
        self.amount = amount;
        self.category = category;
        self.updated_at = Some(now);
    }

    /// Check the domain invariants of the record.
    pub fn validate(&self) -> ResultEngine<()> {
        if self.description.trim().is_empty() {
            return Err(EngineError::InvalidExpense(
                "description must not be blank".to_string(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(EngineError::InvalidExpense(
                "category must not be blank".to_string(),
            ));
        }
        if self.amount <= Decimal::ZERO {
            return Err(EngineError::InvalidExpense(
                "amount must be greater than 0".to_string(),
            ));
        }
        money::to_minor(self.amount)?;
        if let (Some(created_at), Some(updated_at)) = (self.created_at, self.updated_at)
            && created_at > updated_at
        {
            return Err(EngineError::InvalidExpense(
                "updatedAt must not precede createdAt".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub description: String,
    pub amount_minor: i64,
    pub category: String,
    pub user_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Expense {
    fn from(value: Model) -> Self {
        Self {
            id: Some(value.id),
            description: value.description,
            amount: money::from_minor(value.amount_minor),
            category: value.category,
            user_id: value.user_id,
            created_at: Some(value.created_at),
            updated_at: Some(value.updated_at),
        }
    }
}

impl TryFrom<&Expense> for ActiveModel {
    type Error = EngineError;

    fn try_from(value: &Expense) -> Result<Self, Self::Error> {
        let created_at = value.created_at.ok_or_else(|| {
            EngineError::InvalidExpense("createdAt must be set before saving".to_string())
        })?;
        let updated_at = value.updated_at.ok_or_else(|| {
            EngineError::InvalidExpense("updatedAt must be set before saving".to_string())
        })?;

        Ok(Self {
            id: match value.id {
                Some(id) => ActiveValue::Unchanged(id),
                None => ActiveValue::NotSet,
            },
            description: ActiveValue::Set(value.description.clone()),
            amount_minor: ActiveValue::Set(money::to_minor(value.amount)?),
            category: ActiveValue::Set(value.category.clone()),
            user_id: ActiveValue::Set(value.user_id.clone()),
            created_at: ActiveValue::Set(created_at),
            updated_at: ActiveValue::Set(updated_at),
        })
    }
}
