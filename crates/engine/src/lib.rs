use chrono::Utc;
use std::sync::Arc;

use api_types::expense::ExpenseView;
use sea_orm::DatabaseConnection;

pub use error::EngineError;
pub use expenses::Expense;
pub use repository::{ExpenseRepository, ExpenseStore};

mod error;
mod expenses;
pub mod mapper;
pub mod money;
mod repository;

type ResultEngine<T> = Result<T, EngineError>;

/// Business rules for expenses.
///
/// Sits between the API layer and an [`ExpenseRepository`]: it checks that
/// referenced expenses exist, stamps timestamps and converts between
/// [`Expense`] and [`ExpenseView`].
#[derive(Clone)]
pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepository>,
}

impl std::fmt::Debug for ExpenseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseService").finish_non_exhaustive()
    }
}

impl ExpenseService {
    /// Return a builder for `ExpenseService`. Help to build the struct.
    pub fn builder() -> ExpenseServiceBuilder {
        ExpenseServiceBuilder::default()
    }

    pub fn new(repository: Arc<dyn ExpenseRepository>) -> Self {
        Self { repository }
    }

    async fn find_existing(&self, id: i64) -> ResultEngine<Expense> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(EngineError::ExpenseNotFound(id))
    }

    pub async fn get_all_expenses(&self) -> ResultEngine<Vec<ExpenseView>> {
        let expenses = self.repository.find_all().await?;
        Ok(expenses.into_iter().map(mapper::to_view).collect())
    }

    pub async fn get_expense_by_id(&self, id: i64) -> ResultEngine<ExpenseView> {
        let expense = self.find_existing(id).await?;
        Ok(mapper::to_view(expense))
    }

    /// No check is made that `user_id` refers to a known user; an empty list
    /// is a valid answer.
    pub async fn get_expenses_by_user_id(&self, user_id: &str) -> ResultEngine<Vec<ExpenseView>> {
        let expenses = self.repository.find_by_user_id(user_id).await?;
        Ok(expenses.into_iter().map(mapper::to_view).collect())
    }

    pub async fn get_expenses_by_category(
        &self,
        category: &str,
    ) -> ResultEngine<Vec<ExpenseView>> {
        let expenses = self.repository.find_by_category(category).await?;
        Ok(expenses.into_iter().map(mapper::to_view).collect())
    }

    /// Persist a new expense.
    ///
    /// `id`, `created_at` and `updated_at` from `input` are ignored; both
    /// timestamps are set to the same instant.
    pub async fn create_expense(&self, input: ExpenseView) -> ResultEngine<ExpenseView> {
        let mut expense = mapper::to_entity(input);
        expense.reset_identity(Utc::now());
        expense.validate()?;

        let saved = self.repository.save(expense).await?;
        tracing::debug!("created expense {:?}", saved.id);
        Ok(mapper::to_view(saved))
    }

    /// Replace description, amount and category of an existing expense.
    ///
    /// `user_id` and `created_at` in `input` are discarded.
    pub async fn update_expense(&self, id: i64, input: ExpenseView) -> ResultEngine<ExpenseView> {
        let mut expense = self.find_existing(id).await?;
        expense.apply_update(input.description, input.amount, input.category, Utc::now());
        expense.validate()?;

        let saved = self.repository.save(expense).await?;
        tracing::debug!("updated expense {id}");
        Ok(mapper::to_view(saved))
    }

    pub async fn delete_expense(&self, id: i64) -> ResultEngine<()> {
        let expense = self.find_existing(id).await?;
        self.repository.delete(&expense).await?;
        tracing::debug!("deleted expense {id}");
        Ok(())
    }
}

#[derive(Default)]
pub struct ExpenseServiceBuilder {
    database: DatabaseConnection,
}

impl ExpenseServiceBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> ExpenseServiceBuilder {
        self.database = db;
        self
    }

    /// Construct `ExpenseService` on top of an [`ExpenseStore`].
    pub fn build(self) -> ExpenseService {
        ExpenseService::new(Arc::new(ExpenseStore::new(self.database)))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::RwLock;

    use super::*;

    // In-memory gateway standing in for the database.
    #[derive(Default)]
    struct MockExpenseRepository {
        expenses: RwLock<Vec<Expense>>,
        next_id: RwLock<i64>,
    }

    impl MockExpenseRepository {
        fn with(expenses: Vec<Expense>) -> Self {
            let next_id = expenses.iter().filter_map(|e| e.id).max().unwrap_or(0);
            Self {
                expenses: RwLock::new(expenses),
                next_id: RwLock::new(next_id),
            }
        }
    }

    #[async_trait]
    impl ExpenseRepository for MockExpenseRepository {
        async fn find_all(&self) -> ResultEngine<Vec<Expense>> {
            Ok(self.expenses.read().unwrap().clone())
        }

        async fn find_by_id(&self, id: i64) -> ResultEngine<Option<Expense>> {
            Ok(self
                .expenses
                .read()
                .unwrap()
                .iter()
                .find(|e| e.id == Some(id))
                .cloned())
        }

        async fn find_by_user_id(&self, user_id: &str) -> ResultEngine<Vec<Expense>> {
            Ok(self
                .expenses
                .read()
                .unwrap()
                .iter()
                .filter(|e| e.user_id.as_deref() == Some(user_id))
                .cloned()
                .collect())
        }

        async fn find_by_category(&self, category: &str) -> ResultEngine<Vec<Expense>> {
            Ok(self
                .expenses
                .read()
                .unwrap()
                .iter()
                .filter(|e| e.category == category)
                .cloned()
                .collect())
        }

        async fn save(&self, mut expense: Expense) -> ResultEngine<Expense> {
            let mut expenses = self.expenses.write().unwrap();
            match expense.id {
                Some(id) => {
                    let slot = expenses
                        .iter_mut()
                        .find(|e| e.id == Some(id))
                        .ok_or(EngineError::ExpenseNotFound(id))?;
                    *slot = expense.clone();
                }
                None => {
                    let mut next_id = self.next_id.write().unwrap();
                    *next_id += 1;
                    expense.id = Some(*next_id);
                    expenses.push(expense.clone());
                }
            }
            Ok(expense)
        }

        async fn delete(&self, expense: &Expense) -> ResultEngine<()> {
            self.expenses
                .write()
                .unwrap()
                .retain(|e| e.id != expense.id);
            Ok(())
        }
    }

    fn groceries() -> Expense {
        let mut expense = Expense::new(
            String::from("Groceries"),
            dec!(50.00),
            String::from("Food"),
            Some(String::from("user1")),
            Utc::now(),
        );
        expense.id = Some(1);
        expense
    }

    fn input(description: &str, amount: Decimal, category: &str) -> ExpenseView {
        ExpenseView {
            id: None,
            description: description.to_string(),
            amount,
            category: category.to_string(),
            created_at: None,
            updated_at: None,
            user_id: Some(String::from("user1")),
        }
    }

    fn service_with(expenses: Vec<Expense>) -> ExpenseService {
        ExpenseService::new(Arc::new(MockExpenseRepository::with(expenses)))
    }

    #[tokio::test]
    async fn get_all_expenses_maps_every_record() {
        let service = service_with(vec![groceries()]);

        let result = service.get_all_expenses().await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].description, "Groceries");
    }

    #[tokio::test]
    async fn get_expense_by_id_returns_view() {
        let service = service_with(vec![groceries()]);

        let result = service.get_expense_by_id(1).await.unwrap();

        assert_eq!(result.id, Some(1));
        assert_eq!(result.amount, dec!(50.00));
    }

    #[tokio::test]
    async fn get_expense_by_id_fails_when_missing() {
        let service = service_with(vec![]);

        let err = service.get_expense_by_id(999).await.unwrap_err();

        assert_eq!(err, EngineError::ExpenseNotFound(999));
        assert!(err.to_string().contains("999"));
    }

    #[tokio::test]
    async fn filters_return_empty_lists_without_error() {
        let service = service_with(vec![groceries()]);

        assert!(service.get_expenses_by_user_id("nobody").await.unwrap().is_empty());
        assert!(service.get_expenses_by_category("Travel").await.unwrap().is_empty());
        assert_eq!(service.get_expenses_by_user_id("user1").await.unwrap().len(), 1);
        assert_eq!(service.get_expenses_by_category("Food").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_expense_ignores_client_identity_and_timestamps() {
        let service = service_with(vec![]);
        let mut request = input("Groceries", dec!(50.00), "Food");
        request.id = Some(42);
        request.created_at = Some(Utc::now() - chrono::Duration::days(3));

        let created = service.create_expense(request).await.unwrap();

        assert_eq!(created.id, Some(1));
        assert!(created.created_at.is_some());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.user_id.as_deref(), Some("user1"));
    }

    #[tokio::test]
    async fn create_expense_rejects_invalid_amount() {
        let service = service_with(vec![]);

        let err = service
            .create_expense(input("Groceries", dec!(0), "Food"))
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::InvalidExpense(_)));
        assert!(service.get_all_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_expense_replaces_only_mutable_fields() {
        let original = groceries();
        let service = service_with(vec![original.clone()]);
        let mut request = input("Dinner", dec!(30.50), "Eating out");
        request.user_id = Some(String::from("someone-else"));
        request.created_at = Some(Utc::now() + chrono::Duration::days(1));

        let updated = service.update_expense(1, request).await.unwrap();

        assert_eq!(updated.id, Some(1));
        assert_eq!(updated.description, "Dinner");
        assert_eq!(updated.amount, dec!(30.50));
        assert_eq!(updated.category, "Eating out");
        assert_eq!(updated.user_id, original.user_id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
    }

    #[tokio::test]
    async fn update_expense_fails_when_missing() {
        let service = service_with(vec![groceries()]);

        let err = service
            .update_expense(999_999, input("Dinner", dec!(1), "Food"))
            .await
            .unwrap_err();

        assert_eq!(err, EngineError::ExpenseNotFound(999_999));
    }

    #[tokio::test]
    async fn delete_expense_removes_record() {
        let service = service_with(vec![groceries()]);

        service.delete_expense(1).await.unwrap();

        assert_eq!(
            service.get_expense_by_id(1).await.unwrap_err(),
            EngineError::ExpenseNotFound(1)
        );
    }

    #[tokio::test]
    async fn delete_expense_fails_when_missing() {
        let service = service_with(vec![]);

        let err = service.delete_expense(5).await.unwrap_err();

        assert_eq!(err, EngineError::ExpenseNotFound(5));
    }
}
