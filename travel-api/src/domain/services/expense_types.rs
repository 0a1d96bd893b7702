use async_trait::async_trait;

use super::require_text;
use crate::domain::{
    models::{ExpenseType, ExpenseTypeId, ExpenseTypePatch, NewExpenseType},
    ports::{inbound::ExpenseTypeService, outbound::Repositories},
    Entity, TravelError,
};

/// Implementation of the ExpenseTypeService inbound port.
///
/// Names are unique across all expense types.
pub struct ExpenseTypeServiceImpl {
    repos: Repositories,
}

impl ExpenseTypeServiceImpl {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    async fn get_or_not_found(&self, id: ExpenseTypeId) -> Result<ExpenseType, TravelError> {
        self.repos
            .expense_types
            .get(id)
            .await?
            .ok_or(TravelError::NotFound(Entity::ExpenseType))
    }
}

#[async_trait]
impl ExpenseTypeService for ExpenseTypeServiceImpl {
    async fn list_expense_types(&self) -> Result<Vec<ExpenseType>, TravelError> {
        self.repos.expense_types.list().await
    }

    async fn get_expense_type(&self, id: ExpenseTypeId) -> Result<ExpenseType, TravelError> {
        self.get_or_not_found(id).await
    }

    async fn create_expense_type(
        &self,
        expense_type: NewExpenseType,
    ) -> Result<ExpenseType, TravelError> {
        require_text(&expense_type.name, "name")?;

        if self
            .repos
            .expense_types
            .find_by_name(&expense_type.name)
            .await?
            .is_some()
        {
            return Err(TravelError::DuplicateExpenseTypeName);
        }

        self.repos.expense_types.insert(&expense_type).await
    }

    async fn update_expense_type(
        &self,
        id: ExpenseTypeId,
        patch: ExpenseTypePatch,
    ) -> Result<ExpenseType, TravelError> {
        let mut expense_type = self.get_or_not_found(id).await?;

        if let Some(name) = patch.name.as_deref() {
            require_text(name, "name")?;
            let holder = self.repos.expense_types.find_by_name(name).await?;
            if holder.is_some_and(|other| other.id != id) {
                return Err(TravelError::DuplicateExpenseTypeName);
            }
        }

        expense_type.apply(patch);
        self.repos.expense_types.update(&expense_type).await?;
        Ok(expense_type)
    }

    async fn delete_expense_type(&self, id: ExpenseTypeId) -> Result<ExpenseType, TravelError> {
        let expense_type = self.get_or_not_found(id).await?;
        self.repos.expense_types.delete(id).await?;
        tracing::info!(expense_type_id = %id, "deleted expense type and its expenses");
        Ok(expense_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::sqlite;

    async fn service() -> ExpenseTypeServiceImpl {
        let pool = sqlite::memory_pool().await;
        ExpenseTypeServiceImpl::new(sqlite::repositories(pool))
    }

    fn named(name: &str) -> NewExpenseType {
        NewExpenseType {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_on_create() {
        let service = service().await;
        service.create_expense_type(named("Питание")).await.unwrap();

        let err = service
            .create_expense_type(named("Питание"))
            .await
            .unwrap_err();

        assert!(matches!(err, TravelError::DuplicateExpenseTypeName));
    }

    #[tokio::test]
    async fn renaming_to_own_name_is_allowed() {
        let service = service().await;
        let created = service.create_expense_type(named("Суточные")).await.unwrap();

        let updated = service
            .update_expense_type(
                created.id,
                ExpenseTypePatch {
                    name: Some("Суточные".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn renaming_to_another_types_name_is_rejected() {
        let service = service().await;
        service.create_expense_type(named("Проезд")).await.unwrap();
        let other = service.create_expense_type(named("Такси")).await.unwrap();

        let err = service
            .update_expense_type(
                other.id,
                ExpenseTypePatch {
                    name: Some("Проезд".to_string()),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, TravelError::DuplicateExpenseTypeName));
    }

    #[tokio::test]
    async fn delete_returns_the_removed_type() {
        let service = service().await;
        let created = service.create_expense_type(named("Связь")).await.unwrap();

        let deleted = service.delete_expense_type(created.id).await.unwrap();

        assert_eq!(deleted, created);
        assert!(service.list_expense_types().await.unwrap().is_empty());
    }
}
