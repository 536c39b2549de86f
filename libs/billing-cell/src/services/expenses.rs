use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use shared_storage::{keys, read_or, write, KeyValueStore};

use crate::models::{BillingError, Expense};

/// Expense types seeded on first run. Users can add their own.
pub const DEFAULT_EXPENSE_TYPES: [&str; 7] = [
    "إيجار",
    "كهرباء",
    "ماء",
    "مواد طبية",
    "رواتب",
    "صيانة",
    "مصاريف أخرى",
];

pub struct ExpenseService {
    store: Arc<dyn KeyValueStore>,
}

impl ExpenseService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn expense_types(&self) -> Result<Vec<String>, BillingError> {
        Ok(read_or(self.store.as_ref(), keys::EXPENSE_TYPES, vec![])?)
    }

    /// Write the default expense types unless the key already holds data.
    pub fn seed_default_types(&self) -> Result<(), BillingError> {
        if self.store.contains(keys::EXPENSE_TYPES)? {
            return Ok(());
        }
        let types: Vec<String> = DEFAULT_EXPENSE_TYPES.iter().map(|s| s.to_string()).collect();
        write(self.store.as_ref(), keys::EXPENSE_TYPES, &types)?;
        debug!("Seeded {} default expense types", types.len());
        Ok(())
    }

    pub fn add_expense_type(&self, name: &str) -> Result<(), BillingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BillingError::ValidationError(
                "Expense type name must not be empty".to_string(),
            ));
        }
        let mut types = self.expense_types()?;
        if !types.iter().any(|t| t == name) {
            types.push(name.to_string());
            write(self.store.as_ref(), keys::EXPENSE_TYPES, &types)?;
        }
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<Expense>, BillingError> {
        Ok(read_or(self.store.as_ref(), keys::EXPENSES, vec![])?)
    }

    pub fn list_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Expense>, BillingError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|e| e.date >= from && e.date <= to)
            .collect())
    }

    pub fn record(
        &self,
        kind: &str,
        custom_type: &str,
        amount: f64,
        date: NaiveDate,
        notes: &str,
    ) -> Result<Expense, BillingError> {
        if amount <= 0.0 {
            return Err(BillingError::ValidationError(
                "Expense amount must be positive".to_string(),
            ));
        }
        if kind.trim().is_empty() && custom_type.trim().is_empty() {
            return Err(BillingError::ValidationError(
                "An expense needs a type".to_string(),
            ));
        }

        let expense = Expense {
            id: Uuid::new_v4(),
            kind: kind.to_string(),
            custom_type: custom_type.to_string(),
            amount,
            date,
            notes: notes.to_string(),
            created_at: Utc::now(),
        };
        let mut expenses = self.list()?;
        expenses.push(expense.clone());
        write(self.store.as_ref(), keys::EXPENSES, &expenses)?;
        Ok(expense)
    }

    pub fn remove(&self, id: Uuid) -> Result<(), BillingError> {
        let mut expenses = self.list()?;
        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        if expenses.len() == before {
            return Err(BillingError::NotFound);
        }
        write(self.store.as_ref(), keys::EXPENSES, &expenses)?;
        Ok(())
    }
}
