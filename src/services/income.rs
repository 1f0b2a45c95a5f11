//! Income service
//!
//! The declared monthly income is a config entry in the ledger. This
//! service gives it a typed face.

use tracing::debug;

use crate::error::{DashboardError, DashboardResult};
use crate::models::Money;
use crate::storage::{validate_income, Storage, INCOME_KEY};

/// Service for the monthly income figure
pub struct IncomeService<'a> {
    storage: &'a Storage,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The stored monthly income, zero when none was set
    pub fn income(&self) -> DashboardResult<Money> {
        let raw = self.storage.get_config(INCOME_KEY, "0")?;
        Money::parse(&raw).map_err(|e| {
            DashboardError::Storage(format!("stored income '{}' is malformed: {}", raw, e))
        })
    }

    /// Set the monthly income; negative or oversized amounts are rejected
    pub fn set_income(&self, amount: Money) -> DashboardResult<()> {
        validate_income(amount)?;
        self.storage.save_config(INCOME_KEY, &amount.to_string())?;
        debug!(income = %amount, "income saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_income_defaults_to_zero() {
        let (_temp, storage) = create_test_storage();
        assert_eq!(IncomeService::new(&storage).income().unwrap(), Money::zero());
    }

    #[test]
    fn test_set_and_read_income() {
        let (_temp, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        service.set_income(Money::from_cents(450050)).unwrap();
        assert_eq!(service.income().unwrap(), Money::from_cents(450050));
        assert_eq!(storage.get_config(INCOME_KEY, "0").unwrap(), "4500.50");
    }

    #[test]
    fn test_negative_income_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        let err = service.set_income(Money::from_cents(-1)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.income().unwrap(), Money::zero());
    }

    #[test]
    fn test_oversized_income_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        service.set_income(Money::MAX).unwrap();
        let err = service
            .set_income(Money::from_cents(Money::MAX.cents() + 1))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.income().unwrap(), Money::MAX);
    }

    #[test]
    fn test_malformed_stored_income_is_storage_error() {
        let (_temp, storage) = create_test_storage();
        storage.save_config(INCOME_KEY, "lots").unwrap();

        let err = IncomeService::new(&storage).income().unwrap_err();
        assert!(err.is_storage());
    }
}
