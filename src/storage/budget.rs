//! Budget category repository for JSON storage
//!
//! Manages loading and saving budget categories to budget.json. Categories
//! are keyed by their case-insensitive name, which keeps names unique.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::category::name_key;
use crate::models::BudgetCategory;

use super::file_io::{read_json, write_json_atomic};
use super::lock_err;

/// Serializable budget data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct BudgetData {
    pub categories: Vec<BudgetCategory>,
}

fn sort_for_display(categories: &mut [BudgetCategory]) {
    categories.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.name.cmp(&b.name))
    });
}

/// Repository for budget category persistence
pub struct BudgetRepository {
    path: PathBuf,
    categories: RwLock<HashMap<String, BudgetCategory>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    ///
    /// If the file holds two spellings of one name, the later entry wins.
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut categories = self.categories.write().map_err(lock_err)?;
        categories.clear();
        for category in file_data.categories {
            if let Some(previous) = categories.insert(category.key(), category) {
                tracing::warn!(name = %previous.name, "duplicate budget category in file, keeping last");
            }
        }

        tracing::debug!(count = categories.len(), "loaded budget categories");
        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let file_data = BudgetData {
            categories: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Look up by name, ignoring case
    pub fn get(&self, name: &str) -> Result<Option<BudgetCategory>, LedgerError> {
        let categories = self.categories.read().map_err(lock_err)?;
        Ok(categories.get(&name_key(name)).cloned())
    }

    /// All categories in display order
    pub fn get_all(&self) -> Result<Vec<BudgetCategory>, LedgerError> {
        let categories = self.categories.read().map_err(lock_err)?;
        let mut list: Vec<_> = categories.values().cloned().collect();
        sort_for_display(&mut list);
        Ok(list)
    }

    /// Insert a category whose name is not yet taken
    pub fn insert(&self, category: BudgetCategory) -> Result<(), LedgerError> {
        let mut categories = self.categories.write().map_err(lock_err)?;
        let key = category.key();
        if categories.contains_key(&key) {
            return Err(LedgerError::Duplicate {
                entity_type: "Budget category",
                identifier: category.name,
            });
        }
        categories.insert(key, category);
        Ok(())
    }

    /// Insert or replace a category by name
    pub fn upsert(&self, category: BudgetCategory) -> Result<(), LedgerError> {
        let mut categories = self.categories.write().map_err(lock_err)?;
        categories.insert(category.key(), category);
        Ok(())
    }

    /// Remove a category by name, returning it if it existed
    pub fn remove(&self, name: &str) -> Result<Option<BudgetCategory>, LedgerError> {
        let mut categories = self.categories.write().map_err(lock_err)?;
        Ok(categories.remove(&name_key(name)))
    }

    /// Sort order for a category appended at the end
    pub fn next_sort_order(&self) -> Result<i32, LedgerError> {
        let categories = self.categories.read().map_err(lock_err)?;
        Ok(categories
            .values()
            .map(|c| c.sort_order)
            .max()
            .map_or(0, |max| max + 1))
    }

    pub fn is_empty(&self) -> Result<bool, LedgerError> {
        let categories = self.categories.read().map_err(lock_err)?;
        Ok(categories.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budget.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_insert_rejects_duplicate_names() {
        let (_temp_dir, repo) = repo();
        repo.insert(BudgetCategory::new("Food", Money::from_units(100)))
            .unwrap();

        let err = repo
            .insert(BudgetCategory::new("FOOD", Money::from_units(5)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate { .. }));
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let (_temp_dir, repo) = repo();
        repo.upsert(BudgetCategory::new("Dining Out", Money::from_units(80)))
            .unwrap();
        assert!(repo.get("dining out").unwrap().is_some());
        assert!(repo.get(" DINING OUT ").unwrap().is_some());
        assert!(repo.get("Dining").unwrap().is_none());
    }

    #[test]
    fn test_display_order_and_persistence() {
        let (_temp_dir, repo) = repo();
        repo.upsert(BudgetCategory::with_sort_order("Bills", Money::zero(), 2))
            .unwrap();
        repo.upsert(BudgetCategory::with_sort_order("Rent", Money::zero(), 0))
            .unwrap();
        repo.upsert(BudgetCategory::with_sort_order("Food", Money::zero(), 1))
            .unwrap();
        assert_eq!(repo.next_sort_order().unwrap(), 3);
        repo.save().unwrap();

        let reloaded = BudgetRepository::new(repo.path.clone());
        reloaded.load().unwrap();
        let names: Vec<_> = reloaded
            .get_all()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Rent", "Food", "Bills"]);
    }

    #[test]
    fn test_remove() {
        let (_temp_dir, repo) = repo();
        repo.upsert(BudgetCategory::new("Food", Money::zero())).unwrap();
        assert!(repo.remove("food").unwrap().is_some());
        assert!(repo.remove("food").unwrap().is_none());
        assert!(repo.is_empty().unwrap());
        assert_eq!(repo.next_sort_order().unwrap(), 0);
    }
}
