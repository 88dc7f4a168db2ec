//! Storage initialization
//!
//! First-run setup: directories, empty data files and default settings.

use crate::config::paths::LedgerPaths;
use crate::config::settings::Settings;
use crate::error::LedgerError;
use crate::models::{BudgetCategory, Money};

use super::budget::BudgetData;
use super::file_io::write_json_atomic;

/// Expense categories offered by `ledger init --with-defaults`
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Bills",
    "Shopping",
    "Entertainment",
    "Travel",
];

/// Initialize storage for a fresh installation
///
/// Existing data is never overwritten. With `seed_defaults`, a budget file
/// is created holding [`DEFAULT_CATEGORIES`] with zero limits.
pub fn initialize_storage(paths: &LedgerPaths, seed_defaults: bool) -> Result<(), LedgerError> {
    paths.ensure_directories()?;

    if !paths.budget_file().exists() {
        let categories = if seed_defaults {
            DEFAULT_CATEGORIES
                .iter()
                .enumerate()
                .map(|(i, name)| BudgetCategory::with_sort_order(*name, Money::zero(), i as i32))
                .collect()
        } else {
            Vec::new()
        };
        write_json_atomic(paths.budget_file(), &BudgetData { categories })?;
    }

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    tracing::info!(base = %paths.base_dir().display(), "storage initialized");
    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &LedgerPaths) -> bool {
    !paths.settings_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths, false).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.budget_file().exists());
        let data: BudgetData =
            serde_json::from_str(&std::fs::read_to_string(paths.budget_file()).unwrap()).unwrap();
        assert!(data.categories.is_empty());
    }

    #[test]
    fn test_seed_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, true).unwrap();

        let data: BudgetData =
            serde_json::from_str(&std::fs::read_to_string(paths.budget_file()).unwrap()).unwrap();
        let names: Vec<_> = data.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, DEFAULT_CATEGORIES.to_vec());
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, false).unwrap();

        let custom = BudgetData {
            categories: vec![BudgetCategory::new("Custom", Money::from_units(1))],
        };
        write_json_atomic(paths.budget_file(), &custom).unwrap();

        initialize_storage(&paths, true).unwrap();

        let data: BudgetData =
            serde_json::from_str(&std::fs::read_to_string(paths.budget_file()).unwrap()).unwrap();
        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.categories[0].name, "Custom");
    }
}
