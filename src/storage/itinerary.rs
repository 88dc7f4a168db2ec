//! Itinerary repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{ItineraryId, ItineraryItem};

use super::file_io::{read_json, write_json_atomic};
use super::lock_err;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ItineraryData {
    items: Vec<ItineraryItem>,
}

/// Repository for itinerary items
pub struct ItineraryRepository {
    path: PathBuf,
    items: RwLock<HashMap<ItineraryId, ItineraryItem>>,
}

impl ItineraryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            items: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: ItineraryData = read_json(&self.path)?;
        let mut items = self.items.write().map_err(lock_err)?;
        items.clear();
        for item in file_data.items {
            items.insert(item.id, item);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let file_data = ItineraryData {
            items: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All items, earliest date first
    pub fn get_all(&self) -> Result<Vec<ItineraryItem>, LedgerError> {
        let items = self.items.read().map_err(lock_err)?;
        let mut list: Vec<_> = items.values().cloned().collect();
        list.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(list)
    }

    /// Find an item by full or short ID
    pub fn find(&self, reference: &str) -> Result<Option<ItineraryItem>, LedgerError> {
        let items = self.items.read().map_err(lock_err)?;
        let mut matches = items.values().filter(|i| i.id.matches(reference));
        match (matches.next(), matches.next()) {
            (Some(item), None) => Ok(Some(item.clone())),
            _ => Ok(None),
        }
    }

    pub fn upsert(&self, item: ItineraryItem) -> Result<(), LedgerError> {
        let mut items = self.items.write().map_err(lock_err)?;
        items.insert(item.id, item);
        Ok(())
    }

    pub fn delete(&self, id: ItineraryId) -> Result<Option<ItineraryItem>, LedgerError> {
        let mut items = self.items.write().map_err(lock_err)?;
        Ok(items.remove(&id))
    }
}
