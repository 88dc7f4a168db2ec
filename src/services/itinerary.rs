//! Itinerary service

use crate::error::{LedgerError, LedgerResult};
use crate::models::ItineraryItem;
use crate::storage::Storage;

/// Service for trip itinerary management
pub struct ItineraryService<'a> {
    storage: &'a Storage,
}

impl<'a> ItineraryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and persist a new item
    pub fn add(&self, item: ItineraryItem) -> LedgerResult<ItineraryItem> {
        item.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.itinerary.upsert(item.clone())?;
        self.storage.itinerary.save()?;

        tracing::info!(id = %item.id, destination = %item.destination, "added itinerary item");
        Ok(item)
    }

    /// All items, earliest first
    pub fn list(&self) -> LedgerResult<Vec<ItineraryItem>> {
        self.storage.itinerary.get_all()
    }

    /// Delete an item by full or short ID
    pub fn delete(&self, reference: &str) -> LedgerResult<ItineraryItem> {
        let item = self
            .storage
            .itinerary
            .find(reference)?
            .ok_or_else(|| LedgerError::itinerary_not_found(reference))?;

        self.storage.itinerary.delete(item.id)?;
        self.storage.itinerary.save()?;

        tracing::info!(id = %item.id, "deleted itinerary item");
        Ok(item)
    }
}
