//! Itinerary display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::transaction::truncate;
use crate::config::settings::Settings;
use crate::models::{ItineraryItem, Money};

#[derive(Tabled)]
struct ItineraryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Est. Cost")]
    cost: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

/// Format the itinerary as a table with the estimated total
pub fn format_itinerary(items: &[ItineraryItem], settings: &Settings) -> String {
    if items.is_empty() {
        return "No itinerary items.".to_string();
    }

    let rows = items.iter().map(|item| ItineraryRow {
        id: item.id.to_string(),
        date: item.date.format(&settings.date_format).to_string(),
        destination: item.destination.clone(),
        activity: item.activity.clone(),
        cost: settings.money(item.estimated_cost),
        notes: truncate(&item.notes, 30),
    });

    let total: Money = items.iter().map(|i| i.estimated_cost).sum();
    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push_str(&format!("\nEstimated total: {}", settings.money(total)));
    output
}
