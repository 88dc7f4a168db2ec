//! Itinerary CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date};
use crate::config::settings::Settings;
use crate::display::format_itinerary;
use crate::error::LedgerResult;
use crate::models::ItineraryItem;
use crate::services::ItineraryService;
use crate::storage::Storage;

/// Itinerary subcommands
#[derive(Subcommand)]
pub enum ItineraryCommands {
    /// Add a stop to the trip plan
    Add {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Destination
        destination: String,
        /// Planned activity
        #[arg(short, long)]
        activity: Option<String>,
        /// Estimated cost
        #[arg(short, long)]
        cost: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List the trip plan by date
    List,
    /// Delete a stop
    Delete {
        /// Item ID
        id: String,
    },
}

/// Handle an itinerary command
pub fn handle_itinerary_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ItineraryCommands,
) -> LedgerResult<()> {
    let service = ItineraryService::new(storage);

    match cmd {
        ItineraryCommands::Add {
            date,
            destination,
            activity,
            cost,
            notes,
        } => {
            let mut item = ItineraryItem::new(parse_date(&date)?, destination);
            if let Some(activity) = activity {
                item = item.with_activity(activity);
            }
            if let Some(cost) = cost {
                item = item.with_cost(parse_amount(&cost)?);
            }
            if let Some(notes) = notes {
                item = item.with_notes(notes);
            }

            let item = service.add(item)?;
            println!("Added itinerary item {}: {}", item.id, item);
        }
        ItineraryCommands::List => {
            println!("{}", format_itinerary(&service.list()?, settings));
        }
        ItineraryCommands::Delete { id } => {
            let item = service.delete(&id)?;
            println!("Deleted itinerary item: {}", item);
        }
    }

    Ok(())
}
