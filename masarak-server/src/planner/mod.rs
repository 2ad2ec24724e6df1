//! Trip planning: fare rules, search configuration, itinerary search,
//! ranking, and the query pipeline tying them together.

mod config;
mod fare;
mod plan;
mod rank;
mod search;

pub use config::{ScoreWeights, SearchConfig};
pub use fare::FarePolicy;
pub use plan::{
    MAX_RESULTS_OVERRIDE, MAX_TRANSFER_OVERRIDE, PlanError, PlanOutcome, PlanRequest, Planner,
};
pub use rank::{RankedItineraries, rank};
pub use search::find_itineraries;
