//! The static network model: graph, derived indexes, data loading, and the
//! atomically replaceable shared snapshot.

mod damascus;
mod error;
mod handle;
mod load;
mod model;

pub use damascus::damascus;
pub use error::NetworkError;
pub use handle::NetworkHandle;
pub use load::{LoadedNetwork, from_json_file, from_json_str};
pub use model::{NearbyStation, Network};
