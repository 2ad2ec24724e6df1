//! Name resolution: normalized/fuzzy station matching, area-level
//! fallback, and the optional external geocoder.

mod areas;
mod cache;
mod error;
mod nominatim;
mod normalize;
mod resolver;

pub use areas::{Area, AreaIndex};
pub use cache::{CachedGeocoder, GeocodeCacheConfig};
pub use error::{GeocodeError, NoMatch};
pub use nominatim::{ExternalGeocoder, NominatimClient, NominatimConfig};
pub use normalize::{levenshtein, normalize_name, similarity};
pub use resolver::{Resolution, Resolver, ResolverConfig, StationMatch};
