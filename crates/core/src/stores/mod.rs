pub mod nominatim;
pub mod static_places;

pub use nominatim::NominatimLookup;
pub use static_places::StaticPlaces;
