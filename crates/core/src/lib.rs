pub mod actions;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod location;
pub mod models;
pub mod notice;
pub mod session;
pub mod stores;
pub mod traits;

pub use actions::{
    build_maps_launch_request, build_web_search_url, dial_target, sanitize_phone_for_dialing,
    LaunchRequest, MAP_LAUNCH_SPAN_METERS,
};
pub use criteria::{
    miles_to_meters, parse_radius_miles, SearchCriteria, DEFAULT_RADIUS_MILES, FALLBACK_CUISINES,
    METERS_PER_MILE,
};
pub use engine::{format_address, select_restaurant, RestaurantSearchEngine};
pub use error::{HandoffError, LocationError, LookupError, SearchFailure};
pub use location::{acquire_first_fix, CoordinateSignal, FixedLocation, UnavailableLocation};
pub use models::{
    BoundingBox, Candidate, DisplayRegion, GeoCoordinate, SearchRegion, SelectedRestaurant,
};
pub use notice::Notice;
pub use session::PickerSession;
pub use stores::{NominatimLookup, StaticPlaces};
pub use traits::{Dialer, LocationProvider, MapLauncher, PlaceLookup, WebBrowser};
