use crate::actions::LaunchRequest;
use crate::{Candidate, GeoCoordinate, HandoffError, LocationError, LookupError, SearchRegion};
use async_trait::async_trait;
use url::Url;

#[async_trait]
pub trait PlaceLookup {
    async fn lookup(&self, query: &str, region: &SearchRegion) -> Result<Vec<Candidate>, LookupError>;
}

#[async_trait]
pub trait LocationProvider {
    async fn current_coordinate(&self) -> Result<GeoCoordinate, LocationError>;
}

pub trait MapLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<(), HandoffError>;
}

pub trait Dialer {
    fn dial(&self, target: &Url) -> Result<(), HandoffError>;
}

pub trait WebBrowser {
    fn open(&self, url: &Url) -> Result<(), HandoffError>;
}
