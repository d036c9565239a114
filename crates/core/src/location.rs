use crate::traits::LocationProvider;
use crate::{GeoCoordinate, LocationError, SearchFailure};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Publish-once coordinate cell. The first fix wins; later fixes are ignored.
#[derive(Debug, Clone)]
pub struct CoordinateSignal {
    sender: Arc<watch::Sender<Option<GeoCoordinate>>>,
}

impl Default for CoordinateSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinateSignal {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Returns `true` when this fix was accepted.
    pub fn publish(&self, coordinate: GeoCoordinate) -> bool {
        self.sender.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(coordinate);
            true
        })
    }

    pub fn current(&self) -> Option<GeoCoordinate> {
        *self.sender.borrow()
    }

    pub async fn wait_ready(&self) -> Result<GeoCoordinate, SearchFailure> {
        let mut receiver = self.sender.subscribe();
        let ready = receiver
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|value| *value);
        ready.ok_or_else(|| SearchFailure::LocationUnavailable("coordinate signal closed".to_string()))
    }
}

/// Asks the provider once and publishes the result.
pub async fn acquire_first_fix<P>(provider: &P, signal: &CoordinateSignal) -> Result<GeoCoordinate, SearchFailure>
where
    P: LocationProvider + Send + Sync + ?Sized,
{
    match provider.current_coordinate().await {
        Ok(coordinate) => {
            if !signal.publish(coordinate) {
                debug!("coordinate already published, ignoring later fix");
            }
            signal.current().ok_or_else(|| {
                SearchFailure::LocationUnavailable("coordinate signal is empty".to_string())
            })
        }
        Err(error) => {
            warn!(error = %error, "unable to access current location");
            Err(error.into())
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    pub coordinate: GeoCoordinate,
}

impl FixedLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinate: GeoCoordinate::new(latitude, longitude),
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_coordinate(&self) -> Result<GeoCoordinate, LocationError> {
        Ok(self.coordinate)
    }
}

#[derive(Debug, Clone)]
pub struct UnavailableLocation {
    pub reason: String,
}

#[async_trait]
impl LocationProvider for UnavailableLocation {
    async fn current_coordinate(&self) -> Result<GeoCoordinate, LocationError> {
        Err(LocationError(self.reason.clone()))
    }
}
