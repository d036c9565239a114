use crate::engine::RestaurantSearchEngine;
use crate::location::CoordinateSignal;
use crate::traits::PlaceLookup;
use crate::{SearchCriteria, SearchFailure, SelectedRestaurant};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// One picking session: fixed criteria, the first location fix and the restaurant on display.
pub struct PickerSession<L, R = StdRng>
where
    L: PlaceLookup,
    R: Rng,
{
    engine: RestaurantSearchEngine<L, R>,
    criteria: SearchCriteria,
    signal: CoordinateSignal,
    current: Mutex<Option<SelectedRestaurant>>,
    in_progress: AtomicBool,
}

struct InProgressGuard<'a>(&'a AtomicBool);

impl Drop for InProgressGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<L, R> PickerSession<L, R>
where
    L: PlaceLookup + Send + Sync,
    R: Rng + Send,
{
    pub fn new(engine: RestaurantSearchEngine<L, R>, criteria: SearchCriteria, signal: CoordinateSignal) -> Self {
        Self {
            engine,
            criteria,
            signal,
            current: Mutex::new(None),
            in_progress: AtomicBool::new(false),
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn signal(&self) -> &CoordinateSignal {
        &self.signal
    }

    pub fn current(&self) -> Option<SelectedRestaurant> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_searching(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Waits for the first coordinate, then replaces the displayed restaurant with a fresh pick.
    /// Overlapping calls fail with [`SearchFailure::SearchInProgress`].
    pub async fn next_restaurant(&self) -> Result<SelectedRestaurant, SearchFailure> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("search requested while another is in flight");
            return Err(SearchFailure::SearchInProgress);
        }
        let _guard = InProgressGuard(&self.in_progress);

        self.set_current(None);
        let center = self.signal.wait_ready().await?;
        let selected = self.engine.search(&self.criteria, center).await?;
        self.set_current(Some(selected.clone()));

        Ok(selected)
    }

    fn set_current(&self, restaurant: Option<SelectedRestaurant>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = restaurant;
    }
}
