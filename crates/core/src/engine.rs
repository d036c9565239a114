use crate::traits::PlaceLookup;
use crate::{Candidate, GeoCoordinate, SearchCriteria, SearchFailure, SearchRegion, SelectedRestaurant};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

pub const MISSING_COMPONENT: &str = "NA";
pub const NO_PHONE: &str = "None";

pub struct RestaurantSearchEngine<L, R = StdRng>
where
    L: PlaceLookup,
    R: Rng,
{
    lookup: L,
    rng: Mutex<R>,
}

impl<L> RestaurantSearchEngine<L, StdRng>
where
    L: PlaceLookup + Send + Sync,
{
    pub fn new(lookup: L) -> Self {
        Self::with_rng(lookup, StdRng::from_os_rng())
    }
}

impl<L, R> RestaurantSearchEngine<L, R>
where
    L: PlaceLookup + Send + Sync,
    R: Rng + Send,
{
    pub fn with_rng(lookup: L, rng: R) -> Self {
        Self {
            lookup,
            rng: Mutex::new(rng),
        }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        center: GeoCoordinate,
    ) -> Result<SelectedRestaurant, SearchFailure> {
        let query = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            criteria.food_query(&mut *rng)
        };
        let region = SearchRegion::new(center, criteria.radius_meters());
        debug!(query = %query, radius_meters = region.radius_meters, "issuing place lookup");

        let outcome = self.lookup.lookup(&query, &region).await;
        let candidates = match outcome {
            Ok(candidates) => candidates,
            Err(error) => {
                warn!(query = %query, error = %error, "place lookup failed");
                return Err(SearchFailure::NoResults { query });
            }
        };

        if candidates.is_empty() {
            info!(query = %query, "no matches found");
            return Err(SearchFailure::NoResults { query });
        }

        let index = self.draw_index(candidates.len());
        info!(query = %query, candidates = candidates.len(), index, "matches found");

        Ok(select_restaurant(&candidates[index]))
    }

    fn draw_index(&self, count: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..count)
    }
}

pub fn select_restaurant(candidate: &Candidate) -> SelectedRestaurant {
    SelectedRestaurant {
        name: candidate.name.clone(),
        formatted_address: format_address(candidate),
        phone_number: candidate
            .phone_number
            .clone()
            .unwrap_or_else(|| NO_PHONE.to_string()),
        coordinate: candidate.coordinate,
    }
}

/// `"{sub} {street}, {locality}, {region}"`; absent parts become `NA` so the separators never move.
pub fn format_address(candidate: &Candidate) -> String {
    let part = |value: &Option<String>| value.as_deref().unwrap_or(MISSING_COMPONENT).to_string();

    format!(
        "{} {}, {}, {}",
        part(&candidate.sub_thoroughfare),
        part(&candidate.thoroughfare),
        part(&candidate.locality),
        part(&candidate.administrative_area),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LookupError, SearchRegion};
    use async_trait::async_trait;
    use std::collections::HashSet;

    const CENTER: GeoCoordinate = GeoCoordinate::new(39.7817, -89.6501);

    #[derive(Default)]
    struct FakeLookup {
        hits: Vec<Candidate>,
        fail: bool,
        seen: Mutex<Vec<(String, SearchRegion)>>,
    }

    #[async_trait]
    impl PlaceLookup for FakeLookup {
        async fn lookup(&self, query: &str, region: &SearchRegion) -> Result<Vec<Candidate>, LookupError> {
            self.seen
                .lock()
                .expect("lookup log lock")
                .push((query.to_string(), *region));
            if self.fail {
                return Err(LookupError::Request("offline".to_string()));
            }
            Ok(self.hits.clone())
        }
    }

    fn candidate(name: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            phone_number: Some("(217) 525-1992".to_string()),
            sub_thoroughfare: Some("2935".to_string()),
            thoroughfare: Some("S 6th St".to_string()),
            locality: Some("Springfield".to_string()),
            administrative_area: Some("IL".to_string()),
            cuisine: Some("American".to_string()),
            coordinate: GeoCoordinate::new(39.7712, -89.6496),
        }
    }

    fn engine(lookup: FakeLookup) -> RestaurantSearchEngine<FakeLookup> {
        RestaurantSearchEngine::with_rng(lookup, StdRng::seed_from_u64(11))
    }

    #[test]
    fn missing_address_components_become_na() {
        let raw = Candidate {
            name: "Joe's".to_string(),
            thoroughfare: Some("Main St".to_string()),
            locality: Some("Springfield".to_string()),
            administrative_area: Some("IL".to_string()),
            ..Default::default()
        };

        assert_eq!(format_address(&raw), "NA Main St, Springfield, IL");
        assert_eq!(format_address(&Candidate::default()), "NA NA, NA, NA");
    }

    #[test]
    fn phone_passes_through_or_reads_none() {
        let with_phone = select_restaurant(&candidate("Cozy Dog"));
        assert_eq!(with_phone.phone_number, "(217) 525-1992");

        let without_phone = select_restaurant(&Candidate {
            phone_number: None,
            ..candidate("Cozy Dog")
        });
        assert_eq!(without_phone.phone_number, "None");
        assert_eq!(without_phone.coordinate, GeoCoordinate::new(39.7712, -89.6496));
    }

    #[test]
    fn literal_none_phone_reads_as_missing() {
        let listed_as_none = select_restaurant(&Candidate {
            phone_number: Some("None".to_string()),
            ..candidate("Cozy Dog")
        });
        assert!(!listed_as_none.has_phone());
        assert!(select_restaurant(&candidate("Cozy Dog")).has_phone());
    }

    #[tokio::test]
    async fn search_builds_query_and_region_from_criteria() {
        let engine = engine(FakeLookup {
            hits: vec![candidate("Cozy Dog")],
            ..Default::default()
        });
        let criteria = SearchCriteria::from_input("hot dog", "1");

        let selected = engine.search(&criteria, CENTER).await.expect("search should succeed");

        assert_eq!(selected.name, "Cozy Dog");
        assert_eq!(selected.formatted_address, "2935 S 6th St, Springfield, IL");
        let seen = engine.lookup().seen.lock().expect("lookup log lock");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "hot dog food");
        assert_eq!(seen[0].1.center, CENTER);
        assert_eq!(seen[0].1.radius_meters, 1609.344);
    }

    #[tokio::test]
    async fn empty_candidate_list_is_no_results() {
        let engine = engine(FakeLookup::default());
        let criteria = SearchCriteria::from_input("sushi", "");

        let failure = engine.search(&criteria, CENTER).await.unwrap_err();
        assert_eq!(
            failure,
            SearchFailure::NoResults {
                query: "sushi food".to_string()
            }
        );
    }

    #[tokio::test]
    async fn lookup_error_is_no_results() {
        let engine = engine(FakeLookup {
            hits: vec![candidate("Cozy Dog")],
            fail: true,
            ..Default::default()
        });

        let failure = engine
            .search(&SearchCriteria::default(), CENTER)
            .await
            .unwrap_err();
        assert!(matches!(failure, SearchFailure::NoResults { .. }));
    }

    #[tokio::test]
    async fn every_candidate_is_reachable() {
        let names = ["A", "B", "C", "D", "E"];
        let engine = engine(FakeLookup {
            hits: names.iter().map(|name| candidate(name)).collect(),
            ..Default::default()
        });
        let criteria = SearchCriteria::from_input("pizza", "2");

        let mut seen = HashSet::new();
        for _ in 0..500 {
            let selected = engine.search(&criteria, CENTER).await.expect("search should succeed");
            assert!(names.contains(&selected.name.as_str()));
            seen.insert(selected.name);
        }

        assert_eq!(seen.len(), names.len());
    }

    #[tokio::test]
    async fn single_candidate_is_always_selected() {
        let engine = engine(FakeLookup {
            hits: vec![candidate("Only")],
            ..Default::default()
        });

        for _ in 0..20 {
            let selected = engine
                .search(&SearchCriteria::default(), CENTER)
                .await
                .expect("search should succeed");
            assert_eq!(selected.name, "Only");
        }
    }
}
