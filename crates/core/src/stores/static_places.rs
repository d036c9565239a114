use crate::criteria::FOOD_SUFFIX;
use crate::traits::PlaceLookup;
use crate::{Candidate, LookupError, SearchRegion};
use async_trait::async_trait;
use std::path::Path;

/// In-memory catalog, usually loaded from a JSON array of candidates.
#[derive(Debug, Clone, Default)]
pub struct StaticPlaces {
    candidates: Vec<Candidate>,
}

impl StaticPlaces {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub async fn from_json_file(path: &Path) -> Result<Self, LookupError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let candidates: Vec<Candidate> = serde_json::from_str(&raw)?;
        Ok(Self::new(candidates))
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Lowercased query words, minus the trailing food suffix.
fn query_terms(query: &str) -> Vec<String> {
    let suffix = FOOD_SUFFIX.trim();
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|term| term != suffix)
        .collect()
}

fn matches_terms(candidate: &Candidate, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }
    let name = candidate.name.to_lowercase();
    let cuisine = candidate.cuisine.as_deref().unwrap_or_default().to_lowercase();
    terms
        .iter()
        .any(|term| name.contains(term.as_str()) || cuisine.contains(term.as_str()))
}

#[async_trait]
impl PlaceLookup for StaticPlaces {
    async fn lookup(&self, query: &str, region: &SearchRegion) -> Result<Vec<Candidate>, LookupError> {
        let terms = query_terms(query);
        Ok(self
            .candidates
            .iter()
            .filter(|candidate| region.contains(&candidate.coordinate))
            .filter(|candidate| matches_terms(candidate, &terms))
            .cloned()
            .collect())
    }
}
