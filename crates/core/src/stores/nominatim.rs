use crate::traits::PlaceLookup;
use crate::{Candidate, GeoCoordinate, LookupError, SearchRegion};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_RESULT_LIMIT: usize = 40;

/// Place lookup against a Nominatim `/search` endpoint, bounded to the region's box.
pub struct NominatimLookup {
    search_url: Url,
    client: Client,
    limit: usize,
}

impl NominatimLookup {
    pub fn new(endpoint: &str, user_agent: &str) -> Result<Self, LookupError> {
        let base = Url::parse(&format!("{}/", endpoint.trim_end_matches('/')))?;
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            search_url: base.join("search")?,
            client,
            limit: DEFAULT_RESULT_LIMIT,
        })
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn search_params(&self, query: &str, region: &SearchRegion) -> Vec<(&'static str, String)> {
        let bbox = region.bounding_box();
        vec![
            ("q", query.to_string()),
            ("format", "jsonv2".to_string()),
            ("addressdetails", "1".to_string()),
            ("extratags", "1".to_string()),
            ("bounded", "1".to_string()),
            ("limit", self.limit.to_string()),
            (
                "viewbox",
                format!(
                    "{},{},{},{}",
                    bbox.min_longitude, bbox.max_latitude, bbox.max_longitude, bbox.min_latitude
                ),
            ),
        ]
    }
}

#[async_trait]
impl PlaceLookup for NominatimLookup {
    async fn lookup(&self, query: &str, region: &SearchRegion) -> Result<Vec<Candidate>, LookupError> {
        let response = self
            .client
            .get(self.search_url.clone())
            .query(&self.search_params(query, region))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LookupError::BackendResponse {
                backend: "nominatim".to_string(),
                details: response.status().to_string(),
            });
        }

        let parsed: Value = response.json().await?;
        let candidates = parse_candidates(&parsed)?;
        debug!(query = %query, candidates = candidates.len(), "nominatim lookup complete");
        Ok(candidates)
    }
}

pub fn parse_candidates(parsed: &Value) -> Result<Vec<Candidate>, LookupError> {
    let places = parsed.as_array().ok_or_else(|| LookupError::BackendResponse {
        backend: "nominatim".to_string(),
        details: "expected a JSON array of places".to_string(),
    })?;

    Ok(places.iter().filter_map(parse_place).collect())
}

fn parse_place(place: &Value) -> Option<Candidate> {
    let latitude = coordinate_field(place, "/lat")?;
    let longitude = coordinate_field(place, "/lon")?;

    let name = text(place, "/name")
        .or_else(|| {
            text(place, "/display_name")
                .and_then(|display| display.split(',').next().map(|head| head.trim().to_string()))
        })
        .filter(|name| !name.is_empty())?;

    Some(Candidate {
        name,
        phone_number: text(place, "/extratags/phone").or_else(|| text(place, "/extratags/contact:phone")),
        sub_thoroughfare: text(place, "/address/house_number"),
        thoroughfare: text(place, "/address/road"),
        locality: text(place, "/address/city")
            .or_else(|| text(place, "/address/town"))
            .or_else(|| text(place, "/address/village")),
        administrative_area: text(place, "/address/state"),
        cuisine: text(place, "/extratags/cuisine"),
        coordinate: GeoCoordinate::new(latitude, longitude),
    })
}

fn text(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn coordinate_field(value: &Value, pointer: &str) -> Option<f64> {
    match value.pointer(pointer)? {
        Value::String(raw) => raw.trim().parse().ok(),
        Value::Number(number) => number.as_f64(),
        _ => None,
    }
}
