//! Contact and navigation hand-offs for a selected restaurant: web search, map launch and dialing.
//! The builders are pure; the collaborators in [`crate::traits`] perform the hand-off.

use crate::traits::{Dialer, MapLauncher, WebBrowser};
use crate::{GeoCoordinate, SearchFailure, SelectedRestaurant};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

pub const WEB_SEARCH_BASE: &str = "https://www.google.com/search?q=";
pub const MAP_LAUNCH_SPAN_METERS: f64 = 10_000.0;

const DIAL_STRIPPED: [char; 4] = ['(', ')', ' ', '-'];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaunchRequest {
    pub coordinate: GeoCoordinate,
    pub span_meters: f64,
    pub name: String,
}

pub fn build_web_search_url(address: &str, name: &str) -> Result<Url, url::ParseError> {
    let term = format!("{address}{name}");
    let encoded = utf8_percent_encode(&term, NON_ALPHANUMERIC).to_string();
    Url::parse(&format!("{WEB_SEARCH_BASE}{encoded}"))
}

pub fn build_maps_launch_request(latitude: f64, longitude: f64, name: &str) -> LaunchRequest {
    LaunchRequest {
        coordinate: GeoCoordinate::new(latitude, longitude),
        span_meters: MAP_LAUNCH_SPAN_METERS,
        name: name.to_string(),
    }
}

/// Strips `(`, `)`, spaces and dashes, then drops the first and last remaining character.
///
/// The trailing trim is long-standing behavior and is kept as is: `"(555) 123-4567"` dials
/// `"55123456"`.
pub fn sanitize_phone_for_dialing(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| !DIAL_STRIPPED.contains(c)).collect();
    if digits.len() <= 2 {
        return String::new();
    }
    digits[1..digits.len() - 1].iter().collect()
}

/// `tel:` target for a restaurant, or the failure the caller should surface.
pub fn dial_target(restaurant: &SelectedRestaurant) -> Result<Url, SearchFailure> {
    if !restaurant.has_phone() {
        return Err(SearchFailure::NoPhoneOnFile {
            name: restaurant.name.clone(),
        });
    }

    let sanitized = sanitize_phone_for_dialing(&restaurant.phone_number);
    let invalid = || SearchFailure::InvalidDialTarget {
        raw: restaurant.phone_number.clone(),
    };

    let dialable = !sanitized.is_empty()
        && sanitized
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '*' | '#' | '.'));
    if !dialable {
        return Err(invalid());
    }

    Url::parse(&format!("tel:{sanitized}")).map_err(|_| invalid())
}

impl SelectedRestaurant {
    pub fn call(&self, dialer: &dyn Dialer) -> Result<Url, SearchFailure> {
        let target = dial_target(self).inspect_err(|failure| {
            if matches!(failure, SearchFailure::InvalidDialTarget { .. }) {
                warn!(name = %self.name, phone = %self.phone_number, "invalid dial target");
            }
        })?;
        dialer.dial(&target)?;
        info!(name = %self.name, target = %target, "dialing restaurant");
        Ok(target)
    }

    pub fn open_in_maps(&self, launcher: &dyn MapLauncher) -> Result<LaunchRequest, SearchFailure> {
        let request =
            build_maps_launch_request(self.coordinate.latitude, self.coordinate.longitude, &self.name);
        launcher.launch(&request)?;
        Ok(request)
    }

    pub fn search_web(&self, browser: &dyn WebBrowser) -> Result<Url, SearchFailure> {
        let url = build_web_search_url(&self.formatted_address, &self.name).map_err(|error| {
            SearchFailure::HandoffFailed {
                target: "browser".to_string(),
                details: error.to_string(),
            }
        })?;
        browser.open(&url)?;
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HandoffError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHandoff {
        urls: Mutex<Vec<String>>,
        launches: Mutex<Vec<LaunchRequest>>,
        refuse: bool,
    }

    impl RecordingHandoff {
        fn result(&self, target: &str) -> Result<(), HandoffError> {
            if self.refuse {
                return Err(HandoffError {
                    target: target.to_string(),
                    details: "no handler installed".to_string(),
                });
            }
            Ok(())
        }
    }

    impl Dialer for RecordingHandoff {
        fn dial(&self, target: &Url) -> Result<(), HandoffError> {
            self.result("dialer")?;
            self.urls.lock().expect("url log lock").push(target.to_string());
            Ok(())
        }
    }

    impl WebBrowser for RecordingHandoff {
        fn open(&self, url: &Url) -> Result<(), HandoffError> {
            self.result("browser")?;
            self.urls.lock().expect("url log lock").push(url.to_string());
            Ok(())
        }
    }

    impl MapLauncher for RecordingHandoff {
        fn launch(&self, request: &LaunchRequest) -> Result<(), HandoffError> {
            self.result("maps")?;
            self.launches.lock().expect("launch log lock").push(request.clone());
            Ok(())
        }
    }

    fn restaurant(phone: &str) -> SelectedRestaurant {
        SelectedRestaurant {
            name: "Cozy Dog".to_string(),
            formatted_address: "2935 S 6th St, Springfield, IL".to_string(),
            phone_number: phone.to_string(),
            coordinate: GeoCoordinate::new(39.7712, -89.6496),
        }
    }

    #[test]
    fn sanitizer_strips_punctuation_then_trims_both_ends() {
        assert_eq!(sanitize_phone_for_dialing("(555) 123-4567"), "55123456");
        assert_eq!(sanitize_phone_for_dialing("+1 (217) 525-1992"), "1217525199");
        assert_eq!(sanitize_phone_for_dialing("12"), "");
        assert_eq!(sanitize_phone_for_dialing("( )"), "");
    }

    #[test]
    fn web_search_url_encodes_address_and_name_without_separator() {
        let url = build_web_search_url("1 Main St, Springfield, IL", "Joe's").expect("valid url");
        assert_eq!(
            url.as_str(),
            "https://www.google.com/search?q=1%20Main%20St%2C%20Springfield%2C%20ILJoe%27s"
        );
    }

    #[test]
    fn maps_launch_request_uses_fixed_span() {
        let request = build_maps_launch_request(39.7712, -89.6496, "Cozy Dog");
        assert_eq!(request.coordinate, GeoCoordinate::new(39.7712, -89.6496));
        assert_eq!(request.span_meters, 10_000.0);
        assert_eq!(request.name, "Cozy Dog");
    }

    #[test]
    fn dial_target_requires_a_phone_number() {
        let failure = dial_target(&restaurant("None")).unwrap_err();
        assert_eq!(
            failure,
            SearchFailure::NoPhoneOnFile {
                name: "Cozy Dog".to_string()
            }
        );
    }

    #[test]
    fn dial_target_rejects_unusable_numbers() {
        for phone in ["12", "call us", "(ext) 12ab"] {
            let failure = dial_target(&restaurant(phone)).unwrap_err();
            assert!(
                matches!(failure, SearchFailure::InvalidDialTarget { .. }),
                "{phone} gave {failure:?}"
            );
        }
    }

    #[test]
    fn dial_target_builds_tel_url() {
        let url = dial_target(&restaurant("(555) 123-4567")).expect("dialable");
        assert_eq!(url.scheme(), "tel");
        assert_eq!(url.as_str(), "tel:55123456");
    }

    #[test]
    fn restaurant_actions_hand_off_to_collaborators() {
        let handoff = RecordingHandoff::default();
        let cozy = restaurant("(555) 123-4567");

        cozy.call(&handoff).expect("call");
        cozy.search_web(&handoff).expect("web search");
        let request = cozy.open_in_maps(&handoff).expect("maps");

        let urls = handoff.urls.lock().expect("url log lock");
        assert_eq!(urls[0], "tel:55123456");
        assert!(urls[1].starts_with(WEB_SEARCH_BASE));
        assert!(urls[1].ends_with("Cozy%20Dog"));
        assert_eq!(handoff.launches.lock().expect("launch log lock")[0], request);
    }

    #[test]
    fn refused_handoff_becomes_failure() {
        let handoff = RecordingHandoff {
            refuse: true,
            ..Default::default()
        };

        let failure = restaurant("(555) 123-4567").open_in_maps(&handoff).unwrap_err();
        assert_eq!(
            failure,
            SearchFailure::HandoffFailed {
                target: "maps".to_string(),
                details: "no handler installed".to_string(),
            }
        );
    }

    #[test]
    fn call_without_phone_never_reaches_dialer() {
        let handoff = RecordingHandoff::default();
        let failure = restaurant("None").call(&handoff).unwrap_err();

        assert!(matches!(failure, SearchFailure::NoPhoneOnFile { .. }));
        assert!(handoff.urls.lock().expect("url log lock").is_empty());
    }
}
