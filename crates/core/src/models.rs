use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
pub const METERS_PER_DEGREE_LATITUDE: f64 = 111_320.0;

/// Span in degrees used when zooming the display onto a selected restaurant.
pub const DISPLAY_SPAN_DEGREES: f64 = 0.025;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in meters (haversine).
    pub fn distance_meters(&self, other: &GeoCoordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

/// Circular lookup area around a center coordinate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SearchRegion {
    pub center: GeoCoordinate,
    pub radius_meters: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl SearchRegion {
    pub fn new(center: GeoCoordinate, radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters,
        }
    }

    /// Equirectangular box enclosing the circle. Longitude degrees shrink with cos(latitude);
    /// at the poles the box spans every longitude.
    pub fn bounding_box(&self) -> BoundingBox {
        let lat_delta = self.radius_meters / METERS_PER_DEGREE_LATITUDE;
        let lat_scale = self.center.latitude.to_radians().cos();
        let lon_delta = if lat_scale.abs() < f64::EPSILON {
            180.0
        } else {
            (self.radius_meters / (METERS_PER_DEGREE_LATITUDE * lat_scale)).min(180.0)
        };

        BoundingBox {
            min_latitude: (self.center.latitude - lat_delta).max(-90.0),
            max_latitude: (self.center.latitude + lat_delta).min(90.0),
            min_longitude: (self.center.longitude - lon_delta).max(-180.0),
            max_longitude: (self.center.longitude + lon_delta).min(180.0),
        }
    }

    pub fn contains(&self, point: &GeoCoordinate) -> bool {
        self.center.distance_meters(point) <= self.radius_meters
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DisplayRegion {
    pub center: GeoCoordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// Raw record returned by a place lookup. Every address component is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Candidate {
    pub name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub sub_thoroughfare: Option<String>,
    #[serde(default)]
    pub thoroughfare: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub administrative_area: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    pub coordinate: GeoCoordinate,
}

impl Default for GeoCoordinate {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Display-ready restaurant produced by one successful search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedRestaurant {
    pub name: String,
    pub formatted_address: String,
    pub phone_number: String,
    pub coordinate: GeoCoordinate,
}

impl SelectedRestaurant {
    pub fn display_region(&self) -> DisplayRegion {
        DisplayRegion {
            center: self.coordinate,
            latitude_delta: DISPLAY_SPAN_DEGREES,
            longitude_delta: DISPLAY_SPAN_DEGREES,
        }
    }

    /// `"None"` is the display form for a missing phone, so a source number that is literally
    /// `"None"` also reads as no phone.
    pub fn has_phone(&self) -> bool {
        self.phone_number != crate::engine::NO_PHONE
    }
}
