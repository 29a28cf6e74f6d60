//! Core data model for the facility finder.
//!
//! These types mirror the persisted schema and the seed dataset. Wire
//! names are camelCase so the JSON blobs in SQLite and the seed data
//! stay interchangeable with what the app shell renders.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Facility category: publicly operated or inside a private venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToiletType {
    Public,
    Private,
}

impl ToiletType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToiletType::Public => "PUBLIC",
            ToiletType::Private => "PRIVATE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PUBLIC" => Some(ToiletType::Public),
            "PRIVATE" => Some(ToiletType::Private),
            _ => None,
        }
    }
}

/// Gender designation of the facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenderType {
    Unisex,
    GenderSeparated,
}

impl GenderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderType::Unisex => "UNISEX",
            GenderType::GenderSeparated => "GENDER_SEPARATED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "UNISEX" => Some(GenderType::Unisex),
            "GENDER_SEPARATED" => Some(GenderType::GenderSeparated),
            _ => None,
        }
    }
}

/// Optional amenity a facility may offer.
///
/// Stored as a JSON array in the `features` column; kept as a set in
/// memory (no duplicates, order irrelevant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    Accessible,
    WaterLaser,
}

/// A geographic coordinate in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Opening hours as displayed, split by weekday/weekend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OperatingHours {
    pub weekdays: String,
    pub weekends: String,
}

/// A user review of a facility.
///
/// Seed reviews ship without a timestamp or user id; rows read back
/// from the comments table always carry a timestamp, and carry a user
/// id unless they predate the account migration (anonymous/legacy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub user_name: String,
    /// Integer star rating, 1-5
    pub rating: u8,
    pub comment: String,
    /// ISO-8601, absent for seed reviews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Absent for anonymous/legacy comments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// A reviewable, locatable facility record (seed or saved).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toilet {
    /// Stable id assigned by the seed dataset
    pub id: i64,
    pub name: String,
    pub address: String,
    pub coordinates: GeoPoint,
    #[serde(rename = "type")]
    pub toilet_type: ToiletType,
    pub gender: GenderType,
    /// Amenity set; serialized as a JSON array
    pub features: BTreeSet<Feature>,
    pub has_fee: bool,
    pub water_laser: bool,
    /// Displayed average rating, 0.0-5.0
    pub rating: f64,
    pub review_count: u32,
    /// Distance from the user in kilometres (derived)
    pub distance: f64,
    pub operating_hours: OperatingHours,
    /// Embedded reviews, populated for seed data only
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Toilet {
    /// Membership check on the amenity set.
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}
