//! Pure filter and sort functions over facility snapshots.
//!
//! All functions return new vectors; inputs are never mutated. The
//! engine does no validation: an all-false type or gender group simply
//! matches nothing, so the UI must check `FilterOptions::has_selection`
//! before invoking `apply_filters`.

use serde::{Deserialize, Serialize};

use crate::types::{Feature, GenderType, Toilet, ToiletType};

/// Facility category flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFilter {
    pub public: bool,
    pub private: bool,
}

/// Gender designation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderFilter {
    pub unisex: bool,
    pub gender_separated: bool,
}

/// Advanced option flags. Only applied when at least one is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedFilter {
    pub accessibility: bool,
    pub service_fee: bool,
    pub water_laser: bool,
}

/// Ephemeral filter selection; three independent boolean groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub types: TypeFilter,
    pub gender_designation: GenderFilter,
    pub advanced_options: AdvancedFilter,
}

impl Default for FilterOptions {
    /// The app's initial selection: every category and designation
    /// enabled, accessibility pre-selected among the advanced options.
    fn default() -> Self {
        Self {
            types: TypeFilter {
                public: true,
                private: true,
            },
            gender_designation: GenderFilter {
                unisex: true,
                gender_separated: true,
            },
            advanced_options: AdvancedFilter {
                accessibility: true,
                service_fee: false,
                water_laser: false,
            },
        }
    }
}

impl FilterOptions {
    /// UI pre-validation: at least one type flag and one gender flag
    /// must be enabled, otherwise `apply_filters` returns nothing.
    pub fn has_selection(&self) -> bool {
        (self.types.public || self.types.private)
            && (self.gender_designation.unisex || self.gender_designation.gender_separated)
    }

    fn any_advanced(&self) -> bool {
        self.advanced_options.accessibility
            || self.advanced_options.service_fee
            || self.advanced_options.water_laser
    }
}

/// Filter a facility snapshot by the selected flag groups.
///
/// A facility passes when its category matches an enabled type flag AND
/// its designation matches an enabled gender flag AND, if any advanced
/// option is enabled, it satisfies every enabled advanced predicate.
/// With no advanced option enabled the advanced step is skipped
/// entirely.
pub fn apply_filters(toilets: &[Toilet], options: &FilterOptions) -> Vec<Toilet> {
    let any_advanced = options.any_advanced();

    toilets
        .iter()
        .filter(|toilet| {
            let type_match = (options.types.public && toilet.toilet_type == ToiletType::Public)
                || (options.types.private && toilet.toilet_type == ToiletType::Private);

            let gender_match = (options.gender_designation.unisex
                && toilet.gender == GenderType::Unisex)
                || (options.gender_designation.gender_separated
                    && toilet.gender == GenderType::GenderSeparated);

            if !any_advanced {
                return type_match && gender_match;
            }

            let accessibility_match = !options.advanced_options.accessibility
                || toilet.has_feature(Feature::Accessible);
            let service_fee_match = !options.advanced_options.service_fee || !toilet.has_fee;
            let water_laser_match = !options.advanced_options.water_laser || toilet.water_laser;

            type_match
                && gender_match
                && accessibility_match
                && service_fee_match
                && water_laser_match
        })
        .cloned()
        .collect()
}

/// Sort dispatch key for the results list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    Nearest,
    Rating,
}

/// Ascending by distance; stable for ties.
pub fn sort_by_distance(toilets: &[Toilet]) -> Vec<Toilet> {
    let mut sorted = toilets.to_vec();
    sorted.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    sorted
}

/// Descending by rating; stable for ties.
pub fn sort_by_rating(toilets: &[Toilet]) -> Vec<Toilet> {
    let mut sorted = toilets.to_vec();
    sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    sorted
}

/// Dispatch to the sort matching the selected option.
pub fn sort_by(option: SortOption, toilets: &[Toilet]) -> Vec<Toilet> {
    match option {
        SortOption::Nearest => sort_by_distance(toilets),
        SortOption::Rating => sort_by_rating(toilets),
    }
}
