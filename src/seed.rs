//! Shipped reference dataset of facilities.
//!
//! This is the static content the app renders before any user data
//! exists. It is never persisted or mutated; effective ratings and
//! review counts are derived at read time by the `stats` module.

use std::collections::BTreeSet;

use crate::types::{Feature, GenderType, GeoPoint, OperatingHours, Review, Toilet, ToiletType};

fn review(id: i64, user_name: &str, rating: u8, comment: &str) -> Review {
    Review {
        id,
        user_name: user_name.to_string(),
        rating,
        comment: comment.to_string(),
        timestamp: None,
        user_id: None,
    }
}

fn hours(weekdays: &str, weekends: &str) -> OperatingHours {
    OperatingHours {
        weekdays: weekdays.to_string(),
        weekends: weekends.to_string(),
    }
}

/// The shipped facility list (Da Nang pilot area).
pub fn seed_toilets() -> Vec<Toilet> {
    vec![
        Toilet {
            id: 1,
            name: "Han Market Public Restroom".to_string(),
            address: "119 Trần Phú, Hải Châu 1, Hải Châu".to_string(),
            coordinates: GeoPoint::new(16.0678, 108.2243),
            toilet_type: ToiletType::Public,
            gender: GenderType::GenderSeparated,
            features: BTreeSet::from([Feature::Accessible]),
            has_fee: true,
            water_laser: false,
            rating: 3.2,
            review_count: 24,
            distance: 0.3,
            operating_hours: hours("7:00 AM - 9:00 PM", "7:00 AM - 10:00 PM"),
            reviews: vec![
                review(101, "Linh N.", 3, "Clean enough but very basic facilities."),
                review(
                    102,
                    "Thomas W.",
                    4,
                    "Better than expected for a market toilet. Small fee required.",
                ),
            ],
        },
        Toilet {
            id: 2,
            name: "Da Nang International Airport".to_string(),
            address: "Hải Châu District, Terminal 1".to_string(),
            coordinates: GeoPoint::new(16.0556, 108.1992),
            toilet_type: ToiletType::Public,
            gender: GenderType::GenderSeparated,
            features: BTreeSet::from([Feature::Accessible, Feature::WaterLaser]),
            has_fee: false,
            water_laser: true,
            rating: 4.7,
            review_count: 118,
            distance: 5.2,
            operating_hours: hours("24 hours", "24 hours"),
            reviews: vec![
                review(
                    201,
                    "Mai T.",
                    5,
                    "Very clean and modern facilities in the international terminal!",
                ),
                review(
                    202,
                    "John S.",
                    4,
                    "Good airport bathrooms with all necessary amenities.",
                ),
            ],
        },
        Toilet {
            id: 3,
            name: "Vincom Plaza Da Nang".to_string(),
            address: "910-910A Ngô Quyền, An Hải Bắc, Sơn Trà".to_string(),
            coordinates: GeoPoint::new(16.0612, 108.2345),
            toilet_type: ToiletType::Private,
            gender: GenderType::GenderSeparated,
            features: BTreeSet::from([Feature::Accessible, Feature::WaterLaser]),
            has_fee: false,
            water_laser: true,
            rating: 4.5,
            review_count: 87,
            distance: 1.8,
            operating_hours: hours("9:00 AM - 10:00 PM", "9:00 AM - 11:00 PM"),
            reviews: vec![
                review(
                    301,
                    "Huy D.",
                    5,
                    "High-end mall with excellent restroom facilities.",
                ),
                review(
                    302,
                    "Sarah L.",
                    4,
                    "Clean and well maintained. Located on each floor.",
                ),
            ],
        },
        Toilet {
            id: 4,
            name: "My Khe Beach Public Facilities".to_string(),
            address: "Hoàng Sa, Phước Mỹ, Sơn Trà".to_string(),
            coordinates: GeoPoint::new(16.0633, 108.2486),
            toilet_type: ToiletType::Public,
            gender: GenderType::Unisex,
            features: BTreeSet::from([Feature::Accessible]),
            has_fee: true,
            water_laser: false,
            rating: 3.0,
            review_count: 42,
            distance: 2.7,
            operating_hours: hours("6:00 AM - 8:00 PM", "6:00 AM - 9:00 PM"),
            reviews: vec![
                review(
                    401,
                    "Tuan A.",
                    3,
                    "Basic beach facilities, but they charge a small fee. Bring your own paper.",
                ),
                review(
                    402,
                    "Emma J.",
                    2,
                    "Acceptable for a quick stop, but not very clean during busy times.",
                ),
            ],
        },
        Toilet {
            id: 5,
            name: "Lotte Mart Da Nang".to_string(),
            address: "6 Nại Nam, Hải Châu".to_string(),
            coordinates: GeoPoint::new(16.0306, 108.2229),
            toilet_type: ToiletType::Private,
            gender: GenderType::GenderSeparated,
            features: BTreeSet::from([Feature::Accessible, Feature::WaterLaser]),
            has_fee: false,
            water_laser: true,
            rating: 4.4,
            review_count: 63,
            distance: 3.1,
            operating_hours: hours("8:00 AM - 10:00 PM", "8:00 AM - 10:30 PM"),
            reviews: vec![
                review(
                    501,
                    "Hanh T.",
                    4,
                    "Clean facilities with good amenities. Located on 3rd floor.",
                ),
                review(
                    502,
                    "Derek M.",
                    5,
                    "Modern and well-maintained. Highly recommended if shopping nearby.",
                ),
            ],
        },
        Toilet {
            id: 6,
            name: "Dragon Bridge Public Restroom".to_string(),
            address: "Trần Hưng Đạo, An Hải Tây, Sơn Trà".to_string(),
            coordinates: GeoPoint::new(16.0614, 108.2276),
            toilet_type: ToiletType::Public,
            gender: GenderType::GenderSeparated,
            features: BTreeSet::from([Feature::Accessible]),
            has_fee: true,
            water_laser: false,
            rating: 3.6,
            review_count: 51,
            distance: 0.9,
            operating_hours: hours("6:00 AM - 11:00 PM", "6:00 AM - 12:00 AM"),
            reviews: vec![
                review(
                    601,
                    "Minh N.",
                    4,
                    "Convenient location near the famous Dragon Bridge. Small fee but worth it.",
                ),
                review(
                    602,
                    "Kelly R.",
                    3,
                    "Acceptable cleanliness. Gets busy during bridge fire shows on weekends.",
                ),
            ],
        },
    ]
}
