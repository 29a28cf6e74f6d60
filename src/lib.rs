//! # SkibidiGo Core
//!
//! Local persistence and aggregation core for the SkibidiGo facility
//! finder. The mobile shell owns navigation, maps, and gestures; this
//! crate owns the data:
//!
//! - SQLite store for saved facilities and user comments
//! - Read-time rating aggregation over the shipped seed dataset
//! - Reducer-based application state synchronized with the store
//! - Pure filter/sort functions over facility snapshots
//!
//! ## Quick Start
//!
//! ```rust
//! use skibidigo_core::{seed_toilets, AppController, ToiletStore};
//!
//! let store = ToiletStore::in_memory().expect("open store");
//! let mut app = AppController::new(&store);
//!
//! let toilet = seed_toilets().into_iter().next().unwrap();
//! assert!(app.save(&toilet));
//!
//! app.load_saved();
//! assert_eq!(app.state().saved_toilets.len(), 1);
//! ```

// Core data model
pub mod types;
pub use types::{Feature, GenderType, GeoPoint, OperatingHours, Review, Toilet, ToiletType};

// Store-open / migration errors
pub mod error;
pub use error::{Result, StoreError};

// SQLite store for saved facilities and comments
pub mod store;
pub use store::ToiletStore;

// Read-time rating aggregation (impl blocks on ToiletStore)
pub mod stats;

// Reducer-based application state
pub mod state;
pub use state::{reduce, Action, AppController, AppState};

// Pure filter/sort functions
pub mod filter;
pub use filter::{
    apply_filters, sort_by, sort_by_distance, sort_by_rating, AdvancedFilter, FilterOptions,
    GenderFilter, SortOption, TypeFilter,
};

// Shipped reference dataset
pub mod seed;
pub use seed::seed_toilets;

/// Initialize logging for Android (called once by the mobile shell)
#[cfg(target_os = "android")]
pub fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("SkibidigoCore"),
    );
}

#[cfg(not(target_os = "android"))]
pub fn init_logging() {
    // No-op on non-Android platforms
}
