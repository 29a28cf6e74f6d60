//! In-memory application state bridging the store to UI consumers.
//!
//! A single authoritative snapshot (`AppState`) is updated only through
//! a closed set of tagged actions, applied synchronously in arrival
//! order by `reduce`. The `AppController` wraps a borrowed store and
//! drives the load/mutate cycles: mutations call the store, then patch
//! the snapshot on success instead of reloading, so the snapshot is a
//! best-effort mirror and the store stays the source of truth.
//!
//! Taking `&mut self` for every mutation serializes the calls, so a
//! save and a reload can never interleave; the last call applied wins
//! by construction.
//!
//! The controller never panics or propagates store faults; failures
//! land in `AppState::error` and the operation's boolean result, and
//! `is_loading` is always cleared as the final step.

use chrono::Utc;

use crate::store::ToiletStore;
use crate::types::{Review, Toilet};

/// Snapshot exposed to UI collaborators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Saved facilities, most recently saved first
    pub saved_toilets: Vec<Toilet>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// The closed set of state transitions.
#[derive(Debug, Clone)]
pub enum Action {
    SetLoading(bool),
    SetError(Option<String>),
    SetSavedToilets(Vec<Toilet>),
    AddSavedToilet(Toilet),
    RemoveSavedToilet(i64),
    AddComment {
        toilet_id: i64,
        review: Review,
    },
    UpdateComment {
        toilet_id: i64,
        comment_id: i64,
        rating: u8,
        comment: String,
    },
    DeleteComment {
        toilet_id: i64,
        comment_id: i64,
    },
    Reset,
}

/// Apply one action to the state, in place.
pub fn reduce(state: &mut AppState, action: Action) {
    match action {
        Action::SetLoading(loading) => state.is_loading = loading,

        Action::SetError(error) => state.error = error,

        Action::SetSavedToilets(toilets) => state.saved_toilets = toilets,

        Action::AddSavedToilet(toilet) => state.saved_toilets.insert(0, toilet),

        Action::RemoveSavedToilet(toilet_id) => {
            state.saved_toilets.retain(|t| t.id != toilet_id)
        }

        Action::AddComment { toilet_id, review } => {
            if let Some(toilet) = state.saved_toilets.iter_mut().find(|t| t.id == toilet_id) {
                toilet.reviews.insert(0, review);
                toilet.review_count += 1;
            }
        }

        Action::UpdateComment {
            toilet_id,
            comment_id,
            rating,
            comment,
        } => {
            if let Some(toilet) = state.saved_toilets.iter_mut().find(|t| t.id == toilet_id) {
                if let Some(review) = toilet.reviews.iter_mut().find(|r| r.id == comment_id) {
                    review.rating = rating;
                    review.comment = comment;
                    review.timestamp = Some(Utc::now().to_rfc3339());
                }
            }
        }

        Action::DeleteComment {
            toilet_id,
            comment_id,
        } => {
            if let Some(toilet) = state.saved_toilets.iter_mut().find(|t| t.id == toilet_id) {
                toilet.reviews.retain(|r| r.id != comment_id);
                toilet.review_count = toilet.review_count.saturating_sub(1);
            }
        }

        Action::Reset => *state = AppState::default(),
    }
}

/// Drives the state against a store owned by the composition root.
pub struct AppController<'a> {
    store: &'a ToiletStore,
    state: AppState,
}

impl<'a> AppController<'a> {
    pub fn new(store: &'a ToiletStore) -> Self {
        Self {
            store,
            state: AppState::default(),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        reduce(&mut self.state, action);
    }

    /// Replace the in-memory list with the store's saved facilities.
    pub fn load_saved(&mut self) {
        self.dispatch(Action::SetLoading(true));
        self.dispatch(Action::SetError(None));
        let toilets = self.store.saved_toilets();
        self.dispatch(Action::SetSavedToilets(toilets));
        self.dispatch(Action::SetLoading(false));
    }

    /// Persist a facility and prepend it to the snapshot on success.
    pub fn save(&mut self, toilet: &Toilet) -> bool {
        self.dispatch(Action::SetLoading(true));
        self.dispatch(Action::SetError(None));

        let success = self.store.save_toilet(toilet);
        if success {
            self.dispatch(Action::AddSavedToilet(toilet.clone()));
        } else {
            self.dispatch(Action::SetError(Some("Failed to save facility".to_string())));
        }

        self.dispatch(Action::SetLoading(false));
        success
    }

    /// Remove a saved facility from the store and the snapshot.
    pub fn unsave(&mut self, toilet_id: i64) -> bool {
        self.dispatch(Action::SetLoading(true));
        self.dispatch(Action::SetError(None));

        let success = self.store.remove_saved(toilet_id);
        if success {
            self.dispatch(Action::RemoveSavedToilet(toilet_id));
        } else {
            self.dispatch(Action::SetError(Some(
                "Failed to remove facility".to_string(),
            )));
        }

        self.dispatch(Action::SetLoading(false));
        success
    }

    /// Post a comment and patch any saved copy of the facility.
    ///
    /// The patched review carries a provisional id (current epoch
    /// millis) until the next reload fetches the store-assigned one.
    pub fn add_comment(
        &mut self,
        toilet_id: i64,
        user_name: &str,
        rating: u8,
        comment: &str,
        user_id: Option<&str>,
    ) -> bool {
        self.dispatch(Action::SetLoading(true));
        self.dispatch(Action::SetError(None));

        let success = self
            .store
            .post_comment(toilet_id, user_name, rating, comment, user_id);
        if success {
            let review = Review {
                id: Utc::now().timestamp_millis(),
                user_name: user_name.to_string(),
                rating,
                comment: comment.to_string(),
                timestamp: Some(Utc::now().to_rfc3339()),
                user_id: user_id.map(str::to_string),
            };
            self.dispatch(Action::AddComment { toilet_id, review });
        } else {
            self.dispatch(Action::SetError(Some("Failed to add comment".to_string())));
        }

        self.dispatch(Action::SetLoading(false));
        success
    }

    /// Edit a comment and patch any saved copy of the facility.
    pub fn update_comment(
        &mut self,
        toilet_id: i64,
        comment_id: i64,
        rating: u8,
        comment: &str,
    ) -> bool {
        self.dispatch(Action::SetLoading(true));
        self.dispatch(Action::SetError(None));

        let success = self.store.update_comment(comment_id, rating, comment);
        if success {
            self.dispatch(Action::UpdateComment {
                toilet_id,
                comment_id,
                rating,
                comment: comment.to_string(),
            });
        } else {
            self.dispatch(Action::SetError(Some(
                "Failed to update comment".to_string(),
            )));
        }

        self.dispatch(Action::SetLoading(false));
        success
    }

    /// Delete a comment and patch any saved copy of the facility.
    pub fn delete_comment(&mut self, toilet_id: i64, comment_id: i64) -> bool {
        self.dispatch(Action::SetLoading(true));
        self.dispatch(Action::SetError(None));

        let success = self.store.delete_comment(comment_id);
        if success {
            self.dispatch(Action::DeleteComment {
                toilet_id,
                comment_id,
            });
        } else {
            self.dispatch(Action::SetError(Some(
                "Failed to delete comment".to_string(),
            )));
        }

        self.dispatch(Action::SetLoading(false));
        success
    }

    /// Drop the snapshot back to its initial value. The store is not
    /// touched.
    pub fn reset(&mut self) {
        self.dispatch(Action::Reset);
    }
}
