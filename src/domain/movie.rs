//! Movie record.

use serde::{Deserialize, Serialize};

/// Amount added to a rating by the old-movie bump.
pub const OLD_MOVIE_RATING_BONUS: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Storage-assigned identifier; `0` until persisted.
    pub id: i64,
    pub title: String,
    pub rating: f32,
    pub release_year: i32,
}

impl Movie {
    pub fn new(title: impl Into<String>, rating: f32, release_year: i32) -> Self {
        Self {
            id: 0,
            title: title.into(),
            rating,
            release_year,
        }
    }

    /// Movies inserted by the demo run.
    pub fn samples() -> Vec<Movie> {
        vec![
            Movie::new("Inception", 8.8, 2010),
            Movie::new("The Matrix", 8.7, 1999),
            Movie::new("Interstellar", 8.6, 2014),
        ]
    }
}
