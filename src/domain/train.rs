//! Train record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Train {
    /// Storage-assigned identifier; `0` until persisted.
    pub id: i64,
    pub carrier: String,
    pub mileage: f32,
    pub technical_number: String,
    /// Registration day, no time component.
    pub registration_date: NaiveDate,
    pub manager_phone_number: String,
}

impl Train {
    /// Create an unsaved train.
    pub fn new(
        carrier: impl Into<String>,
        mileage: f32,
        technical_number: impl Into<String>,
        registration_date: NaiveDate,
        manager_phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            carrier: carrier.into(),
            mileage,
            technical_number: technical_number.into(),
            registration_date,
            manager_phone_number: manager_phone_number.into(),
        }
    }

    /// The two rows seeded on every schema reset.
    pub fn test_data() -> Vec<Train> {
        vec![
            Train::new(
                "XYZ Railways",
                1200.5,
                "TR12345",
                calendar_date(2023, 1, 15),
                "+1234567890",
            ),
            Train::new(
                "ABC Express",
                800.2,
                "TRS4321",
                calendar_date(2023, 2, 20),
                "+9876543210",
            ),
        ]
    }

    /// The train the demo run adds after seeding.
    pub fn demo_addition() -> Train {
        Train::new(
            "BelX",
            19800.5,
            "KA321",
            calendar_date(2002, 3, 12),
            "+3806892331",
        )
    }
}

/// Only for the constant records above; every call site passes a valid date.
fn calendar_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
