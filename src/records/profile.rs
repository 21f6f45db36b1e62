//! User health profile.

use crate::types::UserId;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Demographics, medical history and lifestyle for one user. Every field may be unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub user_id: Option<UserId>,

    // Demographics
    pub date_of_birth: Option<NaiveDate>,
    pub sex: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub blood_type: Option<String>,

    // Medical history
    pub conditions: Option<Vec<String>>,
    pub allergies: Option<Vec<String>>,
    pub surgeries: Option<Vec<String>>,
    pub family_history: Option<Vec<String>>,

    // Lifestyle
    pub diet: Option<String>,
    pub exercise_frequency: Option<String>,
    pub sleep_hours: Option<f64>,
    pub smoking_status: Option<String>,
    pub alcohol_consumption: Option<String>,
    pub stress_level: Option<String>,
}

impl UserProfile {
    /// Age in whole years on `today`. `None` without a birth date or for a future one.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let dob = self.date_of_birth?;
        let mut years = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }

    /// Body-mass index rounded to one decimal.
    pub fn bmi(&self) -> Option<f64> {
        let height_m = self.height_cm? / 100.0;
        let weight = self.weight_kg?;
        if height_m <= 0.0 || weight <= 0.0 {
            return None;
        }
        let bmi = weight / (height_m * height_m);
        Some((bmi * 10.0).round() / 10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let profile = UserProfile {
            date_of_birth: Some(date(1990, 6, 15)),
            ..Default::default()
        };
        assert_eq!(profile.age_on(date(2024, 6, 14)), Some(33));
        assert_eq!(profile.age_on(date(2024, 6, 15)), Some(34));
        assert_eq!(profile.age_on(date(2024, 12, 1)), Some(34));
    }

    #[test]
    fn test_age_missing_or_future() {
        assert_eq!(UserProfile::default().age_on(date(2024, 1, 1)), None);
        let unborn = UserProfile {
            date_of_birth: Some(date(2030, 1, 1)),
            ..Default::default()
        };
        assert_eq!(unborn.age_on(date(2024, 1, 1)), None);
    }

    #[test]
    fn test_bmi_rounds_to_one_decimal() {
        let profile = UserProfile {
            height_cm: Some(180.0),
            weight_kg: Some(75.0),
            ..Default::default()
        };
        assert_eq!(profile.bmi(), Some(23.1));
    }

    #[test]
    fn test_bmi_needs_both_measurements() {
        let profile = UserProfile {
            height_cm: Some(180.0),
            ..Default::default()
        };
        assert_eq!(profile.bmi(), None);
    }
}
