//! Birth-data intake validation.
//!
//! Form input is checked here before anything is sent to the synthesis service. Validated values
//! serialise to the request body the service expects.

use crate::constants::{DEFAULT_GENDER, DEFAULT_NAME};
use crate::{CoreError, CoreResult};
use astro_types::NonEmptyText;
use chrono::NaiveDateTime;
use serde::Serialize;

/// `dob` and `time` joined with a space, in the format the synthesis service parses.
const BIRTH_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Validated birth data, serialised as the synthesis request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthData {
    name: NonEmptyText,
    gender: NonEmptyText,
    dob: String,
    time: String,
    city: NonEmptyText,
    #[serde(skip)]
    birth_datetime: NaiveDateTime,
}

impl BirthData {
    /// Validates raw form values.
    ///
    /// Blank `name` and `gender` take the service defaults (`User`, `Unknown`).
    ///
    /// # Errors
    ///
    /// - `CoreError::InvalidBirthDateTime` if `dob` is not `YYYY-MM-DD` or `time` is not 24h `HH:MM`
    /// - `CoreError::InvalidText` if `city` is blank or any field is too long
    pub fn new(
        name: Option<&str>,
        gender: Option<&str>,
        dob: &str,
        time: &str,
        city: &str,
    ) -> CoreResult<Self> {
        let name = NonEmptyText::or_default(name, DEFAULT_NAME)
            .map_err(|source| CoreError::InvalidText { field: "name", source })?;
        let gender = NonEmptyText::or_default(gender, DEFAULT_GENDER)
            .map_err(|source| CoreError::InvalidText { field: "gender", source })?;
        let city = NonEmptyText::new(city)
            .map_err(|source| CoreError::InvalidText { field: "city", source })?;

        let dob = dob.trim().to_string();
        let time = time.trim().to_string();
        let birth_datetime =
            NaiveDateTime::parse_from_str(&format!("{dob} {time}"), BIRTH_DATETIME_FORMAT)
                .map_err(CoreError::InvalidBirthDateTime)?;

        Ok(Self {
            name,
            gender,
            dob,
            time,
            city,
            birth_datetime,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn gender(&self) -> &str {
        self.gender.as_str()
    }

    pub fn dob(&self) -> &str {
        &self.dob
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn city(&self) -> &str {
        self.city.as_str()
    }

    /// Local (not UTC) birth date and time.
    pub fn birth_datetime(&self) -> NaiveDateTime {
        self.birth_datetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_types::TextError;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_valid_birth_data() {
        let data = BirthData::new(Some(" Aung "), Some("Male"), "1990-05-17", "08:30", "Yangon")
            .unwrap();
        assert_eq!(data.name(), "Aung");
        assert_eq!(data.gender(), "Male");
        assert_eq!(data.city(), "Yangon");
        let dt = data.birth_datetime();
        assert_eq!((dt.year(), dt.month(), dt.day()), (1990, 5, 17));
        assert_eq!((dt.hour(), dt.minute()), (8, 30));
    }

    #[test]
    fn test_blank_name_and_gender_take_defaults() {
        let data = BirthData::new(None, Some("  "), "2001-12-01", "23:59", "Mandalay").unwrap();
        assert_eq!(data.name(), DEFAULT_NAME);
        assert_eq!(data.gender(), DEFAULT_GENDER);
    }

    #[test]
    fn test_rejects_blank_city() {
        let err = BirthData::new(None, None, "1990-05-17", "08:30", " ").unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidText {
                field: "city",
                source: TextError::Empty
            }
        ));
    }

    #[test]
    fn test_rejects_bad_dates_and_times() {
        for (dob, time) in [
            ("17/05/1990", "08:30"),
            ("1990-02-30", "08:30"),
            ("1990-05-17", "8.30am"),
            ("1990-05-17", "25:00"),
            ("", ""),
        ] {
            let err = BirthData::new(None, None, dob, time, "Yangon").unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidBirthDateTime(_)),
                "{dob} {time}"
            );
        }
    }

    #[test]
    fn test_serialises_request_body() {
        let data = BirthData::new(None, None, "1990-05-17", " 08:30 ", "Yangon").unwrap();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "User",
                "gender": "Unknown",
                "dob": "1990-05-17",
                "time": "08:30",
                "city": "Yangon"
            })
        );
    }
}
