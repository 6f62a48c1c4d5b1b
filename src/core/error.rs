use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("current age cannot be derived from birth date {birth_date}")]
    AgeUnavailable { birth_date: NaiveDate },

    #[error("current age {current_age} is beyond life expectancy age {life_expectancy_age}")]
    InvalidAgeRange {
        current_age: u32,
        life_expectancy_age: u32,
    },
}
