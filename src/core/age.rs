use chrono::{Datelike, NaiveDate};

use super::error::ProjectionError;

/// Whole years elapsed between `birth_date` and `today`. The caller supplies
/// `today`; the projection itself never reads the clock.
pub fn current_age(birth_date: NaiveDate, today: NaiveDate) -> Result<u32, ProjectionError> {
    if birth_date > today {
        return Err(ProjectionError::AgeUnavailable { birth_date });
    }

    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    Ok(age.max(0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn counts_completed_years_only() {
        let birth = date(1990, 6, 15);
        assert_eq!(current_age(birth, date(2026, 6, 14)), Ok(35));
        assert_eq!(current_age(birth, date(2026, 6, 15)), Ok(36));
        assert_eq!(current_age(birth, date(2026, 12, 31)), Ok(36));
    }

    #[test]
    fn born_today_is_age_zero() {
        let today = date(2026, 10, 19);
        assert_eq!(current_age(today, today), Ok(0));
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let birth = date(2030, 1, 1);
        let err = current_age(birth, date(2026, 10, 19)).expect_err("future birth date");
        assert_eq!(err, ProjectionError::AgeUnavailable { birth_date: birth });
    }

    #[test]
    fn leap_day_birthday_waits_for_march_in_common_years() {
        let birth = date(2000, 2, 29);
        assert_eq!(current_age(birth, date(2025, 2, 28)), Ok(24));
        assert_eq!(current_age(birth, date(2025, 3, 1)), Ok(25));
    }
}
