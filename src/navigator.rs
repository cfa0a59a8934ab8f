use crate::errors::TrackerError;
use chrono::{Duration, Local, NaiveDate};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The date currently being viewed.
///
/// `set_date` is permissive: any non-empty string is kept as-is. Only
/// `shift` needs a real calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateNavigator {
    current: String,
}

impl DateNavigator {
    pub fn today() -> Self {
        Self::at(Local::now().date_naive())
    }

    pub fn at(date: NaiveDate) -> Self {
        Self {
            current: date_key(date),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn shift(&mut self, delta_days: i64) -> Result<&str, TrackerError> {
        let date = parse_date(&self.current)?;
        let shifted = Duration::try_days(delta_days)
            .and_then(|delta| date.checked_add_signed(delta))
            .ok_or_else(|| {
                TrackerError::InvalidDate(format!("{} {delta_days:+} days", self.current))
            })?;
        self.current = date_key(shifted);
        Ok(&self.current)
    }

    pub fn set_date(&mut self, date: &str) -> Result<(), TrackerError> {
        let date = date.trim();
        if date.is_empty() {
            return Err(TrackerError::InvalidDate(String::new()));
        }
        self.current = date.to_string();
        Ok(())
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| TrackerError::InvalidDate(raw.to_string()))
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(raw: &str) -> DateNavigator {
        DateNavigator::at(parse_date(raw).unwrap())
    }

    #[test]
    fn shift_rolls_over_month_and_year() {
        let mut n = nav("2024-12-31");
        assert_eq!(n.shift(1).unwrap(), "2025-01-01");
        assert_eq!(n.shift(-1).unwrap(), "2024-12-31");

        let mut n = nav("2024-02-28");
        assert_eq!(n.shift(1).unwrap(), "2024-02-29");
        assert_eq!(n.shift(1).unwrap(), "2024-03-01");
        assert_eq!(n.shift(-366).unwrap(), "2023-03-01");
    }

    #[test]
    fn set_date_is_permissive() {
        let mut n = nav("2024-06-10");
        n.set_date("2024-13-40").unwrap();
        assert_eq!(n.current(), "2024-13-40");
        assert!(matches!(n.shift(1), Err(TrackerError::InvalidDate(_))));
        assert_eq!(n.current(), "2024-13-40");
    }

    #[test]
    fn set_date_rejects_empty() {
        let mut n = nav("2024-06-10");
        assert!(n.set_date("  ").is_err());
        assert_eq!(n.current(), "2024-06-10");
    }

    #[test]
    fn today_is_well_formed() {
        let n = DateNavigator::today();
        assert!(parse_date(n.current()).is_ok());
    }
}
