//! Shared utility functions for HydroMap crates.

/// Period-of-record date helpers
pub mod dates {
    use crate::error::DateError;
    use chrono::{Datelike, NaiveDate};

    /// Date layouts seen in catalog `DatasetPORStart` / `DatasetPOREnd` fields.
    const POR_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y", "%Y/%m/%d", "%m-%d-%Y"];

    /// Parse a period-of-record date string.
    ///
    /// Accepts plain dates in any of the catalog layouts as well as
    /// timestamps ("2001-10-01 00:00:00", "2001-10-01T00:00:00"), in which
    /// case only the date part is read.
    pub fn parse_por_date(s: &str) -> Result<NaiveDate, DateError> {
        let trimmed = s.trim();
        let date_part = trimmed
            .split(|c| c == ' ' || c == 'T')
            .next()
            .unwrap_or("");
        if date_part.is_empty() {
            return Err(DateError(format!("empty date '{}'", s)));
        }
        POR_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
            .ok_or_else(|| DateError(format!("unrecognized date '{}'", s)))
    }

    /// Get the calendar year of a period-of-record date.
    ///
    /// Falls back to a leading four-digit year ("1950", "1950-??") when the
    /// full date does not parse. Returns None for anything else.
    pub fn por_year(s: &str) -> Option<i32> {
        if let Ok(date) = parse_por_date(s) {
            return Some(date.year());
        }
        let trimmed = s.trim();
        let head = trimmed.get(0..4)?;
        if head.chars().all(|c| c.is_ascii_digit()) {
            head.parse().ok()
        } else {
            None
        }
    }

    /// Render a period of record as "<start year> - <end year>".
    ///
    /// A missing or unparseable side renders as empty text.
    pub fn format_por(start: Option<&str>, end: Option<&str>) -> String {
        let year = |s: Option<&str>| {
            s.and_then(por_year)
                .map(|y| y.to_string())
                .unwrap_or_default()
        };
        format!("{} - {}", year(start), year(end))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_por_date_formats() {
            let expected = NaiveDate::from_ymd_opt(1987, 10, 1).unwrap();
            assert_eq!(parse_por_date("1987-10-01").unwrap(), expected);
            assert_eq!(parse_por_date("19871001").unwrap(), expected);
            assert_eq!(parse_por_date("10/01/1987").unwrap(), expected);
            assert_eq!(parse_por_date("1987-10-01 00:00:00").unwrap(), expected);
            assert_eq!(parse_por_date("1987-10-01T06:30:00").unwrap(), expected);
        }

        #[test]
        fn test_parse_por_date_rejects_garbage() {
            assert!(parse_por_date("").is_err());
            assert!(parse_por_date("   ").is_err());
            assert!(parse_por_date("not a date").is_err());
        }

        #[test]
        fn test_por_year() {
            assert_eq!(por_year("2019-09-30"), Some(2019));
            assert_eq!(por_year("1950"), Some(1950));
            assert_eq!(por_year("nan"), None);
            assert_eq!(por_year(""), None);
        }

        #[test]
        fn test_format_por() {
            assert_eq!(
                format_por(Some("1911-10-01"), Some("2020-09-30")),
                "1911 - 2020"
            );
            assert_eq!(format_por(Some("1911-10-01"), None), "1911 - ");
            assert_eq!(format_por(None, None), " - ");
        }
    }
}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
