//! Date format directives accepted in `<date> format:<code>` property values.
//!
//! The set of codes is closed. Each code fixes the field order, the separator
//! and how many digits every field may carry; anything else is rejected before
//! the calendar is consulted.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// Wrong separators, digit counts, or non-digit characters for the format.
    #[error("date text {text:?} does not match format {format}")]
    Shape { text: String, format: DateFormat },

    /// Well-formed digits that name no calendar date, e.g. February 30th.
    #[error("date text {text:?} is not a valid calendar date")]
    OutOfRange { text: String },
}

/// One of the recognized `format:` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    YearMonthDay,
    /// `YYYY-M-D`
    YearMonthDayShort,
    /// `YYYYMMDD`
    Compact,
    /// `MM/DD/YYYY`
    MonthDayYear,
    /// `M/D/YYYY`
    MonthDayYearShort,
}

impl DateFormat {
    pub const ALL: [DateFormat; 5] = [
        DateFormat::YearMonthDay,
        DateFormat::YearMonthDayShort,
        DateFormat::Compact,
        DateFormat::MonthDayYear,
        DateFormat::MonthDayYearShort,
    ];

    pub fn code(self) -> &'static str {
        match self {
            DateFormat::YearMonthDay => "YYYY-MM-DD",
            DateFormat::YearMonthDayShort => "YYYY-M-D",
            DateFormat::Compact => "YYYYMMDD",
            DateFormat::MonthDayYear => "MM/DD/YYYY",
            DateFormat::MonthDayYearShort => "M/D/YYYY",
        }
    }

    /// Exact, case-sensitive lookup of a format code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.code() == code)
    }

    /// Parses `text` (already trimmed) according to this format.
    pub fn parse(self, text: &str) -> Result<NaiveDate, DateParseError> {
        let shape_err = || DateParseError::Shape {
            text: text.to_string(),
            format: self,
        };

        let (year, month, day) = match self {
            DateFormat::Compact => {
                if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(shape_err());
                }
                (&text[..4], &text[4..6], &text[6..])
            }
            DateFormat::YearMonthDay | DateFormat::YearMonthDayShort => {
                let [y, m, d] = split_three(text, '-').ok_or_else(shape_err)?;
                (y, m, d)
            }
            DateFormat::MonthDayYear | DateFormat::MonthDayYearShort => {
                let [m, d, y] = split_three(text, '/').ok_or_else(shape_err)?;
                (y, m, d)
            }
        };

        let min_width = match self {
            DateFormat::YearMonthDayShort | DateFormat::MonthDayYearShort => 1,
            _ => 2,
        };
        if !is_digits(year, 4, 4) || !is_digits(month, min_width, 2) || !is_digits(day, min_width, 2)
        {
            return Err(shape_err());
        }

        // digit runs of bounded width always fit
        let year: i32 = year.parse().map_err(|_| shape_err())?;
        let month: u32 = month.parse().map_err(|_| shape_err())?;
        let day: u32 = day.parse().map_err(|_| shape_err())?;

        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateParseError::OutOfRange {
            text: text.to_string(),
        })
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn split_three(text: &str, separator: char) -> Option<[&str; 3]> {
    let mut parts = text.split(separator);
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), Some(c), None) => Some([a, b, c]),
        _ => None,
    }
}

fn is_digits(field: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&field.len()) && field.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aug_21() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 8, 21).unwrap()
    }

    #[test]
    fn test_every_code_round_trips_through_from_code() {
        for format in DateFormat::ALL {
            assert_eq!(DateFormat::from_code(format.code()), Some(format));
        }
    }

    #[test]
    fn test_unknown_codes_are_rejected() {
        assert_eq!(DateFormat::from_code("DD-MM-YYYY"), None);
        assert_eq!(DateFormat::from_code("yyyy-mm-dd"), None);
        assert_eq!(DateFormat::from_code(" YYYYMMDD"), None);
    }

    #[test]
    fn test_each_format_parses_its_sample() {
        let samples = [
            (DateFormat::YearMonthDay, "2023-08-21"),
            (DateFormat::YearMonthDayShort, "2023-8-21"),
            (DateFormat::YearMonthDayShort, "2023-08-21"),
            (DateFormat::Compact, "20230821"),
            (DateFormat::MonthDayYear, "08/21/2023"),
            (DateFormat::MonthDayYearShort, "8/21/2023"),
            (DateFormat::MonthDayYearShort, "08/21/2023"),
        ];
        for (format, text) in samples {
            assert_eq!(format.parse(text), Ok(aug_21()), "{format} {text}");
        }
    }

    #[test]
    fn test_short_formats_accept_single_digit_fields() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(DateFormat::YearMonthDayShort.parse("2024-1-5"), Ok(expected));
        assert_eq!(DateFormat::MonthDayYearShort.parse("1/5/2024"), Ok(expected));
    }

    #[test]
    fn test_strict_formats_reject_single_digit_fields() {
        assert!(matches!(
            DateFormat::YearMonthDay.parse("2023-8-21"),
            Err(DateParseError::Shape { .. })
        ));
        assert!(matches!(
            DateFormat::MonthDayYear.parse("8/21/2023"),
            Err(DateParseError::Shape { .. })
        ));
    }

    #[test]
    fn test_shape_mismatches() {
        let cases = [
            (DateFormat::YearMonthDay, "notadate"),
            (DateFormat::YearMonthDay, ""),
            (DateFormat::YearMonthDay, "2023/08/21"),
            (DateFormat::YearMonthDay, "2023-08-21-01"),
            (DateFormat::YearMonthDay, "23-08-21"),
            (DateFormat::YearMonthDay, "+023-08-21"),
            (DateFormat::YearMonthDayShort, "2023-123-1"),
            (DateFormat::Compact, "2023821"),
            (DateFormat::Compact, "2023-08-21"),
            (DateFormat::MonthDayYear, "08/21/23"),
            (DateFormat::MonthDayYearShort, "8-21-2023"),
        ];
        for (format, text) in cases {
            assert_eq!(
                format.parse(text),
                Err(DateParseError::Shape {
                    text: text.to_string(),
                    format,
                }),
                "{format} {text}"
            );
        }
    }

    #[test]
    fn test_impossible_calendar_dates_are_out_of_range() {
        assert_eq!(
            DateFormat::MonthDayYear.parse("02/30/2023"),
            Err(DateParseError::OutOfRange {
                text: "02/30/2023".to_string()
            })
        );
        assert!(matches!(
            DateFormat::Compact.parse("20231301"),
            Err(DateParseError::OutOfRange { .. })
        ));
        assert!(matches!(
            DateFormat::YearMonthDay.parse("2023-00-10"),
            Err(DateParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(
            DateFormat::Compact.parse("20240229"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert!(DateFormat::Compact.parse("20230229").is_err());
    }

    #[test]
    fn test_display_prints_code() {
        assert_eq!(DateFormat::MonthDayYear.to_string(), "MM/DD/YYYY");
    }
}
