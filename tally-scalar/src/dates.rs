//! Distance between two calendar dates

use chrono::NaiveDate;
use serde::Serialize;
use tally_plugin::prelude::*;

use crate::helpers::extract_date;

/// Average Gregorian month length in days
pub const DAYS_PER_MONTH: f64 = 30.44;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DateSpan {
    /// Absolute whole days
    pub days: i64,
    /// Rounded to one decimal
    pub weeks: f64,
    /// Rounded to one decimal
    pub months: f64,
}

/// Span between two dates, in either order
pub fn date_difference(start: NaiveDate, end: NaiveDate) -> DateSpan {
    let days = (end - start).num_days().abs();
    DateSpan {
        days,
        weeks: round_to(days as f64 / 7.0, 1),
        months: round_to(days as f64 / DAYS_PER_MONTH, 1),
    }
}

pub struct DateDifferenceConverter;

static DATE_EXAMPLES: [&str; 1] = ["2024-01-01 to 2024-12-31 = 365 days ≈ 52.1 weeks ≈ 12.0 months"];

impl ConverterPlugin for DateDifferenceConverter {
    fn meta(&self) -> ConverterMeta {
        ConverterMeta {
            name: "dates",
            title: "Date Difference",
            icon: "📅",
            description: "Days, weeks and months between two dates",
            fields: vec![
                FieldMeta::entry("start", "Start  (YYYY-MM-DD)"),
                FieldMeta::entry("end", "End    (YYYY-MM-DD)"),
            ],
            failure: "Use format  YYYY-MM-DD",
            examples: &DATE_EXAMPLES,
            category: "dates",
        }
    }

    fn compute(&self, fields: &Fields, _ctx: &ConvertContext) -> Result<String, TallyError> {
        let span = date_difference(extract_date(fields, "start")?, extract_date(fields, "end")?);
        Ok(format!(
            "{} days\n≈ {} weeks  ≈ {} months",
            span.days,
            format_real(span.weeks),
            format_real(span.months)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn page(start: &str, end: &str) -> String {
        let fields = Fields::new().with("start", start).with("end", end);
        DateDifferenceConverter.calculate(&fields, &ConvertContext::new())
    }

    #[test]
    fn test_leap_year_span() {
        let span = date_difference(ymd(2024, 1, 1), ymd(2024, 12, 31));
        assert_eq!(span, DateSpan { days: 365, weeks: 52.1, months: 12.0 });
    }

    #[test]
    fn test_order_does_not_matter() {
        let forward = date_difference(ymd(2024, 2, 1), ymd(2024, 3, 1));
        let backward = date_difference(ymd(2024, 3, 1), ymd(2024, 2, 1));
        assert_eq!(forward, backward);
        assert_eq!(forward.days, 29);
    }

    #[test]
    fn test_page_text() {
        assert_eq!(page("2024-01-01", "2024-12-31"), "365 days\n≈ 52.1 weeks  ≈ 12.0 months");
        assert_eq!(page("2024-02-01", "2024-03-01"), "29 days\n≈ 4.1 weeks  ≈ 1.0 months");
        assert_eq!(page("2024-01-01", "tomorrow"), "Use format  YYYY-MM-DD");
    }
}
