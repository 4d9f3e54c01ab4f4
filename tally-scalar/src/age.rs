//! Age from a date of birth

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tally_plugin::prelude::*;

use crate::helpers::extract_date;

/// Age broken into years, months and remaining days.
///
/// Months and days are the calendar approximation the age page has always
/// shown: months is the month-number difference modulo 12, days is the
/// distance to this year's birthday modulo 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Age {
    pub years: i32,
    pub months: u32,
    pub days: i64,
}

/// Age on `today` of someone born on `dob`
pub fn age(dob: NaiveDate, today: NaiveDate) -> Result<Age, TallyError> {
    let before_birthday = (today.month(), today.day()) < (dob.month(), dob.day());
    let years = today.year() - dob.year() - i32::from(before_birthday);
    let months = (today.month() as i32 - dob.month() as i32).rem_euclid(12) as u32;

    // No 29 February in a common year
    let birthday = dob.with_year(today.year()).ok_or_else(|| {
        TallyError::date_format(&dob.to_string())
            .with_note(format!("{} has no {}", today.year(), dob.format("%d %B")))
    })?;
    let days = (today - birthday).num_days().abs() % 30;

    Ok(Age { years, months, days })
}

pub struct AgeConverter;

static AGE_EXAMPLES: [&str; 1] = ["1990-06-15 on 2024-03-10 = 33 yrs  9 mos  7 days"];

impl ConverterPlugin for AgeConverter {
    fn meta(&self) -> ConverterMeta {
        ConverterMeta {
            name: "age",
            title: "Age Calculator",
            icon: "🎂",
            description: "Age in years, months and days as of today",
            fields: vec![FieldMeta::entry("dob", "Date of Birth  (YYYY-MM-DD)")],
            failure: "Use format  YYYY-MM-DD",
            examples: &AGE_EXAMPLES,
            category: "dates",
        }
    }

    fn compute(&self, fields: &Fields, ctx: &ConvertContext) -> Result<String, TallyError> {
        let dob = extract_date(fields, "dob")?;
        let age = age(dob, ctx.today)?;
        Ok(format!("{} yrs  {} mos  {} days", age.years, age.months, age.days))
    }
}
