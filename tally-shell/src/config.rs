//! Shell configuration from the environment

use chrono::NaiveDate;
use tally::AngleMode;
use tally_core::TallyError;

pub const ANGLE_MODE_VAR: &str = "TALLY_ANGLE_MODE";
pub const TODAY_VAR: &str = "TALLY_TODAY";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShellConfig {
    pub angle_mode: AngleMode,
    /// Pinned date for the age page; the local date when unset
    pub today: Option<NaiveDate>,
}

impl ShellConfig {
    pub fn from_env() -> Result<Self, TallyError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Unset or blank variables keep
    /// their defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, TallyError> {
        let mut config = ShellConfig::default();

        if let Some(mode) = non_blank(get(ANGLE_MODE_VAR)) {
            config.angle_mode = mode.parse::<AngleMode>()
                .map_err(|e| e.with_note(format!("from {}", ANGLE_MODE_VAR)))?;
        }
        if let Some(today) = non_blank(get(TODAY_VAR)) {
            let date = NaiveDate::parse_from_str(today.trim(), "%Y-%m-%d")
                .map_err(|_| TallyError::date_format(&today).with_note(format!("from {}", TODAY_VAR)))?;
            config.today = Some(date);
        }

        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
