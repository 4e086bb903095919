//! Coercion of loosely typed form input into a clamped `SimulationInput`.
//!
//! Nothing here fails: missing, non-numeric or non-finite values fall back to
//! a default and out-of-range values are clamped.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use crate::core::{CompoundFrequency, EventFrequency, SimulationInput, TimeUnit};
use crate::error::{Error, Result};

/// Upper bound on the horizon so a single run stays around a century of days.
pub fn max_time_value(unit: TimeUnit) -> u32 {
    match unit {
        TimeUnit::Weeks => 5_218,
        TimeUnit::Months => 1_200,
        TimeUnit::Years => 100,
    }
}

/// Reads a number from a JSON number or a numeric string. Anything else,
/// including NaN and infinities, is `None`.
pub fn lenient_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Non-negative amount, 0 when missing or invalid.
pub fn amount_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Whole number of units in `[1, max_time_value(unit)]`, 1 when missing or
/// invalid.
pub fn time_value_or_one(value: Option<f64>, unit: TimeUnit) -> u32 {
    let max = max_time_value(unit);
    match value {
        Some(v) if v.is_finite() && v >= 1.0 => {
            let whole = v.trunc();
            if whole >= f64::from(max) {
                max
            } else {
                whole as u32
            }
        }
        _ => 1,
    }
}

/// Raw scenario fields as the web form or query string sends them.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulatePayload {
    #[serde(alias = "startingBalance", alias = "principal")]
    pub starting_amount: Option<Value>,
    #[serde(alias = "rate", alias = "interestRate")]
    pub annual_rate: Option<Value>,
    pub compound_frequency: Option<String>,
    #[serde(alias = "contribution")]
    pub deposit_amount: Option<Value>,
    pub deposit_frequency: Option<String>,
    pub time_value: Option<Value>,
    pub time_unit: Option<String>,
    /// ISO date to project from instead of today.
    pub start_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulateRequest {
    pub input: SimulationInput,
    pub start_date: Option<NaiveDate>,
}

impl SimulatePayload {
    pub fn to_input(&self) -> SimulationInput {
        let time_unit = self
            .time_unit
            .as_deref()
            .map(TimeUnit::from_tag)
            .unwrap_or(TimeUnit::Years);

        SimulationInput {
            starting_amount: amount_or_zero(lenient_number(self.starting_amount.as_ref())),
            annual_rate: amount_or_zero(lenient_number(self.annual_rate.as_ref())),
            compound_frequency: self
                .compound_frequency
                .as_deref()
                .map(CompoundFrequency::from_tag)
                .unwrap_or(CompoundFrequency::Monthly),
            deposit_amount: amount_or_zero(lenient_number(self.deposit_amount.as_ref())),
            deposit_frequency: self
                .deposit_frequency
                .as_deref()
                .map(EventFrequency::from_tag)
                .unwrap_or(EventFrequency::Monthly),
            time_value: time_value_or_one(lenient_number(self.time_value.as_ref()), time_unit),
            time_unit,
        }
    }

    /// Like `to_input`, plus the optional start date, which is the one
    /// field rejected rather than defaulted.
    pub fn into_request(self) -> Result<SimulateRequest> {
        let start_date = match self.start_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_start_date(raw)?),
        };
        Ok(SimulateRequest {
            input: self.to_input(),
            start_date,
        })
    }
}

/// Years accepted for an explicit start date; the horizon cap keeps every
/// run far inside chrono's representable range from here.
const START_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

pub fn parse_start_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .filter(|date| START_YEARS.contains(&date.year()))
        .ok_or_else(|| Error::InvalidStartDate(raw.to_string()))
}
