use std::fmt::Write;

use chrono::NaiveDate;

use super::types::{SimulationInput, SimulationResult};
use crate::error::{Error, Result};

/// Display settings handed to the simulator and the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFormat {
    pub currency_symbol: String,
    pub thousands_separator: char,
    pub decimal_places: usize,
    /// chrono strftime pattern for date labels.
    pub date_pattern: String,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            thousands_separator: ',',
            decimal_places: 2,
            date_pattern: "%b %-d, %Y".to_string(),
        }
    }
}

impl DisplayFormat {
    /// Rejects date patterns chrono cannot render for a calendar date, either
    /// because they do not parse or because they ask for time or offset
    /// fields. Either would otherwise panic on the first label.
    pub fn validate(&self) -> Result<()> {
        let mut sample = String::new();
        write!(&mut sample, "{}", NaiveDate::MIN.format(&self.date_pattern))
            .map_err(|_| Error::InvalidDatePattern(self.date_pattern.clone()))
    }

    pub fn date_label(&self, date: NaiveDate) -> String {
        date.format(&self.date_pattern).to_string()
    }

    pub fn currency(&self, amount: f64) -> String {
        let fixed = format!("{:.*}", self.decimal_places, amount.abs());
        let (whole, fraction) = match fixed.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (fixed.as_str(), None),
        };

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (idx, digit) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(digit);
        }

        let negative = amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if negative { "-" } else { "" };
        match fraction {
            Some(fraction) => format!("{sign}{}{grouped}.{fraction}", self.currency_symbol),
            None => format!("{sign}{}{grouped}", self.currency_symbol),
        }
    }

    pub fn summary(&self, input: &SimulationInput, result: &SimulationResult) -> String {
        let events = match result.compound_count {
            1 => "1 compounding event".to_string(),
            n => format!("{n} compounding events"),
        };
        format!(
            "After {} {}, your balance will be {} on {} ({} deposited, {}).",
            input.time_value,
            input.time_unit.noun(input.time_value),
            self.currency(result.final_balance),
            self.date_label(result.end_date),
            self.currency(result.total_deposits),
            events,
        )
    }
}
