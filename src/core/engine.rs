use chrono::NaiveDate;
use tracing::debug;

use super::calendar::{add_days, add_months, day_range, days_between, is_event_day, today};
use super::format::DisplayFormat;
use super::types::{CompoundFrequency, SimulationInput, SimulationResult, TimeUnit};

#[derive(Debug)]
struct Accumulator {
    balance: f64,
    total_deposits: f64,
    deposit_count: u32,
    compound_count: u32,
    dates: Vec<NaiveDate>,
    labels: Vec<String>,
    series: Vec<f64>,
}

impl Accumulator {
    fn new(starting_amount: f64, capacity: usize) -> Self {
        Self {
            balance: starting_amount,
            total_deposits: 0.0,
            deposit_count: 0,
            compound_count: 0,
            dates: Vec::with_capacity(capacity),
            labels: Vec::with_capacity(capacity),
            series: Vec::with_capacity(capacity),
        }
    }
}

/// Runs a projection starting today.
pub fn simulate(input: &SimulationInput, format: &DisplayFormat) -> SimulationResult {
    simulate_from(today(), input, format)
}

/// Runs a projection from `start_date` through the input's horizon, one
/// calendar day at a time.
pub fn simulate_from(
    start_date: NaiveDate,
    input: &SimulationInput,
    format: &DisplayFormat,
) -> SimulationResult {
    let end_date = compute_end_date(start_date, input.time_value, input.time_unit);
    let anchor = compound_anchor(start_date, input.compound_frequency);
    let compound_on = input.compound_frequency.event_frequency();
    let growth_factor = 1.0 + input.annual_rate / 100.0;
    let capacity = usize::try_from(days_between(start_date, end_date) + 1).unwrap_or_default();

    let acc = day_range(start_date, end_date).fold(
        Accumulator::new(input.starting_amount, capacity),
        |mut acc, day| {
            if input.deposit_amount > 0.0
                && is_event_day(day, start_date, input.deposit_frequency)
            {
                acc.balance += input.deposit_amount;
                acc.total_deposits += input.deposit_amount;
                acc.deposit_count += 1;
            }

            if input.annual_rate > 0.0 && day >= anchor && is_event_day(day, anchor, compound_on)
            {
                acc.balance *= growth_factor;
                acc.compound_count += 1;
            }

            acc.dates.push(day);
            acc.labels.push(format.date_label(day));
            acc.series.push(round_cents(acc.balance));
            acc
        },
    );

    debug!(
        %start_date,
        %end_date,
        days = acc.series.len(),
        deposits = acc.deposit_count,
        compounds = acc.compound_count,
        final_balance = acc.balance,
        "projection complete"
    );

    SimulationResult {
        start_date,
        end_date,
        dates: acc.dates,
        labels: acc.labels,
        series: acc.series,
        final_balance: acc.balance,
        total_deposits: acc.total_deposits,
        deposit_count: acc.deposit_count,
        compound_count: acc.compound_count,
    }
}

pub fn compute_end_date(start_date: NaiveDate, time_value: u32, time_unit: TimeUnit) -> NaiveDate {
    let value = i32::try_from(time_value).unwrap_or(i32::MAX);
    match time_unit {
        TimeUnit::Weeks => add_days(start_date, 7 * i64::from(time_value)),
        TimeUnit::Months => add_months(start_date, value),
        TimeUnit::Years => add_months(start_date, value.saturating_mul(12)),
    }
}

/// First date compounding may apply on.
pub fn compound_anchor(start_date: NaiveDate, frequency: CompoundFrequency) -> NaiveDate {
    match frequency {
        CompoundFrequency::Weekly => add_days(start_date, 7),
        CompoundFrequency::Monthly => add_months(start_date, 1),
        CompoundFrequency::Weekday | CompoundFrequency::Daily => start_date,
    }
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
