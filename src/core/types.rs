use chrono::NaiveDate;

/// Cadence of a recurring deposit.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EventFrequency {
    Weekday,
    Weekly,
    Monthly,
}

impl EventFrequency {
    /// Parses a frequency tag. Anything unrecognised is treated as monthly.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "weekday" | "weekdays" => EventFrequency::Weekday,
            "weekly" | "week" => EventFrequency::Weekly,
            _ => EventFrequency::Monthly,
        }
    }
}

/// Cadence of compounding. `Daily` covers every tag that is not one of the
/// named cadences: it anchors on the start date and matches like monthly.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CompoundFrequency {
    Weekday,
    Weekly,
    Monthly,
    Daily,
}

impl CompoundFrequency {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "weekday" | "weekdays" => CompoundFrequency::Weekday,
            "weekly" | "week" => CompoundFrequency::Weekly,
            "monthly" | "month" => CompoundFrequency::Monthly,
            _ => CompoundFrequency::Daily,
        }
    }

    /// The event predicate this cadence matches with.
    pub fn event_frequency(self) -> EventFrequency {
        match self {
            CompoundFrequency::Weekday => EventFrequency::Weekday,
            CompoundFrequency::Weekly => EventFrequency::Weekly,
            CompoundFrequency::Monthly | CompoundFrequency::Daily => EventFrequency::Monthly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TimeUnit {
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    /// Parses a unit tag, falling back to years.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "weeks" | "week" => TimeUnit::Weeks,
            "months" | "month" => TimeUnit::Months,
            _ => TimeUnit::Years,
        }
    }

    pub fn noun(self, count: u32) -> &'static str {
        match (self, count) {
            (TimeUnit::Weeks, 1) => "week",
            (TimeUnit::Weeks, _) => "weeks",
            (TimeUnit::Months, 1) => "month",
            (TimeUnit::Months, _) => "months",
            (TimeUnit::Years, 1) => "year",
            (TimeUnit::Years, _) => "years",
        }
    }
}

/// Clamped scenario parameters. Amounts and rate are finite and non-negative,
/// `time_value` is at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationInput {
    pub starting_amount: f64,
    /// Percent applied in full on every matched compounding day.
    pub annual_rate: f64,
    pub compound_frequency: CompoundFrequency,
    pub deposit_amount: f64,
    pub deposit_frequency: EventFrequency,
    pub time_value: u32,
    pub time_unit: TimeUnit,
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            starting_amount: 0.0,
            annual_rate: 0.0,
            compound_frequency: CompoundFrequency::Monthly,
            deposit_amount: 0.0,
            deposit_frequency: EventFrequency::Monthly,
            time_value: 1,
            time_unit: TimeUnit::Years,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub dates: Vec<NaiveDate>,
    pub labels: Vec<String>,
    /// Daily balances rounded to cents, parallel to `labels`.
    pub series: Vec<f64>,
    pub final_balance: f64,
    pub total_deposits: f64,
    pub deposit_count: u32,
    pub compound_count: u32,
}

impl SimulationResult {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn total_growth(&self, input: &SimulationInput) -> f64 {
        self.final_balance - input.starting_amount - self.total_deposits
    }
}
