use std::net::IpAddr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use super::input::{amount_or_zero, parse_start_date, time_value_or_one};
use crate::config::AppConfig;
use crate::core::{
    CompoundFrequency, DisplayFormat, EventFrequency, SimulationInput, SimulationResult, TimeUnit,
    simulate, simulate_from,
};
use crate::error::Result;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliCompoundFrequency {
    Weekday,
    Weekly,
    Monthly,
    Daily,
}

impl From<CliCompoundFrequency> for CompoundFrequency {
    fn from(value: CliCompoundFrequency) -> Self {
        match value {
            CliCompoundFrequency::Weekday => CompoundFrequency::Weekday,
            CliCompoundFrequency::Weekly => CompoundFrequency::Weekly,
            CliCompoundFrequency::Monthly => CompoundFrequency::Monthly,
            CliCompoundFrequency::Daily => CompoundFrequency::Daily,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliDepositFrequency {
    Weekday,
    Weekly,
    Monthly,
}

impl From<CliDepositFrequency> for EventFrequency {
    fn from(value: CliDepositFrequency) -> Self {
        match value {
            CliDepositFrequency::Weekday => EventFrequency::Weekday,
            CliDepositFrequency::Weekly => EventFrequency::Weekly,
            CliDepositFrequency::Monthly => EventFrequency::Monthly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliTimeUnit {
    Weeks,
    Months,
    Years,
}

impl From<CliTimeUnit> for TimeUnit {
    fn from(value: CliTimeUnit) -> Self {
        match value {
            CliTimeUnit::Weeks => TimeUnit::Weeks,
            CliTimeUnit::Months => TimeUnit::Months,
            CliTimeUnit::Years => TimeUnit::Years,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "growth",
    version,
    about = "Day-by-day savings growth projector (deposits + compounding)"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    #[arg(long, global = true, env = "GROWTH_CURRENCY", default_value = "$")]
    pub currency_symbol: String,
    #[arg(long, global = true, default_value_t = ',')]
    pub thousands_separator: char,
    #[arg(
        long,
        global = true,
        env = "GROWTH_DATE_PATTERN",
        default_value = "%b %-d, %Y",
        help = "chrono strftime pattern for date labels"
    )]
    pub date_pattern: String,
    #[arg(long, global = true, help = "Log filter, overrides RUST_LOG")]
    pub log: Option<String>,
}

impl GlobalArgs {
    pub fn display_format(&self) -> DisplayFormat {
        DisplayFormat {
            currency_symbol: self.currency_symbol.clone(),
            thousands_separator: self.thousands_separator,
            date_pattern: self.date_pattern.clone(),
            ..DisplayFormat::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the web calculator and JSON API.
    Serve(ServeArgs),
    /// Print a projection to the terminal.
    Project(ProjectArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "GROWTH_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(long, env = "GROWTH_PORT", default_value_t = 8080)]
    pub port: u16,
}

#[derive(Args, Debug)]
pub struct ProjectArgs {
    #[arg(long, default_value_t = 0.0)]
    pub starting_amount: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Percent applied in full on every compounding day, e.g. 5"
    )]
    pub annual_rate: f64,
    #[arg(long, value_enum, default_value_t = CliCompoundFrequency::Monthly)]
    pub compound_frequency: CliCompoundFrequency,
    #[arg(long, default_value_t = 0.0)]
    pub deposit_amount: f64,
    #[arg(long, value_enum, default_value_t = CliDepositFrequency::Monthly)]
    pub deposit_frequency: CliDepositFrequency,
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub time_value: f64,
    #[arg(long, value_enum, default_value_t = CliTimeUnit::Years)]
    pub time_unit: CliTimeUnit,
    #[arg(long, help = "Project from this date (YYYY-MM-DD) instead of today")]
    pub start_date: Option<String>,
    #[arg(long, default_value_t = 7, help = "Print every Nth day of the series")]
    pub every: usize,
}

impl ProjectArgs {
    pub fn to_input(&self) -> SimulationInput {
        let time_unit = self.time_unit.into();
        SimulationInput {
            starting_amount: amount_or_zero(Some(self.starting_amount)),
            annual_rate: amount_or_zero(Some(self.annual_rate)),
            compound_frequency: self.compound_frequency.into(),
            deposit_amount: amount_or_zero(Some(self.deposit_amount)),
            deposit_frequency: self.deposit_frequency.into(),
            time_value: time_value_or_one(Some(self.time_value), time_unit),
            time_unit,
        }
    }
}

/// Every `every`-th row of the series plus the final day, one per line.
pub fn render_table(result: &SimulationResult, format: &DisplayFormat, every: usize) -> String {
    let step = every.max(1);
    let last = result.len().saturating_sub(1);
    let width = result.labels.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    for (idx, (label, balance)) in result.labels.iter().zip(&result.series).enumerate() {
        if idx % step == 0 || idx == last {
            out.push_str(&format!("{label:<width$}  {}\n", format.currency(*balance)));
        }
    }
    out
}

pub async fn run(cli: Cli) -> Result<()> {
    let format = cli.global.display_format();
    match cli.command {
        Command::Serve(args) => {
            let config = AppConfig::new(args.host, args.port, format)?;
            info!(addr = %config.socket_addr(), "starting HTTP server");
            super::run_http_server(&config).await
        }
        Command::Project(args) => {
            format.validate()?;
            let input = args.to_input();
            let result = match args.start_date.as_deref() {
                Some(raw) => simulate_from(parse_start_date(raw)?, &input, &format),
                None => simulate(&input, &format),
            };
            println!("{}", format.summary(&input, &result));
            println!();
            print!("{}", render_table(&result, &format, args.every));
            Ok(())
        }
    }
}
