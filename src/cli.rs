use std::path::PathBuf;

use battery_health::{
    Thresholds,
    ValidationPolicy,
    quantity::{electric::Volts, proportions::Percent, temperature::Celsius},
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a telemetry snapshot and print its health report.
    #[clap(name = "inspect")]
    Inspect(Box<InspectArgs>),
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Telemetry snapshot JSON file.
    pub path: PathBuf,

    #[clap(long, env = "REPORT_FORMAT", default_value = "table")]
    pub format: Format,

    /// Accept usage events with the state of charge outside `0..=100`,
    /// so that they are reported as SoC drift instead of being rejected.
    #[clap(long, env = "LENIENT_SOC")]
    pub lenient_soc: bool,

    #[clap(flatten)]
    pub thresholds: ThresholdArgs,
}

impl InspectArgs {
    pub const fn validation_policy(&self) -> ValidationPolicy {
        if self.lenient_soc { ValidationPolicy::LENIENT } else { ValidationPolicy::STRICT }
    }
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum Format {
    /// Human-readable tables.
    Table,

    /// Report serialized as pretty-printed JSON.
    Json,
}

#[derive(Copy, Clone, Parser)]
pub struct ThresholdArgs {
    /// Maximal allowed spread between cell voltages.
    #[clap(
        long = "voltage-imbalance-volts",
        env = "VOLTAGE_IMBALANCE_VOLTS",
        default_value = "0.1"
    )]
    pub voltage_imbalance: Volts,

    /// Temperature above which a cell or the pack is overheating.
    #[clap(long = "overheating-celsius", env = "OVERHEATING_CELSIUS", default_value = "60")]
    pub overheating: Celsius,

    /// Temperature above which overheating is critical.
    #[clap(
        long = "critical-temperature-celsius",
        env = "CRITICAL_TEMPERATURE_CELSIUS",
        default_value = "80"
    )]
    pub critical_temperature: Celsius,

    /// Capacity loss above which the fade is significant.
    #[clap(long = "capacity-fade-percent", env = "CAPACITY_FADE_PERCENT", default_value = "20")]
    pub capacity_fade: Percent,

    /// State-of-charge change within one event that is considered implausible.
    #[clap(long = "soc-drift-percent", env = "SOC_DRIFT_PERCENT", default_value = "100")]
    pub soc_drift: Percent,
}

impl From<ThresholdArgs> for Thresholds {
    fn from(args: ThresholdArgs) -> Self {
        Self::builder()
            .voltage_imbalance(args.voltage_imbalance)
            .overheating(args.overheating)
            .critical_temperature(args.critical_temperature)
            .capacity_fade(args.capacity_fade)
            .soc_drift(args.soc_drift)
            .build()
    }
}
