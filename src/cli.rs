use std::path::PathBuf;

use crate::metrics::DEFAULT_BATTERY_KWH;
use crate::weather::DENVER;

#[derive(clap::Parser, Debug)]
#[command(about = "Extract EV charging sessions from receipt emails into a CSV and charts")]
pub struct Args {
    /// Directory containing .eml session receipt emails
    pub input_dir: PathBuf,

    /// Output CSV path. If the file already exists it is loaded as a cache
    /// and no emails are reprocessed; delete it to force a rerun.
    #[arg(long, default_value = "charging_sessions.csv")]
    pub output: PathBuf,

    /// Directory for rendered chart images (created if absent)
    #[arg(long, default_value = "plots")]
    pub plots_dir: PathBuf,

    /// Usable battery capacity in kWh, for the starting-charge estimate
    #[arg(long, default_value_t = DEFAULT_BATTERY_KWH)]
    pub battery_kwh: f64,

    /// Latitude for the weather lookup
    #[arg(long, env = "CHARGE_REPORT_LATITUDE", default_value_t = DENVER.latitude)]
    pub latitude: f64,

    /// Longitude for the weather lookup
    #[arg(long, env = "CHARGE_REPORT_LONGITUDE", default_value_t = DENVER.longitude)]
    pub longitude: f64,

    /// Skip the weather lookup (offline runs leave the temperature empty)
    #[arg(long)]
    pub skip_weather: bool,

    /// Only build the CSV, do not render charts
    #[arg(long)]
    pub no_plots: bool,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}
