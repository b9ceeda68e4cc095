use anyhow::Result;

use ea_charge_report::charts;
use ea_charge_report::cli::Args;
use ea_charge_report::pipeline::{self, PipelineConfig};
use ea_charge_report::weather::{GeoPoint, OpenMeteo};

fn main() -> Result<()> {
    let args = Args::parse();

    let config = PipelineConfig {
        input_dir: args.input_dir.clone(),
        output_file: args.output.clone(),
        battery_kwh: args.battery_kwh,
        location: GeoPoint {
            latitude: args.latitude,
            longitude: args.longitude,
        },
        skip_weather: args.skip_weather,
    };

    let provider = OpenMeteo::new();
    let records = pipeline::run(&config, &provider)?;

    if records.is_empty() {
        println!("No charging sessions found in {}", args.input_dir.display());
        return Ok(());
    }

    if !args.no_plots {
        charts::render_timeline(&args.output, &args.plots_dir)?;
        charts::render_temperature_scatter(&args.output, &args.plots_dir)?;
    }

    Ok(())
}
