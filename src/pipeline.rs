//! Pipeline orchestration: loader, extractor, metrics, weather, sink.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::email::{list_eml_files, plain_text_body};
use crate::extract::extract_charge_metadata;
use crate::metrics::apply_derived_metrics;
use crate::models::ChargeSessionRecord;
use crate::sink;
use crate::weather::{GeoPoint, WeatherProvider, ambient_temperature};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    pub battery_kwh: f64,
    pub location: GeoPoint,
    /// Leave the temperature column empty instead of querying the archive.
    pub skip_weather: bool,
}

/// Run the full pipeline, or return the cached result set when the output
/// file already exists. On a cache hit the input directory is not touched.
pub fn run(
    config: &PipelineConfig,
    provider: &dyn WeatherProvider,
) -> Result<Vec<ChargeSessionRecord>> {
    if let Some(cached) = sink::load_cached(&config.output_file)? {
        println!(
            "Loading cached data from {}",
            config.output_file.display()
        );
        return Ok(cached);
    }

    let mut records = Vec::new();
    for path in list_eml_files(&config.input_dir)? {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let raw = fs::read(&path).with_context(|| format!("read {}", path.display()))?;

        // An unreadable MIME structure still yields a row, just an empty one.
        let body = match plain_text_body(&raw) {
            Ok(body) => body,
            Err(err) => {
                eprintln!("Error parsing {filename}: {err:#}");
                String::new()
            }
        };

        let mut record = extract_charge_metadata(&body, &filename);
        apply_derived_metrics(&mut record, config.battery_kwh);
        if !config.skip_weather {
            record.average_temperature_c = ambient_temperature(provider, config.location, &record);
        }
        records.push(record);
    }

    sink::write_records(&config.output_file, &records)?;
    println!(
        "Extraction completed. {} session(s) saved to {}",
        records.len(),
        config.output_file.display()
    );
    Ok(records)
}
