//! Historical weather lookup for session enrichment.
//!
//! The external service sits behind [`WeatherProvider`] so the pipeline and
//! its tests never depend on the network directly. The bundled implementation
//! queries the Open-Meteo historical archive for hourly 2 m temperatures.
//! Enrichment is never fatal: any lookup failure prints one line and leaves
//! the temperature empty.

use anyhow::{Context, Result};
use chrono::{Duration as ChronoDuration, NaiveDateTime};
use serde::Deserialize;
use std::time::Duration;

use crate::metrics::round2;
use crate::models::ChargeSessionRecord;

const ARCHIVE_ENDPOINT: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Fixed lookup location. The receipts carry no coordinates, so the station
/// location is configured rather than geocoded; Denver by default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

pub const DENVER: GeoPoint = GeoPoint {
    latitude: 39.7392,
    longitude: -104.9903,
};

/// One hourly temperature observation, in the location's local time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlySample {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
}

/// Source of hourly temperature series for a coordinate and time range.
pub trait WeatherProvider {
    fn hourly_temperatures(
        &self,
        point: GeoPoint,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<HourlySample>>;
}

/// Open-Meteo historical archive client.
pub struct OpenMeteo {
    agent: ureq::Agent,
}

impl OpenMeteo {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_read(Duration::from_secs(10))
            .timeout_write(Duration::from_secs(10))
            .build();
        OpenMeteo { agent }
    }
}

impl Default for OpenMeteo {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    hourly: HourlyDto,
}

#[derive(Debug, Deserialize)]
struct HourlyDto {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
}

impl WeatherProvider for OpenMeteo {
    fn hourly_temperatures(
        &self,
        point: GeoPoint,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<HourlySample>> {
        let response = self
            .agent
            .get(ARCHIVE_ENDPOINT)
            .query("latitude", &point.latitude.to_string())
            .query("longitude", &point.longitude.to_string())
            .query("start_date", &start.date().to_string())
            .query("end_date", &end.date().to_string())
            .query("hourly", "temperature_2m")
            // Local timestamps so the archive hours line up with the times
            // printed in the receipts.
            .query("timezone", "auto")
            .call()
            .context("query weather archive")?;
        let dto: ArchiveResponse = response.into_json().context("decode weather response")?;

        let samples = dto
            .hourly
            .time
            .iter()
            .zip(dto.hourly.temperature_2m)
            .filter_map(|(time, temp)| {
                let time = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M").ok()?;
                Some(HourlySample {
                    time,
                    temperature_c: temp?,
                })
            })
            .collect();
        Ok(samples)
    }
}

/// Combine a record's date and start-time strings into one timestamp.
/// Receipts print `MM/DD/YYYY` and `h:mm:ss AM/PM`; anything else is `None`.
pub fn session_start(date: &str, time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(
        &format!("{} {}", date.trim(), time.trim()),
        "%m/%d/%Y %I:%M:%S %p",
    )
    .ok()
}

/// Temperature at the top of the one-hour window starting at session start,
/// rounded to two decimals. `None` when the timestamp is unparsable, the
/// lookup fails, or the window holds no sample.
pub fn ambient_temperature(
    provider: &dyn WeatherProvider,
    point: GeoPoint,
    record: &ChargeSessionRecord,
) -> Option<f64> {
    let date = record.date.as_deref()?;
    let time = record.session_start_time.as_deref()?;
    let start = session_start(date, time)?;
    let end = start + ChronoDuration::hours(1);

    match provider.hourly_temperatures(point, start, end) {
        Ok(samples) => samples
            .into_iter()
            .find(|sample| sample.time >= start && sample.time < end)
            .map(|sample| round2(sample.temperature_c)),
        Err(err) => {
            eprintln!("Error fetching temperature data: {err:#}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use chrono::NaiveDate;

    struct FixedSeries(Vec<HourlySample>);

    impl WeatherProvider for FixedSeries {
        fn hourly_temperatures(
            &self,
            _point: GeoPoint,
            _start: NaiveDateTime,
            _end: NaiveDateTime,
        ) -> Result<Vec<HourlySample>> {
            Ok(self.0.clone())
        }
    }

    struct FailingProvider;

    impl WeatherProvider for FailingProvider {
        fn hourly_temperatures(
            &self,
            _point: GeoPoint,
            _start: NaiveDateTime,
            _end: NaiveDateTime,
        ) -> Result<Vec<HourlySample>> {
            bail!("network unreachable")
        }
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn record(date: Option<&str>, time: Option<&str>) -> ChargeSessionRecord {
        let mut record = ChargeSessionRecord::new("w.eml");
        record.date = date.map(str::to_string);
        record.session_start_time = time.map(str::to_string);
        record
    }

    #[test]
    fn parses_receipt_timestamps() {
        assert_eq!(session_start("03/14/2024", "10:15:02 AM"), Some(at(10, 15, 2)));
        assert_eq!(session_start("03/14/2024", "10:15:02 PM"), Some(at(22, 15, 2)));
        assert_eq!(session_start("2024-03-14", "10:15:02 AM"), None);
        assert_eq!(session_start("03/14/2024", "sometime"), None);
    }

    #[test]
    fn takes_first_sample_inside_the_hour_window() {
        let provider = FixedSeries(vec![
            HourlySample { time: at(9, 0, 0), temperature_c: -3.0 },
            HourlySample { time: at(11, 0, 0), temperature_c: 4.567 },
            HourlySample { time: at(12, 0, 0), temperature_c: 9.0 },
        ]);
        // Session starts 10:15; the window [10:15, 11:15) holds only 11:00.
        let rec = record(Some("03/14/2024"), Some("10:15:02 AM"));
        assert_eq!(ambient_temperature(&provider, DENVER, &rec), Some(4.57));
    }

    #[test]
    fn empty_window_yields_none() {
        let provider = FixedSeries(vec![HourlySample { time: at(9, 0, 0), temperature_c: 1.0 }]);
        let rec = record(Some("03/14/2024"), Some("10:15:02 AM"));
        assert_eq!(ambient_temperature(&provider, DENVER, &rec), None);
    }

    #[test]
    fn unparsable_timestamp_yields_none_without_lookup() {
        let provider = FailingProvider;
        let rec = record(Some("not a date"), Some("10:15:02 AM"));
        assert_eq!(ambient_temperature(&provider, DENVER, &rec), None);

        let rec = record(None, Some("10:15:02 AM"));
        assert_eq!(ambient_temperature(&provider, DENVER, &rec), None);
    }

    #[test]
    fn provider_failure_is_swallowed() {
        let rec = record(Some("03/14/2024"), Some("10:15:02 AM"));
        assert_eq!(ambient_temperature(&FailingProvider, DENVER, &rec), None);
    }
}
