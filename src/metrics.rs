//! Derived metrics over extracted session fields.
//!
//! Every computation is explicit about failure: missing, malformed, or
//! degenerate inputs (a zero-length charging time) produce `None` for the
//! affected fields and never abort the record or the batch.

use crate::models::ChargeSessionRecord;

/// Usable battery energy of the vehicle, kWh. 2024 Ioniq 6 SEL.
pub const DEFAULT_BATTERY_KWH: f64 = 77.4;

/// Fraction of delivered energy that ends up in the battery.
pub const CHARGING_EFFICIENCY: f64 = 0.92;

/// A parsed H:MM:SS charging duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargingTime {
    pub total_hours: f64,
    pub total_minutes: f64,
}

/// Parse a `H:MM:SS` duration string. Any other shape is `None`.
pub fn parse_charging_time(value: &str) -> Option<ChargingTime> {
    let mut parts = value.trim().splitn(3, ':');
    let h: u32 = parts.next()?.parse().ok()?;
    let m: u32 = parts.next()?.parse().ok()?;
    let s: u32 = parts.next()?.parse().ok()?;
    Some(ChargingTime {
        total_hours: f64::from(h) + f64::from(m) / 60.0 + f64::from(s) / 3600.0,
        total_minutes: f64::from(h) * 60.0 + f64::from(m) + f64::from(s) / 60.0,
    })
}

/// Battery percentage at plug-in, estimated from the ending percentage and
/// the energy the charger delivered, assuming [`CHARGING_EFFICIENCY`].
pub fn estimated_starting_charge(end_soc: f64, energy_kwh: f64, battery_kwh: f64) -> Option<f64> {
    if battery_kwh <= 0.0 {
        return None;
    }
    let start = (end_soc / 100.0 * battery_kwh - energy_kwh * CHARGING_EFFICIENCY)
        / battery_kwh
        * 100.0;
    Some(round2(start))
}

/// Fill the derived fields of `record` in place.
///
/// The starting-charge estimate needs a numeric end state of charge and
/// delivered energy; the speed and minutes pair needs delivered energy and a
/// parseable, non-zero charging time. Each failure leaves only its own
/// outputs empty.
pub fn apply_derived_metrics(record: &mut ChargeSessionRecord, battery_kwh: f64) {
    let end_soc = numeric(&record.end_state_of_charge);
    let energy = numeric(&record.total_energy_delivered);

    record.estimated_starting_charge = match (end_soc, energy) {
        (Some(soc), Some(kwh)) => estimated_starting_charge(soc, kwh, battery_kwh),
        _ => None,
    };

    let duration = record
        .charging_time
        .as_deref()
        .and_then(parse_charging_time);
    (record.effective_charging_speed, record.minutes_charging) = match (energy, duration) {
        (Some(kwh), Some(time)) if time.total_hours > 0.0 => (
            Some(round2(kwh / time.total_hours)),
            Some(time.total_minutes),
        ),
        _ => (None, None),
    };
}

fn numeric(value: &Option<String>) -> Option<f64> {
    value.as_deref().and_then(|s| s.trim().parse().ok())
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(
        end_soc: Option<&str>,
        energy: Option<&str>,
        charging_time: Option<&str>,
    ) -> ChargeSessionRecord {
        let mut record = ChargeSessionRecord::new("test.eml");
        record.end_state_of_charge = end_soc.map(str::to_string);
        record.total_energy_delivered = energy.map(str::to_string);
        record.charging_time = charging_time.map(str::to_string);
        record
    }

    #[test]
    fn starting_charge_matches_worked_example() {
        // (80/100 * 77.4 - 20 * 0.92) / 77.4 * 100 = 56.227... -> 56.23
        let mut record = record_with(Some("80"), Some("20"), None);
        apply_derived_metrics(&mut record, DEFAULT_BATTERY_KWH);
        assert_eq!(record.estimated_starting_charge, Some(56.23));
    }

    #[test]
    fn ninety_minute_session_speed_and_minutes() {
        let mut record = record_with(Some("80"), Some("45"), Some("01:30:00"));
        apply_derived_metrics(&mut record, DEFAULT_BATTERY_KWH);
        assert_eq!(record.effective_charging_speed, Some(30.0));
        assert_eq!(record.minutes_charging, Some(90.0));
    }

    #[test]
    fn zero_duration_yields_no_speed_and_no_minutes() {
        let mut record = record_with(Some("80"), Some("45"), Some("00:00:00"));
        apply_derived_metrics(&mut record, DEFAULT_BATTERY_KWH);
        assert_eq!(record.effective_charging_speed, None);
        assert_eq!(record.minutes_charging, None);
        // The starting-charge estimate does not depend on the duration.
        assert!(record.estimated_starting_charge.is_some());
    }

    #[test]
    fn missing_or_malformed_inputs_leave_fields_empty() {
        let mut record = record_with(None, Some("45"), Some("garbage"));
        apply_derived_metrics(&mut record, DEFAULT_BATTERY_KWH);
        assert_eq!(record.estimated_starting_charge, None);
        assert_eq!(record.effective_charging_speed, None);
        assert_eq!(record.minutes_charging, None);

        let mut record = record_with(Some("eighty"), Some("x"), Some("1:2"));
        apply_derived_metrics(&mut record, DEFAULT_BATTERY_KWH);
        assert_eq!(record.estimated_starting_charge, None);
        assert_eq!(record.effective_charging_speed, None);
    }

    #[test]
    fn parse_charging_time_decomposes_hours_and_minutes() {
        let time = parse_charging_time("01:30:00").unwrap();
        assert_eq!(time.total_hours, 1.5);
        assert_eq!(time.total_minutes, 90.0);

        let time = parse_charging_time("00:31:12").unwrap();
        assert!((time.total_hours - 0.52).abs() < 1e-9);
        assert!((time.total_minutes - 31.2).abs() < 1e-9);

        assert_eq!(parse_charging_time("90 minutes"), None);
        assert_eq!(parse_charging_time(""), None);
    }
}
