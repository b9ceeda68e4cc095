//! Field extraction from receipt email bodies.
//!
//! One regex per field, mirroring the layout of the Electrify America session
//! summary emails. Each pattern either matches and captures the field's value
//! or leaves the field empty; there is no validation beyond the patterns
//! themselves, so text that happens to match produces a plausible-looking
//! value. Every field key exists on every record regardless of matches.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ChargeSessionRecord;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{2}/\d{2}/\d{4})").unwrap());

// Three consecutive lines: station name, street, city/state ending in a ZIP.
// Location and address are extracted jointly; if the block does not match,
// both stay empty.
static ADDRESS_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n([\w\s(),-]+?)\n([\d\w\s,-]+?)\n([\w\s,.]+?\d{5})").unwrap());

static CHARGER_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Charger ID: # ([\d-]+)").unwrap());
static SESSION_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Session: (\d+)").unwrap());
static PLAN_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Plan Name\s+([\w\s]+)").unwrap());
static CHARGING_PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Charging Price\s+\$(\d+\.\d+)/kWh").unwrap());
static SESSION_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Session Start Time\s+([\d:APM\s]+)").unwrap());
static SESSION_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Session End Time\s+([\d:APM\s]+)").unwrap());
static CHARGING_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Charging Time\s+([\d:]+)").unwrap());
static ENERGY_DELIVERED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Total Energy Delivered\s+([\d.]+) kWh").unwrap());
static ENERGY_BILLED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Energy Billed\s+([\d.]+) kWh").unwrap());
static END_SOC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"End State of Charge\s+(\d+)").unwrap());
static MAX_SPEED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Max. Charging Speed\s+(\d+)").unwrap());
static CHARGING_COST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Charging Cost\s+\$(\d+\.\d+)").unwrap());
static DISCOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Discount\s+\$(\d+\.\d+)").unwrap());
static TOTAL_PAID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Total Paid: \$(\d+\.\d+)").unwrap());

/// First capture group of `re` in `text`, trimmed, or `None` on no match.
fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Like [`first_capture`] but with a leading currency symbol stripped.
fn monetary_capture(re: &Regex, text: &str) -> Option<String> {
    first_capture(re, text).map(|v| v.trim_start_matches('$').to_string())
}

/// Extract all known fields from a receipt body into a complete record.
///
/// Unmatched fields are `None`; derived fields and the temperature are left
/// for the metrics and weather steps.
pub fn extract_charge_metadata(body: &str, filename: &str) -> ChargeSessionRecord {
    let mut record = ChargeSessionRecord::new(filename);

    record.date = first_capture(&DATE_RE, body);

    if let Some(caps) = ADDRESS_BLOCK_RE.captures(body) {
        record.location = Some(caps[1].trim().to_string());
        record.address = Some(format!("{}, {}", caps[2].trim(), caps[3].trim()));
    }

    record.charger_id = first_capture(&CHARGER_ID_RE, body);
    record.session_id = first_capture(&SESSION_ID_RE, body);
    record.plan_name = first_capture(&PLAN_NAME_RE, body);
    record.charging_price = monetary_capture(&CHARGING_PRICE_RE, body);
    record.session_start_time = first_capture(&SESSION_START_RE, body);
    record.session_end_time = first_capture(&SESSION_END_RE, body);
    record.charging_time = first_capture(&CHARGING_TIME_RE, body);
    record.total_energy_delivered = first_capture(&ENERGY_DELIVERED_RE, body);
    record.energy_billed = first_capture(&ENERGY_BILLED_RE, body);
    record.end_state_of_charge = first_capture(&END_SOC_RE, body);
    record.max_charging_speed = first_capture(&MAX_SPEED_RE, body);
    record.charging_cost = monetary_capture(&CHARGING_COST_RE, body);
    record.discount = monetary_capture(&DISCOUNT_RE, body);
    record.total_paid = monetary_capture(&TOTAL_PAID_RE, body);

    record
}
