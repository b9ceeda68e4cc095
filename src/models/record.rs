use serde::{Deserialize, Serialize};

/// One charging session, extracted from a single receipt email.
///
/// Every field except `filename` is optional: a pattern that fails to match
/// leaves its field `None`, and derived metrics stay `None` whenever any of
/// their inputs are missing or malformed. Absence means "not extracted", never
/// zero. CSV headers keep the column names of the original session summaries
/// so existing cache files stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeSessionRecord {
    #[serde(rename = "Filename")]
    pub filename: String,
    /// Session date as printed in the receipt, MM/DD/YYYY.
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "Charger ID")]
    pub charger_id: Option<String>,
    #[serde(rename = "Session ID")]
    pub session_id: Option<String>,
    #[serde(rename = "Plan Name")]
    pub plan_name: Option<String>,
    /// Unit price in $/kWh, currency symbol stripped.
    #[serde(rename = "Charging Price")]
    pub charging_price: Option<String>,
    #[serde(rename = "Session Start Time")]
    pub session_start_time: Option<String>,
    #[serde(rename = "Session End Time")]
    pub session_end_time: Option<String>,
    /// Elapsed charging time as H:MM:SS.
    #[serde(rename = "Charging Time")]
    pub charging_time: Option<String>,
    #[serde(rename = "Total Energy Delivered")]
    pub total_energy_delivered: Option<String>,
    #[serde(rename = "Energy Billed")]
    pub energy_billed: Option<String>,
    /// Battery percentage at unplug.
    #[serde(rename = "End State of Charge")]
    pub end_state_of_charge: Option<String>,
    #[serde(rename = "Max Charging Speed")]
    pub max_charging_speed: Option<String>,
    #[serde(rename = "Charging Cost")]
    pub charging_cost: Option<String>,
    #[serde(rename = "Discount")]
    pub discount: Option<String>,
    #[serde(rename = "Total Paid")]
    pub total_paid: Option<String>,
    /// Battery percentage at plug-in, estimated from the end state of charge
    /// and the delivered energy assuming 92% charging efficiency.
    #[serde(rename = "Estimated Starting Charge")]
    pub estimated_starting_charge: Option<f64>,
    /// Delivered energy divided by elapsed charging time, in kW.
    #[serde(rename = "Effective Charging Speed")]
    pub effective_charging_speed: Option<f64>,
    #[serde(rename = "Minutes Charging")]
    pub minutes_charging: Option<f64>,
    /// Outdoor temperature at session start, from the weather archive.
    #[serde(rename = "Average Temperature (°C)")]
    pub average_temperature_c: Option<f64>,
}

impl ChargeSessionRecord {
    /// A record with every extractable field absent. Extraction starts from
    /// this so the record shape is complete even when nothing matches.
    pub fn new(filename: impl Into<String>) -> Self {
        ChargeSessionRecord {
            filename: filename.into(),
            date: None,
            location: None,
            address: None,
            charger_id: None,
            session_id: None,
            plan_name: None,
            charging_price: None,
            session_start_time: None,
            session_end_time: None,
            charging_time: None,
            total_energy_delivered: None,
            energy_billed: None,
            end_state_of_charge: None,
            max_charging_speed: None,
            charging_cost: None,
            discount: None,
            total_paid: None,
            estimated_starting_charge: None,
            effective_charging_speed: None,
            minutes_charging: None,
            average_temperature_c: None,
        }
    }
}
