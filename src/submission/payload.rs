//! JSON body sent to the provisioning endpoint

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::wizard::fields;
use crate::wizard::groups::GroupKind;
use crate::wizard::state::WizardState;

pub const DEFAULT_ASSISTANT_NAME: &str = "Clara";
pub const DEFAULT_AREA_CODE: &str = "212";
pub const FALLBACK_AREA_CODES: [&str; 5] = ["212", "415", "213", "312", "617"];

/// Snapshot of the wizard in the endpoint's shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub company_name: String,
    pub assistant_name: String,
    pub business_address: String,
    pub timezone: String,
    pub business_hours: String,
    pub website_url: String,
    pub primary_phone_number: String,
    pub preferred_area_code: String,
    pub fallback_area_codes: Vec<String>,
    pub allow_emergency_transfer: bool,
    pub emergency_transfer_number: Option<String>,
}

impl SubmissionPayload {
    pub fn from_state(state: &WizardState) -> Self {
        let committed = |name: &str| state.form_text(name).unwrap_or("").to_string();
        let phone = committed(fields::CONTACT_NUMBER);
        let days: Vec<&str> = state.business_days().iter().map(|d| d.label()).collect();

        Self {
            company_name: committed(fields::COMPANY_NAME),
            assistant_name: state
                .form_text(fields::ASSISTANT_NAME)
                .unwrap_or(DEFAULT_ASSISTANT_NAME)
                .to_string(),
            business_address: committed(fields::OFFICE_ADDRESS),
            timezone: committed(fields::TIME_ZONE),
            business_hours: format_business_hours(
                &days,
                state.input_text(fields::START_TIME),
                state.input_text(fields::END_TIME),
            ),
            website_url: state
                .group(GroupKind::Websites)
                .values()
                .into_iter()
                .next()
                .unwrap_or_default(),
            preferred_area_code: extract_area_code(&phone),
            primary_phone_number: phone,
            fallback_area_codes: FALLBACK_AREA_CODES.iter().map(|c| c.to_string()).collect(),
            allow_emergency_transfer: false,
            emergency_transfer_number: None,
        }
    }
}

/// Area code of a North American number, or the default when it cannot be read
pub fn extract_area_code(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();

    if digits.len() == 11 && digits.starts_with('1') {
        return digits[1..4].to_string();
    }

    if digits.len() == 10 {
        return digits[0..3].to_string();
    }

    DEFAULT_AREA_CODE.to_string()
}

/// `"09:00"` to `"9:00 AM"`. Unparseable input is returned unchanged.
pub fn format_time(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }

    match NaiveTime::parse_from_str(time, "%H:%M") {
        Ok(parsed) => {
            let (pm, hour) = parsed.hour12();
            format!(
                "{}:{:02} {}",
                hour,
                parsed.minute(),
                if pm { "PM" } else { "AM" }
            )
        }
        Err(_) => time.to_string(),
    }
}

/// `"{start} - {end}, {days}"` with 12-hour times
pub fn format_business_hours(days: &[&str], start: &str, end: &str) -> String {
    format!(
        "{} - {}, {}",
        format_time(start),
        format_time(end),
        days.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_area_code() {
        assert_eq!(extract_area_code("+1 (212) 555-0000"), "212");
        assert_eq!(extract_area_code("2125550000"), "212");
        assert_eq!(extract_area_code("(415) 555-1234"), "415");
        assert_eq!(extract_area_code("1-312-555-1234"), "312");
        assert_eq!(extract_area_code(""), "212");
        assert_eq!(extract_area_code("555-1234"), "212");
        assert_eq!(extract_area_code("44 20 7946 0958"), "212");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("09:00"), "9:00 AM");
        assert_eq!(format_time("00:15"), "12:15 AM");
        assert_eq!(format_time("12:00"), "12:00 PM");
        assert_eq!(format_time("17:30"), "5:30 PM");
        assert_eq!(format_time(""), "");
        assert_eq!(format_time("noon"), "noon");
    }

    #[test]
    fn test_format_business_hours() {
        assert_eq!(
            format_business_hours(&["Mon", "Tue"], "09:00", "17:00"),
            "9:00 AM - 5:00 PM, Mon, Tue"
        );
        assert_eq!(format_business_hours(&[], "09:00", "17:00"), "9:00 AM - 5:00 PM, ");
    }

    #[test]
    fn test_payload_defaults_from_fresh_state() {
        let payload = SubmissionPayload::from_state(&WizardState::new());
        assert_eq!(payload.assistant_name, "Clara");
        assert_eq!(payload.website_url, "");
        assert_eq!(payload.preferred_area_code, "212");
        assert_eq!(payload.fallback_area_codes.len(), 5);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["allow_emergency_transfer"], false);
        assert!(json["emergency_transfer_number"].is_null());
        assert_eq!(
            json["business_hours"],
            "9:00 AM - 5:00 PM, Mon, Tue, Wed, Thu, Fri"
        );
    }
}
