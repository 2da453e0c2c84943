//! Read-only summary shown on the review page

use crate::submission::payload::format_time;
use crate::wizard::fields::{self, time_zone_display, POST_CALL_EMAIL, POST_CALL_SMS};
use crate::wizard::groups::GroupKind;
use crate::wizard::state::WizardState;

const NONE: &str = "None";
const DEFAULT_ASSISTANT: &str = "Clara";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
    pub company: String,
    pub address: String,
    pub websites: String,
    pub documents: String,
    pub assistant: String,
    pub time_zone: String,
    pub business_days: String,
    pub hours: String,
    pub phone: String,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    /// Present only while email summaries are on
    pub primary_email: Option<String>,
    /// Present only while email summaries are on and at least one CC is set
    pub cc_emails: Option<String>,
    /// Present only while SMS summaries are on
    pub sms_numbers: Option<String>,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn joined_or_none(values: Vec<String>) -> String {
    if values.is_empty() {
        NONE.to_string()
    } else {
        values.join(", ")
    }
}

impl ReviewSummary {
    pub fn from_state(state: &WizardState) -> Self {
        let committed = |name: &str| state.form_text(name).unwrap_or("").to_string();

        let email_enabled = state.input_flag(POST_CALL_EMAIL);
        let sms_enabled = state.input_flag(POST_CALL_SMS);

        let cc = state.group(GroupKind::CcEmails).values();

        Self {
            company: committed(fields::COMPANY_NAME),
            address: committed(fields::OFFICE_ADDRESS),
            websites: joined_or_none(state.group(GroupKind::Websites).values()),
            documents: joined_or_none(state.attachments().names()),
            assistant: state
                .form_text(fields::ASSISTANT_NAME)
                .unwrap_or(DEFAULT_ASSISTANT)
                .to_string(),
            time_zone: state
                .form_text(fields::TIME_ZONE)
                .map(time_zone_display)
                .unwrap_or_default(),
            business_days: state
                .business_days()
                .iter()
                .map(|day| day.label())
                .collect::<Vec<_>>()
                .join(", "),
            hours: format!(
                "{} - {}",
                format_time(state.input_text(fields::START_TIME)),
                format_time(state.input_text(fields::END_TIME))
            ),
            phone: committed(fields::CONTACT_NUMBER),
            email_enabled,
            sms_enabled,
            primary_email: email_enabled
                .then(|| state.input_text(fields::PRIMARY_EMAIL).trim().to_string()),
            cc_emails: (email_enabled && !cc.is_empty()).then(|| cc.join(", ")),
            sms_numbers: sms_enabled
                .then(|| state.group(GroupKind::SmsNumbers).values().join(", ")),
        }
    }

    /// Label/value rows grouped under their section headings
    pub fn sections(&self) -> Vec<(&'static str, Vec<(&'static str, String)>)> {
        let company = vec![
            ("Company", self.company.clone()),
            ("Address", self.address.clone()),
            ("Websites", self.websites.clone()),
            ("Documents", self.documents.clone()),
            ("Assistant", self.assistant.clone()),
        ];

        let business = vec![
            ("Time Zone", self.time_zone.clone()),
            ("Business Days", self.business_days.clone()),
            ("Hours", self.hours.clone()),
            ("Phone", self.phone.clone()),
        ];

        let mut summaries = vec![("Email Summaries", yes_no(self.email_enabled).to_string())];
        if let Some(primary) = &self.primary_email {
            summaries.push(("Primary Email", primary.clone()));
        }
        if let Some(cc) = &self.cc_emails {
            summaries.push(("CC Emails", cc.clone()));
        }
        summaries.push(("SMS Summaries", yes_no(self.sms_enabled).to_string()));
        if let Some(numbers) = &self.sms_numbers {
            summaries.push(("SMS Numbers", numbers.clone()));
        }

        vec![
            (fields::section_title(1), company),
            (fields::section_title(2), business),
            (fields::section_title(3), summaries),
        ]
    }
}
