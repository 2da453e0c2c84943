//! Field catalogue for the three wizard sections
//!
//! Each named field is described once here; sections, validation and the
//! review summary all read from this table.

use crate::wizard::groups::GroupKind;

pub const COMPANY_NAME: &str = "companyName";
pub const OFFICE_ADDRESS: &str = "officeAddress";
pub const ASSISTANT_NAME: &str = "assistantName";
pub const TIME_ZONE: &str = "timeZone";
pub const START_TIME: &str = "startTime";
pub const END_TIME: &str = "endTime";
pub const CONTACT_NUMBER: &str = "contactNumber";
pub const POST_CALL_EMAIL: &str = "postCallSummaryEmail";
pub const PRIMARY_EMAIL: &str = "primaryEmail";
pub const POST_CALL_SMS: &str = "postCallSummarySMS";

/// Time zones offered by the wizard, stored by their short key
pub const TIME_ZONES: &[&str] = &["Chicago", "New_York", "Denver", "Los_Angeles"];

/// Input kinds, each with its own shape check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Url,
    Password,
    /// 24-hour `HH:MM`
    Time,
    /// One of a fixed list of values
    Choice(&'static [&'static str]),
    /// On/off switch
    Toggle,
}

/// When a field must be filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    Optional,
    /// Required while the named toggle is on
    WhenEnabled(&'static str),
}

/// Static description of a named field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub requirement: Requirement,
    pub section: usize,
    pub placeholder: &'static str,
    pub default: Option<DefaultValue>,
}

/// Initial value of a field when the wizard starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Text(&'static str),
    Flag(bool),
}

/// Value held for a named field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text.as_str()),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<DefaultValue> for FieldValue {
    fn from(value: DefaultValue) -> Self {
        match value {
            DefaultValue::Text(text) => FieldValue::Text(text.to_string()),
            DefaultValue::Flag(flag) => FieldValue::Flag(flag),
        }
    }
}

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: COMPANY_NAME,
        label: "Company Name",
        kind: FieldKind::Text,
        requirement: Requirement::Always,
        section: 1,
        placeholder: "Acme Dental Group",
        default: None,
    },
    FieldSpec {
        name: OFFICE_ADDRESS,
        label: "Office Address",
        kind: FieldKind::Text,
        requirement: Requirement::Always,
        section: 1,
        placeholder: "123 Main St, Springfield",
        default: None,
    },
    FieldSpec {
        name: ASSISTANT_NAME,
        label: "Assistant Name",
        kind: FieldKind::Text,
        requirement: Requirement::Optional,
        section: 1,
        placeholder: "Clara",
        default: None,
    },
    FieldSpec {
        name: TIME_ZONE,
        label: "Time Zone",
        kind: FieldKind::Choice(TIME_ZONES),
        requirement: Requirement::Always,
        section: 2,
        placeholder: "Select a time zone",
        default: None,
    },
    FieldSpec {
        name: START_TIME,
        label: "Opens At",
        kind: FieldKind::Time,
        requirement: Requirement::Always,
        section: 2,
        placeholder: "09:00",
        default: Some(DefaultValue::Text("09:00")),
    },
    FieldSpec {
        name: END_TIME,
        label: "Closes At",
        kind: FieldKind::Time,
        requirement: Requirement::Always,
        section: 2,
        placeholder: "17:00",
        default: Some(DefaultValue::Text("17:00")),
    },
    FieldSpec {
        name: CONTACT_NUMBER,
        label: "Business Phone Number",
        kind: FieldKind::Tel,
        requirement: Requirement::Always,
        section: 2,
        placeholder: "(555) 123-4567",
        default: None,
    },
    FieldSpec {
        name: POST_CALL_EMAIL,
        label: "Email call summaries",
        kind: FieldKind::Toggle,
        requirement: Requirement::Optional,
        section: 3,
        placeholder: "",
        default: Some(DefaultValue::Flag(true)),
    },
    FieldSpec {
        name: PRIMARY_EMAIL,
        label: "Primary Email",
        kind: FieldKind::Email,
        requirement: Requirement::WhenEnabled(POST_CALL_EMAIL),
        section: 3,
        placeholder: "you@company.com",
        default: None,
    },
    FieldSpec {
        name: POST_CALL_SMS,
        label: "Text call summaries",
        kind: FieldKind::Toggle,
        requirement: Requirement::Optional,
        section: 3,
        placeholder: "",
        default: Some(DefaultValue::Flag(true)),
    },
];

/// Look up a named field
pub fn spec(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|field| field.name == name)
}

/// Named fields belonging to a section, in display order
pub fn section_fields(section: usize) -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(move |field| field.section == section)
}

/// Title shown for each section
pub fn section_title(section: usize) -> &'static str {
    match section {
        1 => "Company & Knowledge Base",
        2 => "Business Details",
        3 => "Post-Call Summaries",
        _ => "Details",
    }
}

/// Display name for a time zone key
pub fn time_zone_display(key: &str) -> String {
    match key {
        "Chicago" => "Chicago (Central Time)".to_string(),
        "New_York" => "New York (Eastern Time)".to_string(),
        "Denver" => "Denver (Mountain Time)".to_string(),
        "Los_Angeles" => "Los Angeles (Pacific Time)".to_string(),
        other => other.to_string(),
    }
}

/// Days offered as business days, in week order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BusinessDay {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl BusinessDay {
    pub const ALL: [BusinessDay; 7] = [
        BusinessDay::Mon,
        BusinessDay::Tue,
        BusinessDay::Wed,
        BusinessDay::Thu,
        BusinessDay::Fri,
        BusinessDay::Sat,
        BusinessDay::Sun,
    ];

    pub const WEEKDAYS: [BusinessDay; 5] = [
        BusinessDay::Mon,
        BusinessDay::Tue,
        BusinessDay::Wed,
        BusinessDay::Thu,
        BusinessDay::Fri,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BusinessDay::Mon => "Mon",
            BusinessDay::Tue => "Tue",
            BusinessDay::Wed => "Wed",
            BusinessDay::Thu => "Thu",
            BusinessDay::Fri => "Fri",
            BusinessDay::Sat => "Sat",
            BusinessDay::Sun => "Sun",
        }
    }
}

/// Identifies a value the user can edit and that can carry an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Named(&'static str),
    Entry(GroupKind, u32),
}

/// A focusable element of a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Field(FieldKey),
    Day(BusinessDay),
    AddEntry(GroupKind),
    /// Path input for attaching documents
    AttachmentPicker,
    /// An attached document, by position in the attachment list
    Attachment(usize),
}

impl Control {
    pub fn field_key(&self) -> Option<FieldKey> {
        match self {
            Control::Field(key) => Some(*key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_has_required_fields() {
        for section in 1..=3 {
            assert!(
                section_fields(section).any(|f| f.requirement != Requirement::Optional),
                "section {} has no required field",
                section
            );
        }
    }

    #[test]
    fn test_time_zone_display() {
        assert_eq!(time_zone_display("New_York"), "New York (Eastern Time)");
        assert_eq!(time_zone_display("Mars"), "Mars");
    }

    #[test]
    fn test_business_days_sort_in_week_order() {
        let mut days = vec![BusinessDay::Fri, BusinessDay::Mon, BusinessDay::Wed];
        days.sort();
        assert_eq!(
            days.iter().map(|d| d.label()).collect::<Vec<_>>(),
            vec!["Mon", "Wed", "Fri"]
        );
    }
}
