//! Classification of failed submissions into user-facing next steps

use serde::{Deserialize, Serialize};

/// Measured in UTF-16 code units, the way the knowledge base counts
pub const MAX_COMPANY_NAME_LEN: usize = 50;
pub const NAME_TOO_LONG_MESSAGE: &str = "Company name is too long for the knowledge base";

/// Broad cause of a failed onboarding attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemediationCategory {
    /// Server reported a missing required field
    MissingField,
    /// Server rejected the company name
    CompanyName,
    /// No phone number could be allocated
    PhoneUnavailable,
    /// Server error we have no advice for
    Unrecognized,
    /// Endpoint unreachable or replied with something other than JSON
    Connectivity,
    /// Company name failed the local length check
    NameTooLong,
}

impl RemediationCategory {
    /// Map a structured `error_code` from the server
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "missing_required_field" => Some(Self::MissingField),
            "company_name_invalid" => Some(Self::CompanyName),
            "phone_number_unavailable" => Some(Self::PhoneUnavailable),
            _ => None,
        }
    }

    /// Fall back to matching phrases in the error message. Matching is
    /// case-sensitive and the first hit wins.
    pub fn from_message(message: &str) -> Self {
        if message.contains("Missing required field") {
            Self::MissingField
        } else if message.contains("company name") {
            Self::CompanyName
        } else if message.contains("phone number") {
            Self::PhoneUnavailable
        } else {
            Self::Unrecognized
        }
    }

    /// Prefer the structured code, then the message
    pub fn classify(error_code: Option<&str>, message: &str) -> Self {
        error_code
            .and_then(Self::from_code)
            .unwrap_or_else(|| Self::from_message(message))
    }

    /// Troubleshooting tips; empty for unrecognized errors
    pub fn tips(&self) -> Vec<String> {
        let tips: &[&str] = match self {
            Self::MissingField => &[
                "Please fill in all required fields",
                "Go back and check your form entries",
                "Make sure all sections are completed",
            ],
            Self::CompanyName => &[
                "Use a shorter company name (max 50 characters)",
                "Remove special characters if any",
                "Try using abbreviations or acronyms",
            ],
            Self::PhoneUnavailable => &[
                "No phone numbers available in your area code",
                "Try a different area code",
                "Contact support for assistance",
            ],
            Self::Connectivity => &[
                "Check your internet connection",
                "Verify all form fields are filled correctly",
                "Try refreshing the page and starting over",
                "Contact support if the problem persists",
            ],
            Self::NameTooLong => &[
                "Please use a shorter company name (maximum 50 characters)",
                "Go back and edit your company name",
            ],
            Self::Unrecognized => &[],
        };

        tips.iter().map(|tip| tip.to_string()).collect()
    }
}

/// Tips for a company name that failed the local length check
pub fn name_too_long_tips(name: &str) -> Vec<String> {
    let mut tips = vec![format!(
        "Current name: \"{}\" ({} characters)",
        name,
        name_length(name)
    )];
    tips.extend(RemediationCategory::NameTooLong.tips());
    tips
}

/// Whether a company name is too long to send
pub fn company_name_too_long(name: &str) -> bool {
    name_length(name) > MAX_COMPANY_NAME_LEN
}

fn name_length(name: &str) -> usize {
    name.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_classification() {
        assert_eq!(
            RemediationCategory::from_message("Missing required fields: company_name"),
            RemediationCategory::MissingField
        );
        assert_eq!(
            RemediationCategory::from_message("Invalid company name"),
            RemediationCategory::CompanyName
        );
        assert_eq!(
            RemediationCategory::from_message("No phone number left"),
            RemediationCategory::PhoneUnavailable
        );
        assert_eq!(
            RemediationCategory::from_message("Company Name rejected"),
            RemediationCategory::Unrecognized
        );
        assert!(RemediationCategory::Unrecognized.tips().is_empty());
    }

    #[test]
    fn test_code_takes_precedence() {
        assert_eq!(
            RemediationCategory::classify(
                Some("phone_number_unavailable"),
                "Missing required field: x"
            ),
            RemediationCategory::PhoneUnavailable
        );
        assert_eq!(
            RemediationCategory::classify(Some("something_new"), "bad company name"),
            RemediationCategory::CompanyName
        );
    }

    #[test]
    fn test_name_length_check() {
        assert!(!company_name_too_long(&"a".repeat(50)));
        assert!(company_name_too_long(&"a".repeat(51)));
        assert!(!company_name_too_long(&"é".repeat(50)));
        // Astral characters take two code units each
        assert!(!company_name_too_long(&"🦷".repeat(25)));
        assert!(company_name_too_long(&"🦷".repeat(26)));
        assert_eq!(
            name_too_long_tips(&"🦷".repeat(26))[0],
            format!("Current name: \"{}\" (52 characters)", "🦷".repeat(26))
        );

        let tips = name_too_long_tips("Acme");
        assert_eq!(tips[0], "Current name: \"Acme\" (4 characters)");
        assert_eq!(tips.len(), 3);
    }
}
