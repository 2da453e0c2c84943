//! Repeatable field groups (websites, CC emails, SMS numbers)

use crate::error::GroupError;
use crate::wizard::fields::{FieldKind, Requirement, POST_CALL_EMAIL, POST_CALL_SMS};

pub const MAX_WEBSITES: usize = 3;
pub const SMS_PRICING_NOTICE: &str = "Additional SMS numbers may incur extra charges.";

/// The three dynamic groups of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKind {
    Websites,
    CcEmails,
    SmsNumbers,
}

impl GroupKind {
    pub const ALL: [GroupKind; 3] = [
        GroupKind::Websites,
        GroupKind::CcEmails,
        GroupKind::SmsNumbers,
    ];

    /// Maximum number of live entries, if bounded
    pub fn capacity(&self) -> Option<usize> {
        match self {
            GroupKind::Websites => Some(MAX_WEBSITES),
            GroupKind::CcEmails | GroupKind::SmsNumbers => None,
        }
    }

    /// Number of entries present from the start
    pub fn baseline(&self) -> u32 {
        match self {
            GroupKind::CcEmails => 0,
            GroupKind::Websites | GroupKind::SmsNumbers => 1,
        }
    }

    pub fn field_kind(&self) -> FieldKind {
        match self {
            GroupKind::Websites => FieldKind::Url,
            GroupKind::CcEmails => FieldKind::Email,
            GroupKind::SmsNumbers => FieldKind::Tel,
        }
    }

    pub fn section(&self) -> usize {
        match self {
            GroupKind::Websites => 1,
            GroupKind::CcEmails | GroupKind::SmsNumbers => 3,
        }
    }

    /// Plural label used in messages
    pub fn label(&self) -> &'static str {
        match self {
            GroupKind::Websites => "websites",
            GroupKind::CcEmails => "CC emails",
            GroupKind::SmsNumbers => "SMS numbers",
        }
    }

    /// Label for the entry at a display position
    pub fn entry_label(&self, position: usize) -> String {
        match (self, position) {
            (GroupKind::Websites, 0) => "Website".to_string(),
            (GroupKind::Websites, _) => "Additional Website".to_string(),
            (GroupKind::CcEmails, _) => "CC Email".to_string(),
            (GroupKind::SmsNumbers, 0) => "SMS Number".to_string(),
            (GroupKind::SmsNumbers, _) => "Additional SMS Number".to_string(),
        }
    }

    /// Caption of the button that appends an entry
    pub fn add_label(&self) -> &'static str {
        match self {
            GroupKind::Websites => "+ Add another website",
            GroupKind::CcEmails => "+ Add CC email",
            GroupKind::SmsNumbers => "+ Add SMS number",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            GroupKind::Websites => "https://www.yourcompany.com",
            GroupKind::CcEmails => "colleague@company.com",
            GroupKind::SmsNumbers => "(555) 123-4567",
        }
    }

    /// Toggle that shows or hides the group
    pub fn controlling_toggle(&self) -> Option<&'static str> {
        match self {
            GroupKind::Websites => None,
            GroupKind::CcEmails => Some(POST_CALL_EMAIL),
            GroupKind::SmsNumbers => Some(POST_CALL_SMS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub index: u32,
    pub value: String,
}

impl GroupEntry {
    fn empty(index: u32) -> Self {
        Self {
            index,
            value: String::new(),
        }
    }
}

/// Ordered, index-tagged entries of one group.
///
/// Indices come from a running counter and are never handed out twice until
/// the group is cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatableFieldGroup {
    kind: GroupKind,
    entries: Vec<GroupEntry>,
    next_index: u32,
}

impl RepeatableFieldGroup {
    pub fn new(kind: GroupKind) -> Self {
        let baseline = kind.baseline();
        Self {
            kind,
            entries: (0..baseline).map(GroupEntry::empty).collect(),
            next_index: baseline,
        }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn entries(&self) -> &[GroupEntry] {
        &self.entries
    }

    /// Live entry count
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn can_add(&self) -> bool {
        self.kind
            .capacity()
            .map_or(true, |max| self.entries.len() < max)
    }

    /// Append an empty entry and return its index
    pub fn add(&mut self) -> Result<u32, GroupError> {
        if let Some(max) = self.kind.capacity() {
            if self.entries.len() >= max {
                return Err(GroupError::CapacityReached {
                    label: self.kind.label(),
                    max,
                });
            }
        }

        let index = self.next_index;
        self.next_index += 1;
        self.entries.push(GroupEntry::empty(index));
        Ok(index)
    }

    /// Whether the entry with this index may be removed. The primary SMS
    /// number stays, and so does the last remaining website.
    pub fn is_removable(&self, index: u32) -> bool {
        match self.kind {
            GroupKind::Websites => self.entries.iter().any(|entry| entry.index != index),
            GroupKind::CcEmails => true,
            GroupKind::SmsNumbers => index != 0,
        }
    }

    /// Remove every entry carrying `index`; returns how many went away
    pub fn remove(&mut self, index: u32) -> Result<usize, GroupError> {
        if !self.is_removable(index) {
            return Err(GroupError::NotRemovable { index });
        }

        let before = self.entries.len();
        self.entries.retain(|entry| entry.index != index);
        Ok(before - self.entries.len())
    }

    /// Requirement for an entry: the first website and the primary SMS number
    /// must be filled in
    pub fn requirement(&self, index: u32) -> Requirement {
        match self.kind {
            GroupKind::Websites if self.entries.first().map(|e| e.index) == Some(index) => {
                Requirement::Always
            }
            GroupKind::SmsNumbers if index == 0 => Requirement::WhenEnabled(POST_CALL_SMS),
            _ => Requirement::Optional,
        }
    }

    /// Drop all added entries and empty the baseline ones
    pub fn clear(&mut self) {
        let baseline = self.kind.baseline();
        self.entries = (0..baseline).map(GroupEntry::empty).collect();
        self.next_index = baseline;
    }

    pub fn value(&self, index: u32) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.index == index)
            .map(|entry| entry.value.as_str())
    }

    /// Update the value of an entry; false if no entry has that index
    pub fn set_value(&mut self, index: u32, value: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|entry| entry.index == index) {
            Some(entry) => {
                entry.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Non-empty values, trimmed, in entry order
    pub fn values(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn shows_pricing_notice(&self) -> bool {
        self.kind == GroupKind::SmsNumbers && self.entries.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baselines() {
        assert_eq!(RepeatableFieldGroup::new(GroupKind::Websites).count(), 1);
        assert_eq!(RepeatableFieldGroup::new(GroupKind::CcEmails).count(), 0);
        assert_eq!(RepeatableFieldGroup::new(GroupKind::SmsNumbers).count(), 1);
    }

    #[test]
    fn test_website_capacity() {
        let mut websites = RepeatableFieldGroup::new(GroupKind::Websites);
        let second = websites.add().unwrap();
        let third = websites.add().unwrap();
        assert!(!websites.can_add());
        assert_eq!(
            websites.add(),
            Err(GroupError::CapacityReached {
                label: "websites",
                max: 3
            })
        );

        websites.remove(second).unwrap();
        websites.remove(third).unwrap();
        assert_eq!(websites.count(), 1);
        assert!(websites.can_add());
    }

    #[test]
    fn test_indices_are_not_reused() {
        let mut cc = RepeatableFieldGroup::new(GroupKind::CcEmails);
        let first = cc.add().unwrap();
        cc.remove(first).unwrap();
        let second = cc.add().unwrap();
        assert_ne!(first, second);
        assert_eq!(cc.count(), 1);
    }

    #[test]
    fn test_baseline_entry_cannot_be_removed() {
        let mut sms = RepeatableFieldGroup::new(GroupKind::SmsNumbers);
        assert_eq!(sms.remove(0), Err(GroupError::NotRemovable { index: 0 }));

        let mut websites = RepeatableFieldGroup::new(GroupKind::Websites);
        assert!(websites.remove(0).is_err());
        assert_eq!(websites.count(), 1);
    }

    #[test]
    fn test_first_website_removable_while_others_remain() {
        let mut websites = RepeatableFieldGroup::new(GroupKind::Websites);
        let second = websites.add().unwrap();
        assert_eq!(websites.requirement(second), Requirement::Optional);

        assert_eq!(websites.remove(0), Ok(1));
        assert_eq!(websites.requirement(second), Requirement::Always);
        assert_eq!(
            websites.remove(second),
            Err(GroupError::NotRemovable { index: second })
        );
    }

    #[test]
    fn test_pricing_notice_follows_count() {
        let mut sms = RepeatableFieldGroup::new(GroupKind::SmsNumbers);
        assert!(!sms.shows_pricing_notice());
        let extra = sms.add().unwrap();
        assert!(sms.shows_pricing_notice());
        sms.remove(extra).unwrap();
        assert!(!sms.shows_pricing_notice());
    }

    #[test]
    fn test_clear_keeps_emptied_baseline() {
        let mut sms = RepeatableFieldGroup::new(GroupKind::SmsNumbers);
        sms.set_value(0, "2125550000");
        sms.add().unwrap();
        sms.add().unwrap();
        sms.clear();
        assert_eq!(sms.count(), 1);
        assert_eq!(sms.value(0), Some(""));
        assert_eq!(sms.add(), Ok(1));

        let mut cc = RepeatableFieldGroup::new(GroupKind::CcEmails);
        cc.add().unwrap();
        cc.clear();
        assert_eq!(cc.count(), 0);
    }

    #[test]
    fn test_values_skip_blank_entries() {
        let mut websites = RepeatableFieldGroup::new(GroupKind::Websites);
        websites.set_value(0, " https://acme.com ");
        websites.add().unwrap();
        assert_eq!(websites.values(), vec!["https://acme.com".to_string()]);
        assert!(!websites.set_value(42, "x"));
    }
}
