/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Message validation against a dictionary.
//!
//! The [`Validator`] walks header, body and trailer of a [`Message`] and
//! reports the first problem found as a [`ValidationError`], which carries
//! the SessionRejectReason a reject message should use.

use crate::schema::{Dictionary, FieldEntry, GroupDef};
use fixmap_core::{FieldMap, Message, ValidationError};
use tracing::debug;

/// Checks performed by a [`Validator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Report absent required fields and groups.
    pub check_required: bool,
    /// Report tags unknown to the dictionary or not defined for the message.
    pub check_unknown_fields: bool,
    /// Accept user-defined tags (5001+) even when unknown.
    pub allow_user_defined_fields: bool,
    /// Check value formats and enumerations.
    pub check_field_values: bool,
    /// Check NumInGroup values against stored entries.
    pub check_group_counts: bool,
}

impl ValidationConfig {
    /// Creates a configuration with every check enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            check_required: true,
            check_unknown_fields: true,
            allow_user_defined_fields: true,
            check_field_values: true,
            check_group_counts: true,
        }
    }

    /// Sets whether required fields are checked.
    #[must_use]
    pub const fn with_check_required(mut self, check: bool) -> Self {
        self.check_required = check;
        self
    }

    /// Sets whether unknown fields are reported.
    #[must_use]
    pub const fn with_check_unknown_fields(mut self, check: bool) -> Self {
        self.check_unknown_fields = check;
        self
    }

    /// Sets whether user-defined tags are accepted.
    #[must_use]
    pub const fn with_allow_user_defined_fields(mut self, allow: bool) -> Self {
        self.allow_user_defined_fields = allow;
        self
    }

    /// Sets whether value formats are checked.
    #[must_use]
    pub const fn with_check_field_values(mut self, check: bool) -> Self {
        self.check_field_values = check;
        self
    }

    /// Sets whether group counts are checked.
    #[must_use]
    pub const fn with_check_group_counts(mut self, check: bool) -> Self {
        self.check_group_counts = check;
        self
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The fields and groups allowed in one container.
struct Layout<'a> {
    fields: &'a [FieldEntry],
    groups: &'a [GroupDef],
}

impl Layout<'_> {
    fn contains_tag(&self, tag: u32) -> bool {
        self.fields.iter().any(|f| f.tag == tag) || self.groups.iter().any(|g| g.count_tag == tag)
    }
}

impl<'a> From<&'a GroupDef> for Layout<'a> {
    fn from(group: &'a GroupDef) -> Self {
        Self {
            fields: &group.fields,
            groups: &group.groups,
        }
    }
}

/// Validates messages against a [`Dictionary`].
#[derive(Debug, Clone)]
pub struct Validator<'d> {
    dictionary: &'d Dictionary,
    config: ValidationConfig,
}

impl<'d> Validator<'d> {
    /// Creates a validator with every check enabled.
    #[must_use]
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self::with_config(dictionary, ValidationConfig::default())
    }

    /// Creates a validator with the given checks.
    #[must_use]
    pub const fn with_config(dictionary: &'d Dictionary, config: ValidationConfig) -> Self {
        Self { dictionary, config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates a message.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self, message: &Message) -> Result<(), ValidationError> {
        self.check(message).inspect_err(|err| {
            debug!(
                reason = err.reject_reason().code(),
                ref_tag = ?err.ref_tag(),
                "message rejected: {err}"
            );
        })
    }

    /// Returns every required tag absent from the message, in definition order.
    ///
    /// Header and body are checked; unknown message types yield nothing.
    #[must_use]
    pub fn missing_required(&self, message: &Message) -> Vec<u32> {
        let header = self
            .dictionary
            .header
            .iter()
            .filter(|f| f.required && !message.header().contains(f.tag))
            .map(|f| f.tag);
        let body = message
            .msg_type()
            .ok()
            .and_then(|t| self.dictionary.get_message(t.as_str()))
            .into_iter()
            .flat_map(|def| def.required_tags())
            .filter(|&tag| !message.body().contains(tag));
        header.chain(body).collect()
    }

    fn check(&self, message: &Message) -> Result<(), ValidationError> {
        let msg_type = message
            .header()
            .get_raw(35)
            .map_err(|_| ValidationError::RequiredTagMissing { tag: 35 })?;
        if !self.dictionary.is_msg_type(msg_type) {
            return Err(ValidationError::InvalidMsgType {
                msg_type: msg_type.to_string(),
            });
        }
        let def = self.dictionary.get_message(msg_type).ok_or_else(|| {
            ValidationError::UnsupportedMessageType {
                msg_type: msg_type.to_string(),
            }
        })?;

        let header = Layout {
            fields: &self.dictionary.header,
            groups: &[],
        };
        let body = Layout {
            fields: &def.fields,
            groups: &def.groups,
        };
        let trailer = Layout {
            fields: &self.dictionary.trailer,
            groups: &[],
        };

        self.check_map(message.header(), &header, msg_type)?;
        self.check_map(message.body(), &body, msg_type)?;
        self.check_map(message.trailer(), &trailer, msg_type)
    }

    fn check_map(&self, map: &FieldMap, layout: &Layout<'_>, msg_type: &str) -> Result<(), ValidationError> {
        for value in map.iter() {
            let tag = value.tag();
            let raw = value.as_str();
            if raw.is_empty() {
                return Err(ValidationError::TagSpecifiedWithoutValue { tag });
            }

            let known = self.dictionary.get_field(tag);
            if self.config.check_unknown_fields {
                let user_defined = tag > 5000 && self.config.allow_user_defined_fields;
                if known.is_none() && !user_defined {
                    return Err(ValidationError::UndefinedTag { tag });
                }
                if known.is_some() && !layout.contains_tag(tag) {
                    return Err(ValidationError::TagNotDefinedForMessage {
                        tag,
                        msg_type: msg_type.to_string(),
                    });
                }
            }

            if self.config.check_field_values
                && let Some(def) = known
            {
                if !def.field_type.kind().accepts(raw) {
                    return Err(ValidationError::IncorrectDataFormat {
                        tag,
                        raw: raw.to_string(),
                    });
                }
                if !def.allows(raw) {
                    return Err(ValidationError::ValueIsIncorrect {
                        tag,
                        raw: raw.to_string(),
                    });
                }
            }
        }

        for group in layout.groups {
            self.check_group(map, group, msg_type)?;
        }

        if self.config.check_required {
            let missing = layout
                .fields
                .iter()
                .filter(|f| f.required)
                .map(|f| f.tag)
                .chain(layout.groups.iter().filter(|g| g.required).map(|g| g.count_tag))
                .find(|&tag| !map.contains(tag));
            if let Some(tag) = missing {
                return Err(ValidationError::RequiredTagMissing { tag });
            }
        }
        Ok(())
    }

    fn check_group(&self, map: &FieldMap, group: &GroupDef, msg_type: &str) -> Result<(), ValidationError> {
        let tag = group.count_tag;
        let Ok(declared) = map.get_raw(tag) else {
            return Ok(());
        };
        let entries = map.groups(tag);

        if self.config.check_group_counts && declared.parse::<usize>().ok() != Some(entries.len()) {
            return Err(ValidationError::IncorrectNumInGroupCount {
                tag,
                declared: declared.to_string(),
                actual: entries.len(),
            });
        }

        let layout = Layout::from(group);
        for entry in entries {
            if entry.tags().next() != Some(group.delimiter_tag) {
                return Err(ValidationError::RepeatingGroupOutOfOrder {
                    tag,
                    delimiter: group.delimiter_tag,
                });
            }
            self.check_map(entry, &layout, msg_type)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, FieldType, MessageCategory, MessageDef, Version};
    use fixmap_core::{MsgType, SessionRejectReason};

    fn dictionary() -> Dictionary {
        let mut dict = Dictionary::new(Version::Fix42);
        for (tag, name, ty) in [
            (8, "BeginString", FieldType::String),
            (35, "MsgType", FieldType::String),
            (49, "SenderCompID", FieldType::String),
            (10, "CheckSum", FieldType::String),
            (33, "LinesOfText", FieldType::NumInGroup),
            (58, "Text", FieldType::String),
            (61, "Urgency", FieldType::Char),
            (148, "Headline", FieldType::String),
            (38, "OrderQty", FieldType::Qty),
        ] {
            dict.add_field(FieldDef::new(tag, name, ty));
        }
        dict.add_field(FieldDef::new(61, "Urgency", FieldType::Char).with_values([
            ("0", "NORMAL"),
            ("1", "FLASH"),
            ("2", "BACKGROUND"),
        ]));
        dict.add_header_field(FieldEntry::optional(8));
        dict.add_header_field(FieldEntry::required(35));
        dict.add_header_field(FieldEntry::optional(49));
        dict.add_trailer_field(FieldEntry::optional(10));
        dict.add_message(
            MessageDef::new("B", "News", MessageCategory::App)
                .with_field(FieldEntry::optional(61))
                .with_field(FieldEntry::required(148))
                .with_group(
                    GroupDef::new(33, "LinesOfText", 58)
                        .with_field(FieldEntry::required(58))
                        .required(),
                ),
        );
        dict.add_message(MessageDef::new("0", "Heartbeat", MessageCategory::Admin));
        dict
    }

    fn news() -> Message {
        let mut message = Message::with_msg_type(&MsgType::NEWS);
        message.body_mut().set_raw(148, "Headline");
        let mut line = FieldMap::new();
        line.set_raw(58, "text");
        message.body_mut().add_group(33, line);
        message
    }

    #[test]
    fn test_valid_message() {
        let dict = dictionary();
        assert!(Validator::new(&dict).validate(&news()).is_ok());
    }

    #[test]
    fn test_missing_required_tag() {
        let dict = dictionary();
        let mut message = news();
        message.body_mut().remove(148);

        let err = Validator::new(&dict).validate(&message).unwrap_err();
        assert_eq!(err, ValidationError::RequiredTagMissing { tag: 148 });
        assert_eq!(err.reject_reason(), SessionRejectReason::RequiredTagMissing);
        assert_eq!(Validator::new(&dict).missing_required(&message), vec![148]);
    }

    #[test]
    fn test_missing_required_disabled() {
        let dict = dictionary();
        let mut message = news();
        message.body_mut().remove(148);
        let config = ValidationConfig::new().with_check_required(false);
        assert!(Validator::with_config(&dict, config).validate(&message).is_ok());
    }

    #[test]
    fn test_msg_type_errors() {
        let dict = dictionary();
        let validator = Validator::new(&dict);

        let err = validator.validate(&Message::new()).unwrap_err();
        assert_eq!(err, ValidationError::RequiredTagMissing { tag: 35 });

        let err = validator
            .validate(&Message::with_msg_type(&MsgType::new("ZZ")))
            .unwrap_err();
        assert_eq!(err.reject_reason().code(), 11);
        assert_eq!(err.ref_tag(), Some(35));
    }

    #[test]
    fn test_unknown_and_misplaced_tags() {
        let dict = dictionary();
        let validator = Validator::new(&dict);

        let mut message = news();
        message.body_mut().set_raw(4999, "x");
        assert_eq!(
            validator.validate(&message).unwrap_err(),
            ValidationError::UndefinedTag { tag: 4999 }
        );

        let mut message = news();
        message.body_mut().set_raw(9001, "custom");
        assert!(validator.validate(&message).is_ok());

        let mut message = news();
        message.body_mut().set_raw(38, "100");
        assert!(matches!(
            validator.validate(&message).unwrap_err(),
            ValidationError::TagNotDefinedForMessage { tag: 38, .. }
        ));
    }

    #[test]
    fn test_field_values() {
        let dict = dictionary();
        let validator = Validator::new(&dict);

        let mut message = news();
        message.body_mut().set_raw(61, "7");
        assert_eq!(
            validator.validate(&message).unwrap_err().reject_reason(),
            SessionRejectReason::ValueIsIncorrect
        );

        let mut message = news();
        message.body_mut().set_raw(61, "01");
        assert_eq!(
            validator.validate(&message).unwrap_err().reject_reason(),
            SessionRejectReason::IncorrectDataFormat
        );

        let mut message = news();
        message.body_mut().set_raw(148, "");
        assert_eq!(
            validator.validate(&message).unwrap_err(),
            ValidationError::TagSpecifiedWithoutValue { tag: 148 }
        );
    }

    #[test]
    fn test_group_checks() {
        let dict = dictionary();
        let validator = Validator::new(&dict);

        let mut message = news();
        message.body_mut().set_raw(33, "2");
        assert_eq!(
            validator.validate(&message).unwrap_err(),
            ValidationError::IncorrectNumInGroupCount {
                tag: 33,
                declared: "2".to_string(),
                actual: 1,
            }
        );

        let mut message = news();
        let mut bad = FieldMap::new();
        bad.set_raw(61, "0");
        bad.set_raw(58, "late delimiter");
        message.body_mut().add_group(33, bad);
        assert_eq!(
            validator.validate(&message).unwrap_err(),
            ValidationError::RepeatingGroupOutOfOrder { tag: 33, delimiter: 58 }
        );
    }
}
