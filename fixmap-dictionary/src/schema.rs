/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Schema definitions for FIX dictionaries.
//!
//! This module defines the structures that describe a FIX version:
//! - [`FieldDef`]: Field definitions with tag, name, type and allowed values
//! - [`MessageDef`]: Message definitions with required/optional fields
//! - [`GroupDef`]: Repeating group definitions, nested groups included
//! - [`Dictionary`]: Complete FIX version dictionary

use fixmap_core::FieldKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// FIX protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    /// FIX 4.0
    Fix40,
    /// FIX 4.1
    Fix41,
    /// FIX 4.2
    Fix42,
    /// FIX 4.3
    Fix43,
    /// FIX 4.4
    Fix44,
}

impl Version {
    /// Returns the BeginString value for this version.
    #[must_use]
    pub const fn begin_string(&self) -> &'static str {
        match self {
            Self::Fix40 => "FIX.4.0",
            Self::Fix41 => "FIX.4.1",
            Self::Fix42 => "FIX.4.2",
            Self::Fix43 => "FIX.4.3",
            Self::Fix44 => "FIX.4.4",
        }
    }

    /// Parses a BeginString value.
    #[must_use]
    pub fn from_begin_string(value: &str) -> Option<Self> {
        Some(match value {
            "FIX.4.0" => Self::Fix40,
            "FIX.4.1" => Self::Fix41,
            "FIX.4.2" => Self::Fix42,
            "FIX.4.3" => Self::Fix43,
            "FIX.4.4" => Self::Fix44,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.begin_string())
    }
}

/// FIX field data type as named in a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Integer value.
    Int,
    /// Length field (for data fields).
    Length,
    /// Sequence number.
    SeqNum,
    /// Number of entries in a repeating group.
    NumInGroup,
    /// Floating point number.
    Float,
    /// Quantity.
    Qty,
    /// Price.
    Price,
    /// Amount (price * quantity).
    Amt,
    /// Single character.
    Char,
    /// Boolean (Y/N).
    Boolean,
    /// String.
    String,
    /// Currency code (ISO 4217).
    Currency,
    /// Exchange code.
    Exchange,
    /// UTC timestamp.
    UtcTimestamp,
    /// UTC time only.
    UtcTimeOnly,
    /// UTC date only.
    UtcDateOnly,
    /// Local market date.
    LocalMktDate,
    /// Raw data.
    Data,
}

impl FieldType {
    /// Returns the value kind used to check and store this type.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Int | Self::Length | Self::SeqNum | Self::NumInGroup => FieldKind::Int,
            Self::Float | Self::Qty | Self::Price | Self::Amt => FieldKind::Decimal,
            Self::Char => FieldKind::Char,
            Self::Boolean => FieldKind::Boolean,
            Self::String | Self::Currency | Self::Exchange => FieldKind::String,
            Self::UtcTimestamp => FieldKind::UtcTimestamp,
            Self::UtcTimeOnly => FieldKind::UtcTimeOnly,
            Self::UtcDateOnly => FieldKind::UtcDate,
            Self::LocalMktDate => FieldKind::LocalMktDate,
            Self::Data => FieldKind::Data,
        }
    }
}

impl std::str::FromStr for FieldType {
    type Err = std::convert::Infallible;

    /// Creates a FieldType from a dictionary type name. Unknown names map to
    /// `String`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "INT" => Self::Int,
            "LENGTH" => Self::Length,
            "SEQNUM" => Self::SeqNum,
            "NUMINGROUP" => Self::NumInGroup,
            "FLOAT" => Self::Float,
            "QTY" | "QUANTITY" => Self::Qty,
            "PRICE" | "PRICEOFFSET" => Self::Price,
            "AMT" | "AMOUNT" => Self::Amt,
            "CHAR" => Self::Char,
            "BOOLEAN" => Self::Boolean,
            "CURRENCY" => Self::Currency,
            "EXCHANGE" => Self::Exchange,
            "UTCTIMESTAMP" => Self::UtcTimestamp,
            "UTCTIMEONLY" => Self::UtcTimeOnly,
            "UTCDATEONLY" | "UTCDATE" => Self::UtcDateOnly,
            "LOCALMKTDATE" => Self::LocalMktDate,
            "DATA" => Self::Data,
            _ => Self::String,
        })
    }
}

/// Definition of a FIX field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field tag number.
    pub tag: u32,
    /// Field name.
    pub name: String,
    /// Field data type.
    pub field_type: FieldType,
    /// Allowed wire values and their descriptions, for enumerated fields.
    pub values: Option<IndexMap<String, String>>,
}

impl FieldDef {
    /// Creates a new field definition.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `name` - The field name
    /// * `field_type` - The field data type
    #[must_use]
    pub fn new(tag: u32, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            tag,
            name: name.into(),
            field_type,
            values: None,
        }
    }

    /// Restricts the field to an enumerated set of `(value, description)` pairs.
    #[must_use]
    pub fn with_values<I, V, D>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (V, D)>,
        V: Into<String>,
        D: Into<String>,
    {
        self.values = Some(
            values
                .into_iter()
                .map(|(v, d)| (v.into(), d.into()))
                .collect(),
        );
        self
    }

    /// Returns true if `raw` is allowed by the enumeration (always true when
    /// the field is not enumerated).
    #[must_use]
    pub fn allows(&self, raw: &str) -> bool {
        self.values.as_ref().is_none_or(|values| values.contains_key(raw))
    }
}

/// Reference to a field within a message, group or section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    /// Field tag number.
    pub tag: u32,
    /// Whether the field is required.
    pub required: bool,
}

impl FieldEntry {
    /// A required field.
    #[must_use]
    pub const fn required(tag: u32) -> Self {
        Self {
            tag,
            required: true,
        }
    }

    /// An optional field.
    #[must_use]
    pub const fn optional(tag: u32) -> Self {
        Self {
            tag,
            required: false,
        }
    }
}

/// Definition of a repeating group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDef {
    /// Tag of the count field (NumInGroup).
    pub count_tag: u32,
    /// Name of the group.
    pub name: String,
    /// Tag of the first field in each group entry.
    pub delimiter_tag: u32,
    /// Fields within each entry, in order.
    pub fields: Vec<FieldEntry>,
    /// Nested groups within each entry.
    pub groups: Vec<GroupDef>,
    /// Whether the group is required.
    pub required: bool,
}

impl GroupDef {
    /// Creates a group whose entries start with `delimiter_tag`.
    #[must_use]
    pub fn new(count_tag: u32, name: impl Into<String>, delimiter_tag: u32) -> Self {
        Self {
            count_tag,
            name: name.into(),
            delimiter_tag,
            fields: Vec::new(),
            groups: Vec::new(),
            required: false,
        }
    }

    /// Appends an entry field.
    #[must_use]
    pub fn with_field(mut self, field: FieldEntry) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a nested group.
    #[must_use]
    pub fn with_group(mut self, group: GroupDef) -> Self {
        self.groups.push(group);
        self
    }

    /// Marks the group as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Returns true if `tag` may appear directly in an entry of this group.
    #[must_use]
    pub fn contains_tag(&self, tag: u32) -> bool {
        self.fields.iter().any(|f| f.tag == tag) || self.group(tag).is_some()
    }

    /// Returns the nested group counted by `count_tag`.
    #[must_use]
    pub fn group(&self, count_tag: u32) -> Option<&GroupDef> {
        self.groups.iter().find(|g| g.count_tag == count_tag)
    }
}

/// Message category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageCategory {
    /// Administrative message (session level).
    Admin,
    /// Application message.
    App,
}

/// Definition of a FIX message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDef {
    /// Message type value (tag 35).
    pub msg_type: String,
    /// Message name.
    pub name: String,
    /// Message category (admin or app).
    pub category: MessageCategory,
    /// Body fields, in order.
    pub fields: Vec<FieldEntry>,
    /// Body groups.
    pub groups: Vec<GroupDef>,
}

impl MessageDef {
    /// Creates an empty message definition.
    #[must_use]
    pub fn new(msg_type: impl Into<String>, name: impl Into<String>, category: MessageCategory) -> Self {
        Self {
            msg_type: msg_type.into(),
            name: name.into(),
            category,
            fields: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Appends a body field.
    #[must_use]
    pub fn with_field(mut self, field: FieldEntry) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a body group.
    #[must_use]
    pub fn with_group(mut self, group: GroupDef) -> Self {
        self.groups.push(group);
        self
    }

    /// Returns the required body tags in order, required group counts included.
    pub fn required_tags(&self) -> impl Iterator<Item = u32> + '_ {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.tag)
            .chain(self.groups.iter().filter(|g| g.required).map(|g| g.count_tag))
    }

    /// Returns true if `tag` may appear in the body.
    #[must_use]
    pub fn contains_tag(&self, tag: u32) -> bool {
        self.fields.iter().any(|f| f.tag == tag) || self.group(tag).is_some()
    }

    /// Returns the body group counted by `count_tag`.
    #[must_use]
    pub fn group(&self, count_tag: u32) -> Option<&GroupDef> {
        self.groups.iter().find(|g| g.count_tag == count_tag)
    }
}

/// Complete FIX dictionary for a specific version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dictionary {
    /// FIX version.
    pub version: Version,
    /// Field definitions indexed by tag.
    pub fields: HashMap<u32, FieldDef>,
    /// Field tags indexed by name.
    pub fields_by_name: HashMap<String, u32>,
    /// Message definitions indexed by msg_type.
    pub messages: HashMap<String, MessageDef>,
    /// Header fields.
    pub header: Vec<FieldEntry>,
    /// Trailer fields.
    pub trailer: Vec<FieldEntry>,
}

impl Dictionary {
    /// Creates a new empty dictionary for the specified version.
    #[must_use]
    pub fn new(version: Version) -> Self {
        Self {
            version,
            fields: HashMap::new(),
            fields_by_name: HashMap::new(),
            messages: HashMap::new(),
            header: Vec::new(),
            trailer: Vec::new(),
        }
    }

    /// Adds a field definition, replacing any previous one for its tag.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields_by_name.insert(field.name.clone(), field.tag);
        self.fields.insert(field.tag, field);
    }

    /// Adds a message definition.
    pub fn add_message(&mut self, message: MessageDef) {
        self.messages.insert(message.msg_type.clone(), message);
    }

    /// Appends a header field.
    pub fn add_header_field(&mut self, field: FieldEntry) {
        self.header.push(field);
    }

    /// Appends a trailer field.
    pub fn add_trailer_field(&mut self, field: FieldEntry) {
        self.trailer.push(field);
    }

    /// Gets a field definition by tag.
    #[must_use]
    pub fn get_field(&self, tag: u32) -> Option<&FieldDef> {
        self.fields.get(&tag)
    }

    /// Gets a field definition by name.
    #[must_use]
    pub fn get_field_by_name(&self, name: &str) -> Option<&FieldDef> {
        self.fields_by_name
            .get(name)
            .and_then(|tag| self.fields.get(tag))
    }

    /// Gets a message definition by type.
    #[must_use]
    pub fn get_message(&self, msg_type: &str) -> Option<&MessageDef> {
        self.messages.get(msg_type)
    }

    /// Returns the value kind for `tag`, `String` when the tag is unknown.
    #[must_use]
    pub fn kind_of(&self, tag: u32) -> FieldKind {
        self.get_field(tag)
            .map_or(FieldKind::String, |f| f.field_type.kind())
    }

    /// Returns true if `msg_type` is a known MsgType value.
    ///
    /// When tag 35 is enumerated the enumeration decides; otherwise only types
    /// with a message definition are known.
    #[must_use]
    pub fn is_msg_type(&self, msg_type: &str) -> bool {
        match self.get_field(35).and_then(|f| f.values.as_ref()) {
            Some(values) => values.contains_key(msg_type),
            None => self.messages.contains_key(msg_type),
        }
    }

    /// Returns true if `tag` is declared in the header.
    #[must_use]
    pub fn is_header_field(&self, tag: u32) -> bool {
        self.header.iter().any(|f| f.tag == tag)
    }

    /// Returns true if `tag` is declared in the trailer.
    #[must_use]
    pub fn is_trailer_field(&self, tag: u32) -> bool {
        self.trailer.iter().any(|f| f.tag == tag)
    }

    /// Returns an iterator over all message definitions.
    pub fn messages(&self) -> impl Iterator<Item = &MessageDef> {
        self.messages.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_begin_string() {
        assert_eq!(Version::Fix41.begin_string(), "FIX.4.1");
        assert_eq!(Version::Fix42.to_string(), "FIX.4.2");
        assert_eq!(Version::from_begin_string("FIX.4.4"), Some(Version::Fix44));
        assert_eq!(Version::from_begin_string("FIXT.1.1"), None);
    }

    #[test]
    fn test_field_type_kind() {
        assert_eq!("INT".parse::<FieldType>().unwrap().kind(), FieldKind::Int);
        assert_eq!("PRICE".parse::<FieldType>().unwrap().kind(), FieldKind::Decimal);
        assert_eq!("NUMINGROUP".parse::<FieldType>().unwrap(), FieldType::NumInGroup);
        assert_eq!(FieldType::UtcDateOnly.kind(), FieldKind::UtcDate);
        assert_eq!("unknown".parse::<FieldType>().unwrap(), FieldType::String);
    }

    #[test]
    fn test_field_def_values() {
        let side = FieldDef::new(54, "Side", FieldType::Char).with_values([("1", "BUY"), ("2", "SELL")]);
        assert!(side.allows("1"));
        assert!(!side.allows("Z"));
        assert!(FieldDef::new(55, "Symbol", FieldType::String).allows("anything"));
    }

    #[test]
    fn test_group_lookup() {
        let group = GroupDef::new(453, "NoPartyIDs", 448)
            .with_field(FieldEntry::required(448))
            .with_field(FieldEntry::optional(447))
            .with_group(GroupDef::new(802, "NoPartySubIDs", 523).with_field(FieldEntry::optional(523)));

        assert!(group.contains_tag(447));
        assert!(group.contains_tag(802));
        assert!(!group.contains_tag(523));
        assert_eq!(group.group(802).unwrap().delimiter_tag, 523);
    }

    #[test]
    fn test_message_required_tags() {
        let def = MessageDef::new("B", "News", MessageCategory::App)
            .with_field(FieldEntry::optional(42))
            .with_field(FieldEntry::required(148))
            .with_group(GroupDef::new(33, "LinesOfText", 58).required());
        assert_eq!(def.required_tags().collect::<Vec<_>>(), vec![148, 33]);
        assert!(def.contains_tag(33));
        assert!(!def.contains_tag(58));
    }

    #[test]
    fn test_dictionary_lookups() {
        let mut dict = Dictionary::new(Version::Fix42);
        dict.add_field(FieldDef::new(38, "OrderQty", FieldType::Qty));
        dict.add_header_field(FieldEntry::required(35));
        dict.add_message(MessageDef::new("0", "Heartbeat", MessageCategory::Admin));

        assert!(dict.get_field_by_name("OrderQty").is_some());
        assert_eq!(dict.kind_of(38), FieldKind::Decimal);
        assert_eq!(dict.kind_of(999), FieldKind::String);
        assert!(dict.is_header_field(35));
        assert!(dict.is_msg_type("0"));
        assert!(!dict.is_msg_type("Z"));

        dict.add_field(FieldDef::new(35, "MsgType", FieldType::String).with_values([("0", "HEARTBEAT"), ("Z", "QUOTECANCEL")]));
        assert!(dict.is_msg_type("Z"));
        assert!(dict.get_message("Z").is_none());
    }
}
