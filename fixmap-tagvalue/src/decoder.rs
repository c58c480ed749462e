/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! FIX message decoder.
//!
//! [`FieldIter`] splits a buffer into zero-copy [`FieldRef`]s. [`Decoder`]
//! turns those into a [`Message`], routing header and trailer tags to their
//! sections and, when a [`Dictionary`] is supplied, rebuilding repeating
//! groups and recording each field's kind.

use crate::config::{DecoderConfig, DuplicatePolicy, EQUALS};
use fixmap_core::{
    DecodeError, FieldConvert, FieldKind, FieldMap, FieldRef, FieldValue, Message, is_header_tag,
    is_trailer_tag,
};
use fixmap_dictionary::{Dictionary, GroupDef};
use memchr::memchr;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Iterator over the fields of a tag=value buffer.
#[derive(Debug, Clone)]
pub struct FieldIter<'a> {
    input: &'a [u8],
    offset: usize,
    delimiter: u8,
}

impl<'a> FieldIter<'a> {
    /// Creates an iterator over `input` using `delimiter` between fields.
    #[inline]
    #[must_use]
    pub const fn new(input: &'a [u8], delimiter: u8) -> Self {
        Self {
            input,
            offset: 0,
            delimiter,
        }
    }

    /// Parses the next field from the buffer.
    ///
    /// # Errors
    /// Returns `DecodeError::Incomplete` if the field is not terminated and
    /// `DecodeError::InvalidTag` if the tag is not a positive integer.
    pub fn next_field(&mut self) -> Option<Result<FieldRef<'a>, DecodeError>> {
        if self.offset >= self.input.len() {
            return None;
        }
        let start = self.offset;
        let remaining = &self.input[start..];

        let Some(end) = memchr(self.delimiter, remaining) else {
            self.offset = self.input.len();
            return Some(Err(DecodeError::Incomplete { offset: start }));
        };
        let field = &remaining[..end];
        self.offset += end + 1;

        let Some(eq_pos) = memchr(EQUALS, field) else {
            return Some(Err(invalid_tag(field)));
        };
        let tag_bytes = &field[..eq_pos];
        match parse_tag(tag_bytes) {
            Some(tag) => Some(Ok(FieldRef::new(tag, &field[eq_pos + 1..]))),
            None => Some(Err(invalid_tag(tag_bytes))),
        }
    }

    /// Returns the current offset in the buffer.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns true if the buffer has been fully consumed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offset >= self.input.len()
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = Result<FieldRef<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_field()
    }
}

fn invalid_tag(bytes: &[u8]) -> DecodeError {
    DecodeError::InvalidTag(String::from_utf8_lossy(bytes).into_owned())
}

/// Parses a positive tag number from ASCII bytes.
#[inline]
fn parse_tag(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 10 {
        return None;
    }

    let mut result: u32 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
    }

    (result > 0).then_some(result)
}

/// Decodes tag=value buffers into messages.
#[derive(Debug, Clone, Default)]
pub struct Decoder<'d> {
    config: DecoderConfig,
    dictionary: Option<&'d Dictionary>,
}

impl<'d> Decoder<'d> {
    /// Creates a strict decoder without a dictionary.
    ///
    /// Without a dictionary repeating groups are not rebuilt and every value
    /// is stored as `FieldKind::String`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    #[must_use]
    pub const fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the dictionary used for groups and field kinds.
    #[must_use]
    pub const fn with_dictionary(mut self, dictionary: &'d Dictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes one message.
    ///
    /// # Errors
    /// Returns `DecodeError` if the buffer is empty or malformed, if a tag
    /// repeats under `DuplicatePolicy::Reject`, or if a group count does not
    /// match under `strict_group_count`.
    pub fn decode(&self, input: &[u8]) -> Result<Message, DecodeError> {
        let mut fields: SmallVec<[FieldRef<'_>; 64]> = SmallVec::new();
        for field in FieldIter::new(input, self.config.delimiter) {
            if fields.len() == self.config.max_fields {
                return Err(DecodeError::TooManyFields {
                    max: self.config.max_fields,
                });
            }
            fields.push(field?);
        }
        if fields.is_empty() {
            return Err(DecodeError::Empty);
        }

        let body_groups: &[GroupDef] = match (self.dictionary, fields.iter().find(|f| f.tag == 35)) {
            (Some(dictionary), Some(msg_type)) => dictionary
                .get_message(msg_type.as_str()?)
                .map(|def| def.groups.as_slice())
                .unwrap_or_default(),
            _ => &[],
        };

        let mut message = Message::new();
        let mut pos = 0;
        while pos < fields.len() {
            let field = fields[pos];
            pos += 1;
            if is_header_tag(field.tag) {
                self.store(message.header_mut(), &field)?;
            } else if is_trailer_tag(field.tag) {
                self.store(message.trailer_mut(), &field)?;
            } else if let Some(group) = body_groups.iter().find(|g| g.count_tag == field.tag) {
                self.store(message.body_mut(), &field)?;
                pos = self.read_group(&fields, pos, group, &field, message.body_mut())?;
            } else {
                self.store(message.body_mut(), &field)?;
            }
        }
        Ok(message)
    }

    /// Reads the entries of `group` starting at `pos` into `parent`.
    ///
    /// Returns the position of the first field after the group.
    fn read_group(
        &self,
        fields: &[FieldRef<'_>],
        mut pos: usize,
        group: &GroupDef,
        count_field: &FieldRef<'_>,
        parent: &mut FieldMap,
    ) -> Result<usize, DecodeError> {
        let count_raw = count_field.as_str()?;
        let declared = u64::parse_raw(count_raw)
            .and_then(|count| usize::try_from(count).ok())
            .ok_or_else(|| DecodeError::InvalidGroupCount {
                tag: group.count_tag,
                raw: count_raw.to_string(),
            })?;

        let mut found = 0;
        while pos < fields.len() && fields[pos].tag == group.delimiter_tag {
            let mut entry = FieldMap::new();
            entry.set(self.value(&fields[pos])?);
            pos += 1;

            while pos < fields.len() {
                let field = fields[pos];
                if field.tag == group.delimiter_tag || entry.contains(field.tag) {
                    break;
                }
                if let Some(nested) = group.group(field.tag) {
                    entry.set(self.value(&field)?);
                    pos = self.read_group(fields, pos + 1, nested, &field, &mut entry)?;
                } else if group.contains_tag(field.tag) {
                    entry.set(self.value(&field)?);
                    pos += 1;
                } else {
                    break;
                }
            }

            parent.add_group(group.count_tag, entry);
            found += 1;
        }

        if found != declared {
            if self.config.strict_group_count {
                return Err(DecodeError::GroupCountMismatch {
                    count_tag: group.count_tag,
                    expected: declared,
                    actual: found,
                });
            }
            debug!(
                count_tag = group.count_tag,
                declared, found, "group count mismatch"
            );
        }
        // keep the count exactly as received
        parent.set(self.value(count_field)?);
        Ok(pos)
    }

    fn store(&self, section: &mut FieldMap, field: &FieldRef<'_>) -> Result<(), DecodeError> {
        if section.contains(field.tag) {
            match self.config.duplicate_policy {
                DuplicatePolicy::Reject => return Err(DecodeError::DuplicateTag { tag: field.tag }),
                DuplicatePolicy::Overwrite => trace!(tag = field.tag, "duplicate tag overwritten"),
                DuplicatePolicy::KeepFirst => {
                    trace!(tag = field.tag, "duplicate tag ignored");
                    return Ok(());
                }
            }
        }
        section.set(self.value(field)?);
        Ok(())
    }

    fn value(&self, field: &FieldRef<'_>) -> Result<FieldValue, DecodeError> {
        let kind = self
            .dictionary
            .map_or(FieldKind::String, |d| d.kind_of(field.tag));
        field.to_field_value(kind)
    }
}

/// Decodes one message without a dictionary using the default configuration.
///
/// # Errors
/// See [`Decoder::decode`].
pub fn decode(input: &[u8]) -> Result<Message, DecodeError> {
    Decoder::new().decode(input)
}
