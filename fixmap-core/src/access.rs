/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Typed access to message and group fields.
//!
//! A typed message or group wraps an untyped container and exposes generic
//! accessors (`set::<F>`, `get::<F>`, ...) bounded by [`Supports<F>`], so only
//! the fields declared by its table compile. Repeating groups are reached the
//! same way through [`HasGroup<G>`].

use crate::error::FieldError;
use crate::field::FixField;
use crate::map::FieldMap;
use crate::message::{Message, MsgType};

/// Marker: the implementing message or group declares field `F`.
pub trait Supports<F: FixField> {}

/// Marker: the implementing message or group declares repeating group `G`.
pub trait HasGroup<G: TypedGroup> {}

/// Generic field accessors shared by typed messages and typed groups.
pub trait FieldAccess {
    /// Returns the container holding `tag`.
    fn section(&self, tag: u32) -> &FieldMap;

    /// Returns the container holding `tag`, mutably.
    fn section_mut(&mut self, tag: u32) -> &mut FieldMap;

    /// Stores a field, overwriting any previous value in place.
    fn set<F: FixField>(&mut self, field: F)
    where
        Self: Supports<F>,
    {
        self.section_mut(F::TAG).set_field(field);
    }

    /// Reads a field.
    ///
    /// # Errors
    /// Returns `FieldError::NotFound` if the field is absent, or
    /// `FieldError::Conversion` if its raw value does not parse.
    fn get<F: FixField>(&self) -> Result<F, FieldError>
    where
        Self: Supports<F>,
    {
        self.section(F::TAG).get_field()
    }

    /// Fills `field` from the container. On failure `field` is left as is.
    ///
    /// # Errors
    /// Same as [`FieldAccess::get`].
    fn get_into<F: FixField>(&self, field: &mut F) -> Result<(), FieldError>
    where
        Self: Supports<F>,
    {
        self.section(F::TAG).get_field_into(field)
    }

    /// Returns true if the field is stored.
    fn is_set<F: FixField>(&self) -> bool
    where
        Self: Supports<F>,
    {
        self.section(F::TAG).is_set_field::<F>()
    }

    /// Appends a group entry and returns the new entry count.
    fn add_group<G: TypedGroup>(&mut self, group: G) -> usize
    where
        Self: HasGroup<G>,
    {
        self.section_mut(G::COUNT_TAG)
            .add_group(G::COUNT_TAG, group.into_map())
    }

    /// Returns a copy of the group entry at the 1-based `index`.
    ///
    /// # Errors
    /// Returns `FieldError::GroupNotFound` if `index` is 0 or exceeds the count.
    fn get_group<G: TypedGroup>(&self, index: usize) -> Result<G, FieldError>
    where
        Self: HasGroup<G>,
    {
        let entry = self.section(G::COUNT_TAG).get_group(G::COUNT_TAG, index)?;
        Ok(G::from_map(entry.clone()))
    }

    /// Replaces the group entry at the 1-based `index`.
    ///
    /// # Errors
    /// Returns `FieldError::GroupNotFound` if `index` is 0 or exceeds the count.
    fn replace_group<G: TypedGroup>(&mut self, index: usize, group: G) -> Result<(), FieldError>
    where
        Self: HasGroup<G>,
    {
        self.section_mut(G::COUNT_TAG)
            .replace_group(G::COUNT_TAG, index, group.into_map())
    }

    /// Returns the number of entries of group `G`.
    fn group_count<G: TypedGroup>(&self) -> usize
    where
        Self: HasGroup<G>,
    {
        self.section(G::COUNT_TAG).group_count(G::COUNT_TAG)
    }
}

/// A message type generated from a declarative table.
pub trait TypedMessage: FieldAccess + Sized {
    /// The value of tag 35 for this message.
    const MSG_TYPE: MsgType;

    /// Tags that must be present, in table order.
    const REQUIRED: &'static [u32];

    /// Every tag declared by the table, in table order.
    const FIELDS: &'static [u32];

    /// Wraps a message without checking tag 35.
    fn from_message_unchecked(message: Message) -> Self;

    /// Returns the underlying message.
    fn message(&self) -> &Message;

    /// Returns the underlying message mutably.
    fn message_mut(&mut self) -> &mut Message;

    /// Unwraps the underlying message.
    fn into_message(self) -> Message;

    /// Creates an empty message with tag 35 set.
    #[must_use]
    fn new() -> Self {
        Self::from_message_unchecked(Message::with_msg_type(&Self::MSG_TYPE))
    }

    /// Wraps a decoded message after checking tag 35.
    ///
    /// # Errors
    /// Returns `FieldError::NotFound` if tag 35 is absent, or
    /// `FieldError::MsgTypeMismatch` if it holds another type.
    fn from_message(message: Message) -> Result<Self, FieldError> {
        let actual = message.msg_type()?;
        if actual != Self::MSG_TYPE {
            return Err(FieldError::MsgTypeMismatch {
                expected: Self::MSG_TYPE.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(Self::from_message_unchecked(message))
    }

    /// Returns the required tags that are not set, in table order.
    #[must_use]
    fn missing_required(&self) -> Vec<u32> {
        Self::REQUIRED
            .iter()
            .copied()
            .filter(|&tag| !self.section(tag).contains(tag))
            .collect()
    }
}

/// A repeating group entry type generated from a declarative table.
pub trait TypedGroup: FieldAccess + Sized {
    /// The NumInGroup tag that counts entries.
    const COUNT_TAG: u32;

    /// The first field of every entry.
    const DELIMITER: u32;

    /// Every tag an entry may hold, in table order.
    const FIELDS: &'static [u32];

    /// Wraps an entry container.
    fn from_map(map: FieldMap) -> Self;

    /// Returns the entry container.
    fn as_map(&self) -> &FieldMap;

    /// Unwraps the entry container.
    fn into_map(self) -> FieldMap;

    /// Creates an empty entry.
    #[must_use]
    fn new() -> Self {
        Self::from_map(FieldMap::new())
    }
}
