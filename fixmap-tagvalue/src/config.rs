/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Encoder and decoder configuration.

/// SOH (Start of Header) delimiter used in FIX messages.
pub const SOH: u8 = 0x01;

/// Equals sign between tag and value.
pub const EQUALS: u8 = b'=';

/// Pipe delimiter commonly used when FIX messages are logged.
pub const PIPE: u8 = b'|';

/// Configuration for an [`Encoder`](crate::Encoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Byte written after every field.
    pub delimiter: u8,
    /// Initial buffer capacity in bytes.
    pub capacity: usize,
}

impl EncoderConfig {
    /// Creates a configuration using SOH and a 256 byte buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: SOH,
            capacity: 256,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the initial buffer capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What the decoder does when a tag repeats outside a repeating group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with `DecodeError::DuplicateTag`.
    #[default]
    Reject,
    /// Keep the last value, in the position of the first.
    Overwrite,
    /// Keep the first value and ignore later ones.
    KeepFirst,
}

/// Configuration for a [`Decoder`](crate::Decoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Byte expected after every field.
    pub delimiter: u8,
    /// Handling of repeated tags.
    pub duplicate_policy: DuplicatePolicy,
    /// Fail when a NumInGroup value differs from the entries found.
    pub strict_group_count: bool,
    /// Maximum number of fields accepted in one buffer.
    pub max_fields: usize,
}

impl DecoderConfig {
    /// Creates a strict configuration using SOH.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: SOH,
            duplicate_policy: DuplicatePolicy::Reject,
            strict_group_count: true,
            max_fields: 4096,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the duplicate tag policy.
    #[must_use]
    pub const fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Sets whether group counts must match the entries found.
    #[must_use]
    pub const fn with_strict_group_count(mut self, strict: bool) -> Self {
        self.strict_group_count = strict;
        self
    }

    /// Sets the maximum number of fields.
    #[must_use]
    pub const fn with_max_fields(mut self, max: usize) -> Self {
        self.max_fields = max;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new()
    }
}
