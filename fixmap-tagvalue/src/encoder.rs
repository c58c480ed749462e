/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! FIX message encoder.
//!
//! This module provides an encoder that writes messages and field
//! containers in the standard tag=value format. Fields are written in
//! insertion order and each group count field is followed by its entries.
//! BodyLength and CheckSum are written only if the caller stored them.

use crate::config::{EQUALS, EncoderConfig};
use bytes::{BufMut, BytesMut};
use fixmap_core::{FieldMap, FieldValue, Message};

/// FIX tag=value encoder.
#[derive(Debug)]
pub struct Encoder {
    buf: BytesMut,
    config: EncoderConfig,
}

impl Encoder {
    /// Creates an encoder using SOH delimiters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EncoderConfig::default())
    }

    /// Creates an encoder with the given configuration.
    #[must_use]
    pub fn with_config(config: EncoderConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(config.capacity),
            config,
        }
    }

    /// Appends a field with raw bytes.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - The field value bytes
    #[inline]
    pub fn put_raw(&mut self, tag: u32, value: &[u8]) {
        let mut tag_buf = itoa::Buffer::new();
        self.buf.put_slice(tag_buf.format(tag).as_bytes());
        self.buf.put_u8(EQUALS);
        self.buf.put_slice(value);
        self.buf.put_u8(self.config.delimiter);
    }

    /// Appends a stored field.
    #[inline]
    pub fn put_field(&mut self, value: &FieldValue) {
        self.put_raw(value.tag(), value.as_str().as_bytes());
    }

    /// Appends every field of a container, groups in place.
    pub fn encode_map(&mut self, map: &FieldMap) {
        map.walk(&mut |value| self.put_field(value));
    }

    /// Appends header, body and trailer of a message.
    pub fn encode_message(&mut self, message: &Message) {
        message.walk(&mut |value| self.put_field(value));
    }

    /// Returns the bytes written so far.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Takes the bytes written so far, leaving the encoder empty.
    #[must_use]
    pub fn finish(&mut self) -> BytesMut {
        self.buf.split()
    }

    /// Returns the number of bytes written.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Clears the encoder for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes a message with the given configuration.
#[must_use]
pub fn encode(message: &Message, config: EncoderConfig) -> BytesMut {
    let mut encoder = Encoder::with_config(config);
    encoder.encode_message(message);
    encoder.finish()
}
