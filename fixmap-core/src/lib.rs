/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # FixMap Core
//!
//! Core types, traits, and error definitions for the FixMap field container.
//!
//! This crate provides the building blocks used across all FixMap crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Field types**: `FieldTag`, `FieldValue`, `FieldKind` and the `FixField` trait
//! - **Conversions**: `FieldConvert` for every supported value type
//! - **Containers**: the insertion-ordered `FieldMap` with repeating groups
//! - **Messages**: `Message` (header, body, trailer) and `MsgType`
//! - **Typed access**: `FieldAccess`, `TypedMessage`, `TypedGroup`
//!
//! ## Storage Model
//!
//! Every field is stored as its canonical wire string together with the kind
//! of converter that produced it. Typed reads parse the string back, so a
//! value written through a typed wrapper always reads back unchanged.

pub mod access;
pub mod convert;
pub mod error;
pub mod field;
pub mod map;
pub mod message;
pub mod types;

pub use access::{FieldAccess, HasGroup, Supports, TypedGroup, TypedMessage};
pub use convert::FieldConvert;
pub use error::{
    DecodeError, FieldError, FixError, Result, SessionRejectReason, ValidationError,
};
pub use field::{FieldKind, FieldRef, FieldTag, FieldValue, FixField};
pub use map::FieldMap;
pub use message::{Message, MsgType, is_header_tag, is_trailer_tag};
pub use types::{LocalMktDate, Side, TimestampPrecision, UtcDate, UtcTimeOnly, UtcTimestamp};
