/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # FixMap Dictionary
//!
//! Message definitions and dictionary validation for FixMap.
//!
//! This crate provides:
//! - **Schema definitions**: Field, message, and repeating group definitions
//! - **Runtime validation**: Message checks reporting SessionRejectReason codes

pub mod schema;
pub mod validate;

pub use schema::{
    Dictionary, FieldDef, FieldEntry, FieldType, GroupDef, MessageCategory, MessageDef, Version,
};
pub use validate::{ValidationConfig, Validator};
