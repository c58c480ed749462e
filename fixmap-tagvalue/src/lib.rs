/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # FixMap Tag-Value
//!
//! FIX tag=value encoding and decoding for FixMap messages.
//!
//! ## Features
//!
//! - **Zero-copy splitting**: `FieldIter` yields values borrowed from the input
//! - **SIMD-accelerated**: Uses `memchr` for fast delimiter search
//! - **Group reconstruction**: Repeating groups rebuilt from dictionary definitions
//! - **Configurable delimiter**: SOH on the wire, `|` for logs

pub mod config;
pub mod decoder;
pub mod encoder;

pub use config::{DecoderConfig, DuplicatePolicy, EncoderConfig, PIPE, SOH};
pub use decoder::{Decoder, FieldIter, decode};
pub use encoder::{Encoder, encode};
