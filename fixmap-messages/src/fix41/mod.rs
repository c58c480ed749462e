/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! FIX 4.1 messages.

mod execution_report;

pub use execution_report::ExecutionReport;

use crate::dictionary::base_dictionary;
use fixmap_dictionary::{Dictionary, Version};

/// Returns the FIX 4.1 dictionary for the messages in this module.
#[must_use]
pub fn dictionary() -> Dictionary {
    let mut dict = base_dictionary(Version::Fix41);
    dict.add_message(ExecutionReport::definition());
    dict
}
