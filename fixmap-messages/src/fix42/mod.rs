/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! FIX 4.2 messages.

mod heartbeat;
mod news;

pub use heartbeat::Heartbeat;
pub use news::{LineOfText, News};

use crate::dictionary::base_dictionary;
use fixmap_dictionary::{Dictionary, Version};

/// Returns the FIX 4.2 dictionary for the messages in this module.
#[must_use]
pub fn dictionary() -> Dictionary {
    let mut dict = base_dictionary(Version::Fix42);
    dict.add_message(Heartbeat::definition());
    dict.add_message(News::definition());
    dict
}
