/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Dictionary shared by the version modules.

use crate::fields;
use fixmap_dictionary::{Dictionary, FieldDef, FieldEntry, FieldType, Version};

/// Builds a dictionary holding every field definition, the standard header
/// and trailer, and the enumerations checked by validation.
pub(crate) fn base_dictionary(version: Version) -> Dictionary {
    let mut dict = Dictionary::new(version);
    for def in fields::definitions() {
        dict.add_field(def);
    }

    for def in [
        FieldDef::new(35, "MsgType", FieldType::String).with_values([
            ("0", "HEARTBEAT"),
            ("1", "TEST_REQUEST"),
            ("2", "RESEND_REQUEST"),
            ("3", "REJECT"),
            ("4", "SEQUENCE_RESET"),
            ("5", "LOGOUT"),
            ("8", "EXECUTION_REPORT"),
            ("9", "ORDER_CANCEL_REJECT"),
            ("A", "LOGON"),
            ("B", "NEWS"),
            ("D", "ORDER_SINGLE"),
            ("F", "ORDER_CANCEL_REQUEST"),
            ("G", "ORDER_CANCEL_REPLACE_REQUEST"),
            ("H", "ORDER_STATUS_REQUEST"),
        ]),
        FieldDef::new(20, "ExecTransType", FieldType::Char).with_values([
            ("0", "NEW"),
            ("1", "CANCEL"),
            ("2", "CORRECT"),
            ("3", "STATUS"),
        ]),
        FieldDef::new(54, "Side", FieldType::Char).with_values([
            ("1", "BUY"),
            ("2", "SELL"),
            ("3", "BUY_MINUS"),
            ("4", "SELL_PLUS"),
            ("5", "SELL_SHORT"),
            ("6", "SELL_SHORT_EXEMPT"),
            ("7", "UNDISCLOSED"),
            ("8", "CROSS"),
            ("9", "CROSS_SHORT"),
        ]),
        FieldDef::new(61, "Urgency", FieldType::Char).with_values([
            ("0", "NORMAL"),
            ("1", "FLASH"),
            ("2", "BACKGROUND"),
        ]),
    ] {
        dict.add_field(def);
    }

    for (tag, required) in [
        (8, true),
        (9, false),
        (35, true),
        (49, true),
        (56, true),
        (34, true),
        (43, false),
        (97, false),
        (52, true),
        (122, false),
    ] {
        dict.add_header_field(FieldEntry { tag, required });
    }
    dict.add_trailer_field(FieldEntry::optional(10));
    dict
}
