/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

use crate::fields::TestReqId;
use crate::fix_message;

fix_message! {
    /// FIX 4.2 Heartbeat (0).
    pub struct Heartbeat: "0", Admin {
        required: [],
        optional: [TestReqId],
        groups: [],
        required_groups: [],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixmap_core::{FieldAccess, FixField, TypedMessage};

    #[test]
    fn test_heartbeat() {
        let mut heartbeat = Heartbeat::with_required();
        assert!(heartbeat.message().is_admin());
        assert!(heartbeat.missing_required().is_empty());
        assert!(!heartbeat.is_set::<TestReqId>());

        heartbeat.set(TestReqId::new("PING-1".to_string()));
        assert_eq!(heartbeat.get::<TestReqId>().unwrap().value(), "PING-1");
        assert_eq!(Heartbeat::FIELDS, &[112]);
    }
}
