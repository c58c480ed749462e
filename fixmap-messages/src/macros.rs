/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Declarative message and group tables.
//!
//! [`fix_message!`](crate::fix_message) and [`fix_group!`](crate::fix_group)
//! turn a list of fields into a typed wrapper with `Supports`/`HasGroup`
//! impls, a required-field constructor and a dictionary definition.

/// Marks every standard header and trailer field as supported by `$name`.
#[doc(hidden)]
#[macro_export]
macro_rules! __support_standard_header {
    ($name:ident) => {
        $crate::__support_fields!(
            $name;
            $crate::fields::BeginString,
            $crate::fields::BodyLength,
            $crate::fields::MsgSeqNum,
            $crate::fields::MsgType,
            $crate::fields::PossDupFlag,
            $crate::fields::SenderCompId,
            $crate::fields::SendingTime,
            $crate::fields::TargetCompId,
            $crate::fields::PossResend,
            $crate::fields::OrigSendingTime,
            $crate::fields::CheckSum
        );
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __support_fields {
    ($name:ident; $($field:ty),* $(,)?) => {
        $(impl $crate::__private::Supports<$field> for $name {})*
    };
}

/// Defines a typed message over a [`Message`](fixmap_core::Message).
///
/// ```ignore
/// fix_message! {
///     /// Heartbeat (0).
///     pub struct Heartbeat: "0", Admin {
///         required: [],
///         optional: [TestReqId],
///         groups: [],
///         required_groups: [],
///     }
/// }
/// ```
///
/// Required fields are named (`order_id: OrderId`); the names become the
/// parameters of the generated `with_required` constructor.
#[macro_export]
macro_rules! fix_message {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $msg_type:literal, $category:ident {
            required: [$($req_name:ident : $req:ty),* $(,)?],
            optional: [$($opt:ty),* $(,)?],
            groups: [$($grp:ty),* $(,)?],
            required_groups: [$($rgrp:ty),* $(,)?] $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name($crate::__private::Message);

        impl $name {
            /// Creates the message with every required field set, in table order.
            #[allow(clippy::too_many_arguments)]
            #[must_use]
            pub fn with_required($($req_name: $req),*) -> Self {
                #[allow(unused_mut)]
                let mut message = <Self as $crate::__private::TypedMessage>::new();
                $($crate::__private::FieldAccess::set(&mut message, $req_name);)*
                message
            }

            /// Returns the dictionary definition of this message.
            #[must_use]
            pub fn definition() -> $crate::__private::MessageDef {
                $crate::__private::MessageDef::new(
                    $msg_type,
                    stringify!($name),
                    $crate::__private::MessageCategory::$category,
                )
                $(.with_field($crate::__private::FieldEntry::required(
                    <$req as $crate::__private::FixField>::TAG,
                )))*
                $(.with_field($crate::__private::FieldEntry::optional(
                    <$opt as $crate::__private::FixField>::TAG,
                )))*
                $(.with_group(<$grp>::definition()))*
                $(.with_group(<$rgrp>::definition().required()))*
            }
        }

        impl $crate::__private::FieldAccess for $name {
            fn section(&self, tag: u32) -> &$crate::__private::FieldMap {
                self.0.section(tag)
            }

            fn section_mut(&mut self, tag: u32) -> &mut $crate::__private::FieldMap {
                self.0.section_mut(tag)
            }
        }

        impl $crate::__private::TypedMessage for $name {
            const MSG_TYPE: $crate::__private::MsgType =
                $crate::__private::MsgType::from_static($msg_type);
            const REQUIRED: &'static [u32] = &[
                $(<$req as $crate::__private::FixField>::TAG,)*
                $(<$rgrp as $crate::__private::TypedGroup>::COUNT_TAG,)*
            ];
            const FIELDS: &'static [u32] = &[
                $(<$req as $crate::__private::FixField>::TAG,)*
                $(<$opt as $crate::__private::FixField>::TAG,)*
                $(<$grp as $crate::__private::TypedGroup>::COUNT_TAG,)*
                $(<$rgrp as $crate::__private::TypedGroup>::COUNT_TAG,)*
            ];

            fn from_message_unchecked(message: $crate::__private::Message) -> Self {
                Self(message)
            }

            fn message(&self) -> &$crate::__private::Message {
                &self.0
            }

            fn message_mut(&mut self) -> &mut $crate::__private::Message {
                &mut self.0
            }

            fn into_message(self) -> $crate::__private::Message {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                <Self as $crate::__private::TypedMessage>::new()
            }
        }

        impl From<$name> for $crate::__private::Message {
            fn from(message: $name) -> Self {
                message.0
            }
        }

        impl TryFrom<$crate::__private::Message> for $name {
            type Error = $crate::__private::FieldError;

            fn try_from(message: $crate::__private::Message) -> Result<Self, Self::Error> {
                <Self as $crate::__private::TypedMessage>::from_message(message)
            }
        }

        $crate::__support_standard_header!($name);
        $crate::__support_fields!($name; $($req,)* $($opt),*);
        $(impl $crate::__private::HasGroup<$grp> for $name {})*
        $(impl $crate::__private::HasGroup<$rgrp> for $name {})*
    };
}

/// Defines a typed repeating group entry over a [`FieldMap`](fixmap_core::FieldMap).
///
/// `count` names the NumInGroup field and `delimiter` the first field of
/// every entry.
///
/// ```ignore
/// fix_group! {
///     /// One line of a News message.
///     pub struct LineOfText: count = LinesOfText, delimiter = Text {
///         required: [text: Text],
///         optional: [EncodedTextLen, EncodedText],
///         groups: [],
///     }
/// }
/// ```
#[macro_export]
macro_rules! fix_group {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : count = $count:ty, delimiter = $delimiter:ty {
            required: [$($req_name:ident : $req:ty),* $(,)?],
            optional: [$($opt:ty),* $(,)?],
            groups: [$($grp:ty),* $(,)?] $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name($crate::__private::FieldMap);

        impl $name {
            /// Creates an entry with every required field set, in table order.
            #[must_use]
            pub fn with_required($($req_name: $req),*) -> Self {
                #[allow(unused_mut)]
                let mut group = <Self as $crate::__private::TypedGroup>::new();
                $($crate::__private::FieldAccess::set(&mut group, $req_name);)*
                group
            }

            /// Returns the dictionary definition of this group.
            #[must_use]
            pub fn definition() -> $crate::__private::GroupDef {
                $crate::__private::GroupDef::new(
                    <$count as $crate::__private::FixField>::TAG,
                    <$count as $crate::__private::FixField>::NAME,
                    <$delimiter as $crate::__private::FixField>::TAG,
                )
                $(.with_field($crate::__private::FieldEntry::required(
                    <$req as $crate::__private::FixField>::TAG,
                )))*
                $(.with_field($crate::__private::FieldEntry::optional(
                    <$opt as $crate::__private::FixField>::TAG,
                )))*
                $(.with_group(<$grp>::definition()))*
            }
        }

        impl $crate::__private::FieldAccess for $name {
            fn section(&self, _tag: u32) -> &$crate::__private::FieldMap {
                &self.0
            }

            fn section_mut(&mut self, _tag: u32) -> &mut $crate::__private::FieldMap {
                &mut self.0
            }
        }

        impl $crate::__private::TypedGroup for $name {
            const COUNT_TAG: u32 = <$count as $crate::__private::FixField>::TAG;
            const DELIMITER: u32 = <$delimiter as $crate::__private::FixField>::TAG;
            const FIELDS: &'static [u32] = &[
                $(<$req as $crate::__private::FixField>::TAG,)*
                $(<$opt as $crate::__private::FixField>::TAG,)*
                $(<$grp as $crate::__private::TypedGroup>::COUNT_TAG,)*
            ];

            fn from_map(map: $crate::__private::FieldMap) -> Self {
                Self(map)
            }

            fn as_map(&self) -> &$crate::__private::FieldMap {
                &self.0
            }

            fn into_map(self) -> $crate::__private::FieldMap {
                self.0
            }
        }

        $crate::__support_fields!($name; $($req,)* $($opt),*);
        $(impl $crate::__private::HasGroup<$grp> for $name {})*
    };
}
