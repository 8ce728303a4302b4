//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the repetitive trait implementations needed for
//! each record type: the status enum with its wire names and labels, and
//! the `Entity` impl with dynamic field access.

/// Declare a status enum and implement [`Status`](crate::core::entity::Status) for it
///
/// Each variant maps to a lowercase wire name (used by serde and search) and
/// a user-facing label. Mark the default state with `#[default]`.
///
/// # Example
/// ```rust,ignore
/// impl_status!(
///     /// Occupancy of a room
///     RoomStatus {
///         Occupied => ("occupied", "Đang thuê"),
///         #[default]
///         Available => ("available", "Trống"),
///     }
/// );
/// ```
#[macro_export]
macro_rules! impl_status {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($wire:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $crate::core::entity::Status for $name {
            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }

            fn variants() -> &'static [Self] {
                &[$( $name::$variant ),+]
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::entity::Status::as_str(self))
            }
        }

        impl $crate::core::field::IntoFieldValue for $name {
            fn to_field_value(&self) -> $crate::core::field::FieldValue {
                $crate::core::field::FieldValue::String(
                    $crate::core::entity::Status::as_str(self).to_string(),
                )
            }
        }
    };
}

/// Implement [`Entity`](crate::core::entity::Entity) for a record struct
///
/// The struct must have `id: u64` and `status: $status` fields. `search`
/// lists the fields matched by the free-text search; `fields` lists every
/// field reachable through `field_value` (besides `id`). Each listed field
/// type must implement `IntoFieldValue`.
///
/// # Example
/// ```rust,ignore
/// impl_entity!(
///     Room,
///     "room",
///     "rooms",
///     RoomStatus,
///     search: [code, tenant],
///     fields: [code, area, price, floor, status, tenant],
/// );
/// ```
#[macro_export]
macro_rules! impl_entity {
    (
        $type:ident,
        $singular:literal,
        $plural:literal,
        $status:ty,
        search: [$($search:ident),* $(,)?],
        fields: [$($field:ident),* $(,)?] $(,)?
    ) => {
        impl $crate::core::entity::Entity for $type {
            type Status = $status;

            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> u64 {
                self.id
            }

            fn set_id(&mut self, id: u64) {
                self.id = id;
            }

            fn status(&self) -> $status {
                self.status
            }

            fn search_fields() -> &'static [&'static str] {
                &[$( stringify!($search) ),*]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    "id" => Some($crate::core::field::FieldValue::Integer(self.id)),
                    $(
                        stringify!($field) => Some(
                            $crate::core::field::IntoFieldValue::to_field_value(&self.$field),
                        ),
                    )*
                    _ => None,
                }
            }
        }
    };
}
