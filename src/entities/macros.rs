//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the repetitive trait implementations needed for each
//! document type and for the string enums stored on them.

/// Define a string-valued enum with a fixed wire vocabulary
///
/// Generates serde renames, `Default`, `ALLOWED`, `as_str`, `FromStr` and
/// `Display`.
///
/// # Example
/// ```rust,ignore
/// wire_enum!(BookingStatus {
///     Pending => "pending",
///     Confirmed => "confirmed",
/// } default Pending);
/// ```
#[macro_export]
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? } default $default:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted wire value, in declaration order
            pub const ALLOWED: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(format!(
                        "'{}' is not one of: {}",
                        other,
                        Self::ALLOWED.join(", ")
                    )),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Implement `Entity` for a struct with `id`, `created_at` and `updated_at`
/// fields
///
/// # Example
/// ```rust,ignore
/// impl_entity!(Booking, "bookings", "booking", "Booking");
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $plural:literal, $singular:literal, $label:literal) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn label() -> &'static str {
                $label
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}

/// Implement `HasStatus` for a struct with a `status` field of a
/// [`wire_enum!`] type
#[macro_export]
macro_rules! impl_has_status {
    ($type:ident, $status:ident) => {
        impl $crate::core::entity::HasStatus for $type {
            type Status = $status;

            fn allowed_statuses() -> &'static [&'static str] {
                $status::ALLOWED
            }

            fn status(&self) -> $status {
                self.status
            }

            fn set_status(&mut self, status: $status) {
                self.status = status;
            }
        }
    };
}
