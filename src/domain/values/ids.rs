//! UUID-backed identifiers.

use std::fmt;

use uuid::Uuid;

use crate::domain::DomainError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $invalid:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Uuid);

        impl $name {
            /// Fresh random (v4) identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Validating path for untrusted input.
            pub fn parse(raw: &str) -> Result<Self, DomainError> {
                Uuid::parse_str(raw.trim()).map(Self).map_err(|_| $invalid)
            }

            /// Trusted path for values read back from storage.
            pub fn reconstruct(id: Uuid) -> Self {
                Self(id)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_id!(
    /// Stable identifier of a [`crate::domain::User`].
    UserId,
    DomainError::InvalidUserId
);
uuid_id!(
    /// Identifier of a meal [`crate::domain::Record`].
    RecordId,
    DomainError::InvalidRecordId
);
uuid_id!(
    /// Identifier of one line item inside a record.
    RecordItemId,
    DomainError::InvalidRecordItemId
);
