//! Interaction kind type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown interaction kind.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown interaction kind: {0}")]
pub struct InteractionKindError(pub String);

/// The kind of a recorded user-product interaction.
///
/// Stored in the database as lowercase text. Interactions are append-only;
/// the kind never changes after recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    View,
    Like,
    Purchase,
}

impl InteractionKind {
    /// All kinds, in no particular order.
    pub const ALL: [Self; 3] = [Self::View, Self::Like, Self::Purchase];

    /// The lowercase string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Like => "like",
            Self::Purchase => "purchase",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InteractionKind {
    type Err = InteractionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "like" => Ok(Self::Like),
            "purchase" => Ok(Self::Purchase),
            other => Err(InteractionKindError(other.to_owned())),
        }
    }
}

// SQLx support (with postgres feature): kinds live in TEXT columns.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for InteractionKind {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for InteractionKind {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse::<Self>()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for InteractionKind {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}
