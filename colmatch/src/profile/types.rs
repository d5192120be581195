//! The closed enumeration of canonical column types and their families.
//!
//! Type labels arrive as free-form strings from the tabular engine and are
//! validated exactly once, here. Family membership is defined by three
//! explicit, disjoint tables keyed by variant; adding a variant means adding
//! it to [`DeclaredType::ALL`] and, if it belongs to a family, to one table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical scalar kind of a column.
///
/// Serializes as its canonical label (see [`DeclaredType::label`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    HugeInt,
    UTinyInt,
    USmallInt,
    UInteger,
    UBigInt,
    UHugeInt,
    Decimal,
    Float,
    Double,
    Boolean,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Interval,
    Varchar,
    Uuid,
    Json,
    Blob,
    Bit,
}

/// Coarse grouping used for partial type-compatibility credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    Numeric,
    Text,
    Temporal,
}

const NUMERIC: &[DeclaredType] = &[
    DeclaredType::TinyInt,
    DeclaredType::SmallInt,
    DeclaredType::Integer,
    DeclaredType::BigInt,
    DeclaredType::HugeInt,
    DeclaredType::UTinyInt,
    DeclaredType::USmallInt,
    DeclaredType::UInteger,
    DeclaredType::UBigInt,
    DeclaredType::UHugeInt,
    DeclaredType::Decimal,
    DeclaredType::Float,
    DeclaredType::Double,
];

const TEXT: &[DeclaredType] = &[DeclaredType::Varchar, DeclaredType::Uuid, DeclaredType::Json];

const TEMPORAL: &[DeclaredType] = &[
    DeclaredType::Date,
    DeclaredType::Time,
    DeclaredType::Timestamp,
    DeclaredType::TimestampTz,
    DeclaredType::Interval,
];

impl DeclaredType {
    /// Every variant, in declaration order.
    pub const ALL: [DeclaredType; 24] = [
        Self::TinyInt,
        Self::SmallInt,
        Self::Integer,
        Self::BigInt,
        Self::HugeInt,
        Self::UTinyInt,
        Self::USmallInt,
        Self::UInteger,
        Self::UBigInt,
        Self::UHugeInt,
        Self::Decimal,
        Self::Float,
        Self::Double,
        Self::Boolean,
        Self::Date,
        Self::Time,
        Self::Timestamp,
        Self::TimestampTz,
        Self::Interval,
        Self::Varchar,
        Self::Uuid,
        Self::Json,
        Self::Blob,
        Self::Bit,
    ];

    /// Returns the family this type belongs to, if any.
    ///
    /// Boolean, blob, and bit belong to no family.
    pub fn family(self) -> Option<TypeFamily> {
        if NUMERIC.contains(&self) {
            Some(TypeFamily::Numeric)
        } else if TEXT.contains(&self) {
            Some(TypeFamily::Text)
        } else if TEMPORAL.contains(&self) {
            Some(TypeFamily::Temporal)
        } else {
            None
        }
    }

    /// The canonical upper-case label, as written to JSON output.
    pub fn label(self) -> &'static str {
        match self {
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::HugeInt => "HUGEINT",
            Self::UTinyInt => "UTINYINT",
            Self::USmallInt => "USMALLINT",
            Self::UInteger => "UINTEGER",
            Self::UBigInt => "UBIGINT",
            Self::UHugeInt => "UHUGEINT",
            Self::Decimal => "DECIMAL",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::TimestampTz => "TIMESTAMP_TZ",
            Self::Interval => "INTERVAL",
            Self::Varchar => "VARCHAR",
            Self::Uuid => "UUID",
            Self::Json => "JSON",
            Self::Blob => "BLOB",
            Self::Bit => "BIT",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a type label is not part of the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTypeLabel(pub String);

impl fmt::Display for UnknownTypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized column type '{}'", self.0)
    }
}

impl std::error::Error for UnknownTypeLabel {}

impl FromStr for DeclaredType {
    type Err = UnknownTypeLabel;

    /// Parses a type label case-insensitively.
    ///
    /// Parameter lists are ignored (`DECIMAL(10,2)` parses as `Decimal`) and
    /// the usual SQL aliases are accepted.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let base = label.split('(').next().unwrap_or_default().trim();
        let normalized = base.to_ascii_uppercase().replace(' ', "_");

        let parsed = match normalized.as_str() {
            "TINYINT" | "INT1" => Self::TinyInt,
            "SMALLINT" | "INT2" | "SHORT" => Self::SmallInt,
            "INTEGER" | "INT" | "INT4" | "SIGNED" => Self::Integer,
            "BIGINT" | "INT8" | "LONG" => Self::BigInt,
            "HUGEINT" | "INT128" => Self::HugeInt,
            "UTINYINT" => Self::UTinyInt,
            "USMALLINT" => Self::USmallInt,
            "UINTEGER" => Self::UInteger,
            "UBIGINT" => Self::UBigInt,
            "UHUGEINT" => Self::UHugeInt,
            "DECIMAL" | "NUMERIC" => Self::Decimal,
            "FLOAT" | "FLOAT4" | "REAL" => Self::Float,
            "DOUBLE" | "FLOAT8" | "DOUBLE_PRECISION" => Self::Double,
            "BOOLEAN" | "BOOL" | "LOGICAL" => Self::Boolean,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "TIMESTAMP" | "DATETIME" => Self::Timestamp,
            "TIMESTAMP_TZ" | "TIMESTAMPTZ" | "TIMESTAMP_WITH_TIME_ZONE" => Self::TimestampTz,
            "INTERVAL" => Self::Interval,
            "VARCHAR" | "CHAR" | "BPCHAR" | "TEXT" | "STRING" => Self::Varchar,
            "UUID" => Self::Uuid,
            "JSON" => Self::Json,
            "BLOB" | "BYTEA" | "BINARY" | "VARBINARY" => Self::Blob,
            "BIT" | "BITSTRING" => Self::Bit,
            _ => return Err(UnknownTypeLabel(label.to_string())),
        };
        Ok(parsed)
    }
}

impl Serialize for DeclaredType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for DeclaredType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_tables_are_disjoint() {
        for ty in DeclaredType::ALL {
            let memberships = [NUMERIC, TEXT, TEMPORAL]
                .iter()
                .filter(|table| table.contains(&ty))
                .count();
            assert!(memberships <= 1, "{ty} is in more than one family");
        }
    }

    #[test]
    fn test_family_membership() {
        assert_eq!(DeclaredType::UBigInt.family(), Some(TypeFamily::Numeric));
        assert_eq!(DeclaredType::Decimal.family(), Some(TypeFamily::Numeric));
        assert_eq!(DeclaredType::Json.family(), Some(TypeFamily::Text));
        assert_eq!(DeclaredType::Interval.family(), Some(TypeFamily::Temporal));
        assert_eq!(DeclaredType::Boolean.family(), None);
        assert_eq!(DeclaredType::Blob.family(), None);
        assert_eq!(DeclaredType::Bit.family(), None);
    }

    #[test]
    fn test_labels_round_trip_through_parser() {
        for ty in DeclaredType::ALL {
            assert_eq!(ty.label().parse::<DeclaredType>(), Ok(ty));
        }
    }

    #[test]
    fn test_parse_aliases_and_parameters() {
        assert_eq!("int".parse(), Ok(DeclaredType::Integer));
        assert_eq!("Decimal(18, 3)".parse(), Ok(DeclaredType::Decimal));
        assert_eq!("varchar(255)".parse(), Ok(DeclaredType::Varchar));
        assert_eq!("TIMESTAMP WITH TIME ZONE".parse(), Ok(DeclaredType::TimestampTz));
        assert_eq!("timestamptz".parse(), Ok(DeclaredType::TimestampTz));
        assert_eq!("  text ".parse(), Ok(DeclaredType::Varchar));
    }

    #[test]
    fn test_parse_unknown_label() {
        let err = "GEOMETRY".parse::<DeclaredType>().unwrap_err();
        assert_eq!(err, UnknownTypeLabel("GEOMETRY".to_string()));
        assert!("".parse::<DeclaredType>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_labels() {
        let json = serde_json::to_string(&DeclaredType::TimestampTz).unwrap();
        assert_eq!(json, "\"TIMESTAMP_TZ\"");
        let json = serde_json::to_string(&DeclaredType::UBigInt).unwrap();
        assert_eq!(json, "\"UBIGINT\"");
        let parsed: DeclaredType = serde_json::from_str("\"double\"").unwrap();
        assert_eq!(parsed, DeclaredType::Double);
    }
}
