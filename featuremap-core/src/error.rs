//! Errors raised while building statements and validating schemas.

use thiserror::Error;

/// Why a feature was rejected as malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidFeatureReason {
    /// An attribute was stored under an empty name.
    #[error("attribute names must not be empty")]
    EmptyAttributeName,
    /// A real-valued attribute was NaN or infinite.
    #[error("attribute {attribute} holds a non-finite number")]
    NonFiniteValue {
        /// Name of the offending attribute.
        attribute: String,
    },
    /// The statement targets an existing row but the feature has no id.
    #[error("feature has no identifier")]
    MissingIdentifier,
}

/// Error returned by the fragment and statement builders.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FragmentError {
    /// The feature cannot be mapped onto the table.
    #[error("invalid feature for table {table}: {reason}")]
    InvalidFeature {
        /// Table the feature was being mapped onto.
        table: String,
        /// Detail of what was wrong with the feature.
        reason: InvalidFeatureReason,
    },
    /// The table has no geometry column configured.
    #[error("table {table} has no geometry column configured")]
    MissingGeometryColumn {
        /// Table whose schema is incomplete.
        table: String,
    },
    /// An update was requested for a feature that carries no geometry.
    #[error("updating table {table} requires a feature geometry")]
    MissingGeometry {
        /// Table the update targets.
        table: String,
    },
    /// A statement addressing a single row needs the primary key column.
    #[error("table {table} has no primary key column configured")]
    MissingPrimaryKeyColumn {
        /// Table whose schema is incomplete.
        table: String,
    },
}

/// Error returned by [`TableSource::validate`](crate::TableSource::validate).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No geometry column was set.
    #[error("table {table} has no geometry column configured")]
    MissingGeometryColumn {
        /// Table under validation.
        table: String,
    },
    /// No primary key column was set.
    #[error("table {table} has no primary key column configured")]
    MissingPrimaryKeyColumn {
        /// Table under validation.
        table: String,
    },
    /// The geometry column was also registered as an attribute column, so
    /// inserts would name it twice.
    #[error("geometry column {column} of table {table} is registered as an attribute column")]
    GeometryColumnRegistered {
        /// Table under validation.
        table: String,
        /// The clashing column.
        column: String,
    },
    /// The primary key column was also registered as an attribute column,
    /// so inserts would write the key the container generates.
    #[error("primary key column {column} of table {table} is registered as an attribute column")]
    PrimaryKeyColumnRegistered {
        /// Table under validation.
        table: String,
        /// The clashing column.
        column: String,
    },
    /// Primary key and geometry were configured as the same column.
    #[error("table {table} uses {column} as both primary key and geometry column")]
    PrimaryKeyIsGeometry {
        /// Table under validation.
        table: String,
        /// The doubly assigned column.
        column: String,
    },
}
