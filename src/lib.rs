//! Facade crate for the featuremap relational mapping layer.
//!
//! This crate re-exports the core schema and statement types and exposes
//! the SQLite container adapter behind a feature flag.

#![forbid(unsafe_code)]

pub use featuremap_core::{
    AttributeValue, Attributes, Column, ContainerId, FragmentError, GEOMETRY_CONSTRUCTOR,
    InvalidFeatureReason, SchemaError, SpatialFeature, TableSource, delete_statement,
    insert_columns, insert_statement, insert_values, update_assignments, update_statement,
};

#[cfg(feature = "store-sqlite")]
pub use featuremap_core::{
    DescribeTableError, PersistFeatureError, delete_feature, describe_table, insert_feature,
    register_wkt_functions, update_feature,
};
