//! Core mapping types for the featuremap engine.
//!
//! A [`TableSource`] binds a feature table to the container that owns it and
//! carries the table's schema. The [`fragment`] functions turn a
//! [`SpatialFeature`] into the column, value and assignment fragments of
//! INSERT and UPDATE statements, and [`statement`] splices those fragments
//! into complete statements.
//!
//! Nothing in this crate performs I/O unless the `store-sqlite` feature is
//! enabled, in which case [`sqlite`] executes statements against a
//! GeoPackage container through `rusqlite`.

#![forbid(unsafe_code)]

pub mod error;
pub mod escape;
pub mod feature;
pub mod fragment;
#[cfg(feature = "store-sqlite")]
pub mod sqlite;
pub mod statement;
pub mod table;
pub mod value;

pub use error::{FragmentError, InvalidFeatureReason, SchemaError};
pub use feature::{Attributes, SpatialFeature};
pub use fragment::{GEOMETRY_CONSTRUCTOR, insert_columns, insert_values, update_assignments};
pub use statement::{delete_statement, insert_statement, update_statement};
pub use table::{Column, ContainerId, TableSource};
pub use value::AttributeValue;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{
    DescribeTableError, PersistFeatureError, delete_feature, describe_table, insert_feature,
    register_wkt_functions, update_feature,
};
