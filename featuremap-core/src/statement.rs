//! Complete INSERT, UPDATE and DELETE statements for a single feature.
//!
//! Statements splice the [`fragment`](crate::fragment) output into fixed
//! templates. Table names are quoted as identifiers; rows are addressed by
//! the primary key column compared against the feature id.

use log::debug;

use crate::{
    FragmentError, InvalidFeatureReason, SpatialFeature, TableSource,
    escape::{quote_identifier, quote_literal},
    fragment::{insert_columns, insert_values, update_assignments},
};

/// Build `INSERT INTO "<table>" (<columns>) VALUES (<values>)`.
///
/// The primary key is never written, leaving it to the container to
/// generate.
///
/// # Examples
/// ```
/// use featuremap_core::{ContainerId, SpatialFeature, TableSource, insert_statement};
///
/// let source = TableSource::new(ContainerId::new("survey.gpkg"), "wells")
///     .with_column("name", "TEXT")
///     .with_geometry_column("geom");
/// let feature = SpatialFeature::default().with_attribute("name", "North");
///
/// assert_eq!(
///     insert_statement(&source, &feature)?,
///     "INSERT INTO \"wells\" (name,geom) VALUES ('North',NULL)"
/// );
/// # Ok::<(), featuremap_core::FragmentError>(())
/// ```
///
/// # Errors
///
/// Propagates the errors of [`insert_columns`] and [`insert_values`].
pub fn insert_statement(
    source: &TableSource,
    feature: &SpatialFeature,
) -> Result<String, FragmentError> {
    let columns = insert_columns(source, feature)?;
    let values = insert_values(source, feature)?;
    debug!(
        "built insert for table {} in {}",
        source.table_name(),
        source.container()
    );
    Ok(format!(
        "INSERT INTO {} ({columns}) VALUES ({values})",
        quote_identifier(source.table_name())
    ))
}

/// Build `UPDATE "<table>" SET <assignments> WHERE <pk> = '<id>'`.
///
/// # Errors
///
/// [`FragmentError::MissingPrimaryKeyColumn`] without a primary key column,
/// [`FragmentError::InvalidFeature`] when the feature has no id, and the
/// errors of [`update_assignments`].
pub fn update_statement(
    source: &TableSource,
    feature: &SpatialFeature,
) -> Result<String, FragmentError> {
    let predicate = row_predicate(source, feature)?;
    let assignments = update_assignments(source, feature)?;
    debug!(
        "built update for table {} in {}",
        source.table_name(),
        source.container()
    );
    Ok(format!(
        "UPDATE {} SET {assignments} WHERE {predicate}",
        quote_identifier(source.table_name())
    ))
}

/// Build `DELETE FROM "<table>" WHERE <pk> = '<id>'`.
///
/// Neither the geometry nor the attributes are consulted.
///
/// # Errors
///
/// [`FragmentError::MissingPrimaryKeyColumn`] without a primary key column
/// and [`FragmentError::InvalidFeature`] when the feature has no id.
pub fn delete_statement(
    source: &TableSource,
    feature: &SpatialFeature,
) -> Result<String, FragmentError> {
    let predicate = row_predicate(source, feature)?;
    Ok(format!(
        "DELETE FROM {} WHERE {predicate}",
        quote_identifier(source.table_name())
    ))
}

fn row_predicate(source: &TableSource, feature: &SpatialFeature) -> Result<String, FragmentError> {
    let table = source.table_name();
    let primary_key = source
        .primary_key_column()
        .ok_or_else(|| FragmentError::MissingPrimaryKeyColumn {
            table: table.to_owned(),
        })?;
    let id = feature
        .id
        .as_deref()
        .ok_or_else(|| FragmentError::InvalidFeature {
            table: table.to_owned(),
            reason: InvalidFeatureReason::MissingIdentifier,
        })?;
    Ok(format!("{primary_key} = {}", quote_literal(id)))
}
