//! Column, value and assignment fragments for INSERT and UPDATE statements.
//!
//! Insert fragments list columns in case-insensitive alphabetical order,
//! breaking ties on the exact name, and include only columns for which the
//! feature supplies a non-null value. The column list and the value list of
//! one feature therefore line up position by position, with the geometry
//! term always last.
//!
//! The update assignment clause walks the columns in declaration order
//! instead.

use std::cmp::Ordering;

use crate::{
    AttributeValue, FragmentError, InvalidFeatureReason, SpatialFeature, TableSource,
    escape::quote_literal,
};

/// SQL function wrapping WKT into a native geometry value.
pub const GEOMETRY_CONSTRUCTOR: &str = "ST_GeomFromText";

/// Build the column list of an INSERT statement.
///
/// # Examples
/// ```
/// use featuremap_core::{ContainerId, SpatialFeature, TableSource, insert_columns};
///
/// let source = TableSource::new(ContainerId::new("survey.gpkg"), "wells")
///     .with_column("name", "TEXT")
///     .with_column("depth", "REAL")
///     .with_geometry_column("geom");
/// let feature = SpatialFeature::default().with_attribute("name", "North");
///
/// assert_eq!(insert_columns(&source, &feature)?, "name,geom");
/// # Ok::<(), featuremap_core::FragmentError>(())
/// ```
///
/// # Errors
///
/// [`FragmentError::InvalidFeature`] when the feature is malformed and
/// [`FragmentError::MissingGeometryColumn`] when the table has no geometry
/// column.
pub fn insert_columns(
    source: &TableSource,
    feature: &SpatialFeature,
) -> Result<String, FragmentError> {
    ensure_well_formed(source, feature)?;
    let geometry_column = require_geometry_column(source)?;
    let mut names: Vec<&str> = present_in_insert_order(source, feature)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    names.push(geometry_column);
    Ok(names.join(","))
}

/// Build the value list of an INSERT statement.
///
/// Every scalar becomes an escaped string literal. The geometry term is
/// `ST_GeomFromText('<wkt>')`, or `NULL` when the feature has no geometry.
///
/// # Errors
///
/// As for [`insert_columns`].
pub fn insert_values(
    source: &TableSource,
    feature: &SpatialFeature,
) -> Result<String, FragmentError> {
    ensure_well_formed(source, feature)?;
    require_geometry_column(source)?;
    let mut values: Vec<String> = present_in_insert_order(source, feature)
        .into_iter()
        .map(|(_, value)| value.to_string_literal())
        .collect();
    values.push(
        feature
            .geometry_wkt()
            .map_or_else(|| "NULL".to_owned(), |wkt| geometry_term(&wkt)),
    );
    Ok(values.join(","))
}

/// Build the `SET` assignments of an UPDATE statement.
///
/// Columns are visited in declaration order and those without a value are
/// skipped; the geometry assignment always closes the clause. Scalars are
/// typed SQL literals.
///
/// # Examples
/// ```
/// use geo::{Geometry, Point};
/// use featuremap_core::{ContainerId, SpatialFeature, TableSource, update_assignments};
///
/// let source = TableSource::new(ContainerId::new("survey.gpkg"), "wells")
///     .with_column("age", "INTEGER")
///     .with_column("name", "TEXT")
///     .with_geometry_column("geom");
/// let feature = SpatialFeature::default()
///     .with_attribute("age", 30_i64)
///     .with_attribute("name", "X")
///     .with_geometry(Geometry::Point(Point::new(0.0, 0.0)));
///
/// assert_eq!(
///     update_assignments(&source, &feature)?,
///     "age=30, name='X', geom=ST_GeomFromText('POINT(0 0)')"
/// );
/// # Ok::<(), featuremap_core::FragmentError>(())
/// ```
///
/// # Errors
///
/// As for [`insert_columns`], plus [`FragmentError::MissingGeometry`] when
/// the feature has no geometry.
pub fn update_assignments(
    source: &TableSource,
    feature: &SpatialFeature,
) -> Result<String, FragmentError> {
    ensure_well_formed(source, feature)?;
    let geometry_column = require_geometry_column(source)?;
    let wkt = feature
        .geometry_wkt()
        .ok_or_else(|| FragmentError::MissingGeometry {
            table: source.table_name().to_owned(),
        })?;
    let mut assignments: Vec<String> = source
        .columns()
        .iter()
        .filter_map(|column| {
            feature
                .attribute(column.name())
                .map(|value| format!("{}={}", column.name(), value.to_sql_literal()))
        })
        .collect();
    assignments.push(format!("{geometry_column}={}", geometry_term(&wkt)));
    Ok(assignments.join(", "))
}

/// Order used by the insert fragments: case-insensitive, then exact.
fn insert_order(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

fn present_in_insert_order<'a>(
    source: &'a TableSource,
    feature: &'a SpatialFeature,
) -> Vec<(&'a str, &'a AttributeValue)> {
    let mut present: Vec<_> = source
        .columns()
        .iter()
        .filter_map(|column| {
            feature
                .attribute(column.name())
                .map(|value| (column.name(), value))
        })
        .collect();
    present.sort_by(|(left, _), (right, _)| insert_order(left, right));
    present
}

fn geometry_term(wkt: &str) -> String {
    format!("{GEOMETRY_CONSTRUCTOR}({})", quote_literal(wkt))
}

fn require_geometry_column(source: &TableSource) -> Result<&str, FragmentError> {
    source
        .geometry_column()
        .ok_or_else(|| FragmentError::MissingGeometryColumn {
            table: source.table_name().to_owned(),
        })
}

/// Check the attributes that the fragments will emit. Attributes naming no
/// registered column are ignored.
fn ensure_well_formed(source: &TableSource, feature: &SpatialFeature) -> Result<(), FragmentError> {
    let invalid = |reason| FragmentError::InvalidFeature {
        table: source.table_name().to_owned(),
        reason,
    };
    for column in source.columns() {
        let name = column.name();
        let Some(value) = feature.attribute(name) else {
            continue;
        };
        if name.is_empty() {
            return Err(invalid(InvalidFeatureReason::EmptyAttributeName));
        }
        if !value.is_finite() {
            return Err(invalid(InvalidFeatureReason::NonFiniteValue {
                attribute: name.to_owned(),
            }));
        }
    }
    Ok(())
}
