//! SQLite (GeoPackage) container adapter.
//!
//! Schemas are discovered from the GeoPackage catalog and statements built
//! by [`crate::statement`] are executed on a caller-supplied
//! [`Connection`]. The adapter owns no connection and keeps no state.

use log::{debug, warn};
use rusqlite::{Connection, OptionalExtension, functions::FunctionFlags};
use thiserror::Error;

use crate::{
    ContainerId, FragmentError, SpatialFeature, TableSource,
    escape::quote_identifier,
    fragment::GEOMETRY_CONSTRUCTOR,
    statement::{delete_statement, insert_statement, update_statement},
};

/// Error raised when reading a table schema from the container.
#[derive(Debug, Error)]
pub enum DescribeTableError {
    /// The container has no table with the requested name.
    #[error("table {table} does not exist in {container}")]
    UnknownTable {
        /// Container that was searched.
        container: ContainerId,
        /// Requested table name.
        table: String,
    },
    /// Querying the catalog failed.
    #[error("failed to read the schema of table {table}: {source}")]
    Database {
        /// Table being described.
        table: String,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
}

/// Error raised when writing a feature to the container.
#[derive(Debug, Error)]
pub enum PersistFeatureError {
    /// The statement could not be built.
    #[error(transparent)]
    Statement(#[from] FragmentError),
    /// Executing the statement failed.
    #[error("failed to execute statement against table {table}: {source}")]
    Execute {
        /// Target table.
        table: String,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
}

/// Read the schema of `table` from a GeoPackage container.
///
/// The geometry column comes from `gpkg_geometry_columns`; the remaining
/// columns and the primary key come from `PRAGMA table_info`. Neither the
/// primary key nor the geometry column is registered as an attribute
/// column. A table missing from the geometry catalog is returned without a
/// geometry column.
///
/// # Errors
///
/// [`DescribeTableError::UnknownTable`] when the table does not exist and
/// [`DescribeTableError::Database`] when a catalog query fails.
pub fn describe_table(
    connection: &Connection,
    container: ContainerId,
    table: &str,
) -> Result<TableSource, DescribeTableError> {
    let database = |source| DescribeTableError::Database {
        table: table.to_owned(),
        source,
    };
    let geometry_column = geometry_column_of(connection, table).map_err(database)?;
    let columns = table_info(connection, table).map_err(database)?;
    if columns.is_empty() {
        return Err(DescribeTableError::UnknownTable {
            container,
            table: table.to_owned(),
        });
    }

    let mut source = TableSource::new(container, table);
    for column in columns {
        if column.primary_key_rank == 1 {
            source.set_primary_key_column(column.name);
        } else if geometry_column.as_deref() != Some(column.name.as_str()) {
            source.add_column(column.name, column.declared_type);
        }
    }
    match geometry_column {
        Some(name) => source.set_geometry_column(name),
        None => warn!(
            "table {table} in {} has no entry in gpkg_geometry_columns",
            source.container()
        ),
    }
    debug!(
        "described table {table} with {} attribute columns",
        source.columns().len()
    );
    Ok(source)
}

/// Register a pass-through `ST_GeomFromText` on `connection`.
///
/// Containers without a spatial extension then store the WKT text itself
/// as the geometry value.
///
/// # Errors
///
/// Returns the `rusqlite` error if the function cannot be registered.
pub fn register_wkt_functions(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        GEOMETRY_CONSTRUCTOR,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| context.get::<Option<String>>(0),
    )
}

/// Insert `feature` and return the row id the container assigned.
///
/// # Errors
///
/// [`PersistFeatureError::Statement`] when the statement cannot be built and
/// [`PersistFeatureError::Execute`] when the container rejects it.
pub fn insert_feature(
    connection: &Connection,
    source: &TableSource,
    feature: &SpatialFeature,
) -> Result<i64, PersistFeatureError> {
    let statement = insert_statement(source, feature)?;
    execute(connection, source, &statement)?;
    Ok(connection.last_insert_rowid())
}

/// Update the row addressed by the feature id and return the number of
/// rows changed.
///
/// # Errors
///
/// As for [`insert_feature`].
pub fn update_feature(
    connection: &Connection,
    source: &TableSource,
    feature: &SpatialFeature,
) -> Result<usize, PersistFeatureError> {
    let statement = update_statement(source, feature)?;
    execute(connection, source, &statement)
}

/// Delete the row addressed by the feature id and return the number of
/// rows removed.
///
/// # Errors
///
/// As for [`insert_feature`].
pub fn delete_feature(
    connection: &Connection,
    source: &TableSource,
    feature: &SpatialFeature,
) -> Result<usize, PersistFeatureError> {
    let statement = delete_statement(source, feature)?;
    execute(connection, source, &statement)
}

fn execute(
    connection: &Connection,
    source: &TableSource,
    statement: &str,
) -> Result<usize, PersistFeatureError> {
    debug!("executing: {statement}");
    connection
        .execute(statement, [])
        .map_err(|source_error| PersistFeatureError::Execute {
            table: source.table_name().to_owned(),
            source: source_error,
        })
}

struct TableColumn {
    name: String,
    declared_type: String,
    primary_key_rank: i64,
}

fn geometry_column_of(connection: &Connection, table: &str) -> Result<Option<String>, rusqlite::Error> {
    let has_catalog = connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'gpkg_geometry_columns'",
            [],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !has_catalog {
        return Ok(None);
    }
    connection
        .query_row(
            "SELECT column_name FROM gpkg_geometry_columns WHERE table_name = ?1 COLLATE NOCASE",
            [table],
            |row| row.get(0),
        )
        .optional()
}

fn table_info(connection: &Connection, table: &str) -> Result<Vec<TableColumn>, rusqlite::Error> {
    let query = format!("PRAGMA table_info({})", quote_identifier(table));
    let mut statement = connection.prepare(&query)?;
    let rows = statement.query_map([], |row| {
        Ok(TableColumn {
            name: row.get(1)?,
            declared_type: row.get(2)?,
            primary_key_rank: row.get(5)?,
        })
    })?;
    rows.collect()
}
