//! Table sources and their schema registry.
//!
//! A [`TableSource`] is identified by the container that owns it and the
//! table name. The column registry, primary key and geometry column are
//! schema metadata only and never take part in equality or hashing.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use crate::SchemaError;

/// Opaque identity of the container (database) that owns a table.
///
/// # Examples
/// ```
/// use featuremap_core::ContainerId;
///
/// let id = ContainerId::new("survey.gpkg");
/// assert_eq!(id.as_str(), "survey.gpkg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(String);

impl ContainerId {
    /// Wrap an identity string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The wrapped identity.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A declared column and its SQL type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    sql_type: String,
}

impl Column {
    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared SQL type, verbatim.
    #[must_use]
    pub fn sql_type(&self) -> &str {
        &self.sql_type
    }
}

/// One feature table bound to one container.
///
/// Columns keep their declaration order. Re-adding a column replaces its
/// type in place.
///
/// # Examples
/// ```
/// use std::collections::HashSet;
/// use featuremap_core::{ContainerId, TableSource};
///
/// let mut roads = TableSource::new(ContainerId::new("survey.gpkg"), "roads");
/// roads.add_column("name", "TEXT");
/// roads.set_geometry_column("geom");
///
/// let bare = TableSource::new(ContainerId::new("survey.gpkg"), "roads");
/// assert_eq!(roads, bare);
///
/// let set: HashSet<_> = [roads, bare].into_iter().collect();
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TableSource {
    container: ContainerId,
    table_name: String,
    primary_key_column: Option<String>,
    geometry_column: Option<String>,
    columns: Vec<Column>,
}

impl TableSource {
    /// Create a source with an empty schema.
    #[must_use]
    pub fn new(container: ContainerId, table_name: impl Into<String>) -> Self {
        Self {
            container,
            table_name: table_name.into(),
            primary_key_column: None,
            geometry_column: None,
            columns: Vec::new(),
        }
    }

    /// Builder form of [`TableSource::add_column`].
    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        self.add_column(name, sql_type);
        self
    }

    /// Builder form of [`TableSource::set_primary_key_column`].
    #[must_use]
    pub fn with_primary_key_column(mut self, name: impl Into<String>) -> Self {
        self.set_primary_key_column(name);
        self
    }

    /// Builder form of [`TableSource::set_geometry_column`].
    #[must_use]
    pub fn with_geometry_column(mut self, name: impl Into<String>) -> Self {
        self.set_geometry_column(name);
        self
    }

    /// Owning container.
    #[must_use]
    pub const fn container(&self) -> &ContainerId {
        &self.container
    }

    /// Table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Register a column or overwrite the type of an existing one.
    ///
    /// The type is not validated.
    pub fn add_column(&mut self, name: impl Into<String>, sql_type: impl Into<String>) {
        let column = Column {
            name: name.into(),
            sql_type: sql_type.into(),
        };
        match self.columns.iter_mut().find(|existing| existing.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }

    /// Registered columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Declared type of `name`, if registered.
    #[must_use]
    pub fn column_type(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .map(Column::sql_type)
    }

    /// Set the primary key column. Not checked against the registry.
    pub fn set_primary_key_column(&mut self, name: impl Into<String>) {
        self.primary_key_column = Some(name.into());
    }

    /// Set the geometry column. Not checked against the registry.
    pub fn set_geometry_column(&mut self, name: impl Into<String>) {
        self.geometry_column = Some(name.into());
    }

    /// Primary key column, if set.
    #[must_use]
    pub fn primary_key_column(&self) -> Option<&str> {
        self.primary_key_column.as_deref()
    }

    /// Geometry column, if set.
    #[must_use]
    pub fn geometry_column(&self) -> Option<&str> {
        self.geometry_column.as_deref()
    }

    /// Check the schema is complete enough to build every statement.
    ///
    /// The setters accept anything so that schemas can be discovered
    /// incrementally; call this once discovery is finished.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when the geometry or primary key column is
    /// unset, when either is also registered as an attribute column, or
    /// when one column is configured as both.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let table = || self.table_name.clone();
        let geometry = self
            .geometry_column()
            .ok_or_else(|| SchemaError::MissingGeometryColumn { table: table() })?;
        let primary_key = self
            .primary_key_column()
            .ok_or_else(|| SchemaError::MissingPrimaryKeyColumn { table: table() })?;
        if primary_key == geometry {
            return Err(SchemaError::PrimaryKeyIsGeometry {
                table: table(),
                column: geometry.to_owned(),
            });
        }
        if self.column_type(geometry).is_some() {
            return Err(SchemaError::GeometryColumnRegistered {
                table: table(),
                column: geometry.to_owned(),
            });
        }
        if self.column_type(primary_key).is_some() {
            return Err(SchemaError::PrimaryKeyColumnRegistered {
                table: table(),
                column: primary_key.to_owned(),
            });
        }
        Ok(())
    }
}

impl PartialEq for TableSource {
    fn eq(&self, other: &Self) -> bool {
        self.container == other.container && self.table_name == other.table_name
    }
}

impl Eq for TableSource {}

impl Hash for TableSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.container.hash(state);
        self.table_name.hash(state);
    }
}
