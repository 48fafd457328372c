#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for the SQLite container adapter using rstest-bdd.

use std::cell::RefCell;

use featuremap_core::{
    Column, ContainerId, DescribeTableError, SpatialFeature, TableSource, describe_table,
    insert_feature, register_wkt_functions,
};
use geo::{Geometry, Point};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use rusqlite::Connection;
use tempfile::TempDir;

/// Shared state for container scenarios.
#[derive(Debug)]
struct StoreWorld {
    temp_dir: TempDir,
    connection: RefCell<Option<Connection>>,
    source: RefCell<Option<TableSource>>,
    describe_error: RefCell<Option<DescribeTableError>>,
    inserted_row: RefCell<Option<i64>>,
}

impl StoreWorld {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
            connection: RefCell::new(None),
            source: RefCell::new(None),
            describe_error: RefCell::new(None),
            inserted_row: RefCell::new(None),
        }
    }

    fn container(&self) -> ContainerId {
        ContainerId::new(self.temp_dir.path().join("survey.gpkg").display().to_string())
    }

    fn describe(&self, table: &str) {
        let guard = self.connection.borrow();
        let connection = guard.as_ref().expect("container should be open");
        match describe_table(connection, self.container(), table) {
            Ok(source) => {
                self.source.replace(Some(source));
                self.describe_error.replace(None);
            }
            Err(err) => {
                self.source.replace(None);
                self.describe_error.replace(Some(err));
            }
        }
    }
}

#[fixture]
fn world() -> StoreWorld {
    StoreWorld::new()
}

#[given("a GeoPackage with a wells feature table")]
fn given_geopackage(world: &StoreWorld) {
    let path = world.temp_dir.path().join("survey.gpkg");
    let connection = Connection::open(&path).expect("create GeoPackage");
    connection
        .execute_batch(
            "CREATE TABLE gpkg_geometry_columns (
                table_name TEXT NOT NULL,
                column_name TEXT NOT NULL,
                geometry_type_name TEXT NOT NULL,
                srs_id INTEGER NOT NULL,
                z TINYINT NOT NULL,
                m TINYINT NOT NULL,
                CONSTRAINT pk_geom_cols PRIMARY KEY (table_name, column_name)
            );
            CREATE TABLE wells (
                fid INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                geom POINT,
                name TEXT,
                depth REAL
            );
            INSERT INTO gpkg_geometry_columns VALUES ('wells', 'geom', 'POINT', 4326, 0, 0);",
        )
        .expect("create feature table");
    register_wkt_functions(&connection).expect("register geometry functions");
    world.connection.replace(Some(connection));
}

#[when("I describe the wells table")]
fn when_describe_wells(world: &StoreWorld) {
    world.describe("wells");
}

#[when("I describe the rivers table")]
fn when_describe_rivers(world: &StoreWorld) {
    world.describe("rivers");
}

#[when("I insert a well named O'Brien at POINT(5 6)")]
fn when_insert_well(world: &StoreWorld) {
    let connection = world.connection.borrow();
    let source = world.source.borrow();
    let feature = SpatialFeature::default()
        .with_attribute("name", "O'Brien")
        .with_geometry(Geometry::Point(Point::new(5.0, 6.0)));
    let row = insert_feature(
        connection.as_ref().expect("container should be open"),
        source.as_ref().expect("table should be described"),
        &feature,
    )
    .expect("insert feature");
    world.inserted_row.replace(Some(row));
}

#[then("the schema lists name and depth with fid as key and geom as geometry")]
fn then_schema_listed(world: &StoreWorld) {
    let guard = world.source.borrow();
    let source = guard.as_ref().expect("table should be described");
    let names: Vec<_> = source.columns().iter().map(Column::name).collect();
    assert_eq!(names, vec!["name", "depth"]);
    assert_eq!(source.primary_key_column(), Some("fid"));
    assert_eq!(source.geometry_column(), Some("geom"));
}

#[then("the stored well is named O'Brien at POINT(5 6)")]
fn then_well_stored(world: &StoreWorld) {
    let row = world.inserted_row.borrow().expect("a row should be inserted");
    let connection = world.connection.borrow();
    let (name, geom): (String, String) = connection
        .as_ref()
        .expect("container should be open")
        .query_row("SELECT name, geom FROM wells WHERE fid = ?1", [row], |stored| {
            Ok((stored.get(0)?, stored.get(1)?))
        })
        .expect("read stored well");
    assert_eq!(name, "O'Brien");
    assert_eq!(geom, "POINT(5 6)");
}

#[then("describing fails with an unknown table error")]
fn then_unknown_table(world: &StoreWorld) {
    let binding = world.describe_error.borrow();
    let error = binding.as_ref().expect("an error should be recorded");
    assert!(matches!(error, DescribeTableError::UnknownTable { .. }));
}

#[scenario(path = "tests/features/sqlite_feature_store.feature", index = 0)]
fn describes_catalog(world: StoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_feature_store.feature", index = 1)]
fn stores_inserted_feature(world: StoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_feature_store.feature", index = 2)]
fn unknown_table(world: StoreWorld) {
    let _ = world;
}
