#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for the statement fragment builder using rstest-bdd.

use std::cell::RefCell;

use geo::{Geometry, Point};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use featuremap_core::{
    ContainerId, FragmentError, SpatialFeature, TableSource, insert_columns, insert_values,
    update_assignments,
};

/// Insert fragments are recorded as a `(columns, values)` pair.
#[derive(Debug, Default)]
struct FragmentWorld {
    source: RefCell<Option<TableSource>>,
    feature: RefCell<Option<SpatialFeature>>,
    insert: RefCell<Option<Result<(String, String), FragmentError>>>,
    update: RefCell<Option<Result<String, FragmentError>>>,
}

impl FragmentWorld {
    fn with_inputs<T>(&self, build: impl FnOnce(&TableSource, &SpatialFeature) -> T) -> T {
        let source = self.source.borrow();
        let feature = self.feature.borrow();
        build(
            source.as_ref().expect("table should be configured"),
            feature.as_ref().expect("feature should be configured"),
        )
    }

    fn error(&self) -> FragmentError {
        if let Some(Err(err)) = self.insert.borrow().as_ref() {
            return err.clone();
        }
        match self.update.borrow().as_ref() {
            Some(Err(err)) => err.clone(),
            other => panic!("expected a recorded error, found {other:?}"),
        }
    }
}

#[fixture]
fn world() -> FragmentWorld {
    FragmentWorld::default()
}

fn people() -> TableSource {
    TableSource::new(ContainerId::new("survey.gpkg"), "people")
        .with_column("age", "INTEGER")
        .with_column("name", "TEXT")
        .with_primary_key_column("fid")
}

fn point(x: f64, y: f64) -> Geometry<f64> {
    Geometry::Point(Point::new(x, y))
}

#[given("a people table with age and name columns")]
fn given_people_table(world: &FragmentWorld) {
    world
        .source
        .replace(Some(people().with_geometry_column("geom")));
}

#[given("a people table without a geometry column")]
fn given_people_table_without_geometry(world: &FragmentWorld) {
    world.source.replace(Some(people()));
}

#[given("a feature named X without age or geometry")]
fn given_bare_feature(world: &FragmentWorld) {
    world
        .feature
        .replace(Some(SpatialFeature::default().with_attribute("name", "X")));
}

#[given("a feature named X located at POINT(1 2)")]
fn given_located_feature(world: &FragmentWorld) {
    let feature = SpatialFeature::default()
        .with_attribute("name", "X")
        .with_geometry(point(1.0, 2.0));
    world.feature.replace(Some(feature));
}

#[given("a feature aged 30 named X located at POINT(0 0)")]
fn given_full_feature(world: &FragmentWorld) {
    let feature = SpatialFeature::default()
        .with_attribute("age", 30_i64)
        .with_attribute("name", "X")
        .with_geometry(point(0.0, 0.0));
    world.feature.replace(Some(feature));
}

#[when("I build the insert fragments")]
fn when_building_insert(world: &FragmentWorld) {
    let result = world.with_inputs(|source, feature| -> Result<_, FragmentError> {
        Ok((
            insert_columns(source, feature)?,
            insert_values(source, feature)?,
        ))
    });
    world.insert.replace(Some(result));
}

#[when("I build the update clause")]
fn when_building_update(world: &FragmentWorld) {
    let result = world.with_inputs(update_assignments);
    world.update.replace(Some(result));
}

#[then("the column list is name,geom")]
fn then_sparse_columns(world: &FragmentWorld) {
    let insert = world.insert.borrow();
    let (columns, _) = insert
        .as_ref()
        .expect("insert should be built")
        .as_ref()
        .expect("insert should succeed");
    assert_eq!(columns, "name,geom");
}

#[then("the value list is 'X',NULL")]
fn then_null_geometry_values(world: &FragmentWorld) {
    assert_values(world, "'X',NULL");
}

#[then("the value list is 'X',ST_GeomFromText('POINT(1 2)')")]
fn then_point_values(world: &FragmentWorld) {
    assert_values(world, "'X',ST_GeomFromText('POINT(1 2)')");
}

fn assert_values(world: &FragmentWorld, expected: &str) {
    let insert = world.insert.borrow();
    let (_, values) = insert
        .as_ref()
        .expect("insert should be built")
        .as_ref()
        .expect("insert should succeed");
    assert_eq!(values, expected);
}

#[then("the update clause is age=30, name='X', geom=ST_GeomFromText('POINT(0 0)')")]
fn then_update_clause(world: &FragmentWorld) {
    let update = world.update.borrow();
    let clause = update
        .as_ref()
        .expect("update should be built")
        .as_ref()
        .expect("update should succeed");
    assert_eq!(clause, "age=30, name='X', geom=ST_GeomFromText('POINT(0 0)')");
}

#[then("building fails with a missing geometry error")]
fn then_missing_geometry(world: &FragmentWorld) {
    assert!(matches!(
        world.error(),
        FragmentError::MissingGeometry { .. }
    ));
}

#[then("building fails with a missing geometry column error")]
fn then_missing_geometry_column(world: &FragmentWorld) {
    assert!(matches!(
        world.error(),
        FragmentError::MissingGeometryColumn { .. }
    ));
}

#[scenario(path = "tests/features/fragment_builder.feature", index = 0)]
fn sparse_insert(world: FragmentWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/fragment_builder.feature", index = 1)]
fn insert_with_geometry(world: FragmentWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/fragment_builder.feature", index = 2)]
fn full_update(world: FragmentWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/fragment_builder.feature", index = 3)]
fn update_without_geometry(world: FragmentWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/fragment_builder.feature", index = 4)]
fn missing_geometry_column(world: FragmentWorld) {
    let _ = world;
}
