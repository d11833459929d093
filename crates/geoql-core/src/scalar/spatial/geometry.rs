//! Runtime geometry values.

use std::fmt;

use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::{COORDINATES_FIELD, CRS_FIELD, TYPE_FIELD};
use crate::literal::Literal;

/// GeoJSON geometry kinds with a fixed coordinate nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 6] = [
        Self::Point,
        Self::MultiPoint,
        Self::LineString,
        Self::MultiLineString,
        Self::Polygon,
        Self::MultiPolygon,
    ];

    /// The value carried by the `type` field.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::MultiPoint => "MultiPoint",
            Self::LineString => "LineString",
            Self::MultiLineString => "MultiLineString",
            Self::Polygon => "Polygon",
            Self::MultiPolygon => "MultiPolygon",
        }
    }

    /// Name of the schema input type for this kind.
    pub const fn input_type_name(self) -> &'static str {
        match self {
            Self::Point => "PointInput",
            Self::MultiPoint => "MultiPointInput",
            Self::LineString => "LineStringInput",
            Self::MultiLineString => "MultiLineStringInput",
            Self::Polygon => "PolygonInput",
            Self::MultiPolygon => "MultiPolygonInput",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Number of list levels wrapped around a single position.
    pub const fn depth(self) -> usize {
        match self {
            Self::Point => 0,
            Self::MultiPoint | Self::LineString => 1,
            Self::MultiLineString | Self::Polygon => 2,
            Self::MultiPolygon => 3,
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One `(x, y)` coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Coordinates at each supported nesting depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinates {
    Position(Position),
    Positions(Vec<Position>),
    Rings(Vec<Vec<Position>>),
    Polygons(Vec<Vec<Vec<Position>>>),
}

impl Coordinates {
    pub fn depth(&self) -> usize {
        match self {
            Self::Position(_) => 0,
            Self::Positions(_) => 1,
            Self::Rings(_) => 2,
            Self::Polygons(_) => 3,
        }
    }

    fn positions(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        match self {
            Self::Position(p) => Box::new(std::iter::once(p)),
            Self::Positions(ps) => Box::new(ps.iter()),
            Self::Rings(rings) => Box::new(rings.iter().flatten()),
            Self::Polygons(polygons) => Box::new(polygons.iter().flatten().flatten()),
        }
    }

    fn to_json(&self) -> JsonValue {
        fn position(p: &Position) -> JsonValue {
            JsonValue::Array(vec![p.x.into(), p.y.into()])
        }
        fn line(ps: &[Position]) -> JsonValue {
            JsonValue::Array(ps.iter().map(position).collect())
        }
        fn rings(rings: &[Vec<Position>]) -> JsonValue {
            JsonValue::Array(rings.iter().map(|r| line(r)).collect())
        }
        match self {
            Self::Position(p) => position(p),
            Self::Positions(ps) => line(ps),
            Self::Rings(rs) => rings(rs),
            Self::Polygons(polygons) => {
                JsonValue::Array(polygons.iter().map(|p| rings(p)).collect())
            }
        }
    }

    fn to_literal(&self) -> Literal {
        fn position(p: &Position) -> Literal {
            Literal::List(vec![Literal::Float(p.x), Literal::Float(p.y)])
        }
        fn line(ps: &[Position]) -> Literal {
            Literal::List(ps.iter().map(position).collect())
        }
        fn rings(rings: &[Vec<Position>]) -> Literal {
            Literal::List(rings.iter().map(|r| line(r)).collect())
        }
        match self {
            Self::Position(p) => position(p),
            Self::Positions(ps) => line(ps),
            Self::Rings(rs) => rings(rs),
            Self::Polygons(polygons) => Literal::List(polygons.iter().map(|p| rings(p)).collect()),
        }
    }
}

/// Raised when coordinates do not fit a geometry kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct InvalidGeometry(pub(crate) String);

/// A geometry with an optional spatial reference id.
///
/// Immutable once built; equality compares kind, coordinates and srid.
/// Every constructor goes through [`Geometry::new`], so all coordinates are
/// finite and [`Geometry::to_json`] never emits `null` for a number.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    kind: GeometryKind,
    coordinates: Coordinates,
    srid: Option<i32>,
}

impl Geometry {
    /// Build a geometry, checking nesting depth, element counts, ring closure
    /// and that every number is finite.
    pub fn new(kind: GeometryKind, coordinates: Coordinates) -> Result<Self, InvalidGeometry> {
        if coordinates.depth() != kind.depth() {
            return Err(InvalidGeometry(format!(
                "{kind} coordinates must be nested {} level(s) deep, found {}",
                kind.depth(),
                coordinates.depth()
            )));
        }
        if coordinates
            .positions()
            .any(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(InvalidGeometry(format!(
                "{kind} coordinates must be finite numbers"
            )));
        }
        match (&coordinates, kind) {
            (Coordinates::Positions(line), GeometryKind::LineString) => check_line(line)?,
            (Coordinates::Rings(lines), GeometryKind::MultiLineString) => {
                lines.iter().try_for_each(|line| check_line(line))?;
            }
            (Coordinates::Rings(rings), GeometryKind::Polygon) => check_polygon(rings)?,
            (Coordinates::Polygons(polygons), GeometryKind::MultiPolygon) => {
                polygons.iter().try_for_each(|rings| check_polygon(rings))?;
            }
            _ => {}
        }
        Ok(Self {
            kind,
            coordinates,
            srid: None,
        })
    }

    /// A point at `(x, y)` with no spatial reference id.
    pub fn point(x: f64, y: f64) -> Result<Self, InvalidGeometry> {
        Self::new(
            GeometryKind::Point,
            Coordinates::Position(Position::new(x, y)),
        )
    }

    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = Some(srid);
        self
    }

    pub(crate) fn with_optional_srid(mut self, srid: Option<i32>) -> Self {
        self.srid = srid;
        self
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    /// Spatial reference id, `None` when unset.
    pub fn srid(&self) -> Option<i32> {
        self.srid
    }

    /// Serialized form: `{"type", "coordinates", "crs"}`, `crs` omitted when unset.
    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        map.insert(TYPE_FIELD.into(), self.kind.name().into());
        map.insert(COORDINATES_FIELD.into(), self.coordinates.to_json());
        if let Some(srid) = self.srid {
            map.insert(CRS_FIELD.into(), srid.into());
        }
        JsonValue::Object(map)
    }

    /// Object literal with `type` as an enum value and float coordinates.
    pub fn to_literal(&self) -> Literal {
        let mut fields = vec![
            (TYPE_FIELD.into(), Literal::Enum(self.kind.name().into())),
            (COORDINATES_FIELD.into(), self.coordinates.to_literal()),
        ];
        if let Some(srid) = self.srid {
            fields.push((CRS_FIELD.into(), Literal::Int(i64::from(srid))));
        }
        Literal::Object(fields)
    }
}

fn check_line(line: &[Position]) -> Result<(), InvalidGeometry> {
    if line.len() < 2 {
        return Err(InvalidGeometry(format!(
            "a line string needs at least 2 positions, found {}",
            line.len()
        )));
    }
    Ok(())
}

fn check_polygon(rings: &[Vec<Position>]) -> Result<(), InvalidGeometry> {
    for ring in rings {
        if ring.len() < 4 {
            return Err(InvalidGeometry(format!(
                "a linear ring needs at least 4 positions, found {}",
                ring.len()
            )));
        }
        if ring.first() != ring.last() {
            return Err(InvalidGeometry(
                "a linear ring must start and end at the same position".into(),
            ));
        }
    }
    Ok(())
}
