//! GeoJSON geometry scalars.
//!
//! - [`GeoJsonScalar`]: one input type per [`GeometryKind`] (`PointInput`, ...)
//! - [`GeometryScalar`]: the composite `Geometry` type over all kinds
//! - [`Geometry`]: the runtime value both produce

mod any;
mod geojson;
mod geometry;

use std::sync::Arc;

pub use any::GeometryScalar;
pub use geojson::GeoJsonScalar;
pub use geometry::{Coordinates, Geometry, GeometryKind, InvalidGeometry, Position};

use crate::scalar::ScalarType;

/// Reserved field carrying the kind name.
pub const TYPE_FIELD: &str = "type";
/// Reserved field carrying nested coordinate lists.
pub const COORDINATES_FIELD: &str = "coordinates";
/// Reserved field carrying the spatial reference id.
pub const CRS_FIELD: &str = "crs";

/// Every spatial scalar: the per-kind input types followed by `Geometry`.
pub fn all() -> Vec<Arc<dyn ScalarType>> {
    let mut scalars: Vec<Arc<dyn ScalarType>> = GeometryKind::ALL
        .into_iter()
        .map(|kind| Arc::new(GeoJsonScalar::new(kind)) as Arc<dyn ScalarType>)
        .collect();
    scalars.push(Arc::new(GeometryScalar::standard()));
    scalars
}
