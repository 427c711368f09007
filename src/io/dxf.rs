use crate::float_types::Real;
use crate::io::IoError;
use crate::layers::{LayerAssembler, LayerKey, Layers};
use crate::layout::Contour;
use crate::tessellate::Quad;
use nalgebra::Point2;
use std::collections::BTreeSet;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

use dxf::Drawing;
use dxf::entities::*;
use dxf::tables::Layer;

/// How layout coordinates map onto the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Drawing x = layout x
    #[default]
    AsIs,
    /// Swap x and y, the trap axis then runs horizontally
    Transposed,
}

impl Orientation {
    fn apply(self, x: Real, y: Real) -> (Real, Real) {
        match self {
            Orientation::AsIs => (x, y),
            Orientation::Transposed => (y, x),
        }
    }
}

fn dxf_point(p: &Point2<Real>, orientation: Orientation) -> dxf::Point {
    let (x, y) = orientation.apply(p.x, p.y);
    dxf::Point::new(x, y, 0.0)
}

#[doc = " Export tessellated layers to DXF."]
#[doc = ""]
#[doc = " Every quad becomes one `3DFACE` on its layer, and each layer is"]
#[doc = " registered in the layer table."]
#[doc = ""]
#[doc = " # Returns"]
#[doc = " A `Result` containing the DXF file as a byte vector or an error if exporting fails."]
pub fn to_dxf(layers: &Layers, orientation: Orientation) -> Result<Vec<u8>, IoError> {
    let mut drawing = Drawing::new();

    for (name, quads) in layers.named() {
        // a new drawing already holds layer "0"
        if !drawing.layers().any(|layer| layer.name == name) {
            drawing.add_layer(Layer {
                name: name.clone(),
                ..Default::default()
            });
        }
        for quad in quads {
            let face = Face3D::new(
                dxf_point(&quad[0], orientation),
                dxf_point(&quad[1], orientation),
                dxf_point(&quad[2], orientation),
                dxf_point(&quad[3], orientation),
            );
            let mut entity = Entity::new(EntityType::Face3D(face));
            entity.common.layer = name.clone();
            drawing.add_entity(entity);
        }
        debug!(layer = %name, faces = quads.len(), "wrote layer");
    }

    let mut buffer = Vec::new();
    drawing.save(&mut buffer)?;
    Ok(buffer)
}

/// Write `layers` to a DXF file at `path`.
pub fn write_dxf(layers: &Layers, path: &Path, orientation: Orientation) -> Result<(), IoError> {
    let bytes = to_dxf(layers, orientation)?;
    std::fs::write(path, bytes)?;
    info!(path = %path.display(), faces = layers.quad_count(), "wrote drawing");
    Ok(())
}

#[doc = " Import closed outlines from DXF data, grouped by layer."]
#[doc = ""]
#[doc = " `3DFACE`, `SOLID`, closed `POLYLINE` and closed `LWPOLYLINE` entities"]
#[doc = " are read as contours, everything else is skipped. Repeated points"]
#[doc = " (such as the doubled last corner of a triangular face) are merged."]
#[doc = " The `GROUND` layer is skipped, a ground plane is always carved anew."]
#[doc = ""]
#[doc = " ## Returns"]
#[doc = " A `LayerAssembler` holding one `LayerKey::Named` layer per drawing layer."]
pub fn from_dxf(dxf_data: &[u8], orientation: Orientation) -> Result<LayerAssembler, IoError> {
    let drawing = Drawing::load(&mut Cursor::new(dxf_data))?;
    let mut assembler = LayerAssembler::new(0);
    let mut names = BTreeSet::new();
    let ground = LayerKey::Ground.name(0);

    let point = |x: f64, y: f64| {
        let (x, y) = orientation.apply(x as Real, y as Real);
        Point2::new(x, y)
    };

    for entity in drawing.entities() {
        if entity.common.layer == ground {
            continue;
        }
        let raw: Vec<Point2<Real>> = match &entity.specific {
            EntityType::Face3D(face) => [
                &face.first_corner,
                &face.second_corner,
                &face.third_corner,
                &face.fourth_corner,
            ]
            .into_iter()
            .map(|p| point(p.x, p.y))
            .collect(),
            // SOLID corners 3 and 4 are swapped relative to the outline order
            EntityType::Solid(solid) => [
                &solid.first_corner,
                &solid.second_corner,
                &solid.fourth_corner,
                &solid.third_corner,
            ]
            .into_iter()
            .map(|p| point(p.x, p.y))
            .collect(),
            EntityType::Polyline(polyline) if polyline.is_closed() => polyline
                .vertices()
                .map(|v| point(v.location.x, v.location.y))
                .collect(),
            EntityType::LwPolyline(polyline) if polyline.is_closed() => polyline
                .vertices
                .iter()
                .map(|v| point(v.x, v.y))
                .collect(),
            _ => continue,
        };

        let contour = dedup_ring(raw);
        if contour.len() < 3 {
            return Err(IoError::MalformedInput(format!(
                "entity on layer '{}' has fewer than 3 distinct points",
                entity.common.layer
            )));
        }
        names.insert(entity.common.layer.clone());
        assembler.push(LayerKey::Named(entity.common.layer.clone()), contour);
    }

    info!(layers = names.len(), "read drawing");
    Ok(assembler)
}

/// Read closed outlines from the DXF file at `path`.
pub fn read_dxf(path: &Path, orientation: Orientation) -> Result<LayerAssembler, IoError> {
    let bytes = std::fs::read(path)?;
    from_dxf(&bytes, orientation)
}

/// Drop points equal to their predecessor, including the wrap-around.
fn dedup_ring(mut points: Contour) -> Contour {
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Quads as written by [`to_dxf`], read back from a drawing. Used to
/// inspect generated files.
pub fn faces_from_dxf(
    dxf_data: &[u8],
    orientation: Orientation,
) -> Result<Vec<(String, Quad)>, IoError> {
    let drawing = Drawing::load(&mut Cursor::new(dxf_data))?;
    let mut faces = Vec::new();
    for entity in drawing.entities() {
        if let EntityType::Face3D(face) = &entity.specific {
            let corner = |p: &dxf::Point| {
                let (x, y) = orientation.apply(p.x as Real, p.y as Real);
                Point2::new(x, y)
            };
            faces.push((
                entity.common.layer.clone(),
                [
                    corner(&face.first_corner),
                    corner(&face.second_corner),
                    corner(&face.third_corner),
                    corner(&face.fourth_corner),
                ],
            ));
        }
    }
    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_ring_merges_repeated_corners() {
        let ring = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 0.0),
        ];
        assert_eq!(dedup_ring(ring).len(), 3);
    }

    #[test]
    fn transposed_orientation_swaps_axes() {
        assert_eq!(Orientation::Transposed.apply(1.0, 2.0), (2.0, 1.0));
        assert_eq!(Orientation::AsIs.apply(1.0, 2.0), (1.0, 2.0));
    }
}
