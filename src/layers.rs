//! Grouping of finished geometry into CAD layers.

use crate::aabb::BoardOutline;
use crate::errors::LayoutResult;
use crate::ground::{GroundPlane, merge_outlines};
use crate::layout::{
    Align, Contour, DerivedParameters, Side, center_contour, center_pad_contour, dc_contour,
    rf_contour, thermometer_contour,
};
use crate::params::ParameterSet;
use crate::tessellate::Quad;
use crate::triangulated::TriangleStrips;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Logical layer of a feature. The derived ordering is the order layers
/// are written in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKey {
    Rf,
    Dc { side: Side, index: usize },
    /// Center electrode together with its pads
    Center,
    Thermometer,
    /// Layer read from an existing drawing, kept under its own name
    Named(String),
    Ground,
}

impl LayerKey {
    /// Layer name in the drawing. Layers are numbered like the reference
    /// drawings: RF is `0`, left DC electrodes follow from `1`, then the
    /// right ones, then the center electrode and the thermometer pads.
    pub fn name(&self, dc_count: usize) -> String {
        match self {
            LayerKey::Rf => "0".to_string(),
            LayerKey::Dc {
                side: Side::Left,
                index,
            } => (index + 1).to_string(),
            LayerKey::Dc {
                side: Side::Right,
                index,
            } => (dc_count + index + 1).to_string(),
            LayerKey::Center => (2 * dc_count + 1).to_string(),
            LayerKey::Thermometer => (2 * dc_count + 2).to_string(),
            LayerKey::Named(name) => name.clone(),
            LayerKey::Ground => "GROUND".to_string(),
        }
    }
}

/// Tessellated layers, ready for a CAD writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layers {
    dc_count: usize,
    layers: BTreeMap<LayerKey, Vec<Quad>>,
}

impl Layers {
    pub fn get(&self, key: &LayerKey) -> Option<&[Quad]> {
        self.layers.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LayerKey, &[Quad])> {
        self.layers.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Layers under their drawing names.
    pub fn named(&self) -> impl Iterator<Item = (String, &[Quad])> {
        self.iter().map(|(k, v)| (k.name(self.dc_count), v))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn quad_count(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }
}

/// Collects contours per layer and tessellates them in one pass.
#[derive(Debug, Clone, Default)]
pub struct LayerAssembler {
    dc_count: usize,
    contours: BTreeMap<LayerKey, Vec<Contour>>,
}

impl LayerAssembler {
    pub fn new(dc_count: usize) -> Self {
        Self {
            dc_count,
            contours: BTreeMap::new(),
        }
    }

    /// Generate every electrode of the trap under its layer.
    pub fn electrodes(params: &ParameterSet, derived: &DerivedParameters) -> LayoutResult<Self> {
        let mut assembler = Self::new(params.dc_count);

        assembler.push(LayerKey::Rf, rf_contour(params)?);
        for side in Side::BOTH {
            for index in 0..params.dc_count {
                let contour = dc_contour(params, derived, side, index)?;
                assembler.push(LayerKey::Dc { side, index }, contour);
            }
        }
        assembler.push(LayerKey::Center, center_contour(params, Align::Center)?);
        for side in Side::BOTH {
            assembler.push(LayerKey::Center, center_pad_contour(params, side)?);
        }
        for side in Side::BOTH {
            if let Some(pad) = thermometer_contour(params, side)? {
                assembler.push(LayerKey::Thermometer, pad);
            }
        }

        Ok(assembler)
    }

    pub fn push(&mut self, key: LayerKey, contour: Contour) {
        self.contours.entry(key).or_default().push(contour);
    }

    pub fn layer(&self, key: &LayerKey) -> Option<&[Contour]> {
        self.contours.get(key).map(Vec::as_slice)
    }

    /// Every contour, in layer order.
    pub fn contours(&self) -> impl Iterator<Item = &Contour> {
        self.contours.values().flatten()
    }

    /// Outer outlines of every layer, with the contours of each layer merged
    /// into as few outlines as they form together. Use these to carve a ground
    /// plane around faces read from a drawing.
    pub fn outlines(&self) -> LayoutResult<Vec<Contour>> {
        let mut outlines = Vec::new();
        for (key, contours) in &self.contours {
            if *key == LayerKey::Ground {
                continue;
            }
            outlines.extend(merge_outlines(contours)?);
        }
        Ok(outlines)
    }

    /// Tessellate all contours, plus the ground plane when given, into
    /// per-layer quad lists.
    pub fn assemble(&self, ground: Option<&GroundPlane>) -> LayoutResult<Layers> {
        let mut layers = BTreeMap::new();
        for (key, contours) in &self.contours {
            let mut quads = Vec::new();
            for contour in contours {
                quads.extend(contour.to_quads()?);
            }
            debug!(layer = %key.name(self.dc_count), quads = quads.len(), "tessellated layer");
            layers.insert(key.clone(), quads);
        }
        if let Some(ground) = ground {
            let quads = ground.to_quads()?;
            debug!(quads = quads.len(), "tessellated ground plane");
            layers.insert(LayerKey::Ground, quads);
        }

        Ok(Layers {
            dc_count: self.dc_count,
            layers,
        })
    }
}

/// Compute the complete layout of a trap: electrodes, ground plane and
/// their tessellation. Any failure aborts the whole computation.
pub fn build_layout(params: &ParameterSet) -> LayoutResult<Layers> {
    params.validate()?;
    let derived = DerivedParameters::new(params)?;
    let assembler = LayerAssembler::electrodes(params, &derived)?;

    let board = BoardOutline::centered(params.width, params.height);
    let electrodes: Vec<Contour> = assembler.contours().cloned().collect();
    let ground = GroundPlane::from_electrodes(&board, &electrodes, params.gap)?;

    let layers = assembler.assemble(Some(&ground))?;
    info!(
        layers = layers.len(),
        quads = layers.quad_count(),
        "layout complete"
    );
    Ok(layers)
}
