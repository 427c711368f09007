//! Electrode layout generation for planar **ion-trap chips**.
//!
//! From a handful of named physical parameters the crate computes the
//! outline of every electrode (RF, DC, center, bonding pads), carves a
//! ground plane around them, and tessellates everything into quadrilateral
//! faces grouped by layer for CAD export.
//!
//! # Pipeline
//! 1. [`params::ParameterSet`]: immutable input, loaded from TOML
//! 2. [`layout::DerivedParameters`]: electrode and pad positions, lead routing
//! 3. [`layout::contours`]: one contour per electrode feature
//! 4. [`offset::offset`]: grow each contour by the clearance gap
//! 5. [`ground::GroundPlane`]: chip outline minus the grown contours
//! 6. [`triangulated`] + [`tessellate`]: triangle strips to quads
//! 7. [`layers`]: quads per layer, handed to [`io::dxf`]
//!
//! [`layers::build_layout`] runs the whole pipeline and fails on the first
//! error without producing partial output.
//!
//! # Features
//! #### Default
//! - [**dxf-io**](https://en.wikipedia.org/wiki/AutoCAD_DXF): `.dxf` import/export
//! - **cli**: the `trapgen` binary

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod errors;
pub mod float_types;
pub mod ground;
pub mod io;
pub mod layers;
pub mod layout;
pub mod offset;
pub mod params;
pub mod tessellate;
pub mod triangulated;

pub use errors::{LayoutError, LayoutResult};
pub use layers::{LayerKey, Layers, build_layout};
pub use params::ParameterSet;
