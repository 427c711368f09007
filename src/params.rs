//! Trap parameters: the immutable input of a layout computation.
//!
//! A [`ParameterSet`] is read once from TOML (missing keys take the
//! reference chip's values) and validated before any geometry is built.
//! All lengths share one unit, micrometers by convention.

use crate::errors::{LayoutError, LayoutResult};
use crate::float_types::Real;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pads for an SMD thermometer along the bottom edge of the chip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermometerPads {
    /// Pad extent along x
    pub pad_width: Real,
    /// Pad extent along y, measured up from the bottom chip edge
    pub pad_height: Real,
    /// Distance of the left pad's inner edge from the center line
    pub offset_left: Real,
    /// Distance of the right pad's inner edge from the center line
    pub offset_right: Real,
}

impl Default for ThermometerPads {
    fn default() -> Self {
        Self {
            pad_width: 600.0,
            pad_height: 400.0,
            offset_left: 1200.0,
            offset_right: 500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    /// Overall width of the chip
    pub width: Real,
    /// Overall height of the chip
    pub height: Real,
    /// Width of the empty gap between electrodes
    pub gap: Real,
    /// Width of the center electrode
    pub center_width: Real,
    /// Length of the center electrode
    pub center_length: Real,
    /// Width of the bridge from the center electrode to its bonding pads
    pub center_bridge_width: Real,
    /// Distance of the center electrode pads from the chip edge
    pub center_pad_margin: Real,
    /// Number of DC electrodes per side
    pub dc_count: usize,
    /// DC electrode widths along the central axis
    pub dc_widths: Vec<Real>,
    /// DC electrode length away from the central axis
    pub dc_length: Real,
    /// Width of the leads from DC electrodes to their bonding pads
    pub dc_lead_width: Real,
    /// Separation between parallel DC leads in the vertical section
    pub dc_lead_sep: Real,
    /// Separation from each DC bonding pad to the next
    pub dc_pad_seps: Vec<Real>,
    pub dc_pad_width: Real,
    pub dc_pad_height: Real,
    /// Distance of the DC bonding pads from the chip edge
    pub dc_pad_margin: Real,
    /// Displacement of the DC bonding pad array along the central axis
    pub dc_pad_offset: Real,
    /// Overrides `dc_pad_offset` for the left pad array
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_pad_offset_left: Option<Real>,
    /// Overrides `dc_pad_offset` for the right pad array
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_pad_offset_right: Option<Real>,
    pub rf_width_left: Real,
    pub rf_width_right: Real,
    /// Length of both RF rails
    pub rf_length: Real,
    /// Width of the bridge between the RF electrode and its bonding pad
    pub rf_bridge_width: Real,
    pub rf_pad_width: Real,
    pub rf_pad_height: Real,
    /// Distance of the RF bonding pad from the center line
    pub rf_pad_offset: Real,
    /// Distance from the end of the RF electrode to the center pad bridge
    pub rf_center_bridge_sep: Real,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thermometer: Option<ThermometerPads>,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            width: 12000.0,
            height: 12000.0,
            gap: 10.0,
            center_width: 320.0,
            center_length: 11000.0,
            center_bridge_width: 50.0,
            center_pad_margin: 3000.0,
            dc_count: 10,
            dc_widths: vec![400.0, 400.0, 400.0, 400.0, 400.0, 200.0, 400.0, 400.0, 400.0, 400.0],
            dc_length: 300.0,
            dc_lead_width: 50.0,
            dc_lead_sep: 130.0,
            dc_pad_seps: vec![100.0, 100.0, 450.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0],
            dc_pad_width: 400.0,
            dc_pad_height: 400.0,
            dc_pad_margin: 100.0,
            dc_pad_offset: 125.0,
            dc_pad_offset_left: None,
            dc_pad_offset_right: None,
            rf_width_left: 120.0,
            rf_width_right: 120.0,
            rf_length: 11500.0,
            rf_bridge_width: 150.0,
            rf_pad_width: 400.0,
            rf_pad_height: 400.0,
            rf_pad_offset: 680.0,
            rf_center_bridge_sep: 10.0,
            thermometer: None,
        }
    }
}

impl ParameterSet {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> LayoutResult<Self> {
        let params: ParameterSet =
            toml::from_str(text).map_err(|e| LayoutError::Config(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Read, parse and validate a TOML parameter file.
    pub fn load(path: &Path) -> LayoutResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| LayoutError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> LayoutResult<String> {
        toml::to_string_pretty(self).map_err(|e| LayoutError::Config(e.to_string()))
    }

    /// Pad displacement of the left pad array.
    pub fn pad_offset_left(&self) -> Real {
        self.dc_pad_offset_left.unwrap_or(self.dc_pad_offset)
    }

    /// Pad displacement of the right pad array.
    pub fn pad_offset_right(&self) -> Real {
        self.dc_pad_offset_right.unwrap_or(self.dc_pad_offset)
    }

    /// Check sequence lengths against `dc_count` and that every length is
    /// a finite number. Sizes must be positive, offsets may be anything.
    pub fn validate(&self) -> LayoutResult<()> {
        if self.dc_count == 0 {
            return Err(LayoutError::Config("dc_count must be at least 1".into()));
        }
        if self.dc_widths.len() != self.dc_count {
            return Err(LayoutError::Config(format!(
                "dc_widths has {} entries, expected dc_count = {}",
                self.dc_widths.len(),
                self.dc_count
            )));
        }
        if self.dc_pad_seps.len() != self.dc_count - 1 {
            return Err(LayoutError::Config(format!(
                "dc_pad_seps has {} entries, expected dc_count - 1 = {}",
                self.dc_pad_seps.len(),
                self.dc_count - 1
            )));
        }

        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("center_width", self.center_width),
            ("center_length", self.center_length),
            ("center_bridge_width", self.center_bridge_width),
            ("dc_length", self.dc_length),
            ("dc_lead_width", self.dc_lead_width),
            ("dc_pad_width", self.dc_pad_width),
            ("dc_pad_height", self.dc_pad_height),
            ("rf_width_left", self.rf_width_left),
            ("rf_width_right", self.rf_width_right),
            ("rf_length", self.rf_length),
            ("rf_bridge_width", self.rf_bridge_width),
            ("rf_pad_width", self.rf_pad_width),
            ("rf_pad_height", self.rf_pad_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::Config(format!(
                    "{name} must be a positive length, got {value}"
                )));
            }
        }
        for (i, w) in self.dc_widths.iter().enumerate() {
            if !w.is_finite() || *w <= 0.0 {
                return Err(LayoutError::Config(format!(
                    "dc_widths[{i}] must be a positive length, got {w}"
                )));
            }
        }

        let mut finite = vec![
            ("gap", self.gap),
            ("center_pad_margin", self.center_pad_margin),
            ("dc_lead_sep", self.dc_lead_sep),
            ("dc_pad_margin", self.dc_pad_margin),
            ("dc_pad_offset", self.dc_pad_offset),
            ("dc_pad_offset_left", self.pad_offset_left()),
            ("dc_pad_offset_right", self.pad_offset_right()),
            ("rf_pad_offset", self.rf_pad_offset),
            ("rf_center_bridge_sep", self.rf_center_bridge_sep),
        ];
        finite.extend(self.dc_pad_seps.iter().map(|s| ("dc_pad_seps", *s)));
        if let Some(therm) = &self.thermometer {
            finite.extend([
                ("thermometer.pad_width", therm.pad_width),
                ("thermometer.pad_height", therm.pad_height),
                ("thermometer.offset_left", therm.offset_left),
                ("thermometer.offset_right", therm.offset_right),
            ]);
        }
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(LayoutError::Config(format!("{name} is not finite: {value}")));
            }
        }
        if self.gap < 0.0 {
            return Err(LayoutError::Config(format!("gap must not be negative, got {}", self.gap)));
        }

        Ok(())
    }
}

/// A commented parameter file holding the default values, suitable as a
/// starting point for a new chip.
pub fn example_document() -> String {
    let p = ParameterSet::default();
    let therm = ThermometerPads::default();
    let list = |values: &[Real]| {
        values.iter().map(|v| format!("{v}")).collect::<Vec<_>>().join(", ")
    };

    format!(
        r#"# Ion trap layout parameters. All lengths are in micrometers.
# Keys left out of this file take the values shown here.

# Overall dimensions of the chip
width = {width}
height = {height}
# Width of the empty gap between electrodes
gap = {gap}

# Width and length of the center electrode
center_width = {center_width}
center_length = {center_length}
# Width of the bridge from the center electrode to its bonding pads
center_bridge_width = {center_bridge_width}
# Distance of the center electrode pads from the chip edge
center_pad_margin = {center_pad_margin}

# Number of DC electrodes per side
dc_count = {dc_count}
# DC electrode widths along the central axis (dc_count entries)
dc_widths = [{dc_widths}]
# DC electrode length away from the central axis
dc_length = {dc_length}
# Width of leads from electrodes to bonding pads
dc_lead_width = {dc_lead_width}
# Separation between DC leads in the vertical section
dc_lead_sep = {dc_lead_sep}
# Separation from each bonding pad to the next (dc_count - 1 entries)
dc_pad_seps = [{dc_pad_seps}]
# Dimensions of the DC bonding pads
dc_pad_width = {dc_pad_width}
dc_pad_height = {dc_pad_height}
# Distance of the DC bonding pads from the chip edge
dc_pad_margin = {dc_pad_margin}
# Displacement of the DC bonding pads along the central axis
dc_pad_offset = {dc_pad_offset}
# Per-side overrides of dc_pad_offset
# dc_pad_offset_left = {dc_pad_offset}
# dc_pad_offset_right = {dc_pad_offset}

# Width of the left and right RF electrodes
rf_width_left = {rf_width_left}
rf_width_right = {rf_width_right}
# Length of both RF electrodes
rf_length = {rf_length}
# Width of the bridge between the RF electrode and its bonding pad
rf_bridge_width = {rf_bridge_width}
# Dimensions of the RF bonding pad
rf_pad_width = {rf_pad_width}
rf_pad_height = {rf_pad_height}
# Distance of the RF bonding pad from the center line
rf_pad_offset = {rf_pad_offset}
# Distance from the end of the RF electrode to the center pad bridge
rf_center_bridge_sep = {rf_center_bridge_sep}

# Optional pads for an SMD thermometer at the bottom edge
# [thermometer]
# pad_width = {therm_width}
# pad_height = {therm_height}
# offset_left = {therm_left}
# offset_right = {therm_right}
"#,
        width = p.width,
        height = p.height,
        gap = p.gap,
        center_width = p.center_width,
        center_length = p.center_length,
        center_bridge_width = p.center_bridge_width,
        center_pad_margin = p.center_pad_margin,
        dc_count = p.dc_count,
        dc_widths = list(&p.dc_widths),
        dc_length = p.dc_length,
        dc_lead_width = p.dc_lead_width,
        dc_lead_sep = p.dc_lead_sep,
        dc_pad_seps = list(&p.dc_pad_seps),
        dc_pad_width = p.dc_pad_width,
        dc_pad_height = p.dc_pad_height,
        dc_pad_margin = p.dc_pad_margin,
        dc_pad_offset = p.dc_pad_offset,
        rf_width_left = p.rf_width_left,
        rf_width_right = p.rf_width_right,
        rf_length = p.rf_length,
        rf_bridge_width = p.rf_bridge_width,
        rf_pad_width = p.rf_pad_width,
        rf_pad_height = p.rf_pad_height,
        rf_pad_offset = p.rf_pad_offset,
        rf_center_bridge_sep = p.rf_center_bridge_sep,
        therm_width = therm.pad_width,
        therm_height = therm.pad_height,
        therm_left = therm.offset_left,
        therm_right = therm.offset_right,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ParameterSet::default().validate().is_ok());
    }

    #[test]
    fn example_document_parses_back_to_defaults() {
        let parsed = ParameterSet::from_toml_str(&example_document()).unwrap();
        assert_eq!(parsed, ParameterSet::default());
    }

    #[test]
    fn pad_offset_overrides() {
        let params = ParameterSet {
            dc_pad_offset_right: Some(-40.0),
            ..ParameterSet::default()
        };
        assert_eq!(params.pad_offset_left(), 125.0);
        assert_eq!(params.pad_offset_right(), -40.0);
    }
}
