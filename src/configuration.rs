//! Loads magnet setups from configuration files.
//!
//! A configuration lists magnets by shape, together with the rotations and inversion to apply to
//! each once its charges are laid out. YAML (`.yaml`, `.yml`) and JSON (`.json`) files are
//! supported, for example:
//!
//! ```yaml
//! n_threads: 4
//! magnets:
//!   - color: r
//!     shape:
//!       type: Cylinder
//!       center: [0.0, 0.0, 0.0]
//!       radius: 0.005
//!       height: 0.01
//!       b: 1.2
//!     rotations:
//!       - point: [0.0, 0.0, -0.005]
//!         axis: [1.0, 0.0, 0.0]
//!         angle: 1.5707963
//!     inverted: false
//! ```

use crate::charge::PointCharge;
use crate::error::{MagnetError, Result};
use crate::magnet::{Magnet, DEFAULT_COLOR};
use crate::shapes::{Cylinder, Disk, Rectangle, Ring, Shape};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn origin() -> Vector3<f64> {
    Vector3::zeros()
}

/// The charge layout of a configured magnet.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeConfiguration {
    Ring(Ring),
    Disk(Disk),
    Cylinder(Cylinder),
    Rectangle(Rectangle),
    /// An explicit list of charges.
    Charges { charges: Vec<PointCharge> },
}

impl ShapeConfiguration {
    pub fn charges(&self) -> Result<Vec<PointCharge>> {
        match self {
            ShapeConfiguration::Ring(shape) => shape.charges(),
            ShapeConfiguration::Disk(shape) => shape.charges(),
            ShapeConfiguration::Cylinder(shape) => shape.charges(),
            ShapeConfiguration::Rectangle(shape) => shape.charges(),
            ShapeConfiguration::Charges { charges } => Ok(charges.clone()),
        }
    }
}

/// A rotation by `angle` radians about the line through `point` with direction `axis`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RotationConfiguration {
    #[serde(default = "origin")]
    pub point: Vector3<f64>,
    pub axis: Vector3<f64>,
    pub angle: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MagnetConfiguration {
    pub shape: ShapeConfiguration,
    #[serde(default = "default_color")]
    pub color: String,
    /// Rotations, applied in order.
    #[serde(default)]
    pub rotations: Vec<RotationConfiguration>,
    /// Negate every charge once the rotations are applied.
    #[serde(default)]
    pub inverted: bool,
}

impl MagnetConfiguration {
    pub fn build(&self) -> Result<Magnet> {
        let mut magnet = Magnet::new(self.shape.charges()?, &self.color);
        for rotation in self.rotations.iter() {
            magnet.rotate(&rotation.point, &rotation.axis, rotation.angle)?;
        }
        if self.inverted {
            magnet.invert();
        }
        Ok(magnet)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Configuration {
    /// Size of the thread pool used for parallel field evaluation. Uses the rayon default if unset.
    #[serde(default)]
    pub n_threads: Option<usize>,
    pub magnets: Vec<MagnetConfiguration>,
}

impl Configuration {
    /// Creates every configured magnet, in file order.
    pub fn build(&self) -> Result<Vec<Magnet>> {
        self.magnets.iter().map(|m| m.build()).collect()
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}

/// Loads a configuration file, choosing the parser from the file extension.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Configuration> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("yaml") | Some("yml") => Configuration::from_yaml_str(&read_to_string(path)?),
        Some("json") => Configuration::from_json_str(&read_to_string(path)?),
        _ => Err(MagnetError::UnsupportedFormat(path.display().to_string())),
    }
}
