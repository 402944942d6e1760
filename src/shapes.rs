//! Support for different magnet shapes.
//!
//! Each shape lays out point charges over one or more flat surfaces. The magnitude of each charge
//! is the surface charge density `b` multiplied by the area of the patch the charge represents.

use crate::charge::PointCharge;
use crate::constant::PI;
use crate::error::{MagnetError, Result};
use crate::magnet::Magnet;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

fn default_density() -> usize {
    5
}

pub trait Shape {
    /// Returns the charges that make up the shape.
    fn charges(&self) -> Result<Vec<PointCharge>>;

    /// Creates a magnet of the given color from the shape.
    fn magnet(&self, color: &str) -> Result<Magnet> {
        Ok(Magnet::new(self.charges()?, color))
    }
}

fn check_density(density: usize) -> Result<()> {
    if density == 0 {
        return Err(MagnetError::InvalidShape(
            "density must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// A flat annulus in the XY plane, approximated by charges on its mid-radius circle.
///
/// Each charge has magnitude `b * pi * (r2^2 - r1^2) / density`, so magnitudes carry the sign
/// of `b`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ring {
    pub center: Vector3<f64>,
    /// Inner radius, m.
    pub r1: f64,
    /// Outer radius, m.
    pub r2: f64,
    /// Surface charge density.
    pub b: f64,
    /// Number of charges around the ring.
    #[serde(default = "default_density")]
    pub density: usize,
}

impl Shape for Ring {
    fn charges(&self) -> Result<Vec<PointCharge>> {
        check_density(self.density)?;
        if self.r1 < 0.0 || self.r2 < self.r1 {
            return Err(MagnetError::InvalidShape(format!(
                "ring radii must satisfy 0 <= r1 <= r2, got r1={} r2={}",
                self.r1, self.r2
            )));
        }
        let n = self.density as f64;
        let theta = 2.0 * PI / n;
        let area = PI * (self.r2.powi(2) - self.r1.powi(2)) / n;
        let magnitude = self.b * area;
        let radius = 0.5 * (self.r1 + self.r2);
        Ok((0..self.density)
            .map(|i| {
                let angle = i as f64 * theta;
                let offset = Vector3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
                PointCharge::new(self.center + offset, magnitude)
            })
            .collect())
    }
}

/// A flat disk (or annulus) in the XY plane, built from concentric rings.
///
/// The `i`th ring holds `floor(sqrt(density)) * (i + 1)` charges, so the number of charges per
/// ring grows with radius.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Disk {
    pub center: Vector3<f64>,
    pub r1: f64,
    pub r2: f64,
    pub b: f64,
    /// Number of concentric rings.
    #[serde(default = "default_density")]
    pub density: usize,
}

impl Shape for Disk {
    fn charges(&self) -> Result<Vec<PointCharge>> {
        check_density(self.density)?;
        let thickness = (self.r2 - self.r1) / self.density as f64;
        let per_ring = (self.density as f64).sqrt() as usize;
        let mut charges = Vec::new();
        for i in 0..self.density {
            let ring = Ring {
                center: self.center,
                r1: self.r1 + i as f64 * thickness,
                r2: self.r1 + (i + 1) as f64 * thickness,
                b: self.b,
                density: per_ring * (i + 1),
            };
            charges.extend(ring.charges()?);
        }
        Ok(charges)
    }
}

/// A cylindrical magnet with its axis along Z.
///
/// The top face is a disk centred on `center` with density `+b`; the bottom face sits `height`
/// below it with density `-b`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cylinder {
    pub center: Vector3<f64>,
    pub radius: f64,
    pub height: f64,
    pub b: f64,
    #[serde(default = "default_density")]
    pub density: usize,
}

impl Shape for Cylinder {
    fn charges(&self) -> Result<Vec<PointCharge>> {
        let top = Disk {
            center: self.center,
            r1: 0.0,
            r2: self.radius,
            b: self.b,
            density: self.density,
        };
        let bottom = Disk {
            center: self.center - Vector3::new(0.0, 0.0, self.height),
            b: -self.b,
            ..top.clone()
        };
        let mut charges = top.charges()?;
        charges.extend(bottom.charges()?);
        Ok(charges)
    }
}

/// A flat rectangle in the XY plane, with one corner at `corner`.
///
/// The rectangle is divided into a `4 * density` by `4 * density` grid of cells, with a charge
/// at the centre of each cell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rectangle {
    pub corner: Vector3<f64>,
    /// Extent along X, m.
    pub width: f64,
    /// Extent along Y, m.
    pub length: f64,
    pub b: f64,
    #[serde(default = "default_density")]
    pub density: usize,
}

impl Shape for Rectangle {
    fn charges(&self) -> Result<Vec<PointCharge>> {
        check_density(self.density)?;
        let cells = 4 * self.density;
        let dx = self.width / cells as f64;
        let dy = self.length / cells as f64;
        let magnitude = self.b * dx * dy;
        let mut charges = Vec::with_capacity(cells * cells);
        for i in 0..cells {
            for j in 0..cells {
                let offset = Vector3::new(
                    dx / 2.0 + i as f64 * dx,
                    dy / 2.0 + j as f64 * dy,
                    0.0,
                );
                charges.push(PointCharge::new(self.corner + offset, magnitude));
            }
        }
        Ok(charges)
    }
}
