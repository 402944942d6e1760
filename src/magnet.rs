//! Magnets: rigid assemblies of point magnetic charges.
//!
//! A distribution of charges which are fixed in relative position is referred to as a magnet.
//! Physically the net charge of a magnet should be zero, since there are no magnetic monopoles,
//! but this is not enforced; the [shapes](crate::shapes) constructors distribute charges in
//! opposite-signed pairs where appropriate.
//!
//! Operations that change a magnet in place (`rotate`, `invert`) return `&mut Self` so that calls
//! can be chained. Operations that combine magnets (`union`, `+`) produce a new magnet.

extern crate nalgebra;
use crate::charge::{AxisAlignment, PointCharge};
use crate::error::Result;
use nalgebra::Vector3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use specs::{Component, HashMapStorage};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Display tag used when a magnet is created without one.
pub const DEFAULT_COLOR: &str = "b";

/// An ordered collection of point charges, treated as a single compound source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Magnet {
    charges: Vec<PointCharge>,
    /// Display tag. Not interpreted by any calculation.
    color: String,
}

impl Magnet {
    /// Creates a magnet from an initial set of charges.
    pub fn new(charges: Vec<PointCharge>, color: &str) -> Self {
        Magnet {
            charges,
            color: color.to_string(),
        }
    }

    /// Creates a magnet with no charges.
    pub fn empty(color: &str) -> Self {
        Magnet::new(Vec::new(), color)
    }

    pub fn charges(&self) -> &[PointCharge] {
        &self.charges
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    /// Number of charges in the magnet.
    pub fn size(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    /// Appends a single charge.
    pub fn push(&mut self, charge: PointCharge) {
        self.charges.push(charge);
    }

    /// Sum of all charge magnitudes. Informational only.
    pub fn net_charge(&self) -> f64 {
        self.charges.iter().map(|c| c.magnitude).sum()
    }

    /// Calculates the superposed field of every charge at `target`.
    ///
    /// An empty magnet has zero field everywhere.
    pub fn field_at(&self, target: &Vector3<f64>) -> Result<Vector3<f64>> {
        let mut field: Vector3<f64> = Vector3::zeros();
        for charge in self.charges.iter() {
            field += charge.field_at(target)?;
        }
        Ok(field)
    }

    /// Calculates the field at each of `targets`, evaluating the points in parallel.
    ///
    /// Fails if any target coincides with a charge.
    pub fn field_on_points(&self, targets: &[Vector3<f64>]) -> Result<Vec<Vector3<f64>>> {
        targets
            .par_iter()
            .map(|target| self.field_at(target))
            .collect()
    }

    /// Calculates the total force this magnet exerts on the charges of `other`.
    ///
    /// Each charge of `other` feels `magnitude * B`, where `B` is the field of this magnet at
    /// that charge's position.
    pub fn force_on(&self, other: &Magnet) -> Result<Vector3<f64>> {
        let mut force: Vector3<f64> = Vector3::zeros();
        for charge in other.charges.iter() {
            force += self.field_at(&charge.position)? * charge.magnitude;
        }
        Ok(force)
    }

    /// Rotates every charge by `theta` radians about the line through `point` with direction
    /// `axis`.
    ///
    /// Fails with `InvalidAxis` if `axis` is not a valid direction, whether or not the magnet has
    /// any charges. The magnet is left unchanged on failure.
    pub fn rotate(
        &mut self,
        point: &Vector3<f64>,
        axis: &Vector3<f64>,
        theta: f64,
    ) -> Result<&mut Self> {
        let alignment = AxisAlignment::new(axis)?;
        for charge in self.charges.iter_mut() {
            *charge = charge.rotate_aligned(&alignment, point, theta);
        }
        Ok(self)
    }

    /// Negates the magnitude of every charge.
    pub fn invert(&mut self) -> &mut Self {
        for charge in self.charges.iter_mut() {
            charge.magnitude = -charge.magnitude;
        }
        self
    }

    /// Creates a magnet containing the charges of `self` followed by the charges of `other`.
    ///
    /// The new magnet takes the color of `self`.
    pub fn union(&self, other: &Magnet) -> Magnet {
        let mut charges = Vec::with_capacity(self.size() + other.size());
        charges.extend_from_slice(&self.charges);
        charges.extend_from_slice(&other.charges);
        Magnet::new(charges, &self.color)
    }
}

impl Default for Magnet {
    fn default() -> Self {
        Magnet::empty(DEFAULT_COLOR)
    }
}

impl Component for Magnet {
    type Storage = HashMapStorage<Self>;
}

impl Add for Magnet {
    type Output = Magnet;

    fn add(mut self, other: Magnet) -> Magnet {
        self += other;
        self
    }
}

impl<'a> Add<&'a Magnet> for &'a Magnet {
    type Output = Magnet;

    fn add(self, other: &'a Magnet) -> Magnet {
        self.union(other)
    }
}

impl AddAssign for Magnet {
    fn add_assign(&mut self, other: Magnet) {
        self.charges.extend(other.charges);
    }
}

impl fmt::Display for Magnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, charge) in self.charges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", charge)?;
        }
        write!(f, "]")
    }
}
