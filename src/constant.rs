//! Physical and mathematical constants, in SI units.

/// Mathematical constant pi
pub const PI: f64 = std::f64::consts::PI;

/// Vacuum permeability, in units of T m / A.
pub const MU_NAUGHT: f64 = 4.0 * PI * 1e-7;

/// Coupling constant of the inverse-square law for point magnetic charges, `1 / (4 pi mu_0)`.
pub const MAGNETIC_CHARGE_CONSTANT: f64 = 1.0 / (4.0 * PI * MU_NAUGHT);
