//! Writes charge layouts and sampled fields to CSV.
//!
//! The charge file is intended for external plotting: one row per charge, with the color of the
//! magnet it belongs to.

use crate::error::Result;
use crate::magnet::Magnet;
use nalgebra::Vector3;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ChargeRecord<'a> {
    x: f64,
    y: f64,
    z: f64,
    magnitude: f64,
    color: &'a str,
}

#[derive(Serialize)]
struct FieldRecord {
    x: f64,
    y: f64,
    z: f64,
    bx: f64,
    by: f64,
    bz: f64,
}

/// Writes every charge of `magnets` as `x,y,z,magnitude,color` rows, with a header.
pub fn write_charges_csv<W: Write>(writer: W, magnets: &[Magnet]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for magnet in magnets.iter() {
        for charge in magnet.charges() {
            wtr.serialize(ChargeRecord {
                x: charge.position[0],
                y: charge.position[1],
                z: charge.position[2],
                magnitude: charge.magnitude,
                color: magnet.color(),
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Samples the field of `magnet` at each of `points` and writes `x,y,z,bx,by,bz` rows, with a
/// header.
///
/// Nothing is written if any point is singular.
pub fn write_field_csv<W: Write>(
    writer: W,
    magnet: &Magnet,
    points: &[Vector3<f64>],
) -> Result<()> {
    let fields = magnet.field_on_points(points)?;
    let mut wtr = csv::Writer::from_writer(writer);
    for (point, field) in points.iter().zip(fields.iter()) {
        wtr.serialize(FieldRecord {
            x: point[0],
            y: point[1],
            z: point[2],
            bx: field[0],
            by: field[1],
            bz: field[2],
        })?;
    }
    wtr.flush()?;
    Ok(())
}
