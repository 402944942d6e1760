#[macro_use]
extern crate specs_derive;
pub mod charge;
pub mod configuration;
pub mod constant;
pub mod error;
pub mod magnet;
pub mod magnetic;
pub mod output;
pub mod shapes;
pub mod transform;
