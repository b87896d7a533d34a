//! Uniform one-dimensional sample grids
//!
//! Every sweep in the junction engine (positions across a device, energies across a band
//! diagram, biases across an I-V curve) walks one of these grids. Grids are lazy: they know
//! their origin, spacing and length and compute points on demand.

mod generate;
mod grid;

pub use generate::*;
pub use grid::*;
