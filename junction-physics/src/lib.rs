// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Junction is a teaching engine for the physics of an abrupt silicon PN junction
//!
//! # Overview
//! Junction evaluates closed-form textbook models rather than solving a coupled device
//! simulation. Each stage feeds the next:
//!
//! - [`band`] gives the temperature dependent band gap, effective densities of states and
//!   intrinsic concentration.
//! - [`fermi`] places the equilibrium Fermi level of a uniformly doped region and samples
//!   the Fermi-Dirac occupation around it.
//! - [`electrostatics`] solves the depletion approximation of the junction at a bias point.
//! - [`current`] computes the ideal diode current with a phenomenological reverse
//!   breakdown, together with the carrier profile, band diagram and I-V sweep.
//!
//! Every calculation is pure and generic over `T: Copy + nalgebra::RealField`. Sampled
//! quantities are returned as lazy sequences which can be iterated repeatedly.
//!
//! # Usage
//! Junction is also distributed as a binary which prints each calculation as a table:
//!
//! ```text
//! junction current --acceptors 1e17 --donors 1e16 --bias -2
//! ```
//!
//! Transport parameters and sampling resolutions are read from `.config/default.toml`.

#![warn(missing_docs)]
#![allow(clippy::type_complexity)]

/// The command line global application, tracing and display primitives
pub mod app;

/// Physical constants
mod constants;

/// Temperature dependent band structure
pub mod band;

/// Current through the junction and the profiles derived from it
pub mod current;

/// Depletion approximation of the junction
pub mod electrostatics;

/// Equilibrium Fermi level and state occupation
pub mod fermi;
