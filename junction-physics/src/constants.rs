// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Constants
//!
//! Defines physical constants used by the solvers, in the CGS-eV-Kelvin-Coulomb system

pub const BOLTZMANN_EV: f64 = 8.617333262e-5; // The Boltzmann constant in eV / K
pub const ELECTRON_CHARGE: f64 = 1.602e-19; // Single electron charge in C
pub const EPSILON_SILICON: f64 = 1.035e-12; // Permittivity of silicon in F / cm
pub const THERMAL_VOLTAGE_300K: f64 = 0.0259; // kT / q at 300K in V
pub const INTRINSIC_DENSITY_300K: f64 = 1.5e10; // Intrinsic carrier density of silicon at 300K in cm^-3

use nalgebra::RealField;

/// Lifts one of the `f64` constants above into the working float type
pub(crate) fn cast<T: RealField>(value: f64) -> T {
    T::from_f64(value).expect("Physical constants must fit in T")
}
