// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Electrostatics
//!
//! Depletion approximation for an abrupt silicon PN junction.
//!
//! The p-side occupies `x < 0` and the n-side `x > 0`. The depletion region spans
//! `[-xp, xn]`, inside which the space charge is `-q Na` on the p-side and `q Nd` on the
//! n-side. The intrinsic density and thermal voltage are the fixed 300K values, whatever
//! temperature is requested. Lengths are in cm.

mod profile;

pub use profile::{ElectrostaticPoint, ElectrostaticProfile, ElectrostaticSample, ProfileIter};

use crate::constants::{
    cast, ELECTRON_CHARGE, EPSILON_SILICON, INTRINSIC_DENSITY_300K, THERMAL_VOLTAGE_300K,
};
use nalgebra::RealField;

/// Smallest total barrier in V for which a depletion region is reported
pub const MINIMUM_BARRIER: f64 = 0.01;

/// Depletion region of a junction at a single bias point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JunctionResult<T> {
    /// Acceptor density on the p-side in cm^-3
    pub acceptor_density: T,
    /// Donor density on the n-side in cm^-3
    pub donor_density: T,
    /// Applied bias in V, positive for forward bias
    pub applied_bias: T,
    /// Built-in potential `Vbi` in V
    pub built_in_potential: T,
    /// Barrier `Vbi - Va` in V
    pub total_potential: T,
    /// Depletion width `W = xn + xp`
    pub depletion_width: T,
    /// Extent of the depletion region into the n-side, `xn`
    pub n_side_width: T,
    /// Extent of the depletion region into the p-side, `xp`
    pub p_side_width: T,
    /// Field at the metallurgical junction in V / cm, always negative
    pub peak_field: T,
}

/// Solves the depletion approximation for acceptor density `acceptor_density` on the p-side,
/// donor density `donor_density` on the n-side and applied bias `applied_bias`
///
/// Returns `None` when the barrier `Vbi - Va` does not exceed `MINIMUM_BARRIER`: under strong
/// forward bias the junction approaches flat band and has no depletion region. Doping that
/// gives no finite barrier, such as a zero density, is treated the same way.
///
/// `temperature` is recorded but does not enter the calculation, the junction is always solved
/// with the 300K intrinsic density and thermal voltage.
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
pub fn calculate_pn_junction<T: Copy + RealField>(
    acceptor_density: T,
    donor_density: T,
    applied_bias: T,
    temperature: T,
) -> Option<JunctionResult<T>> {
    let _span = tracing::trace_span!("pn_junction", temperature = ?temperature).entered();

    let intrinsic_density = cast::<T>(INTRINSIC_DENSITY_300K);
    let thermal_voltage = cast::<T>(THERMAL_VOLTAGE_300K);
    let charge = cast::<T>(ELECTRON_CHARGE);
    let permittivity = cast::<T>(EPSILON_SILICON);

    // Sum of logarithms, the product `Na Nd` overflows `f32` for heavy doping
    let built_in_potential = thermal_voltage
        * (acceptor_density.ln() + donor_density.ln() - 2.0 * intrinsic_density.ln());
    let total_potential = built_in_potential - applied_bias;

    // Written as a negated comparison so a NaN barrier is also rejected
    if !(total_potential > cast(MINIMUM_BARRIER)) || !total_potential.is_finite() {
        tracing::debug!(
            built_in_potential = ?built_in_potential,
            applied_bias = ?applied_bias,
            "Junction has no depletion region"
        );
        return None;
    }

    let depletion_width = (2.0 * permittivity / charge
        * (1.0 / acceptor_density + 1.0 / donor_density)
        * total_potential)
        .sqrt();
    let total_density = acceptor_density + donor_density;
    let n_side_width = depletion_width * acceptor_density / total_density;
    let p_side_width = depletion_width * donor_density / total_density;
    let peak_field = -(charge * donor_density * n_side_width) / permittivity;

    Some(JunctionResult {
        acceptor_density,
        donor_density,
        applied_bias,
        built_in_potential,
        total_potential,
        depletion_width,
        n_side_width,
        p_side_width,
        peak_field,
    })
}

impl<T: Copy + RealField> JunctionResult<T> {
    /// Space charge, field and potential at `position`
    ///
    /// The potential is referenced to the neutral p-side and reaches `Vtotal` at `xn`.
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn at(&self, position: T) -> ElectrostaticPoint<T> {
        let charge = cast::<T>(ELECTRON_CHARGE);
        let permittivity = cast::<T>(EPSILON_SILICON);

        if position >= -self.p_side_width && position < 0.0 {
            let depth = position + self.p_side_width;
            let density = charge * self.acceptor_density;
            ElectrostaticPoint {
                charge_density: -density,
                electric_field: -(density / permittivity) * depth,
                potential: density / (2.0 * permittivity) * depth * depth,
            }
        } else if position >= 0.0 && position <= self.n_side_width {
            let depth = self.n_side_width - position;
            let density = charge * self.donor_density;
            ElectrostaticPoint {
                charge_density: density,
                electric_field: self.peak_field * (1.0 - position / self.n_side_width),
                potential: self.total_potential - density / (2.0 * permittivity) * depth * depth,
            }
        } else if position > self.n_side_width {
            ElectrostaticPoint {
                charge_density: 0.0,
                electric_field: 0.0,
                potential: self.total_potential,
            }
        } else {
            ElectrostaticPoint::neutral()
        }
    }

    /// Samples the junction, and optionally a reference junction, across a shared window
    ///
    /// The window is twice the wider of the two depletion widths on either side of the
    /// junction. The reference is typically the same device at zero bias, held by the caller.
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn profile(&self, reference: Option<&Self>, num_points: usize) -> ElectrostaticProfile<T> {
        let widest = reference
            .map(|reference| reference.depletion_width.max(self.depletion_width))
            .unwrap_or(self.depletion_width);
        ElectrostaticProfile::new(*self, reference.copied(), widest * 2.0, num_points)
    }
}
