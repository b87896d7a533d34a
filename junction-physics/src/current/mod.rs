// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Current
//!
//! Ideal-diode current of an abrupt silicon junction, with a phenomenological reverse
//! breakdown, and the minority carrier profiles and band diagram derived from the depletion
//! region.
//!
//! The breakdown law is a chosen visual function giving a sharp current wall at `Vbr`. It is
//! not an impact ionization integral and its constants are fixed.
//!
//! Every exponential is bounded: the forward bias is clamped before exponentiation and the
//! breakdown current saturates, so no output is infinite or NaN.

mod diagram;
mod profile;
mod sweep;

pub use diagram::{BandDiagram, BandDiagramIter, BandDiagramSample};
pub use profile::{CarrierProfile, CarrierProfileIter, CarrierSample};
pub use sweep::{IvCurve, IvCurveIter, IvPoint};

use crate::{
    constants::{cast, ELECTRON_CHARGE},
    electrostatics::JunctionResult,
};
use nalgebra::RealField;
use num_traits::ToPrimitive;
use serde::Deserialize;

/// Forward bias in V above which the Shockley exponential is frozen
pub const FORWARD_BIAS_LIMIT: f64 = 0.9;
/// Forward bias in V above which minority carrier injection is frozen
pub const INJECTION_BIAS_LIMIT: f64 = 0.8;

/// Breakdown voltage in V of a junction whose lighter side is doped at
/// `BREAKDOWN_REFERENCE_DENSITY`
pub const BREAKDOWN_PREFACTOR: f64 = 60.0;
/// Lighter side doping in cm^-3 at which the breakdown voltage equals the prefactor
pub const BREAKDOWN_REFERENCE_DENSITY: f64 = 1e16;
/// Power law exponent of the breakdown voltage in the lighter doping
pub const BREAKDOWN_EXPONENT: f64 = -0.75;
/// Floor of the breakdown voltage in V
pub const MINIMUM_BREAKDOWN_VOLTAGE: f64 = 2.0;
/// Ceiling of the breakdown voltage in V
pub const MAXIMUM_BREAKDOWN_VOLTAGE: f64 = 100.0;

/// Multiplier on the saturation current in the avalanche law
pub const BREAKDOWN_CURRENT_SCALE: f64 = 1e9;
/// Largest magnitude of the avalanche current
pub const BREAKDOWN_CURRENT_LIMIT: f64 = 1e5;

/// Densities below this, in cm^-3, are raised to it before entering the current model
pub const MINIMUM_DOPING_DENSITY: f64 = 1.0;

/// Transport parameters of the current model
///
/// Mobilities in cm^2 / V s, lifetime in s, thermal voltage in V and intrinsic density in
/// cm^-3. The defaults are room temperature silicon. Every parameter must be positive, the model
/// divides by the thermal voltage and takes the root of the lifetime without checking.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, bound(deserialize = "T: Copy + RealField + Deserialize<'de>"))]
pub struct CurrentParameters<T> {
    /// Electron mobility `mu_n`
    pub electron_mobility: T,
    /// Hole mobility `mu_p`
    pub hole_mobility: T,
    /// Minority carrier lifetime
    pub lifetime: T,
    /// Thermal voltage `Vt` used in every exponential
    pub thermal_voltage: T,
    /// Intrinsic density `ni` of the current model
    pub intrinsic_concentration: T,
}

impl<T: Copy + RealField> Default for CurrentParameters<T> {
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    fn default() -> Self {
        Self {
            electron_mobility: 1350.0,
            hole_mobility: 480.0,
            lifetime: 1e-7,
            thermal_voltage: 0.0259,
            intrinsic_concentration: 1e10,
        }
    }
}

/// Current through the junction at a single bias point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurrentResult<T> {
    /// Acceptor density after saturation
    pub acceptor_density: T,
    /// Donor density after saturation
    pub donor_density: T,
    /// Applied bias in V, positive for forward bias
    pub applied_bias: T,
    /// Total current density in A / cm^2
    pub current: T,
    /// The ideal diode contribution
    pub diode_current: T,
    /// The avalanche contribution, zero outside breakdown
    pub breakdown_current: T,
    /// Saturation current density `Js`
    pub saturation_current: T,
    /// Breakdown voltage `Vbr` in V, a positive magnitude
    pub breakdown_voltage: T,
    /// Equilibrium minority electron density on the p-side, `np0`
    pub p_side_minority_density: T,
    /// Equilibrium minority hole density on the n-side, `pn0`
    pub n_side_minority_density: T,
    /// Excess electron density at the p-side depletion edge
    pub excess_electron_density: T,
    /// Excess hole density at the n-side depletion edge
    pub excess_hole_density: T,
    /// Electron diffusion length `Ln` in cm
    pub electron_diffusion_length: T,
    /// Hole diffusion length `Lp` in cm
    pub hole_diffusion_length: T,
}

impl<T: Copy + RealField> CurrentResult<T> {
    /// Whether the junction is reverse biased past its breakdown voltage
    pub fn is_avalanche(&self) -> bool {
        self.applied_bias < T::zero() && -self.applied_bias > self.breakdown_voltage
    }
}

/// Breakdown voltage from the lighter doping, `60 (N / 1e16)^-0.75` clamped to `[2, 100]` V
pub fn breakdown_voltage<T: Copy + RealField>(acceptor_density: T, donor_density: T) -> T {
    let lighter = saturate_doping(acceptor_density).min(saturate_doping(donor_density));
    (cast::<T>(BREAKDOWN_PREFACTOR)
        * (lighter / cast::<T>(BREAKDOWN_REFERENCE_DENSITY)).powf(cast(BREAKDOWN_EXPONENT)))
    .clamp(
        cast(MINIMUM_BREAKDOWN_VOLTAGE),
        cast(MAXIMUM_BREAKDOWN_VOLTAGE),
    )
}

fn saturate_doping<T: Copy + RealField>(density: T) -> T {
    // `max` discards a NaN operand
    density.max(cast(MINIMUM_DOPING_DENSITY))
}

/// Diode current model parameterised by `CurrentParameters`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurrentModel<T> {
    parameters: CurrentParameters<T>,
}

impl<T: Copy + RealField> Default for CurrentModel<T> {
    fn default() -> Self {
        Self::new(CurrentParameters::default())
    }
}

impl<T: Copy + RealField> CurrentModel<T> {
    /// A model with the given transport parameters
    pub fn new(parameters: CurrentParameters<T>) -> Self {
        Self { parameters }
    }

    /// The transport parameters of this model
    pub fn parameters(&self) -> &CurrentParameters<T> {
        &self.parameters
    }

    /// Electron diffusion coefficient `Dn = mu_n Vt` in cm^2 / s
    pub fn electron_diffusivity(&self) -> T {
        self.parameters.electron_mobility * self.parameters.thermal_voltage
    }

    /// Hole diffusion coefficient `Dp = mu_p Vt` in cm^2 / s
    pub fn hole_diffusivity(&self) -> T {
        self.parameters.hole_mobility * self.parameters.thermal_voltage
    }

    /// Electron diffusion length `Ln = sqrt(Dn tau)` in cm
    pub fn electron_diffusion_length(&self) -> T {
        (self.electron_diffusivity() * self.parameters.lifetime).sqrt()
    }

    /// Hole diffusion length `Lp = sqrt(Dp tau)` in cm
    pub fn hole_diffusion_length(&self) -> T {
        (self.hole_diffusivity() * self.parameters.lifetime).sqrt()
    }

    /// Computes the diode and avalanche currents at `applied_bias`
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn calculate(&self, acceptor_density: T, donor_density: T, applied_bias: T) -> CurrentResult<T> {
        let acceptors = saturate_doping(acceptor_density);
        let donors = saturate_doping(donor_density);
        let intrinsic_squared =
            self.parameters.intrinsic_concentration * self.parameters.intrinsic_concentration;
        let thermal_voltage = self.parameters.thermal_voltage;

        let electron_diffusion_length = self.electron_diffusion_length();
        let hole_diffusion_length = self.hole_diffusion_length();
        let p_side_minority_density = intrinsic_squared / acceptors;
        let n_side_minority_density = intrinsic_squared / donors;

        let exponential_factor =
            (applied_bias.min(cast(FORWARD_BIAS_LIMIT)) / thermal_voltage).exp() - 1.0;
        let saturation_current = cast::<T>(ELECTRON_CHARGE)
            * intrinsic_squared
            * (self.electron_diffusivity() / (electron_diffusion_length * acceptors)
                + self.hole_diffusivity() / (hole_diffusion_length * donors));
        let diode_current = saturation_current * exponential_factor;

        let breakdown_voltage = breakdown_voltage(acceptors, donors);
        let breakdown_current = if applied_bias < 0.0 && -applied_bias > breakdown_voltage {
            let overdrive = -applied_bias - breakdown_voltage;
            let avalanche = -saturation_current
                * cast::<T>(BREAKDOWN_CURRENT_SCALE)
                * ((2.0 * overdrive).exp() - 1.0 + overdrive);
            let limit = cast::<T>(BREAKDOWN_CURRENT_LIMIT);
            if avalanche < -limit {
                tracing::debug!("Avalanche current saturated");
            }
            avalanche.max(-limit)
        } else {
            0.0
        };

        CurrentResult {
            acceptor_density: acceptors,
            donor_density: donors,
            applied_bias,
            current: diode_current + breakdown_current,
            diode_current,
            breakdown_current,
            saturation_current,
            breakdown_voltage,
            p_side_minority_density,
            n_side_minority_density,
            excess_electron_density: p_side_minority_density * exponential_factor,
            excess_hole_density: n_side_minority_density * exponential_factor,
            electron_diffusion_length,
            hole_diffusion_length,
        }
    }

    /// Minority and majority carrier densities across the junction at `applied_bias`
    ///
    /// `electrostatics` must describe the same junction at the same bias; it only exists when
    /// the junction has a depletion region.
    pub fn carrier_profile(
        &self,
        acceptor_density: T,
        donor_density: T,
        applied_bias: T,
        electrostatics: &JunctionResult<T>,
        num_points: usize,
    ) -> CarrierProfile<T> {
        CarrierProfile::new(
            self,
            saturate_doping(acceptor_density),
            saturate_doping(donor_density),
            applied_bias,
            electrostatics,
            num_points,
        )
    }

    /// Current against bias from `min(-1.2 Vbr, -5)` V to `0.8` V in `intervals` equal steps
    /// over the reverse range
    pub fn iv_curve(&self, acceptor_density: T, donor_density: T, intervals: usize) -> IvCurve<T>
    where
        T: ToPrimitive,
    {
        IvCurve::new(
            *self,
            saturate_doping(acceptor_density),
            saturate_doping(donor_density),
            intervals,
        )
    }

    /// Conduction and valence band edges and quasi-Fermi levels across the junction
    pub fn band_diagram(
        &self,
        acceptor_density: T,
        applied_bias: T,
        electrostatics: &JunctionResult<T>,
        num_points: usize,
    ) -> BandDiagram<T> {
        BandDiagram::new(
            self,
            saturate_doping(acceptor_density),
            applied_bias,
            electrostatics,
            num_points,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn zero_bias_carries_no_current() {
        let result = CurrentModel::<f64>::default().calculate(1e16, 1e16, 0.);
        assert_eq!(result.current, 0.);
        assert_eq!(result.excess_electron_density, 0.);
        assert!(!result.is_avalanche());
    }

    #[test]
    fn reverse_current_saturates_below_breakdown() {
        let result = CurrentModel::<f64>::default().calculate(1e16, 1e16, -10.);
        assert_relative_eq!(result.current, -result.saturation_current, max_relative = 1e-9);
        assert_eq!(result.breakdown_current, 0.);
    }

    #[test]
    fn forward_bias_is_clamped_before_exponentiation() {
        let model = CurrentModel::<f64>::default();
        let at_limit = model.calculate(1e16, 1e16, FORWARD_BIAS_LIMIT);
        let beyond = model.calculate(1e16, 1e16, 50.);
        assert_eq!(at_limit.current, beyond.current);
        assert!(beyond.current.is_finite());
    }

    #[test]
    fn diffusion_lengths_follow_from_mobility_and_lifetime() {
        let model = CurrentModel::<f64>::default();
        assert_relative_eq!(model.electron_diffusivity(), 1350. * 0.0259);
        assert_relative_eq!(
            model.electron_diffusion_length(),
            (1350. * 0.0259 * 1e-7f64).sqrt()
        );
        let result = model.calculate(1e15, 1e17, 0.2);
        assert_eq!(result.hole_diffusion_length, model.hole_diffusion_length());
        assert_relative_eq!(result.p_side_minority_density, 1e20 / 1e15);
        assert_relative_eq!(result.n_side_minority_density, 1e20 / 1e17);
    }

    #[test]
    fn breakdown_voltage_reference_points() {
        assert_relative_eq!(breakdown_voltage(1e16f64, 1e16), 60.);
        assert_relative_eq!(breakdown_voltage(1e18f64, 1e16), 60.);
        assert_relative_eq!(breakdown_voltage(1e12f64, 1e12), 100.);
        assert_relative_eq!(breakdown_voltage(1e20f64, 1e20), 2.);
    }

    #[test]
    fn default_heavy_doping_breaks_down_at_a_few_volts() {
        let density = 10f64.powf(17.5);
        let voltage = breakdown_voltage(density, density);
        assert_relative_eq!(voltage, 60. * 10f64.powf(-1.125), max_relative = 1e-12);
        assert!(voltage > 2. && voltage < 5.);
    }

    #[test]
    fn avalanche_current_is_bounded() {
        let result = CurrentModel::<f64>::default().calculate(1e16, 1e16, -1000.);
        assert!(result.is_avalanche());
        assert_eq!(result.breakdown_current, -BREAKDOWN_CURRENT_LIMIT);
        assert!(result.current.is_finite());
    }

    #[test]
    fn missing_doping_is_saturated_instead_of_dividing_by_zero() {
        let result = CurrentModel::<f64>::default().calculate(0., f64::NAN, 0.3);
        assert!(result.current.is_finite());
        assert_eq!(result.acceptor_density, MINIMUM_DOPING_DENSITY);
        assert_eq!(result.donor_density, MINIMUM_DOPING_DENSITY);
    }

    proptest! {
        #[test]
        fn breakdown_voltage_decreases_with_doping(log_density in 10f64..21., step in 0.01f64..1.) {
            let lighter = breakdown_voltage(10f64.powf(log_density), 1e21);
            let heavier = breakdown_voltage(10f64.powf(log_density + step), 1e21);
            prop_assert!(heavier <= lighter);
            prop_assert!((MINIMUM_BREAKDOWN_VOLTAGE..=MAXIMUM_BREAKDOWN_VOLTAGE).contains(&heavier));
        }

        #[test]
        fn reverse_current_grows_past_breakdown(
            log_density in 15f64..18.,
            overdrive in 0.01f64..5.,
            delta in 0.01f64..0.5,
        ) {
            let model = CurrentModel::<f64>::default();
            let density = 10f64.powf(log_density);
            let breakdown = breakdown_voltage(density, density);
            let near = model.calculate(density, density, -(breakdown + overdrive));
            let far = model.calculate(density, density, -(breakdown + overdrive + delta));
            prop_assert!(near.is_avalanche());
            prop_assert!(far.current.abs() > near.current.abs());
        }

        #[test]
        fn current_is_always_finite(
            log_acceptors in 10f64..21.,
            log_donors in 10f64..21.,
            bias in -500f64..5.,
        ) {
            let result = CurrentModel::<f64>::default()
                .calculate(10f64.powf(log_acceptors), 10f64.powf(log_donors), bias);
            prop_assert!(result.current.is_finite());
            prop_assert!(result.breakdown_current >= -BREAKDOWN_CURRENT_LIMIT);
        }
    }
}
