// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Temperature dependent band structure
//!
//! This module defines the `Material` enum, which represents the materials implemented in
//! the engine, and the `BandModel` which turns their fixed `MaterialConstants` into the band gap,
//! effective densities of states and intrinsic carrier density at a given temperature.
//!
//! All operations clamp the temperature to a floor of 1K, so absolute zero never reaches the
//! `1 / T` and `T^1.5` terms.

mod materials;

pub use materials::{Material, MaterialConstants};

use crate::constants::{cast, BOLTZMANN_EV};
use nalgebra::RealField;

/// Clamps a temperature to the 1K floor shared by every solver
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
pub(crate) fn clamp_temperature<T: Copy + RealField>(temperature: T) -> T {
    temperature.max(1.0)
}

/// The band quantities of a material evaluated at one temperature
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandState<T> {
    /// The clamped temperature the state was evaluated at
    pub temperature: T,
    /// Band gap in eV
    pub band_gap: T,
    /// Effective conduction band density of states in cm^-3
    pub conduction_density: T,
    /// Effective valence band density of states in cm^-3
    pub valence_density: T,
    /// Intrinsic carrier density in cm^-3
    pub intrinsic_concentration: T,
}

/// Evaluates the band structure of a single material as a function of temperature
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandModel<T> {
    material: MaterialConstants<T>,
}

impl<T: Copy + RealField> Default for BandModel<T> {
    fn default() -> Self {
        Self::silicon()
    }
}

impl<T: Copy + RealField> BandModel<T> {
    /// A band model evaluating the given material parameters
    pub fn new(material: MaterialConstants<T>) -> Self {
        Self { material }
    }

    /// Silicon at its fixed constants
    pub fn silicon() -> Self {
        Self::new(Material::Si.constants())
    }

    /// The material parameters behind this model
    pub fn material(&self) -> &MaterialConstants<T> {
        &self.material
    }

    /// The band gap from the Varshni law `Eg0 - alpha T^2 / (T + beta)`
    pub fn band_gap(&self, temperature: T) -> T {
        let temperature = clamp_temperature(temperature);
        self.material.band_gap_zero
            - self.material.varshni_alpha * temperature * temperature
                / (temperature + self.material.varshni_beta)
    }

    /// The effective conduction band density of states, scaling as `T^1.5` from its 300K value
    pub fn conduction_density(&self, temperature: T) -> T {
        self.material.conduction_density_300 * density_scaling(temperature)
    }

    /// The effective valence band density of states, scaling as `T^1.5` from its 300K value
    pub fn valence_density(&self, temperature: T) -> T {
        self.material.valence_density_300 * density_scaling(temperature)
    }

    /// The intrinsic carrier density `sqrt(Nc Nv) exp(-Eg / 2kT)` in cm^-3
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn intrinsic_concentration(&self, temperature: T) -> T {
        let temperature = clamp_temperature(temperature);
        let thermal_energy = cast::<T>(BOLTZMANN_EV) * temperature;
        // Root of each factor separately, `Nc Nv` alone exceeds the range of `f32`
        self.conduction_density(temperature).sqrt()
            * self.valence_density(temperature).sqrt()
            * (-self.band_gap(temperature) / (2.0 * thermal_energy)).exp()
    }

    /// Evaluates every band quantity at `temperature`
    pub fn state(&self, temperature: T) -> BandState<T> {
        let temperature = clamp_temperature(temperature);
        BandState {
            temperature,
            band_gap: self.band_gap(temperature),
            conduction_density: self.conduction_density(temperature),
            valence_density: self.valence_density(temperature),
            intrinsic_concentration: self.intrinsic_concentration(temperature),
        }
    }
}

#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
fn density_scaling<T: Copy + RealField>(temperature: T) -> T {
    (clamp_temperature(temperature) / 300.0).powf(1.5)
}

#[cfg(test)]
mod test {
    use super::BandModel;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn densities_of_states_match_reference_values_at_300k() {
        let model = BandModel::<f64>::silicon();
        assert_eq!(model.conduction_density(300.), 2.8e19);
        assert_eq!(model.valence_density(300.), 1.04e19);
    }

    #[test]
    fn silicon_band_gap_at_room_temperature() {
        let model = BandModel::<f64>::silicon();
        assert_relative_eq!(model.band_gap(300.), 1.12, epsilon = 1e-3);
    }

    #[test]
    fn silicon_intrinsic_concentration_at_room_temperature() {
        let ni = BandModel::<f64>::silicon().intrinsic_concentration(300.);
        assert!(ni > 6e9 && ni < 7.2e9, "ni = {ni}");
    }

    #[test]
    fn temperatures_below_one_kelvin_are_clamped() {
        let model = BandModel::<f64>::silicon();
        for temperature in [0., -50., f64::NAN] {
            let state = model.state(temperature);
            assert_eq!(state, model.state(1.));
            assert!(state.intrinsic_concentration.is_finite());
        }
    }

    #[test]
    fn state_collects_the_individual_quantities() {
        let model = BandModel::<f64>::silicon();
        let state = model.state(450.);
        assert_eq!(state.band_gap, model.band_gap(450.));
        assert_eq!(state.conduction_density, model.conduction_density(450.));
        assert_eq!(state.valence_density, model.valence_density(450.));
        assert_eq!(
            state.intrinsic_concentration,
            model.intrinsic_concentration(450.)
        );
    }

    #[test]
    fn single_precision_intrinsic_concentration_stays_finite() {
        let single = BandModel::<f32>::silicon();
        let double = BandModel::<f64>::silicon();
        for temperature in [300f32, 320., 400., 600., 1000.] {
            let ni = single.intrinsic_concentration(temperature);
            assert!(ni.is_finite(), "ni({temperature}) = {ni}");
            assert_relative_eq!(
                ni as f64,
                double.intrinsic_concentration(temperature as f64),
                max_relative = 1e-4
            );
        }
    }

    proptest! {
        #[test]
        fn band_gap_is_positive_and_below_zero_temperature_value(temperature in 1f64..2000.) {
            let model = BandModel::<f64>::silicon();
            let band_gap = model.band_gap(temperature);
            prop_assert!(band_gap > 0.);
            prop_assert!(band_gap < model.material().band_gap_zero);
        }

        #[test]
        fn band_gap_strictly_decreases_with_temperature(temperature in 1f64..1999., delta in 0.5f64..1.) {
            let model = BandModel::<f64>::silicon();
            prop_assert!(model.band_gap(temperature + delta) < model.band_gap(temperature));
        }

        #[test]
        fn intrinsic_concentration_grows_with_temperature(temperature in 50f64..1000.) {
            let model = BandModel::<f64>::silicon();
            prop_assert!(
                model.intrinsic_concentration(temperature + 10.)
                    > model.intrinsic_concentration(temperature)
            );
        }
    }
}
