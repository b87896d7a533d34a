// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Fermi
//!
//! Equilibrium Fermi level of a homogeneously doped region and the occupation of the states
//! around it.
//!
//! Energies are referenced to the valence band edge, so `Ev = 0` and `Ec = Eg(T)`.
//!
//! Above `FREEZE_OUT_TEMPERATURE` the dopants are taken as fully ionized and the majority
//! carrier density follows from charge balance with the intrinsic density. Below it the level
//! is pinned to an anchor halfway between the band edge and the dopant level. This anchor is an
//! approximation standing in for the incomplete-ionization equation, which is not solved.

mod doping;
mod occupation;

pub use doping::{Dopant, DopingProfile};
pub use occupation::{
    fermi_dirac, Carrier, OccupationDistribution, OccupationIter, OccupationSample,
    OCCUPATION_EXPONENT_LIMIT, VISUAL_TEMPERATURE_SCALE,
};

use crate::{
    band::{clamp_temperature, BandModel, BandState},
    constants::{cast, BOLTZMANN_EV},
};
use junction_mesher::create_stepped_grid_1d;
use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Temperature in K below which the Fermi level is pinned to the freeze-out anchor
pub const FREEZE_OUT_TEMPERATURE: f64 = 45.0;

/// Closest approach in eV of the Fermi level to a band edge
pub const BAND_EDGE_MARGIN: f64 = 0.002;

/// Energy margin in eV added below `Ev` and above `Ec` when sampling occupations
pub const OCCUPATION_WINDOW_MARGIN: f64 = 0.2;

/// How the Fermi level was determined
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    /// Pinned to the fixed low-temperature anchor
    FreezeOut,
    /// Solved from charge balance with fully ionized dopants
    ChargeBalance,
}

/// The equilibrium Fermi level together with the band state it was computed against
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FermiLevel<T> {
    /// Fermi level in eV above the valence band edge
    pub energy: T,
    /// The dopant species which set the level
    pub dopant: Dopant,
    /// How the level was determined
    pub regime: Regime,
    /// Band state at the clamped temperature
    pub band: BandState<T>,
}

impl<T: Copy + RealField> FermiLevel<T> {
    /// The conduction band edge, equal to the band gap
    pub fn conduction_band_edge(&self) -> T {
        self.band.band_gap
    }

    /// The valence band edge, which is the energy reference
    pub fn valence_band_edge(&self) -> T {
        T::zero()
    }
}

/// Solves for the equilibrium Fermi level of a material described by a `BandModel`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FermiSolver<T> {
    bands: BandModel<T>,
}

impl<T: Copy + RealField> Default for FermiSolver<T> {
    fn default() -> Self {
        Self::silicon()
    }
}

impl<T: Copy + RealField> FermiSolver<T> {
    /// A solver for the material described by `bands`
    pub fn new(bands: BandModel<T>) -> Self {
        Self { bands }
    }

    /// Silicon at its fixed constants
    pub fn silicon() -> Self {
        Self::new(BandModel::silicon())
    }

    /// The band model the solver evaluates
    pub fn bands(&self) -> &BandModel<T> {
        &self.bands
    }

    /// The Fermi level in eV above the valence band edge
    pub fn fermi_level(&self, temperature: T, doping: &DopingProfile<T>) -> T {
        self.solve(temperature, doping).energy
    }

    /// Computes the Fermi level and reports which regime produced it
    ///
    /// A profile carrying both donors and acceptors is solved as n-type: the acceptors do not
    /// compensate the donors.
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn solve(&self, temperature: T, doping: &DopingProfile<T>) -> FermiLevel<T> {
        let band = self.bands.state(clamp_temperature(temperature));
        let material = self.bands.material();
        let conduction_edge = band.band_gap;
        let valence_edge = 0.0;
        let dopant = doping.dominant();

        if doping.is_compensated() {
            tracing::debug!("Both dopant species present, solving as n-type");
        }

        if band.temperature < cast(FREEZE_OUT_TEMPERATURE) {
            let energy = match dopant {
                Dopant::Donor => conduction_edge - material.donor_ionization_energy / 2.0,
                Dopant::Acceptor => valence_edge + material.acceptor_ionization_energy / 2.0,
                Dopant::Intrinsic => band.band_gap / 2.0,
            };
            tracing::trace!(%dopant, "Fermi level pinned to the freeze-out anchor");
            return FermiLevel {
                energy,
                dopant,
                regime: Regime::FreezeOut,
                band,
            };
        }

        let thermal_energy = cast::<T>(BOLTZMANN_EV) * band.temperature;
        let margin = cast::<T>(BAND_EDGE_MARGIN);
        let energy = match dopant {
            Dopant::Donor => {
                let electrons =
                    majority_density(doping.donor_density(), band.intrinsic_concentration);
                (conduction_edge + thermal_energy * (electrons / band.conduction_density).ln())
                    .min(conduction_edge - margin)
            }
            Dopant::Acceptor => {
                let holes =
                    majority_density(doping.acceptor_density(), band.intrinsic_concentration);
                (valence_edge - thermal_energy * (holes / band.valence_density).ln())
                    .max(valence_edge + margin)
            }
            Dopant::Intrinsic => band.band_gap / 2.0,
        };
        tracing::trace!(%dopant, "Fermi level from charge balance");

        FermiLevel {
            energy,
            dopant,
            regime: Regime::ChargeBalance,
            band,
        }
    }

    /// Samples the occupation of electron or hole states from `0.2 eV` below the valence band
    /// edge to `0.2 eV` above the conduction band edge in steps of `energy_step`
    pub fn occupation_distribution(
        &self,
        temperature: T,
        doping: &DopingProfile<T>,
        carrier: Carrier,
        energy_step: T,
    ) -> OccupationDistribution<T>
    where
        T: ToPrimitive,
    {
        let fermi_level = self.solve(temperature, doping);
        let margin = cast::<T>(OCCUPATION_WINDOW_MARGIN);
        let grid = create_stepped_grid_1d(
            fermi_level.valence_band_edge() - margin,
            fermi_level.conduction_band_edge() + margin,
            energy_step,
        );
        OccupationDistribution {
            grid,
            fermi_level: fermi_level.energy,
            temperature: fermi_level.band.temperature,
            carrier,
        }
    }
}

/// Majority carrier density from charge balance with full ionization
///
/// Solves `n = N + ni^2 / n` for the positive root.
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
fn majority_density<T: Copy + RealField>(dopant_density: T, intrinsic_concentration: T) -> T {
    let half = dopant_density / 2.0;
    half + half.hypot(intrinsic_concentration)
}
