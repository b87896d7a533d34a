use crate::{
    band::clamp_temperature,
    constants::{cast, BOLTZMANN_EV},
};
use junction_mesher::{GridIter, UniformGrid1d};
use nalgebra::RealField;

/// Factor applied to the temperature inside the occupation function
///
/// Doubling the temperature widens the Fermi-Dirac step so the smearing is visible on a band
/// diagram spanning the whole gap. The Fermi level itself is always computed at the true
/// temperature.
pub const VISUAL_TEMPERATURE_SCALE: f64 = 2.0;

/// Magnitude of the reduced energy beyond which the occupation saturates to 0 or 1
pub const OCCUPATION_EXPONENT_LIMIT: f64 = 100.0;

/// Fermi-Dirac occupation probability of a state at `energy` for a Fermi level `fermi_level`
///
/// The distribution is evaluated at `VISUAL_TEMPERATURE_SCALE` times the clamped temperature.
/// Reduced energies past `OCCUPATION_EXPONENT_LIMIT` return exactly 0 or 1.
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
pub fn fermi_dirac<T: Copy + RealField>(energy: T, fermi_level: T, temperature: T) -> T {
    let visual_temperature = clamp_temperature(temperature) * cast::<T>(VISUAL_TEMPERATURE_SCALE);
    let reduced_energy = (energy - fermi_level) / (cast::<T>(BOLTZMANN_EV) * visual_temperature);
    let limit = cast::<T>(OCCUPATION_EXPONENT_LIMIT);
    if reduced_energy > limit {
        0.0
    } else if reduced_energy < -limit {
        1.0
    } else {
        1.0 / (1.0 + reduced_energy.exp())
    }
}

/// The carrier whose occupation is reported
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Carrier {
    /// Occupation `f` of electron states
    Electron,
    /// Occupation `1 - f` of hole states
    Hole,
}

/// A single point of an occupation distribution
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OccupationSample<T> {
    /// Energy in eV, referenced to the valence band edge
    pub energy: T,
    /// Occupation probability of the carrier in `[0, 1]`
    pub occupation: T,
}

/// The occupation of electron or hole states on an energy grid
///
/// Samples are computed lazily and the distribution can be iterated any number of times.
#[derive(Clone, Debug)]
pub struct OccupationDistribution<T> {
    pub(crate) grid: UniformGrid1d<T>,
    pub(crate) fermi_level: T,
    pub(crate) temperature: T,
    pub(crate) carrier: Carrier,
}

impl<T: Copy + RealField> OccupationDistribution<T> {
    /// The Fermi level the occupation is centred on, in eV
    pub fn fermi_level(&self) -> T {
        self.fermi_level
    }

    /// Whether electron or hole occupation is reported
    pub fn carrier(&self) -> Carrier {
        self.carrier
    }

    /// Number of energies sampled
    pub fn len(&self) -> usize {
        self.grid.num_points()
    }

    /// Whether no points are sampled
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Walks the energy window from low to high energy
    pub fn iter(&self) -> OccupationIter<T> {
        OccupationIter {
            energies: self.grid.iter(),
            fermi_level: self.fermi_level,
            temperature: self.temperature,
            carrier: self.carrier,
        }
    }
}

impl<'a, T: Copy + RealField> IntoIterator for &'a OccupationDistribution<T> {
    type Item = OccupationSample<T>;
    type IntoIter = OccupationIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over an `OccupationDistribution`
pub struct OccupationIter<T> {
    energies: GridIter<T>,
    fermi_level: T,
    temperature: T,
    carrier: Carrier,
}

impl<T: Copy + RealField> Iterator for OccupationIter<T> {
    type Item = OccupationSample<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let energy = self.energies.next()?;
        let electron_occupation = fermi_dirac(energy, self.fermi_level, self.temperature);
        let occupation = match self.carrier {
            Carrier::Electron => electron_occupation,
            Carrier::Hole => T::one() - electron_occupation,
        };
        Some(OccupationSample { energy, occupation })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.energies.size_hint()
    }
}

impl<T: Copy + RealField> ExactSizeIterator for OccupationIter<T> {}

#[cfg(test)]
mod test {
    use super::fermi_dirac;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn occupation_saturates_far_from_the_fermi_level() {
        assert_eq!(fermi_dirac(10f64, 0., 300.), 0.);
        assert_eq!(fermi_dirac(-10f64, 0., 300.), 1.);
    }

    #[test]
    fn distribution_is_evaluated_at_twice_the_temperature() {
        let thermal_energy = super::BOLTZMANN_EV * 300. * 2.;
        let occupation = fermi_dirac(0.7 + thermal_energy, 0.7f64, 300.);
        assert_relative_eq!(occupation, 1. / (1. + std::f64::consts::E), epsilon = 1e-12);
    }

    #[test]
    fn zero_temperature_is_clamped_not_singular() {
        let occupation = fermi_dirac(0.5001f64, 0.5, 0.);
        assert!(occupation.is_finite());
        assert!((0. ..=1.).contains(&occupation));
    }

    proptest! {
        #[test]
        fn occupation_is_one_half_at_the_fermi_level(fermi_level in -2f64..2., temperature in 0f64..2000.) {
            prop_assert_eq!(fermi_dirac(fermi_level, fermi_level, temperature), 0.5);
        }

        #[test]
        fn occupation_is_symmetric_about_the_fermi_level(
            fermi_level in 0f64..1.2,
            offset in -0.5f64..0.5,
            temperature in 50f64..800.,
        ) {
            let above = fermi_dirac(fermi_level + offset, fermi_level, temperature);
            let below = fermi_dirac(fermi_level - offset, fermi_level, temperature);
            prop_assert!((above + below - 1.).abs() < 1e-12);
        }

        #[test]
        fn occupation_is_a_probability(energy in -5f64..5., fermi_level in -2f64..2., temperature in -10f64..2000.) {
            let occupation = fermi_dirac(energy, fermi_level, temperature);
            prop_assert!((0. ..=1.).contains(&occupation));
        }
    }
}
