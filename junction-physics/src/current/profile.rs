use super::{CurrentModel, INJECTION_BIAS_LIMIT};
use crate::{constants::cast, electrostatics::JunctionResult};
use junction_mesher::{create_symmetric_grid_1d, GridIter, UniformGrid1d};
use nalgebra::RealField;

/// Smallest half-width of the sampled window in cm
pub const MINIMUM_PROFILE_HALF_WIDTH: f64 = 2e-4;
/// Densities are floored here before taking their logarithm inside the depletion region
pub const LOG_DENSITY_FLOOR: f64 = 1e-3;
/// Every reported density is at least this, in cm^-3
pub const DENSITY_FLOOR: f64 = 1.0;

/// Electron and hole densities in cm^-3 at a position in cm
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarrierSample<T> {
    /// Position in cm, negative on the p-side
    pub position: T,
    /// Electron density in cm^-3
    pub electrons: T,
    /// Hole density in cm^-3
    pub holes: T,
}

/// Carrier densities across a biased junction
///
/// In the neutral regions the majority density equals the doping and the minority density
/// relaxes exponentially, over a diffusion length, from its value at the depletion edge to its
/// equilibrium value. The edge value is the equilibrium density scaled by the injection factor
/// `exp(min(Va, 0.8) / Vt)`. Across the depletion region both densities are interpolated
/// linearly in `log10` between the edge values. This bridges the depletion region continuously
/// and does not solve the diffusion equation inside it.
///
/// Samples are generated on demand and the profile can be iterated repeatedly.
#[derive(Clone, Debug)]
pub struct CarrierProfile<T> {
    acceptor_density: T,
    donor_density: T,
    p_side_minority_density: T,
    n_side_minority_density: T,
    electron_diffusion_length: T,
    hole_diffusion_length: T,
    injection_factor: T,
    n_side_width: T,
    p_side_width: T,
    grid: UniformGrid1d<T>,
}

impl<T: Copy + RealField> CarrierProfile<T> {
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub(crate) fn new(
        model: &CurrentModel<T>,
        acceptor_density: T,
        donor_density: T,
        applied_bias: T,
        electrostatics: &JunctionResult<T>,
        num_points: usize,
    ) -> Self {
        let parameters = model.parameters();
        let intrinsic_squared =
            parameters.intrinsic_concentration * parameters.intrinsic_concentration;
        let injection_factor = (applied_bias.min(cast(INJECTION_BIAS_LIMIT))
            / parameters.thermal_voltage)
            .exp();
        let half_width =
            (3.0 * electrostatics.depletion_width).max(cast(MINIMUM_PROFILE_HALF_WIDTH));

        Self {
            acceptor_density,
            donor_density,
            p_side_minority_density: intrinsic_squared / acceptor_density,
            n_side_minority_density: intrinsic_squared / donor_density,
            electron_diffusion_length: model.electron_diffusion_length(),
            hole_diffusion_length: model.hole_diffusion_length(),
            injection_factor,
            n_side_width: electrostatics.n_side_width,
            p_side_width: electrostatics.p_side_width,
            grid: create_symmetric_grid_1d(half_width, num_points),
        }
    }

    /// Factor scaling the minority densities at the depletion edges
    pub fn injection_factor(&self) -> T {
        self.injection_factor
    }

    /// Half-width of the sampled window in cm
    pub fn half_width(&self) -> T {
        -self.grid.left()
    }

    /// Number of positions sampled
    pub fn len(&self) -> usize {
        self.grid.num_points()
    }

    /// Whether no points are sampled
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Minority electron density at the p-side depletion edge
    pub fn p_edge_electron_density(&self) -> T {
        self.p_side_minority_density * self.injection_factor
    }

    /// Minority hole density at the n-side depletion edge
    pub fn n_edge_hole_density(&self) -> T {
        self.n_side_minority_density * self.injection_factor
    }

    /// Electron and hole densities at `position`
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn at(&self, position: T) -> CarrierSample<T> {
        let (electrons, holes) = if position < -self.p_side_width {
            let decay = ((position + self.p_side_width) / self.electron_diffusion_length).exp();
            let electrons = self.p_side_minority_density
                + (self.p_edge_electron_density() - self.p_side_minority_density) * decay;
            (electrons, self.acceptor_density)
        } else if position > self.n_side_width {
            let decay = (-(position - self.n_side_width) / self.hole_diffusion_length).exp();
            let holes = self.n_side_minority_density
                + (self.n_edge_hole_density() - self.n_side_minority_density) * decay;
            (self.donor_density, holes)
        } else {
            let width = self.p_side_width + self.n_side_width;
            let fraction = if width > 0.0 {
                (position + self.p_side_width) / width
            } else {
                0.0
            };
            (
                log_interpolate(self.p_edge_electron_density(), self.donor_density, fraction),
                log_interpolate(self.acceptor_density, self.n_edge_hole_density(), fraction),
            )
        };

        let floor = cast::<T>(DENSITY_FLOOR);
        CarrierSample {
            position,
            electrons: electrons.max(floor),
            holes: holes.max(floor),
        }
    }

    /// Walks the window from the p-side to the n-side
    pub fn iter(&self) -> CarrierProfileIter<'_, T> {
        CarrierProfileIter {
            profile: self,
            positions: self.grid.iter(),
        }
    }
}

/// Interpolates between `left` and `right` linearly in `log10`
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
fn log_interpolate<T: Copy + RealField>(left: T, right: T, fraction: T) -> T {
    let floor = cast::<T>(LOG_DENSITY_FLOOR);
    let log_left = left.max(floor).log10();
    let log_right = right.max(floor).log10();
    let base: T = 10.0;
    base.powf(log_left + (log_right - log_left) * fraction)
}

impl<'a, T: Copy + RealField> IntoIterator for &'a CarrierProfile<T> {
    type Item = CarrierSample<T>;
    type IntoIter = CarrierProfileIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a `CarrierProfile`
pub struct CarrierProfileIter<'a, T> {
    profile: &'a CarrierProfile<T>,
    positions: GridIter<T>,
}

impl<'a, T: Copy + RealField> Iterator for CarrierProfileIter<'a, T> {
    type Item = CarrierSample<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.positions.next().map(|position| self.profile.at(position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<'a, T: Copy + RealField> ExactSizeIterator for CarrierProfileIter<'a, T> {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{current::CurrentModel, electrostatics::calculate_pn_junction};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn profile(acceptors: f64, donors: f64, bias: f64) -> CarrierProfile<f64> {
        let junction = calculate_pn_junction(acceptors, donors, bias, 300.).unwrap();
        CurrentModel::default().carrier_profile(acceptors, donors, bias, &junction, 401)
    }

    #[test]
    fn window_is_three_depletion_widths_with_a_minimum() {
        let junction = calculate_pn_junction(1e14f64, 1e14, -5., 300.).unwrap();
        let wide = CurrentModel::default().carrier_profile(1e14, 1e14, -5., &junction, 11);
        assert_relative_eq!(wide.half_width(), 3. * junction.depletion_width);

        let junction = calculate_pn_junction(1e19f64, 1e19, 0., 300.).unwrap();
        let narrow = CurrentModel::default().carrier_profile(1e19, 1e19, 0., &junction, 11);
        assert_relative_eq!(narrow.half_width(), MINIMUM_PROFILE_HALF_WIDTH);
    }

    #[test]
    fn majority_carriers_match_the_doping_in_the_neutral_regions() {
        let profile = profile(1e17, 1e15, 0.3);
        let samples: Vec<_> = profile.iter().collect();
        let first = samples.first().unwrap();
        let last = samples.last().unwrap();
        assert_eq!(first.holes, 1e17);
        assert_eq!(last.electrons, 1e15);
    }

    #[test]
    fn equilibrium_minority_density_is_flat_in_the_neutral_regions() {
        let profile = profile(1e16, 1e16, 0.);
        assert_relative_eq!(profile.injection_factor(), 1.);
        let far_p = profile.at(-0.9 * profile.half_width());
        assert_relative_eq!(far_p.electrons, 1e4, max_relative = 1e-12);
        let far_n = profile.at(0.9 * profile.half_width());
        assert_relative_eq!(far_n.holes, 1e4, max_relative = 1e-12);
    }

    #[test]
    fn forward_bias_injects_minority_carriers() {
        let profile = profile(1e16, 1e16, 0.5);
        let junction = calculate_pn_junction(1e16f64, 1e16, 0.5, 300.).unwrap();
        let edge = profile.at(-junction.p_side_width);
        assert!(edge.electrons > 1e4 * 1e8);
        let deeper = profile.at(-junction.p_side_width - 1e-4);
        assert!(deeper.electrons < edge.electrons);
        assert!(deeper.electrons > 1e4);
    }

    #[test]
    fn reverse_bias_extracts_minority_carriers() {
        let profile = profile(1e16, 1e16, -2.);
        let junction = calculate_pn_junction(1e16f64, 1e16, -2., 300.).unwrap();
        let edge = profile.at(-junction.p_side_width - 1e-9);
        assert!(edge.electrons < 1e4);
        assert!(edge.electrons >= DENSITY_FLOOR);
    }

    #[test]
    fn depletion_region_is_log_linear_between_the_edges() {
        let junction = calculate_pn_junction(1e16f64, 1e16, 0.2, 300.).unwrap();
        let profile = CurrentModel::default().carrier_profile(1e16, 1e16, 0.2, &junction, 11);
        let midpoint = (junction.n_side_width - junction.p_side_width) / 2.;
        let sample = profile.at(midpoint);
        let expected = (profile.p_edge_electron_density() * 1e16).sqrt();
        assert_relative_eq!(sample.electrons, expected, max_relative = 1e-9);
        // symmetric junction gives symmetric densities
        assert_relative_eq!(sample.electrons, sample.holes, max_relative = 1e-9);
    }

    #[test]
    fn interpolation_floors_vanishing_densities() {
        assert_relative_eq!(log_interpolate(0f64, 1e3, 0.), LOG_DENSITY_FLOOR, max_relative = 1e-12);
        assert_relative_eq!(log_interpolate(0f64, 1e3, 0.5), 1., max_relative = 1e-12);
    }

    #[test]
    fn profile_is_restartable() {
        let profile = profile(1e17, 1e16, -1.);
        let first: Vec<_> = profile.iter().collect();
        let second: Vec<_> = (&profile).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 401);
    }

    proptest! {
        #[test]
        fn every_sample_is_finite_and_floored(
            log_acceptors in 14f64..19.,
            log_donors in 14f64..19.,
            bias in -50f64..0.5,
        ) {
            let acceptors = 10f64.powf(log_acceptors);
            let donors = 10f64.powf(log_donors);
            if let Some(junction) = calculate_pn_junction(acceptors, donors, bias, 300.) {
                let profile = CurrentModel::default().carrier_profile(acceptors, donors, bias, &junction, 101);
                for sample in profile.iter() {
                    prop_assert!(sample.electrons.is_finite() && sample.electrons >= DENSITY_FLOOR);
                    prop_assert!(sample.holes.is_finite() && sample.holes >= DENSITY_FLOOR);
                }
            }
        }
    }
}
