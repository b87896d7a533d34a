use super::CurrentModel;
use crate::{constants::cast, electrostatics::JunctionResult};
use junction_mesher::{create_symmetric_grid_1d, GridIter, UniformGrid1d};
use nalgebra::RealField;

/// Band gap in eV used to draw the band diagram
pub const DISPLAY_BAND_GAP: f64 = 1.12;
/// Vertical offset in eV applied to every level of the band diagram
pub const DISPLAY_ENERGY_OFFSET: f64 = 0.5;

/// Band edges and quasi-Fermi levels in eV at a position in cm
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandDiagramSample<T> {
    /// Position in cm, negative on the p-side
    pub position: T,
    /// Conduction band edge `Ec` in eV
    pub conduction_band_edge: T,
    /// Valence band edge `Ev` in eV
    pub valence_band_edge: T,
    /// Electron quasi-Fermi level `Efn` in eV
    pub electron_quasi_fermi_level: T,
    /// Hole quasi-Fermi level `Efp` in eV
    pub hole_quasi_fermi_level: T,
}

/// Energy band diagram of a biased junction
///
/// The band edges follow the electrostatic potential, `E = -V(x)`, across a window of twice
/// the depletion width on each side. The hole quasi-Fermi level is set by the p-side doping
/// and the electron quasi-Fermi level sits `Va` above it.
#[derive(Clone, Debug)]
pub struct BandDiagram<T> {
    electrostatics: JunctionResult<T>,
    hole_quasi_fermi_level: T,
    electron_quasi_fermi_level: T,
    grid: UniformGrid1d<T>,
}

impl<T: Copy + RealField> BandDiagram<T> {
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub(crate) fn new(
        model: &CurrentModel<T>,
        acceptor_density: T,
        applied_bias: T,
        electrostatics: &JunctionResult<T>,
        num_points: usize,
    ) -> Self {
        let parameters = model.parameters();
        let hole_quasi_fermi_level = -cast::<T>(DISPLAY_BAND_GAP) / 2.0
            + cast::<T>(DISPLAY_ENERGY_OFFSET)
            + parameters.thermal_voltage
                * (acceptor_density / parameters.intrinsic_concentration).ln();
        Self {
            electrostatics: *electrostatics,
            hole_quasi_fermi_level,
            electron_quasi_fermi_level: hole_quasi_fermi_level + applied_bias,
            grid: create_symmetric_grid_1d(2.0 * electrostatics.depletion_width, num_points),
        }
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

    /// Band edges and quasi-Fermi levels at `position`
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn at(&self, position: T) -> BandDiagramSample<T> {
        let energy = -self.electrostatics.at(position).potential;
        let half_gap = cast::<T>(DISPLAY_BAND_GAP) / 2.0;
        let offset = cast::<T>(DISPLAY_ENERGY_OFFSET);
        BandDiagramSample {
            position,
            conduction_band_edge: energy + half_gap + offset,
            valence_band_edge: energy - half_gap + offset,
            electron_quasi_fermi_level: self.electron_quasi_fermi_level,
            hole_quasi_fermi_level: self.hole_quasi_fermi_level,
        }
    }

    /// Walks the window from the p-side to the n-side
    pub fn iter(&self) -> BandDiagramIter<'_, T> {
        BandDiagramIter {
            diagram: self,
            positions: self.grid.iter(),
        }
    }
}

impl<'a, T: Copy + RealField> IntoIterator for &'a BandDiagram<T> {
    type Item = BandDiagramSample<T>;
    type IntoIter = BandDiagramIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a `BandDiagram`
pub struct BandDiagramIter<'a, T> {
    diagram: &'a BandDiagram<T>,
    positions: GridIter<T>,
}

impl<'a, T: Copy + RealField> Iterator for BandDiagramIter<'a, T> {
    type Item = BandDiagramSample<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.positions.next().map(|position| self.diagram.at(position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<'a, T: Copy + RealField> ExactSizeIterator for BandDiagramIter<'a, T> {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::electrostatics::calculate_pn_junction;
    use approx::assert_relative_eq;

    #[test]
    fn bands_drop_by_the_barrier_across_the_junction() {
        let junction = calculate_pn_junction(1e16f64, 1e16, -1., 300.).unwrap();
        let diagram = CurrentModel::default().band_diagram(1e16, -1., &junction, 301);
        let samples: Vec<_> = diagram.iter().collect();
        let first = samples.first().unwrap();
        let last = samples.last().unwrap();
        assert_relative_eq!(
            first.conduction_band_edge - last.conduction_band_edge,
            junction.total_potential,
            max_relative = 1e-12
        );
        for sample in &samples {
            assert_relative_eq!(
                sample.conduction_band_edge - sample.valence_band_edge,
                DISPLAY_BAND_GAP,
                max_relative = 1e-12
            );
        }
        assert_relative_eq!(diagram.half_width(), 2. * junction.depletion_width);
    }

    #[test]
    fn quasi_fermi_levels_split_by_the_applied_bias() {
        let junction = calculate_pn_junction(1e17f64, 1e16, 0.3, 300.).unwrap();
        let diagram = CurrentModel::default().band_diagram(1e17, 0.3, &junction, 31);
        let sample = diagram.at(0.);
        assert_relative_eq!(
            sample.electron_quasi_fermi_level - sample.hole_quasi_fermi_level,
            0.3,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            sample.hole_quasi_fermi_level,
            -0.56 + 0.5 + 0.0259 * (1e7f64).ln(),
            max_relative = 1e-12
        );
    }
}
