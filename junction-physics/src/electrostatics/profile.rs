use super::JunctionResult;
use junction_mesher::{create_symmetric_grid_1d, GridIter, UniformGrid1d};
use nalgebra::RealField;

/// Space charge in C / cm^3, field in V / cm and potential in V at one position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElectrostaticPoint<T> {
    /// Space charge in C / cm^3
    pub charge_density: T,
    /// Electric field in V / cm
    pub electric_field: T,
    /// Potential referenced to the neutral p-side
    pub potential: T,
}

impl<T: RealField> ElectrostaticPoint<T> {
    /// The neutral p-side: no charge, no field, zero potential
    pub fn neutral() -> Self {
        Self {
            charge_density: T::zero(),
            electric_field: T::zero(),
            potential: T::zero(),
        }
    }
}

/// The active and reference junctions evaluated at one position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElectrostaticSample<T> {
    /// Position in cm, negative on the p-side
    pub position: T,
    /// The junction at the applied bias
    pub active: ElectrostaticPoint<T>,
    /// The reference junction, when one was supplied
    pub reference: Option<ElectrostaticPoint<T>>,
}

/// Charge, field and potential of a junction sampled over a symmetric window
///
/// The profile is lazy and restartable: each call to `iter` walks the window again.
#[derive(Clone, Debug)]
pub struct ElectrostaticProfile<T> {
    active: JunctionResult<T>,
    reference: Option<JunctionResult<T>>,
    grid: UniformGrid1d<T>,
}

impl<T: Copy + RealField> ElectrostaticProfile<T> {
    pub(crate) fn new(
        active: JunctionResult<T>,
        reference: Option<JunctionResult<T>>,
        half_width: T,
        num_points: usize,
    ) -> Self {
        Self {
            active,
            reference,
            grid: create_symmetric_grid_1d(half_width, num_points),
        }
    }

    /// The junction at the applied bias
    pub fn active(&self) -> &JunctionResult<T> {
        &self.active
    }

    /// The reference junction, when one was supplied
    pub fn reference(&self) -> Option<&JunctionResult<T>> {
        self.reference.as_ref()
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

    /// Walks the window from the p-side to the n-side
    pub fn iter(&self) -> ProfileIter<'_, T> {
        ProfileIter {
            profile: self,
            positions: self.grid.iter(),
        }
    }
}

impl<'a, T: Copy + RealField> IntoIterator for &'a ElectrostaticProfile<T> {
    type Item = ElectrostaticSample<T>;
    type IntoIter = ProfileIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over an `ElectrostaticProfile`
pub struct ProfileIter<'a, T> {
    profile: &'a ElectrostaticProfile<T>,
    positions: GridIter<T>,
}

impl<'a, T: Copy + RealField> Iterator for ProfileIter<'a, T> {
    type Item = ElectrostaticSample<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.positions.next()?;
        Some(ElectrostaticSample {
            position,
            active: self.profile.active.at(position),
            reference: self
                .profile
                .reference
                .as_ref()
                .map(|reference| reference.at(position)),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<'a, T: Copy + RealField> ExactSizeIterator for ProfileIter<'a, T> {}
