use super::{breakdown_voltage, CurrentModel};
use crate::constants::cast;
use junction_mesher::{create_stepped_grid_1d, GridIter, UniformGrid1d};
use nalgebra::RealField;
use num_traits::ToPrimitive;

/// The I-V curve always extends at least this far into reverse bias, in V
pub const MINIMUM_REVERSE_SWEEP: f64 = -5.0;
/// The I-V curve extends this factor past the breakdown voltage
pub const BREAKDOWN_SWEEP_MARGIN: f64 = 1.2;
/// Upper end of the I-V curve in V
pub const MAXIMUM_FORWARD_SWEEP: f64 = 0.8;

/// Current density in A / cm^2 at one bias in V
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IvPoint<T> {
    /// Applied bias in V
    pub bias: T,
    /// Current density in A / cm^2
    pub current: T,
}

/// Current against bias for a fixed doping
///
/// The sweep starts at `min(-1.2 Vbr, -5)` so the breakdown wall is always in view, and steps
/// up to `0.8` V. Points are evaluated on demand.
#[derive(Clone, Debug)]
pub struct IvCurve<T> {
    model: CurrentModel<T>,
    acceptor_density: T,
    donor_density: T,
    grid: UniformGrid1d<T>,
}

impl<T: Copy + RealField + ToPrimitive> IvCurve<T> {
    pub(crate) fn new(
        model: CurrentModel<T>,
        acceptor_density: T,
        donor_density: T,
        intervals: usize,
    ) -> Self {
        let breakdown = breakdown_voltage(acceptor_density, donor_density);
        let minimum_bias = (-breakdown * cast::<T>(BREAKDOWN_SWEEP_MARGIN))
            .min(cast(MINIMUM_REVERSE_SWEEP));
        let grid = match intervals {
            0 => UniformGrid1d::empty(),
            intervals => {
                let intervals_as_t =
                    T::from_usize(intervals).expect("Must be able to fit usize in T");
                create_stepped_grid_1d(
                    minimum_bias,
                    cast(MAXIMUM_FORWARD_SWEEP),
                    minimum_bias.abs() / intervals_as_t,
                )
            }
        };
        Self {
            model,
            acceptor_density,
            donor_density,
            grid,
        }
    }
}

impl<T: Copy + RealField> IvCurve<T> {
    /// Breakdown voltage of the swept junction
    pub fn breakdown_voltage(&self) -> T {
        breakdown_voltage(self.acceptor_density, self.donor_density)
    }

    /// The most negative bias on the curve
    pub fn minimum_bias(&self) -> T {
        self.grid.left()
    }

    /// Number of bias points
    pub fn len(&self) -> usize {
        self.grid.num_points()
    }

    /// Whether no points are sampled
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// The bias of every point, for callers distributing the evaluation themselves
    pub fn biases(&self) -> GridIter<T> {
        self.grid.iter()
    }

    /// Evaluates the current at a single bias
    pub fn point(&self, bias: T) -> IvPoint<T> {
        IvPoint {
            bias,
            current: self
                .model
                .calculate(self.acceptor_density, self.donor_density, bias)
                .current,
        }
    }

    /// Walks the sweep from the most negative bias
    pub fn iter(&self) -> IvCurveIter<'_, T> {
        IvCurveIter {
            curve: self,
            biases: self.grid.iter(),
        }
    }
}

impl<'a, T: Copy + RealField> IntoIterator for &'a IvCurve<T> {
    type Item = IvPoint<T>;
    type IntoIter = IvCurveIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over an `IvCurve`
pub struct IvCurveIter<'a, T> {
    curve: &'a IvCurve<T>,
    biases: GridIter<T>,
}

impl<'a, T: Copy + RealField> Iterator for IvCurveIter<'a, T> {
    type Item = IvPoint<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.biases.next().map(|bias| self.curve.point(bias))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.biases.size_hint()
    }
}

impl<'a, T: Copy + RealField> ExactSizeIterator for IvCurveIter<'a, T> {}
