use nalgebra::RealField;
use std::iter::FusedIterator;

/// A uniformly spaced set of sample points on a line
///
/// The grid stores only its origin, spacing and length. Points are computed on demand
/// so iterating allocates nothing, and the grid can be walked any number of times.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformGrid1d<T> {
    left: T,
    step: T,
    num_points: usize,
}

impl<T> UniformGrid1d<T>
where
    T: Copy + RealField,
{
    pub(crate) fn from_raw_parts(left: T, step: T, num_points: usize) -> Self {
        Self {
            left,
            step,
            num_points,
        }
    }

    /// A grid with no points
    pub fn empty() -> Self {
        Self::from_raw_parts(T::zero(), T::zero(), 0)
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    pub fn left(&self) -> T {
        self.left
    }

    pub fn step(&self) -> T {
        self.step
    }

    /// The last point on the grid, or `None` for an empty grid
    pub fn right(&self) -> Option<T> {
        self.num_points.checked_sub(1).map(|last| self.point(last))
    }

    /// The coordinate of the `index`th point
    ///
    /// Indices past the end are extrapolated along the grid spacing.
    pub fn point(&self, index: usize) -> T {
        let index_as_t = T::from_usize(index).expect("Must be able to fit usize in T");
        self.left + index_as_t * self.step
    }

    pub fn iter(&self) -> GridIter<T> {
        GridIter {
            grid: *self,
            front: 0,
            back: self.num_points,
        }
    }
}

impl<'a, T> IntoIterator for &'a UniformGrid1d<T>
where
    T: Copy + RealField,
{
    type Item = T;
    type IntoIter = GridIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the points of a `UniformGrid1d`
#[derive(Clone, Debug)]
pub struct GridIter<T> {
    grid: UniformGrid1d<T>,
    front: usize,
    back: usize,
}

impl<T> Iterator for GridIter<T>
where
    T: Copy + RealField,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        let point = self.grid.point(self.front);
        self.front += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<T> DoubleEndedIterator for GridIter<T>
where
    T: Copy + RealField,
{
    fn next_back(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.grid.point(self.back))
    }
}

impl<T> ExactSizeIterator for GridIter<T> where T: Copy + RealField {}

impl<T> FusedIterator for GridIter<T> where T: Copy + RealField {}

#[cfg(test)]
mod test {
    use super::UniformGrid1d;
    use approx::assert_relative_eq;

    #[test]
    fn empty_grid_yields_nothing() {
        let grid: UniformGrid1d<f64> = UniformGrid1d::empty();
        assert!(grid.is_empty());
        assert_eq!(grid.iter().count(), 0);
        assert!(grid.right().is_none());
    }

    #[test]
    fn iteration_is_restartable() {
        let grid = UniformGrid1d::from_raw_parts(-1f64, 0.5, 5);
        let first: Vec<f64> = grid.iter().collect();
        let second: Vec<f64> = (&grid).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn reverse_iteration_matches_forward_iteration() {
        let grid = UniformGrid1d::from_raw_parts(0f64, 0.25, 9);
        let mut forward: Vec<f64> = grid.iter().collect();
        let backward: Vec<f64> = grid.iter().rev().collect();
        forward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn nth_skips_points() {
        let grid = UniformGrid1d::from_raw_parts(0f64, 1., 10);
        let mut iter = grid.iter();
        assert_relative_eq!(iter.nth(3).unwrap(), 3.);
        assert_eq!(iter.len(), 6);
        assert!(iter.nth(100).is_none());
    }
}
