use crate::grid::UniformGrid1d;
use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Creates `num_points` equally spaced points covering `[left, right]` inclusive
///
/// A single point sits on `left`. Non-finite bounds produce an empty grid.
pub fn create_line_segment_grid_1d<T>(left: T, right: T, num_points: usize) -> UniformGrid1d<T>
where
    T: Copy + RealField,
{
    if num_points == 0 || !left.is_finite() || !right.is_finite() {
        return UniformGrid1d::empty();
    }
    if num_points == 1 {
        return UniformGrid1d::from_raw_parts(left, T::zero(), 1);
    }
    let intervals = T::from_usize(num_points - 1).expect("Must be able to fit usize in T");
    UniformGrid1d::from_raw_parts(left, (right - left) / intervals, num_points)
}

/// Creates the symmetric grid `[-half_width, half_width]` with `num_points` points
pub fn create_symmetric_grid_1d<T>(half_width: T, num_points: usize) -> UniformGrid1d<T>
where
    T: Copy + RealField,
{
    let half_width = half_width.abs();
    create_line_segment_grid_1d(-half_width, half_width, num_points)
}

/// Creates the points `left, left + step, ...` up to and including `right`
///
/// A point landing within a millionth of a step past `right` is kept, so spans that are
/// a whole number of steps include their end point despite rounding.
pub fn create_stepped_grid_1d<T>(left: T, right: T, step: T) -> UniformGrid1d<T>
where
    T: Copy + RealField + ToPrimitive,
{
    if !(step > T::zero()) || !left.is_finite() || !right.is_finite() || right < left {
        return UniformGrid1d::empty();
    }
    let tolerance = T::from_f64(1e-6).expect("Must be able to fit f64 in T");
    let intervals = ((right - left) / step + tolerance).floor();
    match intervals.to_usize() {
        Some(intervals) => UniformGrid1d::from_raw_parts(left, step, intervals + 1),
        None => UniformGrid1d::empty(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn line_segment_grid_hits_both_ends() {
        let grid = create_line_segment_grid_1d(-2f64, 3f64, 11);
        assert_eq!(grid.num_points(), 11);
        assert_relative_eq!(grid.left(), -2.);
        assert_relative_eq!(grid.right().unwrap(), 3., epsilon = 1e-12);
        assert_relative_eq!(grid.step(), 0.5);
    }

    #[test]
    fn single_point_grid_sits_on_left() {
        let grid = create_line_segment_grid_1d(1f64, 5f64, 1);
        let points: Vec<f64> = grid.iter().collect();
        assert_eq!(points, vec![1.]);
    }

    #[test]
    fn non_finite_bounds_give_empty_grid() {
        assert!(create_line_segment_grid_1d(f64::NAN, 1., 10).is_empty());
        assert!(create_line_segment_grid_1d(0., f64::INFINITY, 10).is_empty());
    }

    #[test]
    fn stepped_grid_includes_whole_step_end_point() {
        let grid = create_stepped_grid_1d(-0.2f64, 1.3, 0.005);
        assert_eq!(grid.num_points(), 301);
        assert_relative_eq!(grid.right().unwrap(), 1.3, epsilon = 1e-9);
    }

    #[test]
    fn stepped_grid_stops_short_of_partial_step() {
        let grid = create_stepped_grid_1d(0f64, 1., 0.3);
        assert_eq!(grid.num_points(), 4);
        assert!(grid.right().unwrap() <= 1.);
    }

    #[test]
    fn stepped_grid_rejects_degenerate_steps() {
        assert!(create_stepped_grid_1d(0f64, 1., 0.).is_empty());
        assert!(create_stepped_grid_1d(0f64, 1., -0.1).is_empty());
        assert!(create_stepped_grid_1d(1f64, 0., 0.1).is_empty());
    }

    proptest! {
        #[test]
        fn symmetric_grid_is_symmetric(half_width in 1e-6f64..1e-2, half_points in 1usize..200) {
            let grid = create_symmetric_grid_1d(half_width, 2 * half_points + 1);
            for (forward, backward) in grid.iter().zip(grid.iter().rev()) {
                prop_assert!((forward + backward).abs() <= 1e-12 * half_width.max(1.));
            }
        }
    }
}
