use crate::config::{ConfigError, LATTICE_AXIS_MAX};
use crate::geom::{Dot, Point};

/// Interior lattice points strictly inside `(0, bounds)` on both axes.
///
/// Dots are produced column by column (x outer, y inner); that order is the
/// tie-break order used by [`crate::find_nearest_dot`].
pub fn create_lattice(spacing: f64, bounds: f64) -> Result<Vec<Dot>, ConfigError> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(ConfigError::InvalidSpacing(spacing));
    }
    if !bounds.is_finite() || bounds <= 0.0 {
        return Err(ConfigError::InvalidCanvasSize(bounds));
    }
    let per_axis = lattice_axis_len(spacing, bounds);
    if per_axis > LATTICE_AXIS_MAX {
        return Err(ConfigError::LatticeTooDense {
            per_axis,
            max: LATTICE_AXIS_MAX,
        });
    }
    let mut dots = Vec::with_capacity(per_axis * per_axis);
    for col in 1..=per_axis {
        let x = spacing * col as f64;
        for row in 1..=per_axis {
            let y = spacing * row as f64;
            dots.push(Dot {
                index: dots.len(),
                center: Point::new(x, y),
            });
        }
    }
    Ok(dots)
}

pub fn lattice_axis_len(spacing: f64, bounds: f64) -> usize {
    if spacing <= 0.0 || bounds <= spacing {
        return 0;
    }
    let mut count = (bounds / spacing).floor() as usize;
    // Exclusive upper bound: a multiple landing exactly on `bounds` is dropped.
    while count > 0 && spacing * count as f64 >= bounds {
        count -= 1;
    }
    count
}

pub fn dot_at(dots: &[Dot], point: Point) -> Option<Dot> {
    dots.iter().find(|dot| dot.center == point).copied()
}
