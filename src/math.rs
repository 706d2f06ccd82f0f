#[must_use]
#[inline]
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).fold(0.0, |dot, (xi, yi)| dot + xi * yi)
}

/// Evenly spaced values over `[start, end]`, both ends included.
///
/// A single point yields just `start`.
#[must_use]
pub fn linspace(start: f64, end: f64, n_points: usize) -> Vec<f64> {
    match n_points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n_points - 1) as f64;
            (0..n_points)
                .map(|i| if i == n_points - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
