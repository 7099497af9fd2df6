pub struct GeometryHelper;

impl GeometryHelper {
    /// Euclidean distance between two 2-D points.
    pub fn dist2p(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
        Self::dist2p_squared(x1, y1, x2, y2).sqrt()
    }

    /// Squared Euclidean distance, used for per-frame target metrics.
    pub fn dist2p_squared(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
        let dx = x2 - x1;
        let dy = y2 - y1;
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dist2p_matches_pythagorean_triple() {
        assert_eq!(GeometryHelper::dist2p(0.0, 0.0, 3.0, 4.0), 5.0);
    }

    #[test]
    fn dist2p_is_zero_for_identical_points() {
        assert_eq!(GeometryHelper::dist2p(1.5, -2.0, 1.5, -2.0), 0.0);
    }

    #[test]
    fn squared_distance_skips_the_root() {
        assert_eq!(GeometryHelper::dist2p_squared(0.0, 0.0, 3.0, 4.0), 25.0);
    }
}
