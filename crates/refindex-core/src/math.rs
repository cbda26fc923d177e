use crate::types::Point;

/// Argument of the arcsine in Snell's law: `(n1 / n2) * sin(theta)`.
pub fn snell_argument(n1: f64, n2: f64, theta: f64) -> f64 {
    (n1 / n2) * theta.sin()
}

/// Angle of the refracted ray going from index `n1` into `n2`.
///
/// Both angles are measured from the interface normal. Returns `None` when the
/// Snell argument leaves [-1, 1] (total internal reflection); `asin` is never
/// called outside its domain.
pub fn refract(n1: f64, n2: f64, theta: f64) -> Option<f64> {
    if n1 == n2 {
        return Some(theta);
    }
    let argument = snell_argument(n1, n2, theta);
    if !argument.is_finite() || argument.abs() > 1.0 {
        return None;
    }
    Some(argument.asin())
}

/// Cross one horizontal band of `thickness` going down at `angle` from the vertical.
pub fn transmit(from: Point, thickness: f64, angle: f64) -> Point {
    Point::new(from.x + thickness * angle.tan(), from.y - thickness)
}

/// `count` evenly spaced values from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            // Pin the endpoint against accumulated rounding
            values[count - 1] = end;
            values
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_6};

    #[test]
    fn test_refract_same_index_is_identity() {
        assert_eq!(refract(1.33, 1.33, 0.7), Some(0.7));
    }

    #[test]
    fn test_refract_normal_incidence() {
        let out = refract(1.0, 1.5, 0.0).expect("in domain");
        assert!(out.abs() < 1e-15, "got {out}");
    }

    #[test]
    fn test_refract_air_to_water_30deg() {
        // sin(30°) / 1.33 = 0.37594 -> 22.08°
        let out = refract(1.0, 1.33, FRAC_PI_6).expect("in domain");
        assert!((out.to_degrees() - 22.08).abs() < 1e-2, "got {}", out.to_degrees());
    }

    #[test]
    fn test_refract_bends_toward_normal_into_denser() {
        let theta = 0.8;
        let out = refract(1.2, 1.4, theta).expect("in domain");
        assert!(out < theta);
        let back = refract(1.4, 1.2, out).expect("in domain");
        assert!((back - theta).abs() < 1e-12, "got {back}");
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        // Critical angle glass -> air is ~41.8°
        assert!(refract(1.5, 1.0, 0.8).is_none());
        assert!(refract(1.5, 1.0, 0.7).is_some());
        assert!(refract(1.5, 1.0, FRAC_PI_2).is_none());
    }

    #[test]
    fn test_snell_argument() {
        assert!((snell_argument(1.0, 2.0, FRAC_PI_2) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_transmit_vertical() {
        let p = transmit(Point::new(3.0, 10.0), 2.0, 0.0);
        assert_eq!(p, Point::new(3.0, 8.0));
    }

    #[test]
    fn test_transmit_45deg() {
        let p = transmit(Point::new(0.0, 10.0), 2.0, std::f64::consts::FRAC_PI_4);
        assert!((p.x - 2.0).abs() < 1e-12, "got {}", p.x);
        assert_eq!(p.y, 8.0);
    }

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(1.3, 1.5, 1), vec![1.3]);
        let v = linspace(1.0, 1.5, 6);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[5], 1.5);
        for pair in v.windows(2) {
            assert!((pair[1] - pair[0] - 0.1).abs() < 1e-12);
        }
    }
}
