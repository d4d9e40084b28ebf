//! Upward-pointing triangle spanning the image.

use super::Mask;

/// Signed area test: positive when `p` is left of the edge `a -> b`.
#[inline]
fn edge(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> f64 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

/// Triangle vertices for an image of the given size: apex at
/// `(width / 2, 0)` (integer division), base corners `(0, height)` and
/// `(width, height)`.
pub fn triangle_vertices(width: u32, height: u32) -> [(f64, f64); 3] {
    [
        ((width / 2) as f64, 0.0),
        (0.0, height as f64),
        (width as f64, height as f64),
    ]
}

/// Mask that is inside for every pixel whose centre lies within the
/// triangle (edges included).
pub fn triangle_mask(width: u32, height: u32) -> Mask {
    let [a, b, c] = triangle_vertices(width, height);

    Mask::from_fn(width, height, |x, y| {
        let p = (x, y);
        let e0 = edge(a, b, p);
        let e1 = edge(b, c, p);
        let e2 = edge(c, a, p);
        (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0) || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices() {
        assert_eq!(
            triangle_vertices(101, 50),
            [(50.0, 0.0), (0.0, 50.0), (101.0, 50.0)]
        );
    }

    #[test]
    fn test_bottom_row_fully_inside() {
        let mask = triangle_mask(40, 40);
        for x in 0..40 {
            assert_eq!(mask.value(x, 39), Some(255), "bottom pixel {} should be inside", x);
        }
    }

    #[test]
    fn test_top_corners_outside() {
        let mask = triangle_mask(40, 40);
        assert_eq!(mask.value(0, 0), Some(0));
        assert_eq!(mask.value(39, 0), Some(0));
        assert_eq!(mask.value(0, 20), Some(0));
        assert_eq!(mask.value(39, 20), Some(0));
    }

    #[test]
    fn test_apex_column_inside() {
        let mask = triangle_mask(40, 40);
        for y in 1..40 {
            assert_eq!(mask.value(20, y), Some(255));
        }
    }

    #[test]
    fn test_rows_widen_downwards() {
        let mask = triangle_mask(64, 48);
        let row_count = |y: u32| (0..64).filter(|&x| mask.value(x, y) == Some(255)).count();
        for y in 1..48 {
            assert!(row_count(y) >= row_count(y - 1));
        }
    }

    #[test]
    fn test_coverage_is_half() {
        let mask = triangle_mask(200, 200);
        assert!((mask.coverage() - 0.5).abs() < 0.01);
    }
}
