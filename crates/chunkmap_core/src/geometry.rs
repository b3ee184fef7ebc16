//! Small 2D geometry helpers shared by the tiler and the shape handles

/// Even-odd (ray casting) point-in-polygon test.
/// Self-intersecting outlines are handled with even-odd semantics.
pub fn point_in_polygon(x: f64, y: f64, vertices: &[(f64, f64)]) -> bool {
    let mut inside = false;
    let mut j = vertices.len().wrapping_sub(1);
    for i in 0..vertices.len() {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Closest point to `p` on the segment `a`-`b`
pub fn project_on_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return a;
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0);
    (a.0 + t * dx, a.1 + t * dy)
}

pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

pub fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    distance(p, project_on_segment(p, a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_square() {
        let square = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        assert!(point_in_polygon(2.0, 2.0, &square));
        assert!(!point_in_polygon(5.0, 2.0, &square));
        assert!(!point_in_polygon(2.0, -0.5, &square));
    }

    #[test]
    fn test_point_in_bowtie_even_odd() {
        // Self-intersecting outline crossing at (2, 2)
        let bowtie = [(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0)];
        assert!(point_in_polygon(0.5, 2.0, &bowtie));
        assert!(point_in_polygon(3.5, 2.0, &bowtie));
        assert!(!point_in_polygon(2.0, 0.5, &bowtie));
    }

    #[test]
    fn test_degenerate_polygons() {
        assert!(!point_in_polygon(0.0, 0.0, &[]));
        assert!(!point_in_polygon(0.0, 0.0, &[(0.0, 0.0)]));
    }

    #[test]
    fn test_project_on_segment_clamps() {
        let a = (0.0, 0.0);
        let b = (10.0, 0.0);
        assert_eq!(project_on_segment((3.0, 5.0), a, b), (3.0, 0.0));
        assert_eq!(project_on_segment((-4.0, 1.0), a, b), a);
        assert_eq!(project_on_segment((14.0, 1.0), a, b), b);
        assert_eq!(project_on_segment((1.0, 1.0), a, a), a);
        assert_eq!(distance_to_segment((3.0, 5.0), a, b), 5.0);
    }
}
