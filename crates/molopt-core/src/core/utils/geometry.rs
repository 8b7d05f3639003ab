use nalgebra::Point3;

const DEGENERATE_LENGTH: f64 = 1e-12;

#[inline]
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}

/// Bond angle `i-j-k` at the vertex `j`, in radians within `[0, pi]`.
///
/// Returns `None` when either arm has zero length, since the angle is undefined.
pub fn angle(i: &Point3<f64>, j: &Point3<f64>, k: &Point3<f64>) -> Option<f64> {
    let ji = i - j;
    let jk = k - j;
    if ji.norm() < DEGENERATE_LENGTH || jk.norm() < DEGENERATE_LENGTH {
        return None;
    }
    Some(ji.angle(&jk))
}

/// Signed torsion angle `i-j-k-l` about the `j-k` axis, in radians within `(-pi, pi]`.
///
/// A cis arrangement gives `0`, a trans arrangement gives `pi`. Both outer bonds are
/// projected onto the plane perpendicular to the central bond and the angle between
/// the projections is recovered with `atan2`, which stays well conditioned near
/// `0` and `pi`. Returns `None` when the central bond has zero length.
pub fn dihedral(
    i: &Point3<f64>,
    j: &Point3<f64>,
    k: &Point3<f64>,
    l: &Point3<f64>,
) -> Option<f64> {
    let b0 = i - j;
    let b1 = k - j;
    let b2 = l - k;

    if b1.norm() < DEGENERATE_LENGTH {
        return None;
    }
    let axis = b1.normalize();

    let v = b0 - axis * b0.dot(&axis);
    let w = b2 - axis * b2.dot(&axis);

    // v and w need not be normalized, atan2 only uses the ratio.
    let x = v.dot(&w);
    let y = axis.cross(&v).dot(&w);

    Some(y.atan2(x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn distance_matches_euclidean_norm() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 6.0, 3.0);
        assert!(f64_approx_equal(distance(&a, &b), 5.0));
    }

    #[test]
    fn distance_is_symmetric_and_zero_for_same_point() {
        let a = Point3::new(-1.0, 0.5, 2.0);
        let b = Point3::new(3.0, 1.0, -2.0);
        assert!(f64_approx_equal(distance(&a, &b), distance(&b, &a)));
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn angle_of_perpendicular_arms_is_right_angle() {
        let i = Point3::new(1.0, 0.0, 0.0);
        let j = Point3::origin();
        let k = Point3::new(0.0, 2.0, 0.0);
        assert!(f64_approx_equal(angle(&i, &j, &k).unwrap(), FRAC_PI_2));
    }

    #[test]
    fn angle_of_collinear_arms_is_straight() {
        let i = Point3::new(-1.0, 0.0, 0.0);
        let j = Point3::origin();
        let k = Point3::new(3.0, 0.0, 0.0);
        assert!(f64_approx_equal(angle(&i, &j, &k).unwrap(), PI));
    }

    #[test]
    fn angle_with_zero_length_arm_is_none() {
        let j = Point3::new(1.0, 1.0, 1.0);
        let k = Point3::new(2.0, 1.0, 1.0);
        assert!(angle(&j, &j, &k).is_none());
    }

    #[test]
    fn dihedral_of_cis_arrangement_is_zero() {
        let i = Point3::new(0.0, 1.0, 0.0);
        let j = Point3::origin();
        let k = Point3::new(1.0, 0.0, 0.0);
        let l = Point3::new(1.0, 1.0, 0.0);
        assert!(f64_approx_equal(dihedral(&i, &j, &k, &l).unwrap(), 0.0));
    }

    #[test]
    fn dihedral_of_trans_arrangement_is_pi() {
        let i = Point3::new(0.0, 1.0, 0.0);
        let j = Point3::origin();
        let k = Point3::new(1.0, 0.0, 0.0);
        let l = Point3::new(1.0, -1.0, 0.0);
        assert!(f64_approx_equal(dihedral(&i, &j, &k, &l).unwrap().abs(), PI));
    }

    #[test]
    fn dihedral_sign_follows_rotation_direction() {
        let i = Point3::new(0.0, 1.0, 0.0);
        let j = Point3::origin();
        let k = Point3::new(1.0, 0.0, 0.0);
        let up = Point3::new(1.0, 0.0, 1.0);
        let down = Point3::new(1.0, 0.0, -1.0);

        assert!(f64_approx_equal(dihedral(&i, &j, &k, &up).unwrap(), FRAC_PI_2));
        assert!(f64_approx_equal(dihedral(&i, &j, &k, &down).unwrap(), -FRAC_PI_2));
    }

    #[test]
    fn dihedral_is_independent_of_outer_bond_lengths() {
        let i = Point3::new(0.0, 1.0, 0.0);
        let far_i = Point3::new(0.0, 7.5, 0.0);
        let j = Point3::origin();
        let k = Point3::new(1.0, 0.0, 0.0);
        let l = Point3::new(1.0, 1.0, 1.0);
        let far_l = Point3::new(1.0, 4.0, 4.0);

        let near = dihedral(&i, &j, &k, &l).unwrap();
        let far = dihedral(&far_i, &j, &k, &far_l).unwrap();
        assert!(f64_approx_equal(near, far));
    }

    #[test]
    fn dihedral_with_coincident_central_atoms_is_none() {
        let i = Point3::new(0.0, 1.0, 0.0);
        let j = Point3::origin();
        let l = Point3::new(1.0, 1.0, 0.0);
        assert!(dihedral(&i, &j, &j, &l).is_none());
    }
}
