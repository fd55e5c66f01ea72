use super::*;

fn approx_eq(a: Matrix2, b: Matrix2) -> bool {
    (a.a - b.a).abs() < 1e-9
        && (a.b - b.b).abs() < 1e-9
        && (a.c - b.c).abs() < 1e-9
        && (a.d - b.d).abs() < 1e-9
}

#[test]
fn rotate_is_counter_clockwise() {
    let v = Matrix2::rotate(90.0, 1.0).apply(Vec2::new(1.0, 0.0));
    assert!((v.x - 0.0).abs() < 1e-12);
    assert!((v.y - 1.0).abs() < 1e-12);
}

#[test]
fn rotate_then_scale_preserves_determinant_squared_scale() {
    let m = Matrix2::rotate(33.0, 0.5);
    assert!((m.determinant() - 0.25).abs() < 1e-12);
    assert!((m.angle_degrees() - 33.0).abs() < 1e-9);
}

#[test]
fn reflections_negate_one_axis() {
    assert_eq!(
        Matrix2::reflect_x(1.0).apply(Vec2::new(2.0, 3.0)),
        Vec2::new(-2.0, 3.0)
    );
    assert_eq!(
        Matrix2::reflect_y(2.0).apply(Vec2::new(2.0, 3.0)),
        Vec2::new(4.0, -6.0)
    );
}

#[test]
fn dihedral_first_element_is_scale() {
    let m = Matrix2::dihedral(5, 1, 0.5).unwrap();
    assert!(approx_eq(m, Matrix2::scale(0.5)));
}

#[test]
fn dihedral_rotations_and_reflections() {
    let r = Matrix2::dihedral(4, 2, 1.0).unwrap();
    assert!(approx_eq(r, Matrix2::rotate(90.0, 1.0)));

    let f = Matrix2::dihedral(4, 5, 1.0).unwrap();
    assert!(approx_eq(f, Matrix2::reflect_x(1.0)));
    assert!(f.determinant() < 0.0);

    // Every group element maps the square's vertex set onto itself.
    for index in 1..=8 {
        let m = Matrix2::dihedral(4, index, 1.0).unwrap();
        let img = m.apply(Vec2::new(1.0, 1.0));
        assert!((img.x.abs() - 1.0).abs() < 1e-9);
        assert!((img.y.abs() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn dihedral_rejects_bad_arguments() {
    assert!(Matrix2::dihedral(1, 1, 1.0).is_err());
    assert!(Matrix2::dihedral(3, 0, 1.0).is_err());
    assert!(Matrix2::dihedral(3, 7, 1.0).is_err());
    assert!(Matrix2::dihedral(3, 6, 1.0).is_ok());
}

#[test]
fn dihedral_accepts_the_largest_polygon() {
    let first = Matrix2::dihedral(u32::MAX, 1, 2.0).unwrap();
    assert_eq!(first, Matrix2::scale(2.0));
    let flipped = Matrix2::dihedral(u32::MAX, u32::MAX, 1.0).unwrap();
    assert!((flipped.determinant() - 1.0).abs() < 1e-9);
}

#[test]
fn compose_applies_right_operand_first() {
    let s = Matrix2::diag(2.0, 1.0);
    let r = Matrix2::rotate(90.0, 1.0);
    let v = (s * r) * Vec2::new(1.0, 0.0);
    // rotate (1,0) -> (0,1), then scale x by 2 leaves (0,1)
    assert!((v.x - 0.0).abs() < 1e-12);
    assert!((v.y - 1.0).abs() < 1e-12);
}

#[test]
fn to_affine_matches_apply() {
    let m = Matrix2::new(1.0, 2.0, 3.0, 4.0);
    let p = m.to_affine() * kurbo::Point::new(5.0, 6.0);
    let v = m.apply(Vec2::new(5.0, 6.0));
    assert!((p.x - v.x).abs() < 1e-12);
    assert!((p.y - v.y).abs() < 1e-12);
}
