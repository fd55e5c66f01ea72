use super::*;

fn close(a: Transform, b: Transform) -> bool {
    let m = |x: f64, y: f64| (x - y).abs() < 1e-9;
    m(a.vector.x, b.vector.x)
        && m(a.vector.y, b.vector.y)
        && m(a.matrix.a, b.matrix.a)
        && m(a.matrix.b, b.matrix.b)
        && m(a.matrix.c, b.matrix.c)
        && m(a.matrix.d, b.matrix.d)
}

fn samples() -> Vec<Transform> {
    vec![
        Transform::identity(),
        Transform::new(Vec2::new(3.0, -1.0), Matrix2::rotate(30.0, 0.5)),
        Transform::new(Vec2::new(-2.0, 7.5), Matrix2::new(1.0, 0.3, -0.2, 0.9)),
        Transform::new(Vec2::new(0.25, 0.5), Matrix2::reflect_x(0.7)),
        Transform::new(Vec2::new(10.0, 0.0), Matrix2::diag(0.0, 2.0)),
    ]
}

#[test]
fn composition_is_associative() {
    for a in samples() {
        for b in samples() {
            for c in samples() {
                assert!(close((a * b) * c, a * (b * c)));
            }
        }
    }
}

#[test]
fn compose_matches_sequential_application() {
    let outer = Transform::new(Vec2::new(500.0, 500.0), Matrix2::scale(500.0));
    let inner = Transform::new(Vec2::new(-0.5, -0.5), Matrix2::scale(0.5));
    let v = Vec2::new(1.0, 1.0);
    let direct = outer.compose(inner).apply(v);
    let stepped = outer.apply(inner.apply(v));
    assert!((direct - stepped).hypot() < 1e-9);
    assert_eq!(outer.compose(inner).vector, Vec2::new(250.0, 250.0));
}

#[test]
fn identity_is_neutral() {
    for t in samples() {
        assert!(close(t * Transform::identity(), t));
        assert!(close(Transform::identity() * t, t));
    }
}

#[test]
fn to_affine_agrees_with_apply() {
    let t = Transform::new(Vec2::new(3.0, -1.0), Matrix2::rotate(30.0, 0.5));
    let p = t.to_affine() * kurbo::Point::new(2.0, 1.0);
    let v = t.apply(Vec2::new(2.0, 1.0));
    assert!((p.x - v.x).abs() < 1e-9);
    assert!((p.y - v.y).abs() < 1e-9);
}
