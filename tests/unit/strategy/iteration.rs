use super::*;
use crate::fractal::piece::ConcretePiece;
use crate::transform::affine::Transform;

fn piece_at(iteration: u32) -> ConcretePiece {
    let mut p = ConcretePiece::seed(0, Transform::identity());
    p.iteration = iteration;
    p
}

#[test]
fn standard_requires_size_and_depth() {
    let f = standard(10.0, 3);
    let shallow = piece_at(2);
    let deep = piece_at(3);
    assert!(f(&PieceContext { piece: &shallow, diameter: 11.0 }));
    assert!(!f(&PieceContext { piece: &shallow, diameter: 10.0 }));
    assert!(!f(&PieceContext { piece: &deep, diameter: 1000.0 }));
}

#[test]
fn stop_always_and_depth() {
    let p = piece_at(0);
    let ctx = PieceContext { piece: &p, diameter: 0.0 };
    assert!(!stop()(&ctx));
    assert!(always()(&ctx));
    assert!(depth(1)(&ctx));
    assert!(!depth(0)(&ctx));
}

#[test]
fn default_uses_documented_thresholds() {
    let f = default_iteration_fn();
    let p = piece_at(5);
    assert!(f(&PieceContext { piece: &p, diameter: 31.0 }));
    assert!(!f(&PieceContext { piece: &p, diameter: 30.0 }));
    let p = piece_at(6);
    assert!(!f(&PieceContext { piece: &p, diameter: 1e6 }));
}
