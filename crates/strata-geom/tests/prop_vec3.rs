use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;
use strata_geom::Vec3;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn approx_zero_scaled(val: f32, scale: f32, atol: f32, rtol: f32) -> bool {
    val.abs() <= atol + rtol * scale
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e4)
}

fn bounded_nonzero_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded_nonzero", |v| {
        v.is_finite() && {
            let a = v.abs();
            a >= 1e-3 && a <= 1e4
        }
    })
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_nondegenerate_vec3() -> impl Strategy<Value = Vec3> {
    (
        bounded_nonzero_f32(),
        bounded_nonzero_f32(),
        bounded_nonzero_f32(),
    )
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // a·(a×b) = 0 and b·(a×b) = 0
    #[test]
    fn cross_is_orthogonal(a in arb_nondegenerate_vec3(), b in arb_nondegenerate_vec3()) {
        let c = a.cross(b);
        prop_assert!(approx_zero_scaled(a.dot(c), a.length() * c.length(), 1e-6, 1e-4));
        prop_assert!(approx_zero_scaled(b.dot(c), b.length() * c.length(), 1e-6, 1e-4));
    }

    // a×b + b×a ≈ 0
    #[test]
    fn cross_is_anticommutative(a in arb_vec3(), b in arb_vec3()) {
        let sum = a.cross(b) + b.cross(a);
        prop_assert!(approx(sum.x, 0.0, 1e-2) && approx(sum.y, 0.0, 1e-2) && approx(sum.z, 0.0, 1e-2));
    }

    #[test]
    fn normalized_has_unit_length(v in arb_nondegenerate_vec3()) {
        prop_assert!(approx(v.normalized().length(), 1.0, 1e-3));
    }

    // Terrain-style edge pairs always produce an upward-facing normal.
    #[test]
    fn cell_edge_normal_points_up(
        csx in 0.01f32..100.0,
        csz in 0.01f32..100.0,
        dh0 in -1000.0f32..1000.0,
        dh1 in -1000.0f32..1000.0,
    ) {
        let v0 = Vec3::new(-csx, dh0, 0.0);
        let v1 = Vec3::new(0.0, dh1, csz);
        let n = v0.cross(v1).normalized();
        prop_assert!(n.y > 0.0);
    }
}
