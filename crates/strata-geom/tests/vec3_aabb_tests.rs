use strata_geom::{Aabb, Vec2, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::UP, Vec3::new(0.0, 1.0, 0.0), 1e-6));
    assert_eq!(Vec2::ZERO, Vec2::new(0.0, 0.0));
}

#[test]
fn vec3_add_sub_neg() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq(c - a, b, 1e-6));
    assert!(vec3_approx_eq(-a, Vec3::new(-1.0, -2.0, -3.0), 1e-6));
}

#[test]
fn vec3_length_and_normalized() {
    let v = Vec3::new(3.0, 4.0, 0.0);
    assert!(approx_eq(v.length(), 5.0, 1e-6));
    assert!(vec3_approx_eq(v.normalized(), Vec3::new(0.6, 0.8, 0.0), 1e-6));

    // Zero stays zero instead of turning into NaN
    let zn = Vec3::ZERO.normalized();
    assert!(vec3_approx_eq(zn, Vec3::ZERO, 1e-6));
}

#[test]
fn vec3_cross_basis() {
    let i = Vec3::new(1.0, 0.0, 0.0);
    let j = Vec3::new(0.0, 1.0, 0.0);
    let k = Vec3::new(0.0, 0.0, 1.0);
    assert!(vec3_approx_eq(i.cross(j), k, 1e-6));
    assert!(vec3_approx_eq(j.cross(k), i, 1e-6));
    assert!(vec3_approx_eq(k.cross(i), j, 1e-6));
}

#[test]
fn flat_cell_edges_cross_to_up() {
    // Edge vectors of a flat terrain cell, as used for surface normals.
    let v0 = Vec3::new(-2.0, 0.0, 0.0);
    let v1 = Vec3::new(0.0, 0.0, 3.0);
    assert!(vec3_approx_eq(v0.cross(v1).normalized(), Vec3::UP, 1e-6));
}

#[test]
fn aabb_center_extent_contains() {
    let aabb = Aabb::new(Vec3::new(-1.0, 0.0, 1.0), Vec3::new(3.0, 4.0, 5.0));
    assert!(vec3_approx_eq(aabb.center(), Vec3::new(1.0, 2.0, 3.0), 1e-6));
    assert!(vec3_approx_eq(aabb.extent(), Vec3::new(4.0, 4.0, 4.0), 1e-6));
    assert!(aabb.contains_xz(-1.0, 1.0));
    assert!(aabb.contains_xz(3.0, 5.0));
    assert!(!aabb.contains_xz(3.5, 2.0));
    assert!(!aabb.contains_xz(0.0, 0.5));
}
