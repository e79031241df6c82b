use proptest::prelude::*;
use strata_terrain::{HeightField, HeightFieldLoader};

fn cell_size() -> impl Strategy<Value = f32> {
    prop::sample::select(vec![0.25f32, 0.5, 1.0, 2.0, 4.0])
}

fn arb_field() -> impl Strategy<Value = HeightField> {
    (1usize..8, 1usize..8, -50i32..50, -50i32..50, cell_size(), cell_size()).prop_flat_map(
        |(rows, cols, ox, oz, csx, csz)| {
            prop::collection::vec(-100.0f32..100.0, rows * cols).prop_map(move |samples| {
                HeightField::from_samples(ox as f32, oz as f32, csx, csz, rows, cols, samples)
                    .unwrap()
            })
        },
    )
}

// Multiples of 0.25 keep `origin + d - origin == d` exact.
fn quarter_steps() -> impl Strategy<Value = f32> {
    (-400i32..400).prop_map(|v| v as f32 * 0.25)
}

fn description(rows: usize, cols: usize, samples: &[f32]) -> String {
    let mut s = format!("3.5 -1.25 0.75 1.5 {} {} 0\n", cols, rows);
    for row in samples.chunks(cols) {
        let line: Vec<String> = row.iter().map(|h| h.to_string()).collect();
        s.push_str(&line.join(" "));
        s.push('\n');
    }
    s
}

proptest! {
    // Evaluating at a node's exact world position returns the stored sample.
    #[test]
    fn node_positions_return_samples(f in arb_field()) {
        for row in 0..f.num_rows() {
            for col in 0..f.num_cols() {
                let p = f.node_position(row, col).unwrap();
                prop_assert_eq!(f.height_at(p.x, p.z), f.node_height(row, col));
            }
        }
    }

    // Only points before the origin fail to locate.
    #[test]
    fn locate_rejects_only_points_before_origin(
        f in arb_field(),
        dx in quarter_steps(),
        dz in quarter_steps(),
    ) {
        let located = f.locate(f.origin_x() + dx, f.origin_z() + dz);
        prop_assert_eq!(located.is_some(), dx >= 0.0 && dz >= 0.0);
        if let Some(p) = located {
            prop_assert!((0.0..1.0).contains(&p.frac_col));
            prop_assert!((0.0..1.0).contains(&p.frac_row));
        }
    }

    // Heights inside the grid stay within the sample bounds.
    #[test]
    fn interior_heights_are_bounded(f in arb_field(), u in 0.0f32..1.0, v in 0.0f32..1.0) {
        let x = f.origin_x() + u * (f.max_x() - f.origin_x());
        let z = f.origin_z() + v * (f.max_z() - f.origin_z());
        if let Some(h) = f.height_at(x, z) {
            prop_assert!(h >= f.min_height() - 1e-3 && h <= f.max_height() + 1e-3);
        }
    }

    // Normals inside the grid are unit length and face upward.
    #[test]
    fn interior_normals_face_up(f in arb_field(), u in 0.0f32..1.0, v in 0.0f32..1.0) {
        let x = f.origin_x() + u * (f.max_x() - f.origin_x());
        let z = f.origin_z() + v * (f.max_z() - f.origin_z());
        if let Some(n) = f.normal_at(x, z) {
            prop_assert!((n.length() - 1.0).abs() < 1e-4);
            prop_assert!(n.y > 0.0);
        }
    }

    // Loading with scale k yields exactly k times the scale-1 load.
    #[test]
    fn load_scale_is_uniform(
        (rows, cols, samples) in (1usize..6, 1usize..6).prop_flat_map(|(r, c)| {
            (Just(r), Just(c), prop::collection::vec(-1000.0f32..1000.0, r * c))
        }),
        k in 0.01f32..50.0,
    ) {
        let text = description(rows, cols, &samples);
        let base = HeightFieldLoader::new(1.0).parse_samples(&text).unwrap();
        let scaled = HeightFieldLoader::new(k).parse_samples(&text).unwrap();
        prop_assert_eq!(scaled.origin_x(), base.origin_x() * k);
        prop_assert_eq!(scaled.origin_z(), base.origin_z() * k);
        prop_assert_eq!(scaled.cell_size_x(), base.cell_size_x() * k);
        prop_assert_eq!(scaled.cell_size_z(), base.cell_size_z() * k);
        for (s, b) in scaled.samples().iter().zip(base.samples()) {
            prop_assert_eq!(*s, *b * k);
        }
        prop_assert_eq!(scaled.min_height(), base.min_height() * k);
        prop_assert_eq!(scaled.max_height(), base.max_height() * k);
    }
}
