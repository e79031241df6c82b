use std::path::PathBuf;

use strata_terrain::{HeightFieldLoader, LoadError, LoadMethod};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("strata-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn two_by_two_diagonal_example() {
    let dir = scratch_dir("example");
    let path = dir.join("square.txt");
    std::fs::write(&path, "0 0 1 1 2 2 0\n0 0\n0 10\n").unwrap();

    let f = HeightFieldLoader::new(1.0)
        .load(&path, LoadMethod::Samples)
        .unwrap();
    // On the diagonal the ACD plane applies: 0 + 0.5*(10-0) + 0.5*(0-0)
    assert_eq!(f.height_at(0.5, 0.5), Some(5.0));
    assert_eq!(f.min_height(), 0.0);
    assert_eq!(f.max_height(), 10.0);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn image_description_next_to_its_bitmap() {
    let dir = scratch_dir("image-desc");
    let png = dir.join("ramp.png");
    image::GrayImage::from_raw(4, 2, vec![0, 1, 2, 3, 4, 5, 6, 7])
        .unwrap()
        .save(&png)
        .unwrap();
    let desc = dir.join("ramp.desc");
    std::fs::write(&desc, "10 20 2 2 0.5 ramp.png\n").unwrap();

    let f = HeightFieldLoader::new(1.0)
        .load(&desc, LoadMethod::Image)
        .unwrap();
    assert_eq!((f.num_cols(), f.num_rows()), (4, 2));
    assert_eq!(f.max_x(), 16.0);
    assert_eq!(f.max_z(), 22.0);
    assert_eq!(f.node_height(1, 3), Some(3.5));
    assert_eq!(f.height_at(16.0, 22.0), Some(3.5));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_description_produces_nothing() {
    let err = HeightFieldLoader::new(1.0)
        .load("/definitely/missing/terrain.txt", LoadMethod::Image)
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("terrain.txt"));
}

fn shipped(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../assets/terrain")
        .join(name)
}

#[test]
fn shipped_sample_terrain_loads() {
    let f = HeightFieldLoader::new(1.0)
        .load(shipped("hills.txt"), LoadMethod::Samples)
        .unwrap();
    assert_eq!((f.num_rows(), f.num_cols()), (33, 33));
    assert_eq!(f.max_x(), 32.0);
    assert!(f.height_at(0.0, 0.0).is_some());
    assert!(f.height_at(-33.0, 0.0).is_none());
}

#[test]
fn shipped_image_terrain_resolves_bitmap_beside_description() {
    let f = HeightFieldLoader::new(1.0)
        .load(shipped("crater.txt"), LoadMethod::Image)
        .unwrap();
    assert_eq!((f.num_rows(), f.num_cols()), (64, 64));
    assert_eq!(f.max_z(), 62.0);
    assert!(f.max_height() <= 25.5 + 1e-4);
    assert!(f.min_height() >= 0.0);
}
