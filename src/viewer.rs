use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use raylib::prelude::*;
use strata_mesh_cpu::{Terrain, TerrainDesc};
use strata_render_raylib::conv::{self, vec3_to_rl};
use strata_render_raylib::{RaylibTextureStore, RlglBackend, TextureCache};

use crate::camera::{MoveInput, TerrainCamera};
use crate::config::Config;
use crate::watch::spawn_file_watcher;

/// Initial eye height above the ground while following the terrain.
const EYE_CLEARANCE: f32 = 2.0;

pub fn run(cfg: &Config, watch: bool) -> Result<(), Box<dyn Error>> {
    let (mut rl, thread) = raylib::init()
        .size(cfg.window.width, cfg.window.height)
        .title(&cfg.window.title)
        .resizable()
        .build();
    rl.set_target_fps(60);

    let mut desc = cfg.terrain_desc();
    let mut cache = TextureCache::new();
    let mut terrain = {
        let mut store = RaylibTextureStore {
            rl: &mut rl,
            thread: &thread,
            cache: &mut cache,
        };
        match Terrain::load(&desc, &mut store) {
            Ok(t) => t,
            Err(e) => {
                log::error!("{}; starting with an empty terrain", e);
                Terrain::default()
            }
        }
    };

    let changes: Option<Receiver<PathBuf>> = watch.then(|| {
        let mut files = vec![desc.description.clone()];
        files.extend(desc.texture.clone());
        spawn_file_watcher(files)
    });

    let mut cam = TerrainCamera::new(start_position(&terrain), cfg.camera.move_speed, EYE_CLEARANCE);
    if !terrain.mesh().is_empty() {
        cam.look_at(vec3_to_rl(terrain.bounds().center()));
    }
    rl.disable_cursor();
    let mut show_bounds = false;

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        cam.look(&mut rl);
        let input = MoveInput::read(&rl);
        cam.step(input, dt, |x, z| terrain.height_at(x, z));

        if rl.is_key_pressed(KeyboardKey::KEY_T) {
            terrain.set_tessellation(terrain.tessellation().next());
        }
        if rl.is_key_pressed(KeyboardKey::KEY_F) {
            cam.follow = !cam.follow;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_B) {
            show_bounds = !show_bounds;
        }
        let mut reload = rl.is_key_pressed(KeyboardKey::KEY_R);
        if let Some(rx) = &changes {
            for p in rx.try_iter() {
                log::info!("changed: {}", p.display());
                reload = true;
            }
        }
        if reload {
            desc.tessellation = terrain.tessellation();
            let mut store = RaylibTextureStore {
                rl: &mut rl,
                thread: &thread,
                cache: &mut cache,
            };
            reload_terrain(&desc, &mut terrain, &mut store);
        }

        let ground = terrain.height_at(cam.position.x, cam.position.z);
        let normal = terrain.normal_at(cam.position.x, cam.position.z);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::SKYBLUE);
        let drawn = {
            let mut d3 = d.begin_mode3D(cam.to_camera3d());
            let mut backend = RlglBackend::new(&cache);
            terrain.render(&mut backend);
            if show_bounds && !terrain.mesh().is_empty() {
                d3.draw_bounding_box(conv::aabb_to_rl(terrain.bounds()), Color::DARKGRAY);
            }
            backend.triangles_drawn()
        };

        let hud = hud_lines(&terrain, cam.position, ground, normal, drawn, cam.follow);
        for (i, line) in hud.iter().enumerate() {
            d.draw_text(line, 12, 12 + 22 * i as i32, 18, Color::BLACK);
        }
        d.draw_fps(12, 12 + 22 * hud.len() as i32);
    }

    let mut store = RaylibTextureStore {
        rl: &mut rl,
        thread: &thread,
        cache: &mut cache,
    };
    terrain.release(&mut store);
    if !cache.is_empty() {
        log::warn!(target: "render", "{} textures still cached at exit", cache.len());
    }
    Ok(())
}

/// Loads a fresh terrain and swaps it in. On failure the current terrain stays.
fn reload_terrain(desc: &TerrainDesc, terrain: &mut Terrain, store: &mut RaylibTextureStore<'_>) {
    match Terrain::load(desc, store) {
        Ok(next) => {
            terrain.replace(next, store);
            log::info!("reloaded {}", desc.description.display());
        }
        Err(e) => log::warn!("reload failed, keeping current terrain: {}", e),
    }
}

fn start_position(terrain: &Terrain) -> Vector3 {
    if terrain.mesh().is_empty() {
        return Vector3::new(0.0, 10.0, 0.0);
    }
    let bb = terrain.bounds();
    let e = bb.extent();
    let lift = 0.25 * (e.x * e.x + e.z * e.z).sqrt();
    Vector3::new(bb.min.x, bb.max.y + lift.max(EYE_CLEARANCE), bb.min.z)
}

fn hud_lines(
    terrain: &Terrain,
    eye: Vector3,
    ground: Option<f32>,
    normal: Option<strata_geom::Vec3>,
    drawn: usize,
    follow: bool,
) -> Vec<String> {
    let footprint = if !terrain.mesh().is_empty() && terrain.bounds().contains_xz(eye.x, eye.z) {
        "over terrain"
    } else {
        "outside terrain footprint"
    };
    let mut lines = vec![
        terrain.description().to_string(),
        format!(
            "triangles: {} in grid, {} drawn",
            terrain.triangle_count(),
            drawn
        ),
        format!(
            "camera: ({:.1}, {:.1}, {:.1}) {}",
            eye.x, eye.y, eye.z, footprint
        ),
    ];
    lines.push(match ground {
        Some(h) => format!("ground height: {:.2}", h),
        None => "ground height: off terrain".to_string(),
    });
    lines.push(match normal {
        Some(n) => format!("ground normal: ({:.2}, {:.2}, {:.2})", n.x, n.y, n.z),
        None => "ground normal: -".to_string(),
    });
    lines.push(format!(
        "[T] tessellation  [F] follow {}  [B] bounds  [R] reload  [Tab] mouse",
        if follow { "on" } else { "off" }
    ));
    lines
}
