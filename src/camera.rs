use raylib::prelude::*;

/// Lowest eye height above the ground while following the terrain.
const MIN_CLEARANCE: f32 = 0.5;

/// Movement intent for one frame, independent of how it was read.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveInput {
    /// +1 forward, -1 back.
    pub forward: f32,
    /// +1 right, -1 left.
    pub strafe: f32,
    /// +1 up, -1 down.
    pub lift: f32,
    pub boost: bool,
}

impl MoveInput {
    pub fn read(rl: &RaylibHandle) -> Self {
        let axis = |pos: KeyboardKey, neg: KeyboardKey| {
            (rl.is_key_down(pos) as i32 - rl.is_key_down(neg) as i32) as f32
        };
        Self {
            forward: axis(KeyboardKey::KEY_W, KeyboardKey::KEY_S),
            strafe: axis(KeyboardKey::KEY_D, KeyboardKey::KEY_A),
            lift: axis(KeyboardKey::KEY_E, KeyboardKey::KEY_Q),
            boost: rl.is_key_down(KeyboardKey::KEY_LEFT_SHIFT),
        }
    }
}

/// Free-flying camera that can also walk over a heightfield.
///
/// While following, movement stays in the XZ plane, lift changes the clearance and the eye
/// rides `clearance` above whatever ground height the caller supplies.
pub struct TerrainCamera {
    pub position: Vector3,
    pub yaw: f32,   // degrees
    pub pitch: f32, // degrees
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    pub captured: bool,
    pub follow: bool,
    pub clearance: f32,
}

impl TerrainCamera {
    pub fn new(position: Vector3, move_speed: f32, clearance: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            move_speed,
            mouse_sensitivity: 0.1,
            captured: true,
            follow: false,
            clearance: clearance.max(MIN_CLEARANCE),
        }
    }

    /// Turns the view towards `target`. Leaves the angles alone when already there.
    pub fn look_at(&mut self, target: Vector3) {
        let d = target - self.position;
        let flat = (d.x * d.x + d.z * d.z).sqrt();
        if flat == 0.0 && d.y == 0.0 {
            return;
        }
        self.yaw = d.z.atan2(d.x).to_degrees();
        self.pitch = d.y.atan2(flat).to_degrees().clamp(-89.9, 89.9);
    }

    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D::perspective(
            self.position,
            self.position + self.forward(),
            Vector3::new(0.0, 1.0, 0.0),
            60.0,
        )
    }

    pub fn forward(&self) -> Vector3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
    }

    /// Heading projected on the ground plane.
    fn heading(&self) -> Vector3 {
        let yaw = self.yaw.to_radians();
        Vector3::new(yaw.cos(), 0.0, yaw.sin())
    }

    /// Mouse look and capture toggle.
    pub fn look(&mut self, rl: &mut RaylibHandle) {
        if rl.is_key_pressed(KeyboardKey::KEY_TAB) {
            self.captured = !self.captured;
            if self.captured {
                rl.disable_cursor();
            } else {
                rl.enable_cursor();
            }
        }
        if self.captured {
            let md = rl.get_mouse_delta();
            self.yaw += md.x * self.mouse_sensitivity;
            self.pitch = (self.pitch - md.y * self.mouse_sensitivity).clamp(-89.9, 89.9);
        }
    }

    /// Applies one frame of movement. `ground` answers the terrain height at an XZ point.
    pub fn step(&mut self, input: MoveInput, dt: f32, ground: impl Fn(f32, f32) -> Option<f32>) {
        let speed = if input.boost {
            self.move_speed * 3.0
        } else {
            self.move_speed
        };
        let dist = speed * dt;
        if self.follow {
            let h = self.heading();
            let right = Vector3::new(-h.z, 0.0, h.x);
            let mut dir = h * input.forward + right * input.strafe;
            if dir.length() > 0.0 {
                dir = dir.normalized();
                self.position += dir * dist;
            }
            self.clearance = (self.clearance + input.lift * dist).max(MIN_CLEARANCE);
            if let Some(g) = ground(self.position.x, self.position.z) {
                self.position.y = g + self.clearance;
            }
        } else {
            let f = self.forward();
            let right = f.cross(Vector3::up()).normalized();
            let mut dir = f * input.forward + right * input.strafe + Vector3::up() * input.lift;
            if dir.length() > 0.0 {
                dir = dir.normalized();
                self.position += dir * dist;
            }
        }
    }
}
