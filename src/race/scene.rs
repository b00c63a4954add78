//! Scene layout and the endless-road scroller.
//!
//! Everything here is plain data: positions, sizes and colors. The
//! scenery is laid out once when a race starts and then recycled; no item
//! is created or dropped while driving.

use super::types::{ColorHex, Obstacle, ObstacleId, Vec3, LEADING_THRESHOLD};
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Wrap distance of the large backdrop pool (grass strips).
pub const FAR_WRAP_DISTANCE: f64 = 400.0;
/// Wrap distance of the road pool (asphalt and lane markings).
pub const NEAR_WRAP_DISTANCE: f64 = 192.0;

const ROAD_SEGMENTS: usize = 8;
const ROAD_SEGMENT_SPACING: f64 = 24.0;
const LANE_MARKINGS: usize = 60;
const GRASS_STRIPS_PER_SIDE: usize = 4;
const GRASS_SPACING: f64 = 100.0;
const GRASS_OFFSET_X: f64 = 29.0;

const TREE_ROWS: usize = 20;
const TREE_RESET_DEPTH: f64 = -160.0;
const BUILDING_ROWS: usize = 15;
const BUILDING_RESET_DEPTH: f64 = -100.0;
const LAMP_ROWS: usize = 25;
const LAMP_RESET_DEPTH: f64 = -150.0;
const ROCK_COUNT: usize = 30;
const FLOWER_COUNT: usize = 40;
const GROUND_DECOR_RESET_DEPTH: f64 = -100.0;
const CLOUD_COUNT: usize = 10;
const MOUNTAIN_COUNT: usize = 12;

const BIRD_COUNT: usize = 8;
const BIRD_WING_STEP: f64 = 0.15;
const BIRD_FLAP_AMPLITUDE: f64 = 0.5;
/// Orbit centers past the camera jump back to this depth.
pub const BIRD_ORBIT_RESET_DEPTH: f64 = -80.0;

pub const CAMERA_HOME: Vec3 = Vec3::new(0.0, 3.0, 5.0);
pub const CAMERA_LOOK_AT: Vec3 = Vec3::new(0.0, 0.0, -10.0);
pub const CAR_HOME: Vec3 = Vec3::new(0.0, 0.0, 2.0);

const ASPHALT: ColorHex = 0x333333;
const MARKING_WHITE: ColorHex = 0xFFFFFF;
const GRASS_GREEN: ColorHex = 0x2D5016;
const FOLIAGE_GREEN: ColorHex = 0x228B22;
const LAMP_GREY: ColorHex = 0x444444;
const ROCK_GREY: ColorHex = 0x808080;
const CLOUD_WHITE: ColorHex = 0xFFFFFF;
const MOUNTAIN_GREY: ColorHex = 0x666666;
const SUN_YELLOW: ColorHex = 0xFFFF00;
const PETAL_COLORS: [ColorHex; 5] = [0xFF69B4, 0xFFFF00, 0xFF6347, 0xFF00FF, 0x00BFFF];

const CAR_RED: ColorHex = 0xFF0000;
const CABIN_RED: ColorHex = 0xCC0000;
const TRIM_DARK: ColorHex = 0x333333;
const TIRE_BLACK: ColorHex = 0x1A1A1A;
const RIM_SILVER: ColorHex = 0xC0C0C0;
const VENT_GREY: ColorHex = 0x222222;
const HEADLIGHT_WHITE: ColorHex = 0xFFFFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneryKind {
    Road,
    LaneMarking,
    Grass,
    Tree,
    Building,
    StreetLamp,
    Rock,
    Flower,
    Cloud,
    Mountain,
    Sun,
}

/// How a pooled item comes back once it passes the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recycle {
    /// Move back by a fixed distance, keeping the spacing of the pool.
    WrapBy(f64),
    /// Jump to a fixed depth far ahead.
    ResetTo(f64),
    /// Never moves (sky and horizon).
    Static,
}

impl Recycle {
    /// Smallest depth an item can have after being recycled.
    pub fn reset_depth(self) -> f64 {
        match self {
            Self::WrapBy(distance) => LEADING_THRESHOLD - distance,
            Self::ResetTo(depth) => depth,
            Self::Static => f64::NEG_INFINITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneryItem {
    pub kind: SceneryKind,
    pub position: Vec3,
    /// Height in scene units.
    pub size: f64,
    pub color: ColorHex,
    pub recycle: Recycle,
}

impl SceneryItem {
    fn new(kind: SceneryKind, position: Vec3, size: f64, color: ColorHex, recycle: Recycle) -> Self {
        let mut item = Self {
            kind,
            position,
            size,
            color,
            recycle,
        };
        item.normalize_depth();
        item
    }

    /// Fold the initial depth into the item's recycling window so the pool
    /// starts out gap-free and in bounds.
    fn normalize_depth(&mut self) {
        if let Recycle::WrapBy(distance) = self.recycle {
            while self.position.z <= LEADING_THRESHOLD - distance {
                self.position.z += distance;
            }
        }
    }

    /// Move toward the camera, recycling once past the leading threshold.
    pub fn advance(&mut self, dz: f64) {
        if self.recycle == Recycle::Static {
            return;
        }
        self.position.z += dz;
        if self.position.z > LEADING_THRESHOLD {
            match self.recycle {
                Recycle::WrapBy(distance) => self.position.z -= distance,
                Recycle::ResetTo(depth) => self.position.z = depth,
                Recycle::Static => {}
            }
        }
    }
}

/// A bird circling a drifting orbit center.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub position: Vec3,
    pub orbit_center_x: f64,
    pub orbit_center_z: f64,
    pub orbit_radius: f64,
    pub orbit_angle: f64,
    /// Radians per frame.
    pub angular_speed: f64,
    pub wing_angle: f64,
    /// Current wing rotation; the right wing mirrors it.
    pub wing_flap: f64,
    /// Yaw, facing along the orbit.
    pub heading: f64,
}

impl Bird {
    fn new<R: Rng>(x: f64, y: f64, z: f64, rng: &mut R) -> Self {
        let mut bird = Self {
            position: Vec3::new(x, y, z),
            orbit_center_x: x,
            orbit_center_z: z,
            orbit_radius: 10.0 + rng.gen::<f64>() * 20.0,
            orbit_angle: rng.gen::<f64>() * TAU,
            angular_speed: 0.02 + rng.gen::<f64>() * 0.02,
            wing_angle: 0.0,
            wing_flap: 0.0,
            heading: 0.0,
        };
        bird.place_on_orbit();
        bird
    }

    fn place_on_orbit(&mut self) {
        self.position.x = self.orbit_center_x + self.orbit_angle.cos() * self.orbit_radius;
        self.position.z = self.orbit_center_z + self.orbit_angle.sin() * self.orbit_radius;
        self.heading = self.orbit_angle + FRAC_PI_2;
    }

    /// One frame of flapping and circling.
    pub fn animate(&mut self) {
        self.wing_angle += BIRD_WING_STEP;
        self.wing_flap = self.wing_angle.sin() * BIRD_FLAP_AMPLITUDE;
        self.orbit_angle += self.angular_speed;
        self.place_on_orbit();
    }

    /// Carry the orbit along with the road.
    pub fn drift(&mut self, dz: f64) {
        self.orbit_center_z += dz;
        if self.orbit_center_z > LEADING_THRESHOLD {
            self.orbit_center_z = BIRD_ORBIT_RESET_DEPTH;
        }
    }
}

/// All recycled and static scenery.
#[derive(Debug, Clone)]
pub struct World {
    /// Grass strips, wrapped by [`FAR_WRAP_DISTANCE`].
    pub far: Vec<SceneryItem>,
    /// Asphalt and lane markings, wrapped by [`NEAR_WRAP_DISTANCE`].
    pub near: Vec<SceneryItem>,
    /// Roadside decor with explicit reset depths.
    pub scenery: Vec<SceneryItem>,
    /// Clouds, mountains and the sun; never move.
    pub backdrop: Vec<SceneryItem>,
    pub birds: Vec<Bird>,
}

impl World {
    /// Lay out a fresh scene.
    pub fn build<R: Rng>(rng: &mut R) -> Self {
        let mut world = Self {
            far: Vec::new(),
            near: Vec::new(),
            scenery: Vec::new(),
            backdrop: Vec::new(),
            birds: Vec::new(),
        };
        world.lay_road();
        world.lay_grass();
        world.plant_trees(rng);
        world.place_backdrop(rng);
        world.raise_buildings(rng);
        world.line_street_lamps();
        world.scatter_ground_decor(rng);
        world.release_birds(rng);
        world
    }

    fn lay_road(&mut self) {
        let near = Recycle::WrapBy(NEAR_WRAP_DISTANCE);
        for i in 0..ROAD_SEGMENTS {
            let z = -(i as f64) * ROAD_SEGMENT_SPACING;
            self.near.push(SceneryItem::new(
                SceneryKind::Road,
                Vec3::new(0.0, 0.0, z),
                0.0,
                ASPHALT,
                near,
            ));
        }
        // Spread evenly over one wrap so recycling keeps the dash rhythm.
        let spacing = NEAR_WRAP_DISTANCE / LANE_MARKINGS as f64;
        for i in 0..LANE_MARKINGS {
            let z = -(i as f64) * spacing;
            self.near.push(SceneryItem::new(
                SceneryKind::LaneMarking,
                Vec3::new(0.0, 0.01, z),
                0.0,
                MARKING_WHITE,
                near,
            ));
        }
    }

    fn lay_grass(&mut self) {
        let far = Recycle::WrapBy(FAR_WRAP_DISTANCE);
        for i in 0..GRASS_STRIPS_PER_SIDE {
            let z = -(i as f64) * GRASS_SPACING;
            for x in [-GRASS_OFFSET_X, GRASS_OFFSET_X] {
                self.far.push(SceneryItem::new(
                    SceneryKind::Grass,
                    Vec3::new(x, 0.0, z),
                    0.0,
                    GRASS_GREEN,
                    far,
                ));
            }
        }
    }

    fn plant_trees<R: Rng>(&mut self, rng: &mut R) {
        let recycle = Recycle::ResetTo(TREE_RESET_DEPTH);
        for i in 0..TREE_ROWS {
            let z = -(i as f64) * 8.0;
            let left_x = -8.0 - rng.gen::<f64>() * 3.0;
            let left_z = z + rng.gen::<f64>() * 4.0;
            let right_x = 8.0 + rng.gen::<f64>() * 3.0;
            let right_z = z + rng.gen::<f64>() * 4.0;
            for (x, z) in [(left_x, left_z), (right_x, right_z)] {
                self.scenery.push(SceneryItem::new(
                    SceneryKind::Tree,
                    Vec3::new(x, 0.0, z),
                    4.8,
                    FOLIAGE_GREEN,
                    recycle,
                ));
            }
        }
    }

    fn place_backdrop<R: Rng>(&mut self, rng: &mut R) {
        for _ in 0..CLOUD_COUNT {
            let x = (rng.gen::<f64>() - 0.5) * 80.0;
            let y = 15.0 + rng.gen::<f64>() * 10.0;
            let z = -rng.gen::<f64>() * 100.0;
            self.backdrop.push(SceneryItem::new(
                SceneryKind::Cloud,
                Vec3::new(x, y, z),
                1.5,
                CLOUD_WHITE,
                Recycle::Static,
            ));
        }
        for _ in 0..MOUNTAIN_COUNT {
            let x = (rng.gen::<f64>() - 0.5) * 100.0;
            let z = -60.0 - rng.gen::<f64>() * 40.0;
            let height = 8.0 + rng.gen::<f64>() * 8.0;
            self.backdrop.push(SceneryItem::new(
                SceneryKind::Mountain,
                Vec3::new(x, 0.0, z),
                height,
                MOUNTAIN_GREY,
                Recycle::Static,
            ));
        }
        self.backdrop.push(SceneryItem::new(
            SceneryKind::Sun,
            Vec3::new(20.0, 30.0, -100.0),
            5.0,
            SUN_YELLOW,
            Recycle::Static,
        ));
    }

    fn raise_buildings<R: Rng>(&mut self, rng: &mut R) {
        let recycle = Recycle::ResetTo(BUILDING_RESET_DEPTH);
        for _ in 0..BUILDING_ROWS {
            let z = -rng.gen::<f64>() * 100.0;
            let left_x = -15.0 - rng.gen::<f64>() * 10.0;
            let right_x = 15.0 + rng.gen::<f64>() * 10.0;
            for x in [left_x, right_x] {
                let height = 5.0 + rng.gen::<f64>() * 10.0;
                let color = hsl_to_hex(rng.gen::<f64>(), 0.3, 0.5);
                self.scenery.push(SceneryItem::new(
                    SceneryKind::Building,
                    Vec3::new(x, height / 2.0, z),
                    height,
                    color,
                    recycle,
                ));
            }
        }
    }

    fn line_street_lamps(&mut self) {
        let recycle = Recycle::ResetTo(LAMP_RESET_DEPTH);
        for i in 0..LAMP_ROWS {
            let z = -(i as f64) * 6.0;
            for x in [-5.0, 5.0] {
                self.scenery.push(SceneryItem::new(
                    SceneryKind::StreetLamp,
                    Vec3::new(x, 0.0, z),
                    4.4,
                    LAMP_GREY,
                    recycle,
                ));
            }
        }
    }

    fn scatter_ground_decor<R: Rng>(&mut self, rng: &mut R) {
        let recycle = Recycle::ResetTo(GROUND_DECOR_RESET_DEPTH);
        for _ in 0..ROCK_COUNT {
            let z = -rng.gen::<f64>() * 100.0;
            let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            let x = side * (6.0 + rng.gen::<f64>() * 4.0);
            self.scenery.push(SceneryItem::new(
                SceneryKind::Rock,
                Vec3::new(x, 0.2, z),
                0.4,
                ROCK_GREY,
                recycle,
            ));
        }
        for _ in 0..FLOWER_COUNT {
            let z = -rng.gen::<f64>() * 100.0;
            let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            let x = side * (7.0 + rng.gen::<f64>() * 3.0);
            let color = PETAL_COLORS[rng.gen_range(0..PETAL_COLORS.len())];
            self.scenery.push(SceneryItem::new(
                SceneryKind::Flower,
                Vec3::new(x, 0.0, z),
                0.45,
                color,
                recycle,
            ));
        }
    }

    fn release_birds<R: Rng>(&mut self, rng: &mut R) {
        for _ in 0..BIRD_COUNT {
            let x = (rng.gen::<f64>() - 0.5) * 40.0;
            let y = 8.0 + rng.gen::<f64>() * 8.0;
            let z = -20.0 - rng.gen::<f64>() * 60.0;
            self.birds.push(Bird::new(x, y, z, rng));
        }
    }

    /// Every item that moves with the road.
    pub fn pooled(&self) -> impl Iterator<Item = &SceneryItem> {
        self.far.iter().chain(self.near.iter()).chain(self.scenery.iter())
    }

    pub fn pool_size(&self) -> usize {
        self.far.len() + self.near.len() + self.scenery.len()
    }

    /// Move every pooled item `dz` toward the camera.
    pub fn scroll(&mut self, dz: f64) {
        for item in self
            .far
            .iter_mut()
            .chain(self.near.iter_mut())
            .chain(self.scenery.iter_mut())
        {
            item.advance(dz);
        }
    }

    /// Flap and circle every bird; `drift` carries the orbits with the road.
    pub fn animate_birds(&mut self, drift: f64) {
        for bird in &mut self.birds {
            bird.animate();
            bird.drift(drift);
        }
    }
}

/// One body panel of the car.
#[derive(Debug, Clone, PartialEq)]
pub struct CarPart {
    pub name: &'static str,
    pub color: ColorHex,
    /// Color to return to after a flash.
    pub base_color: ColorHex,
    /// Tires, trim and glass keep their color during a flash.
    pub always_dark: bool,
}

impl CarPart {
    fn new(name: &'static str, color: ColorHex) -> Self {
        Self {
            name,
            color,
            base_color: color,
            always_dark: matches!(color, TIRE_BLACK | TRIM_DARK | RIM_SILVER),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub position: Vec3,
    pub parts: Vec<CarPart>,
}

impl Car {
    pub fn new() -> Self {
        let parts = vec![
            CarPart::new("body", CAR_RED),
            CarPart::new("lower body", CAR_RED),
            CarPart::new("cabin", CABIN_RED),
            CarPart::new("roof", CABIN_RED),
            CarPart::new("windows", TRIM_DARK),
            CarPart::new("front bumper", TRIM_DARK),
            CarPart::new("rear bumper", TRIM_DARK),
            CarPart::new("headlights", HEADLIGHT_WHITE),
            CarPart::new("taillights", CAR_RED),
            CarPart::new("mirrors", TRIM_DARK),
            CarPart::new("spoiler", CAR_RED),
            CarPart::new("tires", TIRE_BLACK),
            CarPart::new("rims", RIM_SILVER),
            CarPart::new("hub caps", CAR_RED),
            CarPart::new("hood vents", VENT_GREY),
        ];
        Self {
            position: CAR_HOME,
            parts,
        }
    }

    /// Paint every part except the dark ones.
    pub fn paint_flash(&mut self, color: ColorHex) {
        for part in self.parts.iter_mut().filter(|p| !p.always_dark) {
            part.color = color;
        }
    }

    pub fn restore_colors(&mut self) {
        for part in &mut self.parts {
            part.color = part.base_color;
        }
    }

    /// Color of the main body panel, used by the renderer.
    pub fn body_color(&self) -> ColorHex {
        self.parts.first().map(|p| p.color).unwrap_or(CAR_RED)
    }

    /// Current color of the named part; body color if there is no such part.
    pub fn part_color(&self, name: &str) -> ColorHex {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.color)
            .unwrap_or_else(|| self.body_color())
    }
}

impl Default for Car {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: CAMERA_HOME,
            look_at: CAMERA_LOOK_AT,
        }
    }
}

/// The parts of the scene that animations write to.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    pub car: Car,
    pub camera: Camera,
    pub obstacles: Vec<Obstacle>,
}

impl Stage {
    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn obstacle_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.obstacles.iter_mut().find(|o| o.id == id)
    }
}

/// HSL (all in 0..=1) to packed RGB.
fn hsl_to_hex(h: f64, s: f64, l: f64) -> ColorHex {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = (h.rem_euclid(1.0)) * 6.0;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    let (r, g, b) = match h6 as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u32;
    (channel(r) << 16) | (channel(g) << 8) | channel(b)
}

/// Angle of a full knockover spin, used by the renderer to pick a glyph.
pub fn spin_fraction(angle: f64) -> f64 {
    (angle / PI).rem_euclid(2.0) / 2.0
}
