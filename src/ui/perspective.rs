//! Pinhole projection of the race scene onto terminal cells.
//!
//! Terminal cells are roughly twice as tall as they are wide, so the
//! horizontal focal length is doubled to keep shapes square.

use crate::race::scene::Camera;
use crate::race::types::Vec3;
use ratatui::style::Color;

/// Vertical field of view, degrees.
const FOV_DEG: f64 = 75.0;
/// Horizontal stretch: a cell is about twice as tall as it is wide.
const CELL_ASPECT: f64 = 2.0;
/// Points closer than this to the camera plane are not drawn.
const NEAR_PLANE: f64 = 0.1;

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x - b.x, a.y - b.y, a.z - b.z)
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

fn normalize(v: Vec3) -> Vec3 {
    let len = dot(v, v).sqrt();
    if len == 0.0 {
        return Vec3::new(0.0, 0.0, -1.0);
    }
    Vec3::new(v.x / len, v.y / len, v.z / len)
}

/// A point on screen, in fractional cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub col: f64,
    pub row: f64,
    /// Distance along the view direction.
    pub depth: f64,
    /// Rows per scene unit at this depth.
    pub scale: f64,
}

/// Camera basis plus viewport size.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    origin: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    width: f64,
    height: f64,
    focal: f64,
}

impl Projector {
    pub fn new(camera: &Camera, width: u16, height: u16) -> Self {
        let forward = normalize(sub(camera.look_at, camera.position));
        let right = normalize(cross(forward, Vec3::new(0.0, 1.0, 0.0)));
        let up = cross(right, forward);
        let height = height.max(1) as f64;
        let focal = (height / 2.0) / (FOV_DEG.to_radians() / 2.0).tan();
        Self {
            origin: camera.position,
            forward,
            right,
            up,
            width: width.max(1) as f64,
            height,
            focal,
        }
    }

    /// Project a scene point. `None` if it is behind the camera.
    pub fn project(&self, point: Vec3) -> Option<ScreenPoint> {
        let d = sub(point, self.origin);
        let depth = dot(d, self.forward);
        if depth < NEAR_PLANE {
            return None;
        }
        let scale = self.focal / depth;
        Some(ScreenPoint {
            col: self.width / 2.0 + dot(d, self.right) * scale * CELL_ASPECT,
            row: self.height / 2.0 - dot(d, self.up) * scale,
            depth,
            scale,
        })
    }

    /// Where the ray through the center of cell (`col`, `row`) meets the
    /// ground plane `y = 0`. `None` at or above the horizon.
    pub fn ground_at(&self, col: f64, row: f64) -> Option<Vec3> {
        let u = (col - self.width / 2.0) / (self.focal * CELL_ASPECT);
        let v = (self.height / 2.0 - row) / self.focal;
        let dir = Vec3::new(
            self.forward.x + self.right.x * u + self.up.x * v,
            self.forward.y + self.right.y * u + self.up.y * v,
            self.forward.z + self.right.z * u + self.up.z * v,
        );
        if dir.y >= -1e-9 {
            return None;
        }
        let t = -self.origin.y / dir.y;
        Some(Vec3::new(
            self.origin.x + dir.x * t,
            0.0,
            self.origin.z + dir.z * t,
        ))
    }

    /// Screen row of the horizon, clamped to the viewport.
    pub fn horizon_row(&self) -> f64 {
        // A direction parallel to the ground projects onto the horizon
        let flat = normalize(Vec3::new(self.forward.x, 0.0, self.forward.z));
        let far = Vec3::new(
            self.origin.x + flat.x * 1e6,
            self.origin.y,
            self.origin.z + flat.z * 1e6,
        );
        self.project(far)
            .map(|p| p.row.clamp(0.0, self.height))
            .unwrap_or(0.0)
    }
}

/// Sky gradient, light at the horizon and deeper above.
pub fn sky_color(row: usize, horizon: usize) -> Color {
    let t = if horizon == 0 {
        1.0
    } else {
        row as f64 / horizon as f64
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    // 0x87CEEB at the top fading to a hazy 0xCFE8F3
    Color::Rgb(
        lerp(f64::from(0x87), f64::from(0xCF)),
        lerp(f64::from(0xCE), f64::from(0xE8)),
        lerp(f64::from(0xEB), f64::from(0xF3)),
    )
}

/// Grass shade banded by distance so motion reads as texture.
pub fn grass_color(z: f64) -> Color {
    if (z / 4.0).floor().rem_euclid(2.0) == 0.0 {
        Color::Rgb(0x2D, 0x50, 0x16)
    } else {
        Color::Rgb(0x36, 0x5E, 0x1C)
    }
}
