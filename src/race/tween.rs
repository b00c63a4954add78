//! Timed visual effects.
//!
//! Every effect is an entry in one registry: a start time, a duration, an
//! easing and the thing it animates. The race advances the registry once
//! per frame; effects run side by side and finish independently. Each
//! effect writes its exact end state on its last frame, and
//! [`Tweens::clear`] drops them all when the race is torn down.

use super::scene::Stage;
use super::types::{
    ColorHex, ObstacleId, Vec3, AVOIDED_GREEN, CONE_ORANGE, FLASH_YELLOW, HIT_RED,
};
use rand::Rng;
use std::f64::consts::{PI, TAU};

pub const KNOCKOVER_MS: u64 = 600;
pub const CAMERA_SHAKE_MS: u64 = 300;
pub const CAR_FLASH_MS: u64 = 200;
pub const CAR_BOUNCE_MS: u64 = 200;
pub const CAR_SLIDE_MS: u64 = 500;
pub const CONE_FLASH_MS: u64 = 300;

const KNOCKOVER_SPIN_X: f64 = TAU;
const KNOCKOVER_SPIN_Z: f64 = PI * 1.5;
const KNOCKOVER_THROW: f64 = 3.0;
const KNOCKOVER_HOP: f64 = 1.5;
const SHAKE_AMPLITUDE: f64 = 0.15;
const BOUNCE_HEIGHT: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// `1 - (1 - p)^3`: fast start, gentle stop.
    CubicOut,
    /// Nothing visible until the end.
    Hold,
}

impl Easing {
    pub fn apply(self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => p,
            Self::CubicOut => 1.0 - (1.0 - p).powi(3),
            Self::Hold => {
                if p >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Why the car is sliding sideways.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlidePurpose {
    /// Steering into the chosen lane after an answer.
    Answer,
    /// Returning to the road center once the cone has passed.
    Recenter,
}

/// What an effect animates, with the values captured when it started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    Knockover {
        obstacle: ObstacleId,
        start_position: Vec3,
        start_rotation: Vec3,
        /// +1 throws the cone right, -1 left.
        direction: f64,
    },
    CameraShake {
        origin: Vec3,
    },
    CarFlash,
    ConeFlash {
        obstacle: ObstacleId,
        restore: ColorHex,
    },
    CarBounce {
        base_y: f64,
    },
    CarSlide {
        from: f64,
        to: f64,
        purpose: SlidePurpose,
    },
}

impl TweenTarget {
    fn same_kind(&self, other: &TweenTarget) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
    pub target: TweenTarget,
}

impl Tween {
    /// `min(elapsed / duration, 1)`.
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f64 / self.duration_ms as f64).min(1.0)
    }

    fn apply<R: Rng>(&self, progress: f64, stage: &mut Stage, rng: &mut R) {
        let eased = self.easing.apply(progress);
        let done = progress >= 1.0;

        match self.target {
            TweenTarget::Knockover {
                obstacle,
                start_position,
                start_rotation,
                direction,
            } => {
                // Cone may already have been discarded behind the camera.
                let Some(cone) = stage.obstacle_mut(obstacle) else {
                    return;
                };
                cone.rotation.x = start_rotation.x + KNOCKOVER_SPIN_X * eased;
                cone.rotation.z = start_rotation.z + KNOCKOVER_SPIN_Z * eased;
                cone.position.x = start_position.x + direction * KNOCKOVER_THROW * eased;
                cone.position.y = if done {
                    start_position.y
                } else {
                    start_position.y + (progress * PI).sin() * KNOCKOVER_HOP
                };
            }
            TweenTarget::CameraShake { origin } => {
                if done {
                    stage.camera.position = origin;
                } else {
                    let intensity = (1.0 - progress) * SHAKE_AMPLITUDE;
                    stage.camera.position.x = origin.x + (rng.gen::<f64>() - 0.5) * intensity;
                    stage.camera.position.y = origin.y + (rng.gen::<f64>() - 0.5) * intensity;
                }
            }
            TweenTarget::CarFlash => {
                if done {
                    stage.car.restore_colors();
                }
            }
            TweenTarget::ConeFlash { obstacle, restore } => {
                if done {
                    if let Some(cone) = stage.obstacle_mut(obstacle) {
                        cone.color = restore;
                    }
                }
            }
            TweenTarget::CarBounce { base_y } => {
                stage.car.position.y = if done {
                    base_y
                } else {
                    base_y + (progress * TAU).sin() * BOUNCE_HEIGHT
                };
            }
            TweenTarget::CarSlide { from, to, .. } => {
                stage.car.position.x = if done { to } else { from + (to - from) * eased };
            }
        }
    }
}

/// Registry of running effects.
#[derive(Debug, Clone, Default)]
pub struct Tweens {
    active: Vec<Tween>,
}

impl Tweens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// True if an effect matching `pred` is running.
    pub fn any(&self, pred: impl Fn(&TweenTarget) -> bool) -> bool {
        self.active.iter().any(|t| pred(&t.target))
    }

    /// Drop every effect without finishing it.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Register an effect starting at `now_ms`.
    pub fn start(
        &mut self,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
        target: TweenTarget,
    ) {
        self.active.push(Tween {
            start_ms: now_ms,
            duration_ms,
            easing,
            target,
        });
    }

    /// Remove running effects of the same kind as `target`, returning them.
    fn take_same_kind(&mut self, target: &TweenTarget) -> Vec<Tween> {
        let (taken, kept): (Vec<Tween>, Vec<Tween>) = self
            .active
            .drain(..)
            .partition(|t| t.target.same_kind(target));
        self.active = kept;
        taken
    }

    /// Advance every effect to `now_ms`. Finished effects are removed and
    /// their targets returned in start order.
    pub fn advance<R: Rng>(&mut self, now_ms: u64, stage: &mut Stage, rng: &mut R) -> Vec<TweenTarget> {
        let mut finished = Vec::new();
        self.active.retain(|tween| {
            let progress = tween.progress(now_ms);
            tween.apply(progress, stage, rng);
            if progress >= 1.0 {
                finished.push(tween.target);
                false
            } else {
                true
            }
        });
        finished
    }

    /// Send a hit cone spinning away from the car and paint it red.
    pub fn knock_over(&mut self, now_ms: u64, stage: &mut Stage, obstacle: ObstacleId) {
        let car_x = stage.car.position.x;
        let Some(cone) = stage.obstacle_mut(obstacle) else {
            return;
        };
        cone.color = HIT_RED;
        let direction = if car_x < cone.position.x { 1.0 } else { -1.0 };
        let target = TweenTarget::Knockover {
            obstacle,
            start_position: cone.position,
            start_rotation: cone.rotation,
            direction,
        };
        self.start(now_ms, KNOCKOVER_MS, Easing::CubicOut, target);
    }

    /// Jitter the camera. A shake already in progress is settled first so
    /// the new one starts from the true resting position.
    pub fn shake_camera(&mut self, now_ms: u64, stage: &mut Stage) {
        let kind = TweenTarget::CameraShake {
            origin: stage.camera.position,
        };
        for old in self.take_same_kind(&kind) {
            if let TweenTarget::CameraShake { origin } = old.target {
                stage.camera.position = origin;
            }
        }
        let target = TweenTarget::CameraShake {
            origin: stage.camera.position,
        };
        self.start(now_ms, CAMERA_SHAKE_MS, Easing::Linear, target);
    }

    /// Paint the car yellow; colors come back after [`CAR_FLASH_MS`].
    pub fn flash_car(&mut self, now_ms: u64, stage: &mut Stage) {
        self.take_same_kind(&TweenTarget::CarFlash);
        stage.car.paint_flash(FLASH_YELLOW);
        self.start(now_ms, CAR_FLASH_MS, Easing::Hold, TweenTarget::CarFlash);
    }

    /// Hop the car twice.
    pub fn bounce_car(&mut self, now_ms: u64, stage: &mut Stage) {
        let kind = TweenTarget::CarBounce { base_y: 0.0 };
        for old in self.take_same_kind(&kind) {
            if let TweenTarget::CarBounce { base_y } = old.target {
                stage.car.position.y = base_y;
            }
        }
        let target = TweenTarget::CarBounce {
            base_y: stage.car.position.y,
        };
        self.start(now_ms, CAR_BOUNCE_MS, Easing::Linear, target);
    }

    /// Turn a dodged cone green; it returns to orange after [`CONE_FLASH_MS`].
    pub fn flash_cone(&mut self, now_ms: u64, stage: &mut Stage, obstacle: ObstacleId) {
        let Some(cone) = stage.obstacle_mut(obstacle) else {
            return;
        };
        cone.color = AVOIDED_GREEN;
        let target = TweenTarget::ConeFlash {
            obstacle,
            restore: CONE_ORANGE,
        };
        self.start(now_ms, CONE_FLASH_MS, Easing::Hold, target);
    }

    /// Slide the car sideways to `to`. Replaces any slide in progress,
    /// starting from wherever the car is now.
    pub fn slide_car(&mut self, now_ms: u64, stage: &mut Stage, to: f64, purpose: SlidePurpose) {
        let target = TweenTarget::CarSlide {
            from: stage.car.position.x,
            to,
            purpose,
        };
        self.take_same_kind(&target);
        self.start(now_ms, CAR_SLIDE_MS, Easing::Linear, target);
    }
}
