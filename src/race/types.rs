//! Syllable Race data structures.
//!
//! The player drives down an endless road. Each round two syllables are
//! shown, one per lane; the player steers toward the one that was spoken.
//! A traffic cone then comes down the road: in the other lane after a
//! correct answer, in the chosen lane after a wrong one.
//!
//! Coordinates follow the scene: `x` is lateral (negative = left), `y` is
//! height and `z` is depth. The camera sits at `z = 5` looking toward
//! negative `z`; scrolling moves everything toward positive `z`.

use crate::syllables::{generate_different_syllable, generate_random_syllable, SyllableOrder};
use rand::Rng;

/// Speed at the start of a race. Speed never rises above this.
pub const INITIAL_SPEED: u32 = 100;
/// Speed lost per wrong answer.
pub const SPEED_PENALTY: u32 = 10;
/// Points per correct answer.
pub const SCORE_REWARD: u32 = 10;

/// Lateral distance of each lane from the road center.
pub const LANE_OFFSET: f64 = 2.0;
/// Car-to-cone lateral distance below which the car hits the cone.
pub const HIT_THRESHOLD: f64 = 1.5;
/// Depth range (exclusive) in which a cone is checked against the car.
pub const COLLISION_BAND_START: f64 = 0.5;
pub const COLLISION_BAND_END: f64 = 3.5;
/// Once the current cone is deeper than this the car recenters.
pub const OBSTACLE_EXIT_DEPTH: f64 = 3.0;
/// Cones deeper than this are removed from the scene.
pub const OBSTACLE_DISCARD_DEPTH: f64 = 5.0;
/// Where new cones appear.
pub const OBSTACLE_SPAWN_DEPTH: f64 = -15.0;
pub const OBSTACLE_HEIGHT: f64 = 0.6;

/// Pooled scenery past this depth has passed the camera and is recycled.
pub const LEADING_THRESHOLD: f64 = 20.0;

/// One simulation frame, ~60 FPS.
pub const FRAME_MS: u64 = 16;
/// Frame time is clamped so a stalled terminal does not fast-forward.
pub const MAX_FRAME_DT_MS: u64 = 100;
/// How long the controls hint stays on screen.
pub const INSTRUCTIONS_MS: u64 = 5000;

/// Packed 0xRRGGBB color.
pub type ColorHex = u32;

pub const CONE_ORANGE: ColorHex = 0xFF6600;
pub const HIT_RED: ColorHex = 0xFF0000;
pub const AVOIDED_GREEN: ColorHex = 0x00FF00;
pub const FLASH_YELLOW: ColorHex = 0xFFFF00;

/// Split a packed color into its channels.
pub fn rgb(color: ColorHex) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

/// Scene-space vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Left or right lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Lateral position of this lane.
    pub fn lane_x(self) -> f64 {
        match self {
            Self::Left => -LANE_OFFSET,
            Self::Right => LANE_OFFSET,
        }
    }
}

/// One round's prompt. Immutable; replaced wholesale each round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub correct_syllable: String,
    pub wrong_syllable: String,
    pub left_syllable: String,
    pub right_syllable: String,
    pub correct_side: Side,
}

impl Question {
    pub fn new(correct: String, wrong: String, correct_side: Side) -> Self {
        let (left_syllable, right_syllable) = match correct_side {
            Side::Left => (correct.clone(), wrong.clone()),
            Side::Right => (wrong.clone(), correct.clone()),
        };
        Self {
            correct_syllable: correct,
            wrong_syllable: wrong,
            left_syllable,
            right_syllable,
            correct_side,
        }
    }

    /// Random question. When `previous` is given, the new correct syllable
    /// differs from it.
    pub fn generate<R: Rng>(previous: Option<&str>, order: SyllableOrder, rng: &mut R) -> Self {
        let correct = match previous {
            Some(prev) => generate_different_syllable(prev, order, None, rng),
            None => generate_random_syllable(order, rng),
        };
        let wrong = generate_different_syllable(&correct, order, None, rng);
        let correct_side = if rng.gen_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };
        Self::new(correct, wrong, correct_side)
    }

    pub fn syllable_on(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_syllable,
            Side::Right => &self.right_syllable,
        }
    }

    pub fn is_correct(&self, side: Side) -> bool {
        side == self.correct_side
    }
}

/// Stable handle for a cone; survives removal of other cones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObstacleId(pub u64);

/// Collision outcome of a cone. Leaving `Approaching` happens exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleStatus {
    Approaching,
    Hit,
    Avoided,
}

/// A traffic cone on the road.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub side: Side,
    pub position: Vec3,
    pub rotation: Vec3,
    pub status: ObstacleStatus,
    pub color: ColorHex,
}

impl Obstacle {
    pub fn spawn(id: ObstacleId, side: Side) -> Self {
        Self {
            id,
            side,
            position: Vec3::new(side.lane_x(), OBSTACLE_HEIGHT, OBSTACLE_SPAWN_DEPTH),
            rotation: Vec3::default(),
            status: ObstacleStatus::Approaching,
            color: CONE_ORANGE,
        }
    }

    pub fn collision_handled(&self) -> bool {
        self.status != ObstacleStatus::Approaching
    }

    pub fn in_collision_band(&self) -> bool {
        self.position.z > COLLISION_BAND_START && self.position.z < COLLISION_BAND_END
    }
}

/// Where the current round is.
///
/// `has_answered`, `selected_side` and "current obstacle" of the session
/// are all read from here, so they cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    AwaitingAnswer,
    ObstacleInFlight { selected: Side, obstacle: ObstacleId },
    Recentering { selected: Side },
    GameOver { selected: Side },
}

/// Coarse phase shown to the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    Playing,
    GameOver,
}

/// Counters shown in the HUD and the game-over summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceStats {
    pub speed: u32,
    pub score: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
}

impl Default for RaceStats {
    fn default() -> Self {
        Self {
            speed: INITIAL_SPEED,
            score: 0,
            correct_answers: 0,
            total_questions: 0,
        }
    }
}

impl RaceStats {
    /// Percentage of correct answers, rounded; 0 before any answer.
    pub fn accuracy_percent(&self) -> u32 {
        if self.total_questions == 0 {
            return 0;
        }
        (self.correct_answers as f64 / self.total_questions as f64 * 100.0).round() as u32
    }

    /// Scene units travelled per frame.
    pub fn move_per_frame(&self) -> f64 {
        self.speed as f64 / 1000.0
    }
}

/// What a key press means during a race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceInput {
    Select(Side),
    Repeat,
    Menu,
    Other,
}

/// What the caller should do after input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceCommand {
    Continue,
    ReturnToMenu,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_side_lanes() {
        assert_eq!(Side::Left.lane_x(), -2.0);
        assert_eq!(Side::Right.lane_x(), 2.0);
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }

    #[test]
    fn test_question_layout() {
        let q = Question::new("ба".into(), "ко".into(), Side::Right);
        assert_eq!(q.left_syllable, "ко");
        assert_eq!(q.right_syllable, "ба");
        assert_eq!(q.syllable_on(Side::Right), "ба");
        assert!(q.is_correct(Side::Right));
        assert!(!q.is_correct(Side::Left));
    }

    #[test]
    fn test_generated_question_is_consistent() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut prev: Option<String> = None;
        for _ in 0..200 {
            let q = Question::generate(prev.as_deref(), SyllableOrder::Cv, &mut rng);
            assert_ne!(q.correct_syllable, q.wrong_syllable);
            assert_eq!(q.syllable_on(q.correct_side), q.correct_syllable);
            assert_eq!(q.syllable_on(q.correct_side.opposite()), q.wrong_syllable);
            if let Some(p) = &prev {
                assert_ne!(&q.correct_syllable, p);
            }
            prev = Some(q.correct_syllable.clone());
        }
    }

    #[test]
    fn test_obstacle_spawn() {
        let cone = Obstacle::spawn(ObstacleId(3), Side::Left);
        assert_eq!(cone.position, Vec3::new(-2.0, 0.6, -15.0));
        assert_eq!(cone.color, CONE_ORANGE);
        assert!(!cone.collision_handled());
        assert!(!cone.in_collision_band());
    }

    #[test]
    fn test_collision_band_is_exclusive() {
        let mut cone = Obstacle::spawn(ObstacleId(0), Side::Right);
        cone.position.z = 0.5;
        assert!(!cone.in_collision_band());
        cone.position.z = 0.6;
        assert!(cone.in_collision_band());
        cone.position.z = 3.5;
        assert!(!cone.in_collision_band());
    }

    #[test]
    fn test_accuracy() {
        let mut stats = RaceStats::default();
        assert_eq!(stats.accuracy_percent(), 0);
        stats.total_questions = 3;
        stats.correct_answers = 2;
        assert_eq!(stats.accuracy_percent(), 67);
        stats.correct_answers = 0;
        assert_eq!(stats.accuracy_percent(), 0);
    }

    #[test]
    fn test_move_per_frame() {
        let stats = RaceStats::default();
        assert!((stats.move_per_frame() - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rgb_split() {
        assert_eq!(rgb(CONE_ORANGE), (0xFF, 0x66, 0x00));
        assert_eq!(rgb(AVOIDED_GREEN), (0, 0xFF, 0));
    }
}
