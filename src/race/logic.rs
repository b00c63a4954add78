//! Syllable Race logic: answers, the per-frame step and round advancement.

use super::scene::{Stage, World};
use super::tween::{SlidePurpose, TweenTarget, Tweens};
use super::types::*;
use crate::speech::Speaker;
use crate::syllables::SyllableOrder;
use rand::Rng;

/// Everything one race owns. Dropped (after [`RaceSession::teardown`]) when
/// the player leaves.
#[derive(Debug, Clone)]
pub struct RaceSession {
    pub world: World,
    pub stage: Stage,
    pub tweens: Tweens,
    pub stats: RaceStats,
    pub round: RoundState,
    pub question: Question,
    pub order: SyllableOrder,
    /// Simulation time; advances in whole frames.
    pub now_ms: u64,
    pub started_ms: u64,
    next_obstacle_id: u64,
    last_tick_ms: u64,
    accumulated_time_ms: u64,
}

impl RaceSession {
    /// Build the world and the first question. Nothing is spoken yet; see
    /// [`start_race`].
    pub fn new<R: Rng>(order: SyllableOrder, now_ms: u64, rng: &mut R) -> Self {
        let world = World::build(rng);
        let question = Question::generate(None, order, rng);
        Self {
            world,
            stage: Stage::default(),
            tweens: Tweens::new(),
            stats: RaceStats::default(),
            round: RoundState::AwaitingAnswer,
            question,
            order,
            now_ms,
            started_ms: now_ms,
            next_obstacle_id: 0,
            last_tick_ms: now_ms,
            accumulated_time_ms: 0,
        }
    }

    pub fn phase(&self) -> RacePhase {
        match self.round {
            RoundState::GameOver { .. } => RacePhase::GameOver,
            _ => RacePhase::Playing,
        }
    }

    pub fn has_answered(&self) -> bool {
        self.round != RoundState::AwaitingAnswer
    }

    pub fn selected_side(&self) -> Option<Side> {
        match self.round {
            RoundState::AwaitingAnswer => None,
            RoundState::ObstacleInFlight { selected, .. }
            | RoundState::Recentering { selected }
            | RoundState::GameOver { selected } => Some(selected),
        }
    }

    /// The cone whose exit triggers the recenter, if one is in flight.
    pub fn current_obstacle(&self) -> Option<&Obstacle> {
        match self.round {
            RoundState::ObstacleInFlight { obstacle, .. } => self.stage.obstacle(obstacle),
            _ => None,
        }
    }

    pub fn instructions_visible(&self) -> bool {
        self.now_ms.saturating_sub(self.started_ms) < INSTRUCTIONS_MS
    }

    /// Cancel every running effect and remove every cone.
    pub fn teardown(&mut self) {
        self.tweens.clear();
        self.stage.obstacles.clear();
    }

    fn spawn_obstacle(&mut self, side: Side) -> ObstacleId {
        let id = ObstacleId(self.next_obstacle_id);
        self.next_obstacle_id += 1;
        self.stage.obstacles.push(Obstacle::spawn(id, side));
        id
    }
}

/// Build a race and announce its first syllable.
pub fn start_race<R: Rng>(
    order: SyllableOrder,
    now_ms: u64,
    rng: &mut R,
    speaker: &mut dyn Speaker,
) -> RaceSession {
    let session = RaceSession::new(order, now_ms, rng);
    log::info!("race started ({})", order.label());
    speaker.speak(&session.question.correct_syllable);
    session
}

/// Process a key press.
pub fn process_input(
    session: &mut RaceSession,
    input: RaceInput,
    speaker: &mut dyn Speaker,
) -> RaceCommand {
    if session.phase() == RacePhase::GameOver {
        // Only leaving is possible on the summary screen
        return match input {
            RaceInput::Menu | RaceInput::Other => RaceCommand::ReturnToMenu,
            _ => RaceCommand::Continue,
        };
    }

    match input {
        RaceInput::Select(side) => {
            handle_answer(session, side);
        }
        RaceInput::Repeat => speaker.speak(&session.question.correct_syllable),
        RaceInput::Menu => return RaceCommand::ReturnToMenu,
        RaceInput::Other => {}
    }
    RaceCommand::Continue
}

/// Record an answer. Returns false (and changes nothing) unless the round
/// is waiting for one.
pub fn handle_answer(session: &mut RaceSession, side: Side) -> bool {
    if session.round != RoundState::AwaitingAnswer {
        return false;
    }

    let stats = &mut session.stats;
    stats.total_questions += 1;
    let correct = session.question.is_correct(side);

    let obstacle_side = if correct {
        stats.correct_answers += 1;
        stats.score += SCORE_REWARD;
        side.opposite()
    } else {
        stats.speed = stats.speed.saturating_sub(SPEED_PENALTY);
        side
    };
    log::debug!(
        "answer {:?} for {:?}: {} (speed {}, score {})",
        side,
        session.question.correct_syllable,
        if correct { "correct" } else { "wrong" },
        stats.speed,
        stats.score
    );

    let obstacle = session.spawn_obstacle(obstacle_side);
    session.tweens.slide_car(
        session.now_ms,
        &mut session.stage,
        side.lane_x(),
        SlidePurpose::Answer,
    );

    session.round = if session.stats.speed == 0 {
        log::info!(
            "race over: score {}, {}/{} correct",
            session.stats.score,
            session.stats.correct_answers,
            session.stats.total_questions
        );
        RoundState::GameOver { selected: side }
    } else {
        RoundState::ObstacleInFlight {
            selected: side,
            obstacle,
        }
    };
    true
}

/// Advance the race to `now_ms`.
///
/// Steps the simulation in fixed 16ms frames; time since the previous call
/// is clamped so a stalled terminal does not fast-forward. Returns true if
/// at least one frame ran.
pub fn tick_race<R: Rng>(
    session: &mut RaceSession,
    now_ms: u64,
    rng: &mut R,
    speaker: &mut dyn Speaker,
) -> bool {
    let dt_ms = now_ms.saturating_sub(session.last_tick_ms).min(MAX_FRAME_DT_MS);
    session.last_tick_ms = now_ms.max(session.last_tick_ms);
    session.accumulated_time_ms += dt_ms;

    let mut changed = false;
    while session.accumulated_time_ms >= FRAME_MS {
        session.accumulated_time_ms -= FRAME_MS;
        step_frame(session, rng, speaker);
        changed = true;
    }
    changed
}

/// One simulation frame.
pub fn step_frame<R: Rng>(session: &mut RaceSession, rng: &mut R, speaker: &mut dyn Speaker) {
    session.now_ms += FRAME_MS;
    let now = session.now_ms;
    let step = session.stats.move_per_frame();
    let moving = session.phase() == RacePhase::Playing && session.stats.speed > 0;

    session
        .world
        .animate_birds(if moving { step } else { 0.0 });
    if moving {
        session.world.scroll(step);
    }

    for cone in &mut session.stage.obstacles {
        cone.position.z += step;
    }

    check_collisions(session);
    check_current_obstacle_exit(session);

    session
        .stage
        .obstacles
        .retain(|cone| cone.position.z <= OBSTACLE_DISCARD_DEPTH);

    let finished = session.tweens.advance(now, &mut session.stage, rng);
    let recentered = finished.iter().any(|t| {
        matches!(
            t,
            TweenTarget::CarSlide {
                purpose: SlidePurpose::Recenter,
                ..
            }
        )
    });
    if recentered {
        if let RoundState::Recentering { .. } = session.round {
            next_question(session, rng, speaker);
        }
    }
}

/// Resolve hit or avoid for cones entering the collision band. Each cone
/// is judged once.
fn check_collisions(session: &mut RaceSession) {
    let car_x = session.stage.car.position.x;
    let mut hits = Vec::new();
    let mut dodged = Vec::new();

    for cone in &mut session.stage.obstacles {
        if cone.collision_handled() || !cone.in_collision_band() {
            continue;
        }
        if (car_x - cone.position.x).abs() < HIT_THRESHOLD {
            cone.status = ObstacleStatus::Hit;
            hits.push(cone.id);
        } else {
            cone.status = ObstacleStatus::Avoided;
            dodged.push(cone.id);
        }
    }

    let now = session.now_ms;
    let stage = &mut session.stage;
    let tweens = &mut session.tweens;
    for id in hits {
        log::debug!("cone {} hit", id.0);
        tweens.knock_over(now, stage, id);
        tweens.shake_camera(now, stage);
        tweens.flash_car(now, stage);
        tweens.bounce_car(now, stage);
    }
    for id in dodged {
        log::debug!("cone {} avoided", id.0);
        tweens.flash_cone(now, stage, id);
    }
}

/// Once the current cone has passed the car, steer back to the center.
fn check_current_obstacle_exit(session: &mut RaceSession) {
    let RoundState::ObstacleInFlight { selected, obstacle } = session.round else {
        return;
    };
    let passed = session
        .stage
        .obstacle(obstacle)
        .map_or(true, |cone| cone.position.z > OBSTACLE_EXIT_DEPTH);
    if passed {
        session.round = RoundState::Recentering { selected };
        session
            .tweens
            .slide_car(session.now_ms, &mut session.stage, 0.0, SlidePurpose::Recenter);
    }
}

fn next_question<R: Rng>(session: &mut RaceSession, rng: &mut R, speaker: &mut dyn Speaker) {
    let previous = session.question.correct_syllable.clone();
    session.question = Question::generate(Some(&previous), session.order, rng);
    session.round = RoundState::AwaitingAnswer;
    speaker.speak(&session.question.correct_syllable);
}
