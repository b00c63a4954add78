//! Whole races driven through the public API: answer, tick until the next
//! question, repeat.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slogi::race::{
    handle_answer, process_input, start_race, step_frame, tick_race, Clock, ManualClock,
    Obstacle, ObstacleId, ObstacleStatus, RaceCommand, RaceInput, RacePhase, RaceSession,
    RoundState, Side, FRAME_MS,
};
use slogi::speech::RecordingSpeaker;
use slogi::syllables::SyllableOrder;

/// A round never needs more frames than this at any speed above zero.
const ROUND_FRAME_LIMIT: usize = 5000;

fn started_race(seed: u64) -> (RaceSession, ChaCha8Rng, RecordingSpeaker) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut speaker = RecordingSpeaker::default();
    let session = start_race(SyllableOrder::Cv, 0, &mut rng, &mut speaker);
    (session, rng, speaker)
}

/// Answer, then run frames until the race waits for the next answer or ends.
fn play_round(
    session: &mut RaceSession,
    rng: &mut ChaCha8Rng,
    speaker: &mut RecordingSpeaker,
    correct: bool,
) {
    let side = if correct {
        session.question.correct_side
    } else {
        session.question.correct_side.opposite()
    };
    assert!(handle_answer(session, side));
    for _ in 0..ROUND_FRAME_LIMIT {
        if matches!(
            session.round,
            RoundState::AwaitingAnswer | RoundState::GameOver { .. }
        ) {
            return;
        }
        step_frame(session, rng, speaker);
    }
    panic!("round did not finish: {:?}", session.round);
}

// ── Scoring ──

#[test]
fn test_three_correct_answers() {
    let (mut session, mut rng, mut speaker) = started_race(1);
    for _ in 0..3 {
        play_round(&mut session, &mut rng, &mut speaker, true);
    }
    assert_eq!(session.stats.score, 30);
    assert_eq!(session.stats.correct_answers, 3);
    assert_eq!(session.stats.total_questions, 3);
    assert_eq!(session.stats.speed, 100);
    assert_eq!(session.stats.accuracy_percent(), 100);
    // First syllable plus one per new question
    assert_eq!(speaker.spoken.len(), 4);
}

#[test]
fn test_consecutive_questions_differ() {
    let (mut session, mut rng, mut speaker) = started_race(2);
    for _ in 0..5 {
        play_round(&mut session, &mut rng, &mut speaker, true);
    }
    for pair in speaker.spoken.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn test_wrong_answers_end_the_race() {
    let (mut session, mut rng, mut speaker) = started_race(3);
    session.stats.speed = 20;

    play_round(&mut session, &mut rng, &mut speaker, false);
    assert_eq!(session.stats.speed, 10);
    assert_eq!(session.phase(), RacePhase::Playing);

    play_round(&mut session, &mut rng, &mut speaker, false);
    assert_eq!(session.stats.speed, 0);
    assert_eq!(session.phase(), RacePhase::GameOver);
    assert_eq!(session.stats.accuracy_percent(), 0);
    assert_eq!(session.stats.total_questions, 2);
}

#[test]
fn test_speed_never_negative() {
    let (mut session, _, _) = started_race(4);
    session.stats.speed = 5;
    let wrong = session.question.correct_side.opposite();
    handle_answer(&mut session, wrong);
    assert_eq!(session.stats.speed, 0);
    assert_eq!(session.phase(), RacePhase::GameOver);
}

#[test]
fn test_answer_counts_once_per_round() {
    let (mut session, _, _) = started_race(5);
    let side = session.question.correct_side;
    assert!(handle_answer(&mut session, side));
    assert!(!handle_answer(&mut session, side));
    assert!(!handle_answer(&mut session, side.opposite()));
    assert_eq!(session.stats.total_questions, 1);
    assert_eq!(session.stats.score, 10);
}

// ── Collisions ──

#[test]
fn test_cone_in_other_lane_is_avoided() {
    let (mut session, mut rng, mut speaker) = started_race(6);
    let mut cone = Obstacle::spawn(ObstacleId(99), Side::Right);
    cone.position.z = 0.45;
    session.stage.obstacles.push(cone);

    step_frame(&mut session, &mut rng, &mut speaker);
    let cone = session.stage.obstacle(ObstacleId(99)).unwrap();
    assert_eq!(cone.status, ObstacleStatus::Avoided);
}

#[test]
fn test_wrong_answer_hits_cone() {
    let (mut session, mut rng, mut speaker) = started_race(7);
    let wrong = session.question.correct_side.opposite();
    handle_answer(&mut session, wrong);
    let RoundState::ObstacleInFlight { obstacle, .. } = session.round else {
        panic!("expected a cone in flight");
    };

    let mut status = ObstacleStatus::Approaching;
    for _ in 0..ROUND_FRAME_LIMIT {
        step_frame(&mut session, &mut rng, &mut speaker);
        match session.stage.obstacle(obstacle) {
            Some(cone) if cone.status != ObstacleStatus::Approaching => {
                status = cone.status;
                break;
            }
            _ => {}
        }
    }
    assert_eq!(status, ObstacleStatus::Hit);
}

// ── Input and time ──

#[test]
fn test_game_over_keys() {
    let (mut session, _, mut speaker) = started_race(8);
    session.stats.speed = 10;
    let wrong = session.question.correct_side.opposite();
    handle_answer(&mut session, wrong);
    let spoken = speaker.spoken.len();

    assert_eq!(
        process_input(&mut session, RaceInput::Repeat, &mut speaker),
        RaceCommand::Continue
    );
    assert_eq!(
        process_input(&mut session, RaceInput::Select(Side::Left), &mut speaker),
        RaceCommand::Continue
    );
    assert_eq!(speaker.spoken.len(), spoken);
    assert_eq!(
        process_input(&mut session, RaceInput::Other, &mut speaker),
        RaceCommand::ReturnToMenu
    );
}

#[test]
fn test_tick_runs_whole_frames() {
    let (mut session, mut rng, mut speaker) = started_race(9);
    let clock = ManualClock::new(0);
    for _ in 0..100 {
        clock.advance(7);
        tick_race(&mut session, clock.now_ms(), &mut rng, &mut speaker);
    }
    assert_eq!(session.now_ms, 700 / FRAME_MS * FRAME_MS);
}
