//! The endless road: long drives keep every pooled item in its window.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slogi::race::scene::{Recycle, SceneryKind, World, NEAR_WRAP_DISTANCE};
use slogi::race::LEADING_THRESHOLD;

fn built_world(seed: u64) -> World {
    World::build(&mut ChaCha8Rng::seed_from_u64(seed))
}

#[test]
fn test_pool_stays_in_bounds_over_long_drive() {
    let mut world = built_world(11);
    let size = world.pool_size();

    // 20000 frames at full speed is 2000 scene units
    for _ in 0..20_000 {
        let before: Vec<f64> = world.pooled().map(|item| item.position.z).collect();
        world.scroll(0.1);
        assert_eq!(world.pool_size(), size);

        for (item, z_before) in world.pooled().zip(before) {
            assert!(item.position.z <= LEADING_THRESHOLD);
            if item.position.z < z_before {
                // Just recycled
                assert!(
                    item.position.z >= item.recycle.reset_depth() - 1e-9,
                    "{:?} recycled to {}",
                    item.kind,
                    item.position.z
                );
            }
        }
    }
}

fn marking_gaps(world: &World) -> Vec<f64> {
    let mut zs: Vec<f64> = world
        .near
        .iter()
        .filter(|i| i.kind == SceneryKind::LaneMarking)
        .map(|i| i.position.z)
        .collect();
    zs.sort_by(f64::total_cmp);
    zs.windows(2).map(|w| w[1] - w[0]).collect()
}

#[test]
fn test_lane_markings_keep_even_spacing() {
    let mut world = built_world(12);
    let expected = NEAR_WRAP_DISTANCE / 60.0;
    for _ in 0..5 {
        let gaps = marking_gaps(&world);
        assert_eq!(gaps.len(), 59);
        for gap in gaps {
            assert!((gap - expected).abs() < 1e-6, "gap {}", gap);
        }
        for _ in 0..1_000 {
            world.scroll(0.1);
        }
    }
}

#[test]
fn test_backdrop_never_moves() {
    let mut world = built_world(13);
    let before: Vec<f64> = world.backdrop.iter().map(|i| i.position.z).collect();
    for _ in 0..1_000 {
        world.scroll(0.1);
    }
    let after: Vec<f64> = world.backdrop.iter().map(|i| i.position.z).collect();
    assert_eq!(before, after);
    assert!(world
        .backdrop
        .iter()
        .all(|item| item.recycle == Recycle::Static));
}
