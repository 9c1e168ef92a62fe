//! Integration test: generated towers and navigation over them

use beast_tower::content::starters::Starter;
use beast_tower::core::config::RunConfig;
use beast_tower::core::game_state::RunState;
use beast_tower::map::generation::generate_map;
use beast_tower::map::logic::{is_selectable, selectable_nodes};
use beast_tower::map::types::NodeCategory;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_new_run_opens_only_floor_one() {
    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = RunState::new(Starter::Grass, RunConfig::default(), &mut rng);
        let start = state.map.start().unwrap();

        for node in state.map.nodes() {
            let open_child = start.children.contains(&node.id);
            if node.category == NodeCategory::Start {
                assert!(!node.locked);
            } else {
                assert_eq!(node.locked, !open_child, "seed {seed} node {}", node.id);
            }
        }
        assert_eq!(
            selectable_nodes(&state.map, "start").len(),
            start.children.len()
        );
    }
}

#[test]
fn test_every_path_reaches_the_boss() {
    for seed in 0..100 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut map = generate_map(&RunConfig::default(), &mut rng);
        let mut current = "start".to_string();
        map.unlock_children(&current);

        // Always take the last open child
        for _ in 0..map.floor_count() {
            let Some(next) = selectable_nodes(&map, &current).last().map(|n| n.id.clone()) else {
                break;
            };
            map.mark_completed(&current);
            map.unlock_children(&next);
            current = next;
        }

        let end = map.get(&current).unwrap();
        assert_eq!(end.category, NodeCategory::Boss, "seed {seed}");
        assert_eq!(end.floor, 10);
    }
}

#[test]
fn test_selection_follows_declared_edges_only() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut map = generate_map(&RunConfig::default(), &mut rng);
    for node in map.nodes().to_vec() {
        map.unlock_children(&node.id);
    }

    for from in map.nodes() {
        for to in map.nodes() {
            assert_eq!(
                is_selectable(&map, &from.id, &to.id),
                from.children.contains(&to.id),
                "{} -> {}",
                from.id,
                to.id
            );
        }
    }
}

#[test]
fn test_event_share_on_combat_floors() {
    let config = RunConfig::default();
    let mut events = 0;
    let mut total = 0;

    for seed in 0..400 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let map = generate_map(&config, &mut rng);
        for floor in [1, 2, 5, 7, 8] {
            for node in map.floor(floor) {
                total += 1;
                if node.category == NodeCategory::Event {
                    events += 1;
                }
            }
        }
    }

    let share = events as f64 / total as f64;
    assert!((share - 0.3).abs() < 0.05, "event share {share}");
}

#[test]
fn test_custom_height() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let map = generate_map(&RunConfig::with_floors(6), &mut rng);
    assert_eq!(map.floor_count(), 6);
    assert!(map.floor(5).all(|n| n.category == NodeCategory::Boss));
    assert!(map.floor(4).all(|n| n.category == NodeCategory::Elite));
}
