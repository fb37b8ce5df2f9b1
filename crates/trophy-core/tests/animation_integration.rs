//! Integration tests for the points animation queue on a simulated clock.

use std::collections::HashMap;

use trophy_core::points::{AnimationId, PointsColor};
use trophy_core::{AnimationConfig, AnimationQueue, ManualClock, TriggerOptions, TrophyConfig};

fn queue() -> (AnimationQueue<ManualClock>, ManualClock) {
    let clock = ManualClock::new(0);
    (AnimationQueue::with_clock(AnimationConfig::default(), clock.clone()), clock)
}

#[test]
fn test_burst_of_triggers_keeps_latest_ten() {
    let (mut queue, clock) = queue();
    let ids: Vec<AnimationId> = (1..=12)
        .map(|i| {
            clock.advance(10);
            queue.trigger(i as f64 * 10.0, TriggerOptions::default())
        })
        .collect();

    assert_eq!(queue.len(), 10);
    let shown: Vec<String> = queue.items().map(|item| item.display_value()).collect();
    assert_eq!(shown.first().map(String::as_str), Some("+30"));
    assert_eq!(shown.last().map(String::as_str), Some("+120"));

    // Evicted items complete silently; every survivor completes exactly once.
    let mut completions: HashMap<AnimationId, usize> = HashMap::new();
    for _ in 0..20 {
        clock.advance(100);
        queue.tick(|id| *completions.entry(*id).or_default() += 1);
    }
    assert!(queue.is_empty());
    assert_eq!(completions.len(), 10);
    assert!(completions.values().all(|&n| n == 1));
    assert!(!completions.contains_key(&ids[0]));
    assert!(!completions.contains_key(&ids[1]));
}

#[test]
fn test_single_item_lifecycle() {
    let (mut queue, clock) = queue();
    let id = queue.trigger(50.0, TriggerOptions::default());
    assert_eq!(queue.next_expiry_ms(), Some(1000));

    let mut completed = Vec::new();
    clock.set(999);
    queue.tick(|id| completed.push(*id));
    assert!(completed.is_empty());

    clock.set(1000);
    queue.tick(|id| completed.push(*id));
    assert_eq!(completed, [id]);

    clock.set(10_000);
    queue.tick(|id| completed.push(*id));
    assert_eq!(completed.len(), 1);
}

#[test]
fn test_per_item_duration_override() {
    let (mut queue, clock) = queue();
    let short = queue.trigger(
        5.0,
        TriggerOptions {
            duration_ms: Some(200),
            ..Default::default()
        },
    );
    let long = queue.trigger(5.0, TriggerOptions::default());

    clock.advance(200);
    let mut done = Vec::new();
    queue.tick(|id| done.push(*id));
    assert_eq!(done, [short]);
    assert!(queue.contains(&long));
}

#[test]
fn test_queue_from_loaded_config() {
    let config = TrophyConfig::from_toml_str(
        r#"
        [animation]
        max_items = 2
        duration_ms = 500
        suffix = " XP"
        color = "purple"
        "#,
    )
    .unwrap();

    let clock = ManualClock::new(0);
    let mut queue = AnimationQueue::with_clock(config.animation, clock.clone());
    for value in [1.0, 2.0, 3.0] {
        queue.trigger(value, TriggerOptions::default());
    }
    assert_eq!(queue.len(), 2);

    let first = queue.items().next().unwrap();
    assert_eq!(first.display_value(), "+2 XP");
    assert_eq!(first.color, PointsColor::Purple);

    clock.advance(500);
    assert_eq!(queue.tick(|_| {}), 2);
}
