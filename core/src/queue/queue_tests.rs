//! Tests for the tooltip queue manager
//!
//! Covers overflow and flush behavior, slot routing, info refresh identity,
//! and the per-frame walk.

use chrono::{Duration, Local, NaiveDateTime};
use lingering_types::markup::remove_tags;
use lingering_types::{ConfigKey, FilterMode, Point, TooltipConfig, TooltipLocation};

use super::{Slot, TooltipQueue, offset_location};
use crate::config::MemoryConfigStore;
use crate::filter::{FilterEngine, FilterListUpdate, ListAction};
use crate::input::InputState;

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn ms(n: i64) -> Duration {
    Duration::milliseconds(n)
}

fn click() -> Option<Point> {
    Some(Point::new(200, 150))
}

fn submit(queue: &mut TooltipQueue, text: &str, config: &TooltipConfig, at: NaiveDateTime) -> bool {
    let filter = FilterEngine::new(config);
    queue
        .submit(text, click(), &InputState::default(), &filter, config, at)
        .created
}

fn texts(queue: &TooltipQueue) -> Vec<String> {
    queue.tooltips().map(|t| t.text.clone()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Overflow and flush
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_overflow_keeps_most_recent_after_flush() {
    let config = TooltipConfig {
        maximum_tooltips_shown: 1,
        ..Default::default()
    };
    let mut queue = TooltipQueue::new();
    let t0 = now();

    assert!(submit(&mut queue, "Examine Rock", &config, t0));
    assert!(submit(&mut queue, "Chop down Tree", &config, t0 + ms(10)));
    assert!(submit(&mut queue, "Talk-to Banker", &config, t0 + ms(20)));
    assert_eq!(queue.len(), 3, "overflow marks rather than removes");

    assert_eq!(queue.flush(), 2);
    assert_eq!(texts(&queue), vec!["Talk-to Banker"]);
}

#[test]
fn test_queue_never_exceeds_cap_after_flush() {
    for max in 1..=4u32 {
        let config = TooltipConfig {
            maximum_tooltips_shown: max,
            ..Default::default()
        };
        let mut queue = TooltipQueue::new();
        let t0 = now();
        for i in 0..10 {
            submit(&mut queue, &format!("Examine Rock {i}"), &config, t0 + ms(i));
            if i % 3 == 0 {
                queue.flush();
                assert!(queue.len() <= max as usize);
            }
        }
        queue.flush();
        assert_eq!(queue.len(), max as usize);
        assert_eq!(queue.tooltips().last().map(|t| t.text.as_str()), Some("Examine Rock 9"));
    }
}

#[test]
fn test_flush_is_idempotent() {
    let config = TooltipConfig {
        maximum_tooltips_shown: 1,
        ..Default::default()
    };
    let mut queue = TooltipQueue::new();
    let t0 = now();
    submit(&mut queue, "Examine Rock", &config, t0);
    submit(&mut queue, "Chop down Tree", &config, t0);

    assert_eq!(queue.flush(), 1);
    assert_eq!(queue.flush(), 0);
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_flush_leaves_info_and_fixed_alone() {
    let config = TooltipConfig {
        tooltip_location: TooltipLocation::Fixed,
        maximum_tooltips_shown: 0,
        ..Default::default()
    };
    let filter = FilterEngine::new(&config);
    let mut queue = TooltipQueue::new();
    let t0 = now();

    submit(&mut queue, "Examine Rock", &config, t0);
    queue.show_hide_mode(true, &filter, &config, t0);
    queue.flush();

    assert!(queue.fixed().is_some());
    assert!(queue.info().is_some());
    assert!(queue.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Filtering
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_blacklisted_text_never_queued() {
    let config = TooltipConfig {
        filter_mode: FilterMode::Blacklist,
        blacklist: "Examine Rock".to_string(),
        ..Default::default()
    };
    let mut queue = TooltipQueue::new();
    assert!(!submit(&mut queue, "Examine Rock", &config, now()));
    assert!(queue.is_empty());
    // The click is still the target for list edits
    assert_eq!(queue.last_tooltip_text(), Some("Examine Rock"));
    assert_eq!(queue.last_unfiltered_text(), None);
}

#[test]
fn test_empty_whitelist_queues_nothing() {
    let config = TooltipConfig {
        filter_mode: FilterMode::Whitelist,
        ..Default::default()
    };
    let mut queue = TooltipQueue::new();
    let t0 = now();
    for text in ["Examine Rock", "Chop down Tree", "Attack Goblin"] {
        assert!(!submit(&mut queue, text, &config, t0));
    }
    assert!(queue.is_empty());
}

#[test]
fn test_trivial_click_not_remembered() {
    let config = TooltipConfig::default();
    let mut queue = TooltipQueue::new();
    let t0 = now();
    submit(&mut queue, "Examine Rock", &config, t0);
    submit(&mut queue, "Cancel", &config, t0);
    assert_eq!(queue.last_tooltip_text(), Some("Examine Rock"));
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_blocked_click_is_consumed_and_annotated() {
    let config = TooltipConfig {
        filter_mode: FilterMode::Blacklist,
        blacklist: "Attack Goblin".to_string(),
        block_filtered_clicks: true,
        ..Default::default()
    };
    let filter = FilterEngine::new(&config);
    let mut queue = TooltipQueue::new();

    let outcome = queue.submit("Attack Goblin", click(), &InputState::default(), &filter, &config, now());
    assert!(outcome.consumed);
    assert!(outcome.created);
    let shown = queue.tooltips().next().map(|t| remove_tags(&t.text));
    assert_eq!(shown.as_deref(), Some("Blocked by Blacklist: Attack Goblin"));

    let ctrl = InputState {
        ctrl_pressed: true,
        ..Default::default()
    };
    let bypass = queue.submit("Attack Goblin", click(), &ctrl, &filter, &config, now());
    assert!(!bypass.consumed);
}

// ─────────────────────────────────────────────────────────────────────────────
// Slots and placement
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_fixed_slot_replaces_previous() {
    let config = TooltipConfig {
        tooltip_location: TooltipLocation::Fixed,
        ..Default::default()
    };
    let mut queue = TooltipQueue::new();
    let t0 = now();
    submit(&mut queue, "Examine Rock", &config, t0);
    submit(&mut queue, "Chop down Tree", &config, t0);

    assert!(queue.is_empty());
    let fixed = queue.fixed().map(|t| t.text.as_str());
    assert_eq!(fixed, Some("Chop down Tree"));
    assert_eq!(queue.fixed().and_then(|t| t.location), None);
}

#[test]
fn test_tick_sync_defers_until_tick() {
    let config = TooltipConfig {
        tick_sync_mode: true,
        ..Default::default()
    };
    let mut queue = TooltipQueue::new();
    let t0 = now();
    submit(&mut queue, "Examine Rock", &config, t0);
    submit(&mut queue, "Chop down Tree", &config, t0 + ms(5));

    assert!(queue.is_empty());
    assert_eq!(queue.tick_pending().map(|t| t.text.as_str()), Some("Chop down Tree"));

    let tick_at = t0 + ms(300);
    queue.tick(&config, tick_at);
    assert!(queue.tick_pending().is_none());
    let promoted = queue.tooltips().next().map(|t| (t.text.clone(), t.created_at()));
    assert_eq!(promoted, Some(("Chop down Tree".to_string(), tick_at)));

    // A tick with nothing pending does nothing
    queue.tick(&config, tick_at + ms(600));
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_offset_location_modes() {
    let mut config = TooltipConfig::default();
    assert_eq!(offset_location(click(), &config), Some(Point::new(200, 130)));
    assert_eq!(offset_location(None, &config), None);

    config.tooltip_location = TooltipLocation::Anchored;
    assert_eq!(offset_location(click(), &config), None);

    config.tooltip_location = TooltipLocation::Dynamic;
    config.tracker_mode = true;
    assert_eq!(offset_location(click(), &config), None);
}

#[test]
fn test_clear_respects_reposition_and_list_keys() {
    let config = TooltipConfig::default();
    let mut queue = TooltipQueue::new();
    let t0 = now();

    submit(&mut queue, "Examine Rock", &config, t0);
    queue.clear(ConfigKey::FixedLocation);
    assert_eq!(queue.len(), 1, "repositioning keeps live tooltips");
    assert_eq!(queue.last_tooltip_text(), None);

    submit(&mut queue, "Chop down Tree", &config, t0);
    queue.clear(ConfigKey::Blacklist);
    assert!(queue.is_empty());
    assert_eq!(queue.last_tooltip_text(), Some("Chop down Tree"));

    queue.clear(ConfigKey::TooltipDuration);
    assert_eq!(queue.last_tooltip_text(), None);
}

// ─────────────────────────────────────────────────────────────────────────────
// Info tooltips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_identical_info_refreshes_in_place() {
    let config = TooltipConfig::default();
    let filter = FilterEngine::new(&config);
    let mut queue = TooltipQueue::new();
    let t0 = now();

    let first = queue.show_hide_mode(true, &filter, &config, t0);
    let second = queue.show_hide_mode(true, &filter, &config, t0 + ms(900));
    assert_eq!(first, second);

    let third = queue.show_hide_mode(false, &filter, &config, t0 + ms(950));
    assert_ne!(second, third);
    assert_eq!(queue.last_info_text().map(remove_tags).as_deref(), Some("Tooltips SHOWN"));
}

#[test]
fn test_faded_info_comes_back_on_refresh() {
    let config = TooltipConfig::default();
    let filter = FilterEngine::new(&config);
    let input = InputState::default();
    let mut queue = TooltipQueue::new();
    let t0 = now();

    let id = queue.show_hide_mode(true, &filter, &config, t0);
    let late = t0 + ms(5000);
    assert!(queue.prepare_frame(&input, &config, late).items.is_empty());
    assert!(queue.info().is_some_and(|t| t.is_faded()));

    assert_eq!(queue.show_hide_mode(true, &filter, &config, late), id);
    assert!(queue.info().is_some_and(|t| !t.is_faded()));
}

#[test]
fn test_list_commit_adds_then_removes() {
    let mut config = TooltipConfig {
        filter_mode: FilterMode::Blacklist,
        ..Default::default()
    };
    let mut store = MemoryConfigStore::new(config.clone());
    let filter = FilterEngine::new(&config);
    let mut queue = TooltipQueue::new();
    let t0 = now();

    queue.submit("Examine Rock", click(), &InputState::default(), &filter, &config, t0);

    let added = queue.commit_list_update(&filter, &mut config, &mut store, t0 + ms(100));
    assert!(matches!(added, FilterListUpdate::Changed { action: ListAction::Add, .. }));
    assert_eq!(config.blacklist, "Examine Rock");
    assert_eq!(
        queue.last_info_text().map(remove_tags).as_deref(),
        Some("Blacklist ADDED Examine Rock")
    );

    let removed = queue.commit_list_update(&filter, &mut config, &mut store, t0 + ms(200));
    assert!(matches!(removed, FilterListUpdate::Changed { action: ListAction::Remove, .. }));
    assert_eq!(config.blacklist, "");
    assert_eq!(store.config().blacklist, "");
}

#[test]
fn test_commit_without_filter_mode() {
    let mut config = TooltipConfig::default();
    let mut store = MemoryConfigStore::default();
    let filter = FilterEngine::new(&config);
    let mut queue = TooltipQueue::new();
    let t0 = now();

    queue.submit("Examine Rock", click(), &InputState::default(), &filter, &config, t0);
    let update = queue.commit_list_update(&filter, &mut config, &mut store, t0);
    assert_eq!(update, FilterListUpdate::NoFilterMode);
    assert_eq!(
        queue.last_info_text().map(remove_tags).as_deref(),
        Some("No filter mode enabled")
    );
}

#[test]
fn test_commit_without_click_is_silent() {
    let mut config = TooltipConfig::default();
    let mut store = MemoryConfigStore::default();
    let filter = FilterEngine::new(&config);
    let mut queue = TooltipQueue::new();

    let update = queue.commit_list_update(&filter, &mut config, &mut store, now());
    assert_eq!(update, FilterListUpdate::Nothing);
    assert!(queue.info().is_none());
}

#[test]
fn test_peek_without_mode_skips_filtered_click() {
    let mut config = TooltipConfig::default();
    let mut store = MemoryConfigStore::default();
    let filter = FilterEngine::new(&config);
    let mut queue = TooltipQueue::new();
    let t0 = now();

    // Hidden clicks are remembered for list edits but never shown
    let hidden = InputState {
        hide_mode: true,
        ..Default::default()
    };
    queue.submit("Examine Rock", click(), &hidden, &filter, &config, t0);
    assert_eq!(queue.last_tooltip_text(), Some("Examine Rock"));

    assert!(queue.peek(&filter, &mut config, &mut store, t0).is_none());
    assert!(queue.info().is_none());
}

#[test]
fn test_peek_previews_or_shows_last_click() {
    let mut config = TooltipConfig::default();
    let mut store = MemoryConfigStore::default();
    let filter = FilterEngine::new(&config);
    let mut queue = TooltipQueue::new();
    let t0 = now();

    // Nothing clicked and no list to preview
    assert!(queue.peek(&filter, &mut config, &mut store, t0).is_none());
    assert!(queue.info().is_none());

    queue.submit("Examine Rock", click(), &InputState::default(), &filter, &config, t0);
    queue.peek(&filter, &mut config, &mut store, t0 + ms(10));
    assert_eq!(
        queue.last_info_text().map(remove_tags).as_deref(),
        Some("Last click: Examine Rock")
    );

    config.filter_mode = FilterMode::Whitelist;
    queue.peek(&filter, &mut config, &mut store, t0 + ms(20));
    assert_eq!(
        queue.last_info_text().map(remove_tags).as_deref(),
        Some("Whitelist ADD? Examine Rock")
    );
    assert_eq!(config.whitelist, "", "peek must not persist");
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-frame walk
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_frame_draws_capped_items_and_collects_faded() {
    let config = TooltipConfig {
        tooltip_duration_ms: 600,
        tooltip_fade_in_pct: 20,
        tooltip_fadeout_pct: 40,
        maximum_tooltips_shown: 2,
        ..Default::default()
    };
    let input = InputState::default();
    let mut queue = TooltipQueue::new();
    let t0 = now();

    submit(&mut queue, "Examine Rock", &config, t0);
    submit(&mut queue, "Chop down Tree", &config, t0 + ms(300));

    let frame = queue.prepare_frame(&input, &config, t0 + ms(480));
    let slots: Vec<Slot> = frame.items.iter().map(|i| i.slot).collect();
    assert_eq!(slots, vec![Slot::Queue(1), Slot::Queue(2)]);
    assert!((frame.items[0].opacity - 0.5).abs() < 1e-4);

    // First tooltip dies at 600ms; it is marked this frame, removed next frame
    let frame = queue.prepare_frame(&input, &config, t0 + ms(601));
    assert_eq!(frame.items.len(), 1);
    assert_eq!(queue.len(), 2);
    assert!(queue.tooltips().next().is_some_and(|t| t.is_faded()));

    let frame = queue.prepare_frame(&input, &config, t0 + ms(602));
    assert_eq!(frame.flushed, 1);
    assert_eq!(texts(&queue), vec!["Chop down Tree"]);
}

#[test]
fn test_hide_mode_only_shows_info() {
    let config = TooltipConfig::default();
    let filter = FilterEngine::new(&config);
    let mut queue = TooltipQueue::new();
    let t0 = now();

    submit(&mut queue, "Examine Rock", &config, t0);
    queue.show_hide_mode(true, &filter, &config, t0);

    let hidden = InputState {
        hide_mode: true,
        ..Default::default()
    };
    let frame = queue.prepare_frame(&hidden, &config, t0 + ms(500));
    let slots: Vec<Slot> = frame.items.iter().map(|i| i.slot).collect();
    assert_eq!(slots, vec![Slot::Info]);

    let holding = InputState {
        hide_mode: true,
        ctrl_pressed: true,
        ..Default::default()
    };
    let frame = queue.prepare_frame(&holding, &config, t0 + ms(500));
    assert_eq!(frame.items.len(), 2);
}

#[test]
fn test_permanent_mode_steps_opacity() {
    let config = TooltipConfig {
        permanent_tooltips: true,
        maximum_tooltips_shown: 4,
        ..Default::default()
    };
    let input = InputState::default();
    let mut queue = TooltipQueue::new();
    let t0 = now();
    for text in ["Examine Rock", "Chop down Tree", "Talk-to Banker", "Attack Goblin"] {
        submit(&mut queue, text, &config, t0);
    }

    let frame = queue.prepare_frame(&input, &config, t0 + ms(60_000));
    let opacities: Vec<f32> = frame.items.iter().map(|i| i.opacity).collect();
    assert_eq!(opacities, vec![0.25, 0.5, 0.75, 1.0]);
    assert!(queue.tooltips().all(|t| !t.is_faded()));
}

#[test]
fn test_clamp_recorded_once() {
    let config = TooltipConfig::default();
    let mut queue = TooltipQueue::new();
    submit(&mut queue, "Examine Rock", &config, now());

    let pending = queue.unclamped();
    assert_eq!(pending.len(), 1);
    let (id, _, location) = pending[0].clone();
    assert_eq!(location, Point::new(200, 130));

    queue.clamp(id, Point::new(180, 130));
    assert!(queue.unclamped().is_empty());
    assert_eq!(queue.tooltips().next().and_then(|t| t.location), Some(Point::new(180, 130)));
}
