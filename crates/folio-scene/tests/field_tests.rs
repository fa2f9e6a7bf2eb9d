use folio_scene::{
    generate, FieldConfig, FrameInput, FrameScheduler, ParticleField, Pointer, SceneStyle,
    MAX_PARTICLES,
};
use folio_test_utils::{run_frames, seeded_rng};
use folio_theme::Theme;
use proptest::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

fn theme_strategy() -> impl Strategy<Value = Theme> {
    prop_oneof![Just(Theme::Dark), Just(Theme::Light)]
}

#[test]
fn test_buffer_lengths_match_count() {
    for theme in [Theme::Dark, Theme::Light] {
        let field = ParticleField::for_theme(theme, &mut seeded_rng(1));
        let set = field.particles();
        assert_eq!(set.position_buffer().len(), 3 * field.config().count);
        assert_eq!(set.color_buffer().len(), 3 * field.config().count);
    }
    assert!(FieldConfig::dark().count > FieldConfig::light().count);
}

#[test]
fn test_huge_count_is_capped() {
    let config = FieldConfig::light().with_raw_count(f64::MAX);
    assert_eq!(config.count, MAX_PARTICLES);
    assert_eq!(FieldConfig::light().with_raw_count(-1.0).count, 0);
}

#[test]
fn test_rotation_tracks_rate_times_elapsed() {
    for theme in [Theme::Dark, Theme::Light] {
        let mut field = ParticleField::for_theme(theme, &mut seeded_rng(5));
        let rate = field.config().motion.spin_rate;

        let mut last = field.orientation().y;
        for frame in 1..=600u64 {
            #[allow(clippy::cast_precision_loss)]
            let elapsed = frame as f32 / 60.0;
            field.update(&FrameInput::new(elapsed, frame, Pointer::CENTER));

            let y = field.orientation().y;
            assert!(y >= last, "rotation went backwards under {theme}");
            assert!((y - rate * elapsed).abs() < 1e-5);
            last = y;
        }
        assert!(last > 0.0);
    }
}

#[test]
fn test_run_frames_reports_elapsed() {
    let mut field = ParticleField::for_theme(Theme::Dark, &mut seeded_rng(6));
    let elapsed = run_frames(&mut field, 30, 0.5, Pointer::CENTER);
    assert!((elapsed - 15.0).abs() < 1e-4);
    assert_eq!(field.frames_rendered(), 30);
}

#[test]
fn test_scheduler_drives_field_until_cancelled() {
    let field = Arc::new(Mutex::new(ParticleField::for_theme(Theme::Light, &mut seeded_rng(2))));
    let frames = Arc::new(AtomicU64::new(0));

    let mut scheduler = FrameScheduler::new();
    let handle = {
        let field = Arc::clone(&field);
        let frames = Arc::clone(&frames);
        scheduler.on_frame(move |input| {
            field.lock().unwrap().update(input);
            frames.store(input.frame, Ordering::SeqCst);
        })
    };

    for _ in 0..10 {
        scheduler.tick(0.1, Pointer::new(0.5, 0.0));
    }
    assert_eq!(frames.load(Ordering::SeqCst), 10);
    let orientation = field.lock().unwrap().orientation();
    assert!((orientation.y - 0.025).abs() < 1e-5);
    assert!((orientation.z - 0.004).abs() < 1e-6);

    drop(handle);
    scheduler.tick(0.1, Pointer::CENTER);
    assert_eq!(frames.load(Ordering::SeqCst), 10);
    assert_eq!(field.lock().unwrap().frames_rendered(), 10);
}

#[test]
fn test_style_follows_theme() {
    let dark = SceneStyle::for_theme(Theme::Dark);
    let light = SceneStyle::for_theme(Theme::Light);
    assert!(dark.points.opacity > light.points.opacity);
}

proptest! {
    #[test]
    fn prop_positions_within_bounds(
        seed in any::<u64>(),
        theme in theme_strategy(),
        count in 0usize..400,
    ) {
        let config = FieldConfig::for_theme(theme).with_count(count);
        let set = generate(&config, &mut seeded_rng(seed));

        prop_assert_eq!(set.len(), count);
        for p in set.positions() {
            prop_assert!(config.bounds.contains(*p), "{:?} outside {:?}", p, config.bounds);
        }
    }

    #[test]
    fn prop_color_channels_in_unit_range(seed in any::<u64>(), theme in theme_strategy()) {
        let config = FieldConfig::for_theme(theme).with_count(256);
        let set = generate(&config, &mut seeded_rng(seed));

        for c in set.colors() {
            prop_assert!(c.iter().all(|v| (0.0..=1.0).contains(v)), "{:?}", c);
        }
    }
}
