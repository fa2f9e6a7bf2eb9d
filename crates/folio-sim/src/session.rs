//! Subcommand implementations

use crate::cli::RunArgs;
use crate::page;
use anyhow::{Context, Result};
use folio_core::{FolioConfig, PortfolioRuntime, RuntimeStatus};
use folio_reveal::VisibilityTracker;
use folio_scene::{Pointer, SceneStyle};
use folio_theme::{DarkModeController, JsonFileStore, MemoryStore};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Final report of a `run`
#[derive(Debug, Serialize)]
pub(crate) struct RunReport {
    #[serde(flatten)]
    pub(crate) status: RuntimeStatus,
    pub(crate) centroid: Option<[f32; 3]>,
    pub(crate) style: SceneStyle,
}

impl RunReport {
    pub(crate) fn render_text(&self) -> String {
        let s = &self.status;
        let mut out = String::new();
        out.push_str("Folio Run Report\n");
        out.push_str("================\n");
        out.push_str(&format!("Theme:       {}\n", s.theme));
        out.push_str(&format!("Frames:      {}\n", s.frame));
        out.push_str(&format!("Elapsed:     {:.3}s\n", s.elapsed));
        out.push_str(&format!("Particles:   {}\n", s.particles));
        out.push_str(&format!(
            "Orientation: x={:.5} y={:.5} z={:.5}\n",
            s.orientation.x, s.orientation.y, s.orientation.z
        ));
        if let Some(c) = self.centroid {
            out.push_str(&format!("Centroid:    ({:.3}, {:.3}, {:.3})\n", c[0], c[1], c[2]));
        }
        out.push_str(&format!("Lights:      {}\n", self.style.lights.len()));
        out.push_str(&format!("Tracker:     {:?}\n", s.tracker));
        out.push_str(&format!("Visible:     {}\n", s.visible.join(", ")));
        out
    }
}

/// Animate the field and report where it ended up
pub(crate) async fn run(mut config: FolioConfig, args: RunArgs) -> Result<RunReport> {
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(theme) = args.theme {
        config = config.with_default_theme(theme.into());
    }

    let dt = args.dt.unwrap_or_else(|| config.frame.frame_seconds());
    let viewport_height = 800.0;
    let reveal = config.reveal;

    let mut runtime = PortfolioRuntime::new(config, MemoryStore::new(), |options| {
        page::connect(options, viewport_height)
    });
    for (i, (id, _)) in page::SECTIONS.iter().enumerate() {
        runtime.register(*id, page::section_node(i));
    }
    runtime.set_pointer(args.pointer.unwrap_or(Pointer::CENTER));

    tracing::info!(
        "Running {} frames at dt={}s (threshold {})",
        args.frames,
        dt,
        reveal.threshold
    );

    if args.realtime {
        let pace = if dt > 0.0 && dt.is_finite() {
            Duration::from_secs_f32(dt)
        } else {
            runtime.config().frame.interval()
        };
        let mut interval = tokio::time::interval(pace);
        for _ in 0..args.frames {
            interval.tick().await;
            runtime.tick(dt);
        }
    } else {
        for _ in 0..args.frames {
            runtime.tick(dt);
        }
    }

    let centroid = runtime.field().lock().particles().centroid();
    let report = RunReport {
        status: runtime.status(),
        centroid,
        style: runtime.style(),
    };
    runtime.shutdown();

    Ok(report)
}

/// Flip the persisted flag; returns the new theme name
pub(crate) fn toggle(path: &Path) -> Result<String> {
    let store = JsonFileStore::open(path)
        .with_context(|| format!("opening preference store {}", path.display()))?;

    let mut controller = DarkModeController::load(store);
    let theme = controller.toggle();

    Ok(format!(
        "{} (root class: \"{}\")",
        theme,
        controller.root_classes().to_attribute()
    ))
}

/// One line per scroll offset, each section as `+id[classes]` or `-id[classes]`
pub(crate) fn reveal(config: &FolioConfig, viewport_height: f32, offsets: &[f32]) -> Vec<String> {
    let mut tracker = VisibilityTracker::mount(config.reveal, |options| {
        page::connect(options, viewport_height)
    });
    for (i, (id, _)) in page::SECTIONS.iter().enumerate() {
        tracker.register(*id, page::section_node(i));
    }

    let mut lines = Vec::with_capacity(offsets.len());
    for &offset in offsets {
        if let Some(observer) = tracker.facility_mut() {
            observer.scroll_to(offset);
        }
        tracker.pump();

        let states: Vec<String> = page::SECTIONS
            .iter()
            .map(|(id, _)| {
                let transition = page::transition_for(id);
                let mark = if tracker.is_visible(id) { "+" } else { "-" };
                format!("{mark}{id}[{}]", tracker.class_for(id, &transition))
            })
            .collect();
        lines.push(format!("scroll={offset:>6.0} {}", states.join(" ")));
    }

    tracker.teardown();
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ThemeArg;
    use pretty_assertions::assert_eq;

    fn args(frames: u64) -> RunArgs {
        RunArgs {
            frames,
            seed: Some(7),
            theme: Some(ThemeArg::Light),
            dt: Some(0.5),
            pointer: None,
            json: false,
            realtime: false,
        }
    }

    #[tokio::test]
    async fn run_reports_final_state() {
        let report = run(FolioConfig::new(), args(4)).await.unwrap();
        assert_eq!(report.status.frame, 4);
        assert_eq!(report.status.particles, 3000);
        assert!((report.status.elapsed - 2.0).abs() < 1e-9);
        assert!(report.status.visible.contains(&"hero".to_string()));
        assert!(report.render_text().contains("Theme:       light"));
    }

    #[test]
    fn reveal_scrolls_sections_in() {
        let lines = reveal(&FolioConfig::new(), 800.0, &[0.0, 3900.0]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("+hero[opacity-100 translate-y-0]"));
        assert!(lines[0].contains("-contact[opacity-0 translate-x-20]"));
        assert!(lines[1].contains("+contact[opacity-100 translate-x-0]"));
        assert!(lines[1].contains("-hero"));
    }

    #[test]
    fn toggle_flips_file_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        assert!(toggle(&path).unwrap().starts_with("light"));
        assert!(toggle(&path).unwrap().starts_with("dark"));
    }
}
