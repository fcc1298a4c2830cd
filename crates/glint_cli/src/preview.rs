//! Headless effect previews
//!
//! Each preview drives a real effect against in-memory host surfaces and
//! reports what the host would have seen.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use glint_animation::{Clock, ManualScheduler, MonotonicClock, MIN_INTERVAL_MS};
use glint_core::Event;
use glint_effects::{
    ClickSpark, ClickSparkConfig, DecryptedText, DecryptedTextConfig, GradualBlur,
    GradualBlurConfig, OverlayStack,
};
use glint_paint::PaintContext;

/// How scramble ticks are paced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pace {
    /// Advance time instantly, one interval per frame
    Simulated,
    /// Sleep between ticks against a wall clock
    Realtime,
}

/// Simulate one click at (`x`, `y`) and describe `frames` rendered frames
pub fn spark_frames(
    config: &ClickSparkConfig,
    x: f32,
    y: f32,
    frame_ms: f64,
    frames: u32,
) -> Vec<String> {
    let scheduler = Rc::new(RefCell::new(ManualScheduler::new()));
    let canvas = Rc::new(RefCell::new(PaintContext::new(x * 2.0, y * 2.0)));
    let mut spark = ClickSpark::attach(canvas.clone(), config.clone(), scheduler.clone());
    spark.handle_event(&Event::click(0, x, y, 0.0));

    let mut out = Vec::new();
    for frame in 0..frames {
        let now = frame as f64 * frame_ms;
        let ticks = scheduler.borrow_mut().advance_to(now);
        for tick in ticks {
            spark.on_frame(tick);
        }

        let canvas = canvas.borrow();
        out.push(format!(
            "frame {frame} t={now:.0}ms sparks={}",
            spark.sparks().len()
        ));
        out.extend(canvas.lines().map(|(from, to)| {
            format!(
                "  ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                from.x, from.y, to.x, to.y
            )
        }));
    }

    spark.destroy();
    out
}

/// Run a scramble over `text` until it settles, emitting every frame
pub fn play_text(
    text: &str,
    config: &DecryptedTextConfig,
    seed: Option<u64>,
    pace: Pace,
    mut emit: impl FnMut(&str),
) {
    let scheduler = Rc::new(RefCell::new(ManualScheduler::new()));
    let node = Rc::new(RefCell::new(text.to_string()));
    let mut effect = DecryptedText::attach(node.clone(), config.clone(), scheduler.clone());
    if let Some(seed) = seed {
        effect = effect.with_seed(seed);
    }

    let period_ms = if config.speed_ms >= MIN_INTERVAL_MS {
        config.speed_ms
    } else {
        MIN_INTERVAL_MS
    };
    let clock = MonotonicClock::new();

    effect.start();
    while effect.is_animating() {
        let ticks = match pace {
            Pace::Simulated => scheduler.borrow_mut().advance_by(period_ms),
            Pace::Realtime => {
                thread::sleep(Duration::from_secs_f64(period_ms / 1000.0));
                scheduler.borrow_mut().advance_to(clock.now())
            }
        };
        for tick in ticks {
            if effect.on_tick(tick) {
                emit(&node.borrow());
            }
        }
    }
}

/// Collect every frame of a simulated scramble
pub fn text_frames(text: &str, config: &DecryptedTextConfig, seed: Option<u64>) -> Vec<String> {
    let mut frames = Vec::new();
    play_text(text, config, seed, Pace::Simulated, |frame| {
        frames.push(frame.to_string())
    });
    frames
}

/// Describe the overlay container and each layer as CSS declarations
pub fn blur_report(config: &GradualBlurConfig) -> Vec<String> {
    let blur: GradualBlur<OverlayStack> = GradualBlur::new(config.clone());
    let overlay = blur.overlay();

    let mut out = vec![format!(".{} {{", overlay.class_name.replace(' ', "."))];
    out.extend(
        overlay
            .container_style()
            .into_iter()
            .map(|(property, value)| format!("  {property}: {value};")),
    );
    out.push("}".to_string());

    for (i, layer) in blur.layers().iter().enumerate() {
        out.push(format!("layer {} {{", i + 1));
        out.extend(
            layer
                .style(overlay.opacity)
                .into_iter()
                .map(|(property, value)| format!("  {property}: {value};")),
        );
        out.push("}".to_string());
    }
    out
}
