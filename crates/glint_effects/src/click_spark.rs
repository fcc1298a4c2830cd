//! Click sparks
//!
//! Each click emits a ring of short line segments that fly outward from the
//! click point and shrink as they travel. Once attached the effect renders on
//! every host frame until it is stopped, whether or not any spark is alive.

use std::f32::consts::TAU;

use glint_animation::{Curve, Scheduler, Tick, TickHandle};
use glint_core::events::event_types;
use glint_core::{Event, EventData};
use glint_paint::{Canvas, Color, Point, StrokeStyle};

use crate::config::ClickSparkConfig;

/// One radial particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spark {
    pub origin: Point,
    /// Direction of travel in radians
    pub angle: f32,
    /// Host timestamp (ms) of the click that created it
    pub start_time: f64,
}

/// The line a spark draws in one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkSegment {
    pub start: Point,
    pub end: Point,
}

/// Resolved per-spark motion parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkMotion {
    pub size: f32,
    pub radius: f32,
    pub count: u32,
    pub duration_ms: f64,
    pub easing: Curve,
    pub extra_scale: f32,
}

impl SparkMotion {
    pub fn from_config(config: &ClickSparkConfig) -> Self {
        Self {
            size: config.spark_size,
            radius: config.spark_radius,
            count: config.spark_count,
            duration_ms: config.duration_ms,
            easing: config.easing,
            extra_scale: config.extra_scale,
        }
    }

    /// The segment for `spark` at `timestamp`, or `None` once it has expired
    ///
    /// A NaN elapsed time or duration counts as expired. Timestamps before
    /// the spark's start clamp to its first frame.
    pub fn segment(&self, spark: &Spark, timestamp: f64) -> Option<SparkSegment> {
        let elapsed = timestamp - spark.start_time;
        if elapsed.is_nan() {
            return None;
        }
        let elapsed = elapsed.max(0.0);
        if !(elapsed < self.duration_ms) {
            return None;
        }

        let progress = (elapsed / self.duration_ms) as f32;
        let eased = self.easing.apply(progress);
        let distance = eased * self.radius * self.extra_scale;
        let line_length = self.size * (1.0 - eased);

        Some(SparkSegment {
            start: spark.origin.offset_polar(spark.angle, distance),
            end: spark.origin.offset_polar(spark.angle, distance + line_length),
        })
    }
}

/// Click-triggered spark burst drawn on a host canvas
///
/// The effect owns its canvas and its scheduler handle. Dropping it cancels
/// the pending frame and detaches the canvas.
pub struct ClickSpark<C: Canvas, S: Scheduler> {
    motion: SparkMotion,
    stroke: StrokeStyle,
    sparks: Vec<Spark>,
    canvas: Option<C>,
    scheduler: S,
    frame: Option<TickHandle>,
}

impl<C: Canvas, S: Scheduler> ClickSpark<C, S> {
    /// Take over `canvas` and start the render loop
    pub fn attach(canvas: C, config: ClickSparkConfig, mut scheduler: S) -> Self {
        let color = Color::parse(&config.spark_color).unwrap_or_else(|| {
            tracing::warn!(
                "Invalid spark color '{}', using {}",
                config.spark_color,
                Color::CYAN.to_hex_string()
            );
            Color::CYAN
        });
        let motion = SparkMotion::from_config(&config);
        tracing::debug!(
            count = motion.count,
            duration_ms = motion.duration_ms,
            easing = motion.easing.name(),
            "click spark attached"
        );

        let frame = Some(scheduler.request_frame());
        Self {
            motion,
            stroke: StrokeStyle::new(color, config.line_width),
            sparks: Vec::new(),
            canvas: Some(canvas),
            scheduler,
            frame,
        }
    }

    pub fn motion(&self) -> &SparkMotion {
        &self.motion
    }

    pub fn stroke(&self) -> &StrokeStyle {
        &self.stroke
    }

    /// Live sparks, oldest first
    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Emit `count` sparks evenly spaced around `origin`
    pub fn trigger(&mut self, origin: Point, timestamp: f64) {
        let count = self.motion.count;
        self.sparks.extend((0..count).map(|i| Spark {
            origin,
            angle: TAU * i as f32 / count as f32,
            start_time: timestamp,
        }));
        tracing::trace!(x = origin.x, y = origin.y, count, "sparks triggered");
    }

    /// Clear the canvas, drop expired sparks, and draw the rest
    ///
    /// Returns the number of sparks drawn.
    pub fn advance_and_render(&mut self, timestamp: f64) -> usize {
        let Some(canvas) = self.canvas.as_mut() else {
            return 0;
        };
        let motion = &self.motion;
        let stroke = &self.stroke;

        canvas.clear();
        self.sparks
            .retain(|spark| match motion.segment(spark, timestamp) {
                Some(segment) => {
                    canvas.stroke_line(segment.start, segment.end, stroke);
                    true
                }
                None => false,
            });
        self.sparks.len()
    }

    /// Render one host frame and request the next. Returns false for ticks
    /// that do not belong to the current loop.
    pub fn on_frame(&mut self, tick: Tick) -> bool {
        if self.frame != Some(tick.handle) {
            return false;
        }
        self.advance_and_render(tick.timestamp);
        self.frame = Some(self.scheduler.request_frame());
        true
    }

    /// Clicks trigger sparks; resizes resize the canvas
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.is_running() {
            return false;
        }
        match (event.event_type, &event.data) {
            (event_types::CLICK, _) => match event.position() {
                Some((x, y)) => {
                    self.trigger(Point::new(x, y), event.timestamp);
                    true
                }
                None => false,
            },
            (event_types::RESIZE, EventData::Resize { width, height }) => {
                if let Some(canvas) = self.canvas.as_mut() {
                    canvas.resize(*width, *height);
                }
                true
            }
            _ => false,
        }
    }

    /// Cancel the render loop and detach the canvas. Idempotent.
    pub fn stop(&mut self) {
        if let Some(frame) = self.frame.take() {
            self.scheduler.cancel(frame);
            tracing::debug!("click spark stopped");
        }
        self.sparks.clear();
        if let Some(mut canvas) = self.canvas.take() {
            canvas.detach();
        }
    }

    pub fn destroy(&mut self) {
        self.stop();
    }
}

impl<C: Canvas, S: Scheduler> Drop for ClickSpark<C, S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_animation::ManualScheduler;
    use glint_paint::PaintContext;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn approx(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-4
    }

    fn spark_at(angle: f32) -> Spark {
        Spark {
            origin: Point::new(50.0, 50.0),
            angle,
            start_time: 1000.0,
        }
    }

    #[test]
    fn segment_at_birth_is_full_length_at_origin() {
        let motion = SparkMotion::from_config(&ClickSparkConfig::default());
        let segment = motion.segment(&spark_at(0.0), 1000.0).unwrap();
        assert!(approx(segment.start, Point::new(50.0, 50.0)));
        assert!(approx(segment.end, Point::new(60.0, 50.0)));
    }

    #[test]
    fn segment_midway_follows_easing() {
        let config = ClickSparkConfig {
            easing: Curve::Linear,
            ..Default::default()
        };
        let motion = SparkMotion::from_config(&config);
        // progress 0.5: distance 7.5, line length 5
        let segment = motion.segment(&spark_at(0.0), 1200.0).unwrap();
        assert!(approx(segment.start, Point::new(57.5, 50.0)));
        assert!(approx(segment.end, Point::new(62.5, 50.0)));

        // default ease-out: eased 0.75, distance 11.25, line length 2.5
        let motion = SparkMotion::from_config(&ClickSparkConfig::default());
        let segment = motion.segment(&spark_at(0.0), 1200.0).unwrap();
        assert!(approx(segment.start, Point::new(61.25, 50.0)));
        assert!(approx(segment.end, Point::new(63.75, 50.0)));
    }

    #[test]
    fn extra_scale_stretches_travel() {
        let config = ClickSparkConfig {
            easing: Curve::Linear,
            extra_scale: 2.0,
            ..Default::default()
        };
        let motion = SparkMotion::from_config(&config);
        let segment = motion.segment(&spark_at(0.0), 1200.0).unwrap();
        assert!(approx(segment.start, Point::new(65.0, 50.0)));
    }

    #[test]
    fn segment_expires_at_duration() {
        let motion = SparkMotion::from_config(&ClickSparkConfig::default());
        assert!(motion.segment(&spark_at(0.0), 1399.9).is_some());
        assert!(motion.segment(&spark_at(0.0), 1400.0).is_none());
    }

    #[test]
    fn non_positive_duration_expires_immediately() {
        let config = ClickSparkConfig {
            duration_ms: 0.0,
            ..Default::default()
        };
        let motion = SparkMotion::from_config(&config);
        assert!(motion.segment(&spark_at(0.0), 1000.0).is_none());
    }

    #[test]
    fn nan_start_time_expires() {
        let motion = SparkMotion::from_config(&ClickSparkConfig::default());
        let spark = Spark {
            start_time: f64::NAN,
            ..spark_at(0.0)
        };
        assert!(motion.segment(&spark, 10.0).is_none());
        assert!(motion.segment(&spark_at(0.0), f64::NAN).is_none());
    }

    #[test]
    fn nan_sparks_are_dropped_on_render() {
        let mut spark = ClickSpark::attach(
            PaintContext::new(100.0, 100.0),
            ClickSparkConfig::default(),
            ManualScheduler::new(),
        );
        spark.trigger(Point::new(10.0, 10.0), f64::NAN);
        assert_eq!(spark.advance_and_render(10.0), 0);
        assert!(spark.sparks().is_empty());
    }

    #[test]
    fn time_before_start_clamps_to_first_frame() {
        let motion = SparkMotion::from_config(&ClickSparkConfig::default());
        assert_eq!(
            motion.segment(&spark_at(0.0), 900.0),
            motion.segment(&spark_at(0.0), 1000.0)
        );
    }

    #[test]
    fn trigger_spaces_angles_evenly() {
        let mut spark = ClickSpark::attach(
            PaintContext::new(100.0, 100.0),
            ClickSparkConfig {
                spark_count: 4,
                ..Default::default()
            },
            ManualScheduler::new(),
        );
        spark.trigger(Point::new(10.0, 20.0), 5.0);

        let angles: Vec<f32> = spark.sparks().iter().map(|s| s.angle).collect();
        let expected = [0.0, TAU / 4.0, TAU / 2.0, 3.0 * TAU / 4.0];
        for (angle, expected) in angles.iter().zip(expected) {
            assert!((angle - expected).abs() < 1e-6);
        }
        assert!(spark
            .sparks()
            .iter()
            .all(|s| s.origin == Point::new(10.0, 20.0) && s.start_time == 5.0));
    }

    #[test]
    fn click_event_triggers_at_pointer() {
        let mut spark = ClickSpark::attach(
            PaintContext::new(100.0, 100.0),
            ClickSparkConfig::default(),
            ManualScheduler::new(),
        );
        assert!(spark.handle_event(&Event::click(1, 30.0, 40.0, 12.0)));
        assert_eq!(spark.sparks().len(), 8);
        assert!(spark
            .sparks()
            .iter()
            .all(|s| s.origin == Point::new(30.0, 40.0) && s.start_time == 12.0));

        assert!(!spark.handle_event(&Event::pointer_enter(1, 13.0)));
    }

    #[test]
    fn zero_count_adds_nothing() {
        let mut spark = ClickSpark::attach(
            PaintContext::default(),
            ClickSparkConfig {
                spark_count: 0,
                ..Default::default()
            },
            ManualScheduler::new(),
        );
        spark.trigger(Point::ZERO, 0.0);
        assert!(spark.sparks().is_empty());
    }

    #[test]
    fn css_colors_are_accepted() {
        for (css, rgba) in [
            ("red", [255, 0, 0, 255]),
            ("rgb(0, 128, 255)", [0, 128, 255, 255]),
            ("rgba(255, 255, 255, 0.5)", [255, 255, 255, 128]),
            ("#f0a", [255, 0, 170, 255]),
        ] {
            let spark = ClickSpark::attach(
                PaintContext::default(),
                ClickSparkConfig {
                    spark_color: css.to_string(),
                    ..Default::default()
                },
                ManualScheduler::new(),
            );
            assert_eq!(spark.stroke().color.to_rgba8(), rgba, "{css}");
        }
    }

    #[test]
    fn invalid_color_falls_back_to_cyan() {
        let spark = ClickSpark::attach(
            PaintContext::default(),
            ClickSparkConfig {
                spark_color: "not-a-color".to_string(),
                ..Default::default()
            },
            ManualScheduler::new(),
        );
        assert_eq!(spark.stroke().color, Color::CYAN);
        assert_eq!(spark.stroke().width, 2.0);
    }

    #[test]
    fn frames_do_not_accumulate() {
        let canvas = Rc::new(RefCell::new(PaintContext::new(100.0, 100.0)));
        let mut spark = ClickSpark::attach(
            canvas.clone(),
            ClickSparkConfig::default(),
            ManualScheduler::new(),
        );
        spark.trigger(Point::new(50.0, 50.0), 0.0);

        assert_eq!(spark.advance_and_render(10.0), 8);
        assert_eq!(spark.advance_and_render(20.0), 8);
        assert_eq!(canvas.borrow().lines().count(), 8);
    }

    #[test]
    fn resize_event_resizes_canvas() {
        let canvas = Rc::new(RefCell::new(PaintContext::new(10.0, 10.0)));
        let mut spark = ClickSpark::attach(
            canvas.clone(),
            ClickSparkConfig::default(),
            ManualScheduler::new(),
        );

        assert!(spark.handle_event(&Event::resize(1, 300.0, 150.0, 0.0)));
        assert_eq!(canvas.borrow().bounds().width, 300.0);
        assert_eq!(canvas.borrow().bounds().height, 150.0);
    }

    #[test]
    fn stop_cancels_frame_and_is_idempotent() {
        let mut spark = ClickSpark::attach(
            PaintContext::default(),
            ClickSparkConfig::default(),
            ManualScheduler::new(),
        );
        assert_eq!(spark.scheduler().pending(), 1);

        spark.stop();
        spark.stop();
        assert!(!spark.is_running());
        assert_eq!(spark.scheduler().pending(), 0);
        assert!(spark.canvas().is_none());
    }

    #[test]
    fn drop_detaches_canvas_and_cancels_frame() {
        let scheduler = Rc::new(RefCell::new(ManualScheduler::new()));
        let canvas = Rc::new(RefCell::new(PaintContext::new(10.0, 10.0)));
        {
            let _spark = ClickSpark::attach(
                canvas.clone(),
                ClickSparkConfig::default(),
                scheduler.clone(),
            );
            assert!(canvas.borrow().is_attached());
            assert_eq!(scheduler.borrow().pending(), 1);
        }
        assert!(!canvas.borrow().is_attached());
        assert_eq!(scheduler.borrow().pending(), 0);
    }
}
