//! Glint Effects
//!
//! Self-contained micro-interaction effects that attach to a host element,
//! run their own lifecycle, and detach cleanly:
//!
//! - [`ClickSpark`]: a burst of radial line sparks on every click
//! - [`DecryptedText`]: a character scramble that settles into the original
//!   text, on hover and/or when the element scrolls into view
//! - [`GradualBlur`]: a stack of masked backdrop blurs forming a progressive
//!   edge blur
//!
//! Effects talk to the host only through narrow collaborators: a
//! [`Scheduler`](glint_animation::Scheduler) handle for frames and intervals
//! (usually an `Rc<RefCell<_>>` shared by every effect on the page), a
//! [`Canvas`](glint_paint::Canvas) for line drawing, and the element traits in
//! [`host`]. Host events arrive as [`glint_core::Event`]s.
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use glint_animation::ManualScheduler;
//! use glint_core::Event;
//! use glint_effects::{DecryptedText, DecryptedTextConfig};
//!
//! let scheduler = Rc::new(RefCell::new(ManualScheduler::new()));
//! let config = DecryptedTextConfig {
//!     sequential: true,
//!     ..Default::default()
//! };
//! let mut text =
//!     DecryptedText::attach(String::from("hello"), config, scheduler.clone()).with_seed(7);
//!
//! text.handle_event(&Event::pointer_enter(1, 0.0));
//! while text.is_animating() {
//!     let ticks = scheduler.borrow_mut().advance_by(50.0);
//!     for tick in ticks {
//!         text.on_tick(tick);
//!     }
//! }
//! assert_eq!(text.target().map(String::as_str), Some("hello"));
//! ```

pub mod click_spark;
pub mod config;
pub mod decrypted_text;
pub mod error;
pub mod gradual_blur;
pub mod host;

pub use click_spark::{ClickSpark, Spark, SparkMotion, SparkSegment};
pub use config::{
    ClickSparkConfig, DecryptedTextConfig, EffectsConfig, GradualBlurConfig, NamedOption,
};
pub use decrypted_text::{DecryptedText, RevealDirection, RevealState, TriggerMode};
pub use error::{ConfigError, Result};
pub use gradual_blur::{BlurLayer, BlurOverlay, BlurTarget, Edge, GradualBlur};
pub use host::{OverlayHost, OverlayId, OverlayStack, TextTarget};
