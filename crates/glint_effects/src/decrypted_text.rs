//! Decrypted text
//!
//! Scrambles a text element's characters and settles back to the original
//! text, either all at once (`sequential = false`: every non-whitespace
//! character is re-drawn each tick for `max_iterations` ticks) or one
//! character per tick in the configured [`RevealDirection`].
//!
//! The effect is driven by a periodic interval from the host [`Scheduler`].
//! Ticks are only honored while they carry the handle of the running
//! interval, so a tick that was dispatched before [`DecryptedText::stop`] has
//! no effect.

use glint_animation::{Scheduler, Tick, TickHandle};
use glint_core::events::event_types;
use glint_core::fsm::{EventId, StateId, StateMachine};
use glint_core::{Event, EventData};
use rustc_hash::FxHashSet;

use crate::config::DecryptedTextConfig;
use crate::host::TextTarget;

const IDLE: StateId = 0;
const ANIMATING: StateId = 1;

const START: EventId = 1;
const FINISH: EventId = 2;
const STOP: EventId = 3;

/// Which host signals start the effect
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TriggerMode {
    /// Start on pointer enter, stop on pointer leave
    #[default]
    Hover,
    /// Start once, the first time the element becomes visible
    View,
    Both,
}

impl TriggerMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hover" => Some(TriggerMode::Hover),
            "view" => Some(TriggerMode::View),
            "both" => Some(TriggerMode::Both),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TriggerMode::Hover => "hover",
            TriggerMode::View => "view",
            TriggerMode::Both => "both",
        }
    }

    pub fn on_hover(&self) -> bool {
        matches!(self, TriggerMode::Hover | TriggerMode::Both)
    }

    pub fn on_view(&self) -> bool {
        matches!(self, TriggerMode::View | TriggerMode::Both)
    }
}

/// Order in which a sequential run reveals characters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RevealDirection {
    #[default]
    Start,
    End,
    /// Alternate outward from the middle
    Center,
}

impl RevealDirection {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(RevealDirection::Start),
            "end" => Some(RevealDirection::End),
            "center" => Some(RevealDirection::Center),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RevealDirection::Start => "start",
            RevealDirection::End => "end",
            RevealDirection::Center => "center",
        }
    }
}

/// Pick the next index to reveal given the already revealed set
///
/// `center` alternates right then left of `len / 2`. When that slot is out of
/// bounds or taken, the lowest unrevealed index is used (0 if none remain).
pub fn next_reveal_index(
    direction: RevealDirection,
    revealed: &FxHashSet<usize>,
    len: usize,
) -> usize {
    let k = revealed.len();
    match direction {
        RevealDirection::Start => k,
        RevealDirection::End => len.saturating_sub(k + 1),
        RevealDirection::Center => {
            let middle = len / 2;
            let offset = k / 2;
            let candidate = if k % 2 == 0 {
                Some(middle + offset)
            } else {
                middle.checked_sub(offset + 1)
            };

            match candidate {
                Some(index) if index < len && !revealed.contains(&index) => index,
                _ => (0..len).find(|i| !revealed.contains(i)).unwrap_or(0),
            }
        }
    }
}

/// Character-level reveal progress for one run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevealState {
    revealed: FxHashSet<usize>,
    current_iteration: u32,
}

impl RevealState {
    pub fn revealed(&self) -> &FxHashSet<usize> {
        &self.revealed
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    pub fn current_iteration(&self) -> u32 {
        self.current_iteration
    }

    fn reset(&mut self) {
        self.revealed.clear();
        self.current_iteration = 0;
    }
}

/// Scramble-then-reveal effect bound to a text element
///
/// The effect owns its element and its scheduler handle. Dropping it cancels
/// the running interval and puts the original text back.
pub struct DecryptedText<T: TextTarget, S: Scheduler> {
    target: Option<T>,
    scheduler: S,
    original: Vec<char>,
    original_text: String,
    alphabet: Vec<char>,
    config: DecryptedTextConfig,
    state: RevealState,
    lifecycle: StateMachine,
    interval: Option<TickHandle>,
    has_animated: bool,
    rng: fastrand::Rng,
}

impl<T: TextTarget, S: Scheduler> DecryptedText<T, S> {
    /// Bind to a text element, capturing its current text as the original
    pub fn attach(mut target: T, config: DecryptedTextConfig, scheduler: S) -> Self {
        let original_text = target.text();
        target.set_text(&original_text);

        let alphabet: Vec<char> = config.characters.chars().collect();
        if alphabet.is_empty() {
            tracing::warn!("Empty scramble alphabet, characters will not be scrambled");
        }

        tracing::debug!(
            len = original_text.chars().count(),
            trigger = config.animate_on.name(),
            sequential = config.sequential,
            "decrypted text attached"
        );

        Self {
            target: Some(target),
            scheduler,
            original: original_text.chars().collect(),
            original_text,
            alphabet,
            config,
            state: RevealState::default(),
            lifecycle: StateMachine::builder(IDLE)
                .on(IDLE, START, ANIMATING)
                .on(ANIMATING, FINISH, IDLE)
                .on(ANIMATING, STOP, IDLE)
                .build(),
            interval: None,
            has_animated: false,
            rng: fastrand::Rng::new(),
        }
    }

    /// Use a fixed seed for the scramble characters
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn config(&self) -> &DecryptedTextConfig {
        &self.config
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    pub fn is_animating(&self) -> bool {
        self.lifecycle.is_in(ANIMATING)
    }

    /// Whether the view trigger has already fired for this element
    pub fn has_animated(&self) -> bool {
        self.has_animated
    }

    /// Whether the effect is still bound to its element
    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Begin a run. Does nothing while already animating or after destroy.
    pub fn start(&mut self) {
        if self.is_animating() || self.target.is_none() {
            return;
        }

        self.state.reset();
        self.lifecycle.send(START);
        self.interval = Some(self.scheduler.set_interval(self.config.speed_ms));
        tracing::debug!(speed_ms = self.config.speed_ms, "decrypted text started");
    }

    /// Cancel the run and restore the original text. Safe from any state.
    pub fn stop(&mut self) {
        self.cancel_interval();
        if self.lifecycle.can_send(STOP) {
            self.lifecycle.send(STOP);
            tracing::debug!("decrypted text stopped");
        }
        self.state.reset();
        self.restore_text();
    }

    /// Advance one interval tick. Returns false for ticks that are not ours.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        if self.interval != Some(tick.handle) || !self.is_animating() {
            return false;
        }

        if self.config.sequential {
            if self.state.revealed.len() < self.original.len() {
                let index = self.next_index();
                self.state.revealed.insert(index);
                let frame = self.shuffle_text();
                self.render(&frame);
            } else {
                self.finish();
            }
        } else {
            let frame = self.shuffle_text();
            self.render(&frame);
            self.state.current_iteration += 1;
            if self.state.current_iteration >= self.config.max_iterations {
                self.finish();
            }
        }
        true
    }

    /// Route a host event according to the trigger mode
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if self.target.is_none() {
            return false;
        }

        let trigger = self.config.animate_on;
        match (event.event_type, &event.data) {
            (event_types::POINTER_ENTER, _) if trigger.on_hover() => {
                self.start();
                true
            }
            (event_types::POINTER_LEAVE, _) if trigger.on_hover() => {
                self.stop();
                true
            }
            (event_types::VISIBILITY, EventData::Visibility { ratio })
                if trigger.on_view() && !self.has_animated =>
            {
                if *ratio > 0.0 && *ratio >= self.config.view_threshold {
                    self.start();
                    self.has_animated = true;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// The index the next sequential tick will reveal
    pub fn next_index(&self) -> usize {
        next_reveal_index(
            self.config.reveal_direction,
            &self.state.revealed,
            self.original.len(),
        )
    }

    /// Render one frame: whitespace and revealed positions keep the original
    /// character, every other position draws from the alphabet
    pub fn shuffle_text(&mut self) -> String {
        let alphabet = &self.alphabet;
        let rng = &mut self.rng;
        let revealed = &self.state.revealed;

        self.original
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if c.is_whitespace() || revealed.contains(&i) || alphabet.is_empty() {
                    c
                } else {
                    alphabet[rng.usize(..alphabet.len())]
                }
            })
            .collect()
    }

    /// Stop, restore the original text, and release the element
    pub fn destroy(&mut self) {
        self.stop();
        if self.target.take().is_some() {
            tracing::debug!("decrypted text detached");
        }
    }

    fn finish(&mut self) {
        self.cancel_interval();
        self.lifecycle.send(FINISH);
        self.state.reset();
        self.restore_text();
        tracing::debug!("decrypted text finished");
    }

    fn cancel_interval(&mut self) {
        if let Some(interval) = self.interval.take() {
            self.scheduler.cancel(interval);
        }
    }

    fn render(&mut self, frame: &str) {
        tracing::trace!(frame, "decrypted text frame");
        if let Some(target) = self.target.as_mut() {
            target.set_text(frame);
        }
    }

    fn restore_text(&mut self) {
        if let Some(target) = self.target.as_mut() {
            target.set_text(&self.original_text);
        }
    }
}

impl<T: TextTarget, S: Scheduler> Drop for DecryptedText<T, S> {
    fn drop(&mut self) {
        self.cancel_interval();
        self.restore_text();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_animation::ManualScheduler;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn set(indices: &[usize]) -> FxHashSet<usize> {
        indices.iter().copied().collect()
    }

    fn reveal_order(direction: RevealDirection, len: usize) -> Vec<usize> {
        let mut revealed = FxHashSet::default();
        let mut order = Vec::new();
        while revealed.len() < len {
            let index = next_reveal_index(direction, &revealed, len);
            revealed.insert(index);
            order.push(index);
        }
        order
    }

    #[test]
    fn start_direction_reveals_left_to_right() {
        assert_eq!(reveal_order(RevealDirection::Start, 4), vec![0, 1, 2, 3]);
    }

    #[test]
    fn end_direction_reveals_right_to_left() {
        assert_eq!(reveal_order(RevealDirection::End, 4), vec![3, 2, 1, 0]);
    }

    #[test]
    fn center_direction_alternates_outward() {
        assert_eq!(reveal_order(RevealDirection::Center, 5), vec![2, 1, 3, 0, 4]);
        assert_eq!(reveal_order(RevealDirection::Center, 4), vec![2, 1, 3, 0]);
        assert_eq!(reveal_order(RevealDirection::Center, 1), vec![0]);
    }

    #[test]
    fn center_falls_back_to_lowest_unrevealed() {
        // Slot for k=2 would be 3, which is taken
        assert_eq!(
            next_reveal_index(RevealDirection::Center, &set(&[3, 4]), 5),
            0
        );
        // Everything revealed
        assert_eq!(
            next_reveal_index(RevealDirection::Center, &set(&[0, 1]), 2),
            0
        );
    }

    fn attach_local(
        text: &str,
        config: DecryptedTextConfig,
    ) -> DecryptedText<String, ManualScheduler> {
        DecryptedText::attach(text.to_string(), config, ManualScheduler::new())
    }

    #[test]
    fn shuffle_keeps_whitespace_and_revealed() {
        let config = DecryptedTextConfig {
            characters: "#".to_string(),
            ..Default::default()
        };
        let mut text = attach_local("ab cd", config).with_seed(1);
        assert_eq!(text.shuffle_text(), "## ##");

        text.state.revealed.insert(1);
        assert_eq!(text.shuffle_text(), "#b ##");
    }

    #[test]
    fn empty_alphabet_leaves_text_unchanged() {
        let config = DecryptedTextConfig {
            characters: String::new(),
            ..Default::default()
        };
        let mut text = attach_local("secret", config);
        assert_eq!(text.shuffle_text(), "secret");
    }

    #[test]
    fn start_is_noop_while_animating() {
        let mut text = attach_local("hi", DecryptedTextConfig::default());

        text.start();
        text.start();
        assert!(text.is_animating());
        assert_eq!(text.scheduler().pending(), 1);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut text = attach_local("hi", DecryptedTextConfig::default());

        text.stop();
        text.start();
        text.stop();
        text.stop();
        assert!(!text.is_animating());
        assert_eq!(text.scheduler().pending(), 0);
        assert_eq!(text.target().map(String::as_str), Some("hi"));
    }

    #[test]
    fn zero_iterations_finish_on_first_tick() {
        let scheduler = Rc::new(RefCell::new(ManualScheduler::new()));
        let config = DecryptedTextConfig {
            max_iterations: 0,
            ..Default::default()
        };
        let mut text = DecryptedText::attach(String::from("hello"), config, scheduler.clone());
        text.start();

        let ticks = scheduler.borrow_mut().advance_to(50.0);
        for tick in ticks {
            text.on_tick(tick);
        }
        assert!(!text.is_animating());
        assert_eq!(text.target().map(String::as_str), Some("hello"));
        assert_eq!(scheduler.borrow().pending(), 0);
    }

    #[test]
    fn drop_cancels_running_interval() {
        let scheduler = Rc::new(RefCell::new(ManualScheduler::new()));
        {
            let mut text = DecryptedText::attach(
                String::from("running"),
                DecryptedTextConfig::default(),
                scheduler.clone(),
            );
            text.start();
            assert_eq!(scheduler.borrow().pending(), 1);
        }
        assert_eq!(scheduler.borrow().pending(), 0);
        assert!(scheduler.borrow_mut().advance_by(5000.0).is_empty());
    }

    #[test]
    fn trigger_modes() {
        assert!(TriggerMode::Hover.on_hover() && !TriggerMode::Hover.on_view());
        assert!(!TriggerMode::View.on_hover() && TriggerMode::View.on_view());
        assert!(TriggerMode::Both.on_hover() && TriggerMode::Both.on_view());
    }
}
