//! Host events
//!
//! Notifications a host forwards to attached effects. Coordinates are local to
//! the element the effect is attached to; timestamps come from the host clock
//! in milliseconds.

/// Event type identifier
pub type EventType = u32;

/// Event types understood by Glint effects
pub mod event_types {
    use super::EventType;

    pub const POINTER_ENTER: EventType = 1;
    pub const POINTER_LEAVE: EventType = 2;
    pub const CLICK: EventType = 3;
    /// The element's visible fraction changed
    pub const VISIBILITY: EventType = 10;
    /// The element's box changed size
    pub const RESIZE: EventType = 20;
}

/// A host event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    /// Host element identifier
    pub target: u64,
    pub data: EventData,
    /// Host clock timestamp in milliseconds
    pub timestamp: f64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
    },
    Visibility {
        /// Intersection ratio in `0.0..=1.0`
        ratio: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: u64, data: EventData, timestamp: f64) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp,
        }
    }

    pub fn pointer_enter(target: u64, timestamp: f64) -> Self {
        Self::new(event_types::POINTER_ENTER, target, EventData::None, timestamp)
    }

    pub fn pointer_leave(target: u64, timestamp: f64) -> Self {
        Self::new(event_types::POINTER_LEAVE, target, EventData::None, timestamp)
    }

    /// A click at element-local coordinates
    pub fn click(target: u64, x: f32, y: f32, timestamp: f64) -> Self {
        Self::new(
            event_types::CLICK,
            target,
            EventData::Pointer { x, y },
            timestamp,
        )
    }

    pub fn visibility(target: u64, ratio: f32, timestamp: f64) -> Self {
        Self::new(
            event_types::VISIBILITY,
            target,
            EventData::Visibility { ratio },
            timestamp,
        )
    }

    pub fn resize(target: u64, width: f32, height: f32, timestamp: f64) -> Self {
        Self::new(
            event_types::RESIZE,
            target,
            EventData::Resize { width, height },
            timestamp,
        )
    }

    /// Pointer position, if this event carries one
    pub fn position(&self) -> Option<(f32, f32)> {
        match self.data {
            EventData::Pointer { x, y } => Some((x, y)),
            _ => None,
        }
    }
}
