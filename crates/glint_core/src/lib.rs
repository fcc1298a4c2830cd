//! Glint Core
//!
//! Foundational primitives shared by every Glint effect:
//!
//! - **Events**: pointer, click, visibility and resize notifications produced
//!   by the host and routed to effects
//! - **State Machines**: flat transition tables driving effect lifecycles
//!
//! # Example
//!
//! ```rust
//! use glint_core::fsm::{StateMachine, Transition};
//!
//! const IDLE: u32 = 0;
//! const ANIMATING: u32 = 1;
//! const START: u32 = 1;
//!
//! let mut fsm = StateMachine::new(IDLE, vec![Transition::new(IDLE, START, ANIMATING)]);
//! fsm.send(START);
//! assert!(fsm.is_in(ANIMATING));
//! ```

pub mod events;
pub mod fsm;

pub use events::{event_types, Event, EventData, EventType};
pub use fsm::{EventId, StateId, StateMachine, Transition};
