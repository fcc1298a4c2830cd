//! State Machine Runtime
//!
//! Flat state machines for effect lifecycles. A machine holds a transition
//! table keyed by `(from, event)`; events without a matching transition leave
//! the state unchanged.

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for a lifecycle event
pub type EventId = u32;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
}

impl Transition {
    pub const fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: Vec<Transition>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
        }
    }

    /// Add a transition (from, event, to)
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine::new(self.initial_state, self.transitions)
    }
}

/// Lifecycle machine: a current state plus its transition table
#[derive(Clone, Debug)]
pub struct StateMachine {
    state: StateId,
    transitions: Vec<Transition>,
}

impl StateMachine {
    pub fn new(initial_state: StateId, transitions: Vec<Transition>) -> Self {
        Self {
            state: initial_state,
            transitions,
        }
    }

    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.state == state
    }

    /// Whether `event` has a transition out of the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.target_of(event).is_some()
    }

    /// Apply `event` and return the resulting state. Unknown events are
    /// ignored.
    pub fn send(&mut self, event: EventId) -> StateId {
        if let Some(next) = self.target_of(event) {
            tracing::trace!(from = self.state, event, to = next, "lifecycle transition");
            self.state = next;
        }
        self.state
    }

    fn target_of(&self, event: EventId) -> Option<StateId> {
        self.transitions
            .iter()
            .find(|t| t.from_state == self.state && t.event == event)
            .map(|t| t.to_state)
    }
}
