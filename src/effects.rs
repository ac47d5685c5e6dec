//! Named feedback effects (sounds, haptics, flashes) that a front end may want to play.
//!
//! The core never produces audio itself: it announces effects by name to whatever notifier the
//! driver injected.

use std::cell::RefCell;
use std::fmt;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Effect {
    Move,
    Win,
    Start,
    Click,
}

impl Effect {
    pub fn name(self) -> &'static str {
        match self {
            Effect::Move => "move",
            Effect::Win => "win",
            Effect::Start => "start",
            Effect::Click => "click",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait EffectNotifier {
    fn notify(&self, effect: Effect);
}

/// Drops every effect.
#[derive(Debug, Copy, Clone, Default)]
pub struct NullNotifier;

impl EffectNotifier for NullNotifier {
    fn notify(&self, _: Effect) {}
}

/// Keeps every effect in the order received.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    effects: RefCell<Vec<Effect>>,
}

impl RecordingNotifier {
    pub fn new() -> RecordingNotifier {
        RecordingNotifier::default()
    }

    pub fn effects(&self) -> Vec<Effect> {
        self.effects.borrow().clone()
    }

    /// Hand back everything recorded so far and start afresh.
    pub fn take(&self) -> Vec<Effect> {
        self.effects.replace(Vec::new())
    }
}

impl EffectNotifier for RecordingNotifier {
    fn notify(&self, effect: Effect) {
        self.effects.borrow_mut().push(effect);
    }
}

impl<'a, N: EffectNotifier + ?Sized> EffectNotifier for &'a N {
    fn notify(&self, effect: Effect) {
        (**self).notify(effect)
    }
}

impl<N: EffectNotifier + ?Sized> EffectNotifier for Box<N> {
    fn notify(&self, effect: Effect) {
        (**self).notify(effect)
    }
}
