//! Cancelable timers for the mocked widget effects.
//!
//! Uploads, generation and echo clearing all complete after a fixed delay.
//! Timers run on virtual time advanced by the caller and are owned by the
//! grid instance that started them.

use crate::placement::InstanceId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

/// Lifecycle of one mocked async effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "timer", rename_all = "snake_case")]
pub enum TimerState {
    #[default]
    Idle,
    Pending(TimerHandle),
    Done,
}

impl TimerState {
    pub fn is_pending(&self) -> bool {
        matches!(self, TimerState::Pending(_))
    }

    /// Whether this state waits on `handle`.
    pub fn waits_on(&self, handle: TimerHandle) -> bool {
        *self == TimerState::Pending(handle)
    }
}

/// What happens when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// A staged upload becomes visible.
    UploadReady,
    ImageGenerated,
    MusicGenerated,
    /// The research echo message is cleared.
    ResearchEchoCleared,
}

/// A timer that reached its due time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredEffect {
    pub handle: TimerHandle,
    pub owner: InstanceId,
    pub effect: Effect,
}

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    owner: InstanceId,
    due: Duration,
    effect: Effect,
}

/// Virtual-time timer queue.
#[derive(Debug, Clone, Default)]
pub struct EffectScheduler {
    now: Duration,
    next_handle: u64,
    timers: Vec<Timer>,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_for(&self, owner: InstanceId) -> usize {
        self.timers.iter().filter(|t| t.owner == owner).count()
    }

    pub fn schedule(&mut self, owner: InstanceId, delay: Duration, effect: Effect) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            owner,
            due: self.now + delay,
            effect,
        });
        log::debug!("Scheduled {:?} for {} in {:?}", effect, owner, delay);
        handle
    }

    /// Cancel a single timer. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Cancel every timer owned by `owner`.
    pub fn cancel_owner(&mut self, owner: InstanceId) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.owner != owner);
        let cancelled = before - self.timers.len();
        if cancelled > 0 {
            log::debug!("Cancelled {} timer(s) owned by {}", cancelled, owner);
        }
        cancelled
    }

    /// Move virtual time forward and return the timers that came due, in
    /// due order.
    pub fn advance(&mut self, dt: Duration) -> Vec<FiredEffect> {
        self.now += dt;
        let now = self.now;
        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = pending;
        due.sort_by_key(|t| (t.due, t.handle));
        due.into_iter()
            .map(|t| FiredEffect {
                handle: t.handle,
                owner: t.owner,
                effect: t.effect,
            })
            .collect()
    }
}
