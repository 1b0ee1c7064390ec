//! Mapping between reveal ticks and anonymous host timers.
//!
//! Zellij's `set_timeout(seconds)` answers with `Timer(seconds)` and carries no
//! other identity. The [`TimerQueue`] remembers which reveal asked for each
//! timer so the runtime can route the `Timer` event back as a reveal tick.
//! Timers of equal duration fire in the order they were set, so the oldest
//! pending entry with a matching duration is the one that fired.
//!
//! Host timers cannot be cancelled, so entries are never dropped early: every
//! `Timer` consumes its own entry and a superseded token makes the tick stale.

use super::scheduler::{RevealChannel, RevealToken, ScheduledTick};
use std::collections::VecDeque;

/// Tolerance when matching a fired duration to a pending one.
const SECONDS_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    seconds: f64,
    channel: RevealChannel,
    token: RevealToken,
}

/// Pending host timers and the reveal ticks they stand for.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: VecDeque<PendingTimer>,
}

impl TimerQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `tick` and returns the timeout in seconds to hand to the host.
    pub fn schedule(&mut self, tick: &ScheduledTick) -> f64 {
        let seconds = tick.delay.as_secs_f64();
        self.pending.push_back(PendingTimer {
            seconds,
            channel: tick.channel,
            token: tick.token,
        });
        seconds
    }

    /// Resolves a fired timer into the tick it was scheduled for.
    ///
    /// Returns `None` for timers the queue does not know.
    pub fn fire(&mut self, seconds: f64) -> Option<(RevealChannel, RevealToken)> {
        let position = self
            .pending
            .iter()
            .position(|timer| (timer.seconds - seconds).abs() < SECONDS_EPSILON)?;
        self.pending
            .remove(position)
            .map(|timer| (timer.channel, timer.token))
    }

    /// Number of timers still expected to fire.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::RevealScheduler;
    use std::time::Duration;

    #[test]
    fn fired_timers_route_back_to_their_channel() {
        let mut text = RevealScheduler::new(RevealChannel::Text, Duration::from_millis(20));
        let mut list = RevealScheduler::new(RevealChannel::List, Duration::from_millis(300));
        let text_tick = text.start("hi".to_string()).unwrap();
        let list_tick = list.start(vec![1, 2]).unwrap();

        let mut queue = TimerQueue::new();
        let list_secs = queue.schedule(&list_tick);
        let text_secs = queue.schedule(&text_tick);

        assert_eq!(queue.fire(text_secs), Some((RevealChannel::Text, text_tick.token)));
        assert_eq!(queue.fire(list_secs), Some((RevealChannel::List, list_tick.token)));
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_durations_fire_in_schedule_order() {
        let mut text = RevealScheduler::new(RevealChannel::Text, Duration::from_millis(50));
        let first = text.start("a".to_string()).unwrap();
        let second = text.start("b".to_string()).unwrap();

        let mut queue = TimerQueue::new();
        let secs = queue.schedule(&first);
        queue.schedule(&second);

        assert_eq!(queue.fire(secs).map(|(_, token)| token), Some(first.token));
        assert_eq!(queue.fire(secs).map(|(_, token)| token), Some(second.token));
    }

    #[test]
    fn unknown_durations_are_ignored() {
        let mut list = RevealScheduler::new(RevealChannel::List, Duration::from_millis(300));
        let tick = list.start(vec!["a"]).unwrap();

        let mut queue = TimerQueue::new();
        queue.schedule(&tick);

        assert_eq!(queue.fire(0.02), None);
        assert_eq!(queue.len(), 1);
    }
}
