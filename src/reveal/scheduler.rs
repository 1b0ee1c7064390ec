//! Generic timer-paced reveal scheduler.
//!
//! A [`RevealScheduler`] discloses already-available content one unit per
//! tick: one character for text, one item for lists. It never owns a timer.
//! Instead every step returns a [`ScheduledTick`] that the runtime turns into a
//! host timer, and the tick comes back later through [`RevealScheduler::tick`].
//!
//! # Cancellation
//!
//! Each start, cancel or clear moves the scheduler to a fresh [`RevealToken`].
//! Ticks carry the token they were scheduled with, so a tick belonging to a
//! superseded or torn-down reveal is recognised as stale and changes nothing.

use std::time::Duration;

/// Which reveal a tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealChannel {
    /// Character-by-character assistant text.
    Text,
    /// Item-by-item place list.
    List,
}

impl RevealChannel {
    /// Label used in tracing fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::List => "list",
        }
    }
}

/// Generation handle of one reveal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RevealToken(u64);

impl RevealToken {
    #[must_use]
    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw generation number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Request for the runtime to deliver a tick after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTick {
    pub channel: RevealChannel,
    pub token: RevealToken,
    pub delay: Duration,
}

/// Result of delivering a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belonged to a cancelled or finished reveal; nothing changed.
    Stale,
    /// One more unit became visible and another tick is needed.
    Continue(ScheduledTick),
    /// One more unit became visible and the reveal is complete.
    Finished,
}

/// Content that can be disclosed unit by unit.
pub trait Revealable: Default {
    /// Number of units (characters, items) in the content.
    fn unit_count(&self) -> usize;
}

impl Revealable for String {
    fn unit_count(&self) -> usize {
        self.chars().count()
    }
}

impl<T> Revealable for Vec<T> {
    fn unit_count(&self) -> usize {
        self.len()
    }
}

/// Timer-paced disclosure of one piece of content.
#[derive(Debug, Clone)]
pub struct RevealScheduler<C> {
    channel: RevealChannel,
    interval: Duration,
    content: C,
    total: usize,
    revealed: usize,
    token: RevealToken,
    running: bool,
}

impl<C: Revealable> RevealScheduler<C> {
    /// Creates an idle scheduler ticking every `interval`.
    #[must_use]
    pub fn new(channel: RevealChannel, interval: Duration) -> Self {
        Self {
            channel,
            interval,
            content: C::default(),
            total: 0,
            revealed: 0,
            token: RevealToken::default(),
            running: false,
        }
    }

    /// Starts revealing `content` from nothing, cancelling any reveal in flight.
    ///
    /// Returns the first tick to schedule, or `None` when the content is empty
    /// and the reveal is therefore already complete.
    pub fn start(&mut self, content: C) -> Option<ScheduledTick> {
        self.token = self.token.next();
        self.total = content.unit_count();
        self.content = content;
        self.revealed = 0;
        self.running = self.total > 0;

        tracing::debug!(
            channel = self.channel.as_str(),
            token = self.token.value(),
            units = self.total,
            "reveal started"
        );

        self.running.then(|| self.next_tick())
    }

    /// Makes all of `content` visible at once, cancelling any reveal in flight.
    pub fn show_all(&mut self, content: C) {
        self.token = self.token.next();
        self.total = content.unit_count();
        self.content = content;
        self.revealed = self.total;
        self.running = false;
    }

    /// Delivers a tick scheduled with `token`.
    pub fn tick(&mut self, token: RevealToken) -> TickOutcome {
        if !self.running || token != self.token {
            tracing::trace!(
                channel = self.channel.as_str(),
                token = token.value(),
                current = self.token.value(),
                "ignoring stale reveal tick"
            );
            return TickOutcome::Stale;
        }

        self.revealed += 1;

        if self.revealed >= self.total {
            self.running = false;
            tracing::debug!(channel = self.channel.as_str(), units = self.total, "reveal finished");
            TickOutcome::Finished
        } else {
            TickOutcome::Continue(self.next_tick())
        }
    }

    /// Stops the reveal in flight, keeping what is already visible.
    pub fn cancel(&mut self) {
        if self.running {
            tracing::debug!(
                channel = self.channel.as_str(),
                revealed = self.revealed,
                units = self.total,
                "reveal cancelled"
            );
        }
        self.token = self.token.next();
        self.running = false;
    }

    /// Cancels and drops the content.
    pub fn clear(&mut self) {
        self.cancel();
        self.content = C::default();
        self.total = 0;
        self.revealed = 0;
    }

    /// Whether ticks are still expected.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Number of units currently visible.
    #[must_use]
    pub const fn revealed(&self) -> usize {
        self.revealed
    }

    /// Number of units in the content.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Token of the current reveal operation.
    #[must_use]
    pub const fn token(&self) -> RevealToken {
        self.token
    }

    /// The complete content, visible or not.
    #[must_use]
    pub const fn content(&self) -> &C {
        &self.content
    }

    /// Tick period.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    fn next_tick(&self) -> ScheduledTick {
        ScheduledTick {
            channel: self.channel,
            token: self.token,
            delay: self.interval,
        }
    }
}

impl RevealScheduler<String> {
    /// The revealed prefix of the text.
    #[must_use]
    pub fn visible(&self) -> &str {
        let end = self
            .content
            .char_indices()
            .nth(self.revealed)
            .map_or(self.content.len(), |(idx, _)| idx);
        &self.content[..end]
    }
}

impl<T> RevealScheduler<Vec<T>> {
    /// The revealed items, in input order.
    #[must_use]
    pub fn visible(&self) -> &[T] {
        &self.content[..self.revealed.min(self.content.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(20);

    fn drive_text(reveal: &mut RevealScheduler<String>, first: Option<ScheduledTick>) -> Vec<String> {
        let mut frames = vec![reveal.visible().to_string()];
        let mut pending = first;
        while let Some(tick) = pending {
            pending = match reveal.tick(tick.token) {
                TickOutcome::Continue(next) => Some(next),
                TickOutcome::Finished => None,
                TickOutcome::Stale => panic!("live tick reported stale"),
            };
            frames.push(reveal.visible().to_string());
        }
        frames
    }

    #[test]
    fn text_reveal_emits_every_prefix_once() {
        let mut reveal = RevealScheduler::new(RevealChannel::Text, TICK);
        let first = reveal.start("héllo".to_string());

        let frames = drive_text(&mut reveal, first);

        assert_eq!(frames, vec!["", "h", "hé", "hél", "héll", "héllo"]);
        assert!(!reveal.is_running());
    }

    #[test]
    fn empty_text_completes_without_ticks() {
        let mut reveal = RevealScheduler::new(RevealChannel::Text, TICK);
        assert!(reveal.start(String::new()).is_none());
        assert!(!reveal.is_running());
        assert_eq!(reveal.visible(), "");
    }

    #[test]
    fn restart_invalidates_previous_ticks() {
        let mut reveal = RevealScheduler::new(RevealChannel::Text, TICK);
        let old = reveal.start("first".to_string()).unwrap();
        let new = reveal.start("second".to_string()).unwrap();

        assert_eq!(reveal.tick(old.token), TickOutcome::Stale);
        assert_eq!(reveal.visible(), "");
        assert!(matches!(reveal.tick(new.token), TickOutcome::Continue(_)));
        assert_eq!(reveal.visible(), "s");
    }

    #[test]
    fn cancel_stops_ticks_and_keeps_visible_prefix() {
        let mut reveal = RevealScheduler::new(RevealChannel::Text, TICK);
        let tick = reveal.start("abc".to_string()).unwrap();
        let TickOutcome::Continue(next) = reveal.tick(tick.token) else {
            panic!("expected continue");
        };

        reveal.cancel();

        assert_eq!(reveal.tick(next.token), TickOutcome::Stale);
        assert_eq!(reveal.visible(), "a");
        assert!(!reveal.is_running());
    }

    #[test]
    fn list_reveal_grows_by_one_in_order() {
        let mut reveal = RevealScheduler::new(RevealChannel::List, Duration::from_millis(300));
        let mut pending = reveal.start(vec![10, 20, 30]);
        let mut lengths = vec![reveal.visible().len()];

        while let Some(tick) = pending {
            assert_eq!(tick.channel, RevealChannel::List);
            pending = match reveal.tick(tick.token) {
                TickOutcome::Continue(next) => Some(next),
                _ => None,
            };
            lengths.push(reveal.visible().len());
        }

        assert_eq!(lengths, vec![0, 1, 2, 3]);
        assert_eq!(reveal.visible(), &[10, 20, 30]);
    }

    #[test]
    fn show_all_skips_pacing() {
        let mut reveal = RevealScheduler::new(RevealChannel::List, TICK);
        let stale = reveal.start(vec!["a"]).unwrap();
        reveal.show_all(vec!["x", "y"]);

        assert_eq!(reveal.visible(), &["x", "y"]);
        assert!(!reveal.is_running());
        assert_eq!(reveal.tick(stale.token), TickOutcome::Stale);
    }

    #[test]
    fn clear_drops_content() {
        let mut reveal = RevealScheduler::new(RevealChannel::List, TICK);
        reveal.show_all(vec![1, 2]);
        reveal.clear();
        assert!(reveal.visible().is_empty());
        assert_eq!(reveal.total(), 0);
    }
}
