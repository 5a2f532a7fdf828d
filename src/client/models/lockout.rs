use chrono::{DateTime, Utc};

/// Outcome of one countdown tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// The tick belongs to a superseded or already-cleared lockout and
    /// must not reschedule itself.
    Stale,
    /// Still locked; the caller schedules the next tick.
    Remaining(i64),
    /// The countdown hit zero on this tick; the lock state was cleared.
    Expired,
}

#[derive(Debug, Clone)]
struct ActiveLockout {
    unlock_at: DateTime<Utc>,
    generation: u64,
}

/// Countdown controller for a server-issued login lockout.
///
/// `arm` always supersedes the previous lockout: the generation counter
/// bumps, so ticks scheduled for an older arming come back `Stale` and
/// their loop dies out. At most one tick loop is ever live.
#[derive(Debug, Clone, Default)]
pub struct LockoutCountdown {
    active: Option<ActiveLockout>,
    generation: u64,
}

impl LockoutCountdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the countdown for `unlock_at` and return the generation the
    /// caller must thread through its tick messages.
    ///
    /// An `unlock_at` already in the past still arms; the first tick
    /// clears it and reports `Expired`.
    pub fn arm(&mut self, unlock_at: DateTime<Utc>) -> u64 {
        self.generation += 1;
        self.active = Some(ActiveLockout {
            unlock_at,
            generation: self.generation,
        });
        self.generation
    }

    /// Drop the lockout without waiting for the countdown, e.g. when a
    /// fresh login attempt supersedes it. Pending ticks become stale.
    pub fn disarm(&mut self) {
        self.generation += 1;
        self.active = None;
    }

    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.remaining_secs(now).is_some_and(|s| s > 0)
    }

    /// Seconds until unlock, floored at zero. `None` when not armed.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> Option<i64> {
        let lock = self.active.as_ref()?;
        let millis = (lock.unlock_at - now).num_milliseconds().max(0);
        // Round up so a lock of 0.4s still displays as one second.
        Some((millis + 999) / 1000)
    }

    /// Advance the countdown for the tick loop of `generation`.
    pub fn tick(&mut self, generation: u64, now: DateTime<Utc>) -> Tick {
        let Some(lock) = self.active.as_ref() else {
            return Tick::Stale;
        };
        if lock.generation != generation {
            return Tick::Stale;
        }
        let remaining = self.remaining_secs(now).unwrap_or(0);
        if remaining <= 0 {
            self.active = None;
            Tick::Expired
        } else {
            Tick::Remaining(remaining)
        }
    }

    /// Render a remaining duration as the on-screen `"{m}m {s}s"` form.
    pub fn format_remaining(secs: i64) -> String {
        let secs = secs.max(0);
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn countdown_formats_and_expires_deterministically() {
        let mut lockout = LockoutCountdown::new();
        let start = at(0);
        let generation = lockout.arm(at(125_000));

        assert!(lockout.is_locked(start));
        assert_eq!(lockout.remaining_secs(start), Some(125));
        assert_eq!(LockoutCountdown::format_remaining(125), "2m 5s");

        assert_eq!(lockout.tick(generation, at(65_000)), Tick::Remaining(60));
        assert_eq!(LockoutCountdown::format_remaining(60), "1m 0s");

        assert_eq!(lockout.tick(generation, at(125_000)), Tick::Expired);
        assert!(!lockout.is_locked(at(125_000)));
        assert_eq!(lockout.remaining_secs(at(125_000)), None);

        // The loop is gone: a late tick from the same generation is inert.
        assert_eq!(lockout.tick(generation, at(126_000)), Tick::Stale);
    }

    #[test]
    fn rearming_tears_down_the_previous_timer() {
        let mut lockout = LockoutCountdown::new();
        let first = lockout.arm(at(30_000));
        let second = lockout.arm(at(300_000));
        assert_ne!(first, second);

        // Display derives from the second signal only.
        assert_eq!(lockout.remaining_secs(at(0)), Some(300));

        // Advancing past the first lockout's horizon does not clear the
        // lock; the first loop's ticks are stale.
        assert_eq!(lockout.tick(first, at(30_000)), Tick::Stale);
        assert!(lockout.is_locked(at(30_000)));

        assert_eq!(lockout.tick(second, at(30_000)), Tick::Remaining(270));
    }

    #[test]
    fn disarm_clears_state_and_invalidates_pending_ticks() {
        let mut lockout = LockoutCountdown::new();
        let generation = lockout.arm(at(60_000));
        lockout.disarm();

        assert!(!lockout.is_locked(at(0)));
        assert_eq!(lockout.tick(generation, at(1_000)), Tick::Stale);
    }

    #[test]
    fn remaining_never_goes_negative() {
        let mut lockout = LockoutCountdown::new();
        lockout.arm(at(1_000));
        assert_eq!(lockout.remaining_secs(at(5_000)), Some(0));
        assert!(!lockout.is_locked(at(5_000)));
    }

    #[test]
    fn subsecond_remainder_rounds_up() {
        let mut lockout = LockoutCountdown::new();
        lockout.arm(at(1_400));
        assert_eq!(lockout.remaining_secs(at(1_000)), Some(1));
    }
}
