//! Timed move transitions (auto-revert chains).
//!
//! An action such as a kick plays for a fixed time, then the character drops
//! into a fighting stance, then back to idle. At most one such chain is
//! pending; arming a new one replaces the old.
use std::time::Duration;

use super::Move;

/// Wall-clock durations of every timed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevertDurations {
    pub kick: Duration,
    /// Indexed by spell slot minus one.
    pub spells: [Duration; 6],
    /// How long the fighting stance is held before returning to idle.
    pub fight_idle_hold: Duration,
    pub run: Duration,
}

impl Default for RevertDurations {
    fn default() -> Self {
        Self {
            kick: Duration::from_millis(1000),
            spells: [6500, 2167, 3333, 2600, 4333, 3250].map(Duration::from_millis),
            fight_idle_hold: Duration::from_millis(10_000),
            run: Duration::from_millis(500),
        }
    }
}

impl RevertDurations {
    /// Schedule that follows `mv`, or `None` when the move has no timer.
    #[must_use]
    pub fn schedule_for(&self, mv: Move) -> Option<RevertSchedule> {
        match mv {
            Move::Kick => Some(RevertSchedule::via_stance(self.kick, self.fight_idle_hold)),
            Move::Run => Some(RevertSchedule { first: (self.run, Move::Idle), then: None }),
            Move::Idle | Move::FightIdle => None,
            spell => {
                let slot = spell.spell_slot()?;
                let d = self.spells[usize::from(slot - 1)];
                Some(RevertSchedule::via_stance(d, self.fight_idle_hold))
            }
        }
    }
}

/// One or two timed steps back towards idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertSchedule {
    pub first: (Duration, Move),
    pub then: Option<(Duration, Move)>,
}

impl RevertSchedule {
    fn via_stance(action: Duration, hold: Duration) -> Self {
        Self {
            first: (action, Move::FightIdle),
            then: Some((hold, Move::Idle)),
        }
    }

    /// Arm this schedule relative to `now`.
    #[must_use]
    pub fn arm(self, now: Duration) -> PendingTransition {
        PendingTransition {
            due: now + self.first.0,
            next: self.first.1,
            then: self.then,
        }
    }
}

/// The single armed transition of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    /// Elapsed-time instant at which `next` becomes the active move.
    pub due: Duration,
    pub next: Move,
    /// Step armed once this one fires, relative to `due`.
    pub then: Option<(Duration, Move)>,
}

impl PendingTransition {
    /// Fire this transition: returns the move to switch to and the follow-up, if any.
    ///
    /// The follow-up deadline is measured from this transition's own deadline so
    /// scheduler jitter does not accumulate along a chain.
    #[must_use]
    pub fn fire(self) -> (Move, Option<PendingTransition>) {
        let follow = self.then.map(|(delay, next)| PendingTransition {
            due: self.due + delay,
            next,
            then: None,
        });
        (self.next, follow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn kick_chains_through_fight_idle() {
        let d = RevertDurations::default();
        let pending = d.schedule_for(Move::Kick).unwrap().arm(Duration::ZERO);
        assert_eq!(pending.due, ms(1000));
        assert_eq!(pending.next, Move::FightIdle);

        let (mv, follow) = pending.fire();
        assert_eq!(mv, Move::FightIdle);
        let follow = follow.unwrap();
        assert_eq!(follow.due, ms(11_000));
        assert_eq!(follow.next, Move::Idle);
        assert_eq!(follow.fire(), (Move::Idle, None));
    }

    #[test]
    fn spell_durations_come_from_the_table() {
        let d = RevertDurations::default();
        let expected = [6500, 2167, 3333, 2600, 4333, 3250];
        for (slot, want) in (1..=6).zip(expected) {
            let s = d.schedule_for(Move::spell(slot).unwrap()).unwrap();
            assert_eq!(s.first, (ms(want), Move::FightIdle));
            assert_eq!(s.then, Some((ms(10_000), Move::Idle)));
        }
    }

    #[test]
    fn run_returns_straight_to_idle() {
        let s = RevertDurations::default().schedule_for(Move::Run).unwrap();
        assert_eq!(s.first, (ms(500), Move::Idle));
        assert!(s.then.is_none());
    }

    #[test]
    fn idle_and_stance_have_no_timer() {
        let d = RevertDurations::default();
        assert!(d.schedule_for(Move::Idle).is_none());
        assert!(d.schedule_for(Move::FightIdle).is_none());
    }
}
