//! Mana (Ziel) bookkeeping.
//!
//! Every operation keeps `0 <= current <= max <= cap` for both sides. Growth
//! and income are clamped instead of rejected; only `spend` can fail, and a
//! failed spend changes nothing.

use serde::{Deserialize, Serialize};

use super::side::{Side, SideMap};
use crate::error::LedgerError;

/// One side's mana pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaPool {
    /// Spendable this turn.
    pub current: i32,
    /// Refill target.
    pub max: i32,
}

/// Timed bonus income applied at the start of the owner's turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaSurge {
    /// Turns left, including the next one.
    pub turns_remaining: i32,
    /// Mana granted per turn.
    pub amount_per_turn: i32,
}

impl ManaSurge {
    /// Whether the surge still pays out.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.turns_remaining > 0 && self.amount_per_turn > 0
    }
}

/// Per-side mana pools plus the shared cap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pools: SideMap<ManaPool>,
    surges: SideMap<ManaSurge>,
    cap: i32,
}

impl ResourceLedger {
    /// Empty pools with the given cap.
    #[must_use]
    pub fn new(cap: i32) -> Self {
        Self {
            pools: SideMap::default(),
            surges: SideMap::default(),
            cap: cap.max(0),
        }
    }

    /// Shared ceiling for `max`.
    #[must_use]
    pub fn cap(&self) -> i32 {
        self.cap
    }

    /// A side's pool.
    #[must_use]
    pub fn pool(&self, side: Side) -> ManaPool {
        self.pools[side]
    }

    /// Both pools.
    #[must_use]
    pub fn pools(&self) -> &SideMap<ManaPool> {
        &self.pools
    }

    /// Current mana.
    #[must_use]
    pub fn current(&self, side: Side) -> i32 {
        self.pools[side].current
    }

    /// Max mana.
    #[must_use]
    pub fn max(&self, side: Side) -> i32 {
        self.pools[side].max
    }

    /// A side's surge status.
    #[must_use]
    pub fn surge(&self, side: Side) -> ManaSurge {
        self.surges[side]
    }

    /// Set both current and max, clamped to the cap.
    pub fn reset(&mut self, side: Side, value: i32) {
        let value = value.clamp(0, self.cap);
        self.pools[side] = ManaPool {
            current: value,
            max: value,
        };
    }

    /// Raise max by one unless already at the cap. Returns whether it grew.
    pub fn grow_max(&mut self, side: Side) -> bool {
        let pool = &mut self.pools[side];
        if pool.max < self.cap {
            pool.max += 1;
            true
        } else {
            false
        }
    }

    /// Set current to max.
    pub fn refill(&mut self, side: Side) {
        let pool = &mut self.pools[side];
        pool.current = pool.max;
    }

    /// Deduct `amount`. All-or-nothing.
    pub fn spend(&mut self, side: Side, amount: i32) -> Result<(), LedgerError> {
        self.can_spend(side, amount)?;
        self.pools[side].current -= amount;
        Ok(())
    }

    /// Check a spend without performing it.
    pub fn can_spend(&self, side: Side, amount: i32) -> Result<(), LedgerError> {
        if amount < 0 {
            return Err(LedgerError::NegativeAmount(amount));
        }
        let available = self.pools[side].current;
        if available < amount {
            return Err(LedgerError::Insufficient {
                required: amount,
                available,
            });
        }
        Ok(())
    }

    /// Add up to `amount`, never past max. Returns what was actually gained.
    pub fn gain(&mut self, side: Side, amount: i32) -> i32 {
        let pool = &mut self.pools[side];
        let before = pool.current;
        pool.current = pool.current.saturating_add(amount.max(0)).min(pool.max);
        pool.current - before
    }

    /// Move up to `amount` from `victim`'s current pool into `receiver`'s.
    ///
    /// The victim loses `min(amount, victim.current)`; the receiver gains that
    /// much, clamped to its own max. Returns `(drained, gained)`.
    pub fn drain(&mut self, receiver: Side, amount: i32) -> (i32, i32) {
        let victim = receiver.opponent();
        let drained = amount.max(0).min(self.pools[victim].current);
        if drained == 0 {
            return (0, 0);
        }
        self.pools[victim].current -= drained;
        let gained = self.gain(receiver, drained);
        (drained, gained)
    }

    /// Install a surge, replacing any previous one.
    pub fn set_surge(&mut self, side: Side, surge: ManaSurge) {
        self.surges[side] = surge;
    }

    /// Pay out one turn of the side's surge and count it down.
    ///
    /// Returns the mana actually gained.
    pub fn apply_surge(&mut self, side: Side) -> i32 {
        let surge = self.surges[side];
        if !surge.is_active() {
            return 0;
        }
        let gained = self.gain(side, surge.amount_per_turn);

        let slot = &mut self.surges[side];
        slot.turns_remaining -= 1;
        if slot.turns_remaining <= 0 {
            *slot = ManaSurge::default();
        }
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(current: i32, max: i32) -> ResourceLedger {
        let mut ledger = ResourceLedger::new(10);
        ledger.reset(Side::A, max);
        ledger.reset(Side::B, max);
        ledger.pools[Side::A].current = current;
        ledger.pools[Side::B].current = current;
        ledger
    }

    #[test]
    fn test_spend_success() {
        let mut ledger = ledger_with(3, 3);
        ledger.spend(Side::A, 2).unwrap();
        assert_eq!(ledger.current(Side::A), 1);
        assert_eq!(ledger.current(Side::B), 3);
    }

    #[test]
    fn test_spend_insufficient_changes_nothing() {
        let mut ledger = ledger_with(1, 1);
        let err = ledger.spend(Side::A, 2).unwrap_err();

        assert_eq!(
            err,
            LedgerError::Insufficient {
                required: 2,
                available: 1
            }
        );
        assert_eq!(ledger.current(Side::A), 1);
    }

    #[test]
    fn test_spend_negative_rejected() {
        let mut ledger = ledger_with(1, 1);
        assert_eq!(ledger.spend(Side::A, -1), Err(LedgerError::NegativeAmount(-1)));
    }

    #[test]
    fn test_grow_max_stops_at_cap() {
        let mut ledger = ResourceLedger::new(2);
        ledger.reset(Side::A, 1);

        assert!(ledger.grow_max(Side::A));
        assert!(!ledger.grow_max(Side::A));
        assert_eq!(ledger.max(Side::A), 2);
    }

    #[test]
    fn test_refill() {
        let mut ledger = ledger_with(0, 4);
        ledger.refill(Side::B);
        assert_eq!(ledger.current(Side::B), 4);
    }

    #[test]
    fn test_gain_clamped_to_max() {
        let mut ledger = ledger_with(3, 4);
        assert_eq!(ledger.gain(Side::A, 5), 1);
        assert_eq!(ledger.current(Side::A), 4);
    }

    #[test]
    fn test_gain_saturates() {
        let mut ledger = ledger_with(3, 4);
        assert_eq!(ledger.gain(Side::A, i32::MAX), 1);
        assert_eq!(ledger.current(Side::A), 4);
    }

    #[test]
    fn test_drain_bounded_by_victim_and_receiver() {
        let mut ledger = ResourceLedger::new(10);
        ledger.reset(Side::A, 3);
        ledger.reset(Side::B, 1);
        ledger.pools[Side::A].current = 2;

        // Victim B has 1, so only 1 moves; A has room for 1.
        assert_eq!(ledger.drain(Side::A, 3), (1, 1));
        assert_eq!(ledger.current(Side::B), 0);
        assert_eq!(ledger.current(Side::A), 3);

        // Receiver already full: victim still loses mana.
        ledger.pools[Side::B].current = 1;
        assert_eq!(ledger.drain(Side::A, 1), (1, 0));
        assert_eq!(ledger.current(Side::B), 0);
    }

    #[test]
    fn test_surge_counts_down_and_clears() {
        let mut ledger = ledger_with(0, 5);
        ledger.set_surge(
            Side::A,
            ManaSurge {
                turns_remaining: 2,
                amount_per_turn: 3,
            },
        );

        assert_eq!(ledger.apply_surge(Side::A), 3);
        assert_eq!(ledger.surge(Side::A).turns_remaining, 1);

        assert_eq!(ledger.apply_surge(Side::A), 2);
        assert_eq!(ledger.surge(Side::A), ManaSurge::default());
        assert_eq!(ledger.apply_surge(Side::A), 0);
    }

    #[test]
    fn test_surge_overwrites() {
        let mut ledger = ResourceLedger::new(10);
        let first = ManaSurge {
            turns_remaining: 1,
            amount_per_turn: 6,
        };
        let second = ManaSurge {
            turns_remaining: 3,
            amount_per_turn: 3,
        };
        ledger.set_surge(Side::B, first);
        ledger.set_surge(Side::B, second);
        assert_eq!(ledger.surge(Side::B), second);
    }
}
