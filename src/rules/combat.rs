//! Lane combat.
//!
//! Once per completed round the resolver ticks frost, trades damage in every
//! contested lane, then lets each unopposed card hit the opposing player.
//! Trades are simultaneous: both attackers use their attack from before the
//! exchange, so two cards can destroy each other.

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::{Side, SideMap};
use crate::zones::Board;

/// Outcome of one contested lane.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneClash {
    /// Lane index.
    pub lane: usize,
    /// Damage dealt by each side's card.
    pub dealt: SideMap<i32>,
    /// Cards removed by the exchange.
    pub removed: Vec<CardInstance>,
}

/// An unopposed card hitting the opposing player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectHit {
    /// Lane index.
    pub lane: usize,
    /// Side whose card attacked.
    pub attacker: Side,
    /// Damage dealt to the opposing player.
    pub damage: i32,
}

/// Everything a combat pass did, in resolution order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    /// Contested lanes, in lane order.
    pub clashes: Vec<LaneClash>,
    /// Unopposed attacks, in lane order.
    pub direct_hits: Vec<DirectHit>,
}

impl CombatReport {
    /// Total player damage taken by `side`.
    #[must_use]
    pub fn damage_to(&self, side: Side) -> i32 {
        self.direct_hits
            .iter()
            .filter(|hit| hit.attacker == side.opponent())
            .map(|hit| hit.damage)
            .sum()
    }

    /// Cards removed during the pass.
    pub fn removed(&self) -> impl Iterator<Item = &CardInstance> {
        self.clashes.iter().flat_map(|clash| clash.removed.iter())
    }
}

/// Stateless combat resolver.
#[derive(Clone, Copy, Debug, Default)]
pub struct CombatResolver;

impl CombatResolver {
    /// Run the end-of-round combat pass.
    ///
    /// Mutates the board (frost, damage, removals) and player HP. HP may go
    /// negative; the win check runs afterwards.
    pub fn resolve_round(board: &mut Board, hp: &mut SideMap<i32>) -> CombatReport {
        for side in Side::ALL {
            for card in board.occupied_mut(side) {
                card.tick_frost();
            }
        }

        let lane_count = board.lane_count();
        let mut report = CombatReport::default();

        for lane in 0..lane_count {
            if let Some(clash) = Self::resolve_lane(board, lane) {
                report.clashes.push(clash);
            }
        }

        for lane in 0..lane_count {
            let attackers = (board.get(Side::A, lane), board.get(Side::B, lane));
            let hit = match attackers {
                (Some(card), None) => Some((Side::A, card.effective_attack())),
                (None, Some(card)) => Some((Side::B, card.effective_attack())),
                _ => None,
            };
            if let Some((attacker, damage)) = hit {
                let target = &mut hp[attacker.opponent()];
                *target = target.saturating_sub(damage);
                tracing::debug!(lane, attacker = ?attacker, damage, "direct hit");
                report.direct_hits.push(DirectHit {
                    lane,
                    attacker,
                    damage,
                });
            }
        }

        report
    }

    /// Trade damage in a single lane if both sides hold a card.
    ///
    /// Does not tick frost or touch player HP.
    pub fn resolve_lane(board: &mut Board, lane: usize) -> Option<LaneClash> {
        let a_attack = board.get(Side::A, lane)?.effective_attack();
        let b_attack = board.get(Side::B, lane)?.effective_attack();

        let removed: Vec<_> = [
            board.damage(Side::A, lane, b_attack),
            board.damage(Side::B, lane, a_attack),
        ]
        .into_iter()
        .flatten()
        .collect();

        tracing::debug!(lane, a_attack, b_attack, removed = removed.len(), "lane clash");
        Some(LaneClash {
            lane,
            dealt: SideMap::new(|side| if side == Side::A { a_attack } else { b_attack }),
            removed,
        })
    }
}
