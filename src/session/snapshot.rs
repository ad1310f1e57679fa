//! Read-only match snapshots and their deltas.
//!
//! A `MatchSnapshot` is everything both clients may see: phase, turn, HP,
//! mana, the board, and pile sizes. Hands are private and travel separately.
//! Snapshots diff into [`StateDelta`]s, and applying a diff to the older
//! snapshot reproduces the newer one.

use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, CardUid};
use crate::core::{ManaPool, Phase, Side, SideMap};
use crate::session::event::StateDelta;

/// Public view of a card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardView {
    /// Definition uid.
    pub uid: CardUid,
    /// Display name.
    pub name: String,
    /// Current attack.
    pub attack: i32,
    /// Current health.
    pub health: i32,
    /// Healing ceiling.
    pub max_health: i32,
    /// Rounds of frost left.
    pub frozen_rounds: i32,
}

impl From<&CardInstance> for CardView {
    fn from(card: &CardInstance) -> Self {
        Self {
            uid: card.uid.clone(),
            name: card.name.clone(),
            attack: card.attack,
            health: card.health,
            max_health: card.max_health,
            frozen_rounds: card.frozen_rounds,
        }
    }
}

/// Everything observers can see about a match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Lifecycle phase.
    pub phase: Phase,
    /// Side holding the turn.
    pub current_turn: Side,
    /// Round number.
    pub round: u32,
    /// Player HP.
    pub hp: SideMap<i32>,
    /// Mana pools.
    pub mana: SideMap<ManaPool>,
    /// Lanes of both rows.
    pub board: SideMap<Vec<Option<CardView>>>,
    /// Cards left in each deck.
    pub deck_sizes: SideMap<usize>,
    /// Cards in each hand.
    pub hand_sizes: SideMap<usize>,
    /// Winner once the match is over.
    pub winner: Option<Side>,
}

impl Default for MatchSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::AwaitingPlayers,
            current_turn: Side::A,
            round: 1,
            hp: SideMap::default(),
            mana: SideMap::default(),
            board: SideMap::default(),
            deck_sizes: SideMap::default(),
            hand_sizes: SideMap::default(),
            winner: None,
        }
    }
}

impl MatchSnapshot {
    /// Card view at a lane.
    #[must_use]
    pub fn card(&self, side: Side, lane: usize) -> Option<&CardView> {
        self.board[side].get(lane).and_then(Option::as_ref)
    }

    /// Deltas that turn `self` into `next`.
    #[must_use]
    pub fn diff(&self, next: &Self) -> Vec<StateDelta> {
        let mut deltas = Vec::new();

        if self.phase != next.phase {
            deltas.push(StateDelta::Phase(next.phase));
        }
        if self.current_turn != next.current_turn || self.round != next.round {
            deltas.push(StateDelta::Turn {
                current: next.current_turn,
                round: next.round,
            });
        }

        for side in Side::ALL {
            if self.hp[side] != next.hp[side] {
                deltas.push(StateDelta::Hp {
                    side,
                    value: next.hp[side],
                });
            }
            if self.mana[side] != next.mana[side] {
                deltas.push(StateDelta::Mana {
                    side,
                    pool: next.mana[side],
                });
            }
            if self.deck_sizes[side] != next.deck_sizes[side]
                || self.hand_sizes[side] != next.hand_sizes[side]
            {
                deltas.push(StateDelta::Counts {
                    side,
                    deck: next.deck_sizes[side],
                    hand: next.hand_sizes[side],
                });
            }

            let (old_row, new_row) = (&self.board[side], &next.board[side]);
            let resized = old_row.len() != new_row.len();
            for (lane, card) in new_row.iter().enumerate() {
                if resized || old_row.get(lane) != Some(card) {
                    deltas.push(StateDelta::Lane {
                        side,
                        lane,
                        card: card.clone(),
                    });
                }
            }
        }

        if self.winner != next.winner {
            if let Some(winner) = next.winner {
                deltas.push(StateDelta::Winner(winner));
            }
        }
        deltas
    }

    /// Apply one delta.
    pub fn apply(&mut self, delta: &StateDelta) {
        match delta {
            StateDelta::Phase(phase) => self.phase = *phase,
            StateDelta::Turn { current, round } => {
                self.current_turn = *current;
                self.round = *round;
            }
            StateDelta::Hp { side, value } => self.hp[*side] = *value,
            StateDelta::Mana { side, pool } => self.mana[*side] = *pool,
            StateDelta::Counts { side, deck, hand } => {
                self.deck_sizes[*side] = *deck;
                self.hand_sizes[*side] = *hand;
            }
            StateDelta::Lane { side, lane, card } => {
                let row = &mut self.board[*side];
                if row.len() <= *lane {
                    row.resize(*lane + 1, None);
                }
                row[*lane] = card.clone();
            }
            StateDelta::Winner(winner) => self.winner = Some(*winner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(uid: &str, health: i32) -> CardView {
        CardView {
            uid: CardUid::new(uid),
            name: uid.to_string(),
            attack: 1,
            health,
            max_health: health,
            frozen_rounds: 0,
        }
    }

    fn snapshot() -> MatchSnapshot {
        MatchSnapshot {
            phase: Phase::Active,
            hp: SideMap::with_value(20),
            board: SideMap::with_value(vec![None; 5]),
            ..MatchSnapshot::default()
        }
    }

    #[test]
    fn test_identical_snapshots_have_no_diff() {
        let a = snapshot();
        assert!(a.diff(&a.clone()).is_empty());
    }

    #[test]
    fn test_diff_reports_only_changes() {
        let before = snapshot();
        let mut after = before.clone();
        after.hp[Side::B] = 17;
        after.board[Side::A][2] = Some(view("X", 3));

        let deltas = before.diff(&after);
        assert_eq!(
            deltas,
            vec![
                StateDelta::Lane {
                    side: Side::A,
                    lane: 2,
                    card: Some(view("X", 3))
                },
                StateDelta::Hp {
                    side: Side::B,
                    value: 17
                },
            ]
        );
    }

    #[test]
    fn test_apply_diff_from_empty_reproduces() {
        let mut target = snapshot();
        target.board[Side::B][4] = Some(view("Y", 2));
        target.round = 3;
        target.winner = Some(Side::B);

        let mut mirror = MatchSnapshot::default();
        for delta in mirror.diff(&target) {
            mirror.apply(&delta);
        }
        assert_eq!(mirror, target);
    }
}
