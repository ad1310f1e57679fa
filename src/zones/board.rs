//! The lane board.
//!
//! Two rows of equal length, one per side. Lane `i` of side A faces lane `i`
//! of side B. Each slot holds at most one `CardInstance`, and a card whose
//! health reaches 0 is removed from its slot in the same call that damaged it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardInstance;
use crate::core::{Side, SideMap};
use crate::error::{CommandError, Result};

/// One side's lanes.
pub type Row = SmallVec<[Option<CardInstance>; 5]>;

/// Both rows of lanes.
///
/// ## Example
///
/// ```
/// use lane_ccg::cards::{CardDefinition, CardInstance, CardType};
/// use lane_ccg::core::Side;
/// use lane_ccg::zones::Board;
///
/// let mut board = Board::new(5);
/// let def = CardDefinition::new("SQUIRE", "Squire", CardType::Creature).with_stats(1, 2);
/// board.place(CardInstance::from_definition(&def, Side::A, 0)).unwrap();
///
/// assert!(board.is_occupied(Side::A, 0));
/// let removed = board.damage(Side::A, 0, 2);
/// assert!(removed.is_some());
/// assert!(!board.is_occupied(Side::A, 0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: SideMap<Row>,
}

impl Board {
    /// Empty board with `lane_count` lanes per side.
    #[must_use]
    pub fn new(lane_count: usize) -> Self {
        Self {
            rows: SideMap::new(|_| std::iter::repeat_with(|| None).take(lane_count).collect()),
        }
    }

    /// Lanes per row.
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.rows[Side::A].len().min(self.rows[Side::B].len())
    }

    /// A side's lanes.
    #[must_use]
    pub fn row(&self, side: Side) -> &[Option<CardInstance>] {
        &self.rows[side]
    }

    /// Card at a lane, if any. Out-of-range lanes are empty.
    #[must_use]
    pub fn get(&self, side: Side, lane: usize) -> Option<&CardInstance> {
        self.rows[side].get(lane).and_then(Option::as_ref)
    }

    /// Mutable card at a lane, if any.
    pub fn get_mut(&mut self, side: Side, lane: usize) -> Option<&mut CardInstance> {
        self.rows[side].get_mut(lane).and_then(Option::as_mut)
    }

    /// Whether a lane holds a card.
    #[must_use]
    pub fn is_occupied(&self, side: Side, lane: usize) -> bool {
        self.get(side, lane).is_some()
    }

    /// Check that `lane` exists and is free on `side`'s row.
    pub fn check_free(&self, side: Side, lane: usize) -> Result<()> {
        let lane_count = self.rows[side].len();
        match self.rows[side].get(lane) {
            None => Err(CommandError::LaneOutOfRange { lane, lane_count }),
            Some(Some(_)) => Err(CommandError::LaneOccupied(lane)),
            Some(None) => Ok(()),
        }
    }

    /// Put an instance into the slot named by its `owner` and `lane`.
    pub fn place(&mut self, card: CardInstance) -> Result<()> {
        self.check_free(card.owner, card.lane)?;
        let (side, lane) = (card.owner, card.lane);
        self.rows[side][lane] = Some(card);
        Ok(())
    }

    /// Take the card out of a lane.
    pub fn remove(&mut self, side: Side, lane: usize) -> Option<CardInstance> {
        self.rows[side].get_mut(lane).and_then(Option::take)
    }

    /// Damage the card at a lane, removing it if it dies.
    ///
    /// Returns the removed card. Empty lanes are ignored.
    pub fn damage(&mut self, side: Side, lane: usize, amount: i32) -> Option<CardInstance> {
        let card = self.get_mut(side, lane)?;
        card.take_damage(amount);
        if card.is_dead() {
            self.remove(side, lane)
        } else {
            None
        }
    }

    /// Remove every dead card on a row, in lane order.
    pub fn remove_dead(&mut self, side: Side) -> Vec<CardInstance> {
        self.rows[side]
            .iter_mut()
            .filter(|slot| matches!(slot, Some(card) if card.is_dead()))
            .filter_map(Option::take)
            .collect()
    }

    /// Occupied lanes of a row, in lane order.
    pub fn occupied(&self, side: Side) -> impl Iterator<Item = &CardInstance> {
        self.rows[side].iter().flatten()
    }

    /// Mutable occupied lanes of a row, in lane order.
    pub fn occupied_mut(&mut self, side: Side) -> impl Iterator<Item = &mut CardInstance> {
        self.rows[side].iter_mut().flatten()
    }

    /// Lanes of a row that hold a card.
    #[must_use]
    pub fn occupied_lanes(&self, side: Side) -> Vec<usize> {
        self.occupied(side).map(|card| card.lane).collect()
    }

    /// Copies of `uid` on a row.
    #[must_use]
    pub fn count_uid(&self, side: Side, uid: &str) -> usize {
        self.occupied(side).filter(|card| card.uid.as_str() == uid).count()
    }

    /// Whether a row holds at least one copy of `uid`.
    #[must_use]
    pub fn has_uid(&self, side: Side, uid: &str) -> bool {
        self.occupied(side).any(|card| card.uid.as_str() == uid)
    }

    /// Total cards on the board.
    #[must_use]
    pub fn card_count(&self) -> usize {
        Side::ALL.iter().map(|&side| self.occupied(side).count()).sum()
    }
}
