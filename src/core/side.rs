//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! A match always has exactly two participants, `A` and `B`. Side A is the
//! host seat: it takes the first turn of every round and wins simultaneous
//! knockouts.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`. Backed by an array so it is
//! `Copy` whenever `T` is and never allocates.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two match participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// First seat (host). Acts first each round.
    A,
    /// Second seat. Its end of turn closes the round.
    B,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::A, Side::B];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Slot index (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "Side A"),
            Side::B => write!(f, "Side B"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use lane_ccg::core::{Side, SideMap};
///
/// let mut hp: SideMap<i32> = SideMap::with_value(20);
/// hp[Side::B] -= 3;
///
/// assert_eq!(hp[Side::A], 20);
/// assert_eq!(hp[Side::B], 17);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            data: [factory(Side::A), factory(Side::B)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Mutable references to both entries at once, in (`side`, opponent) order.
    pub fn pair_mut(&mut self, side: Side) -> (&mut T, &mut T) {
        let [a, b] = &mut self.data;
        match side {
            Side::A => (a, b),
            Side::B => (b, a),
        }
    }

    /// Iterate over (Side, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Side, &mut T) pairs in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        Side::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Transform every entry, keeping the side association.
    pub fn map<U>(&self, mut f: impl FnMut(Side, &T) -> U) -> SideMap<U> {
        SideMap::new(|side| f(side, self.get(side)))
    }
}

impl<T> IntoIterator for SideMap<T> {
    type Item = (Side, T);
    type IntoIter = std::iter::Zip<std::array::IntoIter<Side, 2>, std::array::IntoIter<T, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        Side::ALL.into_iter().zip(self.data)
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Side::A.opponent(), Side::B);
        assert_eq!(Side::B.opponent(), Side::A);
        assert_eq!(Side::A.opponent().opponent(), Side::A);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Side::A), "Side A");
        assert_eq!(format!("{}", Side::B), "Side B");
    }

    #[test]
    fn test_side_map_new() {
        let map = SideMap::new(|side| side.index() * 10);
        assert_eq!(map[Side::A], 0);
        assert_eq!(map[Side::B], 10);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<i32> = SideMap::with_value(0);
        map[Side::A] = 4;
        *map.get_mut(Side::B) += 7;

        assert_eq!(map[Side::A], 4);
        assert_eq!(map[Side::B], 7);
    }

    #[test]
    fn test_pair_mut() {
        let mut map = SideMap::new(|side| side.index() as i32);

        let (mine, theirs) = map.pair_mut(Side::B);
        *mine += 10;
        *theirs -= 10;

        assert_eq!(map[Side::B], 11);
        assert_eq!(map[Side::A], -10);
    }

    #[test]
    fn test_iter_order() {
        let map = SideMap::new(|side| side);
        let sides: Vec<_> = map.iter().map(|(s, v)| (s, *v)).collect();
        assert_eq!(sides, vec![(Side::A, Side::A), (Side::B, Side::B)]);
    }

    #[test]
    fn test_into_iter_moves_values() {
        let map = SideMap::new(|side| vec![side]);
        let owned: Vec<_> = map.into_iter().collect();
        assert_eq!(owned, vec![(Side::A, vec![Side::A]), (Side::B, vec![Side::B])]);
    }

    #[test]
    fn test_serialization() {
        let map: SideMap<i32> = SideMap::new(|side| side.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let back: SideMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
