//! # Pair Position Index

use std::collections::BTreeSet;

use crate::{
    training::utility::token_chain::TokenChain,
    types::{CommonHashMap, Pair, TokenType},
};

/// A map from [`Pair`] to the ordered set of its left positions.
pub type PairPositionMap<T> = CommonHashMap<Pair<T>, BTreeSet<usize>>;

/// An index of every adjacent pair occurrence in a [`TokenChain`].
///
/// A pair's count is the size of its position set (overlapping occurrences
/// are all counted); its first occurrence is the set's minimum.
#[derive(Debug, Clone)]
pub struct PairPositionIndex<T: TokenType> {
    positions: PairPositionMap<T>,
}

impl<T: TokenType> Default for PairPositionIndex<T> {
    fn default() -> Self {
        Self {
            positions: Default::default(),
        }
    }
}

impl<T: TokenType> PairPositionIndex<T> {
    /// Build a [`PairPositionIndex`] over every pair in a chain.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(chain)))]
    pub fn from_chain(chain: &TokenChain<T>) -> Self {
        let mut index = Self::default();
        for (pos, pair) in chain.pairs() {
            index.insert(pair, pos);
        }
        index
    }

    /// The number of distinct pairs.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Is the index empty?
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The occurrence count of a pair.
    pub fn count(
        &self,
        pair: &Pair<T>,
    ) -> usize {
        self.positions.get(pair).map_or(0, BTreeSet::len)
    }

    /// The ``(count, first position)`` of a pair, if it occurs.
    pub fn stats(
        &self,
        pair: &Pair<T>,
    ) -> Option<(usize, usize)> {
        let positions = self.positions.get(pair)?;
        positions.first().map(|&first| (positions.len(), first))
    }

    /// Iterate over ``(pair, count, first position)`` for every pair.
    pub fn iter(&self) -> impl Iterator<Item = (Pair<T>, usize, usize)> + '_ {
        self.positions.iter().filter_map(|(&pair, positions)| {
            positions
                .first()
                .map(|&first| (pair, positions.len(), first))
        })
    }

    /// Record an occurrence.
    pub fn insert(
        &mut self,
        pair: Pair<T>,
        pos: usize,
    ) {
        self.positions.entry(pair).or_default().insert(pos);
    }

    /// Remove an occurrence; returns whether it was present.
    ///
    /// Pairs with no remaining occurrences are dropped.
    pub fn remove(
        &mut self,
        pair: &Pair<T>,
        pos: usize,
    ) -> bool {
        let Some(positions) = self.positions.get_mut(pair) else {
            return false;
        };
        let removed = positions.remove(&pos);
        if positions.is_empty() {
            self.positions.remove(pair);
        }
        removed
    }

    /// Remove a pair, returning its positions.
    pub fn take(
        &mut self,
        pair: &Pair<T>,
    ) -> Option<BTreeSet<usize>> {
        self.positions.remove(pair)
    }
}
