//! # Token Chain

use crate::types::{Pair, TokenType};

const NONE: usize = usize::MAX;

/// A doubly-linked token sequence, addressed by original position.
///
/// Merging the pair at position ``p`` rewrites ``p`` in place and
/// unlinks its right neighbor; so surviving positions keep their
/// relative order, and position ``0`` is always the head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenChain<T: TokenType> {
    tokens: Vec<T>,
    prev: Vec<usize>,
    next: Vec<usize>,
    alive: Vec<bool>,
    len: usize,
}

impl<T: TokenType, S: AsRef<[T]>> From<S> for TokenChain<T> {
    fn from(tokens: S) -> Self {
        Self::from_tokens(tokens.as_ref().to_vec())
    }
}

impl<T: TokenType> TokenChain<T> {
    const DEC: i32 = -1;
    const INC: i32 = 1;

    /// Create a new chain from tokens.
    pub fn from_tokens(tokens: Vec<T>) -> Self {
        let n = tokens.len();
        Self {
            tokens,
            prev: (0..n).map(|i| i.checked_sub(1).unwrap_or(NONE)).collect(),
            next: (0..n)
                .map(|i| if i + 1 < n { i + 1 } else { NONE })
                .collect(),
            alive: vec![true; n],
            len: n,
        }
    }

    /// The number of live tokens.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the chain empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Is this position still live?
    pub fn is_alive(
        &self,
        pos: usize,
    ) -> bool {
        self.alive.get(pos).copied().unwrap_or(false)
    }

    /// The position after `pos`.
    pub fn next(
        &self,
        pos: usize,
    ) -> Option<usize> {
        match self.next[pos] {
            NONE => None,
            p => Some(p),
        }
    }

    /// The position before `pos`.
    pub fn prev(
        &self,
        pos: usize,
    ) -> Option<usize> {
        match self.prev[pos] {
            NONE => None,
            p => Some(p),
        }
    }

    /// The pair starting at `pos`, if `pos` is live and has a successor.
    pub fn pair_at(
        &self,
        pos: usize,
    ) -> Option<Pair<T>> {
        if !self.is_alive(pos) {
            return None;
        }
        self.next(pos).map(|q| (self.tokens[pos], self.tokens[q]))
    }

    /// Iterate over ``(position, token)`` in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        let head = if self.is_empty() { None } else { Some(0) };
        core::iter::successors(head, |&p| self.next(p)).map(|p| (p, self.tokens[p]))
    }

    /// Iterate over ``(left position, pair)`` windows in sequence order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, Pair<T>)> + '_ {
        self.iter()
            .filter_map(|(p, _)| self.pair_at(p).map(|pair| (p, pair)))
    }

    /// Collect the live tokens.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().map(|(_, t)| t).collect()
    }

    /// Merge the pair at `pos` into `replacement`.
    ///
    /// The caller is responsible for checking that `pos` holds the pair
    /// (see [`Self::pair_at`]); and `replacement` must differ from both parents.
    ///
    /// # Arguments
    /// * `pos` - the position of the pair's left token.
    /// * `replacement` - the token to replace the pair with.
    /// * `on_merge` - a callback function to invoke for each incremental pair delta.
    ///   The function is called with:
    ///   - `pair` - the affected pair.
    ///   - `pos` - the position of the affected pair's left token.
    ///   - `delta` - `+1` for an added pair, `-1` for a removed pair.
    pub fn merge_at_cb<F>(
        &mut self,
        pos: usize,
        replacement: T,
        on_merge: &mut F,
    ) where
        F: FnMut(Pair<T>, usize, i32),
    {
        let Some(q) = self.next(pos) else {
            return;
        };
        let (a, b) = (self.tokens[pos], self.tokens[q]);

        // Previous pair.
        if let Some(x_pos) = self.prev(pos) {
            let x = self.tokens[x_pos];
            on_merge((x, a), x_pos, Self::DEC);
            on_merge((x, replacement), x_pos, Self::INC);
        }

        // Current pair.
        on_merge((a, b), pos, Self::DEC);

        // Next pair.
        if let Some(y_pos) = self.next(q) {
            let y = self.tokens[y_pos];
            on_merge((b, y), q, Self::DEC);
            on_merge((replacement, y), pos, Self::INC);
        }

        self.tokens[pos] = replacement;

        self.alive[q] = false;
        self.next[pos] = self.next[q];
        if let Some(y_pos) = self.next(q) {
            self.prev[y_pos] = pos;
        }
        self.len -= 1;
    }
}
