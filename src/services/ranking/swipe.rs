//! Swipe deck: walk an ordered sequence with a cursor, accepting or rejecting
//! each entry. Finished once the cursor passes the end.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Debug, Clone)]
pub struct SwipeSession<T> {
    deck: Vec<T>,
    cursor: usize,
    accepted: Vec<T>,
}

impl<T: Clone + PartialEq> SwipeSession<T> {
    pub fn new(deck: Vec<T>) -> Self {
        Self {
            deck,
            cursor: 0,
            accepted: Vec::new(),
        }
    }

    /// Deck order shuffled with an explicit seed; the same seed gives the same order.
    pub fn shuffled(deck: Vec<T>, seed: u64) -> Self {
        let mut session = Self::new(deck);
        session.shuffle(seed);
        session
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn deck(&self) -> &[T] {
        &self.deck
    }

    pub fn current(&self) -> Option<&T> {
        self.deck.get(self.cursor)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.deck.len()
    }

    /// Records the current entry and advances. `None` once finished.
    pub fn accept(&mut self) -> Option<&T> {
        let current = self.deck.get(self.cursor)?.clone();
        self.cursor += 1;
        let index = match self.accepted.iter().position(|entry| *entry == current) {
            Some(index) => index,
            None => {
                self.accepted.push(current);
                self.accepted.len() - 1
            }
        };
        self.accepted.get(index)
    }

    /// Advances without recording. Returns false once finished.
    pub fn reject(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Step forward without a decision; never moves past the last entry.
    pub fn next(&mut self) -> bool {
        if self.cursor + 1 < self.deck.len() {
            self.cursor += 1;
            return true;
        }
        false
    }

    /// Step back without undoing an earlier accept.
    pub fn previous(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor = (self.cursor - 1).min(self.deck.len().saturating_sub(1));
            return true;
        }
        false
    }

    pub fn accepted(&self) -> &[T] {
        &self.accepted
    }

    /// Fraction of the deck already swiped, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.deck.is_empty() {
            return 0.0;
        }
        self.cursor.min(self.deck.len()) as f64 / self.deck.len() as f64
    }

    /// Back to the first entry with nothing accepted, optionally re-shuffling.
    pub fn reset(&mut self, seed: Option<u64>) {
        self.cursor = 0;
        self.accepted.clear();
        if let Some(seed) = seed {
            self.shuffle(seed);
        }
    }

    fn shuffle(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.deck.shuffle(&mut rng);
    }
}

#[cfg(test)]
#[path = "tests/swipe_tests.rs"]
mod tests;
