//! Word-packed visited sets for single-threaded graph traversals.
//!
//! Every algorithm in this crate runs on one thread over a frozen graph, so
//! the set is a plain `Vec<usize>` of bit words mutated through `&mut self`.
//! The same word layout backs the rows of the dense reachability matrix.

const WORD_BITS: usize = usize::BITS as usize;

/// Returns the word index and bit mask addressing `bit`.
#[inline(always)]
pub(crate) fn bit_word_mask(bit: usize) -> (usize, usize) {
    (bit / WORD_BITS, 1usize << (bit % WORD_BITS))
}

/// Number of words needed to hold `bits` bits.
#[inline(always)]
pub(crate) fn words_for(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

/// A dense, word-packed visited set for fixed-size graphs.
#[derive(Clone, Debug)]
pub(crate) struct VisitedSet {
    bits: usize,
    words: Vec<usize>,
}

impl VisitedSet {
    #[inline]
    pub(crate) fn new(bits: usize) -> Self {
        Self {
            bits,
            words: vec![0; words_for(bits)],
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.bits
    }

    /// Returns `true` iff this call observed the node as not-yet-visited and marks it visited.
    ///
    /// # Panics
    /// Panics if `node >= self.len()`.
    #[inline(always)]
    pub(crate) fn try_visit(&mut self, node: usize) -> bool {
        assert!(node < self.len(), "node {node} out of bounds");
        let (word, mask) = bit_word_mask(node);
        let prev = self.words[word];
        self.words[word] = prev | mask;
        prev & mask == 0
    }

    /// Clears the flag for `node`, making it available to later searches.
    #[inline(always)]
    pub(crate) fn unvisit(&mut self, node: usize) {
        assert!(node < self.len(), "node {node} out of bounds");
        let (word, mask) = bit_word_mask(node);
        self.words[word] &= !mask;
    }

    #[inline(always)]
    pub(crate) fn is_visited(&self, node: usize) -> bool {
        assert!(node < self.len(), "node {node} out of bounds");
        let (word, mask) = bit_word_mask(node);
        self.words[word] & mask != 0
    }

    /// Raw bit words, for callers that persist the visited set as a bit row.
    #[inline]
    pub(crate) fn into_words(self) -> Vec<usize> {
        self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_visit_reports_first_visit_only() {
        let mut set = VisitedSet::new(130);
        assert_eq!(set.len(), 130);
        assert!(set.try_visit(0));
        assert!(!set.try_visit(0));
        assert!(set.try_visit(129));
        assert!(set.is_visited(129));
        assert!(!set.is_visited(64));
    }

    #[test]
    fn unvisit_resets_one_flag() {
        let mut set = VisitedSet::new(70);
        set.try_visit(3);
        set.try_visit(65);
        set.unvisit(3);
        assert!(!set.is_visited(3));
        assert!(set.is_visited(65));
    }

    #[test]
    fn word_layout_matches_mask_helper() {
        let mut set = VisitedSet::new(WORD_BITS + 2);
        set.try_visit(WORD_BITS + 1);
        let words = set.into_words();
        let (word, mask) = bit_word_mask(WORD_BITS + 1);
        assert_eq!(word, 1);
        assert_eq!(words[word], mask);
    }
}
