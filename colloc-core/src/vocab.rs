//! Interned Token Storage
//!
//! Eliminates per-token allocations by storing every distinct token in a
//! single contiguous buffer. Tokens are referenced by (offset, length) spans
//! and addressed by dense [`TokenId`]s.
//!
//! ## Memory Layout
//!
//! ```text
//! Buffer: [the][cat][sat][ran]...[free space]
//!          ^    ^    ^    ^
//!          |    |    |    |
//! Spans:  (0,3)(3,3)(6,3)(9,3) ...
//! ```
//!
//! ## Lookup
//!
//! Token text is hashed with `FxHasher`; the hash maps to a small bucket of
//! candidate ids (almost always one), which are confirmed against the buffer.
//!
//! - Intern: O(1) amortized - hash + bump pointer
//! - Resolve: O(1) - slice from buffer
//! - Memory overhead: 8 bytes per distinct token plus one index entry

use std::hash::{Hash, Hasher};

use colloc_types::TokenId;
use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;

/// Token reference - 8 bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSpan {
    offset: u32,
    len: u32,
}

impl TokenSpan {
    /// Creates a new token span.
    #[inline(always)]
    pub const fn new(offset: u32, len: u32) -> Self {
        Self { offset, len }
    }

    /// Returns the byte offset in the buffer.
    #[inline(always)]
    pub const fn offset(self) -> usize {
        self.offset as usize
    }

    /// Returns the byte length.
    #[inline(always)]
    pub const fn len(self) -> usize {
        self.len as usize
    }
}

#[inline(always)]
fn hash_token(token: &str) -> u64 {
    let mut hasher = FxHasher::default();
    token.hash(&mut hasher);
    hasher.finish()
}

/// String interner for token text.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Contiguous storage for every distinct token
    buffer: String,
    /// Token spans, indexed by id
    spans: Vec<TokenSpan>,
    /// Hash of token text -> ids sharing that hash
    index: FxHashMap<u64, SmallVec<[TokenId; 1]>>,
}

impl Vocabulary {
    /// Creates a new empty vocabulary.
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024, 1024)
    }

    /// Creates a vocabulary with pre-allocated capacity.
    pub fn with_capacity(buffer_cap: usize, token_cap: usize) -> Self {
        Self {
            buffer: String::with_capacity(buffer_cap),
            spans: Vec::with_capacity(token_cap),
            index: FxHashMap::default(),
        }
    }

    /// Returns the number of distinct tokens.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns true if no tokens are stored.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Removes all tokens, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.spans.clear();
        self.index.clear();
    }

    /// Returns the id of `token`, storing it first if unseen.
    ///
    /// Ids are assigned densely in first-seen order.
    #[inline]
    pub fn intern(&mut self, token: &str) -> TokenId {
        let hash = hash_token(token);

        if let Some(bucket) = self.index.get(&hash) {
            for &id in bucket {
                if self.text(id) == token {
                    return id;
                }
            }
        }

        let id = self.spans.len() as TokenId;
        let offset = self.buffer.len() as u32;
        self.buffer.push_str(token);
        self.spans.push(TokenSpan::new(offset, token.len() as u32));
        self.index.entry(hash).or_default().push(id);
        id
    }

    /// Looks up the id of `token` without storing it.
    #[inline]
    pub fn get(&self, token: &str) -> Option<TokenId> {
        self.index
            .get(&hash_token(token))?
            .iter()
            .copied()
            .find(|&id| self.text(id) == token)
    }

    /// Returns the text of a token id.
    #[inline(always)]
    pub fn resolve(&self, id: TokenId) -> Option<&str> {
        let span = self.spans.get(id as usize)?;
        self.buffer.get(span.offset()..span.offset() + span.len())
    }

    #[inline(always)]
    fn text(&self, id: TokenId) -> &str {
        self.resolve(id).unwrap_or_default()
    }

    /// Returns the total bytes used by stored token text.
    #[inline(always)]
    pub fn bytes_used(&self) -> usize {
        self.buffer.len()
    }

    /// Iterates over `(id, text)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &str)> + '_ {
        (0..self.spans.len() as TokenId).map(move |id| (id, self.text(id)))
    }
}
