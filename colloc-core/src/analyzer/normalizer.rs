//! Text normalization.
//!
//! First stage of the reference tokenizer: collapses whitespace runs and
//! optionally case-folds the input before it is segmented into words.

use memchr::memchr3;

#[inline(always)]
const fn is_ascii_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\t' | b'\r')
}

/// Configuration options for text normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Converts all characters to lowercase (Unicode-aware).
    pub lowercase: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self { lowercase: true }
    }
}

/// Unicode text normalizer.
///
/// Performs the following operations:
/// - Optionally converts all characters to lowercase (Unicode-aware)
/// - Collapses consecutive ASCII whitespace into single spaces
/// - Removes leading/trailing ASCII whitespace
///
/// Pure-ASCII input that is already clean is copied without a per-char pass.
///
/// # Examples
///
/// ```
/// use colloc_core::analyzer::normalizer::{NormalizerConfig, TextNormalizer};
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(normalizer.normalize("  HELLO  WORLD  "), "hello world");
///
/// let keep_case = TextNormalizer::new(NormalizerConfig { lowercase: false });
/// assert_eq!(keep_case.normalize("New\tYork"), "New York");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[inline(always)]
    pub const fn config(&self) -> NormalizerConfig {
        self.config
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Reuses the buffer's capacity if sufficient, growing only when necessary.
    /// Clears the buffer before writing.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let trimmed = input.trim_matches(|c: char| c.is_ascii() && is_ascii_ws(c as u8));

        // Clean ASCII: only single spaces, nothing to fold
        if trimmed.is_ascii()
            && memchr3(b'\n', b'\t', b'\r', trimmed.as_bytes()).is_none()
            && !trimmed.contains("  ")
            && !(self.config.lowercase && trimmed.bytes().any(|b| b.is_ascii_uppercase()))
        {
            out.push_str(trimmed);
            return;
        }

        let mut prev_space = false;
        for ch in trimmed.chars() {
            if ch.is_ascii() && is_ascii_ws(ch as u8) {
                if !prev_space {
                    out.push(' ');
                    prev_space = true;
                }
                continue;
            }

            prev_space = false;
            if self.config.lowercase {
                out.extend(ch.to_lowercase());
            } else {
                out.push(ch);
            }
        }
    }

    /// Normalizes text into a new String.
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::new();
        self.normalize_into(input, &mut out);
        out
    }
}
