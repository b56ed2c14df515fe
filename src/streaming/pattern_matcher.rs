//! KMP Header Matching over Circular Snapshots
//!
//! A snapshot taken from a circular capture buffer may have the frame header
//! split across its end and its start. The wraparound search scans a virtual
//! sequence of `2 * data_len` bytes (`data[i % data_len]`), which covers every
//! rotation without physically rotating the snapshot first:
//! - O(pattern + data) time, the failure table avoids re-scanning bytes
//! - No allocation during the scan
//! - Never reads outside the snapshot

use crate::error::PatternError;

/// A non-empty header pattern with its precomputed failure table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderPattern {
    bytes: Vec<u8>,
    /// Longest proper prefix that is also a suffix, per pattern position
    lps: Vec<usize>,
}

impl HeaderPattern {
    /// Build a pattern, rejecting empty input
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, PatternError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(PatternError::Empty);
        }

        let lps = build_lps(&bytes);
        Ok(Self { bytes, lps })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false, kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn lps(&self) -> &[usize] {
        &self.lps
    }

    /// First occurrence in `data`, no wraparound
    pub fn find_linear(&self, data: &[u8]) -> Option<usize> {
        if self.len() > data.len() {
            return None;
        }

        let mut state = MatchState::new();
        for (i, &byte) in data.iter().enumerate() {
            state.advance(byte, self);
            if state.is_match(self) {
                return Some(i + 1 - self.len());
            }
        }
        None
    }

    /// First occurrence in `data` treated as circular.
    ///
    /// Returns the offset (in `0..data.len()`) where the match begins; the
    /// match may run past the end of `data` and continue at its start.
    pub fn find_wrapped(&self, data: &[u8]) -> Option<usize> {
        let data_len = data.len();
        // A longer pattern would only "match" by overlapping itself
        if data_len == 0 || self.len() > data_len {
            return None;
        }

        let mut state = MatchState::new();
        for i in 0..2 * data_len {
            state.advance(data[i % data_len], self);
            if state.is_match(self) {
                return Some((i + 1 - self.len()) % data_len);
            }
        }
        None
    }
}

/// Failure table: `lps[i]` is the length of the longest proper prefix of
/// `pattern[..=i]` that is also its suffix.
pub fn build_lps(pattern: &[u8]) -> Vec<usize> {
    let mut lps = vec![0usize; pattern.len()];
    let mut len = 0;
    let mut i = 1;

    while i < pattern.len() {
        if pattern[i] == pattern[len] {
            len += 1;
            lps[i] = len;
            i += 1;
        } else if len != 0 {
            len = lps[len - 1];
        } else {
            lps[i] = 0;
            i += 1;
        }
    }

    lps
}

/// Streaming KMP state for a single pattern
#[derive(Clone, Debug, Default)]
pub struct MatchState {
    /// Number of pattern bytes currently matched
    position: usize,
}

impl MatchState {
    pub fn new() -> Self {
        Self { position: 0 }
    }

    /// Advance by one byte - amortized O(1)
    pub fn advance(&mut self, byte: u8, pattern: &HeaderPattern) {
        // Continue past a completed match as if it had just failed
        if self.position == pattern.len() {
            self.position = pattern.lps[self.position - 1];
        }

        while self.position > 0 && pattern.bytes[self.position] != byte {
            self.position = pattern.lps[self.position - 1];
        }

        if pattern.bytes[self.position] == byte {
            self.position += 1;
        }
    }

    /// Check if the pattern has been fully matched
    pub fn is_match(&self, pattern: &HeaderPattern) -> bool {
        self.position == pattern.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pattern(bytes: &[u8]) -> HeaderPattern {
        HeaderPattern::new(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert_eq!(HeaderPattern::new(Vec::<u8>::new()), Err(PatternError::Empty));
    }

    #[test]
    fn test_lps_table() {
        assert_eq!(build_lps(b"AAAA"), vec![0, 1, 2, 3]);
        assert_eq!(build_lps(b"ABAB"), vec![0, 0, 1, 2]);
        assert_eq!(build_lps(b"AABAACAABAA"), vec![0, 1, 0, 1, 2, 0, 1, 2, 3, 4, 5]);
        assert_eq!(build_lps(b"X"), vec![0]);

        let p = pattern(b"ABAB");
        assert_eq!(p.lps(), &[0, 0, 1, 2]);
        assert_eq!(p.as_bytes(), b"ABAB");
    }

    #[test]
    fn test_linear_match() {
        let p = pattern(b"ABC");
        assert_eq!(p.find_linear(b"xxABCxx"), Some(2));
        assert_eq!(p.find_linear(b"ABABC"), Some(2));
        assert_eq!(p.find_linear(b"xxABxCx"), None);
    }

    #[test]
    fn test_linear_does_not_wrap() {
        let p = pattern(b"AB");
        assert_eq!(p.find_linear(b"BxxA"), None);
        assert_eq!(p.find_wrapped(b"BxxA"), Some(3));
    }

    #[test]
    fn test_wrapped_match_at_boundary() {
        let p = pattern(b"ABC");
        // "C" at the start, "AB" at the end
        assert_eq!(p.find_wrapped(b"Cxyz1AB"), Some(5));
    }

    #[test]
    fn test_wrapped_prefers_first_start() {
        let p = pattern(b"AB");
        assert_eq!(p.find_wrapped(b"xABxAB"), Some(1));
    }

    #[test]
    fn test_partial_match_restart() {
        // Mismatch after a partial match must not skip the real start
        let p = pattern(b"AAB");
        assert_eq!(p.find_wrapped(b"AAAB"), Some(1));
        assert_eq!(p.find_linear(b"AAAAB"), Some(2));
    }

    #[test]
    fn test_pattern_longer_than_data() {
        let p = pattern(b"AAA");
        // Doubling would let a periodic snapshot match itself
        assert_eq!(p.find_wrapped(b"AA"), None);
        assert_eq!(p.find_linear(b"AA"), None);
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(pattern(b"A").find_wrapped(b""), None);
    }

    #[test]
    fn test_whole_snapshot_is_pattern() {
        let p = pattern(b"ABCD");
        assert_eq!(p.find_wrapped(b"CDAB"), Some(2));
        assert_eq!(p.find_wrapped(b"ABCD"), Some(0));
    }

    #[test]
    fn test_match_state_streaming() {
        let p = pattern(b"ABA");
        let mut state = MatchState::new();

        let mut hits = 0;
        for &b in b"ABABA" {
            state.advance(b, &p);
            if state.is_match(&p) {
                hits += 1;
            }
        }
        // Overlapping occurrences at 0 and 2
        assert_eq!(hits, 2);

        state.reset();
        assert_eq!(state.position(), 0);
    }

    proptest! {
        #[test]
        fn prop_wrapped_finds_rotated_header(
            header in proptest::collection::vec(any::<u8>(), 1..6),
            filler in proptest::collection::vec(any::<u8>(), 0..24),
            rotation in 0usize..64,
        ) {
            let p = HeaderPattern::new(header.clone()).unwrap();
            let mut frame = header.clone();
            frame.extend_from_slice(&filler);
            let k = rotation % frame.len();
            frame.rotate_left(k);

            let pos = p.find_wrapped(&frame);
            prop_assert!(pos.is_some());

            let pos = pos.unwrap();
            let realigned: Vec<u8> = (0..frame.len())
                .map(|i| frame[(pos + i) % frame.len()])
                .collect();
            prop_assert_eq!(&realigned[..header.len()], &header[..]);
        }

        #[test]
        fn prop_linear_agrees_with_naive(
            header in proptest::collection::vec(0u8..3, 1..4),
            data in proptest::collection::vec(0u8..3, 0..32),
        ) {
            let p = HeaderPattern::new(header.clone()).unwrap();
            let naive = data.windows(header.len()).position(|w| w == &header[..]);
            prop_assert_eq!(p.find_linear(&data), naive);
        }
    }
}
