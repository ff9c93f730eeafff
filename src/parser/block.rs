//! Struct-table block scanning.
//!
//! Table files are sequences of `[KEY] = { ... }` entries. The scanner finds
//! each key, then counts braces from the first `{` after it until the depth
//! returns to zero. Braces are counted literally: a `{` or `}` inside a
//! string literal or comment is counted like any other. A block still open
//! at end of input is dropped.

use regex::Regex;

/// One `[KEY] = { ... }` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// The bracketed key, e.g. `SPECIES_BULBASAUR`.
    pub key: &'a str,
    /// Text from the opening `{` through its matching `}` inclusive.
    pub body: &'a str,
    /// 1-indexed line of the key.
    pub line: usize,
}

/// Build the key pattern for a constant namespace: `[PREFIX_X] =`.
pub fn key_pattern(prefix: &str) -> Regex {
    Regex::new(&format!(r"\[({}\w+)\]\s*=", regex::escape(prefix)))
        .expect("escaped key prefix is a valid pattern")
}

/// Scan `source` for blocks whose key matches `key`.
///
/// `key` must have the bracketed name as capture group 1 (see
/// [`key_pattern`]).
pub fn scan_blocks<'a>(source: &'a str, key: &'a Regex) -> Blocks<'a> {
    Blocks {
        source,
        key,
        cursor: 0,
        line: 1,
        line_offset: 0,
        done: false,
    }
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Idle,
    Scanning { depth: usize },
}

/// Lazy iterator over the blocks of one file.
pub struct Blocks<'a> {
    source: &'a str,
    key: &'a Regex,
    cursor: usize,
    /// Line number at `line_offset`, advanced incrementally.
    line: usize,
    line_offset: usize,
    done: bool,
}

impl<'a> Blocks<'a> {
    fn line_at(&mut self, offset: usize) -> usize {
        self.line += self.source[self.line_offset..offset].matches('\n').count();
        self.line_offset = offset;
        self.line
    }

    /// Find the `}` matching the `{` at `open`, if the file closes it.
    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut state = ScanState::Idle;
        for (i, b) in self.source.as_bytes()[open..].iter().enumerate() {
            state = match (state, *b) {
                (ScanState::Idle, b'{') => ScanState::Scanning { depth: 1 },
                (ScanState::Idle, _) => ScanState::Idle,
                (ScanState::Scanning { depth }, b'{') => ScanState::Scanning { depth: depth + 1 },
                (ScanState::Scanning { depth: 1 }, b'}') => return Some(open + i),
                (ScanState::Scanning { depth }, b'}') => ScanState::Scanning { depth: depth - 1 },
                (scanning, _) => scanning,
            };
        }
        None
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        while !self.done {
            let Some(caps) = self.key.captures_at(self.source, self.cursor) else {
                self.done = true;
                break;
            };
            let whole = caps.get(0)?;
            let key = caps.get(1)?;

            let Some(open_rel) = self.source[whole.end()..].find('{') else {
                self.done = true;
                break;
            };
            let open = whole.end() + open_rel;

            // A key with no table of its own: the next key owns this brace.
            if let Some(next_key) = self.key.find_at(self.source, whole.end()) {
                if next_key.start() < open {
                    self.cursor = next_key.start();
                    continue;
                }
            }

            let Some(close) = self.matching_close(open) else {
                self.done = true;
                break;
            };

            let line = self.line_at(whole.start());
            self.cursor = close + 1;
            return Some(Block {
                key: key.as_str(),
                body: &self.source[open..=close],
                line,
            });
        }
        None
    }
}
