//! Opening book.
//!
//! Maps the history of a game (as a token: every move written as its row
//! digit followed by its column digit) to the reply recommended for the side
//! to move. Books are built offline from a game log, where every line starts
//! with the game's first plies written as `sign letter digit` triplets.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use reversi_core::Move;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::book_data::BUILTIN_ENTRIES;
use crate::error::Result;

/// Characters one ply takes up in the game log.
const PLY_WIDTH: usize = 3;

/// Shape of a book built from a game log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookParams {
    /// Plies read from the start of each game
    pub plies: usize,
    /// Number of most frequent openings kept
    pub top: usize,
}

impl Default for BookParams {
    fn default() -> Self {
        Self { plies: 10, top: 70 }
    }
}

/// Token for a move history.
pub fn history_token(moves: &[Move]) -> String {
    let mut token = String::with_capacity(moves.len() * 2);
    for mv in moves {
        token.push(char::from(b'0' + mv.row));
        token.push(char::from(b'0' + mv.col));
    }
    token
}

/// Inverse of [`history_token`]; None for anything that is not pairs of
/// digits in `0..=7`.
pub fn parse_token(token: &str) -> Option<Vec<Move>> {
    let digits: Vec<u8> = token
        .bytes()
        .map(|b| match b {
            b'0'..=b'7' => Some(b - b'0'),
            _ => None,
        })
        .collect::<Option<_>>()?;
    if digits.len() % 2 != 0 {
        return None;
    }
    Some(digits.chunks(2).map(|pair| Move::new(pair[0], pair[1])).collect())
}

/// Log character to board coordinate: letters `a..h` count from 0, digits
/// `1..8` count down from 7. Everything else (signs, padding) is dropped.
fn log_digit(ch: char) -> Option<u8> {
    match ch {
        'a'..='h' => Some(ch as u8 - b'a'),
        '1'..='8' => Some(7 - (ch as u8 - b'1')),
        _ => None,
    }
}

/// The first `plies` moves of a game log line, or None if the line holds
/// fewer.
fn normalize_line(line: &str, plies: usize) -> Option<String> {
    let token: String = line
        .chars()
        .take(plies * PLY_WIDTH)
        .filter_map(log_digit)
        .map(|d| char::from(b'0' + d))
        .collect();
    (token.len() == plies * 2).then_some(token)
}

/// Lookup table from history token to recommended reply. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpeningBook {
    entries: HashMap<String, Move>,
}

/// On-disk form: a JSON object of token -> `[row, col]`.
#[derive(Serialize, Deserialize)]
struct BookFile {
    entries: BTreeMap<String, [u8; 2]>,
}

impl OpeningBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// The precomputed book shipped with the engine.
    pub fn builtin() -> Self {
        let entries = BUILTIN_ENTRIES
            .iter()
            .map(|&(token, row, col)| (token.to_string(), Move::new(row, col)))
            .collect();
        Self { entries }
    }

    /// Builds a book from game log lines.
    ///
    /// Distinct openings are ranked by frequency, ties going to the one seen
    /// last, and only the top `params.top` are kept. Every prefix of a kept
    /// opening, up to but excluding its last ply, maps to the move that
    /// follows it. Where two openings share a prefix, the more frequent wins.
    pub fn from_lines<I, L>(lines: I, params: BookParams) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        // Counts in first-seen order.
        let mut tally: Vec<(String, u32)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut skipped = 0usize;

        for line in lines {
            let Some(opening) = normalize_line(line.as_ref(), params.plies) else {
                skipped += 1;
                continue;
            };
            match index.get(&opening) {
                Some(&i) => tally[i].1 += 1,
                None => {
                    index.insert(opening.clone(), tally.len());
                    tally.push((opening, 1));
                }
            }
        }

        tally.sort_by_key(|&(_, count)| count);
        let kept = &tally[tally.len().saturating_sub(params.top)..];

        let mut book = OpeningBook::new();
        for (opening, _) in kept {
            let digits = opening.as_bytes();
            for end in (0..params.plies.saturating_sub(1) * 2).step_by(2) {
                let reply = Move::new(digits[end] - b'0', digits[end + 1] - b'0');
                book.entries.insert(opening[..end].to_string(), reply);
            }
        }

        debug!(
            openings = tally.len(),
            kept = kept.len(),
            skipped,
            entries = book.len(),
            "built opening book"
        );
        book
    }

    /// Builds a book from a game log file.
    pub fn from_game_log(path: &Path, params: BookParams) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_lines(text.lines(), params))
    }

    pub fn lookup(&self, token: &str) -> Option<Move> {
        self.entries.get(token).copied()
    }

    pub fn lookup_history(&self, moves: &[Move]) -> Option<Move> {
        self.lookup(&history_token(moves))
    }

    pub fn insert(&mut self, token: impl Into<String>, mv: Move) {
        self.entries.insert(token.into(), mv);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Move)> {
        self.entries.iter().map(|(token, &mv)| (token.as_str(), mv))
    }

    pub fn to_json(&self) -> Result<String> {
        let file = BookFile {
            entries: self
                .entries
                .iter()
                .map(|(token, mv)| (token.clone(), [mv.row, mv.col]))
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let file: BookFile = serde_json::from_str(text)?;
        let entries = file
            .entries
            .into_iter()
            .map(|(token, [row, col])| (token, Move::new(row, col)))
            .collect();
        Ok(Self { entries })
    }

    /// Save book to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load book from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
#[path = "book_tests.rs"]
mod book_tests;
