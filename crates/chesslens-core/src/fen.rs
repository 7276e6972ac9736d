//! Field-level edits of FEN text.
//!
//! ChessLens never needs a full position parser: the editor only touches the
//! "side to move" field, and the analysis link-out only rewrites separators.
//! Everything here is pure and infallible.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const FIELD_SEPARATOR: char = ' ';

/// Tail appended when a FEN has no side-to-move field at all.
///
/// The castling, en-passant and clock fields are guesses. The result always
/// parses, but it is not a claim about the true position.
const SYNTHESIZED_TAIL: &str = "- - 0 1";

/// The side whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Side {
    /// The FEN letter for this side.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::White => "w",
            Side::Black => "b",
        }
    }

    /// The other side.
    pub fn opposite(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Side::White),
            "b" | "black" => Ok(Side::Black),
            other => Err(format!("Unknown side to move: '{}'", other)),
        }
    }
}

/// Returns the raw second field of `fen`, or `"w"` when there is none.
pub fn raw_side_to_move(fen: &str) -> &str {
    fen.split(FIELD_SEPARATOR).nth(1).unwrap_or("w")
}

/// Returns the side to move.
///
/// Anything other than `b` in the second field reads as White, matching the
/// default for FENs that have no second field.
pub fn side_to_move(fen: &str) -> Side {
    match raw_side_to_move(fen) {
        "b" => Side::Black,
        _ => Side::White,
    }
}

/// Returns `fen` with its side-to-move field replaced by `side`.
///
/// A FEN with at least two fields keeps every other field byte for byte. A
/// bare placement (no separator) gets a minimal tail synthesized, see
/// [`SYNTHESIZED_TAIL`].
pub fn set_side_to_move(fen: &str, side: Side) -> String {
    let mut fields: Vec<&str> = fen.split(FIELD_SEPARATOR).collect();
    if fields.len() > 1 {
        fields[1] = side.as_str();
        fields.join(" ")
    } else {
        format!("{} {} {}", fen, side, SYNTHESIZED_TAIL)
    }
}

/// Builds the external analysis link for `fen`.
///
/// Spaces become underscores and the result is appended to `base` as a path
/// segment.
pub fn analysis_url(base: &str, fen: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        fen.replace(FIELD_SEPARATOR, "_")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_side_to_move_reads_second_field() {
        assert_eq!(side_to_move(START), Side::White);
        assert_eq!(side_to_move("8/8/8/8/8/8/8/8 b - - 0 1"), Side::Black);
    }

    #[test]
    fn test_side_to_move_defaults_to_white() {
        assert_eq!(side_to_move("8/8/8/8/8/8/8/8"), Side::White);
        assert_eq!(side_to_move(""), Side::White);
        assert_eq!(raw_side_to_move("8/8/8/8/8/8/8/8"), "w");
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let inputs = [
            START,
            "8/8/8/8/8/8/8/8 b - - 0 1",
            "8/8/8/8/8/8/8/8 w",
            "x y",
            "a  b",
            " trailing",
        ];
        for fen in inputs {
            for side in [Side::White, Side::Black] {
                let updated = set_side_to_move(fen, side);
                assert_eq!(side_to_move(&updated), side, "fen: {fen:?}");
            }
        }
    }

    #[test]
    fn test_set_keeps_other_fields() {
        let updated = set_side_to_move(START, Side::Black);
        assert_eq!(
            updated,
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn test_bare_placement_gets_six_fields() {
        let updated = set_side_to_move("8/8/8/8/8/8/8/8", Side::Black);
        let fields: Vec<&str> = updated.split(' ').collect();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[1], "b");
        assert_eq!(updated, "8/8/8/8/8/8/8/8 b - - 0 1");
    }

    #[test]
    fn test_analysis_url_replaces_spaces() {
        assert_eq!(
            analysis_url("https://lichess.org/editor", "8/8/8/8/8/8/8/8 w - - 0 1"),
            "https://lichess.org/editor/8/8/8/8/8/8/8/8_w_-_-_0_1"
        );
        assert_eq!(
            analysis_url("https://lichess.org/editor/", "8/8 b"),
            "https://lichess.org/editor/8/8_b"
        );
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("w".parse::<Side>(), Ok(Side::White));
        assert_eq!("Black".parse::<Side>(), Ok(Side::Black));
        assert!("x".parse::<Side>().is_err());
        assert_eq!(Side::White.opposite(), Side::Black);
    }
}
