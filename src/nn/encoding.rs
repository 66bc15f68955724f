//! FEN -> feature tensor encoding.
//!
//! Produces the binary tensors the trained policy model consumes. The basic
//! variant encodes piece occupancy only; the extended variant adds a
//! side-to-move indicator plane and per-kind attack maps for both colors,
//! filled from explicit-color rules queries so no position state is ever
//! mutated.
//!
//! Encoding is a pure function: the same `(FEN, variant)` input always
//! yields a bit-identical tensor. Model accuracy depends on this layer
//! agreeing exactly with the encoding used at training time.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::tensor::{
    EncodingVariant, FeatureTensor, OPPONENT_ATTACKS_PLANE, OWN_ATTACKS_PLANE, SIDE_TO_MOVE_PLANE,
};
use crate::board::piece::{Piece, PieceColor, ALL_KINDS};
use crate::rules::{Rules, RulesError};

/// Errors that can occur while encoding a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("FEN has no piece-placement field")]
    EmptyFen,

    #[error("piece placement has {0} ranks, expected 8")]
    WrongRankCount(usize),

    #[error("unexpected character '{ch}' in rank {rank} of piece placement")]
    UnexpectedChar { rank: usize, ch: char },

    #[error("rank {0} of piece placement spans more than 8 files")]
    RankTooWide(usize),

    #[error("FEN has no side-to-move field")]
    MissingSideToMove,

    #[error("side-to-move field must be 'w' or 'b': '{0}'")]
    InvalidSideToMove(String),

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Encodes a FEN position into a feature tensor.
///
/// The rules provider is consulted only by the extended variant, for the
/// attack planes. No partial tensor is ever returned: any parse failure
/// rejects the whole position.
pub fn encode<R: Rules>(
    fen: &str,
    variant: EncodingVariant,
    rules: &R,
) -> Result<FeatureTensor, EncodeError> {
    let mut tensor = FeatureTensor::zeros(variant);
    encode_pieces(fen, &mut tensor)?;

    if variant == EncodingVariant::Extended25 {
        let side_to_move = parse_side_to_move(fen)?;
        if side_to_move == PieceColor::White {
            tensor.fill_plane(SIDE_TO_MOVE_PLANE, 1.0);
        }
        encode_attacks(fen, side_to_move, &mut tensor, rules)?;
    }

    Ok(tensor)
}

/// Walks the piece-placement field into occupancy planes 0..12.
///
/// Ranks are written top-to-bottom in a FEN string, so the first rank lands
/// on row 0 -- the same orientation `Square::from_algebraic` computes with
/// `8 - rank_digit`.
fn encode_pieces(fen: &str, tensor: &mut FeatureTensor) -> Result<(), EncodeError> {
    let placement = fen
        .split_whitespace()
        .next()
        .ok_or(EncodeError::EmptyFen)?;

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(EncodeError::WrongRankCount(ranks.len()));
    }

    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0usize;
        for ch in rank.chars() {
            if let Some(skip) = ch.to_digit(10) {
                col += skip as usize;
                if col > 8 {
                    return Err(EncodeError::RankTooWide(row));
                }
            } else if let Some(piece) = Piece::from_fen_char(ch) {
                if col >= 8 {
                    return Err(EncodeError::RankTooWide(row));
                }
                tensor.mark(row, col, piece.plane());
                col += 1;
            } else {
                return Err(EncodeError::UnexpectedChar { rank: row, ch });
            }
        }
    }

    Ok(())
}

/// Reads the side-to-move field (second FEN token).
fn parse_side_to_move(fen: &str) -> Result<PieceColor, EncodeError> {
    let mut fields = fen.split_whitespace();
    fields.next();
    match fields.next() {
        Some("w") => Ok(PieceColor::White),
        Some("b") => Ok(PieceColor::Black),
        Some(other) => Err(EncodeError::InvalidSideToMove(other.to_string())),
        None => Err(EncodeError::MissingSideToMove),
    }
}

/// Fills planes 13..19 with the side to move's attack maps and 19..25 with
/// the opponent's, one plane per piece kind, OR-combined across pieces.
fn encode_attacks<R: Rules>(
    fen: &str,
    side_to_move: PieceColor,
    tensor: &mut FeatureTensor,
    rules: &R,
) -> Result<(), EncodeError> {
    for (i, &kind) in ALL_KINDS.iter().enumerate() {
        for sq in rules.attacked_squares(fen, kind, side_to_move)? {
            tensor.mark(sq.row() as usize, sq.file() as usize, OWN_ATTACKS_PLANE + i);
        }
        for sq in rules.attacked_squares(fen, kind, side_to_move.opponent())? {
            tensor.mark(
                sq.row() as usize,
                sq.file() as usize,
                OPPONENT_ATTACKS_PLANE + i,
            );
        }
    }
    Ok(())
}

/// Counters for a batch encoding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Samples encoded successfully.
    pub encoded: usize,
    /// Malformed samples dropped from the batch.
    pub skipped: usize,
}

/// Encodes a batch of FEN strings in parallel.
///
/// A malformed sample is skipped and counted rather than failing the batch;
/// output order follows input order with skipped samples removed.
pub fn encode_batch<R, S>(
    fens: &[S],
    variant: EncodingVariant,
    rules: &R,
) -> (Vec<FeatureTensor>, BatchStats)
where
    R: Rules + Sync,
    S: AsRef<str> + Sync,
{
    let encoded: Vec<Option<FeatureTensor>> = fens
        .par_iter()
        .map(|fen| encode(fen.as_ref(), variant, rules).ok())
        .collect();

    let mut tensors = Vec::with_capacity(encoded.len());
    let mut stats = BatchStats::default();
    for result in encoded {
        match result {
            Some(tensor) => {
                tensors.push(tensor);
                stats.encoded += 1;
            }
            None => stats.skipped += 1,
        }
    }
    (tensors, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::Square;
    use crate::nn::tensor::{BOARD_FILES, BOARD_RANKS};
    use crate::rules::StandardRules;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn plane_cells(tensor: &FeatureTensor, plane: usize) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for row in 0..BOARD_RANKS {
            for col in 0..BOARD_FILES {
                if tensor.at(row, col, plane) != 0.0 {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    fn cell(name: &str) -> (usize, usize) {
        let sq = Square::from_algebraic(name).unwrap();
        (sq.row() as usize, sq.file() as usize)
    }

    #[test]
    fn starting_position_pawn_planes() {
        let tensor = encode(START_FEN, EncodingVariant::Basic12, &StandardRules).unwrap();

        let white_pawns = plane_cells(&tensor, 0);
        assert_eq!(white_pawns.len(), 8);
        assert!(white_pawns.iter().all(|&(row, _)| row == 6));

        let black_pawns = plane_cells(&tensor, 6);
        assert_eq!(black_pawns.len(), 8);
        assert!(black_pawns.iter().all(|&(row, _)| row == 1));
    }

    #[test]
    fn starting_position_kings() {
        let tensor = encode(START_FEN, EncodingVariant::Basic12, &StandardRules).unwrap();
        assert_eq!(plane_cells(&tensor, 5), vec![cell("e1")]);
        assert_eq!(plane_cells(&tensor, 11), vec![cell("e8")]);
    }

    #[test]
    fn one_piece_per_square() {
        let tensor = encode(START_FEN, EncodingVariant::Basic12, &StandardRules).unwrap();
        for row in 0..BOARD_RANKS {
            for col in 0..BOARD_FILES {
                let set: usize = (0..12)
                    .filter(|&p| tensor.at(row, col, p) != 0.0)
                    .count();
                assert!(set <= 1, "square ({}, {}) has {} pieces", row, col, set);
            }
        }
    }

    #[test]
    fn encoding_is_pure() {
        for variant in [EncodingVariant::Basic12, EncodingVariant::Extended25] {
            let first = encode(START_FEN, variant, &StandardRules).unwrap();
            let second = encode(START_FEN, variant, &StandardRules).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn fen_walk_agrees_with_algebraic_parsing() {
        // A lone pawn on e4 placed by the FEN rank walk must land on the
        // cell the algebraic parser computes with `8 - rank_digit`. The two
        // numbering paths are textually independent, so this agreement is
        // pinned rather than assumed.
        let tensor = encode(
            "7k/8/8/8/4P3/8/8/7K w - - 0 1",
            EncodingVariant::Basic12,
            &StandardRules,
        )
        .unwrap();
        assert_eq!(plane_cells(&tensor, 0), vec![cell("e4")]);
    }

    #[test]
    fn rejects_malformed_placement() {
        let rules = StandardRules;
        assert_eq!(
            encode("", EncodingVariant::Basic12, &rules),
            Err(EncodeError::EmptyFen)
        );
        assert_eq!(
            encode("8/8/8/8 w - - 0 1", EncodingVariant::Basic12, &rules),
            Err(EncodeError::WrongRankCount(4))
        );
        assert_eq!(
            encode(
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
                EncodingVariant::Basic12,
                &rules
            ),
            Err(EncodeError::UnexpectedChar { rank: 7, ch: 'X' })
        );
        assert_eq!(
            encode("9p/8/8/8/8/8/8/8 w - - 0 1", EncodingVariant::Basic12, &rules),
            Err(EncodeError::RankTooWide(0))
        );
    }

    #[test]
    fn extended_requires_side_to_move() {
        let rules = StandardRules;
        assert_eq!(
            encode("8/8/8/8/8/8/8/8", EncodingVariant::Extended25, &rules),
            Err(EncodeError::MissingSideToMove)
        );
        assert_eq!(
            encode("8/8/8/8/8/8/8/8 x - - 0 1", EncodingVariant::Extended25, &rules),
            Err(EncodeError::InvalidSideToMove("x".to_string()))
        );
        // Basic encoding ignores everything past the placement field.
        assert!(encode("8/8/8/8/8/8/8/8", EncodingVariant::Basic12, &rules).is_ok());
    }

    #[test]
    fn side_to_move_plane_white() {
        let tensor = encode(START_FEN, EncodingVariant::Extended25, &StandardRules).unwrap();
        assert_eq!(tensor.plane_count(SIDE_TO_MOVE_PLANE), 64);
    }

    #[test]
    fn side_to_move_plane_black() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1";
        let tensor = encode(fen, EncodingVariant::Extended25, &StandardRules).unwrap();
        assert_eq!(tensor.plane_count(SIDE_TO_MOVE_PLANE), 0);
    }

    #[test]
    fn starting_position_attack_planes() {
        let tensor = encode(START_FEN, EncodingVariant::Extended25, &StandardRules).unwrap();

        // White pawns attack every rank-3 square (row 5).
        let pawn_attacks = plane_cells(&tensor, OWN_ATTACKS_PLANE);
        assert_eq!(pawn_attacks.len(), 8);
        assert!(pawn_attacks.iter().all(|&(row, _)| row == 5));

        // Knights on b1/g1 attack a3, c3, f3, h3, d2, e2.
        let mut knight_attacks = plane_cells(&tensor, OWN_ATTACKS_PLANE + 1);
        knight_attacks.sort();
        let mut expected: Vec<(usize, usize)> = ["a3", "c3", "f3", "h3", "d2", "e2"]
            .iter()
            .map(|n| cell(n))
            .collect();
        expected.sort();
        assert_eq!(knight_attacks, expected);

        // King on e1 attacks its five free neighbors.
        assert_eq!(tensor.plane_count(OWN_ATTACKS_PLANE + 5), 5);
    }

    #[test]
    fn opponent_attack_planes_mirror() {
        let tensor = encode(START_FEN, EncodingVariant::Extended25, &StandardRules).unwrap();

        // Black pawns attack every rank-6 square (row 2).
        let pawn_attacks = plane_cells(&tensor, OPPONENT_ATTACKS_PLANE);
        assert_eq!(pawn_attacks.len(), 8);
        assert!(pawn_attacks.iter().all(|&(row, _)| row == 2));
    }

    #[test]
    fn attack_planes_follow_side_to_move() {
        // With black to move, the "own" block holds black's attacks.
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1";
        let tensor = encode(fen, EncodingVariant::Extended25, &StandardRules).unwrap();

        let pawn_attacks = plane_cells(&tensor, OWN_ATTACKS_PLANE);
        assert_eq!(pawn_attacks.len(), 8);
        assert!(pawn_attacks.iter().all(|&(row, _)| row == 2));
    }

    #[test]
    fn batch_skips_and_counts_bad_samples() {
        let fens = [
            START_FEN.to_string(),
            "garbage".to_string(),
            "7k/8/8/8/4P3/8/8/7K w - - 0 1".to_string(),
        ];
        let (tensors, stats) = encode_batch(&fens, EncodingVariant::Basic12, &StandardRules);
        assert_eq!(tensors.len(), 2);
        assert_eq!(stats, BatchStats { encoded: 2, skipped: 1 });
    }
}
