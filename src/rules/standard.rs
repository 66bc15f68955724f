//! Standard-chess rules provider backed by the `chess` crate.
//!
//! Legal move generation comes from `MoveGen::new_legal`, which iterates the
//! crate's bitboards in a fixed order, giving the deterministic ordering the
//! selector's tie-break depends on. Attack sets come from the crate's
//! precomputed attack tables, queried per piece and OR-combined.

use std::str::FromStr;

use chess::{Board, MoveGen, EMPTY};

use super::{Rules, RulesError};
use crate::board::piece::{PieceColor, PieceKind};
use crate::board::square::Square;

/// Rules provider for standard chess.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

fn parse_board(fen: &str) -> Result<Board, RulesError> {
    Board::from_str(fen).map_err(|e| RulesError::InvalidFen {
        fen: fen.to_string(),
        message: e.to_string(),
    })
}

fn to_chess_piece(kind: PieceKind) -> chess::Piece {
    match kind {
        PieceKind::Pawn => chess::Piece::Pawn,
        PieceKind::Knight => chess::Piece::Knight,
        PieceKind::Bishop => chess::Piece::Bishop,
        PieceKind::Rook => chess::Piece::Rook,
        PieceKind::Queen => chess::Piece::Queen,
        PieceKind::King => chess::Piece::King,
    }
}

fn to_chess_color(color: PieceColor) -> chess::Color {
    match color {
        PieceColor::White => chess::Color::White,
        PieceColor::Black => chess::Color::Black,
    }
}

/// Converts a `chess` crate square (a1 = 0, rank-major from rank 1) to this
/// crate's FEN-ordered indexing (a8 = 0, rank 8 = row 0).
fn from_chess_square(sq: chess::Square) -> Square {
    let index = sq.to_index();
    let row = (7 - index / 8) as u8;
    let file = (index % 8) as u8;
    Square::from_coords(row, file)
}

impl Rules for StandardRules {
    fn legal_moves(&self, fen: &str) -> Result<Vec<String>, RulesError> {
        let board = parse_board(fen)?;
        Ok(MoveGen::new_legal(&board).map(|mv| mv.to_string()).collect())
    }

    fn attacked_squares(
        &self,
        fen: &str,
        kind: PieceKind,
        color: PieceColor,
    ) -> Result<Vec<Square>, RulesError> {
        let board = parse_board(fen)?;
        let piece = to_chess_piece(kind);
        let side = to_chess_color(color);

        let occupied = *board.combined();
        let pieces = board.pieces(piece) & board.color_combined(side);

        let mut attacked = EMPTY;
        for sq in pieces {
            attacked |= match kind {
                // Full-board victim mask: the geometric attack set, not just
                // squares currently holding a capturable piece.
                PieceKind::Pawn => chess::get_pawn_attacks(sq, side, !EMPTY),
                PieceKind::Knight => chess::get_knight_moves(sq),
                PieceKind::Bishop => chess::get_bishop_moves(sq, occupied),
                PieceKind::Rook => chess::get_rook_moves(sq, occupied),
                PieceKind::Queen => {
                    chess::get_bishop_moves(sq, occupied) | chess::get_rook_moves(sq, occupied)
                }
                PieceKind::King => chess::get_king_moves(sq),
            };
        }

        Ok(attacked.map(from_chess_square).collect())
    }
}
