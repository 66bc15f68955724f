//! Position rules seam.
//!
//! Move legality and attack computation are consumed as an external
//! capability behind the [`Rules`] trait; this crate never reimplements
//! chess rules. [`StandardRules`] provides the trait over the `chess` crate.

pub mod standard;

pub use standard::StandardRules;

use crate::board::piece::{PieceColor, PieceKind};
use crate::board::square::Square;

/// Errors reported by a rules provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("invalid FEN '{fen}': {message}")]
    InvalidFen { fen: String, message: String },
}

/// Supplies move legality and attack information for a position.
///
/// A position is identified by its FEN string; implementations parse it per
/// call and hold no mutable state, so queries are pure and safe to issue
/// concurrently.
pub trait Rules {
    /// All legal moves for the side to move, as UCI strings (promotion
    /// suffix included where applicable).
    ///
    /// The order must be deterministic across calls for the same FEN: the
    /// selector's tie-break picks the first-encountered candidate, so a
    /// shifting order would change predictions between runs.
    fn legal_moves(&self, fen: &str) -> Result<Vec<String>, RulesError>;

    /// The union of squares attacked by all pieces of the given kind and
    /// color, accounting for blockers on the board.
    ///
    /// The color is an explicit parameter: querying the non-moving side
    /// must not require mutating or cloning the position's turn state.
    fn attacked_squares(
        &self,
        fen: &str,
        kind: PieceKind,
        color: PieceColor,
    ) -> Result<Vec<Square>, RulesError>;
}
