//! Constants for board geometry, scoring and engine identity.
//!
//! The engine only ever plays on a 3x3 board, so the geometry is fixed at
//! compile time rather than selected by a feature.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// The eight winning lines as (row, col) triples.
/// Order: rows, columns, then the two diagonals.
pub const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

// =============================================================================
// Scoring
// =============================================================================

/// Utility of a terminal board won by X (the maximizing player).
pub const X_WIN: i32 = 1;

/// Utility of a terminal board won by O (the minimizing player).
pub const O_WIN: i32 = -1;

/// Utility of a drawn board.
pub const DRAW: i32 = 0;

/// Stand-in for +infinity in the alpha-beta window.
/// Only ever compared, never used in arithmetic.
pub const INFINITY: i32 = i32::MAX;

/// Stand-in for -infinity in the alpha-beta window.
pub const NEG_INFINITY: i32 = i32::MIN;

// =============================================================================
// Engine Identity
// =============================================================================

/// Name reported by the text protocol.
pub const ENGINE_NAME: &str = "ttt-rust";

/// Text protocol version.
pub const PROTOCOL_VERSION: &str = "2";
