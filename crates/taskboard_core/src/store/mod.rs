//! Board store: the only mutation path for committed board state.
//!
//! # Responsibility
//! - Expose pure add/update/remove transforms over `Board` values.
//! - Hold the current board in `BoardStore` for the event-loop owner.
//!
//! # Invariants
//! - Every successful operation yields a board that passes
//!   `Board::check_invariants()`; debug builds assert it.

pub mod board_store;
pub mod transform;
