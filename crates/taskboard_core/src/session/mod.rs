//! Transient editing state.
//!
//! # See also
//! - `crate::store` for the committed board the session writes into.

pub mod editor;
