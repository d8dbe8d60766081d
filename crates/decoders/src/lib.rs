//! Decoders for `stellar` CLI output.
//!
//! The CLI is loose about its output shapes: scalars may or may not be
//! JSON-quoted, numbers may arrive as strings, and event listings are a
//! stream of concatenated JSON documents. Everything here is pure and
//! works on already-captured text.

pub mod balance;
pub mod events;
pub mod fields;

pub use balance::normalize_balance;
pub use events::{StreamError, parse_event_stream};
pub use fields::{FieldError, decode_u64};
