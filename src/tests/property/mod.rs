//! Property-based tests for roster-tui
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `word_count_props`: Tests for message word counting and validation
//!   - Count equals the number of tokens regardless of separators
//!   - Whitespace-only text counts zero and never submits
//!   - The limit warning appears exactly above the limit
//!
//! - `stay_props`: Tests for the check-out minimum
//!   - The constrained check-out is never before check-in + 1 day
//!   - Valid later check-outs are kept unchanged
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod stay_props;
mod word_count_props;
