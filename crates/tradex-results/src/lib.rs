//! Normalization of ledger optimization payloads.
//!
//! The ledger has returned two layouts over time: a legacy flat one
//! (`prices`, `productions`, `demands`) and the current one (`l`, `p`, `q`
//! plus per-iteration `*_plot` traces). Both are decoded here into a single
//! [`tradex_types::CanonicalResult`]; nothing downstream looks at wire
//! field names.

mod wire;
mod normalize;

pub use wire::WireShape;
pub use normalize::{detect_shape, normalize, normalize_submission};

#[cfg(test)]
mod tests;
