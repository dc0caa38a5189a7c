//! Prelude module for expiry_mask crate.
//!
//! Re-exports commonly used derive macros from derive_more and the log macros.

#[allow(unused_imports)]
pub use derive_more::{Deref, Display, From, Into};
#[allow(unused_imports)]
pub use log::{debug, trace};
