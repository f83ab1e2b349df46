//! Wire and domain types exchanged with the catalog backend.

pub mod domain;
pub mod error;
pub mod protocol;
