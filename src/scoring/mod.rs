// src/scoring/mod.rs

//! Pure scoring rules shared by every ledger adapter.

pub mod accrual;
pub mod accuracy;
pub mod rank;

pub use accrual::SubmissionDelta;
pub use accuracy::accuracy;
pub use rank::PageRequest;
