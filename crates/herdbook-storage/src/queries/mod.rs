//! Query modules for each domain table.
//!
//! Functions take a `&Connection` and never open transactions; callers that
//! need atomicity across several calls wrap them in one transaction.

pub mod util;

pub mod animals;
pub mod breeding;
pub mod evaluations;
pub mod herds;
pub mod recommendations;
pub mod simulations;
pub mod weights;
