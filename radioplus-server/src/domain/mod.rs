//! Domain types for the podcast feed service.
//!
//! This module contains the small validated value types the rest of the
//! crate builds on. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod airtime;
mod programme_id;

pub use airtime::{Airing, AiringError, ms_to_hms};
pub use programme_id::{InvalidProgrammeId, ProgrammeId};
