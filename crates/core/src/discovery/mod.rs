//! Input validation and file enumeration.
//!
//! Turns the base directory and input paths from the command line into the
//! list of files that fills the work queue.

mod error;
mod input_set;

pub use error::InputError;
pub use input_set::InputSet;
