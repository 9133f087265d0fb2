//! Integrity validation for employee lists.
//!
//! Classifies manager references and finds cycles without ever failing:
//! - `detect_cycles` - ids of records on a manager-reference loop
//! - `categorize` - true roots / mapped / unmapped (plus cyclic and stranded)
//! - `validate` - counts and human-readable warnings
//!
//! Nothing here mutates or drops records. Bad data becomes numbers and
//! strings the host can show as an advisory banner.

mod categorize;
mod cycles;
mod report;

pub use categorize::{categorize, Categorization};
pub use cycles::detect_cycles;
pub(crate) use cycles::cycle_members;
pub use report::{validate, ValidationReport, ValidationStats};
