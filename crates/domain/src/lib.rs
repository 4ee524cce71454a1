pub mod catalog;
pub mod error;
pub mod notes;
pub mod pitch;

pub use crate::catalog::NoteCatalog;
pub use crate::error::DomainError;
pub use crate::notes::{KeyColor, Note, PracticeKey, Staff, StaffMode};
pub use crate::pitch::{Letter, Pitch};
