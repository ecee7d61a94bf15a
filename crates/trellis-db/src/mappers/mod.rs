//! Entity to model mappers
//!
//! Conversions between domain entities (trellis-core) and database models.
//! Enum-valued text columns are written through `as_str()` and read back
//! with `parse()`; unknown values fall back to the enum default so a
//! hand-edited row cannot take the process down.

mod change_log;
mod invitation;
mod member;
mod milestone;
mod organization;
mod project;
mod task;
mod user;
