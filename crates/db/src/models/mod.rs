//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod booking;
pub mod contact_form;
pub mod event;
pub mod mentor;
pub mod notification;
pub mod package;
pub mod review;
pub mod role;
pub mod session;
pub mod stash;
pub mod time_slot;
pub mod user;
