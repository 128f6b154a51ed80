//! Request extractors enforcing authentication and authorization.
//!
//! - [`auth::AuthUser`] -- valid JWT required.
//! - [`rbac::RequireAdmin`] -- admin role required.
//! - [`rbac::ApprovedMentor`] -- caller must be linked to an approved
//!   mentor profile; resolved against the database on every request.

pub mod auth;
pub mod rbac;
