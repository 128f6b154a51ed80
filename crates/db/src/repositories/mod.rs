//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-statement
//! invariants (slot claiming, review aggregates) run inside explicit
//! transactions here rather than in handlers.

pub mod booking_repo;
pub mod contact_form_repo;
pub mod event_repo;
pub mod mentor_repo;
pub mod notification_repo;
pub mod package_repo;
pub mod review_repo;
pub mod role_repo;
pub mod session_repo;
pub mod slot_repo;
pub mod stash_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use contact_form_repo::ContactFormRepo;
pub use event_repo::EventRepo;
pub use mentor_repo::{MentorRepo, MentorSort};
pub use notification_repo::NotificationRepo;
pub use package_repo::PackageRepo;
pub use review_repo::ReviewRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use slot_repo::SlotRepo;
pub use stash_repo::StashRepo;
pub use user_repo::UserRepo;
