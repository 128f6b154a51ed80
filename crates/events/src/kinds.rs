//! Well-known domain event kind strings.
//!
//! Notification `kind` columns and email templates key off these values;
//! add new kinds here rather than inventing dot-strings at call sites.

pub const BOOKING_REQUESTED: &str = "booking.requested";
pub const BOOKING_CONFIRMED: &str = "booking.confirmed";
pub const BOOKING_CANCELLED: &str = "booking.cancelled";
pub const BOOKING_RESCHEDULED: &str = "booking.rescheduled";
pub const BOOKING_COMPLETED: &str = "booking.completed";

pub const MENTOR_APPLICATION_SUBMITTED: &str = "mentor.application_submitted";
pub const MENTOR_APPROVED: &str = "mentor.approved";
pub const MENTOR_REJECTED: &str = "mentor.rejected";
pub const MENTOR_INVITED: &str = "mentor.invited";

pub const USER_SIGNED_UP: &str = "user.signed_up";
pub const REVIEW_SUBMITTED: &str = "review.submitted";
pub const CONTACT_SUBMITTED: &str = "contact.submitted";
