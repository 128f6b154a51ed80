//! Shared domain types for the MentorHub marketplace.
//!
//! This crate holds everything the other workspace members agree on:
//! primitive aliases ([`types`]), the domain error enum ([`error`]),
//! role constants ([`roles`]), the booking and application status state
//! machines ([`booking`], [`application`]), the booking-day calendar
//! ([`calendar`]), and the typed resume-stash payload ([`stash`]).

pub mod application;
pub mod booking;
pub mod calendar;
pub mod error;
pub mod roles;
pub mod stash;
pub mod types;
