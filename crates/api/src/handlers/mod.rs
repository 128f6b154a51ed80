//! HTTP request handlers, one module per resource.

pub mod admin;
pub mod application;
pub mod auth;
pub mod booking;
pub mod contact;
pub mod mentor;
pub mod notification;
pub mod package;
pub mod review;
pub mod stash;
