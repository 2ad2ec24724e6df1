//! Masarak bus route planner server.
//!
//! A web service that answers: "I'm here, how do I get there on the
//! Damascus bus network?" Free-text Arabic place names in, direct and
//! one-transfer route suggestions out.

pub mod domain;
pub mod geocode;
pub mod network;
pub mod planner;
pub mod ratings;
pub mod web;
