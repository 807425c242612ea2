//! Data models for the itinerary planner
//!
//! - Trip: the submitted travel preferences
//! - Plan: the composite result of one pipeline run

pub mod plan;
pub mod trip;

pub use plan::TripPlan;
pub use trip::TripRequest;
