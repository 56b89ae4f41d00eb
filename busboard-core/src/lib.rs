//! Core types and service wiring for the busboard kiosk dashboard.

/// Clock faces and date/time labels.
pub mod clock;
/// Forecast field resolution and weather presentation helpers.
pub mod forecast;
/// Domain models shared by the scheduler, resolver, and providers.
pub mod model;
/// Bundle of ports a weather provider hands to the service.
pub mod plugin;
/// Traits describing the provider interfaces.
pub mod ports;
/// Next-departure selection over a daily timetable.
pub mod schedule;
/// High-level service facade used by the kiosk host.
pub mod service;

pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use service::*;
