//! Row types returned by the repository layer.

pub mod event;

pub use event::DueEvent;
