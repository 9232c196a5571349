//! egui rendering for the desktop dashboard.

pub mod panels;
pub mod plot;
