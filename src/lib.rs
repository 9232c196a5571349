//! Launch records dashboard.
//!
//! A launch dataset is loaded once into an immutable [`data::LaunchTable`].
//! Every control change (site selection, payload range) calls
//! [`chart::recompute_view`], which filters the table and returns declarative
//! pie and scatter specs. Two front-ends draw them: a native egui window
//! ([`app`]) and an HTTP server with a Plotly page ([`server`]).

pub mod app;
pub mod chart;
pub mod color;
pub mod data;
pub mod layout;
pub mod server;
pub mod state;
pub mod ui;
