//! Terminal UI for the energy dashboard.
//!
//! Two views share one event loop: the dashboard (stat cards, charts,
//! records table) and the assistant chat. `Tab` switches between them.

pub mod app;
pub mod chat_view;
pub mod dashboard_view;
pub mod themes;
