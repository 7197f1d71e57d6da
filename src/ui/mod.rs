//! Presentation layer: the surface that receives render requests, the
//! egui_plot bar chart and the header/footer panels.

pub mod chart;
pub mod panels;
pub mod surface;
