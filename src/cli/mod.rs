//! Presentation of categories: text chart and SVG plot

pub mod chart;
pub mod plot;
