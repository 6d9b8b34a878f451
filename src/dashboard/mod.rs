//! Dashboard - page layout, chart figures and the filter/aggregate render

pub mod figure;
pub mod layout;
pub mod render;

pub use figure::{ChartKind, ChartSpec, Figure, Trace, CHARTS};
pub use layout::{DashboardLayout, PAGE_SIZE};
pub use render::{render, FilterCriteria, RenderResult, TableData};
