//! Chart layout: validated chart descriptors, the twelve-house grid, and its
//! SVG rendering.

pub mod details;
pub mod layout;
pub mod payload;
pub mod render;
pub mod types;

pub use details::{AstroDetails, DetailRow};
pub use layout::{house_number, layout, layout_payload};
pub use payload::{ChartPairPayload, ChartPayload, ChartSetPayload, ChartsPayload, PlanetPositions};
pub use render::{ChartSet, chart_sets, render_chart, render_chart_set, render_chart_sets};
pub use types::{
    ChartDescriptor, ChartKind, HouseEntry, HouseGrid, LAGNA_MARKER, Planet, ZodiacSign,
};
