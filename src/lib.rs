//! Horoscope chart layout and reading segmentation, rendered to SVG and PNG.

pub mod chart;
pub mod cli;
pub mod document;
pub mod error;
pub mod fonts;
pub mod logging;
pub mod raster;
pub mod report;
pub mod svg;
pub mod theme;

pub use chart::{ChartDescriptor, HouseEntry, HouseGrid, layout, layout_payload};
pub use document::{ReportBody, ReportDocument, render_document};
pub use error::{InvalidChartError, ProfileError, RenderError, ThemeError};
pub use report::{LegacySection, ReportCard, StatusTag, segment, segment_legacy};
pub use theme::Theme;
