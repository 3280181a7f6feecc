//! Reading segmentation: free-form report text into titled, tagged cards.

pub mod legacy;
pub mod profile;
pub mod render;
pub mod segmenter;
pub mod text;
pub mod types;

pub use legacy::{parse_inline, segment_legacy};
pub use profile::SegmenterProfile;
pub use render::CardRenderer;
pub use segmenter::{segment, segment_with};
pub use types::{Inline, LegacySection, Paragraph, ReportCard, StatusTag};
