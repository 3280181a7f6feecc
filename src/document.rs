use serde::Serialize;

use crate::chart::{ChartSet, render_chart_sets};
use crate::fonts::TextMeasure;
use crate::report::{CardRenderer, LegacySection, ReportCard};
use crate::theme::Theme;

/// Segmented reading in either of its two shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "sections", rename_all = "snake_case")]
pub enum ReportBody {
    Cards(Vec<ReportCard>),
    Legacy(Vec<LegacySection>),
}

impl ReportBody {
    pub fn len(&self) -> usize {
        match self {
            ReportBody::Cards(cards) => cards.len(),
            ReportBody::Legacy(sections) => sections.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything shown on one report page: the charts computed for the reading
/// (one set per person, possibly none) and the reading itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub charts: Vec<ChartSet>,
    pub body: ReportBody,
}

impl ReportDocument {
    pub fn new(charts: Vec<ChartSet>, body: ReportBody) -> Self {
        Self { charts, body }
    }
}

/// Render the chart sets above the cards. The page widens to fit the charts.
pub fn render_document<M: TextMeasure>(
    document: &ReportDocument,
    theme: &Theme,
    measure: M,
    width: f32,
) -> String {
    let charts = (!document.charts.is_empty())
        .then(|| render_chart_sets(&document.charts, theme));
    let page_width = charts
        .as_ref()
        .map_or(width, |(_, w, _)| width.max(w + theme.padding * 2.0));

    let mut renderer = CardRenderer::new(theme.clone(), measure, page_width);
    if let Some((fragment, w, h)) = &charts {
        renderer.push_fragment(fragment, *w, *h);
    }
    match &document.body {
        ReportBody::Cards(cards) => renderer.push_cards(cards),
        ReportBody::Legacy(sections) => renderer.push_sections(sections),
    }

    tracing::debug!(
        sections = document.body.len(),
        chart_sets = document.charts.len(),
        width = page_width,
        "rendered document"
    );
    renderer.finish()
}
