use super::payload::ChartPayload;
use super::types::{ChartDescriptor, HouseEntry, HouseGrid, ZodiacSign};
use crate::error::InvalidChartError;

/// House number of `sign` when `ascendant` is house 1.
pub fn house_number(sign: ZodiacSign, ascendant: ZodiacSign) -> u8 {
    ((sign.index() + 12 - ascendant.index()) % 12 + 1) as u8
}

/// Lay a chart out on the twelve-sign grid.
pub fn layout(chart: &ChartDescriptor) -> HouseGrid {
    let houses = ZodiacSign::ALL
        .iter()
        .map(|&sign| HouseEntry {
            sign,
            house_number: house_number(sign, chart.ascendant),
            is_ascendant: sign == chart.ascendant,
            occupying_planets: chart
                .planet_positions
                .iter()
                .filter(|(_, placed)| *placed == sign)
                .map(|(planet, _)| *planet)
                .collect(),
        })
        .collect();

    tracing::debug!(
        ascendant = %chart.ascendant,
        planets = chart.planet_positions.len(),
        "laid out chart"
    );

    HouseGrid::from_entries(houses)
}

/// Validate a raw chart payload and lay it out.
pub fn layout_payload(payload: &ChartPayload) -> Result<HouseGrid, InvalidChartError> {
    let chart = payload.to_descriptor()?;
    Ok(layout(&chart))
}
