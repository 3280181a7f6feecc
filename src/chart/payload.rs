use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::{ChartDescriptor, Planet, ZodiacSign};
use crate::error::InvalidChartError;

/// Planet → sign mapping exactly as the chart service sent it.
///
/// JSON object order is significant: planets sharing a sign are drawn in the
/// order they were listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanetPositions(pub Vec<(String, String)>);

impl<'de> Deserialize<'de> for PlanetPositions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = PlanetPositions;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of planet names to sign names")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(9));
                while let Some((planet, sign)) = map.next_entry::<String, String>()? {
                    entries.push((planet, sign));
                }
                Ok(PlanetPositions(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

impl Serialize for PlanetPositions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// One chart as delivered by the chart service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub lagna: String,
    #[serde(default)]
    pub planets: PlanetPositions,
}

impl ChartPayload {
    pub fn to_descriptor(&self) -> Result<ChartDescriptor, InvalidChartError> {
        let ascendant =
            ZodiacSign::parse(&self.lagna).ok_or_else(|| InvalidChartError::UnknownSign {
                field: "lagna".to_string(),
                value: self.lagna.clone(),
            })?;

        let mut planet_positions: Vec<(Planet, ZodiacSign)> =
            Vec::with_capacity(self.planets.0.len());
        for (planet_name, sign_name) in &self.planets.0 {
            let planet =
                Planet::parse(planet_name).ok_or_else(|| InvalidChartError::UnknownPlanet {
                    value: planet_name.clone(),
                })?;
            let sign = ZodiacSign::parse(sign_name).ok_or_else(|| InvalidChartError::UnknownSign {
                field: format!("planets.{}", planet_name),
                value: sign_name.clone(),
            })?;

            if planet_positions.iter().any(|(p, _)| *p == planet) {
                return Err(InvalidChartError::DuplicatePlanet { planet });
            }
            planet_positions.push((planet, sign));
        }

        Ok(ChartDescriptor {
            ascendant,
            planet_positions,
        })
    }
}

impl From<&ChartDescriptor> for ChartPayload {
    fn from(chart: &ChartDescriptor) -> Self {
        Self {
            lagna: chart.ascendant.name().to_string(),
            planets: PlanetPositions(
                chart
                    .planet_positions
                    .iter()
                    .map(|(planet, sign)| (planet.name().to_string(), sign.name().to_string()))
                    .collect(),
            ),
        }
    }
}

/// The D1/D9 pair returned by the chart calculation step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSetPayload {
    #[serde(alias = "d1")]
    pub d1_chart: ChartPayload,
    #[serde(alias = "d9")]
    pub d9_chart: ChartPayload,
    #[serde(default, alias = "details", skip_serializing_if = "Option::is_none")]
    pub astro_details: Option<serde_json::Value>,
}

/// Both partners' charts, as prepared for a compatibility reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPairPayload {
    pub person1: ChartSetPayload,
    pub person2: ChartSetPayload,
}

/// Chart input for a report page: one person's charts or a partner pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartsPayload {
    Pair(ChartPairPayload),
    Single(ChartSetPayload),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planets_keep_document_order() {
        let json = r#"{"lagna":"Leo","planets":{"Saturn":"Leo","Sun":"Leo","Moon":"Aries"}}"#;
        let payload: ChartPayload = serde_json::from_str(json).unwrap();
        let names: Vec<_> = payload.planets.0.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(names, ["Saturn", "Sun", "Moon"]);

        let chart = payload.to_descriptor().unwrap();
        assert_eq!(chart.ascendant, ZodiacSign::Leo);
        assert_eq!(chart.planet_positions[0], (Planet::Saturn, ZodiacSign::Leo));
        assert_eq!(chart.planet_positions[1], (Planet::Sun, ZodiacSign::Leo));
    }

    #[test]
    fn missing_planets_means_empty_chart() {
        let payload: ChartPayload = serde_json::from_str(r#"{"lagna":"Pisces"}"#).unwrap();
        let chart = payload.to_descriptor().unwrap();
        assert!(chart.planet_positions.is_empty());
    }

    #[test]
    fn unknown_ascendant_is_rejected() {
        let payload = ChartPayload {
            lagna: "Nibiru".to_string(),
            planets: PlanetPositions::default(),
        };
        assert_eq!(
            payload.to_descriptor(),
            Err(InvalidChartError::UnknownSign {
                field: "lagna".to_string(),
                value: "Nibiru".to_string(),
            })
        );
    }

    #[test]
    fn unknown_planet_sign_is_rejected() {
        let payload = ChartPayload {
            lagna: "Aries".to_string(),
            planets: PlanetPositions(vec![("Mars".to_string(), "Ophiuchus".to_string())]),
        };
        let err = payload.to_descriptor().unwrap_err();
        assert_eq!(
            err,
            InvalidChartError::UnknownSign {
                field: "planets.Mars".to_string(),
                value: "Ophiuchus".to_string(),
            }
        );
    }

    #[test]
    fn unknown_or_duplicate_planet_is_rejected() {
        let payload = ChartPayload {
            lagna: "Aries".to_string(),
            planets: PlanetPositions(vec![("Chiron".to_string(), "Leo".to_string())]),
        };
        assert!(matches!(
            payload.to_descriptor(),
            Err(InvalidChartError::UnknownPlanet { .. })
        ));

        let payload = ChartPayload {
            lagna: "Aries".to_string(),
            planets: PlanetPositions(vec![
                ("Rahu".to_string(), "Leo".to_string()),
                ("Mean_Node".to_string(), "Leo".to_string()),
            ]),
        };
        assert_eq!(
            payload.to_descriptor(),
            Err(InvalidChartError::DuplicatePlanet {
                planet: Planet::Rahu
            })
        );
    }

    #[test]
    fn chart_set_accepts_details_alias() {
        let json = r#"{
            "d1_chart": {"lagna": "Virgo", "planets": {}},
            "d9_chart": {"lagna": "Gemini", "planets": {}},
            "details": {"lagna": "Virgo"}
        }"#;
        let set: ChartSetPayload = serde_json::from_str(json).unwrap();
        assert_eq!(set.d9_chart.lagna, "Gemini");
        assert!(set.astro_details.is_some());
    }

    #[test]
    fn chart_set_accepts_short_chart_keys() {
        let json = r#"{
            "d1": {"lagna": "Leo", "planets": {}},
            "d9": {"lagna": "Aries", "planets": {}},
            "details": {"lagna": "Leo"}
        }"#;
        let set: ChartSetPayload = serde_json::from_str(json).unwrap();
        assert_eq!(set.d1_chart.lagna, "Leo");
        assert_eq!(set.d9_chart.lagna, "Aries");
    }

    #[test]
    fn charts_input_is_a_pair_or_a_single_set() {
        let pair = r#"{
            "person1": {"d1": {"lagna": "Leo"}, "d9": {"lagna": "Aries"}},
            "person2": {"d1_chart": {"lagna": "Virgo"}, "d9_chart": {"lagna": "Pisces"}}
        }"#;
        match serde_json::from_str::<ChartsPayload>(pair).unwrap() {
            ChartsPayload::Pair(pair) => {
                assert_eq!(pair.person1.d1_chart.lagna, "Leo");
                assert_eq!(pair.person2.d9_chart.lagna, "Pisces");
            }
            other => panic!("expected a pair, got {other:?}"),
        }

        let single = r#"{"d1_chart": {"lagna": "Leo"}, "d9_chart": {"lagna": "Aries"}}"#;
        assert!(matches!(
            serde_json::from_str::<ChartsPayload>(single).unwrap(),
            ChartsPayload::Single(_)
        ));
    }

    #[test]
    fn descriptor_converts_back_to_payload() {
        let chart = ChartDescriptor::new(ZodiacSign::Taurus)
            .with_planet(Planet::Venus, ZodiacSign::Taurus);
        let payload = ChartPayload::from(&chart);
        assert_eq!(payload.lagna, "Taurus");
        assert_eq!(payload.to_descriptor().unwrap(), chart);
    }
}
