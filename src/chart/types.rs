use std::fmt;

use serde::{Deserialize, Serialize};

/// The twelve signs in canonical order. The order defines house geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// 0-based position in the canonical ordering
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    /// Sinhala display label
    pub fn label(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "මේෂ",
            ZodiacSign::Taurus => "වෘෂභ",
            ZodiacSign::Gemini => "මිථුන",
            ZodiacSign::Cancer => "කටක",
            ZodiacSign::Leo => "සිංහ",
            ZodiacSign::Virgo => "කන්‍යා",
            ZodiacSign::Libra => "තුලා",
            ZodiacSign::Scorpio => "වෘශ්චික",
            ZodiacSign::Sagittarius => "ධනු",
            ZodiacSign::Capricorn => "මකර",
            ZodiacSign::Aquarius => "කුම්භ",
            ZodiacSign::Pisces => "මීන",
        }
    }

    /// Parse a sign name as delivered by the chart service.
    ///
    /// Accepts the canonical English name or its three-letter abbreviation,
    /// ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|sign| {
            let name = sign.name();
            value.eq_ignore_ascii_case(name) || value.eq_ignore_ascii_case(&name[..3])
        })
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    /// Lunar north node
    Rahu,
    /// Lunar south node
    Ketu,
}

impl Planet {
    pub const ALL: [Planet; 9] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mars,
        Planet::Mercury,
        Planet::Jupiter,
        Planet::Venus,
        Planet::Saturn,
        Planet::Rahu,
        Planet::Ketu,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mars => "Mars",
            Planet::Mercury => "Mercury",
            Planet::Jupiter => "Jupiter",
            Planet::Venus => "Venus",
            Planet::Saturn => "Saturn",
            Planet::Rahu => "Rahu",
            Planet::Ketu => "Ketu",
        }
    }

    /// Sinhala abbreviation drawn inside chart boxes
    pub fn abbreviation(self) -> &'static str {
        match self {
            Planet::Sun => "ර",
            Planet::Moon => "ස",
            Planet::Mars => "කු",
            Planet::Mercury => "බු",
            Planet::Jupiter => "ගු",
            Planet::Venus => "සි",
            Planet::Saturn => "ශ",
            Planet::Rahu => "රා",
            Planet::Ketu => "කේ",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(planet) = Self::ALL
            .into_iter()
            .find(|planet| value.eq_ignore_ascii_case(planet.name()))
        {
            return Some(planet);
        }

        // Node names used by western ephemeris libraries
        let normalized = value.to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "north node" | "mean node" | "true node" => Some(Planet::Rahu),
            "south node" | "mean south node" | "true south node" => Some(Planet::Ketu),
            _ => None,
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which divisional chart a grid represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    /// D1
    Rasi,
    /// D9
    Navamsa,
}

impl ChartKind {
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Rasi => "ලග්න කේන්ද්‍රය (D1)",
            ChartKind::Navamsa => "නවාංශක කේන්ද්‍රය (D9)",
        }
    }

    /// Caption under the ascendant label in the centre box
    pub fn subtitle(self) -> &'static str {
        match self {
            ChartKind::Rasi => "ලග්නය",
            ChartKind::Navamsa => "නවාංශකය",
        }
    }
}

/// Marker drawn first in the ascendant's box
pub const LAGNA_MARKER: &str = "ලග්";

/// A validated chart: ascendant plus planet placements in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartDescriptor {
    pub ascendant: ZodiacSign,
    pub planet_positions: Vec<(Planet, ZodiacSign)>,
}

impl ChartDescriptor {
    pub fn new(ascendant: ZodiacSign) -> Self {
        Self {
            ascendant,
            planet_positions: Vec::new(),
        }
    }

    /// Builder-style placement. A planet placed twice keeps its latest sign
    /// in its original slot, so each planet maps to exactly one sign.
    pub fn with_planet(mut self, planet: Planet, sign: ZodiacSign) -> Self {
        match self.planet_positions.iter_mut().find(|(p, _)| *p == planet) {
            Some(slot) => slot.1 = sign,
            None => self.planet_positions.push((planet, sign)),
        }
        self
    }

    pub fn sign_of(&self, planet: Planet) -> Option<ZodiacSign> {
        self.planet_positions
            .iter()
            .find(|(p, _)| *p == planet)
            .map(|(_, sign)| *sign)
    }
}

/// One box of the chart grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseEntry {
    pub sign: ZodiacSign,
    pub house_number: u8,
    pub is_ascendant: bool,
    pub occupying_planets: Vec<Planet>,
}

/// Read-only view of a laid out chart, one entry per sign in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseGrid {
    houses: Vec<HouseEntry>,
}

impl HouseGrid {
    /// `houses` must hold the twelve signs in canonical order.
    pub(crate) fn from_entries(houses: Vec<HouseEntry>) -> Self {
        debug_assert_eq!(houses.len(), 12);
        Self { houses }
    }

    pub fn houses(&self) -> &[HouseEntry] {
        &self.houses
    }

    pub fn entry(&self, sign: ZodiacSign) -> &HouseEntry {
        &self.houses[sign.index()]
    }

    pub fn house(&self, number: u8) -> Option<&HouseEntry> {
        self.houses.iter().find(|entry| entry.house_number == number)
    }

    pub fn ascendant(&self) -> &HouseEntry {
        self.houses
            .iter()
            .find(|entry| entry.is_ascendant)
            .unwrap_or(&self.houses[0])
    }

    /// Rebuild a descriptor from the grid. Planets come back grouped by sign
    /// in canonical order, so only the relative order within a sign survives.
    pub fn to_descriptor(&self) -> ChartDescriptor {
        let planet_positions = self
            .houses
            .iter()
            .flat_map(|entry| {
                entry
                    .occupying_planets
                    .iter()
                    .map(move |planet| (*planet, entry.sign))
            })
            .collect();

        ChartDescriptor {
            ascendant: self.ascendant().sign,
            planet_positions,
        }
    }
}
