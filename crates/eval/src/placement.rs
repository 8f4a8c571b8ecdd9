//! Placed-object records and handler outcomes.

use std::fmt;

use serde::Serialize;

use crate::grid::GridCell;

/// What a placement operation puts on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    House,
    Park,
    Pool,
    Library,
    School,
    Hospital,
    Shop,
    Road,
    PowerTower,
    Fountain,
    Apartment,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::House => "house",
            ObjectKind::Park => "park",
            ObjectKind::Pool => "pool",
            ObjectKind::Library => "library",
            ObjectKind::School => "school",
            ObjectKind::Hospital => "hospital",
            ObjectKind::Shop => "shop",
            ObjectKind::Road => "road",
            ObjectKind::PowerTower => "power_tower",
            ObjectKind::Fountain => "fountain",
            ObjectKind::Apartment => "apartment",
        }
    }

    /// Single-character map glyph.
    pub fn glyph(&self) -> char {
        match self {
            ObjectKind::House => 'H',
            ObjectKind::Park => 'P',
            ObjectKind::Pool => 'W',
            ObjectKind::Library => 'L',
            ObjectKind::School => 'S',
            ObjectKind::Hospital => '+',
            ObjectKind::Shop => '$',
            ObjectKind::Road => '=',
            ObjectKind::PowerTower => 'T',
            ObjectKind::Fountain => 'F',
            ObjectKind::Apartment => 'A',
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadDirection {
    Horizontal,
    Vertical,
}

impl RoadDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "h" | "horizontal" => Some(RoadDirection::Horizontal),
            "v" | "vertical" => Some(RoadDirection::Vertical),
            _ => None,
        }
    }
}

/// The value a successful placement reports back: where and what.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub row: i64,
    pub col: i64,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
}

/// Everything recorded about an object on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedObject {
    pub cell: GridCell,
    pub kind: ObjectKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floors: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<RoadDirection>,
}

/// Successful handler result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Placed(Placement),
    Cleared { removed: usize },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Placed(p) => write!(f, "{} at ({}, {})", p.kind, p.row, p.col),
            Outcome::Cleared { removed } => write!(f, "cleared {} object(s)", removed),
        }
    }
}
