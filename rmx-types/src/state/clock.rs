//! Clock lines, clock-source selection and edge events.

use serde::{Deserialize, Serialize};

/// One of the two physical clock inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockLine {
    A,
    B,
}

impl ClockLine {
    pub fn name(&self) -> &'static str {
        match self {
            ClockLine::A => "A",
            ClockLine::B => "B",
        }
    }
}

/// Which clock line(s) a channel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockSource {
    #[default]
    A,
    B,
    Both,
}

impl ClockSource {
    pub const ALL: [ClockSource; 3] = [ClockSource::A, ClockSource::B, ClockSource::Both];

    /// Highest valid integer id.
    pub const MAX_ID: u8 = 2;

    /// Integer id as used by the panel: a=0, b=1, both=2.
    pub fn id(&self) -> u8 {
        match self {
            ClockSource::A => 0,
            ClockSource::B => 1,
            ClockSource::Both => 2,
        }
    }

    /// Out-of-range ids clamp to `Both`.
    pub fn from_id(id: u8) -> Self {
        Self::ALL[id.min(Self::MAX_ID) as usize]
    }

    /// Single-character panel label.
    pub fn label(&self) -> char {
        match self {
            ClockSource::A => 'a',
            ClockSource::B => 'b',
            ClockSource::Both => '*',
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i64>() {
            return Some(Self::from_id(id.clamp(0, u8::MAX as i64) as u8));
        }
        match s.to_lowercase().as_str() {
            "a" => Some(ClockSource::A),
            "b" => Some(ClockSource::B),
            "both" | "*" | "ab" => Some(ClockSource::Both),
            _ => None,
        }
    }

    /// Whether an edge on `line` passes this filter.
    pub fn admits(&self, line: ClockLine) -> bool {
        match self {
            ClockSource::A => line == ClockLine::A,
            ClockSource::B => line == ClockLine::B,
            ClockSource::Both => true,
        }
    }

    pub fn cycle(&self) -> Self {
        Self::ALL[(self.id() as usize + 1) % Self::ALL.len()]
    }
}

/// Direction of a detected transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Rising,
    Falling,
}

/// A single debounced edge on one clock line, as delivered by the edge detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockEvent {
    pub line: ClockLine,
    pub edge: Edge,
}

impl ClockEvent {
    pub fn rising(line: ClockLine) -> Self {
        Self { line, edge: Edge::Rising }
    }

    pub fn falling(line: ClockLine) -> Self {
        Self { line, edge: Edge::Falling }
    }

    /// Parse the compact bench notation: `A+`, `b-`, `a rise`, `B fall`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        let line = match chars.next()?.to_ascii_lowercase() {
            'a' => ClockLine::A,
            'b' => ClockLine::B,
            _ => return None,
        };
        let edge = match chars.as_str().trim().to_lowercase().as_str() {
            "+" | "rise" | "rising" | "up" => Edge::Rising,
            "-" | "fall" | "falling" | "down" => Edge::Falling,
            _ => return None,
        };
        Some(Self { line, edge })
    }
}

impl std::fmt::Display for ClockEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = match self.edge {
            Edge::Rising => '+',
            Edge::Falling => '-',
        };
        write!(f, "{}{}", self.line.name(), sign)
    }
}
