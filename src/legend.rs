//! Presentation lookups shared by every map layer.
//!
//! Damage types, severities, statuses and categories each map to exactly one
//! label/color/icon here. Map legends, marker icons and segment overlays all
//! read from these tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Generates `ALL`, `as_str`, `Display` and `FromStr` from the wire names.
macro_rules! wire_names {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: value.to_string(),
                    }),
                }
            }
        }
    };
}

/// What happened to a road or infrastructure segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentDamageType {
    Flooding,
    Landslide,
    Washout,
    Collapse,
    Blockage,
    Pothole,
    Crack,
    Other,
}

wire_names!(SegmentDamageType, "damage type", {
    Flooding => "flooding",
    Landslide => "landslide",
    Washout => "washout",
    Collapse => "collapse",
    Blockage => "blockage",
    Pothole => "pothole",
    Crack => "crack",
    Other => "other",
});

impl SegmentDamageType {
    /// Classifies a free-text damage reason. First matching keyword wins.
    pub fn from_reason(reason: &str) -> Self {
        let r = reason.to_lowercase();
        if r.contains("inundated") || r.contains("flood") {
            Self::Flooding
        } else if r.contains("landslide") {
            Self::Landslide
        } else if r.contains("collapse") {
            Self::Collapse
        } else if r.contains("washout") || r.contains("washed") {
            Self::Washout
        } else if r.contains("tree") {
            Self::Blockage
        } else if r.contains("rock") {
            Self::Landslide
        } else if r.contains("crack") {
            Self::Crack
        } else {
            Self::Other
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Flooding => "🌊",
            Self::Landslide => "⛰️",
            Self::Washout => "💧",
            Self::Collapse => "🚧",
            Self::Blockage => "🚜",
            Self::Pothole | Self::Crack | Self::Other => "⚠️",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Flooding => "#0EA5E9",
            Self::Landslide => "#92400E",
            Self::Washout => "#3B82F6",
            Self::Collapse => "#DC2626",
            Self::Blockage => "#F97316",
            Self::Pothole => "#EAB308",
            Self::Crack => "#F59E0B",
            Self::Other => "#6B7280",
        }
    }
}

/// Segment severity on the 1..=4 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

wire_names!(Severity, "severity", {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

impl Severity {
    pub fn from_reason(reason: &str) -> Self {
        let r = reason.to_lowercase();
        if r.contains("massive") {
            Self::Critical
        } else if r.contains("landslide") || r.contains("collapse") {
            Self::High
        } else if r.contains("inundated") || r.contains("flood") {
            Self::Medium
        } else if r.contains("tree") {
            Self::Low
        } else {
            Self::Medium
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            4 => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Stroke/border palette of the segment overlay; `Low` is yellow, not green.
    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "#EAB308",
            Self::Medium => "#F97316",
            Self::High => "#DC2626",
            Self::Critical => "#991B1B",
        }
    }

    /// Line width used when drawing a segment of this severity.
    pub fn stroke_weight(self) -> u8 {
        self.level() + 4
    }

    pub fn stroke_opacity(self) -> f32 {
        match self {
            Self::Low => 0.7,
            Self::Medium => 0.8,
            Self::High => 0.9,
            Self::Critical => 1.0,
        }
    }
}

/// Citizen-facing building damage scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageLevel {
    Minor,
    Major,
    Destroyed,
}

wire_names!(DamageLevel, "damage level", {
    Minor => "minor",
    Major => "major",
    Destroyed => "destroyed",
});

impl DamageLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Minor => "Minor Damage",
            Self::Major => "Major Damage",
            Self::Destroyed => "Destroyed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Minor => "Building is usable but needs repair",
            Self::Major => "Building is unusable but can be repaired",
            Self::Destroyed => "Building collapsed or beyond repair",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Minor => "#FBBF24",
            Self::Major => "#F97316",
            Self::Destroyed => "#DC2626",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
}

wire_names!(PriorityLevel, "priority level", {
    High => "high",
    Medium => "medium",
    Low => "low",
});

impl PriorityLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High Priority",
            Self::Medium => "Medium Priority",
            Self::Low => "Low Priority",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::High => "#DC2626",
            Self::Medium => "#EAB308",
            Self::Low => "#22C55E",
        }
    }
}

/// Moderation workflow of a citizen report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    New,
    Verified,
    InProgress,
    Resolved,
    Rejected,
}

wire_names!(ReportStatus, "report status", {
    New => "new",
    Verified => "verified",
    InProgress => "in_progress",
    Resolved => "resolved",
    Rejected => "rejected",
});

impl ReportStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Verified => "Verified",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::New => "#3B82F6",
            Self::Verified => "#10B981",
            Self::InProgress => "#F59E0B",
            Self::Resolved => "#6B7280",
            Self::Rejected => "#EF4444",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfrastructureCategory {
    GovernmentBuilding,
    School,
    Hospital,
    Utility,
}

wire_names!(InfrastructureCategory, "infrastructure category", {
    GovernmentBuilding => "government_building",
    School => "school",
    Hospital => "hospital",
    Utility => "utility",
});

impl InfrastructureCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::GovernmentBuilding => "Government Building",
            Self::School => "School / Educational",
            Self::Hospital => "Hospital / Healthcare",
            Self::Utility => "Utilities & Services",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::GovernmentBuilding => "🏛️",
            Self::School => "🏫",
            Self::Hospital => "🏥",
            Self::Utility => "⚡",
        }
    }
}
