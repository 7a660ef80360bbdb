//! Damaged road segments reported after flooding in Sri Lanka.
//!
//! Coordinates sourced from OpenStreetMap; some endpoints were placed by
//! OSRM routing along the named road.

use road_snap::segments::InfraSegment;

/// A segment record in compact form: `(km, lat, lng)` per end.
#[derive(Debug, Clone)]
pub struct SegmentRow {
    pub id: &'static str,
    pub province: &'static str,
    pub segment_no: &'static str,
    pub segment_name: &'static str,
    pub reason: &'static str,
    pub from: (f64, f64, f64),
    pub to: (f64, f64, f64),
}

impl SegmentRow {
    pub fn to_segment(&self) -> InfraSegment {
        InfraSegment {
            id: self.id.to_string(),
            province: self.province.to_string(),
            segment_no: self.segment_no.to_string(),
            segment_name: self.segment_name.to_string(),
            reason: self.reason.to_string(),
            from_km: self.from.0,
            from_lat: self.from.1,
            from_lng: self.from.2,
            to_km: self.to.0,
            to_lat: self.to.1,
            to_lng: self.to.2,
            data_source: "OpenStreetMap".to_string(),
        }
    }
}

// ============================================================================
// Eastern Province
// ============================================================================

pub const EASTERN: &[SegmentRow] = &[
    SegmentRow {
        id: "seg-001",
        province: "Eastern",
        segment_no: "B-187",
        segment_name: "Kalmunai - Chavalakadai",
        reason: "Inundated",
        from: (3.5, 7.41628132763044, 81.81125112818002),
        to: (3.69, 7.4159069207123, 81.81293072743274),
    },
    // Single-spot damage: start and end coincide.
    SegmentRow {
        id: "seg-002",
        province: "Eastern",
        segment_no: "A-004",
        segment_name: "Colombo - Ratnapura - Wellawaya - Batticaloa",
        reason: "Inundated",
        from: (422.0, 6.8892399, 81.6933511),
        to: (424.0, 6.8892399, 81.6933511),
    },
    SegmentRow {
        id: "seg-003",
        province: "Eastern",
        segment_no: "A-015",
        segment_name: "Batticaloa - Thirukkondiyadimadu - Trincomalee",
        reason: "Inundated",
        from: (5.0, 7.873429905967795, 81.54033281799308),
        to: (8.0, 7.899913206544723, 81.53572444674928),
    },
];

// ============================================================================
// Central Province
// ============================================================================

pub const CENTRAL: &[SegmentRow] = &[
    SegmentRow {
        id: "seg-009",
        province: "Central",
        segment_no: "A-026",
        segment_name: "Kandy - Mahiyanganaya - Padiyathalawa",
        reason: "Landslide",
        from: (29.0, 7.278564115206363, 80.7889528243124),
        to: (54.0, 7.329505349893146, 80.9069908285237),
    },
    SegmentRow {
        id: "seg-010",
        province: "Central",
        segment_no: "A-005",
        segment_name: "Peradeniya - Badulla - Chenkaladi",
        reason: "Massive landslide",
        from: (14.0, 7.279170231080494, 80.67891057390771),
        to: (76.0, 7.352299724947288, 80.95900641985256),
    },
];

pub fn all_segments() -> Vec<InfraSegment> {
    EASTERN.iter().chain(CENTRAL).map(SegmentRow::to_segment).collect()
}
