//! Damaged infrastructure segments and their map geometry.
//!
//! Road geometry is pre-computed once per segment (rate-limited calls to a
//! [`RoadSnapper`]) and stored; at display time each segment resolves its
//! stored path, falling back to a straight line, and gets a marker placed on
//! that path.

use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::legend::{SegmentDamageType, Severity};
use crate::polyline::{self, GeoPath, GeoPoint};
use crate::traits::RoadSnapper;

/// Snapped paths keyed by segment id.
pub type SnappedPaths = BTreeMap<String, GeoPath>;

/// A damaged stretch of road or infrastructure between two chainages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfraSegment {
    pub id: String,
    pub province: String,
    pub segment_no: String,
    pub segment_name: String,
    pub reason: String,
    pub from_km: f64,
    pub from_lat: f64,
    pub from_lng: f64,
    pub to_km: f64,
    pub to_lat: f64,
    pub to_lng: f64,
    pub data_source: String,
}

impl InfraSegment {
    pub fn origin(&self) -> GeoPoint {
        GeoPoint::new(self.from_lat, self.from_lng)
    }

    pub fn destination(&self) -> GeoPoint {
        GeoPoint::new(self.to_lat, self.to_lng)
    }

    /// Damage reported at a single spot rather than along a stretch.
    pub fn is_point_damage(&self) -> bool {
        self.from_lat == self.to_lat && self.from_lng == self.to_lng
    }

    pub fn damage_type(&self) -> SegmentDamageType {
        SegmentDamageType::from_reason(&self.reason)
    }

    pub fn severity(&self) -> Severity {
        Severity::from_reason(&self.reason)
    }

    pub fn straight_line(&self) -> GeoPath {
        GeoPath::straight_line(self.origin(), self.destination())
    }
}

#[derive(Debug, Clone)]
pub struct SnapOptions {
    /// Pause between consecutive snapper calls (third-party rate limits).
    pub delay: Duration,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(100),
        }
    }
}

/// Pre-computes road geometry for every stretch segment, one call at a time.
///
/// Point-damage segments are skipped. Failures inside the snapper surface as
/// straight lines, so every processed segment gets an entry.
pub fn snap_segments<S>(segments: &[InfraSegment], snapper: &S, options: &SnapOptions) -> SnappedPaths
where
    S: RoadSnapper + ?Sized,
{
    let stretches: Vec<&InfraSegment> = segments.iter().filter(|seg| !seg.is_point_damage()).collect();
    let total = stretches.len();
    info!(total, skipped = segments.len() - total, "snapping segments");

    let mut results = SnappedPaths::new();
    for (i, seg) in stretches.into_iter().enumerate() {
        if i > 0 && !options.delay.is_zero() {
            thread::sleep(options.delay);
        }

        let path = snapper.snap(seg.origin(), seg.destination());
        info!(
            index = i + 1,
            total,
            segment_no = %seg.segment_no,
            points = path.len(),
            "{}",
            seg.segment_name
        );
        results.insert(seg.id.clone(), path);
    }

    results
}

/// The stored path for a segment, or a straight line when none is usable.
pub fn resolve_path(segment: &InfraSegment, snapped: &SnappedPaths) -> GeoPath {
    snapped
        .get(&segment.id)
        .filter(|path| !path.is_empty())
        .cloned()
        .unwrap_or_else(|| segment.straight_line())
}

/// Where and how to draw a segment's marker icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentMarker {
    pub id: String,
    pub position: GeoPoint,
    pub damage_type: SegmentDamageType,
    pub severity: Severity,
}

/// Places one marker per stretch segment, on its resolved path.
///
/// Output order follows `segments`.
pub fn segment_markers(segments: &[InfraSegment], snapped: &SnappedPaths) -> Vec<SegmentMarker> {
    segments
        .par_iter()
        .filter(|seg| !seg.is_point_damage())
        .map(|seg| {
            let path = resolve_path(seg, snapped);
            SegmentMarker {
                id: seg.id.clone(),
                position: polyline::midpoint(path.points()),
                damage_type: seg.damage_type(),
                severity: seg.severity(),
            }
        })
        .collect()
}
