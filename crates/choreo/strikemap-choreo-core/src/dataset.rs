#![allow(dead_code)]
//! Cleaned attack-record consumption, side classification, and the fixed
//! historical timeline.
//!
//! The core does not fetch or parse the external tabular source; it consumes
//! an already-split sequence of raw rows and turns them into typed records,
//! skipping (and logging) any row whose coordinate literals fail to parse.

use serde::{Deserialize, Serialize};

use crate::choreographer::EventKind;
use crate::geo::{parse_coordinate, GeoPoint};

/// One row as delivered by the dataset collaborator: coordinates still in
/// their `"34.3142°N"` literal form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub lat: String,
    pub lng: String,
    pub country: String,
    pub target: String,
    pub description: String,
}

/// A parsed, classified attack record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackRecord {
    pub position: GeoPoint,
    pub country: String,
    pub target: String,
    pub description: String,
    pub side: Side,
}

/// Which side a struck location belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Side {
    UsAligned,
    IranAligned,
}

/// Keyword-lookup configuration for side classification.
///
/// An unmatched country/target pair falls to `default_side`. The historical
/// behavior defaults unknowns to `IranAligned`; that is preserved here as
/// configuration rather than silently corrected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SideConfig {
    pub us_keywords: Vec<String>,
    pub iran_keywords: Vec<String>,
    pub default_side: Side,
}

impl Default for SideConfig {
    fn default() -> Self {
        Self {
            us_keywords: ["us forces", "us military", "us navy", "israel", "america"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            iran_keywords: ["iran", "houthi", "iraq", "syria", "yemen"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_side: Side::IranAligned,
        }
    }
}

impl SideConfig {
    /// Classify by scanning country then target for side keywords.
    pub fn classify(&self, country: &str, target: &str) -> Side {
        let country = country.to_lowercase();
        let target = target.to_lowercase();
        let hit = |keywords: &[String]| {
            keywords
                .iter()
                .any(|k| country.contains(k.as_str()) || target.contains(k.as_str()))
        };
        if hit(&self.us_keywords) {
            Side::UsAligned
        } else if hit(&self.iran_keywords) {
            Side::IranAligned
        } else {
            self.default_side
        }
    }
}

/// Outcome of a raw-row batch: the typed records plus the indices of rows
/// that were dropped. The engine surfaces each skipped index to the host as
/// a `RecordSkipped` event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedRecords {
    pub records: Vec<AttackRecord>,
    pub skipped: Vec<usize>,
}

/// Parse raw rows into records. A malformed coordinate skips that single row
/// with a warning and reports its index; the rest of the batch is unaffected.
pub fn parse_records(rows: &[RawRecord], sides: &SideConfig) -> ParsedRecords {
    let mut out = ParsedRecords::default();
    for (idx, row) in rows.iter().enumerate() {
        let lat = parse_coordinate(&row.lat);
        let lng = parse_coordinate(&row.lng);
        let (lat, lng) = match (lat, lng) {
            (Ok(lat), Ok(lng)) => (lat, lng),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("skipping record {idx}: {e}");
                out.skipped.push(idx);
                continue;
            }
        };
        out.records.push(AttackRecord {
            position: GeoPoint::new(lng, lat),
            country: row.country.clone(),
            target: row.target.clone(),
            description: row.description.clone(),
            side: sides.classify(&row.country, &row.target),
        });
    }
    out
}

/// One step of the ordered event sequence. The sequence is fixed at load
/// time and read-only for the lifetime of the page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventFrame {
    pub index: usize,
    pub kind: EventKind,
    pub date: String,
    pub description: String,
}

/// The five-frame historical sequence the timeline walks.
pub fn historical_timeline() -> Vec<EventFrame> {
    let frames = [
        (
            EventKind::Strike20200108,
            "2020/01/08",
            "IRGC base and US air base strikes",
        ),
        (
            EventKind::BaghdadTanf,
            "2021/10/20",
            "Baghdad and al-Tanf garrison strikes",
        ),
        (
            EventKind::SaadaEilatCrossfire,
            "2024/02/03",
            "Saada and Eilat exchange",
        ),
        (
            EventKind::RedSeaStrike,
            "2024/11/19",
            "Red Sea shipping strikes",
        ),
        (EventKind::Current, "present", "Current situation"),
    ];
    frames
        .into_iter()
        .enumerate()
        .map(|(index, (kind, date, description))| EventFrame {
            index,
            kind,
            date: date.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Fixed side-base marker anchors (Washington D.C. / Tehran).
pub const US_BASE_MARKER: GeoPoint = GeoPoint::new(-77.0369, 38.9072);
pub const IRAN_BASE_MARKER: GeoPoint = GeoPoint::new(51.3890, 35.6892);

#[cfg(test)]
mod tests {
    use super::*;

    fn row(lat: &str, lng: &str, country: &str, target: &str) -> RawRecord {
        RawRecord {
            lat: lat.into(),
            lng: lng.into(),
            country: country.into(),
            target: target.into(),
            description: "d".into(),
        }
    }

    #[test]
    fn malformed_row_is_skipped_not_fatal() {
        let rows = vec![
            row("34.3142°N", "47.0650°E", "Iran", "IRGC base"),
            row("not-a-coord", "47.0650°E", "Iraq", "US air base"),
            row("36.2381°N", "43.9632°E", "Iraq", "US air base"),
        ];
        let parsed = parse_records(&rows, &SideConfig::default());
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped, vec![1]);
        assert_eq!(parsed.records[0].position, GeoPoint::new(47.0650, 34.3142));
    }

    #[test]
    fn classification_scans_country_then_target() {
        let sides = SideConfig::default();
        assert_eq!(sides.classify("Iraq", "US military base"), Side::UsAligned);
        assert_eq!(sides.classify("Yemen", "Houthi launch site"), Side::IranAligned);
    }

    #[test]
    fn unknown_falls_to_configured_default() {
        let mut sides = SideConfig::default();
        assert_eq!(sides.classify("Atlantis", "lighthouse"), Side::IranAligned);
        sides.default_side = Side::UsAligned;
        assert_eq!(sides.classify("Atlantis", "lighthouse"), Side::UsAligned);
    }

    #[test]
    fn timeline_indices_are_dense_and_terminal_is_current() {
        let frames = historical_timeline();
        assert_eq!(frames.len(), 5);
        for (i, f) in frames.iter().enumerate() {
            assert_eq!(f.index, i);
        }
        assert_eq!(frames.last().unwrap().kind, EventKind::Current);
    }
}
