// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scorecard layouts: which fields a card has and how each is corrected.

use std::collections::HashSet;

use scrawl_core::error::{Result, ScrawlError};
use scrawl_validate::{FieldKind, ScoreRange};
use serde::{Deserialize, Serialize};

/// One named field on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    /// Present on the paper but never read (e.g. a field scored by hand).
    #[serde(default)]
    pub skip: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            skip: false,
        }
    }

    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }
}

/// The fields of one kind of scorecard, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardLayout {
    pub name: String,
    pub fields: Vec<FieldSpec>,
    /// Size glyphs against field width rather than height. Used for cards
    /// with long, short boxes.
    #[serde(default)]
    pub use_width_as_reference: bool,
}

const VET_FIELDS: [(&str, Option<u32>); 18] = [
    ("Pulse Before Trot Out", Some(5)),
    ("Pulse After Trot Out", Some(5)),
    ("Mucous Membrane", Some(5)),
    ("Capillary Refill", Some(5)),
    ("Skin Pinch", Some(5)),
    ("Jugular Vein Refill", Some(3)),
    ("Gut Sounds", Some(0)),
    ("Anal Tone", Some(2)),
    ("Muscle Tone", Some(5)),
    ("Unwillingness to trot", Some(5)),
    ("Tendons, Ligaments, Joints, Filings", Some(20)),
    ("Interferences", Some(5)),
    ("Grade 1", Some(10)),
    ("Grade 2", Some(25)),
    ("Back Tenderness", Some(5)),
    ("Tack Area", Some(5)),
    ("Hold on Trail", None),
    ("Time Penalty", None),
];

impl ScorecardLayout {
    /// Per-rider card: rider number, five condition scores (1–10), ride
    /// time and rider weight.
    pub fn rider_card() -> Self {
        let condition = FieldKind::Score {
            range: Some(ScoreRange { min: 1, max: 10 }),
        };
        let mut fields = vec![FieldSpec::new("Rider number", FieldKind::RiderNumber)];
        fields.extend(
            ["Recovery", "Hydration", "Lesions", "Soundness", "Qual Mvmt"]
                .into_iter()
                .map(|name| FieldSpec::new(name, condition)),
        );
        fields.push(FieldSpec::new("Ride time, this rider", FieldKind::Time));
        fields.push(FieldSpec::new("Weight of this rider", FieldKind::Weight));

        Self {
            name: "rider-card".into(),
            fields,
            use_width_as_reference: false,
        }
    }

    /// Veterinary check card: eighteen penalty scores. Gut sounds carry no
    /// points and are skipped.
    pub fn vet_card() -> Self {
        let fields = VET_FIELDS
            .iter()
            .map(|&(name, max)| match max {
                Some(0) => FieldSpec::new(name, FieldKind::score(0)).skipped(),
                Some(max) => FieldSpec::new(name, FieldKind::score(max)),
                None => FieldSpec::new(name, FieldKind::Score { range: None }),
            })
            .collect();

        Self {
            name: "vet-card".into(),
            fields,
            use_width_as_reference: true,
        }
    }

    /// Fields that are actually read.
    pub fn readable_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| !f.skip)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Reject duplicate names and bad score ranges.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ScrawlError::InvalidConfiguration(format!(
                    "layout {} lists field {:?} twice",
                    self.name, field.name
                )));
            }
            field.kind.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rider_card_fields() {
        let layout = ScorecardLayout::rider_card();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.fields.len(), 8);
        assert_eq!(layout.fields[0].kind, FieldKind::RiderNumber);
        assert_eq!(
            layout.field("Soundness").map(|f| f.kind),
            Some(FieldKind::Score {
                range: Some(ScoreRange { min: 1, max: 10 })
            })
        );
        assert_eq!(layout.fields[6].kind, FieldKind::Time);
        assert_eq!(layout.fields[7].kind, FieldKind::Weight);
        assert!(!layout.use_width_as_reference);
    }

    #[test]
    fn vet_card_skips_gut_sounds() {
        let layout = ScorecardLayout::vet_card();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.fields.len(), 18);
        assert_eq!(layout.readable_fields().count(), 17);
        assert!(layout.field("Gut Sounds").is_some_and(|f| f.skip));
        assert_eq!(layout.field("Grade 2").map(|f| f.kind), Some(FieldKind::score(25)));
        assert_eq!(
            layout.field("Time Penalty").map(|f| f.kind),
            Some(FieldKind::Score { range: None })
        );
        assert!(layout.use_width_as_reference);
    }

    #[test]
    fn duplicate_field_names_rejected() {
        let mut layout = ScorecardLayout::rider_card();
        layout.fields.push(FieldSpec::new("Recovery", FieldKind::score(10)));
        assert!(matches!(
            layout.validate(),
            Err(ScrawlError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn layout_parses_from_json() {
        let json = r#"{
            "name": "mini",
            "fields": [
                { "name": "Rider", "kind": { "kind": "rider_number" } },
                { "name": "Score", "kind": { "kind": "score", "range": { "min": 0, "max": 5 } } }
            ]
        }"#;
        let layout: ScorecardLayout = serde_json::from_str(json).expect("layout json");
        assert_eq!(layout.fields.len(), 2);
        assert!(!layout.fields[1].skip);
        assert!(!layout.use_width_as_reference);
    }
}
