//! Required ease per body dimension.
//!
//! Ease is the room a garment must have beyond the wearer's body
//! measurement. It depends on the garment's fit tier, optionally shifted one
//! tier by the shopper's fit preference, and is reduced for elastic fabrics.
//!
//! Shoulder ease is always zero: fit tiers do not loosen shoulder
//! expectations in this model. Collaborators that need it can apply
//! [`EaseTable::with_override`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::measurements::BodyDimension;

// ---------------------------------------------------------------------------
// Stretch constants
// ---------------------------------------------------------------------------

/// Fibres treated as elastic. Matching is case-insensitive and by substring.
pub const ELASTIC_FIBERS: &[&str] = &["elastane", "spandex", "lycra"];
/// Ease reduction in cm per percentage point of elastic fibre.
pub const STRETCH_REDUCTION_PER_PERCENT: f64 = 0.05;
/// Cap on the stretch reduction, in cm.
pub const MAX_STRETCH_REDUCTION: f64 = 2.5;

// ---------------------------------------------------------------------------
// Fit type & preference
// ---------------------------------------------------------------------------

/// A garment's cut category, ordered from tightest to loosest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitType {
    SlimFit,
    #[default]
    RegularFit,
    LooseFit,
    Oversized,
}

impl FitType {
    /// Tiers from tightest to loosest.
    pub const TIERS: [FitType; 4] = [
        Self::SlimFit,
        Self::RegularFit,
        Self::LooseFit,
        Self::Oversized,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "slim_fit" => Some(Self::SlimFit),
            "regular_fit" => Some(Self::RegularFit),
            "loose_fit" => Some(Self::LooseFit),
            "oversized" => Some(Self::Oversized),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SlimFit => "slim_fit",
            Self::RegularFit => "regular_fit",
            Self::LooseFit => "loose_fit",
            Self::Oversized => "oversized",
        }
    }

    fn tier_index(self) -> usize {
        match self {
            Self::SlimFit => 0,
            Self::RegularFit => 1,
            Self::LooseFit => 2,
            Self::Oversized => 3,
        }
    }

    /// Move `steps` tiers (negative is tighter), clamped at the list ends.
    pub fn shifted(self, steps: i32) -> Self {
        let last = Self::TIERS.len() as i32 - 1;
        let idx = (self.tier_index() as i32 + steps).clamp(0, last);
        Self::TIERS[idx as usize]
    }

    /// Base ease `(chest, waist)` in cm. Hip follows the waist column.
    ///
    /// | tier        | chest | waist |
    /// |-------------|-------|-------|
    /// | slim_fit    | 2.5   | 2.0   |
    /// | regular_fit | 5.0   | 5.0   |
    /// | loose_fit   | 10.0  | 10.0  |
    /// | oversized   | 16.0  | 16.0  |
    fn base_ease(self) -> (f64, f64) {
        match self {
            Self::SlimFit => (2.5, 2.0),
            Self::RegularFit => (5.0, 5.0),
            Self::LooseFit => (10.0, 10.0),
            Self::Oversized => (16.0, 16.0),
        }
    }
}

/// Field deserializer for request bodies where an unrecognised fit type
/// should fall back to the default tier instead of rejecting the request.
///
/// Use with `#[serde(default, deserialize_with = "lenient_fit_type")]`.
pub fn lenient_fit_type<'de, D>(deserializer: D) -> Result<Option<FitType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(FitType::parse))
}

/// The shopper's explicit fit preference.
///
/// Accepts the legacy spellings `tighter` / `looser`; unknown values are
/// treated as `true_to_size`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum PreferredFit {
    #[default]
    TrueToSize,
    Tight,
    Loose,
}

impl PreferredFit {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tight" | "tighter" => Self::Tight,
            "loose" | "looser" => Self::Loose,
            _ => Self::TrueToSize,
        }
    }

    fn tier_shift(self) -> i32 {
        match self {
            Self::Tight => -1,
            Self::TrueToSize => 0,
            Self::Loose => 1,
        }
    }
}

impl From<String> for PreferredFit {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

// ---------------------------------------------------------------------------
// Fabric composition
// ---------------------------------------------------------------------------

/// Fibre name to percentage.
pub type FabricComposition = BTreeMap<String, f64>;

/// Total percentage of elastic fibres in a composition.
pub fn stretch_percentage(fabric: &FabricComposition) -> f64 {
    fabric
        .iter()
        .filter(|(fiber, _)| {
            let fiber = fiber.to_ascii_lowercase();
            ELASTIC_FIBERS.iter().any(|e| fiber.contains(e))
        })
        .map(|(_, pct)| if pct.is_finite() { pct.max(0.0) } else { 0.0 })
        .sum()
}

/// Ease reduction in cm for a composition, capped at [`MAX_STRETCH_REDUCTION`].
pub fn stretch_reduction(fabric: &FabricComposition) -> f64 {
    (stretch_percentage(fabric) * STRETCH_REDUCTION_PER_PERCENT).min(MAX_STRETCH_REDUCTION)
}

// ---------------------------------------------------------------------------
// Ease table
// ---------------------------------------------------------------------------

/// Required ease in cm per body dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EaseTable(BTreeMap<BodyDimension, f64>);

impl EaseTable {
    pub fn get(&self, dim: BodyDimension) -> Option<f64> {
        self.0.get(&dim).copied()
    }

    /// Replace one dimension's ease. Negative values are floored at zero.
    pub fn with_override(mut self, dim: BodyDimension, ease_cm: f64) -> Self {
        self.0.insert(dim, ease_cm.max(0.0));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyDimension, f64)> + '_ {
        self.0.iter().map(|(d, v)| (*d, *v))
    }
}

/// Resolve the required ease for a garment and shopper preference.
pub fn resolve(
    fit_type: FitType,
    preferred_fit: Option<PreferredFit>,
    fabric: &FabricComposition,
) -> EaseTable {
    let effective = match preferred_fit {
        Some(pref) => fit_type.shifted(pref.tier_shift()),
        None => fit_type,
    };
    let (chest, waist) = effective.base_ease();
    let reduction = stretch_reduction(fabric);

    let reduce = |ease: f64| {
        if ease > 0.0 {
            (ease - reduction).max(0.0)
        } else {
            0.0
        }
    };

    let values = BTreeMap::from([
        (BodyDimension::Chest, reduce(chest)),
        (BodyDimension::Waist, reduce(waist)),
        (BodyDimension::Hip, reduce(waist)),
        (BodyDimension::Shoulder, 0.0),
    ]);
    EaseTable(values)
}
