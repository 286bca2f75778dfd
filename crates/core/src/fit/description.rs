//! Per-dimension fit status and human-readable fit descriptions.

use serde::Serialize;

use super::body::EstimatedBody;
use super::ease::EaseTable;
use super::measurements::{BodyDimension, GarmentSizeEntry};

/// Reference band in cm used to grade dimensions whose required ease is zero.
pub const ZERO_EASE_REFERENCE_CM: f64 = 5.0;

/// How a dimension fits, from the ratio of available room to required ease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStatus {
    Tight,
    Fitted,
    Comfortable,
    Loose,
    VeryLoose,
}

impl FitStatus {
    /// Grade `garment - body` against the required ease.
    ///
    /// | ratio        | status      |
    /// |--------------|-------------|
    /// | < 0.5        | tight       |
    /// | 0.5 .. 0.8   | fitted      |
    /// | 0.8 .. 1.2   | comfortable |
    /// | 1.2 .. 1.5   | loose       |
    /// | >= 1.5       | very_loose  |
    pub fn classify(available_space: f64, required_ease: f64) -> Self {
        let ratio = if required_ease > 0.0 {
            available_space / required_ease
        } else {
            1.0 + available_space / ZERO_EASE_REFERENCE_CM
        };

        if ratio < 0.5 {
            Self::Tight
        } else if ratio < 0.8 {
            Self::Fitted
        } else if ratio < 1.2 {
            Self::Comfortable
        } else if ratio < 1.5 {
            Self::Loose
        } else {
            Self::VeryLoose
        }
    }
}

/// Fit detail for one dimension of the selected size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionFit {
    pub measurement: BodyDimension,
    pub user_estimated: f64,
    pub garment_actual: f64,
    pub ease_applied: f64,
    pub fit_status: FitStatus,
}

/// Fit details for every comparable dimension of `entry`, values rounded to 0.1 cm.
pub fn fit_details(
    body: &EstimatedBody,
    ease: &EaseTable,
    entry: &GarmentSizeEntry,
) -> Vec<DimensionFit> {
    BodyDimension::ALL
        .iter()
        .filter_map(|&dim| {
            let body_cm = body.get(dim)?;
            let ease_cm = ease.get(dim)?;
            let garment_cm = entry.measurements.for_dimension(dim)?;
            Some(DimensionFit {
                measurement: dim,
                user_estimated: round1(body_cm),
                garment_actual: round1(garment_cm),
                ease_applied: round1(ease_cm),
                fit_status: FitStatus::classify(garment_cm - body_cm, ease_cm),
            })
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// English and Turkish fit descriptions plus an optional sizing note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitDescription {
    pub english: String,
    pub turkish: String,
    pub notes: Option<String>,
}

/// Describe the selected size from its per-dimension fit details.
///
/// Only notable statuses (tight, loose, very loose) are listed.
pub fn describe(details: &[DimensionFit]) -> FitDescription {
    let phrases: Vec<(&str, &str)> = details
        .iter()
        .filter_map(|d| phrase(d.fit_status, d.measurement))
        .collect();

    let (english, turkish) = if phrases.is_empty() {
        (
            "Good overall fit".to_string(),
            "Genel olarak iyi uyum".to_string(),
        )
    } else {
        let en: Vec<&str> = phrases.iter().map(|(en, _)| *en).collect();
        let tr: Vec<&str> = phrases.iter().map(|(_, tr)| *tr).collect();
        (format!("{}.", en.join(". ")), format!("{}.", tr.join(". ")))
    };

    let notes = if details.iter().any(|d| d.fit_status == FitStatus::Tight) {
        Some("Consider sizing up if you prefer a more relaxed fit.".to_string())
    } else if details.iter().any(|d| d.fit_status == FitStatus::VeryLoose) {
        Some("Consider sizing down for a more fitted look.".to_string())
    } else {
        None
    };

    FitDescription {
        english,
        turkish,
        notes,
    }
}

fn phrase(status: FitStatus, dim: BodyDimension) -> Option<(&'static str, &'static str)> {
    use BodyDimension::*;
    let pair = match (status, dim) {
        (FitStatus::Tight, Chest) => ("Tight on chest", "Göğüste dar"),
        (FitStatus::Tight, Waist) => ("Tight on waist", "Belde dar"),
        (FitStatus::Tight, Hip) => ("Tight on hips", "Kalçada dar"),
        (FitStatus::Tight, Shoulder) => ("Tight on shoulders", "Omuzlarda dar"),
        (FitStatus::Loose, Chest) => ("Roomy on chest", "Göğüste bol"),
        (FitStatus::Loose, Waist) => ("Roomy on waist", "Belde bol"),
        (FitStatus::Loose, Hip) => ("Roomy on hips", "Kalçada bol"),
        (FitStatus::Loose, Shoulder) => ("Roomy on shoulders", "Omuzlarda bol"),
        (FitStatus::VeryLoose, Chest) => ("Very loose on chest", "Göğüste çok bol"),
        (FitStatus::VeryLoose, Waist) => ("Very loose on waist", "Belde çok bol"),
        (FitStatus::VeryLoose, Hip) => ("Very loose on hips", "Kalçada çok bol"),
        (FitStatus::VeryLoose, Shoulder) => ("Very loose on shoulders", "Omuzlarda çok bol"),
        (FitStatus::Fitted | FitStatus::Comfortable, _) => return None,
    };
    Some(pair)
}
