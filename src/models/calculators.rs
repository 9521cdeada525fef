//! Seed-density conversion and the speed-limit lookup chain.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::FieldErrors;

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").expect("valid number pattern"));

/// First number embedded in `text` (`"52.5 cm"` → 52.5), 0 when there is none.
pub fn leading_number(text: &str) -> f64 {
    LEADING_NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// Stable numeric sort on the number embedded in `key(row)`.
pub fn sort_by_embedded_number<T, F>(rows: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    rows.sort_by(|a, b| leading_number(key(a)).total_cmp(&leading_number(key(b))));
}

/// Common row spacings offered by the UI, in metres.
pub const ROW_SPACING_OPTIONS: [f64; 5] = [0.35, 0.38, 0.42, 0.52, 0.70];

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DensityMode {
    /// Seeds per metre → seeds per hectare.
    ToHectare,
    /// Seeds per hectare → seeds per metre.
    ToMeter,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SeedDensityRequest {
    pub mode: DensityMode,
    /// Seeds per metre (`to_hectare`) or seeds per hectare (`to_meter`).
    pub value: f64,
    /// Distance between rows in metres.
    pub row_spacing_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SeedDensityResult {
    pub mode: DensityMode,
    /// Seeds per hectare (`to_hectare`) or seeds per metre (`to_meter`).
    pub result: f64,
    /// Distance between seeds along the row, in centimetres.
    pub seed_distance_cm: f64,
}

impl SeedDensityRequest {
    pub fn calculate(&self) -> Result<SeedDensityResult, FieldErrors> {
        let mut errors = FieldErrors::default();
        if !(self.value.is_finite() && self.value > 0.0) {
            errors.add("value", "Por favor ingresa valores válidos mayor a 0.");
        }
        if !(self.row_spacing_m.is_finite() && self.row_spacing_m > 0.0) {
            errors.add(
                "row_spacing_m",
                "Por favor ingresa valores válidos mayor a 0.",
            );
        }
        errors.finish()?;

        Ok(match self.mode {
            DensityMode::ToHectare => to_hectare(self.value, self.row_spacing_m),
            DensityMode::ToMeter => to_meter(self.value, self.row_spacing_m),
        })
    }
}

/// Seeds per metre to seeds per hectare. Inputs must be positive.
pub fn to_hectare(seeds_per_meter: f64, spacing_m: f64) -> SeedDensityResult {
    let per_hectare = (100.0 * seeds_per_meter) * (100.0 / spacing_m);
    SeedDensityResult {
        mode: DensityMode::ToHectare,
        result: per_hectare.round(),
        seed_distance_cm: round2(100.0 / seeds_per_meter),
    }
}

/// Seeds per hectare to seeds per metre. Inputs must be positive.
pub fn to_meter(seeds_per_hectare: f64, spacing_m: f64) -> SeedDensityResult {
    let per_meter = seeds_per_hectare / (100.0 / spacing_m) / 100.0;
    SeedDensityResult {
        mode: DensityMode::ToMeter,
        result: round2(per_meter),
        seed_distance_cm: round2(100.0 / per_meter),
    }
}

/// A crop, plate, spacing or population in the lookup chain.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LookupOption {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlatesQuery {
    pub crop_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SpacingsQuery {
    pub plate_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PopulationsQuery {
    pub spacing_id: Uuid,
    pub plate_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SpeedsQuery {
    pub population_id: Uuid,
    pub spacing_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SpeedCheckRequest {
    pub population_id: Uuid,
    pub spacing_id: Uuid,
    pub speed_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SpeedVerdict {
    pub allowed: bool,
    pub message: String,
}

pub const SPEED_NOT_FOUND: &str = "Datos no encontrados para esta configuración.";

/// Interpret the `result` text of a speed-limit row. `None` means no row
/// matched the configuration.
pub fn speed_verdict(result: Option<&str>) -> SpeedVerdict {
    match result {
        Some(text) => {
            let lower = text.to_lowercase();
            SpeedVerdict {
                allowed: lower.starts_with("si") || lower.contains("velocidad maxima"),
                message: text.to_string(),
            }
        }
        None => SpeedVerdict {
            allowed: false,
            message: SPEED_NOT_FOUND.to_string(),
        },
    }
}
