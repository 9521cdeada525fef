//! Travel distance estimation for assignments.
//!
//! Only a stand-in is provided: [`RandomDistance`] returns a plausible whole
//! number of kilometres without consulting any routing service.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Range of the simulated distance, in km.
pub const SIMULATED_KM: RangeInclusive<u32> = 15..=450;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DistanceRequest {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DistanceEstimate {
    pub km: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DistanceEstimate {
    fn missing_locations() -> Self {
        Self {
            km: 0,
            error: Some("Faltan ubicaciones para calcular.".to_string()),
            message: None,
        }
    }
}

/// Estimates the road distance between two free-text locations.
pub trait DistanceEstimator: Send + Sync {
    fn estimate(&self, origin: &str, destination: &str) -> DistanceEstimate;
}

/// Stub estimator returning a uniformly random distance in [`SIMULATED_KM`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDistance;

impl DistanceEstimator for RandomDistance {
    fn estimate(&self, origin: &str, destination: &str) -> DistanceEstimate {
        if origin.trim().is_empty() || destination.trim().is_empty() {
            return DistanceEstimate::missing_locations();
        }

        DistanceEstimate {
            km: rand::random_range(SIMULATED_KM),
            error: None,
            message: Some("Cálculo de ruta exitoso (Simulado)".to_string()),
        }
    }
}

/// Run `estimator` for a request whose locations may be absent.
pub fn estimate_request(
    estimator: &dyn DistanceEstimator,
    req: &DistanceRequest,
) -> DistanceEstimate {
    match (req.origin.as_deref(), req.destination.as_deref()) {
        (Some(origin), Some(destination)) => estimator.estimate(origin, destination),
        _ => DistanceEstimate::missing_locations(),
    }
}
