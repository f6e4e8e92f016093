//! Precondition checks run by callers before and after estimation

use thiserror::Error;

use crate::model::{Trip, Vehicle};
use crate::service::estimator::{CostInput, CostResult};
use haulcost_types::Error;

/// Rejected estimator input or output
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("result field {field} is not finite")]
    NonFiniteResult { field: &'static str },
}

impl From<InputError> for Error {
    fn from(err: InputError) -> Self {
        match err {
            InputError::NonFiniteResult { .. } => Error::NonFiniteResult(err.to_string()),
            _ => Error::InvalidInput(err.to_string()),
        }
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(InputError::NotPositive { field, value });
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    Ok(())
}

/// Check every estimator precondition
///
/// A delivery count of zero is accepted; the estimator treats it as absent.
pub fn validate_cost_input(input: &CostInput) -> Result<(), InputError> {
    require_positive("distance_km", input.distance_km)?;
    require_positive("km_per_liter", input.km_per_liter)?;
    require_non_negative("diesel_price_per_liter", input.diesel_price_per_liter)?;
    require_positive("average_speed_kmh", input.average_speed_kmh)?;
    for rate in &input.variable_cost_rates {
        require_non_negative("variable_cost_rate", *rate)?;
    }
    for toll in &input.toll_amounts {
        require_non_negative("toll_amount", *toll)?;
    }
    for monthly in &input.monthly_fixed_costs {
        require_non_negative("monthly_fixed_cost", *monthly)?;
    }
    Ok(())
}

/// Reject a result carrying infinity or NaN
pub fn ensure_finite(result: &CostResult) -> Result<(), InputError> {
    match result.non_finite_fields().first() {
        Some(field) => Err(InputError::NonFiniteResult { field: *field }),
        None => Ok(()),
    }
}

/// Rejected trip record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripValidationError {
    #[error("start date {start} is after end date {end}")]
    DatesOutOfOrder {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("cargo weight {weight_tons}t exceeds vehicle capacity {capacity_tons}t")]
    OverCapacity { weight_tons: f64, capacity_tons: f64 },
}

impl From<TripValidationError> for Error {
    fn from(err: TripValidationError) -> Self {
        Error::InvalidInput(err.to_string())
    }
}

/// Check a trip against the rules of the trip form
pub fn validate_trip(trip: &Trip, vehicle: Option<&Vehicle>) -> Result<(), TripValidationError> {
    if trip.start_date > trip.end_date {
        return Err(TripValidationError::DatesOutOfOrder {
            start: trip.start_date,
            end: trip.end_date,
        });
    }

    let optional_fields = [
        ("weight_tons", trip.weight_tons),
        ("volume_m3", trip.volume_m3),
        ("extra_cost", trip.extra_cost),
    ];
    for (field, value) in optional_fields {
        if let Some(v) = value {
            if v < 0.0 {
                return Err(TripValidationError::Negative { field, value: v });
            }
        }
    }

    if let (Some(weight), Some(v)) = (trip.weight_tons, vehicle) {
        if weight > v.capacity_tons {
            return Err(TripValidationError::OverCapacity {
                weight_tons: weight,
                capacity_tons: v.capacity_tons,
            });
        }
    }

    Ok(())
}
