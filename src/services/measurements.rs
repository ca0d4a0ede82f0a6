// ABOUTME: Measurement Store service with create, get, list, update, and soft delete
// ABOUTME: Normalizes to millimeters, scores quality, validates ranges, and schedules stats recomputes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use handfit_intelligence::{normalize_to_mm, score_quality};
use tracing::{debug, info};
use uuid::Uuid;

use super::{now, parse_measurement_id, parse_user_id};
use crate::constants::limits::{LENGTH_MAX_MM, LENGTH_MIN_MM, PALM_MAX_MM, PALM_MIN_MM};
use crate::database_plugins::{MeasurementFilter, MeasurementPatch, MeasurementStore};
use crate::errors::{AppError, AppResult};
use crate::models::{
    CreateMeasurementRequest, Measurement, MeasurementListRequest, MeasurementSort,
    MeasurementUnit, UpdateMeasurementRequest,
};
use crate::pagination::{Page, PageRequest};
use crate::tasks::RecomputeQueue;

const MEASUREMENT: &str = "Measurement";

/// Owner-scoped measurement CRUD
///
/// A measurement that belongs to someone else is reported exactly like one
/// that does not exist.
#[derive(Clone)]
pub struct MeasurementService {
    store: Arc<dyn MeasurementStore>,
    recompute: RecomputeQueue,
}

impl MeasurementService {
    /// Create the service; mutations schedule recomputes on `recompute`
    #[must_use]
    pub fn new(store: Arc<dyn MeasurementStore>, recompute: RecomputeQueue) -> Self {
        Self { store, recompute }
    }

    /// Normalize, score, and persist a new measurement
    ///
    /// # Errors
    ///
    /// - `AUTH_REQUIRED` for a blank user id
    /// - `INVALID_FORMAT` for a malformed user id or unknown unit
    /// - `VALUE_OUT_OF_RANGE` when the millimeter values fall outside the accepted ranges
    /// - `DATABASE_ERROR` when the insert fails
    pub async fn create(
        &self,
        user_id: &str,
        request: CreateMeasurementRequest,
    ) -> AppResult<Measurement> {
        let user_id = parse_user_id(user_id)?;
        let unit: MeasurementUnit = request.unit.trim().parse()?;

        let palm = normalize_to_mm(request.palm, unit);
        let length = normalize_to_mm(request.length, unit);
        validate_palm(palm)?;
        validate_length(length)?;

        let created_at = now();
        let measurement = Measurement {
            id: Uuid::new_v4(),
            user_id,
            palm,
            length,
            device: request
                .device
                .map(|d| d.trim().to_owned())
                .filter(|d| !d.is_empty()),
            quality: score_quality(request.calibrated),
            deleted: false,
            created_at,
            updated_at: created_at,
        };

        self.store.insert_measurement(&measurement).await?;
        info!(
            user_id = %user_id,
            measurement_id = %measurement.id,
            unit = unit.as_str(),
            score = measurement.quality.score,
            "Created measurement"
        );

        self.recompute.schedule(user_id);
        Ok(measurement)
    }

    /// Fetch one live measurement owned by the caller
    ///
    /// # Errors
    ///
    /// `RESOURCE_NOT_FOUND` when absent, deleted, or owned by another user
    pub async fn get(&self, user_id: &str, measurement_id: &str) -> AppResult<Measurement> {
        let user_id = parse_user_id(user_id)?;
        let measurement_id = parse_measurement_id(measurement_id)?;
        self.find_owned(user_id, measurement_id).await
    }

    /// One page of the caller's live measurements
    ///
    /// Defaults to newest first. `start_date` and `end_date` are whole UTC
    /// days, both inclusive.
    ///
    /// # Errors
    ///
    /// `INVALID_FORMAT` for an unknown sort key or malformed date,
    /// `INVALID_INPUT` when `start_date` falls after `end_date`
    pub async fn list(
        &self,
        user_id: &str,
        request: &MeasurementListRequest,
    ) -> AppResult<Page<Measurement>> {
        let user_id = parse_user_id(user_id)?;
        let page = PageRequest::new(request.page, request.page_size);
        let sort = parse_sort(request)?;

        let start = request
            .start_date
            .as_deref()
            .map(|raw| parse_date("start_date", raw))
            .transpose()?;
        let end = request
            .end_date
            .as_deref()
            .map(|raw| parse_date("end_date", raw))
            .transpose()?;
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(AppError::invalid_input(format!(
                    "start_date {start} is after end_date {end}"
                )));
            }
        }

        let mut filter = MeasurementFilter::active(user_id);
        if let Some(start) = start {
            filter = filter.created_from(start_of_day(start));
        }
        if let Some(end) = end {
            let next_day = end
                .checked_add_days(Days::new(1))
                .ok_or_else(|| AppError::invalid_format(format!("end_date {end} is too late")))?;
            filter = filter.created_before(start_of_day(next_day));
        }

        let items = self.store.find_measurements(&filter, sort, page).await?;
        let total = self.store.count_measurements(&filter).await?;

        debug!(
            user_id = %user_id,
            page = page.page,
            page_size = page.page_size,
            count = items.len(),
            total,
            "Listed measurements"
        );
        Ok(Page::new(page, items, total))
    }

    /// Apply a partial update and return the stored result
    ///
    /// Supplied `palm`/`length` are converted with the request's unit
    /// (millimeters when absent); a supplied `calibrated` flag rescores
    /// quality. `updated_at` always moves forward.
    ///
    /// # Errors
    ///
    /// - `RESOURCE_NOT_FOUND` when the measurement is not live and owned by the caller
    /// - validation errors as for [`Self::create`]
    pub async fn update(
        &self,
        user_id: &str,
        measurement_id: &str,
        request: UpdateMeasurementRequest,
    ) -> AppResult<Measurement> {
        let user_id = parse_user_id(user_id)?;
        let measurement_id = parse_measurement_id(measurement_id)?;
        let unit = match request.unit.as_deref() {
            Some(raw) => raw.trim().parse()?,
            None => MeasurementUnit::default(),
        };

        let mut patch = MeasurementPatch::touch(now());
        if let Some(palm) = request.palm {
            let palm = normalize_to_mm(palm, unit);
            validate_palm(palm)?;
            patch.palm = Some(palm);
        }
        if let Some(length) = request.length {
            let length = normalize_to_mm(length, unit);
            validate_length(length)?;
            patch.length = Some(length);
        }
        patch.quality = request.calibrated.map(score_quality);

        let filter = MeasurementFilter::active(user_id).with_id(measurement_id);
        let matched = self.store.update_measurement(&filter, &patch).await?;
        if matched == 0 {
            return Err(not_found(measurement_id));
        }
        info!(
            user_id = %user_id,
            measurement_id = %measurement_id,
            rescored = patch.quality.is_some(),
            "Updated measurement"
        );

        self.recompute.schedule(user_id);
        self.find_owned(user_id, measurement_id).await
    }

    /// Soft delete; the row stays but disappears from every read and aggregate
    ///
    /// # Errors
    ///
    /// `RESOURCE_NOT_FOUND` when no live measurement owned by the caller matched
    pub async fn delete(&self, user_id: &str, measurement_id: &str) -> AppResult<()> {
        let user_id = parse_user_id(user_id)?;
        let measurement_id = parse_measurement_id(measurement_id)?;

        let filter = MeasurementFilter::active(user_id).with_id(measurement_id);
        let matched = self
            .store
            .update_measurement(&filter, &MeasurementPatch::soft_delete(now()))
            .await?;
        if matched == 0 {
            return Err(not_found(measurement_id));
        }
        info!(user_id = %user_id, measurement_id = %measurement_id, "Deleted measurement");

        self.recompute.schedule(user_id);
        Ok(())
    }

    async fn find_owned(&self, user_id: Uuid, measurement_id: Uuid) -> AppResult<Measurement> {
        let filter = MeasurementFilter::active(user_id).with_id(measurement_id);
        self.store
            .find_measurement(&filter)
            .await?
            .ok_or_else(|| not_found(measurement_id))
    }
}

fn not_found(measurement_id: Uuid) -> AppError {
    AppError::not_found(MEASUREMENT).with_resource_id(measurement_id.to_string())
}

fn validate_palm(palm: f64) -> AppResult<()> {
    validate_range("palm", palm, PALM_MIN_MM, PALM_MAX_MM)
}

fn validate_length(length: f64) -> AppResult<()> {
    validate_range("length", length, LENGTH_MIN_MM, LENGTH_MAX_MM)
}

fn validate_range(field: &str, value: f64, min: f64, max: f64) -> AppResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AppError::out_of_range(field, value, min, max))
    }
}

fn parse_sort(request: &MeasurementListRequest) -> AppResult<MeasurementSort> {
    let mut sort = MeasurementSort::default();
    if let Some(field) = request.sort_by.as_deref() {
        sort.field = field.trim().parse()?;
    }
    if let Some(order) = request.sort_order.as_deref() {
        sort.order = order.trim().parse()?;
    }
    Ok(sort)
}

fn parse_date(field: &str, raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::invalid_format(format!("{field} must be YYYY-MM-DD, got '{raw}'"))
    })
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(validate_palm(50.0).is_ok());
        assert!(validate_palm(150.0).is_ok());
        assert!(validate_palm(49.9).is_err_and(|e| e.is_validation()));
        assert!(validate_length(120.1).is_err());
        assert!(validate_length(f64::NAN).is_err());
        assert!(validate_length(f64::INFINITY).is_err());
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(parse_date("start_date", "2025-03-01").is_ok());
        assert!(parse_date("start_date", "03/01/2025").is_err_and(|e| e.is_validation()));
        assert!(parse_date("end_date", "2025-02-30").is_err());
    }

    #[test]
    fn test_start_of_day_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1);
        let start = date.map(start_of_day).map(|ts| ts.to_rfc3339());
        assert_eq!(start.as_deref(), Some("2025-03-01T00:00:00+00:00"));
    }

    #[test]
    fn test_parse_sort_defaults_and_errors() {
        let default = parse_sort(&MeasurementListRequest::default()).ok();
        assert_eq!(default, Some(MeasurementSort::default()));

        let bad = MeasurementListRequest {
            sort_by: Some("weight".to_owned()),
            ..Default::default()
        };
        assert!(parse_sort(&bad).is_err_and(|e| e.is_validation()));
    }
}
