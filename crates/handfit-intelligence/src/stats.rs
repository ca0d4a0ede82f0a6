// ABOUTME: Projection of grouped measurement aggregates into UserStats rows
// ABOUTME: The empty aggregate yields zeroed averages and an unknown hand size
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use chrono::{DateTime, Utc};
use handfit_core::models::{MeasurementAggregate, UserStats};
use uuid::Uuid;

use crate::classification::classify_hand_size;

/// Build the stats row for `user_id` from its live-measurement aggregate
///
/// `aggregate` is `None` (or has a zero count) when the user has no live
/// measurements; averages are then 0 and the hand size is `unknown`.
#[must_use]
pub fn project_user_stats(
    user_id: Uuid,
    aggregate: Option<MeasurementAggregate>,
    computed_at: DateTime<Utc>,
) -> UserStats {
    match aggregate.filter(|a| a.count > 0) {
        Some(aggregate) => UserStats {
            user_id,
            average_palm: aggregate.average_palm,
            average_length: aggregate.average_length,
            hand_size: classify_hand_size(aggregate.average_palm, aggregate.count),
            measurement_count: aggregate.count,
            last_measured_at: aggregate.last_measured_at,
            updated_at: computed_at,
        },
        None => UserStats {
            user_id,
            average_palm: 0.0,
            average_length: 0.0,
            hand_size: classify_hand_size(0.0, 0),
            measurement_count: 0,
            last_measured_at: None,
            updated_at: computed_at,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handfit_core::models::HandSize;

    #[test]
    fn test_empty_aggregate() {
        let user_id = Uuid::new_v4();
        let stats = project_user_stats(user_id, None, Utc::now());
        assert_eq!(stats.user_id, user_id);
        assert_eq!(stats.measurement_count, 0);
        assert_eq!(stats.hand_size, HandSize::Unknown);
        assert!(stats.average_palm.abs() < f64::EPSILON);
        assert!(stats.average_length.abs() < f64::EPSILON);
        assert!(stats.last_measured_at.is_none());
    }

    #[test]
    fn test_populated_aggregate() {
        let last = Utc::now();
        let stats = project_user_stats(
            Uuid::new_v4(),
            Some(MeasurementAggregate {
                average_palm: 87.5,
                average_length: 72.0,
                count: 2,
                last_measured_at: Some(last),
            }),
            Utc::now(),
        );
        assert_eq!(stats.hand_size, HandSize::Medium);
        assert_eq!(stats.measurement_count, 2);
        assert_eq!(stats.last_measured_at, Some(last));
    }

    #[test]
    fn test_projection_is_stable_apart_from_timestamp() {
        let user_id = Uuid::new_v4();
        let aggregate = MeasurementAggregate {
            average_palm: 96.0,
            average_length: 80.0,
            count: 3,
            last_measured_at: None,
        };
        let first = project_user_stats(user_id, Some(aggregate), Utc::now());
        let second = project_user_stats(user_id, Some(aggregate), first.updated_at);
        assert_eq!(first, second);
        assert_eq!(first.hand_size, HandSize::Large);
    }
}
