use chrono::{DateTime, Utc};

use crate::error::EngineError;

/// The single active countdown a group can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    pub name: String,
    pub target: DateTime<Utc>,
    /// The date as the admin typed it, kept for display.
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownStatus {
    NoneActive,
    Remaining {
        name: String,
        display: String,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    /// Reported exactly once; the caller clears the stored record as a side
    /// effect, so the next status call yields `NoneActive`.
    JustExpired { name: String },
}

/// A countdown target must be strictly in the future.
pub fn validate_target(target: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), EngineError> {
    if target <= now {
        Err(EngineError::Validation(
            "The target date must be in the future.".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Computes the status of a possibly-absent countdown. Decomposition of the
/// remainder uses floor division on whole seconds, no rounding.
pub fn status(active: Option<&Countdown>, now: DateTime<Utc>) -> CountdownStatus {
    let Some(c) = active else {
        return CountdownStatus::NoneActive;
    };
    let secs = (c.target - now).num_seconds();
    if secs <= 0 {
        return CountdownStatus::JustExpired {
            name: c.name.clone(),
        };
    }
    CountdownStatus::Remaining {
        name: c.name.clone(),
        display: c.display.clone(),
        days: secs / 86_400,
        hours: secs % 86_400 / 3_600,
        minutes: secs % 3_600 / 60,
        seconds: secs % 60,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn launch(target: DateTime<Utc>) -> Countdown {
        Countdown {
            name: "Launch".to_string(),
            target,
            display: "31/12/2030".to_string(),
        }
    }

    #[test]
    fn past_target_is_rejected() {
        let now = Utc::now();
        assert!(matches!(
            validate_target(now - Duration::seconds(1), now),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            validate_target(now, now),
            Err(EngineError::Validation(_))
        ));
        assert!(validate_target(now + Duration::seconds(2), now).is_ok());
    }

    #[test]
    fn absent_record_is_none_active() {
        assert_eq!(status(None, Utc::now()), CountdownStatus::NoneActive);
    }

    #[test]
    fn future_target_reports_remaining() {
        let now = Utc::now();
        let c = launch(now + Duration::seconds(2));
        match status(Some(&c), now) {
            CountdownStatus::Remaining { name, seconds, .. } => {
                assert_eq!(name, "Launch");
                assert_eq!(seconds, 2);
            }
            other => panic!("expected Remaining, got {other:?}"),
        }
    }

    #[test]
    fn passed_target_expires_once_then_record_is_cleared() {
        let now = Utc::now();
        let mut stored = Some(launch(now - Duration::seconds(1)));
        match status(stored.as_ref(), now) {
            CountdownStatus::JustExpired { name } => {
                assert_eq!(name, "Launch");
                // The caller's clear side effect.
                stored = None;
            }
            other => panic!("expected JustExpired, got {other:?}"),
        }
        assert_eq!(status(stored.as_ref(), now), CountdownStatus::NoneActive);
    }

    #[test]
    fn decomposition_uses_floor_division() {
        let now = Utc::now();
        // 1 day, 2 hours, 3 minutes, 4 seconds.
        let c = launch(now + Duration::seconds(86_400 + 2 * 3_600 + 3 * 60 + 4));
        match status(Some(&c), now) {
            CountdownStatus::Remaining {
                days,
                hours,
                minutes,
                seconds,
                ..
            } => {
                assert_eq!((days, hours, minutes, seconds), (1, 2, 3, 4));
            }
            other => panic!("expected Remaining, got {other:?}"),
        }
    }
}
