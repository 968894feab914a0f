use teloxide::types::UserId;

use crate::error::EngineError;

/// Fixed escalation threshold. Reaching it triggers a ban and a reset.
pub const WARN_LIMIT: i64 = 3;

/// Applies a warning delta to the stored count. The count never goes
/// negative, whatever sequence of deltas gets thrown at it.
pub fn apply_delta(current: i64, delta: i64) -> i64 {
    (current + delta).max(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarnVerdict {
    /// Below the limit: warn and keep counting.
    Warned(i64),
    /// Limit reached: the caller must ban and then reset the count to 0.
    Escalated,
}

pub fn verdict(new_count: i64) -> WarnVerdict {
    if new_count >= WARN_LIMIT {
        WarnVerdict::Escalated
    } else {
        WarnVerdict::Warned(new_count)
    }
}

/// The owner is exempt from ever being warned. Rejected before any mutation.
pub fn check_warn_target(owner_id: UserId, target: UserId) -> Result<(), EngineError> {
    if target == owner_id {
        Err(EngineError::Policy("I cannot warn the owner.".to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_never_goes_below_zero() {
        let mut count = 0;
        for delta in [-5, 2, -10, 1, -1, -1, 3, -100] {
            count = apply_delta(count, delta);
            assert!(count >= 0, "delta {delta} drove count to {count}");
        }
    }

    #[test]
    fn three_warns_escalate_exactly_once() {
        let mut count = 0;
        let mut bans = 0;
        for _ in 0..3 {
            count = apply_delta(count, 1);
            if let WarnVerdict::Escalated = verdict(count) {
                bans += 1;
                count = apply_delta(count, -count);
            }
        }
        assert_eq!(bans, 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn counts_below_limit_just_warn() {
        assert_eq!(verdict(1), WarnVerdict::Warned(1));
        assert_eq!(verdict(2), WarnVerdict::Warned(2));
        assert_eq!(verdict(3), WarnVerdict::Escalated);
        assert_eq!(verdict(7), WarnVerdict::Escalated);
    }

    #[test]
    fn owner_cannot_be_warned() {
        let owner = UserId(42);
        assert!(check_warn_target(owner, UserId(7)).is_ok());
        assert!(matches!(
            check_warn_target(owner, owner),
            Err(EngineError::Policy(_))
        ));
    }
}
