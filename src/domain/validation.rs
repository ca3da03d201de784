//! Display-name and join-code validation.

const MAX_DISPLAY_NAME_LENGTH: usize = 32;
const JOIN_CODE_LENGTH: usize = 6;
const MIN_NON_HOST_PARTICIPANTS: usize = 6;
const MAX_NON_HOST_PARTICIPANTS: usize = 20;

/// Validates a participant display name: non-empty, not all whitespace, and
/// within the configured length limit.
pub fn validate_display_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("display name must not be empty".to_string());
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(format!(
            "display name must be at most {MAX_DISPLAY_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validates the shape of a join code: six zero-padded decimal digits. Does
/// not check existence — that is a store lookup.
pub fn validate_join_code_shape(code: &str) -> Result<(), String> {
    if code.len() != JOIN_CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!(
            "join code must be exactly {JOIN_CODE_LENGTH} decimal digits"
        ));
    }
    Ok(())
}

/// Validates that `assign_roles` may run for the given non-host participant
/// count (`n >= 6`).
#[must_use]
pub const fn can_assign_roles(non_host_count: usize) -> bool {
    non_host_count >= MIN_NON_HOST_PARTICIPANTS
}

/// Validates the join-time capacity cap (20 non-hosts).
#[must_use]
pub const fn has_room_for_join(current_non_host_count: usize) -> bool {
    current_non_host_count < MAX_NON_HOST_PARTICIPANTS
}

/// The attrition-reset threshold: below this non-host count the session
/// reverts to `lobby`.
#[must_use]
pub const fn is_attrition_threshold(non_host_count: usize) -> bool {
    non_host_count < MIN_NON_HOST_PARTICIPANTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_or_whitespace_names() {
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name("   ").is_err());
        assert!(validate_display_name("Alice").is_ok());
    }

    #[test]
    fn join_code_shape() {
        assert!(validate_join_code_shape("012345").is_ok());
        assert!(validate_join_code_shape("12345").is_err());
        assert!(validate_join_code_shape("12345a").is_err());
    }

    #[test]
    fn capacity_and_attrition_thresholds() {
        assert!(!can_assign_roles(5));
        assert!(can_assign_roles(6));
        assert!(has_room_for_join(19));
        assert!(!has_room_for_join(20));
        assert!(is_attrition_threshold(5));
        assert!(!is_attrition_threshold(6));
    }
}
