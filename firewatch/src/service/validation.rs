//! Input checks shared by the services. All of them run before any lookup.

use crate::error::{FirewatchError, FirewatchResult};

pub(crate) fn require_text(value: &str, field: &str) -> FirewatchResult<()> {
    if value.trim().is_empty() {
        return Err(FirewatchError::validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

pub(crate) fn require_identity(first_name: &str, last_name: &str) -> FirewatchResult<()> {
    require_text(first_name, "firstName")?;
    require_text(last_name, "lastName")
}

pub(crate) fn require_station_number(number: i64) -> FirewatchResult<()> {
    if number < 0 {
        return Err(FirewatchError::validation(format!(
            "station number must not be negative, got {}",
            number
        )));
    }
    Ok(())
}

pub(crate) fn require_station_numbers(numbers: &[i64]) -> FirewatchResult<()> {
    if numbers.is_empty() {
        return Err(FirewatchError::validation(
            "station number list must not be empty",
        ));
    }
    numbers.iter().try_for_each(|n| require_station_number(*n))
}

/// Stored station numbers are u32; anything beyond that range covers nobody.
pub(crate) fn station_key(number: i64) -> Option<u32> {
    u32::try_from(number).ok()
}
