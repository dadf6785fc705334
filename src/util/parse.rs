use crate::error::{aura::AuraError, internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses a player-supplied aura amount.
///
/// Balances are whole numbers, so an amount with a non-zero fractional part is rejected
/// rather than truncated. Thousands separators (`1,000`) are accepted and `5.0` is treated
/// as `5`.
///
/// # Arguments
/// - `value` - Raw argument text
///
/// # Returns
/// - `Ok(i64)` - The whole amount
/// - `Err(AuraError::FractionalAmount)` - The amount has a fractional part
/// - `Err(AuraError::InvalidAmount)` - The text is not a number
pub fn parse_aura_amount(value: &str) -> Result<i64, AuraError> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();

    if let Ok(amount) = cleaned.parse::<i64>() {
        return Ok(amount);
    }

    match cleaned.split_once('.') {
        Some((whole, fraction))
            if !fraction.is_empty() && fraction.chars().all(|c| c.is_ascii_digit()) =>
        {
            if fraction.chars().any(|c| c != '0') {
                return Err(AuraError::FractionalAmount(value.to_string()));
            }
            whole
                .parse::<i64>()
                .map_err(|_| AuraError::InvalidAmount(value.to_string()))
        }
        _ => Err(AuraError::InvalidAmount(value.to_string())),
    }
}

/// Extracts the user ID from a Discord mention (`<@123>` or `<@!123>`) or a bare ID.
///
/// # Returns
/// - `Some(u64)` - The mentioned user's ID
/// - `None` - The text is not a user mention
pub fn parse_user_mention(value: &str) -> Option<u64> {
    let value = value.trim();
    let id = value
        .strip_prefix("<@")
        .and_then(|rest| rest.strip_suffix('>'))
        .map(|inner| inner.strip_prefix('!').unwrap_or(inner))
        .unwrap_or(value);

    id.parse::<u64>().ok().filter(|id| *id != 0)
}
