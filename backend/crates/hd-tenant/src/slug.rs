use crate::{Result as TenantErrorResult, TenantError};

use std::panic::Location;

use error_location::ErrorLocation;

/// DNS-label sized
pub const MAX_SLUG_LENGTH: usize = 63;

/// Normalize a raw slug token to lowercase `[a-z0-9-]+`.
///
/// Whitespace is trimmed before the check. A blank or absent token is
/// `SlugMissing`; anything else outside the alphabet is `SlugInvalid`.
#[track_caller]
pub fn normalize_slug(raw: Option<&str>) -> TenantErrorResult<String> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(TenantError::SlugMissing {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let slug = trimmed.to_ascii_lowercase();
    let valid = slug.len() <= MAX_SLUG_LENGTH
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');

    if !valid {
        return Err(TenantError::SlugInvalid {
            slug,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(slug)
}
