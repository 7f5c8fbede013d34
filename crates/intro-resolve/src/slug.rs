//! Slug normalization
//!
//! Turns a human-readable campaign or company name into a key-safe identifier.
//! Both the scenario parser and the resolver key on this exact rule, so a name
//! seen in a spreadsheet header and the same name seen in research output land
//! on the same slug.

/// Normalize `name` into a slug.
///
/// Lowercases, maps spaces and hyphens to underscores, then drops every
/// character outside `[a-z0-9_]`.
///
/// # Examples
/// - `"Loyalty Rewards"` → `loyalty_rewards`
/// - `"Employee Timeliness & Attendance"` → `employee_timeliness__attendance`
/// - `"Drive-Thru Speed"` → `drive_thru_speed`
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

/// Check whether `s` is already in normalized form.
#[inline]
#[must_use]
pub fn is_slug(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
