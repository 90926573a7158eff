/// Canonical lookup key for a display name: lowercase with every space removed.
///
/// `slugify("Men's Wear") == "men'swear"`. Applying it twice is a no-op.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

/// The slug to store: client slugs are only kept when they already match the
/// derivation, so the result is always `slugify(name)`.
pub fn resolve_slug(name: &str, submitted: Option<&str>) -> String {
    let derived = slugify(name);
    match submitted {
        Some(slug) if !slug.is_empty() && slug == derived => slug.to_string(),
        _ => derived,
    }
}
