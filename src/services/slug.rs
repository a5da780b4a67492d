/// Turn free text into a URL-safe slug: lowercase ASCII alphanumerics
/// and underscores, whitespace and hyphen runs collapsed to a single
/// hyphen, everything else dropped, no leading or trailing `-`/`_`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
        }
    }
    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}
