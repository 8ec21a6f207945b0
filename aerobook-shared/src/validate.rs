/// Returns the names of every field whose value is empty once trimmed.
///
/// Callers pass `(field_name, value)` pairs in the order they want them
/// reported, e.g. `blank_fields(&[("name", &crew.name), ("role", &crew.role)])`.
pub fn blank_fields<'a>(fields: &[(&'a str, &str)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}
