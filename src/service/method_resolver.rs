use crate::types::CalculationMethod;

/// Countries with a known regional convention. Anything not listed falls
/// back to [`CalculationMethod::MuslimWorldLeague`].
const COUNTRY_METHODS: &[(CalculationMethod, &[&str])] = &[
    (CalculationMethod::MuslimWorldLeague, &["australia"]),
    (
        CalculationMethod::NorthAmerica,
        &["united kingdom", "uk", "france", "belgium"],
    ),
    (
        CalculationMethod::UmmAlQura,
        &["saudi arabia", "uae", "qatar", "kuwait"],
    ),
    (
        CalculationMethod::Karachi,
        &["pakistan", "india", "bangladesh"],
    ),
    (CalculationMethod::Egyptian, &["egypt"]),
];

/// Pick the calculation method for a free-text country name.
///
/// Matching is case-insensitive on the whole (trimmed) name. Unrecognised
/// input is not rejected; it gets the default method.
pub fn resolve_method(country: &str) -> CalculationMethod {
    let country = country.trim().to_lowercase();
    COUNTRY_METHODS
        .iter()
        .find(|(_, names)| names.contains(&country.as_str()))
        .map(|(method, _)| *method)
        .unwrap_or_default()
}
