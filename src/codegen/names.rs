//! Name Translation
//!
//! Turns schema identifiers into Python identifiers and type URIs into
//! qualified fairgraph class names.
//!
//! Both directions are pure. A type URI must derive to the same class name
//! whether it is the schema being generated or a target of a linked/embedded
//! property, so every call site goes through [`derive_class_name`].

use regex::Regex;

/// Root package all generated classes live under
pub const NAMESPACE_ROOT: &str = "openminds";

/// Identifiers with a fixed Python name. Never pluralized.
const NAME_OVERRIDES: &[(&str, &str)] = &[
    ("shortName", "alias"),
    ("fullName", "name"),
    ("scope", "model_scope"),
    ("hasVersion", "versions"),
];

// =============================================================================
// NameTranslator
// =============================================================================

/// Converts camelCase schema identifiers to snake_case
#[derive(Debug, Clone)]
pub struct NameTranslator {
    /// Boundary before a capitalized word
    word_boundary: Regex,
    /// Boundary between a lowercase/digit and an uppercase character
    case_boundary: Regex,
}

impl Default for NameTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameTranslator {
    pub fn new() -> Self {
        Self {
            word_boundary: Regex::new(r"(.)([A-Z][a-z]+)").expect("static regex"),
            case_boundary: Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"),
        }
    }

    /// Look up the fixed Python name for an identifier
    pub fn override_for(identifier: &str) -> Option<&'static str> {
        NAME_OVERRIDES
            .iter()
            .find(|(from, _)| *from == identifier)
            .map(|(_, to)| *to)
    }

    /// Translate an identifier.
    ///
    /// `allow_multiple` appends a plain `s`, e.g. `dataset` -> `datasets`,
    /// but also `data` -> `datas`.
    pub fn translate(&self, identifier: &str, allow_multiple: bool) -> String {
        if let Some(name) = Self::override_for(identifier) {
            return name.to_string();
        }

        let split = self.word_boundary.replace_all(identifier, "${1}_${2}");
        let mut name = self.case_boundary.replace_all(&split, "${1}_${2}").to_lowercase();
        if allow_multiple {
            name.push('s');
        }
        name
    }
}

// =============================================================================
// Class names
// =============================================================================

/// Derive the qualified class name of a type URI.
///
/// Takes the last two path segments, lowercases the first, keeps the casing
/// of the last: `https://openminds.ebrains.eu/core/Person` ->
/// `openminds.core.Person`.
pub fn derive_class_name(type_uri: &str) -> String {
    let segments: Vec<&str> = type_uri.split('/').collect();
    let tail = &segments[segments.len().saturating_sub(2)..];

    let mut parts = Vec::with_capacity(tail.len() + 1);
    parts.push(NAMESPACE_ROOT.to_string());
    if let Some((last, rest)) = tail.split_last() {
        parts.extend(rest.iter().map(|s| s.to_lowercase()));
        parts.push((*last).to_string());
    }
    parts.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_ignore_multiplicity() {
        let names = NameTranslator::new();
        for (from, to) in NAME_OVERRIDES {
            assert_eq!(names.translate(from, false), *to);
            assert_eq!(names.translate(from, true), *to);
        }
    }

    #[test]
    fn test_camel_case_split() {
        let names = NameTranslator::new();
        assert_eq!(names.translate("someNewProperty", false), "some_new_property");
        assert_eq!(names.translate("givenName", false), "given_name");
        assert_eq!(names.translate("identifier", false), "identifier");
        assert_eq!(names.translate("ORCID", false), "orcid");
        assert_eq!(names.translate("DOI2Value", false), "doi2_value");
        assert_eq!(names.translate("contentTypeIRI", false), "content_type_iri");
    }

    #[test]
    fn test_file_stems_translate() {
        let names = NameTranslator::new();
        assert_eq!(names.translate("person", false), "person");
        assert_eq!(names.translate("contactInformation", false), "contact_information");
    }

    #[test]
    fn test_naive_pluralization() {
        let names = NameTranslator::new();
        assert_eq!(names.translate("affiliation", true), "affiliations");
        assert_eq!(names.translate("data", true), "datas");
        assert_eq!(names.translate("hasPart", true), "has_parts");
    }

    #[test]
    fn test_derive_class_name_casing_asymmetry() {
        assert_eq!(
            derive_class_name("https://openminds.ebrains.eu/core/Person"),
            "openminds.core.Person"
        );
        assert_eq!(
            derive_class_name("https://openminds.ebrains.eu/core/person"),
            "openminds.core.person"
        );
        assert_eq!(
            derive_class_name("https://openminds.ebrains.eu/controlledTerms/Species"),
            "openminds.controlledterms.Species"
        );
    }

    #[test]
    fn test_derive_class_name_short_uri() {
        assert_eq!(derive_class_name("Person"), "openminds.Person");
    }
}
