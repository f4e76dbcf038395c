//! Localized description selection
//!
//! Projects carry an English and a German description plus a legacy
//! single-language field. Display code asks for one string and gets the best
//! available match for the requested language.

use crate::types::Project;

/// Select the display description for the requested language tag.
///
/// Precedence:
/// 1. `description_de` when the requested language is `"de"`
/// 2. `description_en` when the requested language is `"en"`
/// 3. `description_en` (cross-language fallback)
/// 4. `description_de`
/// 5. legacy `description`, or the empty string
///
/// Empty strings are treated as absent. Total: never panics, defined for
/// every combination of present and absent fields.
///
/// # Examples
///
/// ```
/// use portfolio_domain::{localized_description, Project};
///
/// let project = Project {
///     description_en: Some("English".into()),
///     description_de: Some("Deutsch".into()),
///     ..Project::default()
/// };
/// assert_eq!(localized_description(&project, "de"), "Deutsch");
/// assert_eq!(localized_description(&project, "en"), "English");
///
/// let bare = Project { description: Some("Legacy".into()), ..Project::default() };
/// assert_eq!(localized_description(&bare, "de"), "Legacy");
/// ```
#[must_use]
pub fn localized_description<'a>(project: &'a Project, language: &str) -> &'a str {
    if language == "de" {
        if let Some(text) = non_empty(project.description_de.as_deref()) {
            return text;
        }
    }

    if language == "en" {
        if let Some(text) = non_empty(project.description_en.as_deref()) {
            return text;
        }
    }

    // Cross-language fallback: prefer English, then German
    if let Some(text) = non_empty(project.description_en.as_deref()) {
        return text;
    }
    if let Some(text) = non_empty(project.description_de.as_deref()) {
        return text;
    }

    // Last resort: legacy description field
    non_empty(project.description.as_deref()).unwrap_or("")
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(
        description: Option<&str>,
        description_en: Option<&str>,
        description_de: Option<&str>,
    ) -> Project {
        Project {
            description: description.map(str::to_string),
            description_en: description_en.map(str::to_string),
            description_de: description_de.map(str::to_string),
            ..Project::default()
        }
    }

    #[test]
    fn returns_requested_language_when_present() {
        let p = project(None, Some("E"), Some("D"));
        assert_eq!(localized_description(&p, "de"), "D");
        assert_eq!(localized_description(&p, "en"), "E");
    }

    #[test]
    fn falls_back_to_english_for_other_languages() {
        let p = project(None, Some("E"), Some("D"));
        assert_eq!(localized_description(&p, "fr"), "E");
    }

    #[test]
    fn falls_back_across_languages() {
        let p = project(None, Some("E"), None);
        assert_eq!(localized_description(&p, "de"), "E");

        let p = project(None, None, Some("D"));
        assert_eq!(localized_description(&p, "en"), "D");
    }

    #[test]
    fn falls_back_to_legacy_description() {
        let p = project(Some("Legacy"), None, None);
        assert_eq!(localized_description(&p, "de"), "Legacy");
    }

    #[test]
    fn returns_empty_string_when_nothing_is_set() {
        let p = project(None, None, None);
        assert_eq!(localized_description(&p, "en"), "");
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let p = project(Some("Legacy"), Some(""), Some(""));
        assert_eq!(localized_description(&p, "de"), "Legacy");
    }
}
