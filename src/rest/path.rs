//! Path building for API resources.
//!
//! Resource paths are templates such as
//! `/projects/{project_id}/contacts/{id}`; [`build_path`] substitutes the
//! identifying fields, percent-encoding each value so that ids can never
//! escape their path segment.

use std::borrow::Cow;

/// Builds a path by replacing `{name}` placeholders with encoded values.
///
/// Placeholders without a matching value are left untouched.
///
/// # Example
///
/// ```rust
/// use telerivet::rest::build_path;
///
/// let path = build_path(
///     "/projects/{project_id}/contacts/{id}",
///     &[("project_id", "PJ1"), ("id", "CT 2")],
/// );
/// assert_eq!(path, "/projects/PJ1/contacts/CT%202");
/// ```
#[must_use]
pub fn build_path(template: &str, ids: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &encode_segment(value));
    }

    result
}

/// Percent-encodes a single path segment.
#[must_use]
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_path_replaces_all_placeholders() {
        let path = build_path(
            "/projects/{project_id}/tables/{table_id}/rows/{id}",
            &[("project_id", "PJ1"), ("table_id", "DT2"), ("id", "DR3")],
        );
        assert_eq!(path, "/projects/PJ1/tables/DT2/rows/DR3");
    }

    #[test]
    fn test_build_path_encodes_segment_separators() {
        let path = build_path("/projects/{id}", &[("id", "../organizations")]);
        assert_eq!(path, "/projects/..%2Forganizations");
    }

    #[test]
    fn test_build_path_leaves_unknown_placeholders() {
        let path = build_path("/projects/{project_id}/contacts/{id}", &[("id", "CT1")]);
        assert_eq!(path, "/projects/{project_id}/contacts/CT1");
    }
}
