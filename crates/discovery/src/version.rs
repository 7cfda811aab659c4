//! Minimum version gate.

use crate::error::{ErrorKind, Result};
use semver::Version;

/// Oldest Swagger UI release this formatter works with.
pub const MIN_SUPPORTED_LIBRARY_VERSION: &str = "4.15.0";

/// Parse a version string the way release tooling writes them.
///
/// Tolerates a leading `v` or `=`, surrounding whitespace and missing minor or
/// patch components (`5` is `5.0.0`). Pre-release and build metadata are kept,
/// so `4.15.0-beta.1` sorts before `4.15.0`.
pub fn parse(raw: &str) -> Option<Version> {
    let trimmed = raw.trim().trim_start_matches(['v', 'V', '=']).trim_start();
    if let Ok(version) = Version::parse(trimmed) {
        return Some(version);
    }
    let split = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(split);
    let mut parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty() || parts.len() > 3 || parts.iter().any(|part| part.is_empty()) {
        return None;
    }
    parts.resize(3, "0");
    Version::parse(&format!("{}{suffix}", parts.join("."))).ok()
}

/// Check a raw version against [`MIN_SUPPORTED_LIBRARY_VERSION`].
///
/// Returns the raw string unmodified on success. A version that cannot be
/// parsed at all is treated as unsupported.
pub fn ensure_supported(raw: String) -> Result<String> {
    let minimum = parse(MIN_SUPPORTED_LIBRARY_VERSION);
    match (parse(&raw), minimum) {
        (Some(actual), Some(minimum)) if actual >= minimum => Ok(raw),
        _ => exn::bail!(ErrorKind::VersionUnsupported {
            actual: raw,
            minimum: MIN_SUPPORTED_LIBRARY_VERSION.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("4.15.0", Some("4.15.0"))]
    #[case("v5.17.14", Some("5.17.14"))]
    #[case("=4.15.1", Some("4.15.1"))]
    #[case(" 5.0.0 ", Some("5.0.0"))]
    #[case("5", Some("5.0.0"))]
    #[case("4.16", Some("4.16.0"))]
    #[case("4.16-rc.1", Some("4.16.0-rc.1"))]
    #[case("5.0.0-alpha.3+build.1", Some("5.0.0-alpha.3+build.1"))]
    #[case("", None)]
    #[case("latest", None)]
    #[case("1.2.3.4", None)]
    #[case("1..2", None)]
    fn test_parse(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse(raw).map(|v| v.to_string()).as_deref(), expected);
    }

    #[rstest]
    #[case("4.15.0")]
    #[case("4.15.1")]
    #[case("4.20.3")]
    #[case("5.17.14")]
    #[case("v4.15.0")]
    fn test_supported(#[case] raw: &str) {
        assert_eq!(ensure_supported(raw.to_string()).unwrap(), raw);
    }

    #[rstest]
    #[case("3.9.9")]
    #[case("4.14.999")]
    #[case("4.15.0-beta.1")]
    #[case("4")]
    #[case("not-a-version")]
    fn test_unsupported(#[case] raw: &str) {
        let err = ensure_supported(raw.to_string()).unwrap_err();
        let ErrorKind::VersionUnsupported { actual, minimum } = &*err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(actual, raw);
        assert_eq!(minimum, MIN_SUPPORTED_LIBRARY_VERSION);
    }
}
