//! User-facing text for `umbpack init`.
//!
//! Templates take their argument through a single `{}` placeholder, filled
//! by [`fill`], so the wording can change without touching control flow.

pub const INIT_HEADER: &str = "This utility will walk you through creating a package.xml file.\n\
It only covers the most common items, and tries to guess sensible defaults.";

pub const PACKAGE_NAME: &str = "Package name";
pub const DESCRIPTION: &str = "Description";
pub const VERSION: &str = "Version";
pub const URL: &str = "Url";
pub const UMBRACO_VERSION: &str = "Umbraco version";
pub const AUTHOR: &str = "Author";
pub const WEBSITE: &str = "Website";
pub const LICENCE: &str = "Licence";

pub const REQUIRED_VALUE: &str = "{} is required";
pub const INVALID_VERSION: &str = "'{}' is not a valid semantic version (e.g. 1.0.0)";
pub const INVALID_LICENCE: &str =
    "'{}' is not a recognised licence, enter an SPDX identifier (e.g. MIT) or UNLICENSED";
pub const REGISTRY_UNAVAILABLE: &str = "Unable to retrieve a list of licences ({})";
pub const LICENCE_LOOKUP: &str = "Looking up licence {}";

pub const CONFIRM_HEADER: &str = "About to write to {}:";
pub const CONFIRM_PROMPT: &str = "Is this OK?";
pub const CONFIRM_DEFAULT: &str = "yes";
pub const COMPLETE: &str = "Created {}";
pub const ABORTED: &str = "Aborted, nothing was written";

/// Substitute `value` into the first `{}` of `template`
pub fn fill(template: &str, value: impl std::fmt::Display) -> String {
    template.replacen("{}", &value.to_string(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_first_placeholder() {
        assert_eq!(
            fill(INVALID_VERSION, "1.x"),
            "'1.x' is not a valid semantic version (e.g. 1.0.0)"
        );
        assert_eq!(fill("{} and {}", "a"), "a and {}");
    }

    #[test]
    fn test_fill_without_placeholder() {
        assert_eq!(fill(CONFIRM_PROMPT, "ignored"), CONFIRM_PROMPT);
    }
}
