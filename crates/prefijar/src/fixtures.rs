//! Bundled CSS fixtures for the worker self-test.
//!
//! Each fixture is a small stylesheet that exercises one family of
//! prefix-needing features, paired with the vendor prefixes the pipeline
//! emits for the default browser targets. lightningcss only inserts a prefix
//! when the target minimum version sits inside that prefix's support window,
//! so the expectations list the prefixes those minimums actually take (ie 9
//! takes `-ms-transform` but predates `-ms-flexbox`; safari 4 predates the
//! prefixed filter/sticky era entirely). The table is read-only; the runner
//! never mutates it.

/// One self-test case: input CSS plus the prefixes it must produce.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    /// Stable identifier, unique within the table
    pub name: &'static str,
    /// Human-readable description for reports
    pub description: &'static str,
    /// Input stylesheet
    pub css: &'static str,
    /// Vendor prefixes that must appear in the transformed output
    pub expected_prefixes: &'static [&'static str],
    /// Grouping key for the report's category breakdown
    pub category: &'static str,
}

/// Input for the trailing basic smoke check (no prefix expectations, only
/// that the pipeline produces output at all).
pub const BASIC_CHECK_CSS: &str = ".test { color: red; display: flex; }";

/// The bundled fixture table.
pub const FIXTURES: [Fixture; 12] = [
    Fixture {
        name: "flexbox-layout",
        description: "Flexbox container with direction and alignment",
        css: ".container { display: flex; flex-direction: column; justify-content: center; align-items: center; }",
        expected_prefixes: &["-webkit-", "-moz-"],
        category: "layout",
    },
    Fixture {
        name: "flex-alignment",
        description: "Wrapping flex row with baseline alignment",
        css: ".row { display: flex; flex-wrap: wrap; align-items: baseline; }",
        expected_prefixes: &["-webkit-", "-moz-"],
        category: "layout",
    },
    Fixture {
        name: "css-transform",
        description: "2D transform with translate, rotate and scale",
        css: ".card { transform: translateX(50px) rotate(45deg) scale(1.2); }",
        expected_prefixes: &["-webkit-", "-moz-", "-ms-"],
        category: "visual",
    },
    Fixture {
        name: "transform-3d",
        description: "Perspective flip transform",
        css: ".flip { transform: perspective(600px) rotateY(180deg); }",
        expected_prefixes: &["-webkit-", "-moz-"],
        category: "visual",
    },
    Fixture {
        name: "linear-gradient",
        description: "Linear gradient background",
        css: ".banner { background: linear-gradient(to right, #ff0000, #0000ff); }",
        expected_prefixes: &["-webkit-", "-moz-"],
        category: "visual",
    },
    Fixture {
        name: "box-shadow-radius",
        description: "Box shadow with rounded corners",
        css: ".panel { box-shadow: 0 2px 8px rgba(0, 0, 0, 0.3); border-radius: 12px; }",
        expected_prefixes: &["-webkit-", "-moz-"],
        category: "visual",
    },
    Fixture {
        name: "css-transition",
        description: "Multi-property transition",
        css: ".button { transition: background-color 0.3s ease, transform 0.2s ease-in-out; }",
        expected_prefixes: &["-webkit-", "-moz-"],
        category: "animation",
    },
    Fixture {
        name: "keyframe-animation",
        description: "Keyframes rule with an animation shorthand",
        css: "@keyframes spin { from { transform: rotate(0deg); } to { transform: rotate(360deg); } } .loader { animation: spin 2s linear infinite; }",
        expected_prefixes: &["-webkit-", "-moz-"],
        category: "animation",
    },
    Fixture {
        name: "fade-animation",
        description: "Opacity fade with a forwards fill",
        css: "@keyframes fade { from { opacity: 1; } to { opacity: 0; } } .toast { animation: fade 0.5s ease-out forwards; }",
        expected_prefixes: &["-webkit-", "-moz-"],
        category: "animation",
    },
    Fixture {
        name: "css-masking",
        description: "Mask image and clip path",
        css: ".badge { mask-image: linear-gradient(#000000, transparent); clip-path: circle(50% at 50% 50%); }",
        expected_prefixes: &["-webkit-"],
        category: "effects",
    },
    Fixture {
        name: "user-select",
        description: "Disabled text selection",
        css: ".no-copy { user-select: none; }",
        expected_prefixes: &["-webkit-", "-moz-"],
        category: "interaction",
    },
    Fixture {
        name: "appearance-reset",
        description: "Native form control appearance reset",
        css: ".field { appearance: none; }",
        expected_prefixes: &["-webkit-", "-moz-"],
        category: "interaction",
    },
];

/// All bundled fixtures, in table order.
#[must_use]
pub fn all() -> &'static [Fixture] {
    &FIXTURES
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fixture_count() {
        assert_eq!(all().len(), 12);
    }

    #[test]
    fn test_fixture_names_unique() {
        let names: HashSet<&str> = all().iter().map(|f| f.name).collect();
        assert_eq!(names.len(), all().len());
    }

    #[test]
    fn test_fixtures_are_well_formed() {
        for fixture in all() {
            assert!(!fixture.name.is_empty());
            assert!(!fixture.description.is_empty());
            assert!(!fixture.css.trim().is_empty(), "{} has empty css", fixture.name);
            assert!(
                !fixture.expected_prefixes.is_empty(),
                "{} expects no prefixes",
                fixture.name
            );
            assert!(!fixture.category.is_empty());
        }
    }

    #[test]
    fn test_expected_prefixes_are_vendor_prefixes() {
        let known = ["-webkit-", "-moz-", "-ms-", "-o-"];
        for fixture in all() {
            for prefix in fixture.expected_prefixes {
                assert!(known.contains(prefix), "{} expects {prefix}", fixture.name);
            }
        }
    }

    #[test]
    fn test_categories_cover_known_set() {
        let categories: HashSet<&str> = all().iter().map(|f| f.category).collect();
        let expected: HashSet<&str> = ["layout", "visual", "animation", "effects", "interaction"]
            .into_iter()
            .collect();
        assert_eq!(categories, expected);
    }

    #[test]
    fn test_ms_prefix_only_expected_for_transforms() {
        // at the default targets ie 9 only takes the prefixed transform
        // syntax, so no other fixture may expect -ms-
        for fixture in all() {
            if fixture.expected_prefixes.contains(&"-ms-") {
                assert_eq!(fixture.name, "css-transform");
            }
        }
    }
}
