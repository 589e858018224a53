//! Adapter around the external CSS pipeline.
//!
//! The pipeline is lightningcss: parse, transform against browser targets,
//! serialize. Vendor prefixes fall out of the targets: a prefix is emitted
//! only when a target's minimum version falls inside that prefix's support
//! window, so the default set pins versions whose minimums take prefixes
//! for the bundled fixture families.
//! Parsing is strict: a syntax error surfaces as a transform error rather
//! than being silently recovered, matching what callers see in the host.

use crate::protocol::TransformOptions;
use crate::result::{PrefijarError, PrefijarResult};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use parcel_sourcemap::SourceMap;
use std::sync::{Arc, RwLock};

/// What one pipeline run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Serialized CSS
    pub css: String,
    /// Source map JSON, when requested
    pub map: Option<serde_json::Value>,
    /// Parser warnings
    pub warnings: Vec<String>,
}

/// The vendor-prefixing pipeline, parameterized by browser targets.
#[derive(Debug, Clone)]
pub struct Prefixer {
    browsers: Browsers,
}

impl Default for Prefixer {
    fn default() -> Self {
        Self {
            browsers: default_browsers(),
        }
    }
}

/// Encode a browser version the way lightningcss targets expect.
const fn version(major: u32, minor: u32, patch: u32) -> u32 {
    (major << 16) | (minor << 8) | patch
}

/// Default targets: minimum versions that take prefixes for flexbox,
/// transforms, transitions, animations, gradients, shadows, masking and
/// selection control. Features these minimums predate (sticky positioning,
/// filters) pass through unprefixed.
#[must_use]
pub fn default_browsers() -> Browsers {
    Browsers {
        chrome: Some(version(15, 0, 0)),
        firefox: Some(version(3, 6, 0)),
        ie: Some(version(9, 0, 0)),
        safari: Some(version(4, 0, 0)),
        ios_saf: Some(version(4, 0, 0)),
        ..Browsers::default()
    }
}

impl Prefixer {
    /// Create a prefixer with explicit browser targets.
    #[must_use]
    pub fn new(browsers: Browsers) -> Self {
        Self { browsers }
    }

    /// Run one stylesheet through the pipeline.
    ///
    /// With `prefix` false the stylesheet is still parsed and re-serialized,
    /// but no browser targets are applied, so no prefixes are inserted.
    pub fn process(
        &self,
        css: &str,
        options: &TransformOptions,
        prefix: bool,
    ) -> PrefijarResult<PipelineOutput> {
        let from = options
            .from
            .clone()
            .unwrap_or_else(|| "input.css".to_string());

        let collected_warnings = Arc::new(RwLock::new(Vec::new()));
        let parser_options = ParserOptions {
            filename: from.clone(),
            warnings: Some(Arc::clone(&collected_warnings)),
            ..ParserOptions::default()
        };

        let mut stylesheet = StyleSheet::parse(css, parser_options)
            .map_err(|e| PrefijarError::parse(e.to_string()))?;

        stylesheet
            .minify(MinifyOptions {
                targets: self.targets(prefix),
                ..MinifyOptions::default()
            })
            .map_err(|e| PrefijarError::pipeline(e.to_string()))?;

        let mut source_map = if options.map {
            let mut map = SourceMap::new("/");
            let source_index = map.add_source(&from);
            map.set_source_content(source_index as usize, css)
                .map_err(|e| PrefijarError::pipeline(format!("source map: {e}")))?;
            Some(map)
        } else {
            None
        };

        let result = stylesheet
            .to_css(PrinterOptions {
                minify: false,
                source_map: source_map.as_mut(),
                targets: self.targets(prefix),
                ..PrinterOptions::default()
            })
            .map_err(|e| PrefijarError::print(e.to_string()))?;

        let map = match source_map.as_mut() {
            Some(map) => {
                let json = map
                    .to_json(None)
                    .map_err(|e| PrefijarError::pipeline(format!("source map: {e}")))?;
                Some(serde_json::from_str(&json)?)
            }
            None => None,
        };

        let warnings = collected_warnings
            .read()
            .map(|w| w.iter().map(ToString::to_string).collect())
            .unwrap_or_default();

        Ok(PipelineOutput {
            css: result.code,
            map,
            warnings,
        })
    }

    fn targets(&self, prefix: bool) -> Targets {
        if prefix {
            Targets {
                browsers: Some(self.browsers),
                ..Targets::default()
            }
        } else {
            Targets::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn prefixer() -> Prefixer {
        Prefixer::default()
    }

    #[test]
    fn test_flex_gets_webkit_prefix() {
        let output = prefixer()
            .process(".test { display: flex; }", &TransformOptions::default(), true)
            .unwrap();
        assert!(output.css.contains("-webkit-"), "output: {}", output.css);
        assert!(output.css.contains("flex"), "output: {}", output.css);
    }

    #[test]
    fn test_prefix_disabled_passes_through() {
        let output = prefixer()
            .process(".test { display: flex; }", &TransformOptions::default(), false)
            .unwrap();
        assert!(!output.css.contains("-webkit-"), "output: {}", output.css);
        assert!(output.css.contains("flex"));
    }

    #[test]
    fn test_transform_gets_ms_prefix() {
        let output = prefixer()
            .process(
                ".card { transform: rotate(45deg); }",
                &TransformOptions::default(),
                true,
            )
            .unwrap();
        assert!(output.css.contains("-ms-transform"), "output: {}", output.css);
        assert!(output.css.contains("-webkit-transform"));
    }

    #[test]
    fn test_flex_keeps_legacy_syntaxes_without_ms() {
        // ie 9 predates the -ms-flexbox syntax, so the targets produce the
        // old webkit/moz box syntaxes but never -ms-
        let output = prefixer()
            .process(".row { display: flex; }", &TransformOptions::default(), true)
            .unwrap();
        assert!(output.css.contains("-webkit-box"), "output: {}", output.css);
        assert!(output.css.contains("-moz-box"), "output: {}", output.css);
        assert!(!output.css.contains("-ms-flexbox"), "output: {}", output.css);
    }

    #[test]
    fn test_user_select_gets_webkit_and_moz_only() {
        let output = prefixer()
            .process(
                ".no-copy { user-select: none; }",
                &TransformOptions::default(),
                true,
            )
            .unwrap();
        assert!(output.css.contains("-webkit-user-select"), "output: {}", output.css);
        assert!(output.css.contains("-moz-user-select"), "output: {}", output.css);
        assert!(!output.css.contains("-ms-user-select"), "output: {}", output.css);
    }

    #[test]
    fn test_pre_prefix_era_features_pass_through() {
        // safari 4 predates prefixed sticky and filter support, so these
        // declarations come back untouched
        let output = prefixer()
            .process(
                ".pin { position: sticky; top: 0; filter: blur(4px); }",
                &TransformOptions::default(),
                true,
            )
            .unwrap();
        assert!(!output.css.contains("-webkit-sticky"), "output: {}", output.css);
        assert!(!output.css.contains("-webkit-filter"), "output: {}", output.css);
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        let output = prefixer()
            .process("", &TransformOptions::default(), true)
            .unwrap();
        assert!(output.css.trim().is_empty());
        assert!(output.map.is_none());
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let result = prefixer().process("}", &TransformOptions::default(), true);
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("parse"), "message: {message}");
    }

    #[test]
    fn test_source_map_requested() {
        let options = TransformOptions {
            from: Some("styles.css".to_string()),
            map: true,
            ..TransformOptions::default()
        };
        let output = prefixer()
            .process(".a { color: red; }", &options, true)
            .unwrap();
        let map = output.map.expect("map requested");
        assert_eq!(map["version"], 3);
        let sources = map["sources"].as_array().unwrap();
        assert!(sources.iter().any(|s| s == "styles.css"));
        let contents = map["sourcesContent"].as_array().unwrap();
        assert_eq!(contents[0], ".a { color: red; }");
    }

    #[test]
    fn test_no_source_map_by_default() {
        let output = prefixer()
            .process(".a { color: red; }", &TransformOptions::default(), true)
            .unwrap();
        assert!(output.map.is_none());
    }
}
