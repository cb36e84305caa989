use log::{Level, LevelFilter};
use serde::Deserialize;
use web_sys::Document;

use crate::error::EnhanceError;

/// Id of the optional `<script type="application/json">` holding overrides.
const CONFIG_SCRIPT_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn default_log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn default_log_level() -> Level {
    Level::Info
}

/// Tuning knobs for the page enhancements. Every field has a default, so an
/// embedded config only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub log_level: Option<String>,
    pub slider: SliderConfig,
    pub tilt: TiltConfig,
    pub reveal: RevealConfig,
    pub parallax: ParallaxConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderConfig {
    /// How long a prev/next transition holds the slider lock.
    pub transition_ms: u32,
    pub autoplay_ms: u32,
    /// Horizontal travel a touch must exceed to count as a swipe.
    pub swipe_threshold_px: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            transition_ms: 800,
            autoplay_ms: 5000,
            swipe_threshold_px: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TiltConfig {
    /// Pixels of pointer offset per degree of rotation.
    pub divisor: f64,
    pub lift_px: f64,
    pub scale: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            divisor: 10.0,
            lift_px: 5.0,
            scale: 1.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParallaxConfig {
    pub factor: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { factor: 0.5 }
    }
}

impl SiteConfig {
    /// Parses and validates an embedded config. Values that would stall a
    /// timer or divide by zero are rejected, so the caller falls back to the
    /// defaults.
    pub fn parse(json: &str) -> Result<Self, EnhanceError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), EnhanceError> {
        let positive = "greater than zero";
        let finite = "a finite number";
        check("slider.transitionMs", positive, self.slider.transition_ms.into(), |v| v > 0.0)?;
        check("slider.autoplayMs", positive, self.slider.autoplay_ms.into(), |v| v > 0.0)?;
        check(
            "slider.swipeThresholdPx",
            "zero or more",
            self.slider.swipe_threshold_px,
            |v| v >= 0.0 && v.is_finite(),
        )?;
        check("tilt.divisor", positive, self.tilt.divisor, |v| v > 0.0 && v.is_finite())?;
        check("tilt.liftPx", finite, self.tilt.lift_px, f64::is_finite)?;
        check("tilt.scale", positive, self.tilt.scale, |v| v > 0.0 && v.is_finite())?;
        check("reveal.threshold", "between 0 and 1", self.reveal.threshold, |v| {
            (0.0..=1.0).contains(&v)
        })?;
        check("parallax.factor", finite, self.parallax.factor, f64::is_finite)
    }

    /// Reads the embedded config script, falling back to defaults when the
    /// page does not carry one.
    pub fn from_document(document: &Document) -> Result<Self, EnhanceError> {
        match document
            .get_element_by_id(CONFIG_SCRIPT_ID)
            .and_then(|script| script.text_content())
        {
            Some(json) if !json.trim().is_empty() => Self::parse(&json),
            _ => Ok(Self::default()),
        }
    }

    pub fn log_level(&self) -> Result<LevelFilter, EnhanceError> {
        match &self.log_level {
            None => Ok(default_log_level().to_level_filter()),
            Some(level) => level
                .parse()
                .map_err(|_| EnhanceError::LogLevel(level.clone())),
        }
    }
}

fn check(
    key: &'static str,
    expected: &'static str,
    value: f64,
    valid: impl Fn(f64) -> bool,
) -> Result<(), EnhanceError> {
    if valid(value) {
        Ok(())
    } else {
        Err(EnhanceError::OutOfRange {
            key,
            expected,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SiteConfig::parse("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.slider.transition_ms, 800);
        assert_eq!(config.slider.autoplay_ms, 5000);
        assert_eq!(config.slider.swipe_threshold_px, 50.0);
        assert_eq!(config.reveal.root_margin, "0px 0px -50px 0px");
        assert_eq!(config.parallax.factor, 0.5);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::parse(r#"{"slider": {"autoplayMs": 3000}, "tilt": {"scale": 1.05}}"#)
            .unwrap();
        assert_eq!(config.slider.autoplay_ms, 3000);
        assert_eq!(config.slider.transition_ms, 800);
        assert_eq!(config.tilt.scale, 1.05);
        assert_eq!(config.tilt.divisor, 10.0);
        assert_eq!(config.reveal, RevealConfig::default());
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let err = SiteConfig::parse("{ slider: ").unwrap_err();
        assert!(matches!(err, EnhanceError::Config(_)));
    }

    #[test]
    fn wrong_type_is_a_config_error() {
        let err = SiteConfig::parse(r#"{"slider": {"autoplayMs": "fast"}}"#).unwrap_err();
        assert!(matches!(err, EnhanceError::Config(_)));
    }

    fn rejected_key(json: &str) -> &'static str {
        match SiteConfig::parse(json) {
            Err(EnhanceError::OutOfRange { key, .. }) => key,
            other => panic!("expected out of range error, got {:?}", other),
        }
    }

    #[test]
    fn zero_tilt_divisor_is_rejected() {
        assert_eq!(rejected_key(r#"{"tilt": {"divisor": 0}}"#), "tilt.divisor");
        assert_eq!(rejected_key(r#"{"tilt": {"divisor": -4.0}}"#), "tilt.divisor");
    }

    #[test]
    fn zero_timer_durations_are_rejected() {
        assert_eq!(
            rejected_key(r#"{"slider": {"autoplayMs": 0}}"#),
            "slider.autoplayMs"
        );
        assert_eq!(
            rejected_key(r#"{"slider": {"transitionMs": 0}}"#),
            "slider.transitionMs"
        );
    }

    #[test]
    fn other_out_of_range_values_are_rejected() {
        assert_eq!(
            rejected_key(r#"{"slider": {"swipeThresholdPx": -1}}"#),
            "slider.swipeThresholdPx"
        );
        assert_eq!(rejected_key(r#"{"tilt": {"scale": 0}}"#), "tilt.scale");
        assert_eq!(
            rejected_key(r#"{"reveal": {"threshold": 1.5}}"#),
            "reveal.threshold"
        );
    }

    #[test]
    fn boundary_values_are_accepted() {
        let config = SiteConfig::parse(
            r#"{"slider": {"swipeThresholdPx": 0}, "reveal": {"threshold": 1.0}, "parallax": {"factor": -0.25}}"#,
        )
        .unwrap();
        assert_eq!(config.slider.swipe_threshold_px, 0.0);
        assert_eq!(config.reveal.threshold, 1.0);
        assert_eq!(config.parallax.factor, -0.25);
    }

    #[test]
    fn log_level_defaults_to_build_level() {
        let config = SiteConfig::default();
        assert_eq!(
            config.log_level().unwrap(),
            default_log_level().to_level_filter()
        );
    }

    #[test]
    fn log_level_parses_names_case_insensitively() {
        let config = SiteConfig::parse(r#"{"logLevel": "WARN"}"#).unwrap();
        assert_eq!(config.log_level().unwrap(), LevelFilter::Warn);

        let config = SiteConfig::parse(r#"{"logLevel": "off"}"#).unwrap();
        assert_eq!(config.log_level().unwrap(), LevelFilter::Off);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let config = SiteConfig::parse(r#"{"logLevel": "chatty"}"#).unwrap();
        match config.log_level() {
            Err(EnhanceError::LogLevel(level)) => assert_eq!(level, "chatty"),
            other => panic!("expected log level error, got {:?}", other),
        }
    }
}
