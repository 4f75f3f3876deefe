//! Filter requests: the tagged set of intents a shell can dispatch.

use crate::core::error::{FilterError, FilterResult};
use crate::core::types::PixelBuffer;
use crate::filters::builtin;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Valid brightness deltas.
pub const BRIGHTNESS_RANGE: (i32, i32) = (-255, 255);

/// Valid contrast factors.
pub const CONTRAST_RANGE: (f32, f32) = (-100.0, 100.0);

/// One filter together with its parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filter", content = "value", rename_all = "snake_case")]
pub enum FilterRequest {
    /// Luma-based grayscale.
    Grayscale,
    /// RGB inversion.
    Invert,
    /// 3x3 blur.
    Blur,
    /// Add a delta to every channel.
    Brightness(i32),
    /// Multiply every channel by a factor.
    Contrast(f32),
}

/// Hashable identity of a request, floats compared by bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKey {
    Grayscale,
    Invert,
    Blur,
    Brightness(i32),
    Contrast(u32),
}

impl FilterRequest {
    /// Registry id of the filter.
    pub fn id(&self) -> &'static str {
        match self {
            FilterRequest::Grayscale => "grayscale",
            FilterRequest::Invert => "invert",
            FilterRequest::Blur => "blur",
            FilterRequest::Brightness(_) => "brightness",
            FilterRequest::Contrast(_) => "contrast",
        }
    }

    /// Check the parameter range.
    pub fn validate(&self) -> FilterResult<()> {
        match *self {
            FilterRequest::Brightness(delta) => {
                let (min, max) = BRIGHTNESS_RANGE;
                if !(min..=max).contains(&delta) {
                    return Err(FilterError::invalid_input(
                        "brightness",
                        format!("delta {} is outside [{}, {}]", delta, min, max),
                    ));
                }
            }
            FilterRequest::Contrast(factor) => {
                let (min, max) = CONTRAST_RANGE;
                if !factor.is_finite() || !(min..=max).contains(&factor) {
                    return Err(FilterError::invalid_input(
                        "contrast",
                        format!("factor {} is outside [{}, {}]", factor, min, max),
                    ));
                }
            }
            FilterRequest::Grayscale | FilterRequest::Invert | FilterRequest::Blur => {}
        }
        Ok(())
    }

    /// Validate and run the filter on `buffer`.
    pub fn apply(&self, buffer: &PixelBuffer) -> FilterResult<PixelBuffer> {
        self.validate()?;
        match *self {
            FilterRequest::Grayscale => builtin::grayscale(buffer),
            FilterRequest::Invert => builtin::invert(buffer),
            FilterRequest::Blur => builtin::blur(buffer),
            FilterRequest::Brightness(delta) => builtin::brightness(buffer, delta),
            FilterRequest::Contrast(factor) => builtin::contrast(buffer, factor),
        }
    }

    /// True for parameter values that leave every pixel unchanged.
    pub fn is_identity(&self) -> bool {
        matches!(self, FilterRequest::Brightness(0)) || *self == FilterRequest::Contrast(1.0)
    }

    /// Key for result caches.
    pub fn key(&self) -> RequestKey {
        match *self {
            FilterRequest::Grayscale => RequestKey::Grayscale,
            FilterRequest::Invert => RequestKey::Invert,
            FilterRequest::Blur => RequestKey::Blur,
            FilterRequest::Brightness(delta) => RequestKey::Brightness(delta),
            // -0.0 and 0.0 produce the same output
            FilterRequest::Contrast(factor) => RequestKey::Contrast((factor + 0.0).to_bits()),
        }
    }
}

impl fmt::Display for FilterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterRequest::Brightness(delta) => write!(f, "brightness={}", delta),
            FilterRequest::Contrast(factor) => write!(f, "contrast={}", factor),
            other => write!(f, "{}", other.id()),
        }
    }
}

/// Parses `grayscale`, `invert`, `blur`, `brightness=50` or `contrast:1.5`.
impl FromStr for FilterRequest {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, value) = match s.split_once(|c: char| c == '=' || c == ':') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (s, None),
        };

        let parse_error = |reason: String| FilterError::invalid_input("parse_request", reason);

        let request = match (name.to_ascii_lowercase().as_str(), value) {
            ("grayscale" | "greyscale", None) => FilterRequest::Grayscale,
            ("invert", None) => FilterRequest::Invert,
            ("blur", None) => FilterRequest::Blur,
            ("brightness", Some(v)) => FilterRequest::Brightness(
                v.parse()
                    .map_err(|_| parse_error(format!("brightness needs an integer, got '{}'", v)))?,
            ),
            ("contrast", Some(v)) => FilterRequest::Contrast(
                v.parse()
                    .map_err(|_| parse_error(format!("contrast needs a number, got '{}'", v)))?,
            ),
            ("grayscale" | "greyscale" | "invert" | "blur", Some(_)) => {
                return Err(parse_error(format!("'{}' takes no value", name)))
            }
            ("brightness" | "contrast", None) => {
                return Err(parse_error(format!("'{}' needs a value, e.g. {}=1", name, name)))
            }
            _ => return Err(parse_error(format!("unknown filter '{}'", name))),
        };

        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::core::types::Color;

    #[test]
    fn test_dispatch_matches_kernel_ops() {
        let buffer = PixelBuffer::from_fn(4, 4, |x, y| Color::rgba(x as u8 * 60, y as u8 * 60, 30, 200));

        assert_eq!(
            FilterRequest::Grayscale.apply(&buffer).unwrap(),
            builtin::grayscale(&buffer).unwrap()
        );
        assert_eq!(
            FilterRequest::Invert.apply(&buffer).unwrap(),
            builtin::invert(&buffer).unwrap()
        );
        assert_eq!(
            FilterRequest::Blur.apply(&buffer).unwrap(),
            builtin::blur(&buffer).unwrap()
        );
        assert_eq!(
            FilterRequest::Brightness(-20).apply(&buffer).unwrap(),
            builtin::brightness(&buffer, -20).unwrap()
        );
        assert_eq!(
            FilterRequest::Contrast(0.5).apply(&buffer).unwrap(),
            builtin::contrast(&buffer, 0.5).unwrap()
        );
    }

    #[test]
    fn test_validate_ranges() {
        assert!(FilterRequest::Brightness(255).validate().is_ok());
        assert!(FilterRequest::Brightness(-255).validate().is_ok());
        assert!(FilterRequest::Brightness(256).validate().is_err());
        assert!(FilterRequest::Contrast(100.0).validate().is_ok());
        assert!(FilterRequest::Contrast(-100.5).validate().is_err());
        assert!(FilterRequest::Contrast(f32::NAN).validate().is_err());
        assert!(FilterRequest::Contrast(f32::INFINITY).validate().is_err());
    }

    #[test]
    fn test_apply_rejects_out_of_range_before_running() {
        let buffer = PixelBuffer::new(1, 1, Color::BLACK);
        let err = FilterRequest::Brightness(1000).apply(&buffer).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.operation(), "brightness");
    }

    #[test]
    fn test_parse() {
        assert_eq!("grayscale".parse::<FilterRequest>().unwrap(), FilterRequest::Grayscale);
        assert_eq!(" Invert ".parse::<FilterRequest>().unwrap(), FilterRequest::Invert);
        assert_eq!("blur".parse::<FilterRequest>().unwrap(), FilterRequest::Blur);
        assert_eq!(
            "brightness=-40".parse::<FilterRequest>().unwrap(),
            FilterRequest::Brightness(-40)
        );
        assert_eq!(
            "contrast:1.5".parse::<FilterRequest>().unwrap(),
            FilterRequest::Contrast(1.5)
        );
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["sepia", "blur=3", "brightness", "brightness=abc", "brightness=300", "contrast=nan"] {
            let err = bad.parse::<FilterRequest>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "{}", bad);
        }
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for request in [
            FilterRequest::Grayscale,
            FilterRequest::Blur,
            FilterRequest::Brightness(12),
            FilterRequest::Contrast(-2.25),
        ] {
            assert_eq!(request.to_string().parse::<FilterRequest>().unwrap(), request);
        }
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&FilterRequest::Brightness(50)).unwrap();
        assert_eq!(json, r#"{"filter":"brightness","value":50}"#);

        let json = serde_json::to_string(&FilterRequest::Invert).unwrap();
        assert_eq!(json, r#"{"filter":"invert"}"#);

        let back: FilterRequest = serde_json::from_str(r#"{"filter":"contrast","value":2.0}"#).unwrap();
        assert_eq!(back, FilterRequest::Contrast(2.0));
    }

    #[test]
    fn test_identity_and_keys() {
        assert!(FilterRequest::Brightness(0).is_identity());
        assert!(FilterRequest::Contrast(1.0).is_identity());
        assert!(!FilterRequest::Blur.is_identity());

        assert_eq!(FilterRequest::Contrast(0.0).key(), FilterRequest::Contrast(-0.0).key());
        assert_ne!(FilterRequest::Contrast(1.0).key(), FilterRequest::Contrast(1.5).key());
        assert_ne!(FilterRequest::Brightness(1).key(), FilterRequest::Brightness(2).key());
    }
}
