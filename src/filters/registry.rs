//! Filter registry describing the available filters.
//!
//! A shell uses the registry to list filters, show their parameter ranges and
//! build a [`FilterRequest`] from a filter id and a raw slider value.

use crate::core::error::{FilterError, FilterResult};
use crate::filters::request::{FilterRequest, BRIGHTNESS_RANGE, CONTRAST_RANGE};
use indexmap::IndexMap;
use serde::Serialize;

/// Filter categories for grouping in a shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Color manipulation (grayscale, invert)
    Color,
    /// Linear channel adjustments (brightness, contrast)
    Adjust,
    /// Blur effects
    Blur,
}

/// Numeric parameter accepted by a filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    /// Parameter name.
    pub name: &'static str,
    /// Smallest accepted value.
    pub min: f64,
    /// Largest accepted value.
    pub max: f64,
    /// Value that leaves the image unchanged, if any.
    pub neutral: f64,
    /// Whether only whole numbers are accepted.
    pub integer: bool,
}

/// Description of a single filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterDescriptor {
    /// Unique ID, also the textual request name.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Category for grouping.
    pub category: Category,
    /// Parameter, for filters that take one.
    pub parameter: Option<ParameterSpec>,
}

/// Registry for all available filters.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    /// Filters indexed by their unique ID, in registration order.
    filters: IndexMap<&'static str, FilterDescriptor>,
}

impl FilterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            filters: IndexMap::new(),
        }
    }

    /// Create a registry pre-populated with the built-in filters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register(FilterDescriptor {
            id: "grayscale",
            name: "Grayscale",
            description: "Replace each pixel with its luma, keeping alpha",
            category: Category::Color,
            parameter: None,
        });
        registry.register(FilterDescriptor {
            id: "invert",
            name: "Invert",
            description: "Invert the red, green and blue channels, keeping alpha",
            category: Category::Color,
            parameter: None,
        });
        registry.register(FilterDescriptor {
            id: "blur",
            name: "Blur",
            description: "3x3 blur with kernel [1 2 1; 2 4 2; 1 2 1] / 16 and clamped edges",
            category: Category::Blur,
            parameter: None,
        });
        registry.register(FilterDescriptor {
            id: "brightness",
            name: "Brightness",
            description: "Add a constant to every channel, alpha included",
            category: Category::Adjust,
            parameter: Some(ParameterSpec {
                name: "delta",
                min: BRIGHTNESS_RANGE.0 as f64,
                max: BRIGHTNESS_RANGE.1 as f64,
                neutral: 0.0,
                integer: true,
            }),
        });
        registry.register(FilterDescriptor {
            id: "contrast",
            name: "Contrast",
            description: "Multiply every channel, alpha included, by a factor",
            category: Category::Adjust,
            parameter: Some(ParameterSpec {
                name: "factor",
                min: CONTRAST_RANGE.0 as f64,
                max: CONTRAST_RANGE.1 as f64,
                neutral: 1.0,
                integer: false,
            }),
        });

        registry
    }

    /// Register a filter description, replacing any with the same ID.
    pub fn register(&mut self, descriptor: FilterDescriptor) {
        self.filters.insert(descriptor.id, descriptor);
    }

    /// Get a filter description.
    pub fn get(&self, id: &str) -> Option<&FilterDescriptor> {
        self.filters.get(id)
    }

    /// Check if a filter is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.filters.contains_key(id)
    }

    /// All descriptions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterDescriptor> {
        self.filters.values()
    }

    /// Get filters grouped by category for display.
    pub fn grouped_by_category(&self) -> IndexMap<Category, Vec<&FilterDescriptor>> {
        let mut grouped: IndexMap<Category, Vec<&FilterDescriptor>> = IndexMap::new();
        for descriptor in self.filters.values() {
            grouped.entry(descriptor.category).or_default().push(descriptor);
        }
        grouped
    }

    /// Build a request from a filter ID and an optional parameter value.
    pub fn request(&self, id: &str, value: Option<f64>) -> FilterResult<FilterRequest> {
        let descriptor = self.get(id).ok_or_else(|| {
            FilterError::invalid_input("request", format!("unknown filter '{}'", id))
        })?;

        let value = match (&descriptor.parameter, value) {
            (None, None) => None,
            (None, Some(_)) => {
                return Err(FilterError::invalid_input(
                    "request",
                    format!("'{}' takes no parameter", id),
                ))
            }
            (Some(spec), None) => Some(spec.neutral),
            (Some(spec), Some(v)) => {
                if spec.integer && v.fract() != 0.0 {
                    return Err(FilterError::invalid_input(
                        "request",
                        format!("'{}' needs a whole number, got {}", spec.name, v),
                    ));
                }
                Some(v)
            }
        };

        let request = match (descriptor.id, value) {
            ("grayscale", _) => FilterRequest::Grayscale,
            ("invert", _) => FilterRequest::Invert,
            ("blur", _) => FilterRequest::Blur,
            ("brightness", Some(v)) => FilterRequest::Brightness(v as i32),
            ("contrast", Some(v)) => FilterRequest::Contrast(v as f32),
            _ => {
                return Err(FilterError::invalid_input(
                    "request",
                    format!("'{}' has no built-in implementation", id),
                ))
            }
        };

        request.validate()?;
        Ok(request)
    }

    /// Get the total number of registered filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
