//! Engine configuration: canonical page size, geometry minimums, and zoom limits.
//!
//! Every key is optional; missing keys fall back to the values in
//! [`crate::consts`]. Hosts that rasterize pages at a different size load an
//! override with [`LayoutConfig::from_json`], which validates before returning.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    CANVAS_HEIGHT, CANVAS_WIDTH, MAX_SCALE, MIN_COLUMN_RATIO, MIN_CREATE, MIN_FIELD_HEIGHT, MIN_FIELD_WIDTH,
    MIN_SCALE, RATIO_EPSILON,
};

/// Error returned by [`LayoutConfig::from_json`] and [`LayoutConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input is not valid JSON or has a wrongly typed key.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A dimension or minimum is zero, negative, or not finite.
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    /// `minScale` is greater than `maxScale`.
    #[error("scale range is empty: min {min} > max {max}")]
    ScaleRange { min: f64, max: f64 },
    /// The minimum field size does not fit on the canvas.
    #[error("minimum field size {width}x{height} does not fit a {canvas_width}x{canvas_height} canvas")]
    MinimumTooLarge { width: f64, height: f64, canvas_width: f64, canvas_height: f64 },
    /// Two columns at the minimum ratio must fit in one table.
    #[error("minColumnRatio must be in (0, 0.5], got {0}")]
    ColumnRatio(f64),
}

/// Geometry limits shared by every component of an editor.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Canonical page width; page images are rasterized at this size.
    pub canvas_width: f64,
    /// Canonical page height.
    pub canvas_height: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub min_field_width: f64,
    pub min_field_height: f64,
    /// Smallest selection box (both axes) that turns into a field.
    pub min_create: f64,
    pub min_column_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            min_field_width: MIN_FIELD_WIDTH,
            min_field_height: MIN_FIELD_HEIGHT,
            min_create: MIN_CREATE,
            min_column_ratio: MIN_COLUMN_RATIO,
        }
    }
}

impl LayoutConfig {
    /// Parse a JSON object of overrides and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input and any validation
    /// error from [`LayoutConfig::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the limits describe a usable canvas.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("canvasWidth", self.canvas_width),
            ("canvasHeight", self.canvas_height),
            ("minScale", self.min_scale),
            ("maxScale", self.max_scale),
            ("minFieldWidth", self.min_field_width),
            ("minFieldHeight", self.min_field_height),
            ("minCreate", self.min_create),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if self.min_scale > self.max_scale {
            return Err(ConfigError::ScaleRange { min: self.min_scale, max: self.max_scale });
        }
        if self.min_field_width > self.canvas_width || self.min_field_height > self.canvas_height {
            return Err(ConfigError::MinimumTooLarge {
                width: self.min_field_width,
                height: self.min_field_height,
                canvas_width: self.canvas_width,
                canvas_height: self.canvas_height,
            });
        }
        if !self.min_column_ratio.is_finite() || self.min_column_ratio <= 0.0 || self.min_column_ratio > 0.5 {
            return Err(ConfigError::ColumnRatio(self.min_column_ratio));
        }
        Ok(())
    }

    /// Largest column count whose equal split still respects `min_column_ratio`.
    #[must_use]
    pub fn max_table_cols(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cols = (1.0 / self.min_column_ratio + RATIO_EPSILON).floor() as u32;
        cols.max(1)
    }
}
