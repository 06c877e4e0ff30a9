use crate::error::{PickerError, PickerResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

/// Target device family. Only affects the default visual constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Phone,
    Watch,
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Gap in points between two adjacent segments.
    #[arg(long, default_value_t = 8.0)]
    pub segment_spacing: f32,

    /// Opening angle of the ramp, measured in the bottom left corner.
    /// Taken from measurements of the system picker.
    #[arg(long, default_value_t = 20.1)]
    pub opening_angle_deg: f32,

    #[arg(long, default_value_t = 6.0)]
    pub dot_size: f32,
    #[arg(long, default_value_t = 12.0)]
    pub dot_bottom_padding: f32,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self::for_platform(Platform::Phone)
    }
}

impl PickerConfig {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Phone => Self {
                segment_spacing: 8.0,
                opening_angle_deg: 20.1,
                dot_size: 6.0,
                dot_bottom_padding: 12.0,
            },
            Platform::Watch => Self {
                segment_spacing: 2.0,
                opening_angle_deg: 20.1,
                dot_size: 2.5,
                dot_bottom_padding: 4.0,
            },
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PickerResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: PickerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PickerResult<()> {
        if !self.segment_spacing.is_finite() || self.segment_spacing < 0.0 {
            return Err(PickerError::Config(format!(
                "segment_spacing must be a non-negative number, got {}",
                self.segment_spacing
            )));
        }
        if !(0.0..90.0).contains(&self.opening_angle_deg) {
            return Err(PickerError::Config(format!(
                "opening_angle_deg must lie in [0, 90), got {}",
                self.opening_angle_deg
            )));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn opening_slope(&self) -> f32 {
        self.opening_angle_deg.to_radians().tan()
    }

    pub fn merge_from_cli(&mut self, cli: &PickerConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field;
                }
            };
        }

        update_if_present!(segment_spacing, "segment_spacing");
        update_if_present!(opening_angle_deg, "opening_angle_deg");
        update_if_present!(dot_size, "dot_size");
        update_if_present!(dot_bottom_padding, "dot_bottom_padding");
    }
}
