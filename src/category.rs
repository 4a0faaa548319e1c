//! Device categories and their per-category constants.

use crate::channel::da::DaFormat;

/// Kind of device in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DeviceCategory {
    Switch,
    Dimmer,
    Blind,
    Hvac,
}

impl DeviceCategory {
    /// Actuator categories, i.e. the ones that carry a physical address.
    pub const ACTUATORS: [Self; 3] = [Self::Switch, Self::Dimmer, Self::Blind];

    /// Devices with more configured channels than this switch to the
    /// extended (DA) label format, where the category supports one.
    pub const EXTENDED_FORMAT_THRESHOLD: u16 = 8;

    /// HVAC zones are addressed by room address only.
    pub const fn has_physical_address(self) -> bool {
        !matches!(self, Self::Hvac)
    }

    /// Extended label format of this category.
    ///
    /// Dimmers and blinds use different group sizes for what looks like the
    /// same condition; both are kept as separate constants.
    pub const fn da_format(self) -> Option<DaFormat> {
        match self {
            Self::Dimmer => Some(DaFormat::DIMMER),
            Self::Blind => Some(DaFormat::BLIND),
            Self::Switch | Self::Hvac => None,
        }
    }

    /// Main group used by the built-in object templates.
    pub const fn default_main_group(self) -> u8 {
        match self {
            Self::Switch => 1,
            Self::Dimmer => 2,
            Self::Blind => 3,
            Self::Hvac => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::Dimmer => "dimmer",
            Self::Blind => "blind",
            Self::Hvac => "hvac",
        }
    }
}

/// Category-dependent inputs to channel label generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryParams {
    pub category: DeviceCategory,
    pub channel_count: u16,
    /// Extended label format in effect, if any.
    pub extended: Option<DaFormat>,
}

impl CategoryParams {
    /// Parameters for a device of `category` with `channel_count` channels.
    ///
    /// Only dimmers above the threshold switch to the extended format
    /// automatically; use [`with_extended_format`](Self::with_extended_format)
    /// to force it for other categories.
    pub const fn for_device(category: DeviceCategory, channel_count: u16) -> Self {
        let extended = match category {
            DeviceCategory::Dimmer if channel_count > DeviceCategory::EXTENDED_FORMAT_THRESHOLD => {
                Some(DaFormat::DIMMER)
            }
            _ => None,
        };
        Self {
            category,
            channel_count,
            extended,
        }
    }

    #[must_use]
    pub const fn with_extended_format(mut self, format: Option<DaFormat>) -> Self {
        self.extended = format;
        self
    }

    pub const fn is_extended_format(&self) -> bool {
        self.extended.is_some()
    }
}
