//! Teach-by-example template configuration.
//!
//! A stored template may hold either one configuration per category or a
//! list of numbered groups (e.g. two dimming groups). Both shapes are
//! normalized when the template is loaded, so the rest of the crate only
//! ever sees [`CategoryGroup`] lists with an explicit index.

use crate::category::DeviceCategory;
use crate::error::Result;
use crate::pattern::{self, DeviceObjectTemplate, ExampleAddress, GroupPattern, MainMiddle};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// A single value or a list of values, as found in stored templates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// How much of a category the template generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CategoryUsage {
    Full,
    Basic,
    #[default]
    None,
}

/// Example device and inferred pattern of one category group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CategoryConfig {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub group_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "enabled", default))]
    pub usage: CategoryUsage,
    #[cfg_attr(feature = "serde", serde(default))]
    pub example_addresses: Vec<ExampleAddress>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub pattern: Option<GroupPattern>,
    /// Overflow main/middle groups chosen by the installer.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub extra_main_groups: Vec<MainMiddle>,
}

impl CategoryConfig {
    pub fn is_used(&self) -> bool {
        self.usage != CategoryUsage::None
    }

    /// Re-run inference on the example addresses and store the pattern.
    ///
    /// Extra main groups come from the installer's list, or are carried
    /// over from the previous pattern when that list is empty.
    ///
    /// # Errors
    ///
    /// Fails when the examples cannot be turned into a pattern; the stored
    /// pattern is kept in that case.
    pub fn teach(&mut self) -> Result<&GroupPattern> {
        let mut inferred = pattern::infer_pattern(&self.example_addresses)?;
        inferred.extra_main_groups = if self.extra_main_groups.is_empty() {
            self.pattern
                .as_ref()
                .map(|p| p.extra_main_groups.clone())
                .unwrap_or_default()
        } else {
            self.extra_main_groups.clone()
        };
        Ok(self.pattern.insert(inferred))
    }

    /// Zone cap of the stored pattern, see [`pattern::max_zones`].
    pub fn max_zones(&self) -> Option<usize> {
        self.pattern
            .as_ref()
            .and_then(|p| pattern::max_zones(p, &self.example_addresses))
    }

    /// Objects of device `ordinal`, inferring a pattern if none is stored.
    ///
    /// # Errors
    ///
    /// Fails on inference errors or when the device does not fit the KNX
    /// group ranges.
    pub fn expand(&self, ordinal: usize) -> Result<Vec<DeviceObjectTemplate>> {
        match &self.pattern {
            Some(p) => pattern::expand(p, &self.example_addresses, ordinal),
            None => {
                let mut inferred = pattern::infer_pattern(&self.example_addresses)?;
                inferred.extra_main_groups.clone_from(&self.extra_main_groups);
                pattern::expand(&inferred, &self.example_addresses, ordinal)
            }
        }
    }
}

/// A category configuration with its position among the category's groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub index: usize,
    pub config: CategoryConfig,
}

fn indexed(configs: Option<OneOrMany<CategoryConfig>>) -> Vec<CategoryGroup> {
    configs
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, config)| CategoryGroup { index, config })
        .collect()
}

fn stored(groups: Vec<CategoryGroup>) -> Option<OneOrMany<CategoryConfig>> {
    let mut configs: Vec<CategoryConfig> = groups.into_iter().map(|g| g.config).collect();
    match configs.len() {
        0 => None,
        1 => configs.pop().map(OneOrMany::One),
        _ => Some(OneOrMany::Many(configs)),
    }
}

/// Per-category groups of a template, always as indexed lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "StoredCategories", into = "StoredCategories"))]
pub struct Categories {
    pub switching: Vec<CategoryGroup>,
    pub dimming: Vec<CategoryGroup>,
    pub shading: Vec<CategoryGroup>,
    pub hvac: Vec<CategoryGroup>,
}

/// Category slots as stored, each holding one config or a list.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoredCategories {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub switching: Option<OneOrMany<CategoryConfig>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub dimming: Option<OneOrMany<CategoryConfig>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub shading: Option<OneOrMany<CategoryConfig>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub hvac: Option<OneOrMany<CategoryConfig>>,
}

impl From<StoredCategories> for Categories {
    fn from(stored: StoredCategories) -> Self {
        Self {
            switching: indexed(stored.switching),
            dimming: indexed(stored.dimming),
            shading: indexed(stored.shading),
            hvac: indexed(stored.hvac),
        }
    }
}

impl From<Categories> for StoredCategories {
    fn from(categories: Categories) -> Self {
        Self {
            switching: stored(categories.switching),
            dimming: stored(categories.dimming),
            shading: stored(categories.shading),
            hvac: stored(categories.hvac),
        }
    }
}

impl Categories {
    /// Groups configured for a device category.
    pub fn groups(&self, category: DeviceCategory) -> &[CategoryGroup] {
        match category {
            DeviceCategory::Switch => &self.switching,
            DeviceCategory::Dimmer => &self.dimming,
            DeviceCategory::Blind => &self.shading,
            DeviceCategory::Hvac => &self.hvac,
        }
    }

    fn groups_mut(&mut self) -> impl Iterator<Item = &mut CategoryGroup> {
        self.switching
            .iter_mut()
            .chain(&mut self.dimming)
            .chain(&mut self.shading)
            .chain(&mut self.hvac)
    }

    /// Group `index` of a category.
    pub fn group(&self, category: DeviceCategory, index: usize) -> Option<&CategoryConfig> {
        self.groups(category)
            .iter()
            .find(|g| g.index == index)
            .map(|g| &g.config)
    }
}

/// A whole teach-by-example template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TeachByExampleConfig {
    pub template_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub categories: Categories,
}

impl TeachByExampleConfig {
    /// Re-infer the pattern of every used group that has examples.
    ///
    /// # Errors
    ///
    /// Stops at the first group whose examples cannot be inferred.
    pub fn teach_all(&mut self) -> Result<()> {
        for group in self.categories.groups_mut() {
            if group.config.is_used() && !group.config.example_addresses.is_empty() {
                group.config.teach()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{SubIncrement, UnitIncrement};

    fn hvac_config() -> CategoryConfig {
        CategoryConfig {
            usage: CategoryUsage::Full,
            example_addresses: vec![ExampleAddress::new("setpoint", 4, 1, 0).with_increments(
                UnitIncrement::None,
                UnitIncrement::One,
                SubIncrement::None,
            )],
            extra_main_groups: vec![MainMiddle::new(2, 0)],
            ..CategoryConfig::default()
        }
    }

    #[test]
    fn test_teach_sets_pattern_and_zone_cap() {
        let mut config = hvac_config();
        assert_eq!(config.max_zones(), None);
        config.teach().unwrap();
        assert_eq!(config.max_zones(), Some(15));
        let last = config.expand(14).unwrap();
        assert_eq!((last[0].main, last[0].middle), (2, 7));
    }

    #[test]
    fn test_teach_keeps_previous_extra_groups() {
        let mut config = hvac_config();
        config.teach().unwrap();
        config.extra_main_groups.clear();
        config.teach().unwrap();
        assert_eq!(config.max_zones(), Some(15));
    }

    #[test]
    fn test_failed_teach_keeps_pattern() {
        let mut config = hvac_config();
        config.teach().unwrap();
        config.example_addresses.clear();
        assert!(config.teach().is_err());
        assert!(config.pattern.is_some());
    }

    #[test]
    fn test_normalization_indexes_groups() {
        let stored = StoredCategories {
            switching: Some(OneOrMany::One(hvac_config())),
            dimming: Some(OneOrMany::Many(vec![CategoryConfig::default(), hvac_config()])),
            ..StoredCategories::default()
        };
        let categories = Categories::from(stored);
        assert_eq!(categories.switching.len(), 1);
        assert_eq!(categories.dimming[1].index, 1);
        assert!(categories.group(DeviceCategory::Dimmer, 1).is_some_and(CategoryConfig::is_used));
        assert!(categories.groups(DeviceCategory::Blind).is_empty());

        let back = StoredCategories::from(categories);
        assert!(matches!(back.switching, Some(OneOrMany::One(_))));
        assert!(matches!(back.dimming, Some(OneOrMany::Many(ref v)) if v.len() == 2));
        assert!(back.shading.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_load_template_json() {
        let json = r#"{
            "templateName": "Standard",
            "categories": {
                "switching": {
                    "enabled": "full",
                    "exampleAddresses": [
                        { "objectName": "on/off", "main": 1, "middle": 1, "sub": 1, "dpt": "DPT1.001", "subIncrement": 1 },
                        { "objectName": "status", "main": 1, "middle": 2, "sub": 1, "dpt": "DPT1.002", "subIncrement": 1 }
                    ]
                },
                "dimming": [
                    { "groupName": "Dim 1", "enabled": "basic", "exampleAddresses": [
                        { "objectName": "value", "main": 2, "middle": 0, "sub": 10, "enabled": false }
                    ] },
                    { "groupName": "Dim 2", "enabled": "none" }
                ],
                "hvac": {
                    "enabled": "full",
                    "exampleAddresses": [
                        { "objectName": "setpoint", "main": 4, "middle": 1, "sub": 0, "middleIncrement": 1 }
                    ],
                    "extraMainGroups": [{ "main": 2, "middle": 0 }]
                }
            }
        }"#;

        let mut config: TeachByExampleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.categories.dimming.len(), 2);
        assert_eq!(config.categories.dimming[1].config.usage, CategoryUsage::None);
        assert!(!config.categories.dimming[0].config.example_addresses[0].enabled);

        config.teach_all().unwrap();
        let hvac = config.categories.group(DeviceCategory::Hvac, 0).unwrap();
        assert_eq!(hvac.max_zones(), Some(15));
        assert!(config.categories.dimming[1].config.pattern.is_none());

        let switching = config.categories.group(DeviceCategory::Switch, 0).unwrap();
        let second = switching.expand(1).unwrap();
        assert_eq!(second[1].group_address().unwrap().to_string(), "1/2/2");
        assert_eq!(second[1].dpt.map(|d| d.to_string()).as_deref(), Some("1.002"));

        let saved = serde_json::to_string(&config).unwrap();
        let reloaded: TeachByExampleConfig = serde_json::from_str(&saved).unwrap();
        assert_eq!(reloaded, config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_rejects_unknown_increment() {
        let json = r#"{ "objectName": "x", "main": 1, "middle": 0, "sub": 0, "subIncrement": 5 }"#;
        assert!(serde_json::from_str::<ExampleAddress>(json).is_err());
    }
}
