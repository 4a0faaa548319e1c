//! Object templates: the generated group-address rows of one device.

use crate::addressing::GroupAddress;
use crate::category::DeviceCategory;
use crate::dpt::DatapointType;
use alloc::string::String;
use alloc::vec::Vec;

/// One communication object of a device with its group address.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DeviceObjectTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub dpt: Option<DatapointType>,
    pub main: u8,
    pub middle: u8,
    #[cfg_attr(feature = "serde", serde(rename = "start"))]
    pub start_sub: u8,
    pub enabled: bool,
    /// Default objects belong to the category and cannot be removed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_default: bool,
}

impl DeviceObjectTemplate {
    fn default_object(name: &str, dpt: DatapointType, main: u8, middle: u8) -> Self {
        Self {
            name: String::from(name),
            dpt: Some(dpt),
            main,
            middle,
            start_sub: 1,
            enabled: true,
            is_default: true,
        }
    }

    /// Group address of the object, if main and middle are in range.
    pub fn group_address(&self) -> Option<GroupAddress> {
        GroupAddress::new(self.main, self.middle, self.start_sub).ok()
    }

    /// Built-in objects of a category.
    pub fn defaults(category: DeviceCategory) -> Vec<Self> {
        let table: &[(&str, DatapointType, u8)] = match category {
            DeviceCategory::Switch => &[("on/off", DatapointType::SWITCH, 1), ("on/off status", DatapointType::BOOL, 2)],
            DeviceCategory::Dimmer => &[
                ("on/off", DatapointType::SWITCH, 1),
                ("dimming", DatapointType::DIMMING_CONTROL, 2),
                ("value", DatapointType::SCALING, 3),
                ("on/off status", DatapointType::BOOL, 4),
                ("value status", DatapointType::SCALING, 5),
            ],
            DeviceCategory::Blind => &[
                ("up/down", DatapointType::UP_DOWN, 1),
                ("stop", DatapointType::START_STOP, 2),
                ("position", DatapointType::SCALING, 3),
                ("position status", DatapointType::SCALING, 4),
                ("slats", DatapointType::SCALING, 5),
                ("slats status", DatapointType::SCALING, 6),
            ],
            DeviceCategory::Hvac => &[
                ("measured temperature", DatapointType::TEMPERATURE, 1),
                ("setpoint", DatapointType::TEMPERATURE, 2),
                ("setpoint status", DatapointType::TEMPERATURE, 3),
                ("mode", DatapointType::HVAC_MODE, 4),
                ("mode status", DatapointType::HVAC_MODE, 5),
                ("setpoint shift", DatapointType::PERCENT_V8, 6),
                ("valve", DatapointType::SWITCH, 7),
            ],
        };
        let main = category.default_main_group();
        table
            .iter()
            .map(|&(name, dpt, middle)| Self::default_object(name, dpt, main, middle))
            .collect()
    }
}

/// Sort objects for display: ascending by main, middle, then name.
pub fn sort_for_display(objects: &mut [DeviceObjectTemplate]) {
    objects.sort_by(|a, b| (a.main, a.middle, &a.name).cmp(&(b.main, b.middle, &b.name)));
}

/// Remove the object at `index` unless it is a default object.
///
/// Returns the removed object.
pub fn remove_object(objects: &mut Vec<DeviceObjectTemplate>, index: usize) -> Option<DeviceObjectTemplate> {
    match objects.get(index) {
        Some(object) if !object.is_default => Some(objects.remove(index)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range_and_protected() {
        for category in [
            DeviceCategory::Switch,
            DeviceCategory::Dimmer,
            DeviceCategory::Blind,
            DeviceCategory::Hvac,
        ] {
            let objects = DeviceObjectTemplate::defaults(category);
            assert!(!objects.is_empty());
            for object in &objects {
                assert!(object.is_default && object.enabled);
                assert!(object.group_address().is_some(), "{}", object.name);
            }
        }
    }

    #[test]
    fn test_sort_for_display() {
        let mut objects = DeviceObjectTemplate::defaults(DeviceCategory::Dimmer);
        objects.reverse();
        objects[0].middle = 1;
        sort_for_display(&mut objects);
        let names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["on/off", "value status", "dimming", "value", "on/off status"]);
    }

    #[test]
    fn test_default_objects_cannot_be_removed() {
        let mut objects = DeviceObjectTemplate::defaults(DeviceCategory::Switch);
        let mut custom = objects[0].clone();
        custom.name = String::from("lock");
        custom.is_default = false;
        objects.push(custom);

        assert!(remove_object(&mut objects, 0).is_none());
        assert_eq!(remove_object(&mut objects, 2).map(|o| o.name), Some(String::from("lock")));
        assert_eq!(objects.len(), 2);
        assert!(remove_object(&mut objects, 5).is_none());
    }
}
