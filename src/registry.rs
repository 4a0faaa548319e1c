//! Device registry and commit gates.
//!
//! The registry owns every configured device. Proposals (next physical
//! address, channel labels) are computed from the registry as it is at the
//! time of the call and never change it; only the `commit_*` methods write,
//! and they validate the whole record before touching anything. Two proposals
//! issued without a commit in between can therefore return the same address.

use crate::addressing::{PhysicalAddress, RoomAddress};
use crate::allocator;
use crate::category::{CategoryParams, DeviceCategory};
use crate::channel::{self, ChannelLabel, DaPropagation};
use crate::conflict;
use crate::error::{Field, PlanError, Result};
use crate::pattern::check_zone_addition;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

pub type DeviceId = u32;
pub type ZoneId = u32;

/// One output (channel) of an actuator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Output {
    pub channel_name: String,
    pub room_address: String,
    pub room_name: String,
    pub fixture: String,
    /// Spare outputs need no room.
    pub is_reserve: bool,
}

impl Output {
    pub fn new(channel_name: &str) -> Self {
        Self {
            channel_name: String::from(channel_name),
            ..Self::default()
        }
    }
}

/// Switch, dimmer or blind actuator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ActuatorDevice {
    pub id: DeviceId,
    pub category: DeviceCategory,
    pub manufacturer: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub physical_address: String,
    pub channel_count: u16,
    /// Use the category's DA labels regardless of the channel count.
    #[cfg_attr(feature = "serde", serde(default))]
    pub force_extended_format: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub outputs: Vec<Output>,
}

impl ActuatorDevice {
    pub fn new(id: DeviceId, category: DeviceCategory, manufacturer: &str) -> Self {
        Self {
            id,
            category,
            manufacturer: String::from(manufacturer),
            physical_address: String::new(),
            channel_count: 0,
            force_extended_format: false,
            outputs: Vec::new(),
        }
    }

    /// Label parameters for the current channel count.
    pub fn params(&self) -> CategoryParams {
        let params = CategoryParams::for_device(self.category, self.channel_count);
        if self.force_extended_format && !params.is_extended_format() {
            params.with_extended_format(self.category.da_format())
        } else {
            params
        }
    }

    pub fn channel_labels(&self) -> Vec<&str> {
        self.outputs.iter().map(|o| o.channel_name.as_str()).collect()
    }

    /// Label for channel `index` (1-based) given the labels already in use.
    pub fn propose_channel_label(&self, index: u16) -> ChannelLabel {
        channel::generate(&self.manufacturer, index, &self.params(), &self.channel_labels())
    }

    /// Resize the output list to `count` channels.
    ///
    /// New outputs get generated labels. When the resize switches the label
    /// format (e.g. a dimmer growing past 8 channels), every output is
    /// relabelled. In the extended format the count is capped at the
    /// format's capacity.
    pub fn set_channel_count(&mut self, count: u16) {
        let before = self.params().extended;
        self.channel_count = count;
        let params = self.params();

        if let Some(format) = params.extended {
            self.channel_count = count.min(u16::try_from(format.capacity()).unwrap_or(u16::MAX));
        }
        self.outputs.truncate(usize::from(self.channel_count));

        if params.extended != before {
            for (i, output) in self.outputs.iter_mut().enumerate() {
                let index = u16::try_from(i + 1).unwrap_or(u16::MAX);
                let label = channel::generate(&self.manufacturer, index, &params, &[] as &[&str]);
                output.channel_name = String::from(label.as_str());
            }
        }

        while self.outputs.len() < usize::from(self.channel_count) {
            let index = u16::try_from(self.outputs.len() + 1).unwrap_or(u16::MAX);
            let label = self.propose_channel_label(index);
            self.outputs.push(Output::new(&label));
        }
    }

    /// Apply a label the installer typed for output `index` (0-based).
    ///
    /// In the extended format a valid DA label renumbers every following
    /// output; outputs that no longer fit are dropped and the channel count
    /// follows. The propagation is returned so the caller can tell the user.
    /// Any other label is stored after collision resolution.
    pub fn apply_channel_label(&mut self, index: usize, label: &str) -> Option<DaPropagation> {
        if index >= self.outputs.len() {
            return None;
        }

        if let Some(format) = self.params().extended {
            if let Some(edit) = format.propagate(index, label, self.outputs.len()) {
                self.outputs[index].channel_name = String::from(edit.edited.as_str());
                for (output, next) in self.outputs[index + 1..].iter_mut().zip(&edit.following) {
                    output.channel_name = String::from(next.as_str());
                }
                self.outputs.truncate(edit.channel_count);
                self.channel_count = u16::try_from(edit.channel_count).unwrap_or(u16::MAX);
                return Some(edit);
            }
        }

        let resolved = channel::resolve_manual_label(index, label, &self.channel_labels());
        self.outputs[index].channel_name = resolved;
        None
    }
}

/// One climate zone of an HVAC device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct HvacZone {
    pub id: ZoneId,
    pub channel_name: String,
    pub room_address: String,
    pub room_name: String,
}

impl HvacZone {
    pub fn new(id: ZoneId, room_address: &str) -> Self {
        Self {
            id,
            room_address: String::from(room_address),
            ..Self::default()
        }
    }
}

/// HVAC controller. Zones carry room addresses instead of a physical address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HvacDevice {
    pub id: DeviceId,
    pub manufacturer: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub zones: Vec<HvacZone>,
}

impl HvacDevice {
    pub fn new(id: DeviceId, manufacturer: &str) -> Self {
        Self {
            id,
            manufacturer: String::from(manufacturer),
            zones: Vec::new(),
        }
    }
}

/// Whether `name` is empty or a generated `zone N` placeholder.
pub fn is_default_zone_name(name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return true;
    }
    match name.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("zone ") => {
            let number = name[5..].trim();
            !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

/// Room address to room name lookup, derived from the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomNameCache {
    names: BTreeMap<String, String>,
}

impl RoomNameCache {
    pub fn from_registry(registry: &DeviceRegistry) -> Self {
        let mut cache = Self::default();
        for output in registry.actuators.iter().flat_map(|d| &d.outputs) {
            cache.record(&output.room_address, &output.room_name);
        }
        for zone in registry.hvac.iter().flat_map(|d| &d.zones) {
            cache.record(&zone.room_address, &zone.room_name);
        }
        cache
    }

    /// Remember a name for a room. Placeholders and blanks are ignored; a
    /// later name for the same room replaces the earlier one.
    pub fn record(&mut self, room_address: &str, room_name: &str) {
        let room_address = room_address.trim();
        if room_address.is_empty() || is_default_zone_name(room_name) {
            return;
        }
        self.names
            .insert(String::from(room_address), String::from(room_name.trim()));
    }

    pub fn get(&self, room_address: &str) -> Option<&str> {
        self.names.get(room_address.trim()).map(String::as_str)
    }

    /// Fill in the zone's room name from a known room, unless the installer
    /// already named it. Returns whether the name changed.
    pub fn auto_fill(&self, zone: &mut HvacZone) -> bool {
        if !is_default_zone_name(&zone.room_name) {
            return false;
        }
        match self.get(&zone.room_address) {
            Some(name) if name != zone.room_name => {
                zone.room_name = String::from(name);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Every device of the installation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DeviceRegistry {
    #[cfg_attr(feature = "serde", serde(default))]
    pub actuators: Vec<ActuatorDevice>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hvac: Vec<HvacDevice>,
    #[cfg_attr(feature = "serde", serde(skip))]
    room_names: RoomNameCache,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry over existing devices, with its room-name lookup built.
    pub fn from_devices(actuators: Vec<ActuatorDevice>, hvac: Vec<HvacDevice>) -> Self {
        let mut registry = Self {
            actuators,
            hvac,
            room_names: RoomNameCache::default(),
        };
        registry.rebuild_room_names();
        registry
    }

    /// Recompute the room-name lookup, e.g. after deserializing.
    pub fn rebuild_room_names(&mut self) {
        self.room_names = RoomNameCache::from_registry(self);
    }

    pub fn room_name(&self, room_address: &str) -> Option<&str> {
        self.room_names.get(room_address)
    }

    pub fn actuator(&self, id: DeviceId) -> Option<&ActuatorDevice> {
        self.actuators.iter().find(|d| d.id == id)
    }

    pub fn hvac_device(&self, id: DeviceId) -> Option<&HvacDevice> {
        self.hvac.iter().find(|d| d.id == id)
    }

    /// Physical addresses of all actuators, trimmed, blanks skipped.
    pub fn used_physical_addresses(&self) -> Vec<&str> {
        allocator::used_addresses(self.actuators.iter().map(|d| d.physical_address.as_str()))
    }

    /// Next free physical address across all categories.
    pub fn propose_physical_address(&self) -> PhysicalAddress {
        allocator::next_address(self.used_physical_addresses())
    }

    /// Label for channel `index` (1-based) of actuator `device`.
    pub fn propose_channel_label(&self, device: DeviceId, index: u16) -> Option<ChannelLabel> {
        self.actuator(device).map(|d| d.propose_channel_label(index))
    }

    /// Physical addresses of every actuator except `exclude`.
    pub fn others(&self, exclude: Option<DeviceId>) -> impl Iterator<Item = &str> + '_ {
        self.actuators
            .iter()
            .filter(move |d| Some(d.id) != exclude)
            .map(|d| d.physical_address.as_str())
    }

    /// `(zone id, room address)` of every HVAC zone.
    pub fn zone_room_addresses(&self) -> impl Iterator<Item = (ZoneId, &str)> + '_ {
        self.hvac
            .iter()
            .flat_map(|d| &d.zones)
            .map(|z| (z.id, z.room_address.as_str()))
    }

    /// Actuators ordered by physical address, unaddressed ones last.
    pub fn actuators_by_physical_address(&self) -> Vec<&ActuatorDevice> {
        let mut sorted: Vec<&ActuatorDevice> = self.actuators.iter().collect();
        allocator::sort_by_physical_address(&mut sorted, |d| d.physical_address.as_str());
        sorted
    }

    /// Zones in ordinal order: by device, then by channel number, with
    /// repeated room addresses counted once (first one wins).
    pub fn zone_ordinals(&self) -> Vec<&HvacZone> {
        let mut seen: Vec<&str> = Vec::new();
        let mut ordered = Vec::new();
        for device in &self.hvac {
            let mut zones: Vec<&HvacZone> = device.zones.iter().collect();
            zones.sort_by_key(|z| channel::channel_number(&z.channel_name));
            for zone in zones {
                let room = zone.room_address.trim();
                if !room.is_empty() {
                    if seen.contains(&room) {
                        continue;
                    }
                    seen.push(room);
                }
                ordered.push(zone);
            }
        }
        ordered
    }

    pub fn zone_count(&self) -> usize {
        self.zone_ordinals().len()
    }

    /// Validate and store an actuator, replacing the one with the same id.
    ///
    /// The physical address is required, must be complete and must not be
    /// used by another actuator (Theben excepted). Outputs that are not
    /// spares need a channel name and a valid room address. On success the
    /// channel count follows the output list.
    ///
    /// # Errors
    ///
    /// Returns the first failed check; the registry is left unchanged.
    pub fn commit_actuator(&mut self, mut device: ActuatorDevice) -> Result<()> {
        let id = device.id;
        self.check_actuator(&device).map_err(|err| rejected("actuator", id, err))?;

        device.physical_address = String::from(device.physical_address.trim());
        device.channel_count = u16::try_from(device.outputs.len()).unwrap_or(u16::MAX);
        for output in &device.outputs {
            self.room_names.record(&output.room_address, &output.room_name);
        }

        match self.actuators.iter_mut().find(|d| d.id == id) {
            Some(slot) => *slot = device,
            None => self.actuators.push(device),
        }
        Ok(())
    }

    fn check_actuator(&self, device: &ActuatorDevice) -> Result<()> {
        let address = device.physical_address.trim();
        if address.is_empty() {
            return Err(PlanError::missing(Field::PhysicalAddress));
        }
        if !allocator::is_valid(address) {
            return Err(PlanError::invalid_format(Field::PhysicalAddress));
        }
        if conflict::is_duplicate_physical_address(address, &device.manufacturer, self.others(Some(device.id))) {
            return Err(PlanError::duplicate_physical_address(address));
        }

        for output in device.outputs.iter().filter(|o| !o.is_reserve) {
            if output.channel_name.trim().is_empty() {
                return Err(PlanError::missing(Field::ChannelName));
            }
            check_room_address(&output.room_address)?;
        }
        Ok(())
    }

    /// Register an HVAC device, keeping the zones of an existing one.
    pub fn add_hvac_device(&mut self, id: DeviceId, manufacturer: &str) {
        match self.hvac.iter_mut().find(|d| d.id == id) {
            Some(device) => device.manufacturer = String::from(manufacturer),
            None => self.hvac.push(HvacDevice::new(id, manufacturer)),
        }
    }

    /// Validate and store a zone of HVAC device `device`.
    ///
    /// The room address is required, must be complete and must not be used
    /// by any other zone. A new zone is rejected once `max_zones` zones
    /// exist. An empty or placeholder room name is filled in from a known
    /// room with the same address.
    ///
    /// # Errors
    ///
    /// Returns the first failed check; the registry is left unchanged.
    pub fn commit_zone(&mut self, device: DeviceId, mut zone: HvacZone, max_zones: Option<usize>) -> Result<()> {
        let id = zone.id;
        self.check_zone(device, &zone, max_zones)
            .map_err(|err| rejected("zone", id, err))?;

        zone.room_address = String::from(zone.room_address.trim());
        self.room_names.auto_fill(&mut zone);
        self.room_names.record(&zone.room_address, &zone.room_name);

        for other in self.hvac.iter_mut().filter(|d| d.id != device) {
            other.zones.retain(|z| z.id != id);
        }
        if let Some(owner) = self.hvac.iter_mut().find(|d| d.id == device) {
            match owner.zones.iter_mut().find(|z| z.id == id) {
                Some(slot) => *slot = zone,
                None => owner.zones.push(zone),
            }
        }
        Ok(())
    }

    fn check_zone(&self, device: DeviceId, zone: &HvacZone, max_zones: Option<usize>) -> Result<()> {
        if self.hvac_device(device).is_none() {
            return Err(PlanError::missing(Field::Device));
        }
        check_room_address(&zone.room_address)?;

        let room = zone.room_address.trim();
        if conflict::is_duplicate_room_address(room, Some(zone.id), self.zone_room_addresses()) {
            return Err(PlanError::duplicate_room_address(room));
        }

        let exists = self.zone_room_addresses().any(|(id, _)| id == zone.id);
        if !exists {
            check_zone_addition(self.zone_count(), max_zones)?;
        }
        Ok(())
    }

    pub fn remove_actuator(&mut self, id: DeviceId) -> Option<ActuatorDevice> {
        let index = self.actuators.iter().position(|d| d.id == id)?;
        Some(self.actuators.remove(index))
    }

    pub fn remove_zone(&mut self, id: ZoneId) -> Option<HvacZone> {
        self.hvac.iter_mut().find_map(|device| {
            let index = device.zones.iter().position(|z| z.id == id)?;
            Some(device.zones.remove(index))
        })
    }
}

fn check_room_address(room_address: &str) -> Result<()> {
    let room = room_address.trim();
    if room.is_empty() {
        return Err(PlanError::missing(Field::RoomAddress));
    }
    if !RoomAddress::is_valid(room) {
        return Err(PlanError::invalid_format(Field::RoomAddress));
    }
    Ok(())
}

fn rejected(what: &str, id: u32, err: PlanError) -> PlanError {
    plan_log!(debug, "commit of {} {} rejected", what, id);
    err
}
