//! PLC addresses the runtime gives to slave device I/O.
//!
//! Devices are laid out in list order from address 100 onward, each area
//! with its own running counter. Discrete inputs and coils take bit
//! addresses (`%IX100.0`, `%QX100.0`, eight bits per byte). Input registers
//! and read holding registers share the `%IW` word area; write holding
//! registers take `%QW`.

use serde::{Serialize, Serializer};
use strum::{EnumIter, IntoEnumIterator};

use super::device::SlaveDevice;
use crate::protocol::types::{DeviceProtocol, RegisterKind};

/// First PLC address handed to slave devices in every area.
pub const SLAVE_BASE_ADDRESS: u32 = 100;

#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlcArea {
    DiscreteInputs,
    Coils,
    InputWords,
    OutputWords,
}

impl std::fmt::Display for PlcArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlcArea::DiscreteInputs => write!(f, "DI"),
            PlcArea::Coils => write!(f, "DO"),
            PlcArea::InputWords => write!(f, "AI"),
            PlcArea::OutputWords => write!(f, "AO"),
        }
    }
}

impl PlcArea {
    pub fn prefix(self) -> &'static str {
        match self {
            PlcArea::DiscreteInputs => "%IX",
            PlcArea::Coils => "%QX",
            PlcArea::InputWords => "%IW",
            PlcArea::OutputWords => "%QW",
        }
    }

    pub fn is_bit(self) -> bool {
        matches!(self, PlcArea::DiscreteInputs | PlcArea::Coils)
    }

    /// Register blocks whose sizes add up to a device's share of the area.
    pub fn sources(self) -> &'static [RegisterKind] {
        match self {
            PlcArea::DiscreteInputs => &[RegisterKind::DiscreteInputs],
            PlcArea::Coils => &[RegisterKind::Coils],
            PlcArea::InputWords => &[RegisterKind::InputRegisters, RegisterKind::HoldingRead],
            PlcArea::OutputWords => &[RegisterKind::HoldingWrite],
        }
    }

    /// PLC location of the `offset`-th bit or word of the area.
    fn locate(self, offset: u32) -> String {
        if self.is_bit() {
            format!(
                "{}{}.{}",
                self.prefix(),
                SLAVE_BASE_ADDRESS + offset / 8,
                offset % 8
            )
        } else {
            format!("{}{}", self.prefix(), SLAVE_BASE_ADDRESS + offset)
        }
    }
}

/// `count` consecutive bits or words of an area, `first` counted from the
/// start of the area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlcRange {
    pub area: PlcArea,
    pub first: u32,
    pub count: u32,
}

impl PlcRange {
    pub fn last(&self) -> u32 {
        self.first + self.count - 1
    }
}

impl std::fmt::Display for PlcRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.area.locate(self.first),
            self.area.locate(self.last())
        )
    }
}

/// Where one device's I/O lands. An area the device has no registers in is
/// `None` and shown as `-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceAddresses {
    #[serde(rename = "dev_name")]
    pub name: String,
    #[serde(rename = "dev_type")]
    pub protocol: DeviceProtocol,
    #[serde(rename = "di", serialize_with = "serialize_range")]
    pub discrete_inputs: Option<PlcRange>,
    #[serde(rename = "do", serialize_with = "serialize_range")]
    pub coils: Option<PlcRange>,
    #[serde(rename = "ai", serialize_with = "serialize_range")]
    pub input_words: Option<PlcRange>,
    #[serde(rename = "ao", serialize_with = "serialize_range")]
    pub output_words: Option<PlcRange>,
}

impl DeviceAddresses {
    pub fn get(&self, area: PlcArea) -> Option<&PlcRange> {
        match area {
            PlcArea::DiscreteInputs => self.discrete_inputs.as_ref(),
            PlcArea::Coils => self.coils.as_ref(),
            PlcArea::InputWords => self.input_words.as_ref(),
            PlcArea::OutputWords => self.output_words.as_ref(),
        }
    }

    pub fn label(&self, area: PlcArea) -> String {
        range_label(self.get(area))
    }
}

impl std::fmt::Display for DeviceAddresses {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.protocol)?;
        for area in PlcArea::iter() {
            write!(f, "  {area}: {}", self.label(area))?;
        }
        Ok(())
    }
}

fn range_label(range: Option<&PlcRange>) -> String {
    match range {
        Some(range) => range.to_string(),
        None => "-".to_string(),
    }
}

fn serialize_range<S: Serializer>(
    range: &Option<PlcRange>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&range_label(range.as_ref()))
}

/// Give every device its PLC address ranges, in list order.
pub fn allocate_addresses(devices: &[SlaveDevice]) -> Vec<DeviceAddresses> {
    let mut next = [0u32; 4];

    devices
        .iter()
        .map(|device| {
            let mut take = |area: PlcArea| {
                let count: u32 = area
                    .sources()
                    .iter()
                    .map(|kind| u32::from(device.registers.get(*kind).size))
                    .sum();
                if count == 0 {
                    return None;
                }
                let counter = &mut next[area as usize];
                let range = PlcRange {
                    area,
                    first: *counter,
                    count,
                };
                *counter += count;
                Some(range)
            };

            DeviceAddresses {
                name: device.name.clone(),
                protocol: device.protocol,
                discrete_inputs: take(PlcArea::DiscreteInputs),
                coils: take(PlcArea::Coils),
                input_words: take(PlcArea::InputWords),
                output_words: take(PlcArea::OutputWords),
            }
        })
        .collect()
}
