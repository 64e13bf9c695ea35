use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;

use crate::form::field::{BlockPart, FormField};
use crate::form::state::FormState;
use crate::form::validate::FormError;
use crate::protocol::types::{
    DeviceProtocol, Parity, ProtocolFamily, RegisterBlock, RegisterKind, RegisterMap,
};

/// How the runtime reaches a slave device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transport {
    Tcp {
        ip_address: String,
        ip_port: u16,
    },
    Rtu {
        com_port: String,
        baud_rate: u32,
        parity: Parity,
        data_bits: u8,
        stop_bits: u8,
    },
}

impl Transport {
    pub fn family(&self) -> ProtocolFamily {
        match self {
            Transport::Tcp { .. } => ProtocolFamily::Tcp,
            Transport::Rtu { .. } => ProtocolFamily::Rtu,
        }
    }
}

/// A slave device as submitted by the device page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaveDevice {
    #[serde(rename = "dev_name")]
    pub name: String,
    #[serde(rename = "dev_type")]
    pub protocol: DeviceProtocol,
    pub slave_id: u8,
    pub transport: Transport,
    pub registers: RegisterMap,
}

impl SlaveDevice {
    /// Build a typed record from a form that already passed validation.
    pub fn from_form(state: &FormState) -> Result<Self, FormError> {
        let transport = match state.family() {
            ProtocolFamily::Tcp => Transport::Tcp {
                ip_address: text_field(state, FormField::IpAddress)?,
                ip_port: parse_field(state, FormField::IpPort)?,
            },
            ProtocolFamily::Rtu => Transport::Rtu {
                com_port: text_field(state, FormField::ComPort)?,
                baud_rate: parse_field(state, FormField::BaudRate)?,
                parity: Parity::from_name(state.value(FormField::Parity)).ok_or_else(|| {
                    FormError::InvalidValue {
                        field: FormField::Parity,
                        value: state.value(FormField::Parity).to_string(),
                    }
                })?,
                data_bits: parse_field(state, FormField::DataBits)?,
                stop_bits: parse_field(state, FormField::StopBits)?,
            },
        };

        let mut registers = RegisterMap::default();
        for kind in RegisterKind::iter() {
            let (start, size) = FormField::block_fields(kind);
            let block = RegisterBlock::new(parse_field(state, start)?, parse_field(state, size)?);
            if !block.fits() {
                return Err(FormError::InvalidValue {
                    field: size,
                    value: state.value(size).to_string(),
                });
            }
            registers.set(kind, block);
        }

        Ok(Self {
            name: text_field(state, FormField::Name)?,
            protocol: state.protocol(),
            slave_id: parse_field(state, FormField::SlaveId)?,
            transport,
            registers,
        })
    }

    /// The text each form field shows for this record. Fields that do not
    /// apply to the record's transport are omitted.
    pub fn form_values(&self) -> Vec<(FormField, String)> {
        let mut values = Vec::new();
        for field in FormField::iter() {
            if let Some((kind, part)) = field.block_slot() {
                let block = self.registers.get(kind);
                let value = match part {
                    BlockPart::Start => block.start,
                    BlockPart::Size => block.size,
                };
                values.push((field, value.to_string()));
                continue;
            }

            let value = match (field, &self.transport) {
                (FormField::Name, _) => Some(self.name.clone()),
                (FormField::SlaveId, _) => Some(self.slave_id.to_string()),
                (FormField::IpAddress, Transport::Tcp { ip_address, .. }) => {
                    Some(ip_address.clone())
                }
                (FormField::IpPort, Transport::Tcp { ip_port, .. }) => Some(ip_port.to_string()),
                (FormField::ComPort, Transport::Rtu { com_port, .. }) => Some(com_port.clone()),
                (FormField::BaudRate, Transport::Rtu { baud_rate, .. }) => {
                    Some(baud_rate.to_string())
                }
                (FormField::Parity, Transport::Rtu { parity, .. }) => Some(parity.to_string()),
                (FormField::DataBits, Transport::Rtu { data_bits, .. }) => {
                    Some(data_bits.to_string())
                }
                (FormField::StopBits, Transport::Rtu { stop_bits, .. }) => {
                    Some(stop_bits.to_string())
                }
                _ => None,
            };
            if let Some(value) = value {
                values.push((field, value));
            }
        }
        values
    }

    /// Reject records the runtime cannot use as stored: a transport of the
    /// wrong family, text that would break out of a quoted `mbconfig.cfg`
    /// value, register blocks past the end of the address space, or a fixed
    /// board whose values differ from its preset.
    pub fn check(&self) -> Result<()> {
        if self.protocol.family() != self.transport.family() {
            bail!(
                "device '{}' is of type {} but carries a {} transport",
                self.name,
                self.protocol,
                self.transport.family()
            );
        }

        let texts = match &self.transport {
            Transport::Tcp { ip_address, .. } => [
                (FormField::Name, &self.name),
                (FormField::IpAddress, ip_address),
            ],
            Transport::Rtu { com_port, .. } => {
                [(FormField::Name, &self.name), (FormField::ComPort, com_port)]
            }
        };
        for (field, text) in texts {
            if !is_config_text(text) {
                bail!(
                    "device {:?}: {field} {text:?} contains a quote or control character",
                    self.name
                );
            }
        }

        for kind in RegisterKind::iter() {
            let block = self.registers.get(kind);
            if !block.fits() {
                bail!(
                    "device '{}': {kind} block of {} registers at {} runs past address {}",
                    self.name,
                    block.size,
                    block.start,
                    u16::MAX
                );
            }
        }

        if let Some((field, stored, preset)) = self.preset_mismatch() {
            bail!(
                "device '{}' is a {} board but stores {field} = {stored:?} instead of the preset {preset:?}",
                self.name,
                self.protocol
            );
        }
        Ok(())
    }

    /// First field whose stored value differs from what the device type's
    /// preset stamps, as `(field, stored, preset)`. Open device types never
    /// mismatch.
    pub fn preset_mismatch(&self) -> Option<(FormField, String, String)> {
        let mut preset = FormState::new(self.protocol);
        preset.apply_profile(self.protocol);
        self.form_values()
            .into_iter()
            .find(|(field, value)| {
                preset.is_read_only(*field) && preset.value(*field) != value.as_str()
            })
            .map(|(field, value)| (field, value, preset.value(field).to_string()))
    }
}

/// Free text is written between double quotes in `mbconfig.cfg`, one key
/// per line.
fn is_config_text(text: &str) -> bool {
    !text.chars().any(|c| c == '"' || c.is_control())
}

fn text_field(state: &FormState, field: FormField) -> Result<String, FormError> {
    let raw = state.value(field);
    if !is_config_text(raw.trim()) {
        return Err(FormError::InvalidValue {
            field,
            value: raw.to_string(),
        });
    }
    Ok(raw.trim().to_string())
}

fn parse_field<T: FromStr>(state: &FormState, field: FormField) -> Result<T, FormError> {
    let raw = state.value(field);
    raw.trim().parse().map_err(|_| FormError::InvalidValue {
        field,
        value: raw.to_string(),
    })
}

/// Load a JSON list of devices, as exported by the device list page.
pub fn load_devices(path: &str) -> Result<Vec<SlaveDevice>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read devices from {path}"))?;
    let devices: Vec<SlaveDevice> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse devices in {path}"))?;
    for device in &devices {
        device.check()?;
    }
    log::debug!("Loaded {} slave devices from {path}", devices.len());
    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uno_form() -> FormState {
        let mut state = FormState::new(DeviceProtocol::Uno);
        state.apply_profile(DeviceProtocol::Uno);
        state.set_value(FormField::Name, " dev1 ").unwrap();
        state.set_value(FormField::ComPort, "COM3").unwrap();
        state
    }

    #[test]
    fn test_from_uno_form() {
        let device = SlaveDevice::from_form(&uno_form()).unwrap();
        assert_eq!(device.name, "dev1");
        assert_eq!(device.protocol, DeviceProtocol::Uno);
        assert_eq!(device.slave_id, 0);
        assert_eq!(
            device.transport,
            Transport::Rtu {
                com_port: "COM3".to_string(),
                baud_rate: 115200,
                parity: Parity::None,
                data_bits: 8,
                stop_bits: 1,
            }
        );
        assert_eq!(device.registers.discrete_inputs, RegisterBlock::new(0, 5));
        assert_eq!(device.registers.holding_write, RegisterBlock::new(0, 3));
        device.check().unwrap();
    }

    #[test]
    fn test_non_numeric_value_is_rejected() {
        let mut state = FormState::new(DeviceProtocol::Tcp);
        state.apply_profile(DeviceProtocol::Tcp);
        for field in FormField::always_required() {
            state.set_value(field, "0").unwrap();
        }
        state.set_value(FormField::IpAddress, "10.0.0.2").unwrap();
        state.set_value(FormField::IpPort, "http").unwrap();

        assert_eq!(
            SlaveDevice::from_form(&state),
            Err(FormError::InvalidValue {
                field: FormField::IpPort,
                value: "http".to_string()
            })
        );
    }

    #[test]
    fn test_slave_id_out_of_range() {
        let mut state = FormState::new(DeviceProtocol::Rtu);
        state.apply_profile(DeviceProtocol::Rtu);
        for field in FormField::always_required() {
            state.set_value(field, "1").unwrap();
        }
        state.set_value(FormField::SlaveId, "300").unwrap();
        state.set_value(FormField::BaudRate, "9600").unwrap();
        state.set_value(FormField::DataBits, "8").unwrap();
        state.set_value(FormField::StopBits, "1").unwrap();

        let err = SlaveDevice::from_form(&state).unwrap_err();
        assert_eq!(err.field(), FormField::SlaveId);
    }

    #[test]
    fn test_form_values_skip_other_transport() {
        let device = SlaveDevice::from_form(&uno_form()).unwrap();
        let values = device.form_values();
        assert!(values.iter().all(|(f, _)| *f != FormField::IpAddress));
        assert!(values.contains(&(FormField::BaudRate, "115200".to_string())));
        assert!(values.contains(&(FormField::DiSize, "5".to_string())));
    }

    #[test]
    fn test_check_rejects_mismatched_transport() {
        let mut device = SlaveDevice::from_form(&uno_form()).unwrap();
        device.protocol = DeviceProtocol::Esp32;
        assert!(device.check().is_err());
    }

    #[test]
    fn test_quoted_name_is_rejected() {
        let mut state = FormState::new(DeviceProtocol::Esp32);
        state.apply_profile(DeviceProtocol::Esp32);
        state.set_value(FormField::IpAddress, "10.0.0.5").unwrap();
        state
            .set_value(FormField::Name, "esp\"\ndevice0.address = \"6.6.6.6")
            .unwrap();

        let err = SlaveDevice::from_form(&state).unwrap_err();
        assert_eq!(err.field(), FormField::Name);

        state.set_value(FormField::Name, "esp").unwrap();
        state.set_value(FormField::IpAddress, "10.0.0.5\t").unwrap();
        assert!(SlaveDevice::from_form(&state).is_ok());
        state.set_value(FormField::IpAddress, "10.0\u{7}.0.5").unwrap();
        assert_eq!(
            SlaveDevice::from_form(&state).unwrap_err().field(),
            FormField::IpAddress
        );
    }

    #[test]
    fn test_check_rejects_unsafe_text() {
        let mut device = SlaveDevice::from_form(&uno_form()).unwrap();
        device.name = "uno\"\ndevice0.slave_id = \"9".to_string();
        assert!(device.check().is_err());

        let mut device = SlaveDevice::from_form(&uno_form()).unwrap();
        if let Transport::Rtu { com_port, .. } = &mut device.transport {
            *com_port = "COM3\r".to_string();
        }
        assert!(device.check().is_err());
    }

    #[test]
    fn test_overflowing_block_is_rejected() {
        let mut state = FormState::new(DeviceProtocol::Rtu);
        state.apply_profile(DeviceProtocol::Rtu);
        for field in FormField::always_required() {
            state.set_value(field, "1").unwrap();
        }
        state.set_value(FormField::BaudRate, "9600").unwrap();
        state.set_value(FormField::DataBits, "8").unwrap();
        state.set_value(FormField::StopBits, "1").unwrap();
        state.set_value(FormField::DoStart, "65530").unwrap();
        state.set_value(FormField::DoSize, "7").unwrap();

        assert_eq!(
            SlaveDevice::from_form(&state),
            Err(FormError::InvalidValue {
                field: FormField::DoSize,
                value: "7".to_string()
            })
        );

        state.set_value(FormField::DoSize, "6").unwrap();
        let mut device = SlaveDevice::from_form(&state).unwrap();
        device.check().unwrap();
        device.registers.coils = RegisterBlock::new(65530, 7);
        assert!(device.check().is_err());
    }

    #[test]
    fn test_check_rejects_edited_preset_values() {
        let json = r#"{
            "dev_name": "uno",
            "dev_type": "Uno",
            "slave_id": 5,
            "transport": {
                "kind": "rtu",
                "com_port": "COM3",
                "baud_rate": 9600,
                "parity": "Even",
                "data_bits": 7,
                "stop_bits": 2
            },
            "registers": {
                "discrete_inputs": {"start": 10, "size": 3},
                "coils": {"start": 0, "size": 4},
                "input_registers": {"start": 0, "size": 6},
                "holding_read": {"start": 0, "size": 0},
                "holding_write": {"start": 0, "size": 3}
            }
        }"#;
        let device: SlaveDevice = serde_json::from_str(json).unwrap();

        assert_eq!(
            device.preset_mismatch(),
            Some((FormField::SlaveId, "5".to_string(), "0".to_string()))
        );
        assert!(device.check().is_err());

        let mut generic = device.clone();
        generic.protocol = DeviceProtocol::Rtu;
        assert_eq!(generic.preset_mismatch(), None);
        generic.check().unwrap();

        let stock = SlaveDevice::from_form(&uno_form()).unwrap();
        assert_eq!(stock.preset_mismatch(), None);
    }

    #[test]
    fn test_json_shape() {
        let device = SlaveDevice::from_form(&uno_form()).unwrap();
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["dev_name"], "dev1");
        assert_eq!(json["dev_type"], "Uno");
        assert_eq!(json["transport"]["kind"], "rtu");
        assert_eq!(json["registers"]["coils"]["size"], 4);

        let back: SlaveDevice = serde_json::from_value(json).unwrap();
        assert_eq!(back, device);
    }
}
