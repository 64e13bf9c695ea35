use serde::{Deserialize, Serialize};
use strum::EnumIter;

use super::register::{RegisterBlock, RegisterMap};
use super::serial::Parity;

/// Transport family of a device type. Decides which field group is shown.
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolFamily {
    #[serde(rename = "TCP")]
    Tcp,
    #[serde(rename = "RTU")]
    Rtu,
}

impl std::fmt::Display for ProtocolFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolFamily::Tcp => write!(f, "TCP"),
            ProtocolFamily::Rtu => write!(f, "RTU"),
        }
    }
}

/// The options of the device-type selector (`dev_protocol`).
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceProtocol {
    #[serde(rename = "TCP")]
    Tcp,
    #[serde(rename = "ESP32")]
    Esp32,
    #[serde(rename = "ESP8266")]
    Esp8266,
    #[serde(rename = "RTU")]
    Rtu,
    Uno,
    Mega,
}

impl std::fmt::Display for DeviceProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl DeviceProtocol {
    /// Option value as submitted by the selector.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceProtocol::Tcp => "TCP",
            DeviceProtocol::Esp32 => "ESP32",
            DeviceProtocol::Esp8266 => "ESP8266",
            DeviceProtocol::Rtu => "RTU",
            DeviceProtocol::Uno => "Uno",
            DeviceProtocol::Mega => "Mega",
        }
    }

    /// Option label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            DeviceProtocol::Tcp => "Generic Modbus TCP Device",
            DeviceProtocol::Esp32 => "ESP32",
            DeviceProtocol::Esp8266 => "ESP8266",
            DeviceProtocol::Rtu => "Generic Modbus RTU Device",
            DeviceProtocol::Uno => "Arduino Uno",
            DeviceProtocol::Mega => "Arduino Mega",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "TCP" => Some(DeviceProtocol::Tcp),
            "ESP32" => Some(DeviceProtocol::Esp32),
            "ESP8266" => Some(DeviceProtocol::Esp8266),
            "RTU" => Some(DeviceProtocol::Rtu),
            "Uno" => Some(DeviceProtocol::Uno),
            "Mega" => Some(DeviceProtocol::Mega),
            _ => None,
        }
    }

    pub fn family(self) -> ProtocolFamily {
        match self {
            DeviceProtocol::Tcp | DeviceProtocol::Esp32 | DeviceProtocol::Esp8266 => {
                ProtocolFamily::Tcp
            }
            DeviceProtocol::Rtu | DeviceProtocol::Uno | DeviceProtocol::Mega => ProtocolFamily::Rtu,
        }
    }

    pub fn profile(self) -> DeviceProfile {
        let fixed = match self {
            DeviceProtocol::Tcp | DeviceProtocol::Rtu => None,
            DeviceProtocol::Esp32 | DeviceProtocol::Esp8266 => Some(FixedSettings {
                port: Some(ESP_BOARD_PORT),
                slave_id: 0,
                serial: None,
                registers: ESP_BOARD_REGISTERS,
            }),
            DeviceProtocol::Uno => Some(FixedSettings {
                port: None,
                slave_id: 0,
                serial: Some(ARDUINO_SERIAL),
                registers: UNO_REGISTERS,
            }),
            DeviceProtocol::Mega => Some(FixedSettings {
                port: None,
                slave_id: 0,
                serial: Some(ARDUINO_SERIAL),
                registers: MEGA_REGISTERS,
            }),
        };

        DeviceProfile {
            protocol: self,
            family: self.family(),
            fixed,
        }
    }
}

/// Serial line settings baked into a board's firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialPreset {
    pub baud: u32,
    pub parity: Parity,
    pub data_bits: u8,
    pub stop_bits: u8,
}

/// Values a fixed-hardware preset stamps into the form and locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSettings {
    /// IP port, TCP family only.
    pub port: Option<u16>,
    pub slave_id: u8,
    /// Line settings, RTU family only.
    pub serial: Option<SerialPreset>,
    pub registers: RegisterMap,
}

/// A device-type preset. `fixed` is `None` for the generic (open) types,
/// whose fields are left to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    pub protocol: DeviceProtocol,
    pub family: ProtocolFamily,
    pub fixed: Option<FixedSettings>,
}

impl DeviceProfile {
    pub fn is_locked(&self) -> bool {
        self.fixed.is_some()
    }
}

const ESP_BOARD_PORT: u16 = 502;

const ESP_BOARD_REGISTERS: RegisterMap = RegisterMap {
    discrete_inputs: RegisterBlock::new(0, 8),
    coils: RegisterBlock::new(0, 8),
    input_registers: RegisterBlock::new(0, 1),
    holding_read: RegisterBlock::new(0, 0),
    holding_write: RegisterBlock::new(0, 1),
};

const ARDUINO_SERIAL: SerialPreset = SerialPreset {
    baud: 115200,
    parity: Parity::None,
    data_bits: 8,
    stop_bits: 1,
};

const UNO_REGISTERS: RegisterMap = RegisterMap {
    discrete_inputs: RegisterBlock::new(0, 5),
    coils: RegisterBlock::new(0, 4),
    input_registers: RegisterBlock::new(0, 6),
    holding_read: RegisterBlock::new(0, 0),
    holding_write: RegisterBlock::new(0, 3),
};

const MEGA_REGISTERS: RegisterMap = RegisterMap {
    discrete_inputs: RegisterBlock::new(0, 24),
    coils: RegisterBlock::new(0, 16),
    input_registers: RegisterBlock::new(0, 16),
    holding_read: RegisterBlock::new(0, 0),
    holding_write: RegisterBlock::new(0, 12),
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_protocol_names() {
        for protocol in DeviceProtocol::iter() {
            assert_eq!(DeviceProtocol::from_name(protocol.as_str()), Some(protocol));
            assert_eq!(protocol.profile().protocol, protocol);
            assert_eq!(protocol.profile().family, protocol.family());
        }
        assert_eq!(DeviceProtocol::from_name("tcp"), None);
        assert_eq!(DeviceProtocol::from_name("Leonardo"), None);
    }

    #[test]
    fn test_families() {
        let tcp: Vec<_> = DeviceProtocol::iter()
            .filter(|p| p.family() == ProtocolFamily::Tcp)
            .collect();
        assert_eq!(
            tcp,
            vec![
                DeviceProtocol::Tcp,
                DeviceProtocol::Esp32,
                DeviceProtocol::Esp8266
            ]
        );
    }

    #[test]
    fn test_only_generic_types_are_open() {
        assert!(!DeviceProtocol::Tcp.profile().is_locked());
        assert!(!DeviceProtocol::Rtu.profile().is_locked());
        assert!(DeviceProtocol::Esp32.profile().is_locked());
        assert!(DeviceProtocol::Esp8266.profile().is_locked());
        assert!(DeviceProtocol::Uno.profile().is_locked());
        assert!(DeviceProtocol::Mega.profile().is_locked());
    }

    #[test]
    fn test_fixed_settings_match_family() {
        for protocol in DeviceProtocol::iter() {
            let Some(fixed) = protocol.profile().fixed else {
                continue;
            };
            match protocol.family() {
                ProtocolFamily::Tcp => {
                    assert_eq!(fixed.port, Some(502));
                    assert!(fixed.serial.is_none());
                }
                ProtocolFamily::Rtu => {
                    assert!(fixed.port.is_none());
                    assert_eq!(fixed.serial, Some(ARDUINO_SERIAL));
                }
            }
        }
    }

    #[test]
    fn test_serde_uses_selector_values() {
        let json = serde_json::to_string(&DeviceProtocol::Esp8266).unwrap();
        assert_eq!(json, "\"ESP8266\"");
        let parsed: DeviceProtocol = serde_json::from_str("\"Mega\"").unwrap();
        assert_eq!(parsed, DeviceProtocol::Mega);
    }
}
