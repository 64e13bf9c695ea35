//! Renderer for `mbconfig.cfg`, the slave-device list read by the runtime's
//! Modbus master.
//!
//! Every value is written quoted, one `deviceN.key = "value"` line per
//! setting. Settings that do not apply to a device's transport are written
//! as `0` (parity as `None`) so the runtime always finds every key.

use anyhow::{Context, Result};
use std::fmt;
use strum::IntoEnumIterator;

use super::device::{SlaveDevice, Transport};
use super::settings::Settings;
use crate::protocol::ports::runtime_port_name;
use crate::protocol::types::{Parity, RegisterKind};

pub struct MbConfig<'a> {
    pub settings: &'a Settings,
    pub devices: &'a [SlaveDevice],
}

impl<'a> MbConfig<'a> {
    pub fn new(settings: &'a Settings, devices: &'a [SlaveDevice]) -> Self {
        Self { settings, devices }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Check every device, then write the file. Nothing is written if any
    /// device is rejected.
    pub fn write_to(&self, path: &str) -> Result<()> {
        for device in self.devices {
            device.check()?;
        }
        std::fs::write(path, self.render())
            .with_context(|| format!("Failed to write Modbus configuration to {path}"))?;
        log::info!("Wrote {} slave devices to {path}", self.devices.len());
        Ok(())
    }
}

impl fmt::Display for MbConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Num_Devices = \"{}\"", self.devices.len())?;
        write!(f, "\nPolling_Period = \"{}\"", self.settings.polling_period_ms)?;
        write!(f, "\nTimeout = \"{}\"", self.settings.timeout_ms)?;

        for (index, device) in self.devices.iter().enumerate() {
            write_device(f, index, device)?;
        }
        Ok(())
    }
}

fn write_device(f: &mut fmt::Formatter<'_>, index: usize, device: &SlaveDevice) -> fmt::Result {
    write!(f, "\n# ------------\n#   DEVICE {index}\n# ------------\n")?;

    let (protocol, address, ip_port, baud, parity, data_bits, stop_bits) = match &device.transport
    {
        Transport::Tcp {
            ip_address,
            ip_port,
        } => ("TCP", ip_address.clone(), *ip_port, 0, Parity::None, 0, 0),
        Transport::Rtu {
            com_port,
            baud_rate,
            parity,
            data_bits,
            stop_bits,
        } => (
            "RTU",
            runtime_port_name(com_port),
            0,
            *baud_rate,
            *parity,
            *data_bits,
            *stop_bits,
        ),
    };

    let entries: [(&str, &dyn fmt::Display); 9] = [
        ("name", &device.name),
        ("slave_id", &device.slave_id),
        ("protocol", &protocol),
        ("address", &address),
        ("IP_Port", &ip_port),
        ("RTU_Baud_Rate", &baud),
        ("RTU_Parity", &parity),
        ("RTU_Data_Bits", &data_bits),
        ("RTU_Stop_Bits", &stop_bits),
    ];
    for (key, value) in entries {
        writeln!(f, "device{index}.{key} = \"{value}\"")?;
    }
    writeln!(f)?;

    for kind in RegisterKind::iter() {
        let block = device.registers.get(kind);
        let key = kind.config_key();
        writeln!(f, "device{index}.{key}_Start = \"{}\"", block.start)?;
        writeln!(f, "device{index}.{key}_Size = \"{}\"", block.size)?;
    }
    Ok(())
}
