use strum::IntoEnumIterator;

use super::field::{BlockPart, FormField};
use super::validate::FormError;
use crate::protocol::types::{DeviceProtocol, FixedSettings, ProtocolFamily};

/// Value and lock flag of a single input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    pub value: String,
    pub read_only: bool,
}

impl FieldState {
    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Live contents of the device form: the selected device type plus one
/// [`FieldState`] per [`FormField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    protocol: DeviceProtocol,
    fields: Vec<FieldState>,
}

impl FormState {
    /// A blank form with `protocol` selected. No preset is applied yet.
    pub fn new(protocol: DeviceProtocol) -> Self {
        let fields = FormField::iter()
            .map(|field| FieldState {
                value: field.cleared_value().to_string(),
                read_only: false,
            })
            .collect();
        Self { protocol, fields }
    }

    pub fn protocol(&self) -> DeviceProtocol {
        self.protocol
    }

    pub fn family(&self) -> ProtocolFamily {
        self.protocol.profile().family
    }

    pub fn field(&self, field: FormField) -> &FieldState {
        &self.fields[field as usize]
    }

    pub fn value(&self, field: FormField) -> &str {
        &self.field(field).value
    }

    pub fn is_read_only(&self, field: FormField) -> bool {
        self.field(field).read_only
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &FieldState)> {
        FormField::iter().zip(self.fields.iter())
    }

    /// A user edit. Locked inputs refuse edits the way a `readOnly` input does.
    pub fn set_value(&mut self, field: FormField, value: impl Into<String>) -> Result<(), FormError> {
        let slot = &mut self.fields[field as usize];
        if slot.read_only {
            return Err(FormError::ReadOnlyField { field });
        }
        slot.value = value.into();
        Ok(())
    }

    /// Select `protocol` and bring every preset-managed field in line with
    /// its profile: fixed values are stamped and locked, everything else is
    /// cleared and unlocked. Fields the user owns are left alone.
    pub fn apply_profile(&mut self, protocol: DeviceProtocol) {
        self.protocol = protocol;
        let fixed = protocol.profile().fixed;

        for field in FormField::iter().filter(|f| f.is_preset_managed()) {
            let slot = &mut self.fields[field as usize];
            match fixed.as_ref().and_then(|fixed| preset_value(fixed, field)) {
                Some(value) => {
                    slot.value = value;
                    slot.read_only = true;
                }
                None => {
                    slot.value = field.cleared_value().to_string();
                    slot.read_only = false;
                }
            }
        }
    }
}

fn preset_value(fixed: &FixedSettings, field: FormField) -> Option<String> {
    if let Some((kind, part)) = field.block_slot() {
        let block = fixed.registers.get(kind);
        return Some(match part {
            BlockPart::Start => block.start.to_string(),
            BlockPart::Size => block.size.to_string(),
        });
    }

    match field {
        FormField::SlaveId => Some(fixed.slave_id.to_string()),
        FormField::IpPort => fixed.port.map(|port| port.to_string()),
        FormField::BaudRate => fixed.serial.map(|s| s.baud.to_string()),
        FormField::Parity => fixed.serial.map(|s| s.parity.to_string()),
        FormField::DataBits => fixed.serial.map(|s| s.data_bits.to_string()),
        FormField::StopBits => fixed.serial.map(|s| s.stop_bits.to_string()),
        _ => None,
    }
}
