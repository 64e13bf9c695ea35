use strum::{EnumIter, IntoEnumIterator};

use crate::protocol::types::{ProtocolFamily, RegisterKind};

/// Half of a register block's field pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPart {
    Start,
    Size,
}

/// Which container a field lives in on the device page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    /// Always visible.
    Common,
    /// Inside `tcp-stuff`.
    Tcp,
    /// Inside `rtu-stuff`.
    Rtu,
}

impl FieldGroup {
    pub fn container_id(self) -> Option<&'static str> {
        match self {
            FieldGroup::Common => None,
            FieldGroup::Tcp => Some("tcp-stuff"),
            FieldGroup::Rtu => Some("rtu-stuff"),
        }
    }

    pub fn for_family(family: ProtocolFamily) -> Self {
        match family {
            ProtocolFamily::Tcp => FieldGroup::Tcp,
            ProtocolFamily::Rtu => FieldGroup::Rtu,
        }
    }
}

/// The text inputs and selectors of the device form, in page order.
///
/// The device-type selector (`dev_protocol`) is not listed here; it is held
/// separately by the form state because it drives everything else.
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Name,
    SlaveId,
    IpAddress,
    IpPort,
    ComPort,
    BaudRate,
    Parity,
    DataBits,
    StopBits,
    DiStart,
    DiSize,
    DoStart,
    DoSize,
    AiStart,
    AiSize,
    AorStart,
    AorSize,
    AowStart,
    AowSize,
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FormField {
    /// Element id on the page.
    pub fn id(self) -> &'static str {
        match self {
            FormField::Name => "dev_name",
            FormField::SlaveId => "dev_id",
            FormField::IpAddress => "dev_ip",
            FormField::IpPort => "dev_port",
            FormField::ComPort => "dev_cport",
            FormField::BaudRate => "dev_baud",
            FormField::Parity => "dev_parity",
            FormField::DataBits => "dev_data",
            FormField::StopBits => "dev_stop",
            FormField::DiStart => "di_start",
            FormField::DiSize => "di_size",
            FormField::DoStart => "do_start",
            FormField::DoSize => "do_size",
            FormField::AiStart => "ai_start",
            FormField::AiSize => "ai_size",
            FormField::AorStart => "aor_start",
            FormField::AorSize => "aor_size",
            FormField::AowStart => "aow_start",
            FormField::AowSize => "aow_size",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        FormField::iter().find(|field| field.id() == id.trim())
    }

    pub fn group(self) -> FieldGroup {
        match self {
            FormField::IpAddress | FormField::IpPort => FieldGroup::Tcp,
            FormField::ComPort
            | FormField::BaudRate
            | FormField::Parity
            | FormField::DataBits
            | FormField::StopBits => FieldGroup::Rtu,
            _ => FieldGroup::Common,
        }
    }

    /// Whether device-type presets overwrite this field. Name, IP address and
    /// COM port are only ever set by the user.
    pub fn is_preset_managed(self) -> bool {
        !matches!(
            self,
            FormField::Name | FormField::IpAddress | FormField::ComPort
        )
    }

    /// Value a cleared field holds. The parity selector has no empty option.
    pub fn cleared_value(self) -> &'static str {
        match self {
            FormField::Parity => "None",
            _ => "",
        }
    }

    /// The (start, size) field pair of a register block.
    pub fn block_fields(kind: RegisterKind) -> (FormField, FormField) {
        match kind {
            RegisterKind::DiscreteInputs => (FormField::DiStart, FormField::DiSize),
            RegisterKind::Coils => (FormField::DoStart, FormField::DoSize),
            RegisterKind::InputRegisters => (FormField::AiStart, FormField::AiSize),
            RegisterKind::HoldingRead => (FormField::AorStart, FormField::AorSize),
            RegisterKind::HoldingWrite => (FormField::AowStart, FormField::AowSize),
        }
    }

    /// Inverse of [`FormField::block_fields`].
    pub fn block_slot(self) -> Option<(RegisterKind, BlockPart)> {
        RegisterKind::iter().find_map(|kind| match FormField::block_fields(kind) {
            (start, _) if start == self => Some((kind, BlockPart::Start)),
            (_, size) if size == self => Some((kind, BlockPart::Size)),
            _ => None,
        })
    }

    /// Fields that must be filled in for any device type, in page order.
    pub fn always_required() -> impl Iterator<Item = FormField> {
        [FormField::Name, FormField::SlaveId].into_iter().chain(
            RegisterKind::iter().flat_map(|kind| {
                let (start, size) = FormField::block_fields(kind);
                [start, size]
            }),
        )
    }

    /// Extra fields required by a transport family.
    pub fn required_for(family: ProtocolFamily) -> &'static [FormField] {
        match family {
            ProtocolFamily::Tcp => &[FormField::IpAddress, FormField::IpPort],
            ProtocolFamily::Rtu => &[FormField::BaudRate, FormField::DataBits, FormField::StopBits],
        }
    }
}
