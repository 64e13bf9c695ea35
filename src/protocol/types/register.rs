use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// The register areas a slave device exposes to the runtime's Modbus master.
///
/// The device page labels them as PLC I/O (DI / DO / AI / AO read / AO write);
/// the runtime configuration names the underlying Modbus tables.
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegisterKind {
    DiscreteInputs,
    Coils,
    InputRegisters,
    HoldingRead,
    HoldingWrite,
}

impl std::fmt::Display for RegisterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterKind::DiscreteInputs => write!(f, "Discrete Inputs"),
            RegisterKind::Coils => write!(f, "Coils"),
            RegisterKind::InputRegisters => write!(f, "Input Registers"),
            RegisterKind::HoldingRead => write!(f, "Holding Registers - Read"),
            RegisterKind::HoldingWrite => write!(f, "Holding Registers - Write"),
        }
    }
}

impl RegisterKind {
    /// Key prefix used for this area in `mbconfig.cfg`.
    pub fn config_key(self) -> &'static str {
        match self {
            RegisterKind::DiscreteInputs => "Discrete_Inputs",
            RegisterKind::Coils => "Coils",
            RegisterKind::InputRegisters => "Input_Registers",
            RegisterKind::HoldingRead => "Holding_Registers_Read",
            RegisterKind::HoldingWrite => "Holding_Registers",
        }
    }
}

/// A contiguous address range: `size` registers starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegisterBlock {
    pub start: u16,
    pub size: u16,
}

impl RegisterBlock {
    pub const fn new(start: u16, size: u16) -> Self {
        Self { start, size }
    }

    /// Last address covered by the block, `None` for an empty block.
    pub fn end(&self) -> Option<u16> {
        if self.size == 0 {
            None
        } else {
            self.start.checked_add(self.size - 1)
        }
    }

    /// Whether every address of the block exists in the 16-bit Modbus
    /// address space.
    pub fn fits(&self) -> bool {
        self.size == 0 || self.end().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegisterMap {
    pub discrete_inputs: RegisterBlock,
    pub coils: RegisterBlock,
    pub input_registers: RegisterBlock,
    pub holding_read: RegisterBlock,
    pub holding_write: RegisterBlock,
}

impl RegisterMap {
    pub fn get(&self, kind: RegisterKind) -> RegisterBlock {
        match kind {
            RegisterKind::DiscreteInputs => self.discrete_inputs,
            RegisterKind::Coils => self.coils,
            RegisterKind::InputRegisters => self.input_registers,
            RegisterKind::HoldingRead => self.holding_read,
            RegisterKind::HoldingWrite => self.holding_write,
        }
    }

    pub fn set(&mut self, kind: RegisterKind, block: RegisterBlock) {
        match kind {
            RegisterKind::DiscreteInputs => self.discrete_inputs = block,
            RegisterKind::Coils => self.coils = block,
            RegisterKind::InputRegisters => self.input_registers = block,
            RegisterKind::HoldingRead => self.holding_read = block,
            RegisterKind::HoldingWrite => self.holding_write = block,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_block_end() {
        assert_eq!(RegisterBlock::new(0, 0).end(), None);
        assert_eq!(RegisterBlock::new(0, 8).end(), Some(7));
        assert_eq!(RegisterBlock::new(100, 1).end(), Some(100));
        assert_eq!(RegisterBlock::new(u16::MAX, 2).end(), None);
    }

    #[test]
    fn test_block_fits() {
        assert!(RegisterBlock::new(0, 0).fits());
        assert!(RegisterBlock::new(u16::MAX, 0).fits());
        assert!(RegisterBlock::new(u16::MAX, 1).fits());
        assert!(RegisterBlock::new(65000, 536).fits());
        assert!(!RegisterBlock::new(65000, 537).fits());
        assert!(!RegisterBlock::new(1, u16::MAX).fits());
    }

    #[test]
    fn test_map_get_set() {
        let mut map = RegisterMap::default();
        for (i, kind) in RegisterKind::iter().enumerate() {
            map.set(kind, RegisterBlock::new(i as u16, 10 + i as u16));
        }
        for (i, kind) in RegisterKind::iter().enumerate() {
            assert_eq!(map.get(kind), RegisterBlock::new(i as u16, 10 + i as u16));
        }
        assert_eq!(map.holding_write, RegisterBlock::new(4, 14));
    }
}
