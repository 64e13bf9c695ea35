use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Serial parity as offered by the device page's parity selector.
///
/// The selector value doubles as the stored value, so `Display` and
/// `from_name` use the literal option strings (`None`, `Even`, `Odd`).
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Parity {
    #[default]
    None,
    Even,
    Odd,
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Parity {
    pub fn as_str(self) -> &'static str {
        match self {
            Parity::None => "None",
            Parity::Even => "Even",
            Parity::Odd => "Odd",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "None" => Some(Parity::None),
            "Even" => Some(Parity::Even),
            "Odd" => Some(Parity::Odd),
            _ => None,
        }
    }
}
