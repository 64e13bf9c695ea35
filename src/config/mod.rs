pub mod addressing;
pub mod device;
pub mod mbconfig;
pub mod settings;

pub use addressing::{allocate_addresses, DeviceAddresses, PlcArea, PlcRange};
pub use device::{load_devices, SlaveDevice, Transport};
pub use mbconfig::MbConfig;
pub use settings::Settings;
