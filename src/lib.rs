//! devform: slave device configuration for a PLC runtime's Modbus master
//!
//! This crate models the "add / edit slave device" page independently of any
//! UI toolkit. [`form::DeviceConfigForm`] owns the form state, applies the
//! device-type presets (generic TCP/RTU devices and the ESP32, ESP8266,
//! Arduino Uno and Mega boards), validates required fields and renders the
//! state into a [`form::FormView`] a frontend can draw.
//!
//! Submitted forms become [`config::SlaveDevice`] records, and a list of them
//! renders into the runtime's `mbconfig.cfg` via [`config::MbConfig`].
//! [`config::allocate_addresses`] reports where each device's I/O shows up
//! in the PLC address space.

#[doc(hidden)]
pub mod cli;
pub mod config;
pub mod form;
pub mod protocol;

pub use config::{MbConfig, Settings, SlaveDevice, Transport};
pub use form::{DeviceConfigForm, FormError, FormField, FormState, FormView, ValidationResult};
pub use protocol::types::{DeviceProtocol, ProtocolFamily};
