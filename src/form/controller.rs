use super::field::FormField;
use super::notice::NoticeSink;
use super::render::{render, FormView};
use super::state::FormState;
use super::validate::{validate, FormError, ValidationResult, MISSING_FIELDS_NOTICE};
use crate::config::device::SlaveDevice;
use crate::config::settings::Settings;
use crate::protocol::types::DeviceProtocol;

/// Controller for the add/edit slave device page.
///
/// Owns the page's [`FormState`]. Frontends forward the three page events
/// (load, device-type change, submit) plus user edits, and redraw from
/// [`DeviceConfigForm::view`].
#[derive(Debug, Clone)]
pub struct DeviceConfigForm {
    state: FormState,
}

impl DeviceConfigForm {
    /// Page load with `protocol` as the selector's initial option.
    pub fn new(protocol: DeviceProtocol) -> Self {
        let mut form = Self {
            state: FormState::new(protocol),
        };
        form.apply_profile(protocol);
        form
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self::new(settings.default_protocol)
    }

    /// Edit page: open the form on a stored device. The device's preset is
    /// applied first, then every stored column is restored. A locked field
    /// whose stored value differs from the preset fails with
    /// [`FormError::ReadOnlyField`] instead of being overwritten.
    pub fn from_device(device: &SlaveDevice) -> Result<Self, FormError> {
        let mut form = Self::new(device.protocol);
        for (field, value) in device.form_values() {
            if form.state.is_read_only(field) && form.state.value(field) == value {
                continue;
            }
            form.state.set_value(field, value).inspect_err(|err| {
                log::warn!("Cannot reopen device '{}': {err}", device.name);
            })?;
        }
        Ok(form)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn protocol(&self) -> DeviceProtocol {
        self.state.protocol()
    }

    pub fn apply_profile(&mut self, protocol: DeviceProtocol) {
        self.state.apply_profile(protocol);
        let profile = protocol.profile();
        log::debug!(
            "Applied {} profile ({}, {})",
            protocol,
            profile.family,
            if profile.is_locked() {
                "locked"
            } else {
                "open"
            }
        );
    }

    /// The user picked another option in the device-type selector.
    pub fn select_protocol(&mut self, protocol: DeviceProtocol) {
        let previous = self.state.protocol();
        if previous.family() != protocol.family() {
            log::info!(
                "Device type {previous} -> {protocol}: switching to {} fields",
                protocol.family()
            );
        } else {
            log::info!("Device type {previous} -> {protocol}");
        }
        self.apply_profile(protocol);
    }

    pub fn edit(&mut self, field: FormField, value: impl Into<String>) -> Result<(), FormError> {
        let value = value.into();
        log::debug!("Edit {field} = {value:?}");
        self.state.set_value(field, value)
    }

    pub fn validate(&self) -> ValidationResult {
        validate(&self.state)
    }

    pub fn view(&self) -> FormView {
        render(&self.state)
    }

    /// Submit handler. A failed validation raises the blocking notice and
    /// cancels the submission; otherwise the typed record is returned for
    /// the caller to post.
    pub fn submit(&self, notice: &dyn NoticeSink) -> Result<SlaveDevice, FormError> {
        self.validate().into_result().inspect_err(|err| {
            log::warn!("Submission cancelled: {err}");
            notice.blocking_notice(MISSING_FIELDS_NOTICE);
        })?;

        let device = SlaveDevice::from_form(&self.state).inspect_err(|err| {
            log::warn!("Submission cancelled: {err}");
            notice.blocking_notice(&err.to_string());
        })?;
        log::info!(
            "Device '{}' ({}) ready for submission",
            device.name,
            device.protocol
        );
        Ok(device)
    }
}
