use serde::Serialize;

use super::field::FieldGroup;
use super::state::FormState;
use crate::protocol::types::ProtocolFamily;

/// What a single input should look like on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub value: String,
    pub read_only: bool,
    pub visible: bool,
}

/// The page as a frontend should draw it for a given [`FormState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub protocol: &'static str,
    pub tcp_group_visible: bool,
    pub rtu_group_visible: bool,
    pub fields: Vec<FieldView>,
}

impl FormView {
    pub fn field(&self, name: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Map form state to visible UI. Pure; the frontend only has to copy the
/// result into its widgets.
pub fn render(state: &FormState) -> FormView {
    let family = state.family();
    let active_group = FieldGroup::for_family(family);

    let fields = state
        .iter()
        .map(|(field, slot)| {
            let group = field.group();
            FieldView {
                name: field.id(),
                value: slot.value.clone(),
                read_only: slot.read_only,
                visible: group == FieldGroup::Common || group == active_group,
            }
        })
        .collect();

    FormView {
        protocol: state.protocol().as_str(),
        tcp_group_visible: family == ProtocolFamily::Tcp,
        rtu_group_visible: family == ProtocolFamily::Rtu,
        fields,
    }
}

impl std::fmt::Display for FormView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |visible: bool| if visible { "shown" } else { "hidden" };
        writeln!(f, "dev_protocol = {}", self.protocol)?;
        for (group, visible) in [
            (FieldGroup::Tcp, self.tcp_group_visible),
            (FieldGroup::Rtu, self.rtu_group_visible),
        ] {
            if let Some(id) = group.container_id() {
                writeln!(f, "{id}: {}", show(visible))?;
            }
        }

        let width = self.fields.iter().map(|v| v.name.len()).max().unwrap_or(0);
        for view in self.fields.iter().filter(|v| v.visible) {
            let lock = if view.read_only { " (locked)" } else { "" };
            writeln!(f, "{:<width$} = {:?}{lock}", view.name, view.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::types::DeviceProtocol;
    use strum::IntoEnumIterator;

    #[test]
    fn test_exactly_one_group_visible() {
        for protocol in DeviceProtocol::iter() {
            let mut state = FormState::new(protocol);
            state.apply_profile(protocol);
            let view = render(&state);
            assert_ne!(view.tcp_group_visible, view.rtu_group_visible);
            assert_eq!(
                view.tcp_group_visible,
                protocol.family() == ProtocolFamily::Tcp
            );
        }
    }

    #[test]
    fn test_field_visibility_follows_group() {
        let mut state = FormState::new(DeviceProtocol::Uno);
        state.apply_profile(DeviceProtocol::Uno);
        let view = render(&state);

        assert!(!view.field("dev_ip").unwrap().visible);
        assert!(!view.field("dev_port").unwrap().visible);
        assert!(view.field("dev_baud").unwrap().visible);
        assert!(view.field("dev_cport").unwrap().visible);
        assert!(view.field("dev_name").unwrap().visible);

        let baud = view.field("dev_baud").unwrap();
        assert_eq!(baud.value, "115200");
        assert!(baud.read_only);
    }

    #[test]
    fn test_render_is_pure() {
        let mut state = FormState::new(DeviceProtocol::Esp32);
        state.apply_profile(DeviceProtocol::Esp32);
        assert_eq!(render(&state), render(&state.clone()));
    }

    #[test]
    fn test_display_lists_visible_fields() {
        let mut state = FormState::new(DeviceProtocol::Esp8266);
        state.apply_profile(DeviceProtocol::Esp8266);
        let text = render(&state).to_string();

        assert!(text.contains("tcp-stuff: shown"));
        assert!(text.contains("rtu-stuff: hidden"));
        assert!(text.contains("\"502\" (locked)"));
        assert!(!text.contains("dev_baud"));
    }
}
