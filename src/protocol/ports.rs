use std::collections::HashSet;

/// Serial port names offered by the COM-port selector (`dev_cport`).
///
/// Ports are deduplicated by basename and sorted USB/ACM first. An
/// enumeration failure is logged and yields an empty list, the page then
/// simply offers no choices.
pub fn available_com_ports() -> Vec<String> {
    match serialport::available_ports() {
        Ok(ports) => sort_and_dedup_names(ports.into_iter().map(|p| p.port_name).collect()),
        Err(err) => {
            log::warn!("Failed to enumerate serial ports: {err}");
            Vec::new()
        }
    }
}

pub(crate) fn sort_and_dedup_names(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names: Vec<String> = raw
        .into_iter()
        .filter(|name| seen.insert(basename(name).to_lowercase()))
        .collect();

    fn priority(name: &str) -> i32 {
        let n = name.to_lowercase();
        if n.contains("ttyusb") || n.contains("usb") {
            0
        } else if n.contains("acm") {
            1
        } else if n.contains("ttys") || n.contains("com") {
            2
        } else {
            10
        }
    }

    names.sort_by(|a, b| priority(a).cmp(&priority(b)).then_with(|| a.cmp(b)));
    names
}

fn basename(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Translate a Windows-style `COMn` name into the `/dev/ttyS{n-1}` device the
/// runtime opens under Cygwin. Any other name is returned unchanged.
pub fn runtime_port_name(name: &str) -> String {
    let Some(num) = name.strip_prefix("COM") else {
        return name.to_string();
    };
    match num.parse::<u32>() {
        Ok(n) if n >= 1 => format!("/dev/ttyS{}", n - 1),
        _ => name.to_string(),
    }
}
