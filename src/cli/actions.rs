use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use serde::Serialize;
use std::io::Write;
use strum::IntoEnumIterator;

use crate::config::{allocate_addresses, load_devices, MbConfig, Settings};
use crate::form::{DeviceConfigForm, FormField, LoggingNotice, NoticeSink, StderrNotice};
use crate::protocol::ports::available_com_ports;
use crate::protocol::types::DeviceProtocol;

#[derive(Serialize)]
struct ProfileInfo {
    protocol: &'static str,
    label: &'static str,
    family: String,
    locked: bool,
    values: Vec<(&'static str, String)>,
}

pub fn run_one_shot_actions(matches: &ArgMatches) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_actions(matches, &mut out)
}

/// Run the action selected by `matches`, printing results to `out`.
pub fn run_actions(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let settings = match matches.get_one::<String>("settings") {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    let want_json = matches.get_flag("json");

    if matches.get_flag("list-profiles") {
        return list_profiles(out, want_json);
    }

    if matches.get_flag("list-ports") {
        let ports = available_com_ports();
        if want_json {
            writeln!(out, "{}", serde_json::to_string_pretty(&ports)?)?;
        } else {
            for port in ports.iter() {
                writeln!(out, "{port}")?;
            }
        }
        return Ok(());
    }

    if let Some(devices_path) = matches.get_one::<String>("mbconfig") {
        let devices = load_devices(devices_path)?;
        let config = MbConfig::new(&settings, &devices);
        match matches.get_one::<String>("output") {
            Some(path) => config.write_to(path)?,
            None => writeln!(out, "{config}")?,
        }
        return Ok(());
    }

    if let Some(devices_path) = matches.get_one::<String>("addresses") {
        let addresses = allocate_addresses(&load_devices(devices_path)?);
        if want_json {
            writeln!(out, "{}", serde_json::to_string_pretty(&addresses)?)?;
        } else {
            for device in addresses.iter() {
                writeln!(out, "{device}")?;
            }
        }
        return Ok(());
    }

    run_form(matches, &settings, want_json, out)
}

fn run_form(
    matches: &ArgMatches,
    settings: &Settings,
    want_json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let mut form = DeviceConfigForm::with_settings(settings);

    if let Some(name) = matches.get_one::<String>("profile") {
        let protocol = DeviceProtocol::from_name(name)
            .ok_or_else(|| anyhow!("Unknown device type '{name}'"))?;
        form.select_protocol(protocol);
    }

    if let Some(assignments) = matches.get_many::<String>("field") {
        for assignment in assignments {
            let (id, value) = assignment
                .split_once('=')
                .with_context(|| format!("Expected ID=VALUE, got '{assignment}'"))?;
            let field =
                FormField::from_id(id).ok_or_else(|| anyhow!("Unknown form field '{id}'"))?;
            form.edit(field, value)?;
        }
    }

    if matches.get_flag("submit") {
        let notice: &dyn NoticeSink = if want_json {
            &LoggingNotice
        } else {
            &StderrNotice
        };
        let device = form.submit(notice)?;
        writeln!(out, "{}", serde_json::to_string_pretty(&device)?)?;
        return Ok(());
    }

    let view = form.view();
    if want_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
    } else {
        write!(out, "{view}")?;
        match form.validate().reason() {
            Some(reason) => writeln!(out, "validation: {reason}")?,
            None => writeln!(out, "validation: ok")?,
        }
    }
    Ok(())
}

fn list_profiles(out: &mut dyn Write, want_json: bool) -> Result<()> {
    let profiles: Vec<ProfileInfo> = DeviceProtocol::iter()
        .map(|protocol| {
            let form = DeviceConfigForm::new(protocol);
            let profile = protocol.profile();
            let values = form
                .state()
                .iter()
                .filter(|(_, slot)| slot.read_only)
                .map(|(field, slot)| (field.id(), slot.value.clone()))
                .collect();
            ProfileInfo {
                protocol: protocol.as_str(),
                label: protocol.label(),
                family: profile.family.to_string(),
                locked: profile.is_locked(),
                values,
            }
        })
        .collect();

    if want_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&profiles)?)?;
        return Ok(());
    }

    for profile in profiles.iter() {
        writeln!(
            out,
            "{:<8} {:<3} {:<27} {}",
            profile.protocol,
            profile.family,
            profile.label,
            if profile.locked { "locked" } else { "open" }
        )?;
        for (id, value) in profile.values.iter() {
            writeln!(out, "    {id} = {value}")?;
        }
    }
    Ok(())
}
