pub mod actions;

use clap::{Arg, ArgMatches, Command};

/// Parse command line arguments and return ArgMatches.
pub fn parse_args() -> ArgMatches {
    command().get_matches()
}

pub fn command() -> Command {
    Command::new("devform")
        .about("Slave device form model and mbconfig generator")
        .arg(
            Arg::new("settings")
                .long("settings")
                .short('s')
                .help("Settings file (TOML) with default device type, polling period and timeout")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .short('j')
                .help("Output one-shot results in JSON format")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-profiles")
                .long("list-profiles")
                .help("List every device type with the values its preset fills in")
                .action(clap::ArgAction::SetTrue)
                .conflicts_with_all(["list-ports", "mbconfig", "addresses"]),
        )
        .arg(
            Arg::new("list-ports")
                .long("list-ports")
                .short('l')
                .help("List serial ports offered for RTU devices and exit")
                .action(clap::ArgAction::SetTrue)
                .conflicts_with_all(["list-profiles", "mbconfig", "addresses"]),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .short('p')
                .help("Device type to select (TCP, ESP32, ESP8266, RTU, Uno, Mega)")
                .value_name("TYPE"),
        )
        .arg(
            Arg::new("field")
                .long("field")
                .short('f')
                .help("Fill in a field, e.g. --field dev_name=pump (repeatable)")
                .value_name("ID=VALUE")
                .action(clap::ArgAction::Append),
        )
        .arg(
            Arg::new("submit")
                .long("submit")
                .help("Validate the form and print the resulting device record")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("mbconfig")
                .long("mbconfig")
                .help("Render mbconfig.cfg from a JSON list of devices")
                .value_name("DEVICES_JSON")
                .conflicts_with_all(["profile", "field", "submit", "addresses"]),
        )
        .arg(
            Arg::new("addresses")
                .long("addresses")
                .help("Show the PLC addresses (%IX/%QX/%IW/%QW) each device's I/O is mapped to")
                .value_name("DEVICES_JSON")
                .conflicts_with_all(["profile", "field", "submit"]),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the rendered mbconfig.cfg to this path instead of stdout")
                .value_name("PATH")
                .requires("mbconfig"),
        )
}
