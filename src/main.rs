use clap::{Arg, ArgMatches, Command};
use log::error;
use std::process;

pub mod commands;
pub mod script;
pub mod session;
pub mod utils;

use commands::DEFAULT_TEMPLATE;
use script::execute::DEFAULT_SHELL;
use utils::config::FIELDS;
use utils::tools::init_logging;

fn record_args() -> Vec<Arg<'static>> {
    let mut args = vec![
        Arg::new("config")
            .short('c')
            .long("config")
            .takes_value(true)
            .help("JSON file with the network parameters"),
        Arg::new("template")
            .short('t')
            .long("template")
            .takes_value(true)
            .default_value(DEFAULT_TEMPLATE)
            .help("Script template to render"),
    ];
    for (field, flag) in FIELDS {
        args.push(
            Arg::new(field)
                .long(flag)
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("Overrides the value from --config"),
        );
    }
    args
}

fn exec_args() -> Vec<Arg<'static>> {
    vec![
        Arg::new("yes")
            .short('y')
            .long("yes")
            .help("Do not ask before running the script"),
        Arg::new("shell")
            .long("shell")
            .takes_value(true)
            .default_value(DEFAULT_SHELL)
            .help("Shell used to run the generated script"),
        Arg::new("timeout")
            .long("timeout")
            .takes_value(true)
            .help("Kill the script after this many seconds"),
    ]
}

fn exec_subcommand(name: &'static str, about: &'static str) -> Command<'static> {
    Command::new(name)
        .about(about)
        .args(record_args())
        .args(exec_args())
}

pub fn cli() -> Command<'static> {
    Command::new("SubnetWall")
        .version("1.0.0")
        .about("Generates and runs the firewall / client setup script for an internal subnet")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("no-log-file")
                .long("no-log-file")
                .global(true)
                .help("Only log to the terminal"),
        )
        .subcommand(exec_subcommand(
            "firewall",
            "Set this machine up as the subnet firewall",
        ))
        .subcommand(exec_subcommand(
            "client",
            "Set this machine up as a client behind the firewall",
        ))
        .subcommand(exec_subcommand("reset", "Undo a previous setup"))
        .subcommand(
            exec_subcommand("run", "Pick the mode with flags, --reset wins over --client")
                .arg(Arg::new("client").long("client").help("Client mode"))
                .arg(Arg::new("reset").long("reset").help("Reset mode")),
        )
        .subcommand(
            Command::new("render")
                .about("Print the generated script without running it")
                .args(record_args())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .takes_value(true)
                        .help("Write the script here instead of stdout"),
                ),
        )
}

fn dispatch(name: &str, cmd: &ArgMatches) -> Result<bool, Box<dyn std::error::Error>> {
    match name {
        "render" => commands::render::main(cmd),
        _ => commands::run::main(name, cmd),
    }
}

fn main() {
    let app = cli().get_matches();
    let (name, cmd) = match app.subcommand() {
        Some(sub) => sub,
        None => unreachable!("clap requires a subcommand"),
    };

    if let Err(e) = init_logging(name, !cmd.is_present("no-log-file")) {
        eprintln!("Failed to set up logging: {}", e);
        process::exit(1);
    }

    match dispatch(name, cmd) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{collect_record, run::build_request};
    use crate::script::mode::Mode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn field_flags_override_config_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"{{"nameInternalCard": "eth0", "nameExternalCard": "eno1"}}"#
        )
        .unwrap();
        let path = tmp.path().to_str().unwrap();
        let app = cli()
            .try_get_matches_from([
                "subnetwall",
                "render",
                "-c",
                path,
                "--name-internal-card",
                "eth1",
            ])
            .unwrap();
        let (_, cmd) = app.subcommand().unwrap();
        let record = collect_record(cmd).unwrap();
        assert_eq!(record.name_internal_card, "eth1");
        assert_eq!(record.name_external_card, "eno1");
    }

    #[test]
    fn template_defaults_to_script_mst() {
        let app = cli().try_get_matches_from(["subnetwall", "firewall"]).unwrap();
        let (_, cmd) = app.subcommand().unwrap();
        assert_eq!(cmd.value_of("template"), Some("script.mst"));
        assert_eq!(cmd.value_of("shell"), Some(DEFAULT_SHELL));
    }

    #[test]
    fn subcommands_map_to_modes() {
        for (args, mode) in [
            (vec!["subnetwall", "firewall"], Mode::Firewall),
            (vec!["subnetwall", "client"], Mode::Client),
            (vec!["subnetwall", "reset"], Mode::Reset),
            (vec!["subnetwall", "run", "--client"], Mode::Client),
            (vec!["subnetwall", "run", "--client", "--reset"], Mode::Reset),
            (vec!["subnetwall", "run"], Mode::Firewall),
        ] {
            let app = cli().try_get_matches_from(args).unwrap();
            let (name, cmd) = app.subcommand().unwrap();
            let request = build_request(name, cmd).unwrap();
            assert_eq!(Mode::resolve(request.is_client, request.is_reset), mode);
        }
    }

    #[test]
    fn subcommand_is_required() {
        assert!(cli().try_get_matches_from(["subnetwall"]).is_err());
    }
}
