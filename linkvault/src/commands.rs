use crate::CLAP_STYLING;
use clap::{arg, command};
use std::path::PathBuf;

const DEFAULT_DB: &str = "~/.config/linkvault/linkvault.db";

fn db_arg() -> clap::Arg {
    arg!(-d --"db" <PATH>)
        .required(false)
        .help("Path to the linkvault database file")
        .default_value(DEFAULT_DB)
}

fn target_arg() -> clap::Arg {
    arg!(-t --"target" <TARGET>)
        .required(true)
        .help("Target namespace the operation applies to")
}

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("linkvault")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linkvault")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("init")
                .about("Initializes the linkvault database on your filesystem")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Location to store the linkvault database")
                        .default_value("~/.config/linkvault/"),
                )
                .arg(
                    arg!(-f - -"force")
                        .help(
                            "Forces the overwriting of any existing database at the specified \
                        location.",
                        )
                        .required(false),
                ),
        )
        .subcommand(
            command!("add")
                .about("Validates and stores a single discovered URL for a target")
                .arg(target_arg())
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The URL to store"),
                )
                .arg(
                    arg!(--"found")
                        .required(false)
                        .help("Mark the URL as already visited by the scanner")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(db_arg()),
        )
        .subcommand(
            command!("import")
                .about(
                    "Imports a newline-delimited URL list into a target namespace. \
                Candidates that are not URLs are dropped silently.",
                )
                .arg(target_arg())
                .arg(
                    arg!(-F --"file" <PATH>)
                        .required(true)
                        .help("Path to a newline-delimited file of URL candidates")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(db_arg()),
        )
        .subcommand(
            command!("urls")
                .about("Queries stored URLs with filters, search and pagination")
                .arg(target_arg())
                .arg(
                    arg!(-s --"search" <SUBSTRING>)
                        .required(false)
                        .help("Substring match on the URL text")
                        .conflicts_with("url"),
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("Exact URL to match; repeat for set membership")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(--"visited" <BOOL>)
                        .required(false)
                        .help("Filter on the visited flag")
                        .value_parser(clap::value_parser!(bool)),
                )
                .arg(
                    arg!(--"scope" <BOOL>)
                        .required(false)
                        .help("Filter on the scope flag")
                        .value_parser(clap::value_parser!(bool)),
                )
                .arg(
                    arg!(--"limit" <N>)
                        .required(false)
                        .help("Cap the number of returned records")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"offset" <N>)
                        .required(false)
                        .help("Skip this many matching records")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(db_arg()),
        )
        .subcommand(
            command!("pending")
                .about("Lists URLs not yet visited by the scanner")
                .arg(target_arg())
                .arg(db_arg()),
        )
        .subcommand(
            command!("count")
                .about("Prints the number of URLs stored for a target")
                .arg(target_arg())
                .arg(db_arg()),
        )
}
