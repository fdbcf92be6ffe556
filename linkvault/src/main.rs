use commands::command_argument_builder;
use linkvault::handlers::{
    handle_add, handle_count, handle_import, handle_init, handle_pending, handle_urls,
};
use linkvault_core::print_banner;

mod commands;

fn main() {
    tracing_subscriber::fmt::init();

    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    let outcome = match chosen_command.subcommand() {
        Some(("init", primary_command)) => handle_init(primary_command),
        Some(("add", primary_command)) => handle_add(primary_command),
        Some(("import", primary_command)) => handle_import(primary_command),
        Some(("urls", primary_command)) => handle_urls(primary_command),
        Some(("pending", primary_command)) => handle_pending(primary_command),
        Some(("count", primary_command)) => handle_count(primary_command),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(error) = outcome {
        eprintln!("✗ {error:#}");
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
