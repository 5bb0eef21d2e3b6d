use colored::Colorize;
use linkscope::command_argument_builder;
use linkscope::handlers::{handle_analyze, handle_clusters, handle_config, handle_page, handle_search};
use linkscope_core::print_banner;
use tracing::Level;

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let verbose = chosen_command.get_flag("verbose");

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .init();

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let result = match chosen_command.subcommand() {
        Some(("analyze", primary_command)) => handle_analyze(primary_command, quiet),
        Some(("search", primary_command)) => handle_search(primary_command),
        Some(("page", primary_command)) => handle_page(primary_command),
        Some(("clusters", primary_command)) => handle_clusters(primary_command),
        Some(("config", _)) => handle_config(),
        // No subcommand provided, just show the banner
        None => Ok(()),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
