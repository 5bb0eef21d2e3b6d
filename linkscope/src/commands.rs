use clap::{arg, command};
use std::path::PathBuf;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

const FORMATS: [&str; 7] = ["text", "console", "markdown", "md", "html", "csv", "json"];

fn export_arg() -> clap::Arg {
    arg!(<CSV>)
        .help("Crawl export CSV with per-page link metrics")
        .value_parser(clap::value_parser!(PathBuf))
}

fn config_arg() -> clap::Arg {
    arg!(-c --"config" <PATH>)
        .required(false)
        .help("JSON analysis configuration (missing fields use the defaults)")
        .value_parser(clap::value_parser!(PathBuf))
}

fn policy_arg() -> clap::Arg {
    arg!(--"policy" <POLICY>)
        .required(false)
        .help("Tier policy: page-type groups by page kind, keyword matches URL keywords")
        .value_parser(["page-type", "keyword"])
}

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("linkscope")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linkscope")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(arg!(-v --"verbose" "Enable debug logging on stderr").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("analyze")
                .about("Score every page in a crawl export and write internal linking reports")
                .arg(export_arg())
                .arg(
                    arg!(-g --"goal" <GOAL>)
                        .required(false)
                        .help("Primary goal the recommendations are tuned for")
                        .value_parser(["conversions", "traffic", "authority", "balanced"])
                        .default_value("balanced"),
                )
                .arg(
                    arg!(-a --"areas" <AREAS>)
                        .required(false)
                        .help(
                            "Comma separated focus areas: orphaned, distribution, clusters, \
                        anchors, technical, architecture",
                        )
                        .value_delimiter(','),
                )
                .arg(
                    arg!(-t --"timeline" <TIMELINE>)
                        .required(false)
                        .help("Implementation pace for the action plan")
                        .value_parser(["aggressive", "moderate", "gradual"])
                        .default_value("moderate"),
                )
                .arg(
                    arg!(--"action-plan")
                        .required(false)
                        .help("Include a phased implementation plan in the reports")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format, repeatable: text, markdown, html, csv, json")
                        .value_parser(FORMATS)
                        .action(clap::ArgAction::Append)
                        .default_values(["text", "markdown"]),
                )
                .arg(
                    arg!(-o --"output-dir" <PATH>)
                        .required(false)
                        .help("Directory the report files are written to")
                        .default_value("./reports"),
                )
                .arg(config_arg())
                .arg(policy_arg())
                .arg(
                    arg!(--"open")
                        .required(false)
                        .help("Open the HTML report in the default browser")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("search")
                .about("Find pages by title, URL or description, strongest ILR first")
                .arg(export_arg())
                .arg(arg!(<QUERY>).help("Case-insensitive search text"))
                .arg(
                    arg!(-l --"limit" <NUM>)
                        .required(false)
                        .help("Maximum number of suggestions")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                )
                .arg(config_arg())
                .arg(policy_arg()),
        )
        .subcommand(
            command!("page")
                .about("Show the score breakdown and recommendations for one page")
                .arg(export_arg())
                .arg(arg!(<URL>).help("Exact page URL as it appears in the export"))
                .arg(
                    arg!(-g --"goal" <GOAL>)
                        .required(false)
                        .help("Primary goal used for the preview score")
                        .value_parser(["conversions", "traffic", "authority", "balanced"])
                        .default_value("balanced"),
                )
                .arg(config_arg())
                .arg(policy_arg()),
        )
        .subcommand(
            command!("clusters")
                .about("List the topic clusters detected in a crawl export")
                .arg(export_arg())
                .arg(config_arg())
                .arg(policy_arg()),
        )
        .subcommand(
            command!("config")
                .about("Print the default analysis configuration as JSON"),
        )
}
