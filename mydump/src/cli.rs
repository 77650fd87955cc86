// mydump/src/cli.rs
//
// Single source of truth for the CLI definition (Clap struct).

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use mydump_core::application::RunFlags;
use mydump_core::domain::options::{
    DEFAULT_ADDRESS, DEFAULT_NAME, DEFAULT_PASSWORD, DEFAULT_USERNAME,
};
use mydump_core::infrastructure::adapters::mysqldump::DEFAULT_PROGRAM;

#[derive(Parser, Debug)]
#[command(name = "mydump")]
#[command(about = "🐬 Logical MySQL backup (schema + data) through mysqldump", long_about = None)]
#[command(version, disable_help_flag = true)]
pub struct Cli {
    /// Yaml config with connection parameters. Overrides flag arguments. Optional
    #[arg(long)]
    pub connection: Option<PathBuf>,

    /// Dump name, used as the output file prefix
    #[arg(long, default_value = DEFAULT_NAME)]
    pub name: String,

    /// Database address host:port
    #[arg(long, default_value = DEFAULT_ADDRESS)]
    pub addr: String,

    /// Database username
    #[arg(long, default_value = DEFAULT_USERNAME)]
    pub user: String,

    /// Database password
    #[arg(
        long,
        env = "MYDUMP_PASS",
        hide_env_values = true,
        allow_hyphen_values = true,
        default_value = DEFAULT_PASSWORD
    )]
    pub pass: String,

    /// Database name(s), comma separated. Required unless set in the connection file
    #[arg(long, default_value = "")]
    pub dbname: String,

    /// File of ignored tables, one name or regex per line. Optional
    #[arg(long)]
    pub ignore: Option<PathBuf>,

    /// File of structure-only tables (no rows), one name or regex per line. Optional
    #[arg(long = "structOnly", alias = "struct-only")]
    pub struct_only: Option<PathBuf>,

    /// Dump output dir. Default is current working directory
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// mysqldump binary to run
    #[arg(long, env = "MYDUMP_MYSQLDUMP", default_value = DEFAULT_PROGRAM)]
    pub mysqldump: String,
}

impl Cli {
    pub fn into_flags(self) -> RunFlags {
        RunFlags {
            connection: self.connection,
            name: self.name,
            addr: self.addr,
            user: self.user,
            pass: self.pass,
            dbname: self.dbname,
            ignore: self.ignore,
            struct_only: self.struct_only,
            output: self.output,
        }
    }
}

/// One command-line argument after the program name.
struct ScannedArg {
    text: String,
    /// Consumed as the value of the preceding `-flag value`.
    is_value: bool,
}

/// Long flags (and aliases) the CLI knows, with whether each takes a value.
fn long_flags() -> Vec<(String, bool)> {
    let mut command = Cli::command();
    command.build();
    command
        .get_arguments()
        .flat_map(|arg| {
            let takes_value = arg.get_action().takes_values();
            arg.get_long()
                .into_iter()
                .chain(arg.get_all_aliases().unwrap_or_default())
                .map(move |name| (name.to_string(), takes_value))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Rewrites known single-dash long flags to `--flag` and marks the argument
/// following a value-taking `-flag value` as a value, whatever it looks like.
fn scan_args(args: Vec<String>) -> Vec<ScannedArg> {
    let flags = long_flags();
    let mut scanned = Vec::with_capacity(args.len());
    let mut value_next = false;

    for arg in args.into_iter().skip(1) {
        if value_next {
            value_next = false;
            scanned.push(ScannedArg {
                text: arg,
                is_value: true,
            });
            continue;
        }

        let body = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'));
        let known = body.and_then(|body| {
            let (name, inline) = match body.split_once('=') {
                Some((name, _)) => (name, true),
                None => (body, false),
            };
            flags
                .iter()
                .find(|(long, _)| long == name)
                .map(|(_, takes_value)| *takes_value && !inline)
        });

        let text = match known {
            Some(expects_value) => {
                value_next = expects_value;
                if arg.starts_with("--") {
                    arg
                } else {
                    format!("-{}", arg)
                }
            }
            None => arg,
        };
        scanned.push(ScannedArg {
            text,
            is_value: false,
        });
    }
    scanned
}

/// No arguments at all, or an explicit help request outside a flag value.
pub fn wants_usage(args: &[String]) -> bool {
    args.len() <= 1
        || scan_args(args.to_vec())
            .iter()
            .any(|a| !a.is_value && matches!(a.text.as_str(), "--help" | "-help" | "-h"))
}

/// Rewrites Go-style `-flag` / `-flag=value` into `--flag` / `--flag=value`
/// for every long flag (or alias) the CLI knows. Anything else is left alone.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let program = args.first().cloned();
    program
        .into_iter()
        .chain(scan_args(args).into_iter().map(|a| a.text))
        .collect()
}
