//! Options parsing and handling.

use crate::argparse::{parse_args, Arg, ArgRef};
use crate::tokenizer::{ColumnMode, TrailingToken};
use itertools::Itertools;
use lazy_static::lazy_static;
use log::warn;
use serde::Deserialize;
use std::ffi::{OsStr, OsString};
use std::io::IsTerminal;
use std::iter::Peekable;
use std::path::PathBuf;
use termcolor::ColorChoice;

/// Exit status for invalid command lines.
pub const USAGE_STATUS: i32 = 2;

/// Parsed options.
#[derive(Clone, Debug)]
pub struct Options {
    /// File or directory to search.
    pub path: PathBuf,
    /// Query string.
    pub query: String,

    /// How many directory levels to search below `path`.
    pub depth: usize,
    /// Column numbering.
    pub columns: ColumnMode,
    /// Handling of a final token without trailing whitespace.
    pub trailing: TrailingToken,
    /// Maximum length of a matched token or path, None for unlimited.
    pub max_length: Option<usize>,
    /// Initial capacity of the result store.
    pub initial_capacity: usize,
    /// Visit directory entries in file name order.
    pub sort: bool,

    /// Print JSON lines instead of text.
    pub json: bool,
    /// Use colors in the output.
    pub color: ColorChoice,
}

#[derive(Clone, Debug)]
enum OptionCommand {
    Json,
    Color(bool),
    Depth(usize),
    LineColumns,
    MaxLength(usize),
    DropTrailing,
    Sort,
    PrintOptionsAndQuit,
}

#[derive(Clone, Debug, Deserialize)]
struct Defaults {
    max_length: usize,
    initial_capacity: usize,
    depth: usize,
}

const BUILTIN_DEFAULTS: &str = include_str!("../defaults.json");

lazy_static! {
    static ref DEFAULTS: Defaults = serde_json::from_str(BUILTIN_DEFAULTS).unwrap_or_else(|e| {
        warn!("Built-in JSON defaults have a syntax error: {}", e);
        Defaults {
            max_length: 1024,
            initial_capacity: 10,
            depth: 1,
        }
    });
}

fn limit(max_length: usize) -> Option<usize> {
    if max_length == 0 {
        None
    } else {
        Some(max_length)
    }
}

impl Default for Options {
    fn default() -> Options {
        Options {
            path: PathBuf::new(),
            query: "".to_string(),

            depth: DEFAULTS.depth,
            columns: ColumnMode::File,
            trailing: TrailingToken::Accept,
            max_length: limit(DEFAULTS.max_length),
            initial_capacity: DEFAULTS.initial_capacity,
            sort: false,

            json: false,
            color: if std::io::stdout().is_terminal() {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            },
        }
    }
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "lexfind".to_string())
}

fn print_help(long: bool, status: i32) -> ! {
    let filename = program_name();
    let text = if !long {
        format!(
            "Usage: {} [OPTION]... PATH QUERY [OPTION]...
Pass --help for more information.",
            filename
        )
    } else {
        format!(
            r#"Usage: {} [OPTION]... PATH QUERY [OPTION]...
Search for whitespace-delimited tokens equal to QUERY in PATH. If PATH is a
directory, the files directly inside it are searched.

The argument after PATH is always QUERY, even if it starts with '-'. Use
'-- PATH QUERY' when PATH itself starts with '-'.

Options:
  -h, --help                 Display this message
  -j, --json                 Print matches as JSON lines
  --[no-]color               Force or disable colored output

  -d, --depth N              Search N directory levels below PATH (default {})
  -l, --line-columns         Count columns from the start of the line
                             instead of the start of the file
  --max-len N                Maximum length of a token or path (default {},
                             0 for unlimited)
  --drop-trailing            Ignore a final token with no whitespace after it
  --sort                     Search directory entries in file name order

  --options                  Print the options that would have been used
"#,
            filename, DEFAULTS.depth, DEFAULTS.max_length
        )
    };
    if status == 0 {
        println!("{}", text);
    } else {
        eprintln!("{}", text);
    }
    std::process::exit(status)
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    print_help(false, USAGE_STATUS)
}

fn print_options(options: &Options) -> ! {
    let settings = [
        ("Path", options.path.display().to_string()),
        ("Query", format!("{:?}", options.query)),
        ("Depth", options.depth.to_string()),
        ("Columns", format!("{:?}", options.columns)),
        ("Trailing token", format!("{:?}", options.trailing)),
        (
            "Maximum length",
            options
                .max_length
                .map_or_else(|| "unlimited".to_string(), |m| m.to_string()),
        ),
        ("Sorted", options.sort.to_string()),
        ("Output", if options.json { "json" } else { "text" }.to_string()),
    ];
    println!(
        "Using following search options:\n{}",
        settings
            .iter()
            .map(|(name, value)| format!("- {}: {}", name, value))
            .join("\n")
    );

    std::process::exit(0);
}

fn get_whole_arg<I: Iterator<Item = Arg>>(iter: &mut Peekable<I>) -> Option<OsString> {
    let arg = iter.next()?;
    let index = arg.index();
    while iter.peek().map(|a| a.index()) == Some(index) {
        iter.next();
    }
    Some(arg.entire_match())
}

/// Get the value for a flag: `--flag=VALUE`, `-fVALUE` or `--flag VALUE`.
fn get_value<I: Iterator<Item = Arg>>(arg: &Arg, iter: &mut Peekable<I>) -> Option<String> {
    if let Some(value) = arg.inline_value() {
        return Some(value.to_string());
    }
    if let Arg::Short(_, _, index) = arg {
        let mut rest = String::new();
        while let Some(&Arg::Short(c, _, i)) = iter.peek() {
            if i != *index {
                break;
            }
            rest.push(c);
            iter.next();
        }
        if !rest.is_empty() {
            return Some(rest);
        }
    }
    get_whole_arg(iter).map(|s| s.to_string_lossy().to_string())
}

fn get_number<I: Iterator<Item = Arg>>(arg: &Arg, iter: &mut Peekable<I>, flag: &str) -> usize {
    match get_value(arg, iter) {
        Some(value) => value
            .parse()
            .unwrap_or_else(|_| usage_error(&format!("Invalid number for {}: {}", flag, value))),
        None => usage_error(&format!("Missing argument for {}", flag)),
    }
}

fn parse_options<S: AsRef<OsStr>>(args: &[S]) -> (Vec<OptionCommand>, Vec<OsString>) {
    let mut opts = Vec::new();
    let mut positionals = Vec::new();
    let parsed = parse_args(args.get(1..).unwrap_or_default());
    let mut arg_iter = parsed.into_iter().peekable();

    while let Some(arg) = arg_iter.next() {
        // QUERY directly follows PATH, and may look like a flag (eg. "---").
        if positionals.len() == 1 && !matches!(arg, Arg::Positional(..)) {
            let index = arg.index();
            while arg_iter.peek().map(|a| a.index()) == Some(index) {
                arg_iter.next();
            }
            positionals.push(arg.entire_match());
            continue;
        }
        let cmd = match arg.as_ref() {
            ArgRef::Short('h') => print_help(false, 0),
            ArgRef::Long("help") => print_help(true, 0),

            ArgRef::Short('j') | ArgRef::Long("json") => OptionCommand::Json,
            ArgRef::Long("color") => OptionCommand::Color(true),
            ArgRef::Long("no-color") => OptionCommand::Color(false),

            ArgRef::Short('d') | ArgRef::Long("depth") => {
                OptionCommand::Depth(get_number(&arg, &mut arg_iter, "--depth"))
            }
            ArgRef::Short('l') | ArgRef::Long("line-columns") => OptionCommand::LineColumns,
            ArgRef::Long("max-len") => {
                OptionCommand::MaxLength(get_number(&arg, &mut arg_iter, "--max-len"))
            }
            ArgRef::Long("drop-trailing") => OptionCommand::DropTrailing,
            ArgRef::Long("sort") => OptionCommand::Sort,

            ArgRef::Long("options") => OptionCommand::PrintOptionsAndQuit,

            ArgRef::Positional => {
                positionals.push(arg.entire_match());
                continue;
            }

            ArgRef::Short(s) => usage_error(&format!("Unknown flag: -{}", s)),
            ArgRef::Long(s) => usage_error(&format!("Unknown flag: --{}", s)),
        };
        opts.push(cmd);
    }

    (opts, positionals)
}

impl Options {
    /// Parse options from `args`. Prints a usage message and exits on invalid arguments.
    ///
    /// ```
    /// use lexfind::options::Options;
    /// let options = Options::new(&["lexfind", "src", "query"]);
    /// assert_eq!(options.query, "query");
    /// assert_eq!(options.path.to_str(), Some("src"));
    /// assert_eq!(options.depth, 1);
    /// assert_eq!(options.json, false);
    /// ```
    pub fn new<S: AsRef<OsStr>>(args: &[S]) -> Options {
        let (cmds, positionals) = parse_options(args);
        let print_and_quit = cmds
            .iter()
            .any(|c| matches!(c, OptionCommand::PrintOptionsAndQuit));

        if !print_and_quit {
            match positionals.len() {
                0 => usage_error("Missing required arguments: PATH QUERY\n"),
                1 => usage_error("Missing required argument: QUERY\n"),
                2 => {}
                n => warn!("Ignoring {} extra arguments", n - 2),
            }
        }

        let mut positionals = positionals.into_iter();
        let mut opts = Options {
            path: positionals.next().map(PathBuf::from).unwrap_or_default(),
            query: positionals
                .next()
                .map(|q| q.to_string_lossy().to_string())
                .unwrap_or_default(),
            ..Options::default()
        };

        for cmd in cmds {
            match cmd {
                OptionCommand::Json => opts.json = true,
                OptionCommand::Color(true) => opts.color = ColorChoice::Always,
                OptionCommand::Color(false) => opts.color = ColorChoice::Never,
                OptionCommand::Depth(depth) => opts.depth = depth,
                OptionCommand::LineColumns => opts.columns = ColumnMode::Line,
                OptionCommand::MaxLength(max) => opts.max_length = limit(max),
                OptionCommand::DropTrailing => opts.trailing = TrailingToken::Drop,
                OptionCommand::Sort => opts.sort = true,
                OptionCommand::PrintOptionsAndQuit => {}
            }
        }

        if print_and_quit {
            print_options(&opts);
        }

        opts
    }
}
