//! Argument parsing.

use std::ffi::{OsStr, OsString};

/// A single command-line argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// (parsed_char, entire_arg, index)
    Short(char, OsString, usize),
    /// (name, value after '=', entire_arg, index)
    Long(String, Option<String>, OsString, usize),
    /// (positional_arg, index)
    Positional(OsString, usize),
}

/// A reference to [`Arg`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArgRef<'a> {
    /// A single matched char.
    Short(char),
    /// A long option.
    Long(&'a str),
    /// Positional argument.
    Positional,
}

impl Arg {
    /// Convert into a [`ArgRef`].
    pub fn as_ref(&self) -> ArgRef<'_> {
        match self {
            Arg::Short(c, _, _) => ArgRef::Short(*c),
            Arg::Long(s, _, _, _) => ArgRef::Long(s),
            Arg::Positional(_, _) => ArgRef::Positional,
        }
    }

    /// Get the entire argument (eg. --foo).
    pub fn entire_match(self) -> OsString {
        match self {
            Arg::Short(_, s, _) | Arg::Long(_, _, s, _) | Arg::Positional(s, _) => s,
        }
    }

    /// Value given inline with `--name=value`.
    pub fn inline_value(&self) -> Option<&str> {
        match self {
            Arg::Long(_, Some(value), _, _) => Some(value),
            _ => None,
        }
    }

    /// Get the index of this argument.
    pub fn index(&self) -> usize {
        match self {
            Arg::Short(_, _, i) | Arg::Long(_, _, _, i) | Arg::Positional(_, i) => *i,
        }
    }
}

/// Parse arguments from `args`. `args` should not contain the program name.
pub fn parse_args<S: AsRef<OsStr>>(args: &[S]) -> Vec<Arg> {
    let mut result = Vec::new();
    let mut iter = args.iter().map(|s| s.as_ref()).enumerate();

    for (index, s) in iter.by_ref() {
        let index = index + 1;
        let lossy = s.to_string_lossy();
        if lossy == "-" {
            result.push(Arg::Positional(s.to_os_string(), index));
        } else if lossy == "--" {
            // The rest of parameters are positionals
            break;
        } else if let Some(long) = lossy.strip_prefix("--") {
            let (name, value) = match long.split_once('=') {
                Some((name, value)) => (name.to_string(), Some(value.to_string())),
                None => (long.to_string(), None),
            };
            result.push(Arg::Long(name, value, s.to_os_string(), index));
        } else if let Some(shorts) = lossy.strip_prefix('-') {
            for c in shorts.chars() {
                result.push(Arg::Short(c, s.to_os_string(), index));
            }
        } else {
            result.push(Arg::Positional(s.to_os_string(), index));
        }
    }

    for (index, s) in iter {
        result.push(Arg::Positional(s.to_os_string(), index + 1));
    }

    result
}
