//! Usage text for argument errors
//!
//! clap's own error output is replaced by a short `Invalid Arguments.` notice
//! and the usage line of the subcommand the user was attempting.

use std::ffi::OsString;
use std::path::PathBuf;

pub const INVALID_ARGUMENTS: &str = "Invalid Arguments.";

/// Subcommand names paired with their argument synopsis
pub const SUBCOMMANDS: [(&str, &str); 5] = [
    ("generatekey", "<key output file>"),
    (
        "encryptfile",
        "<file to encrypt> <secret key file> <encrypted output file>",
    ),
    (
        "decryptfile",
        "<file to decrypt> <secret key file> <decrypted output file>",
    ),
    (
        "encryptkey",
        "<key to encrypt> <public key to encrypt with> <encrypted key file>",
    ),
    (
        "decryptkey",
        "<key to decrypt> <private key to decrypt with> <decrypted key file>",
    ),
];

/// Usage line for one subcommand, if it exists
pub fn usage_line(subcommand: &str) -> Option<String> {
    SUBCOMMANDS
        .iter()
        .find(|(name, _)| *name == subcommand)
        .map(|(name, synopsis)| format!("cryptr {} {}", name, synopsis))
}

/// Usage text listing every subcommand
pub fn full_usage() -> String {
    let mut text = String::from("Usage:");
    for (name, synopsis) in SUBCOMMANDS {
        text.push_str(&format!("\n  cryptr {} {}", name, synopsis));
    }
    text
}

/// Message printed for a malformed invocation
pub fn invalid_arguments_message(subcommand: Option<&str>) -> String {
    match subcommand.and_then(usage_line) {
        Some(line) => format!("{}\nUsage: {}", INVALID_ARGUMENTS, line),
        None => format!("{}\n{}", INVALID_ARGUMENTS, full_usage()),
    }
}

pub fn print_invalid_arguments(subcommand: Option<&str>) {
    println!("{}", invalid_arguments_message(subcommand));
}

/// The known subcommand named on the command line, if any
///
/// Used after a parse failure, when clap has not produced a `Cli`.
pub fn attempted_subcommand(args: &[OsString]) -> Option<&'static str> {
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        let arg = arg.to_string_lossy();
        if arg == "--config" {
            rest.next();
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return SUBCOMMANDS
            .iter()
            .map(|(name, _)| *name)
            .find(|name| *name == arg);
    }
    None
}

/// Value of `--config` on the command line, read without clap
pub fn config_override(args: &[OsString]) -> Option<PathBuf> {
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if arg == "--config" {
            return rest.next().map(PathBuf::from);
        }
        if let Some(value) = arg.to_str().and_then(|a| a.strip_prefix("--config=")) {
            return Some(PathBuf::from(value));
        }
    }
    None
}
