mod alphabet;
mod clipboard;
mod estimate;
mod generator;
mod registry;
mod ui;

use std::path::Path;

use anyhow::{Result, bail};
use clap::{CommandFactory, Parser};

use crate::alphabet::{Alphabet, BaseClass};
use crate::clipboard::ClipboardSink;
use crate::registry::{KeyEntry, Registry};
use crate::ui::Prompt;

const DEFAULT_LENGTH: usize = 12;

#[derive(Parser)]
#[command(
    name = "hpg",
    version,
    about = "Deterministic hash password generator: recover any password from one salt and an identifier"
)]
struct Cli {
    /// Password length
    #[arg(short, long)]
    length: Option<usize>,

    /// Characters to remove from the password alphabet
    #[arg(short, long, value_name = "CHARS", default_value = "")]
    exclude: String,

    /// Extra characters to allow in the password alphabet
    #[arg(short, long, value_name = "CHARS", default_value = "")]
    include: String,

    /// Use only [a-zA-Z0-9]
    #[arg(short, long)]
    alphanumeric: bool,

    /// Use only the characters given with --include
    #[arg(short, long)]
    only_include: bool,

    /// Copy the password to the clipboard instead of printing it
    #[arg(short, long)]
    copy: bool,

    /// Do not offer to store the key
    #[arg(short = 'n', long)]
    no_save: bool,

    /// Show saved keys and exit
    #[arg(short, long)]
    print_keys: bool,

    /// Show saved keys matching any given term and exit
    #[arg(short, long, value_name = "TERM", num_args = 1..)]
    search: Vec<String>,

    /// Key to use as the password base
    identifier: Option<String>,
}

/// Final generation parameters after merging CLI flags with any saved
/// registry entry the user chose to reuse.
struct Settings {
    length: usize,
    alphanumeric: bool,
    include: String,
    exclude: String,
}

impl Settings {
    fn to_entry(&self, name: &str) -> KeyEntry {
        KeyEntry {
            name: name.to_string(),
            length: self.length,
            alphanumeric: self.alphanumeric.then_some(true),
            include: (!self.include.is_empty()).then(|| self.include.clone()),
            exclude: (!self.exclude.is_empty()).then(|| self.exclude.clone()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_keys {
        let registry = Registry::load(&registry::default_path()?)?;
        print_entries(registry.entries().iter());
        return Ok(());
    }

    if !cli.search.is_empty() {
        let registry = Registry::load(&registry::default_path()?)?;
        print_entries(registry.search(&cli.search).into_iter());
        return Ok(());
    }

    let Some(identifier) = cli.identifier.clone() else {
        let mut command = Cli::command();
        command.print_help()?;
        return Ok(());
    };

    let keys_path = registry::default_path()?;
    let mut registry = Registry::load(&keys_path)?;
    run(&cli, &identifier, &mut registry, &keys_path, &mut ui::Terminal)
}

/// One generation pass: merge settings, build the alphabet, read the
/// salt, derive, hand off the result, and offer to store the key.
fn run(
    cli: &Cli,
    identifier: &str,
    registry: &mut Registry,
    keys_path: &Path,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    let saved = registry.lookup(identifier).cloned();
    let settings = resolve_settings(cli, saved.as_ref(), prompt)?;

    if settings.length == 0 {
        bail!("Password length must be at least 1");
    }

    let base = if cli.only_include {
        BaseClass::IncludeOnly
    } else if settings.alphanumeric {
        BaseClass::Alphanumeric
    } else {
        BaseClass::Printable
    };
    let alphabet = Alphabet::build(base, &settings.include, &settings.exclude)?;

    // Acquired before the salt prompt so a missing clipboard never
    // costs the user a secret entry.
    let mut sink = if cli.copy {
        Some(ClipboardSink::new()?)
    } else {
        None
    };

    let salt = prompt.read_secret("Salt")?;
    let password = generator::derive(
        identifier.as_bytes(),
        salt.as_bytes(),
        settings.length,
        &alphabet,
    )?;

    match sink.as_mut() {
        Some(sink) => {
            sink.copy(&password)?;
            println!("Password copied to clipboard.");
        }
        None => println!("{}", &*password),
    }

    println!("Estimated crack time: {}", estimate::estimate(&password));

    if !cli.no_save {
        let entry = settings.to_entry(identifier);
        if saved.as_ref() != Some(&entry) && prompt.confirm("Store this key?")? {
            registry.upsert(entry);
            registry.store(keys_path)?;
        }
    }

    Ok(())
}

/// Merge CLI flags with a saved entry. Explicit flags always win; the
/// saved entry only fills in what the user did not pass, and only after
/// they confirm they want it.
fn resolve_settings(
    cli: &Cli,
    saved: Option<&KeyEntry>,
    prompt: &mut dyn Prompt,
) -> Result<Settings> {
    let mut length = cli.length;
    let mut alphanumeric = cli.alphanumeric;
    let mut include = cli.include.clone();
    let mut exclude = cli.exclude.clone();

    if let Some(entry) = saved {
        let question = format!("Use saved settings for \"{}\"?", entry.name);
        if prompt.confirm(&question)? {
            if length.is_none() {
                length = Some(entry.length);
            }
            if !alphanumeric {
                alphanumeric = entry.alphanumeric.unwrap_or(false);
            }
            if include.is_empty() {
                if let Some(saved_include) = &entry.include {
                    include = saved_include.clone();
                }
            }
            if exclude.is_empty() {
                if let Some(saved_exclude) = &entry.exclude {
                    exclude = saved_exclude.clone();
                }
            }
        }
    }

    Ok(Settings {
        length: length.unwrap_or(DEFAULT_LENGTH),
        alphanumeric,
        include,
        exclude,
    })
}

fn print_entries<'a>(entries: impl Iterator<Item = &'a KeyEntry>) {
    for entry in entries {
        let mut line = format!("{} (length {}", entry.name, entry.length);
        if entry.alphanumeric == Some(true) {
            line.push_str(", alphanumeric");
        }
        if let Some(include) = &entry.include {
            line.push_str(&format!(", include: {include}"));
        }
        if let Some(exclude) = &entry.exclude {
            line.push_str(&format!(", exclude: {exclude}"));
        }
        line.push(')');
        println!("{line}");
    }
}
