use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Builder;
use inistore::{serialize, DuplicateSections, IniDocument, IniStore, Section, StoreOptions};
use log::LevelFilter;
use serde::Serialize;
use std::{
    env,
    io::{stdout, Write},
    path::PathBuf,
};

#[derive(Parser, Debug)]
#[clap(name = "inistore", version = "0.1.0", about = "Read and edit INI files")]
pub struct Opts {
    /// ini file to operate on
    pub file: PathBuf,
    /// create the file if it does not exist
    #[clap(long)]
    pub create: bool,
    /// merge repeated section headers instead of resetting the section
    #[clap(long)]
    pub merge_duplicates: bool,
    #[clap(subcommand)]
    pub command: Cmd,
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// List section names
    Sections,
    /// Print an entry, or a whole section when no key is given
    Get {
        section: String,
        key: Option<String>,
        #[clap(short, long, value_enum, default_value_t = Format::Ini)]
        format: Format,
    },
    /// Set an entry, creating the section if needed
    Set {
        section: String,
        key: String,
        value: String,
    },
    /// Remove an entry, or a whole section when no key is given
    Remove { section: String, key: Option<String> },
    /// Print the whole file
    Dump {
        #[clap(short, long, value_enum, default_value_t = Format::Ini)]
        format: Format,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum Format {
    Ini,
    Json,
    Yaml,
}

impl Format {
    fn render<T: Serialize>(self, value: &T, as_ini: impl FnOnce() -> String) -> Result<String> {
        match self {
            Format::Ini => Ok(as_ini()),
            Format::Json => {
                let mut s = serde_json::to_string_pretty(value)?;
                s.push('\n');
                Ok(s)
            }
            Format::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }
}

fn render_section(section: &Section, format: Format) -> Result<String> {
    format.render(section, || {
        let mut doc = IniDocument::new();
        let target = doc.get_or_create_section(section.name());
        for (key, value) in section.iter() {
            target.insert(key, value);
        }
        serialize(&doc)
    })
}

pub fn run(opts: Opts) -> Result<()> {
    let duplicates = if opts.merge_duplicates {
        DuplicateSections::Merge
    } else {
        DuplicateSections::Reset
    };
    let options = StoreOptions::new()
        .create_if_missing(opts.create)
        .duplicate_sections(duplicates);

    let mut store = IniStore::open_with(&opts.file, options)
        .with_context(|| format!("Failed to open {}", opts.file.display()))?;

    let mut out = stdout().lock();
    match opts.command {
        Cmd::Sections => {
            for name in store.sections() {
                writeln!(out, "{name}")?;
            }
        }
        Cmd::Get {
            section,
            key: Some(key),
            ..
        } => {
            writeln!(out, "{}", store.get_entry(&section, &key)?)?;
        }
        Cmd::Get {
            section,
            key: None,
            format,
        } => {
            let empty = Section::new(section.as_str());
            let found = store.get_section(&section).unwrap_or(&empty);
            out.write_all(render_section(found, format)?.as_bytes())?;
        }
        Cmd::Set {
            section,
            key,
            value,
        } => {
            store
                .set_entry(&section, &key, &value)
                .with_context(|| format!("Failed to set [{section}] {key}"))?;
            log::info!("Set [{}] {}={}", section, key, value);
        }
        Cmd::Remove {
            section,
            key: Some(key),
        } => {
            store
                .remove_entry(&section, &key)
                .with_context(|| format!("Failed to remove [{section}] {key}"))?;
        }
        Cmd::Remove { section, key: None } => {
            store
                .remove_section(&section)
                .with_context(|| format!("Failed to remove [{section}]"))?;
        }
        Cmd::Dump { format } => {
            let doc = store.document();
            out.write_all(format.render(doc, || serialize(doc))?.as_bytes())?;
        }
    }

    Ok(())
}

fn init_logger(opts: &Opts) {
    let rust_log = env::var("RUST_LOG").ok();

    let mut builder = Builder::from_default_env();

    if rust_log.is_none() {
        let log_level = match opts.verbose {
            0 if cfg!(debug_assertions) => LevelFilter::Debug,
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        builder.filter_level(log_level);
    }

    #[cfg(not(debug_assertions))]
    {
        builder
            .format_module_path(false)
            .format_target(false)
            .format_timestamp(None);
    }

    builder.init();
}

fn main() {
    let opts = Opts::parse();

    init_logger(&opts);

    if let Err(e) = run(opts) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
