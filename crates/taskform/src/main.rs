//! `taskform` - CLI for the task record store
//!
//! Each invocation loads the data file, applies at most one change through the
//! form controller, and exits.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use taskform::cli::actions::{self, DeleteOutcome, Submitted};
use taskform::cli::output::{self, PasswordPolicy};
use taskform::cli::{
    AddCommand, Cli, Command, ConfigCommand, DeleteCommand, EditCommand, ListCommand,
    OutputFormat, ShowCommand,
};
use taskform::{init_logging, Config, Error, RecordStore};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    let data_file = cli.data_file.clone().unwrap_or_else(|| config.data_file());

    let open_store = || RecordStore::open(&data_file).with_pretty(config.storage.pretty);

    match cli.command {
        Command::List(cmd) => handle_list(&config, &open_store(), &cmd),
        Command::Show(cmd) => handle_show(&config, &open_store(), &cmd),
        Command::Add(cmd) => handle_add(&mut open_store(), &cmd),
        Command::Edit(cmd) => handle_edit(&mut open_store(), &cmd),
        Command::Delete(cmd) => handle_delete(&mut open_store(), &cmd),
        Command::Status(cmd) => handle_status(&open_store(), cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn handle_list(config: &Config, store: &RecordStore, cmd: &ListCommand) -> anyhow::Result<()> {
    let policy = PasswordPolicy::new(&config.display, cmd.show_passwords);
    let records = store.records();

    match cmd.format {
        OutputFormat::Json => println!("{}", output::json(records, policy)?),
        _ if records.is_empty() => println!("No records."),
        OutputFormat::Plain => print!("{}", output::plain(records, policy)),
        OutputFormat::Table => print!("{}", output::table(records, policy)),
    }
    Ok(())
}

fn handle_show(config: &Config, store: &RecordStore, cmd: &ShowCommand) -> anyhow::Result<()> {
    let record = store.get(cmd.id).ok_or_else(|| Error::not_found(cmd.id))?;
    let shown = PasswordPolicy::new(&config.display, cmd.show_passwords).apply(record);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        print!("{}", output::block(&shown));
    }
    Ok(())
}

fn handle_add(store: &mut RecordStore, cmd: &AddCommand) -> anyhow::Result<()> {
    let Submitted { label, record } = actions::add(store, cmd)?;
    match record {
        Some(record) => println!("{label}: created record {}", record.id),
        None => println!("{label}: nothing created"),
    }
    Ok(())
}

fn handle_edit(store: &mut RecordStore, cmd: &EditCommand) -> anyhow::Result<()> {
    let Submitted { label, record } = actions::edit(store, cmd)?;
    match record {
        Some(record) => println!("{label}: updated record {}", record.id),
        None => println!("{label}: record {} no longer exists", cmd.id),
    }
    Ok(())
}

fn handle_delete(store: &mut RecordStore, cmd: &DeleteCommand) -> anyhow::Result<()> {
    match actions::delete(store, cmd)? {
        DeleteOutcome::NeedsConfirmation(record) => {
            println!(
                "This will delete record {} ({} {}).",
                record.id, record.fields.name, record.fields.last_name
            );
            println!("Use --yes to confirm.");
        }
        DeleteOutcome::Deleted(removed) => {
            println!("Deleted {removed} record(s) with id {}.", cmd.id);
        }
    }
    Ok(())
}

fn handle_status(store: &RecordStore, json: bool) -> anyhow::Result<()> {
    let stats = store.stats();

    if json {
        let status = serde_json::json!({
            "data_file": store.path(),
            "file_exists": stats.file_size_bytes.is_some(),
            "file_size_bytes": stats.file_size_bytes,
            "total_records": stats.total_records,
            "oldest_record": stats.oldest_record,
            "newest_record": stats.newest_record,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("taskform status");
        println!("---------------");
        println!("Data file:     {}", store.path().display());
        match stats.file_size_bytes {
            Some(size) => println!("File size:     {size} bytes"),
            None => println!("File size:     (not written yet)"),
        }
        println!("Records:       {}", stats.total_records);
        if let (Some(oldest), Some(newest)) = (stats.oldest_record, stats.newest_record) {
            println!("Oldest:        {}", oldest.format("%Y-%m-%d %H:%M:%S UTC"));
            println!("Newest:        {}", newest.format("%Y-%m-%d %H:%M:%S UTC"));
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data file:          {}", config.data_file().display());
                println!("  Pretty JSON:        {}", config.storage.pretty);
                println!();
                println!("[Display]");
                println!("  Mask passwords:     {}", config.display.mask_passwords);
                println!("  Mask character:     {}", config.display.mask_char);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
