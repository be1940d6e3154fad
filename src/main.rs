use cascade_select::Result;
use cascade_select::command::{Command, CommandParser, kind::HELP};
use cascade_select::diagnostics;
use cascade_select::model::{Form, Overrides, ignore_case_match};
use cascade_select::render;
use cascade_select::spec::{Catalog, load_data_file};

use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "cascade-select")]
#[command(about = "Dependent, mutually-filtering selections over a tree of combinations", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// JSON data file: a catalog {"fields": [...], "tree": {...}} or a bare tree.
    #[arg(long)]
    data: String,

    /// Comma-separated field names, root first (overrides the data file).
    #[arg(long, value_delimiter = ',')]
    fields: Option<Vec<String>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every combination as a flat record.
    Expand {
        #[command(flatten)]
        data: DataArgs,

        #[arg(long)]
        json: bool,
    },

    /// Apply selections and print the options left for every field.
    Options {
        #[command(flatten)]
        data: DataArgs,

        /// Selection as field=value; repeatable, applied in order.
        #[arg(short, long = "select")]
        select: Vec<String>,

        /// Match this field case-insensitively; repeatable.
        #[arg(long = "ignore-case")]
        ignore_case: Vec<String>,

        /// Do not auto-select fields left with a single option.
        #[arg(long)]
        no_cascade: bool,

        #[arg(long)]
        json: bool,
    },

    /// Read commands from stdin and print options after each change.
    Interactive {
        #[command(flatten)]
        data: DataArgs,

        #[arg(long = "ignore-case")]
        ignore_case: Vec<String>,

        #[arg(long)]
        no_cascade: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init(cli.verbose);

    match cli.cmd {
        Commands::Expand { data, json } => {
            let form = Form::with_settings(load_catalog(&data)?, Overrides::new(), false)?;
            let out = if json {
                render::render_records_json(form.fields(), form.records())?
            } else {
                render::render_records_text(form.fields(), form.records())
            };
            println!("{}", out.trim_end());
        }
        Commands::Options {
            data,
            select,
            ignore_case,
            no_cascade,
            json,
        } => {
            let parser = CommandParser::new()?;
            let mut form = Form::with_settings(
                load_catalog(&data)?,
                overrides_for(&ignore_case),
                !no_cascade,
            )?;

            let mut auto_selected = form.last_filled().to_vec();
            for assignment in &select {
                let (field, value) = parser.parse_assignment(assignment)?;
                auto_selected.retain(|f| f != &field);
                auto_selected.extend(form.select(&field, &value)?);
            }

            let out = if json {
                render::render_options_json(form.selection(), form.options(), &auto_selected)?
            } else {
                render::render_options_text(form.selection(), form.options(), &auto_selected)
            };
            print!("{}", out);
        }
        Commands::Interactive {
            data,
            ignore_case,
            no_cascade,
        } => {
            let form = Form::with_settings(
                load_catalog(&data)?,
                overrides_for(&ignore_case),
                !no_cascade,
            )?;
            run_session(form, io::stdin().lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}

fn load_catalog(args: &DataArgs) -> Result<Catalog> {
    let fields = args
        .fields
        .as_ref()
        .map(|list| list.iter().map(|f| f.trim().to_string()).collect());
    load_data_file(&args.data)?.validate_and_build(fields)
}

fn overrides_for(ignore_case: &[String]) -> Overrides {
    let mut overrides = Overrides::new();
    for field in ignore_case {
        overrides.insert(field, ignore_case_match);
    }
    overrides
}

/// Line-oriented session. Bad input is reported and the session continues.
fn run_session(mut form: Form, input: impl BufRead, mut out: impl Write) -> Result<()> {
    let parser = CommandParser::new()?;
    let initial = form.last_filled().to_vec();
    write!(
        out,
        "{}",
        render::render_options_text(form.selection(), form.options(), &initial)
    )?;

    for line in input.lines() {
        let line = line?;
        let command = match parser.parse_line(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{:#}", e)?;
                continue;
            }
        };

        let changed = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Command::Records => {
                write!(
                    out,
                    "{}",
                    render::render_records_text(form.fields(), form.records())
                )?;
                continue;
            }
            Command::Show => Ok(Vec::new()),
            Command::Reset => Ok(form.reset()),
            Command::Set { field, value } => form.select(&field, &value),
            Command::Clear { field } => form.clear(&field),
        };

        match changed {
            Ok(filled) => write!(
                out,
                "{}",
                render::render_options_text(form.selection(), form.options(), &filled)
            )?,
            Err(e) => writeln!(out, "{}", diagnostics::error_message(e.to_string()))?,
        }
        out.flush()?;
    }

    Ok(())
}
