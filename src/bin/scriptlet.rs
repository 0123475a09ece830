#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;

use scriptlet::args::CliArgs;
use scriptlet::batch_json::{compile, parse_request};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS: i32 = 1;

fn main() -> Result<()> {
    // Initialize tracing if SCRIPTLET_LOG or RUST_LOG is set.
    scriptlet::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let input = read_input(&args)?;

    let mut request = parse_request(&input)?;
    if args.no_banners {
        request.options.emit_type_banners = false;
    }
    if let Some(global_object) = &args.global_object {
        request.options.global_object.clone_from(global_object);
    }

    let compiled = compile(request);
    for diagnostic in &compiled.diagnostics {
        eprintln!("{diagnostic}");
    }

    let output = if args.json {
        serde_json::to_string_pretty(&compiled).context("failed to serialize result")?
    } else {
        compiled.text.clone()
    };
    match &args.out_file {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{output}"),
    }

    std::process::exit(if compiled.has_errors() {
        EXIT_DIAGNOSTICS
    } else {
        EXIT_SUCCESS
    });
}

fn read_input(args: &CliArgs) -> Result<String> {
    match &args.input {
        Some(path) if !args.reads_stdin() => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}
