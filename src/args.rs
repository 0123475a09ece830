use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the `scriptlet` binary.
#[derive(Parser, Debug)]
#[command(
    name = "scriptlet",
    version,
    about = "Lower resolved type declarations to prototype-based runtime code"
)]
pub struct CliArgs {
    /// Batch JSON file. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Write output to this file instead of stdout.
    #[arg(short = 'o', long = "outFile", alias = "out-file")]
    pub out_file: Option<PathBuf>,

    /// Print the whole result (script, orders, diagnostics) as JSON.
    #[arg(long)]
    pub json: bool,

    /// Omit the `// Name` comment before each type.
    #[arg(long = "noBanners", alias = "no-banners")]
    pub no_banners: bool,

    /// Object global-methods holders attach to (overrides the batch options).
    #[arg(long = "globalObject", alias = "global-object")]
    pub global_object: Option<String>,
}

impl CliArgs {
    /// Whether the batch is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input
            .as_deref()
            .is_none_or(|path| path.as_os_str() == "-")
    }
}
