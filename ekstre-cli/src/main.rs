use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod convert;

use convert::ConvertError;

// Documented exit codes of the conversion contract. Anything else that goes
// wrong (malformed statement, I/O) exits with EXIT_CONVERSION_FAILED.
const EXIT_IMPORTER_NOT_FOUND: u8 = 1;
const EXIT_EXPORTER_NOT_FOUND: u8 = 2;
const EXIT_CONVERSION_FAILED: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "ekstre", version, about = "Converts Türkiye bank card statements into structured formats")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert statement files through an importer and an exporter
    Convert {
        /// Statement files to convert
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Importer to use (see `ekstre list importers`)
        #[arg(long)]
        importer: String,

        /// Exporter to use
        #[arg(long, default_value = ekstre_export::csv_full::NAME)]
        exporter: String,

        /// Output file; name and extension derive from the input and the
        /// exporter when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List available components
    List {
        #[command(subcommand)]
        command: ListCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ListCommand {
    /// Lists available importers
    Importers,
    /// Lists available exporters
    Exporters,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Convert { inputs, importer, exporter, output } => {
            match convert::convert(&inputs, &importer, &exporter, output).await {
                Ok(path) => {
                    println!("Converted successfully, file at:\n{}", path.display());
                    ExitCode::SUCCESS
                }
                Err(err @ ConvertError::ImporterNotFound(_)) => {
                    eprintln!("error: {err}");
                    ExitCode::from(EXIT_IMPORTER_NOT_FOUND)
                }
                Err(err @ ConvertError::ExporterNotFound(_)) => {
                    eprintln!("error: {err}");
                    ExitCode::from(EXIT_EXPORTER_NOT_FOUND)
                }
                Err(err) => {
                    eprintln!("error: {err}");
                    ExitCode::from(EXIT_CONVERSION_FAILED)
                }
            }
        }

        Command::List { command: ListCommand::Importers } => {
            for importer in ekstre_ingest::list_importers() {
                println!("{} :", importer.name());
                println!("\tSupported Bank = {}", importer.bank_name());
                println!("\tSupported File Formats = {:?}", importer.supported_extensions());
            }
            ExitCode::SUCCESS
        }

        Command::List { command: ListCommand::Exporters } => {
            for exporter in ekstre_export::list_exporters() {
                println!("{} :", exporter.name());
                println!("\tExported File Format = {}", exporter.file_extension());
                println!("\tIs It a Text Based Format = {}\n", exporter.is_text());
            }
            ExitCode::SUCCESS
        }
    }
}
