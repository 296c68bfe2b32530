use clap::{Parser, Subcommand};
use entries::EntryParser;
use patientor_core::{NewPatient, SeedData};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "patientor")]
#[command(about = "Patientor record validation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an entry JSON document
    CheckEntry {
        /// Path to the JSON document, or `-` for stdin
        input: PathBuf,
    },
    /// Validate a new-patient JSON document
    CheckPatient {
        /// Path to the JSON document, or `-` for stdin
        input: PathBuf,
    },
    /// List the diagnosis catalog of a seed file
    Diagnoses {
        /// Path to the seed file
        seed_file: PathBuf,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::CheckEntry { input }) => {
            let text = read_input(&input)?;
            match EntryParser::parse_str(&text) {
                Ok(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
                Err(e) => {
                    eprintln!("Entry rejected: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Some(Commands::CheckPatient { input }) => {
            let text = read_input(&input)?;
            let candidate: serde_json::Value = serde_json::from_str(&text)?;
            match NewPatient::parse(&candidate) {
                Ok(patient) => println!("{}", serde_json::to_string_pretty(&patient)?),
                Err(e) => {
                    eprintln!("Patient rejected: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Some(Commands::Diagnoses { seed_file }) => {
            let seed = SeedData::load(&seed_file)?;
            if seed.diagnoses.is_empty() {
                println!("No diagnoses found.");
            }
            for diagnosis in seed.diagnoses {
                match diagnosis.latin {
                    Some(latin) => println!("{}\t{} ({})", diagnosis.code, diagnosis.name, latin),
                    None => println!("{}\t{}", diagnosis.code, diagnosis.name),
                }
            }
        }
        None => {
            println!("Use 'patientor --help' for commands");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Read a whole document from `path`, where `-` means stdin.
fn read_input(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
}
