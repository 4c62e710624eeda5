//! CLI front-end (§6.2): `schematron validate <xml...> <schema> [--phase P]
//! [--svrl-out PATH] [-v]`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "schematron", author, version, about = "ISO Schematron validator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate one or more XML documents against a Schematron schema.
    Validate(ValidateArgs),
}

#[derive(clap::Args)]
struct ValidateArgs {
    /// One or more XML documents, followed by the Schematron schema file.
    #[arg(required = true, num_args = 2..)]
    inputs: Vec<PathBuf>,

    /// Phase to activate; defaults to the schema's `defaultPhase` ('#DEFAULT').
    #[arg(short = 'p', long = "phase")]
    phase: Option<String>,

    /// Write one SVRL report per document. For N documents, writes
    /// `PATH.stem + "_" + <xml stem> + PATH.suffix`.
    #[arg(long = "svrl-out")]
    svrl_out: Option<PathBuf>,

    /// Raise the tracing filter level; repeat for more detail.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Command::Validate(args) = cli.command;
    install_tracing(args.verbose);

    match run_validate(args) {
        Ok(all_valid) => {
            if all_valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn install_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_validate(args: ValidateArgs) -> anyhow::Result<bool> {
    let (xml_paths, schema_path) = split_inputs(args.inputs)?;

    let validator = schematron::Factory::new()
        .set_schema(schema_path.as_path())
        .set_phase(args.phase)
        .build()?;

    let mut all_valid = true;
    for xml_path in &xml_paths {
        let result = validator.validate(xml_path.as_path())?;
        let valid = result.is_valid();
        all_valid &= valid;
        println!("{} {}", xml_path.display(), if valid { "VALID" } else { "INVALID" });

        if let Some(svrl_out) = &args.svrl_out {
            let out_path = svrl_output_path(svrl_out, xml_path, xml_paths.len() > 1);
            std::fs::write(&out_path, result.get_svrl_xml())?;
        }
    }

    Ok(all_valid)
}

fn split_inputs(mut inputs: Vec<PathBuf>) -> anyhow::Result<(Vec<PathBuf>, PathBuf)> {
    let schema_path = inputs.pop().expect("clap enforces at least 2 inputs");
    Ok((inputs, schema_path))
}

/// For a single document, writes straight to `svrl_out`. For multiple
/// documents, inserts the XML file's stem between `svrl_out`'s stem and
/// extension, per §6.2.
fn svrl_output_path(svrl_out: &Path, xml_path: &Path, multiple: bool) -> PathBuf {
    if !multiple {
        return svrl_out.to_path_buf();
    }
    let stem = svrl_out.file_stem().and_then(|s| s.to_str()).unwrap_or("svrl");
    let suffix = svrl_out.extension().and_then(|s| s.to_str()).map(|s| format!(".{s}")).unwrap_or_default();
    let xml_stem = xml_path.file_stem().and_then(|s| s.to_str()).unwrap_or("doc");
    svrl_out.with_file_name(format!("{stem}_{xml_stem}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_document_writes_straight_to_svrl_out() {
        let path = svrl_output_path(Path::new("out.svrl"), Path::new("doc.xml"), false);
        assert_eq!(path, PathBuf::from("out.svrl"));
    }

    #[test]
    fn multiple_documents_insert_xml_stem() {
        let path = svrl_output_path(Path::new("out.svrl"), Path::new("doc.xml"), true);
        assert_eq!(path, PathBuf::from("out_doc.svrl"));
    }
}
