use std::path::Path;
use std::process;

use objax_core::ExecuteOptions;

use crate::{print_json, read_source, OutputFormat};

pub(crate) fn cmd_check(file: &Path, max_errors: Option<usize>, output: OutputFormat, quiet: bool) {
    let source = read_source(file, output, quiet);
    let options = ExecuteOptions { max_errors };

    match objax_core::analyze(&source, &options) {
        Ok(program) => match output {
            OutputFormat::Json => print_json(&serde_json::json!([])),
            OutputFormat::Text => {
                if !quiet {
                    println!(
                        "ok: {} ({} class{})",
                        file.display(),
                        program.classes.len(),
                        if program.classes.len() == 1 { "" } else { "es" }
                    );
                }
            }
        },
        Err(errors) => {
            match output {
                OutputFormat::Json => {
                    let diagnostics: Vec<_> = errors.iter().map(|e| e.to_json_value()).collect();
                    print_json(&diagnostics);
                }
                OutputFormat::Text => {
                    if !quiet {
                        for e in &errors {
                            eprintln!("{}: {}", file.display(), e);
                        }
                    }
                }
            }
            process::exit(1);
        }
    }
}
