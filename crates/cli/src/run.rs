use std::path::Path;
use std::process;

use objax_core::{ExecuteOptions, ExecutionResult};

use crate::{print_json, read_source, report_error, OutputFormat};

pub(crate) fn cmd_run(file: &Path, max_errors: Option<usize>, output: OutputFormat, quiet: bool) {
    let source = read_source(file, output, quiet);
    let result = objax_core::execute_with(&source, &ExecuteOptions { max_errors });

    match output {
        // The result object is well formed either way; errors are part of it.
        OutputFormat::Json => print_json(&result),
        OutputFormat::Text => {
            if result.is_ok() {
                print!("{}", render_text(&result));
            } else {
                for e in &result.errors {
                    report_error(&format!("error: {}", e), output, quiet);
                }
            }
        }
    }

    if !result.is_ok() {
        process::exit(1);
    }
}

fn render_text(result: &ExecutionResult) -> String {
    let mut out = String::new();
    for class in &result.classes {
        out.push_str(&format!("class {}\n", class.name));
        for name in class.field_names() {
            out.push_str(&format!("  field {}\n", name));
        }
    }
    out
}
