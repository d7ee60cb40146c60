use std::path::Path;
use std::process;

use objax_core::lexer::LexOutput;

use crate::{print_json, read_source, report_error, OutputFormat};

pub(crate) fn cmd_tokens(file: &Path, output: OutputFormat, quiet: bool) {
    let source = read_source(file, output, quiet);
    let lexed = objax_core::tokenize(&source);

    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "tokens": lexed.tokens,
            "errors": lexed.errors,
        })),
        OutputFormat::Text => {
            print!("{}", render_text(&lexed));
            for e in &lexed.errors {
                report_error(&format!("error: {}", e), output, quiet);
            }
        }
    }

    if lexed.has_errors() {
        process::exit(1);
    }
}

fn render_text(lexed: &LexOutput) -> String {
    let mut out = String::new();
    for tok in &lexed.tokens {
        out.push_str(&format!(
            "{}\t{:?}\t{}\n",
            tok.position, tok.kind, tok.image
        ));
    }
    out
}
