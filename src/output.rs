use crate::cli::OutputFormat;
use ledger_bindings::error::get_error_info;
use ledger_bindings::BindingError;
use serde_json::json;

fn timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn emit_output(output: OutputFormat, command: &str, ok: bool, payload: serde_json::Value) {
    match output {
        OutputFormat::Text => payload
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| println!("{payload}"), |msg| println!("{msg}")),
        OutputFormat::Json => println!(
            "{}",
            json!({
                "command": command,
                "ok": ok,
                "t": timestamp_millis(),
                "payload": payload,
            })
        ),
    }
}

pub fn emit_error(output: OutputFormat, command: &str, error: &BindingError) {
    let fix = get_error_info(error.code()).map(|(_, fix)| fix);
    match output {
        OutputFormat::Text => {
            eprintln!("error[{}]: {error}", error.code());
            if let Some(fix) = fix {
                eprintln!("  fix: {fix}");
            }
        }
        OutputFormat::Json => println!(
            "{}",
            json!({
                "command": command,
                "ok": false,
                "t": timestamp_millis(),
                "error": {
                    "code": error.code(),
                    "message": error.to_string(),
                    "fix": fix,
                },
            })
        ),
    }
}

