mod cli;
mod config;
mod output;

use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use ledger_bindings::error::get_error_info;
use ledger_bindings::{BindingError, CompanionManifest, Identifier, Result};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Outcome {
    ok: bool,
    exit_code: i32,
    payload: serde_json::Value,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let rendered = err.render().to_string();
            let err = BindingError::UsageError(
                rendered.trim_start_matches("error: ").trim_end().to_string(),
            );
            output::emit_error(OutputFormat::Text, "companion-check", &err);
            std::process::exit(err.exit_code());
        }
    };
    let command = command_name(&cli.command);

    let config = match config::load_config(cli.config.clone()) {
        Ok(config) => config,
        Err(err) => {
            let format = cli.output.unwrap_or(OutputFormat::Json);
            output::emit_error(format, command, &err);
            std::process::exit(err.exit_code());
        }
    };
    let format = cli.output.or(config.output).unwrap_or(OutputFormat::Json);

    match run(cli.command, &config) {
        Ok(outcome) => {
            output::emit_output(format, command, outcome.ok, outcome.payload);
            std::process::exit(outcome.exit_code);
        }
        Err(err) => {
            output::emit_error(format, command, &err);
            std::process::exit(err.exit_code());
        }
    }
}

const fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Validate { .. } => "validate",
        Commands::Choices { .. } => "choices",
        Commands::Explain { .. } => "explain",
    }
}

fn run(command: Commands, config: &config::Config) -> Result<Outcome> {
    match command {
        Commands::Validate { manifest } => {
            let path = config::resolve_manifest_path(manifest, config)?;
            let report = CompanionManifest::load(&path)?.validate();
            info!(path = %path.display(), valid = report.is_valid(), "Validation finished");

            let lines: Vec<String> = report
                .entries
                .iter()
                .map(|entry| match &entry.error {
                    None => format!(
                        "ok    {:?} {} ({} choices)",
                        entry.kind, entry.template_id, entry.choice_count
                    ),
                    Some(error) => format!(
                        "FAIL  {:?} {}: [{}] {}",
                        entry.kind, entry.template_id, error.code, error.message
                    ),
                })
                .collect();

            let mut payload = serde_json::to_value(&report)?;
            payload["message"] = json!(lines.join("\n"));
            Ok(Outcome {
                ok: report.is_valid(),
                exit_code: report.exit_code(),
                payload,
            })
        }

        Commands::Choices {
            template_id,
            manifest,
        } => {
            let template_id: Identifier = template_id.parse()?;
            let path = config::resolve_manifest_path(manifest, config)?;
            let manifest = CompanionManifest::load(&path)?;
            let (kind, entry) = manifest
                .find(&template_id)
                .ok_or_else(|| BindingError::UnknownCompanion(template_id.clone()))?;
            let companion = manifest.companion(entry)?;
            let choices: Vec<&str> = companion.choice_names().collect();

            Ok(Outcome {
                ok: true,
                exit_code: 0,
                payload: json!({
                    "kind": kind,
                    "templateId": template_id.to_string(),
                    "choices": choices,
                    "fingerprint": companion.fingerprint(),
                    "message": choices.join("\n"),
                }),
            })
        }

        Commands::Explain { code } => {
            let code = code.to_ascii_uppercase();
            let (description, fix) = get_error_info(&code)
                .ok_or_else(|| BindingError::UnknownErrorCode(code.clone()))?;
            Ok(Outcome {
                ok: true,
                exit_code: 0,
                payload: json!({
                    "code": code,
                    "description": description,
                    "fix": fix,
                    "message": format!("{code}: {description}\n  fix: {fix}"),
                }),
            })
        }
    }
}
