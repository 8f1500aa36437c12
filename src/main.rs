//! Sign-up form driver: reads field edits from stdin and prints each new
//! validation state as a JSON line.
//!
//! Commands, one per line:
//!
//! - `username <value>` / `password <value>` / `confirm <value>`
//! - `submit`
//! - `quit`
//!
//! Set `SIGNUP_FORM_CONFIG` to layer a config file under the environment.

use std::env;
use std::sync::Arc;

use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use signup_form::adapters::{
    EntropyStrengthScorer, HttpAvailabilityClient, ReqwestTransport, RetryPolicy,
};
use signup_form::application::{FormController, PipelineConfig};
use signup_form::config::{AppConfig, ConfigError, TelemetryConfig};

/// One line of input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Username(&'a str),
    Password(&'a str),
    Confirm(&'a str),
    Submit,
    Quit,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (name, value) = line.split_once(' ').unwrap_or((line, ""));
        match name {
            "username" => Some(Command::Username(value)),
            "password" => Some(Command::Password(value)),
            "confirm" => Some(Command::Confirm(value)),
            "submit" => Some(Command::Submit),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }
}

fn load_config() -> Result<AppConfig, ConfigError> {
    let config = match env::var("SIGNUP_FORM_CONFIG") {
        Ok(path) => AppConfig::load_from_file(path)?,
        Err(_) => AppConfig::load()?,
    };
    config.validate()?;
    Ok(config)
}

fn init_tracing(telemetry: &TelemetryConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&telemetry.log_level));

    let result = if telemetry.json {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .try_init()
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    };

    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    init_tracing(&config.telemetry);

    let transport = ReqwestTransport::new(config.availability.timeout())?;
    let checker = HttpAvailabilityClient::new(Arc::new(transport), &config.availability.endpoint)
        .with_retry_policy(RetryPolicy::new(
            config.availability.max_retries,
            config.availability.initial_backoff(),
        ));
    let pipeline = PipelineConfig::default()
        .with_debounce(config.form.debounce())
        .with_rules(config.form.rules());

    let controller = FormController::new(
        Arc::new(checker),
        Arc::new(EntropyStrengthScorer::new()),
        pipeline,
    );
    info!(endpoint = %config.availability.endpoint, "Sign-up form ready");

    let mut states = controller.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            let line = serde_json::to_string(&*states.borrow_and_update());
            match line {
                Ok(line) => println!("{line}"),
                Err(e) => warn!(error = %e, "failed to encode state"),
            }
            if states.changed().await.is_err() {
                return;
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Some(Command::Username(value)) => controller.set_username(value),
            Some(Command::Password(value)) => controller.set_password(value),
            Some(Command::Confirm(value)) => controller.set_confirmation(value),
            Some(Command::Submit) => match controller.submit() {
                Ok(request) => println!("{}", json!({ "submitted": request.user_name })),
                Err(e) => println!("{}", json!({ "rejected": e.to_string() })),
            },
            Some(Command::Quit) => break,
            None => warn!(line = %line, "unknown command"),
        }
    }

    printer.abort();
    Ok(())
}
