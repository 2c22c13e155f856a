//! Command Handlers

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use certseal_core::envelope::check_sealed_input;
use certseal_core::logging::LogLevel;
use certseal_core::{
    open_file, seal_file, CipherError, ConfigFile, ConsoleLogger, DecryptOptions, FileSourceProvider,
    HierarchicalResolver, KeyLocator, Logger, Opened, ResolutionMode, Scope, SharedLogger,
};

use crate::commands::{Cli, Commands, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output;

/// Run the CLI with parsed arguments, writing results to stdout
pub fn run(cli: Cli) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli, &mut out)
}

/// Run the CLI, writing results to `out`. Diagnostics go to stderr.
pub fn execute<W: Write>(cli: Cli, out: &mut W) -> CliResult<()> {
    let logger = console_logger(cli.verbose);
    let config = load_config(cli.config.as_deref(), &logger)?;

    match cli.command {
        Commands::Encrypt { file } => handle_encrypt(&config, &file, out),
        Commands::Decrypt {
            file,
            confirm_large_file,
            writefile,
        } => {
            let mut options = DecryptOptions::new().confirm_large_file(confirm_large_file);
            if let Some(path) = writefile {
                options = options.with_output(path);
            }
            handle_decrypt(&config, &file, &options, out)
        }
        Commands::Lookup {
            key,
            resolution,
            scope,
            order_override,
            format,
        } => {
            let scope: Scope = scope.into_iter().collect();
            handle_lookup(
                &config,
                &key,
                &scope,
                order_override.as_deref(),
                resolution,
                format,
                logger,
                out,
            )
        }
    }
}

fn console_logger(verbose: bool) -> SharedLogger {
    let level = if verbose { LogLevel::Debug } else { LogLevel::Warn };
    Arc::new(ConsoleLogger::new().with_min_level(level))
}

fn load_config(explicit: Option<&Path>, logger: &SharedLogger) -> CliResult<ConfigFile> {
    let (path, level) = ConfigFile::locate(explicit)?;
    logger.debug(&format!("using {} settings from {}", level.as_str(), path.display()));
    Ok(ConfigFile::load(&path)?)
}

fn handle_encrypt<W: Write>(config: &ConfigFile, file: &Path, out: &mut W) -> CliResult<()> {
    if !file.is_file() {
        return Err(CipherError::InputNotFound(file.to_path_buf()).into());
    }
    let locator = KeyLocator::from_settings(&config.certseal)?;
    let public_key = locator.load_public_key()?;

    let sealed = seal_file(file, &public_key)?;
    writeln!(out, "{}", sealed.display())?;
    Ok(())
}

fn handle_decrypt<W: Write>(
    config: &ConfigFile,
    file: &Path,
    options: &DecryptOptions,
    out: &mut W,
) -> CliResult<()> {
    // size and existence first, so a refused file never touches the private key
    check_sealed_input(file, options.confirm_large_file)?;
    let locator = KeyLocator::from_settings(&config.certseal)?;
    let private_key = locator.load_private_key()?;

    match open_file(file, &private_key, options)? {
        Opened::Plaintext(plaintext) => out.write_all(&plaintext)?,
        Opened::Written(path) => writeln!(out, "{}", path.display())?,
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_lookup<W: Write>(
    config: &ConfigFile,
    key: &str,
    scope: &Scope,
    order_override: Option<&str>,
    mode: ResolutionMode,
    format: OutputFormat,
    logger: SharedLogger,
    out: &mut W,
) -> CliResult<()> {
    if key.trim().is_empty() {
        return Err(CliError::invalid_arg("lookup key must not be empty"));
    }
    let provider = FileSourceProvider::from_config(config)?;
    let resolver = HierarchicalResolver::new(Arc::new(provider)).with_logger(logger);

    let answer = resolver.resolve(key, scope, order_override, mode)?;
    if let Some(value) = answer.into_value() {
        out.write_all(output::render(&value, format)?.as_bytes())?;
    }
    Ok(())
}
