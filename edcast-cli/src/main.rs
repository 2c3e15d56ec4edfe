//! Edcast CLI - educational dialogue scripts, voiced.
//!
//! A command-line interface for turning a topic into a one-minute
//! two-speaker script and a WAV recording of it.

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

mod prompt;

use clap::{Args, Parser, Subcommand};
use edcast::config::{self, Settings};
use edcast::credentials::{self, ApiKey, EnvFileStatus};
use edcast::prelude::*;
use edcast::synthesis::invoke;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Script read aloud by `voice-test`.
const VOICE_TEST_SCRIPT: &str = "\
Mike: Welcome to our podcast about AI and technology!
Sara: That's right, Mike! Today we're going to discuss some fascinating developments.
Mike: Absolutely! Let's dive right in.";

const ENV_FILE: &str = ".env";

/// Shown after `create` fails to voice its script.
const VOICE_TEST_HINT: &str = "Run 'edcast voice-test' to check the voice API on its own.";

/// Edcast - one-minute educational dialogues with Gemini voices
#[derive(Parser)]
#[command(name = "edcast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "EDCAST_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a script for a topic and voice it
    Create(CreateArgs),

    /// Voice a short fixed script to check the API setup
    VoiceTest,

    /// Check .env, API key and output directory
    Check,

    /// Write a .env template for the API key
    InitEnv(InitEnvArgs),
}

/// Arguments for the create command
#[derive(Args)]
struct CreateArgs {
    /// Topic; prompts interactively when omitted
    #[arg(trailing_var_arg = true)]
    topic: Vec<String>,
}

/// Arguments for the init-env command
#[derive(Args)]
struct InitEnvArgs {
    /// Overwrite an existing .env
    #[arg(short, long)]
    force: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "edcast={level},{}",
            if verbosity >= 2 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<ExitCode> {
    let loaded_env = credentials::load_dotenv();

    match cli.command {
        Commands::Create(args) => cmd_create(args, cli.config, cli.output).await,
        Commands::VoiceTest => cmd_voice_test(cli.config, cli.output).await,
        Commands::Check => Ok(cmd_check(
            &env_file_to_inspect(loaded_env),
            cli.config.as_deref(),
            cli.output,
        )),
        Commands::InitEnv(args) => cmd_init_env(&args),
    }
}

/// Everything a synthesis command needs, resolved up front.
struct Session {
    synthesizer: Gemini,
    output: OutputDir,
}

impl Session {
    /// Resolve the key through `lookup` first so a missing key fails before
    /// any other work.
    fn open<F>(lookup: F, config_path: Option<&Path>, output: Option<PathBuf>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = credentials::resolve_api_key(lookup)?;
        let settings = config::load_settings(config_path)?;
        let output = OutputDir::new(output.unwrap_or_else(|| settings.output.dir.clone()));
        let synthesizer = Gemini::new(gemini_config(api_key, &settings))?;
        tracing::debug!(model = synthesizer.model(), output = %output.path().display(), "session ready");

        Ok(Self {
            synthesizer,
            output,
        })
    }
}

fn gemini_config(api_key: ApiKey, settings: &Settings) -> GeminiConfig {
    GeminiConfig::new(api_key).with_settings(&settings.speech)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Generate, save and voice a script.
async fn cmd_create(
    args: CreateArgs,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    let session = Session::open(env_var, config_path.as_deref(), output)?;

    let topic = if args.topic.is_empty() {
        prompt::read_topic(std::io::stdin().lock(), std::io::stdout())?
    } else {
        Topic::new(args.topic.join(" "))
    };

    let model = session.synthesizer.model().to_owned();
    let pipeline = Pipeline::new(session.synthesizer, session.output);

    println!("Topic: {topic}");
    let prepared = pipeline.prepare(&topic)?;
    println!("Script saved: {}", prepared.script_path.display());
    println!(
        "Word count: {} (target ≤{TARGET_WORDS})",
        prepared.length.words()
    );
    if let LengthCheck::OverTarget { words, excess } = prepared.length {
        println!(
            "Warning: {words} words is {excess} over the target; the audio may run past one minute."
        );
    }

    println!("Generating audio with {model}...");
    let outcome = pipeline.synthesize(&prepared).await;
    let code = report_outcome(&outcome);
    if let Some(hint) = create_failure_hint(&outcome) {
        println!("{hint}");
    }
    Ok(code)
}

/// Voice a fixed sample script.
async fn cmd_voice_test(config_path: Option<PathBuf>, output: Option<PathBuf>) -> Result<ExitCode> {
    let session = Session::open(env_var, config_path.as_deref(), output)?;
    let script = Script::new(VOICE_TEST_SCRIPT);

    println!("Testing voice generation with sample script:");
    println!("{script}");
    println!();

    let outcome = invoke(&session.synthesizer, &session.output, &script).await;
    Ok(report_outcome(&outcome))
}

fn report_outcome(outcome: &SynthesisOutcome) -> ExitCode {
    match outcome {
        SynthesisOutcome::Succeeded {
            audio_path,
            duration,
        } => {
            println!(
                "Audio saved: {} ({:.1}s)",
                audio_path.display(),
                duration.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        SynthesisOutcome::Failed { diagnostic } => {
            println!("Audio generation failed: {diagnostic}");
            ExitCode::FAILURE
        }
    }
}

const fn create_failure_hint(outcome: &SynthesisOutcome) -> Option<&'static str> {
    match outcome {
        SynthesisOutcome::Failed { .. } => Some(VOICE_TEST_HINT),
        SynthesisOutcome::Succeeded { .. } => None,
    }
}

/// The `.env` that was loaded, or `./.env` when none was.
fn env_file_to_inspect(loaded: Option<PathBuf>) -> PathBuf {
    loaded.unwrap_or_else(|| PathBuf::from(ENV_FILE))
}

/// Report setup status.
fn cmd_check(env_file: &Path, config_path: Option<&Path>, output: Option<PathBuf>) -> ExitCode {
    let mut ok = true;

    println!("Edcast Setup Check\n");

    println!("Environment:");
    let shown = env_file.display();
    match credentials::inspect_env_file(env_file) {
        Ok(EnvFileStatus::HasKey) => println!("  .env:    {shown}, API key set"),
        Ok(EnvFileStatus::NoKey) => println!("  .env:    {shown}, no API key (edit it)"),
        Ok(EnvFileStatus::Missing) => println!("  .env:    - (run 'edcast init-env')"),
        Err(e) => println!("  .env:    {shown} unreadable ({e})"),
    }
    match credentials::api_key_from_env() {
        Ok(key) => println!("  API key: set ({} characters)", key.len()),
        Err(e) => {
            ok = false;
            println!("  API key: missing ({e})");
        }
    }

    println!();
    println!("Configuration:");
    let config_file = config_path.map_or_else(config::config_path, Path::to_path_buf);
    println!("  Path:   {}", config_file.display());
    let settings = match config::load_settings(config_path) {
        Ok(settings) => {
            println!("  Valid:  yes");
            settings
        }
        Err(e) => {
            ok = false;
            println!("  Valid:  no ({e})");
            Settings::default()
        }
    };
    println!("  Model:  {}", settings.speech.model);

    println!();
    println!("Output:");
    let output = OutputDir::new(output.unwrap_or(settings.output.dir));
    match output.check_writable() {
        Ok(()) => println!("  {}: writable", output.path().display()),
        Err(e) => {
            ok = false;
            println!("  {}: not writable ({e})", output.path().display());
        }
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Create a `.env` template.
fn cmd_init_env(args: &InitEnvArgs) -> Result<ExitCode> {
    let path = Path::new(ENV_FILE);

    if !credentials::write_env_template(path, args.force)? {
        println!("{ENV_FILE} already exists.");
        println!("Use --force to overwrite.");
        return Ok(ExitCode::SUCCESS);
    }

    println!("Created {ENV_FILE}");
    println!();
    println!("Next steps:");
    println!("  1. Get an API key from https://aistudio.google.com/");
    println!("  2. Replace {} in {ENV_FILE}", credentials::PLACEHOLDER_KEY);
    println!("  3. edcast check");

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn missing_config() -> PathBuf {
        std::env::temp_dir().join("edcast-no-such-dir/config.toml")
    }

    #[test]
    fn session_resolves_key_before_config() {
        let path = missing_config();
        match Session::open(|_| None, Some(&path), None) {
            Err(err) => assert!(err.is_missing_credential(), "got {err}"),
            Ok(_) => panic!("session opened without a key"),
        }
    }

    #[test]
    fn session_reports_config_once_key_is_set() {
        let path = missing_config();
        let lookup = |name: &str| (name == "GOOGLE_API_KEY").then(|| "test-key".to_owned());
        match Session::open(lookup, Some(&path), None) {
            Err(err) => assert!(matches!(err, Error::Config(_)), "got {err}"),
            Ok(_) => panic!("session opened with a missing config file"),
        }
    }

    #[test]
    fn check_inspects_loaded_env_file() {
        let loaded = PathBuf::from("/work/project/.env");
        assert_eq!(env_file_to_inspect(Some(loaded.clone())), loaded);
        assert_eq!(env_file_to_inspect(None), PathBuf::from(ENV_FILE));
    }

    #[test]
    fn failed_create_points_to_voice_test() {
        let failed = SynthesisOutcome::Failed {
            diagnostic: "gemini synthesis failed".to_owned(),
        };
        assert!(create_failure_hint(&failed).unwrap().contains("edcast voice-test"));

        let saved = SynthesisOutcome::Succeeded {
            audio_path: PathBuf::from("outputs/audio.wav"),
            duration: std::time::Duration::from_secs(1),
        };
        assert_eq!(create_failure_hint(&saved), None);
    }
}
