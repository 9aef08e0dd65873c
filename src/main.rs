use std::io::IsTerminal;
use std::io::Read;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use miette::{Context, IntoDiagnostic, Result};

use scamlens_advice::advisor::{Advisor, CheckReport};
use scamlens_advice::llm::LlmClient;
use scamlens_core::{InputKind, OutputFormat, ScamlensConfig, ScamlensError};

#[derive(Parser)]
#[command(
    name = "scamlens",
    version,
    about = "Spam and phishing checker with AI-powered advice",
    long_about = "Scamlens checks whether a message, email, or URL might be spam or phishing.\n\n\
                   A fixed set of local heuristics produces a suspicion score instantly;\n\
                   an LLM then explains the verdict and recommends what to do next.\n\n\
                   Examples:\n  \
                     scamlens check 'WIN a FREE prize: bit.ly/abc'   Analyze a message\n  \
                     echo 'click here' | scamlens check --kind sms   Analyze stdin\n  \
                     scamlens check --file mail.txt --kind email     Analyze a file\n  \
                     scamlens check --no-advice 'free stuff'         Heuristics only, offline\n  \
                     scamlens doctor                                 Check setup and environment"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .scamlens.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         text      Human-readable summary (default)\n  \
                         json      Machine-readable JSON with camelCase keys\n  \
                         markdown  GitHub-flavored Markdown"
    )]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,

    /// When to use colors
    #[arg(long, global = true, default_value = "auto")]
    color: ColorChoice,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze content for spam and phishing signals
    #[command(long_about = "Analyze content for spam and phishing signals.\n\n\
        Scores the content with fixed local heuristics, then asks the configured\n\
        LLM for an explanation and a recommendation. The heuristic result is\n\
        always shown, even when the LLM call fails.\n\n\
        Examples:\n  scamlens check 'verify account at bit.ly/x'\n  \
        cat suspicious.txt | scamlens check --kind email\n  \
        scamlens check --no-advice --format json 'free win'")]
    Check {
        /// Content to analyze (reads stdin when omitted)
        content: Option<String>,

        /// Read content from a file instead of the argument or stdin
        #[arg(long)]
        file: Option<PathBuf>,

        /// Kind of content being analyzed
        #[arg(long, default_value = "url")]
        kind: InputKind,

        /// Skip the LLM call and report heuristics only
        #[arg(long)]
        no_advice: bool,

        /// Exit with non-zero code if the content is flagged as suspicious
        #[arg(
            long,
            long_help = "Exit with non-zero code if the heuristic flags the content.\n\n\
                Useful in scripts and mail filters to branch on the verdict."
        )]
        fail_suspicious: bool,
    },
    /// Create a default .scamlens.toml configuration file
    #[command(long_about = "Create a default .scamlens.toml configuration file.\n\n\
        Generates a commented-out template with all available options.\n\
        Fails if .scamlens.toml already exists.")]
    Init,
    /// Check your scamlens setup and environment
    #[command(long_about = "Check your scamlens setup and environment.\n\n\
        Runs diagnostics for the config file and the LLM provider API key.\n\
        Use --format json for machine-readable output.")]
    Doctor,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

fn print_welcome(use_color: bool) {
    let version = env!("CARGO_PKG_VERSION");

    if use_color {
        println!("\x1b[1m\x1b[33m\u{1f6e1}\u{fe0f}\x1b[0m \x1b[1mscamlens\x1b[0m v{version} — spam and phishing checks with AI advice\n");

        println!("Quick start:");
        println!("  \x1b[36mscamlens init\x1b[0m                          Create a .scamlens.toml config file");
        println!("  \x1b[36mscamlens check 'WIN free: bit.ly/x'\x1b[0m    Analyze a message");
        println!("  \x1b[36mscamlens doctor\x1b[0m                        Check setup and environment\n");

        println!("All commands:");
        println!("  \x1b[32mcheck\x1b[0m     Heuristic score plus AI recommendations (arg, file, or stdin)");
        println!("  \x1b[32mdoctor\x1b[0m    Check your setup and environment");
        println!("  \x1b[32minit\x1b[0m      Create default configuration\n");
    } else {
        println!("scamlens v{version} — spam and phishing checks with AI advice\n");

        println!("Quick start:");
        println!("  scamlens init                          Create a .scamlens.toml config file");
        println!("  scamlens check 'WIN free: bit.ly/x'    Analyze a message");
        println!("  scamlens doctor                        Check setup and environment\n");

        println!("All commands:");
        println!("  check     Heuristic score plus AI recommendations (arg, file, or stdin)");
        println!("  doctor    Check your setup and environment");
        println!("  init      Create default configuration\n");
    }

    println!("Run 'scamlens <command> --help' for details.");
}

fn read_content(content: &Option<String>, file: &Option<PathBuf>) -> Result<String> {
    if let Some(text) = content {
        return Ok(text.clone());
    }
    match file {
        Some(path) => std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err(format!("reading {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .into_diagnostic()
                .wrap_err("reading stdin")?;
            Ok(input)
        }
    }
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: &'static str,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl DoctorCheck {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: "pass",
            detail: detail.into(),
            hint: None,
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name,
            status: "fail",
            detail: detail.into(),
            hint: Some(hint.into()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self.status {
            "pass" => "\u{2713}",
            "fail" => "\u{2717}",
            _ => "~",
        }
    }

    fn colored_symbol(&self) -> String {
        match self.status {
            "pass" => "\x1b[32m\u{2713}\x1b[0m".into(),
            "fail" => "\x1b[31m\u{2717}\x1b[0m".into(),
            _ => "\x1b[33m~\x1b[0m".into(),
        }
    }
}

fn run_doctor(config: &ScamlensConfig, format: OutputFormat, use_color: bool) -> Result<()> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    // 1. Config file
    let config_path = std::path::Path::new(".scamlens.toml");
    if config_path.exists() {
        checks.push(DoctorCheck::pass("config_file", ".scamlens.toml found"));
    } else {
        checks.push(DoctorCheck::fail(
            "config_file",
            ".scamlens.toml not found",
            "run 'scamlens init' to create a default config",
        ));
    }

    // 2. LLM provider + API key
    let provider = &config.llm.provider;
    let model = &config.llm.model;
    let env_var = config.llm.env_key();
    checks.push(DoctorCheck::pass(
        "llm_provider",
        format!("{provider} (model: {model})"),
    ));
    if config.llm.api_key.is_some() || std::env::var(env_var).is_ok() {
        checks.push(DoctorCheck::pass("llm_api_key", format!("{env_var} set")));
    } else {
        checks.push(DoctorCheck::fail(
            "llm_api_key",
            format!("{env_var} not set"),
            format!("export {env_var}=... or set api_key in .scamlens.toml"),
        ));
    }

    match format {
        OutputFormat::Json => {
            let version = env!("CARGO_PKG_VERSION");
            let json = serde_json::json!({
                "version": version,
                "checks": checks,
            });
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        }
        _ => {
            let version = env!("CARGO_PKG_VERSION");
            println!("scamlens v{version} — Environment Check\n");

            for check in &checks {
                let sym = if use_color {
                    check.colored_symbol()
                } else {
                    check.symbol().to_string()
                };
                let label = check.name.replace('_', " ");
                println!("  {sym} {label:<16} {}", check.detail);
                if let Some(hint) = &check.hint {
                    println!("    hint: {hint}");
                }
            }

            let passed = checks.iter().filter(|c| c.status == "pass").count();
            let failed = checks.iter().filter(|c| c.status == "fail").count();
            println!("\n{passed} checks passed, {failed} failed");
        }
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# scamlens configuration
# See: https://github.com/scamlens/scamlens

[llm]
# provider = "gemini"            # gemini | anthropic | openai (or any compatible endpoint)
# model = "gemini-2.5-flash"
# api_key = "..."                # falls back to GEMINI_API_KEY / ANTHROPIC_API_KEY / OPENAI_API_KEY
# base_url = "https://generativelanguage.googleapis.com/v1beta/openai"
# timeout_secs = 30
"#;

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ScamlensConfig::from_file(path).into_diagnostic()?,
        None => {
            let default_path = std::path::Path::new(".scamlens.toml");
            if default_path.exists() {
                ScamlensConfig::from_file(default_path).into_diagnostic()?
            } else {
                ScamlensConfig::default()
            }
        }
    };

    let use_color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    };

    match cli.command {
        None => {
            print_welcome(use_color);
            return Ok(());
        }
        Some(Command::Check {
            ref content,
            ref file,
            kind,
            no_advice,
            fail_suspicious,
        }) => {
            let input = read_content(content, file)?;
            let text = input.trim_end();

            // Caller-facing validation; the scorer itself is total.
            if text.trim().is_empty() {
                let err = ScamlensError::Input("please enter some text or a URL first".into());
                miette::bail!(miette::miette!(
                    help = "Pass the content as an argument, use --file <path>, or pipe it on stdin",
                    "{err}"
                ));
            }

            let heuristic = scamlens_heuristics::score(text);

            let report = if no_advice {
                CheckReport::heuristic_only(kind, text, heuristic)
            } else {
                let mut llm = config.llm.clone();
                if llm.api_key.is_none() {
                    llm.api_key = std::env::var(llm.env_key()).ok();
                }

                if llm.api_key.is_none() {
                    CheckReport::with_failure(
                        kind,
                        text,
                        heuristic,
                        format!(
                            "no API key configured for provider '{}'; export {} or set api_key in .scamlens.toml",
                            llm.provider,
                            llm.env_key(),
                        ),
                    )
                } else {
                    match LlmClient::new(&llm) {
                        Err(e) => CheckReport::with_failure(kind, text, heuristic, e.to_string()),
                        Ok(client) => {
                            let is_tty = std::io::stderr().is_terminal();
                            let spinner = if is_tty {
                                let pb = indicatif::ProgressBar::new_spinner();
                                pb.set_style(
                                    indicatif::ProgressStyle::with_template(
                                        "{spinner:.cyan} {msg} ({elapsed})",
                                    )
                                    .unwrap(),
                                );
                                pb.set_message("Consulting the model...");
                                pb.enable_steady_tick(std::time::Duration::from_millis(120));
                                Some(pb)
                            } else {
                                None
                            };

                            let advisor = Advisor::new(client);
                            let report = advisor.report(kind, text, heuristic).await;

                            if let Some(pb) = spinner {
                                if report.advice_error.is_some() {
                                    pb.finish_with_message("Failed");
                                } else {
                                    pb.finish_with_message("Done");
                                }
                            }
                            report
                        }
                    }
                }
            };

            if cli.verbose {
                eprintln!("--- Check Stats ---");
                eprintln!("kind: {} | content chars: {}", report.kind, report.content_chars);
                eprintln!(
                    "provider: {} | model: {}",
                    config.llm.provider, config.llm.model
                );
                eprintln!(
                    "heuristic score: {} | suspicious: {}",
                    report.heuristic.score, report.heuristic.suspicious
                );
                eprintln!("-------------------");
            }

            match cli.format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&report).into_diagnostic()?
                    );
                }
                OutputFormat::Markdown => {
                    print!("{}", report.to_markdown());
                }
                OutputFormat::Text => {
                    print!("{report}");
                }
            }

            if fail_suspicious && report.heuristic.suspicious {
                std::process::exit(1);
            }
        }
        Some(Command::Init) => {
            let path = std::path::Path::new(".scamlens.toml");
            if path.exists() {
                miette::bail!(".scamlens.toml already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created .scamlens.toml with default configuration");
        }
        Some(Command::Doctor) => {
            run_doctor(&config, cli.format, use_color)?;
        }
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "scamlens", &mut std::io::stdout());
        }
    }

    Ok(())
}
