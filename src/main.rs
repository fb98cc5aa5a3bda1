//! codeguard - unified code-quality configuration for JavaScript and
//! TypeScript projects.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};

use codeguard::config::{resolution::resolve_onto_defaults, validate, ConfigLoader, ReportFormat};
use codeguard::hooks::install_hooks;
use codeguard::CodeguardError;
use codeguard::quality::{parse_lint_output, Normalizer};
use codeguard::reporting::{render_console, write_reports, ReportBuilder};
use codeguard::tools::{self, Capability, NodeModulesProbe, PluginProbe, StaticProbe};

#[derive(Parser)]
#[command(name = "codeguard")]
#[command(version)]
#[command(about = "Unified lint, format, commit and report configuration", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    project: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// User-level fallback config file (defaults to one in the platform config dir)
    #[arg(long, global = true, env = "CODEGUARD_USER_CONFIG")]
    user_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or validate project configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print the native configuration for one external tool as JSON
    ToolConfig {
        /// Tool to generate configuration for
        #[arg(value_enum)]
        tool: ToolKind,

        /// Treat every optional linter plugin as installed
        #[arg(long)]
        assume_plugins: bool,
    },

    /// Build a quality report from linter JSON output
    Report {
        /// Linter JSON output file, or - for stdin
        #[arg(short, long)]
        input: String,

        /// Output format (defaults to the configured report format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Directory for report files (defaults to the configured one)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Exit with status 1 if any blocker or critical issue is found
        #[arg(long)]
        fail_on_blocking: bool,
    },

    /// Manage git hooks
    Hooks {
        #[command(subcommand)]
        action: HooksAction,
    },

    /// Write editor settings into .vscode/settings.json
    Ide,

    /// Check which external tools and plugins are available
    Doctor,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the resolved configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the discovered configuration file
    Validate,

    /// List the paths searched for a configuration file
    Paths,
}

#[derive(Subcommand)]
enum HooksAction {
    /// List configured hooks
    List,

    /// Install configured hooks into .git/hooks
    Install {
        /// Replace hooks that were not written by codeguard
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ToolKind {
    Lint,
    Format,
    Commit,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Console,
    Html,
    Json,
    Both,
}

impl OutputFormat {
    fn files(self) -> Option<ReportFormat> {
        match self {
            Self::Console => None,
            Self::Html => Some(ReportFormat::Html),
            Self::Json => Some(ReportFormat::Json),
            Self::Both => Some(ReportFormat::Both),
        }
    }
}

/// Tools `doctor` looks for on PATH.
const REQUIRED_TOOLS: &[&str] = &["git", "node", "npx"];

/// Tools `doctor` looks for in node_modules/.bin.
const PROJECT_TOOLS: &[&str] = &["eslint", "prettier", "commitlint", "lint-staged"];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "codeguard=debug,info"
    } else {
        "codeguard=info,warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Resolve project path
    let project_path = cli.project.canonicalize().unwrap_or(cli.project.clone());

    if !project_path.exists() {
        eprintln!(
            "{} Project directory does not exist: {}",
            "Error:".red().bold(),
            project_path.display()
        );
        std::process::exit(1);
    }

    let mut loader = ConfigLoader::new(&project_path);
    if let Some(path) = cli.user_config {
        loader = loader.with_user_config_path(Some(path));
    }

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => show_config(&loader, json)?,
            ConfigAction::Validate => validate_config(&loader),
            ConfigAction::Paths => {
                println!("\n{} Configuration Search Order", "Config:".cyan().bold());
                println!("{}", "─".repeat(40));
                for path in loader.search_paths() {
                    let marker = if path.is_file() { "*" } else { " " };
                    println!(" {} {}", marker.green(), path.display());
                }
            }
        },

        Commands::ToolConfig {
            tool,
            assume_plugins,
        } => {
            let config = loader.load();
            let output = match tool {
                ToolKind::Lint => {
                    if !config.lint.enabled {
                        eprintln!("{} lint is disabled in the configuration", "Note:".blue());
                    }
                    let built = if assume_plugins {
                        tools::lint::build(&config, &StaticProbe::all())
                    } else {
                        tools::lint::build(&config, &NodeModulesProbe::new(&project_path))
                    };
                    serde_json::to_string_pretty(&built)?
                }
                ToolKind::Format => {
                    if !config.format.enabled {
                        eprintln!("{} format is disabled in the configuration", "Note:".blue());
                    }
                    serde_json::to_string_pretty(&tools::format::build(&config)?)?
                }
                ToolKind::Commit => {
                    if !config.commit_rules.enabled {
                        eprintln!(
                            "{} commit rules are disabled in the configuration",
                            "Note:".blue()
                        );
                    }
                    serde_json::to_string_pretty(&tools::commit::build(&config))?
                }
            };
            println!("{output}");
        }

        Commands::Report {
            input,
            format,
            output_dir,
            fail_on_blocking,
        } => {
            let config = loader.load();
            let raw = read_input(&input)?;
            let results = parse_lint_output(&raw)?;

            let report = ReportBuilder::for_project(&project_path)
                .with_normalizer(Normalizer::from_config(&config.static_analysis))
                .build(&results);

            print!("{}", render_console(&report));

            let files = match format {
                Some(f) => f.files(),
                None => Some(config.static_analysis.report.format),
            };
            if let Some(files) = files {
                let dir = output_dir.unwrap_or_else(|| config.report_dir(&project_path));
                for path in write_reports(&report, files, &dir)? {
                    println!("{} Wrote {}", "OK".green(), path.display());
                }
            }

            if fail_on_blocking && report.has_blocking_issues() {
                eprintln!(
                    "{} blocker or critical issues found",
                    "Error:".red().bold()
                );
                std::process::exit(1);
            }
        }

        Commands::Hooks { action } => {
            let config = loader.load();
            match action {
                HooksAction::List => {
                    if config.hooks.is_empty() {
                        println!("{} No hooks configured", "Info:".blue());
                    }
                    for (name, command) in &config.hooks {
                        println!("{:<20} {}", name.cyan(), command);
                    }
                }
                HooksAction::Install { force } => {
                    let report = install_hooks(&project_path, &config.hooks, force)?;
                    if let Some(dir) = &report.missing_hooks_dir {
                        println!(
                            "{} Git hooks directory not found (not a git repo?): {}",
                            "Warning:".yellow(),
                            dir.display()
                        );
                    }
                    for name in &report.installed {
                        println!("   Installed: .git/hooks/{}", name);
                    }
                    for name in &report.skipped {
                        println!(
                            "   {} .git/hooks/{} was not written by codeguard (use --force)",
                            "Skipped:".yellow(),
                            name
                        );
                    }
                }
            }
        }

        Commands::Ide => {
            let config = loader.load();
            match codeguard::ide::write_editor_settings(&project_path, &config)? {
                Some(path) => println!("{} Wrote {}", "OK".green(), path.display()),
                None => println!("{} IDE integration is disabled", "Info:".blue()),
            }
        }

        Commands::Doctor => doctor(&project_path),
    }

    Ok(())
}

fn show_config(loader: &ConfigLoader, json: bool) -> anyhow::Result<()> {
    let config = loader.load();

    if json {
        println!("{}", serde_json::to_string_pretty(config.as_ref())?);
        return Ok(());
    }

    println!("\n{} Project Configuration", "Config:".cyan().bold());
    println!("{}", "─".repeat(40));
    match loader.discover() {
        Some(source) => println!("   Source: {} ({})", source.path.display(), source.format),
        None => println!("   Source: built-in defaults"),
    }
    println!("   Lint: {}", enabled(config.lint.enabled));
    println!("   Ignore patterns: {}", config.lint.ignore_patterns.len());
    println!("   Lint rule overrides: {}", config.lint.rules.len());
    println!("   Format: {}", enabled(config.format.enabled));
    println!("   Tab width: {}", config.format.tab_width);
    println!("   Print width: {}", config.format.print_width);
    println!("   Commit rules: {}", enabled(config.commit_rules.enabled));
    println!(
        "   Static analysis: {}",
        enabled(config.static_analysis.enabled)
    );
    println!("   Report format: {}", config.static_analysis.report.format);
    println!("   Hooks: {}", config.hooks.len());
    println!("   IDE settings: {}", enabled(config.ide));
    Ok(())
}

fn enabled(on: bool) -> colored::ColoredString {
    if on {
        "enabled".green()
    } else {
        "disabled".dimmed()
    }
}

fn validate_config(loader: &ConfigLoader) {
    let source = match loader.locate() {
        Ok(Some(source)) => source,
        Ok(None) => {
            println!("{} No config file found (using defaults)", "Info:".blue());
            return;
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            std::process::exit(e.exit_code());
        }
    };

    let result = validate(&source.raw);
    if !result.valid {
        eprintln!("{} {}", "Error:".red(), source.path.display());
        for error in &result.errors {
            eprintln!("   - {}", error);
        }
        eprintln!("{}", result.summary());
        std::process::exit(result.exit_code());
    }

    if let Err(e) = resolve_onto_defaults(&source.raw) {
        eprintln!("{} {}: {}", "Error:".red(), source.path.display(), e);
        std::process::exit(1);
    }

    println!("{} {} is valid", "OK".green(), source.path.display());
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read linter output from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
}

fn doctor(project_path: &Path) {
    println!("\n{} Tool Availability", "Doctor:".cyan().bold());
    println!("{}", "─".repeat(40));

    let mut missing = Vec::new();
    for tool in REQUIRED_TOOLS {
        if which::which(tool).is_ok() {
            println!("   {} {}", "OK".green(), tool);
        } else {
            println!("   {} {} not found on PATH", "Missing:".red(), tool);
            missing.push(CodeguardError::MissingTool {
                tool: tool.to_string(),
            });
        }
    }

    let bin_dir = project_path.join("node_modules").join(".bin");
    for tool in PROJECT_TOOLS {
        if bin_dir.join(tool).exists() {
            println!("   {} {}", "OK".green(), tool);
        } else {
            println!("   {} {} not installed in this project", "Warning:".yellow(), tool);
        }
    }

    println!("\n{} Linter Plugins", "Doctor:".cyan().bold());
    println!("{}", "─".repeat(40));
    let probe = NodeModulesProbe::new(project_path);
    for capability in Capability::ALL {
        let status = if probe.available(capability) {
            "OK".green()
        } else {
            "Absent:".dimmed()
        };
        println!("   {} {}", status, capability.package());
    }

    if let Some(err) = missing.first() {
        eprintln!("\n{} {}", "Error:".red().bold(), err);
        std::process::exit(err.exit_code());
    }
}
