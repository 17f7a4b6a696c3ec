//! taskdeck CLI entry point.
//!
//! Parses command-line arguments and dispatches to the console or config commands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskdeck::config::{self, Config};
use taskdeck::console::run_console;
use taskdeck::logging::init_logging;
use taskdeck::theme::Appearance;
use taskdeck::Result;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(
    version,
    about = "Terminal console for following the output of task-runner projects",
    after_help = "EXAMPLES:
    # Follow every task of the 'web' project
    taskdeck console web

    # Read output from a specific feed file with the light theme
    taskdeck console web --feed ./run/feed.jsonl --appearance light

    # Show configuration and configured projects
    taskdeck config
    taskdeck projects"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the console pane for a project
    #[command(after_help = "KEYS:
    t / Tab        next task in the \"Show Output of\" picker
    T / Shift-Tab  previous task
    a, 1-9         all tasks, or task N
    c / Delete     clear the visible output
    f              scroll back to the latest followed line
    q / Esc        quit")]
    Console {
        /// Project name or id from projects.toml
        project: String,

        /// Feed file written by the task runner (default: ~/.config/taskdeck/feed.jsonl)
        #[arg(long)]
        feed: Option<PathBuf>,

        /// Override the configured appearance
        #[arg(long, value_enum)]
        appearance: Option<Appearance>,

        /// Override the configured input poll interval, in milliseconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        poll_interval: Option<u64>,
    },

    /// Show the configuration, or change the saved appearance
    Config {
        /// Save this appearance to config.toml
        #[arg(long, value_enum)]
        appearance: Option<Appearance>,
    },

    /// List configured projects and their tasks
    Projects,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Console {
            project,
            feed,
            appearance,
            poll_interval,
        } => {
            init_logging(&config::log_path()?)?;

            let mut config = config::load_config()?;
            if let Some(appearance) = appearance {
                config.appearance = appearance;
            }
            if let Some(poll_interval) = poll_interval {
                config.poll_interval_ms = poll_interval;
            }

            let project = config::find_project(&project)?;
            let feed_path = match feed {
                Some(path) => path,
                None => config::default_feed_path()?,
            };
            run_console(project, &config, feed_path)
        }
        Commands::Config { appearance } => {
            let mut config = config::load_config()?;
            if let Some(appearance) = appearance {
                config.appearance = appearance;
                config::save_config(&config)?;
                println!("Saved appearance '{}'", appearance);
            }
            print_config(&config)
        }
        Commands::Projects => {
            let projects = config::load_projects()?;
            if projects.projects.is_empty() {
                println!("No projects in {}", config::projects_path()?.display());
            }
            for project in &projects.projects {
                println!("{} ({})", project.name, project.id);
                for (index, task) in project.tasks.iter().enumerate() {
                    println!("  {}. {}", index + 1, task.label());
                }
            }
            Ok(())
        }
    }
}

fn print_config(config: &Config) -> Result<()> {
    println!("Config file: {}", config::config_path()?.display());
    println!("Projects:    {}", config::projects_path()?.display());
    println!("Feed:        {}", config::default_feed_path()?.display());
    println!("Log:         {}", config::log_path()?.display());
    println!();
    println!("appearance       = {}", config.appearance);
    println!("poll_interval_ms = {}", config.poll_interval_ms);
    println!("max_records      = {}", config.max_records);
    println!(
        "system_colors    = window {} / label {} / text {}",
        config.system_colors.window_background,
        config.system_colors.label,
        config.system_colors.text
    );
    let mut assets: Vec<_> = config.theme_assets.iter().collect();
    assets.sort_by_key(|(name, _)| *name);
    for (name, color) in assets {
        println!("theme_assets.{} = {}", name, color);
    }
    Ok(())
}
