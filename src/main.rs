use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use campus_admin::app::App;
use campus_admin::config::Config;
use campus_admin::logging;
use campus_admin::router::NavigationOutcome;
use campus_admin::routes::RouteTable;
use campus_admin::session::User;
use campus_admin::storage;

#[derive(Parser, Debug)]
#[command(name = "campus-admin", version, about = "Navigation and session core of the campus admin front-end")]
struct Cli {
    /// Config file (default: ~/.config/campus-admin/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the route table
    Routes,
    /// Navigate through paths and report the highlighted section
    Navigate {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Store a signed-in user and token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: String,
        #[arg(long)]
        token: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the stored session
    Whoami,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    logging::init(&config.logging.level);

    let storage = storage::open(&config.storage);
    let mut app = App::start(&config, storage).context("starting application")?;

    match cli.command {
        Command::Routes => print_routes(app.router().table()),
        Command::Navigate { paths } => {
            print_location(&app, "start");
            for path in &paths {
                match app.navigate(path)? {
                    NavigationOutcome::Blocked { path } => {
                        println!("{path}: blocked (sign in first)");
                    }
                    NavigationOutcome::Duplicate => print_location(&app, "unchanged"),
                    NavigationOutcome::Changed => print_location(&app, "moved"),
                }
            }
        }
        Command::Login { email, role, token } => {
            app.session()
                .set_user(User::new(email, role), token)
                .context("saving session")?;
            println!("signed in");
        }
        Command::Logout => {
            app.session().logout().context("clearing session")?;
            println!("signed out");
        }
        Command::Whoami => match app.session().user() {
            Some(user) if app.session().is_authenticated() => {
                println!("{} ({})", user.email, user.role);
            }
            _ => println!("not signed in"),
        },
    }

    Ok(())
}

fn print_routes(table: &RouteTable) {
    for entry in table.entries() {
        let auth = if entry.requires_auth { "auth" } else { "public" };
        println!(
            "{:<12} {:<10} {:<15} {}",
            entry.path,
            entry.name,
            entry.view.as_str(),
            auth
        );
    }
}

fn print_location(app: &App, label: &str) {
    let section = app
        .navigation()
        .section()
        .map(|s| s.label())
        .unwrap_or("-");
    println!(
        "{label}: {} -> active {} ({section})",
        app.router().current_path(),
        app.navigation().active()
    );
}
