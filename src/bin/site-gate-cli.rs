use std::path::PathBuf;

use clap::{Parser, Subcommand};

use site_gate::config::loader::load_site_config;
use site_gate::plugins::PluginScope;
use site_gate::sites::SiteContext;

#[derive(Parser)]
#[command(name = "site-gate-cli")]
#[command(about = "Inspect a site's plugin and redirect configuration", long_about = None)]
struct Cli {
    /// Directory holding the site configuration files.
    #[arg(short, long, default_value = "sites")]
    dir: PathBuf,

    /// Configuration file name prefix.
    #[arg(long, default_value = "site-config-")]
    prefix: String,

    /// Site id.
    #[arg(short, long)]
    site: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show where a not-found request for PATH would be redirected
    Redirect {
        /// Request path, including any query string
        path: String,
    },
    /// List the plugins the site activates
    Plugins {
        /// Show the sitewide list instead of the site list
        #[arg(long)]
        sitewide: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let context = match load_site_config(&cli.dir, &cli.prefix, cli.site)? {
        Some(store) => SiteContext::new(cli.site, store),
        None => {
            eprintln!("No configuration for site {} in {}", cli.site, cli.dir.display());
            std::process::exit(2);
        }
    };

    match cli.command {
        Commands::Redirect { path } => match context.hooks.handle_not_found(&path) {
            Some(action) => {
                let json = serde_json::json!({ "url": action.url, "status": action.status_code });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            None => {
                println!("no redirect");
            }
        },
        Commands::Plugins { sitewide } => {
            let scope = if sitewide { PluginScope::Sitewide } else { PluginScope::Site };
            match context.hooks.plugin_list(scope) {
                Some(list) => println!("{}", serde_json::to_string_pretty(&list)?),
                None => println!("no {scope} plugin override"),
            }
        }
    }

    Ok(())
}
