mod command;
mod persist;

use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Result, anyhow};
use clap::Parser;
use command::{CliHelper, Command, execute_command};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use holder_name::{
    Config, CsrfToken, DEFAULT_FALLBACK_MESSAGE, DEFAULT_LOCALE, Endpoints, FormContext,
    HolderNameController, LocalHtmlViewer,
};
use platform_utils::HttpClient;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::hint::HistoryHinter;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::persist::CliPersistence;

#[derive(Clone, Debug, Parser, Serialize, Deserialize)]
#[command(version, about = "Interactive client for the holder name entry page", long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Path to the data directory
    #[arg(short, long, default_value = "./.data")]
    data_dir: String,

    /// Optional TOML file with the same keys as the arguments
    #[arg(long, default_value = "holder-name.toml")]
    config: PathBuf,

    /// Origin of the holder name endpoints
    #[arg(long, default_value = "http://localhost:8080")]
    base_url: String,

    /// Locale sent with message lookups, defaults to the configured locale
    #[arg(long)]
    locale: Option<String>,

    #[arg(long, default_value = DEFAULT_LOCALE)]
    default_locale: String,

    #[arg(long, default_value = DEFAULT_FALLBACK_MESSAGE)]
    fallback_message: String,

    /// Page to read the CSRF meta tags from, relative to the base url
    #[arg(long)]
    entry_page: Option<String>,

    #[arg(long)]
    csrf_header: Option<String>,

    #[arg(long)]
    csrf_token: Option<String>,

    #[arg(long, default_value = "")]
    first_name_placeholder: String,

    #[arg(long, default_value = "")]
    last_name_placeholder: String,

    /// Directory of the page shown by the local HTML viewer
    #[arg(long, default_value = "./html")]
    bundle_dir: PathBuf,

    /// Log filter in the env filter format
    #[arg(long)]
    log_filter: Option<String>,
}

impl Args {
    fn holder_name_config(&self) -> Config {
        Config {
            base_url: self.base_url.clone(),
            default_locale: self.default_locale.clone(),
            fallback_message: self.fallback_message.clone(),
        }
    }
}

fn expand_path(path: &str) -> Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(stripped) => dirs::home_dir()
            .map(|home| home.join(stripped))
            .ok_or_else(|| anyhow!("Could not find home directory")),
        None => Ok(PathBuf::from(path)),
    }
}

/// Parse a command string into a Command using clap
fn parse_command(input: &str) -> Result<Command> {
    if input.trim() == "exit" || input.trim() == "quit" {
        return Ok(Command::Exit);
    }

    let mut args = vec!["holder-name-cli".to_string()];
    match shlex::split(input) {
        Some(split_args) => args.extend(split_args),
        None => return Err(anyhow!("Failed to parse input string: {input}")),
    }

    Command::try_parse_from(args).map_err(|e| anyhow!("Command parsing error: {e}"))
}

fn load_args() -> Result<Args> {
    let args = Args::parse();
    let config_file = fs::canonicalize(&args.config).ok();
    let mut figment = Figment::new().merge(Serialized::defaults(args));
    if let Some(config_file) = &config_file {
        figment = figment.merge(Toml::file(config_file));
    }
    Ok(figment.merge(Env::prefixed("HOLDER_NAME_")).extract()?)
}

/// CSRF values from the arguments, or else from the entry page's meta tags.
async fn resolve_csrf(args: &Args, http_client: &dyn HttpClient) -> Result<Option<CsrfToken>> {
    if let (Some(header_name), Some(token)) = (&args.csrf_header, &args.csrf_token) {
        return Ok(Some(CsrfToken::new(header_name, token)));
    }
    let Some(entry_page) = &args.entry_page else {
        return Ok(None);
    };
    let url = Endpoints::new(&args.base_url)?.url(entry_page)?;
    let response = http_client.get(url.into(), None).await?.error_for_status()?;
    Ok(CsrfToken::from_html(&response.body)?)
}

async fn run_interactive_mode(args: Args, data_dir: PathBuf) -> Result<()> {
    holder_name::init_logging(&data_dir.to_string_lossy(), None, args.log_filter.clone())?;
    let persistence = CliPersistence {
        data_dir: data_dir.clone(),
    };
    let history_file = &persistence.history_file();

    let rl = &mut Editor::new()?;
    rl.set_helper(Some(CliHelper {
        hinter: HistoryHinter {},
    }));

    if rl.load_history(history_file).is_err() {
        info!("No history found");
    }

    let http_client: Arc<dyn HttpClient> = Arc::from(platform_utils::create_http_client(None));
    let csrf = resolve_csrf(&args, http_client.as_ref()).await?;
    if csrf.is_none() {
        warn!("Running without a CSRF token");
    }
    let context = FormContext {
        csrf,
        locale: args.locale.clone(),
        first_name_placeholder: args.first_name_placeholder.clone(),
        last_name_placeholder: args.last_name_placeholder.clone(),
    };
    let controller = HolderNameController::new(args.holder_name_config(), context, http_client)?;
    let mut viewer = LocalHtmlViewer::new(&args.bundle_dir, "index");

    println!("Holder name CLI Interactive Mode");
    println!("Type 'help' for available commands or 'exit' to quit");

    loop {
        let readline = rl.readline("holder-name> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(line.as_str())?;

                match parse_command(trimmed) {
                    Ok(command) => {
                        match Box::pin(execute_command(command, &controller, &mut viewer)).await {
                            Ok(true) => {}
                            Ok(false) => break,
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {err:?}");
                break;
            }
        }
    }

    rl.save_history(history_file)?;

    println!("Goodbye!");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = load_args()?;
    let data_dir = expand_path(&args.data_dir)?;
    fs::create_dir_all(&data_dir)?;

    Box::pin(run_interactive_mode(args, data_dir)).await?;

    Ok(())
}
