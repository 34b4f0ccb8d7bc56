use std::borrow::Cow::{self, Owned};

use clap::{Parser, Subcommand, ValueEnum};
use holder_name::{
    BootstrapOutcome, Field, HolderNameController, HtmlContent, LocalHtmlViewer, SubmitOutcome,
    viewer::{VIEWER_NAVIGATION_TITLE, VIEWER_TITLE},
};
use rustyline::{Completer, Helper, Hinter, Validator, highlight::Highlighter, hint::HistoryHinter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    First,
    Last,
}

impl From<FieldArg> for Field {
    fn from(val: FieldArg) -> Self {
        match val {
            FieldArg::First => Field::First,
            FieldArg::Last => Field::Last,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Parser)]
pub enum Command {
    /// Exit the interactive shell
    #[command(hide = true)]
    Exit,

    /// Load the session and populate the form
    Load,

    /// Print the current form state
    Show,

    /// Type a first name and leave the input
    First {
        #[arg(default_value = "")]
        value: String,
    },

    /// Type a last name and leave the input
    Last {
        #[arg(default_value = "")]
        value: String,
    },

    /// Type into an input without leaving it
    Input {
        field: FieldArg,
        #[arg(default_value = "")]
        value: String,
    },

    /// Leave an input
    Blur { field: FieldArg },

    /// Run the client-side check without submitting
    Check,

    /// Validate and store the name
    Submit,

    /// Local HTML viewer
    #[command(subcommand)]
    Viewer(ViewerCommand),
}

#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
pub enum ViewerCommand {
    /// Open or close the view
    Toggle,
    /// Print the button label and the current content
    Show,
}

#[derive(Helper, Completer, Hinter, Validator)]
pub struct CliHelper {
    #[rustyline(Hinter)]
    pub hinter: HistoryHinter,
}

impl Highlighter for CliHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned("\x1b[1m".to_owned() + hint + "\x1b[m")
    }
}

/// Runs one command. Returns `false` when the shell should stop.
pub(crate) async fn execute_command(
    command: Command,
    controller: &HolderNameController,
    viewer: &mut LocalHtmlViewer,
) -> Result<bool, anyhow::Error> {
    match command {
        Command::Exit => Ok(false),
        Command::Load => {
            match controller.bootstrap().await? {
                BootstrapOutcome::Ready => print_value(&controller.form())?,
                BootstrapOutcome::Navigate { navigation } => {
                    println!("Navigate to {}", navigation.location());
                }
            }
            Ok(true)
        }
        Command::Show => {
            print_value(&controller.form())?;
            Ok(true)
        }
        Command::First { value } => {
            enter(controller, Field::First, &value);
            Ok(true)
        }
        Command::Last { value } => {
            enter(controller, Field::Last, &value);
            Ok(true)
        }
        Command::Input { field, value } => {
            println!("{}", controller.on_input(field.into(), &value));
            Ok(true)
        }
        Command::Blur { field } => {
            println!("{}", controller.on_blur(field.into()));
            println!("{}", controller.form().name_label);
            Ok(true)
        }
        Command::Check => {
            print_value(&controller.check())?;
            Ok(true)
        }
        Command::Submit => {
            let outcome = controller.submit().await?;
            print_value(&controller.form())?;
            match outcome {
                SubmitOutcome::Completed { navigation } => {
                    println!("Navigate to {}", navigation.location());
                }
                outcome => print_value(&outcome)?,
            }
            Ok(true)
        }
        Command::Viewer(ViewerCommand::Toggle) => {
            viewer.toggle();
            print_viewer(viewer);
            Ok(true)
        }
        Command::Viewer(ViewerCommand::Show) => {
            print_viewer(viewer);
            Ok(true)
        }
    }
}

fn enter(controller: &HolderNameController, field: Field, value: &str) {
    let shown = controller.on_input(field, value);
    if shown != value {
        println!("Capped to '{shown}'");
    }
    println!("{}", controller.on_blur(field));
    println!("{}", controller.form().name_label);
}

fn viewer_header(viewer: &LocalHtmlViewer) -> String {
    format!("{VIEWER_NAVIGATION_TITLE} | {VIEWER_TITLE} [{}]", viewer.button_label())
}

fn print_viewer(viewer: &LocalHtmlViewer) {
    println!("{}", viewer_header(viewer));
    match viewer.content() {
        Some(HtmlContent::Bundled { path, .. }) => println!("{}", path.display()),
        Some(HtmlContent::Inline(html)) => println!("{html}"),
        None => {}
    }
}

pub(crate) fn print_value<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    let serialized = serde_json::to_string_pretty(value)?;
    println!("{serialized}");
    Ok(())
}
