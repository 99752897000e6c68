use crate::error::Result as CliResult;
use crate::shell;

use confesh_app::{ActionOutcome, Notice, WallController, render};
use confesh_core::Credentials;

use std::io::Write;

use clap::Subcommand;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub(crate) const DELETE_PROMPT: &str = "Are you sure you want to delete this confession?";

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Show the wall
    List,

    /// Post a confession
    Post {
        /// What you want to confess
        content: String,

        /// Hide your name on the wall
        #[arg(long)]
        anonymous: bool,
    },

    /// Replace the content of one of your confessions
    Edit {
        /// Confession ID
        id: String,

        /// New content
        content: String,
    },

    /// Delete one of your confessions
    Delete {
        /// Confession ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Sign in with email and password
    SignIn {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in
    SignUp {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Name shown on your confessions
        #[arg(long)]
        display_name: Option<String>,
    },

    /// Sign out and forget the stored session
    SignOut,

    /// Show who is signed in
    Whoami,

    /// Interactive wall session
    Shell,
}

/// Run one command against the controller, writing user-facing output to `out`.
///
/// Backend failures are left queued as notices on the controller.
pub(crate) async fn execute<R, W>(
    command: Commands,
    controller: &mut WallController,
    title: &str,
    input: &mut R,
    out: &mut W,
) -> CliResult<ActionOutcome>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let outcome = match command {
        Commands::List => {
            writeln!(out, "{}", render(controller, title))?;
            ActionOutcome::Completed
        }

        Commands::Post { content, anonymous } => {
            controller.set_draft(content);
            controller.set_anonymous(anonymous);
            let outcome = controller.submit_confession().await;
            if outcome.is_completed() {
                writeln!(out, "Posted.")?;
            }
            outcome
        }

        Commands::Edit { id, content } => {
            if !controller.begin_edit(&id).is_completed() {
                return not_modifiable(&id, out);
            }
            controller.set_edit_content(content);
            let outcome = controller.save_edit().await;
            if outcome.is_completed() {
                writeln!(out, "Updated {id}.")?;
            }
            outcome
        }

        Commands::Delete { id, yes } => {
            if controller.request_delete(&id) != ActionOutcome::AwaitingConfirmation {
                return not_modifiable(&id, out);
            }

            let question = format!("Delete confession {id}? {DELETE_PROMPT}");
            if !yes && !confirm(&question, input, out).await? {
                controller.cancel_delete();
                writeln!(out, "Cancelled.")?;
                return Ok(ActionOutcome::Completed);
            }

            let outcome = controller.confirm_delete().await;
            if outcome.is_completed() {
                writeln!(out, "Deleted {id}.")?;
            }
            outcome
        }

        Commands::SignIn { email, password } => {
            let outcome = controller.sign_in(&Credentials::new(email, password)).await;
            if outcome.is_completed() {
                write_identity(controller, out)?;
            }
            outcome
        }

        Commands::SignUp {
            email,
            password,
            display_name,
        } => {
            let outcome = controller
                .sign_up(&Credentials::new(email, password), display_name.as_deref())
                .await;
            if outcome.is_completed() {
                write_identity(controller, out)?;
            }
            outcome
        }

        Commands::SignOut => {
            let outcome = controller.sign_out().await;
            if outcome.is_completed() {
                writeln!(out, "Signed out.")?;
            }
            outcome
        }

        Commands::Whoami => {
            write_identity(controller, out)?;
            ActionOutcome::Completed
        }

        Commands::Shell => shell::run(controller, title, input, out).await?,
    };

    Ok(outcome)
}

/// Exit status of a one-shot command: any error notice fails the run.
pub(crate) fn succeeded(outcome: ActionOutcome, notices: &[Notice]) -> bool {
    outcome != ActionOutcome::Failed && !notices.iter().any(|n| n.is_error())
}

/// Ask a yes/no question; anything but `y`/`yes` (or end of input) is a no.
pub(crate) async fn confirm<R, W>(question: &str, input: &mut R, out: &mut W) -> CliResult<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{question} [y/N] ")?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer).await? == 0 {
        writeln!(out)?;
        return Ok(false);
    }

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

pub(crate) fn write_identity<W: Write>(controller: &WallController, out: &mut W) -> CliResult<()> {
    match controller.identity() {
        Some(identity) => writeln!(
            out,
            "Signed in as {} ({})",
            identity.name_or_default(),
            identity.id
        )?,
        None => writeln!(out, "Not signed in.")?,
    }
    Ok(())
}

fn not_modifiable<W: Write>(id: &str, out: &mut W) -> CliResult<ActionOutcome> {
    writeln!(out, "No confession {id} on the wall that you can modify.")?;
    Ok(ActionOutcome::Failed)
}
