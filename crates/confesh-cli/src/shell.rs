use crate::commands::{DELETE_PROMPT, confirm, write_identity};
use crate::error::Result as CliResult;

use confesh_app::{ActionOutcome, WallController, render};
use confesh_core::Credentials;

use std::io::Write;
use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
Commands:
  list                         show the wall again
  draft <text>                 set the draft
  anon                         toggle posting anonymously
  post [text]                  post the draft (or the given text)
  edit <n|id>                  start editing one of your confessions
  text <content>               replace the content being edited
  save | cancel                finish or abandon the edit
  delete <n|id>                delete one of your confessions
  sign-in <email> <password>
  sign-up <email> <password> [display name]
  sign-out | whoami | help | quit";

/// One line typed at the shell prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Empty,
    Help,
    List,
    Draft(String),
    ToggleAnonymous,
    Post(Option<String>),
    Edit(String),
    Text(String),
    Save,
    Cancel,
    Delete(String),
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        email: String,
        password: String,
        display_name: Option<String>,
    },
    SignOut,
    Whoami,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "" => Self::Empty,
            "help" | "?" => Self::Help,
            "list" | "refresh" => Self::List,
            "draft" => Self::Draft(rest.to_string()),
            "anon" => Self::ToggleAnonymous,
            "post" => Self::Post((!rest.is_empty()).then(|| rest.to_string())),
            "edit" => Self::Edit(required(word, rest, "<n|id>")?),
            "text" => Self::Text(rest.to_string()),
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "delete" => Self::Delete(required(word, rest, "<n|id>")?),
            "sign-in" => {
                let (email, password) = credentials(word, rest)?;
                Self::SignIn { email, password }
            }
            "sign-up" => {
                let (email, rest) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let (password, display_name) =
                    rest.trim().split_once(char::is_whitespace).unwrap_or((rest.trim(), ""));
                if email.is_empty() || password.is_empty() {
                    return Err(usage(word, "<email> <password> [display name]"));
                }
                let display_name = display_name.trim();
                Self::SignUp {
                    email: email.to_string(),
                    password: password.to_string(),
                    display_name: (!display_name.is_empty()).then(|| display_name.to_string()),
                }
            }
            "sign-out" => Self::SignOut,
            "whoami" => Self::Whoami,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("Unknown command '{other}'. Type 'help' for commands.")),
        };

        Ok(command)
    }
}

fn required(word: &str, rest: &str, args: &str) -> Result<String, String> {
    if rest.is_empty() {
        return Err(usage(word, args));
    }
    Ok(rest.to_string())
}

fn credentials(word: &str, rest: &str) -> Result<(String, String), String> {
    match rest.split_once(char::is_whitespace) {
        Some((email, password)) if !password.trim().is_empty() => {
            Ok((email.to_string(), password.trim().to_string()))
        }
        _ => Err(usage(word, "<email> <password>")),
    }
}

fn usage(word: &str, args: &str) -> String {
    format!("Usage: {word} {args}")
}

/// Interactive loop: read a command, apply it, print notices, redraw.
///
/// Ends on `quit` or end of input. Notices are shown inline, so the session
/// itself always completes.
pub(crate) async fn run<R, W>(
    controller: &mut WallController,
    title: &str,
    input: &mut R,
    out: &mut W,
) -> CliResult<ActionOutcome>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", render(controller, title))?;
    writeln!(out, "Type 'help' for commands.")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).await? == 0 {
            writeln!(out)?;
            break;
        }

        let command = match line.parse::<ShellCommand>() {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        let redraw = apply(command, controller, input, out).await?;

        for notice in controller.drain_notices() {
            writeln!(out, "{notice}")?;
        }
        if redraw {
            writeln!(out, "{}", render(controller, title))?;
        }
    }

    log::debug!("Shell session ended");
    Ok(ActionOutcome::Completed)
}

/// Apply one command. Returns whether the wall should be redrawn.
async fn apply<R, W>(
    command: ShellCommand,
    controller: &mut WallController,
    input: &mut R,
    out: &mut W,
) -> CliResult<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let redraw = match command {
        ShellCommand::Empty | ShellCommand::Quit => false,
        ShellCommand::Help => {
            writeln!(out, "{HELP}")?;
            false
        }
        ShellCommand::List => {
            controller.refresh().await;
            true
        }
        ShellCommand::Draft(text) => {
            controller.set_draft(text);
            true
        }
        ShellCommand::ToggleAnonymous => {
            controller.toggle_anonymous();
            true
        }
        ShellCommand::Post(text) => {
            if let Some(text) = text {
                controller.set_draft(text);
            }
            controller.submit_confession().await;
            true
        }
        ShellCommand::Edit(target) => {
            let id = resolve(controller, &target);
            if !controller.begin_edit(&id).is_completed() {
                writeln!(out, "No confession {target} on the wall that you can modify.")?;
                return Ok(false);
            }
            true
        }
        ShellCommand::Text(content) => {
            if controller.editing().is_none() {
                writeln!(out, "Nothing is being edited. Use 'edit <n>' first.")?;
                return Ok(false);
            }
            controller.set_edit_content(content);
            true
        }
        ShellCommand::Save => controller.save_edit().await != ActionOutcome::Ignored,
        ShellCommand::Cancel => controller.cancel_edit().is_completed(),
        ShellCommand::Delete(target) => {
            let id = resolve(controller, &target);
            if controller.request_delete(&id) != ActionOutcome::AwaitingConfirmation {
                writeln!(out, "No confession {target} on the wall that you can modify.")?;
                return Ok(false);
            }

            let question = format!("Delete confession {id}? {DELETE_PROMPT}");
            if confirm(&question, input, out).await? {
                controller.confirm_delete().await;
            } else {
                controller.cancel_delete();
            }
            true
        }
        ShellCommand::SignIn { email, password } => {
            controller.sign_in(&Credentials::new(email, password)).await;
            write_identity(controller, out)?;
            true
        }
        ShellCommand::SignUp {
            email,
            password,
            display_name,
        } => {
            controller
                .sign_up(&Credentials::new(email, password), display_name.as_deref())
                .await;
            write_identity(controller, out)?;
            true
        }
        ShellCommand::SignOut => {
            controller.sign_out().await;
            true
        }
        ShellCommand::Whoami => {
            write_identity(controller, out)?;
            false
        }
    };

    Ok(redraw)
}

/// Entry numbers as shown on the wall map to ids; anything else is taken as an id.
fn resolve(controller: &WallController, target: &str) -> String {
    target
        .parse::<usize>()
        .ok()
        .and_then(|position| controller.confession_at(position))
        .and_then(|c| c.id.clone())
        .unwrap_or_else(|| target.to_string())
}
