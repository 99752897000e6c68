use crate::{EMPTY_WALL_TEXT, LOADING_TEXT, WallController};

use confesh_core::Confession;

use chrono::Local;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render the wall as plain text.
pub fn render(controller: &WallController, title: &str) -> String {
    let mut lines = vec![title.to_string(), "=".repeat(title.chars().count())];

    match controller.identity() {
        Some(identity) => {
            lines.push(format!("Welcome, {}", identity.name_or_default()));
        }
        None => lines.push("Not signed in. Sign in to read and post confessions.".to_string()),
    }

    if controller.composer_visible() {
        lines.push(format!(
            "Draft: {} (post anonymously: {})",
            if controller.draft().is_empty() {
                "<empty>"
            } else {
                controller.draft()
            },
            if controller.draft_is_anonymous() {
                "yes"
            } else {
                "no"
            }
        ));
    }

    lines.push(String::new());

    if controller.is_busy() && controller.confessions().is_empty() {
        lines.push(LOADING_TEXT.to_string());
    } else if controller.confessions().is_empty() {
        lines.push(EMPTY_WALL_TEXT.to_string());
    } else {
        for (index, confession) in controller.confessions().iter().enumerate() {
            lines.extend(render_entry(
                index + 1,
                confession,
                controller.can_modify(confession),
            ));
        }
    }

    if let Some(editing) = controller.editing() {
        lines.push(String::new());
        lines.push(format!(
            "Editing {}: {}",
            editing.target_id().unwrap_or("?"),
            editing.content
        ));
    }

    if let Some(id) = controller.pending_delete() {
        lines.push(String::new());
        lines.push(format!(
            "Delete confession {id}? Are you sure you want to delete this confession?"
        ));
    }

    lines.join("\n")
}

fn render_entry(position: usize, confession: &Confession, owned: bool) -> Vec<String> {
    let created = confession
        .created_at
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT);

    let mut footer = format!("    by {} at {}", confession.display_author(), created);
    if confession.updated_at.is_some() {
        footer.push_str(" (edited)");
    }
    if owned {
        footer.push_str(" [edit/delete]");
    }

    vec![
        format!("[{position}] {}", confession.content),
        footer,
        format!("    id: {}", confession.id.as_deref().unwrap_or("-")),
    ]
}
