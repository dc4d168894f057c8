//! CLI command definitions and terminal rendering.
//!
//! Uses clap derive macros for argument definitions.

pub mod args;

use colored::Colorize;

use userstore::models::User;

/// Render users as an aligned table for `users list`.
pub fn render_users(users: &[User]) -> String {
    if users.is_empty() {
        return "No users stored.\n".to_string();
    }

    let id_width = users
        .iter()
        .map(|u| u.id.to_string().len())
        .max()
        .unwrap_or(0)
        .max(2);
    // Padding counts chars, so the width must too.
    let name_width = users
        .iter()
        .map(|u| u.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = format!(
        "  {}  {}  {}\n",
        format!("{:>id_width$}", "id").cyan(),
        format!("{:<name_width$}", "name").cyan(),
        "email".cyan(),
    );
    for user in users {
        out.push_str(&format!(
            "  {:>id_width$}  {}  {}\n",
            user.id,
            format!("{:<name_width$}", user.name).bold(),
            user.email.dimmed(),
        ));
    }
    out
}
