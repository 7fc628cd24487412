//! Server-rendered pages.
//!
//! Templates are compiled into the binary. Their `.html` names turn on
//! minijinja's HTML auto-escaping, so model text is safe to interpolate.

use anyhow::Result;
use minijinja::{context, Environment, HtmlEscape};

use crate::store::Reminder;

const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
const NOTIFICATION_TEMPLATE: &str = include_str!("templates/notification.html");

pub const APP_JS: &str = include_str!("assets/app.js");

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)?;
    env.add_template("notification.html", NOTIFICATION_TEMPLATE)?;
    Ok(env)
}

pub fn render_home(reminders: &[Reminder], initialization_error: Option<&str>) -> Result<String> {
    let env = environment()?;
    let html = env.get_template("index.html")?.render(context! {
        reminders => reminders,
        initialization_error => initialization_error,
    })?;
    Ok(html)
}

pub fn render_notification(reminder: &Reminder) -> Result<String> {
    let env = environment()?;
    let html = env
        .get_template("notification.html")?
        .render(context! { reminder => reminder })?;
    Ok(html)
}

/// Bare fragment used when the notification template cannot be rendered.
pub fn fallback_notification(reminder: &Reminder) -> String {
    format!("<div>New reminder: {}</div>", HtmlEscape(&reminder.message))
}

/// Render the notification fragment, degrading to [`fallback_notification`].
pub fn notification_or_fallback(reminder: &Reminder) -> String {
    match render_notification(reminder) {
        Ok(html) => html,
        Err(err) => {
            tracing::error!(error = %err, "template rendering error");
            fallback_notification(reminder)
        }
    }
}
