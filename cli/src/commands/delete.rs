//! Delete command implementation.

use std::io::{self, BufRead, Write};

use qrpanel_core::dashboard::DeleteOutcome;
use qrpanel_core::{Config, DashboardPage, HttpBackend, QrId};

use crate::ui::print_notifications;

/// Delete a stored code after confirmation.
pub async fn delete(config: Config, id: String, yes: bool) -> anyhow::Result<()> {
    let backend = HttpBackend::from_config(&config)?;
    let mut page = DashboardPage::new(backend, Vec::new(), config);

    let mut confirm = |message: &str| yes || prompt(message);
    let outcome = page.delete(&QrId::new(id), &mut confirm).await;
    print_notifications(page.notifications()).await;

    match outcome? {
        DeleteOutcome::Declined => println!("\x1b[2mNothing deleted.\x1b[0m"),
        DeleteOutcome::Deleted { .. } => {}
    }
    Ok(())
}

/// Ask a yes/no question on the terminal; anything but `y`/`yes` is no.
fn prompt(message: &str) -> bool {
    print!("{} [y/N] ", message);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
