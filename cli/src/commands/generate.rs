//! Generate command implementation.

use qrpanel_core::client::{CancelHandle, Trigger};
use qrpanel_core::{
    Config, DashboardPage, GeneratorPage, HttpBackend, LocalBackend, QrBackend, QrResult,
};

use tokio::sync::watch;

use crate::ui::{print_banner, print_notifications, print_qr_code};

/// Generate a code, print it and save the PNG.
pub async fn generate(
    config: Config,
    content: &str,
    dashboard: bool,
    offline: bool,
) -> anyhow::Result<()> {
    print_banner();

    if offline {
        tracing::info!("rendering locally, backend not contacted");
        run(LocalBackend::default(), config, content, dashboard).await
    } else {
        let backend = HttpBackend::from_config(&config)?;
        println!("\x1b[1mServer:\x1b[0m {}", config.base_url);
        run(backend, config, content, dashboard).await
    }
}

async fn run<B: QrBackend>(
    backend: B,
    config: Config,
    content: &str,
    dashboard: bool,
) -> anyhow::Result<()> {
    if dashboard {
        let mut page = DashboardPage::new(backend, Vec::new(), config);
        install_cancel(page.cancel_handle())?;
        print_loading(page.generator().watch_trigger());

        let outcome = page.generate(content).await;
        print_notifications(page.notifications()).await;
        let result = outcome?;

        show_result(&result);
        if let Some(id) = &result.id {
            let path = page.download(id).await?;
            println!("\x1b[2mSaved to {}\x1b[0m", path.display());
        }
        println!(
            "\x1b[1mDashboard:\x1b[0m {} card(s)",
            page.dashboard().total()
        );
    } else {
        let mut page = GeneratorPage::new(backend, config);
        install_cancel(page.cancel_handle())?;
        print_loading(page.generator().watch_trigger());

        let outcome = page.generate(content).await;
        print_notifications(page.notifications()).await;
        let result = outcome?;

        show_result(&result);
        let path = page.download().await?;
        println!("\x1b[2mSaved to {}\x1b[0m", path.display());
    }

    Ok(())
}

/// Ctrl+C cancels the request in flight instead of killing the process.
fn install_cancel(cancel: CancelHandle) -> anyhow::Result<()> {
    ctrlc::set_handler(move || {
        println!("\n\x1b[1;33mCancelling...\x1b[0m");
        cancel.cancel();
    })?;
    Ok(())
}

/// Status line whenever the generate trigger enters its loading state.
fn print_loading(mut states: watch::Receiver<Trigger>) {
    tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let trigger = states.borrow_and_update().clone();
            if !trigger.enabled {
                println!("\x1b[2m{}\x1b[0m", trigger.label);
            }
        }
    });
}

fn show_result(result: &QrResult) {
    println!();
    print_qr_code(&result.content);
    println!();
    if let Some(id) = &result.id {
        println!("\x1b[1mID:\x1b[0m      {}", id);
    }
    println!("\x1b[1mContent:\x1b[0m {}", result.content);
}
