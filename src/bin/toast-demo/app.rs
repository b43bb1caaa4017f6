use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::signal;
use tokio::time::sleep;
use tracing::{info, warn};

use toast::Result;
use toast::config::Settings;
use toast::error::{ConfigError, Error as ToastError};
use toast::request::TextRun;
use toast::telemetry::init_tracing;
use toast::types::{Color, DurationPreset, Placement};
use toast::{ToastRequest, ToastScheduler};

use super::cli::Cli;
use super::console::ConsolePresenter;

const DEFAULT_CONFIG: &str = "toast.toml";
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut settings = Settings::from_env_and_file(&config_path)?;
    if let Some(duration) = cli.duration {
        settings.default_duration = duration;
    }
    if let Some(placement) = cli.placement {
        settings.default_placement = placement;
    }

    if cli.print_config {
        let json = serde_json::to_string_pretty(&settings)
            .map_err(|err| ToastError::from(ConfigError::Other(err.to_string())))?;
        println!("{json}");
        return Ok(());
    }

    let keyboard = Arc::new(AtomicBool::new(false));
    let (scheduler, task) =
        ToastScheduler::spawn(ConsolePresenter::new(Arc::clone(&keyboard)), settings);

    let requests = if cli.messages.is_empty() {
        gallery()
    } else {
        cli.messages.iter().map(|m| ToastRequest::text(m)).collect()
    };
    info!(count = requests.len(), "queueing toasts");
    for request in requests {
        scheduler.enqueue(request)?;
    }

    schedule_events(&cli, &scheduler, &keyboard);

    let mut interrupted = false;
    loop {
        tokio::select! {
            _ = signal::ctrl_c(), if !interrupted => {
                info!("interrupt received, dismissing every toast");
                interrupted = true;
                scheduler.dismiss_all()?;
            }
            () = sleep(POLL_INTERVAL) => {
                if scheduler.snapshot().await?.is_empty() {
                    break;
                }
            }
        }
    }

    scheduler.shutdown()?;
    if let Err(err) = task.await {
        warn!(error = %err, "scheduler task terminated unexpectedly");
    }
    Ok(())
}

/// Fire the simulated keyboard, tap and dismiss events requested on the
/// command line.
fn schedule_events(cli: &Cli, scheduler: &ToastScheduler, keyboard: &Arc<AtomicBool>) {
    if let Some(delay) = cli.keyboard_at {
        let scheduler = scheduler.clone();
        let keyboard = Arc::clone(keyboard);
        tokio::spawn(async move {
            sleep(delay).await;
            keyboard.store(true, Ordering::SeqCst);
            info!("keyboard shown");
            if let Err(err) = scheduler.reflow() {
                warn!(error = %err, "reflow skipped");
            }
        });
    }
    if let Some(delay) = cli.tap_after {
        let scheduler = scheduler.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            match scheduler.snapshot().await.map(|s| s.active_id()) {
                Ok(Some(id)) => {
                    info!(toast_id = %id, "tapping visible toast");
                    if let Err(err) = scheduler.tap(id) {
                        warn!(error = %err, "tap skipped");
                    }
                }
                Ok(None) => info!("nothing on screen to tap"),
                Err(err) => warn!(error = %err, "tap skipped"),
            }
        });
    }
    if let Some(delay) = cli.dismiss_after {
        let scheduler = scheduler.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            info!("dismissing every toast");
            if let Err(err) = scheduler.dismiss_all() {
                warn!(error = %err, "dismiss skipped");
            }
        });
    }
}

fn gallery() -> Vec<ToastRequest> {
    let styled = vec![
        TextRun::new("It's an Attributed Toast message.\n"),
        TextRun::new("RED ").color(Color::rgba(1.0, 0.0, 0.0, 1.0)),
        TextRun::new("GREEN ").color(Color::rgba(0.0, 1.0, 0.0, 1.0)),
        TextRun::new("BLUE ").color(Color::rgba(0.0, 0.0, 1.0, 1.0)),
    ];
    vec![
        ToastRequest::text("It's a SIMPLE Toast message."),
        ToastRequest::styled(styled),
        ToastRequest::builder("It's a Top Toast message.")
            .placement(Placement::Top)
            .build(),
        ToastRequest::builder("It's a Middle Toast message.")
            .placement(Placement::Middle)
            .build(),
        ToastRequest::builder("It's a Short (1s) Toast message.")
            .preset(DurationPreset::Short)
            .on_complete(|reason| info!(%reason, "short toast finished"))
            .build(),
    ]
}
