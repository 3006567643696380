use crate::events::AppEvent;
use anyhow::Context;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the control socket and the config watcher on a dedicated tokio
/// runtime. Both report back to the GTK thread through `tx`.
pub fn start_background_services(tx: Sender<AppEvent>) -> anyhow::Result<()> {
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;

    thread::Builder::new()
        .name("vitrine-services".into())
        .spawn(move || {
            rt.block_on(async {
                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::sys::server::run_server(tx).await;
                    });
                }

                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::config::run_async_watcher(tx).await;
                    });
                }

                std::future::pending::<()>().await;
            });
        })
        .context("Failed to spawn background service thread")?;

    Ok(())
}
