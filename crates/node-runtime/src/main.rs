//! # Context Ledger Node Runtime
//!
//! Serves requests as JSON lines: one request body per stdin line, one
//! `REPLY` / `REQNACK` / `REJECT` message per stdout line. Replies are
//! written as requests finish, so a write waiting for its commit does not
//! hold back later reads.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Install logging (stderr) and register metrics
//! 3. Wire subsystems and spawn ordering, commit loop and cleanup
//! 4. Serve stdin until EOF or Ctrl-C
//!
//! ## Shutdown Sequence
//!
//! 1. Stop reading input
//! 2. Wait for in-flight requests to finish
//! 3. Drain ordering and the commit loop, stop the cleanup task
//! 4. Flush stdout

use anyhow::{Context, Result};
use ledger_telemetry::init_telemetry;
use node_runtime::{process_line, NodeConfig, NodeContainer};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("Failed to load configuration")?;
    let telemetry =
        init_telemetry(&config.telemetry).context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  Context Ledger Node Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let node = NodeContainer::start(config).context("Failed to start node")?;
    let handler = node.handler();

    let (out_tx, out_rx) = mpsc::unbounded_channel::<String>();
    let writer = tokio::spawn(write_lines(out_rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = JoinSet::new();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    info!("Node is running. Send requests on stdin; EOF or Ctrl+C to stop.");

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let handler = Arc::clone(&handler);
                    let out = out_tx.clone();
                    in_flight.spawn(async move {
                        match process_line(handler.as_ref(), &line).await {
                            Ok(Some(message)) => {
                                // Receiver only closes after every sender is gone.
                                let _ = out.send(message);
                            }
                            Ok(None) => {}
                            Err(err) => error!(error = %err, "Failed to encode reply"),
                        }
                    });
                }
                Ok(None) => {
                    info!("Input closed");
                    break;
                }
                Err(err) => {
                    error!(error = %err, "Failed to read input");
                    break;
                }
            },
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                if let Err(err) = joined {
                    warn!(error = %err, "Request task failed");
                }
            }
            result = &mut ctrl_c => {
                if let Err(err) = result {
                    error!(error = %err, "Failed to listen for Ctrl+C");
                }
                info!("Interrupt received");
                break;
            }
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        if let Err(err) = joined {
            warn!(error = %err, "Request task failed");
        }
    }
    drop(out_tx);
    drop(handler);

    node.shutdown().await;
    writer.await.context("Output writer panicked")??;

    match telemetry.metrics().encode() {
        Ok(metrics) => tracing::debug!(metrics = %metrics, "Final metrics"),
        Err(err) => warn!(error = %err, "Failed to encode metrics"),
    }

    Ok(())
}

async fn write_lines(mut messages: mpsc::UnboundedReceiver<String>) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    while let Some(message) = messages.recv().await {
        stdout.write_all(message.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }
    Ok(())
}
