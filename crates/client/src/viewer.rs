//! Event loop of the viewer binary.

use std::future::Future;

use anyhow::Result;
use client_frontend_core::{Consumer, DisplayEvent};
use tokio::sync::broadcast::error::RecvError;

use crate::render;

/// Logs display events and the current frame until `stop` resolves.
///
/// The consumer is always shut down before returning, including when a
/// flush fails. Returns the number of frames rendered.
pub async fn follow(consumer: Consumer, stop: impl Future<Output = ()>) -> Result<usize> {
    let mut events = consumer.subscribe();
    let mut rendered = 0;
    tokio::pin!(stop);

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        let redraw = event.touches_rows();
                        log_event(&event);
                        if !redraw {
                            continue;
                        }
                        match consumer.flush().await {
                            Ok(frame) => {
                                for line in render::frame_lines(&frame) {
                                    tracing::info!("{line}");
                                }
                                rendered += 1;
                            }
                            Err(e) => {
                                tracing::error!("viewer flush failed: {}", e);
                                break;
                            }
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("viewer lagged behind by {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            _ = &mut stop => {
                tracing::info!("Interrupted, shutting down");
                break;
            }
        }
    }

    consumer.shutdown().await?;
    Ok(rendered)
}

fn log_event(event: &DisplayEvent) {
    match event {
        DisplayEvent::Narrated(line) => tracing::info!("{line}"),
        DisplayEvent::CombatStarted | DisplayEvent::CombatEnded => tracing::info!("{event}"),
        DisplayEvent::RoundChanged { round } => tracing::info!("Round {round}"),
        other => tracing::debug!("{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use client_frontend_core::ConsumerConfig;
    use snapshot_protocol::{
        CombatantEntry, InMemorySnapshotStore, SnapshotDocument, SnapshotStore, WireKind,
    };

    fn config() -> ConsumerConfig {
        ConsumerConfig {
            poll_interval: Duration::from_millis(10),
            ..ConsumerConfig::default()
        }
    }

    #[tokio::test]
    async fn renders_frames_and_shuts_down_on_stop() {
        let store = Arc::new(InMemorySnapshotStore::new());
        let consumer = Consumer::builder()
            .config(config())
            .store(store.clone())
            .build()
            .unwrap();

        let writer = store.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            let wolf = CombatantEntry {
                id: "id_1".into(),
                name: "Wolf 1".into(),
                display_name: "Wolf".into(),
                kind: WireKind::Monster,
                hp: Some(11),
                max_hp: Some(11),
                ..CombatantEntry::default()
            };
            writer
                .write(&SnapshotDocument::running(1, vec!["id_1".into()], vec![wolf]))
                .unwrap();
        });

        let rendered = follow(consumer, tokio::time::sleep(Duration::from_millis(300)))
            .await
            .unwrap();
        assert!(rendered >= 1);
    }

    #[tokio::test]
    async fn stops_cleanly_without_any_snapshot() {
        let consumer = Consumer::builder()
            .config(config())
            .store(Arc::new(InMemorySnapshotStore::new()))
            .build()
            .unwrap();

        let rendered = follow(consumer, std::future::ready(())).await.unwrap();
        assert_eq!(rendered, 0);
    }
}
