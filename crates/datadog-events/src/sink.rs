// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::Sender;

use crate::error::SinkError;
use crate::event::Event;

/// Downstream consumer of forwarded events.
#[async_trait]
pub trait EventSink: Send {
    /// Accepts one event. An error stops the poller.
    async fn put(&mut self, event: Event) -> Result<(), SinkError>;
}

/// Queue sink: waits for capacity, fails once the receiver is dropped.
#[async_trait]
impl EventSink for Sender<Event> {
    async fn put(&mut self, event: Event) -> Result<(), SinkError> {
        self.send(event).await.map_err(|_| SinkError::Closed)
    }
}

/// Writes each event as a single line of JSON and flushes after every line.
/// A slow reader on the other end holds the poller back instead of blocking
/// a runtime worker.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> EventSink for JsonLinesSink<W> {
    async fn put(&mut self, event: Event) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(&event)?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        self.writer.flush().await?;
        Ok(())
    }
}
