//! Scripted transport for tests: replays queued replies and records every
//! call so orchestrator tests can assert prompts, models, configs, and
//! call counts.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc::{self, Receiver};

use super::transport::{GeminiTransport, InlinePayload, StreamChunk};
use super::{GeminiConfig, GeminiError};

/// One scripted reply, consumed per call in FIFO order.
pub enum StubReply {
    /// A successful stream delivering these chunks, then closing.
    Chunks(Vec<StreamChunk>),
    /// A transport-level API failure raised before any chunk.
    Fail { status: u16, message: String },
}

/// Everything observed about one `stream_generate` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub prompt: String,
    pub config: GeminiConfig,
}

pub struct StubTransport {
    replies: Mutex<VecDeque<StubReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubTransport {
    pub fn new(replies: Vec<StubReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeminiTransport for StubTransport {
    async fn stream_generate(
        &self,
        model: &str,
        prompt: &str,
        config: &GeminiConfig,
    ) -> Result<Receiver<Result<StreamChunk, GeminiError>>, GeminiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
            config: config.clone(),
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("stub transport exhausted: unexpected extra backend call");

        match reply {
            StubReply::Fail { status, message } => Err(GeminiError::Api { status, message }),
            StubReply::Chunks(chunks) => {
                let (tx, rx) = mpsc::channel(chunks.len().max(1));
                for chunk in chunks {
                    tx.send(Ok(chunk)).await.expect("stub channel send");
                }
                Ok(rx)
            }
        }
    }
}

/// A stream chunk carrying only a text fragment.
pub fn text_chunk(text: &str) -> StreamChunk {
    StreamChunk {
        text: Some(text.to_string()),
        inline_data: None,
    }
}

/// A stream chunk carrying only an inline payload.
pub fn image_chunk(data: &str, mime_type: Option<&str>) -> StreamChunk {
    StreamChunk {
        text: None,
        inline_data: Some(InlinePayload {
            mime_type: mime_type.map(str::to_string),
            data: data.to_string(),
        }),
    }
}
