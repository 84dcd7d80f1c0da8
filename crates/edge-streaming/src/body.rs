//! Response body over a render stream.

use std::fmt::Display;
use std::pin::Pin;
use std::task::{Context, Poll};

use edge_core::RenderError;
use futures::stream::{self, BoxStream};
use futures::{Sink, SinkExt, Stream, StreamExt};

use crate::render::RenderStream;

/// Streaming HTML body.
///
/// Yields the shell first, then sections as they render.
pub struct HtmlBody {
    inner: BoxStream<'static, Vec<u8>>,
    all_ready: bool,
}

impl HtmlBody {
    /// Wrap a render stream.
    pub fn from_render(render: RenderStream) -> Self {
        let all_ready = render.is_all_ready();
        let inner = stream::unfold(render, |mut render| async move {
            let chunk = render.next_chunk().await?;
            Some((chunk, render))
        })
        .boxed();

        Self { inner, all_ready }
    }

    /// A body with fixed content.
    pub fn full(content: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: stream::iter(vec![content.into()]).boxed(),
            all_ready: true,
        }
    }

    /// An empty body.
    pub fn empty() -> Self {
        Self {
            inner: stream::empty().boxed(),
            all_ready: true,
        }
    }

    /// Whether all content was rendered before the body was created.
    pub fn is_all_ready(&self) -> bool {
        self.all_ready
    }

    /// Collect the whole body into a string.
    pub async fn collect_string(self) -> String {
        let chunks: Vec<Vec<u8>> = self.inner.collect().await;
        String::from_utf8_lossy(&chunks.concat()).into_owned()
    }

    /// Write every chunk into `sink`, returning the byte count.
    ///
    /// Works with any `Sink<Vec<u8>>`, including Spin's `OutgoingBody`.
    pub async fn pipe_to<S, E>(mut self, sink: &mut S) -> Result<usize, RenderError>
    where
        S: Sink<Vec<u8>, Error = E> + Unpin,
        E: Display,
    {
        let mut written = 0;
        while let Some(chunk) = self.inner.next().await {
            written += chunk.len();
            sink.send(chunk)
                .await
                .map_err(|e| RenderError::Stream(e.to_string()))?;
        }
        Ok(written)
    }
}

impl Stream for HtmlBody {
    type Item = Vec<u8>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl std::fmt::Debug for HtmlBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlBody")
            .field("all_ready", &self.all_ready)
            .finish_non_exhaustive()
    }
}
