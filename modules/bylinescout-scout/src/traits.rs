// Trait abstraction for the render accessor.
//
// PageRenderer puts the rendering service behind one trait so the
// pipeline can be driven by a deterministic mock in tests: no browser,
// no network. `cargo test` in seconds.

use async_trait::async_trait;
use render_client::{ContextHandle, RenderClient, RenderRequest, RenderedPage, Result};

#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render a page in the shared outer session.
    async fn content(&self, req: &RenderRequest) -> Result<RenderedPage>;

    /// Open an isolated browsing context for a single lookup.
    async fn open_context(&self) -> Result<ContextHandle>;

    /// Render a page inside an isolated context.
    async fn content_in_context(
        &self,
        ctx: &ContextHandle,
        req: &RenderRequest,
    ) -> Result<RenderedPage>;

    /// Tear the context down. Called unconditionally after a lookup
    /// attempt, success or failure.
    async fn close_context(&self, ctx: ContextHandle) -> Result<()>;
}

#[async_trait]
impl PageRenderer for RenderClient {
    async fn content(&self, req: &RenderRequest) -> Result<RenderedPage> {
        RenderClient::content(self, req).await
    }

    async fn open_context(&self) -> Result<ContextHandle> {
        RenderClient::open_context(self).await
    }

    async fn content_in_context(
        &self,
        ctx: &ContextHandle,
        req: &RenderRequest,
    ) -> Result<RenderedPage> {
        RenderClient::content_in_context(self, ctx, req).await
    }

    async fn close_context(&self, ctx: ContextHandle) -> Result<()> {
        RenderClient::close_context(self, ctx).await
    }
}
