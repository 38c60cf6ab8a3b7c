//! The [`Middleware`] trait and the [`Next`] continuation.
//!
//! A stage receives the request and the rest of the chain. It may answer
//! on its own (the access guard does) or call [`Next::run`] and inspect the
//! response on the way out.

use crate::context::MiddlewareContext;
use crate::types::{Request, Response};
use std::future::Future;
use std::pin::Pin;

/// A boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One stage of the request pipeline.
pub trait Middleware: Send + Sync + 'static {
    /// Stage name, used in logs and by [`crate::Pipeline::stage_names`].
    fn name(&self) -> &'static str;

    /// Handles `request`, usually by delegating to `next`.
    fn process<'a>(
        &'a self,
        ctx: &'a mut MiddlewareContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, Response>;
}

/// The remainder of the chain: further stages, then the handler.
pub struct Next<'a> {
    inner: NextInner<'a>,
}

type HandlerFn<'a> =
    Box<dyn FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, Response> + Send + 'a>;

enum NextInner<'a> {
    Chain {
        middleware: &'a dyn Middleware,
        next: Box<Next<'a>>,
    },
    Handler(HandlerFn<'a>),
}

impl<'a> Next<'a> {
    pub(crate) fn new(middleware: &'a dyn Middleware, next: Next<'a>) -> Self {
        Self {
            inner: NextInner::Chain {
                middleware,
                next: Box::new(next),
            },
        }
    }

    /// A chain consisting only of `f`.
    pub fn handler<F>(f: F) -> Self
    where
        F: FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, Response> + Send + 'a,
    {
        Self {
            inner: NextInner::Handler(Box::new(f)),
        }
    }

    /// Runs the rest of the chain.
    pub async fn run(self, ctx: &mut MiddlewareContext, request: Request) -> Response {
        match self.inner {
            NextInner::Chain { middleware, next } => middleware.process(ctx, request, *next).await,
            NextInner::Handler(handler) => handler(ctx, request).await,
        }
    }
}
