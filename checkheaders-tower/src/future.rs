use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use http::Response;
use pin_project::pin_project;

const POLL_AFTER_READY_ERROR: &str = "HeaderMatchFuture can't be polled after finishing";

/// Future returned by [`HeaderMatchService`](crate::service::HeaderMatchService).
///
/// Either drives the inner service's future for an allowed request, or
/// resolves immediately to the prepared denial response.
#[pin_project(project = HeaderMatchFutureProj)]
pub enum HeaderMatchFuture<F, ResBody> {
    /// The request was allowed and forwarded.
    Upstream {
        #[pin]
        inner: F,
    },
    /// The request was denied; the response is ready.
    Denied {
        /// Taken on completion.
        response: Option<Response<ResBody>>,
    },
}

impl<F, ResBody> HeaderMatchFuture<F, ResBody> {
    /// Future forwarding to the inner service.
    pub fn upstream(inner: F) -> Self {
        HeaderMatchFuture::Upstream { inner }
    }

    /// Future resolving to `response` on first poll.
    pub fn denied(response: Response<ResBody>) -> Self {
        HeaderMatchFuture::Denied {
            response: Some(response),
        }
    }
}

impl<F, ResBody, E> Future for HeaderMatchFuture<F, ResBody>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            HeaderMatchFutureProj::Upstream { inner } => inner.poll(cx),
            HeaderMatchFutureProj::Denied { response } => {
                Poll::Ready(Ok(response.take().expect(POLL_AFTER_READY_ERROR)))
            }
        }
    }
}
