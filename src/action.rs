//! Action trait and type erasure.
//!
//! # How async actions are stored
//!
//! A controller holds actions of *different* concrete types in a single
//! table. Rust collections can only hold one concrete type, so actions are
//! stored as trait objects (`dyn ErasedAction`) behind a common interface.
//!
//! The chain from controller code to vtable call is:
//!
//! ```text
//! async fn home(cx: Context) -> Response { … }     ← controller writes this
//!        ↓ home.into_boxed_action()                ← Action blanket impl
//! Arc::new(FnAction(home))                         ← heap-allocated wrapper
//!        ↓  stored as BoxedAction = Arc<dyn ErasedAction>
//! action.call(cx)  at request time                 ← one vtable dispatch
//! ```
//!
//! The only runtime cost per request is one Arc clone plus one virtual
//! call — negligible next to the file and database I/O the action performs.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::controller::Context;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Action` trait's `into_boxed_action` method.
#[doc(hidden)]
pub trait ErasedAction {
    fn call(&self, cx: Context) -> BoxFuture;
}

/// A heap-allocated, type-erased action shared across concurrent requests.
#[doc(hidden)]
pub type BoxedAction = Arc<dyn ErasedAction + Send + Sync + 'static>;

// ── Public Action trait ───────────────────────────────────────────────────────

/// Implemented for every valid controller action.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` with the signature:
///
/// ```text
/// async fn name(cx: Context) -> impl IntoResponse
/// ```
///
/// The trait is sealed: only the blanket impl below can satisfy it.
pub trait Action: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_action(self) -> BoxedAction;
}

mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Action for F
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_action(self) -> BoxedAction {
        Arc::new(FnAction(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Newtype wrapper that holds a concrete action `F` and implements
/// [`ErasedAction`], bridging the typed world to the trait-object world.
struct FnAction<F>(F);

impl<F, Fut, R> ErasedAction for FnAction<F>
where
    F: Fn(Context) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, cx: Context) -> BoxFuture {
        let fut = (self.0)(cx);
        Box::pin(async move { fut.await.into_response() })
    }
}
