use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use raygun_core::protocol::Request;

thread_local! {
    static CURRENT_REQUEST: RefCell<Vec<Arc<Request>>> = const { RefCell::new(Vec::new()) };
}

/// Provides access to the HTTP request currently being served.
///
/// The accessor reads from a process-wide, thread-local stack of requests.
/// Server middleware (such as the one behind this crate's `tower` feature)
/// pushes the request context for the duration of each unit of work;
/// enrichers read the innermost entry. The accessor itself carries no state,
/// so the default instance is the process-wide accessor.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestContextAccessor;

impl RequestContextAccessor {
    /// Creates the process-wide accessor.
    pub fn new() -> Self {
        Self
    }

    /// Returns the request currently being served on this thread, if any.
    pub fn current(&self) -> Option<Arc<Request>> {
        CURRENT_REQUEST.with(|stack| stack.borrow().last().cloned())
    }

    /// Makes the given request current until the returned guard is dropped.
    ///
    /// Entering is reentrant; the previous request becomes current again
    /// when the guard drops.
    pub fn enter(&self, request: Arc<Request>) -> ContextGuard {
        CURRENT_REQUEST.with(|stack| stack.borrow_mut().push(request));
        ContextGuard {
            _not_send: PhantomData,
        }
    }
}

/// A guard returned by [`RequestContextAccessor::enter`].
///
/// Restores the previously current request when dropped. The guard is not
/// `Send`; it must be dropped on the thread that created it.
pub struct ContextGuard {
    _not_send: PhantomData<*const ()>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_REQUEST.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_is_reentrant() {
        let accessor = RequestContextAccessor::new();
        assert!(accessor.current().is_none());

        let outer = Arc::new(Request {
            url: Some("https://example.com/a".into()),
            ..Default::default()
        });
        let inner = Arc::new(Request {
            url: Some("https://example.com/b".into()),
            ..Default::default()
        });

        let _outer_guard = accessor.enter(outer.clone());
        assert_eq!(accessor.current().unwrap().url, outer.url);
        {
            let _inner_guard = accessor.enter(inner.clone());
            assert_eq!(accessor.current().unwrap().url, inner.url);
        }
        assert_eq!(accessor.current().unwrap().url, outer.url);
    }
}
