//! De-duplication of concurrent identical requests.
//!
//! The first caller for a key starts the request; anyone asking for the same
//! key before it resolves awaits the same pending result. The entry is dropped
//! once the request resolves, so failures are never remembered.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::debug;

type Pending<T, E> = Shared<BoxFuture<'static, Result<T, E>>>;

pub struct SharedRequests<K, T, E> {
    pending: Mutex<HashMap<K, Pending<T, E>>>,
}

impl<K, T, E> Default for SharedRequests<K, T, E> {
    fn default() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, T, E> SharedRequests<K, T, E>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Await the request for `key`, calling `start` only if none is in flight.
    pub async fn run<F>(&self, key: K, start: F) -> Result<T, E>
    where
        F: FnOnce() -> BoxFuture<'static, Result<T, E>>,
    {
        let request = {
            let mut pending = self.pending.lock().unwrap();
            match pending.get(&key) {
                Some(existing) => {
                    debug!("Joining in-flight request for {:?}", key);
                    existing.clone()
                }
                None => {
                    let request = start().shared();
                    pending.insert(key.clone(), request.clone());
                    request
                }
            }
        };

        let result = request.clone().await;

        // Whichever waiter finishes first clears the entry. A newer request
        // for the same key may already have replaced it.
        let mut pending = self.pending.lock().unwrap();
        if pending
            .get(&key)
            .is_some_and(|current| current.ptr_eq(&request))
        {
            pending.remove(&key);
        }

        result
    }

    pub fn in_flight(&self) -> usize {
        self.pending.lock().unwrap().len()
    }
}
