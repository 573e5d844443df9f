// CrowdSec Monitor - View State
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Loading state shared by every view-model, and the observable container
//! that publishes it.

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::HttpClientError;

/// Outcome of the latest fetch.
#[derive(Debug, Clone)]
pub enum LoadingState<T> {
    Loading,
    Success(T),
    Failure(Arc<HttpClientError>),
}

impl<T> Default for LoadingState<T> {
    fn default() -> Self {
        LoadingState::Loading
    }
}

impl<T> LoadingState<T> {
    pub fn from_result(result: Result<T, HttpClientError>) -> Self {
        match result {
            Ok(data) => LoadingState::Success(data),
            Err(e) => LoadingState::Failure(Arc::new(e)),
        }
    }

    /// Current data, if the last fetch succeeded.
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Current error, if the last fetch failed.
    pub fn error(&self) -> Option<&HttpClientError> {
        match self {
            LoadingState::Failure(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadingState<U> {
        match self {
            LoadingState::Loading => LoadingState::Loading,
            LoadingState::Success(data) => LoadingState::Success(f(data)),
            LoadingState::Failure(e) => LoadingState::Failure(e),
        }
    }
}

/// A value that observers can subscribe to.
///
/// Writes go through the owner; every subscriber sees the latest value.
#[derive(Debug)]
pub struct Observable<T> {
    sender: watch::Sender<T>,
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Modify the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.sender.send_modify(f);
    }

    pub fn get(&self) -> watch::Ref<'_, T> {
        self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let ok: LoadingState<u32> = LoadingState::Success(3);
        assert_eq!(ok.data(), Some(&3));
        assert!(ok.error().is_none());

        let failed: LoadingState<u32> = LoadingState::from_result(Err(HttpClientError::Unauthorized));
        assert!(failed.data().is_none());
        assert!(failed.error().unwrap().is_unauthorized());

        assert!(LoadingState::<u32>::default().is_loading());
    }

    #[test]
    fn test_map_keeps_variant() {
        let state: LoadingState<u32> = LoadingState::Success(2);
        assert_eq!(state.map(|v| v * 10).data(), Some(&20));
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let observable = Observable::new(LoadingState::<u32>::Loading);
        let mut receiver = observable.subscribe();

        observable.set(LoadingState::Success(5));
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow().data(), Some(&5));

        observable.update(|s| *s = LoadingState::Success(6));
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow_and_update().data(), Some(&6));
    }
}
