// CrowdSec Monitor - Decision Countdown
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Remaining lifetime of a decision, recomputed every second while shown.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::state::Observable;

const TICK: Duration = Duration::from_secs(1);

/// Time left before a decision expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Expired,
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
}

impl Countdown {
    pub fn is_expired(&self) -> bool {
        matches!(self, Countdown::Expired)
    }
}

/// Countdown from `now` to `expiration`. Less than one second left counts as expired.
pub fn remaining(expiration: DateTime<Utc>, now: DateTime<Utc>) -> Countdown {
    let total = (expiration - now).num_seconds();
    if total < 1 {
        return Countdown::Expired;
    }
    Countdown::Remaining {
        days: total / 86_400,
        hours: (total % 86_400) / 3_600,
        minutes: (total % 3_600) / 60,
        seconds: total % 60,
    }
}

/// Compact form: non-zero components only, e.g. `1d2h5m3s`.
impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Countdown::Expired => write!(f, "Expired"),
            Countdown::Remaining { days, hours, minutes, seconds } => {
                for (value, unit) in [(days, 'd'), (hours, 'h'), (minutes, 'm'), (seconds, 's')] {
                    if value > 0 {
                        write!(f, "{}{}", value, unit)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// A countdown published once per second.
pub struct Ticker {
    state: Arc<Observable<Countdown>>,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<Countdown> {
        self.state.subscribe()
    }

    pub fn current(&self) -> Countdown {
        *self.state.get()
    }

    /// Stop ticking. Dropping the ticker does the same.
    pub fn stop(self) {}
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start a once-per-second countdown to `expiration`.
///
/// The task ends by itself once the decision has expired. Must be called
/// inside a Tokio runtime.
pub fn ticker(expiration: DateTime<Utc>) -> Ticker {
    let state = Arc::new(Observable::new(remaining(expiration, Utc::now())));
    let published = state.clone();

    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK);
        loop {
            interval.tick().await;
            let countdown = remaining(expiration, Utc::now());
            published.set(countdown);
            if countdown.is_expired() {
                debug!("Countdown to {} reached zero", expiration);
                break;
            }
        }
    });

    Ticker { state, handle }
}
