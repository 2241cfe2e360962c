// Copyright (C) 2015-2025 The Neo Project.
//
// time_provider.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Time source abstraction for the oracle scheduler.
//!
//! Task ages and cache expiry are measured against a [`TimeSource`] handed to
//! the service, so scheduler passes can be driven deterministically in tests.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// Trait implemented by concrete time sources.
pub trait TimeSource: Send + Sync {
    /// Returns the current UTC time.
    fn utc_now(&self) -> DateTime<Utc>;
}

/// Default system-backed time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualTimeSource {
    now: RwLock<DateTime<Utc>>,
}

impl ManualTimeSource {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write() = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.write();
        *now += by;
    }
}

impl TimeSource for ManualTimeSource {
    fn utc_now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}
