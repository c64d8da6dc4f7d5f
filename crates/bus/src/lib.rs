// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! orc-bus: the priority-partitioned event bus abstraction (C1) and its
//! consumer group runtime (C2).

pub mod broker;
pub mod envelope;
pub mod group;

pub use broker::{partition_for, BusError, Broker, InMemoryBroker, NUM_PARTITIONS};
pub use envelope::{Delivered, Envelope, Topic};
pub use group::{
    spawn, ConsumerGroupConfig, ConsumerGroupHandle, DeadLetterSink, GroupHandler,
    NoopDeadLetterSink,
};
