// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subject registry, keyed by id with secondary lookup indexes for
//! inbound-webhook resolution (§4.11 step 1: "resolving (tenant, subject)
//! from distinct-id, handle-email, or provider distinct-id").

use std::collections::HashMap;

use orc_core::{Subject, SubjectId, TenantId};
use parking_lot::Mutex;

use crate::error::{Result, StorageError};

struct Indexes {
    by_email: HashMap<String, SubjectId>,
    by_phone: HashMap<String, SubjectId>,
    by_distinct_id: HashMap<String, SubjectId>,
}

impl Indexes {
    fn new() -> Self {
        Self { by_email: HashMap::new(), by_phone: HashMap::new(), by_distinct_id: HashMap::new() }
    }
}

/// In-process store of [`Subject`] rows plus the lookup indexes ingress
/// uses to resolve an inbound event to a (tenant, subject) pair.
pub struct SubjectStore {
    subjects: Mutex<HashMap<SubjectId, Subject>>,
    index: Mutex<Indexes>,
}

impl SubjectStore {
    pub fn new() -> Self {
        Self { subjects: Mutex::new(HashMap::new()), index: Mutex::new(Indexes::new()) }
    }

    /// Register or update a subject, refreshing its lookup indexes.
    pub fn upsert(&self, subject: Subject) -> Subject {
        let mut index = self.index.lock();
        if let Some(email) = &subject.email {
            index.by_email.insert(email.clone(), subject.id);
        }
        if let Some(phone) = &subject.phone {
            index.by_phone.insert(phone.clone(), subject.id);
        }
        if let Some(distinct_id) = &subject.distinct_id {
            index.by_distinct_id.insert(distinct_id.clone(), subject.id);
        }
        drop(index);

        let mut subjects = self.subjects.lock();
        subjects.insert(subject.id, subject.clone());
        subject
    }

    pub fn get(&self, id: SubjectId) -> Result<Subject> {
        self.subjects.lock().get(&id).cloned().ok_or(StorageError::SubjectNotFound(id))
    }

    /// Resolve a subject for `tenant_id` by distinct id, email, or phone,
    /// in that order (§4.11 step 1). Falls back to creating a bare subject
    /// scoped to the given handle when no match exists, mirroring ingress's
    /// "resolve or create" behavior for first-contact events.
    pub fn resolve_or_create(&self, tenant_id: TenantId, distinct_id: Option<&str>, email: Option<&str>, phone: Option<&str>) -> Subject {
        if let Some(found) = self.lookup(tenant_id, distinct_id, email, phone) {
            return found;
        }

        let mut subject = Subject::new(SubjectId::new(), tenant_id);
        subject.email = email.map(str::to_string);
        subject.phone = phone.map(str::to_string);
        subject.distinct_id = distinct_id.map(str::to_string);
        self.upsert(subject)
    }

    fn lookup(&self, tenant_id: TenantId, distinct_id: Option<&str>, email: Option<&str>, phone: Option<&str>) -> Option<Subject> {
        let index = self.index.lock();
        let candidate = distinct_id
            .and_then(|v| index.by_distinct_id.get(v))
            .or_else(|| email.and_then(|v| index.by_email.get(v)))
            .or_else(|| phone.and_then(|v| index.by_phone.get(v)))
            .copied();
        drop(index);

        candidate.and_then(|id| self.subjects.lock().get(&id).cloned()).filter(|s| s.tenant_id == tenant_id)
    }
}

impl Default for SubjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "subject_store_tests.rs"]
mod tests;
