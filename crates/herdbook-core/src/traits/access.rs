use std::collections::HashMap;

/// Authorization gate consulted before every herd-scoped operation.
///
/// Authentication itself lives outside this system; callers arrive with an
/// already-established user id and the engine only asks whether that user
/// may operate on the property owning the target herd.
pub trait AccessPolicy: Send + Sync {
    /// Returns true when `user_id` may operate on `property_id`.
    fn authorize(&self, user_id: &str, property_id: &str) -> bool;
}

/// Policy that admits every user. For single-tenant deployments and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn authorize(&self, _user_id: &str, _property_id: &str) -> bool {
        true
    }
}

/// Fixed user-to-properties grant table.
#[derive(Debug, Clone, Default)]
pub struct StaticAccessList {
    grants: HashMap<String, Vec<String>>,
}

impl StaticAccessList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `user_id` access to `property_id`.
    pub fn grant(&mut self, user_id: impl Into<String>, property_id: impl Into<String>) {
        self.grants
            .entry(user_id.into())
            .or_default()
            .push(property_id.into());
    }
}

impl AccessPolicy for StaticAccessList {
    fn authorize(&self, user_id: &str, property_id: &str) -> bool {
        self.grants
            .get(user_id)
            .is_some_and(|properties| properties.iter().any(|p| p == property_id))
    }
}
