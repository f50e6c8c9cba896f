use std::collections::HashSet;

use subtle::ConstantTimeEq;

use crate::utils::{BrokerError, Result};

/// Who may administer the broker and which machines may take part.
///
/// With no admin key configured the admin check is skipped entirely. With an
/// empty allow-list every machine is accepted.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    admin_key: Option<String>,
    allowed_machines: HashSet<String>,
}

impl AccessPolicy {
    pub fn new<I, S>(admin_key: Option<String>, allowed_machines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admin_key: admin_key.filter(|key| !key.is_empty()),
            allowed_machines: allowed_machines
                .into_iter()
                .map(Into::<String>::into)
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Accepts `presented` when it matches the admin key, or when none is set.
    pub fn require_admin(&self, presented: Option<&str>) -> Result<()> {
        let Some(expected) = self.admin_key.as_deref() else {
            return Ok(());
        };
        let presented = presented.unwrap_or_default();
        if bool::from(presented.as_bytes().ct_eq(expected.as_bytes())) {
            Ok(())
        } else {
            Err(BrokerError::BadAdminKey)
        }
    }

    pub fn machine_allowed(&self, machine_id: &str) -> bool {
        self.allowed_machines.is_empty() || self.allowed_machines.contains(machine_id)
    }

    pub fn admin_required(&self) -> bool {
        self.admin_key.is_some()
    }
}
