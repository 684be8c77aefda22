//! Operator-list privilege check.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::infrastructure::ports::PrivilegePort;
use easynpc_domain::PlayerId;

/// Treats a fixed set of players as privileged.
pub struct OperatorList {
    operators: HashSet<PlayerId>,
}

impl OperatorList {
    pub fn new(operators: impl IntoIterator<Item = PlayerId>) -> Self {
        Self {
            operators: operators.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

#[async_trait]
impl PrivilegePort for OperatorList {
    async fn is_privileged(&self, caller: PlayerId) -> bool {
        self.operators.contains(&caller)
    }
}
