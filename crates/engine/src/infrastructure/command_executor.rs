//! Command executor used when no host dispatcher is attached.
//!
//! Resolved scripts are written to the log; nothing is executed.

use async_trait::async_trait;

use crate::infrastructure::ports::{ActionExecution, CommandError, CommandExecutorPort};

pub struct LoggingCommandExecutor;

impl LoggingCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutorPort for LoggingCommandExecutor {
    async fn execute(&self, execution: ActionExecution) -> Result<(), CommandError> {
        if execution.debug {
            tracing::info!(
                npc_id = %execution.npc_id,
                caller = ?execution.caller,
                permission_level = %execution.permission_level,
                script = %execution.script,
                "Executing NPC action (debug)"
            );
        } else {
            tracing::debug!(
                npc_id = %execution.npc_id,
                permission_level = %execution.permission_level,
                script = %execution.script,
                "Executing NPC action"
            );
        }
        Ok(())
    }
}
