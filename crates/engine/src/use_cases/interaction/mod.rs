//! Player interaction with NPCs in the world.
//!
//! Decides what an interaction does (see `plan_interaction`), runs the bound
//! action scripts through the command executor and reports which screen or
//! dialog the client should show.

use std::sync::Arc;

use easynpc_domain::{
    plan_interaction, ActionContext, ActionTrigger, ConfigurationScreen, DialogAnswer,
    DialogConfig, DialogKind, InteractionEffect, Interactor, NpcId, NpcProfile, PlayerId,
};

use crate::infrastructure::ports::{
    ActionExecution, CommandError, CommandExecutorPort, PrivilegePort,
};
use crate::stores::ProfileStore;

/// Container for interaction use cases.
pub struct InteractionUseCases {
    pub dispatch: Arc<NpcInteraction>,
}

impl InteractionUseCases {
    pub fn new(dispatch: Arc<NpcInteraction>) -> Self {
        Self { dispatch }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InteractionError {
    #[error("NPC not found: {0}")]
    NpcNotFound(NpcId),
    #[error("NPC {0} has no dialog")]
    NoDialog(NpcId),
    #[error("NPC {0} has no yes/no dialog")]
    NotYesNoDialog(NpcId),
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// The player behind an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub player_id: PlayerId,
    pub name: String,
}

impl Caller {
    pub fn new(player_id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            player_id,
            name: name.into(),
        }
    }
}

/// A dialog the client should open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedDialog {
    pub npc_id: NpcId,
    pub npc_name: String,
    pub dialog: DialogConfig,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionOutcome {
    pub configuration: Option<(ConfigurationScreen, NpcProfile)>,
    pub dialog: Option<OpenedDialog>,
    /// Triggers whose scripts were handed to the executor, in order
    pub executed: Vec<ActionTrigger>,
}

/// Reply text after a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub npc_name: String,
    pub text: Option<String>,
    pub executed: bool,
}

pub struct NpcInteraction {
    profiles: Arc<ProfileStore>,
    privileges: Arc<dyn PrivilegePort>,
    executor: Arc<dyn CommandExecutorPort>,
}

impl NpcInteraction {
    pub fn new(
        profiles: Arc<ProfileStore>,
        privileges: Arc<dyn PrivilegePort>,
        executor: Arc<dyn CommandExecutorPort>,
    ) -> Self {
        Self {
            profiles,
            privileges,
            executor,
        }
    }

    fn profile(&self, npc_id: NpcId) -> Result<NpcProfile, InteractionError> {
        self.profiles
            .get(npc_id)
            .ok_or(InteractionError::NpcNotFound(npc_id))
    }

    /// Handle a player using an NPC. Creative mode only counts for
    /// privileged callers.
    pub async fn interact(
        &self,
        caller: &Caller,
        npc_id: NpcId,
        interactor: Interactor,
    ) -> Result<InteractionOutcome, InteractionError> {
        let profile = self.profile(npc_id)?;
        let creative =
            interactor.creative && self.privileges.is_privileged(caller.player_id).await;
        let effects = plan_interaction(
            &profile,
            Interactor {
                creative,
                ..interactor
            },
        );

        let mut outcome = InteractionOutcome::default();
        for effect in effects {
            match effect {
                InteractionEffect::OpenConfiguration { screen } => {
                    outcome.configuration = Some((screen, profile.clone()));
                }
                InteractionEffect::ExecuteAction { trigger } => {
                    if self.run(&profile, trigger, Some(caller)).await? {
                        outcome.executed.push(trigger);
                    }
                }
                InteractionEffect::OpenDialog => {
                    outcome.dialog = Some(OpenedDialog {
                        npc_id,
                        npc_name: profile.name().to_string(),
                        dialog: profile.dialog().clone(),
                    });
                    if self
                        .run(&profile, ActionTrigger::OnOpenDialog, Some(caller))
                        .await?
                    {
                        outcome.executed.push(ActionTrigger::OnOpenDialog);
                    }
                }
            }
        }
        Ok(outcome)
    }

    /// Run the script bound to `trigger`. Returns false when nothing is bound.
    pub async fn execute_action(
        &self,
        npc_id: NpcId,
        trigger: ActionTrigger,
        caller: Option<&Caller>,
    ) -> Result<bool, InteractionError> {
        let profile = self.profile(npc_id)?;
        self.run(&profile, trigger, caller).await
    }

    pub async fn dialog_answer(
        &self,
        caller: &Caller,
        npc_id: NpcId,
        answer: DialogAnswer,
    ) -> Result<AnswerOutcome, InteractionError> {
        let profile = self.profile(npc_id)?;
        if !profile.has_dialog() {
            return Err(InteractionError::NoDialog(npc_id));
        }
        if profile.dialog().kind() != DialogKind::YesNo {
            return Err(InteractionError::NotYesNoDialog(npc_id));
        }

        let trigger = match answer {
            DialogAnswer::Yes => ActionTrigger::OnYesSelection,
            DialogAnswer::No => ActionTrigger::OnNoSelection,
        };
        let executed = self.run(&profile, trigger, Some(caller)).await?;
        Ok(AnswerOutcome {
            npc_name: profile.name().to_string(),
            text: profile
                .dialog()
                .text(answer.answer_key())
                .map(str::to_string),
            executed,
        })
    }

    pub async fn close_dialog(
        &self,
        caller: &Caller,
        npc_id: NpcId,
    ) -> Result<bool, InteractionError> {
        let profile = self.profile(npc_id)?;
        self.run(&profile, ActionTrigger::OnCloseDialog, Some(caller))
            .await
    }

    async fn run(
        &self,
        profile: &NpcProfile,
        trigger: ActionTrigger,
        caller: Option<&Caller>,
    ) -> Result<bool, InteractionError> {
        let Some(script) = profile.action(trigger) else {
            return Ok(false);
        };

        let context = ActionContext {
            npc_id: profile.id(),
            npc_name: profile.name().to_string(),
            initiator: caller.map(|c| (c.player_id, c.name.clone())),
        };
        let settings = profile.action_settings();
        let execution = ActionExecution {
            script: context.resolve(script),
            npc_id: profile.id(),
            caller: caller.map(|c| c.player_id),
            permission_level: settings.permission_level,
            debug: settings.debug,
        };

        tracing::debug!(npc_id = %profile.id(), trigger = %trigger, "Running NPC action");
        self.executor.execute(execution).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCommandExecutorPort, MockPrivilegePort};
    use easynpc_domain::{
        ActionScript, ActionSettings, DialogTextKey, ProfileMutation, SkinModel,
    };
    use std::sync::Mutex;

    fn privileged(value: bool) -> Arc<MockPrivilegePort> {
        let mut privileges = MockPrivilegePort::new();
        privileges.expect_is_privileged().returning(move |_| value);
        Arc::new(privileges)
    }

    fn recording_executor() -> (Arc<MockCommandExecutorPort>, Arc<Mutex<Vec<String>>>) {
        let scripts = Arc::new(Mutex::new(Vec::new()));
        let recorded = scripts.clone();
        let mut executor = MockCommandExecutorPort::new();
        executor.expect_execute().returning(move |execution| {
            recorded.lock().unwrap().push(execution.script);
            Ok(())
        });
        (Arc::new(executor), scripts)
    }

    fn bind(store: &ProfileStore, npc_id: NpcId, trigger: ActionTrigger, script: &str) {
        store
            .apply_mutation(
                npc_id,
                ProfileMutation::SetAction {
                    trigger,
                    script: Some(ActionScript::new(script).unwrap()),
                },
            )
            .unwrap();
    }

    fn yes_no_dialog(store: &ProfileStore, npc_id: NpcId) {
        let dialog = DialogConfig::new(
            DialogKind::YesNo,
            [
                (DialogTextKey::Main, "Want a quest?".to_string()),
                (DialogTextKey::YesAnswer, "Splendid!".to_string()),
            ],
        )
        .unwrap();
        store
            .apply_mutation(npc_id, ProfileMutation::ChangeDialog(dialog))
            .unwrap();
    }

    fn setup() -> (Arc<ProfileStore>, NpcId, Caller) {
        let store = Arc::new(ProfileStore::new());
        let npc_id = NpcId::new();
        store.spawn(npc_id, SkinModel::Humanoid, ActionSettings::default());
        (store, npc_id, Caller::new(PlayerId::new(), "Alex"))
    }

    #[tokio::test]
    async fn interaction_runs_action_then_opens_dialog() {
        let (store, npc_id, caller) = setup();
        bind(&store, npc_id, ActionTrigger::OnInteraction, "say hi @initiator");
        bind(&store, npc_id, ActionTrigger::OnOpenDialog, "say welcome");
        yes_no_dialog(&store, npc_id);
        let (executor, scripts) = recording_executor();
        let interaction = NpcInteraction::new(store, privileged(false), executor);

        let outcome = interaction
            .interact(&caller, npc_id, Interactor::default())
            .await
            .unwrap();

        assert_eq!(
            outcome.executed,
            vec![ActionTrigger::OnInteraction, ActionTrigger::OnOpenDialog]
        );
        assert!(outcome.dialog.is_some());
        assert!(outcome.configuration.is_none());
        assert_eq!(
            *scripts.lock().unwrap(),
            vec!["say hi Alex".to_string(), "say welcome".to_string()]
        );
    }

    #[tokio::test]
    async fn creative_flag_needs_privilege() {
        let (store, npc_id, caller) = setup();
        let (executor, _) = recording_executor();
        let interaction = NpcInteraction::new(store.clone(), privileged(false), executor);
        let creative = Interactor {
            creative: true,
            ..Interactor::default()
        };

        let outcome = interaction.interact(&caller, npc_id, creative).await.unwrap();
        assert!(outcome.configuration.is_none());

        let (executor, _) = recording_executor();
        let interaction = NpcInteraction::new(store, privileged(true), executor);
        let outcome = interaction.interact(&caller, npc_id, creative).await.unwrap();
        assert_eq!(
            outcome.configuration.map(|(screen, _)| screen),
            Some(ConfigurationScreen::Main)
        );
    }

    #[tokio::test]
    async fn dialog_answer_fires_trigger_and_returns_text() {
        let (store, npc_id, caller) = setup();
        yes_no_dialog(&store, npc_id);
        bind(&store, npc_id, ActionTrigger::OnYesSelection, "give @initiator-uuid diamond");
        let (executor, scripts) = recording_executor();
        let interaction = NpcInteraction::new(store, privileged(false), executor);

        let yes = interaction
            .dialog_answer(&caller, npc_id, DialogAnswer::Yes)
            .await
            .unwrap();
        assert!(yes.executed);
        assert_eq!(yes.text.as_deref(), Some("Splendid!"));
        assert_eq!(
            *scripts.lock().unwrap(),
            vec![format!("give {} diamond", caller.player_id)]
        );

        let no = interaction
            .dialog_answer(&caller, npc_id, DialogAnswer::No)
            .await
            .unwrap();
        assert!(!no.executed);
        assert!(no.text.is_none());
    }

    #[tokio::test]
    async fn dialog_answer_requires_yes_no_dialog() {
        let (store, npc_id, caller) = setup();
        let (executor, _) = recording_executor();
        let interaction = NpcInteraction::new(store.clone(), privileged(false), executor);

        assert!(matches!(
            interaction.dialog_answer(&caller, npc_id, DialogAnswer::Yes).await,
            Err(InteractionError::NoDialog(_))
        ));

        store
            .apply_mutation(
                npc_id,
                ProfileMutation::ChangeDialog(DialogConfig::basic("Hello").unwrap()),
            )
            .unwrap();
        assert!(matches!(
            interaction.dialog_answer(&caller, npc_id, DialogAnswer::Yes).await,
            Err(InteractionError::NotYesNoDialog(_))
        ));
    }

    #[tokio::test]
    async fn executor_failures_surface() {
        let (store, npc_id, caller) = setup();
        bind(&store, npc_id, ActionTrigger::OnCloseDialog, "say bye");
        let mut executor = MockCommandExecutorPort::new();
        executor
            .expect_execute()
            .returning(|_| Err(CommandError::Unavailable));
        let interaction = NpcInteraction::new(store, privileged(false), Arc::new(executor));

        assert!(matches!(
            interaction.close_dialog(&caller, npc_id).await,
            Err(InteractionError::Command(CommandError::Unavailable))
        ));
        assert!(!interaction
            .execute_action(npc_id, ActionTrigger::OnInteraction, None)
            .await
            .unwrap());
    }
}
