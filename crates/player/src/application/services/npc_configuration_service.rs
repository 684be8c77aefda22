//! NPC configuration service
//!
//! Sends configuration requests to the engine and folds the outcomes into
//! the local screen state. Requests are never retried.

use std::collections::BTreeMap;
use std::sync::Arc;

use easynpc_domain::{
    ActionTrigger, ConfigurationScreen, DialogKind, DialogTextKey, EquipmentSlot, NpcId,
    NpcProfile, PageDirection, SkinId, SkinModel,
};
use easynpc_shared::{
    ConfigurationData, ItemStackData, NpcRequest, SkinCooldownData, SkinEntryData, SkinPageData,
    SkinRequest,
};

use crate::application::{ParseResponse, PlayerError};
use crate::ports::outbound::NpcRequestPort;
use crate::state::{NameEditor, SkinBrowser, SkinLocationEditor};

#[derive(Clone)]
pub struct NpcConfigurationService {
    port: Arc<dyn NpcRequestPort>,
}

impl NpcConfigurationService {
    pub fn new(port: Arc<dyn NpcRequestPort>) -> Self {
        Self { port }
    }

    async fn npc<T: serde::de::DeserializeOwned>(
        &self,
        request: NpcRequest,
    ) -> Result<T, PlayerError> {
        self.port.request(request.into()).await?.parse()
    }

    async fn skin<T: serde::de::DeserializeOwned>(
        &self,
        request: SkinRequest,
    ) -> Result<T, PlayerError> {
        self.port.request(request.into()).await?.parse()
    }

    pub async fn get_profile(&self, npc_id: NpcId) -> Result<NpcProfile, PlayerError> {
        self.npc(NpcRequest::GetProfile { npc_id }).await
    }

    /// Submit the rename box. The editor returns to `Dirty` with the typed
    /// value kept when the engine refuses it.
    pub async fn rename(&self, editor: &mut NameEditor) -> Result<NpcProfile, PlayerError> {
        let name = editor.submit()?;
        let result: Result<NpcProfile, PlayerError> = self
            .npc(NpcRequest::Rename {
                npc_id: editor.npc_id(),
                name,
            })
            .await;

        editor.complete(result.is_ok())?;
        if let Ok(profile) = &result {
            editor.sync_stored(profile.name().as_str());
        }
        result
    }

    /// Submit the skin-location box. A refused location stays in the box
    /// for resubmission. Both a throttled answer and an accepted change
    /// start the local cooldown display.
    pub async fn change_skin_location(
        &self,
        editor: &mut SkinLocationEditor,
    ) -> Result<NpcProfile, PlayerError> {
        let location = editor.submit()?;
        let result: Result<NpcProfile, PlayerError> = self
            .npc(NpcRequest::ChangeSkinLocation {
                npc_id: editor.npc_id(),
                location,
            })
            .await;
        editor.complete(result.is_ok())?;

        match &result {
            Ok(_) => {
                if let Err(e) = self.refresh_skin_cooldown(editor).await {
                    tracing::debug!(npc_id = %editor.npc_id(), error = %e, "Skin cooldown refresh failed");
                }
            }
            Err(PlayerError::Throttled { remaining_secs }) => {
                tracing::debug!(npc_id = %editor.npc_id(), remaining_secs, "Skin location on cooldown");
                editor.set_cooldown(*remaining_secs);
            }
            Err(_) => {}
        }
        result
    }

    pub async fn select_skin(
        &self,
        npc_id: NpcId,
        skin_id: SkinId,
    ) -> Result<NpcProfile, PlayerError> {
        self.npc(NpcRequest::SelectSkin { npc_id, skin_id }).await
    }

    pub async fn select_default_skin(
        &self,
        npc_id: NpcId,
        variant: impl Into<String>,
    ) -> Result<NpcProfile, PlayerError> {
        self.npc(NpcRequest::SelectDefaultSkin {
            npc_id,
            variant: variant.into(),
        })
        .await
    }

    pub async fn change_dialog(
        &self,
        npc_id: NpcId,
        kind: DialogKind,
        texts: BTreeMap<DialogTextKey, String>,
    ) -> Result<NpcProfile, PlayerError> {
        self.npc(NpcRequest::ChangeDialog {
            npc_id,
            kind,
            texts,
        })
        .await
    }

    pub async fn set_action(
        &self,
        npc_id: NpcId,
        trigger: ActionTrigger,
        script: Option<String>,
    ) -> Result<NpcProfile, PlayerError> {
        self.npc(NpcRequest::SetAction {
            npc_id,
            trigger,
            script,
        })
        .await
    }

    pub async fn change_action_settings(
        &self,
        npc_id: NpcId,
        permission_level: u8,
        debug: bool,
    ) -> Result<NpcProfile, PlayerError> {
        self.npc(NpcRequest::ChangeActionSettings {
            npc_id,
            permission_level,
            debug,
        })
        .await
    }

    pub async fn set_equipment(
        &self,
        npc_id: NpcId,
        slot: EquipmentSlot,
        item: Option<ItemStackData>,
    ) -> Result<NpcProfile, PlayerError> {
        self.npc(NpcRequest::SetEquipment { npc_id, slot, item })
            .await
    }

    pub async fn change_scale(&self, npc_id: NpcId, scale: f32) -> Result<NpcProfile, PlayerError> {
        self.npc(NpcRequest::ChangeScale { npc_id, scale }).await
    }

    /// Ask the engine for the remaining cooldown and show it in the editor.
    pub async fn refresh_skin_cooldown(
        &self,
        editor: &mut SkinLocationEditor,
    ) -> Result<u64, PlayerError> {
        let data: SkinCooldownData = self
            .npc(NpcRequest::GetSkinCooldown {
                npc_id: editor.npc_id(),
            })
            .await?;
        editor.set_cooldown(data.remaining_secs);
        Ok(data.remaining_secs)
    }

    pub async fn open_configuration(
        &self,
        npc_id: NpcId,
        screen: ConfigurationScreen,
    ) -> Result<ConfigurationData, PlayerError> {
        self.npc(NpcRequest::OpenConfiguration { npc_id, screen })
            .await
    }

    /// Open the skin screen matching the NPC's current skin kind.
    pub async fn open_skin_editor(&self, profile: &NpcProfile) -> Result<ConfigurationData, PlayerError> {
        let screen = ConfigurationScreen::for_skin(profile.skin().kind());
        self.open_configuration(profile.id(), screen).await
    }

    /// Open the dialog screen matching the NPC's current dialog kind.
    pub async fn open_dialog_editor(
        &self,
        profile: &NpcProfile,
    ) -> Result<ConfigurationData, PlayerError> {
        let screen = ConfigurationScreen::for_dialog(profile.dialog().kind());
        self.open_configuration(profile.id(), screen).await
    }

    pub async fn remove(&self, npc_id: NpcId) -> Result<(), PlayerError> {
        self.port
            .request(NpcRequest::Remove { npc_id }.into())
            .await?
            .parse_empty()
    }

    pub async fn spawn(&self, model: SkinModel) -> Result<NpcProfile, PlayerError> {
        self.npc(NpcRequest::Spawn { model }).await
    }

    /// Fetch a page for the browser. `None` reloads the current window, e.g.
    /// after the set size changed.
    pub async fn page_skins(
        &self,
        browser: &mut SkinBrowser,
        direction: Option<PageDirection>,
    ) -> Result<(), PlayerError> {
        let state = browser.state();
        let page: SkinPageData = self
            .skin(SkinRequest::Page {
                model: browser.model(),
                start_index: state.start_index(),
                page_size: Some(state.page_size()),
                direction,
            })
            .await?;
        browser.apply_page(page);
        Ok(())
    }

    pub async fn list_skin_ids(&self, model: SkinModel) -> Result<Vec<SkinId>, PlayerError> {
        self.skin(SkinRequest::ListSkinIds { model }).await
    }

    pub async fn resolve_skin(
        &self,
        model: SkinModel,
        skin_id: SkinId,
    ) -> Result<SkinEntryData, PlayerError> {
        self.skin(SkinRequest::Resolve { model, skin_id }).await
    }

    /// Resolve the NPC's active skin and highlight it in the browser.
    pub async fn resolve_active(
        &self,
        npc_id: NpcId,
        browser: &mut SkinBrowser,
    ) -> Result<SkinEntryData, PlayerError> {
        let entry: SkinEntryData = self.skin(SkinRequest::ResolveActive { npc_id }).await?;
        browser.set_active(Some(entry.skin_id));
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockNpcRequestPort;
    use easynpc_domain::{EditState, NavigationControls, PaginationState, SkinKind};
    use easynpc_shared::{
        ErrorCode, RequestError, RequestPayload, ResponseResult, ThrottleDetails,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service(port: MockNpcRequestPort) -> NpcConfigurationService {
        NpcConfigurationService::new(Arc::new(port))
    }

    fn renamed(npc_id: NpcId, name: &str) -> NpcProfile {
        let mut profile: serde_json::Value =
            serde_json::to_value(NpcProfile::spawn(npc_id, SkinModel::Humanoid)).unwrap();
        profile["name"] = serde_json::json!(name);
        serde_json::from_value(profile).unwrap()
    }

    #[tokio::test]
    async fn rename_success_syncs_the_editor() {
        let npc_id = NpcId::new();
        let mut port = MockNpcRequestPort::new();
        port.expect_request()
            .withf(move |payload| {
                matches!(payload, RequestPayload::Npc(NpcRequest::Rename { name, .. }) if name == "Smith")
            })
            .times(1)
            .returning(move |_| Ok(ResponseResult::success(renamed(npc_id, "Smith"))));

        let mut editor = NameEditor::new(npc_id, "Humanoid");
        editor.set_value("Smith").unwrap();
        let profile = service(port).rename(&mut editor).await.unwrap();

        assert_eq!(profile.name().as_str(), "Smith");
        assert_eq!(editor.state(), EditState::Clean);
        assert!(!editor.can_submit());
    }

    #[tokio::test]
    async fn rejected_rename_keeps_the_typed_value() {
        let mut port = MockNpcRequestPort::new();
        port.expect_request()
            .times(1)
            .returning(|_| Ok(ResponseResult::error(ErrorCode::ValidationError, "bad name")));

        let mut editor = NameEditor::new(NpcId::new(), "Humanoid");
        editor.set_value("Smith").unwrap();
        let err = service(port).rename(&mut editor).await.unwrap_err();

        assert!(err.is_recoverable());
        assert_eq!(editor.state(), EditState::Dirty);
        assert_eq!(editor.value(), "Smith");
    }

    #[tokio::test]
    async fn blank_rename_is_not_sent() {
        let mut port = MockNpcRequestPort::new();
        port.expect_request().never();

        let mut editor = NameEditor::new(NpcId::new(), "Humanoid");
        editor.set_value("  ").unwrap();
        let err = service(port).rename(&mut editor).await.unwrap_err();
        assert!(matches!(err, PlayerError::State(_)));
    }

    #[tokio::test]
    async fn throttled_skin_location_starts_the_cooldown() {
        let mut port = MockNpcRequestPort::new();
        port.expect_request().times(1).returning(|_| {
            Ok(ResponseResult::error_with_details(
                ErrorCode::RateLimitExceeded,
                "cooldown",
                ThrottleDetails { remaining_secs: 12 },
            ))
        });

        let mut editor = SkinLocationEditor::new(NpcId::new(), SkinModel::Humanoid);
        editor.set_value("Notch");
        let err = service(port)
            .change_skin_location(&mut editor)
            .await
            .unwrap_err();

        assert_eq!(err, PlayerError::Throttled { remaining_secs: 12 });
        assert_eq!(editor.cooldown_secs(), 12);
        assert!(!editor.can_add());
    }

    #[tokio::test]
    async fn throttled_location_is_resubmitted_after_cooldown() {
        let npc_id = NpcId::new();
        let attempts = Arc::new(AtomicUsize::new(0));
        let mut port = MockNpcRequestPort::new();
        let counter = attempts.clone();
        port.expect_request().times(3).returning(move |payload| match payload {
            RequestPayload::Npc(NpcRequest::ChangeSkinLocation { location, .. }) => {
                assert_eq!(location, "Notch");
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(ResponseResult::error_with_details(
                        ErrorCode::RateLimitExceeded,
                        "cooldown",
                        ThrottleDetails { remaining_secs: 12 },
                    ))
                } else {
                    Ok(ResponseResult::success(NpcProfile::spawn(
                        npc_id,
                        SkinModel::Humanoid,
                    )))
                }
            }
            RequestPayload::Npc(NpcRequest::GetSkinCooldown { .. }) => {
                Ok(ResponseResult::success(SkinCooldownData {
                    npc_id,
                    remaining_secs: 20,
                }))
            }
            other => panic!("unexpected request: {other:?}"),
        });
        let service = service(port);

        let mut editor = SkinLocationEditor::new(npc_id, SkinModel::Humanoid);
        editor.set_value("Notch");
        assert!(service.change_skin_location(&mut editor).await.is_err());
        assert_eq!(editor.value(), "Notch");

        editor.tick(12);
        assert!(editor.can_add());
        service
            .change_skin_location(&mut editor)
            .await
            .expect("accepted after cooldown");

        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(editor.last_submitted(), "Notch");
        assert_eq!(editor.cooldown_secs(), 20);
        assert!(!editor.can_add());
    }

    #[tokio::test]
    async fn rejected_location_stays_submittable() {
        let mut port = MockNpcRequestPort::new();
        port.expect_request()
            .times(1)
            .returning(|_| Ok(ResponseResult::error(ErrorCode::ValidationError, "bad skin")));

        let mut editor = SkinLocationEditor::new(NpcId::new(), SkinModel::Humanoid);
        editor.set_value("Notch");
        let err = service(port)
            .change_skin_location(&mut editor)
            .await
            .unwrap_err();

        assert!(err.is_recoverable());
        assert!(!editor.is_pending());
        assert_eq!(editor.last_submitted(), "");
        assert!(editor.can_add());
    }

    #[tokio::test]
    async fn page_request_restores_the_current_window() {
        let mut port = MockNpcRequestPort::new();
        port.expect_request()
            .withf(|payload| {
                matches!(
                    payload,
                    RequestPayload::Skin(SkinRequest::Page {
                        start_index: 0,
                        page_size: Some(5),
                        direction: Some(PageDirection::NextPage),
                        ..
                    })
                )
            })
            .times(1)
            .returning(|_| {
                Ok(ResponseResult::success(SkinPageData {
                    model: SkinModel::Humanoid,
                    entries: Vec::new(),
                    state: PaginationState::with_state(5, 5, 12),
                    controls: NavigationControls::default(),
                }))
            });

        let mut browser = SkinBrowser::new(SkinModel::Humanoid);
        service(port)
            .page_skins(&mut browser, Some(PageDirection::NextPage))
            .await
            .unwrap();
        assert_eq!(browser.state().start_index(), 5);
        assert_eq!(browser.state().total_count(), 12);
    }

    #[tokio::test]
    async fn resolve_active_highlights_the_entry() {
        let npc_id = NpcId::new();
        let entry = SkinEntryData {
            skin_id: SkinId::new(),
            model: SkinModel::Humanoid,
            kind: SkinKind::PlayerSkin,
            name: "Notch".to_string(),
            texture: "Notch".to_string(),
        };
        let skin_id = entry.skin_id;
        let mut port = MockNpcRequestPort::new();
        port.expect_request()
            .times(1)
            .returning(move |_| Ok(ResponseResult::success(entry.clone())));

        let mut browser = SkinBrowser::new(SkinModel::Humanoid);
        service(port)
            .resolve_active(npc_id, &mut browser)
            .await
            .unwrap();
        assert!(browser.is_active(skin_id));
    }

    #[tokio::test]
    async fn removed_npc_is_terminal() {
        let mut port = MockNpcRequestPort::new();
        port.expect_request()
            .times(1)
            .returning(|_| Ok(ResponseResult::error(ErrorCode::NotFound, "NPC not found")));

        let err = service(port).get_profile(NpcId::new()).await.unwrap_err();
        assert!(err.is_terminal());
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let mut port = MockNpcRequestPort::new();
        port.expect_request()
            .times(1)
            .returning(|_| Err(RequestError::Timeout));

        let err = service(port).remove(NpcId::new()).await.unwrap_err();
        assert_eq!(err, PlayerError::Request(RequestError::Timeout));
    }
}
