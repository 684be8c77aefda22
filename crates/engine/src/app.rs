//! Application state and composition.

use std::sync::Arc;

use easynpc_domain::ActionSettings;

use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::ports::{
    ChangeBroadcastPort, ClockPort, CommandExecutorPort, PrivilegePort, SkinSourcePort,
};
use crate::stores::{CooldownStore, ProfileObserver, ProfileStore, SkinCache};
use crate::use_cases::configuration::{
    ConfigurationAccess, ConfigurationUseCases, ProfileConfiguration, ProfileWriter,
    SkinConfiguration,
};
use crate::use_cases::interaction::{InteractionUseCases, NpcInteraction};
use crate::use_cases::skins::{SkinCatalog, SkinUseCases};

/// Main application state.
///
/// Holds the stores and use cases. Passed to WebSocket handlers via Axum
/// state.
pub struct App {
    pub stores: Stores,
    pub use_cases: UseCases,
}

/// Container for in-memory state.
pub struct Stores {
    pub profiles: Arc<ProfileStore>,
    pub skin_cache: Arc<SkinCache>,
    pub cooldowns: Arc<CooldownStore>,
}

/// Container for all use cases.
pub struct UseCases {
    pub configuration: ConfigurationUseCases,
    pub skins: SkinUseCases,
    pub interaction: InteractionUseCases,
}

/// External collaborators the engine talks to.
pub struct AppPorts {
    pub clock: Arc<dyn ClockPort>,
    pub privileges: Arc<dyn PrivilegePort>,
    pub executor: Arc<dyn CommandExecutorPort>,
    pub skin_source: Arc<dyn SkinSourcePort>,
    pub broadcast: Arc<dyn ChangeBroadcastPort>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(config: &EngineConfig, ports: AppPorts) -> Self {
        let skin_cache = Arc::new(SkinCache::new());
        let cooldowns = Arc::new(CooldownStore::new(config.skin_cooldown));
        let observers: Vec<Arc<dyn ProfileObserver>> = vec![skin_cache.clone(), cooldowns.clone()];
        let profiles = Arc::new(ProfileStore::with_observers(observers));

        let catalog = Arc::new(SkinCatalog::new(
            ports.skin_source.clone(),
            skin_cache.clone(),
            profiles.clone(),
        ));
        let writer = Arc::new(ProfileWriter::new(profiles.clone(), ports.broadcast.clone()));
        let spawn_settings = ActionSettings {
            permission_level: config.default_permission_level,
            debug: false,
        };

        let configuration = ConfigurationUseCases::new(
            Arc::new(ProfileConfiguration::new(writer.clone())),
            Arc::new(SkinConfiguration::new(
                writer,
                catalog.clone(),
                cooldowns.clone(),
                ports.clock.clone(),
            )),
            Arc::new(ConfigurationAccess::new(
                profiles.clone(),
                ports.privileges.clone(),
                ports.broadcast.clone(),
                spawn_settings,
            )),
        );
        let skins = SkinUseCases::new(catalog);
        let interaction = InteractionUseCases::new(Arc::new(NpcInteraction::new(
            profiles.clone(),
            ports.privileges,
            ports.executor,
        )));

        Self {
            stores: Stores {
                profiles,
                skin_cache,
                cooldowns,
            },
            use_cases: UseCases {
                configuration,
                skins,
                interaction,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::command_executor::LoggingCommandExecutor;
    use crate::infrastructure::ports::MockChangeBroadcastPort;
    use crate::infrastructure::privileges::OperatorList;
    use crate::infrastructure::skin_source::InMemorySkinSource;
    use easynpc_domain::{NpcId, PlayerId, SkinModel};

    #[tokio::test]
    async fn removal_cascades_to_cooldowns_and_active_skin() {
        let operator = PlayerId::new();
        let mut broadcast = MockChangeBroadcastPort::new();
        broadcast.expect_profile_changed().returning(|_, _| ());
        broadcast.expect_profile_removed().returning(|_| ());

        let app = App::new(
            &EngineConfig::default(),
            AppPorts {
                clock: Arc::new(SystemClock),
                privileges: Arc::new(OperatorList::new([operator])),
                executor: Arc::new(LoggingCommandExecutor::new()),
                skin_source: Arc::new(InMemorySkinSource::new()),
                broadcast: Arc::new(broadcast),
            },
        );
        let configuration = &app.use_cases.configuration;

        let profile = configuration
            .access
            .spawn(operator, SkinModel::Humanoid)
            .await
            .unwrap();
        let npc_id: NpcId = profile.id();
        configuration
            .skin
            .change_skin_location(npc_id, "Notch")
            .await
            .unwrap();
        app.use_cases.skins.catalog.resolve_active(npc_id).unwrap();

        assert!(configuration.skin.skin_cooldown(npc_id).unwrap() > 0);
        assert!(app.stores.skin_cache.active(npc_id).is_some());

        configuration.access.remove(operator, npc_id).await.unwrap();
        assert!(app.stores.skin_cache.active(npc_id).is_none());
        assert!(app.stores.cooldowns.last_location(npc_id).is_none());
        assert!(app.stores.profiles.get(npc_id).is_none());
    }
}
