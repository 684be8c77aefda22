mod npc_configuration_service;

pub use npc_configuration_service::NpcConfigurationService;
