#![deny(clippy::all, warnings)]

mod core;

pub use crate::core::command::{
    format_status_message, to_json_response, CommandGroup, CommandInfo,
};
pub use crate::core::commands::{
    release_check, secret_add, secret_get, secret_list, secret_move, secret_remove, store_init,
    AddKind, ReleaseRequest, SecretAddRequest, SecretGetRequest, SecretListRequest,
    SecretMoveRequest, SecretRemoveRequest, StoreInitRequest,
};
pub use crate::core::config::{Config, GlobalOptions};
pub use crate::core::context::CommandContext;
pub use crate::core::effects::{
    Effects, FileSystem, GitClient, SecretInput, SharedEffects, SystemEffects,
};
pub use crate::core::outcome::{CommandStatus, ExecutionOutcome};
