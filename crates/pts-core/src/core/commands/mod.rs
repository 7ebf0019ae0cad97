mod add;
mod get;
mod init;
mod list;
mod release;
mod remove;
mod rename;

pub use add::{secret_add, AddKind, SecretAddRequest};
pub use get::{secret_get, SecretGetRequest};
pub use init::{store_init, StoreInitRequest};
pub use list::{secret_list, SecretListRequest};
pub use release::{release_check, ReleaseRequest};
pub use remove::{secret_remove, SecretRemoveRequest};
pub use rename::{secret_move, SecretMoveRequest};
