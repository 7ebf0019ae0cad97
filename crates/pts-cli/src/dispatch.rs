use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

use pts_core::{
    release_check, secret_add, secret_get, secret_list, secret_move, secret_remove, store_init,
    AddKind, CommandContext, CommandGroup, CommandInfo, ExecutionOutcome, ReleaseRequest,
    SecretAddRequest, SecretGetRequest, SecretListRequest, SecretMoveRequest, SecretRemoveRequest,
    StoreInitRequest,
};

use crate::cli::{AddArgs, CommandGroupCli};

pub fn dispatch_command(
    ctx: &CommandContext,
    group: &CommandGroupCli,
) -> Result<(CommandInfo, ExecutionOutcome)> {
    match group {
        CommandGroupCli::Init(args) => {
            let info = CommandInfo::new(CommandGroup::Init, "init");
            let request = StoreInitRequest {
                owner: args.owner.clone(),
            };
            core_call(info, || store_init(ctx, &request))
        }
        CommandGroupCli::Add(args) => {
            let info = CommandInfo::new(CommandGroup::Add, "add");
            let Some(kind) = add_kind_from_args(args) else {
                return Ok((info, missing_add_mode()));
            };
            let request = SecretAddRequest {
                label: args.label.clone(),
                kind,
            };
            core_call(info, || secret_add(ctx, &request))
        }
        CommandGroupCli::Get(args) => {
            let info = CommandInfo::new(CommandGroup::Get, "get");
            let request = SecretGetRequest {
                pattern: args.pattern.clone(),
            };
            core_call(info, || secret_get(ctx, &request))
        }
        CommandGroupCli::Ls(args) => {
            let info = CommandInfo::new(CommandGroup::List, "ls");
            let request = SecretListRequest {
                pattern: args.pattern.clone(),
            };
            core_call(info, || secret_list(ctx, &request))
        }
        CommandGroupCli::Rm(args) => {
            let info = CommandInfo::new(CommandGroup::Remove, "rm");
            let request = SecretRemoveRequest {
                pattern: args.pattern.clone(),
            };
            core_call(info, || secret_remove(ctx, &request))
        }
        CommandGroupCli::Mv(args) => {
            let info = CommandInfo::new(CommandGroup::Move, "mv");
            let request = SecretMoveRequest {
                pattern: args.pattern.clone(),
                new_label: args.new_label.clone(),
            };
            core_call(info, || secret_move(ctx, &request))
        }
        CommandGroupCli::Release(args) => {
            let info = CommandInfo::new(CommandGroup::Release, "release");
            let request = ReleaseRequest {
                tag: args.tag.clone(),
                manifest: args.manifest.clone(),
            };
            core_call(info, || release_check(ctx, &request))
        }
    }
}

fn core_call(
    info: CommandInfo,
    call: impl FnOnce() -> anyhow::Result<ExecutionOutcome>,
) -> Result<(CommandInfo, ExecutionOutcome)> {
    let outcome = call().map_err(|err| eyre!("{err:?}"))?;
    Ok((info, outcome))
}

fn add_kind_from_args(args: &AddArgs) -> Option<AddKind> {
    if let Some(value) = &args.encrypt {
        return Some(AddKind::Encrypted {
            value: value.clone(),
        });
    }
    if let Some(salt) = &args.salt {
        return Some(AddKind::Raw {
            salt: salt.clone(),
            length: args.length,
        });
    }
    match (&args.domain, &args.username) {
        (Some(domain), Some(username)) => Some(AddKind::Login {
            domain: domain.clone(),
            username: username.clone(),
            iteration: args.iteration,
            length: args.length,
        }),
        _ => None,
    }
}

fn missing_add_mode() -> ExecutionOutcome {
    ExecutionOutcome::user_error(
        "nothing to add",
        json!({
            "hint": "Pass --domain/--username for a login, --salt for a raw secret, or --encrypt for a literal value.",
        }),
    )
}
