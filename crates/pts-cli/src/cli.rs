use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

pub const PTS_HELP_TEMPLATE: &str =
    "{before-help}\nUsage:\n    {usage}\n\nGlobal options:\n{options}\n";

pub const PTS_BEFORE_HELP: &str = concat!(
    "pts ",
    env!("CARGO_PKG_VERSION"),
    " – Deterministic password manager\n\n",
    "\x1b[1;36mCore workflow\x1b[0m\n",
    "  init             Create a store with an owner and a master password.\n",
    "  add              Store a login, raw-salt, or encrypted secret under a label.\n",
    "  get              Derive or decrypt a secret and print its value.\n",
    "  ls               List labels with kind, modified time, and salt.\n",
    "  rm / mv          Remove or rename secrets.\n\n",
    "\x1b[1;36mRelease\x1b[0m\n",
    "  release          Check that the release tag names the manifest version.\n",
);

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    propagate_version = false,
    disable_help_subcommand = true,
    before_help = PTS_BEFORE_HELP,
    help_template = PTS_HELP_TEMPLATE
)]
pub struct PtsCli {
    #[arg(
        short,
        long,
        help = "Suppress human output (errors still set the exit code)",
        global = true
    )]
    pub quiet: bool,
    #[arg(short, long, action = ArgAction::Count, help = "Increase logging (-vv reaches trace)")]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q", global = true)]
    pub trace: bool,
    #[arg(
        long,
        help = "Emit {status,message,details} JSON envelopes",
        global = true
    )]
    pub json: bool,
    #[arg(long, help = "Disable colored human output", global = true)]
    pub no_color: bool,
    #[arg(
        long,
        value_name = "PATH",
        help = "Store file to operate on (overrides PTS_STORE)",
        global = true
    )]
    pub store: Option<PathBuf>,
    #[command(subcommand)]
    pub command: CommandGroupCli,
}

#[derive(Subcommand, Debug)]
pub enum CommandGroupCli {
    #[command(
        about = "Create a store with a master password verifier.",
        override_usage = "pts init [--owner NAME]"
    )]
    Init(InitArgs),
    #[command(
        about = "Store a new secret under a label.",
        override_usage = "pts add <LABEL> --domain <DOMAIN> --username <USER> [--iteration N] [--length N]\n    pts add <LABEL> --salt <SALT> [--length N]\n    pts add <LABEL> --encrypt [VALUE]"
    )]
    Add(AddArgs),
    #[command(
        about = "Derive or decrypt a secret and print its value.",
        override_usage = "pts get <PATTERN>"
    )]
    Get(GetArgs),
    #[command(
        about = "List secrets, optionally filtered by a regex pattern.",
        override_usage = "pts ls [PATTERN]"
    )]
    Ls(LsArgs),
    #[command(
        about = "Remove the secret a pattern resolves to.",
        override_usage = "pts rm <PATTERN>"
    )]
    Rm(RmArgs),
    #[command(
        about = "Rename a secret; the target label must be unused.",
        override_usage = "pts mv <PATTERN> <NEW_LABEL>"
    )]
    Mv(MvArgs),
    #[command(
        about = "Check that the release tag names exactly the manifest version.",
        override_usage = "pts release [--tag TAG] [--manifest PATH]"
    )]
    Release(ReleaseArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    #[arg(long, help = "Owner name folded into the master key")]
    pub owner: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub label: String,
    #[arg(
        long,
        help = "Login domain",
        requires = "username",
        conflicts_with_all = ["salt", "encrypt"]
    )]
    pub domain: Option<String>,
    #[arg(long, help = "Login username", requires = "domain")]
    pub username: Option<String>,
    #[arg(
        long,
        help = "Login iteration; bump it to rotate the generated password",
        requires = "domain"
    )]
    pub iteration: Option<u32>,
    #[arg(
        long,
        help = "Generated value length (default 20)",
        conflicts_with = "encrypt"
    )]
    pub length: Option<usize>,
    #[arg(
        long,
        value_name = "SALT",
        help = "Explicit generation salt",
        conflicts_with = "encrypt"
    )]
    pub salt: Option<String>,
    #[arg(
        long,
        value_name = "VALUE",
        num_args = 0..=1,
        help = "Store an encrypted literal value; prompts when VALUE is omitted"
    )]
    pub encrypt: Option<Option<String>>,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub pattern: String,
}

#[derive(Args, Debug)]
pub struct LsArgs {
    pub pattern: Option<String>,
}

#[derive(Args, Debug)]
pub struct RmArgs {
    pub pattern: String,
}

#[derive(Args, Debug)]
pub struct MvArgs {
    pub pattern: String,
    pub new_label: String,
}

#[derive(Args, Debug)]
pub struct ReleaseArgs {
    #[arg(long, help = "Tag to check; defaults to the exact git tag at HEAD")]
    pub tag: Option<String>,
    #[arg(
        long,
        value_name = "PATH",
        help = "Manifest to read the version from (default Cargo.toml)"
    )]
    pub manifest: Option<PathBuf>,
}
