use std::path::{Path, PathBuf};

use gumdrop::Options;

#[derive(Debug, Options)]
/// lists the live channels you follow, and starts them in your player
pub struct Args {
    /// print this help message
    pub help: bool,

    /// path to the media player (for linux just vlc is enough)
    #[options(no_short, meta = "<path>")]
    pub vlc: Option<String>,

    /// twitch username whose follows are listed
    #[options(no_short, meta = "<name>")]
    pub username: Option<String>,

    /// address to listen on
    #[options(no_short, default = "localhost:9797", meta = "<addr>")]
    pub address: String,

    /// directory with the templates and static files
    #[options(no_short, default = "frontend", meta = "<dir>")]
    pub frontend: PathBuf,

    /// program used to hand the stream to the player
    #[options(no_short, default = "livestreamer", meta = "<cmd>")]
    pub livestreamer: String,

    /// base url of the kraken api
    #[options(no_short, default = "https://api.twitch.tv/kraken", meta = "<url>")]
    pub api: String,
}

impl Args {
    pub fn parse_or_exit() -> Self {
        let args = normalize(std::env::args().skip(1));
        match Self::parse_args_default(&args) {
            Ok(args) if args.help_requested() => {
                println!("{}", Self::usage());
                std::process::exit(0)
            }
            Ok(args) => args,
            Err(err) => {
                eprintln!("{err}");
                eprintln!("{}", Self::usage());
                std::process::exit(2)
            }
        }
    }
}

/// Turns go-style long flags (`-vlc`, `-username=foo`) into `--vlc`, `--username=foo`
pub fn normalize(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| match arg.strip_prefix('-') {
            Some(rest) if rest.len() > 1 && !rest.starts_with('-') => format!("--{rest}"),
            _ => arg,
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("a player must be set with `-vlc <path>` (or LURK_PLAYER)")]
    MissingPlayer,

    #[error("a username must be set with `-username <name>` (or LURK_USERNAME)")]
    MissingUsername,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub player: String,
    pub username: String,
    pub address: String,
    pub frontend: PathBuf,
    pub livestreamer: String,
    pub api: String,
}

impl Config {
    pub const PLAYER_ENV: &'static str = "LURK_PLAYER";
    pub const USERNAME_ENV: &'static str = "LURK_USERNAME";

    pub fn from_args(args: Args) -> Result<Self, ValidationError> {
        Self::from_args_with(args, |key| std::env::var(key).ok())
    }

    /// Flags win over whatever `lookup` finds
    pub fn from_args_with(
        args: Args,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ValidationError> {
        let resolve = |flag: Option<String>, key: &str| {
            flag.filter(|s| !s.trim().is_empty())
                .or_else(|| lookup(key).filter(|s| !s.trim().is_empty()))
        };

        let player = resolve(args.vlc, Self::PLAYER_ENV).ok_or(ValidationError::MissingPlayer)?;
        let username =
            resolve(args.username, Self::USERNAME_ENV).ok_or(ValidationError::MissingUsername)?;

        let this = Self {
            player,
            username,
            address: args.address,
            frontend: args.frontend,
            livestreamer: args.livestreamer,
            api: args.api,
        };
        log::debug!("created: {:?}", this);
        Ok(this)
    }

    pub fn templates(&self) -> PathBuf {
        self.frontend.join("templates")
    }

    pub fn assets(&self) -> &Path {
        &self.frontend
    }
}
