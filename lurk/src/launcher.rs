use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

pub const QUALITY: &str = "best";

pub fn channel_url(channel: &str) -> String {
    format!("http://www.twitch.tv/{channel}")
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("could not start '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("'{program}' failed to load the stream ({status}):\n{output}")]
    Exited {
        program: String,
        status: ExitStatus,
        output: String,
    },
}

/// Runs `program <url> <quality> --player=<player>` until it exits.
///
/// stdout and stderr end up in the same buffer, which is returned on success and
/// is part of the error otherwise.
pub async fn launch(
    program: &str,
    url: &str,
    quality: &str,
    player: &str,
) -> Result<String, LaunchError> {
    let result = Command::new(program)
        .arg(url)
        .arg(quality)
        .arg(format!("--player={player}"))
        .stdin(Stdio::null())
        .output()
        .await;

    let output = match result {
        Ok(output) => output,
        Err(source) => {
            return Err(LaunchError::Spawn {
                program: program.to_string(),
                source,
            })
        }
    };

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(LaunchError::Exited {
            program: program.to_string(),
            status: output.status,
            output: combined,
        });
    }

    Ok(combined)
}

/// Starts a player for a channel without waiting on it
pub trait Launcher
where
    Self: Send + Sync + 'static,
{
    fn start(&self, channel: &str);
}

/// Hands streams to livestreamer (or anything with the same arguments)
#[derive(Clone, Debug)]
pub struct Livestreamer {
    program: String,
    player: String,
}

impl Livestreamer {
    pub fn new(program: impl Into<String>, player: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            player: player.into(),
        }
    }
}

impl Launcher for Livestreamer {
    fn start(&self, channel: &str) {
        let url = channel_url(channel);
        let Self { program, player } = self.clone();

        log::info!("starting {url} in {player}");
        tokio::spawn(async move {
            match launch(&program, &url, QUALITY, &player).await {
                Ok(output) => log::debug!("{program} finished with {url}:\n{output}"),
                Err(err) => log::warn!("could not start livestreamer:\n{err}"),
            }
        });
    }
}
