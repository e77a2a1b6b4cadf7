use std::{net::SocketAddr, path::Path, sync::Arc};

use anyhow::Context as _;
use axum::{
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, get_service},
    Extension, Router,
};
use tower_http::services::ServeDir;

use lurk_kraken::{data::Stream, KrakenClient};

use crate::{
    aggregate,
    config::Config,
    launcher::Launcher,
    render::{Page, Renderer, TemplateError, CHANNEL, HOMEPAGE},
};

pub const TOP_STREAMS: usize = 20;
pub const COUNTER_STRIKE: &str = "Counter-Strike: Global Offensive";
pub const LEAGUE_OF_LEGENDS: &str = "League of Legends";

/// What every handler gets a copy of
#[derive(Clone)]
pub struct State {
    client: KrakenClient,
    launcher: Arc<dyn Launcher>,
    renderer: Renderer,
    username: Arc<str>,
}

impl State {
    pub fn new(config: &Config, launcher: impl Launcher) -> Self {
        Self {
            client: KrakenClient::new_with_ep(config.api.clone()),
            launcher: Arc::new(launcher),
            renderer: Renderer::new(config.templates()),
            username: Arc::from(&*config.username),
        }
    }

    async fn top_streams(&self, game: &str) -> Vec<Stream> {
        match self.client.get_streams_by_game(game, TOP_STREAMS).await {
            Ok(streams) => streams.streams,
            Err(err) => {
                log::warn!("cannot list streams for '{game}': {err}");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Problem {
    #[error("could not start stream: channel name cannot be empty")]
    MissingChannel,

    #[error(transparent)]
    Follows(lurk_kraken::Error),

    #[error(transparent)]
    Upstream(lurk_kraken::Error),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MissingChannel | Self::Follows(..) => StatusCode::BAD_REQUEST,
            Self::Upstream(..) | Self::Template(..) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        log::warn!("{}: {}", status, self);
        (status, self.to_string()).into_response()
    }
}

pub fn router(state: State, assets: &Path) -> Router {
    let assets = get_service(ServeDir::new(assets)).handle_error(|err: std::io::Error| async move {
        let body = format!("could not read file: {err}");
        (StatusCode::INTERNAL_SERVER_ERROR, body)
    });

    Router::new()
        .route("/", get(home))
        .route("/start_stream", get(start_stream))
        .nest("/frontend", assets)
        .layer(Extension(state))
}

pub async fn start_server(config: &Config, state: State) -> anyhow::Result<()> {
    let addr: SocketAddr = tokio::net::lookup_host(&config.address)
        .await?
        .next()
        .with_context(|| format!("cannot resolve '{}'", config.address))?;

    let router = router(state, config.assets());

    log::info!("listening on: http://{}", addr);
    axum::Server::try_bind(&addr)
        .with_context(|| format!("cannot listen on {addr}"))?
        .serve(router.into_make_service())
        .await?;
    Ok(())
}

async fn home(Extension(state): Extension<State>) -> Result<Html<String>, Problem> {
    log::debug!("listing live channels followed by {}", state.username);

    let follows = state
        .client
        .get_followed_channels(&state.username)
        .await
        .map_err(Problem::Follows)?;

    let followed_channels = aggregate::live_channels(&state.client, follows.channel_names()).await;

    let cs_streams = state.top_streams(COUNTER_STRIKE).await;
    let lol_streams = state.top_streams(LEAGUE_OF_LEGENDS).await;

    let page = Page {
        followed_channels,
        cs_streams,
        lol_streams,
    };

    Ok(Html(state.renderer.render(HOMEPAGE, &page).await?))
}

#[derive(Debug, serde::Deserialize)]
struct StartStream {
    #[serde(default)]
    channel: String,
}

async fn start_stream(
    Query(StartStream { channel }): Query<StartStream>,
    Extension(state): Extension<State>,
) -> Result<Html<String>, Problem> {
    let channel = channel.trim();
    if channel.is_empty() {
        return Err(Problem::MissingChannel);
    }

    log::debug!("starting stream for {channel}");
    state.launcher.start(channel);

    let channel = state
        .client
        .get_channel(channel)
        .await
        .map_err(Problem::Upstream)?;

    Ok(Html(state.renderer.render(CHANNEL, &channel).await?))
}
