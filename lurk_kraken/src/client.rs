use url::Url;

use crate::{data, Error};

#[derive(Clone)]
pub struct KrakenClient {
    agent: reqwest::Client,
    base: Option<String>,
}

impl Default for KrakenClient {
    fn default() -> Self {
        Self::new()
    }
}

impl KrakenClient {
    pub const BASE_URL: &'static str = "https://api.twitch.tv/kraken";

    pub fn new() -> Self {
        Self::new_with_ep(Option::<String>::None)
    }

    pub fn new_with_ep(ep: impl Into<Option<String>>) -> Self {
        let agent = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .build()
            .expect("valid client");

        Self {
            agent,
            base: ep.into().map(|ep| ep.trim_end_matches('/').to_string()),
        }
    }

    pub async fn get_followed_channels(
        &self,
        username: &str,
    ) -> Result<data::FollowedChannels, Error> {
        self.get_response(&["users", username, "follows", "channels"], &[])
            .await
    }

    pub async fn get_stream_status(&self, channel: &str) -> Result<data::Channel, Error> {
        self.get_response(&["streams", channel], &[]).await
    }

    pub async fn get_streams_by_game(
        &self,
        game: &str,
        limit: usize,
    ) -> Result<data::Streams, Error> {
        let limit = limit.to_string();
        self.get_response(&["streams"], &[("game", game), ("limit", &limit)])
            .await
    }

    pub async fn get_channel(&self, channel: &str) -> Result<data::Channel, Error> {
        self.get_response(&["channels", channel], &[]).await
    }

    /// Each segment is percent-encoded, so names can't reach into other endpoints
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let base = self.base.as_deref().unwrap_or(Self::BASE_URL);
        let mut url = match Url::parse(base) {
            Ok(url) => url,
            Err(source) => {
                return Err(Error::BaseUrl {
                    url: base.to_string(),
                    source,
                })
            }
        };

        match url.path_segments_mut() {
            Ok(mut path) => {
                path.pop_if_empty().extend(segments);
            }
            Err(()) => {
                return Err(Error::BaseUrl {
                    url: base.to_string(),
                    source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
                })
            }
        }

        Ok(url)
    }

    async fn get_response<'k, 'v, T>(
        &self,
        segments: &[&str],
        query: &[(&'k str, &'v str)],
    ) -> Result<T, Error>
    where
        for<'de> T: ::serde::Deserialize<'de> + Send + 'static,
    {
        let url = self.endpoint(segments)?;

        let request = match self.agent.get(url.clone()).query(query).build() {
            Ok(request) => request,
            Err(source) => {
                return Err(Error::Network {
                    url: url.to_string(),
                    source,
                })
            }
        };

        let url = request.url().to_string();
        log::trace!("GET {url}");

        let response = match self.agent.execute(request).await {
            Ok(response) => response,
            Err(source) => return Err(Error::Network { url, source }),
        };
        log::trace!("{url}: {}", response.status());

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => return Err(Error::Network { url, source }),
        };

        serde_json::from_slice(&body).map_err(|source| Error::Decode { url, source })
    }
}
