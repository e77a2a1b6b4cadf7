#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("'{url}' cannot be used as the api address: {source}")]
    BaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("request '{url}' gave the following error: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("could not parse response body of '{url}': {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

impl Error {
    /// The request that failed
    pub fn url(&self) -> &str {
        match self {
            Self::BaseUrl { url, .. } | Self::Network { url, .. } | Self::Decode { url, .. } => {
                url
            }
        }
    }
}
