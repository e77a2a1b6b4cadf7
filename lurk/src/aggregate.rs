use std::sync::Arc;

use tokio::sync::Mutex;

use lurk_kraken::{data::Channel, KrakenClient};

/// Something that can tell whether a channel is live
#[async_trait::async_trait]
pub trait StreamStatus
where
    Self: Clone + Send + Sync + 'static,
{
    async fn stream_status(&self, channel: &str) -> Result<Channel, lurk_kraken::Error>;
}

#[async_trait::async_trait]
impl StreamStatus for KrakenClient {
    async fn stream_status(&self, channel: &str) -> Result<Channel, lurk_kraken::Error> {
        self.get_stream_status(channel).await
    }
}

/// Looks up every channel at once and returns the ones that are live, sorted by their display name.
///
/// Channels that fail to resolve are logged and left out.
pub async fn live_channels<S, I>(source: &S, names: I) -> Vec<Channel>
where
    S: StreamStatus,
    I: IntoIterator,
    I::Item: Into<String>,
{
    let live = Arc::new(Mutex::new(Vec::new()));

    let tasks = names
        .into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(pos, name): (usize, String)| {
            let source = source.clone();
            let live = Arc::clone(&live);
            let task = tokio::spawn(async move {
                let channel = source.stream_status(&name).await?;
                if channel.is_live() {
                    live.lock().await.push((pos, channel));
                }
                Ok::<_, lurk_kraken::Error>(())
            });
            (pos, task)
        })
        .collect::<Vec<_>>();

    let total = tasks.len();
    let mut failed = 0;
    for (pos, task) in tasks {
        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                failed += 1;
                log::warn!("skipping followed channel #{pos}: {err}");
            }
            Err(err) => {
                failed += 1;
                log::warn!("lookup of followed channel #{pos} did not finish: {err}");
            }
        }
    }

    let mut live = std::mem::take(&mut *live.lock().await);
    // completion order is arbitrary, put them back in follow order so ties stay put
    live.sort_by_key(|&(pos, _)| pos);
    let mut live = live
        .into_iter()
        .map(|(_, channel)| channel)
        .collect::<Vec<_>>();
    sort_channels(&mut live);

    log::debug!(
        "{} of {} followed channels are live ({} failed)",
        live.len(),
        total,
        failed
    );
    live
}

/// Stable, case-sensitive sort by the stream's display name
pub fn sort_channels(channels: &mut [Channel]) {
    channels.sort_by(|left, right| left.sort_name().cmp(right.sort_name()));
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use lurk_kraken::data::{ChannelInfo, Stream};

    use super::*;

    fn live(display_name: &str, status: &str) -> Channel {
        Channel {
            stream: Stream {
                viewers: 1,
                channel: ChannelInfo {
                    display_name: display_name.to_string(),
                    status: Some(status.to_string()),
                    ..ChannelInfo::default()
                },
                ..Stream::default()
            },
            ..Channel::default()
        }
    }

    #[derive(Clone, Default)]
    struct Fake {
        channels: Arc<HashMap<&'static str, Option<Channel>>>,
    }

    impl Fake {
        fn new(channels: impl IntoIterator<Item = (&'static str, Option<Channel>)>) -> Self {
            Self {
                channels: Arc::new(channels.into_iter().collect()),
            }
        }
    }

    #[async_trait::async_trait]
    impl StreamStatus for Fake {
        async fn stream_status(&self, channel: &str) -> Result<Channel, lurk_kraken::Error> {
            // stagger the responses so they finish out of order
            let delay = (channel.len() % 3) as u64 * 5;
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;

            match self.channels.get(channel) {
                Some(Some(channel)) => Ok(channel.clone()),
                Some(None) => Ok(Channel::default()),
                None => Err(lurk_kraken::Error::Decode {
                    url: format!("fake/streams/{channel}"),
                    source: serde_json::from_str::<()>("not found").unwrap_err(),
                }),
            }
        }
    }

    fn names(channels: &[Channel]) -> Vec<&str> {
        channels.iter().map(Channel::sort_name).collect()
    }

    #[tokio::test]
    async fn only_live_channels_sorted() {
        let fake = Fake::new([
            ("c", Some(live("Charlie", ""))),
            ("b", None),
            ("a", Some(live("Alpha", ""))),
        ]);

        let channels = live_channels(&fake, ["c", "b", "a"]).await;
        assert_eq!(names(&channels), ["Alpha", "Charlie"]);
    }

    #[tokio::test]
    async fn failures_are_left_out() {
        let fake = Fake::new([
            ("a", Some(live("a", ""))),
            ("bb", Some(live("b", ""))),
            ("ccc", Some(live("c", ""))),
        ]);

        let all = live_channels(&fake, ["ccc", "bb", "a"]).await;
        assert_eq!(names(&all), ["a", "b", "c"]);

        let some = live_channels(&fake, ["ccc", "missing", "bb", "gone", "a"]).await;
        assert_eq!(some, all);

        let none = live_channels(&fake, ["missing", "gone"]).await;
        assert!(none.is_empty());

        let empty = live_channels(&fake, Vec::<String>::new()).await;
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn ties_keep_follow_order() {
        let fake = Fake::new([
            ("first", Some(live("Same", "1"))),
            ("second", Some(live("Same", "2"))),
            ("third", Some(live("Same", "3"))),
            ("zed", Some(live("Zed", ""))),
            ("lower", Some(live("alpha", ""))),
        ]);

        let channels = live_channels(&fake, ["zed", "lower", "third", "first", "second"]).await;
        let order = channels
            .iter()
            .map(|c| {
                (
                    c.sort_name(),
                    c.stream.channel.status.as_deref().unwrap_or_default(),
                )
            })
            .collect::<Vec<_>>();

        // uppercase sorts before lowercase
        assert_eq!(
            order,
            [
                ("Same", "3"),
                ("Same", "1"),
                ("Same", "2"),
                ("Zed", ""),
                ("alpha", "")
            ]
        );
    }

    #[test]
    fn sort_is_stable() {
        let mut channels = vec![
            live("b", "1"),
            live("a", "1"),
            live("b", "2"),
            live("a", "2"),
        ];
        sort_channels(&mut channels);

        let order = channels
            .iter()
            .map(|c| (c.sort_name(), c.stream.channel.status.clone().unwrap()))
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            [
                ("a", String::from("1")),
                ("a", String::from("2")),
                ("b", String::from("1")),
                ("b", String::from("2")),
            ]
        );
    }
}
