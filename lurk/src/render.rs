use std::{error::Error as _, path::PathBuf};

use lurk_kraken::data::{Channel, Stream};

pub const HOMEPAGE: &str = "homepage.html";
pub const CHANNEL: &str = "channel.html";

/// Everything the home page shows
#[derive(Debug, Default, serde::Serialize)]
pub struct Page {
    pub followed_channels: Vec<Channel>,
    pub cs_streams: Vec<Stream>,
    pub lol_streams: Vec<Stream>,
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("error occurred loading template '{}': {}", .path.display(), .source)]
    Load {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error occurred loading template '{}': {}", .path.display(), describe(.source))]
    Parse { path: PathBuf, source: tera::Error },

    #[error("error occurred: {}", describe(.0))]
    Render(#[source] tera::Error),
}

// tera keeps the useful part of its errors in the source chain
fn describe(err: &tera::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(err) = source {
        out.push_str(": ");
        out.push_str(&err.to_string());
        source = err.source();
    }
    out
}

/// Renders the templates in a directory, reading them from disk every time
#[derive(Clone, Debug)]
pub struct Renderer {
    dir: PathBuf,
}

impl Renderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn render<T>(&self, name: &str, data: &T) -> Result<String, TemplateError>
    where
        T: serde::Serialize + ?Sized,
    {
        let path = self.dir.join(name);
        let source = match tokio::fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(source) => return Err(TemplateError::Load { path, source }),
        };

        let mut tera = tera::Tera::default();
        if let Err(source) = tera.add_raw_template(name, &source) {
            return Err(TemplateError::Parse { path, source });
        }

        let context = tera::Context::from_serialize(data).map_err(TemplateError::Render)?;
        tera.render(name, &context).map_err(TemplateError::Render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(templates: &[(&str, &str)]) -> (tempfile::TempDir, Renderer) {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in templates {
            std::fs::write(dir.path().join(name), body).unwrap();
        }
        let renderer = Renderer::new(dir.path());
        (dir, renderer)
    }

    #[tokio::test]
    async fn renders_page() {
        let (_dir, renderer) = renderer(&[(
            HOMEPAGE,
            "{% for channel in followed_channels %}[{{ channel.stream.channel.display_name }}]{% endfor %}",
        )]);

        let mut page = Page::default();
        for name in ["<b>", "lurker"] {
            let mut channel = Channel::default();
            channel.stream.channel.display_name = name.to_string();
            page.followed_channels.push(channel);
        }

        let html = renderer.render(HOMEPAGE, &page).await.unwrap();
        assert_eq!(html, "[&lt;b&gt;][lurker]");
    }

    #[tokio::test]
    async fn reads_template_every_time() {
        let (dir, renderer) = renderer(&[(CHANNEL, "one")]);
        let channel = Channel::default();
        assert_eq!(renderer.render(CHANNEL, &channel).await.unwrap(), "one");

        std::fs::write(dir.path().join(CHANNEL), "two").unwrap();
        assert_eq!(renderer.render(CHANNEL, &channel).await.unwrap(), "two");
    }

    #[tokio::test]
    async fn errors() {
        let (_dir, renderer) = renderer(&[
            (CHANNEL, "{% if %}"),
            (HOMEPAGE, "{{ does_not_exist.name }}"),
        ]);

        let err = renderer.render("missing.html", &()).await.unwrap_err();
        assert!(matches!(err, TemplateError::Load { .. }), "{err:?}");
        assert!(err.to_string().contains("error occurred loading template"));

        let err = renderer.render(CHANNEL, &Channel::default()).await.unwrap_err();
        assert!(matches!(err, TemplateError::Parse { .. }), "{err:?}");
        assert!(err.to_string().contains("error occurred loading template"));

        let err = renderer.render(HOMEPAGE, &Page::default()).await.unwrap_err();
        assert!(matches!(err, TemplateError::Render { .. }), "{err:?}");
        assert!(err.to_string().starts_with("error occurred: "));
    }
}
