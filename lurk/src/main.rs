use lurk::{
    config::{Args, Config},
    launcher::Livestreamer,
    start_server, State,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    simple_env_load::load_env_from([".dev.env"]);
    alto_logger::TermLogger::new(
        alto_logger::Options::default()
            .with_time(alto_logger::TimeConfig::relative_now())
            .with_style(alto_logger::StyleConfig::SingleLine),
    )?
    .init()?;

    let args = Args::parse_or_exit();
    let config = Config::from_args(args)?;

    log::info!(
        "listing follows of {}, playing streams with {}",
        config.username,
        config.player
    );
    log::debug!("templates are read from {}", config.templates().display());

    let launcher = Livestreamer::new(&*config.livestreamer, &*config.player);
    let state = State::new(&config, launcher);

    start_server(&config, state).await
}
