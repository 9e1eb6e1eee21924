use std::sync::Arc;

use agentswarm::api::{HttpSwarmApi, SwarmApi};
use agentswarm::app::App;
use agentswarm::config::ClientSettings;
use agentswarm::event::Event;
use agentswarm::logging;
use agentswarm::tui::{init, restore};
use agentswarm::ui::render;
use anyhow::{Context, Result};
use crossterm::event::{Event as CrosstermEvent, EventStream};
use futures_util::StreamExt;
use log::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = ClientSettings::load()?;
    logging::init_file_logging(&settings)?;
    info!("AgentSwarm client starting (backend {})", settings.base_url);

    let api: Arc<dyn SwarmApi> = Arc::new(
        HttpSwarmApi::from_settings(&settings).context("Failed to build the HTTP client")?,
    );
    let mut app = App::new(settings, api);

    let mut tui = init()?;
    let result = run(&mut tui, &mut app).await;
    restore()?;

    if let Err(err) = &result {
        error!("AgentSwarm client exited with an error: {err:#}");
    }
    result
}

async fn run(tui: &mut agentswarm::tui::Tui, app: &mut App) -> Result<()> {
    app.start();

    let mut stream = EventStream::new();
    let mut interval = tokio::time::interval(app.tick_rate());

    while !app.should_quit {
        tui.draw(|frame| render(frame, app))?;

        let event = tokio::select! {
            _ = interval.tick() => Event::Tick,
            maybe_event = stream.next() => {
                match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key))) => Event::Key(key),
                    Some(Ok(CrosstermEvent::Resize(_, _))) => Event::Resize,
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => {
                        error!("Terminal event stream failed: {err}");
                        break;
                    }
                    None => break,
                }
            }
        };

        match event {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.handle_key(key),
            Event::Resize => {}
        }
    }

    info!("AgentSwarm client shutting down");
    Ok(())
}
