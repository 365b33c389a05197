//! Pokedex catalog viewer

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pokedex_viewer::action::Action;
use pokedex_viewer::api;
use pokedex_viewer::components::{CatalogView, CatalogViewProps, Component};
use pokedex_viewer::config::{
    DetailOrdering, ViewerConfig, DEFAULT_CATALOG, DEFAULT_LOOKUP_URL,
};
use pokedex_viewer::effect::Effect;
use pokedex_viewer::logging;
use pokedex_viewer::reducer::reducer;
use pokedex_viewer::state::AppState;
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey, TaskManager,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse a static Pokedex and look up details on demand")]
struct Args {
    /// Catalog file path or http(s) URL
    #[arg(long, default_value = DEFAULT_CATALOG)]
    catalog: String,

    /// Base URL of the detail lookup service
    #[arg(long, default_value = DEFAULT_LOOKUP_URL)]
    lookup_url: String,

    /// How overlapping detail responses are applied
    #[arg(long, value_enum, default_value = "last-resolved")]
    ordering: DetailOrdering,

    #[arg(long, default_value = "logs/pokedex.log")]
    log_file: PathBuf,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokedexComponentId {
    Catalog,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokedexContext {
    Main,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        Some(PokedexComponentId::Catalog)
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        None
    }

    fn binding_context(&self, _id: PokedexComponentId) -> PokedexContext {
        PokedexContext::Main
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        catalog,
        lookup_url,
        ordering,
        log_file,
        debug: debug_args,
    } = Args::parse();

    let config = ViewerConfig::new(&catalog, &lookup_url, ordering)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    logging::init_file(&log_file)?;
    tracing::info!(catalog = %config.catalog, lookup = %config.lookup_base_url, "starting");

    let debug = DebugSession::new(debug_args);
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| {
            let config = config.clone();
            async move { Ok::<AppState, io::Error>(AppState::new(&config)) }
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("shut down cleanly");
    Ok(())
}

struct PokedexUi {
    view: CatalogView,
}

impl PokedexUi {
    fn new() -> Self {
        Self {
            view: CatalogView::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokedexComponentId>,
    ) {
        event_ctx.set_component_area(PokedexComponentId::Catalog, area);
        let props = CatalogViewProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.view.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = CatalogViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.view.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, PokedexComponentId, PokedexContext> = EventBus::new();
    let keybindings: Keybindings<PokedexContext> = Keybindings::new();

    let ui_catalog = Rc::clone(&ui);
    bus.register(PokedexComponentId::Catalog, move |event, state| {
        ui_catalog.borrow_mut().handle_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    spawn_effect(effect, ctx.tasks());
}

fn spawn_effect(effect: Effect, tasks: &mut TaskManager<Action>) {
    match effect {
        Effect::LoadCatalog { source } => {
            tasks.spawn(TaskKey::new("catalog"), async move {
                match api::load_catalog(&source).await {
                    Ok(entries) => {
                        tracing::info!(count = entries.len(), %source, "catalog loaded");
                        Action::CatalogDidLoad(entries)
                    }
                    Err(error) => {
                        tracing::warn!(%source, %error, "catalog load failed");
                        Action::CatalogDidError(error.to_string())
                    }
                }
            });
        }
        // One task per request: overlapping fetches all run to completion
        Effect::FetchDetail { id, seq, url } => {
            let key = format!("detail_{seq}");
            tasks.spawn(TaskKey::new(key), async move {
                match api::fetch_detail(&url).await {
                    Ok(detail) => Action::DetailDidLoad { seq, detail },
                    Err(error) => {
                        tracing::warn!(id, seq, %url, %error, "detail fetch failed");
                        Action::DetailDidError {
                            seq,
                            id,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::mpsc;

    fn pokemon_json(id: u32, name: &str) -> String {
        format!(
            r#"{{"name": "{name}", "id": {id}, "height": 1, "weight": 1, "base_experience": 1,
                "types": [], "abilities": [], "sprites": {{"front_default": null}}}}"#
        )
    }

    async fn read_path(socket: &mut TcpStream) -> String {
        let mut buf = vec![0u8; 4096];
        let n = socket.read(&mut buf).await.unwrap_or(0);
        String::from_utf8_lossy(&buf[..n])
            .split_whitespace()
            .nth(1)
            .unwrap_or_default()
            .to_string()
    }

    async fn respond(socket: &mut TcpStream, body: &str) {
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    }

    /// Waits for both lookups, then answers /pokemon/4 before /pokemon/1
    async fn serve_out_of_order() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            let mut pending = Vec::new();
            for _ in 0..2 {
                let (mut socket, _) = listener.accept().await.unwrap();
                let path = read_path(&mut socket).await;
                pending.push((path, socket));
            }
            pending.sort_by_key(|(path, _)| path != "/pokemon/4");
            for (path, mut socket) in pending {
                let body = if path == "/pokemon/4" {
                    pokemon_json(4, "charmander")
                } else {
                    pokemon_json(1, "bulbasaur")
                };
                respond(&mut socket, &body).await;
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        });

        base
    }

    #[tokio::test]
    async fn test_overlapping_detail_fetches_both_complete() {
        let base = serve_out_of_order().await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        for (seq, id) in [(0, 1), (1, 4)] {
            spawn_effect(
                Effect::FetchDetail {
                    id,
                    seq,
                    url: api::detail_url(&base, id),
                },
                &mut tasks,
            );
        }

        let mut resolved = Vec::new();
        for _ in 0..2 {
            let action = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("detail fetch should finish")
                .expect("action channel open");
            match action {
                Action::DetailDidLoad { seq, detail } => resolved.push((seq, detail.id)),
                other => panic!("expected DetailDidLoad, got {other:?}"),
            }
        }

        // Resolution order, the earlier request lands last
        assert_eq!(resolved, vec![(1, 4), (0, 1)]);
    }
}
