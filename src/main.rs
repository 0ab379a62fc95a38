//! Rick and Morty character explorer TUI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mortytui::action::Action;
use mortytui::api;
use mortytui::components::{
    Component, ExplorerDisplay, ExplorerDisplayProps, SearchOverlay, SearchOverlayProps,
};
use mortytui::effect::Effect;
use mortytui::reducer::reducer;
use mortytui::state::{AppState, SEARCH_DEBOUNCE_MS, SPINNER_TICK_MS};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Character explorer TUI for the Rick and Morty API
#[derive(Parser, Debug)]
#[command(name = "mortytui")]
#[command(about = "Browse, search and filter Rick and Morty characters")]
struct Args {
    /// Page to open on startup
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ExplorerComponentId {
    Explorer,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ExplorerContext {
    Main,
    Search,
}

impl EventRoutingState<ExplorerComponentId, ExplorerContext> for AppState {
    fn focused(&self) -> Option<ExplorerComponentId> {
        if self.search.active {
            Some(ExplorerComponentId::Search)
        } else {
            Some(ExplorerComponentId::Explorer)
        }
    }

    fn modal(&self) -> Option<ExplorerComponentId> {
        if self.search.active {
            Some(ExplorerComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: ExplorerComponentId) -> ExplorerContext {
        match id {
            ExplorerComponentId::Explorer => ExplorerContext::Main,
            ExplorerComponentId::Search => ExplorerContext::Search,
        }
    }

    fn default_context(&self) -> ExplorerContext {
        ExplorerContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        page,
        debug: debug_args,
    } = Args::parse();

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move { Ok::<AppState, io::Error>(AppState::new(page)) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
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
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct ExplorerUi {
    display: ExplorerDisplay,
    search: SearchOverlay,
}

impl ExplorerUi {
    fn new() -> Self {
        Self {
            display: ExplorerDisplay::new(),
            search: SearchOverlay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<ExplorerComponentId>,
    ) {
        event_ctx.set_component_area(ExplorerComponentId::Explorer, area);

        let props = ExplorerDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && !state.search.active,
        };
        self.display.render(frame, area, props);

        self.search.set_open(state.search.active);
        if state.search.active {
            let modal_area = centered_rect(60, 8, area);
            event_ctx.set_component_area(ExplorerComponentId::Search, modal_area);
            let props = SearchOverlayProps {
                query: &state.search.query,
                match_count: state.filtered_indices.len(),
                is_focused: render_ctx.is_focused(),
                on_query_change: Action::SearchQueryChange,
                on_query_submit: Action::SearchQuerySubmit,
            };
            self.search.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&ExplorerComponentId::Search);
        }
    }

    fn handle_explorer_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = ExplorerDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
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

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search.active);
        let props = SearchOverlayProps {
            query: &state.search.query,
            match_count: state.filtered_indices.len(),
            is_focused: true,
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::SearchQuerySubmit,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
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
    let ui = Rc::new(RefCell::new(ExplorerUi::new()));
    let mut bus: EventBus<AppState, Action, ExplorerComponentId, ExplorerContext> = EventBus::new();
    let keybindings: Keybindings<ExplorerContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(ExplorerComponentId::Explorer, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_explorer_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(ExplorerComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
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
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
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
    match effect {
        Effect::FetchPage { page } => {
            // One key: a newer fetch supersedes the outstanding one
            ctx.tasks().spawn(TaskKey::new("characters"), async move {
                match api::fetch_page(page).await {
                    Ok(result) => Action::PageDidLoad { page, result },
                    Err(e) => Action::PageDidError {
                        page,
                        error: e.to_string(),
                    },
                }
            });
        }
        Effect::CommitSearch { query } => {
            ctx.tasks().debounce(
                "search_commit",
                Duration::from_millis(SEARCH_DEBOUNCE_MS),
                async move { Action::SearchDidCommit(query) },
            );
        }
    }
}
