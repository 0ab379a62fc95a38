use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    CharacterCard, CharacterCardProps, CharacterList, CharacterListProps, Component,
    ExplorerHeader, ExplorerHeaderProps,
};
use crate::action::Action;
use crate::state::AppState;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Props for ExplorerDisplay - read-only view of state
pub struct ExplorerDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main explorer view: header, character list + detail card, help bar
pub struct ExplorerDisplay {
    list: CharacterList,
}

impl Default for ExplorerDisplay {
    fn default() -> Self {
        Self {
            list: CharacterList::new(),
        }
    }
}

impl ExplorerDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for ExplorerDisplay {
    type Props<'a> = ExplorerDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Char('n') | KeyCode::Right => return vec![Action::PageNext],
                KeyCode::Char('p') | KeyCode::Left => return vec![Action::PagePrev],
                KeyCode::Char('/') => return vec![Action::SearchOpen],
                KeyCode::Char('s') => return vec![Action::FilterStatusCycle],
                KeyCode::Char('g') => return vec![Action::FilterGenderCycle],
                KeyCode::Char(']') => return vec![Action::FilterSpeciesNext],
                KeyCode::Char('[') => return vec![Action::FilterSpeciesPrev],
                KeyCode::Char('c') => return vec![Action::FilterClear],
                KeyCode::Char('r') | KeyCode::F(5) => return vec![Action::Init],
                KeyCode::Char('q') | KeyCode::Esc => return vec![Action::Quit],
                _ => {}
            }
        }

        // Everything else drives the list selection
        self.list
            .handle_event(
                event,
                CharacterListProps {
                    state: props.state,
                    is_focused: true,
                    on_select: Action::ListSelect,
                },
            )
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(6), // Banner + filter summary
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let mut header = ExplorerHeader;
        header.render(frame, chunks[0], ExplorerHeaderProps { state: props.state });

        let state = props.state;
        if state.loading {
            render_loading(frame, chunks[1], state);
        } else if let Some(error) = state.error.as_deref() {
            render_error(frame, chunks[1], error);
        } else if state.filtered_indices.is_empty() {
            render_no_match(frame, chunks[1]);
        } else {
            let body = Layout::horizontal([
                Constraint::Percentage(40), // Character list
                Constraint::Percentage(60), // Detail card
            ])
            .split(chunks[1]);

            self.list.render(
                frame,
                body[0],
                CharacterListProps {
                    state,
                    is_focused: props.is_focused,
                    on_select: Action::ListSelect,
                },
            );

            let mut card = CharacterCard;
            card.render(
                frame,
                body[1],
                CharacterCardProps {
                    character: state.selected_character(),
                },
            );
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("p/n", "page"),
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("s", "status"),
                    StatusBarHint::new("g", "gender"),
                    StatusBarHint::new("[ ]", "species"),
                    StatusBarHint::new("c", "clear"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_loading(frame: &mut Frame, area: Rect, state: &AppState) {
    let dots = 1 + (state.tick_count / 4 % 3) as usize;
    let message = format!("Loading characters{}", ".".repeat(dots));
    render_centered_message(frame, area, &message);
}

fn render_no_match(frame: &mut Frame, area: Rect) {
    render_centered_message(
        frame,
        area,
        "No characters match your filters. Try adjusting your search.",
    );
}

fn render_centered_message(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);
    let line = Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Gray),
    ))
    .centered();
    frame.render_widget(Paragraph::new(line), chunks[0]);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(Paragraph::new(Line::from(ERROR_ICON).centered()), chunks[0]);
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("r", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        chunks[4],
    );
}
