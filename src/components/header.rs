use artbox::{
    fonts, integrations::ratatui::ArtBox, Alignment as ArtAlignment, Color as ArtColor, Fill,
    LinearGradient, Renderer,
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::AppState;

pub struct ExplorerHeader;

pub struct ExplorerHeaderProps<'a> {
    pub state: &'a AppState,
}

const ACCENT: Color = Color::Rgb(72, 204, 184);
const DIM: Color = Color::DarkGray;

fn banner_gradient() -> Fill {
    // Portal green into teal
    Fill::Linear(LinearGradient::horizontal(
        ArtColor::rgb(120, 220, 120),
        ArtColor::rgb(72, 204, 184),
    ))
}

fn summary_line(state: &AppState) -> Line<'static> {
    let pagination = &state.pagination;
    let search = if state.search.query.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", state.search.query)
    };
    let status = state
        .criteria
        .status
        .map(|s| s.label())
        .unwrap_or("All");
    let gender = state
        .criteria
        .gender
        .map(|g| g.label())
        .unwrap_or("All");
    let species = state.criteria.species.clone().unwrap_or_else(|| "All".into());

    Line::from(vec![
        Span::styled(pagination.summary(), Style::default().fg(ACCENT)),
        Span::styled(
            format!("  ({} characters)", pagination.count),
            Style::default().fg(DIM),
        ),
        Span::styled("  |  Search: ", Style::default().fg(DIM)),
        Span::styled(search, Style::default().fg(ACCENT)),
        Span::styled("  Status: ", Style::default().fg(DIM)),
        Span::raw(status.to_string()),
        Span::styled("  Gender: ", Style::default().fg(DIM)),
        Span::raw(gender.to_string()),
        Span::styled("  Species: ", Style::default().fg(DIM)),
        Span::raw(species),
    ])
    .centered()
}

impl Component<Action> for ExplorerHeader {
    type Props<'a> = ExplorerHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet title — artbox picks the best font
            Constraint::Length(1), // Filter / pagination summary
        ])
        .split(area);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(banner_gradient());
        frame.render_widget(ArtBox::new(&renderer, "Rick & Morty"), chunks[0]);

        frame.render_widget(Paragraph::new(summary_line(props.state)), chunks[1]);
    }
}
