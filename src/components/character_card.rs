use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{status_color, Component};
use crate::action::Action;
use crate::state::Character;

/// Detail pane for the selected character
#[derive(Default)]
pub struct CharacterCard;

pub struct CharacterCardProps<'a> {
    pub character: Option<&'a Character>,
}

fn field(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

fn card_lines(character: &Character) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            character.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Status:   ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                character.status.clone(),
                Style::default().fg(status_color(&character.status)),
            ),
        ]),
        field("Species:  ", character.species.clone()),
        field("Gender:   ", character.gender.clone()),
        field("Origin:   ", character.origin.clone()),
        field("Location: ", character.location.clone()),
        field("Image:    ", character.image.clone()),
    ]
}

impl Component<Action> for CharacterCard {
    type Props<'a> = CharacterCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Details")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = match props.character {
            Some(character) => card_lines(character),
            None => vec![Line::from(Span::styled(
                "Nothing selected",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}
