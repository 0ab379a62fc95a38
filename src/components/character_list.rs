use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, ScrollbarStyle, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle,
};

use super::Component;
use crate::action::Action;
use crate::state::AppState;

/// Status badge colour, mirroring alive/dead/unknown
pub fn status_color(status: &str) -> Color {
    if status.eq_ignore_ascii_case("alive") {
        Color::Green
    } else if status.eq_ignore_ascii_case("dead") {
        Color::Red
    } else {
        Color::Gray
    }
}

pub struct CharacterList {
    list: SelectList,
}

pub struct CharacterListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
    pub on_select: fn(usize) -> Action,
}

impl Default for CharacterList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl CharacterList {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(state: &AppState) -> Vec<Line<'static>> {
        state
            .filtered()
            .map(|character| {
                Line::from(vec![
                    Span::styled(
                        "\u{25cf} ",
                        Style::default().fg(status_color(&character.status)),
                    ),
                    Span::raw(character.name.clone()),
                ])
            })
            .collect()
    }

    fn list_style() -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: None,
                fg: None,
            },
            selection: SelectionStyle {
                style: Some(Style::default().add_modifier(Modifier::REVERSED)),
                marker: None,
                disabled: false,
            },
            scrollbar: ScrollbarStyle::default(),
        }
    }
}

impl Component<Action> for CharacterList {
    type Props<'a> = CharacterListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Scroll { delta, .. } = event {
            return vec![Action::ListMove((*delta * 3) as i16)];
        }

        let items = Self::items(props.state);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props
                .state
                .selected_index
                .min(items.len().saturating_sub(1)),
            is_focused: true,
            style: Self::list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: props.on_select,
            render_item: &|item| item.clone(),
        };
        self.list.handle_event(event, list_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Characters")
            .border_style(if props.is_focused {
                Style::default().fg(Color::Rgb(72, 204, 184))
            } else {
                Style::default().fg(Color::DarkGray)
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items = Self::items(props.state);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props
                .state
                .selected_index
                .min(items.len().saturating_sub(1)),
            is_focused: props.is_focused,
            style: Self::list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: props.on_select,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, inner, list_props);
    }
}
