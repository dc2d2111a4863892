use iced::widget::{container, text_input};
use iced::{Element, Length};

use crate::theme::ThemeProps;

const INPUT_SIZE: f32 = 13.0;
const INPUT_PADDING: [f32; 2] = [6.0, 8.0];
const CONTAINER_PADDING: f32 = 8.0;
const PLACEHOLDER: &str = "Menüde ara...";

/// Identifier of the search input, used to move focus to it.
pub(crate) const SEARCH_INPUT_ID: &str = "panel_search_input";

/// Events emitted by the menu search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SearchBoxEvent {
    Changed(String),
    Submitted,
}

/// Props for rendering the menu search box.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchBoxProps<'a> {
    pub(crate) value: &'a str,
    pub(crate) theme: ThemeProps<'a>,
}

pub(crate) fn view<'a>(
    props: SearchBoxProps<'a>,
) -> Element<'a, SearchBoxEvent> {
    let palette = *props.theme.theme.iced_palette();

    let input = text_input(PLACEHOLDER, props.value)
        .id(SEARCH_INPUT_ID)
        .on_input(SearchBoxEvent::Changed)
        .on_submit(SearchBoxEvent::Submitted)
        .padding(INPUT_PADDING)
        .size(INPUT_SIZE)
        .style(move |base: &iced::Theme, status| {
            let mut style = text_input::default(base, status);
            style.selection = palette.dim_accent;
            style
        })
        .width(Length::Fill);

    container(input)
        .padding(CONTAINER_PADDING)
        .width(Length::Fill)
        .into()
}
