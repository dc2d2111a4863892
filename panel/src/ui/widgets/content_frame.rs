use iced::widget::{column, container, mouse_area, scrollable, text};
use iced::{Color, Element, Length};
use panel_shell::frame::InMemoryDocument;

use crate::theme::ThemeProps;

const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 14.0;
const SOURCE_SIZE: f32 = 11.0;
const CONTENT_PADDING: f32 = 18.0;
const LINE_SPACING: f32 = 6.0;
const CROSS_ORIGIN_TEXT: &str = "Bu sayfa ayrı bir kaynaktan yüklendi.";
const LOADING_TEXT: &str = "Yükleniyor...";
const EMPTY_TEXT: &str = "Soldaki menüden bir sayfa seçin.";

/// Events emitted by the content frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentFrameEvent {
    Pressed,
}

/// Props for rendering the content frame.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ContentFrameProps<'a> {
    pub(crate) source: Option<&'a str>,
    pub(crate) title: Option<&'a str>,
    pub(crate) document: Option<&'a InMemoryDocument>,
    pub(crate) cross_origin: bool,
    pub(crate) failure: Option<&'a str>,
    pub(crate) opacity: f32,
    pub(crate) theme: ThemeProps<'a>,
}

/// Render the hosted page's visible text with the frame opacity applied.
pub(crate) fn view<'a>(
    props: ContentFrameProps<'a>,
) -> Element<'a, ContentFrameEvent> {
    let palette = *props.theme.theme.iced_palette();
    let opacity = props.opacity.clamp(0.0, 1.0);
    let foreground = faded(palette.foreground, opacity);
    let dim = faded(palette.dim_foreground, opacity);

    let mut body = column![].spacing(LINE_SPACING).width(Length::Fill);

    if let Some(title) = props.title {
        body = body.push(colored(title, TITLE_SIZE, foreground));
    }
    if let Some(source) = props.source {
        body = body.push(colored(source, SOURCE_SIZE, dim));
    }

    body = match (props.source, props.failure, props.document) {
        (None, _, _) => body.push(colored(EMPTY_TEXT, BODY_SIZE, dim)),
        (Some(_), Some(failure), _) => {
            let danger = faded(palette.danger, opacity);
            body.push(colored(failure, BODY_SIZE, danger))
        },
        (Some(_), None, _) if props.cross_origin => {
            body.push(colored(CROSS_ORIGIN_TEXT, BODY_SIZE, dim))
        },
        (Some(_), None, Some(document)) => {
            document_lines(body, document, foreground)
        },
        (Some(_), None, None) => {
            body.push(colored(LOADING_TEXT, BODY_SIZE, dim))
        },
    };

    let content = scrollable::Scrollable::new(
        container(body).padding(CONTENT_PADDING).width(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill);

    let pressable =
        mouse_area(content).on_press(ContentFrameEvent::Pressed);

    container(pressable)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| iced::widget::container::Style {
            background: Some(palette.background.into()),
            ..Default::default()
        })
        .into()
}

fn document_lines<'a>(
    mut body: iced::widget::Column<'a, ContentFrameEvent>,
    document: &'a InMemoryDocument,
    color: Color,
) -> iced::widget::Column<'a, ContentFrameEvent> {
    for element in document.visible_elements() {
        if let Some(line) = element.text() {
            body = body.push(colored(line, BODY_SIZE, color));
        }
    }
    body
}

fn colored<'a>(
    value: &'a str,
    size: f32,
    color: Color,
) -> Element<'a, ContentFrameEvent> {
    text(value)
        .size(size)
        .style(move |_| iced::widget::text::Style { color: Some(color) })
        .into()
}

fn faded(color: Color, opacity: f32) -> Color {
    Color {
        a: color.a * opacity,
        ..color
    }
}
