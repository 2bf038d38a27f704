/// Wardrobe presentation widgets
///
/// Sections for the model photo and each item category: an add button
/// plus a wrapped grid of thumbnails with per-item remove buttons.

use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::app::Message;
use crate::state::wardrobe::{Category, ImageBlob, NamedItem};

const THUMBNAIL_SIZE: u16 = 96;

/// Model photo section: the preview with a remove button, or the picker
/// prompt while no photo is loaded.
pub fn model_section(model: Option<&ImageBlob>) -> Element<'_, Message> {
    let body: Element<Message> = match model {
        Some(blob) => column![
            image(image::Handle::from_bytes(blob.bytes.clone())).width(Length::Fill),
            button(text("Remove").size(12)).on_press(Message::ClearModelImage),
        ]
        .spacing(8)
        .into(),
        None => column![
            text("Generated looks start from this photo.").size(12),
            button(text("Select Model Photo")).on_press(Message::PickModelImage),
        ]
        .spacing(8)
        .into(),
    };

    section_box("1. Model Photo", body)
}

/// One category section with its uploader and thumbnails.
pub fn section<'a>(
    title: &'a str,
    category: Category,
    items: &'a [NamedItem],
) -> Element<'a, Message> {
    let mut body = column![button(text(format!("Add a {}", category.label())).size(14))
        .on_press(Message::PickItem(category))
        .padding(8)]
    .spacing(10);

    if !items.is_empty() {
        let thumbnails: Vec<Element<Message>> = items
            .iter()
            .map(|item| thumbnail(item, category))
            .collect();
        body = body.push(Wrap::with_elements(thumbnails).spacing(8.0).line_spacing(8.0));
    }

    section_box(title, body.into())
}

/// Preview of the outfit carried into the accessory phase.
pub fn styling_base(image_blob: &ImageBlob) -> Element<'_, Message> {
    section_box(
        "Styling Base",
        image(image::Handle::from_bytes(image_blob.bytes.clone()))
            .width(Length::Fill)
            .into(),
    )
}

fn thumbnail(item: &NamedItem, category: Category) -> Element<'_, Message> {
    column![
        image(image::Handle::from_bytes(item.image.bytes.clone()))
            .width(THUMBNAIL_SIZE)
            .height(THUMBNAIL_SIZE),
        row![
            text(&item.name).size(11).width(THUMBNAIL_SIZE - 24),
            button(text("✕").size(11)).on_press(Message::RemoveItem(category, item.id)),
        ]
        .spacing(4)
        .align_y(Alignment::Center),
    ]
    .spacing(4)
    .into()
}

fn section_box<'a>(title: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    container(column![text(title).size(18), body].spacing(10))
        .padding(12)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}
