/// Result gallery
///
/// One card per job record, in batch order: skeleton text while the
/// record is pending or generating, the result image with save/style
/// actions on success, and the captured error message inline on failure.

use iced::widget::{button, column, container, image, row, text};
use iced::{Element, Length};
use iced_aw::Wrap;

use crate::app::Message;
use crate::services::gemini::UNKNOWN_ERROR;
use crate::state::jobs::{JobRecord, JobStatus};
use crate::state::session::Phase;

const CARD_WIDTH: u16 = 220;
const CARD_IMAGE_WIDTH: u16 = 196;

pub fn gallery<'a>(records: &'a [JobRecord], phase: Phase, busy: bool) -> Element<'a, Message> {
    if records.is_empty() {
        return container(
            column![
                text("Your Look Gallery").size(18),
                text("Generated looks will appear here once you've added items and clicked the button above.")
                    .size(13),
            ]
            .spacing(8),
        )
        .padding(24)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into();
    }

    let cards: Vec<Element<Message>> = records
        .iter()
        .map(|record| card(record, phase, busy))
        .collect();

    Wrap::with_elements(cards)
        .spacing(12.0)
        .line_spacing(12.0)
        .into()
}

fn card<'a>(record: &'a JobRecord, phase: Phase, busy: bool) -> Element<'a, Message> {
    let names = record.work.item_names().join(" + ");

    let body: Element<Message> = match record.status {
        JobStatus::Pending => text("Pending...").size(14).into(),
        JobStatus::Generating => text("Generating...").size(14).into(),
        JobStatus::Error => column![
            text("Generation failed").size(14),
            text(record.error.as_deref().unwrap_or(UNKNOWN_ERROR)).size(12),
        ]
        .spacing(4)
        .into(),
        JobStatus::Success => success_body(record, phase, busy),
    };

    container(column![body, text(names).size(12)].spacing(8))
        .padding(10)
        .width(CARD_WIDTH)
        .style(container::bordered_box)
        .into()
}

fn success_body<'a>(record: &'a JobRecord, phase: Phase, busy: bool) -> Element<'a, Message> {
    let Some(result) = &record.result else {
        // Success records always carry an image; keep the card readable
        // if that ever regresses
        return text("No image returned").size(14).into();
    };

    let mut actions = row![button(text("Save").size(12))
        .on_press(Message::SaveResult(record.id.clone()))]
    .spacing(6);

    if phase == Phase::Outfit && !busy {
        actions = actions.push(
            button(text("Style this look").size(12))
                .on_press(Message::SelectOutfit(record.id.clone())),
        );
    }

    column![
        image(image::Handle::from_bytes(result.bytes.clone())).width(CARD_IMAGE_WIDTH),
        actions,
    ]
    .spacing(8)
    .into()
}
