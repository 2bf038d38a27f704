/// Application shell — iced state, messages and the update loop
///
/// The update loop is where the sequential batch runner actually runs:
/// `Generate` publishes the batch and starts item 0, and every
/// `JobSettled` records the outcome and starts the next item, so there is
/// never more than one request in flight. All workflow rules live in
/// `state::session`; this module only forwards intents and drives the
/// async service calls.

use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::{button, column, container, radio, row, scrollable, text};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;

use crate::config::AppConfig;
use crate::services::export;
use crate::services::gemini::GeminiClient;
use crate::services::upload::{self, UploadedImage};
use crate::state::combos::{OutfitMode, WorkItem};
use crate::state::jobs::JobStatus;
use crate::state::session::{Phase, Session};
use crate::state::wardrobe::{Category, ImageBlob};
use crate::ui;

/// Main application state
pub struct TryOnStudio {
    pub session: Session,
    client: Arc<GeminiClient>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the model photo picker
    PickModelImage,
    /// Model photo finished loading (or failed to convert)
    ModelImageLoaded(Result<UploadedImage, String>),
    ClearModelImage,
    /// User clicked "Add" on a wardrobe section
    PickItem(Category),
    /// A wardrobe upload finished loading (or failed to convert)
    ItemLoaded(Category, Result<UploadedImage, String>),
    RemoveItem(Category, u64),
    SetMode(OutfitMode),
    /// Start a generation batch for the active phase
    Generate,
    /// The in-flight generation request settled
    JobSettled {
        index: usize,
        outcome: Result<ImageBlob, String>,
    },
    /// User picked a successful outfit as the styling base
    SelectOutfit(String),
    BackToOutfits,
    /// User asked to download a result image
    SaveResult(String),
    ResultSaved(Result<PathBuf, String>),
}

impl TryOnStudio {
    /// Create a new instance of the application
    pub fn new(config: AppConfig) -> (Self, Task<Message>) {
        let client = Arc::new(GeminiClient::new(config.gemini_api_key, config.gemini_model));

        (
            TryOnStudio {
                session: Session::new(),
                client,
                status: "Ready. Upload a model photo and some garments.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickModelImage => match pick_image_file("Select Model Photo") {
                Some(path) => Task::perform(load_upload(path), Message::ModelImageLoaded),
                None => Task::none(),
            },
            Message::ModelImageLoaded(Ok(uploaded)) => {
                self.status = format!("Model photo \"{}\" loaded.", uploaded.name);
                self.session.set_model_image(uploaded.blob);
                Task::none()
            }
            Message::ModelImageLoaded(Err(error)) => {
                self.status = error;
                Task::none()
            }
            Message::ClearModelImage => {
                self.session.clear_model_image();
                Task::none()
            }
            Message::PickItem(category) => {
                let title = format!("Add a {}", category.label());
                match pick_image_file(&title) {
                    Some(path) => Task::perform(load_upload(path), move |result| {
                        Message::ItemLoaded(category, result)
                    }),
                    None => Task::none(),
                }
            }
            Message::ItemLoaded(category, Ok(uploaded)) => {
                self.status = format!("Added \"{}\" to {}.", uploaded.name, category.label());
                self.session.add_item(category, uploaded.blob, uploaded.name);
                Task::none()
            }
            Message::ItemLoaded(_, Err(error)) => {
                // Conversion errors never reach the registry
                self.status = error;
                Task::none()
            }
            Message::RemoveItem(category, id) => {
                self.session.remove_item(category, id);
                Task::none()
            }
            Message::SetMode(mode) => {
                self.session.mode = mode;
                Task::none()
            }
            Message::Generate => match self.session.start_generation() {
                Ok(()) => self.advance(),
                Err(error) => {
                    self.status = error.to_string();
                    Task::none()
                }
            },
            Message::JobSettled { index, outcome } => {
                self.session.active_jobs_mut().settle(index, outcome);
                self.advance()
            }
            Message::SelectOutfit(job_id) => {
                // Phase transitions are blocked while a batch is running
                if !self.session.is_busy() && self.session.select_outfit(&job_id) {
                    self.status =
                        "Outfit selected. Add accessories and style it.".to_string();
                }
                Task::none()
            }
            Message::BackToOutfits => {
                if !self.session.is_busy() {
                    self.session.back_to_outfits();
                }
                Task::none()
            }
            Message::SaveResult(job_id) => self.save_result(&job_id),
            Message::ResultSaved(Ok(path)) => {
                self.status = format!("✅ Saved {}.", path.display());
                Task::none()
            }
            Message::ResultSaved(Err(error)) => {
                self.status = error;
                Task::none()
            }
        }
    }

    /// Start the next pending item of the active batch, or finish the
    /// batch when every record is terminal.
    fn advance(&mut self) -> Task<Message> {
        let Some(index) = self.session.active_jobs_mut().begin_next() else {
            let records = self.session.active_jobs().records();
            if !records.is_empty() {
                let successes = records
                    .iter()
                    .filter(|record| record.status == JobStatus::Success)
                    .count();
                self.status = format!(
                    "✅ Batch complete! {} of {} looks generated.",
                    successes,
                    records.len()
                );
            }
            return Task::none();
        };

        let Some(base) = self.session.base_image().cloned() else {
            // Unreachable when start_generation's preconditions held
            self.session
                .active_jobs_mut()
                .settle(index, Err("No base image available.".to_string()));
            return self.advance();
        };

        let Some(work) = self.session.work_at(index) else {
            return Task::none();
        };

        let client = Arc::clone(&self.client);
        Task::perform(run_work(client, base, work), move |outcome| {
            Message::JobSettled { index, outcome }
        })
    }

    /// Offer a successful record's image as a download via the save dialog.
    fn save_result(&mut self, job_id: &str) -> Task<Message> {
        let Some(record) = self.session.active_jobs().record(job_id) else {
            return Task::none();
        };
        let Some(image) = record.result.clone() else {
            return Task::none();
        };

        let file_name = export::artifact_file_name(&record.work, &image);
        let picked = FileDialog::new()
            .set_title("Save Look")
            .set_directory(export::default_download_dir())
            .set_file_name(&file_name)
            .save_file();

        match picked {
            Some(path) => Task::perform(export::save_image(path, image), Message::ResultSaved),
            None => Task::none(),
        }
    }

    /// Build the user interface
    pub fn view(&self) -> Element<Message> {
        let inputs: Element<Message> = match self.session.phase() {
            Phase::Outfit => self.outfit_inputs(),
            Phase::Accessory => self.accessory_inputs(),
        };

        let busy = self.session.is_busy();
        let board = self.session.active_jobs();

        let generate_label = if busy {
            board.progress_message()
        } else {
            match self.session.phase() {
                Phase::Outfit => "Generate Looks",
                Phase::Accessory => "Style Outfit",
            }
        };
        let generate_button = button(text(generate_label))
            .on_press_maybe((!busy).then_some(Message::Generate))
            .padding(10);

        let results = column![
            generate_button,
            scrollable(ui::gallery::gallery(
                board.records(),
                self.session.phase(),
                busy,
            ))
            .height(Length::Fill),
        ]
        .spacing(12);

        let content = row![
            container(scrollable(inputs)).width(Length::FillPortion(2)),
            container(results).width(Length::FillPortion(3)),
        ]
        .spacing(16)
        .height(Length::Fill);

        column![
            row![
                text("Virtual Try-On Studio").size(28),
                text(&self.status).size(14),
            ]
            .spacing(20)
            .align_y(Alignment::Center),
            content,
        ]
        .spacing(16)
        .padding(16)
        .into()
    }

    /// Set the application theme
    pub fn theme(&self) -> Theme {
        Theme::Light
    }

    fn outfit_inputs(&self) -> Element<Message> {
        let mode = self.session.mode;
        let mode_row = row![
            radio(
                "Tops + bottoms",
                OutfitMode::TopBottom,
                Some(mode),
                Message::SetMode
            ),
            radio(
                "Dresses",
                OutfitMode::FullBody,
                Some(mode),
                Message::SetMode
            ),
        ]
        .spacing(12);

        let mut inputs = column![
            ui::wardrobe::model_section(self.session.model_image.as_ref()),
            mode_row,
        ]
        .spacing(16);

        match mode {
            OutfitMode::TopBottom => {
                inputs = inputs
                    .push(ui::wardrobe::section(
                        "2. Tops",
                        Category::Top,
                        self.session.wardrobe.items(Category::Top),
                    ))
                    .push(ui::wardrobe::section(
                        "3. Bottoms",
                        Category::Bottom,
                        self.session.wardrobe.items(Category::Bottom),
                    ));
            }
            OutfitMode::FullBody => {
                inputs = inputs.push(ui::wardrobe::section(
                    "2. Dresses",
                    Category::Dress,
                    self.session.wardrobe.items(Category::Dress),
                ));
            }
        }

        inputs.into()
    }

    fn accessory_inputs(&self) -> Element<Message> {
        let busy = self.session.is_busy();

        let mut inputs = column![button(text("← Back to outfits"))
            .on_press_maybe((!busy).then_some(Message::BackToOutfits))
            .padding(8)]
        .spacing(16);

        if let Some(selected) = self.session.selected_outfit() {
            inputs = inputs.push(ui::wardrobe::styling_base(&selected.image));
        }

        for category in Category::ACCESSORIES {
            inputs = inputs.push(ui::wardrobe::section(
                section_title(category),
                category,
                self.session.wardrobe.items(category),
            ));
        }

        inputs.into()
    }
}

fn section_title(category: Category) -> &'static str {
    match category {
        Category::Shoes => "Shoes",
        Category::Sunglasses => "Sunglasses",
        Category::Hat => "Hats",
        Category::Necklace => "Necklaces",
        _ => "Wardrobe",
    }
}

/// Show the native image picker.
fn pick_image_file(title: &str) -> Option<PathBuf> {
    FileDialog::new()
        .set_title(title)
        .add_filter("Images", &upload::ACCEPTED_EXTENSIONS)
        .pick_file()
}

/// Load a picked file off the UI thread, flattening errors to display
/// text for the message boundary.
async fn load_upload(path: PathBuf) -> Result<UploadedImage, String> {
    upload::load_image(path).await.map_err(|e| e.to_string())
}

/// Execute one work item against the generation service.
async fn run_work(
    client: Arc<GeminiClient>,
    base: ImageBlob,
    work: WorkItem,
) -> Result<ImageBlob, String> {
    let result = match &work {
        WorkItem::TopBottom { top, bottom } => {
            client
                .generate_outfit(&base, &top.image, Some(&bottom.image))
                .await
        }
        WorkItem::Dress { dress } => client.generate_outfit(&base, &dress.image, None).await,
        WorkItem::Accessories { items } => {
            let images: Vec<ImageBlob> =
                items.iter().map(|item| item.image.clone()).collect();
            client.add_accessories(&base, &images).await
        }
    };

    result.map_err(|e| e.to_string())
}
