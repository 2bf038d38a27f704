/// Workflow session — the single explicit store for the try-on pipeline
///
/// Holds the model photo, the wardrobe, both job boards and the phase
/// flag, and exposes every user intent as a synchronous transition. The
/// iced layer only forwards intents here and drives the async service
/// calls; all the workflow rules live in this module so they can be tested
/// without a UI harness.

use super::combos::{self, InsufficientInput, OutfitMode, WorkItem};
use super::jobs::{JobBoard, JobStatus};
use super::wardrobe::{Category, ImageBlob, Wardrobe};

/// Which stage of the workflow is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Composing outfits from garments on the model photo
    Outfit,
    /// Styling a chosen outfit result with accessories
    Accessory,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Outfit
    }
}

/// The outfit result carried into the accessory phase as its base image.
#[derive(Debug, Clone)]
pub struct SelectedOutfit {
    pub job_id: String,
    pub image: ImageBlob,
}

/// A generation batch could not be started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    #[error(transparent)]
    Insufficient(#[from] InsufficientInput),

    #[error("Upload a model photo before generating")]
    MissingModel,

    #[error("A batch is already running")]
    Busy,
}

/// All mutable workflow state, owned by the application.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub model_image: Option<ImageBlob>,
    pub wardrobe: Wardrobe,
    pub mode: OutfitMode,
    phase: Phase,
    outfit_jobs: JobBoard,
    accessory_jobs: JobBoard,
    selected_outfit: Option<SelectedOutfit>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected_outfit(&self) -> Option<&SelectedOutfit> {
        self.selected_outfit.as_ref()
    }

    /// Job board for the active phase.
    pub fn active_jobs(&self) -> &JobBoard {
        match self.phase {
            Phase::Outfit => &self.outfit_jobs,
            Phase::Accessory => &self.accessory_jobs,
        }
    }

    pub fn active_jobs_mut(&mut self) -> &mut JobBoard {
        match self.phase {
            Phase::Outfit => &mut self.outfit_jobs,
            Phase::Accessory => &mut self.accessory_jobs,
        }
    }

    /// True while either board has an unfinished batch.
    pub fn is_busy(&self) -> bool {
        self.outfit_jobs.is_busy() || self.accessory_jobs.is_busy()
    }

    /// Base subject image for the active phase: the model photo while
    /// composing outfits, the selected outfit result while styling.
    pub fn base_image(&self) -> Option<&ImageBlob> {
        match self.phase {
            Phase::Outfit => self.model_image.as_ref(),
            Phase::Accessory => self.selected_outfit.as_ref().map(|s| &s.image),
        }
    }

    pub fn set_model_image(&mut self, image: ImageBlob) {
        self.model_image = Some(image);
    }

    pub fn clear_model_image(&mut self) {
        self.model_image = None;
    }

    pub fn add_item(&mut self, category: Category, image: ImageBlob, name: impl Into<String>) -> u64 {
        self.wardrobe.add_item(category, image, name)
    }

    pub fn remove_item(&mut self, category: Category, id: u64) {
        self.wardrobe.remove_item(category, id);
    }

    /// Validate the preconditions for the active phase and publish a fresh
    /// batch of pending records. The caller then drives the board with
    /// `begin_next` / `settle`.
    pub fn start_generation(&mut self) -> Result<(), StartError> {
        if self.is_busy() {
            return Err(StartError::Busy);
        }

        match self.phase {
            Phase::Outfit => {
                if self.model_image.is_none() {
                    return Err(StartError::MissingModel);
                }
                let works = combos::outfit_batch(&self.wardrobe, self.mode)?;
                self.outfit_jobs.start_batch(works);
            }
            Phase::Accessory => {
                let works = combos::accessory_batch(&self.wardrobe)?;
                self.accessory_jobs.start_batch(works);
            }
        }

        Ok(())
    }

    /// Select a successful outfit result and enter the accessory phase.
    ///
    /// Rejected (a no-op returning `false`) unless the record exists, is
    /// `Success` and carries a result image. On success the prior accessory
    /// records are cleared; the outfit records are left intact so the user
    /// can come back and pick a different one.
    pub fn select_outfit(&mut self, job_id: &str) -> bool {
        let Some(record) = self.outfit_jobs.record(job_id) else {
            return false;
        };
        if record.status != JobStatus::Success {
            return false;
        }
        let Some(image) = record.result.clone() else {
            return false;
        };

        tracing::info!(job_id, "outfit selected, entering accessory phase");

        self.selected_outfit = Some(SelectedOutfit {
            job_id: job_id.to_string(),
            image,
        });
        self.accessory_jobs.clear();
        self.phase = Phase::Accessory;
        true
    }

    /// Unconditional "back" to the outfit phase. Accessory items and
    /// records are retained so returning later resumes where the user
    /// left off.
    pub fn back_to_outfits(&mut self) {
        self.phase = Phase::Outfit;
    }

    /// Work item for a record index on the active board, cloned for the
    /// async service call.
    pub fn work_at(&self, index: usize) -> Option<WorkItem> {
        self.active_jobs()
            .records()
            .get(index)
            .map(|record| record.work.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(tag: u8) -> ImageBlob {
        ImageBlob::new(vec![tag], "image/png")
    }

    fn session_with_model() -> Session {
        let mut session = Session::new();
        session.set_model_image(blob(0));
        session
    }

    fn finish_outfit_batch(session: &mut Session, fail_index: Option<usize>) {
        while let Some(index) = session.active_jobs_mut().begin_next() {
            let outcome = if fail_index == Some(index) {
                Err("service error".to_string())
            } else {
                Ok(blob(0xEE))
            };
            session.active_jobs_mut().settle(index, outcome);
        }
    }

    #[test]
    fn test_initial_state_is_outfit_phase_without_selection() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Outfit);
        assert!(session.selected_outfit().is_none());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_start_requires_model_photo() {
        let mut session = Session::new();
        session.add_item(Category::Top, blob(1), "tee");
        session.add_item(Category::Bottom, blob(2), "jeans");

        assert_eq!(session.start_generation(), Err(StartError::MissingModel));
        assert!(session.active_jobs().records().is_empty());
    }

    #[test]
    fn test_start_without_dresses_creates_no_records() {
        let mut session = session_with_model();
        session.mode = OutfitMode::FullBody;

        assert_eq!(
            session.start_generation(),
            Err(StartError::Insufficient(InsufficientInput::NoDresses))
        );
        assert!(session.active_jobs().records().is_empty());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_start_while_running_is_rejected() {
        let mut session = session_with_model();
        session.add_item(Category::Top, blob(1), "tee");
        session.add_item(Category::Bottom, blob(2), "jeans");

        session.start_generation().unwrap();
        assert_eq!(session.start_generation(), Err(StartError::Busy));
    }

    #[test]
    fn test_base_image_follows_phase() {
        let mut session = session_with_model();
        session.add_item(Category::Top, blob(1), "tee");
        session.add_item(Category::Bottom, blob(2), "jeans");
        session.start_generation().unwrap();
        finish_outfit_batch(&mut session, None);

        assert_eq!(session.base_image(), session.model_image.as_ref());

        let job_id = session.active_jobs().records()[0].id.clone();
        assert!(session.select_outfit(&job_id));

        let selected = session.selected_outfit().unwrap();
        assert_eq!(session.base_image(), Some(&selected.image));
    }

    #[test]
    fn test_select_outfit_requires_success() {
        let mut session = session_with_model();
        session.add_item(Category::Top, blob(1), "tee");
        session.add_item(Category::Bottom, blob(2), "jeans");
        session.start_generation().unwrap();
        // Fail the only record
        finish_outfit_batch(&mut session, Some(0));

        let job_id = session.active_jobs().records()[0].id.clone();
        assert!(!session.select_outfit(&job_id));
        assert_eq!(session.phase(), Phase::Outfit);
        assert!(session.selected_outfit().is_none());
    }

    #[test]
    fn test_select_unknown_record_is_a_noop() {
        let mut session = session_with_model();
        assert!(!session.select_outfit("nope-0"));
        assert_eq!(session.phase(), Phase::Outfit);
    }

    #[test]
    fn test_selecting_outfit_clears_accessory_records_only() {
        let mut session = session_with_model();
        session.add_item(Category::Top, blob(1), "tee");
        session.add_item(Category::Bottom, blob(2), "jeans");
        session.add_item(Category::Hat, blob(3), "cap");

        session.start_generation().unwrap();
        finish_outfit_batch(&mut session, None);
        let job_id = session.active_jobs().records()[0].id.clone();
        assert!(session.select_outfit(&job_id));
        assert_eq!(session.phase(), Phase::Accessory);

        // Run an accessory batch, then go back and re-select
        session.start_generation().unwrap();
        finish_outfit_batch(&mut session, None);
        assert_eq!(session.active_jobs().records().len(), 1);

        session.back_to_outfits();
        assert_eq!(session.phase(), Phase::Outfit);
        // Outfit records survived the round trip
        assert!(!session.active_jobs().records().is_empty());

        assert!(session.select_outfit(&job_id));
        // Forward transition wiped the stale accessory results
        assert!(session.active_jobs().records().is_empty());
        // But the accessory wardrobe items are retained
        assert_eq!(session.wardrobe.items(Category::Hat).len(), 1);
    }

    #[test]
    fn test_back_retains_accessory_state() {
        let mut session = session_with_model();
        session.add_item(Category::Top, blob(1), "tee");
        session.add_item(Category::Bottom, blob(2), "jeans");
        session.add_item(Category::Shoes, blob(3), "boots");

        session.start_generation().unwrap();
        finish_outfit_batch(&mut session, None);
        let job_id = session.active_jobs().records()[0].id.clone();
        session.select_outfit(&job_id);

        session.start_generation().unwrap();
        finish_outfit_batch(&mut session, None);

        session.back_to_outfits();
        assert_eq!(session.phase(), Phase::Outfit);

        // Returning without re-selecting resumes the accessory state
        session.phase = Phase::Accessory;
        assert_eq!(session.active_jobs().records().len(), 1);
    }
}
