use crate::client::{format_error, load_image, AnalysisBackend};
use crate::config::FarmDefaults;
use crate::error::{CropwiseError, Result};
use crate::models::{AnalysisResult, FarmSubmission, ImageUpload, Season};
use crate::notifications::Notifications;
use crate::render::report;
use crate::render::ResultsView;
use chrono::Local;
use std::path::{Path, PathBuf};
use url::Url;

pub const MSG_IMAGE_UPLOADED: &str = "Image uploaded successfully!";
pub const MSG_UPLOAD_FIRST: &str = "Please upload a soil image";
pub const MSG_FILL_REQUIRED: &str = "Please fill all required fields";
pub const MSG_NO_RESULTS: &str = "No results to download";
pub const MSG_READY: &str = "Ready for new analysis";
pub const MSG_BACKEND_DOWN: &str = "Warning: Backend server not connected";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Upload,
    Details,
    Loading,
    Results,
}

impl WizardStep {
    /// Position in the step indicator; `Loading` sits between 2 and 3 and has none.
    pub fn number(&self) -> Option<u8> {
        match self {
            WizardStep::Upload => Some(1),
            WizardStep::Details => Some(2),
            WizardStep::Results => Some(3),
            WizardStep::Loading => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Upload => "Upload Soil Image",
            WizardStep::Details => "Farm Details",
            WizardStep::Loading => "Analyzing",
            WizardStep::Results => "Recommendations",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Location,
    Season,
    Temperature,
    Rainfall,
    Humidity,
    PreviousCrop,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Location,
            FormField::Season,
            FormField::Temperature,
            FormField::Rainfall,
            FormField::Humidity,
            FormField::PreviousCrop,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Location => "Location",
            FormField::Season => "Season",
            FormField::Temperature => "Temperature (°C)",
            FormField::Rainfall => "Rainfall (mm)",
            FormField::Humidity => "Humidity (%)",
            FormField::PreviousCrop => "Previous Crop (optional)",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, FormField::PreviousCrop)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FormField::Temperature | FormField::Rainfall | FormField::Humidity
        )
    }

    pub fn next(&self) -> Self {
        match self {
            FormField::Location => FormField::Season,
            FormField::Season => FormField::Temperature,
            FormField::Temperature => FormField::Rainfall,
            FormField::Rainfall => FormField::Humidity,
            FormField::Humidity => FormField::PreviousCrop,
            FormField::PreviousCrop => FormField::Location,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Location => FormField::PreviousCrop,
            FormField::Season => FormField::Location,
            FormField::Temperature => FormField::Season,
            FormField::Rainfall => FormField::Temperature,
            FormField::Humidity => FormField::Rainfall,
            FormField::PreviousCrop => FormField::Humidity,
        }
    }
}

/// Raw, user-editable farm details. Numbers stay text until submission.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmForm {
    pub location: String,
    pub season: Option<Season>,
    pub temperature: String,
    pub rainfall: String,
    pub humidity: String,
    pub previous_crop: String,
    pub focused: FormField,
}

impl FarmForm {
    pub fn from_defaults(defaults: &FarmDefaults) -> Self {
        let number = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            location: defaults.location.clone().unwrap_or_default(),
            season: defaults.season(),
            temperature: number(defaults.temperature),
            rainfall: number(defaults.rainfall),
            humidity: number(defaults.humidity),
            previous_crop: String::new(),
            focused: FormField::Location,
        }
    }

    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Location => self.location.clone(),
            FormField::Season => self
                .season
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            FormField::Temperature => self.temperature.clone(),
            FormField::Rainfall => self.rainfall.clone(),
            FormField::Humidity => self.humidity.clone(),
            FormField::PreviousCrop => self.previous_crop.clone(),
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Location => Some(&mut self.location),
            FormField::Season => None,
            FormField::Temperature => Some(&mut self.temperature),
            FormField::Rainfall => Some(&mut self.rainfall),
            FormField::Humidity => Some(&mut self.humidity),
            FormField::PreviousCrop => Some(&mut self.previous_crop),
        }
    }

    pub fn set(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Season => self.season = Season::from_str(value),
            _ => {
                if let Some(text) = self.text_mut(field) {
                    *text = value.to_string();
                }
            }
        }
    }

    /// Type into the focused field. Numeric fields only accept number characters.
    pub fn input_char(&mut self, c: char) {
        let field = self.focused;
        if field.is_numeric() && !(c.is_ascii_digit() || c == '.' || c == '-') {
            return;
        }
        if let Some(text) = self.text_mut(field) {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focused;
        match self.text_mut(field) {
            Some(text) => {
                text.pop();
            }
            None => self.season = None,
        }
    }

    pub fn cycle_season(&mut self, forward: bool) {
        self.season = Some(match (self.season, forward) {
            (None, true) => Season::Kharif,
            (None, false) => Season::Summer,
            (Some(s), true) => s.next(),
            (Some(s), false) => s.prev(),
        });
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Every required field has a value.
    pub fn is_complete(&self) -> bool {
        !self.location.trim().is_empty()
            && self.season.is_some()
            && !self.temperature.trim().is_empty()
            && !self.rainfall.trim().is_empty()
            && !self.humidity.trim().is_empty()
    }

    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::all()
            .iter()
            .copied()
            .filter(|f| f.is_required() && self.value(*f).trim().is_empty())
            .collect()
    }

    /// Build an immutable submission from the form and an accepted image.
    pub fn to_submission(&self, image: ImageUpload) -> Result<FarmSubmission> {
        if !self.is_complete() {
            return Err(CropwiseError::Validation(MSG_FILL_REQUIRED.into()));
        }
        let season = self
            .season
            .ok_or_else(|| CropwiseError::Validation(MSG_FILL_REQUIRED.into()))?;

        let previous = self.previous_crop.trim();

        Ok(FarmSubmission {
            image,
            location: self.location.trim().to_string(),
            season,
            temperature: parse_number(FormField::Temperature, &self.temperature)?,
            rainfall: parse_number(FormField::Rainfall, &self.rainfall)?,
            humidity: parse_number(FormField::Humidity, &self.humidity)?,
            previous_crop: (!previous.is_empty()).then(|| previous.to_string()),
        })
    }
}

fn parse_number(field: FormField, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| {
            CropwiseError::Validation(format!("{} must be a number", field.label()))
        })
}

/// Turn pasted or dropped text into a filesystem path.
/// Terminals quote paths with spaces or backslash-escape them; file managers send `file://` URIs.
pub fn normalize_dropped_path(raw: &str) -> PathBuf {
    let mut s = raw.trim();
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            s = &s[1..s.len() - 1];
        }
    }
    if s.starts_with("file:") {
        if let Some(path) = Url::parse(s).ok().and_then(|u| u.to_file_path().ok()) {
            return path;
        }
    }
    PathBuf::from(s.replace("\\ ", " "))
}

/// Owns all wizard state and performs every step transition.
pub struct Wizard {
    step: WizardStep,
    image: Option<ImageUpload>,
    result: Option<AnalysisResult>,
    pending_submission: Option<FarmSubmission>,
    pending_image: Option<PathBuf>,
    defaults: FarmDefaults,
    pub form: FarmForm,
    pub path_input: String,
    pub notifications: Notifications,
}

impl Wizard {
    pub fn new(defaults: FarmDefaults, notifications: Notifications) -> Self {
        Self {
            step: WizardStep::Upload,
            image: None,
            result: None,
            pending_submission: None,
            pending_image: None,
            form: FarmForm::from_defaults(&defaults),
            defaults,
            path_input: String::new(),
            notifications,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    pub fn results_view(&self) -> Option<ResultsView> {
        self.result.as_ref().map(ResultsView::from_result)
    }

    /// Next is enabled on the upload step.
    pub fn can_advance(&self) -> bool {
        self.image.is_some()
    }

    pub async fn check_health<B: AnalysisBackend>(&mut self, backend: &B) {
        let health = backend.check_health().await;
        if !health.is_healthy() {
            self.notifications.warning(MSG_BACKEND_DOWN);
        }
    }

    // --- Step 1: upload ---

    /// Queue a path for loading; the event loop picks it up via [`Wizard::take_pending_image`].
    pub fn queue_image(&mut self, raw: &str) {
        if self.step != WizardStep::Upload {
            return;
        }
        let path = normalize_dropped_path(raw);
        if path.as_os_str().is_empty() {
            return;
        }
        self.path_input = path.display().to_string();
        self.pending_image = Some(path);
    }

    pub fn take_pending_image(&mut self) -> Option<PathBuf> {
        self.pending_image.take()
    }

    pub fn submit_path_input(&mut self) {
        let raw = self.path_input.clone();
        self.queue_image(&raw);
    }

    pub async fn select_image(&mut self, path: &Path) {
        if self.step != WizardStep::Upload {
            return;
        }
        let outcome = load_image(path).await;
        self.accept_image(outcome);
    }

    pub fn accept_image(&mut self, outcome: Result<ImageUpload>) {
        match outcome {
            Ok(image) => {
                tracing::info!("Accepted image {:?}", image);
                self.image = Some(image);
                self.path_input.clear();
                self.notifications.success(MSG_IMAGE_UPLOADED);
            }
            Err(e) => {
                tracing::debug!("Rejected image: {}", e);
                self.notifications.error(format_error(&e));
            }
        }
    }

    pub fn remove_image(&mut self) {
        if self.step != WizardStep::Upload {
            return;
        }
        self.image = None;
        self.path_input.clear();
    }

    pub fn go_to_details(&mut self) -> bool {
        if self.step != WizardStep::Upload {
            return false;
        }
        if !self.can_advance() {
            self.notifications.warning(MSG_UPLOAD_FIRST);
            return false;
        }
        self.step = WizardStep::Details;
        true
    }

    // --- Step 2: details ---

    pub fn back_to_upload(&mut self) {
        if self.step == WizardStep::Details {
            self.step = WizardStep::Upload;
        }
    }

    /// Validate and enter `Loading`. Returns false (with a notification) when blocked.
    pub fn begin_submission(&mut self) -> bool {
        if self.step != WizardStep::Details {
            return false;
        }
        if !self.form.is_complete() {
            self.notifications.error(MSG_FILL_REQUIRED);
            return false;
        }
        let Some(image) = self.image.clone() else {
            self.notifications.error(MSG_UPLOAD_FIRST);
            return false;
        };

        match self.form.to_submission(image) {
            Ok(submission) => {
                self.pending_submission = Some(submission);
                self.step = WizardStep::Loading;
                true
            }
            Err(e) => {
                self.notifications.error(format_error(&e));
                false
            }
        }
    }

    /// Hand the queued submission to the event loop, which drives the request itself.
    pub fn take_pending_submission(&mut self) -> Option<FarmSubmission> {
        self.pending_submission.take()
    }

    pub fn complete_submission(&mut self, outcome: Result<AnalysisResult>) {
        if self.step != WizardStep::Loading {
            tracing::warn!("Ignoring analysis outcome outside of loading step");
            return;
        }
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.step = WizardStep::Results;
            }
            Err(e) => {
                tracing::error!("Analysis failed: {}", e);
                self.notifications.error(format_error(&e));
                self.step = WizardStep::Details;
            }
        }
    }

    // --- Step 3: results ---

    pub fn reset(&mut self) {
        self.image = None;
        self.result = None;
        self.pending_submission = None;
        self.pending_image = None;
        self.path_input.clear();
        self.form = FarmForm::from_defaults(&self.defaults);
        self.step = WizardStep::Upload;
        self.notifications.info(MSG_READY);
    }

    /// Write the printable report for the current result. No step change.
    pub fn download_report(&mut self, dir: &Path) -> Option<PathBuf> {
        let Some(view) = self.results_view() else {
            self.notifications.error(MSG_NO_RESULTS);
            return None;
        };

        match report::write_report(dir, &view, Local::now()) {
            Ok(path) => {
                self.notifications
                    .success(format!("Report ready: {}", path.display()));
                Some(path)
            }
            Err(e) => {
                tracing::error!("Failed to write report: {}", e);
                self.notifications.error(format_error(&e));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropRecommendation, HealthStatus};
    use crate::notifications::NotificationLevel;
    use crate::render::view_model::fixtures::sample_result;
    use std::cell::RefCell;
    use std::time::Duration;

    /// Backend that replays a scripted outcome and records what it was sent.
    struct ScriptedBackend {
        outcome: RefCell<Option<Result<AnalysisResult>>>,
        healthy: bool,
        sent: RefCell<Vec<FarmSubmission>>,
    }

    impl ScriptedBackend {
        fn ok(result: AnalysisResult) -> Self {
            Self {
                outcome: RefCell::new(Some(Ok(result))),
                healthy: true,
                sent: RefCell::new(Vec::new()),
            }
        }

        fn failing(err: CropwiseError) -> Self {
            Self {
                outcome: RefCell::new(Some(Err(err))),
                healthy: false,
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl AnalysisBackend for ScriptedBackend {
        async fn check_health(&self) -> HealthStatus {
            if self.healthy {
                HealthStatus {
                    status: "healthy".into(),
                    message: None,
                    version: None,
                }
            } else {
                HealthStatus::error("connection refused")
            }
        }

        async fn submit_analysis(&self, submission: &FarmSubmission) -> Result<AnalysisResult> {
            self.sent.borrow_mut().push(submission.clone());
            self.outcome
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(CropwiseError::Network("no scripted outcome".into())))
        }
    }

    fn wizard() -> Wizard {
        Wizard::new(FarmDefaults::default(), Notifications::new(Duration::from_secs(3)))
    }

    fn jpeg(size: usize) -> ImageUpload {
        ImageUpload {
            file_name: "field.jpg".into(),
            mime_type: "image/jpeg".into(),
            bytes: vec![0xFF; size],
        }
    }

    fn fill_pune_form(w: &mut Wizard) {
        w.form.set(FormField::Location, "Pune");
        w.form.set(FormField::Season, "Kharif");
        w.form.set(FormField::Temperature, "28");
        w.form.set(FormField::Rainfall, "120");
        w.form.set(FormField::Humidity, "65");
    }

    fn one_crop_result() -> AnalysisResult {
        let mut result = sample_result();
        result.recommended_crops = vec![CropRecommendation {
            name: "Rice".into(),
            suitability: 98.0,
            expected_yield: "4.8 tons/ha".into(),
            duration: "120-150 days".into(),
            profit: "High".into(),
        }];
        result
    }

    /// Validate, send and apply one submission the way the event loop does.
    async fn submit(w: &mut Wizard, backend: &ScriptedBackend) -> bool {
        if !w.begin_submission() {
            return false;
        }
        send_pending(w, backend).await;
        w.step() == WizardStep::Results
    }

    async fn send_pending(w: &mut Wizard, backend: &ScriptedBackend) {
        if let Some(submission) = w.take_pending_submission() {
            let outcome = backend.submit_analysis(&submission).await;
            w.complete_submission(outcome);
        }
    }

    fn at_details() -> Wizard {
        let mut w = wizard();
        w.accept_image(Ok(jpeg(2 * 1024 * 1024)));
        assert!(w.go_to_details());
        w
    }

    #[test]
    fn starts_on_upload_without_state() {
        let w = wizard();
        assert_eq!(w.step(), WizardStep::Upload);
        assert!(w.image().is_none());
        assert!(w.results_view().is_none());
        assert!(!w.can_advance());
    }

    #[test]
    fn cannot_advance_without_image() {
        let mut w = wizard();
        assert!(!w.go_to_details());
        assert_eq!(w.step(), WizardStep::Upload);
        assert_eq!(w.notifications.latest().unwrap().message, MSG_UPLOAD_FIRST);
    }

    #[test]
    fn rejected_image_stays_on_upload() {
        let mut w = wizard();
        w.accept_image(Err(CropwiseError::Validation(
            "File too large. Maximum size is 16MB".into(),
        )));
        assert_eq!(w.step(), WizardStep::Upload);
        assert!(!w.can_advance());
        let note = w.notifications.latest().unwrap();
        assert_eq!(note.level, NotificationLevel::Error);
        assert_eq!(note.message, "File too large. Maximum size is 16MB");
    }

    #[test]
    fn accepted_image_enables_next() {
        let mut w = wizard();
        w.accept_image(Ok(jpeg(1024)));
        assert!(w.can_advance());
        assert_eq!(w.notifications.latest().unwrap().message, MSG_IMAGE_UPLOADED);

        w.remove_image();
        assert!(!w.can_advance());
    }

    #[tokio::test]
    async fn select_image_validates_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("plot.png");
        std::fs::write(&good, [0x89, b'P', b'N', b'G']).unwrap();
        let bad = dir.path().join("plot.tiff");
        std::fs::write(&bad, [0u8; 4]).unwrap();

        let mut w = wizard();
        w.select_image(&bad).await;
        assert!(w.image().is_none());

        w.select_image(&good).await;
        assert_eq!(w.image().unwrap().file_name, "plot.png");
    }

    #[test]
    fn back_is_unconditional() {
        let mut w = at_details();
        w.back_to_upload();
        assert_eq!(w.step(), WizardStep::Upload);
        assert!(w.image().is_some());
    }

    #[tokio::test]
    async fn incomplete_form_blocks_submission() {
        let mut w = at_details();
        w.form.set(FormField::Location, "   ");
        let backend = ScriptedBackend::ok(one_crop_result());

        assert!(!submit(&mut w, &backend).await);
        assert_eq!(w.step(), WizardStep::Details);
        assert!(backend.sent.borrow().is_empty());
        assert_eq!(w.notifications.latest().unwrap().message, MSG_FILL_REQUIRED);
    }

    #[tokio::test]
    async fn non_numeric_field_blocks_submission() {
        let mut w = at_details();
        fill_pune_form(&mut w);
        w.form.set(FormField::Rainfall, "lots");
        let backend = ScriptedBackend::ok(one_crop_result());

        assert!(!submit(&mut w, &backend).await);
        assert_eq!(w.step(), WizardStep::Details);
        assert_eq!(
            w.notifications.latest().unwrap().message,
            "Rainfall (mm) must be a number"
        );
    }

    #[tokio::test]
    async fn successful_submission_reaches_results() {
        let mut w = at_details();
        fill_pune_form(&mut w);
        let backend = ScriptedBackend::ok(one_crop_result());

        assert!(w.begin_submission());
        assert_eq!(w.step(), WizardStep::Loading);

        send_pending(&mut w, &backend).await;
        assert_eq!(w.step(), WizardStep::Results);
        assert_eq!(w.results_view().unwrap().crops.len(), 1);
        assert!(w.take_pending_submission().is_none());

        let sent = backend.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].location, "Pune");
        assert_eq!(sent[0].season, Season::Kharif);
        assert_eq!(sent[0].temperature, 28.0);
        assert_eq!(sent[0].rainfall, 120.0);
        assert_eq!(sent[0].humidity, 65.0);
        assert_eq!(sent[0].previous_crop, None);
        assert_eq!(sent[0].image.size(), 2 * 1024 * 1024);
    }

    #[tokio::test]
    async fn server_failure_returns_to_details() {
        let mut w = at_details();
        fill_pune_form(&mut w);
        let backend =
            ScriptedBackend::failing(CropwiseError::AnalysisFailed("model unavailable".into()));

        assert!(!submit(&mut w, &backend).await);
        assert_eq!(w.step(), WizardStep::Details);
        assert!(w.results_view().is_none());
        let note = w.notifications.latest().unwrap();
        assert_eq!(note.message, "model unavailable");
        assert_eq!(note.level, NotificationLevel::Error);
    }

    #[test]
    fn results_unreachable_without_success() {
        let mut w = wizard();
        w.complete_submission(Ok(one_crop_result()));
        assert_eq!(w.step(), WizardStep::Upload);
        assert!(w.results_view().is_none());

        let mut w = at_details();
        w.complete_submission(Ok(one_crop_result()));
        assert_eq!(w.step(), WizardStep::Details);
        assert!(w.results_view().is_none());
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let mut w = at_details();
        fill_pune_form(&mut w);
        w.form.set(FormField::PreviousCrop, "Wheat");
        assert!(submit(&mut w, &ScriptedBackend::ok(one_crop_result())).await);

        w.reset();
        assert_eq!(w.step(), WizardStep::Upload);
        assert!(w.image().is_none());
        assert!(w.results_view().is_none());
        assert!(!w.can_advance());
        assert!(w.form.location.is_empty());
        assert!(w.form.previous_crop.is_empty());
        assert_eq!(w.notifications.latest().unwrap().message, MSG_READY);
    }

    #[test]
    fn reset_restores_configured_defaults() {
        let defaults = FarmDefaults {
            location: Some("Coimbatore, Tamil Nadu".into()),
            season: Some("rabi".into()),
            temperature: Some(24.5),
            ..FarmDefaults::default()
        };
        let mut w = Wizard::new(defaults, Notifications::default());
        w.form.set(FormField::Location, "Elsewhere");
        w.reset();
        assert_eq!(w.form.location, "Coimbatore, Tamil Nadu");
        assert_eq!(w.form.season, Some(Season::Rabi));
        assert_eq!(w.form.temperature, "24.5");
        assert!(w.form.rainfall.is_empty());
    }

    #[test]
    fn report_requires_result() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = wizard();
        assert!(w.download_report(dir.path()).is_none());
        assert_eq!(w.step(), WizardStep::Upload);
        assert_eq!(w.notifications.latest().unwrap().message, MSG_NO_RESULTS);
    }

    #[tokio::test]
    async fn report_written_without_step_change() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = at_details();
        fill_pune_form(&mut w);
        assert!(submit(&mut w, &ScriptedBackend::ok(one_crop_result())).await);

        let path = w.download_report(dir.path()).unwrap();
        assert!(path.exists());
        assert_eq!(w.step(), WizardStep::Results);
        assert_eq!(
            w.notifications.latest().unwrap().level,
            NotificationLevel::Success
        );
    }

    #[tokio::test]
    async fn unhealthy_backend_warns() {
        let mut w = wizard();
        w.check_health(&ScriptedBackend::failing(CropwiseError::Network("x".into())))
            .await;
        assert_eq!(w.notifications.latest().unwrap().message, MSG_BACKEND_DOWN);

        let mut w = wizard();
        w.check_health(&ScriptedBackend::ok(one_crop_result())).await;
        assert!(w.notifications.is_empty());
    }

    #[test]
    fn form_editing() {
        let mut form = FarmForm::from_defaults(&FarmDefaults::default());
        for c in "Pune".chars() {
            form.input_char(c);
        }
        form.focus_next();
        assert_eq!(form.focused, FormField::Season);
        form.input_char('x');
        form.cycle_season(true);
        assert_eq!(form.season, Some(Season::Kharif));
        form.cycle_season(false);
        assert_eq!(form.season, Some(Season::Summer));

        form.focus_next();
        for c in "2a8".chars() {
            form.input_char(c);
        }
        assert_eq!(form.temperature, "28");
        form.backspace();
        assert_eq!(form.temperature, "2");

        form.focus_prev();
        form.focus_prev();
        assert_eq!(form.location, "Pune");
        assert_eq!(form.focused, FormField::Location);
    }

    #[test]
    fn missing_fields_listed_in_order() {
        let mut form = FarmForm::from_defaults(&FarmDefaults::default());
        form.set(FormField::Location, "Pune");
        form.set(FormField::Rainfall, "800");
        assert_eq!(
            form.missing_fields(),
            vec![FormField::Season, FormField::Temperature, FormField::Humidity]
        );
    }

    #[test]
    fn dropped_paths_are_normalized() {
        assert_eq!(
            normalize_dropped_path("  '/home/me/soil sample.jpg'\n"),
            PathBuf::from("/home/me/soil sample.jpg")
        );
        assert_eq!(
            normalize_dropped_path("/home/me/soil\\ sample.jpg"),
            PathBuf::from("/home/me/soil sample.jpg")
        );
        assert_eq!(
            normalize_dropped_path("file:///tmp/plot.png"),
            PathBuf::from("/tmp/plot.png")
        );
        assert_eq!(
            normalize_dropped_path("file:///tmp/soil%20sample.jpg"),
            PathBuf::from("/tmp/soil sample.jpg")
        );
        assert_eq!(
            normalize_dropped_path("file://localhost/tmp/plot.png"),
            PathBuf::from("/tmp/plot.png")
        );
        assert_eq!(normalize_dropped_path("\"\""), PathBuf::from(""));
    }

    #[tokio::test]
    async fn dropped_file_uri_with_spaces_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soil sample.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();
        let uri = Url::from_file_path(&path).unwrap().to_string();
        assert!(uri.contains("soil%20sample.jpg"));

        let mut w = wizard();
        w.queue_image(&uri);
        let queued = w.take_pending_image().unwrap();
        assert_eq!(queued, path);
        w.select_image(&queued).await;

        assert_eq!(w.image().unwrap().file_name, "soil sample.jpg");
        assert_eq!(w.notifications.latest().unwrap().message, MSG_IMAGE_UPLOADED);
    }

    #[test]
    fn queued_image_only_on_upload_step() {
        let mut w = wizard();
        w.queue_image("'/tmp/plot.png'");
        assert_eq!(w.take_pending_image(), Some(PathBuf::from("/tmp/plot.png")));
        assert_eq!(w.path_input, "/tmp/plot.png");
        assert!(w.take_pending_image().is_none());

        let mut w = at_details();
        w.queue_image("/tmp/plot.png");
        assert!(w.take_pending_image().is_none());
    }

    #[test]
    fn step_numbers() {
        assert_eq!(WizardStep::Upload.number(), Some(1));
        assert_eq!(WizardStep::Details.number(), Some(2));
        assert_eq!(WizardStep::Results.number(), Some(3));
        assert_eq!(WizardStep::Loading.number(), None);
    }
}
