//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use restobrowse_core::{
    ApiError, DetailController, DetailTicket, ImageUpload, ListController, PerPage, RequestTicket,
    RestaurantId, Route,
};

use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    NotFound,
    Http,
    Data,
    Input,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::NotFound => "404",
            ErrorCategory::Http => "HTTP",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Other => "ERR",
        }
    }
}

impl From<&ApiError> for ErrorCategory {
    fn from(e: &ApiError) -> Self {
        match e.category() {
            "network" => ErrorCategory::Network,
            "not_found" => ErrorCategory::NotFound,
            "http" => ErrorCategory::Http,
            "data" => ErrorCategory::Data,
            "io" => ErrorCategory::Input,
            _ => ErrorCategory::Other,
        }
    }
}

/// Text fields edited through the input overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    SearchName,
    AddCuisine,
    RemoveCuisine,
    CountryCode,
    AverageSpent,
    Latitude,
    Longitude,
    Range,
    ImagePath,
}

impl InputField {
    pub fn prompt(self) -> &'static str {
        match self {
            InputField::SearchName => "Restaurant name",
            InputField::AddCuisine => "Add cuisine",
            InputField::RemoveCuisine => "Remove cuisine",
            InputField::CountryCode => "Country code",
            InputField::AverageSpent => "Average cost for two",
            InputField::Latitude => "Latitude",
            InputField::Longitude => "Longitude",
            InputField::Range => "Range (km)",
            InputField::ImagePath => "Image file path",
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
    Input(InputField),
}

/// List screen: the controller plus the row cursor.
#[derive(Debug)]
pub struct ListScreen {
    pub controller: ListController,
    pub cursor: usize,
}

impl ListScreen {
    pub fn selected_id(&self) -> Option<RestaurantId> {
        self.controller
            .results()
            .items
            .get(self.cursor)
            .map(|r| r.id)
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.controller.results().items.len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

#[derive(Debug)]
pub enum Screen {
    List(ListScreen),
    Detail(DetailController),
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub screen: Screen,
    pub default_per_page: PerPage,

    /// Bumped on every screen mount. Responses carry the epoch they were
    /// issued under and are dropped when it no longer matches.
    pub epoch: u64,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub input: String,
    pub api_url: String,
}

impl AppState {
    /// Build the state with an unmounted list screen. Call `navigate`
    /// with the initial route to issue the first request.
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        default_per_page: PerPage,
        api_url: String,
    ) -> Self {
        Self {
            running: true,
            screen: Screen::List(ListScreen {
                controller: ListController::new(None, default_per_page),
                cursor: 0,
            }),
            default_per_page,
            epoch: 0,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            input: String::new(),
            api_url,
        }
    }

    // ── Navigation ─────────────────────────────────────────────────────

    /// Mount the screen for `route` and issue its first request.
    pub fn navigate(&mut self, route: Route) {
        self.epoch += 1;
        match route {
            Route::List { context } => {
                let mut controller = ListController::new(context.as_ref(), self.default_per_page);
                let ticket = controller.mount();
                self.screen = Screen::List(ListScreen {
                    controller,
                    cursor: 0,
                });
                self.dispatch(Some(ticket));
            }
            Route::Detail { id, context } => {
                let (controller, ticket) = DetailController::mount(id, context);
                self.screen = Screen::Detail(controller);
                self.dispatch_detail(ticket);
            }
        }
    }

    /// Open the record under the list cursor, carrying the list context.
    pub fn open_selected(&mut self) {
        let target = match &self.screen {
            Screen::List(list) => list
                .selected_id()
                .map(|id| (id, list.controller.context())),
            Screen::Detail(_) => None,
        };
        if let Some((id, context)) = target {
            self.navigate(Route::open_detail(id, context));
        }
    }

    /// Leave the detail screen. The list is rebuilt from the carried context.
    pub fn back_to_list(&mut self) {
        let placeholder = Screen::List(ListScreen {
            controller: ListController::new(None, self.default_per_page),
            cursor: 0,
        });
        match std::mem::replace(&mut self.screen, placeholder) {
            Screen::Detail(detail) => self.navigate(detail.back()),
            list @ Screen::List(_) => self.screen = list,
        }
    }

    pub fn list_mut(&mut self) -> Option<&mut ListScreen> {
        match &mut self.screen {
            Screen::List(list) => Some(list),
            Screen::Detail(_) => None,
        }
    }

    // ── Worker dispatch ────────────────────────────────────────────────

    /// Send a list ticket to the worker. `None` means the action was a no-op.
    pub fn dispatch(&mut self, ticket: Option<RequestTicket>) {
        let Some(RequestTicket { token, mode }) = ticket else {
            return;
        };
        tracing::debug!(epoch = self.epoch, %token, kind = mode.kind().label(), "dispatching");
        let cmd = WorkerCommand::Execute {
            epoch: self.epoch,
            token,
            mode,
        };
        if self.worker_tx.send(cmd).is_err() {
            self.push_error(
                ErrorCategory::Other,
                "worker thread is gone".into(),
                String::new(),
            );
        }
    }

    pub fn dispatch_detail(&mut self, ticket: DetailTicket) {
        let cmd = WorkerCommand::FetchDetail {
            epoch: self.epoch,
            token: ticket.token,
            id: ticket.id,
        };
        if self.worker_tx.send(cmd).is_err() {
            self.push_error(
                ErrorCategory::Other,
                "worker thread is gone".into(),
                String::new(),
            );
        }
    }

    /// Route a worker response to the mounted screen.
    pub fn handle_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::List {
                epoch,
                token,
                outcome,
            } => {
                if epoch != self.epoch {
                    tracing::debug!(epoch, %token, "dropping response for unmounted list");
                    return;
                }
                let Screen::List(list) = &mut self.screen else {
                    return;
                };
                let mut applied_failure = None;
                let follow_up = match outcome {
                    Err(err) => {
                        if list.controller.apply_failure(token, err.clone()) {
                            applied_failure = Some(err);
                        }
                        None
                    }
                    ok => list.controller.apply(token, ok),
                };
                list.clamp_cursor();
                let dish = list.controller.dish_info().cloned();

                if let Some(err) = applied_failure {
                    self.push_api_error(&err, "list request");
                } else if let Some(ticket) = follow_up {
                    if let Some(dish) = dish {
                        self.set_status(format!(
                            "Looks like {} ({})",
                            dish.predicted_food,
                            dish.cuisines.join(", ")
                        ));
                    }
                    self.dispatch(Some(ticket));
                }
            }
            WorkerResponse::Detail {
                epoch,
                token,
                outcome,
            } => {
                if epoch != self.epoch {
                    tracing::debug!(epoch, %token, "dropping response for unmounted detail");
                    return;
                }
                let Screen::Detail(detail) = &mut self.screen else {
                    return;
                };
                let failure = outcome.as_ref().err().cloned();
                let id = detail.id();
                if detail.apply(token, outcome) {
                    if let Some(err) = failure {
                        self.push_api_error(&err, &format!("restaurant {id}"));
                    }
                }
            }
        }
    }

    // ── Input overlay ──────────────────────────────────────────────────

    /// Open the input overlay, prefilled with the field's current value.
    pub fn begin_input(&mut self, field: InputField) {
        let Screen::List(list) = &self.screen else {
            return;
        };
        let q = list.controller.query();
        self.input = match field {
            InputField::SearchName => q.search_name().to_string(),
            InputField::CountryCode => q.country_code().unwrap_or_default().to_string(),
            InputField::AverageSpent => format_opt(q.average_spent()),
            InputField::Latitude => format_opt(q.latitude()),
            InputField::Longitude => format_opt(q.longitude()),
            InputField::Range => format_opt(q.range()),
            InputField::AddCuisine | InputField::RemoveCuisine | InputField::ImagePath => {
                String::new()
            }
        };
        self.overlay = Overlay::Input(field);
    }

    /// Commit the input buffer to `field`. Numeric fields reject text that
    /// does not parse; an empty buffer clears the field.
    pub fn commit_input(&mut self, field: InputField) {
        let text = std::mem::take(&mut self.input);
        self.overlay = Overlay::None;
        let value = text.trim();

        let number = match field {
            InputField::AverageSpent
            | InputField::Latitude
            | InputField::Longitude
            | InputField::Range => match parse_opt_f64(value) {
                Ok(n) => n,
                Err(()) => {
                    self.set_warning(format!("{}: '{value}' is not a number", field.prompt()));
                    return;
                }
            },
            _ => None,
        };

        if field == InputField::ImagePath {
            self.select_image(Path::new(value));
            return;
        }

        let Some(list) = self.list_mut() else {
            return;
        };
        let c = &mut list.controller;
        let ticket = match field {
            InputField::SearchName => {
                c.set_search_name(value);
                c.search_by_name()
            }
            InputField::AddCuisine => c.add_cuisine(value),
            InputField::RemoveCuisine => c.remove_cuisine(value),
            InputField::CountryCode => {
                c.set_country_code(Some(value.to_string()));
                None
            }
            InputField::AverageSpent => {
                c.set_average_spent(number);
                None
            }
            InputField::Latitude => {
                c.set_latitude(number);
                None
            }
            InputField::Longitude => {
                c.set_longitude(number);
                None
            }
            InputField::Range => {
                c.set_range(number);
                None
            }
            InputField::ImagePath => None,
        };
        if field == InputField::SearchName && ticket.is_none() {
            self.set_warning("Type a name to search");
        }
        self.dispatch(ticket);
    }

    pub fn cancel_input(&mut self) {
        self.input.clear();
        self.overlay = Overlay::None;
    }

    fn select_image(&mut self, path: &Path) {
        if path.as_os_str().is_empty() {
            return;
        }
        match ImageUpload::from_path(path) {
            Ok(image) => {
                let name = image.file_name.clone();
                if let Some(list) = self.list_mut() {
                    list.controller.select_image(image);
                    self.set_status(format!("Selected {name}, press m to upload"));
                }
            }
            Err(e) => {
                let err = ApiError::from(e);
                self.push_api_error(&err, &path.display().to_string());
            }
        }
    }

    // ── Status ─────────────────────────────────────────────────────────

    fn push_api_error(&mut self, err: &ApiError, context: &str) {
        self.push_error(ErrorCategory::from(err), err.to_string(), context.to_string());
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

fn format_opt(v: Option<f64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

fn parse_opt_f64(s: &str) -> Result<Option<f64>, ()> {
    if s.is_empty() {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restobrowse_core::{
        ListContext, ModeOutcome, RequestMode, RequestToken, RestaurantPage, RestaurantSummary,
    };
    use std::sync::mpsc;

    fn app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let app = AppState::new(cmd_tx, resp_rx, PerPage::Ten, "http://test".into());
        (app, cmd_rx, resp_tx)
    }

    fn current_context(app: &AppState) -> Option<ListContext> {
        match &app.screen {
            Screen::List(list) => Some(list.controller.context()),
            Screen::Detail(_) => None,
        }
    }

    fn summary(id: i64) -> RestaurantSummary {
        RestaurantSummary {
            id: RestaurantId(id),
            name: format!("R{id}"),
            address: String::new(),
            average_cost_for_two: None,
            currency: None,
            cuisines: Vec::new(),
            aggregate_rating: None,
        }
    }

    fn page(ids: &[i64]) -> ModeOutcome {
        ModeOutcome::Page(RestaurantPage {
            restaurants: ids.iter().copied().map(summary).collect(),
            total_count: ids.len() as u64,
        })
    }

    fn next_execute(rx: &Receiver<WorkerCommand>) -> (u64, RequestToken, RequestMode) {
        match rx.try_recv().unwrap() {
            WorkerCommand::Execute { epoch, token, mode } => (epoch, token, mode),
            other => panic!("expected execute, got {other:?}"),
        }
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _rx, _tx) = app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn navigate_to_list_issues_listing() {
        let (mut app, rx, _tx) = app();
        app.navigate(Route::default());
        let (epoch, _, mode) = next_execute(&rx);
        assert_eq!(epoch, 1);
        assert!(matches!(mode, RequestMode::Listing(_)));
    }

    #[test]
    fn stale_epoch_response_is_dropped() {
        let (mut app, rx, _tx) = app();
        app.navigate(Route::default());
        let (old_epoch, old_token, _) = next_execute(&rx);

        // Remount: the new controller reuses token #1.
        app.navigate(Route::default());
        let (epoch, token, _) = next_execute(&rx);
        assert_eq!(token, old_token);
        assert_ne!(epoch, old_epoch);

        app.handle_response(WorkerResponse::List {
            epoch: old_epoch,
            token: old_token,
            outcome: Ok(page(&[1, 2])),
        });
        let Screen::List(list) = &app.screen else { panic!() };
        assert!(list.controller.results().items.is_empty());

        app.handle_response(WorkerResponse::List {
            epoch,
            token,
            outcome: Ok(page(&[3])),
        });
        let Screen::List(list) = &app.screen else { panic!() };
        assert_eq!(list.controller.results().items.len(), 1);
    }

    #[test]
    fn open_detail_and_back_restores_context() {
        let (mut app, rx, _tx) = app();
        app.navigate(Route::default());
        let (epoch, token, _) = next_execute(&rx);
        app.handle_response(WorkerResponse::List {
            epoch,
            token,
            outcome: Ok(page(&[10, 11])),
        });
        let ticket = app.list_mut().unwrap().controller.add_cuisine("Italian");
        app.dispatch(ticket);
        let _ = next_execute(&rx);
        let before = current_context(&app).unwrap();

        app.list_mut().unwrap().cursor = 1;
        app.open_selected();
        match rx.try_recv().unwrap() {
            WorkerCommand::FetchDetail { id, .. } => assert_eq!(id, RestaurantId(11)),
            other => panic!("expected detail fetch, got {other:?}"),
        }

        app.back_to_list();
        assert_eq!(current_context(&app).unwrap(), before);
        let (_, _, mode) = next_execute(&rx);
        match mode {
            RequestMode::Listing(p) => assert_eq!(p.cuisines, vec!["Italian".to_string()]),
            other => panic!("expected listing, got {other:?}"),
        }
    }

    #[test]
    fn failure_is_recorded_in_history() {
        let (mut app, rx, _tx) = app();
        app.navigate(Route::default());
        let (epoch, token, _) = next_execute(&rx);
        app.handle_response(WorkerResponse::List {
            epoch,
            token,
            outcome: Err(ApiError::NetworkUnreachable("refused".into())),
        });
        assert_eq!(app.error_history.len(), 1);
        assert_eq!(app.error_history[0].category, ErrorCategory::Network);
        assert!(matches!(app.status_message, Some((_, StatusLevel::Error))));
    }

    #[test]
    fn form_fields_do_not_dispatch() {
        let (mut app, rx, _tx) = app();
        app.navigate(Route::default());
        let _ = next_execute(&rx);

        app.begin_input(InputField::CountryCode);
        app.input = "1".into();
        app.commit_input(InputField::CountryCode);
        assert!(rx.try_recv().is_err());
        assert_eq!(
            app.list_mut().unwrap().controller.query().country_code(),
            Some("1")
        );
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        let (mut app, rx, _tx) = app();
        app.navigate(Route::default());
        let _ = next_execute(&rx);

        app.begin_input(InputField::Latitude);
        app.input = "north".into();
        app.commit_input(InputField::Latitude);
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
        assert_eq!(app.list_mut().unwrap().controller.query().latitude(), None);
    }

    #[test]
    fn blank_name_search_warns_without_request() {
        let (mut app, rx, _tx) = app();
        app.navigate(Route::default());
        let _ = next_execute(&rx);

        app.begin_input(InputField::SearchName);
        app.input = "   ".into();
        app.commit_input(InputField::SearchName);
        assert!(rx.try_recv().is_err());
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
    }

    #[test]
    fn missing_image_file_goes_to_history() {
        let (mut app, _rx, _tx) = app();
        app.navigate(Route::default());
        app.begin_input(InputField::ImagePath);
        app.input = "/definitely/not/here.jpg".into();
        app.commit_input(InputField::ImagePath);
        assert_eq!(app.error_history[0].category, ErrorCategory::Input);
    }
}
