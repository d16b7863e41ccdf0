use std::collections::VecDeque;
use std::path::PathBuf;

use eframe::egui;

use crate::error::AppError;
use crate::processing::statistics::Aggregate;
use crate::state::app_state::{AppState, FilterOutcome};
use crate::state::notice::Notice;
use crate::state::settings::Settings;
use crate::ui::notice_dialog::{self, NoticeResponse};
use crate::ui::table_view::TableView;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything the user can ask for. Collected while drawing, handled afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    OpenFileDialog,
    Load(PathBuf),
    SelectColumn(String),
    Aggregate(Aggregate),
    ApplyFilter,
    ResetFilter,
    ToggleTheme,
    CopyToClipboard(String),
    DismissNotice,
}

/// The main SheetLens application.
pub struct SheetLensApp {
    pub state: AppState,
    pub settings: Settings,
    pub table_view: TableView,
    /// Pending notices, front one is on screen.
    pub notices: VecDeque<Notice>,
    /// Held for the app's lifetime; on X11/Wayland copied text lives only as long as its owner.
    clipboard: Option<arboard::Clipboard>,
}

impl SheetLensApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, startup_error: Option<AppError>) -> Self {
        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(15.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::proportional(14.5),
        );
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        ctx.set_style(style);
        ctx.set_visuals(settings.theme.visuals());

        let mut app = Self::with_settings(settings);
        if let Some(err) = startup_error {
            app.report(err);
        }
        app
    }

    /// Build the app without a window.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings.theme),
            settings,
            table_view: TableView::default(),
            notices: VecDeque::new(),
            clipboard: None,
        }
    }

    fn report(&mut self, err: AppError) {
        match &err {
            AppError::Load { .. } | AppError::Config { .. } => tracing::error!("{err}"),
            _ => tracing::warn!("{err}"),
        }
        self.notices.push_back(Notice::from(&err));
    }

    fn refresh_table(&mut self) {
        match self.state.current() {
            Some(dataset) => self.table_view.render(dataset),
            None => self.table_view.clear(),
        }
    }

    /// Run one user action to completion. Failures become notices.
    pub fn dispatch(&mut self, action: UiAction) {
        match action {
            UiAction::OpenFileDialog => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("CSV Files", &["csv"])
                    .add_filter("All Files", &["*"])
                    .pick_file()
                {
                    self.dispatch(UiAction::Load(path));
                }
            }
            UiAction::Load(path) => self.load_file(path),
            UiAction::SelectColumn(name) => match self.state.select_column(&name) {
                Ok(()) => {
                    tracing::info!("Selected column {name}");
                    self.notices.push_back(Notice::info(
                        "Selected column",
                        format!("Selected column: {name}"),
                    ));
                }
                Err(e) => self.report(e),
            },
            UiAction::Aggregate(kind) => match self.state.aggregate(kind) {
                Ok(result) => {
                    tracing::info!("{:?} of {} = {}", kind, result.column, result.value);
                    self.notices.push_back(Notice::aggregate(&result));
                }
                Err(e) => self.report(e),
            },
            UiAction::ApplyFilter => match self.state.apply_filter() {
                Ok(FilterOutcome::Applied { shown }) => {
                    tracing::info!("Filter {:?} kept {shown} rows", self.state.filter_query);
                    self.refresh_table();
                }
                Ok(FilterOutcome::NoMatch) => {
                    tracing::info!("Filter {:?} matched no rows", self.state.filter_query);
                    self.notices.push_back(Notice::info(
                        "Filter result",
                        "No rows match the filter.",
                    ));
                }
                Err(e) => self.report(e),
            },
            UiAction::ResetFilter => match self.state.reset_filter() {
                Ok(()) => {
                    tracing::info!("Filter reset");
                    self.refresh_table();
                }
                Err(e) => self.report(e),
            },
            UiAction::ToggleTheme => {
                self.state.theme = self.state.theme.toggle();
            }
            UiAction::CopyToClipboard(text) => {
                self.notices.pop_front();
                if let Err(e) = self.copy_to_clipboard(text) {
                    self.notices.push_back(Notice::error(format!("Failed to copy to clipboard: {e}")));
                }
            }
            UiAction::DismissNotice => {
                self.notices.pop_front();
            }
        }
    }

    fn copy_to_clipboard(&mut self, text: String) -> Result<(), arboard::Error> {
        let mut clipboard = match self.clipboard.take() {
            Some(c) => c,
            None => arboard::Clipboard::new()?,
        };
        let copied = clipboard.set_text(text);
        self.clipboard = Some(clipboard);
        copied
    }

    fn load_file(&mut self, path: PathBuf) {
        let delimiter = match self.settings.delimiter_byte() {
            Ok(d) => d,
            Err(e) => return self.report(e),
        };
        match self.state.load(&path, delimiter) {
            Ok(table) => {
                tracing::info!(
                    "Loaded {:?}: {} rows, {} columns",
                    path,
                    table.current.row_count(),
                    table.current.column_count()
                );
                self.refresh_table();
            }
            Err(e) => self.report(e),
        }
    }

    fn status_line(&self) -> String {
        let selected = match &self.state.selected_column {
            Some(name) => format!("column: {name}"),
            None => "no column selected".to_string(),
        };
        match &self.state.table {
            Some(table) => format!(
                "{}  |  {} of {} rows{}  |  {} columns  |  {}",
                table.file_name(),
                table.current.row_count(),
                table.original.row_count(),
                if table.is_filtered() { " (filtered)" } else { "" },
                table.current.column_count(),
                selected
            ),
            None => "No file loaded".to_string(),
        }
    }
}

impl eframe::App for SheetLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.state.theme.visuals());

        let mut actions: Vec<UiAction> = Vec::new();

        // Dropped files (first .csv wins)
        ctx.input(|i| {
            let dropped = i.raw.dropped_files.iter().filter_map(|f| f.path.as_ref()).find(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
            });
            if let Some(path) = dropped {
                actions.push(UiAction::Load(path.clone()));
            }
        });

        // --- Header panel ---
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 8)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("SheetLens");
                    ui.separator();
                    if ui.button("Load file").clicked() {
                        actions.push(UiAction::OpenFileDialog);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(self.state.theme.toggle_label()).clicked() {
                            actions.push(UiAction::ToggleTheme);
                        }
                        ui.separator();
                        ui.small(format!("v{VERSION}"));
                    });
                });
            });

        // --- Analysis and filter controls ---
        egui::TopBottomPanel::bottom("controls")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 8)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for kind in Aggregate::ALL {
                        if ui.button(kind.button_label()).clicked() {
                            actions.push(UiAction::Aggregate(kind));
                        }
                    }
                    ui.separator();
                    let field = ui.add(
                        egui::TextEdit::singleline(&mut self.state.filter_query)
                            .hint_text("Filter value")
                            .desired_width(200.0),
                    );
                    let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Filter").clicked() || submitted {
                        actions.push(UiAction::ApplyFilter);
                    }
                    if ui.button("Reset filter").clicked() {
                        actions.push(UiAction::ResetFilter);
                    }
                });
                ui.add_space(4.0);
                ui.label(egui::RichText::new(self.status_line()).weak());
            });

        // --- Data grid ---
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.table_view.is_blank() {
                ui.add_space(80.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Welcome to SheetLens");
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(
                            "Click \"Load file\" or drop a semicolon-separated CSV file here.",
                        )
                        .weak(),
                    );
                });
                return;
            }
            let selected = self.state.selected_column.as_deref();
            if let Some(name) = self.table_view.show(ui, selected, &self.state.theme) {
                actions.push(UiAction::SelectColumn(name));
            }
        });

        // --- Notices ---
        if let Some(notice) = self.notices.front() {
            match notice_dialog::show_notice(ctx, notice) {
                Some(NoticeResponse::Dismiss) => actions.push(UiAction::DismissNotice),
                Some(NoticeResponse::Copy(text)) => actions.push(UiAction::CopyToClipboard(text)),
                None => {}
            }
        }

        for action in actions {
            self.dispatch(action);
        }
    }
}
