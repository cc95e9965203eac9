//! Main application UI and state management.
//! Hosts the two quiz tabs and the word manager; all quiz logic lives in `QuizSession`.

use chrono::{DateTime, Local, Utc};
use eframe::egui;
use log::{info, warn};
use rusqlite::Connection;
use word_quiz_app::config::AppConfig;
use word_quiz_app::database::db;
use word_quiz_app::export::{json, text};
use word_quiz_app::models::{
    QuizError, QuizMode, QuizSession, QuizState, WordPairId, WordStore, is_blank_answer,
    parse_question_count,
};

/// Application tabs
#[derive(Clone, Copy, Default, PartialEq, Eq)]
enum Tab {
    #[default]
    KoreanToEnglish,
    EnglishToKorean,
    WordManager,
}

impl Tab {
    fn quiz_mode(self) -> Option<QuizMode> {
        match self {
            Tab::KoreanToEnglish => Some(QuizMode::KoreanToEnglish),
            Tab::EnglishToKorean => Some(QuizMode::EnglishToKorean),
            Tab::WordManager => None,
        }
    }
}

#[derive(Clone, Copy)]
enum FileFormat {
    Text,
    Json,
}

impl FileFormat {
    fn extension(self) -> &'static str {
        match self {
            FileFormat::Text => "txt",
            FileFormat::Json => "json",
        }
    }

    fn filter_name(self) -> &'static str {
        match self {
            FileFormat::Text => "Word list",
            FileFormat::Json => "JSON files",
        }
    }
}

/// Main application state
pub struct QuizApp {
    conn: Connection,
    words: WordStore,
    session: QuizSession,
    tab: Tab,

    default_count: usize,
    count_input: String,
    answer_input: String,
    focus_answer: bool,

    new_korean: String,
    new_english: String,
    pending_delete: Option<WordPairId>,
    last_saved_display: String,

    show_confirmation_dialog: bool,
    allowed_to_close: bool,
    message: Option<String>,
}

/// Formats a save time as local YYYY-MM-DD HH:MM
fn format_saved_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(time) => {
            let local: DateTime<Local> = time.into();
            local.format("%Y-%m-%d %H:%M").to_string()
        }
        None => "never".to_string(),
    }
}

/// Adds a Hangul-capable font behind egui's defaults so Korean words render.
pub fn install_korean_font(ctx: &egui::Context, config: &AppConfig) {
    let Some(path) = config.korean_font() else {
        warn!("no Korean font found, set WORD_QUIZ_FONT to a font file with Hangul glyphs");
        return;
    };
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("could not read font {}: {}", path.display(), e);
            return;
        }
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("korean".to_owned(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push("korean".to_owned());
    }
    ctx.set_fonts(fonts);
    info!("using Korean font {}", path.display());
}

impl eframe::App for QuizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_tab_shortcuts(ctx);

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut clicked: Option<Tab> = None;
                for (tab, label) in [
                    (Tab::KoreanToEnglish, "1. Korean → English"),
                    (Tab::EnglishToKorean, "2. English → Korean"),
                    (Tab::WordManager, "3. Word Manager"),
                ] {
                    if ui.selectable_label(self.tab == tab, label).clicked() {
                        clicked = Some(tab);
                    }
                }
                if let Some(tab) = clicked {
                    self.switch_tab(tab);
                }
            });
        });

        match self.tab {
            Tab::KoreanToEnglish | Tab::EnglishToKorean => self.render_quiz_screen(ctx),
            Tab::WordManager => self.render_word_manager(ctx),
        }

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_confirmation_dialog = true;
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    if self.words.has_unsaved_changes() {
                        ui.label("The word list has unsaved changes.");
                    }
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }

        if let Some(id) = self.pending_delete {
            let mut confirmed = false;
            let mut cancelled = false;
            egui::Window::new("Delete word?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    if let Some(pair) = self.words.get(id) {
                        ui.label(format!(
                            "{} → {}",
                            pair.korean().join(", "),
                            pair.english().join(", ")
                        ));
                    }
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            cancelled = true;
                        }
                        if ui.button("Delete").clicked() {
                            confirmed = true;
                        }
                    });
                });
            if confirmed {
                self.words.remove(id);
                self.pending_delete = None;
                self.message =
                    Some("Word deleted. Press Save to keep the change.".to_string());
            } else if cancelled {
                self.pending_delete = None;
            }
        }

        if let Some(message) = self.message.clone() {
            egui::Window::new("Word Quiz")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.message = None;
                    }
                });
        }
    }
}

impl QuizApp {
    pub fn new(words: WordStore, conn: Connection, config: &AppConfig) -> Self {
        let session = QuizSession::new(&words);
        let last_saved = db::last_saved_at(&conn).unwrap_or_else(|e| {
            warn!("could not read last save time: {}", e);
            None
        });
        Self {
            conn,
            words,
            session,
            tab: Tab::default(),
            default_count: config.default_question_count,
            count_input: config.default_question_count.to_string(),
            answer_input: String::new(),
            focus_answer: false,
            new_korean: String::new(),
            new_english: String::new(),
            pending_delete: None,
            last_saved_display: format_saved_time(last_saved),
            show_confirmation_dialog: false,
            allowed_to_close: false,
            message: None,
        }
    }

    /// Keys 1, 2 and 3 switch tabs unless a text field is being edited.
    fn handle_tab_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let pressed = ctx.input(|i| {
            if i.key_pressed(egui::Key::Num1) {
                Some(Tab::KoreanToEnglish)
            } else if i.key_pressed(egui::Key::Num2) {
                Some(Tab::EnglishToKorean)
            } else if i.key_pressed(egui::Key::Num3) {
                Some(Tab::WordManager)
            } else {
                None
            }
        });
        if let Some(tab) = pressed {
            self.switch_tab(tab);
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        // Picking a quiz direction always starts over in that direction.
        if let Some(mode) = tab.quiz_mode() {
            self.session.set_mode(&self.words, mode);
            self.answer_input.clear();
        }
        self.tab = tab;
    }

    fn start_quiz(&mut self) {
        let mode = self.tab.quiz_mode().unwrap_or_default();
        let requested = parse_question_count(&self.count_input);
        match self.session.start(&self.words, requested, mode) {
            Ok(()) => {
                self.count_input = self.session.total_questions().to_string();
                self.answer_input.clear();
                self.focus_answer = true;
            }
            Err(QuizError::EmptyWordList) => {
                self.message = Some(
                    "There are no words to quiz on. Add some in the Word Manager tab first."
                        .to_string(),
                );
            }
            Err(e) => warn!("could not start quiz: {}", e),
        }
    }

    fn reset_quiz(&mut self) {
        self.session.reset(&self.words);
        self.tab = Tab::KoreanToEnglish;
        self.count_input = self.default_count.to_string();
        self.answer_input.clear();
    }

    fn submit_answer(&mut self) {
        if !self.session.is_active() || is_blank_answer(&self.answer_input) {
            return;
        }
        let answer = std::mem::take(&mut self.answer_input);
        if let Err(e) = self.session.submit_answer(&answer) {
            warn!("answer ignored: {}", e);
        }
        self.focus_answer = self.session.is_active();
    }

    /// Renders the quiz screen: controls, current question, status and history
    fn render_quiz_screen(&mut self, ctx: &egui::Context) {
        let mut action_start = false;
        let mut action_reset = false;
        let mut action_submit = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Questions:");
                ui.add(egui::TextEdit::singleline(&mut self.count_input).desired_width(50.0));
                if ui.button("Start").clicked() {
                    action_start = true;
                }
                if ui.button("Reset").clicked() {
                    action_reset = true;
                }
            });

            ui.separator();

            let mode = self.session.mode();
            ui.group(|ui| {
                ui.set_min_height(120.0);
                ui.vertical_centered(|ui| {
                    ui.add_space(10.0);
                    match self.session.state() {
                        QuizState::InProgress => {
                            ui.label(mode.cue());
                            if let Some(pair) = self.session.current() {
                                ui.heading(mode.prompt_forms(pair).join(", "));
                            }
                        }
                        QuizState::Complete => {
                            ui.label("Done");
                            ui.heading(format!(
                                "Correct {} / {}",
                                self.session.correct_count(),
                                self.session.total_questions()
                            ));
                        }
                        QuizState::Idle => {
                            ui.label("Ready");
                            ui.heading("Press Start to begin");
                        }
                    }
                    ui.add_space(10.0);
                });
            });

            ui.add_space(10.0);

            ui.horizontal(|ui| {
                let response = ui.add_enabled(
                    self.session.is_active(),
                    egui::TextEdit::singleline(&mut self.answer_input)
                        .hint_text(mode.answer_hint()),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    action_submit = true;
                }
                if self.focus_answer {
                    response.request_focus();
                    self.focus_answer = false;
                }
                if ui
                    .add_enabled(self.session.is_active(), egui::Button::new("Submit"))
                    .clicked()
                {
                    action_submit = true;
                }
            });

            ui.add_space(10.0);
            self.render_status(ui);
            ui.separator();
            self.render_history(ui);
        });

        // Execute deferred actions
        if action_start {
            self.start_quiz();
        }
        if action_reset {
            self.reset_quiz();
        }
        if action_submit {
            self.submit_answer();
        }
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        let session = &self.session;
        let total = session.total_questions();
        ui.horizontal(|ui| {
            ui.label(format!("Correct: {}", session.correct_count()));
            ui.separator();
            ui.label(format!("{} / {}", session.answered_count(), total));
            ui.separator();
            let status = match session.state() {
                QuizState::InProgress => {
                    format!("In progress ({} / {})", session.current_index() + 1, total)
                }
                QuizState::Complete => "Finished".to_string(),
                QuizState::Idle => "Ready".to_string(),
            };
            ui.label(status);
        });
        let fraction = session.progress_percent() as f32 / 100.0;
        ui.add(egui::ProgressBar::new(fraction).show_percentage());
    }

    fn render_history(&self, ui: &mut egui::Ui) {
        let session = &self.session;
        let mode = session.mode();
        let total = session.total_questions();

        egui::ScrollArea::vertical()
            .id_salt("history_list")
            .show(ui, |ui| {
                if session.state() == QuizState::Complete {
                    ui.group(|ui| {
                        ui.strong("Session summary");
                        ui.label(format!("Correct {} / {}", session.correct_count(), total));
                    });
                }

                // Newest first
                for (i, record) in session.history().iter().enumerate().rev() {
                    ui.group(|ui| {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.strong(mode.prompt_forms(&record.pair).join(", "));
                                ui.label(format!(
                                    "Answer: {}",
                                    mode.target_forms(&record.pair).join(", ")
                                ));
                                ui.label(format!("You typed: {}", record.user_answer));
                            });
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                                ui.vertical(|ui| {
                                    let (text, color) = if record.was_correct {
                                        ("Correct", egui::Color32::from_rgb(46, 160, 67))
                                    } else {
                                        ("Wrong", egui::Color32::from_rgb(207, 34, 46))
                                    };
                                    ui.label(egui::RichText::new(text).strong().color(color));
                                    ui.label(format!("{}/{}", i + 1, total));
                                });
                            });
                        });
                    });
                }
            });
    }

    /// Renders the word manager: add, delete, save, import and export
    fn render_word_manager(&mut self, ctx: &egui::Context) {
        let mut action_add = false;
        let mut action_save = false;
        let mut action_export: Option<FileFormat> = None;
        let mut action_import: Option<FileFormat> = None;
        let mut action_delete: Option<WordPairId> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Add Word");
            ui.horizontal(|ui| {
                ui.label("Korean:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.new_korean)
                        .hint_text("기술, 기량"),
                );
            });
            ui.horizontal(|ui| {
                ui.label("English:");
                ui.add(egui::TextEdit::singleline(&mut self.new_english).hint_text("skill"));
            });
            if ui.button("Add Word").clicked() {
                action_add = true;
            }

            ui.separator();

            ui.horizontal(|ui| {
                let save_label = if self.words.has_unsaved_changes() {
                    "Save *"
                } else {
                    "Save"
                };
                if ui.button(save_label).clicked() {
                    action_save = true;
                }
                if ui.button("Export Text").clicked() {
                    action_export = Some(FileFormat::Text);
                }
                if ui.button("Export JSON").clicked() {
                    action_export = Some(FileFormat::Json);
                }
                if ui.button("Import Text").clicked() {
                    action_import = Some(FileFormat::Text);
                }
                if ui.button("Import JSON").clicked() {
                    action_import = Some(FileFormat::Json);
                }
            });

            ui.separator();

            ui.label(format!("Last saved: {}", self.last_saved_display));

            ui.separator();

            ui.heading(format!("Words ({})", self.words.len()));

            egui::ScrollArea::vertical()
                .id_salt("word_list")
                .show(ui, |ui| {
                    if self.words.is_empty() {
                        ui.label("The word list is empty.");
                    }
                    for pair in self.words.list() {
                        ui.group(|ui| {
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.strong(pair.korean().join(", "));
                                    ui.label(format!("→ {}", pair.english().join(", ")));
                                });
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.button("Delete").clicked() {
                                            action_delete = Some(pair.id());
                                        }
                                    },
                                );
                            });
                        });
                    }
                });
        });

        // Execute deferred actions
        if action_add {
            self.add_word();
        }
        if let Some(id) = action_delete {
            self.pending_delete = Some(id);
        }
        if action_save {
            self.save_words();
        }
        if let Some(format) = action_export {
            self.handle_export(format);
        }
        if let Some(format) = action_import {
            self.handle_import(format);
        }
    }

    fn add_word(&mut self) {
        match self.words.add(&self.new_korean, &self.new_english) {
            Ok(_) => {
                self.new_korean.clear();
                self.new_english.clear();
                self.message = Some("Word added. Press Save to keep it.".to_string());
            }
            Err(e) => self.message = Some(format!("Could not add word: {}", e)),
        }
    }

    fn save_words(&mut self) {
        match db::persist(&mut self.words, &mut self.conn) {
            Ok(()) => {
                if let Ok(saved) = db::last_saved_at(&self.conn) {
                    self.last_saved_display = format_saved_time(saved);
                }
                // Next quiz picks up the saved list
                self.session.reset(&self.words);
                self.message = Some("Word list saved. You can start a new quiz.".to_string());
            }
            Err(e) => {
                warn!("save failed: {}", e);
                self.message = Some(format!("Save failed: {}", e));
            }
        }
    }

    /// Handles word list export through a save dialog
    fn handle_export(&mut self, format: FileFormat) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("words.{}", format.extension()))
            .add_filter(format.filter_name(), &[format.extension()])
            .save_file()
        else {
            return;
        };

        let result = match format {
            FileFormat::Text => text::export_text_to_path(&self.words, &path),
            FileFormat::Json => json::export_json_to_path(&self.words, &path),
        };
        self.message = Some(match result {
            Ok(()) => {
                info!("exported word list to {}", path.display());
                format!("Exported {} words.", self.words.len())
            }
            Err(e) => format!("Export failed: {}", e),
        });
    }

    /// Handles word list import through a file dialog. The imported list replaces the current one.
    fn handle_import(&mut self, format: FileFormat) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter(format.filter_name(), &[format.extension()])
            .pick_file()
        else {
            return;
        };

        let result = match format {
            FileFormat::Text => text::import_text(&path),
            FileFormat::Json => json::import_json(&path),
        };
        match result {
            Ok(imported) => {
                if imported.is_empty() {
                    self.message = Some("The file has no words in it.".to_string());
                    return;
                }
                self.words.replace(imported);
                self.pending_delete = None;
                self.session.reset(&self.words);
                self.message = Some(format!(
                    "Imported {} words. Press Save to keep them.",
                    self.words.len()
                ));
            }
            Err(e) => {
                self.message = Some(match format {
                    FileFormat::Text => format!(
                        "Import failed: {}\n\nEach line should look like:\n기술, 기량|skill",
                        e
                    ),
                    FileFormat::Json => format!("Import failed: {}", e),
                });
            }
        }
    }
}
