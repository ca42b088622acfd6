use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use tracing_subscriber::EnvFilter;

use quizbox::app::{App, AppScreen, QuizPhase};
use quizbox::config::Config;
use quizbox::event::{AppEvent, EventHandler};
use quizbox::questions::QuestionBank;
use quizbox::session::navigation::{self, QuizAction};
use quizbox::store::json_store::JsonStore;
use quizbox::ui::components::form_view::FormView;
use quizbox::ui::components::header::{AppHeader, ProfilePopup};
use quizbox::ui::components::landing::Landing;
use quizbox::ui::components::progress_bar::ProgressBar;
use quizbox::ui::components::question_card::QuestionCard;
use quizbox::ui::components::question_grid::QuestionGrid;
use quizbox::ui::components::result_panel::ResultPanel;
use quizbox::ui::form::FormEvent;
use quizbox::ui::layout::{QuizLayout, centered_rect, pack_hint_lines, split_header};
use quizbox::ui::line_input::InputResult;
use quizbox::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "quizbox", version, about = "Timed multiple-choice quizzes in the terminal")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Quiz duration in seconds")]
    duration: Option<u32>,

    #[arg(short, long, help = "Question bank TOML file")]
    questions: Option<PathBuf>,

    #[arg(long, help = "Submit automatically when the timer runs out")]
    auto_submit: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Ignoring unreadable config ({e}), using defaults");
        Config::default()
    });
    if !Config::config_path().exists()
        && let Err(e) = config.save()
    {
        eprintln!("Could not write default config: {e}");
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(duration) = cli.duration {
        config.quiz_duration_secs = duration;
    }
    if let Some(path) = cli.questions {
        config.question_file = Some(path.to_string_lossy().into_owned());
    }
    if cli.auto_submit {
        config.auto_submit_on_expiry = true;
    }
    config.validate(&Theme::available_themes());

    let store = match JsonStore::new() {
        Ok(store) => Some(store),
        Err(e) => {
            eprintln!("No data directory available ({e}); accounts and feedback will not be saved");
            None
        }
    };
    if let Some(ref store) = store {
        init_logging(store.base_dir(), &config.log_level)?;
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting quizbox");

    let bank = match config.question_file.as_deref() {
        Some(path) => QuestionBank::from_file(Path::new(path))
            .with_context(|| format!("failed to load questions from {path}"))?,
        None => QuestionBank::bundled().context("failed to load bundled questions")?,
    };
    tracing::info!(questions = bank.len(), "question bank loaded");

    let mut app = App::new(config, bank, store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));
    app.attach_ticks(events.sender());

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("exiting with error: {err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// The terminal belongs to the UI, so logs go to a file next to the data.
fn init_logging(dir: &Path, level: &str) -> Result<()> {
    fs::create_dir_all(dir)?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(dir.join("quizbox.log"))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("quizbox={level}")))
        .unwrap_or_else(|_| EnvFilter::new("quizbox=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick(generation) => app.handle_tick(generation),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            tracing::info!("quit requested");
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Landing => handle_landing_key(app, key),
        AppScreen::Login => handle_login_key(app, key),
        AppScreen::Register => handle_register_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Result => {
            if app.ensure_result_access() {
                handle_result_key(app, key);
            }
        }
    }
}

fn handle_landing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(' ') | KeyCode::Char('a') => app.toggle_terms(),
        KeyCode::Enter => app.get_started(),
        _ => {}
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        app.go_to_register();
        return;
    }
    match app.login_form.handle(key) {
        FormEvent::Submit => app.submit_login(),
        FormEvent::Cancel => app.screen = AppScreen::Landing,
        FormEvent::Continue => {}
    }
}

fn handle_register_key(app: &mut App, key: KeyEvent) {
    match app.register_form.handle(key) {
        FormEvent::Submit => app.submit_registration(),
        FormEvent::Cancel => app.go_to_login(),
        FormEvent::Continue => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    if app.quiz_phase != QuizPhase::Active {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            KeyCode::Char('x') => app.logout(),
            _ => {}
        }
        return;
    }

    if let Some(ref mut input) = app.jump_input {
        match input.handle(key) {
            InputResult::Submit => app.confirm_jump(),
            InputResult::Cancel => app.jump_input = None,
            InputResult::Continue => {}
        }
        return;
    }

    if app.show_profile {
        match key.code {
            KeyCode::Char('x') => app.apply(QuizAction::Logout),
            KeyCode::Esc | KeyCode::Char('p') => app.toggle_profile(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char(ch @ '1'..='9') => {
            let option = ch as usize - '1' as usize;
            app.apply(QuizAction::SelectAnswer(option));
        }
        KeyCode::Up | KeyCode::Char('k') => cycle_option(app, false),
        KeyCode::Down | KeyCode::Char('j') => cycle_option(app, true),
        KeyCode::Left | KeyCode::Char('h') => app.apply(QuizAction::Previous),
        KeyCode::Right | KeyCode::Char('l') => app.apply(QuizAction::Next),
        KeyCode::Enter => app.primary_action(),
        KeyCode::Char('s') => app.apply(QuizAction::Submit),
        KeyCode::Char('b') => app.apply(QuizAction::ToggleBookmark),
        KeyCode::Char('g') => app.open_jump(),
        KeyCode::Char('r') => app.apply(QuizAction::Restart),
        KeyCode::Tab => app.toggle_sidebar(),
        KeyCode::Char('p') => app.toggle_profile(),
        KeyCode::Char('x') => app.apply(QuizAction::Logout),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn cycle_option(app: &mut App, forward: bool) {
    let Some(session) = app.session() else {
        return;
    };
    let count = session.current_question().options.len();
    if count == 0 {
        return;
    }
    let target = match (session.selected_answer(), forward) {
        (None, true) => 0,
        (None, false) => count - 1,
        (Some(i), true) => (i + 1) % count,
        (Some(i), false) => (i + count - 1) % count,
    };
    app.apply(QuizAction::SelectAnswer(target));
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    if app.feedback.editing_comment {
        match app.feedback.comment.handle(key) {
            InputResult::Submit | InputResult::Cancel => app.feedback.editing_comment = false,
            InputResult::Continue => app.feedback.sent = false,
        }
        return;
    }

    match key.code {
        KeyCode::Char(ch @ '1'..='5') => app.set_rating(ch as u8 - b'0'),
        KeyCode::Char('c') => app.start_comment(),
        KeyCode::Char('f') => app.submit_feedback(),
        KeyCode::Char('h') | KeyCode::Enter => app.back_to_home(),
        KeyCode::Char('x') => app.logout(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Landing => render_landing(frame, app),
        AppScreen::Login => render_login(frame, app),
        AppScreen::Register => render_register(frame, app),
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::Result => render_result(frame, app),
    }
}

fn render_landing(frame: &mut ratatui::Frame, app: &App) {
    let (header, body) = split_header(frame.area());
    frame.render_widget(AppHeader::new(None, app.theme), header);

    let landing = Landing {
        state: &app.landing,
        question_count: app.bank.len(),
        duration: quizbox::session::timer::format_clock(app.config.quiz_duration_secs),
        theme: app.theme,
    };
    frame.render_widget(landing, centered_rect(72, 18, body));
}

fn render_login(frame: &mut ratatui::Frame, app: &App) {
    let (header, body) = split_header(frame.area());
    frame.render_widget(AppHeader::new(None, app.theme), header);

    let height = FormView::height(&app.login_form);
    let view = FormView::new(
        &app.login_form,
        "[Enter] Login  [Tab] Next field  [Ctrl-r] Register  [Esc] Back",
        app.theme,
    )
    .notice(app.login_notice.as_deref());
    frame.render_widget(view, centered_rect(72, height, body));
}

fn render_register(frame: &mut ratatui::Frame, app: &App) {
    let (header, body) = split_header(frame.area());
    frame.render_widget(AppHeader::new(None, app.theme), header);

    let height = FormView::height(&app.register_form);
    let view = FormView::new(
        &app.register_form,
        "[Enter] Register  [Tab] Next field  [\u{2190}/\u{2192}] Change choice  [Esc] Login",
        app.theme,
    );
    frame.render_widget(view, centered_rect(80, height, body));
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let identity = app.identity.admitted();

    let Some(session) = app.session() else {
        let (header, body) = split_header(area);
        frame.render_widget(AppHeader::new(identity, app.theme), header);
        let message = app.status_message.as_deref().unwrap_or("Loading questions...");
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(colors.text_muted()),
            ))),
            body,
        );
        return;
    };

    let grid_width = if area.width >= 90 { 30 } else { area.width };
    let grid_rows = QuestionGrid::rows_for(session.len(), grid_width);
    let layout = QuizLayout::new(area, grid_rows, !app.sidebar_collapsed);

    let countdown = session.countdown();
    frame.render_widget(
        AppHeader::new(identity, app.theme).timer(countdown.display(), countdown.is_expired()),
        layout.header,
    );

    let progress = ProgressBar::new("Progress", session.progress_percent() / 100.0, app.theme)
        .caption(format!(
            "{}/{}  answered {}",
            session.current_index() + 1,
            session.len(),
            session.answered_count()
        ));
    frame.render_widget(progress, layout.progress);

    if let Some(grid_area) = layout.grid {
        let statuses = session.statuses();
        frame.render_widget(QuestionGrid::new(&statuses, app.theme), grid_area);
    }

    frame.render_widget(QuestionCard::new(session, app.theme), layout.main);

    render_quiz_footer(frame, app, layout.footer);

    if app.show_profile
        && let Some(identity) = identity
    {
        let width = ProfilePopup::WIDTH.min(area.width);
        let popup = Rect::new(
            area.x + area.width.saturating_sub(width),
            area.y + 3,
            width,
            ProfilePopup::HEIGHT.min(area.height.saturating_sub(3)),
        );
        frame.render_widget(
            ProfilePopup {
                identity,
                theme: app.theme,
            },
            popup,
        );
    }
}

fn render_quiz_footer(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;

    if let Some(ref input) = app.jump_input {
        let (before, cursor, after) = input.render_parts();
        let line = Line::from(vec![
            Span::styled(
                " Go to question: ",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(before.to_string(), Style::default().fg(colors.fg())),
            Span::styled(
                cursor.map_or(" ".to_string(), |c| c.to_string()),
                Style::default().fg(colors.bg()).bg(colors.fg()),
            ),
            Span::styled(after.to_string(), Style::default().fg(colors.fg())),
            Span::styled(
                "   [Enter] Go  [Esc] Cancel",
                Style::default().fg(colors.text_muted()),
            ),
        ]);
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let primary = match app.session().map(navigation::primary_action) {
        Some(QuizAction::Submit) => "[Enter] Submit",
        _ => "[Enter] Next",
    };
    let hints = [
        "[1-9] Answer",
        "[\u{2190}] Prev",
        primary,
        "[b] Bookmark",
        "[g] Go to",
        "[Tab] Grid",
        "[r] Restart",
        "[p] Profile",
        "[q] Quit",
    ];
    let mut lines: Vec<Line> = Vec::new();
    if let Some(ref message) = app.status_message {
        lines.push(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(colors.warning()),
        )));
    }
    for hint in pack_hint_lines(&hints, area.width as usize) {
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(colors.text_muted()),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    let (header, body) = split_header(frame.area());
    let identity = app.identity.admitted();
    frame.render_widget(AppHeader::new(identity, app.theme), header);

    let (Some(result), Some(identity)) = (app.result.as_ref(), identity) else {
        return;
    };
    let panel = ResultPanel::new(result, &identity.id, &app.feedback, app.theme)
        .status(app.status_message.as_deref());
    frame.render_widget(panel, centered_rect(84, 22, body));
}
