//! Console TUI Application
//!
//! The application struct, rendering and event loop for the console command.

use super::filter::{self, IndexedOutputRecord};
use super::links::{self, Segment};
use super::scroll::{ScrollFollower, Viewport};
use super::selection::{self, ViewSelection};
use crate::config::Config;
use crate::error::Result;
use crate::events::{self, ConsoleEvent, EventReceiver, EventSender};
use crate::feed::{FeedEntry, FeedReader};
use crate::model::{OutputRecord, Project};
use crate::store::{MemoryOutputStore, OutputStore};
use crate::theme::{Appearance, Rgb, SystemColors, Theme};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::collections::HashMap;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Duration;

const HELP_TEXT: &str = " c: clear | ↑↓: scroll | f: follow | q: quit ";

/// State of an open console for one project.
pub struct ConsoleApp<S: OutputStore> {
    project: Project,
    store: S,
    appearance: Appearance,
    assets: HashMap<String, Rgb>,
    system_colors: SystemColors,
    selection: ViewSelection,
    follower: ScrollFollower,
    viewport: Viewport,
    /// Short message shown in the footer after an action
    status: Option<String>,
    should_quit: bool,
}

impl<S: OutputStore> ConsoleApp<S> {
    pub fn new(project: Project, config: &Config, store: S) -> Self {
        Self {
            project,
            store,
            appearance: config.appearance,
            assets: config.theme_assets.clone(),
            system_colors: config.system_colors,
            selection: ViewSelection::new(),
            follower: ScrollFollower::new(),
            viewport: Viewport::default(),
            status: None,
            should_quit: false,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn selection(&self) -> &ViewSelection {
        &self.selection
    }

    pub fn follower(&self) -> &ScrollFollower {
        &self.follower
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Records the console currently shows, numbered for banding.
    pub fn visible_records(&self) -> Vec<IndexedOutputRecord<'_>> {
        filter::filter(
            self.store.records(),
            self.project.id,
            self.selection.task_id(),
        )
    }

    fn visible_len(&self) -> usize {
        let (project_id, task_id) = (self.project.id, self.selection.task_id());
        self.store
            .query(|r| filter::matches(r, project_id, task_id))
            .len()
    }

    /// Row count of every visible record, in display order.
    fn visible_heights(&self) -> Vec<usize> {
        self.visible_records()
            .iter()
            .map(|item| row_height(&item.record.content))
            .collect()
    }

    /// Feed one batch of entries through the store and the event channel.
    ///
    /// Each output record is appended and its notification forwarded before
    /// the next entry is read, so signals reach the console in feed order.
    pub fn pump(
        &mut self,
        entries: Vec<FeedEntry>,
        appends: &Receiver<OutputRecord>,
        sender: &EventSender,
        receiver: &EventReceiver,
    ) {
        for entry in entries {
            match entry.into_signal() {
                Ok(signal) => {
                    sender.send(signal);
                }
                Err(record) => {
                    self.store.append(record);
                    for appended in appends.try_iter() {
                        sender.new_output(appended);
                    }
                }
            }
        }
        for appended in appends.try_iter() {
            sender.new_output(appended);
        }
        for console_event in receiver.drain() {
            self.handle_event(console_event);
        }
    }

    /// Handle a signal from the host.
    pub fn handle_event(&mut self, event: ConsoleEvent) {
        match event {
            ConsoleEvent::NewOutput(record) => {
                self.follower
                    .on_new_output(record.as_ref(), self.selection.selector());
            }
            ConsoleEvent::Selection(signal) => {
                if self.selection.apply(&signal, &self.project) {
                    self.on_selection_changed();
                }
            }
        }
    }

    fn on_selection_changed(&mut self) {
        tracing::debug!(
            project = %self.project.name,
            selector = ?self.selection.selector(),
            "console selection changed"
        );
        self.viewport.home();
        self.status = None;
    }

    /// Remove every record the console currently shows from the store.
    pub fn clear_visible(&mut self) -> usize {
        let removed = filter::clear(
            &mut self.store,
            self.project.id,
            self.selection.task_id(),
        );
        if let Some(id) = self.follower.last_scrolled() {
            if !self.store.records().iter().any(|r| r.id == id) {
                self.follower.reset();
            }
        }
        self.viewport.home();
        tracing::info!(project = %self.project.name, removed, "cleared console output");
        self.status = Some(format!("Cleared {} line(s)", removed));
        removed
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let picker = selection::picker_visible(&self.project);

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => {
                self.should_quit = true;
            }
            (_, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) => {
                self.should_quit = true;
            }
            (_, KeyCode::Char('c') | KeyCode::Delete) => {
                self.clear_visible();
            }
            (_, KeyCode::Char('t') | KeyCode::Tab) if picker => {
                self.selection.cycle_next(&self.project);
                self.on_selection_changed();
            }
            (_, KeyCode::Char('T') | KeyCode::BackTab) if picker => {
                self.selection.cycle_prev(&self.project);
                self.on_selection_changed();
            }
            (_, KeyCode::Char('a')) if picker => {
                self.selection.select_all();
                self.on_selection_changed();
            }
            (_, KeyCode::Char(digit @ '1'..='9')) if picker => {
                let index = digit as usize - '1' as usize;
                if self.selection.select_task_at(&self.project, index) {
                    self.on_selection_changed();
                }
            }
            (_, KeyCode::Up | KeyCode::Char('k')) => self.viewport.scroll_up(1),
            (_, KeyCode::Down | KeyCode::Char('j')) => {
                let len = self.visible_len();
                self.viewport.scroll_down(1, len);
            }
            (_, KeyCode::PageUp) => {
                let heights = self.visible_heights();
                self.viewport.page_up(&heights);
            }
            (_, KeyCode::PageDown) => {
                let heights = self.visible_heights();
                self.viewport.page_down(&heights);
            }
            (_, KeyCode::Home | KeyCode::Char('g')) => self.viewport.home(),
            (_, KeyCode::End | KeyCode::Char('G')) => {
                let heights = self.visible_heights();
                self.viewport.end(&heights);
            }
            (_, KeyCode::Char('f')) => {
                self.follower
                    .on_new_output(None, self.selection.selector());
            }
            _ => {}
        }
    }

    /// Render the console. Applies any pending scroll request first.
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Output rows
                Constraint::Length(1), // Picker and actions
            ])
            .split(frame.area());

        self.render_output(frame, chunks[0]);
        self.render_footer(frame, chunks[1]);
    }

    fn render_output(&mut self, frame: &mut Frame, area: Rect) {
        let theme = Theme::new(self.appearance, &self.assets, self.system_colors);
        let visible = filter::filter(
            self.store.records(),
            self.project.id,
            self.selection.task_id(),
        );

        if let Some(id) = self.follower.take_pending() {
            if let Some(item) = visible.iter().find(|item| item.record.id == id) {
                self.viewport.anchor_top(item.index);
            }
        }
        self.viewport.set_height(area.height as usize);
        self.viewport.clamp(visible.len());

        let pane = Style::default().bg(Color::from(theme.pane_background()));

        if visible.is_empty() {
            let (_, fg) = theme.row_colors(1);
            let empty = Paragraph::new(" No output")
                .style(pane.fg(Color::from(fg)).add_modifier(Modifier::DIM));
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = visible.iter().map(|item| row_item(item, &theme)).collect();
        let list = List::new(items).style(pane);
        let mut state = ListState::default().with_offset(self.viewport.offset());
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let help_width = HELP_TEXT.chars().count() as u16;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(help_width)])
            .split(area);

        let mut spans = Vec::new();
        if selection::picker_visible(&self.project) {
            spans.push(Span::styled(
                " Show Output of: ",
                Style::default().fg(Color::DarkGray),
            ));
            spans.push(Span::styled(
                format!("< {} >", self.selection.picker_label(&self.project)),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(" (t)", Style::default().fg(Color::DarkGray)));
        } else {
            spans.push(Span::styled(
                format!(" {}", self.project.name),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(ref status) = self.status {
            spans.push(Span::styled(
                format!("  {}", status),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
        frame.render_widget(
            Paragraph::new(HELP_TEXT)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right),
            chunks[1],
        );
    }
}

/// Terminal lines of one record, without trailing line breaks.
fn content_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .trim_end_matches(['\r', '\n'])
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
}

fn row_height(content: &str) -> usize {
    content_lines(content).count()
}

/// One banded row. Multi-line output stays in a single row.
fn row_item<'a>(item: &IndexedOutputRecord<'a>, theme: &Theme) -> ListItem<'a> {
    let (bg, fg) = theme.row_colors(item.index);
    let lines: Vec<Line> = content_lines(&item.record.content)
        .map(output_line)
        .collect();

    ListItem::new(Text::from(lines)).style(Style::default().bg(Color::from(bg)).fg(Color::from(fg)))
}

fn output_line(text: &str) -> Line<'_> {
    let mut spans = vec![Span::raw(" ")];
    for segment in links::segments(text) {
        match segment {
            Segment::Text(t) => spans.push(Span::raw(t)),
            Segment::Link(url) => spans.push(Span::styled(
                url,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            )),
        }
    }
    Line::from(spans)
}

/// Initialize the terminal for TUI mode.
pub fn init_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to normal mode.
pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the console TUI for `project`, following the feed at `feed_path`.
///
/// Each cycle reads newly completed feed lines, forwards store appends and
/// signals to the console, draws, and waits up to the poll interval for input.
pub fn run_console(project: Project, config: &Config, feed_path: PathBuf) -> Result<()> {
    // Set up panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    tracing::info!(
        project = %project.name,
        tasks = project.tasks.len(),
        feed = %feed_path.display(),
        appearance = %config.appearance,
        "opening console"
    );

    let mut store = MemoryOutputStore::with_capacity_limit(config.max_records);
    let appends = store.subscribe();
    let (sender, receiver) = events::channel();
    let mut feed = FeedReader::new(feed_path);
    let mut app = ConsoleApp::new(project, config, store);

    let mut terminal = init_terminal()?;
    let poll_duration = Duration::from_millis(config.poll_interval_ms);

    let result = (|| -> Result<()> {
        loop {
            let entries = feed.poll().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to read feed");
                Vec::new()
            });
            app.pump(entries, &appends, &sender, &receiver);

            terminal.draw(|frame| app.render(frame))?;

            if event::poll(poll_duration)? {
                if let Event::Key(key) = event::read()? {
                    // Only handle key press events (not release or repeat)
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key);
                    }
                }
            }

            if app.should_quit() {
                return Ok(());
            }
        }
    })();

    restore_terminal(&mut terminal)?;
    tracing::info!("console closed");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::SelectionSignal;
    use crate::model::{OutputRecord, Task};
    use ratatui::backend::TestBackend;
    use uuid::Uuid;

    struct Fixture {
        app: ConsoleApp<MemoryOutputStore>,
        other_project: Uuid,
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Project "web" with tasks t1, t2 and records a (t1), b (t2), c (t1),
    /// plus d from another project.
    fn fixture() -> Fixture {
        let project = Project::new(
            "web",
            vec![Task::new("npm", "run dev"), Task::new("cargo", "watch")],
        );
        let (t1, t2) = (project.tasks[0].id, project.tasks[1].id);
        let other_project = Uuid::new_v4();

        let mut store = MemoryOutputStore::new();
        store.append(OutputRecord::new(project.id, t1, "a"));
        store.append(OutputRecord::new(project.id, t2, "b"));
        store.append(OutputRecord::new(project.id, t1, "c"));
        store.append(OutputRecord::new(other_project, t1, "d"));

        let app = ConsoleApp::new(project, &Config::default(), store);
        Fixture { app, other_project }
    }

    fn contents(app: &ConsoleApp<MemoryOutputStore>) -> Vec<(String, usize)> {
        app.visible_records()
            .iter()
            .map(|r| (r.record.content.clone(), r.index))
            .collect()
    }

    fn draw(app: &mut ConsoleApp<MemoryOutputStore>, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_all_tasks_view() {
        let f = fixture();
        assert_eq!(
            contents(&f.app),
            vec![("a".into(), 0), ("b".into(), 1), ("c".into(), 2)]
        );
    }

    #[test]
    fn test_picker_narrows_to_one_task() {
        let mut f = fixture();
        f.app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(contents(&f.app), vec![("a".into(), 0), ("c".into(), 1)]);

        f.app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(contents(&f.app), vec![("b".into(), 0)]);

        f.app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(contents(&f.app).len(), 3);
    }

    #[test]
    fn test_digit_and_all_keys() {
        let mut f = fixture();
        f.app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(f.app.selection().selected_index(), Some(1));
        f.app.handle_key(key(KeyCode::Char('9')));
        assert_eq!(f.app.selection().selected_index(), Some(1));
        f.app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(f.app.selection().selected_index(), None);
    }

    #[test]
    fn test_picker_keys_ignored_for_single_task_project() {
        let project = Project::new("solo", vec![Task::new("make", "watch")]);
        let mut app = ConsoleApp::new(project, &Config::default(), MemoryOutputStore::new());
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.selection().selected_index(), None);
    }

    #[test]
    fn test_selection_signals() {
        let mut f = fixture();
        let t2 = f.app.project().tasks[1].id;

        f.app
            .handle_event(ConsoleEvent::Selection(SelectionSignal::ViewingTaskChanged(t2)));
        assert_eq!(contents(&f.app), vec![("b".into(), 0)]);
        assert_eq!(f.app.selection().selected_index(), Some(1));

        f.app
            .handle_event(ConsoleEvent::Selection(SelectionSignal::TaskIndexChanged(5)));
        assert_eq!(contents(&f.app), vec![("b".into(), 0)]);

        f.app
            .handle_event(ConsoleEvent::Selection(SelectionSignal::TaskIndexChanged(-1)));
        assert_eq!(contents(&f.app).len(), 3);
    }

    #[test]
    fn test_viewing_unknown_task_shows_nothing() {
        let mut f = fixture();
        f.app.handle_event(ConsoleEvent::Selection(
            SelectionSignal::ViewingTaskChanged(Uuid::new_v4()),
        ));
        assert!(f.app.visible_records().is_empty());
    }

    #[test]
    fn test_clear_all_tasks_keeps_other_project() {
        let mut f = fixture();
        f.app.handle_key(key(KeyCode::Char('c')));

        assert!(f.app.visible_records().is_empty());
        assert_eq!(f.app.store().len(), 1);
        assert_eq!(f.app.store().records()[0].project_id, f.other_project);
        assert_eq!(f.app.clear_visible(), 0);
    }

    #[test]
    fn test_clear_single_task() {
        let mut f = fixture();
        f.app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(f.app.clear_visible(), 2);

        f.app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(contents(&f.app), vec![("b".into(), 0)]);
    }

    #[test]
    fn test_new_output_of_other_task_is_not_followed() {
        let mut f = fixture();
        let (t1, t2) = (f.app.project().tasks[0].id, f.app.project().tasks[1].id);
        f.app.handle_key(key(KeyCode::Char('1')));

        let record = OutputRecord::new(f.app.project().id, t2, "e");
        f.app.store_mut().append(record.clone());
        f.app.handle_event(ConsoleEvent::NewOutput(Some(record)));
        assert_eq!(f.app.follower().pending(), None);

        let record = OutputRecord::new(f.app.project().id, t1, "f");
        f.app.store_mut().append(record.clone());
        f.app.handle_event(ConsoleEvent::NewOutput(Some(record.clone())));
        assert_eq!(f.app.follower().pending(), Some(record.id));
    }

    #[test]
    fn test_pending_scroll_anchors_record_at_top() {
        let mut f = fixture();
        let t1 = f.app.project().tasks[0].id;
        let project_id = f.app.project().id;
        let mut last = None;
        for i in 0..20 {
            let record = OutputRecord::new(project_id, t1, format!("line {}", i));
            f.app.store_mut().append(record.clone());
            last = Some(record);
        }
        let last = last.unwrap();
        f.app.handle_event(ConsoleEvent::NewOutput(Some(last.clone())));

        let terminal = draw(&mut f.app, 40, 6);
        // 3 fixture rows + 20 new ones, last has display index 22
        assert_eq!(f.app.viewport().offset(), 22);
        assert_eq!(row_text(&terminal, 0), " line 19");
        assert_eq!(f.app.follower().pending(), None);
    }

    #[test]
    fn test_rows_are_banded_by_display_index() {
        let mut f = fixture();
        let terminal = draw(&mut f.app, 40, 6);
        let buffer = terminal.backend().buffer();

        assert_eq!(buffer[(0, 0)].bg, Color::Rgb(0x15, 0x35, 0x41));
        assert_eq!(buffer[(0, 1)].bg, Color::Rgb(0x0D, 0x2A, 0x35));
        assert_eq!(buffer[(0, 2)].bg, Color::Rgb(0x15, 0x35, 0x41));
        assert_eq!(row_text(&terminal, 1), " b");
    }

    #[test]
    fn test_banding_restarts_for_filtered_view() {
        let mut f = fixture();
        f.app.handle_key(key(KeyCode::Char('2')));
        let terminal = draw(&mut f.app, 40, 6);
        let buffer = terminal.backend().buffer();

        // "b" is the second record overall but the first row of this view
        assert_eq!(row_text(&terminal, 0), " b");
        assert_eq!(buffer[(0, 0)].bg, Color::Rgb(0x15, 0x35, 0x41));
    }

    #[test]
    fn test_footer_shows_picker_label() {
        let mut f = fixture();
        f.app.handle_key(key(KeyCode::Char('1')));
        let terminal = draw(&mut f.app, 100, 6);
        assert!(row_text(&terminal, 5).contains("Show Output of: < npm run dev >"));
    }

    #[test]
    fn test_links_are_underlined() {
        let project = Project::new("solo", vec![Task::new("npm", "start")]);
        let mut store = MemoryOutputStore::new();
        store.append(OutputRecord::new(
            project.id,
            project.tasks[0].id,
            "at http://x.io",
        ));
        let mut app = ConsoleApp::new(project, &Config::default(), store);
        let terminal = draw(&mut app, 40, 4);
        let buffer = terminal.backend().buffer();

        // " at " is 4 cells, the link starts at x = 4
        assert!(buffer[(4, 0)].modifier.contains(Modifier::UNDERLINED));
        assert_eq!(buffer[(4, 0)].fg, Color::Cyan);
        assert!(!buffer[(1, 0)].modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_quit_keys() {
        let mut f = fixture();
        f.app.handle_key(key(KeyCode::Char('q')));
        assert!(f.app.should_quit());

        let mut f = fixture();
        f.app
            .handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(f.app.should_quit());
        assert_eq!(f.app.store().len(), 4);
    }

    #[test]
    fn test_follow_key_rescrolls_to_last_record() {
        let mut f = fixture();
        let record = f.app.store().records()[2].clone();
        f.app.handle_event(ConsoleEvent::NewOutput(Some(record.clone())));
        draw(&mut f.app, 40, 6);

        f.app.handle_key(key(KeyCode::Home));
        assert_eq!(f.app.viewport().offset(), 0);
        f.app.handle_key(key(KeyCode::Char('f')));
        draw(&mut f.app, 40, 6);
        assert_eq!(f.app.viewport().offset(), 2);
    }

    #[test]
    fn test_end_shows_last_multiline_record() {
        let project = Project::new("solo", vec![Task::new("npm", "start")]);
        let (project_id, task_id) = (project.id, project.tasks[0].id);
        let mut store = MemoryOutputStore::new();
        for i in 0..10 {
            store.append(OutputRecord::new(
                project_id,
                task_id,
                format!("rec {i} a\nrec {i} b"),
            ));
        }
        let mut app = ConsoleApp::new(project, &Config::default(), store);
        draw(&mut app, 30, 5);

        app.handle_key(key(KeyCode::End));
        let terminal = draw(&mut app, 30, 5);
        assert_eq!(app.viewport().offset(), 8);
        assert_eq!(row_text(&terminal, 2), " rec 9 a");
        assert_eq!(row_text(&terminal, 3), " rec 9 b");

        app.handle_key(key(KeyCode::PageUp));
        let terminal = draw(&mut app, 30, 5);
        assert_eq!(row_text(&terminal, 0), " rec 6 a");
    }

    #[test]
    fn test_pump_keeps_feed_order() {
        let project = Project::new(
            "web",
            vec![Task::new("npm", "run dev"), Task::new("cargo", "watch")],
        );
        let (t1, t2) = (project.tasks[0].id, project.tasks[1].id);
        let record = OutputRecord::new(project.id, t1, "ready");

        let mut store = MemoryOutputStore::new();
        let appends = store.subscribe();
        let (sender, receiver) = events::channel();
        let mut app = ConsoleApp::new(project, &Config::default(), store);

        app.pump(
            vec![
                FeedEntry::Output(record.clone()),
                FeedEntry::ViewingTask { task_id: t2 },
            ],
            &appends,
            &sender,
            &receiver,
        );

        // The output arrived while all tasks were shown, so it is followed
        assert_eq!(app.follower().last_scrolled(), Some(record.id));
        assert_eq!(app.selection().selected_index(), Some(1));
        assert_eq!(app.store().len(), 1);

        // Output of t1 after switching to t2 is not followed
        let later = OutputRecord::new(app.project().id, t1, "again");
        app.pump(vec![FeedEntry::Output(later)], &appends, &sender, &receiver);
        assert_eq!(app.follower().last_scrolled(), Some(record.id));
    }

    #[test]
    fn test_clear_keeps_followed_record_of_other_task() {
        let mut f = fixture();
        let b = f.app.store().records()[1].clone();
        f.app.handle_event(ConsoleEvent::NewOutput(Some(b.clone())));
        draw(&mut f.app, 40, 6);

        f.app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(f.app.clear_visible(), 2);
        f.app.handle_key(key(KeyCode::Char('a')));
        f.app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(f.app.follower().pending(), Some(b.id));
    }

    #[test]
    fn test_clear_forgets_removed_followed_record() {
        let mut f = fixture();
        let c = f.app.store().records()[2].clone();
        f.app.handle_event(ConsoleEvent::NewOutput(Some(c)));
        f.app.clear_visible();

        f.app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(f.app.follower().pending(), None);
    }
}
