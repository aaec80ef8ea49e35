//! services/client/src/shell.rs
//!
//! The hosting layer: a line-based command loop that wires input events to
//! the screen controllers and prints their state back out. The screens own
//! all the logic; this module only parses commands, performs the port calls
//! the screens request, and renders regions as plain text.

use std::sync::Arc;

use chrono::NaiveDate;
use journal_core::domain::Entry;
use journal_core::fetch::FetchState;
use journal_core::navigator::CalendarNavigator;
use journal_core::ports::JournalApi;
use journal_core::screens::{
    CalendarScreen, EntryDetailScreen, EntryLookup, EntryRequest, HomeScreen, StimulusScreen,
};
use journal_core::screens::stimulus::InsightPanel;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::error::ClientError;

//=========================================================================================
// Commands
//=========================================================================================

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the home screen (affirmation, advice, weekly top stimuli).
    Home,
    /// Show the calendar screen for the selected date.
    Calendar,
    /// Select a specific date.
    SelectDate(NaiveDate),
    /// Select a weekday (0=Sunday) of the visible week.
    SelectWeekday(usize),
    /// Shift the visible week backward or forward.
    ShiftWeek(i32),
    /// Toggle the expanded month calendar.
    ToggleMonth,
    /// Expand or collapse the n-th entry card of the day list.
    ToggleEntry(usize),
    /// Open the n-th entry of the day list in the detail view.
    ViewEntry(usize),
    /// Open an entry directly by its id.
    OpenEntry(i64),
    /// Show the stimulus screen.
    Stimuli,
    /// Select a stimulus by name.
    Pick(String),
    /// Move the lockstep cursor.
    Advance(i32),
    /// Deep link into the n-th weekly top stimulus.
    Top(usize),
    Help,
    Quit,
}

impl Command {
    /// Parses a command line. Unknown input produces a usage hint, never an
    /// error that ends the session.
    pub fn parse(line: &str) -> Result<Command, String> {
        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or("");
        let rest: Vec<&str> = words.collect();
        match (head, rest.as_slice()) {
            ("home", []) => Ok(Command::Home),
            ("cal", []) | ("calendar", []) => Ok(Command::Calendar),
            ("date", [raw]) => raw
                .parse::<NaiveDate>()
                .map(Command::SelectDate)
                .map_err(|_| format!("'{raw}' is not a date (expected YYYY-MM-DD)")),
            ("day", [raw]) => parse_weekday(raw)
                .map(Command::SelectWeekday)
                .ok_or_else(|| format!("'{raw}' is not a weekday")),
            ("week", ["prev"]) => Ok(Command::ShiftWeek(-1)),
            ("week", ["next"]) => Ok(Command::ShiftWeek(1)),
            ("month", []) => Ok(Command::ToggleMonth),
            ("entry", [raw]) => parse_index(raw).map(Command::ToggleEntry),
            ("view", [raw]) => parse_index(raw).map(Command::ViewEntry),
            ("open", [raw]) => raw
                .parse::<i64>()
                .map(Command::OpenEntry)
                .map_err(|_| format!("'{raw}' is not an entry id")),
            ("stim", []) | ("stimuli", []) => Ok(Command::Stimuli),
            ("pick", [name]) => Ok(Command::Pick((*name).to_string())),
            ("next", []) => Ok(Command::Advance(1)),
            ("prev", []) => Ok(Command::Advance(-1)),
            ("top", [raw]) => parse_index(raw).map(Command::Top),
            ("help", []) | ("?", []) => Ok(Command::Help),
            ("quit", []) | ("exit", []) => Ok(Command::Quit),
            ("", []) => Err(String::new()),
            _ => Err(format!("Unknown command '{line}'. Try 'help'.")),
        }
    }
}

fn parse_weekday(raw: &str) -> Option<usize> {
    let prefixes = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];
    let lower = raw.to_lowercase();
    prefixes.iter().position(|p| lower.starts_with(p))
}

fn parse_index(raw: &str) -> Result<usize, String> {
    raw.parse::<usize>()
        .map_err(|_| format!("'{raw}' is not an index"))
}

//=========================================================================================
// The Shell
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveScreen {
    Home,
    Calendar,
    Stimulus,
    EntryDetail,
}

/// Drives the four screens against the backend port.
pub struct Shell {
    api: Arc<dyn JournalApi>,
    home: HomeScreen,
    calendar: CalendarScreen,
    stimulus: StimulusScreen,
    entry_detail: EntryDetailScreen,
    active: ActiveScreen,
}

impl Shell {
    pub fn new(api: Arc<dyn JournalApi>, today: NaiveDate) -> Self {
        Self {
            api,
            home: HomeScreen::new(),
            calendar: CalendarScreen::new(today),
            stimulus: StimulusScreen::new(),
            entry_detail: EntryDetailScreen::new(),
            active: ActiveScreen::Home,
        }
    }

    /// Reads commands from stdin until quit or end of input.
    pub async fn run(&mut self) -> Result<(), ClientError> {
        self.home.load(self.api.as_ref()).await;
        self.render();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await? {
                Some(line) => {
                    let command = match Command::parse(&line) {
                        Ok(command) => command,
                        Err(message) => {
                            if !message.is_empty() {
                                println!("{message}");
                            }
                            continue;
                        }
                    };
                    if self.handle(command).await {
                        info!("Session ended.");
                        return Ok(());
                    }
                    self.render();
                }
                None => return Ok(()),
            }
        }
    }

    /// Applies one command. Returns true when the session should end.
    pub async fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return true,
            Command::Help => print_help(),
            Command::Home => {
                self.active = ActiveScreen::Home;
                self.home.load(self.api.as_ref()).await;
            }
            Command::Calendar => {
                self.active = ActiveScreen::Calendar;
                if let Some(request) = self.calendar.refresh() {
                    let result = self.api.entries_by_date(request.date()).await;
                    self.calendar.apply_entries(request, result);
                }
            }
            Command::SelectDate(date) => {
                self.active = ActiveScreen::Calendar;
                if let Some(request) = self.calendar.select_date(date) {
                    let result = self.api.entries_by_date(request.date()).await;
                    self.calendar.apply_entries(request, result);
                } else if date > self.calendar.navigator().today() {
                    println!("{date} is in the future.");
                }
            }
            Command::SelectWeekday(weekday) => {
                self.active = ActiveScreen::Calendar;
                if let Some(request) = self.calendar.select_weekday(weekday) {
                    let result = self.api.entries_by_date(request.date()).await;
                    self.calendar.apply_entries(request, result);
                }
            }
            Command::ShiftWeek(direction) => {
                self.active = ActiveScreen::Calendar;
                self.calendar.shift_week(direction);
            }
            Command::ToggleMonth => {
                self.active = ActiveScreen::Calendar;
                self.calendar.toggle_calendar_expanded();
            }
            Command::ToggleEntry(index) => {
                self.active = ActiveScreen::Calendar;
                self.calendar.toggle_entry(index);
            }
            Command::ViewEntry(index) => {
                let target = self
                    .calendar
                    .entries()
                    .ready()
                    .and_then(|entries| entries.get(index))
                    .map(|entry| (entry.id, entry.created_at));
                match target {
                    Some((call_id, created_at)) => {
                        self.open_entry_detail(EntryLookup::ByTimestamp(created_at), call_id)
                            .await;
                    }
                    None => println!("No entry at index {index}."),
                }
            }
            Command::OpenEntry(entry_id) => {
                self.open_entry_detail(EntryLookup::ById(entry_id), entry_id)
                    .await;
            }
            Command::Stimuli => {
                self.active = ActiveScreen::Stimulus;
                self.open_stimuli(None).await;
            }
            Command::Pick(name) => {
                self.active = ActiveScreen::Stimulus;
                if let Some(request) = self.stimulus.select_stimulus(&name) {
                    let result = self.api.insights_by_stim_id(request.stim_id()).await;
                    self.stimulus.apply_insights(request, result);
                }
            }
            Command::Advance(direction) => {
                self.active = ActiveScreen::Stimulus;
                self.stimulus.advance(direction);
            }
            Command::Top(index) => {
                let hint = self.home.stimulus_hint(index).map(str::to_string);
                match hint {
                    Some(hint) => {
                        self.active = ActiveScreen::Stimulus;
                        self.open_stimuli(Some(&hint)).await;
                    }
                    None => println!("No top stimulus at index {index}."),
                }
            }
        }
        false
    }

    async fn open_stimuli(&mut self, hint: Option<&str>) {
        if let Some(request) = self.stimulus.open() {
            let result = self.api.emotion_mapping().await;
            if let Some(follow_up) = self.stimulus.apply_catalog(request, result, hint) {
                let insights = self.api.insights_by_stim_id(follow_up.stim_id()).await;
                self.stimulus.apply_insights(follow_up, insights);
            }
        } else if let Some(hint) = hint {
            // Catalog already loaded; just move the selection.
            if let Some(request) = self.stimulus.select_stimulus(hint) {
                let result = self.api.insights_by_stim_id(request.stim_id()).await;
                self.stimulus.apply_insights(request, result);
            }
        }
    }

    async fn open_entry_detail(&mut self, lookup: EntryLookup, call_id: i64) {
        self.active = ActiveScreen::EntryDetail;
        if let Some(request) = self.entry_detail.open(lookup) {
            self.fetch_entry(request).await;
        }
        if let Some(request) = self.entry_detail.request_stimuli(call_id) {
            let result = self.api.stimuli_by_call_id(request.call_id()).await;
            self.entry_detail.apply_stimuli(request, result);
        }
    }

    async fn fetch_entry(&mut self, request: EntryRequest) {
        match request.lookup() {
            EntryLookup::ById(entry_id) => {
                let result = self.api.entry_by_id(entry_id).await;
                self.entry_detail.apply_entry(request, result);
            }
            EntryLookup::ByTimestamp(ts) => {
                let result = self.api.entries_by_date(ts.date_naive()).await;
                self.entry_detail.apply_day_entries(request, result);
            }
        }
    }

    //=====================================================================================
    // Rendering
    //=====================================================================================

    fn render(&self) {
        match self.active {
            ActiveScreen::Home => self.render_home(),
            ActiveScreen::Calendar => self.render_calendar(),
            ActiveScreen::Stimulus => self.render_stimulus(),
            ActiveScreen::EntryDetail => self.render_entry_detail(),
        }
    }

    fn render_home(&self) {
        println!("== Home ==");
        match self.home.affirmation() {
            FetchState::Ready(text) => println!("{text}"),
            FetchState::Empty => println!("Taking things one breath at a time."),
            state => render_region_status(state),
        }
        println!("-- Little joys ahead --");
        match self.home.reminders() {
            FetchState::Ready(text) => println!("{text}"),
            FetchState::Empty => println!("(nothing noted)"),
            state => render_region_status(state),
        }
        println!("-- Advice --");
        match self.home.advice() {
            FetchState::Ready(cards) => {
                for card in cards {
                    println!("* {}", card.title);
                }
            }
            FetchState::Empty => println!("(no advice today)"),
            state => render_region_status(state),
        }
        println!("-- On your mind this week --");
        match self.home.top_stimuli() {
            FetchState::Ready(top) => {
                for (index, stim) in top.iter().enumerate() {
                    println!("[{index}] {} ({} mentions)", stim.name, stim.mentions);
                }
            }
            FetchState::Empty => println!("(no stimuli recorded this week)"),
            state => render_region_status(state),
        }
    }

    fn render_calendar(&self) {
        let navigator = self.calendar.navigator();
        println!("{}", week_header(navigator));
        let strip: Vec<String> = navigator
            .visible_week()
            .iter()
            .map(|day| {
                let label = format!("{}", day.date.format("%d"));
                if day.is_selected {
                    format!("[{label}]")
                } else if day.is_selectable {
                    format!(" {label} ")
                } else {
                    " -- ".to_string()
                }
            })
            .collect();
        println!("Su Mo Tu We Th Fr Sa");
        println!("{}", strip.join(""));
        if navigator.calendar_expanded() {
            println!("(month calendar expanded)");
        }
        println!(
            "Entries on {}, {}:",
            navigator.selected_day_name(),
            navigator.selected_date()
        );
        match self.calendar.entries() {
            FetchState::Ready(entries) => {
                for (index, entry) in entries.iter().enumerate() {
                    println!("[{index}] {}", entry.created_at.format("%H:%M"));
                    if self.calendar.expanded_entry() == Some(index) {
                        render_entry_body(entry);
                    }
                }
            }
            FetchState::Empty => println!("No entries for this date."),
            state => render_region_status(state),
        }
    }

    fn render_stimulus(&self) {
        println!("== Stimulus -> Emotion ==");
        match self.stimulus.catalog() {
            FetchState::Ready(_) => {}
            FetchState::Empty => {
                println!("No stimulus data yet.");
                return;
            }
            state => {
                render_region_status(state);
                return;
            }
        }
        println!("Stimuli: {}", self.stimulus.stimulus_names().join(", "));
        let pager = self.stimulus.paginator();
        match pager.stimulus_key() {
            Some(key) if pager.has_data() => {
                println!("Selected: {key} ({})", pager.position_label());
            }
            Some(key) => {
                println!("Selected: {key} (no data)");
                return;
            }
            None => {
                println!("No stimulus selected.");
                return;
            }
        }
        if let Some(snapshot) = self.stimulus.current_snapshot() {
            println!("@ {}", snapshot.created_at.format("%Y-%m-%d %H:%M"));
            for (label, value) in snapshot.emotions.labeled() {
                println!("  {label:<9} {value:.2}");
            }
        }
        match self.stimulus.insight_panel() {
            InsightPanel::Ready | InsightPanel::Empty => match self.stimulus.current_insight() {
                Some(insight) => {
                    println!("Insight: {}", insight.text);
                    println!("  ({})", insight.created_at.format("%Y-%m-%d %H:%M"));
                }
                None => println!("No insight for this point."),
            },
            InsightPanel::Loading => println!("Loading insights..."),
            InsightPanel::Failed(message) => println!("Insights unavailable: {message}"),
            InsightPanel::Idle => {}
        }
    }

    fn render_entry_detail(&self) {
        println!("== Entry ==");
        match self.entry_detail.entry() {
            FetchState::Ready(entry) => {
                println!("{}", entry.created_at.format("%B %-d, %Y %H:%M"));
                render_entry_body(entry);
            }
            state => render_region_status(state),
        }
        println!("-- Stimuli in this entry --");
        match self.entry_detail.stimuli() {
            FetchState::Ready(stimuli) => {
                for stim in stimuli {
                    println!("* {}", stim.name);
                }
            }
            FetchState::Empty => println!("(none detected)"),
            state => render_region_status(state),
        }
    }
}

/// The calendar header line. The back arrow is always offered; the forward
/// arrow only while the visible week lies in the past.
fn week_header(navigator: &CalendarNavigator) -> String {
    let forward = if navigator.can_shift_forward() {
        " >"
    } else {
        ""
    };
    format!("== Calendar | < {}{forward} ==", navigator.week_range_label())
}

fn render_entry_body(entry: &Entry) {
    println!("  Raw: {}", entry.raw_text);
    println!("  Insight: {}", entry.insight);
}

fn render_region_status<T>(state: &FetchState<T>) {
    match state {
        FetchState::Idle => println!("(not loaded)"),
        FetchState::Loading => println!("Loading..."),
        FetchState::Empty => println!("(empty)"),
        FetchState::NotFound(message) => println!("Not found: {message}"),
        FetchState::Failed(message) => println!("Error: {message}"),
        FetchState::Ready(_) => {}
    }
}

fn print_help() {
    println!("Commands:");
    println!("  home                 show the home screen");
    println!("  cal                  show the calendar for the selected date");
    println!("  date YYYY-MM-DD      select a date");
    println!("  day sun..sat         select a weekday of the visible week");
    println!("  week prev|next       shift the visible week");
    println!("  month                toggle the expanded month calendar");
    println!("  entry N              expand/collapse an entry card");
    println!("  view N               open an entry in the detail view");
    println!("  open ID              open an entry by id");
    println!("  stim                 explore stimuli and emotions");
    println!("  pick NAME            select a stimulus");
    println!("  next / prev          page snapshots and insights together");
    println!("  top N                open a weekly top stimulus");
    println!("  quit");
}
