//! crates/journal_core/src/navigator.rs
//!
//! The calendar navigation state machine. It owns "what date is selected"
//! and "what week is visible", and enforces that neither may ever point at
//! the future. `today` is frozen at construction so the future bound stays
//! stable even if the session is left open across midnight.

use chrono::{Datelike, Days, NaiveDate};

/// Full weekday display names, indexed 0=Sunday through 6=Saturday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// The Sunday on or before the given date.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// One day of the visible week, tagged for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleDay {
    pub date: NaiveDate,
    /// False for future dates, which must render as disabled.
    pub is_selectable: bool,
    pub is_selected: bool,
}

/// Owns the selected date and the visible week, with the invariants
/// `selected_date <= today` and `visible_week_start <= week_start_of(today)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarNavigator {
    today: NaiveDate,
    selected_date: NaiveDate,
    visible_week_start: NaiveDate,
    calendar_expanded: bool,
}

impl CalendarNavigator {
    /// Creates a navigator anchored at `today`, with today selected and the
    /// current week visible.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            selected_date: today,
            visible_week_start: week_start_of(today),
            calendar_expanded: false,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn visible_week_start(&self) -> NaiveDate {
        self.visible_week_start
    }

    pub fn calendar_expanded(&self) -> bool {
        self.calendar_expanded
    }

    fn current_week_start(&self) -> NaiveDate {
        week_start_of(self.today)
    }

    /// Selects `date`, pulling the visible week along if the date lies in a
    /// different week. Future dates are rejected and leave all state
    /// unchanged. Returns whether the selection changed.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if date > self.today {
            return false;
        }
        self.selected_date = date;
        let week_start = week_start_of(date);
        if week_start != self.visible_week_start {
            self.visible_week_start = week_start;
        }
        true
    }

    /// Selects the date in the currently visible week matching the weekday
    /// index (0=Sunday). A future resolution is a no-op.
    pub fn select_weekday(&mut self, weekday: usize) -> bool {
        if weekday > 6 {
            return false;
        }
        let date = self.visible_week_start + Days::new(weekday as u64);
        self.select_date(date)
    }

    /// Moves the visible week one step backward (negative) or forward
    /// (positive). Backward shifts are always permitted. A forward shift is
    /// clamped to the current week, so one press snaps back to the present
    /// from any past week; once at the current week it is a no-op.
    pub fn shift_week(&mut self, direction: i32) -> bool {
        if direction < 0 {
            self.visible_week_start = self.visible_week_start - Days::new(7);
            return true;
        }
        if direction == 0 || self.visible_week_start >= self.current_week_start() {
            return false;
        }
        let next = self.visible_week_start + Days::new(7);
        self.visible_week_start = next.min(self.current_week_start());
        true
    }

    /// Whether a forward shift would move the visible week.
    pub fn can_shift_forward(&self) -> bool {
        self.visible_week_start < self.current_week_start()
    }

    /// Flips the expanded month-calendar toggle. Pure presentation state.
    pub fn toggle_calendar_expanded(&mut self) {
        self.calendar_expanded = !self.calendar_expanded;
    }

    /// The seven days of the visible week, tagged for presentation.
    pub fn visible_week(&self) -> [VisibleDay; 7] {
        core::array::from_fn(|offset| {
            let date = self.visible_week_start + Days::new(offset as u64);
            VisibleDay {
                date,
                is_selectable: date <= self.today,
                is_selected: date == self.selected_date,
            }
        })
    }

    /// The display name of the selected date's weekday.
    pub fn selected_day_name(&self) -> &'static str {
        WEEKDAY_NAMES[self.selected_date.weekday().num_days_from_sunday() as usize]
    }

    /// A formatted label covering the visible week, e.g. "Mar 3 - Mar 9, 2024".
    pub fn week_range_label(&self) -> String {
        let end = self.visible_week_start + Days::new(6);
        format!(
            "{} - {}",
            self.visible_week_start.format("%b %-d"),
            end.format("%b %-d, %Y")
        )
    }
}
