//! Terminal drawing and hit-testing.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};
use dropdown::layout::{DropdownLayout, Point, Rect};
use dropdown::widgets::view::{DropdownView, NativeView};

use crate::form::{Field, PassengerForm};

const LEFT: u16 = 2;
const FIELD_WIDTH: u16 = 36;

/// Text colour roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Title,
    Muted,
    Accent,
    Disabled,
}

/// What a screen cell belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    /// An entry of the plain dropdown.
    Entry(String),
    /// An element id of a custom or search dropdown.
    Element(String),
}

/// Clickable regions of the last frame.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Hit)>,
}

impl HitMap {
    pub fn push(&mut self, rect: Rect, hit: Hit) {
        self.regions.push((rect, hit));
    }

    /// Topmost region under `point`; later regions are drawn over earlier ones.
    pub fn at(&self, point: Point) -> Option<&Hit> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(point))
            .map(|(_, hit)| hit)
    }
}

/// Raw-mode alternate screen with mouse capture, restored on drop.
pub struct Screen {
    stdout: Stdout,
}

impl Screen {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        Ok(Self { stdout })
    }

    /// Wait up to `timeout` for input, then drain whatever else is pending.
    pub fn poll(&self, timeout: Duration) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();
        if event::poll(timeout)? {
            events.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }
        Ok(events)
    }

    fn text(&mut self, x: u16, y: u16, text: &str, tone: Tone) -> io::Result<()> {
        let color = match tone {
            Tone::Normal => Color::Reset,
            Tone::Title => Color::Cyan,
            Tone::Muted | Tone::Disabled => Color::DarkGrey,
            Tone::Accent => Color::Yellow,
        };
        queue!(self.stdout, cursor::MoveTo(x, y), SetForegroundColor(color))?;
        if tone == Tone::Title {
            queue!(self.stdout, SetAttribute(Attribute::Bold))?;
        }
        if tone == Tone::Disabled {
            queue!(self.stdout, SetAttribute(Attribute::CrossedOut))?;
        }
        queue!(
            self.stdout,
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor
        )
    }

    /// Draw the whole form and report its clickable regions.
    ///
    /// Also records each dropdown's layout for outside-press detection.
    pub fn draw(&mut self, form: &PassengerForm, focus: Field) -> io::Result<HitMap> {
        let mut hits = HitMap::default();
        queue!(self.stdout, terminal::Clear(ClearType::All))?;

        self.text(LEFT, 0, "Редактирование пассажира", Tone::Title)?;
        self.text(
            LEFT,
            1,
            "Tab: следующее поле  q / Ctrl+C: выход",
            Tone::Muted,
        )?;

        let mut y = 3;
        y = self.native(&form.sex.view(), y, focus == Field::Sex, &mut hits)?;

        y += 1;
        let (next, layout) =
            self.dropdown(&form.category.view(), y, focus == Field::Category, &mut hits)?;
        form.category.set_layout(layout);
        y = next;

        y += 1;
        let (next, layout) =
            self.dropdown(&form.station.view(), y, focus == Field::Station, &mut hits)?;
        form.station.set_layout(layout);
        y = next;

        if let Some(station) = form.passenger.with(|p| p.station.clone()) {
            self.text(LEFT, y, &format!("Выбрана станция: {}", station), Tone::Muted)?;
        }

        self.stdout.flush()?;
        Ok(hits)
    }

    fn label(&mut self, text: &str, marker: Option<&str>, y: u16, focused: bool) -> io::Result<()> {
        let pointer = if focused { "›" } else { " " };
        let label = match marker {
            Some(marker) => format!("{} {} {}", pointer, text, marker),
            None => format!("{} {}", pointer, text),
        };
        let tone = if focused { Tone::Accent } else { Tone::Normal };
        self.text(LEFT - 2, y, &label, tone)
    }

    fn native(
        &mut self,
        view: &NativeView,
        mut y: u16,
        focused: bool,
        hits: &mut HitMap,
    ) -> io::Result<u16> {
        self.label(
            &view.label.text,
            view.label.required_marker.as_deref(),
            y,
            focused,
        )?;
        y += 1;

        for entry in &view.entries {
            let mark = if entry.selected { "(•)" } else { "( )" };
            let tone = if entry.is_placeholder() {
                Tone::Muted
            } else {
                Tone::Normal
            };
            self.text(LEFT, y, &format!("{} {}", mark, entry.label), tone)?;
            if let Some(option) = &entry.option {
                hits.push(
                    Rect::new(LEFT, y, FIELD_WIDTH, 1),
                    Hit::Entry(option.clone()),
                );
            }
            y += 1;
        }
        Ok(y)
    }

    fn dropdown(
        &mut self,
        view: &DropdownView,
        mut y: u16,
        focused: bool,
        hits: &mut HitMap,
    ) -> io::Result<(u16, DropdownLayout)> {
        let top = y;
        self.label(
            &view.label.text,
            view.label.required_marker.as_deref(),
            y,
            focused,
        )?;
        y += 1;

        let inner = usize::from(FIELD_WIDTH.saturating_sub(6));
        let (text, tone, target) = match (&view.display, &view.search) {
            (_, Some(search)) if search.value.is_empty() => {
                (search.placeholder.clone(), Tone::Muted, search.id.clone())
            }
            (_, Some(search)) => (search.value.clone(), Tone::Normal, search.id.clone()),
            (Some(display), None) => {
                let tone = if display.is_placeholder() {
                    Tone::Muted
                } else {
                    Tone::Normal
                };
                (display.text().to_string(), tone, view.trigger_id.clone())
            }
            (None, None) => (String::new(), Tone::Normal, view.trigger_id.clone()),
        };
        let shown: String = text.chars().take(inner).collect();
        self.text(LEFT, y, "[ ", Tone::Normal)?;
        self.text(LEFT + 2, y, &shown, tone)?;
        self.text(
            LEFT + 2 + inner as u16,
            y,
            &format!(" {} ]", view.indicator()),
            Tone::Normal,
        )?;
        hits.push(Rect::new(LEFT, y, FIELD_WIDTH, 1), Hit::Element(target));
        y += 1;

        let wrapper = Rect::new(0, top, LEFT + FIELD_WIDTH, y - top);
        let Some(panel) = &view.panel else {
            return Ok((y, DropdownLayout::new(wrapper)));
        };

        let panel_top = y;
        let mut rows = Vec::new();
        for row in panel.rows.iter().take(panel.max_visible) {
            let mark = if row.selected { "✓" } else { " " };
            let tone = if row.disabled {
                Tone::Disabled
            } else if row.selected {
                Tone::Accent
            } else {
                Tone::Normal
            };
            self.text(LEFT + 2, y, &format!("{} {}", mark, row.option), tone)?;
            let rect = Rect::new(LEFT, y, FIELD_WIDTH, 1);
            hits.push(rect, Hit::Element(row.id.clone()));
            rows.push(rect);
            y += 1;
        }
        let hidden = panel.rows.len().saturating_sub(panel.max_visible);
        if hidden > 0 {
            self.text(LEFT + 2, y, &format!("… ещё {}", hidden), Tone::Muted)?;
            y += 1;
        }

        let panel_rect = Rect::new(LEFT, panel_top, FIELD_WIDTH, y - panel_top);
        Ok((y, DropdownLayout::new(wrapper).with_panel(panel_rect, rows)))
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
