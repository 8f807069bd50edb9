//! Event loop: routes terminal input to the focused widget and the document.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEventKind};
use dropdown::config::DropdownConfig;
use dropdown::events::{EventResult, Key, KeyEvent, PointerEvent};
use dropdown::layout::Point;

use crate::error::TuiError;
use crate::form::{Field, PassengerForm};
use crate::render::{Hit, HitMap, Screen};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct App {
    form: PassengerForm,
    focus: Field,
    hits: HitMap,
    running: bool,
}

impl App {
    pub fn new(config: DropdownConfig) -> Self {
        Self {
            form: PassengerForm::new(config),
            focus: Field::default(),
            hits: HitMap::default(),
            running: true,
        }
    }

    pub fn run(mut self) -> Result<(), TuiError> {
        let mut screen = Screen::new()?;
        log::info!("dropdown-tui started");

        while self.running {
            self.form.sync();
            self.hits = screen.draw(&self.form, self.focus)?;
            for event in screen.poll(POLL_INTERVAL)? {
                self.handle(event);
                log::trace!("form after event: {}", self.form.snapshot());
            }
        }

        self.form.unmount();
        log::info!("dropdown-tui stopped: {:?}", self.form.passenger.get());
        Ok(())
    }

    fn handle(&mut self, event: CrosstermEvent) {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                self.on_key(KeyEvent::from(key));
            }
            CrosstermEvent::Mouse(mouse) => {
                if let MouseEventKind::Down(button) = mouse.kind {
                    let mut event = self.pointer_event(Point::new(mouse.column, mouse.row));
                    event.button = button.into();
                    self.on_press(event);
                }
            }
            _ => {}
        }
    }

    fn on_key(&mut self, event: KeyEvent) {
        match event.key {
            Key::Char('c') if event.modifiers.ctrl => return self.quit(),
            Key::Char('q') if self.focus != Field::Station => return self.quit(),
            Key::Tab => {
                self.focus = self.focus.next();
                return;
            }
            Key::BackTab => {
                self.focus = self.focus.prev();
                return;
            }
            _ => {}
        }

        let result = match self.focus {
            Field::Sex => self.form.sex.on_key(&event),
            Field::Category => match event.key {
                Key::Char(' ') => {
                    self.form.category.click_trigger();
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            Field::Station => self.form.station.on_key(&event),
        };

        if result == EventResult::Ignored {
            self.form.document.dispatch_key(&event);
        }
    }

    /// Build a pointer event, targeted when the press landed on a drawn element.
    fn pointer_event(&self, position: Point) -> PointerEvent {
        match self.hits.at(position) {
            Some(Hit::Element(id)) => PointerEvent::on(id.clone(), position.x, position.y),
            _ => PointerEvent::at(position.x, position.y),
        }
    }

    fn on_press(&mut self, event: PointerEvent) {
        if let Some(Hit::Entry(option)) = self.hits.at(event.position) {
            self.focus = Field::Sex;
            if let Err(e) = self.form.sex.select(option) {
                log::warn!("{}", e);
            }
        } else if self.form.category.on_pointer(&event).is_consumed() {
            self.focus = Field::Category;
        } else if self.form.station.on_pointer(&event).is_consumed() {
            self.focus = Field::Station;
        }

        self.form.document.dispatch_pointer(&event);
    }

    fn quit(&mut self) {
        log::debug!("quit requested");
        self.running = false;
    }
}
