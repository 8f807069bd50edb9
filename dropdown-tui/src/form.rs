//! Passenger edit form: the host that owns every dropdown value.

use dropdown::config::DropdownConfig;
use dropdown::document::Document;
use dropdown::filter::filter_options;
use dropdown::state::State;
use dropdown::widgets::{CustomDropdown, DropdownWithSearch, LabeledDropdown};

pub const SEXES: [&str; 2] = ["Мужчина", "Женщина"];

pub const CATEGORIES: [&str; 4] = ["Взрослый", "Детский", "Студенческий", "Льготный"];

/// Categories shown but not selectable.
pub const LOCKED_CATEGORIES: [&str; 1] = ["Льготный"];

pub const STATIONS: [&str; 10] = [
    "Арбатская",
    "Библиотека им. Ленина",
    "Боровицкая",
    "Киевская",
    "Китай-город",
    "Курская",
    "Охотный Ряд",
    "Павелецкая",
    "Смоленская",
    "Театральная",
];

/// Form values, owned by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Passenger {
    pub sex: Option<String>,
    pub category: Option<String>,
    pub station: Option<String>,
    pub station_query: String,
}

/// Focusable fields in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Sex,
    Category,
    Station,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Sex => Field::Category,
            Field::Category => Field::Station,
            Field::Station => Field::Sex,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Sex => Field::Station,
            Field::Category => Field::Sex,
            Field::Station => Field::Category,
        }
    }
}

pub struct PassengerForm {
    pub document: Document,
    pub passenger: State<Passenger>,
    pub sex: LabeledDropdown,
    pub category: CustomDropdown,
    pub station: DropdownWithSearch,
    stations: Vec<String>,
}

impl PassengerForm {
    pub fn new(config: DropdownConfig) -> Self {
        let document = Document::new();
        let passenger = State::new(Passenger::default());
        let stations: Vec<String> = STATIONS.iter().map(|s| s.to_string()).collect();

        let sex = {
            let passenger = passenger.clone();
            LabeledDropdown::builder("Пол")
                .options(SEXES)
                .required(true)
                .config(config.clone())
                .on_change(move |v| passenger.update(|p| p.sex = Some(v.to_string())))
                .labeled()
        };

        let category = {
            let passenger = passenger.clone();
            CustomDropdown::builder("Категория")
                .id("category")
                .options(CATEGORIES)
                .disabled_options(LOCKED_CATEGORIES)
                .required(true)
                .config(config.clone())
                .on_change(move |v| passenger.update(|p| p.category = Some(v.to_string())))
                .custom(&document)
        };

        let station = {
            let on_commit = passenger.clone();
            let on_query = passenger.clone();
            DropdownWithSearch::builder("Станция")
                .id("station")
                .options(stations.iter().cloned())
                .config(config)
                .on_change(move |v| {
                    on_commit.update(|p| {
                        p.station = Some(v.to_string());
                        p.station_query.clear();
                    })
                })
                .searchable()
                .placeholder("Начните вводить название")
                .on_search_change(move |q| on_query.update(|p| p.station_query = q.to_string()))
                .build(&document)
        };

        Self {
            document,
            passenger,
            sex,
            category,
            station,
            stations,
        }
    }

    /// Push host values into the widgets after a change.
    ///
    /// Returns whether anything was synced.
    pub fn sync(&self) -> bool {
        if !self.passenger.is_dirty() {
            return false;
        }
        self.passenger.clear_dirty();

        let passenger = self.passenger.get();
        log::debug!("sync passenger form: {:?}", passenger);
        self.sex.set_value(passenger.sex);
        self.category.set_value(passenger.category);
        self.station
            .set_options(filter_options(&passenger.station_query, &self.stations));
        self.station.set_search_value(passenger.station_query);
        self.station.set_value(passenger.station);
        true
    }

    /// Render models and interaction state of every field, for the log.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "sex": self.sex.view(),
            "category": {
                "view": self.category.view(),
                "state": self.category.state(),
            },
            "station": {
                "view": self.station.view(),
                "state": self.station.state(),
            },
        })
    }

    /// Close panels and release document listeners.
    pub fn unmount(&self) {
        self.category.unmount();
        self.station.unmount();
    }
}
