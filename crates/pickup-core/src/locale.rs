//! Message catalog for user-facing strings.
//!
//! Message ids are the English texts themselves, so an unknown locale or a
//! missing translation degrades to English.

use std::collections::HashMap;

/// Message ids used across the plugin.
pub mod messages {
    pub const NO_SUITABLE_POINTS: &str = "No suitable pick-up points";
    pub const EMPTY_LOCATION: &str = "Pick-up point name cannot be empty";
    pub const INVALID_RATE_ID: &str = "Pick-up point id cannot be empty or zero";
    pub const COUNTRY_ONLY_HINT: &str = "Shipping will be restricted to the selected country";
    pub const COUNTRY: &str = "Country";
    pub const COUNTRY_HINT: &str = "Country served by this shipping option";
    pub const REGION: &str = "Region";
    pub const REGION_HINT: &str = "Region served by this shipping option";
    pub const CURRENCY: &str = "Currency";
    pub const PICKUP_POINT: &str = "Pick-up point";
    pub const COST: &str = "Cost";
    pub const MAX_WEIGHT: &str = "Max weight, kg";
    pub const FREE_FROM: &str = "Free shipping from";
    pub const ZERO_MEANS_NO_LIMIT: &str = "0 means no limit";
    pub const ADD_POINT: &str = "Add pick-up point";
    pub const DELETE: &str = "Delete";
}

/// Translates message ids into the active locale.
pub trait Localizer {
    fn translate(&self, msgid: &str) -> String;
}

impl<L: Localizer + ?Sized> Localizer for &L {
    fn translate(&self, msgid: &str) -> String {
        (**self).translate(msgid)
    }
}

impl<L: Localizer + ?Sized> Localizer for std::sync::Arc<L> {
    fn translate(&self, msgid: &str) -> String {
        (**self).translate(msgid)
    }
}

/// Built-in catalog with English and Russian texts.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    entries: HashMap<&'static str, &'static str>,
}

impl Catalog {
    /// Catalog for `locale` (e.g. `"ru_RU"`). Locales without built-in
    /// translations yield the English message ids.
    #[must_use]
    pub fn for_locale(locale: &str) -> Self {
        let entries = match locale.split(['_', '-']).next() {
            Some("ru") => russian(),
            _ => HashMap::new(),
        };
        Self {
            locale: locale.to_string(),
            entries,
        }
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::for_locale("en_US")
    }
}

impl Localizer for Catalog {
    fn translate(&self, msgid: &str) -> String {
        self.entries
            .get(msgid)
            .map_or_else(|| msgid.to_string(), |s| (*s).to_string())
    }
}

fn russian() -> HashMap<&'static str, &'static str> {
    use self::messages::*;

    HashMap::from([
        (NO_SUITABLE_POINTS, "Нет подходящих пунктов выдачи"),
        (EMPTY_LOCATION, "Название пункта выдачи не может быть пустым"),
        (
            INVALID_RATE_ID,
            "Код пункта выдачи не может быть пустым или равным нулю",
        ),
        (
            COUNTRY_ONLY_HINT,
            "Доставка будет ограничена выбранной страной",
        ),
        (COUNTRY, "Страна"),
        (COUNTRY_HINT, "Страна, в которой работает способ доставки"),
        (REGION, "Регион"),
        (REGION_HINT, "Регион, в котором работает способ доставки"),
        (CURRENCY, "Валюта"),
        (PICKUP_POINT, "Пункт выдачи"),
        (COST, "Стоимость"),
        (MAX_WEIGHT, "Макс. вес, кг"),
        (FREE_FROM, "Бесплатно от"),
        (ZERO_MEANS_NO_LIMIT, "0 — без ограничения"),
        (ADD_POINT, "Добавить пункт выдачи"),
        (DELETE, "Удалить"),
    ])
}
