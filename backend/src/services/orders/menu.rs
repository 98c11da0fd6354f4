use chrono::{Datelike, NaiveDate, Weekday};
use common::model::menu::Menu;
use log::warn;

use crate::services::sheets::Grid;

const MENU_HEADER: &str = "Thực đơn";
/// Dishes listed under each weekday; Friday has a single set meal.
const DISHES_PER_DAY: usize = 4;

/// Extracts the dishes of `date` from the menu column of `grid`.
///
/// The menu column has a date cell (`dd/MM` or `d/M`) followed by the dishes
/// of that day, each written `N. Dish name`. Fridays list a single set meal
/// written as is.
pub fn parse_menu(grid: &Grid, date: NaiveDate) -> Menu {
    let mut menu = Menu::new();
    let Some(column) = grid
        .columns()
        .iter()
        .find(|column| column.first().is_some_and(|header| header.contains(MENU_HEADER)))
    else {
        return menu;
    };

    let long = date.format("%d/%m").to_string();
    let short = format!("{}/{}", date.day(), date.month());
    let Some(day_row) = column
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, cell)| !cell.is_empty() && (cell.contains(&long) || cell.contains(&short)))
        .map(|(row, _)| row)
    else {
        return menu;
    };

    if date.weekday() == Weekday::Fri {
        match column.get(day_row + 1) {
            Some(dish) if !dish.trim().is_empty() => {
                menu.insert(dish.clone(), String::new());
            }
            _ => warn!("No set meal listed for {long}"),
        }
        return menu;
    }

    for row in day_row + 1..=day_row + DISHES_PER_DAY {
        let Some(cell) = column.get(row) else {
            warn!("Menu for {long} is missing dish at row {row}");
            continue;
        };
        match cell.split('.').nth(1).map(str::trim) {
            Some(dish) if !dish.is_empty() => {
                menu.insert(dish.to_string(), String::new());
            }
            _ => warn!("Unnumbered menu cell {cell:?} for {long}"),
        }
    }
    menu
}
