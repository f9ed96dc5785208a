//! Pure reduction of weighing events into daily and range summaries.
//! Nothing here touches storage; handlers fetch rows and hand them in.
//! Summaries are always recomputed from raw events, never cached.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, Weekday};
use uuid::Uuid;

use crate::nutrients::MacroSet;
use crate::targets::Targets;

use super::repo::{MealType, Weighing};

/// One value per meal bucket.
#[derive(Debug, Default, Serialize)]
pub struct PerMeal<T> {
    pub breakfast: T,
    pub lunch: T,
    pub dinner: T,
    pub snack: T,
}

impl<T> PerMeal<T> {
    fn bucket_mut(&mut self, meal: MealType) -> &mut T {
        match meal {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
            MealType::Snack => &mut self.snack,
        }
    }
}

/// Diary line item as shown inside a meal bucket.
#[derive(Debug, Serialize)]
pub struct MealItem {
    pub id: Uuid,
    pub name: String,
    pub grams: f64,
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Percent of each target reached, rounded, not clamped to 100; clamping
/// is a display concern.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Percentages {
    pub kcal: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

#[derive(Debug, Serialize)]
pub struct DailySummary {
    pub date: Date,
    pub totals: MacroSet,
    pub targets: Targets,
    pub percentages: Percentages,
    pub meal_totals: PerMeal<MacroSet>,
    pub meals: PerMeal<Vec<MealItem>>,
}

fn percent(total: f64, target: i32) -> i64 {
    if target > 0 {
        (total / f64::from(target) * 100.0).round() as i64
    } else {
        0
    }
}

/// Fold one day's events into totals, per-meal subtotals and the grouped
/// line items, then derive percent-of-target from the given targets.
pub fn daily_summary(date: Date, events: &[Weighing], targets: Targets) -> DailySummary {
    let mut totals = MacroSet::ZERO;
    let mut meal_totals = PerMeal::<MacroSet>::default();
    let mut meals = PerMeal::<Vec<MealItem>>::default();

    for event in events {
        let macros = event.macros();
        totals.add(&macros);
        meal_totals.bucket_mut(event.meal).add(&macros);
        meals.bucket_mut(event.meal).push(MealItem {
            id: event.id,
            name: event.name.clone(),
            grams: event.grams,
            kcal: event.kcal,
            protein: event.protein_g,
            carbs: event.carbs_g,
            fat: event.fat_g,
        });
    }

    let totals = totals.rounded();
    let percentages = Percentages {
        kcal: percent(totals.kcal, targets.kcal),
        protein: percent(totals.protein, targets.protein),
        carbs: percent(totals.carbs, targets.carbs),
        fat: percent(totals.fat, targets.fat),
    };
    DailySummary {
        date,
        totals,
        targets,
        percentages,
        meal_totals: PerMeal {
            breakfast: meal_totals.breakfast.rounded(),
            lunch: meal_totals.lunch.rounded(),
            dinner: meal_totals.dinner.rounded(),
            snack: meal_totals.snack.rounded(),
        },
        meals,
    }
}

/// Fixed lookback windows for trend charts, all ending today inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u16")]
pub enum RangeWindow {
    #[default]
    Week,
    Month,
    Quarter,
    HalfYear,
}

impl TryFrom<u16> for RangeWindow {
    type Error = String;

    fn try_from(days: u16) -> Result<Self, Self::Error> {
        match days {
            7 => Ok(RangeWindow::Week),
            30 => Ok(RangeWindow::Month),
            90 => Ok(RangeWindow::Quarter),
            180 => Ok(RangeWindow::HalfYear),
            other => Err(format!("unsupported window: {other} days")),
        }
    }
}

impl RangeWindow {
    pub fn days(self) -> i64 {
        match self {
            RangeWindow::Week => 7,
            RangeWindow::Month => 30,
            RangeWindow::Quarter => 90,
            RangeWindow::HalfYear => 180,
        }
    }

    pub fn first_date(self, last: Date) -> Date {
        last - Duration::days(self.days() - 1)
    }
}

fn weekday_abbrev(w: Weekday) -> &'static str {
    match w {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

fn month_abbrev(m: Month) -> &'static str {
    match m {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Chart axis label; the format depends on how dense the window is.
pub fn range_label(date: Date, window: RangeWindow) -> String {
    match window {
        RangeWindow::Week => weekday_abbrev(date.weekday()).to_string(),
        RangeWindow::Month => format!("{} {}", date.day(), month_abbrev(date.month())),
        RangeWindow::Quarter | RangeWindow::HalfYear => {
            format!("{:02}/{:02}", date.day(), date.month() as u8)
        }
    }
}

/// Calendar dates of the window, oldest first. Built before any events are
/// consulted so empty days appear as zeros rather than being omitted.
pub fn window_dates(last: Date, window: RangeWindow) -> Vec<Date> {
    let mut dates = Vec::with_capacity(window.days() as usize);
    let mut d = window.first_date(last);
    while d <= last {
        dates.push(d);
        d = d + Duration::days(1);
    }
    dates
}

#[derive(Debug, Serialize, PartialEq)]
pub struct NutritionDay {
    pub date: Date,
    pub label: String,
    pub kcal: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

/// One nutrition data point per calendar day of the window, zero-filled,
/// integer-rounded at this boundary only.
pub fn nutrition_range(last: Date, window: RangeWindow, events: &[Weighing]) -> Vec<NutritionDay> {
    let dates = window_dates(last, window);
    dates
        .into_iter()
        .map(|date| {
            let mut sum = MacroSet::ZERO;
            for event in events.iter().filter(|e| e.entry_date == date) {
                sum.add(&event.macros());
            }
            NutritionDay {
                date,
                label: range_label(date, window),
                kcal: sum.kcal.round() as i64,
                protein: sum.protein.round() as i64,
                carbs: sum.carbs.round() as i64,
                fat: sum.fat.round() as i64,
            }
        })
        .collect()
}

#[derive(Debug, Serialize, PartialEq)]
pub struct WaterDay {
    pub date: Date,
    pub label: String,
    pub ml: i64,
}

/// Same zero-filled series for water volume; input is (date, ml) pairs.
pub fn water_range(last: Date, window: RangeWindow, entries: &[(Date, i64)]) -> Vec<WaterDay> {
    let dates = window_dates(last, window);
    dates
        .into_iter()
        .map(|date| {
            let ml = entries
                .iter()
                .filter(|(d, _)| *d == date)
                .map(|(_, ml)| ml)
                .sum();
            WaterDay {
                date,
                label: range_label(date, window),
                ml,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::DEFAULT_TARGETS;
    use time::macros::date;
    use time::OffsetDateTime;

    fn weighing(date: Date, meal: MealType, kcal: f64, protein: f64, carbs: f64, fat: f64) -> Weighing {
        Weighing {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            product_id: None,
            user_product_id: None,
            name: "test food".into(),
            grams: 100.0,
            meal,
            kcal,
            protein_g: protein,
            carbs_g: carbs,
            fat_g: fat,
            entry_date: date,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn daily_summary_buckets_and_totals() {
        let d = date!(2026 - 08 - 20);
        let events = vec![
            weighing(d, MealType::Breakfast, 300.0, 12.5, 40.0, 8.0),
            weighing(d, MealType::Breakfast, 150.0, 5.0, 20.0, 3.5),
            weighing(d, MealType::Dinner, 550.0, 30.0, 45.0, 22.0),
        ];
        let s = daily_summary(d, &events, DEFAULT_TARGETS);

        assert_eq!(s.totals.kcal, 1000.0);
        assert_eq!(s.totals.protein, 47.5);
        assert_eq!(s.meal_totals.breakfast.kcal, 450.0);
        assert_eq!(s.meal_totals.breakfast.protein, 17.5);
        assert_eq!(s.meal_totals.lunch, MacroSet::ZERO);
        assert_eq!(s.meals.breakfast.len(), 2);
        assert_eq!(s.meals.dinner.len(), 1);
        assert!(s.meals.snack.is_empty());
    }

    #[test]
    fn percentages_against_default_targets_unclamped() {
        let d = date!(2026 - 08 - 20);
        // 2500 kcal against the 2000 default: 125%, not clamped.
        let events = vec![weighing(d, MealType::Lunch, 2500.0, 75.0, 100.0, 65.0)];
        let s = daily_summary(d, &events, DEFAULT_TARGETS);
        assert_eq!(
            s.percentages,
            Percentages {
                kcal: 125,
                protein: 50,
                carbs: 50,
                fat: 100
            }
        );
    }

    #[test]
    fn zero_target_yields_zero_percent() {
        let d = date!(2026 - 08 - 20);
        let targets = Targets {
            kcal: 0,
            ..DEFAULT_TARGETS
        };
        let events = vec![weighing(d, MealType::Snack, 100.0, 1.0, 1.0, 1.0)];
        assert_eq!(daily_summary(d, &events, targets).percentages.kcal, 0);
    }

    #[test]
    fn empty_day_is_all_zero() {
        let s = daily_summary(date!(2026 - 08 - 20), &[], DEFAULT_TARGETS);
        assert_eq!(s.totals, MacroSet::ZERO);
        assert_eq!(s.percentages.kcal, 0);
        assert!(s.meals.breakfast.is_empty());
    }

    #[test]
    fn range_zero_fills_every_window() {
        let last = date!(2026 - 08 - 26);
        for window in [
            RangeWindow::Week,
            RangeWindow::Month,
            RangeWindow::Quarter,
            RangeWindow::HalfYear,
        ] {
            let series = nutrition_range(last, window, &[]);
            assert_eq!(series.len(), window.days() as usize);
            assert!(series.iter().all(|d| d.kcal == 0));
            assert_eq!(series.last().map(|d| d.date), Some(last));
            assert_eq!(series[0].date, window.first_date(last));
        }
    }

    #[test]
    fn range_and_daily_agree_on_kcal() {
        let last = date!(2026 - 08 - 26);
        let day = date!(2026 - 08 - 23);
        let events = vec![
            weighing(day, MealType::Breakfast, 320.0, 11.2, 45.0, 9.9),
            weighing(day, MealType::Lunch, 640.0, 28.4, 70.1, 21.0),
            weighing(day, MealType::Snack, 95.0, 2.1, 12.4, 4.4),
        ];

        let daily = daily_summary(day, &events, DEFAULT_TARGETS);
        let series = nutrition_range(last, RangeWindow::Week, &events);
        let entry = series.iter().find(|e| e.date == day).unwrap();

        assert_eq!(entry.kcal, daily.totals.kcal as i64);
        // Other days in the window stay zero.
        assert!(series.iter().filter(|e| e.date != day).all(|e| e.kcal == 0));
    }

    #[test]
    fn labels_follow_window_density() {
        let d = date!(2026 - 08 - 05); // a Wednesday
        assert_eq!(range_label(d, RangeWindow::Week), "Wed");
        assert_eq!(range_label(d, RangeWindow::Month), "5 Aug");
        assert_eq!(range_label(d, RangeWindow::Quarter), "05/08");
        assert_eq!(range_label(d, RangeWindow::HalfYear), "05/08");
    }

    #[test]
    fn unsupported_window_is_rejected() {
        assert!(RangeWindow::try_from(14u16).is_err());
        assert_eq!(RangeWindow::try_from(90u16), Ok(RangeWindow::Quarter));
    }

    #[test]
    fn water_range_sums_per_day() {
        let last = date!(2026 - 08 - 26);
        let day = date!(2026 - 08 - 25);
        let entries = vec![(day, 250), (day, 500), (last, 250)];
        let series = water_range(last, RangeWindow::Week, &entries);
        assert_eq!(series.len(), 7);
        assert_eq!(series.iter().find(|e| e.date == day).unwrap().ml, 750);
        assert_eq!(series.last().unwrap().ml, 250);
    }
}
