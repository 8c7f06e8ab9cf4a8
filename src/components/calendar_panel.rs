//! Calendar
//!
//! Month grid plus agenda list over the user's primary Google calendar.
//! Events come straight from the provider token captured at sign-in; without
//! one the panel shows a reconnect hint instead of data.

use chrono::{Datelike, Local, NaiveDate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{calendar, ApiError};
use crate::context::use_session;
use crate::models::CalendarEvent;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Cells of a Sunday-first month grid. Leading `None`s pad the first week.
fn month_grid(year: i32, month: u32) -> Vec<Option<NaiveDate>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let days = next_month
        .map(|n| n.signed_duration_since(first).num_days() as u32)
        .unwrap_or(0);

    let mut cells = Vec::with_capacity(42);
    for _ in 0..first.weekday().num_days_from_sunday() {
        cells.push(None);
    }
    for day in 1..=days {
        cells.push(NaiveDate::from_ymd_opt(year, month, day));
    }
    cells
}

fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 + delta;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

#[component]
pub fn CalendarPanel() -> impl IntoView {
    let session = use_session();
    let backend = StoredValue::new(session.backend().clone());

    let today = Local::now().date_naive();
    let cursor = RwSignal::new((today.year(), today.month()));
    let events = RwSignal::new(Vec::<CalendarEvent>::new());
    let missing_token = RwSignal::new(false);
    let selected = RwSignal::new(None::<CalendarEvent>);
    let list_view = RwSignal::new(false);

    spawn_local(async move {
        match calendar::fetch_events(&backend.get_value()).await {
            Ok(rows) => events.set(rows),
            Err(ApiError::MissingAuth) => missing_token.set(true),
            Err(e) => log::error!("loading calendar failed: {e}"),
        }
    });

    let events_on = move |day: NaiveDate| {
        events
            .get()
            .into_iter()
            .filter(|e| e.start_day() == Some(day))
            .collect::<Vec<_>>()
    };

    let month_label = move || {
        let (year, month) = cursor.get();
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    };

    view! {
        <div class="panel calendar">
            <div class="panel-header">
                <h2>"Calendar"</h2>
                <div class="calendar-nav">
                    <button
                        class="btn-secondary"
                        on:click=move |_| cursor.update(|c| *c = shift_month(c.0, c.1, -1))
                    >
                        "‹"
                    </button>
                    <span class="calendar-month">{month_label}</span>
                    <button
                        class="btn-secondary"
                        on:click=move |_| cursor.update(|c| *c = shift_month(c.0, c.1, 1))
                    >
                        "›"
                    </button>
                </div>
                <button
                    class="btn-secondary"
                    on:click=move |_| list_view.update(|v| *v = !*v)
                >
                    {move || if list_view.get() { "Month" } else { "List" }}
                </button>
            </div>
            <Show when=move || missing_token.get()>
                <div class="calendar-hint">
                    "Calendar access expires with the session. Sign in again to reconnect."
                </div>
            </Show>
            <Show
                when=move || !list_view.get()
                fallback=move || {
                    view! {
                        <div class="calendar-list">
                            <For
                                each=move || events.get()
                                key=|e| e.id.clone()
                                children=move |event| {
                                    let pick = event.clone();
                                    view! {
                                        <div
                                            class="calendar-list-row"
                                            on:click=move |_| selected.set(Some(pick.clone()))
                                        >
                                            <span class="event-day">
                                                {event
                                                    .start_day()
                                                    .map(|d| d.format("%b %-d").to_string())
                                                    .unwrap_or_default()}
                                            </span>
                                            <span class="event-title">
                                                {event.summary.clone().unwrap_or_default()}
                                            </span>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    }
                }
            >
                <div class="calendar-grid">
                    {WEEKDAYS
                        .iter()
                        .map(|d| view! { <div class="grid-weekday">{*d}</div> })
                        .collect_view()}
                    <For
                        each=move || {
                            let (year, month) = cursor.get();
                            month_grid(year, month).into_iter().enumerate().collect::<Vec<_>>()
                        }
                        key=|(i, cell)| (*i, *cell)
                        children=move |(_, cell)| {
                            match cell {
                                None => view! { <div class="grid-cell empty"></div> }.into_any(),
                                Some(day) => {
                                    let day_events = events_on(day);
                                    view! {
                                        <div class="grid-cell" class:today={day == today}>
                                            <span class="grid-day">{day.day()}</span>
                                            {day_events
                                                .into_iter()
                                                .map(|event| {
                                                    let pick = event.clone();
                                                    view! {
                                                        <div
                                                            class="grid-event"
                                                            on:click=move |_| {
                                                                selected.set(Some(pick.clone()))
                                                            }
                                                        >
                                                            {event.summary.clone().unwrap_or_default()}
                                                        </div>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    }
                                        .into_any()
                                }
                            }
                        }
                    />
                </div>
            </Show>
            <Show when=move || selected.get().is_some()>
                <div class="modal-backdrop" on:click=move |_| selected.set(None)>
                    <div class="modal event-detail" on:click=|ev| ev.stop_propagation()>
                        <h3>
                            {move || {
                                selected
                                    .get()
                                    .and_then(|e| e.summary)
                                    .unwrap_or_else(|| "(untitled)".into())
                            }}
                        </h3>
                        <p class="event-when">
                            {move || {
                                selected
                                    .get()
                                    .and_then(|e| e.start_day())
                                    .map(|d| d.format("%A, %b %-d, %Y").to_string())
                                    .unwrap_or_default()
                            }}
                        </p>
                        <p class="event-location">
                            {move || {
                                selected.get().and_then(|e| e.location).unwrap_or_default()
                            }}
                        </p>
                        <div class="modal-actions">
                            <button class="btn-secondary" on:click=move |_| selected.set(None)>
                                "Close"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_pads_to_first_weekday() {
        // 2026-08-01 is a Saturday.
        let cells = month_grid(2026, 8);
        assert_eq!(cells.iter().take_while(|c| c.is_none()).count(), 6);
        assert_eq!(cells[6], NaiveDate::from_ymd_opt(2026, 8, 1));
        assert_eq!(cells.len(), 6 + 31);
    }

    #[test]
    fn grid_handles_december() {
        let cells = month_grid(2026, 12);
        let days = cells.iter().flatten().count();
        assert_eq!(days, 31);
        assert_eq!(
            cells.last().copied().flatten(),
            NaiveDate::from_ymd_opt(2026, 12, 31)
        );
    }

    #[test]
    fn grid_handles_leap_february() {
        let days = month_grid(2028, 2).iter().flatten().count();
        assert_eq!(days, 29);
    }

    #[test]
    fn month_shift_wraps_year() {
        assert_eq!(shift_month(2026, 1, -1), (2025, 12));
        assert_eq!(shift_month(2026, 12, 1), (2027, 1));
        assert_eq!(shift_month(2026, 6, 1), (2026, 7));
    }
}
