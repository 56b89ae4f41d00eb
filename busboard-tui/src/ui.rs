use busboard_core::{
    clock::{HandAngles, date_label, hand_tip, time_label},
    model::{ResolvedForecast, Sky, UpcomingDeparture},
    schedule::SERVICE_ENDED,
};
use chrono::NaiveDateTime;
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        Block, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap,
        canvas::{Canvas, Circle, Line as CanvasLine},
    },
};

use crate::app::App;

pub(crate) fn draw(
    frame: &mut Frame<'_>,
    app: &App,
    now: NaiveDateTime,
    departures: &[UpcomingDeparture],
) {
    let area = frame.area();

    // Outer layout: clock + departures, weather, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(12),
            Constraint::Length(7),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [top_area, weather_area, status_area] = chunks else {
        return;
    };

    let top_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(*top_area);
    let [clock_area, bus_area] = top_chunks.as_ref() else {
        return;
    };

    draw_clock(frame, now, *clock_area);
    draw_departures(frame, departures, *bus_area);
    draw_weather(frame, app.forecast.as_ref(), *weather_area);
    draw_status(frame, app, *status_area);
}

fn draw_clock(frame: &mut Frame<'_>, now: NaiveDateTime, area: Rect) {
    let clock_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);
    let [digital_area, analog_area] = clock_chunks.as_ref() else {
        return;
    };

    let digital = Paragraph::new(vec![
        Line::from(time_label(now)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(date_label(now)).style(Style::default().fg(Color::Gray)),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Clock"));
    frame.render_widget(digital, *digital_area);

    let angles = HandAngles::at(now);
    let hands = [
        (angles.hour, 0.5, Color::White),
        (angles.minute, 0.8, Color::White),
        (angles.second, 0.9, Color::Red),
    ];

    let analog = Canvas::default()
        .block(Block::default().borders(Borders::ALL))
        .marker(Marker::Braille)
        .x_bounds([-1.1, 1.1])
        .y_bounds([-1.1, 1.1])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 1.0,
                color: Color::DarkGray,
            });
            for (degrees, length, color) in hands {
                let (x2, y2) = hand_tip(degrees, length);
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2,
                    y2,
                    color,
                });
            }
        });
    frame.render_widget(analog, *analog_area);
}

fn draw_departures(frame: &mut Frame<'_>, departures: &[UpcomingDeparture], area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Bus");

    let Some((next, later)) = departures.split_first() else {
        let paragraph = Paragraph::new(SERVICE_ENDED)
            .style(Style::default().fg(Color::Gray))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![
        Line::from("NEXT").style(Style::default().fg(Color::Yellow)),
        Line::from(next.departure.to_string()).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(next.countdown.long_label()).style(Style::default().fg(Color::Cyan)),
    ];

    if !later.is_empty() {
        lines.push(Line::from("─".repeat(usize::from(area.width.saturating_sub(2)))));
        lines.extend(later.iter().map(|upcoming| {
            Line::from(vec![
                Span::styled(
                    format!("{:>5}", upcoming.departure.to_string()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    upcoming.countdown.short_label(),
                    Style::default().fg(Color::Gray),
                ),
            ])
        }));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn draw_weather(frame: &mut Frame<'_>, forecast: Option<&ResolvedForecast>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Weather");

    let Some(forecast) = forecast else {
        let paragraph = Paragraph::new("Waiting for the first forecast…")
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let rows = [
        (
            "今日",
            forecast.today.sky(),
            forecast.today.condition_label(),
            forecast.today.temperature_label(),
        ),
        (
            "明日",
            forecast.tomorrow.sky(),
            forecast.tomorrow.condition_label(),
            forecast.tomorrow.range_label(),
        ),
        (
            "明後日",
            forecast.day_after.sky(),
            forecast.day_after.condition_label(),
            forecast.day_after.range_label(),
        ),
    ]
    .into_iter()
    .map(|(day, sky, condition, temperature)| {
        Row::new(vec![
            Cell::from(day),
            Cell::from(sky_glyph(sky)).style(Style::default().fg(sky_color(sky))),
            Cell::from(condition.to_owned()),
            Cell::from(temperature),
        ])
    });

    let column_widths = [
        Constraint::Length(8),
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, column_widths)
        .block(block)
        .column_spacing(1);
    frame.render_widget(table, area);
}

fn draw_status(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Status");

    if !app.progress.is_done() {
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(app.progress.percent)
            .label(app.progress.message);
        frame.render_widget(gauge, area);
        return;
    }

    let nav_hint = "r refresh weather · q/Esc/Ctrl-C quit";
    let updated = app.forecast_updated.map_or_else(
        || "Weather not loaded".to_owned(),
        |at| format!("Weather updated {}", at.format("%H:%M")),
    );

    let status_text = if app.is_refreshing() {
        format!("Refreshing… · {updated} · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {updated} · {nav_hint}")
    } else {
        format!("{updated} · {nav_hint}")
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_refreshing() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(block)
        .style(status_style)
        .wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

fn sky_glyph(sky: Sky) -> &'static str {
    match sky {
        Sky::Sunny => "☀",
        Sky::Snow => "❄",
        Sky::Thunder => "⚡",
        Sky::Rain => "☂",
        Sky::Cloudy => "☁",
        Sky::PartlyCloudy => "⛅",
        Sky::Unknown => "?",
    }
}

fn sky_color(sky: Sky) -> Color {
    match sky {
        Sky::Sunny => Color::Rgb(255, 170, 0),
        Sky::Snow => Color::White,
        Sky::Thunder => Color::Rgb(255, 215, 0),
        Sky::Rain => Color::Rgb(77, 166, 255),
        Sky::Cloudy => Color::Rgb(170, 170, 170),
        Sky::PartlyCloudy | Sky::Unknown => Color::Rgb(221, 221, 221),
    }
}
