//! Execution date helpers
//!
//! Scheduled transfers carry an execution date. It is committed as an ISO
//! `YYYY-MM-DD` value and shown to the user as `DD.MM.YYYY`.

use chrono::{Local, NaiveDate};

const ISO_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d.%m.%Y";

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local calendar date as zero-padded ISO text.
pub fn iso_today() -> String {
    to_iso(today())
}

/// Format a date as `YYYY-MM-DD`.
pub fn to_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date. Returns `None` for anything else.
pub fn parse_iso(iso: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(iso.trim(), ISO_FORMAT).ok()
}

/// Format a date as `DD.MM.YYYY`.
pub fn to_local_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// `YYYY-MM-DD` to `DD.MM.YYYY`. Empty or unparsable input yields an empty string.
pub fn iso_to_local_display(iso: &str) -> String {
    parse_iso(iso).map(to_local_display).unwrap_or_default()
}

/// Parse `D.M.YYYY` or `DD.MM.YYYY` into a calendar date.
///
/// Day/month combinations that do not exist (31.04.) are rejected rather
/// than rolled over into the next month.
pub fn parse_local_display(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('.');
    let day = parse_component(parts.next()?, 1, 2)?;
    let month = parse_component(parts.next()?, 1, 2)?;
    let year = parse_component(parts.next()?, 4, 4)?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// `D.M.YYYY` / `DD.MM.YYYY` to zero-padded `YYYY-MM-DD`.
pub fn local_display_to_iso(text: &str) -> Option<String> {
    parse_local_display(text).map(to_iso)
}

/// True if `iso` parses and is not before today. Time of day plays no role.
pub fn is_future_or_today(iso: &str) -> bool {
    is_future_or_today_at(iso, today())
}

/// Same as [`is_future_or_today`] against an explicit reference day.
pub fn is_future_or_today_at(iso: &str, reference: NaiveDate) -> bool {
    parse_iso(iso).is_some_and(|date| date >= reference)
}

fn parse_component(part: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if part.len() < min_len || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
