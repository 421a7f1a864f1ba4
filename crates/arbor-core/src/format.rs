//! Formatting for the size and date columns.

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Format a byte count in 1024 units (e.g. "512 B", "12.3 KB").
///
/// Directories show "--".
pub fn format_size(bytes: u64, is_dir: bool) -> String {
    if is_dir {
        return "--".to_string();
    }
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Parsed `YYYY-MM-DD HH:MM:SS` timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Stamp {
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

fn parse_stamp(s: &str) -> Option<Stamp> {
    let (date, time) = s.trim().split_once(' ')?;
    let mut d = date.splitn(3, '-').map(|p| p.parse::<u32>().ok());
    let mut t = time.splitn(3, ':').map(|p| p.parse::<u32>().ok());
    let stamp = Stamp {
        year: d.next()??,
        month: d.next()??,
        day: d.next()??,
        hour: t.next()??,
        minute: t.next()??,
    };
    ((1..=12).contains(&stamp.month) && stamp.hour < 24 && stamp.minute < 60).then_some(stamp)
}

fn clock(hour: u32, minute: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", h12, minute, suffix)
}

/// Format a modification time relative to `today` (`YYYY-MM-DD`).
///
/// "Today at 3:04 PM" for today, "Jan 5, 2024 at 3:04 PM" otherwise.
/// Unparseable input is returned unchanged.
pub fn format_modified(modified: &str, today: &str) -> String {
    let Some(stamp) = parse_stamp(modified) else {
        return modified.to_string();
    };
    let time = clock(stamp.hour, stamp.minute);
    if modified.trim().starts_with(today.trim()) && !today.trim().is_empty() {
        format!("Today at {}", time)
    } else {
        format!(
            "{} {}, {} at {}",
            MONTHS[stamp.month as usize - 1],
            stamp.day,
            stamp.year,
            time
        )
    }
}

/// Item count for the status bar ("1 item", "3 items").
pub fn format_count(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", count)
    }
}
