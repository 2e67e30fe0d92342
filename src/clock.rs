use chrono::{Local, Timelike};

/// Format a 24-hour clock reading as `H:MM AM/PM`.
pub fn format_clock(hour: u32, minute: u32) -> String {
    let ampm = if hour >= 12 { "PM" } else { "AM" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour}:{minute:02} {ampm}")
}

/// Current local time, ready to print under a message bubble.
pub fn current_time() -> String {
    let now = Local::now();
    format_clock(now.hour(), now.minute())
}
