//! ctime-style separator timestamps: `Www Mmm DD HH:MM:SS YYYY`.
//!
//! The layout is fixed-width. The day may be zero- or space-padded. Names are
//! matched ASCII case-insensitively; the weekday is not cross-checked against
//! the date.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Length of a ctime timestamp in bytes.
pub const CTIME_LEN: usize = 24;

const WEEKDAYS: [&[u8; 3]; 7] = [b"Mon", b"Tue", b"Wed", b"Thu", b"Fri", b"Sat", b"Sun"];

const MONTHS: [&[u8; 3]; 12] = [
    b"Jan", b"Feb", b"Mar", b"Apr", b"May", b"Jun", b"Jul", b"Aug", b"Sep", b"Oct", b"Nov",
    b"Dec",
];

/// True if `input` is exactly one valid ctime timestamp.
pub fn is_ctime(input: &[u8]) -> bool {
    parse_ctime(input).is_some()
}

/// Parse a ctime timestamp into a calendar date and time.
pub fn parse_ctime(input: &[u8]) -> Option<NaiveDateTime> {
    let input: &[u8; CTIME_LEN] = input.try_into().ok()?;
    if input[3] != b' '
        || input[7] != b' '
        || input[10] != b' '
        || input[13] != b':'
        || input[16] != b':'
        || input[19] != b' '
    {
        return None;
    }

    lookup(&WEEKDAYS, &input[0..3])?;
    let month = lookup(&MONTHS, &input[4..7])? + 1;
    let day = match input[8] {
        b' ' => digits(&input[9..10])?,
        _ => digits(&input[8..10])?,
    };
    let hour = digits(&input[11..13])?;
    let minute = digits(&input[14..16])?;
    let second = digits(&input[17..19])?;
    let year = digits(&input[20..24])?;

    let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(date.and_time(time))
}

fn lookup(names: &[&[u8; 3]], value: &[u8]) -> Option<u32> {
    let index = names
        .iter()
        .position(|name| name.eq_ignore_ascii_case(value))?;
    u32::try_from(index).ok()
}

fn digits(value: &[u8]) -> Option<u32> {
    value.iter().try_fold(0u32, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
    })
}
