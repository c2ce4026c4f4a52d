use chrono::{DateTime, Local, TimeZone};

const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// Second-resolution stamp used in artifact file names.
pub fn file_stamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(FILE_STAMP_FORMAT).to_string()
}

pub fn now_stamp() -> String {
    file_stamp(&Local::now())
}
