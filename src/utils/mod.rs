mod perf;
mod time_utils;

pub use time_utils::{TimeUtils, epoch_sec_to_hm, epoch_sec_to_utc, now_timestamp_sec};
