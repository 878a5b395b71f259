// Test utility module for method-profiles integration tests
#![allow(dead_code)]

use method_profiles::{MethodProfiles, MethodTable};
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const MAIN_HEADER: &str =
    "index,name,appear100,appear#,avg_call,avg_order,avg_rank100,min_api_level";

/// Write profile contents to a temporary CSV file
pub fn write_profile(contents: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(contents.as_bytes()).unwrap();
    temp
}

/// Write raw profile bytes to a temporary CSV file
pub fn write_profile_bytes(contents: &[u8]) -> NamedTempFile {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(contents).unwrap();
    temp
}

/// Parse in-memory profile contents, panicking on failure
pub fn parse_profile(contents: &str, table: &MethodTable) -> MethodProfiles {
    let mut profiles = MethodProfiles::new();
    profiles
        .parse_stats_reader(Cursor::new(contents), Path::new("fixture.csv"), table)
        .unwrap();
    profiles
}
