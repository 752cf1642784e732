use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::core::error::MetaResult;

/// Package a serialized profile into the two-entry zip the installer format
/// expects: `<id>/<id>.json` holding the profile and an intentionally empty
/// `<id>/<id>.jar` placeholder the real installer populates later.
///
/// The archive is assembled in memory and only returned once the writer has
/// closed cleanly, so a failure never leaks partially written bytes.
pub fn package_zip(profile_id: &str, profile_json: &[u8]) -> MetaResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer.start_file(format!("{profile_id}/{profile_id}.json"), options)?;
    writer.write_all(profile_json)?;

    writer.start_file(format!("{profile_id}/{profile_id}.jar"), options)?;

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
