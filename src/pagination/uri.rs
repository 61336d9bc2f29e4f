//! Navigation links, relative query strings the caller appends to its own
//! base path.

use url::form_urlencoded::Serializer;

use super::{cursor::Cursor, options::Options};

fn generate_uri(limit_key: &str, limit: i64, key: &str, value: i64) -> String {
    let query = Serializer::new(String::new())
        .append_pair(limit_key, &limit.to_string())
        .append_pair(key, &value.to_string())
        .finish();
    format!("?{}", query)
}

/// `?<limit_key>=<limit>&<offset_key>=<offset>`
pub fn generate_offset_uri(limit: i64, offset: i64, options: &Options) -> String {
    generate_uri(&options.limit_key, limit, &options.offset_key, offset)
}

/// `?<limit_key>=<limit>&<cursor_key>=<cursor>`, date cursors being
/// encoded as Unix seconds.
pub fn generate_cursor_uri(limit: i64, cursor: &Cursor, options: &Options) -> String {
    generate_uri(
        &options.limit_key,
        limit,
        &options.cursor.key,
        cursor.query_value(),
    )
}
