use std::str::FromStr;

use anyhow::anyhow;
use log::warn;
use serde::{Deserialize, Serialize};

use super::error::{PaginationError, Result};

/// Default number of items per page.
pub const DEFAULT_LIMIT: i64 = 20;
/// Default query string key for the limit.
pub const DEFAULT_LIMIT_KEY: &str = "limit";
/// Default query string key for the offset.
pub const DEFAULT_OFFSET_KEY: &str = "offset";
/// Default query string key for the cursor.
pub const DEFAULT_CURSOR_KEY: &str = "since";
/// Default cursor column name.
pub const DEFAULT_CURSOR_DB_FIELD: &str = "id";
/// Default cursor field name on items.
pub const DEFAULT_CURSOR_STRUCT_FIELD: &str = "id";

/// What a cursor value designates: an integer identifier or a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorMode {
    #[default]
    Id,
    Date,
}

impl FromStr for CursorMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "date" => Ok(Self::Date),
            other => Err(anyhow!("Unknown cursor mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorOptions {
    pub mode: CursorMode,
    /// Query string key carrying the cursor.
    pub key: String,
    /// Column the store filters on.
    pub db_field: String,
    /// Field read from the last item to build the next cursor.
    pub struct_field: String,
    /// Walk the field in descending order (`<` instead of `>`).
    pub reverse: bool,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            mode: CursorMode::Id,
            key: DEFAULT_CURSOR_KEY.to_string(),
            db_field: DEFAULT_CURSOR_DB_FIELD.to_string(),
            struct_field: DEFAULT_CURSOR_STRUCT_FIELD.to_string(),
            reverse: false,
        }
    }
}

/// Paginator options.
///
/// Shared read-only between a paginator and every page derived from it.
/// Use [`Options::builder`] to get a validated instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub default_limit: i64,
    /// Upper bound applied to requested limits, `0` means unbounded.
    pub max_limit: i64,
    pub limit_key: String,
    pub offset_key: String,
    pub cursor: CursorOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: 0,
            limit_key: DEFAULT_LIMIT_KEY.to_string(),
            offset_key: DEFAULT_OFFSET_KEY.to_string(),
            cursor: CursorOptions::default(),
        }
    }
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_limit <= 0 {
            return Err(PaginationError::invalid_options(format!(
                "default limit must be positive, got {}",
                self.default_limit
            )));
        }
        if self.max_limit < 0 {
            return Err(PaginationError::invalid_options(format!(
                "max limit must be zero or positive, got {}",
                self.max_limit
            )));
        }
        for (name, key) in [
            ("limit key", &self.limit_key),
            ("offset key", &self.offset_key),
            ("cursor key", &self.cursor.key),
            ("cursor db field", &self.cursor.db_field),
            ("cursor struct field", &self.cursor.struct_field),
        ] {
            if key.is_empty() {
                return Err(PaginationError::invalid_options(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }
        if self.max_limit > 0 && self.max_limit < self.default_limit {
            warn!(
                "Max limit {} is lower than default limit {}",
                self.max_limit, self.default_limit
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    pub fn default_limit(mut self, limit: i64) -> Self {
        self.options.default_limit = limit;
        self
    }

    pub fn max_limit(mut self, limit: i64) -> Self {
        self.options.max_limit = limit;
        self
    }

    pub fn limit_key(mut self, key: impl Into<String>) -> Self {
        self.options.limit_key = key.into();
        self
    }

    pub fn offset_key(mut self, key: impl Into<String>) -> Self {
        self.options.offset_key = key.into();
        self
    }

    pub fn cursor_key(mut self, key: impl Into<String>) -> Self {
        self.options.cursor.key = key.into();
        self
    }

    pub fn cursor_mode(mut self, mode: CursorMode) -> Self {
        self.options.cursor.mode = mode;
        self
    }

    pub fn cursor_db_field(mut self, field: impl Into<String>) -> Self {
        self.options.cursor.db_field = field.into();
        self
    }

    pub fn cursor_struct_field(mut self, field: impl Into<String>) -> Self {
        self.options.cursor.struct_field = field.into();
        self
    }

    pub fn cursor_reverse(mut self, reverse: bool) -> Self {
        self.options.cursor.reverse = reverse;
        self
    }

    pub fn build(self) -> Result<Options> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.default_limit, 20);
        assert_eq!(options.max_limit, 0);
        assert_eq!(options.limit_key, "limit");
        assert_eq!(options.offset_key, "offset");
        assert_eq!(options.cursor.key, "since");
        assert_eq!(options.cursor.db_field, "id");
        assert_eq!(options.cursor.mode, CursorMode::Id);
        assert!(!options.cursor.reverse);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = Options::builder()
            .default_limit(40)
            .max_limit(100)
            .limit_key("perpage")
            .offset_key("skip")
            .cursor_key("after")
            .cursor_mode(CursorMode::Date)
            .cursor_db_field("created_at")
            .cursor_struct_field("created_at")
            .cursor_reverse(true)
            .build()
            .unwrap();

        assert_eq!(
            options,
            Options {
                default_limit: 40,
                max_limit: 100,
                limit_key: "perpage".to_string(),
                offset_key: "skip".to_string(),
                cursor: CursorOptions {
                    mode: CursorMode::Date,
                    key: "after".to_string(),
                    db_field: "created_at".to_string(),
                    struct_field: "created_at".to_string(),
                    reverse: true,
                },
            }
        );
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        assert!(matches!(
            Options::builder().default_limit(0).build(),
            Err(PaginationError::InvalidOptions { .. })
        ));
        assert!(matches!(
            Options::builder().max_limit(-5).build(),
            Err(PaginationError::InvalidOptions { .. })
        ));
        assert!(matches!(
            Options::builder().limit_key("").build(),
            Err(PaginationError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn test_max_limit_below_default_is_accepted() {
        let options = Options::builder()
            .default_limit(50)
            .max_limit(10)
            .build()
            .unwrap();
        assert_eq!(options.max_limit, 10);
    }

    #[test]
    fn test_cursor_mode_from_str() {
        assert_eq!("id".parse::<CursorMode>().unwrap(), CursorMode::Id);
        assert_eq!("DATE".parse::<CursorMode>().unwrap(), CursorMode::Date);
        assert!("uuid".parse::<CursorMode>().is_err());
    }
}
