use deadpool_postgres::{Config as PostgresConfig, ManagerConfig, RecyclingMethod};
use dotenvy::var;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use structstruck::strike;

use crate::pagination::{
    CursorMode, Options, Result as PaginationResult, DEFAULT_CURSOR_DB_FIELD, DEFAULT_LIMIT,
};

pub static CONFIG: Lazy<Config> = Lazy::new(Config::new);

strike! {
    #[strikethrough[derive(Debug, Clone, Serialize, Deserialize, Default)]]
    pub struct Config {
        pub postgres:
            pub struct {
                pub host: String,
                pub username: String,
                pub password: String,
                pub db: String,
            }
        ,
        pub paging:
            pub struct {
                pub table: String,
                pub order: Option<String>,
                pub default_limit: i64,
                pub max_limit: i64,
                pub cursor_mode: CursorMode,
                pub cursor_field: String,
                pub cursor_reverse: bool,
            }
        ,
        pub port: u16,
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            postgres: Postgres {
                host: var("POSTGRES_HOST").expect("POSTGRES_HOST must be set"),
                username: var("POSTGRES_USERNAME").expect("POSTGRES_USERNAME must be set"),
                password: var("POSTGRES_PASSWORD").expect("POSTGRES_PASSWORD must be set"),
                db: var("POSTGRES_DB").expect("POSTGRES_DB must be set"),
            },
            paging: Paging {
                table: var("PAGING_TABLE").unwrap_or("items".to_string()),
                order: var("PAGING_ORDER").ok().filter(|order| !order.is_empty()),
                default_limit: var("PAGING_DEFAULT_LIMIT")
                    .map(|limit| limit.parse().expect("PAGING_DEFAULT_LIMIT must be a number"))
                    .unwrap_or(DEFAULT_LIMIT),
                max_limit: var("PAGING_MAX_LIMIT")
                    .map(|limit| limit.parse().expect("PAGING_MAX_LIMIT must be a number"))
                    .unwrap_or_default(),
                cursor_mode: var("PAGING_CURSOR_MODE")
                    .map(|mode| mode.parse().expect("PAGING_CURSOR_MODE must be id or date"))
                    .unwrap_or_default(),
                cursor_field: var("PAGING_CURSOR_FIELD")
                    .unwrap_or(DEFAULT_CURSOR_DB_FIELD.to_string()),
                cursor_reverse: var("PAGING_CURSOR_REVERSE")
                    .map(|reverse| reverse == "true" || reverse == "1")
                    .unwrap_or_default(),
            },
            port: var("PORT")
                .unwrap_or("8080".to_string())
                .parse()
                .expect("PORT must be a number"),
        }
    }

    pub fn postgres_config(&self) -> PostgresConfig {
        self.into()
    }

    /// Pagination options for the served table. Rows are JSON objects keyed
    /// by column name, so the cursor is read back from the column it filters on.
    pub fn paging_options(&self) -> PaginationResult<Options> {
        Options::builder()
            .default_limit(self.paging.default_limit)
            .max_limit(self.paging.max_limit)
            .cursor_mode(self.paging.cursor_mode)
            .cursor_db_field(self.paging.cursor_field.as_str())
            .cursor_struct_field(self.paging.cursor_field.as_str())
            .cursor_reverse(self.paging.cursor_reverse)
            .build()
    }
}

impl From<&Config> for PostgresConfig {
    fn from(val: &Config) -> Self {
        PostgresConfig {
            host: Some(val.postgres.host.to_string()),
            user: Some(val.postgres.username.to_string()),
            password: Some(val.postgres.password.to_string()),
            dbname: Some(val.postgres.db.to_string()),
            manager: Some(ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            }),
            ..Default::default()
        }
    }
}
