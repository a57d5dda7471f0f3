use std::fmt;
use std::str::FromStr;

use sea_orm::DbBackend;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Database engine the client talks to, as named by `DATABASE_PROVIDER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    Mysql,
    #[default]
    Postgres,
    Sqlite,
    Mariadb,
    Mssql,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown database provider '{0}'; expected mysql/postgres/sqlite/mariadb/mssql")]
pub struct ParseDialectError(pub String);

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::Mysql,
        Dialect::Postgres,
        Dialect::Sqlite,
        Dialect::Mariadb,
        Dialect::Mssql,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Mysql => "mysql",
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
            Dialect::Mariadb => "mariadb",
            Dialect::Mssql => "mssql",
        }
    }

    /// SeaORM backend that drives this dialect, if one is compiled in.
    ///
    /// MariaDB speaks the MySQL wire protocol and shares its driver.
    pub fn backend(self) -> Option<DbBackend> {
        match self {
            Dialect::Mysql | Dialect::Mariadb => Some(DbBackend::MySql),
            Dialect::Postgres => Some(DbBackend::Postgres),
            Dialect::Sqlite => Some(DbBackend::Sqlite),
            Dialect::Mssql => None,
        }
    }

    /// URL schemes accepted for this dialect. Empty for dialects without a backend.
    pub fn schemes(self) -> &'static [&'static str] {
        match self {
            Dialect::Mysql => &["mysql"],
            Dialect::Postgres => &["postgres", "postgresql"],
            Dialect::Sqlite => &["sqlite"],
            Dialect::Mariadb => &["mariadb", "mysql"],
            Dialect::Mssql => &[],
        }
    }

    pub fn accepts_scheme(self, scheme: &str) -> bool {
        self.schemes()
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(scheme))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::Mysql),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "sqlite" => Ok(Dialect::Sqlite),
            "mariadb" => Ok(Dialect::Mariadb),
            "mssql" => Ok(Dialect::Mssql),
            _ => Err(ParseDialectError(s.to_string())),
        }
    }
}

impl Serialize for Dialect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Dialect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
