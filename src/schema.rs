use log::debug;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;
use crate::tag::TagSettings;

/// A database backend, as named by its driver.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum Dialect {
  MySql,
  Postgres,
  Sqlite,
  SqlServer,
  Other(String),
}

impl Dialect {
  pub fn from_name(name: &str) -> Dialect {
    match name {
      "mysql" => Dialect::MySql,
      "postgres" => Dialect::Postgres,
      "sqlite" => Dialect::Sqlite,
      "sqlserver" => Dialect::SqlServer,
      other => Dialect::Other(other.to_string()),
    }
  }

  pub fn name(&self) -> &str {
    match self {
      Dialect::MySql => "mysql",
      Dialect::Postgres => "postgres",
      Dialect::Sqlite => "sqlite",
      Dialect::SqlServer => "sqlserver",
      Dialect::Other(name) => name,
    }
  }
}

impl FromStr for Dialect {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Dialect::from_name(s))
  }
}

impl fmt::Display for Dialect {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Column type metadata for an ORM or migration layer.
pub trait DataType {
  /// The logical type name, independent of the backend.
  fn data_type() -> &'static str;

  /// The physical column type for `dialect`. Unknown dialects get a default.
  fn db_data_type(dialect: &Dialect, tags: &TagSettings) -> String;
}

#[derive(Clone)]
pub struct ColumnSchema {
  pub name: String,
  pub data_type: &'static str,
  pub tags: TagSettings,
  db_data_type: fn(&Dialect, &TagSettings) -> String,
}

impl fmt::Debug for ColumnSchema {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("ColumnSchema")
      .field("name", &self.name)
      .field("data_type", &self.data_type)
      .field("tags", &self.tags)
      .finish()
  }
}

impl ColumnSchema {
  pub fn of<W: DataType>(name: impl Into<String>, tag: &str) -> Result<ColumnSchema, SchemaError> {
    Ok(ColumnSchema {
      name: name.into(),
      data_type: W::data_type(),
      tags: TagSettings::parse(tag)?,
      db_data_type: W::db_data_type,
    })
  }

  pub fn db_data_type(&self, dialect: &Dialect) -> String {
    (self.db_data_type)(dialect, &self.tags)
  }

  pub fn is_primary_key(&self) -> bool {
    self.tags.contains("PRIMARYKEY") || self.tags.contains("PRIMARY_KEY")
  }

  pub fn is_nullable(&self) -> bool {
    !self.is_primary_key() && !self.tags.contains("NOT NULL")
  }

  pub fn definition(&self, dialect: &Dialect) -> String {
    let mut definition = format!("{} {}", self.name, self.db_data_type(dialect));

    if self.is_primary_key() {
      definition.push_str(" PRIMARY KEY");
    } else if !self.is_nullable() {
      definition.push_str(" NOT NULL");
    }

    if self.tags.contains("UNIQUE") || self.tags.contains("UNIQUEINDEX") {
      definition.push_str(" UNIQUE");
    }

    if let Some(default) = self.tags.get("DEFAULT") {
      definition.push_str(" DEFAULT ");
      definition.push_str(default);
    }

    definition
  }
}

#[derive(Debug, Clone)]
pub struct TableSchema {
  name: String,
  columns: Vec<ColumnSchema>,
}

impl TableSchema {
  pub fn new(name: impl Into<String>, columns: &[ColumnSchema]) -> TableSchema {
    TableSchema {
      name: name.into(),
      columns: columns.to_vec(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn columns(&self) -> &[ColumnSchema] {
    &self.columns
  }

  pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
    self.columns.iter().find(|column| column.name == name)
  }

  pub fn create_table_sql(&self, dialect: &Dialect) -> String {
    let definitions = self
      .columns
      .iter()
      .map(|column| {
        let definition = column.definition(dialect);
        debug!("{}.{} on {}: {}", self.name, column.name, dialect, definition);
        definition
      })
      .collect::<Vec<_>>();

    format!("CREATE TABLE {} ({})", self.name, definitions.join(", "))
  }
}
