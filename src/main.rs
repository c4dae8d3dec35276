use chrono::{TimeZone, Utc};
use clap::Parser;
use log::info;
use serde::Serialize;
use std::error::Error;

use nihil::{
  unmarshal, ColumnSchema, Dialect, Nil, NilBool, NilByte, NilFloat64, NilInt32,
  NilInt64, NilString, NilTime, Nullable, Primitive, TableSchema,
};

mod cli;
use cli::{Cli, Commands};

#[derive(Serialize)]
struct User {
  id: u32,
  name: NilString,
  email: NilString,
  age: NilInt32,
  score: NilFloat64,
  is_active: NilBool,
  level: NilByte,
  points: NilInt64,
  last_login_at: NilTime,
}

fn demo_users() -> Vec<User> {
  let login = Utc.with_ymd_and_hms(2023, 10, 15, 14, 30, 0).single();

  vec![
    User {
      id: 1,
      name: NilString::new("Alice Johnson".to_string()),
      email: NilString::new("alice@example.com".to_string()),
      age: NilInt32::new(28),
      score: NilFloat64::new(95.5),
      is_active: NilBool::new(true),
      level: NilByte::new(5),
      points: NilInt64::new(1500),
      last_login_at: NilTime::from(login),
    },
    User {
      id: 2,
      name: NilString::new("Bob Smith".to_string()),
      email: NilString::null(),
      age: NilInt32::null(),
      score: NilFloat64::new(88.0),
      is_active: NilBool::null(),
      level: NilByte::null(),
      points: NilInt64::new(500),
      last_login_at: NilTime::null(),
    },
    User {
      id: 3,
      name: NilString::new("Charlie Brown".to_string()),
      email: NilString::new("charlie@example.com".to_string()),
      age: NilInt32::new(35),
      score: NilFloat64::null(),
      is_active: NilBool::new(false),
      level: NilByte::new(1),
      points: NilInt64::null(),
      last_login_at: NilTime::null(),
    },
  ]
}

fn users_table() -> Result<TableSchema, Box<dyn Error>> {
  Ok(TableSchema::new(
    "users",
    &[
      ColumnSchema::of::<NilInt64>("id", "primaryKey")?,
      ColumnSchema::of::<NilString>("name", "size:100;not null")?,
      ColumnSchema::of::<NilString>("email", "size:255;uniqueIndex")?,
      ColumnSchema::of::<NilInt32>("age", "check:age > 0")?,
      ColumnSchema::of::<NilFloat64>("score", "precision:2")?,
      ColumnSchema::of::<NilBool>("is_active", "default:true")?,
      ColumnSchema::of::<NilByte>("level", "")?,
      ColumnSchema::of::<NilInt64>("points", "default:0")?,
      ColumnSchema::of::<NilTime>("last_login_at", "precision:6")?,
    ],
  ))
}

fn run_json(pretty: bool) -> Result<(), Box<dyn Error>> {
  for user in demo_users() {
    let json = if pretty {
      serde_json::to_string_pretty(&user)?
    } else {
      serde_json::to_string(&user)?
    };
    println!("{}", json);
  }
  Ok(())
}

fn run_schema(dialect: &str) -> Result<(), Box<dyn Error>> {
  let dialect = Dialect::from_name(dialect);
  if let Dialect::Other(name) = &dialect {
    info!("unknown dialect {}, using default column types", name);
  }

  let table = users_table()?;
  for column in table.columns() {
    println!(
      "{:<14} {:<9} {}",
      column.name,
      column.data_type,
      column.db_data_type(&dialect)
    );
  }
  println!();
  println!("{};", table.create_table_sql(&dialect));
  Ok(())
}

fn decode<T: Primitive + std::fmt::Debug>(json: &str) -> Result<(), Box<dyn Error>> {
  let mut nil = Nil::<T>::default();
  unmarshal(&mut nil, json.as_bytes())?;

  if nil.is_present() {
    println!("present: {:?}", nil.value());
  } else {
    println!("absent");
  }
  println!("driver value: {}", nil.driver_value()?);
  Ok(())
}

fn run_decode(kind: &str, json: &str) -> Result<(), Box<dyn Error>> {
  match kind {
    "bool" => decode::<bool>(json),
    "byte" => decode::<u8>(json),
    "int16" => decode::<i16>(json),
    "int32" => decode::<i32>(json),
    "int64" => decode::<i64>(json),
    "float64" => decode::<f64>(json),
    "string" => decode::<String>(json),
    "time" => decode::<chrono::DateTime<Utc>>(json),
    other => Err(format!("unknown kind {:?}", other).into()),
  }
}

fn main() {
  env_logger::init();

  let cli = Cli::parse();
  let result = match cli.command {
    Commands::Json { pretty } => run_json(pretty),
    Commands::Schema { dialect } => run_schema(&dialect),
    Commands::Decode { kind, json } => run_decode(&kind, &json),
  };

  if let Err(e) = result {
    eprintln!("error: {}", e);
    std::process::exit(1);
  }
}
