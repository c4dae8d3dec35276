//! JSON encode and decode costs per kind, and for a record mixing all of them.
//!
//! Run with: cargo bench

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde::{Deserialize, Serialize};

use nihil::{
  marshal, unmarshal, NilBool, NilByte, NilFloat64, NilInt32, NilInt64, NilString, NilTime,
};

#[derive(Serialize, Deserialize)]
struct Record {
  name: NilString,
  age: NilInt32,
  score: NilFloat64,
  active: NilBool,
  created_at: NilTime,
  data: NilByte,
}

fn record() -> Record {
  Record {
    name: NilString::new("Benchmark User".to_string()),
    age: NilInt32::new(30),
    score: NilFloat64::new(95.5),
    active: NilBool::new(true),
    created_at: NilTime::from(Utc.with_ymd_and_hms(2023, 10, 15, 14, 30, 0).single()),
    data: NilByte::new(255),
  }
}

fn bench_marshal(c: &mut Criterion) {
  let mut group = c.benchmark_group("marshal");

  let text = NilString::new("benchmark test string".to_string());
  group.bench_function("string", |b| b.iter(|| marshal(black_box(&text)).unwrap()));

  let int32 = NilInt32::new(12345);
  group.bench_function("int32", |b| b.iter(|| marshal(black_box(&int32)).unwrap()));

  let int64 = NilInt64::new(9_876_543_210);
  group.bench_function("int64", |b| b.iter(|| marshal(black_box(&int64)).unwrap()));

  let float = NilFloat64::new(95.5);
  group.bench_function("float64", |b| b.iter(|| marshal(black_box(&float)).unwrap()));

  let time = record().created_at;
  group.bench_function("time", |b| b.iter(|| marshal(black_box(&time)).unwrap()));

  let absent = NilString::null();
  group.bench_function("null", |b| b.iter(|| marshal(black_box(&absent)).unwrap()));

  group.finish();
}

fn bench_unmarshal(c: &mut Criterion) {
  let mut group = c.benchmark_group("unmarshal");

  group.bench_function("string", |b| {
    b.iter(|| {
      let mut s = NilString::null();
      unmarshal(&mut s, black_box(b"\"benchmark test string\"")).unwrap();
      s
    })
  });

  group.bench_function("int32", |b| {
    b.iter(|| {
      let mut i = NilInt32::null();
      unmarshal(&mut i, black_box(b"12345")).unwrap();
      i
    })
  });

  group.bench_function("float64", |b| {
    b.iter(|| {
      let mut f = NilFloat64::null();
      unmarshal(&mut f, black_box(b"95.5")).unwrap();
      f
    })
  });

  group.bench_function("time", |b| {
    b.iter(|| {
      let mut t = NilTime::null();
      unmarshal(&mut t, black_box(b"\"2023-10-15T14:30:00Z\"")).unwrap();
      t
    })
  });

  group.bench_function("null", |b| {
    b.iter(|| {
      let mut s = NilString::null();
      unmarshal(&mut s, black_box(b"null")).unwrap();
      s
    })
  });

  group.finish();
}

fn bench_record(c: &mut Criterion) {
  let mut group = c.benchmark_group("record");

  let value = record();
  group.bench_function("serialize", |b| {
    b.iter(|| serde_json::to_vec(black_box(&value)).unwrap())
  });

  let json = serde_json::to_vec(&value).unwrap();
  group.bench_function("deserialize", |b| {
    b.iter(|| serde_json::from_slice::<Record>(black_box(&json)).unwrap())
  });

  group.finish();
}

criterion_group!(benches, bench_marshal, bench_unmarshal, bench_record);
criterion_main!(benches);
