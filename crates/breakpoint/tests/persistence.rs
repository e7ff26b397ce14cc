//! Close/reopen and save/restore cycles across registries.

use std::sync::Arc;

use serde_json::json;
use waymark_breakpoint::record::field;
use waymark_breakpoint::{
	Breakpoint, BreakpointConfig, BreakpointError, BreakpointRegistry, KindTag, LineTable,
	NOT_FOUND, Record, RecordError, UniqueId,
};

fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::TRACE)
		.try_init();
}

fn fresh_registry() -> BreakpointRegistry {
	BreakpointRegistry::new(&BreakpointConfig::default().registry)
}

#[test]
fn plain_breakpoint_survives_a_session_restart() {
	init_tracing();
	let file = UniqueId::parse("F1").unwrap();

	let session = fresh_registry();
	let bp = Breakpoint::create(&session, KindTag::Plain, file.clone(), 42).unwrap();
	let record = bp.to_record();
	let id = bp.unique_id().clone();

	let mut expected = Record::new();
	expected.insert(field::FILE, "F1");
	expected.insert(field::LINE_NUMBER, 42);
	expected.insert(field::KIND, 1);
	expected.insert(field::UNIQUE_ID, id.as_str());
	assert_eq!(record, expected);

	// A fresh registry stands in for a new process reading the saved record.
	let restarted = fresh_registry();
	let first = Breakpoint::from_record(&restarted, &record).unwrap();
	let second = Breakpoint::from_record(&restarted, &record).unwrap();
	assert!(Arc::ptr_eq(&first, &second));
	assert_eq!(first.unique_id(), &id);
	assert_eq!(first.file_id(), &file);
	assert_eq!(first.current_line(None), 42);
	assert_eq!(restarted.live_count(), 1);
}

#[test]
fn reopening_a_file_finds_the_same_breakpoint() {
	init_tracing();
	let reg = fresh_registry();
	let bp = Breakpoint::create(&reg, KindTag::Conditional, UniqueId::mint(), 10).unwrap();
	bp.set_data(Some(json!("i == 3")));

	// The closed file kept only the record; the debugger panel kept the instance.
	let saved = bp.to_record();
	let reopened = Breakpoint::from_record(&reg, &saved).unwrap();
	assert!(Arc::ptr_eq(&bp, &reopened));
	assert_eq!(reopened.data(), Some(json!("i == 3")));
}

#[test]
fn views_disagree_until_master_line_is_saved() {
	init_tracing();
	let reg = fresh_registry();
	let bp = Breakpoint::create(&reg, KindTag::Plain, UniqueId::mint(), 20).unwrap();

	let mut editor = LineTable::new();
	editor.set(bp.unique_id().clone(), 20);
	editor.shift_from(5, 3);
	let disassembly = LineTable::new();

	assert_eq!(bp.current_line(Some(&editor)), 23);
	assert_eq!(bp.current_line(Some(&disassembly)), NOT_FOUND);
	assert_eq!(bp.current_line(None), 20);

	bp.set_master_line(bp.current_line(Some(&editor)));
	assert_eq!(bp.current_line(None), 23);
	assert_eq!(bp.to_record().get(field::LINE_NUMBER), Some(&json!(23)));
}

#[test]
fn released_breakpoint_is_rebuilt_from_its_record() {
	init_tracing();
	let reg = fresh_registry();
	let bp = Breakpoint::create(&reg, KindTag::TracePoint, UniqueId::mint(), 5).unwrap();
	bp.set_disabled(true);
	let record = bp.to_record();
	let before = bp.snapshot();
	drop(bp);

	assert_eq!(reg.live_count(), 0);
	let rebuilt = Breakpoint::from_record(&reg, &record).unwrap();
	assert_eq!(rebuilt.snapshot(), before);
	assert!(rebuilt.disabled());
}

#[test]
fn malformed_record_leaves_registry_untouched() {
	init_tracing();
	let reg = fresh_registry();
	let mut record = Record::new();
	record.insert(field::FILE, "F1");
	record.insert(field::KIND, 1);

	let err = Breakpoint::from_record(&reg, &record).unwrap_err();
	assert_eq!(
		err,
		BreakpointError::MalformedRecord(RecordError::Missing(field::UNIQUE_ID))
	);
	assert_eq!(reg.live_count(), 0);
}

#[test]
fn global_registry_resolves_across_callers() {
	init_tracing();
	let global = BreakpointRegistry::global();
	let bp = Breakpoint::create(global, KindTag::SkipPoint, UniqueId::mint(), 8).unwrap();

	let record = bp.to_record();
	let again = Breakpoint::from_record(BreakpointRegistry::global(), &record).unwrap();
	assert!(Arc::ptr_eq(&bp, &again));
}
