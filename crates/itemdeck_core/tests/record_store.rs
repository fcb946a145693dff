use itemdeck_core::{
    AppConfig, KvRecordStore, ManualClock, MemoryKeyValueBackend, RecordDraft, RecordPatch,
    RecordStore, RecordValidationError, StoreError,
};
use std::collections::HashSet;

fn memory_store(clock: &ManualClock) -> KvRecordStore<MemoryKeyValueBackend, &ManualClock> {
    KvRecordStore::with_clock(MemoryKeyValueBackend::new(), &AppConfig::default(), clock)
}

#[test]
fn get_all_is_empty_before_first_save() {
    let clock = ManualClock::new(1_000);
    let store = memory_store(&clock);
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn creates_with_distinct_names_yield_unique_ids_in_insertion_order() {
    let clock = ManualClock::new(1_000);
    let mut store = memory_store(&clock);
    let names = ["Milk", "Bread", "Eggs", "Butter", "Jam"];
    for name in names {
        store.create(RecordDraft::new(name)).unwrap();
        clock.advance(1);
    }

    let all = store.get_all().unwrap();
    assert_eq!(all.len(), names.len());
    let ids = all.iter().map(|r| r.id.clone()).collect::<HashSet<_>>();
    assert_eq!(ids.len(), names.len());
    let stored_names = all.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
    assert_eq!(stored_names, names);
}

#[test]
fn create_normalizes_tags_and_stamps_timestamps() {
    let clock = ManualClock::new(42);
    let mut store = memory_store(&clock);

    let record = store
        .create(
            RecordDraft::new("Milk")
                .with_content("2 liters")
                .with_tag_input("Grocery, dairy, ,DAIRY"),
        )
        .unwrap();

    assert_eq!(record.tags, vec!["dairy", "grocery"]);
    assert_eq!(record.content, "2 liters");
    assert_eq!((record.created, record.modified), (42, 42));
    assert_eq!(store.get(&record.id).unwrap(), Some(record));
}

#[test]
fn blank_name_create_fails_without_writing() {
    let clock = ManualClock::new(1);
    let mut store = memory_store(&clock);
    store.create(RecordDraft::new("keep")).unwrap();
    let before = store.get_all().unwrap();

    for blank in ["", "   ", "\t\n"] {
        let err = store.create(RecordDraft::new(blank)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(RecordValidationError::EmptyName)
        ));
    }
    assert_eq!(store.get_all().unwrap(), before);
}

#[test]
fn update_preserves_identity_and_strictly_increases_modified() {
    let clock = ManualClock::new(100);
    let mut store = memory_store(&clock);
    let created = store
        .create(RecordDraft::new("Milk").with_tag_input("dairy"))
        .unwrap();

    clock.advance(50);
    let updated = store
        .update(
            &created.id,
            RecordPatch {
                name: " Oat milk ".to_string(),
                content: "barista".to_string(),
                tags: vec!["Vegan".to_string()],
            },
        )
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created, created.created);
    assert_eq!(updated.modified, 150);
    assert_eq!(updated.name, "Oat milk");
    assert_eq!(updated.tags, vec!["vegan"]);

    let again = store
        .update(&created.id, RecordPatch::from_record(&updated))
        .unwrap();
    assert!(again.modified > updated.modified);
    assert_eq!(store.get_all().unwrap(), vec![again]);
}

#[test]
fn update_unknown_id_or_blank_name_fails_without_writing() {
    let clock = ManualClock::new(1);
    let mut store = memory_store(&clock);
    let created = store.create(RecordDraft::new("Milk")).unwrap();

    let err = store
        .update("missing", RecordPatch::from_record(&created))
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == "missing"));

    let mut blank = RecordPatch::from_record(&created);
    blank.name = "  ".to_string();
    let err = store.update(&created.id, blank).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    assert_eq!(store.get_all().unwrap(), vec![created]);
}

#[test]
fn delete_removes_and_unknown_delete_is_noop() {
    let clock = ManualClock::new(1);
    let mut store = memory_store(&clock);
    let first = store.create(RecordDraft::new("first")).unwrap();
    let second = store.create(RecordDraft::new("second")).unwrap();

    store.delete("does-not-exist").unwrap();
    assert_eq!(store.get_all().unwrap().len(), 2);

    store.delete(&first.id).unwrap();
    store.delete(&first.id).unwrap();
    assert_eq!(store.get_all().unwrap(), vec![second]);
}

#[test]
fn replace_all_installs_collection_verbatim() {
    let clock = ManualClock::new(1);
    let mut store = memory_store(&clock);
    store.create(RecordDraft::new("old")).unwrap();

    let mut replacement = store.get_all().unwrap();
    replacement[0].name = "renamed elsewhere".to_string();
    store.replace_all(replacement.clone()).unwrap();
    assert_eq!(store.get_all().unwrap(), replacement);

    store.replace_all(Vec::new()).unwrap();
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn backend_write_failure_propagates_and_keeps_previous_state() {
    let clock = ManualClock::new(1);
    let mut store = memory_store(&clock);
    store.create(RecordDraft::new("persisted")).unwrap();
    let before = store.get_all().unwrap();

    store.backend_mut().set_fail_writes(true);
    let err = store.create(RecordDraft::new("lost")).unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)));
    assert_eq!(store.get_all().unwrap(), before);
}

#[test]
fn collection_key_follows_app_id() {
    let clock = ManualClock::new(1);
    let config = AppConfig::new("pantry");
    let mut store = KvRecordStore::with_clock(MemoryKeyValueBackend::new(), &config, &clock);
    store.create(RecordDraft::new("flour")).unwrap();

    use itemdeck_core::KeyValueBackend;
    assert!(store.backend().get("pantry_items").unwrap().is_some());
    assert!(store.backend().get("testApp_items").unwrap().is_none());
}
