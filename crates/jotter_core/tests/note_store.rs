use jotter_core::{
    FileNoteRepository, Note, NoteRepository, NoteService, NoteServiceError, NoteValidationError,
    StoreError,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn file_service(path: &Path) -> NoteService<FileNoteRepository> {
    NoteService::new(FileNoteRepository::new(path))
}

#[test]
fn create_then_list_returns_note_with_exact_content_and_tags() {
    let dir = tempfile::tempdir().unwrap();
    let service = file_service(&dir.path().join("notes.json"));

    let created = service
        .create_note("buy milk", tags(&["home", "errand", "home"]))
        .unwrap();
    assert_eq!(created.id, 1);

    let listed = service.list_notes().unwrap();
    assert_eq!(
        listed,
        vec![Note {
            id: 1,
            content: "buy milk".to_string(),
            tags: tags(&["home", "errand", "home"]),
        }]
    );
}

#[test]
fn ids_stay_unique_and_increasing_across_removals() {
    let dir = tempfile::tempdir().unwrap();
    let service = file_service(&dir.path().join("notes.json"));

    let mut seen = Vec::new();
    for round in 0..4 {
        let note = service
            .create_note(format!("note {round}"), Vec::new())
            .unwrap();
        seen.push(note.id);
        // Removing the newest note must not let its id come back.
        assert!(service.remove_note(note.id).unwrap());
    }
    let first_kept = service.create_note("kept", Vec::new()).unwrap();
    seen.push(first_kept.id);

    assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[test]
fn ids_are_not_reused_after_clear() {
    let dir = tempfile::tempdir().unwrap();
    let service = file_service(&dir.path().join("notes.json"));
    service.create_note("a", Vec::new()).unwrap();
    service.create_note("b", Vec::new()).unwrap();

    assert_eq!(service.clear_notes().unwrap(), 2);
    assert!(service.list_notes().unwrap().is_empty());
    assert_eq!(service.create_note("c", Vec::new()).unwrap().id, 3);
}

#[test]
fn find_returns_case_sensitive_substring_subset_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let service = file_service(&dir.path().join("notes.json"));
    service.create_note("Rust ownership", Vec::new()).unwrap();
    service.create_note("groceries", Vec::new()).unwrap();
    service.create_note("rust belt trip", Vec::new()).unwrap();
    service.create_note("More Rust", Vec::new()).unwrap();

    let hits: Vec<_> = service
        .find_notes("Rust")
        .unwrap()
        .into_iter()
        .map(|note| note.id)
        .collect();
    assert_eq!(hits, vec![1, 4]);

    let expected: Vec<Note> = service
        .list_notes()
        .unwrap()
        .into_iter()
        .filter(|note| note.content.contains("rust"))
        .collect();
    assert_eq!(service.find_notes("rust").unwrap(), expected);

    assert!(service.find_notes("nothing here").unwrap().is_empty());
    assert_eq!(service.find_notes("").unwrap(), service.list_notes().unwrap());
}

#[test]
fn remove_missing_id_returns_false_and_keeps_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let service = file_service(&path);
    service.create_note("keep me", Vec::new()).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    assert!(!service.remove_note(99).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert_eq!(service.list_notes().unwrap().len(), 1);
}

#[test]
fn remove_drops_only_the_target_note() {
    let dir = tempfile::tempdir().unwrap();
    let service = file_service(&dir.path().join("notes.json"));
    let first = service.create_note("first", Vec::new()).unwrap();
    let second = service.create_note("second", Vec::new()).unwrap();

    assert!(service.remove_note(first.id).unwrap());
    let ids: Vec<_> = service
        .list_notes()
        .unwrap()
        .into_iter()
        .map(|note| note.id)
        .collect();
    assert_eq!(ids, vec![second.id]);
}

#[test]
fn persisted_collection_round_trips_through_a_fresh_repository() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store").join("notes.json");
    let writer = file_service(&path);
    writer
        .create_note("line one\nline two \"quoted\"", tags(&["a", "b"]))
        .unwrap();
    writer.create_note("ünïcødé ✓", Vec::new()).unwrap();
    writer.create_note("third", tags(&["c"])).unwrap();
    writer.remove_note(2).unwrap();
    let expected = writer.list_notes().unwrap();
    drop(writer);

    let reader = file_service(&path);
    assert_eq!(reader.list_notes().unwrap(), expected);
    assert_eq!(reader.create_note("next", Vec::new()).unwrap().id, 4);
}

#[test]
fn reads_on_missing_store_are_empty_and_do_not_create_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let service = file_service(&path);

    assert!(service.list_notes().unwrap().is_empty());
    assert!(service.find_notes("x").unwrap().is_empty());
    assert!(!path.exists());
}

#[test]
fn validation_errors_do_not_persist_anything() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let service = file_service(&path);

    let err = service.create_note("", Vec::new()).unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::Validation(NoteValidationError::EmptyContent)
    ));

    let err = service.create_note("ok", tags(&["fine", ""])).unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::Validation(NoteValidationError::BlankTag(_))
    ));
    assert!(!path.exists());
}

#[test]
fn corrupt_store_surfaces_storage_error_and_stays_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    fs::write(&path, "{\"notes\": [1, 2").unwrap();
    let service = file_service(&path);

    let err = service.list_notes().unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::Storage(StoreError::Corrupt { .. })
    ));
    assert!(err.to_string().contains("corrupt"));

    assert!(service.create_note("x", Vec::new()).is_err());
    assert!(service.clear_notes().is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"notes\": [1, 2");
}

#[cfg(unix)]
#[test]
fn unreadable_store_path_surfaces_io_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be cannot be read as a document.
    let path = dir.path().join("notes.json");
    fs::create_dir(&path).unwrap();
    let service = file_service(&path);

    let err = service.list_notes().unwrap_err();
    assert!(matches!(err, NoteServiceError::Storage(StoreError::Io { .. })));
}

#[test]
fn concurrent_creates_on_one_repository_assign_distinct_ids() {
    let dir = tempfile::tempdir().unwrap();
    let service = Arc::new(file_service(&dir.path().join("notes.json")));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                (0..5)
                    .map(|idx| {
                        service
                            .create_note(format!("worker {worker} note {idx}"), Vec::new())
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: BTreeSet<_> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    assert_eq!(ids.len(), 40);
    assert_eq!(ids.iter().copied().max(), Some(40));
    assert_eq!(service.list_notes().unwrap().len(), 40);
}

#[test]
fn repository_path_is_exposed_through_service() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let service = file_service(&path);
    assert_eq!(service.repo().path(), path.as_path());
    assert!(service.repo().list_notes().unwrap().is_empty());
}

#[test]
fn exhausted_id_space_fails_create_and_keeps_store_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let original = format!(
        r#"{{"version":1,"last_id":{max},"notes":[{{"id":{max},"content":"x","tags":[]}}]}}"#,
        max = u64::MAX
    );
    fs::write(&path, &original).unwrap();
    let service = file_service(&path);

    let err = service.create_note("y", Vec::new()).unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::Storage(StoreError::IdSpaceExhausted)
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);

    let listed = service.list_notes().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, u64::MAX);
}

#[cfg(unix)]
#[test]
fn failed_save_keeps_previous_file_and_leaves_no_temp_files() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store_dir = dir.path().join("store");
    let path = store_dir.join("notes.json");
    let service = file_service(&path);
    service.create_note("kept", tags(&["a"])).unwrap();
    let before = fs::read(&path).unwrap();

    fs::set_permissions(&store_dir, fs::Permissions::from_mode(0o555)).unwrap();
    // Privileged users ignore directory permissions, so the write cannot be forced to fail.
    if fs::File::create(store_dir.join("writable-check")).is_ok() {
        fs::set_permissions(&store_dir, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let create_err = service.create_note("lost", Vec::new()).unwrap_err();
    let remove_err = service.remove_note(1).unwrap_err();
    let clear_err = service.clear_notes().unwrap_err();
    fs::set_permissions(&store_dir, fs::Permissions::from_mode(0o755)).unwrap();

    for err in [create_err, remove_err, clear_err] {
        assert!(matches!(err, NoteServiceError::Storage(StoreError::Io { .. })));
    }
    assert_eq!(fs::read(&path).unwrap(), before);
    let entries: Vec<_> = fs::read_dir(&store_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("notes.json")]);
    assert_eq!(service.list_notes().unwrap().len(), 1);
}
