use std::fs;

use registry_host::{build_coordinator, describe_file};

#[test]
fn registers_every_mwm_file_in_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Germany_Berlin.mwm"), b"berlin data").unwrap();
    fs::write(dir.path().join("France_Paris.mwm"), b"paris data").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();

    let coordinator = build_coordinator(16);
    let mut registered = Vec::new();

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().and_then(|e| e.to_str()) != Some("mwm") {
            continue;
        }
        let file = describe_file(&path).unwrap();
        let (lease, is_new) = coordinator.register(file).unwrap();
        assert!(is_new);
        assert!(lease.is_active());
        registered.push(lease);
    }

    assert_eq!(registered.len(), 2);
    assert_eq!(coordinator.enumerate_descriptors().len(), 2);

    drop(registered);
    coordinator.deregister_all();
    coordinator.cleanup();
}

#[test]
fn rejects_non_mwm_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("readme.txt");
    fs::write(&path, b"not a map file").unwrap();

    let file = describe_file(&path).unwrap();
    let coordinator = build_coordinator(4);
    assert!(coordinator.register(file).is_err());
    coordinator.cleanup();
}
