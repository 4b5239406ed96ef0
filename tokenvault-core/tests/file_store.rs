use tokenvault_core::store::FileStore;
use tokenvault_core::{Error, TokenStore, VaultRecord};

#[test]
fn insert_and_find_both_directions() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = FileStore::open(dir.path()).expect("open");

    store
        .insert(VaultRecord::new("4111-1111-1111-1111", "NDExMQ"))
        .expect("insert");

    let by_sde = store
        .find_by_sde("4111-1111-1111-1111")
        .expect("find")
        .expect("present");
    assert_eq!(by_sde.token, "NDExMQ");

    let by_token = store
        .find_by_token("NDExMQ")
        .expect("find")
        .expect("present");
    assert_eq!(by_token.sde, "4111-1111-1111-1111");
}

#[test]
fn duplicate_insert_is_a_conflict() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = FileStore::open(dir.path()).expect("open");

    let record = VaultRecord::new("once", "b25jZQ");
    store.insert(record.clone()).expect("insert");
    assert_eq!(store.insert(record).expect_err("duplicate"), Error::AlreadyExists);
}

#[test]
fn records_survive_reopen() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    {
        let store = FileStore::open(dir.path()).expect("open");
        store
            .insert(VaultRecord::new("durable", "ZHVyYWJsZQ"))
            .expect("insert");
    }

    let reopened = FileStore::open(dir.path()).expect("reopen");
    let record = reopened
        .find_by_token("ZHVyYWJsZQ")
        .expect("find")
        .expect("present");
    assert_eq!(record.sde, "durable");
}

#[test]
fn unknown_keys_resolve_to_none() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = FileStore::open(dir.path()).expect("open");
    assert!(store.find_by_sde("missing").expect("find").is_none());
    assert!(store.find_by_token("missing").expect("find").is_none());
}

#[test]
fn keys_with_path_hostile_characters_are_safe() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = FileStore::open(dir.path()).expect("open");

    let sde = "../../etc/passwd";
    store
        .insert(VaultRecord::new(sde, "escaped"))
        .expect("insert");
    let record = store.find_by_sde(sde).expect("find").expect("present");
    assert_eq!(record.token, "escaped");
}
