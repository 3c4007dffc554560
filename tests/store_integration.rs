//! Integration tests for the store.
//!
//! File store tests seed a directory tree from a FixedStore, then read it
//! back through FileStore. The contract tests at the bottom run the same
//! checks against both implementations.

mod common;

use std::collections::HashSet;
use std::fs;

use common::{file_store, FixedStore, IGNITION_CONTENT};

use bootstore::core::entity::{EntityError, Group, Profile};
use bootstore::storage::{ErrorKind, Store, StoreError};

// =============================================================================
// Groups
// =============================================================================

mod groups {
    use super::*;

    #[test]
    fn seeded_groups_can_be_retrieved() {
        let dir = FixedStore::new()
            .with_group(common::group())
            .with_group(common::group_no_metadata())
            .seed();
        let store = file_store(dir.path());

        assert_eq!(store.group_get("test-group").expect("get"), common::group());
        assert_eq!(
            store.group_get("group-no-metadata").expect("get"),
            common::group_no_metadata()
        );
    }

    #[test]
    fn missing_group_is_not_found() {
        let dir = FixedStore::new().seed();
        let store = file_store(dir.path());

        match store.group_get("missing") {
            Err(err @ StoreError::NotFound { .. }) => {
                assert_eq!(err.to_string(), "group not found: missing");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn list_returns_exactly_the_seeded_groups() {
        let dir = FixedStore::new()
            .with_group(common::group())
            .with_group(common::group_no_metadata())
            .seed();
        let store = file_store(dir.path());

        let groups = store.group_list().expect("list");
        assert_eq!(groups.len(), 2);
        assert!(groups.contains(&common::group()));
        assert!(groups.contains(&common::group_no_metadata()));
        assert!(!groups.contains(&Group::default()));
    }

    #[test]
    fn put_then_get_round_trips() {
        let dir = FixedStore::new().seed();
        let store = file_store(dir.path());

        store.group_put(&common::group()).expect("put");
        assert_eq!(store.group_get("test-group").expect("get"), common::group());
    }

    #[test]
    fn put_writes_rich_form_on_disk() {
        let dir = FixedStore::new().seed();
        let store = file_store(dir.path());
        store.group_put(&common::group()).expect("put");

        let content =
            fs::read_to_string(dir.path().join("groups/test-group.json")).expect("read file");
        assert!(content.contains("\n\t\"selector\": {\n\t\t\"mac\""), "{}", content);
        assert!(
            content.contains(r#""metadata": {"pod_network":"10.2.0.0/16","service_name":"etcd2"}"#),
            "{}",
            content
        );
    }

    #[test]
    fn hand_written_group_file_is_readable() {
        let dir = FixedStore::new().seed();
        fs::write(
            dir.path().join("groups/hand.json"),
            "{\n  \"id\": \"hand\",\n  \"profile\": \"p\",\n  \"metadata\": {\n    \"k\": [1, 2]\n  }\n}\n",
        )
        .expect("write");
        let store = file_store(dir.path());

        let group = store.group_get("hand").expect("get");
        assert_eq!(group.profile, "p");
        assert_eq!(group.metadata.get("k"), Some(&serde_json::json!([1, 2])));
    }
}

// =============================================================================
// Profiles
// =============================================================================

mod profiles {
    use super::*;

    #[test]
    fn put_then_get() {
        let dir = FixedStore::new().seed();
        let store = file_store(dir.path());

        store.profile_put(&common::profile()).expect("put");
        assert_eq!(store.profile_get("g1h2i3j4").expect("get"), common::profile());
    }

    #[test]
    fn invalid_put_is_rejected_and_not_saved() {
        let dir = FixedStore::new().seed();
        let store = file_store(dir.path());

        match store.profile_put(&Profile::default()) {
            Err(StoreError::InvalidEntity(EntityError::IdRequired)) => {}
            other => panic!("expected IdRequired, got {:?}", other),
        }

        assert!(store.profile_get("").unwrap_err().is_not_found());
        let entries = fs::read_dir(dir.path().join("profiles"))
            .expect("read dir")
            .count();
        assert_eq!(entries, 0);
    }

    #[test]
    fn seeded_profile_can_be_retrieved() {
        let dir = FixedStore::new().with_profile(common::profile()).seed();
        let store = file_store(dir.path());

        assert_eq!(store.profile_get("g1h2i3j4").expect("get"), common::profile());
        assert_eq!(
            store.profile_get("no-such-profile").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn list_single_profile() {
        let dir = FixedStore::new().with_profile(common::profile()).seed();
        let store = file_store(dir.path());

        let profiles = store.profile_list().expect("list");
        assert_eq!(profiles, vec![common::profile()]);
    }

    #[test]
    fn list_fails_on_corrupt_profile() {
        let dir = FixedStore::new().with_profile(common::profile()).seed();
        fs::write(dir.path().join("profiles/broken.json"), "{\"id\": ").expect("write");
        let store = file_store(dir.path());

        let err = store.profile_list().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.to_string().contains("broken.json"));
    }
}

// =============================================================================
// Config payloads
// =============================================================================

mod payloads {
    use super::*;

    #[test]
    fn ignition_is_returned_verbatim() {
        let dir = FixedStore::new()
            .with_ignition("myignition.json", IGNITION_CONTENT)
            .seed();
        let store = file_store(dir.path());

        assert_eq!(
            store.ignition_get("myignition.json").expect("get"),
            IGNITION_CONTENT.as_bytes()
        );
    }

    #[test]
    fn cloud_config_is_returned_verbatim() {
        let dir = FixedStore::new()
            .with_cloud("cloudcfg.yaml", "#cloud-config")
            .seed();
        let store = file_store(dir.path());

        assert_eq!(store.cloud_get("cloudcfg.yaml").expect("get"), b"#cloud-config");
    }

    #[test]
    fn significant_characters_survive() {
        let content = "#cloud-config\nwrite_files:\n  - content: \"say \\\"hi\\\"\"\n    path: /etc/motd ✓\r\n\t\n";
        let dir = FixedStore::new().with_cloud("tricky.yml", content).seed();
        let store = file_store(dir.path());

        assert_eq!(store.cloud_get("tricky.yml").expect("get"), content.as_bytes());
    }

    #[test]
    fn non_utf8_cloud_config_is_returned_as_is() {
        let content: &[u8] = b"#cloud-config\n# caf\xe9\n";
        let dir = FixedStore::new().with_cloud("latin1.yaml", content).seed();
        let store = file_store(dir.path());

        assert_eq!(store.cloud_get("latin1.yaml").expect("get"), content);
    }

    #[test]
    fn missing_payloads_are_not_found() {
        let dir = FixedStore::new().seed();
        let store = file_store(dir.path());

        assert!(store.ignition_get("absent.ign").unwrap_err().is_not_found());
        assert!(store.cloud_get("absent.yaml").unwrap_err().is_not_found());
    }
}

// =============================================================================
// Store contract (both implementations)
// =============================================================================

mod contract {
    use super::*;

    fn check_put_get_list(store: &dyn Store) {
        let a = common::group();
        let b = common::group_no_metadata();
        store.group_put(&a).expect("put a");
        store.group_put(&b).expect("put b");

        let ids: HashSet<String> = store
            .group_list()
            .expect("list")
            .into_iter()
            .map(|g| g.id)
            .collect();
        let expected: HashSet<String> = [a.id.clone(), b.id.clone()].into_iter().collect();
        assert_eq!(ids, expected);

        assert_eq!(store.group_get(&a.id).expect("get"), a);
    }

    fn check_validation_gate(store: &dyn Store) {
        let err = store.group_put(&Group::new("")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEntity);
        assert!(store.group_list().expect("list").is_empty());
    }

    fn check_not_found(store: &dyn Store) {
        assert!(store.group_get("never-written").unwrap_err().is_not_found());
        assert!(store.profile_get("never-written").unwrap_err().is_not_found());
    }

    #[test]
    fn file_store_honors_contract() {
        let dir = FixedStore::new().seed();
        check_validation_gate(&file_store(dir.path()));
        check_not_found(&file_store(dir.path()));
        check_put_get_list(&file_store(dir.path()));
    }

    #[test]
    fn fixed_store_honors_contract() {
        check_validation_gate(&FixedStore::new());
        check_not_found(&FixedStore::new());
        check_put_get_list(&FixedStore::new());
    }
}
