use folio_test_utils::FailingStore;
use folio_theme::{
    DarkModeController, JsonFileStore, MemoryStore, PreferenceStore, Theme, DARK_CLASS,
    STORAGE_KEY,
};
use pretty_assertions::assert_eq;

#[test]
fn test_toggle_survives_reload_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let mut controller = DarkModeController::load(JsonFileStore::open(&path).unwrap());
    assert_eq!(controller.theme(), Theme::Dark);
    assert_eq!(controller.toggle(), Theme::Light);
    assert!(!controller.root_classes().contains(DARK_CLASS));

    let reloaded = DarkModeController::load(JsonFileStore::open(&path).unwrap());
    assert_eq!(reloaded.theme(), Theme::Light);
    assert_eq!(
        reloaded.store().get(STORAGE_KEY).unwrap().as_deref(),
        Some("false")
    );
}

#[test]
fn test_malformed_value_falls_back_to_dark() {
    for raw in ["yes", "", "{\"dark\":true}", "1"] {
        let store = MemoryStore::new().with_value(STORAGE_KEY, raw);
        let controller = DarkModeController::load(store);
        assert!(controller.is_dark(), "value {raw:?}");
        assert!(controller.root_classes().contains(DARK_CLASS));
    }
}

#[test]
fn test_unreadable_store_uses_default() {
    let controller = DarkModeController::load(FailingStore::reads());
    assert_eq!(controller.theme(), Theme::Dark);
}

#[test]
fn test_write_failure_still_switches_theme() {
    let mut controller = DarkModeController::load(FailingStore::writes());
    controller.toggle();

    assert_eq!(controller.theme(), Theme::Light);
    assert!(controller.store().inner.is_empty());
    assert_eq!(controller.root_classes().to_attribute(), "");
}

#[test]
fn test_toggle_twice_restores_flag() {
    let mut controller = DarkModeController::load(MemoryStore::new());
    controller.toggle();
    controller.toggle();

    let store = controller.into_store();
    assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("true"));
}
