use super::*;
use crate::core::builtin_providers::load_builtin_state;
use crate::core::config::SettingsFile;
use crate::core::relay::Topic;
use crate::core::view::DEFAULT_CHROME_HEIGHT;
use crate::utils::test_utils::{create_test_app, HostCall, RecordingHost};
use serde_json::json;
use tempfile::TempDir;

fn remote(url: &str) -> SurfaceSource {
    SurfaceSource::Remote(url.to_string())
}

#[test]
fn start_attaches_content_on_default_provider() {
    let (_temp_dir, app, host) = create_test_app();

    assert_eq!(
        host.calls()[0],
        HostCall::Create(Surface::Content, remote("https://chat.openai.com/"))
    );
    assert_eq!(host.attached_surfaces(), vec![Surface::Content]);
    assert!(!app.settings_open());
    assert!(host.deliveries().is_empty());
}

#[test]
fn start_opens_repaired_default_from_stale_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let file = SettingsFile::new(temp_dir.path().join("settings.toml"));
    let mut state = load_builtin_state();
    state.default_provider_id = Some("gone".to_string());
    file.save(&state).expect("save failed");

    let host = RecordingHost::new(1100, 700);
    let mut app = App::new(
        ProviderStore::open(file),
        Box::new(host.clone()),
        DEFAULT_CHROME_HEIGHT,
    );
    app.start();

    assert_eq!(app.store().default_id(), Some("gpt"));
    assert_eq!(
        host.calls()[0],
        HostCall::Create(Surface::Content, remote("https://chat.openai.com/"))
    );
}

#[test]
fn set_default_from_settings_loads_in_background_then_broadcasts() {
    let (_temp_dir, mut app, host) = create_test_app();
    app.show_settings(true);
    host.clear_calls();

    app.set_default("gemini").expect("set_default failed");

    assert_eq!(
        host.calls(),
        vec![
            HostCall::Load(Surface::Content, remote("https://gemini.google.com/")),
            HostCall::Deliver(Subscriber::Chrome, Topic::ProvidersChanged),
            HostCall::Deliver(Subscriber::Settings, Topic::ProvidersChanged),
        ]
    );
    assert!(app.settings_open());
    assert_eq!(host.attached_surfaces(), vec![Surface::Settings]);
}

#[test]
fn failed_mutation_has_no_side_effects() {
    let (_temp_dir, mut app, host) = create_test_app();
    host.clear_calls();

    let err = app.set_default("nonexistent").expect_err("unknown id");
    assert_eq!(err.kind(), "not_found");
    assert!(host.calls().is_empty());
    assert_eq!(app.store().default_id(), Some("gpt"));
}

#[test]
fn add_as_default_navigates_content() {
    let (_temp_dir, mut app, host) = create_test_app();

    let id = app
        .add_provider(NewProvider {
            label: "Mistral".to_string(),
            url: "https://chat.mistral.ai/".to_string(),
            set_as_default: true,
            ..Default::default()
        })
        .expect("add failed");

    assert_eq!(app.store().default_id(), Some(id.as_str()));
    assert_eq!(
        host.content_loads(),
        vec![remote("https://chat.mistral.ai/")]
    );
}

#[test]
fn removing_every_provider_shows_placeholder() {
    let (_temp_dir, mut app, host) = create_test_app();
    for id in ["claude", "gemini", "gpt"] {
        app.remove_provider(id).expect("remove failed");
    }

    assert_eq!(
        host.content_loads().last(),
        Some(&SurfaceSource::Placeholder)
    );
    let last = host
        .deliveries_of(Topic::ProvidersChanged)
        .pop()
        .expect("providers broadcast");
    assert_eq!(last, (Subscriber::Settings, json!({"providers": [], "defaultId": null})));
}

#[test]
fn update_broadcasts_without_navigation() {
    let (_temp_dir, mut app, host) = create_test_app();
    host.clear_calls();

    app.update_provider(
        "claude",
        ProviderPatch {
            label: Some("Claude.ai".to_string()),
            ..Default::default()
        },
    )
    .expect("update failed");
    app.set_pinned("claude", false).expect("set_pinned failed");

    assert!(host.content_loads().is_empty());
    let chrome = host.deliveries_of(Topic::ProvidersChanged);
    assert_eq!(chrome[2].1["list"][1]["name"], json!("Claude.ai"));
    assert_eq!(chrome[2].1["list"][1]["pinned"], json!(false));
}

#[test]
fn navigate_from_settings_announces_closed_settings() {
    let (_temp_dir, mut app, host) = create_test_app();
    assert!(app.show_settings(true));

    assert!(app.navigate("https://claude.ai/"));
    assert!(!app.settings_open());
    assert_eq!(host.attached_surfaces(), vec![Surface::Content]);

    let states: Vec<_> = host
        .deliveries_of(Topic::SettingsStateChanged)
        .into_iter()
        .filter(|(s, _)| *s == Subscriber::Chrome)
        .map(|(_, v)| v)
        .collect();
    assert_eq!(states, vec![json!({"open": true}), json!({"open": false})]);
}

#[test]
fn navigate_rejects_invalid_url() {
    let (_temp_dir, mut app, host) = create_test_app();
    host.clear_calls();

    assert!(!app.navigate("file:///etc/passwd"));
    assert!(host.calls().is_empty());
}

#[test]
fn open_provider_navigates_without_changing_default() {
    let (_temp_dir, mut app, host) = create_test_app();
    app.open_provider("claude").expect("open failed");

    assert_eq!(host.content_loads(), vec![remote("https://claude.ai/")]);
    assert_eq!(app.store().default_id(), Some("gpt"));
    assert!(app.open_provider("missing").is_err());
}

#[test]
fn toggle_settings_flips_state() {
    let (_temp_dir, mut app, _host) = create_test_app();
    assert!(app.toggle_settings());
    assert!(!app.toggle_settings());
}

#[test]
fn content_navigation_reaches_chrome_only() {
    let (_temp_dir, mut app, host) = create_test_app();
    app.on_content_navigated("https://gemini.google.com/app/123");

    assert_eq!(
        host.deliveries(),
        vec![(
            Subscriber::Chrome,
            Topic::ActiveUrlChanged,
            json!({"url": "https://gemini.google.com/app/123", "providerId": "gemini"})
        )]
    );

    app.on_content_navigated("https://example.org/");
    let last = host.deliveries().pop().expect("delivered");
    assert_eq!(last.2["providerId"], json!(null));
}

#[test]
fn surface_ready_brings_one_subscriber_up_to_date() {
    let (_temp_dir, mut app, host) = create_test_app();
    app.on_surface_ready(Subscriber::Settings);

    let delivered = host.deliveries();
    assert_eq!(delivered.len(), 2);
    assert!(delivered.iter().all(|(s, _, _)| *s == Subscriber::Settings));
    assert_eq!(delivered[0].1, Topic::ProvidersChanged);
    assert_eq!(delivered[1].2, json!({"open": false}));
}

#[test]
fn chrome_height_is_validated_and_rounded() {
    let (_temp_dir, mut app, host) = create_test_app();

    assert!(!app.set_chrome_height(0.0));
    assert!(!app.set_chrome_height(-12.0));
    assert!(!app.set_chrome_height(f64::NAN));
    assert!(!app.set_chrome_height(0.4));
    assert_eq!(app.views().chrome_height(), DEFAULT_CHROME_HEIGHT);

    assert!(app.set_chrome_height(52.4));
    assert_eq!(app.views().chrome_height(), 52);
    assert_eq!(host.bounds_of(Surface::Content).map(|b| b.y), Some(52));
}

#[test]
fn resize_relays_out_attached_surface() {
    let (_temp_dir, mut app, host) = create_test_app();
    host.resize(900, 500);
    app.on_resize();

    let bounds = host.bounds_of(Surface::Content).expect("bounds applied");
    assert_eq!((bounds.width, bounds.height), (900, 452));
}

#[test]
fn window_controls_pass_through() {
    let (_temp_dir, mut app, host) = create_test_app();
    host.clear_calls();

    app.minimize();
    app.toggle_maximize();
    app.toggle_visibility();
    app.start_drag();
    app.request_close();

    assert_eq!(
        host.calls(),
        vec![
            HostCall::Minimize,
            HostCall::ToggleMaximize,
            HostCall::ToggleVisibility,
            HostCall::Drag,
            HostCall::Close,
        ]
    );
}

#[test]
fn teardown_runs_once_and_unregisters_hotkeys_last() {
    let (_temp_dir, mut app, host) = create_test_app();
    host.clear_calls();

    app.teardown();
    app.teardown();
    drop(app);

    assert_eq!(
        host.calls(),
        vec![HostCall::Destroy, HostCall::UnregisterHotkeys]
    );
}
