use super::*;
use crate::utils::test_utils::temp_store;
use clap::Parser;
use std::path::Path;

#[test]
fn no_subcommand_means_run() {
    let args = Args::try_parse_from(["chatdock"]).expect("parse failed");
    assert!(args.command.is_none());
    assert!(!args.recover_cache);
}

#[test]
fn global_flags_follow_subcommands() {
    let args = Args::try_parse_from([
        "chatdock",
        "list",
        "--config",
        "/tmp/alt.toml",
        "--verbose",
        "--recover-cache",
    ])
    .expect("parse failed");

    assert_eq!(args.command, Some(Commands::List));
    assert_eq!(args.config.as_deref(), Some(Path::new("/tmp/alt.toml")));
    assert!(args.verbose);
    assert!(args.recover_cache);
}

#[test]
fn add_parses_options() {
    let args = Args::try_parse_from([
        "chatdock",
        "add",
        "Le Chat",
        "https://chat.mistral.ai/",
        "--icon",
        "wind",
        "--pinned",
        "--default",
    ])
    .expect("parse failed");

    assert_eq!(
        args.command,
        Some(Commands::Add {
            label: "Le Chat".to_string(),
            url: "https://chat.mistral.ai/".to_string(),
            icon: Some("wind".to_string()),
            pinned: true,
            set_as_default: true,
        })
    );
}

#[test]
fn explicit_config_path_is_used() {
    let file = resolve_settings_file(Some(PathBuf::from("/tmp/x/settings.toml")))
        .expect("resolve failed");
    assert_eq!(file.path(), Path::new("/tmp/x/settings.toml"));
}

#[test]
fn maintenance_add_then_set_default() {
    let (_temp_dir, mut store) = temp_store();

    let output = run_maintenance(
        &Commands::Add {
            label: "Bot".to_string(),
            url: "https://bot.example/".to_string(),
            icon: None,
            pinned: false,
            set_as_default: false,
        },
        &mut store,
    )
    .expect("add failed");
    assert!(output.starts_with("✅ Added provider 'Bot' as bot-"));

    let id = store.providers()[3].id.clone();
    run_maintenance(&Commands::SetDefault { id: id.clone() }, &mut store)
        .expect("set-default failed");
    assert_eq!(store.default_id(), Some(id.as_str()));

    let listing = run_maintenance(&Commands::List, &mut store).expect("list failed");
    assert!(listing.contains(&format!("| {id}* | Bot |")));
}

#[test]
fn maintenance_reports_store_errors() {
    let (_temp_dir, mut store) = temp_store();

    let err = run_maintenance(
        &Commands::Remove {
            id: "nope".to_string(),
        },
        &mut store,
    )
    .expect_err("unknown id");
    assert!(err.to_string().contains("nope"));

    let err = run_maintenance(
        &Commands::Add {
            label: "Bad".to_string(),
            url: "ftp://x".to_string(),
            icon: None,
            pinned: false,
            set_as_default: false,
        },
        &mut store,
    )
    .expect_err("bad url");
    assert!(!err.to_string().is_empty());
    assert_eq!(store.providers().len(), 3);
}

#[test]
fn removing_default_reports_new_default() {
    let (_temp_dir, mut store) = temp_store();
    let output = run_maintenance(
        &Commands::Remove {
            id: "gpt".to_string(),
        },
        &mut store,
    )
    .expect("remove failed");
    assert_eq!(output, "✅ Removed gpt (default is claude)\n");
}
