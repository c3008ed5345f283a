//! Update traversal against fake remotes.

mod common;

use common::*;
use puck::engine::UpdateOptions;
use puck::error::PuckError;

fn no_verify() -> UpdateOptions {
    UpdateOptions {
        verify: false,
        ..UpdateOptions::default()
    }
}

#[test]
fn clones_and_checks_out_lexicographically_latest_tag() {
    let ws = Workspace::new(&manifest(&[short("a", "v1.*")], "{}"));
    let source = FakeSource::new().with_remote(
        &url("a"),
        FakeRemote::new()
            .tag("v1.0.0", None)
            .tag("v1.2.0", None)
            .tag("v1.10.0", None)
            .tag("v2.0.0", None),
    );
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, _recorder) = recording_sink();

    let mut project = ws.project();
    walker(&source, &invoker, &prompter, &events)
        .update(&mut project, &UpdateOptions::default())
        .unwrap();

    assert_eq!(
        source.log(),
        vec!["clone a", "list-tags a", "verify a v1.2.0", "checkout a v1.2.0"]
    );
    assert_eq!(head_of(&ws.dep("a")).as_deref(), Some("v1.2.0"));
    assert!(invoker.calls().is_empty());
}

#[test]
fn diamond_dependency_is_fetched_once() {
    let ws = Workspace::new(&manifest(&[long("x", ""), long("y", "")], "{}"));
    let source = FakeSource::new()
        .with_remote(&url("x"), FakeRemote::new().manifest(&manifest(&[long("z", "")], "{}")))
        .with_remote(&url("y"), FakeRemote::new().manifest(&manifest(&[long("z", "")], "{}")))
        .with_remote(&url("z"), FakeRemote::new());
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, recorder) = recording_sink();

    let mut project = ws.project();
    walker(&source, &invoker, &prompter, &events)
        .update(&mut project, &UpdateOptions::default())
        .unwrap();

    assert_eq!(source.ops_on("z"), vec!["clone z", "checkout z main"]);
    assert_eq!(recorder.count("dependency-conflict"), 0);
    insta::assert_snapshot!(recorder.lines().join("\n"), @r###"
    update x
    checkout x
    load-project x
    update z
    checkout z
    load-project z
    update y
    checkout y
    load-project y
    "###);

    // Nested projects share the root's dependency directory.
    assert!(ws.dep("z").join(".fake-origin").is_file());
    assert!(!ws.dep("x").join("deps").exists());
}

#[test]
fn env_only_conflict_stops_before_second_fetch() {
    let ws = Workspace::new(&manifest(
        &[
            long("a", r#""env": { "MODE": "one" }"#),
            long("a", r#""env": { "MODE": "two" }"#),
        ],
        "{}",
    ));
    let source = FakeSource::new().with_remote(&url("a"), FakeRemote::new());
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, recorder) = recording_sink();

    let mut project = ws.project();
    let err = walker(&source, &invoker, &prompter, &events)
        .update(&mut project, &UpdateOptions::default())
        .unwrap_err();

    assert!(matches!(err, PuckError::DependencyConflict { .. }), "{err}");
    assert_eq!(err.exit_code(), 4);
    assert_eq!(recorder.count("dependency-conflict"), 1);
    assert_eq!(recorder.subjects("update"), vec!["a"]);
    assert_eq!(source.log(), vec!["clone a", "checkout a main"]);
}

#[test]
fn nested_declarations_with_different_patterns_conflict() {
    let ws = Workspace::new(&manifest(&[long("x", ""), long("y", "")], "{}"));
    let source = FakeSource::new()
        .with_remote(&url("x"), FakeRemote::new().manifest(&manifest(&[short("z", "v1.*")], "{}")))
        .with_remote(&url("y"), FakeRemote::new().manifest(&manifest(&[short("z", "v2.*")], "{}")))
        .with_remote(
            &url("z"),
            FakeRemote::new().tag("v1.0", None).tag("v2.0", None),
        );
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, recorder) = recording_sink();

    let mut project = ws.project();
    let err = walker(&source, &invoker, &prompter, &events)
        .update(&mut project, &no_verify())
        .unwrap_err();

    assert_eq!(err.exit_code(), 4);
    assert_eq!(recorder.count("dependency-conflict"), 1);
    assert_eq!(recorder.subjects("dependency-conflict"), vec!["z"]);
    assert_eq!(head_of(&ws.dep("z")).as_deref(), Some("v1.0"));
    assert_eq!(source.ops_on("z"), vec!["clone z", "list-tags z", "checkout z v1.0"]);
}

#[test]
fn cycle_is_reported_before_refetching() {
    let ws = Workspace::new(&manifest(&[long("a", "")], "{}"));
    let source = FakeSource::new()
        .with_remote(&url("a"), FakeRemote::new().manifest(&manifest(&[long("b", "")], "{}")))
        .with_remote(&url("b"), FakeRemote::new().manifest(&manifest(&[long("a", "")], "{}")));
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, recorder) = recording_sink();

    let mut project = ws.project();
    let err = walker(&source, &invoker, &prompter, &events)
        .update(&mut project, &UpdateOptions::default())
        .unwrap_err();

    match &err {
        PuckError::DependencyCycle { chain, .. } => assert_eq!(chain, "a -> b -> a"),
        other => panic!("expected a cycle, got {other}"),
    }
    assert_eq!(err.exit_code(), 6);
    assert_eq!(recorder.count("dependency-cycle"), 1);
    assert_eq!(source.ops_on("a"), vec!["clone a", "checkout a main"]);
}

#[test]
fn self_dependency_is_a_cycle() {
    let ws = Workspace::new(&manifest(&[long("a", "")], "{}"));
    let source = FakeSource::new()
        .with_remote(&url("a"), FakeRemote::new().manifest(&manifest(&[long("a", "")], "{}")));
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, _recorder) = recording_sink();

    let mut project = ws.project();
    let err = walker(&source, &invoker, &prompter, &events)
        .update(&mut project, &UpdateOptions::default())
        .unwrap_err();

    assert_eq!(err.exit_code(), 6);
    assert!(err.to_string().contains("a -> a"), "{err}");
}

#[test]
fn second_update_fetches_and_lands_on_same_versions() {
    let ws = Workspace::new(&manifest(&[short("a", "v1.*"), long("b", "")], "{}"));
    let source = FakeSource::new()
        .with_remote(&url("a"), FakeRemote::new().tag("v1.0", None).tag("v1.1", None))
        .with_remote(&url("b"), FakeRemote::new());
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, _recorder) = recording_sink();
    let walker = walker(&source, &invoker, &prompter, &events);

    walker.update(&mut ws.project(), &no_verify()).unwrap();
    let first = (head_of(&ws.dep("a")), head_of(&ws.dep("b")));
    source.clear_log();

    walker.update(&mut ws.project(), &no_verify()).unwrap();
    let second = (head_of(&ws.dep("a")), head_of(&ws.dep("b")));

    assert_eq!(first, second);
    assert_eq!(
        source.log(),
        vec!["fetch a", "list-tags a", "checkout a v1.1", "fetch b", "checkout b main"]
    );
}

#[test]
fn upstream_manifest_change_is_followed() {
    let ws = Workspace::new(&manifest(&[long("a", "")], "{}"));
    let source = FakeSource::new()
        .with_remote(&url("a"), FakeRemote::new())
        .with_remote(&url("b"), FakeRemote::new());
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, _recorder) = recording_sink();
    let walker = walker(&source, &invoker, &prompter, &events);

    let mut project = ws.project();
    walker.update(&mut project, &UpdateOptions::default()).unwrap();
    assert!(!ws.dep("b").exists());

    source.set_remote(
        &url("a"),
        FakeRemote::new().manifest(&manifest(&[long("b", "")], "{}")),
    );
    walker.update(&mut project, &UpdateOptions::default()).unwrap();

    assert!(ws.dep("b").is_dir());
    assert_eq!(source.ops_on("b"), vec!["clone b", "checkout b main"]);
}

#[test]
fn no_matching_tags_warns_and_leaves_tree_as_fetched() {
    let ws = Workspace::new(&manifest(&[short("a", "v9.*")], "{}"));
    let source = FakeSource::new().with_remote(&url("a"), FakeRemote::new().tag("v1.0", None));
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, recorder) = recording_sink();

    let mut project = ws.project();
    walker(&source, &invoker, &prompter, &events)
        .update(&mut project, &UpdateOptions::default())
        .unwrap();

    assert_eq!(recorder.subjects("no-matching-tags"), vec!["a"]);
    assert_eq!(recorder.count("checkout"), 0);
    assert_eq!(source.log(), vec!["clone a", "list-tags a"]);
    assert_eq!(head_of(&ws.dep("a")), None);
}

#[test]
fn failed_tag_verification_aborts_before_checkout() {
    let ws = Workspace::new(&manifest(&[short("a", "v1.*")], "{}"));
    let source = FakeSource::new().with_remote(
        &url("a"),
        FakeRemote::new().tag("v1.0", None).unsigned("v1.0"),
    );
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, _recorder) = recording_sink();

    let mut project = ws.project();
    let err = walker(&source, &invoker, &prompter, &events)
        .update(&mut project, &UpdateOptions::default())
        .unwrap_err();

    assert!(matches!(err, PuckError::RepoVerification { .. }), "{err}");
    assert_eq!(err.exit_code(), 5);
    assert_eq!(source.log(), vec!["clone a", "list-tags a", "verify a v1.0"]);
}

#[test]
fn verification_can_be_disabled() {
    let ws = Workspace::new(&manifest(&[short("a", "v1.*")], "{}"));
    let source = FakeSource::new().with_remote(
        &url("a"),
        FakeRemote::new().tag("v1.0", None).unsigned("v1.0"),
    );
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, _recorder) = recording_sink();

    let mut project = ws.project();
    walker(&source, &invoker, &prompter, &events)
        .update(&mut project, &no_verify())
        .unwrap();

    assert_eq!(source.log(), vec!["clone a", "list-tags a", "checkout a v1.0"]);
}

#[test]
fn explicit_ref_is_checked_out() {
    let ws = Workspace::new(&manifest(&[long("a", r#""ref": "develop""#)], "{}"));
    let source = FakeSource::new().with_remote(&url("a"), FakeRemote::new().branch("develop", None));
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, _recorder) = recording_sink();

    let mut project = ws.project();
    walker(&source, &invoker, &prompter, &events)
        .update(&mut project, &UpdateOptions::default())
        .unwrap();

    assert_eq!(head_of(&ws.dep("a")).as_deref(), Some("develop"));
}

#[test]
fn unknown_ref_is_a_source_error() {
    let ws = Workspace::new(&manifest(&[long("a", r#""ref": "nope""#)], "{}"));
    let source = FakeSource::new().with_remote(&url("a"), FakeRemote::new());
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, _recorder) = recording_sink();

    let mut project = ws.project();
    let err = walker(&source, &invoker, &prompter, &events)
        .update(&mut project, &UpdateOptions::default())
        .unwrap_err();

    assert!(matches!(err, PuckError::Source(_)), "{err}");
    assert_eq!(err.exit_code(), 7);
}

#[test]
fn unreachable_remote_is_a_source_error() {
    let ws = Workspace::new(&manifest(&[long("a", "")], "{}"));
    let source = FakeSource::new();
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, _recorder) = recording_sink();

    let err = walker(&source, &invoker, &prompter, &events)
        .update(&mut ws.project(), &UpdateOptions::default())
        .unwrap_err();

    assert_eq!(err.exit_code(), 7);
    assert!(!ws.dep("a").exists());
}

#[test]
fn dev_dependencies_only_count_at_the_root() {
    let ws = Workspace::new(&manifest(&[long("a", ""), long("b", r#""dev": true"#)], "{}"));
    let source = FakeSource::new()
        .with_remote(
            &url("a"),
            FakeRemote::new().manifest(&manifest(&[long("c", r#""dev": true"#)], "{}")),
        )
        .with_remote(&url("b"), FakeRemote::new())
        .with_remote(&url("c"), FakeRemote::new());
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, recorder) = recording_sink();
    let walker = walker(&source, &invoker, &prompter, &events);

    let without_dev = UpdateOptions {
        include_dev: false,
        ..UpdateOptions::default()
    };
    walker.update(&mut ws.project(), &without_dev).unwrap();
    assert_eq!(recorder.subjects("update"), vec!["a"]);

    recorder.clear();
    walker.update(&mut ws.project(), &UpdateOptions::default()).unwrap();
    assert_eq!(recorder.subjects("update"), vec!["a", "b"]);
    assert!(!ws.dep("c").exists());
}

#[test]
fn mirror_is_used_when_primary_is_unknown() {
    let decl = format!(
        r#"{{ "repo": ["https://down.example/lib.git", "{}"], "path": "lib" }}"#,
        url("mirror")
    );
    let ws = Workspace::new(&manifest(&[decl], "{}"));
    let source = FakeSource::new().with_remote(&url("mirror"), FakeRemote::new());
    let invoker = FakeInvoker::new();
    let prompter = ScriptedPrompter::non_interactive();
    let (events, _recorder) = recording_sink();

    walker(&source, &invoker, &prompter, &events)
        .update(&mut ws.project(), &UpdateOptions::default())
        .unwrap();

    assert_eq!(source.log(), vec!["clone lib", "checkout lib main"]);
}
