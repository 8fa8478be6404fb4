use gdb_workdir::*;

mod common;

#[test]
fn template_without_tokens_is_unchanged() {
    let ctx = common::projects_ctx();
    for t in ["", "/tmp", "relative/dir", "C:\\work", "$HOME/{x}"] {
        assert_eq!(resolve(t, &ctx), t);
    }
}

#[test]
fn home_substitution() {
    let ctx = ResolutionContext::new("/home/alice");
    assert_eq!(resolve("${home}", &ctx), "/home/alice");
    assert_eq!(resolve("${home}/src/app", &ctx), "/home/alice/src/app");

    let empty = ResolutionContext::new("");
    assert_eq!(resolve("${home}", &empty), "");
    assert_eq!(resolve("${home}/src", &empty), "/src");
}

#[test]
fn project_path_uses_first_root_containing_file() {
    let ctx = common::projects_ctx();
    let expected = common::fixture("projects/b").join("main.cpp");
    assert_eq!(
        resolve("${project_path:main.cpp}", &ctx),
        expected.to_string_lossy()
    );

    // present in both roots: registration order wins
    let expected = common::fixture("projects/a").join("helper.h");
    assert_eq!(
        resolve("${project_path:helper.h}", &ctx),
        expected.to_string_lossy()
    );
}

#[test]
fn project_path_handles_nested_relative_names() {
    let ctx = common::projects_ctx();
    let expected = common::fixture("projects/b").join("src/util.cpp");
    assert_eq!(
        resolve("${project_path:src/util.cpp}", &ctx),
        expected.to_string_lossy()
    );
}

#[test]
fn project_path_miss_falls_back_to_file_name() {
    let ctx = common::projects_ctx().with_current_file("/elsewhere/current.cpp");
    assert_eq!(resolve("${project_path:missing.cpp}", &ctx), "missing.cpp");
    assert_eq!(resolve("${project_path:}", &ctx), "");

    let no_roots = ResolutionContext::new("/home/alice");
    assert_eq!(resolve("${project_path:main.cpp}", &no_roots), "main.cpp");
}

#[test]
fn unreadable_or_missing_roots_are_skipped() {
    let ctx = ResolutionContext::new("/home/alice")
        .with_project_root(common::fixture("does-not-exist"))
        .with_project_root(common::fixture("projects/b/main.cpp"))
        .with_project_root(common::fixture("projects/b"));
    let expected = common::fixture("projects/b").join("main.cpp");
    assert_eq!(
        resolve("${project_path:main.cpp}", &ctx),
        expected.to_string_lossy()
    );
}

#[test]
fn folder_of_literal_path() {
    let ctx = ResolutionContext::default();
    assert_eq!(resolve("${folder:/path/to/file}", &ctx), "/path/to");
    assert_eq!(resolve("${folder:file.cpp}", &ctx), "file.cpp");
    assert_eq!(resolve("${folder:/file}", &ctx), "/");
    assert_eq!(resolve("${folder:${home}/x}", &ctx), "/");
}

#[test]
fn folder_of_project_file() {
    let ctx = common::projects_ctx();
    assert_eq!(
        resolve("${folder:${project_path:main.cpp}}", &ctx),
        common::fixture("projects/b").to_string_lossy()
    );
    assert_eq!(
        resolve("${folder:${project_path:src/util.cpp}}/build", &ctx),
        format!("{}/build", common::fixture("projects/b/src").display())
    );
    // missing file: folder of a bare name is the name itself
    assert_eq!(
        resolve("${folder:${project_path:missing.cpp}}", &ctx),
        "missing.cpp"
    );
}

#[test]
fn unrecognised_and_unterminated_spans_pass_through() {
    let ctx = ResolutionContext::new("/home/alice");
    assert_eq!(
        resolve("${env:PWD}/${home}", &ctx),
        "${env:PWD}//home/alice"
    );
    assert_eq!(resolve("${home}/${folder:/a/b", &ctx), "/home/alice/${folder:/a/b");
}

#[test]
fn resolving_twice_is_stable() {
    let ctx = common::projects_ctx();
    let template = "${folder:${project_path:main.cpp}}/out";
    let once = resolve(template, &ctx);
    assert_eq!(resolve(&once, &ctx), once);
    assert_eq!(resolve(template, &ctx), once);
}

#[test]
fn resolver_is_shareable_across_threads() {
    let ctx = std::sync::Arc::new(common::projects_ctx());
    let expected = resolve("${folder:${project_path:main.cpp}}", &ctx);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ctx = ctx.clone();
            std::thread::spawn(move || resolve("${folder:${project_path:main.cpp}}", &ctx))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().expect("thread"), expected);
    }
}

#[test]
fn parent_dir_cases() {
    assert_eq!(parent_dir("/a/b/c"), "/a/b");
    assert_eq!(parent_dir("/a/b/"), "/a/b");
    assert_eq!(parent_dir("a//b"), "a");
    assert_eq!(parent_dir("/"), "/");
    assert_eq!(parent_dir("name"), "name");
    assert_eq!(parent_dir(""), "");
}

#[test]
fn mixed_template_snapshot() {
    let ctx = ResolutionContext::new("/home/alice");
    let out = resolve(
        "${home}/.cache/${folder:/opt/tools/gdb}/${project_path:nope.cpp}/${x}",
        &ctx,
    );
    insta::assert_snapshot!(out, @"/home/alice/.cache//opt/tools/nope.cpp/${x}");
}

#[test]
fn from_env_snapshots_home_and_keeps_roots() {
    let ctx = ResolutionContext::from_env(vec![common::fixture("projects/b")]);
    if let Ok(home) = std::env::var("HOME") {
        assert_eq!(ctx.home_dir(), home);
    }
    assert_eq!(ctx.project_roots(), &[common::fixture("projects/b")]);
    assert!(ctx.current_file().is_none());
}
